//! Parameter metadata for external filter editors.
//!
//! Each filter exposes a typed descriptor listing its scalar parameters with
//! display name, range and default. This is presentation metadata only; the
//! filter functions never consult it. Image-valued inputs (the filtered image
//! itself, the specification reference) are part of each filter's signature
//! and are not listed here.

/// One scalar parameter: display name, allowed range and default value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    pub name: &'static str,
    pub min: f32,
    pub max: f32,
    pub default: f32,
}

/// A filter's display name and scalar parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterDescriptor {
    pub display_name: &'static str,
    pub params: &'static [ParamSpec],
}

pub const CIRCULAR_BOKEH: FilterDescriptor = FilterDescriptor {
    display_name: "Circular Bokeh",
    params: &[
        ParamSpec {
            name: "Bokeh Radius",
            min: 0.0,
            max: 20.0,
            default: 15.0,
        },
        ParamSpec {
            name: "Blur Radius",
            min: 0.0,
            max: 10.0,
            default: 2.0,
        },
        ParamSpec {
            name: "Bokeh Bias",
            min: 0.0,
            max: 1.0,
            default: 0.25,
        },
    ],
};

pub const ENDS_IN_CONTRAST_STRETCH: FilterDescriptor = FilterDescriptor {
    display_name: "Ends In Contrast Stretch",
    params: &[
        ParamSpec { name: "Percent Low Red", min: 0.0, max: 49.0, default: 0.0 },
        ParamSpec { name: "Percent Low Green", min: 0.0, max: 49.0, default: 0.0 },
        ParamSpec { name: "Percent Low Blue", min: 0.0, max: 49.0, default: 0.0 },
        ParamSpec { name: "Percent High Red", min: 0.0, max: 49.0, default: 0.0 },
        ParamSpec { name: "Percent High Green", min: 0.0, max: 49.0, default: 0.0 },
        ParamSpec { name: "Percent High Blue", min: 0.0, max: 49.0, default: 0.0 },
    ],
};

pub const CONTRAST_STRETCH: FilterDescriptor = FilterDescriptor {
    display_name: "Contrast Stretch",
    params: &[],
};

pub const HISTOGRAM_EQUALIZATION: FilterDescriptor = FilterDescriptor {
    display_name: "Histogram Equalization",
    params: &[],
};

pub const HISTOGRAM_SPECIFICATION: FilterDescriptor = FilterDescriptor {
    display_name: "Histogram Specification",
    params: &[],
};

/// All filter descriptors, for editor listings.
pub const ALL_FILTERS: &[FilterDescriptor] = &[
    CIRCULAR_BOKEH,
    CONTRAST_STRETCH,
    ENDS_IN_CONTRAST_STRETCH,
    HISTOGRAM_EQUALIZATION,
    HISTOGRAM_SPECIFICATION,
];
