//! Circular bokeh: weighted grayscale dilation with a circular structuring
//! element, followed by a Gaussian blur.
//!
//! The structuring element ("probe") is a square row-major grid of side
//! `2 * radius + 1`. Each cell holds a dilation cost in 0..255; 255 marks
//! cells outside the circular radius and excludes them. Lower weights let a
//! neighbor contribute more to the dilated maximum, so bright spots swell
//! into soft discs. The probe depends only on the bokeh radius and bias and
//! is cached across calls until either changes.

use tracing::debug;

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::error::{FilterError, Result};
use crate::filters::blur::gaussian_blur;

/// The cached circular probe used by [`CircularBokeh`].
#[derive(Debug, Clone, PartialEq)]
pub struct StructuringElement {
    radius: u32,
    bias: f32,
    weights: Vec<u8>,
}

impl StructuringElement {
    /// Build the probe for a given radius and bias.
    ///
    /// For each offset from center, `len = hypot(x, y) / radius`; cells with
    /// `len <= 1` get weight `(1 - len) * (1 - bias) * 30`, the rest 255.
    /// Radius zero yields the single weight 0, an identity dilation.
    pub fn build(radius: u32, bias: f32) -> Self {
        let diameter = (radius * 2 + 1) as usize;
        let probe_value = (1.0 - bias) * 30.0;

        let weights = if radius == 0 {
            vec![0]
        } else {
            // Row-major: x = idx % diameter, y = idx / diameter.
            (0..diameter * diameter)
                .map(|idx| {
                    let x = (idx % diameter) as f32 - radius as f32;
                    let y = (idx / diameter) as f32 - radius as f32;
                    let length = x.hypot(y) / radius as f32;

                    if length <= 1.0 {
                        ((1.0 - length) * probe_value) as u8
                    } else {
                        255
                    }
                })
                .collect()
        };

        StructuringElement {
            radius,
            bias,
            weights,
        }
    }

    pub fn diameter(&self) -> usize {
        (self.radius * 2 + 1) as usize
    }

    /// Weight at offset `(dx, dy)` from the probe center.
    fn weight(&self, dx: isize, dy: isize) -> u8 {
        let diameter = self.diameter() as isize;
        let idx = (dy + self.radius as isize) * diameter + (dx + self.radius as isize);
        self.weights[idx as usize]
    }

    fn is_stale(&self, radius: u32, bias: f32) -> bool {
        self.radius != radius || self.bias != bias
    }
}

/// Morphological bokeh filter with a cached structuring element.
#[derive(Debug, Clone)]
pub struct CircularBokeh {
    blur_radius: f32,
    bokeh_radius: u32,
    bokeh_bias: f32,
    probe: Option<StructuringElement>,
}

impl CircularBokeh {
    /// Create a filter instance.
    ///
    /// `bokeh_radius` is truncated to an integer. Both radii must be
    /// non-negative and `bokeh_bias` must lie in [0, 1].
    pub fn new(blur_radius: f32, bokeh_radius: f32, bokeh_bias: f32) -> Result<Self> {
        if !blur_radius.is_finite() || blur_radius < 0.0 {
            return Err(FilterError::invalid_parameter("blur_radius", blur_radius));
        }
        if !bokeh_radius.is_finite() || bokeh_radius < 0.0 {
            return Err(FilterError::invalid_parameter("bokeh_radius", bokeh_radius));
        }
        if !(0.0..=1.0).contains(&bokeh_bias) {
            return Err(FilterError::invalid_parameter("bokeh_bias", bokeh_bias));
        }
        Ok(CircularBokeh {
            blur_radius,
            bokeh_radius: bokeh_radius as u32,
            bokeh_bias,
            probe: None,
        })
    }

    pub fn set_blur_radius(&mut self, blur_radius: f32) -> Result<()> {
        if !blur_radius.is_finite() || blur_radius < 0.0 {
            return Err(FilterError::invalid_parameter("blur_radius", blur_radius));
        }
        // The probe does not depend on the blur radius; no invalidation.
        self.blur_radius = blur_radius;
        Ok(())
    }

    pub fn set_bokeh_radius(&mut self, bokeh_radius: f32) -> Result<()> {
        if !bokeh_radius.is_finite() || bokeh_radius < 0.0 {
            return Err(FilterError::invalid_parameter("bokeh_radius", bokeh_radius));
        }
        self.bokeh_radius = bokeh_radius as u32;
        Ok(())
    }

    pub fn set_bokeh_bias(&mut self, bokeh_bias: f32) -> Result<()> {
        if !(0.0..=1.0).contains(&bokeh_bias) {
            return Err(FilterError::invalid_parameter("bokeh_bias", bokeh_bias));
        }
        self.bokeh_bias = bokeh_bias;
        Ok(())
    }

    /// Rebuild the cached probe if the current parameters differ from the
    /// ones it was built with.
    fn rebuild_if_stale(&mut self) -> &StructuringElement {
        let (radius, bias) = (self.bokeh_radius, self.bokeh_bias);
        if self.probe.as_ref().map_or(true, |p| p.is_stale(radius, bias)) {
            debug!(radius, bias, "rebuilding structuring element");
            self.probe = Some(StructuringElement::build(radius, bias));
        }
        self.probe.get_or_insert_with(|| StructuringElement::build(radius, bias))
    }

    /// Dilate with the circular probe, then Gaussian-blur the result.
    pub fn apply(&mut self, buffer: &PixelBuffer) -> Result<PixelBuffer> {
        let blur_radius = self.blur_radius;
        let probe = self.rebuild_if_stale();
        let dilated = dilate(buffer, probe)?;
        gaussian_blur(&dilated, blur_radius)
    }
}

/// Grayscale dilation over all four channels.
///
/// Each output channel value is the maximum over probe offsets of the
/// neighbor value minus the probe weight (saturating at zero). Samples
/// beyond the border replicate the nearest edge pixel.
fn dilate(buffer: &PixelBuffer, probe: &StructuringElement) -> Result<PixelBuffer> {
    let (width, height) = (buffer.width(), buffer.height());
    let mut out = PixelBuffer::new(width, height)?;
    let reach = probe.diameter() as isize / 2;

    for y in 0..height {
        let dst = out.row_mut(y);
        for x in 0..width {
            let mut max = [0u8; CHANNELS];
            for dy in -reach..=reach {
                for dx in -reach..=reach {
                    let weight = probe.weight(dx, dy);
                    if weight == 255 {
                        continue;
                    }
                    let sample = buffer.pixel_clamped(x as isize + dx, y as isize + dy);
                    for c in 0..CHANNELS {
                        max[c] = max[c].max(sample[c].saturating_sub(weight));
                    }
                }
            }
            dst[x * CHANNELS..x * CHANNELS + CHANNELS].copy_from_slice(&max);
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dark_with_highlight(size: usize) -> PixelBuffer {
        let mut buffer = PixelBuffer::new(size, size).unwrap();
        for y in 0..size {
            for x in 0..size {
                buffer.set_pixel(x, y, [20, 20, 20, 255]);
            }
        }
        let mid = size / 2;
        buffer.set_pixel(mid, mid, [255, 255, 255, 255]);
        buffer
    }

    #[test]
    fn test_probe_layout_is_row_major() {
        let probe = StructuringElement::build(1, 0.0);
        assert_eq!(probe.diameter(), 3);
        assert_eq!(probe.weights.len(), 9);

        // Corners lie at distance sqrt(2) > radius and are excluded.
        assert_eq!(probe.weight(-1, -1), 255);
        assert_eq!(probe.weight(1, 1), 255);
        // Center has the full probe value, axis neighbors the edge value 0.
        assert_eq!(probe.weight(0, 0), 30);
        assert_eq!(probe.weight(1, 0), 0);
        assert_eq!(probe.weight(0, -1), 0);
    }

    #[test]
    fn test_bias_scales_probe_weights() {
        let unbiased = StructuringElement::build(2, 0.0);
        let biased = StructuringElement::build(2, 0.5);

        assert_eq!(unbiased.weight(0, 0), 30);
        assert_eq!(biased.weight(0, 0), 15);
    }

    #[test]
    fn test_zero_radius_dilation_is_identity() {
        let buffer = dark_with_highlight(5);
        let probe = StructuringElement::build(0, 0.25);

        let out = dilate(&buffer, &probe).unwrap();
        assert_eq!(out, buffer);
    }

    #[test]
    fn test_zero_radius_filter_without_blur_is_identity() {
        let buffer = dark_with_highlight(5);
        let mut filter = CircularBokeh::new(0.0, 0.0, 0.25).unwrap();

        let out = filter.apply(&buffer).unwrap();
        assert_eq!(out, buffer);
    }

    #[test]
    fn test_highlight_swells_into_disc() {
        let buffer = dark_with_highlight(9);
        let mut filter = CircularBokeh::new(0.0, 2.0, 0.0).unwrap();

        let out = filter.apply(&buffer).unwrap();

        // Axis neighbors inside the radius pick up the highlight.
        assert!(out.pixel(5, 4)[0] > 200);
        assert!(out.pixel(4, 3)[0] > 200);
        // Pixels beyond the radius stay near the background level.
        assert!(out.pixel(8, 8)[0] < 40);
    }

    #[test]
    fn test_edge_replication_at_borders() {
        // Highlight in a corner still dilates without darkening toward the
        // border, because out-of-bounds samples reuse the corner pixel.
        let mut buffer = PixelBuffer::new(4, 4).unwrap();
        for y in 0..4 {
            for x in 0..4 {
                buffer.set_pixel(x, y, [10, 10, 10, 255]);
            }
        }
        buffer.set_pixel(0, 0, [250, 250, 250, 255]);

        let mut filter = CircularBokeh::new(0.0, 1.0, 0.0).unwrap();
        let out = filter.apply(&buffer).unwrap();

        assert!(out.pixel(0, 0)[0] >= 220);
        assert!(out.pixel(1, 0)[0] >= 220);
    }

    #[test]
    fn test_probe_cached_until_parameters_change() {
        let buffer = dark_with_highlight(5);
        let mut filter = CircularBokeh::new(0.0, 2.0, 0.25).unwrap();

        filter.apply(&buffer).unwrap();
        let first = filter.probe.clone().unwrap();

        // Blur radius changes leave the probe alone.
        filter.set_blur_radius(3.0).unwrap();
        filter.apply(&buffer).unwrap();
        assert_eq!(filter.probe.as_ref().unwrap(), &first);

        // Bias changes force a rebuild.
        filter.set_bokeh_bias(0.75).unwrap();
        filter.apply(&buffer).unwrap();
        assert_ne!(filter.probe.as_ref().unwrap(), &first);
    }

    #[test]
    fn test_invalid_parameters_are_rejected() {
        assert!(matches!(
            CircularBokeh::new(-1.0, 2.0, 0.25).unwrap_err(),
            FilterError::InvalidParameter { name: "blur_radius", .. }
        ));
        assert!(matches!(
            CircularBokeh::new(0.0, -2.0, 0.25).unwrap_err(),
            FilterError::InvalidParameter { name: "bokeh_radius", .. }
        ));
        assert!(matches!(
            CircularBokeh::new(0.0, 2.0, 1.5).unwrap_err(),
            FilterError::InvalidParameter { name: "bokeh_bias", .. }
        ));
    }
}
