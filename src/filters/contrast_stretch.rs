//! Contrast stretch filters: plain min/max stretch and percentile-bounded
//! "ends-in" stretch.
//!
//! Both build per-channel [`RemapTable`]s from the image histogram and apply
//! them over every pixel. The alpha channel always passes through unchanged.

use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::error::{FilterError, Result};
use crate::filters::remap::{apply_rgb, RemapTable};
use crate::histogram::{cumulative, Histogram, BINS};

/// Stretch each color channel's observed intensity range to the full
/// [0, 255] range.
///
/// The observed minimum and maximum are the lowest and highest non-zero
/// histogram bins. A flat channel (`max == min`) is left untouched.
pub fn contrast_stretch(buffer: &PixelBuffer) -> Result<PixelBuffer> {
    let histogram = Histogram::compute(buffer)?;

    let mut tables = [RemapTable::identity(), RemapTable::identity(), RemapTable::identity()];
    for (c, table) in tables.iter_mut().enumerate() {
        let counts = histogram.channel(c);
        let min = counts.iter().position(|&n| n > 0).unwrap_or(0);
        let max = counts.iter().rposition(|&n| n > 0).unwrap_or(0);

        debug!(channel = c, min, max, "contrast stretch bounds");
        if max > min {
            *table = linear_stretch_table(min as u8, max as u8);
        }
    }

    apply_rgb(buffer, &tables)
}

/// Stretch each color channel so the given percentile range maps to
/// [0, 255], clamping intensities outside the range.
///
/// `low` and `high` are per-channel percentages in `[0, 49]` for red, green
/// and blue. The low bound is the smallest intensity whose cumulative count
/// reaches `low% * total` pixels; the high bound is the largest intensity
/// whose top-down cumulative count reaches `high% * total`.
pub fn ends_in_contrast_stretch(
    buffer: &PixelBuffer,
    low: [f32; 3],
    high: [f32; 3],
) -> Result<PixelBuffer> {
    for (name, values) in [("low", &low), ("high", &high)] {
        for &percent in values.iter() {
            if !(0.0..=49.0).contains(&percent) {
                return Err(FilterError::invalid_parameter(
                    match name {
                        "low" => "low_percent",
                        _ => "high_percent",
                    },
                    percent,
                ));
            }
        }
    }

    let histogram = Histogram::compute(buffer)?;
    let total = buffer.pixel_count() as f64;

    let mut tables = [RemapTable::identity(), RemapTable::identity(), RemapTable::identity()];
    for (c, table) in tables.iter_mut().enumerate() {
        let sums = cumulative(histogram.channel(c));

        let low_target = f64::from(low[c]) / 100.0 * total;
        let high_target = f64::from(high[c]) / 100.0 * total;

        // Smallest intensity accumulating at least the low-percentile mass.
        let low_bound = (0..BINS)
            .find(|&i| sums[i] as f64 >= low_target)
            .unwrap_or(0);
        // Largest intensity whose top-down mass reaches the high target.
        let high_bound = (0..BINS)
            .rfind(|&i| {
                let from_top = total - if i == 0 { 0.0 } else { sums[i - 1] as f64 };
                from_top >= high_target
            })
            .unwrap_or(BINS - 1);

        debug!(channel = c, low_bound, high_bound, "ends-in stretch bounds");
        if high_bound > low_bound {
            *table = linear_stretch_table(low_bound as u8, high_bound as u8);
        }
    }

    apply_rgb(buffer, &tables)
}

/// `output = round((input - min) * 255 / (max - min))` clamped to [0, 255].
fn linear_stretch_table(min: u8, max: u8) -> RemapTable {
    let range = f32::from(max) - f32::from(min);
    RemapTable::from_fn(|v| {
        let scaled = (f32::from(v) - f32::from(min)) * 255.0 / range;
        scaled.round().clamp(0.0, 255.0) as u8
    })
}
