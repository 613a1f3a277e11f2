//! Histogram specification (matching): remap a source image so its
//! per-channel cumulative distribution approximates a reference image's.

use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::error::{FilterError, Result};
use crate::filters::remap::{apply_rgb, RemapTable};
use crate::histogram::{cumulative, Histogram, BINS};

/// Match `source`'s red, green and blue distributions to `reference`'s.
///
/// For each source intensity, the remap picks the reference intensity whose
/// cumulative fraction is closest to the source's cumulative fraction,
/// preferring the smallest such intensity on ties. Alpha is excluded from
/// matching and passes through unchanged.
///
/// Fails with [`FilterError::MissingReference`] when no reference is given.
pub fn specify(source: &PixelBuffer, reference: Option<&PixelBuffer>) -> Result<PixelBuffer> {
    let reference = reference.ok_or(FilterError::MissingReference)?;

    let source_histogram = Histogram::compute(source)?;
    let reference_histogram =
        Histogram::compute(reference).map_err(|_| FilterError::MissingReference)?;

    let source_total = source.pixel_count() as f64;
    let reference_total = reference.pixel_count() as f64;

    let mut tables = [RemapTable::identity(), RemapTable::identity(), RemapTable::identity()];
    for (c, table) in tables.iter_mut().enumerate() {
        let source_sums = cumulative(source_histogram.channel(c));
        let reference_sums = cumulative(reference_histogram.channel(c));

        *table = RemapTable::from_fn(|v| {
            let fraction = source_sums[v as usize] as f64 / source_total;
            closest_intensity(&reference_sums, reference_total, fraction)
        });
    }
    debug!(
        source_pixels = source.pixel_count(),
        reference_pixels = reference.pixel_count(),
        "built specification tables"
    );

    apply_rgb(source, &tables)
}

/// The smallest intensity whose reference cumulative fraction is closest to
/// `fraction`.
fn closest_intensity(reference_sums: &[u64; BINS], total: f64, fraction: f64) -> u8 {
    let mut best = 0usize;
    let mut best_distance = f64::INFINITY;
    for (i, &sum) in reference_sums.iter().enumerate() {
        let distance = (sum as f64 / total - fraction).abs();
        if distance < best_distance {
            best_distance = distance;
            best = i;
        }
    }
    best as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: usize, height: usize) -> PixelBuffer {
        let mut buffer = PixelBuffer::new(width, height).unwrap();
        for y in 0..height {
            for x in 0..width {
                let v = ((x + y * width) * 255 / (width * height - 1)) as u8;
                buffer.set_pixel(x, y, [v, 255 - v, v / 2, 255]);
            }
        }
        buffer
    }

    #[test]
    fn test_missing_reference_is_rejected() {
        let source = gradient(4, 4);
        let err = specify(&source, None).unwrap_err();
        assert_eq!(err, FilterError::MissingReference);
    }

    #[test]
    fn test_self_matching_is_near_identity() {
        let source = gradient(8, 8);
        let out = specify(&source, Some(&source)).unwrap();

        for y in 0..8 {
            for x in 0..8 {
                let before = source.pixel(x, y);
                let after = out.pixel(x, y);
                for c in 0..3 {
                    let delta = (i16::from(before[c]) - i16::from(after[c])).abs();
                    assert!(delta <= 1, "channel {c} moved by {delta}");
                }
                assert_eq!(before[3], after[3]);
            }
        }
    }

    #[test]
    fn test_matching_adopts_reference_levels() {
        // Source is mid-gray; reference is split between black and white.
        let mut source = PixelBuffer::new(2, 1).unwrap();
        source.set_pixel(0, 0, [100, 100, 100, 255]);
        source.set_pixel(1, 0, [150, 150, 150, 255]);

        let mut reference = PixelBuffer::new(2, 1).unwrap();
        reference.set_pixel(0, 0, [0, 0, 0, 255]);
        reference.set_pixel(1, 0, [255, 255, 255, 255]);

        let out = specify(&source, Some(&reference)).unwrap();

        // Only intensities present in the reference appear in the output.
        assert_eq!(out.pixel(0, 0)[0], 0);
        assert_eq!(out.pixel(1, 0)[0], 255);
    }

    #[test]
    fn test_alpha_not_matched() {
        let mut source = PixelBuffer::new(1, 1).unwrap();
        source.set_pixel(0, 0, [128, 128, 128, 42]);
        let mut reference = PixelBuffer::new(1, 1).unwrap();
        reference.set_pixel(0, 0, [10, 10, 10, 255]);

        let out = specify(&source, Some(&reference)).unwrap();

        assert_eq!(out.pixel(0, 0)[3], 42);
    }
}
