//! Histogram equalization: flatten each color channel's intensity
//! distribution via its cumulative distribution function.

use tracing::debug;

use crate::buffer::PixelBuffer;
use crate::error::Result;
use crate::filters::remap::{apply_rgb, RemapTable};
use crate::histogram::{cumulative, Histogram};

/// Equalize the red, green and blue channels independently.
///
/// Each channel's remap is `i -> round(C(i) * 255 / total)` where `C` is the
/// channel's cumulative histogram. Alpha passes through unchanged. The
/// operation is deterministic; a flat (single-color) channel remaps to a
/// single output intensity rather than failing.
pub fn equalize(buffer: &PixelBuffer) -> Result<PixelBuffer> {
    let histogram = Histogram::compute(buffer)?;
    let total = buffer.pixel_count() as u64;

    let mut tables = [RemapTable::identity(), RemapTable::identity(), RemapTable::identity()];
    for (c, table) in tables.iter_mut().enumerate() {
        let sums = cumulative(histogram.channel(c));
        *table = RemapTable::from_fn(|v| {
            // Integer rounding of C(v) * 255 / total.
            ((sums[v as usize] * 255 + total / 2) / total) as u8
        });
    }
    debug!(total, "built equalization tables");

    apply_rgb(buffer, &tables)
}
