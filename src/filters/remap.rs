//! Intensity remap tables shared by the histogram-based filters.

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::error::Result;
use crate::histogram::BINS;

/// A precomputed intensity-to-intensity lookup table for one channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemapTable(pub [u8; BINS]);

impl RemapTable {
    /// The table that maps every intensity to itself.
    pub fn identity() -> Self {
        let mut table = [0u8; BINS];
        for (i, entry) in table.iter_mut().enumerate() {
            *entry = i as u8;
        }
        RemapTable(table)
    }

    /// Build a table by evaluating `f` at every input intensity.
    pub fn from_fn(f: impl Fn(u8) -> u8) -> Self {
        let mut table = [0u8; BINS];
        for (i, entry) in table.iter_mut().enumerate() {
            *entry = f(i as u8);
        }
        RemapTable(table)
    }

    pub fn lookup(&self, value: u8) -> u8 {
        self.0[value as usize]
    }
}

/// Apply one table per color channel over every pixel; alpha passes through
/// unchanged. The output is a fresh tightly packed buffer.
pub fn apply_rgb(buffer: &PixelBuffer, tables: &[RemapTable; 3]) -> Result<PixelBuffer> {
    let mut out = PixelBuffer::new(buffer.width(), buffer.height())?;
    for y in 0..buffer.height() {
        let src = buffer.row(y);
        let dst = out.row_mut(y);
        for (src_px, dst_px) in src.chunks_exact(CHANNELS).zip(dst.chunks_exact_mut(CHANNELS)) {
            dst_px[0] = tables[0].lookup(src_px[0]);
            dst_px[1] = tables[1].lookup(src_px[1]);
            dst_px[2] = tables[2].lookup(src_px[2]);
            dst_px[3] = src_px[3];
        }
    }
    Ok(out)
}
