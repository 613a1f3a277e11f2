//! Per-channel 256-bin intensity histograms.
//!
//! Counting is associative, so the computation folds per-row partial
//! histograms in parallel with rayon and merges them by element-wise sum.
//! Counts are exact; for every channel they sum to `width * height`.

use rayon::prelude::*;
use tracing::trace;

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::error::{FilterError, Result};

/// Number of bins per channel, one per 8-bit intensity value.
pub const BINS: usize = 256;

/// Frequency counts of intensity values per RGBA channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Histogram {
    pub red: [u32; BINS],
    pub green: [u32; BINS],
    pub blue: [u32; BINS],
    pub alpha: [u32; BINS],
}

impl Histogram {
    fn zeroed() -> Self {
        Histogram {
            red: [0; BINS],
            green: [0; BINS],
            blue: [0; BINS],
            alpha: [0; BINS],
        }
    }

    /// Count intensity frequencies over every pixel of `buffer`.
    pub fn compute(buffer: &PixelBuffer) -> Result<Histogram> {
        if buffer.width() == 0 || buffer.height() == 0 {
            return Err(FilterError::invalid_buffer("cannot histogram an empty image"));
        }

        let histogram = (0..buffer.height())
            .into_par_iter()
            .fold(Histogram::zeroed, |mut acc, y| {
                for pixel in buffer.row(y).chunks_exact(CHANNELS) {
                    acc.red[pixel[0] as usize] += 1;
                    acc.green[pixel[1] as usize] += 1;
                    acc.blue[pixel[2] as usize] += 1;
                    acc.alpha[pixel[3] as usize] += 1;
                }
                acc
            })
            .reduce(Histogram::zeroed, |a, b| a.merged(b));

        trace!(
            width = buffer.width(),
            height = buffer.height(),
            "computed histogram"
        );
        Ok(histogram)
    }

    fn merged(mut self, other: Histogram) -> Histogram {
        for i in 0..BINS {
            self.red[i] += other.red[i];
            self.green[i] += other.green[i];
            self.blue[i] += other.blue[i];
            self.alpha[i] += other.alpha[i];
        }
        self
    }

    /// Counts for channel `c` (0 = red, 1 = green, 2 = blue, 3 = alpha).
    pub fn channel(&self, c: usize) -> &[u32; BINS] {
        match c {
            0 => &self.red,
            1 => &self.green,
            2 => &self.blue,
            3 => &self.alpha,
            _ => panic!("channel index {c} out of range"),
        }
    }

    /// Largest bin count across the three color channels.
    ///
    /// Display code divides by this to normalize curve heights.
    pub fn max_rgb(&self) -> u32 {
        let max_of = |counts: &[u32; BINS]| counts.iter().copied().max().unwrap_or(0);
        max_of(&self.red).max(max_of(&self.green)).max(max_of(&self.blue))
    }
}

/// Running sum of `counts`: `cumulative(counts)[i]` is the number of pixels
/// with intensity `<= i`.
pub(crate) fn cumulative(counts: &[u32; BINS]) -> [u64; BINS] {
    let mut sums = [0u64; BINS];
    let mut running = 0u64;
    for (i, &count) in counts.iter().enumerate() {
        running += u64::from(count);
        sums[i] = running;
    }
    sums
}
