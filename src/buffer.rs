//! Owned, bounds-checked RGBA pixel buffers.
//!
//! A [`PixelBuffer`] holds one packed 4-channel 8-bit image: `width`,
//! `height`, a row stride in bytes, and the raw interleaved data. The stride
//! may exceed `width * 4`; padding bytes at the end of each row are never
//! read by filters. Ownership is exclusive: filters borrow the input and
//! return a fresh, tightly packed output buffer.
//!
//! The external image source hands decoded images over as `(height, width, 4)`
//! ndarray views; [`PixelBuffer::from_array`] and [`PixelBuffer::to_array`]
//! convert at the boundary.

use ndarray::{Array3, ArrayView3};

use crate::error::{FilterError, Result};

/// Bytes per pixel. The buffer format is fixed 4-channel interleaved RGBA.
pub const CHANNELS: usize = 4;

/// A packed interleaved RGBA8 image buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    row_stride: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Allocate a zeroed, tightly packed buffer.
    ///
    /// Allocation failure is reported as [`FilterError::InvalidBuffer`]
    /// rather than aborting the process.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(FilterError::invalid_buffer(format!(
                "zero dimensions: {width}x{height}"
            )));
        }
        let row_stride = width * CHANNELS;
        let len = row_stride * height;

        let mut data = Vec::new();
        data.try_reserve_exact(len)
            .map_err(|_| FilterError::invalid_buffer(format!("allocation of {len} bytes failed")))?;
        data.resize(len, 0);

        Ok(PixelBuffer {
            width,
            height,
            row_stride,
            data,
        })
    }

    /// Wrap an existing byte vector, validating the stride invariants.
    pub fn from_vec(width: usize, height: usize, row_stride: usize, data: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(FilterError::invalid_buffer(format!(
                "zero dimensions: {width}x{height}"
            )));
        }
        if row_stride < width * CHANNELS {
            return Err(FilterError::invalid_buffer(format!(
                "row stride {row_stride} < width * 4 ({})",
                width * CHANNELS
            )));
        }
        if data.len() != row_stride * height {
            return Err(FilterError::invalid_buffer(format!(
                "data length {} != row_stride * height ({})",
                data.len(),
                row_stride * height
            )));
        }
        Ok(PixelBuffer {
            width,
            height,
            row_stride,
            data,
        })
    }

    /// Import a decoded `(height, width, 4)` image from the external source.
    pub fn from_array(image: ArrayView3<'_, u8>) -> Result<Self> {
        let (height, width, channels) = image.dim();
        if channels != CHANNELS {
            return Err(FilterError::invalid_buffer(format!(
                "expected 4 channels, got {channels}"
            )));
        }
        let mut buffer = PixelBuffer::new(width, height)?;
        for y in 0..height {
            let row = buffer.row_mut(y);
            for x in 0..width {
                for c in 0..CHANNELS {
                    row[x * CHANNELS + c] = image[[y, x, c]];
                }
            }
        }
        Ok(buffer)
    }

    /// Export as a `(height, width, 4)` array for the external sink.
    pub fn to_array(&self) -> Array3<u8> {
        let mut out = Array3::<u8>::zeros((self.height, self.width, CHANNELS));
        for y in 0..self.height {
            let row = self.row(y);
            for x in 0..self.width {
                for c in 0..CHANNELS {
                    out[[y, x, c]] = row[x * CHANNELS + c];
                }
            }
        }
        out
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn row_stride(&self) -> usize {
        self.row_stride
    }

    /// Total pixel count.
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// The pixel bytes of row `y`, excluding any stride padding.
    pub fn row(&self, y: usize) -> &[u8] {
        let start = y * self.row_stride;
        &self.data[start..start + self.width * CHANNELS]
    }

    /// Mutable pixel bytes of row `y`, excluding any stride padding.
    pub fn row_mut(&mut self, y: usize) -> &mut [u8] {
        let start = y * self.row_stride;
        &mut self.data[start..start + self.width * CHANNELS]
    }

    /// One pixel as `[r, g, b, a]`.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let row = self.row(y);
        let p = &row[x * CHANNELS..x * CHANNELS + CHANNELS];
        [p[0], p[1], p[2], p[3]]
    }

    /// Overwrite one pixel with `[r, g, b, a]`.
    pub fn set_pixel(&mut self, x: usize, y: usize, rgba: [u8; 4]) {
        let row = self.row_mut(y);
        row[x * CHANNELS..x * CHANNELS + CHANNELS].copy_from_slice(&rgba);
    }

    /// One pixel with coordinates clamped to the image bounds.
    ///
    /// This is the edge-replicate sampling rule used by the morphological
    /// filters: out-of-range offsets reuse the nearest edge pixel.
    pub fn pixel_clamped(&self, x: isize, y: isize) -> [u8; 4] {
        let cx = x.clamp(0, self.width as isize - 1) as usize;
        let cy = y.clamp(0, self.height as isize - 1) as usize;
        self.pixel(cx, cy)
    }
}
