//! tonelab
//!
//! Histogram-driven image filters over packed RGBA8 pixel buffers:
//! per-channel histogram statistics, contrast stretching (plain and
//! percentile-bounded), histogram equalization and specification, a
//! morphological "circular bokeh" dilation blur, and the Hermite curve
//! interpolation used to render histogram displays.
//!
//! ## Image Format
//!
//! All filters operate on [`buffer::PixelBuffer`]: 4 channels, one byte per
//! channel, interleaved, with a row stride that may exceed `width * 4`.
//! External collaborators hand decoded images over as `(height, width, 4)`
//! ndarray views; [`buffer::PixelBuffer::from_array`] and
//! [`buffer::PixelBuffer::to_array`] convert at the boundary.
//!
//! ## Filter Architecture
//!
//! Filters are synchronous pure functions returning a fresh output buffer or
//! a [`FilterError`]; none are approximate and none perform I/O. Histogram
//! computation parallelizes over rows with rayon. The only state that
//! outlives a call is the bokeh filter's cached structuring element.

pub mod buffer;
pub mod curve;
pub mod error;
pub mod filters;
pub mod histogram;
pub mod params;

pub use buffer::PixelBuffer;
pub use error::{FilterError, Result};
pub use histogram::Histogram;
