//! Filter modules for the histogram and bokeh pipeline.
//!
//! ## Invocation contract
//!
//! Every filter is a pure function `&PixelBuffer x parameters ->
//! Result<PixelBuffer>`. The input is borrowed, never mutated; the output is
//! a fresh tightly packed buffer with identical dimensions. On error the
//! caller keeps the unmodified input and no partial output exists.
//!
//! ## Architecture
//!
//! - **Alpha preservation** - the histogram-based filters remap red, green
//!   and blue only; alpha always passes through unchanged.
//! - **Remap tables** - the histogram filters reduce to a per-channel
//!   256-entry lookup table built once per invocation ([`remap`]).
//! - **Edge replication** - neighborhood filters (dilation, blur) sample
//!   out-of-bounds coordinates from the nearest edge pixel.
//! - **Cached probe** - [`bokeh::CircularBokeh`] is the only stateful filter;
//!   it caches its structuring element between calls and rebuilds it when the
//!   bokeh radius or bias changes.

pub mod blur;
pub mod bokeh;
pub mod contrast_stretch;
pub mod equalize;
pub mod remap;
pub mod specify;
