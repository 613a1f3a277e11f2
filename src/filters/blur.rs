//! Separable Gaussian blur over packed RGBA buffers.

use crate::buffer::{PixelBuffer, CHANNELS};
use crate::error::Result;

/// Generate a normalized 1D Gaussian kernel.
///
/// Kernel size is 6 sigma (covers 99.7% of the distribution), forced odd.
/// A non-positive sigma yields the identity kernel.
pub fn gaussian_kernel_1d(sigma: f32) -> Vec<f32> {
    if sigma <= 0.0 {
        return vec![1.0];
    }

    let kernel_size = ((sigma * 6.0).ceil() as usize) | 1;
    let half = kernel_size / 2;

    let mut kernel: Vec<f32> = (0..kernel_size)
        .map(|i| {
            let x = i as f32 - half as f32;
            (-x * x / (2.0 * sigma * sigma)).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    for v in kernel.iter_mut() {
        *v /= sum;
    }

    kernel
}

/// Apply a separable two-pass Gaussian blur to all four channels.
///
/// Samples beyond the border replicate the nearest edge pixel. A radius of
/// zero returns an unblurred copy.
pub fn gaussian_blur(buffer: &PixelBuffer, radius: f32) -> Result<PixelBuffer> {
    let (width, height) = (buffer.width(), buffer.height());
    let mut out = PixelBuffer::new(width, height)?;

    if radius <= 0.0 {
        for y in 0..height {
            out.row_mut(y).copy_from_slice(buffer.row(y));
        }
        return Ok(out);
    }

    let kernel = gaussian_kernel_1d(radius);
    let half = kernel.len() as isize / 2;

    // Work in f32 for precision between the two passes.
    let mut temp = vec![0.0f32; width * height * CHANNELS];

    // Horizontal pass
    for y in 0..height {
        let row = buffer.row(y);
        for x in 0..width {
            for c in 0..CHANNELS {
                let mut sum = 0.0f32;
                for (ki, &kv) in kernel.iter().enumerate() {
                    let sx = (x as isize + ki as isize - half).clamp(0, width as isize - 1) as usize;
                    sum += f32::from(row[sx * CHANNELS + c]) * kv;
                }
                temp[(y * width + x) * CHANNELS + c] = sum;
            }
        }
    }

    // Vertical pass
    for y in 0..height {
        let dst = out.row_mut(y);
        for x in 0..width {
            for c in 0..CHANNELS {
                let mut sum = 0.0f32;
                for (ki, &kv) in kernel.iter().enumerate() {
                    let sy = (y as isize + ki as isize - half).clamp(0, height as isize - 1) as usize;
                    sum += temp[(sy * width + x) * CHANNELS + c] * kv;
                }
                dst[x * CHANNELS + c] = sum.clamp(0.0, 255.0) as u8;
            }
        }
    }

    Ok(out)
}
