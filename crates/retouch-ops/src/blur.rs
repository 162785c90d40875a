//! Separable box blur.
//!
//! The blur runs a sliding-window box filter horizontally, then vertically
//! (by transposing, blurring rows, and transposing back). Repeating the
//! box `passes` times approximates a Gaussian with the requested standard
//! deviation. Edge pixels extend outward; nothing is read outside the
//! buffer and nothing wraps.
//!
//! # Example
//!
//! ```rust
//! use retouch_core::PixelBuffer;
//! use retouch_ops::blur;
//!
//! let mut buf = PixelBuffer::filled(16, 16, [128, 64, 32, 255]);
//! blur::apply(&mut buf, 3.0, 3);
//! // A flat image stays flat
//! assert_eq!(buf.get(8, 8).unwrap(), [128, 64, 32, 255]);
//! ```

use retouch_core::{PixelBuffer, CHANNELS};
use tracing::debug;

use crate::pixel::{for_each_row, quantize};

/// Largest accepted blur amount, in pixels.
pub const MAX_BLUR: f64 = 20.0;

/// Box radius for one of `passes` box filters that together approximate a
/// Gaussian of standard deviation `sigma`.
///
/// Uses the ideal box width `sqrt(12 sigma^2 / n + 1)`. A result of 0 means
/// the blur is too small to move any sample.
pub fn box_radius(sigma: f64, passes: u32) -> usize {
    if !sigma.is_finite() || sigma <= 0.0 {
        return 0;
    }
    let n = f64::from(passes.max(1));
    let width = (12.0 * sigma * sigma / n + 1.0).sqrt();
    ((width - 1.0) / 2.0).round() as usize
}

/// Blurs `buffer` in place with standard deviation `sigma` (pixels),
/// clamped to `[0, MAX_BLUR]`, using `passes` box passes.
pub fn apply(buffer: &mut PixelBuffer, sigma: f64, passes: u32) {
    let sigma = if sigma.is_finite() { sigma.clamp(0.0, MAX_BLUR) } else { 0.0 };
    let radius = box_radius(sigma, passes);
    if radius == 0 || buffer.is_empty() {
        return;
    }
    debug!(width = buffer.width(), height = buffer.height(), sigma, radius, passes, "Applying blur");

    let (width, height) = (buffer.width() as usize, buffer.height() as usize);
    let mut plane: Vec<f32> = buffer.samples().iter().map(|&s| f32::from(s)).collect();
    for _ in 0..passes.max(1) {
        plane = blur_planes(&plane, width, height, CHANNELS, radius);
    }
    for (dst, src) in buffer.samples_mut().iter_mut().zip(&plane) {
        *dst = quantize(f64::from(*src));
    }
}

/// One horizontal plus one vertical box pass over interleaved samples.
fn blur_planes(src: &[f32], width: usize, height: usize, channels: usize, radius: usize) -> Vec<f32> {
    let temp = blur_horizontal(src, width, height, channels, radius);
    // Columns become rows so the vertical pass can reuse the row kernel
    let transposed = transpose(&temp, width, height, channels);
    let blurred = blur_horizontal(&transposed, height, width, channels, radius);
    transpose(&blurred, height, width, channels)
}

/// Horizontal sliding-window pass.
fn blur_horizontal(
    src: &[f32],
    width: usize,
    height: usize,
    channels: usize,
    radius: usize,
) -> Vec<f32> {
    let kernel_size = 2 * radius + 1;
    let inv_size = 1.0 / kernel_size as f32;
    let mut dst = vec![0.0f32; width * height * channels];

    for_each_row(&mut dst, width * channels, |y, row| {
        let line = &src[y * width * channels..(y + 1) * width * channels];
        for c in 0..channels {
            // Window centred on x = 0, left half clamped to the first pixel
            let mut sum = line[c] * radius as f32;
            for kx in 0..=radius {
                let sx = kx.min(width - 1);
                sum += line[sx * channels + c];
            }

            for x in 0..width {
                row[x * channels + c] = sum * inv_size;

                let left = x.saturating_sub(radius);
                let right = (x + radius + 1).min(width - 1);
                sum -= line[left * channels + c];
                sum += line[right * channels + c];
            }
        }
    });

    dst
}

/// Transposes interleaved data so pixel (x, y) moves to (y, x).
fn transpose(src: &[f32], width: usize, height: usize, channels: usize) -> Vec<f32> {
    let mut dst = vec![0.0f32; width * height * channels];

    for_each_row(&mut dst, height * channels, |x, col| {
        for y in 0..height {
            let src_idx = (y * width + x) * channels;
            col[y * channels..(y + 1) * channels].copy_from_slice(&src[src_idx..src_idx + channels]);
        }
    });

    dst
}
