//! Geometric operations: crop and arbitrary-angle rotation.
//!
//! # Operations
//!
//! - [`crop`] - extract a clamped sub-rectangle as the new working buffer
//! - [`rotate`] - rotate about the buffer center, keeping the canvas size
//!
//! Both read a source buffer and write a fresh destination, so the source
//! is never aliased while being written.
//!
//! # Example
//!
//! ```rust
//! use retouch_core::{CropRect, PixelBuffer};
//! use retouch_ops::transform::{crop, rotate, Resample};
//!
//! let src = PixelBuffer::filled(64, 64, [10, 20, 30, 255]);
//! let cropped = crop(&src, &CropRect::new(16, 16, 32, 32));
//! assert_eq!(cropped.dimensions(), (32, 32));
//!
//! let turned = rotate(&cropped, 45.0, Resample::Bilinear);
//! assert_eq!(turned.dimensions(), (32, 32));
//! ```

use std::fmt;

use retouch_core::{CropRect, PixelBuffer, Rgba, CHANNELS, TRANSPARENT};
use tracing::{trace, warn};

use crate::pixel::{for_each_row, quantize};

/// Sampling used when mapping destination pixels back into the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Resample {
    /// Pick the source pixel containing the mapped point.
    Nearest,
    /// Weighted average of the four surrounding pixel centers.
    #[default]
    Bilinear,
}

impl fmt::Display for Resample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Resample::Nearest => "nearest",
            Resample::Bilinear => "bilinear",
        })
    }
}

/// Crops `src` to `rect`, clamped to the buffer.
///
/// A request with no visible area yields a 1x1 transparent buffer and a
/// warning instead of an error.
pub fn crop(src: &PixelBuffer, rect: &CropRect) -> PixelBuffer {
    let region = match rect.resolve(src.width(), src.height()) {
        Ok(region) => region,
        Err(err) => {
            warn!(%err, "degenerate crop, substituting 1x1 buffer");
            return PixelBuffer::new(1, 1);
        }
    };
    trace!(?region, src_w = src.width(), src_h = src.height(), "crop");

    let mut samples = Vec::with_capacity(region.width as usize * region.height as usize * CHANNELS);
    for y in region.y..region.bottom() {
        // resolve() guarantees every row exists
        if let Some(row) = src.row(y) {
            let start = region.x as usize * CHANNELS;
            samples.extend_from_slice(&row[start..start + region.width as usize * CHANNELS]);
        }
    }

    match PixelBuffer::from_raw(region.width, region.height, samples) {
        Ok(buf) => buf,
        Err(err) => {
            warn!(%err, "crop produced inconsistent samples, substituting 1x1 buffer");
            PixelBuffer::new(1, 1)
        }
    }
}

/// Normalizes an angle into `[0, 360)`. Non-finite angles become 0.
#[inline]
pub fn normalize_degrees(angle: f64) -> f64 {
    if angle.is_finite() { angle.rem_euclid(360.0) } else { 0.0 }
}

/// Rotates `src` clockwise by `angle_degrees` about its center.
///
/// The output has the same dimensions as the input: corners that leave the
/// canvas are cut off, and uncovered destination pixels are transparent.
/// Angles that are a multiple of 360 return an exact copy.
pub fn rotate(src: &PixelBuffer, angle_degrees: f64, resample: Resample) -> PixelBuffer {
    let angle = normalize_degrees(angle_degrees);
    if angle == 0.0 || src.is_empty() {
        return src.clone();
    }
    trace!(width = src.width(), height = src.height(), angle, %resample, "rotate");

    let (w, h) = (src.width() as usize, src.height() as usize);
    let (sin, cos) = angle.to_radians().sin_cos();
    let (cx, cy) = (w as f64 / 2.0, h as f64 / 2.0);

    let mut dst = PixelBuffer::new(src.width(), src.height());
    let row_len = dst.row_len();
    for_each_row(dst.samples_mut(), row_len, |y, row| {
        let dy = y as f64 + 0.5 - cy;
        for x in 0..w {
            let dx = x as f64 + 0.5 - cx;
            // Inverse rotation: destination -> source, y axis pointing down
            let sx = dx * cos + dy * sin + cx;
            let sy = -dx * sin + dy * cos + cy;
            let px = match resample {
                Resample::Nearest => sample_nearest(src, sx, sy),
                Resample::Bilinear => sample_bilinear(src, sx, sy),
            };
            row[x * CHANNELS..(x + 1) * CHANNELS].copy_from_slice(&px);
        }
    });
    dst
}

/// Returns `true` if the continuous point (sx, sy) lies on the source canvas.
#[inline]
fn on_canvas(src: &PixelBuffer, sx: f64, sy: f64) -> bool {
    sx >= 0.0 && sy >= 0.0 && sx < f64::from(src.width()) && sy < f64::from(src.height())
}

fn sample_nearest(src: &PixelBuffer, sx: f64, sy: f64) -> Rgba {
    if !on_canvas(src, sx, sy) {
        return TRANSPARENT;
    }
    src.get(sx.floor() as u32, sy.floor() as u32).unwrap_or(TRANSPARENT)
}

/// Bilinear sample between pixel centers; neighbours past the edge clamp
/// to the edge pixel.
fn sample_bilinear(src: &PixelBuffer, sx: f64, sy: f64) -> Rgba {
    if !on_canvas(src, sx, sy) {
        return TRANSPARENT;
    }
    let (max_x, max_y) = (src.width() as i64 - 1, src.height() as i64 - 1);
    let (u, v) = (sx - 0.5, sy - 0.5);
    let (fx, fy) = (u - u.floor(), v - v.floor());
    let (x0, y0) = (u.floor() as i64, v.floor() as i64);
    let clamp_x = |x: i64| x.clamp(0, max_x) as u32;
    let clamp_y = |y: i64| y.clamp(0, max_y) as u32;
    let (xa, xb) = (clamp_x(x0), clamp_x(x0 + 1));
    let (ya, yb) = (clamp_y(y0), clamp_y(y0 + 1));

    let fetch = |x: u32, y: u32| src.get(x, y).unwrap_or(TRANSPARENT);
    let (p00, p10, p01, p11) = (fetch(xa, ya), fetch(xb, ya), fetch(xa, yb), fetch(xb, yb));

    let mut out = TRANSPARENT;
    for c in 0..CHANNELS {
        let top = f64::from(p00[c]) * (1.0 - fx) + f64::from(p10[c]) * fx;
        let bot = f64::from(p01[c]) * (1.0 - fx) + f64::from(p11[c]) * fx;
        out[c] = quantize(top * (1.0 - fy) + bot * fy);
    }
    out
}
