//! Tonal adjustments: brightness, contrast, saturation and blur.
//!
//! Sub-adjustments run only when their value is non-zero, always in the
//! order brightness -> contrast -> saturation -> blur. Each step stores
//! byte-quantized samples before the next reads them, matching a canvas
//! round trip between steps.
//!
//! | Step       | Formula (per R, G, B channel) |
//! |------------|-------------------------------|
//! | brightness | `c + 255 * b / 100` |
//! | contrast   | `((c / 255 - 0.5) * k + 0.5) * 255`, `k = (contrast + 100) / 100` |
//! | saturation | `gray + k * (c - gray)`, `gray = 0.2989R + 0.5870G + 0.1140B` |
//! | blur       | box-approximated Gaussian, see [`crate::blur`] |

use retouch_core::PixelBuffer;
use tracing::trace;

use crate::blur;
use crate::pixel::{map_pixels, quantize};

/// Bound of the brightness, contrast and saturation sliders.
pub const MAX_TONE: f64 = 100.0;

/// Default number of box passes used to approximate a Gaussian blur.
pub const DEFAULT_BLUR_PASSES: u32 = 3;

/// Luma weights used by the saturation step.
pub const SATURATION_LUMA: [f64; 3] = [0.2989, 0.5870, 0.1140];

/// Tonal adjustment parameters. Zero means "leave alone" for every field.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AdjustmentParams {
    /// -100..=100
    pub brightness: f64,
    /// -100..=100
    pub contrast: f64,
    /// -100..=100
    pub saturation: f64,
    /// 0..=20, blur standard deviation in pixels
    pub blur: f64,
}

impl AdjustmentParams {
    /// Returns a copy with every field clamped to its range. Non-finite
    /// values become 0.
    pub fn sanitized(self) -> Self {
        Self {
            brightness: clamp_or_zero(self.brightness, -MAX_TONE, MAX_TONE),
            contrast: clamp_or_zero(self.contrast, -MAX_TONE, MAX_TONE),
            saturation: clamp_or_zero(self.saturation, -MAX_TONE, MAX_TONE),
            blur: clamp_or_zero(self.blur, 0.0, blur::MAX_BLUR),
        }
    }

    /// Returns `true` if applying these parameters changes nothing.
    pub fn is_identity(&self) -> bool {
        let p = self.sanitized();
        p.brightness == 0.0 && p.contrast == 0.0 && p.saturation == 0.0 && p.blur == 0.0
    }

    /// Brightness step.
    #[inline]
    pub fn brighten(c: f64, brightness: f64) -> f64 {
        c + 255.0 * (brightness / 100.0)
    }

    /// Contrast step.
    #[inline]
    pub fn contrast_channel(c: f64, contrast: f64) -> f64 {
        let factor = (contrast + 100.0) / 100.0;
        ((c / 255.0 - 0.5) * factor + 0.5) * 255.0
    }

    /// Saturation step for a whole pixel.
    #[inline]
    pub fn saturate(rgb: [f64; 3], saturation: f64) -> [f64; 3] {
        let gray = SATURATION_LUMA[0] * rgb[0] + SATURATION_LUMA[1] * rgb[1] + SATURATION_LUMA[2] * rgb[2];
        let factor = (saturation + 100.0) / 100.0;
        rgb.map(|c| gray + factor * (c - gray))
    }
}

#[inline]
fn clamp_or_zero(v: f64, lo: f64, hi: f64) -> f64 {
    if v.is_finite() { v.clamp(lo, hi) } else { 0.0 }
}

/// Applies `params` to `buffer` in place, blurring with `blur_passes` box
/// passes.
pub fn apply(buffer: &mut PixelBuffer, params: &AdjustmentParams, blur_passes: u32) {
    let p = params.sanitized();
    trace!(
        width = buffer.width(),
        height = buffer.height(),
        brightness = p.brightness,
        contrast = p.contrast,
        saturation = p.saturation,
        blur = p.blur,
        "adjust"
    );

    if p.brightness != 0.0 || p.contrast != 0.0 || p.saturation != 0.0 {
        let row_len = buffer.row_len();
        map_pixels(buffer.samples_mut(), row_len, |px| {
            if p.brightness != 0.0 {
                for c in px.iter_mut().take(3) {
                    *c = quantize(AdjustmentParams::brighten(f64::from(*c), p.brightness));
                }
            }
            if p.contrast != 0.0 {
                for c in px.iter_mut().take(3) {
                    *c = quantize(AdjustmentParams::contrast_channel(f64::from(*c), p.contrast));
                }
            }
            if p.saturation != 0.0 {
                let rgb = [f64::from(px[0]), f64::from(px[1]), f64::from(px[2])];
                let out = AdjustmentParams::saturate(rgb, p.saturation);
                for (c, v) in px.iter_mut().zip(out) {
                    *c = quantize(v);
                }
            }
        });
    }

    if p.blur != 0.0 {
        blur::apply(buffer, p.blur, blur_passes);
    }
}
