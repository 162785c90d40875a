//! Colour filter kernels.
//!
//! Every filter maps the R, G, B of one pixel to a transformed triple and
//! blends it with the original by `intensity / 100`:
//!
//! ```text
//! c' = c * (1 - f) + transformed(c) * f        f = intensity / 100
//! ```
//!
//! so intensity 0 is the identity and 100 is the full effect. Alpha is
//! never touched, and [`FilterType::None`] is a no-op whatever the
//! intensity.
//!
//! # Filters
//!
//! | Type        | Transform |
//! |-------------|-----------|
//! | `Grayscale` | `(R + G + B) / 3` on all channels |
//! | `Sepia`     | classic 3x3 sepia matrix |
//! | `Invert`    | `255 - c` |
//! | `Vintage`   | 0.9 diagonal, 0.05 cross-talk |
//! | `Blueprint` | `avg * (0.1, 0.3, 1.0)` |
//! | `Noir`      | `min(255, 1.5 * (0.3R + 0.59G + 0.11B))` |
//!
//! # Example
//!
//! ```rust
//! use retouch_core::PixelBuffer;
//! use retouch_ops::filter::{apply, FilterType};
//!
//! let mut buf = PixelBuffer::filled(4, 4, [255, 0, 0, 255]);
//! apply(&mut buf, FilterType::Grayscale, 100.0);
//! assert_eq!(buf.get(0, 0).unwrap(), [85, 85, 85, 255]);
//! ```

use std::fmt;
use std::str::FromStr;

use retouch_core::PixelBuffer;
use tracing::trace;

use crate::pixel::{map_pixels, quantize};
use crate::OpsError;

/// Upper bound of the intensity scale.
pub const MAX_INTENSITY: f64 = 100.0;

/// Filter families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FilterType {
    /// Leaves the buffer untouched.
    #[default]
    None,
    /// Channel average.
    Grayscale,
    /// Warm brown tone.
    Sepia,
    /// Photographic negative.
    Invert,
    /// Slight desaturation through channel cross-talk.
    Vintage,
    /// Monochrome blue.
    Blueprint,
    /// High-contrast luma.
    Noir,
}

impl FilterType {
    /// All filter types, in menu order.
    pub const ALL: [FilterType; 7] = [
        FilterType::None,
        FilterType::Grayscale,
        FilterType::Sepia,
        FilterType::Invert,
        FilterType::Vintage,
        FilterType::Blueprint,
        FilterType::Noir,
    ];

    /// Human-readable name, as shown in edit descriptions.
    pub fn display_name(self) -> &'static str {
        match self {
            FilterType::None => "None",
            FilterType::Grayscale => "Grayscale",
            FilterType::Sepia => "Sepia",
            FilterType::Invert => "Invert",
            FilterType::Vintage => "Vintage",
            FilterType::Blueprint => "Blueprint",
            FilterType::Noir => "Noir",
        }
    }

    /// Lowercase identifier used in persisted edit records.
    pub fn as_str(self) -> &'static str {
        match self {
            FilterType::None => "none",
            FilterType::Grayscale => "grayscale",
            FilterType::Sepia => "sepia",
            FilterType::Invert => "invert",
            FilterType::Vintage => "vintage",
            FilterType::Blueprint => "blueprint",
            FilterType::Noir => "noir",
        }
    }

    /// Full-strength transform of one pixel's R, G, B.
    ///
    /// Results are unclamped; clamping happens when the blended value is
    /// stored.
    #[inline]
    pub fn transform(self, [r, g, b]: [f64; 3]) -> [f64; 3] {
        match self {
            FilterType::None => [r, g, b],
            FilterType::Grayscale => {
                let gray = (r + g + b) / 3.0;
                [gray, gray, gray]
            }
            FilterType::Sepia => [
                0.393 * r + 0.769 * g + 0.189 * b,
                0.349 * r + 0.686 * g + 0.168 * b,
                0.272 * r + 0.534 * g + 0.131 * b,
            ],
            FilterType::Invert => [255.0 - r, 255.0 - g, 255.0 - b],
            FilterType::Vintage => [
                0.9 * r + 0.05 * g + 0.05 * b,
                0.05 * r + 0.9 * g + 0.05 * b,
                0.05 * r + 0.05 * g + 0.9 * b,
            ],
            FilterType::Blueprint => {
                let avg = (r + g + b) / 3.0;
                [0.1 * avg, 0.3 * avg, avg]
            }
            FilterType::Noir => {
                let gray = 0.3 * r + 0.59 * g + 0.11 * b;
                let v = (gray * 1.5).min(255.0);
                [v, v, v]
            }
        }
    }
}

impl fmt::Display for FilterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for FilterType {
    type Err = OpsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| OpsError::invalid_parameter("filterType", format!("unknown filter '{s}'")))
    }
}

/// Clamps an intensity into `[0, 100]`; non-finite values become 100.
#[inline]
pub fn sanitize_intensity(intensity: f64) -> f64 {
    if intensity.is_finite() {
        intensity.clamp(0.0, MAX_INTENSITY)
    } else {
        MAX_INTENSITY
    }
}

/// Applies `filter` at `intensity` (0..=100) to `buffer` in place.
///
/// Returns early for [`FilterType::None`] and for zero intensity.
pub fn apply(buffer: &mut PixelBuffer, filter: FilterType, intensity: f64) {
    if filter == FilterType::None {
        return;
    }
    let f = sanitize_intensity(intensity) / MAX_INTENSITY;
    if f == 0.0 {
        return;
    }
    trace!(width = buffer.width(), height = buffer.height(), ?filter, intensity, "filter");

    let row_len = buffer.row_len();
    map_pixels(buffer.samples_mut(), row_len, |px| {
        let rgb = [f64::from(px[0]), f64::from(px[1]), f64::from(px[2])];
        let t = filter.transform(rgb);
        for c in 0..3 {
            px[c] = quantize(rgb[c] * (1.0 - f) + t[c] * f);
        }
    });
}
