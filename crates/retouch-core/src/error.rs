//! Error types for retouch-core operations.
//!
//! The [`Error`] enum covers the failure modes of the pixel container and
//! of the geometry primitives built on top of it:
//! - Buffer access (bounds checking)
//! - Buffer construction (length and dimension validation)
//! - Geometry that collapses to an empty region
//!
//! # Usage
//!
//! ```rust
//! use retouch_core::{Error, Result};
//!
//! fn check(x: u32, y: u32, width: u32, height: u32) -> Result<()> {
//!     if x >= width || y >= height {
//!         return Err(Error::out_of_bounds(x, y, width, height));
//!     }
//!     Ok(())
//! }
//!
//! assert!(check(4, 0, 4, 4).is_err());
//! ```
//!
//! # Used By
//!
//! - [`crate::buffer::PixelBuffer`] - `get`/`set` bounds checks
//! - [`crate::rect::CropRect`] - clamping to an empty region
//! - `retouch-ops` and `retouch-edit` wrap it in their own error enums

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while working with pixel buffers.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Pixel coordinates are outside buffer bounds.
    ///
    /// Returned when accessing (x, y) where `x >= width` or `y >= height`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use retouch_core::Error;
    ///
    /// let err = Error::out_of_bounds(100, 50, 80, 60);
    /// assert!(err.to_string().contains("100"));
    /// ```
    #[error("pixel ({x}, {y}) out of bounds for buffer {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was out of bounds
        x: u32,
        /// Y coordinate that was out of bounds
        y: u32,
        /// Buffer width
        width: u32,
        /// Buffer height
        height: u32,
    },

    /// Sample data does not match the declared dimensions, or the
    /// dimensions overflow the address space.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// A crop or rotate reduced the working buffer to zero area.
    ///
    /// Never surfaced by the compositor: callers resolve it to a minimal
    /// 1x1 buffer and log it.
    #[error("degenerate geometry on {width}x{height} buffer: {reason}")]
    DegenerateGeometry {
        /// Width of the buffer the operation ran on
        width: u32,
        /// Height of the buffer the operation ran on
        height: u32,
        /// What collapsed
        reason: String,
    },
}

impl Error {
    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::DegenerateGeometry`] error.
    #[inline]
    pub fn degenerate_geometry(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. })
    }

    /// Returns `true` if this error is absorbed by the compositor instead
    /// of being reported to the caller.
    #[inline]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::DegenerateGeometry { .. })
    }
}
