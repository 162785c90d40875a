//! Rectangle types for crop regions.
//!
//! - [`Rect`] - unsigned rectangle that is known to lie inside a buffer
//! - [`CropRect`] - user-supplied crop request; the origin may be negative
//!   and the extent may run past the buffer edge
//!
//! # Coordinate System
//!
//! Origin (0, 0) is the **top-left** corner, X grows right, Y grows down.
//! Left/top edges are inclusive, right/bottom edges exclusive.
//!
//! ```rust
//! use retouch_core::{CropRect, Rect};
//!
//! // Asking for 10 columns starting at x = 2 on a 4-wide buffer
//! let crop = CropRect::new(2, 0, 10, 4);
//! assert_eq!(crop.resolve(4, 4).unwrap(), Rect::new(2, 0, 2, 4));
//! ```

use crate::{Error, Result};

/// A rectangle with origin (x, y) and dimensions (width, height).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// X coordinate of the left edge (inclusive)
    pub x: u32,
    /// Y coordinate of the top edge (inclusive)
    pub y: u32,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Rect {
    /// Creates a new rectangle.
    #[inline]
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle at the origin.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width, height)
    }

    /// X coordinate of the right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Y coordinate of the bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.y + self.height
    }

    /// Area in pixels.
    #[inline]
    pub const fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }

    /// Returns `true` if either dimension is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `true` if (px, py) lies inside.
    ///
    /// ```rust
    /// use retouch_core::Rect;
    ///
    /// let rect = Rect::new(10, 10, 100, 100);
    /// assert!(rect.contains(10, 10));
    /// assert!(!rect.contains(110, 110));
    /// ```
    #[inline]
    pub const fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }
}

/// Crop request in the coordinate space of the buffer it will run on.
///
/// The request is not validated when built: it is resolved against the
/// current working buffer at replay time, because earlier crops change
/// what "in bounds" means.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CropRect {
    /// Left edge; may be negative
    pub x: i32,
    /// Top edge; may be negative
    pub y: i32,
    /// Requested width
    pub width: u32,
    /// Requested height
    pub height: u32,
}

impl CropRect {
    /// Creates a crop request.
    #[inline]
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A request that resolves to the whole buffer, whatever its size.
    #[inline]
    pub const fn full() -> Self {
        Self::new(0, 0, u32::MAX, u32::MAX)
    }

    /// Clamps the request to a `width` x `height` buffer.
    ///
    /// Each edge is clamped independently into `[0, size]`, so a request
    /// that starts left of the buffer keeps only its visible part.
    ///
    /// # Errors
    ///
    /// [`Error::DegenerateGeometry`] if nothing of the request overlaps the
    /// buffer (zero-area result).
    pub fn resolve(&self, width: u32, height: u32) -> Result<Rect> {
        let (x0, x1) = clamp_span(self.x, self.width, width);
        let (y0, y1) = clamp_span(self.y, self.height, height);
        let rect = Rect::new(x0, y0, x1 - x0, y1 - y0);
        if rect.is_empty() {
            return Err(Error::degenerate_geometry(
                width,
                height,
                format!(
                    "crop {}x{} at ({}, {}) has no visible area",
                    self.width, self.height, self.x, self.y
                ),
            ));
        }
        Ok(rect)
    }
}

/// Clamps `[start, start + len)` to `[0, limit]`, returning `(begin, end)`
/// with `begin <= end`.
#[inline]
fn clamp_span(start: i32, len: u32, limit: u32) -> (u32, u32) {
    let limit = i64::from(limit);
    let begin = i64::from(start).clamp(0, limit);
    let end = (i64::from(start) + i64::from(len)).clamp(begin, limit);
    (begin as u32, end as u32)
}
