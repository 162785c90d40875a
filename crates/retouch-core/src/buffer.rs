//! Owned RGBA pixel buffer.
//!
//! [`PixelBuffer`] is the only image container in the engine. It holds
//! 8-bit RGBA samples in **row-major** order, top-to-bottom, with no row
//! padding:
//!
//! ```text
//! Memory: [R G B A R G B A ...]  <- Row 0
//!         [R G B A R G B A ...]  <- Row 1
//!         ...
//! ```
//!
//! The invariant `samples.len() == width * height * 4` holds for every
//! value of the type; every constructor and [`PixelBuffer::resize`]
//! re-establishes it.
//!
//! # Ownership
//!
//! A buffer is plain owned data. The compositor clones the original before
//! replaying edits, so an original can be read by any number of composite
//! calls at once while each call mutates only its private copy.
//!
//! # Usage
//!
//! ```rust
//! use retouch_core::PixelBuffer;
//!
//! let mut buf = PixelBuffer::filled(4, 4, [255, 0, 0, 255]);
//! buf.set(1, 1, [0, 255, 0, 255]).unwrap();
//! assert_eq!(buf.get(1, 1).unwrap(), [0, 255, 0, 255]);
//! assert!(buf.get(4, 0).is_err());
//! ```

use crate::{Error, Rect, Result};

/// Number of interleaved channels per pixel.
pub const CHANNELS: usize = 4;

/// One RGBA pixel, 8 bits per channel, straight (non-premultiplied) alpha.
pub type Rgba = [u8; CHANNELS];

/// Fully transparent black, used for uncovered canvas after rotation.
pub const TRANSPARENT: Rgba = [0, 0, 0, 0];

/// Owned RGBA8 pixel buffer with bounds-checked access.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    samples: Vec<u8>,
}

impl PixelBuffer {
    /// Allocates a buffer of the given size filled with [`TRANSPARENT`].
    ///
    /// Zero width or height is allowed and yields an empty buffer; the
    /// compositor rejects such buffers as originals.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            samples: vec![0; sample_len(width, height)],
        }
    }

    /// Allocates a buffer with every pixel set to `pixel`.
    ///
    /// ```rust
    /// use retouch_core::PixelBuffer;
    ///
    /// let red = PixelBuffer::filled(2, 2, [255, 0, 0, 255]);
    /// assert_eq!(red.samples(), &[255, 0, 0, 255].repeat(4)[..]);
    /// ```
    pub fn filled(width: u32, height: u32, pixel: Rgba) -> Self {
        let count = width as usize * height as usize;
        let mut samples = Vec::with_capacity(count * CHANNELS);
        for _ in 0..count {
            samples.extend_from_slice(&pixel);
        }
        Self {
            width,
            height,
            samples,
        }
    }

    /// Wraps decoded RGBA samples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `samples.len()` is not
    /// `width * height * 4`, or if that product overflows.
    pub fn from_raw(width: u32, height: u32, samples: Vec<u8>) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(CHANNELS))
            .ok_or_else(|| Error::invalid_dimensions(width, height, "sample count overflows"))?;
        if samples.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} samples, got {}", expected, samples.len()),
            ));
        }
        Ok(Self {
            width,
            height,
            samples,
        })
    }

    /// Returns the buffer width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the buffer height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Returns `true` if the buffer has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns a rectangle covering the entire buffer.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Raw interleaved samples.
    #[inline]
    pub fn samples(&self) -> &[u8] {
        &self.samples
    }

    /// Mutable raw samples. The length cannot change through this slice.
    #[inline]
    pub fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.samples
    }

    /// Consumes the buffer and returns its samples.
    #[inline]
    pub fn into_raw(self) -> Vec<u8> {
        self.samples
    }

    /// Number of samples in one row.
    #[inline]
    pub fn row_len(&self) -> usize {
        self.width as usize * CHANNELS
    }

    /// Returns row `y`, or `None` past the last row.
    pub fn row(&self, y: u32) -> Option<&[u8]> {
        if y >= self.height {
            return None;
        }
        let start = y as usize * self.row_len();
        Some(&self.samples[start..start + self.row_len()])
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        Ok((y as usize * self.width as usize + x as usize) * CHANNELS)
    }

    /// Returns the pixel at (x, y).
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] if `x >= width || y >= height`.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Result<Rgba> {
        let offset = self.offset(x, y)?;
        let mut px = TRANSPARENT;
        px.copy_from_slice(&self.samples[offset..offset + CHANNELS]);
        Ok(px)
    }

    /// Overwrites the pixel at (x, y).
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] if `x >= width || y >= height`.
    #[inline]
    pub fn set(&mut self, x: u32, y: u32, pixel: Rgba) -> Result<()> {
        let offset = self.offset(x, y)?;
        self.samples[offset..offset + CHANNELS].copy_from_slice(&pixel);
        Ok(())
    }

    /// Reallocates to `width` x `height`, clearing every sample to
    /// [`TRANSPARENT`]. Content is discarded, not resampled.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.samples.clear();
        self.samples.resize(sample_len(width, height), 0);
    }
}

impl std::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("samples", &self.samples.len())
            .finish()
    }
}

#[inline]
fn sample_len(width: u32, height: u32) -> usize {
    width as usize * height as usize * CHANNELS
}
