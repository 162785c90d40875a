//! # retouch-core
//!
//! Core types for the retouch edit engine.
//!
//! - [`PixelBuffer`] - owned RGBA8 buffer with bounds-checked access
//! - [`Rgba`] - one pixel
//! - [`Rect`], [`CropRect`] - crop regions and their clamping rules
//! - [`Error`] - failure modes shared by every retouch crate
//!
//! ## Crate Structure
//!
//! ```text
//! retouch-core (this crate)
//!    ^
//!    |
//!    +-- retouch-ops  (filter, adjustment and geometry kernels)
//!    +-- retouch-edit (edit records, history, compositor)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod buffer;
pub mod error;
pub mod rect;

pub use buffer::{PixelBuffer, Rgba, CHANNELS, TRANSPARENT};
pub use error::{Error, Result};
pub use rect::{CropRect, Rect};
