//! # retouch-ops
//!
//! Stateless image kernels used by the retouch compositor.
//!
//! # Modules
//!
//! - [`filter`] - colour filters blended by intensity
//! - [`adjust`] - brightness, contrast, saturation, blur
//! - [`blur`] - separable box blur
//! - [`transform`] - crop and rotate
//!
//! Every kernel either mutates the [`PixelBuffer`](retouch_core::PixelBuffer)
//! it is given or returns a fresh one; none keeps state between calls.
//!
//! # Example
//!
//! ```rust
//! use retouch_core::PixelBuffer;
//! use retouch_ops::adjust::{self, AdjustmentParams};
//! use retouch_ops::filter::{self, FilterType};
//!
//! let mut buf = PixelBuffer::filled(8, 8, [200, 120, 40, 255]);
//! filter::apply(&mut buf, FilterType::Sepia, 60.0);
//! adjust::apply(&mut buf, &AdjustmentParams { contrast: 20.0, ..Default::default() }, 3);
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` (default) - row-parallel kernels through rayon
//! - `serde` - serialization for [`Resample`]

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod adjust;
pub mod blur;
pub mod filter;
pub mod pixel;
pub mod transform;

pub use adjust::AdjustmentParams;
pub use error::{OpsError, OpsResult};
pub use filter::FilterType;
pub use transform::Resample;
