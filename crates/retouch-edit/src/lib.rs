//! # retouch-edit
//!
//! Non-destructive edit stacks for RGBA images.
//!
//! An image is edited by recording [`Edit`]s in an [`EditHistory`] and
//! replaying them onto the untouched original with a
//! [`CompositionEngine`]. Nothing is ever baked into the original, so any
//! edit can be removed later and the result recomputed.
//!
//! # Modules
//!
//! - [`edit`] - edit records and their operations
//! - [`history`] - ordered edit list
//! - [`engine`] - full and incremental replay
//! - [`session`] - original, history and composite kept in sync
//!
//! # Example
//!
//! ```rust
//! use retouch_core::{CropRect, PixelBuffer};
//! use retouch_edit::{CompositionEngine, Edit, EditSession};
//! use retouch_ops::FilterType;
//!
//! let original = PixelBuffer::filled(64, 48, [180, 140, 90, 255]);
//! let mut session = EditSession::new(CompositionEngine::default(), original).unwrap();
//!
//! session.apply(Edit::crop(CropRect::new(8, 8, 32, 24))).unwrap();
//! session.apply(Edit::filter(FilterType::Sepia, 75.0)).unwrap();
//! assert_eq!(session.composite().dimensions(), (32, 24));
//!
//! session.undo().unwrap();
//! assert_eq!(session.history().len(), 1);
//! ```
//!
//! # Feature Flags
//!
//! - `parallel` (default) - row-parallel kernels
//! - `serde` - persistence of edits, histories and options

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod edit;
pub mod engine;
pub mod history;
#[cfg(feature = "serde")]
mod record;
pub mod session;

pub use edit::{Edit, EditKind, EditOp, Timestamp};
pub use engine::{CompositeOptions, CompositionEngine};
pub use error::{EditError, EditResult};
pub use history::EditHistory;
pub use session::EditSession;
