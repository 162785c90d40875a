//! Error types for edit replay.

use thiserror::Error;

/// Errors raised while compositing an edit history.
///
/// Only [`EditError::EmptyOriginal`] is ever returned to callers; the other
/// variants describe per-edit problems that replay absorbs and logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditError {
    /// The original image has zero width or height.
    #[error("original image is empty ({width}x{height})")]
    EmptyOriginal {
        /// Original width
        width: u32,
        /// Original height
        height: u32,
    },

    /// An edit record carries a kind this engine cannot replay.
    #[error("edit {id} has unknown kind '{kind}', skipped")]
    UnknownEditKind {
        /// Edit id
        id: String,
        /// Kind tag as stored
        kind: String,
    },
}

/// Result type for edit operations.
pub type EditResult<T> = Result<T, EditError>;
