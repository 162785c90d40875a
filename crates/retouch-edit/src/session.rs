//! Per-image editing state.
//!
//! [`EditSession`] owns one original image, its history and the latest
//! composite. It decides between incremental and full replay: a new edit
//! is applied incrementally only if it replays after every edit already in
//! the history; everything else (out-of-order appends, removal, reset,
//! undo) recomposites from the original.

use retouch_core::PixelBuffer;
use tracing::debug;

use crate::edit::Edit;
use crate::engine::CompositionEngine;
use crate::error::{EditError, EditResult};
use crate::history::EditHistory;

/// Original image, edit history and current composite of one image.
#[derive(Debug, Clone)]
pub struct EditSession {
    engine: CompositionEngine,
    original: PixelBuffer,
    history: EditHistory,
    composite: PixelBuffer,
}

impl EditSession {
    /// Starts an unedited session.
    ///
    /// # Errors
    ///
    /// [`EditError::EmptyOriginal`] if `original` has zero width or height.
    pub fn new(engine: CompositionEngine, original: PixelBuffer) -> EditResult<Self> {
        Self::with_history(engine, original, EditHistory::new())
    }

    /// Starts a session from a stored history, compositing it once.
    ///
    /// # Errors
    ///
    /// [`EditError::EmptyOriginal`] if `original` has zero width or height.
    pub fn with_history(engine: CompositionEngine, original: PixelBuffer, history: EditHistory) -> EditResult<Self> {
        if original.is_empty() {
            return Err(EditError::EmptyOriginal {
                width: original.width(),
                height: original.height(),
            });
        }
        let composite = engine.composite_full(&original, &history)?;
        Ok(Self {
            engine,
            original,
            history,
            composite,
        })
    }

    /// Appends `edit` and updates the composite.
    pub fn apply(&mut self, edit: Edit) -> EditResult<&PixelBuffer> {
        if self.history.sorts_last(&edit) {
            self.composite = self.engine.composite_incremental(&self.composite, &edit);
            self.history.append(edit);
        } else {
            debug!(id = edit.id(), "Edit sorts before history tail, recompositing");
            self.history.append(edit);
            self.recomposite()?;
        }
        Ok(&self.composite)
    }

    /// Removes the edit with `id`. Absent ids leave everything unchanged.
    pub fn remove(&mut self, id: &str) -> EditResult<Option<Edit>> {
        let removed = self.history.remove(id);
        if removed.is_some() {
            self.recomposite()?;
        }
        Ok(removed)
    }

    /// Drops every edit, restoring the original.
    pub fn clear(&mut self) {
        self.history.clear();
        self.composite = self.original.clone();
    }

    /// Removes the edit replayed last.
    pub fn undo(&mut self) -> EditResult<Option<Edit>> {
        let popped = self.history.pop();
        if popped.is_some() {
            self.recomposite()?;
        }
        Ok(popped)
    }

    fn recomposite(&mut self) -> EditResult<()> {
        self.composite = self.engine.composite_full(&self.original, &self.history)?;
        Ok(())
    }

    /// Current composite.
    pub fn composite(&self) -> &PixelBuffer {
        &self.composite
    }

    /// The unedited image.
    pub fn original(&self) -> &PixelBuffer {
        &self.original
    }

    /// Edits applied so far.
    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    /// Returns `true` if the history is non-empty.
    pub fn is_edited(&self) -> bool {
        self.history.is_edited()
    }

    /// Engine used for replay.
    pub fn engine(&self) -> &CompositionEngine {
        &self.engine
    }

    /// Consumes the session, returning the current composite.
    pub fn into_composite(self) -> PixelBuffer {
        self.composite
    }
}
