//! Edit replay.
//!
//! [`CompositionEngine`] turns an original image plus an [`EditHistory`]
//! into a final buffer. It holds nothing but its [`CompositeOptions`], so
//! one engine can serve any number of images and concurrent calls.
//!
//! # Example
//!
//! ```rust
//! use retouch_core::PixelBuffer;
//! use retouch_edit::{CompositionEngine, Edit, EditHistory};
//! use retouch_ops::FilterType;
//!
//! let original = PixelBuffer::filled(4, 4, [255, 0, 0, 255]);
//! let mut history = EditHistory::new();
//! history.append(Edit::filter(FilterType::Grayscale, 100.0));
//!
//! let engine = CompositionEngine::default();
//! let out = engine.composite_full(&original, &history).unwrap();
//! assert_eq!(out.get(0, 0).unwrap(), [85, 85, 85, 255]);
//! ```

use retouch_core::PixelBuffer;
use retouch_ops::adjust::{self, DEFAULT_BLUR_PASSES};
use retouch_ops::{filter, transform, Resample};
use tracing::{debug, warn};

use crate::edit::{Edit, EditOp};
use crate::error::{EditError, EditResult};
use crate::history::EditHistory;

/// Replay settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct CompositeOptions {
    /// Sampling used by rotation.
    pub resample: Resample,
    /// Box passes approximating the Gaussian blur. Values below 1 count as 1.
    pub blur_passes: u32,
}

impl Default for CompositeOptions {
    fn default() -> Self {
        Self {
            resample: Resample::Bilinear,
            blur_passes: DEFAULT_BLUR_PASSES,
        }
    }
}

impl CompositeOptions {
    /// Sets the rotation sampling.
    pub fn with_resample(mut self, resample: Resample) -> Self {
        self.resample = resample;
        self
    }

    /// Sets the number of blur passes.
    pub fn with_blur_passes(mut self, passes: u32) -> Self {
        self.blur_passes = passes;
        self
    }
}

/// Replays edit histories onto original images.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompositionEngine {
    options: CompositeOptions,
}

impl CompositionEngine {
    /// Creates an engine with the given options.
    pub fn new(options: CompositeOptions) -> Self {
        Self { options }
    }

    /// Replay settings.
    pub fn options(&self) -> &CompositeOptions {
        &self.options
    }

    /// Replays every edit of `history` onto a copy of `original`.
    ///
    /// Pure: the same original and the same set of edits always give the
    /// same pixels. Edits that cannot be replayed are logged and skipped.
    ///
    /// # Errors
    ///
    /// [`EditError::EmptyOriginal`] if `original` has zero width or height.
    pub fn composite_full(&self, original: &PixelBuffer, history: &EditHistory) -> EditResult<PixelBuffer> {
        if original.is_empty() {
            return Err(EditError::EmptyOriginal {
                width: original.width(),
                height: original.height(),
            });
        }
        debug!(
            width = original.width(),
            height = original.height(),
            edits = history.len(),
            "Compositing full history"
        );

        let mut working = original.clone();
        for edit in history.ordered_for_replay() {
            working = self.apply_edit(working, edit);
        }
        Ok(working)
    }

    /// Applies `edit` on top of an existing composite.
    ///
    /// Equals `composite_full` with `edit` appended, provided `current` came
    /// from `composite_full` of a history after which `edit` sorts. That
    /// precondition is not checked here; [`EditSession`](crate::EditSession)
    /// checks it before taking this path.
    pub fn composite_incremental(&self, current: &PixelBuffer, edit: &Edit) -> PixelBuffer {
        debug!(id = edit.id(), kind = edit.op().kind_str(), "Compositing incrementally");
        self.apply_edit(current.clone(), edit)
    }

    /// Runs one edit on the working buffer.
    fn apply_edit(&self, mut working: PixelBuffer, edit: &Edit) -> PixelBuffer {
        debug!(id = edit.id(), kind = edit.op().kind_str(), "Replaying edit");
        match edit.op() {
            EditOp::Crop(rect) => transform::crop(&working, rect),
            EditOp::Rotate { angle_degrees } => transform::rotate(&working, *angle_degrees, self.options.resample),
            EditOp::Filter {
                filter_type,
                intensity,
            } => {
                filter::apply(&mut working, *filter_type, *intensity);
                working
            }
            EditOp::Adjustment(params) => {
                adjust::apply(&mut working, params, self.options.blur_passes.max(1));
                working
            }
            EditOp::Unknown { kind } => {
                let err = EditError::UnknownEditKind {
                    id: edit.id().to_string(),
                    kind: kind.clone(),
                };
                warn!(%err, "Skipping edit");
                working
            }
        }
    }
}
