//! Edit records.
//!
//! An [`Edit`] is one parameterized transformation with an identity, a
//! creation time and a human-readable description. Its operation is an
//! [`EditOp`], a sum type carrying only the parameters its kind needs.
//!
//! Edits are immutable once built; the history only decides which ones to
//! replay and in what order.
//!
//! ```rust
//! use retouch_edit::{Edit, EditKind};
//! use retouch_ops::FilterType;
//!
//! let edit = Edit::filter(FilterType::Sepia, 80.0);
//! assert_eq!(edit.kind(), Some(EditKind::Filter));
//! assert_eq!(edit.description(), "Filter: Sepia (80%)");
//! ```

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

use retouch_core::CropRect;
use retouch_ops::adjust::AdjustmentParams;
use retouch_ops::filter::{sanitize_intensity, FilterType};
use uuid::Uuid;

/// Creation time of an edit, in milliseconds since the Unix epoch.
///
/// Persisted as RFC 3339 text with millisecond precision; integer
/// milliseconds are accepted when loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(u64);

static LAST_STAMP: AtomicU64 = AtomicU64::new(0);

impl Timestamp {
    /// Wraps a millisecond count.
    #[inline]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Milliseconds since the Unix epoch.
    #[inline]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Current wall-clock time.
    ///
    /// Strictly increasing within a process: two calls in the same
    /// millisecond get consecutive values, so edits created one after
    /// another replay in creation order.
    pub fn now() -> Self {
        let wall = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let prev = LAST_STAMP
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| Some(wall.max(last + 1)))
            .unwrap_or(wall);
        Self(wall.max(prev + 1))
    }
}

/// Kinds of edit the engine can replay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    /// Sub-rectangle extraction
    Crop,
    /// Rotation about the center
    Rotate,
    /// Colour filter
    Filter,
    /// Tonal adjustment
    Adjustment,
}

impl EditKind {
    /// Lowercase tag used in persisted records.
    pub fn as_str(self) -> &'static str {
        match self {
            EditKind::Crop => "crop",
            EditKind::Rotate => "rotate",
            EditKind::Filter => "filter",
            EditKind::Adjustment => "adjustment",
        }
    }
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The operation an edit performs.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOp {
    /// Crop to a rectangle of the buffer current at replay time.
    Crop(CropRect),
    /// Rotate clockwise by `angle_degrees`.
    Rotate {
        /// Degrees, any range; positive is clockwise
        angle_degrees: f64,
    },
    /// Blend a colour filter.
    Filter {
        /// Filter family
        filter_type: FilterType,
        /// 0..=100
        intensity: f64,
    },
    /// Tonal adjustment.
    Adjustment(AdjustmentParams),
    /// A record whose kind was not recognized when it was loaded.
    /// Replay skips it.
    Unknown {
        /// Kind tag as stored
        kind: String,
    },
}

impl EditOp {
    /// Kind of this operation, or `None` for [`EditOp::Unknown`].
    pub fn kind(&self) -> Option<EditKind> {
        match self {
            EditOp::Crop(_) => Some(EditKind::Crop),
            EditOp::Rotate { .. } => Some(EditKind::Rotate),
            EditOp::Filter { .. } => Some(EditKind::Filter),
            EditOp::Adjustment(_) => Some(EditKind::Adjustment),
            EditOp::Unknown { .. } => None,
        }
    }

    /// Kind tag, including the stored tag of unknown records.
    pub fn kind_str(&self) -> &str {
        match self {
            EditOp::Unknown { kind } => kind,
            op => op.kind().map(EditKind::as_str).unwrap_or_default(),
        }
    }

    /// Default description for this operation.
    pub fn describe(&self) -> String {
        match self {
            EditOp::Crop(r) => format!("Crop ({}x{} from {},{})", r.width, r.height, r.x, r.y),
            EditOp::Rotate { angle_degrees } => format!("Rotate ({angle_degrees}°)"),
            EditOp::Filter {
                filter_type,
                intensity,
            } => format!("Filter: {} ({}%)", filter_type.display_name(), intensity),
            EditOp::Adjustment(p) => {
                let parts: Vec<String> = [
                    ("Brightness", p.brightness),
                    ("Contrast", p.contrast),
                    ("Saturation", p.saturation),
                    ("Blur", p.blur),
                ]
                .into_iter()
                .filter(|(_, v)| *v != 0.0)
                .map(|(name, v)| format!("{name}: {v}"))
                .collect();
                if parts.is_empty() {
                    "Adjustments: none".to_string()
                } else {
                    format!("Adjustments: {}", parts.join(", "))
                }
            }
            EditOp::Unknown { kind } => format!("Unknown edit ({kind})"),
        }
    }
}

/// One non-destructive edit.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "crate::record::EditRecord", into = "crate::record::EditRecord")
)]
pub struct Edit {
    id: String,
    op: EditOp,
    created_at: Timestamp,
    description: String,
}

impl Edit {
    /// Creates an edit with a fresh id, the current time and the default
    /// description for `op`.
    pub fn new(op: EditOp) -> Self {
        let description = op.describe();
        Self {
            id: Uuid::new_v4().to_string(),
            op,
            created_at: Timestamp::now(),
            description,
        }
    }

    /// Rebuilds an edit from stored parts without touching any field.
    pub fn from_parts(
        id: impl Into<String>,
        op: EditOp,
        created_at: Timestamp,
        description: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            op,
            created_at,
            description: description.into(),
        }
    }

    /// Crop edit.
    pub fn crop(rect: CropRect) -> Self {
        Self::new(EditOp::Crop(rect))
    }

    /// Rotate edit. Non-finite angles are stored as 0.
    pub fn rotate(angle_degrees: f64) -> Self {
        let angle_degrees = if angle_degrees.is_finite() { angle_degrees } else { 0.0 };
        Self::new(EditOp::Rotate { angle_degrees })
    }

    /// Filter edit; intensity is clamped into `[0, 100]`.
    pub fn filter(filter_type: FilterType, intensity: f64) -> Self {
        Self::new(EditOp::Filter {
            filter_type,
            intensity: sanitize_intensity(intensity),
        })
    }

    /// Adjustment edit; every field is clamped into its range.
    pub fn adjustment(params: AdjustmentParams) -> Self {
        Self::new(EditOp::Adjustment(params.sanitized()))
    }

    /// Returns this edit with `created_at` replaced.
    pub fn with_created_at(mut self, created_at: Timestamp) -> Self {
        self.created_at = created_at;
        self
    }

    /// Returns this edit with a custom description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Unique id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The operation.
    pub fn op(&self) -> &EditOp {
        &self.op
    }

    /// Kind, or `None` if the record was not recognized.
    pub fn kind(&self) -> Option<EditKind> {
        self.op.kind()
    }

    /// Creation time.
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Human-readable description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Sort key that fixes replay order: creation time, then id.
    #[inline]
    pub(crate) fn replay_key(&self) -> (Timestamp, &str) {
        (self.created_at, &self.id)
    }
}
