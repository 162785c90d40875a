//! Persisted record shape of an [`Edit`].
//!
//! ```json
//! {
//!   "id": "5f0c...",
//!   "type": "filter",
//!   "parameters": { "filterType": "sepia", "intensity": 80 },
//!   "createdAt": "2024-05-01T10:00:00.000Z",
//!   "description": "Filter: Sepia (80%)"
//! }
//! ```
//!
//! `createdAt` is written as RFC 3339 text in UTC with millisecond
//! precision; integer milliseconds since the Unix epoch are accepted too.
//!
//! Parameters are flat and optional. Missing fields take the defaults an
//! editor would have filled in: angle 0, filter `none`, intensity 100,
//! adjustments 0. A crop missing any of its four fields does nothing.
//! Records with an unrecognized `type` or filter name load as
//! [`EditOp::Unknown`] and are skipped at replay time.

use chrono::{DateTime, SecondsFormat, Utc};
use retouch_core::CropRect;
use retouch_ops::adjust::AdjustmentParams;
use retouch_ops::filter::{sanitize_intensity, FilterType};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

use crate::edit::{Edit, EditOp, Timestamp};

/// Wire form of [`Edit`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct EditRecord {
    id: String,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    parameters: ParameterRecord,
    #[serde(default)]
    created_at: Timestamp,
    #[serde(default)]
    description: String,
}

/// Flat, all-optional parameter bag shared by every edit kind.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ParameterRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    crop_x: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    crop_y: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    crop_width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    crop_height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    angle: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    filter_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    intensity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    brightness: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    contrast: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    saturation: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    blur: Option<f64>,
}

impl ParameterRecord {
    fn into_op(self, id: &str, kind: &str) -> EditOp {
        match kind {
            "crop" => match (self.crop_x, self.crop_y, self.crop_width, self.crop_height) {
                (Some(x), Some(y), Some(width), Some(height)) => EditOp::Crop(CropRect::new(x, y, width, height)),
                _ => {
                    warn!(id, "Crop record is missing fields, loading as a no-op");
                    EditOp::Crop(CropRect::full())
                }
            },
            "rotate" => EditOp::Rotate {
                angle_degrees: self.angle.filter(|a| a.is_finite()).unwrap_or(0.0),
            },
            "filter" => {
                let filter_type = match self.filter_type {
                    None => FilterType::None,
                    Some(name) => match name.parse::<FilterType>() {
                        Ok(filter_type) => filter_type,
                        Err(err) => {
                            warn!(id, %err, "Unknown filter in record");
                            return EditOp::Unknown {
                                kind: format!("filter:{name}"),
                            };
                        }
                    },
                };
                EditOp::Filter {
                    filter_type,
                    intensity: sanitize_intensity(self.intensity.unwrap_or(100.0)),
                }
            }
            "adjustment" => EditOp::Adjustment(
                AdjustmentParams {
                    brightness: self.brightness.unwrap_or(0.0),
                    contrast: self.contrast.unwrap_or(0.0),
                    saturation: self.saturation.unwrap_or(0.0),
                    blur: self.blur.unwrap_or(0.0),
                }
                .sanitized(),
            ),
            other => EditOp::Unknown {
                kind: other.to_string(),
            },
        }
    }

    fn from_op(op: &EditOp) -> Self {
        match *op {
            EditOp::Crop(r) => Self {
                crop_x: Some(r.x),
                crop_y: Some(r.y),
                crop_width: Some(r.width),
                crop_height: Some(r.height),
                ..Default::default()
            },
            EditOp::Rotate { angle_degrees } => Self {
                angle: Some(angle_degrees),
                ..Default::default()
            },
            EditOp::Filter {
                filter_type,
                intensity,
            } => Self {
                filter_type: Some(filter_type.as_str().to_string()),
                intensity: Some(intensity),
                ..Default::default()
            },
            EditOp::Adjustment(p) => Self {
                brightness: Some(p.brightness),
                contrast: Some(p.contrast),
                saturation: Some(p.saturation),
                blur: Some(p.blur),
                ..Default::default()
            },
            // Parameters of unknown records are not kept
            EditOp::Unknown { .. } => Self::default(),
        }
    }
}

impl From<EditRecord> for Edit {
    fn from(rec: EditRecord) -> Self {
        let op = rec.parameters.into_op(&rec.id, &rec.kind);
        Edit::from_parts(rec.id, op, rec.created_at, rec.description)
    }
}

impl From<Edit> for EditRecord {
    fn from(edit: Edit) -> Self {
        EditRecord {
            id: edit.id().to_string(),
            kind: edit.op().kind_str().to_string(),
            parameters: ParameterRecord::from_op(edit.op()),
            created_at: edit.created_at(),
            description: edit.description().to_string(),
        }
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let millis = self.as_millis();
        match i64::try_from(millis).ok().and_then(DateTime::<Utc>::from_timestamp_millis) {
            Some(at) => serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true)),
            // Past chrono's calendar range
            None => serializer.serialize_u64(millis),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TimestampRepr {
    Millis(u64),
    Text(String),
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match TimestampRepr::deserialize(deserializer)? {
            TimestampRepr::Millis(millis) => Ok(Timestamp::from_millis(millis)),
            TimestampRepr::Text(text) => {
                let at = DateTime::parse_from_rfc3339(&text).map_err(de::Error::custom)?;
                u64::try_from(at.timestamp_millis())
                    .map(Timestamp::from_millis)
                    .map_err(|_| de::Error::custom(format!("timestamp before the Unix epoch: {text}")))
            }
        }
    }
}
