use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use super::zone::ZoneFlags;

/// Byte capacity of id and department code columns.
pub const ID_MAX_BYTES: usize = 50;
/// Byte capacity of name columns.
pub const NAME_MAX_BYTES: usize = 200;
/// Byte capacity of the position column.
pub const POSITION_MAX_BYTES: usize = 100;
/// Byte capacity of image reference and notes columns.
pub const TEXT_MAX_BYTES: usize = 1000;

// Columns hold the trimmed value and are sized in bytes, not characters.
fn check_stored(value: &str, required: bool, max_bytes: usize) -> Result<(), ValidationError> {
    let stored = value.trim();
    if required && stored.is_empty() {
        return Err(ValidationError::new("blank").with_message("must not be blank".into()));
    }
    if stored.len() > max_bytes {
        return Err(ValidationError::new("too_long")
            .with_message(format!("must fit in {max_bytes} bytes, got {}", stored.len()).into()));
    }
    Ok(())
}

fn required_id(value: &str) -> Result<(), ValidationError> {
    check_stored(value, true, ID_MAX_BYTES)
}

fn required_name(value: &str) -> Result<(), ValidationError> {
    check_stored(value, true, NAME_MAX_BYTES)
}

fn stored_name(value: &str) -> Result<(), ValidationError> {
    check_stored(value, false, NAME_MAX_BYTES)
}

fn stored_position(value: &str) -> Result<(), ValidationError> {
    check_stored(value, false, POSITION_MAX_BYTES)
}

fn stored_text(value: &str) -> Result<(), ValidationError> {
    check_stored(value, false, TEXT_MAX_BYTES)
}

/// Payload for appending a scan to the log.
///
/// `record_id` and `timestamp` are not part of the payload: the store assigns
/// both at write time. Missing scores read as 0 and missing zones as clean.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewScanRecord {
    #[validate(length(min = 1, max = 50), custom(function = "required_id"))]
    pub emp_id: String,

    #[validate(length(min = 1, max = 50), custom(function = "required_id"))]
    pub activity_id: String,

    #[serde(default)]
    pub front_score: Option<f64>,

    #[serde(default)]
    pub back_score: Option<f64>,

    #[serde(flatten)]
    pub zones: ZoneFlags,

    #[serde(default)]
    #[validate(url, length(max = 1000), custom(function = "stored_text"))]
    pub image_url: Option<String>,

    #[serde(default)]
    #[validate(length(max = 300), custom(function = "stored_text"))]
    pub notes: Option<String>,
}

/// In-place correction of an existing scan.
///
/// Identity fields (`record_id`, `emp_id`, `activity_id`, `timestamp`) and the
/// zone flags cannot be patched; payloads naming them are rejected when
/// deserialized.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default, deny_unknown_fields)]
pub struct RecordPatch {
    pub front_score: Option<f64>,

    pub back_score: Option<f64>,

    /// `Some("")` clears the stored notes.
    #[validate(length(max = 300), custom(function = "stored_text"))]
    pub notes: Option<String>,

    /// `Some("")` clears the stored image reference.
    #[validate(length(max = 1000), custom(function = "stored_text"))]
    pub image_url: Option<String>,
}

impl RecordPatch {
    pub fn is_empty(&self) -> bool {
        self.front_score.is_none()
            && self.back_score.is_none()
            && self.notes.is_none()
            && self.image_url.is_none()
    }
}

/// Payload for registering an employee. New employees start out active.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewEmployee {
    #[validate(length(min = 1, max = 50), custom(function = "required_id"))]
    pub emp_id: String,

    #[validate(length(min = 1, max = 60), custom(function = "required_name"))]
    pub name_th: String,

    #[serde(default)]
    #[validate(length(max = 60), custom(function = "stored_name"))]
    pub name_en: Option<String>,

    #[validate(length(min = 1, max = 50), custom(function = "required_id"))]
    pub department: String,

    #[serde(default)]
    #[validate(length(max = 30), custom(function = "stored_position"))]
    pub position: Option<String>,
}
