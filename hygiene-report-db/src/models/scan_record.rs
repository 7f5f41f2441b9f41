use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use hygiene_report_api::domain::zone::{Zone, ZoneFlags};
use serde::{Deserialize, Serialize};

use crate::models::identifiable::Identifiable;

/// Minimum score, on both hand sides, for a scan to count as a pass.
pub const PASS_THRESHOLD: f64 = 80.0;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

/// # Documentation
/// One UV hand scan in the compliance log.
///
/// Records are append-only. After creation only the scores, `notes` and
/// `image_url` may be patched; `record_id`, `emp_id`, `activity_id` and
/// `timestamp` never change.
///
/// Zone flags are serialized as flat `zone_1` .. `zone_11` fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecordModel {
    pub record_id: HeaplessString<50>,

    /// Reference to the scanned employee
    pub emp_id: HeaplessString<50>,

    /// Reference to the activity the scan was taken under
    pub activity_id: HeaplessString<50>,

    /// Assigned by the store when the record is created
    pub timestamp: DateTime<Utc>,

    /// Palm-side quality score in `[0, 100]`
    pub front_score: f64,

    /// Back-of-hand quality score in `[0, 100]`
    pub back_score: f64,

    #[serde(flatten)]
    pub zones: ZoneFlags,

    pub image_url: Option<HeaplessString<1000>>,

    pub notes: Option<HeaplessString<1000>>,
}

impl ScanRecordModel {
    /// Both sides meet the threshold. Uses the raw scores, never rounded ones.
    pub fn passes(&self) -> bool {
        self.front_score >= PASS_THRESHOLD && self.back_score >= PASS_THRESHOLD
    }

    pub fn is_dirty(&self, zone: Zone) -> bool {
        self.zones.is_dirty(zone)
    }
}

impl Identifiable for ScanRecordModel {
    fn get_id(&self) -> &str {
        self.record_id.as_str()
    }
}

/// Bring a raw score into `[0, 100]`. Non-numeric input (NaN) reads as 0.
pub fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        MIN_SCORE
    } else {
        value.clamp(MIN_SCORE, MAX_SCORE)
    }
}
