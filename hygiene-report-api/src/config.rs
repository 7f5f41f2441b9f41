use chrono::FixedOffset;

use crate::error::{ApiError, ApiResult};

pub const REFERENCE_OFFSET_ENV: &str = "HYGIENE_REFERENCE_UTC_OFFSET";
pub const RECORD_ID_PREFIX_ENV: &str = "HYGIENE_RECORD_ID_PREFIX";

const DEFAULT_REFERENCE_OFFSET: &str = "+07:00";
const DEFAULT_REFERENCE_OFFSET_SECS: i32 = 7 * 3600;
const DEFAULT_RECORD_ID_PREFIX: &str = "REC";

/// Settings shared by the reporting engine and the store adapters.
///
/// All calendar-date arithmetic (filter bounds, generated record ids) happens
/// in `reference_offset`, never in the host's local timezone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub reference_offset: FixedOffset,
    pub record_id_prefix: String,
}

impl ReportConfig {
    pub fn new(reference_offset: FixedOffset, record_id_prefix: impl Into<String>) -> Self {
        Self {
            reference_offset,
            record_id_prefix: record_id_prefix.into(),
        }
    }

    /// Build the configuration from the process environment.
    ///
    /// # Environment
    /// * `HYGIENE_REFERENCE_UTC_OFFSET` - UTC offset such as `+07:00` (default `+07:00`)
    /// * `HYGIENE_RECORD_ID_PREFIX` - prefix for generated record ids (default `REC`)
    pub fn from_env() -> ApiResult<Self> {
        let offset = std::env::var(REFERENCE_OFFSET_ENV)
            .unwrap_or_else(|_| DEFAULT_REFERENCE_OFFSET.to_string());
        let prefix = std::env::var(RECORD_ID_PREFIX_ENV)
            .unwrap_or_else(|_| DEFAULT_RECORD_ID_PREFIX.to_string());
        Self::from_parts(&offset, &prefix)
    }

    pub fn from_parts(offset: &str, prefix: &str) -> ApiResult<Self> {
        let reference_offset = offset.trim().parse::<FixedOffset>().map_err(|e| {
            ApiError::ConfigurationError(format!("Invalid UTC offset '{offset}': {e}"))
        })?;

        let prefix = prefix.trim();
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ApiError::ConfigurationError(format!(
                "Record id prefix must be non-empty ASCII alphanumerics, got '{prefix}'"
            )));
        }

        Ok(Self::new(reference_offset, prefix))
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        let reference_offset = FixedOffset::east_opt(DEFAULT_REFERENCE_OFFSET_SECS)
            .expect("default reference offset is within one day of UTC");
        Self::new(reference_offset, DEFAULT_RECORD_ID_PREFIX)
    }
}
