use chrono::{DateTime, Days, FixedOffset, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Caller-supplied narrowing of the scan log.
///
/// Every field is optional and independent; each present field narrows the
/// result and absent (or blank) fields impose no constraint. Dates are
/// calendar days in `YYYY-MM-DD` form, both ends inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    pub activity_id: Option<String>,
    pub department: Option<String>,
    pub emp_id: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl FilterCriteria {
    pub fn with_activity(mut self, activity_id: impl Into<String>) -> Self {
        self.activity_id = Some(activity_id.into());
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    pub fn with_employee(mut self, emp_id: impl Into<String>) -> Self {
        self.emp_id = Some(emp_id.into());
        self
    }

    pub fn with_start_date(mut self, date: impl Into<String>) -> Self {
        self.start_date = Some(date.into());
        self
    }

    pub fn with_end_date(mut self, date: impl Into<String>) -> Self {
        self.end_date = Some(date.into());
        self
    }

    pub fn activity(&self) -> Option<&str> {
        present(&self.activity_id)
    }

    pub fn department(&self) -> Option<&str> {
        present(&self.department)
    }

    pub fn employee(&self) -> Option<&str> {
        present(&self.emp_id)
    }

    /// True when no field constrains the result.
    pub fn is_unconstrained(&self) -> bool {
        self.activity().is_none()
            && self.department().is_none()
            && self.employee().is_none()
            && present(&self.start_date).is_none()
            && present(&self.end_date).is_none()
    }

    /// Resolve the date fields into instants in the reference timezone.
    ///
    /// # Returns
    /// * `Ok(TimeWindow)` - bounds for the present date fields
    /// * `Err(ApiError::InvalidFilter)` - a date field is not a valid calendar date
    pub fn time_window(&self, offset: FixedOffset) -> ApiResult<TimeWindow> {
        let start = present(&self.start_date)
            .map(|value| parse_date("start_date", value))
            .transpose()?;
        let end = present(&self.end_date)
            .map(|value| parse_date("end_date", value))
            .transpose()?;

        let from = start.map(|date| start_of_day(date, offset)).transpose()?;
        // the whole end day is included, so the bound is the next midnight, exclusive
        let until = end
            .map(|date| {
                let next = date.checked_add_days(Days::new(1)).ok_or_else(|| {
                    invalid("end_date", present(&self.end_date).unwrap_or_default())
                })?;
                start_of_day(next, offset)
            })
            .transpose()?;

        Ok(TimeWindow { from, until })
    }
}

/// Half-open instant range derived from the date criteria.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeWindow {
    /// Inclusive lower bound.
    pub from: Option<DateTime<Utc>>,
    /// Exclusive upper bound.
    pub until: Option<DateTime<Utc>>,
}

impl TimeWindow {
    pub fn contains(&self, instant: &DateTime<Utc>) -> bool {
        self.from.map_or(true, |from| *instant >= from)
            && self.until.map_or(true, |until| *instant < until)
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.until.is_none()
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_date(field: &'static str, value: &str) -> ApiResult<NaiveDate> {
    // chrono accepts unpadded fields, the log format does not
    if value.len() != 10 {
        return Err(invalid(field, value));
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| invalid(field, value))
}

fn start_of_day(date: NaiveDate, offset: FixedOffset) -> ApiResult<DateTime<Utc>> {
    date.and_hms_opt(0, 0, 0)
        .and_then(|midnight| midnight.and_local_timezone(offset).single())
        .map(|local| local.with_timezone(&Utc))
        .ok_or_else(|| invalid("date", &date.to_string()))
}

fn invalid(field: &'static str, value: &str) -> ApiError {
    ApiError::InvalidFilter {
        field,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn bangkok() -> FixedOffset {
        FixedOffset::east_opt(7 * 3600).unwrap()
    }

    #[test]
    fn test_blank_fields_are_absent() {
        let criteria = FilterCriteria {
            activity_id: Some("  ".to_string()),
            department: Some(String::new()),
            ..Default::default()
        };
        assert!(criteria.is_unconstrained());
        assert_eq!(criteria.activity(), None);
        assert!(criteria.time_window(bangkok()).unwrap().is_unbounded());
    }

    #[test]
    fn test_window_covers_whole_days_in_reference_offset() {
        let criteria = FilterCriteria::default()
            .with_start_date("2026-01-30")
            .with_end_date("2026-01-31");
        let window = criteria.time_window(bangkok()).unwrap();

        // 2026-01-30 00:00 at +07:00
        assert_eq!(window.from, Some(Utc.with_ymd_and_hms(2026, 1, 29, 17, 0, 0).unwrap()));
        // 2026-02-01 00:00 at +07:00, exclusive
        assert_eq!(window.until, Some(Utc.with_ymd_and_hms(2026, 1, 31, 17, 0, 0).unwrap()));

        let last_second = bangkok().with_ymd_and_hms(2026, 1, 31, 23, 59, 59).unwrap();
        let next_day = bangkok().with_ymd_and_hms(2026, 2, 1, 0, 0, 1).unwrap();
        assert!(window.contains(&last_second.with_timezone(&Utc)));
        assert!(!window.contains(&next_day.with_timezone(&Utc)));
    }

    #[test]
    fn test_malformed_dates_fail() {
        for bad in ["2026-13-01", "2026-02-30", "30/01/2026", "2026-1-5", "yesterday"] {
            let err = FilterCriteria::default()
                .with_end_date(bad)
                .time_window(bangkok())
                .unwrap_err();
            match err {
                ApiError::InvalidFilter { field, value } => {
                    assert_eq!(field, "end_date");
                    assert_eq!(value, bad);
                }
                other => panic!("unexpected error: {other}"),
            }
        }

        let err = FilterCriteria::default()
            .with_start_date("2026-01-3x")
            .time_window(bangkok())
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidFilter { field: "start_date", .. }));
    }

    #[test]
    fn test_deserializes_from_partial_query() {
        let criteria: FilterCriteria =
            serde_json::from_str(r#"{"department": "ICU", "end_date": "2026-01-31"}"#).unwrap();
        assert_eq!(criteria.department(), Some("ICU"));
        assert_eq!(criteria.employee(), None);
        assert!(!criteria.is_unconstrained());
    }
}
