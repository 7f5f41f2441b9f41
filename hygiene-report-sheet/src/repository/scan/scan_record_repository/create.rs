use chrono::{DateTime, Utc};
use heapless::String as HeaplessString;
use hygiene_report_api::domain::input::NewScanRecord;
use hygiene_report_db::models::{clamp_score, Identifiable, ScanRecordModel};
use std::collections::HashSet;
use std::error::Error;
use tracing::debug;

use super::repo_impl::ScanRecordRepositoryImpl;
use crate::utils::{parse_timestamp, required_heapless, to_heapless};
use crate::workbook::{Worksheet, RECORDS_SHEET};

impl ScanRecordRepositoryImpl {
    /// Append a scan, assigning its `record_id` and `timestamp`.
    ///
    /// Missing scores are stored as 0 and out-of-range scores are clamped.
    pub fn create(&self, item: NewScanRecord) -> Result<ScanRecordModel, Box<dyn Error + Send + Sync>> {
        let emp_id = required_heapless(&item.emp_id, "emp_id")?;
        let activity_id = required_heapless(&item.activity_id, "activity_id")?;
        let image_url = optional_text(item.image_url.as_deref(), "image_url")?;
        let notes = optional_text(item.notes.as_deref(), "notes")?;

        // id and timestamp are derived from the sheet under the same write guard
        let record = {
            let mut workbook = self.workbook.write();
            let sheet = workbook
                .sheet_mut(RECORDS_SHEET)
                .ok_or_else(|| format!("Sheet '{RECORDS_SHEET}' not found"))?;

            let timestamp = self.next_timestamp(sheet);
            let record = ScanRecordModel {
                record_id: self.next_record_id(sheet, timestamp)?,
                emp_id,
                activity_id,
                timestamp,
                front_score: clamp_score(item.front_score.unwrap_or(0.0)),
                back_score: clamp_score(item.back_score.unwrap_or(0.0)),
                zones: item.zones,
                image_url,
                notes,
            };
            sheet.append(Self::record_cells(&record));
            record
        };

        debug!(record_id = record.get_id(), timestamp = %record.timestamp, "Appended scan record row");
        Ok(record)
    }

    /// Clock time, held back to the latest stored timestamp if the clock is behind it.
    fn next_timestamp(&self, sheet: &Worksheet) -> DateTime<Utc> {
        let now = self.clock.now();
        let latest = sheet
            .rows()
            .filter_map(|(_, row)| row.get("timestamp").to_text())
            .filter_map(|text| parse_timestamp(text.trim(), self.config.reference_offset))
            .max();

        match latest {
            Some(latest) if latest > now => latest,
            _ => now,
        }
    }

    /// `<prefix>-yyyyMMdd-HHmmss` in the reference offset, with `-2`, `-3`, ...
    /// appended while the id is taken.
    fn next_record_id(
        &self,
        sheet: &Worksheet,
        timestamp: DateTime<Utc>,
    ) -> Result<HeaplessString<50>, Box<dyn Error + Send + Sync>> {
        let local = timestamp.with_timezone(&self.config.reference_offset);
        let base = format!("{}-{}", self.config.record_id_prefix, local.format("%Y%m%d-%H%M%S"));

        let taken: HashSet<String> = sheet
            .rows()
            .filter_map(|(_, row)| row.get("record_id").to_text())
            .map(|id| id.trim().to_string())
            .collect();

        let mut candidate = base.clone();
        let mut suffix = 2;
        while taken.contains(&candidate) {
            candidate = format!("{base}-{suffix}");
            suffix += 1;
        }
        to_heapless(&candidate, "record_id")
    }
}

fn optional_text<const N: usize>(
    value: Option<&str>,
    col_name: &str,
) -> Result<Option<HeaplessString<N>>, Box<dyn Error + Send + Sync>> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| to_heapless(value, col_name))
        .transpose()
}
