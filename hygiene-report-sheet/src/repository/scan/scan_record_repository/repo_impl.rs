use chrono::{FixedOffset, SecondsFormat};
use hygiene_report_api::config::ReportConfig;
use hygiene_report_api::domain::zone::{Zone, ZoneFlags};
use hygiene_report_db::models::ScanRecordModel;
use std::error::Error;
use std::sync::Arc;

use crate::clock::Clock;
use crate::utils::{get_bool, get_heapless_string, get_optional_heapless_string, get_score, get_timestamp};
use crate::workbook::{Cell, Row, SharedWorkbook};

pub struct ScanRecordRepositoryImpl {
    pub workbook: SharedWorkbook,
    pub config: ReportConfig,
    pub clock: Arc<dyn Clock>,
}

impl ScanRecordRepositoryImpl {
    pub fn new(workbook: SharedWorkbook, config: ReportConfig, clock: Arc<dyn Clock>) -> Self {
        Self {
            workbook,
            config,
            clock,
        }
    }

    /// Decodes a `records` row. Naive timestamps are read in `offset`.
    pub fn record_from_row(
        row: &Row<'_>,
        offset: FixedOffset,
    ) -> Result<ScanRecordModel, Box<dyn Error + Send + Sync>> {
        let mut zones = ZoneFlags::default();
        for zone in Zone::ALL {
            zones.set(zone, get_bool(row, &zone.key()));
        }

        Ok(ScanRecordModel {
            record_id: get_heapless_string(row, "record_id")?,
            emp_id: get_heapless_string(row, "emp_id")?,
            activity_id: get_heapless_string(row, "activity_id")?,
            timestamp: get_timestamp(row, "timestamp", offset)?,
            front_score: get_score(row, "front_score"),
            back_score: get_score(row, "back_score"),
            zones,
            image_url: get_optional_heapless_string(row, "image_url")?,
            notes: get_optional_heapless_string(row, "notes")?,
        })
    }

    /// Cells for a new `records` row, keyed by header.
    pub(super) fn record_cells(record: &ScanRecordModel) -> Vec<(String, Cell)> {
        let mut cells = vec![
            ("record_id".to_string(), Cell::text(record.record_id.as_str())),
            ("emp_id".to_string(), Cell::text(record.emp_id.as_str())),
            ("activity_id".to_string(), Cell::text(record.activity_id.as_str())),
            (
                "timestamp".to_string(),
                Cell::text(record.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true)),
            ),
            ("front_score".to_string(), Cell::Number(record.front_score)),
            ("back_score".to_string(), Cell::Number(record.back_score)),
        ];
        cells.extend(
            record
                .zones
                .iter()
                .map(|(zone, dirty)| (zone.key(), Cell::Bool(dirty))),
        );
        cells.push(("image_url".to_string(), Cell::optional_text(record.image_url.as_deref())));
        cells.push(("notes".to_string(), Cell::optional_text(record.notes.as_deref())));
        cells
    }
}
