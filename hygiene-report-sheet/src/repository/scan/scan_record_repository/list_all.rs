use hygiene_report_db::models::ScanRecordModel;
use std::error::Error;
use tracing::debug;

use super::repo_impl::ScanRecordRepositoryImpl;
use crate::workbook::RECORDS_SHEET;

impl ScanRecordRepositoryImpl {
    /// Every record in sheet order. A missing `records` sheet reads as empty.
    pub fn list_all(&self) -> Result<Vec<ScanRecordModel>, Box<dyn Error + Send + Sync>> {
        let offset = self.config.reference_offset;
        let workbook = self.workbook.read();
        let Some(sheet) = workbook.sheet(RECORDS_SHEET) else {
            debug!(sheet = RECORDS_SHEET, "Sheet not found, reading as empty");
            return Ok(Vec::new());
        };

        let mut records = Vec::with_capacity(sheet.len());
        for (index, row) in sheet.rows() {
            let record = Self::record_from_row(&row, offset)
                .map_err(|e| format!("Sheet '{RECORDS_SHEET}' row {}: {e}", index + 2))?;
            records.push(record);
        }
        Ok(records)
    }
}
