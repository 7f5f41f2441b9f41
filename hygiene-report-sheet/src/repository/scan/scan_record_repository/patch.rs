use hygiene_report_api::domain::input::RecordPatch;
use hygiene_report_db::models::{clamp_score, ScanRecordModel};
use std::error::Error;
use tracing::debug;

use super::repo_impl::ScanRecordRepositoryImpl;
use crate::utils::to_heapless;
use crate::workbook::{Cell, RECORDS_SHEET};

impl ScanRecordRepositoryImpl {
    /// Overwrite the patchable cells of the record with `record_id`.
    ///
    /// Returns `Ok(None)` when no such record exists. An empty string clears
    /// `notes` or `image_url`. Nothing is written unless every value fits.
    pub fn patch(
        &self,
        record_id: &str,
        patch: RecordPatch,
    ) -> Result<Option<ScanRecordModel>, Box<dyn Error + Send + Sync>> {
        let mut updates: Vec<(&str, Cell)> = Vec::new();
        if let Some(front) = patch.front_score {
            updates.push(("front_score", Cell::Number(clamp_score(front))));
        }
        if let Some(back) = patch.back_score {
            updates.push(("back_score", Cell::Number(clamp_score(back))));
        }
        if let Some(notes) = patch.notes.as_deref().map(str::trim) {
            to_heapless::<1000>(notes, "notes")?;
            updates.push(("notes", Cell::optional_text(Some(notes))));
        }
        if let Some(image_url) = patch.image_url.as_deref().map(str::trim) {
            to_heapless::<1000>(image_url, "image_url")?;
            updates.push(("image_url", Cell::optional_text(Some(image_url))));
        }

        let offset = self.config.reference_offset;
        let mut workbook = self.workbook.write();
        let Some(sheet) = workbook.sheet_mut(RECORDS_SHEET) else {
            return Ok(None);
        };

        let Some(index) = sheet
            .rows()
            .find(|(_, row)| {
                row.get("record_id")
                    .to_text()
                    .is_some_and(|id| id.trim() == record_id)
            })
            .map(|(index, _)| index)
        else {
            return Ok(None);
        };

        if let Some((column, _)) = updates.iter().find(|(column, _)| sheet.column(column).is_none()) {
            return Err(format!("Sheet '{RECORDS_SHEET}' has no '{column}' column").into());
        }
        for (column, value) in updates {
            sheet.set(index, column, value);
        }

        let row = sheet
            .row(index)
            .ok_or_else(|| format!("Row for record '{record_id}' disappeared"))?;
        let record = Self::record_from_row(&row, offset)?;

        debug!(record_id, "Patched scan record row");
        Ok(Some(record))
    }
}
