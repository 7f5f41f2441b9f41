use crate::utils::{get_heapless_string, TryFromRow};
use crate::workbook::{Row, SharedWorkbook};
use hygiene_report_db::models::ActivityModel;
use std::collections::BTreeMap;
use std::error::Error;

pub struct ActivityRepositoryImpl {
    pub workbook: SharedWorkbook,
}

impl ActivityRepositoryImpl {
    pub fn new(workbook: SharedWorkbook) -> Self {
        Self { workbook }
    }
}

impl<'a> TryFromRow<Row<'a>> for ActivityModel {
    fn try_from_row(row: &Row<'a>) -> Result<Self, Box<dyn Error + Send + Sync>> {
        // columns beyond id and name are carried through untouched
        let attributes: BTreeMap<String, serde_json::Value> = row
            .entries()
            .filter(|(header, cell)| {
                !header.is_empty() && *header != "activity_id" && *header != "name" && !cell.is_empty()
            })
            .map(|(header, cell)| (header.to_string(), cell.to_json()))
            .collect();

        Ok(ActivityModel {
            activity_id: get_heapless_string(row, "activity_id")?,
            name: get_heapless_string(row, "name")?,
            attributes,
        })
    }
}
