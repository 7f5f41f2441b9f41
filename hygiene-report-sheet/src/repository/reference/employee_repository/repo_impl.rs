use crate::utils::{get_heapless_string, get_optional_heapless_string, TryFromRow};
use crate::workbook::{Row, SharedWorkbook};
use hygiene_report_db::models::{EmployeeModel, EmployeeStatus};
use std::error::Error;
use tracing::debug;

pub struct EmployeeRepositoryImpl {
    pub workbook: SharedWorkbook,
}

impl EmployeeRepositoryImpl {
    pub fn new(workbook: SharedWorkbook) -> Self {
        Self { workbook }
    }
}

impl<'a> TryFromRow<Row<'a>> for EmployeeModel {
    fn try_from_row(row: &Row<'a>) -> Result<Self, Box<dyn Error + Send + Sync>> {
        let status = match row.get("status").to_text() {
            None => EmployeeStatus::default(),
            Some(text) => text.parse().unwrap_or_else(|_| {
                debug!(status = %text, "Unrecognised employee status read as active");
                EmployeeStatus::default()
            }),
        };

        Ok(EmployeeModel {
            emp_id: get_heapless_string(row, "emp_id")?,
            name_th: get_heapless_string(row, "name_th")?,
            name_en: get_optional_heapless_string(row, "name_en")?,
            department: get_heapless_string(row, "department")?,
            position: get_optional_heapless_string(row, "position")?,
            status,
        })
    }
}
