use crate::utils::{get_heapless_string, TryFromRow};
use crate::workbook::{Row, SharedWorkbook};
use hygiene_report_db::models::DepartmentModel;
use std::error::Error;

pub struct DepartmentRepositoryImpl {
    pub workbook: SharedWorkbook,
}

impl DepartmentRepositoryImpl {
    pub fn new(workbook: SharedWorkbook) -> Self {
        Self { workbook }
    }
}

impl<'a> TryFromRow<Row<'a>> for DepartmentModel {
    fn try_from_row(row: &Row<'a>) -> Result<Self, Box<dyn Error + Send + Sync>> {
        Ok(DepartmentModel {
            dept_code: get_heapless_string(row, "dept_code")?,
            dept_name_th: get_heapless_string(row, "dept_name_th")?,
        })
    }
}
