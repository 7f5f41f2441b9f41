use hygiene_report_db::models::ActivityModel;
use std::error::Error;

use super::repo_impl::ActivityRepositoryImpl;
use crate::utils::load_rows;
use crate::workbook::ACTIVITIES_SHEET;

impl ActivityRepositoryImpl {
    pub fn list_all(&self) -> Result<Vec<ActivityModel>, Box<dyn Error + Send + Sync>> {
        let workbook = self.workbook.read();
        load_rows(&workbook, ACTIVITIES_SHEET)
    }
}
