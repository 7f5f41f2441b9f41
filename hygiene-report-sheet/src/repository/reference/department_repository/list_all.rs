use hygiene_report_db::models::DepartmentModel;
use std::error::Error;

use super::repo_impl::DepartmentRepositoryImpl;
use crate::utils::load_rows;
use crate::workbook::DEPARTMENTS_SHEET;

impl DepartmentRepositoryImpl {
    pub fn list_all(&self) -> Result<Vec<DepartmentModel>, Box<dyn Error + Send + Sync>> {
        let workbook = self.workbook.read();
        load_rows(&workbook, DEPARTMENTS_SHEET)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;

    #[tokio::test]
    async fn test_list_all() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context()?;
        let departments = ctx.reference_repos().department_repository.list_all()?;

        let codes: Vec<&str> = departments.iter().map(|d| d.dept_code.as_str()).collect();
        assert_eq!(codes, vec!["ER", "ICU", "OPD", "OR"]);
        assert_eq!(departments[1].dept_name_th.as_str(), "หอผู้ป่วยวิกฤต");

        Ok(())
    }
}
