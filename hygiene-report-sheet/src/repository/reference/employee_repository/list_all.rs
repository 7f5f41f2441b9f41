use hygiene_report_db::models::EmployeeModel;
use std::error::Error;

use super::repo_impl::EmployeeRepositoryImpl;
use crate::utils::load_rows;
use crate::workbook::EMPLOYEES_SHEET;

impl EmployeeRepositoryImpl {
    pub fn list_all(&self) -> Result<Vec<EmployeeModel>, Box<dyn Error + Send + Sync>> {
        let workbook = self.workbook.read();
        load_rows(&workbook, EMPLOYEES_SHEET)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_utils::test_utils::employee_row;
    use crate::test_helper::setup_test_context;
    use crate::workbook::{Cell, EMPLOYEES_SHEET};
    use hygiene_report_db::models::EmployeeStatus;

    #[tokio::test]
    async fn test_list_all() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context()?;
        let employee_repo = &ctx.reference_repos().employee_repository;

        let employees = employee_repo.list_all()?;
        assert_eq!(employees.len(), 4);

        // numeric id cells read back as text
        let first = &employees[0];
        assert_eq!(first.emp_id.as_str(), "620913");
        assert_eq!(first.department.as_str(), "ER");
        assert_eq!(first.name_en, None);

        let inactive = employees.iter().find(|e| e.emp_id.as_str() == "620915").unwrap();
        assert_eq!(inactive.status, EmployeeStatus::Inactive);

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_required_column_fails_read() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context()?;
        ctx.workbook
            .write()
            .sheet_mut(EMPLOYEES_SHEET)
            .unwrap()
            .append(employee_row("620999", "", Cell::Empty));

        let result = ctx.reference_repos().employee_repository.list_all();
        let message = result.unwrap_err().to_string();
        assert!(message.contains("row 6"), "{message}");
        assert!(message.contains("department"), "{message}");

        Ok(())
    }

    #[tokio::test]
    async fn test_missing_sheet_reads_as_empty() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context()?;
        ctx.workbook.write().sheets.remove(EMPLOYEES_SHEET);

        assert!(ctx.reference_repos().employee_repository.list_all()?.is_empty());

        Ok(())
    }
}
