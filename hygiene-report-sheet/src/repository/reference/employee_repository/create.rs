use hygiene_report_api::domain::input::NewEmployee;
use hygiene_report_db::models::{EmployeeModel, EmployeeStatus};
use hygiene_report_db::repository::DuplicateKeyError;
use std::error::Error;
use tracing::debug;

use super::repo_impl::EmployeeRepositoryImpl;
use crate::utils::{required_heapless, to_heapless};
use crate::workbook::{Cell, EMPLOYEES_SHEET};

impl EmployeeRepositoryImpl {
    /// Append an employee row. New employees are always active.
    ///
    /// Fails with [`DuplicateKeyError`] when a row already carries the same
    /// `emp_id`; the check and the append happen under one write guard.
    pub fn create(&self, item: NewEmployee) -> Result<EmployeeModel, Box<dyn Error + Send + Sync>> {
        let model = EmployeeModel {
            emp_id: required_heapless(&item.emp_id, "emp_id")?,
            name_th: required_heapless(&item.name_th, "name_th")?,
            name_en: item
                .name_en
                .as_deref()
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(|name| to_heapless(name, "name_en"))
                .transpose()?,
            department: required_heapless(&item.department, "department")?,
            position: item
                .position
                .as_deref()
                .map(str::trim)
                .filter(|position| !position.is_empty())
                .map(|position| to_heapless(position, "position"))
                .transpose()?,
            status: EmployeeStatus::Active,
        };

        {
            let mut workbook = self.workbook.write();
            let sheet = workbook
                .sheet_mut(EMPLOYEES_SHEET)
                .ok_or_else(|| format!("Sheet '{EMPLOYEES_SHEET}' not found"))?;
            let taken = sheet
                .rows()
                .filter_map(|(_, row)| row.get("emp_id").to_text())
                .any(|emp_id| emp_id.trim() == model.emp_id.as_str());
            if taken {
                return Err(Box::new(DuplicateKeyError {
                    table: EMPLOYEES_SHEET,
                    id: model.emp_id.to_string(),
                }));
            }
            sheet.append(vec![
                ("emp_id", Cell::text(model.emp_id.as_str())),
                ("name_th", Cell::text(model.name_th.as_str())),
                ("name_en", Cell::optional_text(model.name_en.as_deref())),
                ("department", Cell::text(model.department.as_str())),
                ("position", Cell::optional_text(model.position.as_deref())),
                ("status", Cell::text(model.status.to_string())),
            ]);
        }

        debug!(emp_id = %model.emp_id, "Appended employee row");
        Ok(model)
    }
}
