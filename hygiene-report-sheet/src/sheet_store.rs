use async_trait::async_trait;
use hygiene_report_api::domain::input::{NewEmployee, NewScanRecord, RecordPatch};
use hygiene_report_db::models::{ActivityModel, DepartmentModel, EmployeeModel, ScanRecordModel};
use hygiene_report_db::repository::{RecordStore, RecordWriter};
use std::error::Error;

use crate::repository::reference::ReferenceRepositories;
use crate::repository::scan::ScanRepositories;

/// Record store backed by a workbook.
///
/// Every call takes the workbook lock, does its work synchronously and
/// releases the lock before returning.
pub struct SheetStore {
    reference_repos: ReferenceRepositories,
    scan_repos: ScanRepositories,
}

impl SheetStore {
    pub fn new(reference_repos: ReferenceRepositories, scan_repos: ScanRepositories) -> Self {
        Self {
            reference_repos,
            scan_repos,
        }
    }
}

#[async_trait]
impl RecordStore for SheetStore {
    async fn list_employees(&self) -> Result<Vec<EmployeeModel>, Box<dyn Error + Send + Sync>> {
        self.reference_repos.employee_repository.list_all()
    }

    async fn list_departments(&self) -> Result<Vec<DepartmentModel>, Box<dyn Error + Send + Sync>> {
        self.reference_repos.department_repository.list_all()
    }

    async fn list_activities(&self) -> Result<Vec<ActivityModel>, Box<dyn Error + Send + Sync>> {
        self.reference_repos.activity_repository.list_all()
    }

    async fn list_records(&self) -> Result<Vec<ScanRecordModel>, Box<dyn Error + Send + Sync>> {
        self.scan_repos.scan_record_repository.list_all()
    }
}

#[async_trait]
impl RecordWriter for SheetStore {
    async fn create_record(
        &self,
        item: NewScanRecord,
    ) -> Result<ScanRecordModel, Box<dyn Error + Send + Sync>> {
        self.scan_repos.scan_record_repository.create(item)
    }

    async fn patch_record(
        &self,
        record_id: &str,
        patch: RecordPatch,
    ) -> Result<Option<ScanRecordModel>, Box<dyn Error + Send + Sync>> {
        self.scan_repos.scan_record_repository.patch(record_id, patch)
    }

    async fn create_employee(
        &self,
        item: NewEmployee,
    ) -> Result<EmployeeModel, Box<dyn Error + Send + Sync>> {
        self.reference_repos.employee_repository.create(item)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_helper::setup_test_context;
    use hygiene_report_db::repository::{DuplicateKeyError, RecordStore, RecordWriter};
    use hygiene_report_api::domain::input::{NewEmployee, RecordPatch};
    use tokio_test::{assert_err, assert_ok};

    #[tokio::test]
    async fn test_reads_run_concurrently() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context()?;
        let store = ctx.repos.create_store();

        let (employees, departments, activities, records) = tokio::try_join!(
            store.list_employees(),
            store.list_departments(),
            store.list_activities(),
            store.list_records(),
        )?;
        assert_eq!(employees.len(), 4);
        assert_eq!(departments.len(), 4);
        assert_eq!(activities.len(), 2);
        assert_eq!(records.len(), 4);

        Ok(())
    }

    #[tokio::test]
    async fn test_writes_are_visible_through_other_stores() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context()?;
        let writer = ctx.repos.create_store();
        let reader = ctx.repos.create_store();

        let records = reader.list_records().await?;
        let target = records[0].record_id.to_string();
        let patched = assert_ok!(
            writer
                .patch_record(
                    &target,
                    RecordPatch {
                        back_score: Some(40.0),
                        ..Default::default()
                    },
                )
                .await
        );
        assert!(patched.is_some());

        let reread = reader.list_records().await?;
        assert_eq!(reread[0].back_score, 40.0);
        assert_eq!(ctx.repos.snapshot(), *ctx.workbook.read());

        Ok(())
    }

    #[tokio::test]
    async fn test_second_registration_of_an_emp_id_fails() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let ctx = setup_test_context()?;
        let first = ctx.repos.create_store();
        let second = ctx.repos.create_store();
        let employee = NewEmployee {
            emp_id: "620921".to_string(),
            name_th: "วิภา สุขใจ".to_string(),
            department: "OPD".to_string(),
            ..Default::default()
        };

        let (a, b) = tokio::join!(
            first.create_employee(employee.clone()),
            second.create_employee(employee.clone()),
        );
        assert_eq!(a.is_ok() as u8 + b.is_ok() as u8, 1);

        let err = assert_err!(first.create_employee(employee).await);
        assert!(err.downcast_ref::<DuplicateKeyError>().is_some());

        let employees = second.list_employees().await?;
        assert_eq!(employees.len(), 5);
        assert_eq!(employees.iter().filter(|e| e.emp_id.as_str() == "620921").count(), 1);

        Ok(())
    }
}
