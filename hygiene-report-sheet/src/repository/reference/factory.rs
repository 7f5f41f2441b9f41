use std::sync::Arc;

use super::{ActivityRepositoryImpl, DepartmentRepositoryImpl, EmployeeRepositoryImpl};
use crate::workbook::SharedWorkbook;

/// Factory for the reference table repositories of one workbook.
pub struct ReferenceRepoFactory {
    workbook: SharedWorkbook,
}

impl ReferenceRepoFactory {
    pub fn new(workbook: SharedWorkbook) -> Arc<Self> {
        Arc::new(Self { workbook })
    }

    pub fn build_employee_repo(&self) -> Arc<EmployeeRepositoryImpl> {
        Arc::new(EmployeeRepositoryImpl::new(self.workbook.clone()))
    }

    pub fn build_department_repo(&self) -> Arc<DepartmentRepositoryImpl> {
        Arc::new(DepartmentRepositoryImpl::new(self.workbook.clone()))
    }

    pub fn build_activity_repo(&self) -> Arc<ActivityRepositoryImpl> {
        Arc::new(ActivityRepositoryImpl::new(self.workbook.clone()))
    }

    pub fn build_all_repos(&self) -> ReferenceRepositories {
        ReferenceRepositories {
            employee_repository: self.build_employee_repo(),
            department_repository: self.build_department_repo(),
            activity_repository: self.build_activity_repo(),
        }
    }
}

/// Container for the reference table repositories.
pub struct ReferenceRepositories {
    pub employee_repository: Arc<EmployeeRepositoryImpl>,
    pub department_repository: Arc<DepartmentRepositoryImpl>,
    pub activity_repository: Arc<ActivityRepositoryImpl>,
}
