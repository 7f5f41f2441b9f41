use hygiene_report_api::config::ReportConfig;
use hygiene_report_api::domain::criteria::FilterCriteria;
use hygiene_report_api::domain::input::{NewEmployee, NewScanRecord, RecordPatch};
use hygiene_report_api::error::{ApiError, ApiResult};
use hygiene_report_db::models::{ActivityModel, DepartmentModel, EmployeeModel, Identifiable, ScanRecordModel};
use hygiene_report_db::repository::{DuplicateKeyError, RecordStore, RecordWriter};
use std::sync::Arc;
use tracing::{debug, info, warn};
use validator::Validate;

use crate::aggregate::aggregate;
use crate::filter::{filter_records, unknown_references};
use crate::view::DashboardView;

/// Entry point for dashboard callers.
///
/// Holds an explicit store handle; every query reloads the tables from the
/// store and recomputes from scratch. Nothing is cached between calls.
pub struct DashboardService<S> {
    store: Arc<S>,
    config: ReportConfig,
}

impl<S> Clone for DashboardService<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            config: self.config.clone(),
        }
    }
}

impl<S> DashboardService<S> {
    pub fn new(store: Arc<S>, config: ReportConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }
}

impl<S: RecordStore> DashboardService<S> {
    /// Build the full dashboard response for `criteria`.
    ///
    /// The four tables are loaded concurrently and all must load; any store
    /// failure fails the whole query. Records are filtered, statistics are
    /// computed over the filtered set, and the reference tables are returned
    /// unfiltered.
    ///
    /// # Returns
    /// * `Err(ApiError::InvalidFilter)` - a date criterion is malformed
    /// * `Err(ApiError::StoreUnavailable)` - any table could not be loaded
    pub async fn build_dashboard_view(&self, criteria: &FilterCriteria) -> ApiResult<DashboardView> {
        criteria.time_window(self.config.reference_offset)?;
        debug!(?criteria, "Building dashboard view");

        let (employees, departments, activities, records) = tokio::try_join!(
            self.store.list_employees(),
            self.store.list_departments(),
            self.store.list_activities(),
            self.store.list_records(),
        )
        .map_err(ApiError::StoreUnavailable)?;

        let filtered = filter_records(&records, criteria, &employees, &self.config)?;
        let warnings = unknown_references(&filtered, &employees);
        for warning in &warnings {
            warn!(record_id = %warning.record_id, emp_id = %warning.emp_id, "Record references unknown employee");
        }

        let stats = aggregate(&filtered, &employees, &departments);
        Ok(DashboardView::new(stats, filtered, employees, departments, activities).with_warnings(warnings))
    }

    /// Records matching `criteria`, without statistics.
    pub async fn list_records(&self, criteria: &FilterCriteria) -> ApiResult<Vec<ScanRecordModel>> {
        criteria.time_window(self.config.reference_offset)?;

        let records = self.store.list_records().await.map_err(ApiError::StoreUnavailable)?;
        if criteria.department().is_none() {
            return filter_records(&records, criteria, &[], &self.config);
        }
        let employees = self.store.list_employees().await.map_err(ApiError::StoreUnavailable)?;
        filter_records(&records, criteria, &employees, &self.config)
    }

    pub async fn list_employees(&self) -> ApiResult<Vec<EmployeeModel>> {
        self.store.list_employees().await.map_err(ApiError::StoreUnavailable)
    }

    pub async fn list_departments(&self) -> ApiResult<Vec<DepartmentModel>> {
        self.store.list_departments().await.map_err(ApiError::StoreUnavailable)
    }

    pub async fn list_activities(&self) -> ApiResult<Vec<ActivityModel>> {
        self.store.list_activities().await.map_err(ApiError::StoreUnavailable)
    }
}

impl<S: RecordStore + RecordWriter> DashboardService<S> {
    /// Append a scan and return its generated `record_id`.
    pub async fn add_record(&self, item: NewScanRecord) -> ApiResult<String> {
        item.validate()?;
        let saved = self.store.create_record(item).await.map_err(ApiError::StoreUnavailable)?;
        info!(record_id = %saved.record_id, emp_id = %saved.emp_id, "Scan record created");
        Ok(saved.record_id.to_string())
    }

    /// Correct scores, notes or image of an existing scan.
    ///
    /// # Returns
    /// * `Err(ApiError::NotFound)` - no record has `record_id`
    /// * `Err(ApiError::ValidationError)` - the patch is empty or invalid
    pub async fn update_record(&self, record_id: &str, patch: RecordPatch) -> ApiResult<String> {
        if patch.is_empty() {
            return Err(ApiError::ValidationError(
                "Patch contains no updatable fields".to_string(),
            ));
        }
        patch.validate()?;

        let patched = self
            .store
            .patch_record(record_id, patch)
            .await
            .map_err(ApiError::StoreUnavailable)?
            .ok_or_else(|| ApiError::NotFound(format!("Record {record_id}")))?;
        info!(record_id = %patched.record_id, "Scan record patched");
        Ok(patched.record_id.to_string())
    }

    /// Register an employee and return its `emp_id`.
    ///
    /// The listing check answers the common case early; the store repeats it
    /// atomically with the insert, so concurrent registrations cannot both win.
    ///
    /// # Returns
    /// * `Err(ApiError::ValidationError)` - invalid payload or `emp_id` already taken
    pub async fn add_employee(&self, item: NewEmployee) -> ApiResult<String> {
        item.validate()?;

        let emp_id = item.emp_id.trim();
        let employees = self.store.list_employees().await.map_err(ApiError::StoreUnavailable)?;
        if employees.iter().any(|e| e.get_id() == emp_id) {
            return Err(ApiError::ValidationError(format!("Employee {emp_id} already exists")));
        }

        let saved = self.store.create_employee(item).await.map_err(write_error)?;
        info!(emp_id = %saved.emp_id, department = %saved.department, "Employee created");
        Ok(saved.emp_id.to_string())
    }
}

/// Key conflicts are the caller's to fix; anything else is the store's fault.
fn write_error(error: Box<dyn std::error::Error + Send + Sync>) -> ApiError {
    if let Some(duplicate) = error.downcast_ref::<DuplicateKeyError>() {
        return ApiError::ValidationError(duplicate.to_string());
    }
    ApiError::StoreUnavailable(error)
}
