use async_trait::async_trait;
use hygiene_report_api::domain::input::{NewEmployee, NewScanRecord, RecordPatch};
use thiserror::Error;

use crate::models::{EmployeeModel, ScanRecordModel};

/// A write was refused because the key is already taken.
///
/// Writers return it boxed; callers recover it with `downcast_ref`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{table} already contains '{id}'")]
pub struct DuplicateKeyError {
    pub table: &'static str,
    pub id: String,
}

/// Write side of the compliance log storage
///
/// Records are append-only: `create_record` assigns `record_id` and
/// `timestamp`, and `patch_record` may only touch scores, notes and image URL.
/// Payloads are expected to be validated by the caller.
///
/// # Example
/// ```ignore
/// let saved = store.create_record(new_record).await?;
/// println!("created {}", saved.record_id);
/// ```
#[async_trait]
pub trait RecordWriter: Send + Sync {
    /// Append a new scan record
    ///
    /// # Arguments
    /// * `item` - The scan payload; scores are clamped to `[0, 100]`
    ///
    /// # Returns
    /// * `Ok(ScanRecordModel)` - The stored record with generated fields populated
    /// * `Err` - An error if the record could not be stored
    async fn create_record(
        &self,
        item: NewScanRecord,
    ) -> Result<ScanRecordModel, Box<dyn std::error::Error + Send + Sync>>;

    /// Patch the mutable fields of an existing scan record
    ///
    /// # Arguments
    /// * `record_id` - The record to patch
    /// * `patch` - The fields to overwrite; absent fields are left unchanged
    ///
    /// # Returns
    /// * `Ok(Some(ScanRecordModel))` - The record after patching
    /// * `Ok(None)` - If no record has this id
    /// * `Err` - An error if the record could not be written
    async fn patch_record(
        &self,
        record_id: &str,
        patch: RecordPatch,
    ) -> Result<Option<ScanRecordModel>, Box<dyn std::error::Error + Send + Sync>>;

    /// Register a new employee with `active` status
    ///
    /// # Returns
    /// * `Ok(EmployeeModel)` - The stored employee
    /// * `Err(DuplicateKeyError)` - `emp_id` is already registered; checked atomically with the insert
    /// * `Err` - Any other error if the employee could not be stored
    async fn create_employee(
        &self,
        item: NewEmployee,
    ) -> Result<EmployeeModel, Box<dyn std::error::Error + Send + Sync>>;
}
