use async_trait::async_trait;

use crate::models::{ActivityModel, DepartmentModel, EmployeeModel, ScanRecordModel};

/// Read side of the compliance log storage
///
/// This trait provides the four read accessors the reporting engine needs.
/// Each call returns a flat snapshot of one table in storage order; callers
/// must not assume any particular ordering of records.
/// Implementations own timeouts and retries; the engine never retries.
///
/// # Example
/// ```ignore
/// #[async_trait]
/// impl RecordStore for SheetStore {
///     async fn list_records(&self) -> Result<Vec<ScanRecordModel>, Box<dyn Error + Send + Sync>> {
///         // Implementation
///     }
///     // ...
/// }
/// ```
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Load every employee
    ///
    /// # Returns
    /// * `Ok(Vec<EmployeeModel>)` - All employees, active or not
    /// * `Err` - The store could not be read
    async fn list_employees(&self) -> Result<Vec<EmployeeModel>, Box<dyn std::error::Error + Send + Sync>>;

    /// Load every department
    async fn list_departments(&self) -> Result<Vec<DepartmentModel>, Box<dyn std::error::Error + Send + Sync>>;

    /// Load every activity
    async fn list_activities(&self) -> Result<Vec<ActivityModel>, Box<dyn std::error::Error + Send + Sync>>;

    /// Load every scan record
    ///
    /// # Returns
    /// * `Ok(Vec<ScanRecordModel>)` - All records with booleans and scores already normalized
    /// * `Err` - The store could not be read or a row could not be decoded
    async fn list_records(&self) -> Result<Vec<ScanRecordModel>, Box<dyn std::error::Error + Send + Sync>>;
}
