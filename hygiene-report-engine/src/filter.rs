use hygiene_report_api::config::ReportConfig;
use hygiene_report_api::domain::criteria::{FilterCriteria, TimeWindow};
use hygiene_report_api::error::{ApiResult, UnknownReference};
use hygiene_report_db::models::{EmployeeModel, Identifiable, ScanRecordModel};
use std::collections::HashSet;
use tracing::debug;

/// Criteria compiled against one employee snapshot.
///
/// All present constraints are checked in a single predicate, so the result
/// does not depend on the order in which constraints were specified.
#[derive(Debug, Clone)]
pub struct RecordFilter<'a> {
    activity_id: Option<&'a str>,
    emp_id: Option<&'a str>,
    department_members: Option<HashSet<&'a str>>,
    window: TimeWindow,
}

impl<'a> RecordFilter<'a> {
    /// # Returns
    /// * `Err(ApiError::InvalidFilter)` - `start_date` or `end_date` is malformed
    pub fn new(
        criteria: &'a FilterCriteria,
        employees: &'a [EmployeeModel],
        config: &ReportConfig,
    ) -> ApiResult<Self> {
        let window = criteria.time_window(config.reference_offset)?;
        let department_members = criteria
            .department()
            .map(|department| department_members(employees, department));

        Ok(Self {
            activity_id: criteria.activity(),
            emp_id: criteria.employee(),
            department_members,
            window,
        })
    }

    pub fn matches(&self, record: &ScanRecordModel) -> bool {
        if let Some(activity_id) = self.activity_id {
            if record.activity_id.as_str() != activity_id {
                return false;
            }
        }
        if let Some(emp_id) = self.emp_id {
            if record.emp_id.as_str() != emp_id {
                return false;
            }
        }
        if let Some(members) = &self.department_members {
            // records of unknown employees never belong to a department
            if !members.contains(record.emp_id.as_str()) {
                return false;
            }
        }
        self.window.contains(&record.timestamp)
    }
}

/// Narrow `records` to those matching every present field of `criteria`.
///
/// Pure: the input is not modified and the relative order of kept records is
/// preserved.
pub fn filter_records(
    records: &[ScanRecordModel],
    criteria: &FilterCriteria,
    employees: &[EmployeeModel],
    config: &ReportConfig,
) -> ApiResult<Vec<ScanRecordModel>> {
    let filter = RecordFilter::new(criteria, employees, config)?;
    let filtered: Vec<ScanRecordModel> = records
        .iter()
        .filter(|record| filter.matches(record))
        .cloned()
        .collect();

    debug!(
        total = records.len(),
        kept = filtered.len(),
        "Filtered scan records"
    );
    Ok(filtered)
}

/// Employee ids whose home department is `department`.
pub fn department_members<'a>(employees: &'a [EmployeeModel], department: &str) -> HashSet<&'a str> {
    employees
        .iter()
        .filter(|employee| employee.department.as_str() == department)
        .map(|employee| employee.get_id())
        .collect()
}

/// Records whose `emp_id` matches no employee, in record order.
pub fn unknown_references(
    records: &[ScanRecordModel],
    employees: &[EmployeeModel],
) -> Vec<UnknownReference> {
    let known: HashSet<&str> = employees.iter().map(|e| e.get_id()).collect();
    records
        .iter()
        .filter(|record| !known.contains(record.emp_id.as_str()))
        .map(|record| UnknownReference {
            record_id: record.record_id.to_string(),
            emp_id: record.emp_id.to_string(),
        })
        .collect()
}
