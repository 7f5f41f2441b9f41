use hygiene_report_api::error::UnknownReference;
use hygiene_report_db::models::{ActivityModel, DepartmentModel, EmployeeModel, ScanRecordModel};
use hygiene_report_db::utils::hash_as_i64;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::aggregate::{DashboardStats, DashboardSummary, DepartmentStat, ZoneStats};

/// Response for one dashboard query.
///
/// `records` holds only the records matching the query, while the reference
/// tables are always complete so callers can populate their pickers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub summary: DashboardSummary,
    pub zone_stats: ZoneStats,
    pub dept_stats: BTreeMap<String, DepartmentStat>,
    pub records: Vec<ScanRecordModel>,
    pub employees: Vec<EmployeeModel>,
    pub departments: Vec<DepartmentModel>,
    pub activities: Vec<ActivityModel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<UnknownReference>,
}

impl DashboardView {
    pub fn new(
        stats: DashboardStats,
        records: Vec<ScanRecordModel>,
        employees: Vec<EmployeeModel>,
        departments: Vec<DepartmentModel>,
        activities: Vec<ActivityModel>,
    ) -> Self {
        let DashboardStats {
            summary,
            zone_stats,
            dept_stats,
        } = stats;
        Self {
            summary,
            zone_stats,
            dept_stats,
            records,
            employees,
            departments,
            activities,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<UnknownReference>) -> Self {
        self.warnings = warnings;
        self
    }

    /// Stable content hash of the whole view.
    ///
    /// Polling clients compare fingerprints to skip re-rendering unchanged
    /// data.
    pub fn fingerprint(&self) -> Result<i64, String> {
        hash_as_i64(self)
    }
}
