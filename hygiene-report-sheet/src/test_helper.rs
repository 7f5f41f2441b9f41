//! Test helper module for workbook-backed test isolation
//!
//! Every test gets its own seeded workbook and a manual clock, so tests can
//! mutate freely and control the ids and timestamps new records receive.

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use hygiene_report_api::config::ReportConfig;
use hygiene_report_api::domain::zone::Zone;
use std::sync::Arc;

use crate::clock::ManualClock;
use crate::repository::reference::ReferenceRepositories;
use crate::repository::scan::ScanRepositories;
use crate::sheet_repositories::SheetRepositories;
use crate::workbook::{
    record_headers, Cell, SharedWorkbook, Workbook, Worksheet, ACTIVITIES_SHEET, DEPARTMENT_HEADERS,
    DEPARTMENTS_SHEET, EMPLOYEES_SHEET, EMPLOYEE_HEADERS, RECORDS_SHEET,
};

/// Test context over a private seeded workbook
pub struct TestContext {
    pub workbook: SharedWorkbook,
    pub clock: Arc<ManualClock>,
    pub repos: SheetRepositories,
    reference_repos: ReferenceRepositories,
    scan_repos: ScanRepositories,
}

impl TestContext {
    pub fn reference_repos(&self) -> &ReferenceRepositories {
        &self.reference_repos
    }

    pub fn scan_repos(&self) -> &ScanRepositories {
        &self.scan_repos
    }
}

pub fn bangkok(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32) -> DateTime<Utc> {
    FixedOffset::east_opt(7 * 3600)
        .unwrap()
        .with_ymd_and_hms(y, m, d, h, min, s)
        .unwrap()
        .with_timezone(&Utc)
}

/// Workbook shaped like a live hygiene log: numeric employee ids, text-encoded
/// flags and scores, mixed timestamp formats and an extra activity column.
pub fn seeded_workbook() -> Workbook {
    let mut employees = Worksheet::new(EMPLOYEE_HEADERS);
    for (emp_id, department, status) in [
        (Cell::Number(620913.0), "ER", Cell::Empty),
        (Cell::Number(620914.0), "ICU", Cell::text("Active")),
        (Cell::Number(620915.0), "OPD", Cell::text("INACTIVE")),
        (Cell::text("620918"), "ICU", Cell::text("active")),
    ] {
        employees.append(vec![
            ("emp_id", emp_id),
            ("name_th", Cell::text("สมชาย ใจดี")),
            ("department", Cell::text(department)),
            ("position", Cell::text("พยาบาล")),
            ("status", status),
        ]);
    }

    let mut departments = Worksheet::new(DEPARTMENT_HEADERS);
    for (code, name) in [
        ("ER", "ห้องฉุกเฉิน"),
        ("ICU", "หอผู้ป่วยวิกฤต"),
        ("OPD", "ผู้ป่วยนอก"),
        ("OR", "ห้องผ่าตัด"),
    ] {
        departments.append(vec![("dept_code", Cell::text(code)), ("dept_name_th", Cell::text(name))]);
    }

    let mut activities = Worksheet::new(["activity_id", "name", "date", "location"]);
    activities.append(vec![
        ("activity_id", Cell::text("ACT-2026-01")),
        ("name", Cell::text("กิจกรรมล้างมือประจำเดือนมกราคม")),
        ("date", Cell::text("2026-01-30")),
        ("location", Cell::text("อาคาร 1")),
    ]);
    activities.append(vec![
        ("activity_id", Cell::text("ACT-2026-02")),
        ("name", Cell::text("กิจกรรมล้างมือหอผู้ป่วย")),
        ("date", Cell::text("2026-01-30")),
    ]);

    let mut records = Worksheet::new(record_headers());
    let zone = |n: u8| Zone::new(n).map(|z| z.key()).unwrap_or_default();
    records.append(vec![
        ("record_id".to_string(), Cell::text("REC-20260129-080000")),
        ("emp_id".to_string(), Cell::Number(620913.0)),
        ("activity_id".to_string(), Cell::text("ACT-2026-01")),
        ("timestamp".to_string(), Cell::text("2026-01-29 08:00:00")),
        ("front_score".to_string(), Cell::Number(90.0)),
        ("back_score".to_string(), Cell::Number(85.0)),
        (zone(1), Cell::Bool(true)),
        (zone(2), Cell::Bool(false)),
    ]);
    records.append(vec![
        ("record_id".to_string(), Cell::text("REC-20260130-000000")),
        ("emp_id".to_string(), Cell::Number(620914.0)),
        ("activity_id".to_string(), Cell::text("ACT-2026-01")),
        ("timestamp".to_string(), Cell::text("2026-01-30T00:00:00+07:00")),
        ("front_score".to_string(), Cell::text("60")),
        ("back_score".to_string(), Cell::Number(55.0)),
        (zone(1), Cell::text("TRUE")),
        (zone(6), Cell::text(" true ")),
    ]);
    records.append(vec![
        ("record_id".to_string(), Cell::text("REC-20260130-235959")),
        ("emp_id".to_string(), Cell::text("620918")),
        ("activity_id".to_string(), Cell::text("ACT-2026-02")),
        ("timestamp".to_string(), Cell::text("2026-01-30 23:59:59")),
        ("front_score".to_string(), Cell::Number(130.0)),
        ("back_score".to_string(), Cell::text("n/a")),
        (zone(1), Cell::text("FALSE")),
        ("notes".to_string(), Cell::text("ล้างมือไม่ทั่วถึง")),
    ]);
    records.append(vec![
        ("record_id".to_string(), Cell::text("REC-20260131-000001")),
        ("emp_id".to_string(), Cell::text("999999")),
        ("activity_id".to_string(), Cell::text("ACT-2026-01")),
        ("timestamp".to_string(), Cell::text("2026-01-30T17:00:01Z")),
        ("front_score".to_string(), Cell::Number(88.0)),
        ("back_score".to_string(), Cell::Number(91.0)),
        (zone(3), Cell::Bool(true)),
    ]);

    let mut workbook = Workbook::new();
    workbook.insert_sheet(EMPLOYEES_SHEET, employees);
    workbook.insert_sheet(DEPARTMENTS_SHEET, departments);
    workbook.insert_sheet(ACTIVITIES_SHEET, activities);
    workbook.insert_sheet(RECORDS_SHEET, records);
    workbook
}

/// Setup a test context over a fresh seeded workbook
///
/// The clock starts at 2026-02-01 09:00 Bangkok time and only moves when the
/// test moves it.
pub fn setup_test_context() -> Result<TestContext, Box<dyn std::error::Error + Send + Sync>> {
    let config = ReportConfig::from_parts("+07:00", "REC")?;
    let clock = Arc::new(ManualClock::new(bangkok(2026, 2, 1, 9, 0, 0)));

    let repos = SheetRepositories::with_clock(seeded_workbook(), config, clock.clone());
    let (reference_repos, scan_repos) = repos.create_all_repositories();

    Ok(TestContext {
        workbook: repos.workbook(),
        clock,
        repos,
        reference_repos,
        scan_repos,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_contexts_are_isolated() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let first = setup_test_context()?;
        first.workbook.write().sheets.clear();

        let second = setup_test_context()?;
        assert_eq!(second.reference_repos().employee_repository.list_all()?.len(), 4);
        assert!(first.reference_repos().employee_repository.list_all()?.is_empty());

        Ok(())
    }
}
