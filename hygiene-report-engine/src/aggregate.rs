use hygiene_report_api::domain::zone::{Zone, ZONE_COUNT};
use hygiene_report_db::models::{DepartmentModel, EmployeeModel, Identifiable, ScanRecordModel};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

use crate::filter::department_members;

/// Decimal places kept in reported score averages.
const AVERAGE_DP: u32 = 2;

/// Headline numbers over the records in scope.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub total_records: usize,
    /// Size of the full employee table, not only employees in scope
    pub total_employees: usize,
    /// Size of the full department table
    pub total_departments: usize,
    pub avg_front_score: f64,
    pub avg_back_score: f64,
    pub pass_rate: u32,
    pub pass_count: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ZoneStat {
    pub dirty_count: usize,
    pub dirty_rate: u32,
}

/// Contamination statistics for every zone.
///
/// Always holds all eleven zones, also those no record touches. Serialized
/// as a `zone_1` .. `zone_11` map in numeric order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneStats([ZoneStat; ZONE_COUNT]);

impl ZoneStats {
    pub fn get(&self, zone: Zone) -> &ZoneStat {
        &self.0[usize::from(zone.number()) - 1]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Zone, &ZoneStat)> + '_ {
        Zone::ALL.iter().map(move |zone| (*zone, self.get(*zone)))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for ZoneStats {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(ZONE_COUNT))?;
        for (zone, stat) in self.iter() {
            map.serialize_entry(&zone.key(), stat)?;
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DepartmentStat {
    pub dept_name: String,
    pub total_records: usize,
    pub avg_front: f64,
    pub avg_back: f64,
    pub pass_rate: u32,
    pub pass_count: usize,
}

/// Everything the dashboard computes from one record set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub summary: DashboardSummary,
    pub zone_stats: ZoneStats,
    /// Keyed by department code; departments without records are absent
    pub dept_stats: BTreeMap<String, DepartmentStat>,
}

/// Running totals for score statistics.
///
/// Sums are exact decimals so the rounded averages do not depend on the
/// order records arrive in.
#[derive(Debug, Default)]
struct ScoreTally {
    count: usize,
    passed: usize,
    front_sum: Decimal,
    back_sum: Decimal,
}

impl ScoreTally {
    fn add(&mut self, record: &ScanRecordModel) {
        self.count += 1;
        if record.passes() {
            self.passed += 1;
        }
        self.front_sum += to_decimal(record.front_score);
        self.back_sum += to_decimal(record.back_score);
    }

    fn avg_front(&self) -> f64 {
        mean(self.front_sum, self.count)
    }

    fn avg_back(&self) -> f64 {
        mean(self.back_sum, self.count)
    }

    fn pass_rate(&self) -> u32 {
        percentage(self.passed, self.count)
    }
}

/// Compute summary, zone and department statistics over `records`.
///
/// `records` is used as given (already filtered); `employees` and
/// `departments` are the full reference tables. Deterministic for any
/// ordering of the inputs.
pub fn aggregate(
    records: &[ScanRecordModel],
    employees: &[EmployeeModel],
    departments: &[DepartmentModel],
) -> DashboardStats {
    let mut tally = ScoreTally::default();
    let mut dirty_counts = [0usize; ZONE_COUNT];
    for record in records {
        tally.add(record);
        for (zone, dirty) in record.zones.iter() {
            if dirty {
                dirty_counts[usize::from(zone.number()) - 1] += 1;
            }
        }
    }

    let total = records.len();
    let summary = DashboardSummary {
        total_records: total,
        total_employees: employees.len(),
        total_departments: departments.len(),
        avg_front_score: tally.avg_front(),
        avg_back_score: tally.avg_back(),
        pass_rate: tally.pass_rate(),
        pass_count: tally.passed,
    };

    let zone_stats = ZoneStats(dirty_counts.map(|dirty_count| ZoneStat {
        dirty_count,
        dirty_rate: percentage(dirty_count, total),
    }));

    DashboardStats {
        summary,
        zone_stats,
        dept_stats: department_stats(records, employees, departments),
    }
}

fn department_stats(
    records: &[ScanRecordModel],
    employees: &[EmployeeModel],
    departments: &[DepartmentModel],
) -> BTreeMap<String, DepartmentStat> {
    // A code listed more than once takes its smallest name, whatever the row order.
    let mut names: BTreeMap<&str, &str> = BTreeMap::new();
    for department in departments {
        let name = department.dept_name_th.as_str();
        names
            .entry(department.get_id())
            .and_modify(|current| {
                if name < *current {
                    *current = name;
                }
            })
            .or_insert(name);
    }

    let mut stats = BTreeMap::new();
    for (code, name) in names {
        let members = department_members(employees, code);
        let mut tally = ScoreTally::default();
        for record in records.iter().filter(|r| members.contains(r.emp_id.as_str())) {
            tally.add(record);
        }
        if tally.count == 0 {
            continue;
        }

        stats.insert(
            code.to_string(),
            DepartmentStat {
                dept_name: name.to_string(),
                total_records: tally.count,
                avg_front: tally.avg_front(),
                avg_back: tally.avg_back(),
                pass_rate: tally.pass_rate(),
                pass_count: tally.passed,
            },
        );
    }
    stats
}

fn to_decimal(score: f64) -> Decimal {
    Decimal::from_f64(score).unwrap_or(Decimal::ZERO)
}

/// Arithmetic mean rounded half away from zero; 0 for an empty set.
fn mean(sum: Decimal, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    (sum / Decimal::from(count))
        .round_dp_with_strategy(AVERAGE_DP, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// `round(part / total * 100)` with halves rounded up; 0 when `total` is 0.
pub fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let rate = (part * 200 + total) / (total * 2);
    u32::try_from(rate).unwrap_or(u32::MAX)
}
