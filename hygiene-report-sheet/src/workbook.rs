//! In-memory tabular workbook.
//!
//! A workbook is a set of named worksheets. Each worksheet has a header row
//! and data rows addressed by column name, the way the hygiene log spreadsheet
//! is laid out. Loading and saving a workbook is left to the embedding
//! application; the types derive serde so any format will do.

use hygiene_report_api::domain::zone::Zone;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

pub const EMPLOYEES_SHEET: &str = "employees";
pub const DEPARTMENTS_SHEET: &str = "departments";
pub const ACTIVITIES_SHEET: &str = "activities";
pub const RECORDS_SHEET: &str = "records";

pub const EMPLOYEE_HEADERS: [&str; 6] = ["emp_id", "name_th", "name_en", "department", "position", "status"];
pub const DEPARTMENT_HEADERS: [&str; 2] = ["dept_code", "dept_name_th"];
pub const ACTIVITY_HEADERS: [&str; 2] = ["activity_id", "name"];

/// Header row of the `records` sheet: identity, scores, `zone_1`..`zone_11`, extras.
pub fn record_headers() -> Vec<String> {
    let mut headers: Vec<String> = ["record_id", "emp_id", "activity_id", "timestamp", "front_score", "back_score"]
        .iter()
        .map(|h| h.to_string())
        .collect();
    headers.extend(Zone::ALL.iter().map(|zone| zone.key()));
    headers.push("image_url".to_string());
    headers.push("notes".to_string());
    headers
}

/// Workbook shared by the repositories of one store. Guards are never held across an `.await`.
pub type SharedWorkbook = Arc<RwLock<Workbook>>;

static EMPTY_CELL: Cell = Cell::Empty;

/// A single cell value as a spreadsheet holds it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    #[default]
    Empty,
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    /// Text cell, or `Empty` for `None` and blank strings.
    pub fn optional_text(value: Option<&str>) -> Self {
        match value {
            Some(value) if !value.is_empty() => Cell::Text(value.to_string()),
            _ => Cell::Empty,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(value) => value.is_empty(),
            _ => false,
        }
    }

    /// Display form of the cell. Integral numbers render without a fraction,
    /// so an id typed as `620913` reads back as `"620913"`.
    pub fn to_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(value) if value.is_empty() => None,
            Cell::Text(value) => Some(value.clone()),
            Cell::Bool(value) => Some(if *value { "TRUE" } else { "FALSE" }.to_string()),
            Cell::Number(value) if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 => {
                Some(format!("{}", *value as i64))
            }
            Cell::Number(value) => Some(value.to_string()),
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Cell::Empty => serde_json::Value::Null,
            Cell::Bool(value) => serde_json::Value::Bool(*value),
            Cell::Number(value) => serde_json::Number::from_f64(*value)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Cell::Text(value) => serde_json::Value::String(value.clone()),
        }
    }
}

impl From<bool> for Cell {
    fn from(value: bool) -> Self {
        Cell::Bool(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Worksheet {
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<Cell>>,
}

impl Worksheet {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|header| header.trim() == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, index: usize) -> Option<Row<'_>> {
        self.rows.get(index).map(|cells| Row {
            headers: &self.headers,
            cells,
        })
    }

    /// Data rows, skipping rows in which every cell is blank.
    pub fn rows(&self) -> impl Iterator<Item = (usize, Row<'_>)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, cells)| !cells.iter().all(Cell::is_empty))
            .map(|(index, cells)| {
                (
                    index,
                    Row {
                        headers: &self.headers,
                        cells,
                    },
                )
            })
    }

    /// Append a row built from `(column, value)` pairs.
    ///
    /// Values land under their header; columns without a value stay empty and
    /// values for unknown columns are dropped.
    pub fn append<K, I>(&mut self, values: I) -> usize
    where
        K: AsRef<str>,
        I: IntoIterator<Item = (K, Cell)>,
    {
        let mut cells = vec![Cell::Empty; self.headers.len()];
        for (name, value) in values {
            if let Some(index) = self.column(name.as_ref()) {
                cells[index] = value;
            }
        }
        self.rows.push(cells);
        self.rows.len() - 1
    }

    /// Overwrite one cell. Returns `false` when the row or column does not exist.
    pub fn set(&mut self, row: usize, column: &str, value: Cell) -> bool {
        let Some(index) = self.column(column) else {
            return false;
        };
        let Some(cells) = self.rows.get_mut(row) else {
            return false;
        };
        if cells.len() <= index {
            cells.resize(index + 1, Cell::Empty);
        }
        cells[index] = value;
        true
    }
}

/// Borrowed view of one data row, addressed by header name.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    headers: &'a [String],
    cells: &'a [Cell],
}

impl<'a> Row<'a> {
    /// Cell under `column`; missing columns and short rows read as empty.
    pub fn get(&self, column: &str) -> &'a Cell {
        let cells: &'a [Cell] = self.cells;
        self.headers
            .iter()
            .position(|header| header.trim() == column)
            .and_then(|index| cells.get(index))
            .unwrap_or(&EMPTY_CELL)
    }

    /// `(header, cell)` pairs in column order.
    pub fn entries(&self) -> impl Iterator<Item = (&'a str, &'a Cell)> + 'a {
        let headers: &'a [String] = self.headers;
        let cells: &'a [Cell] = self.cells;
        headers
            .iter()
            .enumerate()
            .map(move |(index, header)| (header.trim(), cells.get(index).unwrap_or(&EMPTY_CELL)))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    #[serde(flatten)]
    pub sheets: BTreeMap<String, Worksheet>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Workbook with the four hygiene log sheets, headers only.
    pub fn with_standard_sheets() -> Self {
        let mut workbook = Self::new();
        workbook.insert_sheet(EMPLOYEES_SHEET, Worksheet::new(EMPLOYEE_HEADERS));
        workbook.insert_sheet(DEPARTMENTS_SHEET, Worksheet::new(DEPARTMENT_HEADERS));
        workbook.insert_sheet(ACTIVITIES_SHEET, Worksheet::new(ACTIVITY_HEADERS));
        workbook.insert_sheet(RECORDS_SHEET, Worksheet::new(record_headers()));
        workbook
    }

    pub fn insert_sheet(&mut self, name: &str, sheet: Worksheet) -> Option<Worksheet> {
        self.sheets.insert(name.to_string(), sheet)
    }

    pub fn sheet(&self, name: &str) -> Option<&Worksheet> {
        self.sheets.get(name)
    }

    pub fn sheet_mut(&mut self, name: &str) -> Option<&mut Worksheet> {
        self.sheets.get_mut(name)
    }
}
