use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};
use heapless::String as HeaplessString;
use hygiene_report_db::models::clamp_score;
use std::error::Error;
use std::str::FromStr;
use tracing::debug;

use crate::workbook::{Cell, Row, Workbook};

/// A trait for converting a worksheet row into a model.
pub trait TryFromRow<R>: Sized {
    /// Performs the conversion.
    fn try_from_row(row: &R) -> Result<Self, Box<dyn Error + Send + Sync>>;
}

/// Decodes every non-blank row of `sheet_name`.
///
/// A missing sheet reads as empty. A row that fails to decode fails the whole
/// read, with the sheet and 1-based spreadsheet row number in the message.
pub fn load_rows<T>(workbook: &Workbook, sheet_name: &str) -> Result<Vec<T>, Box<dyn Error + Send + Sync>>
where
    T: for<'a> TryFromRow<Row<'a>>,
{
    let Some(sheet) = workbook.sheet(sheet_name) else {
        debug!(sheet = sheet_name, "Sheet not found, reading as empty");
        return Ok(Vec::new());
    };

    let mut items = Vec::with_capacity(sheet.len());
    for (index, row) in sheet.rows() {
        let item = T::try_from_row(&row)
            .map_err(|e| format!("Sheet '{sheet_name}' row {}: {e}", index + 2))?;
        items.push(item);
    }
    Ok(items)
}

/// Retrieves a required `HeaplessString` from a row.
pub fn get_heapless_string<const N: usize>(
    row: &Row<'_>,
    col_name: &str,
) -> Result<HeaplessString<N>, Box<dyn Error + Send + Sync>> {
    get_optional_heapless_string(row, col_name)?
        .ok_or_else(|| format!("Missing value for column '{col_name}'").into())
}

/// Retrieves an optional `HeaplessString` from a row. Blank cells read as `None`.
pub fn get_optional_heapless_string<const N: usize>(
    row: &Row<'_>,
    col_name: &str,
) -> Result<Option<HeaplessString<N>>, Box<dyn Error + Send + Sync>> {
    match row.get(col_name).to_text() {
        Some(val) if !val.trim().is_empty() => to_heapless(val.trim(), col_name).map(Some),
        _ => Ok(None),
    }
}

/// Trimmed `value` for a required column; blank values are rejected.
pub fn required_heapless<const N: usize>(
    value: &str,
    col_name: &str,
) -> Result<HeaplessString<N>, Box<dyn Error + Send + Sync>> {
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("Missing value for column '{col_name}'").into());
    }
    to_heapless(value, col_name)
}

pub fn to_heapless<const N: usize>(
    value: &str,
    col_name: &str,
) -> Result<HeaplessString<N>, Box<dyn Error + Send + Sync>> {
    HeaplessString::from_str(value)
        .map_err(|_| format!("Value for column '{col_name}' is too long (max {N} chars)").into())
}

/// Reads a contamination flag.
///
/// Boolean `true` and the text `TRUE` (any case, surrounding whitespace
/// ignored) are set. Everything else is clear; unrecognised encodings are
/// logged.
pub fn get_bool(row: &Row<'_>, col_name: &str) -> bool {
    match row.get(col_name) {
        Cell::Bool(value) => *value,
        Cell::Empty => false,
        Cell::Text(value) => {
            let value = value.trim();
            if value.eq_ignore_ascii_case("true") {
                true
            } else {
                if !value.is_empty() && !value.eq_ignore_ascii_case("false") {
                    debug!(column = col_name, value, "Unrecognised flag value read as false");
                }
                false
            }
        }
        other => {
            debug!(column = col_name, value = ?other, "Unrecognised flag value read as false");
            false
        }
    }
}

/// Reads a score clamped to `[0, 100]`. Blank or non-numeric cells read as 0.
pub fn get_score(row: &Row<'_>, col_name: &str) -> f64 {
    let raw = match row.get(col_name) {
        Cell::Number(value) => *value,
        Cell::Text(value) => value.trim().parse::<f64>().unwrap_or(f64::NAN),
        _ => f64::NAN,
    };
    clamp_score(raw)
}

/// Reads an instant.
///
/// Accepts RFC 3339 text, which carries its own offset, or a naive
/// `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SS` local time that is placed in
/// `offset`.
pub fn get_timestamp(
    row: &Row<'_>,
    col_name: &str,
    offset: FixedOffset,
) -> Result<DateTime<Utc>, Box<dyn Error + Send + Sync>> {
    let text = row
        .get(col_name)
        .to_text()
        .ok_or_else(|| format!("Missing value for column '{col_name}'"))?;
    parse_timestamp(text.trim(), offset)
        .ok_or_else(|| format!("Invalid timestamp '{text}' in column '{col_name}'").into())
}

pub fn parse_timestamp(value: &str, offset: FixedOffset) -> Option<DateTime<Utc>> {
    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(instant.with_timezone(&Utc));
    }
    ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .and_then(|naive| naive.and_local_timezone(offset).single())
        .map(|instant| instant.with_timezone(&Utc))
}
