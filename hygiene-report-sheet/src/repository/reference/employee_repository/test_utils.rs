#[cfg(test)]
pub mod test_utils {
    use crate::workbook::Cell;

    /// Employee row the way the sheet holds it: numeric ids, optional columns blank.
    pub fn employee_row(emp_id: &str, department: &str, status: Cell) -> Vec<(&'static str, Cell)> {
        let id = match emp_id.parse::<f64>() {
            Ok(number) => Cell::Number(number),
            Err(_) => Cell::text(emp_id),
        };
        vec![
            ("emp_id", id),
            ("name_th", Cell::text("สมชาย ใจดี")),
            ("department", Cell::optional_text(Some(department))),
            ("status", status),
        ]
    }
}
