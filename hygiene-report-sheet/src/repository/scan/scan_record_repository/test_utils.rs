#[cfg(test)]
pub mod test_utils {
    use crate::workbook::Cell;
    use hygiene_report_api::domain::zone::Zone;

    /// `records` row with the given dirty zones set as boolean cells.
    pub fn record_row(
        record_id: &str,
        emp_id: &str,
        timestamp: Cell,
        front_score: f64,
        back_score: f64,
        dirty: &[u8],
    ) -> Vec<(String, Cell)> {
        let mut cells = vec![
            ("record_id".to_string(), Cell::text(record_id)),
            ("emp_id".to_string(), Cell::text(emp_id)),
            ("activity_id".to_string(), Cell::text("ACT-2026-01")),
            ("timestamp".to_string(), timestamp),
            ("front_score".to_string(), Cell::Number(front_score)),
            ("back_score".to_string(), Cell::Number(back_score)),
        ];
        for zone in Zone::ALL {
            cells.push((zone.key(), Cell::Bool(dirty.contains(&zone.number()))));
        }
        cells
    }
}
