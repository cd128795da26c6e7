// LogSift - core/mapping.rs
//
// In-memory error-code mapping table with cause forward-fill.
// Core layer: pure logic. Reading spreadsheets/CSV lives in
// platform::mapping_source, which hands raw records to `from_records`.

use crate::core::model::{MappingRow, MappingSourceInfo, RawMappingRecord};

/// Ordered mapping rows plus the source they were read from.
#[derive(Debug, Clone, Default)]
pub struct MappingTable {
    rows: Vec<MappingRow>,
    source: Option<MappingSourceInfo>,
}

impl MappingTable {
    /// The fallback table used when loading fails.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a table from raw source rows, in order.
    ///
    /// Codes and actions are trimmed (absent cells become `""`). A blank cause
    /// takes the most recent non-blank cause seen above it; rows before the
    /// first named cause keep `None`. Rows whose cells are all blank are
    /// dropped.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = RawMappingRecord>,
    {
        let mut previous_cause: Option<String> = None;
        let mut rows = Vec::new();

        for record in records {
            if record.is_blank() {
                continue;
            }

            // Whitespace-only cells count as blank and take the cause above.
            let cause = match record.cause {
                Some(c) if !c.trim().is_empty() => {
                    previous_cause = Some(c.clone());
                    Some(c)
                }
                _ => previous_cause.clone(),
            };

            rows.push(MappingRow {
                error_code: trimmed(record.err_code),
                cause,
                corrective_action: trimmed(record.action),
            });
        }

        tracing::debug!(rows = rows.len(), "Mapping table built");
        Self { rows, source: None }
    }

    /// Attach the file the rows were read from.
    pub fn with_source(mut self, source: MappingSourceInfo) -> Self {
        self.source = Some(source);
        self
    }

    /// True when the table holds at least one row.
    pub fn is_loaded(&self) -> bool {
        !self.rows.is_empty()
    }

    pub fn rows(&self) -> &[MappingRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn source(&self) -> Option<&MappingSourceInfo> {
        self.source.as_ref()
    }

    /// First row whose code equals `code` exactly.
    pub fn find_code(&self, code: &str) -> Option<&MappingRow> {
        self.rows.iter().find(|row| row.error_code == code)
    }
}

fn trimmed(cell: Option<String>) -> String {
    cell.map(|v| v.trim().to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(code: Option<&str>, cause: Option<&str>, action: Option<&str>) -> RawMappingRecord {
        RawMappingRecord::new(code, cause, action)
    }

    #[test]
    fn test_forward_fill_uses_nearest_preceding_cause() {
        let table = MappingTable::from_records(vec![
            rec(Some("E1"), Some("Power Fail"), Some("Restart PSU")),
            rec(None, None, Some("Check Fuse")),
            rec(Some("E2"), Some("Sensor Fault"), Some("Replace Sensor")),
            rec(Some("E3"), Some(""), Some("Recalibrate")),
        ]);

        let causes: Vec<_> = table.rows().iter().map(|r| r.cause.as_deref()).collect();
        assert_eq!(
            causes,
            vec![
                Some("Power Fail"),
                Some("Power Fail"),
                Some("Sensor Fault"),
                Some("Sensor Fault"),
            ]
        );
    }

    #[test]
    fn test_whitespace_cause_is_forward_filled() {
        let table = MappingTable::from_records(vec![
            rec(Some("E1"), Some("Power Fail"), Some("Restart PSU")),
            rec(Some("E2"), Some("   "), Some("Check Fuse")),
        ]);
        assert_eq!(table.rows()[1].cause.as_deref(), Some("Power Fail"));
    }

    #[test]
    fn test_leading_rows_without_cause_stay_absent() {
        let table = MappingTable::from_records(vec![
            rec(Some("E0"), None, Some("Ignore")),
            rec(Some("E1"), Some("Overheat"), Some("Cool down")),
        ]);
        assert_eq!(table.rows()[0].cause, None);
        assert_eq!(table.rows()[1].cause.as_deref(), Some("Overheat"));
    }

    #[test]
    fn test_codes_and_actions_are_trimmed() {
        let table = MappingTable::from_records(vec![rec(Some("  E7 "), Some("X"), None)]);
        let row = &table.rows()[0];
        assert_eq!(row.error_code, "E7");
        assert_eq!(row.corrective_action, "");
    }

    #[test]
    fn test_blank_rows_dropped_and_empty_table_not_loaded() {
        let table = MappingTable::from_records(vec![rec(None, None, None)]);
        assert!(!table.is_loaded());
        assert!(!MappingTable::empty().is_loaded());
    }

    #[test]
    fn test_find_code_returns_first_occurrence() {
        let table = MappingTable::from_records(vec![
            rec(Some("E1"), Some("First"), Some("a")),
            rec(Some("E1"), Some("Second"), Some("b")),
        ]);
        assert_eq!(
            table.find_code("E1").and_then(|r| r.cause.as_deref()),
            Some("First")
        );
        assert!(table.find_code("e1").is_none());
    }
}
