use std::collections::HashMap;

use gpui::*;
use serde_json::Value;

use crate::services::{FieldKind, Row};

/// The catalog plus whatever table is currently loaded. Replaced wholesale
/// on every select or refresh; never patched row-by-row.
#[derive(Default)]
pub struct TableViewState {
    pub tables: Vec<String>,
    pub selected_table: String,
    pub columns: Vec<String>,
    /// Type hints from the schema probe, keyed by column name. Best-effort:
    /// columns the probe never covered simply resolve to `Text`.
    pub column_types: HashMap<String, FieldKind>,
    pub rows: Vec<Row>,
    /// User-declared (or auto-guessed) key column for edit/delete. Empty
    /// string means "not set".
    pub primary_key_column: String,
}

impl Global for TableViewState {}

impl TableViewState {
    pub fn init(cx: &mut App) {
        cx.set_global(TableViewState::default());
    }

    pub fn clear(&mut self) {
        *self = TableViewState::default();
    }

    /// Drop the loaded table but keep the catalog.
    pub fn clear_selection(&mut self) {
        self.selected_table.clear();
        self.columns.clear();
        self.column_types.clear();
        self.rows.clear();
        self.primary_key_column.clear();
    }

    pub fn field_kind(&self, column: &str) -> FieldKind {
        self.column_types.get(column).copied().unwrap_or_default()
    }

    /// Install a freshly loaded row set. Columns come from the first row's
    /// key order when rows exist, else from the probe; the primary key is
    /// only re-guessed off actual rows.
    pub fn apply_loaded(&mut self, rows: Vec<Row>, probe_rows: &[Row]) {
        self.rows = rows;
        self.column_types = probe_types(probe_rows);
        if self.rows.is_empty() {
            self.columns = probe_columns(probe_rows);
        } else {
            self.columns = columns_from_rows(&self.rows);
            self.primary_key_column = detect_primary_key(&self.columns).unwrap_or_default();
        }
    }
}

/// Column order is defined as the first row's natural key order.
pub fn columns_from_rows(rows: &[Row]) -> Vec<String> {
    rows.first()
        .map(|row| row.keys().cloned().collect())
        .unwrap_or_default()
}

/// First column (in column order) named `id` or ending in `_id`,
/// case-insensitively.
pub fn detect_primary_key(columns: &[String]) -> Option<String> {
    columns
        .iter()
        .find(|col| {
            let lower = col.to_lowercase();
            lower == "id" || lower.ends_with("_id")
        })
        .cloned()
}

/// Column names from `DESCRIBE` output rows (`Field` / `Type` / ...).
pub fn probe_columns(probe_rows: &[Row]) -> Vec<String> {
    probe_rows
        .iter()
        .filter_map(|row| row.get("Field").and_then(Value::as_str))
        .map(str::to_string)
        .collect()
}

pub fn probe_types(probe_rows: &[Row]) -> HashMap<String, FieldKind> {
    probe_rows
        .iter()
        .filter_map(|row| {
            let field = row.get("Field")?.as_str()?;
            let ty = row.get("Type")?.as_str()?;
            Some((field.to_string(), FieldKind::from_column_type(ty)))
        })
        .collect()
}

/// The value identifying `row` for update/delete, or `None` when the key
/// column is unset or the row has nothing usable there. `0` is usable;
/// only null, missing and empty-string values are not.
pub fn key_value<'a>(row: &'a Row, primary_key: &str) -> Option<&'a Value> {
    if primary_key.is_empty() {
        return None;
    }
    match row.get(primary_key) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.is_empty() => None,
        Some(value) => Some(value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: serde_json::Value) -> Row {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_columns_follow_first_row_key_order() {
        let rows = vec![
            row(json!({"id": 1, "name": "Alice", "email": "a@x.test"})),
            row(json!({"email": "b@x.test", "id": 2, "name": "Bob"})),
        ];
        assert_eq!(columns_from_rows(&rows), vec!["id", "name", "email"]);
        assert!(columns_from_rows(&[]).is_empty());
    }

    #[test]
    fn test_primary_key_prefers_first_match_in_column_order() {
        let columns = vec!["name".to_string(), "user_id".to_string(), "id".to_string()];
        assert_eq!(detect_primary_key(&columns), Some("user_id".to_string()));

        let columns = vec!["ID".to_string(), "label".to_string()];
        assert_eq!(detect_primary_key(&columns), Some("ID".to_string()));

        let columns = vec!["name".to_string(), "email".to_string()];
        assert_eq!(detect_primary_key(&columns), None);
    }

    #[test]
    fn test_probe_columns_and_types() {
        let probe = vec![
            row(json!({"Field": "id", "Type": "int(11)", "Null": "NO", "Key": "PRI"})),
            row(json!({"Field": "name", "Type": "varchar(255)", "Null": "YES"})),
        ];
        assert_eq!(probe_columns(&probe), vec!["id", "name"]);

        let types = probe_types(&probe);
        assert_eq!(types.get("id"), Some(&FieldKind::Number));
        assert_eq!(types.get("name"), Some(&FieldKind::Text));
    }

    #[test]
    fn test_key_value_usability() {
        let record = row(json!({"id": 0, "code": "", "note": null, "name": "x"}));
        // Zero is a real key; empty string, null and missing are not.
        assert_eq!(key_value(&record, "id"), Some(&json!(0)));
        assert_eq!(key_value(&record, "code"), None);
        assert_eq!(key_value(&record, "note"), None);
        assert_eq!(key_value(&record, "missing"), None);
        assert_eq!(key_value(&record, ""), None);
    }

    #[test]
    fn test_apply_loaded_non_empty_rows() {
        let mut state = TableViewState::default();
        let probe = vec![row(json!({"Field": "id", "Type": "int(11)"}))];
        state.apply_loaded(
            vec![row(json!({"id": 1, "name": "Alice"}))],
            &probe,
        );
        assert_eq!(state.columns, vec!["id", "name"]);
        assert_eq!(state.primary_key_column, "id");
        assert_eq!(state.field_kind("id"), FieldKind::Number);
        assert_eq!(state.field_kind("name"), FieldKind::Text);
    }

    #[test]
    fn test_apply_loaded_empty_rows_uses_probe_columns() {
        let mut state = TableViewState::default();
        let probe = vec![
            row(json!({"Field": "sku", "Type": "varchar(32)"})),
            row(json!({"Field": "qty", "Type": "int(11)"})),
        ];
        state.apply_loaded(vec![], &probe);
        assert_eq!(state.columns, vec!["sku", "qty"]);
        assert!(state.rows.is_empty());
        // Auto-detection only runs against actual rows.
        assert_eq!(state.primary_key_column, "");
    }

    #[test]
    fn test_apply_loaded_both_sources_empty() {
        let mut state = TableViewState::default();
        state.apply_loaded(vec![], &[]);
        assert!(state.columns.is_empty());
        assert!(state.rows.is_empty());
    }
}
