use gpui::*;

use crate::services::{Row, draft_value};

/// Snapshot taken when the add/edit form opens: one `(column, initial
/// text)` pair per current column, plus the original row when editing.
/// The snapshot is deliberately decoupled from `TableViewState` so a
/// reload while the form is open cannot shift fields under the user.
#[derive(Clone, Debug)]
pub struct FormRequest {
    pub fields: Vec<(String, String)>,
    /// `None` when adding; the row being edited otherwise. Kept to resolve
    /// the primary-key value for the update request.
    pub target: Option<Row>,
    /// Bumped on every open so the form view knows to rebuild its inputs.
    pub epoch: usize,
}

#[derive(Default)]
pub struct RecordFormState {
    pub request: Option<FormRequest>,
    /// Row whose deletion awaits an explicit yes/no.
    pub pending_delete: Option<Row>,
    epoch: usize,
}

impl Global for RecordFormState {}

impl RecordFormState {
    pub fn init(cx: &mut App) {
        cx.set_global(RecordFormState::default());
    }

    pub fn open_add(&mut self, columns: &[String]) {
        self.epoch += 1;
        self.request = Some(FormRequest {
            fields: columns
                .iter()
                .map(|col| (col.clone(), String::new()))
                .collect(),
            target: None,
            epoch: self.epoch,
        });
    }

    pub fn open_edit(&mut self, columns: &[String], target: Row) {
        self.epoch += 1;
        self.request = Some(FormRequest {
            fields: columns
                .iter()
                .map(|col| {
                    let initial = target.get(col).map(draft_value).unwrap_or_default();
                    (col.clone(), initial)
                })
                .collect(),
            target: Some(target),
            epoch: self.epoch,
        });
    }

    pub fn close_form(&mut self) {
        self.request = None;
    }

    pub fn clear(&mut self) {
        self.request = None;
        self.pending_delete = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_open_edit_seeds_drafts_from_row() {
        let mut state = RecordFormState::default();
        let columns = vec!["id".to_string(), "name".to_string(), "note".to_string()];
        let target: Row =
            serde_json::from_value(json!({"id": 7, "name": "Alice", "note": null})).unwrap();

        state.open_edit(&columns, target);
        let request = state.request.as_ref().unwrap();
        assert_eq!(
            request.fields,
            vec![
                ("id".to_string(), "7".to_string()),
                ("name".to_string(), "Alice".to_string()),
                ("note".to_string(), String::new()),
            ]
        );
        assert!(request.target.is_some());
    }

    #[test]
    fn test_epoch_bumps_on_every_open() {
        let mut state = RecordFormState::default();
        let columns = vec!["id".to_string()];
        state.open_add(&columns);
        let first = state.request.as_ref().unwrap().epoch;
        state.close_form();
        state.open_add(&columns);
        let second = state.request.as_ref().unwrap().epoch;
        assert!(second > first);
    }
}
