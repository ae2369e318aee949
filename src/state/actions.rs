//! Actions that orchestrate state changes across the global states.
//!
//! Each user intent is one function: it validates locally, flips the busy
//! flag, runs the blocking gateway call on the background executor, and
//! applies the outcome back onto the globals. Observers re-render after
//! every mutation, so each network call paints at least twice (busy on,
//! busy off).

use gpui::*;
use serde_json::Value;

use crate::services::{ApiClient, ClientError, ConnectionParams, Row};

use super::connection::{ConnectionState, ConnectionStatus};
use super::form::RecordFormState;
use super::query::{QueryState, SqlOutput, interpret_execute, validate_query};
use super::status::{StatusMessage, StatusState};
use super::table::{TableViewState, columns_from_rows, key_value};

// =============================================================================
// Connection Lifecycle
// =============================================================================

/// Attempts to connect through the backend. On success the credentials are
/// retained for the session and the table catalog is loaded; on failure
/// the connect form stays up with the gateway's error in the banner.
pub fn connect(params: ConnectionParams, cx: &mut App) {
    let api = cx.global::<ConnectionState>().api.clone();

    cx.update_global::<ConnectionState, _>(|state, _cx| {
        state.status = ConnectionStatus::Connecting;
    });
    begin_request(cx);

    cx.spawn(async move |cx| {
        let call_params = params.clone();
        let result = smol::unblock(move || api.connect(&call_params)).await;
        end_request(cx);

        match result {
            Ok(()) => {
                let _ = cx.update_global::<ConnectionState, _>(|state, _cx| {
                    state.active_connection = Some(params);
                    state.status = ConnectionStatus::Connected;
                });
                set_message(
                    cx,
                    StatusMessage::success("Successfully connected to the database!"),
                );
                let _ = cx.update(|cx| refresh_tables(cx));
            }
            Err(e) => {
                let _ = cx.update_global::<ConnectionState, _>(|state, _cx| {
                    state.active_connection = None;
                    state.status = ConnectionStatus::Disconnected;
                });
                fail(cx, e);
            }
        }
    })
    .detach();
}

/// Drops the session synchronously. No network call: the backend holds no
/// per-session resources on our behalf.
pub fn disconnect(cx: &mut App) {
    cx.update_global::<ConnectionState, _>(|state, _cx| {
        state.active_connection = None;
        state.status = ConnectionStatus::Disconnected;
    });
    cx.update_global::<TableViewState, _>(|state, _cx| state.clear());
    cx.update_global::<QueryState, _>(|state, _cx| state.output = None);
    cx.update_global::<RecordFormState, _>(|state, _cx| state.clear());
    cx.update_global::<StatusState, _>(|status, _cx| {
        status.busy = false;
        status.message = Some(StatusMessage::info("Disconnected from database."));
    });
}

// =============================================================================
// Table Catalog & Row Loading
// =============================================================================

pub fn refresh_tables(cx: &mut App) {
    let Some((api, params)) = gateway(cx) else {
        return;
    };
    begin_request(cx);

    cx.spawn(async move |cx| {
        let result = smol::unblock(move || api.list_tables(&params)).await;
        end_request(cx);

        match result {
            Ok(tables) => {
                let _ = cx.update_global::<TableViewState, _>(|state, _cx| {
                    let emptied = tables.is_empty();
                    state.tables = tables;
                    if emptied {
                        state.clear_selection();
                    }
                });
                set_message(cx, StatusMessage::success("Tables loaded successfully."));
            }
            Err(e) => {
                let _ = cx.update_global::<TableViewState, _>(|state, _cx| {
                    state.tables.clear();
                });
                fail(cx, e);
            }
        }
    })
    .detach();
}

/// Loads one table's rows, deriving columns and a primary-key guess. The
/// schema probe runs after the data call: for empty tables it recovers the
/// column list, for non-empty ones it only supplies type hints, and its
/// failures are never surfaced.
pub fn load_table(table_name: String, cx: &mut App) {
    if table_name.is_empty() {
        return;
    }
    let Some((api, params)) = gateway(cx) else {
        return;
    };

    cx.update_global::<TableViewState, _>(|state, _cx| {
        state.selected_table = table_name.clone();
        state.primary_key_column.clear();
    });
    begin_request(cx);

    cx.spawn(async move |cx| {
        let data_api = api.clone();
        let data_params = params.clone();
        let data_table = table_name.clone();
        let result = smol::unblock(move || data_api.table_data(&data_params, &data_table)).await;

        let probe_rows = if result.is_ok() {
            let probe_table = table_name.clone();
            match smol::unblock(move || api.describe_table(&params, &probe_table)).await {
                Ok(rows) => rows,
                Err(e) => {
                    tracing::warn!("Could not fetch columns for table {}: {}", table_name, e);
                    Vec::new()
                }
            }
        } else {
            Vec::new()
        };
        end_request(cx);

        match result {
            Ok(rows) => {
                let _ = cx.update_global::<TableViewState, _>(|state, _cx| {
                    state.apply_loaded(rows, &probe_rows);
                });
                set_message(
                    cx,
                    StatusMessage::success(format!("Data for table '{}' loaded.", table_name)),
                );
            }
            Err(e) => {
                let _ = cx.update_global::<TableViewState, _>(|state, _cx| {
                    state.rows.clear();
                    state.columns.clear();
                    state.column_types.clear();
                });
                fail(cx, e);
            }
        }
    })
    .detach();
}

/// Server-side filter over the selected table. Only the rows are replaced:
/// columns, type hints and the primary-key choice survive, since it is
/// still the same table.
pub fn search_table(search_text: String, cx: &mut App) {
    let Some((api, params)) = gateway(cx) else {
        return;
    };
    let table_name = cx.global::<TableViewState>().selected_table.clone();
    if table_name.is_empty() {
        return;
    }
    begin_request(cx);

    cx.spawn(async move |cx| {
        let result =
            smol::unblock(move || api.search_table(&params, &table_name, &search_text)).await;
        end_request(cx);

        match result {
            Ok(rows) => {
                let _ = cx.update_global::<TableViewState, _>(|state, _cx| {
                    if state.columns.is_empty() && !rows.is_empty() {
                        state.columns = columns_from_rows(&rows);
                    }
                    state.rows = rows;
                });
                set_message(cx, StatusMessage::success("Search results loaded."));
            }
            Err(e) => fail(cx, e),
        }
    })
    .detach();
}

// =============================================================================
// Record Mutation
// =============================================================================

pub fn open_add_form(cx: &mut App) {
    let columns = cx.global::<TableViewState>().columns.clone();
    cx.update_global::<RecordFormState, _>(|state, _cx| state.open_add(&columns));
}

pub fn open_edit_form(row: Row, cx: &mut App) {
    let columns = cx.global::<TableViewState>().columns.clone();
    cx.update_global::<RecordFormState, _>(|state, _cx| state.open_edit(&columns, row));
}

pub fn close_form(cx: &mut App) {
    cx.update_global::<RecordFormState, _>(|state, _cx| state.close_form());
}

enum RecordOp {
    Add,
    Update { id_field: String, id_value: Value },
}

/// Saves the open add/edit form. `values` are the field texts as the user
/// left them; type hints decide which become JSON numbers. The form only
/// closes on success; a failure leaves it up for correction and retry.
pub fn save_record(values: Vec<(String, String)>, cx: &mut App) {
    let Some((api, params)) = gateway(cx) else {
        return;
    };
    let Some(request) = cx.global::<RecordFormState>().request.clone() else {
        return;
    };

    let (table_name, primary_key, record) = {
        let table_state = cx.global::<TableViewState>();
        let record: Row = values
            .iter()
            .map(|(col, text)| (col.clone(), table_state.field_kind(col).coerce(text)))
            .collect();
        (
            table_state.selected_table.clone(),
            table_state.primary_key_column.clone(),
            record,
        )
    };
    if table_name.is_empty() {
        return;
    }

    let op = match &request.target {
        None => RecordOp::Add,
        Some(target) => match key_value(target, &primary_key) {
            Some(id_value) => RecordOp::Update {
                id_field: primary_key.clone(),
                id_value: id_value.clone(),
            },
            None => {
                fail_local(cx, ClientError::MissingKey);
                return;
            }
        },
    };
    let success_text = match op {
        RecordOp::Add => "Record added successfully!",
        RecordOp::Update { .. } => "Record updated successfully!",
    };
    begin_request(cx);

    cx.spawn(async move |cx| {
        let call_table = table_name.clone();
        let result = smol::unblock(move || match &op {
            RecordOp::Add => api.add_record(&params, &call_table, &record),
            RecordOp::Update { id_field, id_value } => {
                api.update_record(&params, &call_table, id_field, id_value, &record)
            }
        })
        .await;
        end_request(cx);

        match result {
            Ok(()) => {
                let _ = cx.update_global::<RecordFormState, _>(|state, _cx| state.close_form());
                set_message(cx, StatusMessage::success(success_text));
                let _ = cx.update(|cx| load_table(table_name, cx));
            }
            Err(e) => fail(cx, e),
        }
    })
    .detach();
}

/// First half of a delete: local key validation, then park the row behind
/// the confirmation dialog. Nothing is sent yet.
pub fn request_delete(row: Row, cx: &mut App) {
    let primary_key = cx.global::<TableViewState>().primary_key_column.clone();
    if key_value(&row, &primary_key).is_none() {
        fail_local(cx, ClientError::MissingKey);
        return;
    }
    cx.update_global::<RecordFormState, _>(|state, _cx| {
        state.pending_delete = Some(row);
    });
}

/// Declining the confirmation aborts with no state change and no message.
pub fn cancel_delete(cx: &mut App) {
    cx.update_global::<RecordFormState, _>(|state, _cx| {
        state.pending_delete = None;
    });
}

pub fn confirm_delete(cx: &mut App) {
    let Some((api, params)) = gateway(cx) else {
        return;
    };
    let Some(row) = cx.global::<RecordFormState>().pending_delete.clone() else {
        return;
    };
    cx.update_global::<RecordFormState, _>(|state, _cx| {
        state.pending_delete = None;
    });

    let (table_name, primary_key) = {
        let table_state = cx.global::<TableViewState>();
        (
            table_state.selected_table.clone(),
            table_state.primary_key_column.clone(),
        )
    };
    let Some(id_value) = key_value(&row, &primary_key).cloned() else {
        fail_local(cx, ClientError::MissingKey);
        return;
    };
    begin_request(cx);

    cx.spawn(async move |cx| {
        let call_table = table_name.clone();
        let result = smol::unblock(move || {
            api.delete_record(&params, &call_table, &primary_key, &id_value)
        })
        .await;
        end_request(cx);

        match result {
            Ok(()) => {
                set_message(cx, StatusMessage::success("Record deleted successfully!"));
                let _ = cx.update(|cx| load_table(table_name, cx));
            }
            Err(e) => fail(cx, e),
        }
    })
    .detach();
}

// =============================================================================
// Custom Query Execution
// =============================================================================

pub fn run_query(sql: String, cx: &mut App) {
    if let Err(e) = validate_query(&sql) {
        fail_local(cx, e);
        return;
    }
    let Some((api, params)) = gateway(cx) else {
        return;
    };
    begin_request(cx);

    cx.spawn(async move |cx| {
        let result = smol::unblock(move || api.execute(&params, &sql)).await;
        end_request(cx);

        match result {
            Ok(payload) => {
                let (output, status_text) = interpret_execute(payload);
                let _ = cx.update_global::<QueryState, _>(|state, _cx| {
                    state.output = Some(output);
                });
                set_message(cx, StatusMessage::success(status_text));
            }
            Err(e) => {
                // The result panel keeps its own copy of the error so it
                // outlives the transient banner.
                let _ = cx.update_global::<QueryState, _>(|state, _cx| {
                    state.output = Some(SqlOutput::Message(format!("Error: {}", e)));
                });
                fail(cx, e);
            }
        }
    })
    .detach();
}

// =============================================================================
// Status Banner
// =============================================================================

pub fn clear_message(cx: &mut App) {
    cx.update_global::<StatusState, _>(|status, _cx| {
        status.message = None;
    });
}

// =============================================================================
// Private Helpers
// =============================================================================

/// The gateway handle plus current credentials, or `None` when the session
/// is not connected. Actions that need a connection bail out quietly; the
/// UI never offers them while disconnected.
fn gateway(cx: &App) -> Option<(ApiClient, ConnectionParams)> {
    let state = cx.global::<ConnectionState>();
    let params = state.active_connection.clone()?;
    Some((state.api.clone(), params))
}

fn begin_request(cx: &mut App) {
    cx.update_global::<StatusState, _>(|status, _cx| {
        status.busy = true;
        status.message = None;
    });
}

/// Busy-off runs before the result is even looked at, so it cannot be
/// skipped by an early return in the handling below.
fn end_request(cx: &mut AsyncApp) {
    let _ = cx.update_global::<StatusState, _>(|status, _cx| {
        status.busy = false;
    });
}

fn set_message(cx: &mut AsyncApp, message: StatusMessage) {
    let _ = cx.update_global::<StatusState, _>(|status, _cx| {
        status.message = Some(message);
    });
}

fn fail(cx: &mut AsyncApp, error: ClientError) {
    tracing::error!("Request failed: {}", error);
    let _ = cx.update_global::<StatusState, _>(|status, _cx| {
        status.message = Some(StatusMessage::error(error.to_string()));
    });
}

/// Local validation failure: banner only, no busy cycle, no network.
fn fail_local(cx: &mut App, error: ClientError) {
    tracing::warn!("{}", error);
    cx.update_global::<StatusState, _>(|status, _cx| {
        status.message = Some(StatusMessage::error(error.to_string()));
    });
}
