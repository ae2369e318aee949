//! Application state management.
//!
//! One global per domain, mutated through actions and observed by the
//! workspace views:
//!
//! - `connection` - gateway handle, credentials, connection status
//! - `table` - catalog, loaded rows/columns, primary-key choice
//! - `query` - last ad-hoc query output
//! - `status` - busy flag and the transient banner
//! - `form` - add/edit form snapshot and pending delete confirmation
//! - `actions` - the per-intent operations that tie them together

mod actions;
mod connection;
mod form;
mod query;
mod status;
mod table;

pub use connection::{ConnectionState, ConnectionStatus};
pub use form::RecordFormState;
pub use query::{QueryState, SqlOutput};
pub use status::{MessageKind, StatusMessage, StatusState};
pub use table::{TableViewState, key_value};

pub use actions::{
    cancel_delete, clear_message, close_form, confirm_delete, connect, disconnect, load_table,
    open_add_form, open_edit_form, refresh_tables, request_delete, run_query, save_record,
    search_table,
};

use gpui::App;

/// Initialize all global state.
pub fn init(cx: &mut App) {
    ConnectionState::init(cx);
    TableViewState::init(cx);
    QueryState::init(cx);
    StatusState::init(cx);
    RecordFormState::init(cx);
}
