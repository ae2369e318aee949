use gpui::*;

use crate::services::{ClientError, ExecutePayload, Row};

/// What the ad-hoc query panel shows: either a row set or a plain message.
/// A gateway failure lands here too, as an `Error: ...` message, so the
/// result panel keeps showing something after the banner is dismissed.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlOutput {
    Rows(Vec<Row>),
    Message(String),
}

#[derive(Default)]
pub struct QueryState {
    pub output: Option<SqlOutput>,
}

impl Global for QueryState {}

impl QueryState {
    pub fn init(cx: &mut App) {
        cx.set_global(QueryState::default());
    }
}

/// A query is runnable when it has any non-whitespace content. Nothing
/// else is checked locally; the backend owns SQL validity.
pub fn validate_query(sql: &str) -> Result<&str, ClientError> {
    if sql.trim().is_empty() {
        Err(ClientError::EmptyQuery)
    } else {
        Ok(sql)
    }
}

/// Split an `/execute` payload into panel output and banner text. A
/// `results` array (even empty) means row output; the banner prefers the
/// backend's row count, then its affected-row count.
pub fn interpret_execute(payload: ExecutePayload) -> (SqlOutput, String) {
    match payload.results {
        Some(rows) => {
            let status = match (payload.row_count, payload.affected_rows) {
                (Some(n), _) => format!("Query executed. {} rows returned.", n),
                (None, Some(n)) => format!("Query executed. {} rows affected.", n),
                (None, None) => "Query executed.".to_string(),
            };
            (SqlOutput::Rows(rows), status)
        }
        None => {
            let status = match payload.affected_rows {
                Some(n) => format!("Query executed. {} rows affected.", n),
                None => "Query executed. Operation successful.".to_string(),
            };
            let message = payload
                .message
                .unwrap_or_else(|| "Query executed with no data output.".to_string());
            (SqlOutput::Message(message), status)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(value: serde_json::Value) -> ExecutePayload {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_blank_queries_fail_validation() {
        assert!(matches!(validate_query(""), Err(ClientError::EmptyQuery)));
        assert!(matches!(
            validate_query("   "),
            Err(ClientError::EmptyQuery)
        ));
        assert!(validate_query("SELECT 1").is_ok());
    }

    #[test]
    fn test_rows_with_row_count() {
        let (output, status) = interpret_execute(payload(json!({
            "results": [{"id": 1}, {"id": 2}],
            "rowCount": 2,
        })));
        assert!(matches!(output, SqlOutput::Rows(rows) if rows.len() == 2));
        assert_eq!(status, "Query executed. 2 rows returned.");
    }

    #[test]
    fn test_rows_with_affected_count_only() {
        let (output, status) = interpret_execute(payload(json!({
            "results": [],
            "affectedRows": 3,
        })));
        assert!(matches!(output, SqlOutput::Rows(rows) if rows.is_empty()));
        assert_eq!(status, "Query executed. 3 rows affected.");
    }

    #[test]
    fn test_message_with_affected_count() {
        let (output, status) = interpret_execute(payload(json!({
            "message": "Record updated successfully",
            "affectedRows": 1,
        })));
        assert_eq!(
            output,
            SqlOutput::Message("Record updated successfully".into())
        );
        assert_eq!(status, "Query executed. 1 rows affected.");
    }

    #[test]
    fn test_bare_message_defaults() {
        let (output, status) = interpret_execute(payload(json!({})));
        assert_eq!(
            output,
            SqlOutput::Message("Query executed with no data output.".into())
        );
        assert_eq!(status, "Query executed. Operation successful.");
    }
}
