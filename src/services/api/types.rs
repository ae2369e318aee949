use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One row as the backend returns it. The map keeps insertion order
/// (`serde_json/preserve_order`), which is what defines column order for a
/// freshly loaded table.
pub type Row = serde_json::Map<String, Value>;

/// Credentials for one session, resent with every request so the backend
/// can re-authenticate per call (there is no session token).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionParams {
    pub host: String,
    /// `None` lets the backend fall back to its default port.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl ConnectionParams {
    /// Short display form for the header bar, e.g. `localhost/shop as root`.
    pub fn display_label(&self) -> String {
        format!("{}/{} as {}", self.host, self.database, self.user)
    }
}

/// The envelope every endpoint wraps its payload in.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(default)]
    pub success: bool,
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TablesPayload {
    #[serde(default)]
    pub tables: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct DataPayload {
    #[serde(default)]
    pub data: Vec<Row>,
}

/// Payload of `/execute`. `results` being an array (even an empty one) is
/// what distinguishes row output from plain-message output.
#[derive(Debug, Deserialize)]
pub struct ExecutePayload {
    pub results: Option<Vec<Row>>,
    pub message: Option<String>,
    #[serde(rename = "rowCount")]
    pub row_count: Option<u64>,
    #[serde(rename = "affectedRows")]
    pub affected_rows: Option<u64>,
}

/// Column type hint recovered from the schema probe. Anything the probe
/// did not cover, or could not classify, stays `Text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldKind {
    #[default]
    Text,
    Number,
}

impl FieldKind {
    /// Classify a MySQL column type as reported by `DESCRIBE`,
    /// e.g. `int(11)`, `decimal(10,2)`, `varchar(255)`.
    pub fn from_column_type(column_type: &str) -> Self {
        let ty = column_type.trim().to_ascii_lowercase();
        let base = ty.split(['(', ' ']).next().unwrap_or_default();
        match base {
            "tinyint" | "smallint" | "mediumint" | "int" | "integer" | "bigint" | "decimal"
            | "numeric" | "float" | "double" | "real" | "bit" | "year" => Self::Number,
            _ => Self::Text,
        }
    }

    /// Turn a form field's text back into a JSON value. Numeric hints only
    /// apply when the text actually parses; everything else stays a string
    /// so the backend sees exactly what the user typed.
    pub fn coerce(self, text: &str) -> Value {
        if self == Self::Number {
            let trimmed = text.trim();
            if let Ok(n) = trimmed.parse::<i64>() {
                return Value::from(n);
            }
            if let Ok(f) = trimmed.parse::<f64>() {
                if let Some(n) = serde_json::Number::from_f64(f) {
                    return Value::Number(n);
                }
            }
        }
        Value::String(text.to_string())
    }
}

/// Render a cell for the grid and for pre-filling the edit form.
/// NULLs display as their conventional uppercase marker.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "NULL".to_string(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    }
}

/// Same, but for seeding a form draft: NULL becomes an empty field rather
/// than the literal text `NULL`.
pub fn draft_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        other => display_value(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_omitted_when_absent() {
        let params = ConnectionParams {
            host: "localhost".into(),
            port: None,
            user: "root".into(),
            password: "".into(),
            database: "shop".into(),
        };
        let json = serde_json::to_value(&params).unwrap();
        assert!(json.get("port").is_none());
        assert_eq!(json["host"], "localhost");

        let with_port = ConnectionParams {
            port: Some(3306),
            ..params
        };
        let json = serde_json::to_value(&with_port).unwrap();
        assert_eq!(json["port"], 3306);
    }

    #[test]
    fn test_field_kind_classification() {
        assert_eq!(FieldKind::from_column_type("int(11)"), FieldKind::Number);
        assert_eq!(FieldKind::from_column_type("BIGINT"), FieldKind::Number);
        assert_eq!(
            FieldKind::from_column_type("decimal(10,2)"),
            FieldKind::Number
        );
        assert_eq!(FieldKind::from_column_type("varchar(255)"), FieldKind::Text);
        assert_eq!(FieldKind::from_column_type("datetime"), FieldKind::Text);
        assert_eq!(FieldKind::from_column_type(""), FieldKind::Text);
    }

    #[test]
    fn test_coerce_respects_hint_and_parseability() {
        assert_eq!(FieldKind::Number.coerce("42"), Value::from(42));
        assert_eq!(FieldKind::Number.coerce("3.5"), Value::from(3.5));
        // Hinted numeric but unparseable: sent as typed.
        assert_eq!(
            FieldKind::Number.coerce("abc"),
            Value::String("abc".into())
        );
        // No hint: numbers stay strings.
        assert_eq!(FieldKind::Text.coerce("42"), Value::String("42".into()));
    }

    #[test]
    fn test_display_and_draft_values() {
        assert_eq!(display_value(&Value::Null), "NULL");
        assert_eq!(draft_value(&Value::Null), "");
        assert_eq!(display_value(&Value::from(7)), "7");
        assert_eq!(draft_value(&Value::String("a".into())), "a");
    }
}
