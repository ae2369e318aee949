//! HTTP gateway to the backend API.
//!
//! Every endpoint is a JSON POST. The client merges the current connection
//! credentials into each payload, sends it with a blocking `smolhttp` call
//! (callers run it through `smol::unblock`), and normalizes transport
//! failures, unparseable bodies and `success: false` envelopes into a
//! single `ClientError::Request`.

use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use super::error::ClientError;
use super::types::{
    ConnectionParams, DataPayload, Envelope, ExecutePayload, Row, TablesPayload,
};

pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api/database";

#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    /// Base URL from `MYGUI_API_URL`, falling back to the default when the
    /// variable is unset or does not parse as a URL.
    pub fn from_env() -> Self {
        let raw = std::env::var("MYGUI_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let base_url = match Url::parse(&raw) {
            Ok(url) => url.as_str().trim_end_matches('/').to_string(),
            Err(e) => {
                tracing::warn!("Ignoring invalid MYGUI_API_URL {:?}: {}", raw, e);
                DEFAULT_BASE_URL.to_string()
            }
        };
        tracing::info!("Using backend API at {}", base_url);
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ------------------------------------------------------------------
    // Endpoint wrappers
    // ------------------------------------------------------------------

    /// `/connect` takes the credentials as the payload itself.
    pub fn connect(&self, params: &ConnectionParams) -> Result<(), ClientError> {
        self.call::<Envelope>("/connect", Some(params), Value::Null)?;
        Ok(())
    }

    pub fn list_tables(&self, params: &ConnectionParams) -> Result<Vec<String>, ClientError> {
        let payload: TablesPayload = self.call("/tables", Some(params), Value::Null)?;
        Ok(payload.tables)
    }

    pub fn table_data(
        &self,
        params: &ConnectionParams,
        table_name: &str,
    ) -> Result<Vec<Row>, ClientError> {
        let payload: DataPayload = self.call(
            "/table/data",
            Some(params),
            serde_json::json!({ "tableName": table_name }),
        )?;
        Ok(payload.data)
    }

    pub fn search_table(
        &self,
        params: &ConnectionParams,
        table_name: &str,
        query: &str,
    ) -> Result<Vec<Row>, ClientError> {
        let payload: DataPayload = self.call(
            "/table/search",
            Some(params),
            serde_json::json!({ "tableName": table_name, "query": query }),
        )?;
        Ok(payload.data)
    }

    pub fn add_record(
        &self,
        params: &ConnectionParams,
        table_name: &str,
        record: &Row,
    ) -> Result<(), ClientError> {
        self.call::<Envelope>(
            "/table/add",
            Some(params),
            serde_json::json!({ "tableName": table_name, "record": record }),
        )?;
        Ok(())
    }

    pub fn update_record(
        &self,
        params: &ConnectionParams,
        table_name: &str,
        id_field: &str,
        id_value: &Value,
        record: &Row,
    ) -> Result<(), ClientError> {
        self.call::<Envelope>(
            "/table/update",
            Some(params),
            serde_json::json!({
                "tableName": table_name,
                "idField": id_field,
                "idValue": id_value,
                "record": record,
            }),
        )?;
        Ok(())
    }

    pub fn delete_record(
        &self,
        params: &ConnectionParams,
        table_name: &str,
        id_field: &str,
        id_value: &Value,
    ) -> Result<(), ClientError> {
        self.call::<Envelope>(
            "/table/delete",
            Some(params),
            serde_json::json!({
                "tableName": table_name,
                "idField": id_field,
                "idValue": id_value,
            }),
        )?;
        Ok(())
    }

    pub fn execute(
        &self,
        params: &ConnectionParams,
        query: &str,
    ) -> Result<ExecutePayload, ClientError> {
        self.call(
            "/execute",
            Some(params),
            serde_json::json!({ "query": query }),
        )
    }

    /// Schema probe for column names and type hints. The caller decides
    /// whether a failure matters; for table loading it never does.
    pub fn describe_table(
        &self,
        params: &ConnectionParams,
        table_name: &str,
    ) -> Result<Vec<Row>, ClientError> {
        let payload = self.execute(params, &format!("DESCRIBE `{}`;", table_name))?;
        Ok(payload.results.unwrap_or_default())
    }

    // ------------------------------------------------------------------
    // Transport
    // ------------------------------------------------------------------

    fn call<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        connection: Option<&ConnectionParams>,
        fields: Value,
    ) -> Result<T, ClientError> {
        let payload = merge_payload(connection, fields)?;
        let text = self.post(endpoint, &payload)?;

        let envelope: Envelope = serde_json::from_str(&text)
            .map_err(|_| ClientError::request("Invalid response from server"))?;
        if !envelope.success {
            let message = envelope
                .message
                .unwrap_or_else(|| format!("Request to {} failed", endpoint));
            return Err(ClientError::Request(message));
        }

        serde_json::from_str(&text)
            .map_err(|e| ClientError::request(format!("Failed to parse response: {}", e)))
    }

    fn post(&self, endpoint: &str, payload: &Value) -> Result<String, ClientError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let body = serde_json::to_string(payload)
            .map_err(|e| ClientError::request(format!("Failed to serialize request: {}", e)))?;

        let response = smolhttp::Client::new(url.as_str())
            .map_err(|e| ClientError::request(format!("Failed to create HTTP client: {}", e)))?
            .post()
            .headers(vec![(
                "content-type".to_string(),
                "application/json".to_string(),
            )])
            .body(body.into())
            .send()
            .map_err(|e| ClientError::request(format!("Request to {} failed: {}", endpoint, e)))?;

        Ok(response.text())
    }
}

/// Merge the connection credentials under the request fields. Explicit
/// fields win on a key collision, matching the backend's expectation that
/// e.g. `/table/search`'s `query` is the search text, never a credential.
fn merge_payload(
    connection: Option<&ConnectionParams>,
    fields: Value,
) -> Result<Value, ClientError> {
    let mut merged = match connection {
        Some(params) => match serde_json::to_value(params) {
            Ok(Value::Object(map)) => map,
            _ => return Err(ClientError::request("Failed to serialize credentials")),
        },
        None => serde_json::Map::new(),
    };

    if let Value::Object(fields) = fields {
        merged.extend(fields);
    }

    Ok(Value::Object(merged))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::thread;

    fn test_params() -> ConnectionParams {
        ConnectionParams {
            host: "localhost".into(),
            port: Some(3306),
            user: "root".into(),
            password: "".into(),
            database: "shop".into(),
        }
    }

    /// One-shot backend: accepts a single request, answers with `body`,
    /// and hands the raw request back for inspection.
    fn mock_backend(body: &'static str) -> (String, thread::JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = stream.read(&mut buf).unwrap_or(0);
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request_complete(&request) {
                    break;
                }
            }

            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            stream.write_all(response.as_bytes()).unwrap();
            String::from_utf8_lossy(&request).into_owned()
        });

        (format!("http://{}", addr), handle)
    }

    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some(split) = text.find("\r\n\r\n") else {
            return false;
        };
        let headers = &text[..split];
        let body_len = headers
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())?
            })
            .unwrap_or(0);
        text.len() >= split + 4 + body_len
    }

    #[test]
    fn test_success_payload_and_credential_merge() {
        let (base, handle) = mock_backend(r#"{"success":true,"tables":["users","orders"]}"#);
        let client = ApiClient::new(base);

        let tables = client.list_tables(&test_params()).unwrap();
        assert_eq!(tables, vec!["users".to_string(), "orders".to_string()]);

        let request = handle.join().unwrap();
        assert!(request.contains(r#""host":"localhost""#));
        assert!(request.contains(r#""database":"shop""#));
        assert!(request.contains(r#""port":3306"#));
    }

    #[test]
    fn test_success_false_surfaces_backend_message() {
        let (base, handle) =
            mock_backend(r#"{"success":false,"message":"Connection failed: boom"}"#);
        let client = ApiClient::new(base);

        let err = client.connect(&test_params()).unwrap_err();
        assert!(matches!(&err, ClientError::Request(m) if m == "Connection failed: boom"));
        handle.join().unwrap();
    }

    #[test]
    fn test_unparseable_body_is_a_request_error() {
        let (base, handle) = mock_backend("<html>gateway timeout</html>");
        let client = ApiClient::new(base);

        let err = client.list_tables(&test_params()).unwrap_err();
        assert!(matches!(&err, ClientError::Request(m) if m == "Invalid response from server"));
        handle.join().unwrap();
    }

    #[test]
    fn test_request_fields_override_credentials() {
        let mut params = test_params();
        params.database = "search-me-not".into();
        let merged = merge_payload(
            Some(&params),
            serde_json::json!({ "query": "alice", "database": "shop" }),
        )
        .unwrap();
        assert_eq!(merged["query"], "alice");
        assert_eq!(merged["database"], "shop");
        assert_eq!(merged["host"], "localhost");
    }

    #[test]
    fn test_transport_failure_is_a_request_error() {
        // Nothing listens on this port.
        let client = ApiClient::new("http://127.0.0.1:1");
        let err = client.connect(&test_params()).unwrap_err();
        assert!(matches!(err, ClientError::Request(_)));
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let client = ApiClient::new("http://localhost:5000/api/database/");
        assert_eq!(client.base_url(), "http://localhost:5000/api/database");
    }
}
