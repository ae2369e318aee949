mod client;
mod error;
mod types;

pub use client::{ApiClient, DEFAULT_BASE_URL};
pub use error::ClientError;
pub use types::{
    ConnectionParams, ExecutePayload, FieldKind, Row, display_value, draft_value,
};
