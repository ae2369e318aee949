use thiserror::Error;

/// Everything that can stop an operation before it changes any state.
///
/// `Request` covers the whole backend/transport side: a connection refusal,
/// a non-success HTTP exchange, an unparseable body, or a well-formed
/// envelope carrying `success: false`. The other two variants are local
/// validation failures that never reach the network.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("{0}")]
    Request(String),

    #[error("Primary key column or value is missing")]
    MissingKey,

    #[error("SQL query cannot be empty")]
    EmptyQuery,
}

impl ClientError {
    pub fn request(message: impl Into<String>) -> Self {
        Self::Request(message.into())
    }
}
