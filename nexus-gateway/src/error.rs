use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    // HTTP errors
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    // Business-logic errors
    #[error("record not found")]
    NotFound,

    #[error("comment text is empty")]
    EmptyComment,

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    // Errors reported by the gateway itself
    #[error("gateway returned {status}: {message}")]
    Api { status: u16, message: String },

    // Serialization / deserialization errors
    #[error("failed to decode gateway response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl GatewayError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, GatewayError::NotFound)
    }

    pub fn is_empty_comment(&self) -> bool {
        matches!(self, GatewayError::EmptyComment)
    }
}
