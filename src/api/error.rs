use thiserror::Error;

/// Failure of a single API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-2xx response. `message` is the server's `message` field when the
    /// body carried one, otherwise `"Erro na requisição: <status>"`.
    #[error("{message}")]
    Status { status: u16, message: String },

    /// The request never produced a response (DNS, refused connection, ...).
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    /// A 2xx body that does not decode into the expected type.
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid header {0}")]
    InvalidHeader(String),
}

impl ApiError {
    /// Build the status error for a failed response body.
    pub fn from_status(status: u16, body: &[u8]) -> Self {
        let message = server_message(body).unwrap_or_else(|| format!("Erro na requisição: {status}"));
        Self::Status { status, message }
    }

    /// HTTP status code, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(err) => err.status().map(|s| s.as_u16()),
            Self::Decode(_) | Self::InvalidHeader(_) => None,
        }
    }
}

/// A non-empty string `message` from a JSON error body.
fn server_message(body: &[u8]) -> Option<String> {
    let value: serde_json::Value = serde_json::from_slice(body).ok()?;
    match value.get("message")? {
        serde_json::Value::String(message) if !message.is_empty() => Some(message.clone()),
        _ => None,
    }
}
