#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("transport failure: {0}")]
    Transport(#[from] TransportError),

    #[error("undecodable response: {0}")]
    Decode(String),

    /// The Etherscan envelope reported a failure. `message` is the remote
    /// message verbatim; `result` holds the string detail Etherscan puts in
    /// the `result` field (e.g. "Invalid API Key"), when there is one.
    #[error("Etherscan API error: {message}")]
    Api {
        message: String,
        result: Option<String>,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },
}

impl CoreError {
    /// The remote message of an [`CoreError::Api`] failure.
    pub fn api_message(&self) -> Option<&str> {
        match self {
            Self::Api { message, .. } => Some(message),
            _ => None,
        }
    }
}
