use thiserror::Error;

/// Errors raised by a registry client
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The registry refused the request. The message is passed through as
    /// the registry reported it.
    #[error("{0}")]
    Rejected(String),

    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("Connection failed with status code: {0}")]
    UnexpectedStatus(u16),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

impl ClientError {
    /// Transport failures are the only errors worth another attempt; anything
    /// the registry answered is final.
    pub fn is_transient(&self) -> bool {
        matches!(self, ClientError::NetworkError(_))
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::InvalidResponse(err.to_string())
    }
}
