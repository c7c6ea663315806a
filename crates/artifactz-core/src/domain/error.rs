use std::fmt;

use artifactz_api::{
    ClientError,
    FieldError,
};
use thiserror::Error;

pub const CREDENTIALS_MISSING: &str =
    "Artifactz access credentials are not defined. Cannot continue.";
pub const CREDENTIALS_NOT_FOUND: &str = "Could not find specified credentials. Cannot continue.";
pub const PROXY_CREDENTIALS_NOT_FOUND: &str =
    "Could not find specified proxy credentials. Cannot continue.";

/// Which stage of an invocation failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// A required request field was missing; nothing was sent
    Validation,
    /// No credential identifier is configured
    CredentialsMissing,
    /// The identifier is configured but the store has no matching credential
    CredentialsNotFound,
    /// The registry client raised an error
    Registry,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Validation => "validation",
            FailureKind::CredentialsMissing => "credentials-missing",
            FailureKind::CredentialsNotFound => "credentials-not-found",
            FailureKind::Registry => "registry",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal outcome of a failed publish or push
#[derive(Debug, Error)]
#[error("{message}")]
pub struct ExecutionFailure {
    kind: FailureKind,
    message: String,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

pub type ExecutionResult<T> = Result<T, ExecutionFailure>;

impl ExecutionFailure {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn validation(err: FieldError) -> Self {
        Self::new(FailureKind::Validation, err.message.clone()).with_source(err)
    }

    pub fn credentials_missing() -> Self {
        Self::new(FailureKind::CredentialsMissing, CREDENTIALS_MISSING)
    }

    pub fn credentials_not_found(message: impl Into<String>) -> Self {
        Self::new(FailureKind::CredentialsNotFound, message)
    }

    /// The client's message is kept verbatim
    pub fn registry(err: ClientError) -> Self {
        Self::new(FailureKind::Registry, err.to_string()).with_source(err)
    }

    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// The client error behind a registry failure, if any
    pub fn client_error(&self) -> Option<&ClientError> {
        self.source
            .as_deref()
            .and_then(|source| source.downcast_ref::<ClientError>())
    }
}
