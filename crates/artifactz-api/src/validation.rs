//! Required-field checks
//!
//! The `check_*` functions report on a single field the way a settings form
//! would; `validate_publish` and `validate_push` apply them to a whole request
//! and stop at the first problem.

use thiserror::Error;

use crate::types::{
    PublishRequest,
    PushRequest,
};

pub const NAME_REQUIRED: &str = "Please set an artifact name";
pub const STAGE_REQUIRED: &str = "Please set the deployment stage";
pub const VERSION_REQUIRED: &str = "Please set the artifact version";

/// Outcome of checking one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldCheck {
    Ok,
    Warning(String),
    Error(String),
}

impl FieldCheck {
    pub fn kind(&self) -> &'static str {
        match self {
            FieldCheck::Ok => "OK",
            FieldCheck::Warning(_) => "WARNING",
            FieldCheck::Error(_) => "ERROR",
        }
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            FieldCheck::Ok => None,
            FieldCheck::Warning(message) | FieldCheck::Error(message) => Some(message),
        }
    }

    pub fn is_ok(&self) -> bool {
        matches!(self, FieldCheck::Ok)
    }
}

/// A required field was missing or blank
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

fn require(value: Option<&str>, message: &str) -> FieldCheck {
    match value {
        Some(v) if !v.trim().is_empty() => FieldCheck::Ok,
        _ => FieldCheck::Error(message.to_string()),
    }
}

pub fn check_name(value: Option<&str>) -> FieldCheck {
    require(value, NAME_REQUIRED)
}

pub fn check_stage(value: Option<&str>) -> FieldCheck {
    require(value, STAGE_REQUIRED)
}

pub fn check_version(value: Option<&str>) -> FieldCheck {
    require(value, VERSION_REQUIRED)
}

fn ensure(field: &'static str, check: FieldCheck) -> Result<(), FieldError> {
    match check {
        FieldCheck::Error(message) => Err(FieldError { field, message }),
        _ => Ok(()),
    }
}

pub fn validate_publish(request: &PublishRequest) -> Result<(), FieldError> {
    ensure("name", check_name(Some(&request.name)))?;
    ensure("stage", check_stage(Some(&request.stage)))?;
    ensure("version", check_version(Some(&request.version)))
}

/// A push may omit the version, but one that is given must not be blank
pub fn validate_push(request: &PushRequest) -> Result<(), FieldError> {
    ensure("name", check_name(Some(&request.name)))?;
    ensure("stage", check_stage(Some(&request.stage)))?;
    match request.version.as_deref() {
        Some(version) => ensure("version", check_version(Some(version))),
        None => Ok(()),
    }
}
