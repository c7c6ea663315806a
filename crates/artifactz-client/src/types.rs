//! Wire payloads of the Artifactz API

use artifactz_api::{
    PublishRequest,
    PushRequest,
};
use serde::{
    Deserialize,
    Serialize,
};

#[derive(Debug, Serialize)]
pub(crate) struct PublishPayload<'a> {
    pub stage: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stage_description: Option<&'a str>,
    pub artifact_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flow: Option<&'a str>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub artifact_type: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub artifact_id: Option<&'a str>,
    pub version: &'a str,
}

/// Blank optionals are left off the wire
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

impl<'a> From<&'a PublishRequest> for PublishPayload<'a> {
    fn from(request: &'a PublishRequest) -> Self {
        Self {
            stage: &request.stage,
            stage_description: present(&request.stage_description),
            artifact_name: &request.name,
            artifact_description: present(&request.description),
            flow: present(&request.flow),
            artifact_type: present(&request.artifact_type),
            group_id: present(&request.group_id),
            artifact_id: present(&request.artifact_id),
            version: &request.version,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct PushPayload<'a> {
    pub stage: &'a str,
    pub artifact_name: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<&'a str>,
}

impl<'a> From<&'a PushRequest> for PushPayload<'a> {
    fn from(request: &'a PushRequest) -> Self {
        Self {
            stage: &request.stage,
            artifact_name: &request.name,
            version: request.version.as_deref(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct PushResponse {
    pub version: String,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorResponse {
    /// `error` wins when the registry sends both
    pub fn into_message(self) -> Option<String> {
        let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        non_blank(self.error).or(non_blank(self.message))
    }
}
