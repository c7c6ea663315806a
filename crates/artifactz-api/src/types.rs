use std::time::Duration;

use secrecy::SecretString;
use serde::{
    Deserialize,
    Serialize,
};

use crate::utils::RetryPolicy;

/// Registers a new artifact version at a stage, with its full metadata
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishRequest {
    pub name: String,
    pub description: Option<String>,
    /// Artifact kind label, e.g. "JAR" or "DockerImage"
    #[serde(rename = "type")]
    pub artifact_type: Option<String>,
    pub group_id: Option<String>,
    pub artifact_id: Option<String>,
    pub flow: Option<String>,
    pub stage: String,
    pub stage_description: Option<String>,
    pub version: String,
}

impl PublishRequest {
    pub fn new(
        name: impl Into<String>, stage: impl Into<String>, version: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            stage: stage.into(),
            version: version.into(),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = non_empty(description.into());
        self
    }

    pub fn with_type(mut self, artifact_type: impl Into<String>) -> Self {
        self.artifact_type = non_empty(artifact_type.into());
        self
    }

    pub fn with_coordinates(
        mut self, group_id: impl Into<String>, artifact_id: impl Into<String>,
    ) -> Self {
        self.group_id = non_empty(group_id.into());
        self.artifact_id = non_empty(artifact_id.into());
        self
    }

    pub fn with_flow(mut self, flow: impl Into<String>) -> Self {
        self.flow = non_empty(flow.into());
        self
    }

    pub fn with_stage_description(mut self, stage_description: impl Into<String>) -> Self {
        self.stage_description = non_empty(stage_description.into());
        self
    }
}

/// Advances an existing artifact to a stage. Without a version the registry
/// derives the next one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushRequest {
    pub name: String,
    pub stage: String,
    pub version: Option<String>,
}

impl PushRequest {
    pub fn new(name: impl Into<String>, stage: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stage: stage.into(),
            version: None,
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }
}

#[derive(Debug)]
pub struct ProxyCredentials {
    pub username: String,
    pub password: SecretString,
}

/// Proxy the registry traffic is routed through
#[derive(Debug)]
pub struct ProxyRoute {
    pub url: String,
    pub credentials: Option<ProxyCredentials>,
}

/// Everything a connector needs to open a client for one invocation
#[derive(Debug)]
pub struct ConnectionParams {
    pub server_url: String,
    pub token: SecretString,
    pub proxy: Option<ProxyRoute>,
    /// Sent as the HTTP user agent
    pub sender: Option<String>,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub retry_policy: RetryPolicy,
}

impl ConnectionParams {
    pub fn new(server_url: impl Into<String>, token: SecretString) -> Self {
        Self {
            server_url: server_url.into(),
            token,
            proxy: None,
            sender: None,
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            retry_policy: RetryPolicy::default(),
        }
    }
}

pub(crate) fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
