use async_trait::async_trait;

use crate::error::ClientResult;
use crate::types::{
    ConnectionParams,
    PublishRequest,
    PushRequest,
};

/// Narrow view of the registry the orchestrators depend on
#[async_trait]
pub trait RegistryClient: Send + Sync {
    /// Record a new artifact version at a stage
    async fn publish_artifact(&self, request: &PublishRequest) -> ClientResult<()>;

    /// Move an artifact to a stage, returning the version the registry settled on
    async fn push_artifact(&self, request: &PushRequest) -> ClientResult<String>;

    /// Check that the server is reachable and accepts the token
    async fn validate(&self) -> ClientResult<()>;
}

/// Opens a client for a single invocation
pub trait RegistryConnector: Send + Sync {
    fn connect(&self, params: ConnectionParams) -> ClientResult<Box<dyn RegistryClient>>;
}
