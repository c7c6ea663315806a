use std::sync::Arc;

use artifactz_api::RegistryConnector;

use crate::application::CredentialResolver;
use crate::domain::{
    ExecutionFailure,
    ExecutionResult,
    FailureKind,
};
use crate::infrastructure::config::ArtifactzConfig;

pub const CONNECTION_OK: &str = "Connection test successful";
pub const SERVER_URL_REQUIRED: &str = "Server URL is required";
pub const CONNECTION_NEEDS_CREDENTIALS: &str =
    "Cannot validate connection without proper credentials";

/// Checks a configuration against the live registry. Outcomes are returned
/// for the host to display; the host execution is never failed from here.
pub struct ConnectionService {
    connector: Arc<dyn RegistryConnector>,
    resolver: CredentialResolver,
}

impl ConnectionService {
    pub fn new(connector: Arc<dyn RegistryConnector>, resolver: CredentialResolver) -> Self {
        Self {
            connector,
            resolver,
        }
    }

    pub async fn test_connection(&self, config: &ArtifactzConfig) -> ExecutionResult<&'static str> {
        if config.server_url().is_empty() {
            return Err(ExecutionFailure::new(
                FailureKind::Validation,
                SERVER_URL_REQUIRED,
            ));
        }

        let credentials = self.resolver.resolve(config).await.map_err(|e| {
            tracing::debug!(error = %e, "No usable credentials for connection test");
            ExecutionFailure::new(e.kind(), CONNECTION_NEEDS_CREDENTIALS).with_source(e)
        })?;

        let result = match self.connector.connect(config.connection_params(credentials)) {
            Ok(client) => client.validate().await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                tracing::info!(server_url = %config.server_url(), "Connection test passed");
                Ok(CONNECTION_OK)
            }
            Err(e) => {
                tracing::warn!(
                    server_url = %config.server_url(),
                    error = %e,
                    "Connection test failed"
                );
                Err(ExecutionFailure::registry(e))
            }
        }
    }
}
