pub mod application;
pub mod domain;
pub mod host;
pub mod infrastructure;
pub mod logging;

use std::sync::Arc;

use artifactz_api::RegistryConnector;

pub use application::{
    ConnectionService,
    CredentialResolver,
    PublishService,
    PushService,
};
pub use domain::{
    Credentials,
    ExecutionFailure,
    ExecutionResult,
    FailureKind,
    StoredCredential,
};
pub use host::{
    ConsoleLogSink,
    FailureFlag,
    FailureSignal,
    HostCallbacks,
    LogLine,
    LogSink,
    MemoryLogSink,
    NoOpFailureSignal,
};
pub use infrastructure::config::{
    ArtifactzConfig,
    ConfigLoader,
    ConfigOverrides,
};
pub use infrastructure::{
    ChainedCredentialStore,
    CredentialStore,
    EnvCredentialStore,
    MemoryCredentialStore,
};

/// Services wired to one registry connector and credential store. Cheap to
/// share between concurrent host executions.
pub struct ArtifactzContext {
    pub credential_store: Arc<dyn CredentialStore>,

    pub publish_service: Arc<PublishService>,

    pub push_service: Arc<PushService>,

    pub connection_service: Arc<ConnectionService>,
}

impl ArtifactzContext {
    pub fn new(
        connector: Arc<dyn RegistryConnector>, credential_store: Arc<dyn CredentialStore>,
    ) -> Self {
        let resolver = CredentialResolver::new(credential_store.clone());

        Self {
            publish_service: Arc::new(PublishService::new(connector.clone(), resolver.clone())),
            push_service: Arc::new(PushService::new(connector.clone(), resolver.clone())),
            connection_service: Arc::new(ConnectionService::new(connector, resolver)),
            credential_store,
        }
    }
}
