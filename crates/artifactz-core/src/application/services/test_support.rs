use std::sync::atomic::{
    AtomicUsize,
    Ordering,
};
use std::sync::{
    Arc,
    Mutex,
};

use artifactz_api::{
    ClientError,
    ClientResult,
    ConnectionParams,
    PublishRequest,
    PushRequest,
    RegistryClient,
    RegistryConnector,
};
use async_trait::async_trait;

use crate::application::CredentialResolver;
use crate::domain::StoredCredential;
use crate::infrastructure::config::ArtifactzConfig;
use crate::infrastructure::MemoryCredentialStore;

#[derive(Default)]
pub struct StubCalls {
    pub connects: AtomicUsize,
    pub publishes: AtomicUsize,
    pub pushes: AtomicUsize,
    pub validations: AtomicUsize,
    pub last_push: Mutex<Option<PushRequest>>,
}

impl StubCalls {
    pub fn network_calls(&self) -> usize {
        self.publishes.load(Ordering::SeqCst)
            + self.pushes.load(Ordering::SeqCst)
            + self.validations.load(Ordering::SeqCst)
    }
}

/// Connector whose clients answer every call with the same outcome
pub struct StubConnector {
    pub calls: Arc<StubCalls>,
    outcome: Result<String, ClientError>,
}

impl StubConnector {
    pub fn succeeding(version: &str) -> Self {
        Self {
            calls: Arc::new(StubCalls::default()),
            outcome: Ok(version.to_string()),
        }
    }

    pub fn failing(error: ClientError) -> Self {
        Self {
            calls: Arc::new(StubCalls::default()),
            outcome: Err(error),
        }
    }
}

impl RegistryConnector for StubConnector {
    fn connect(&self, _params: ConnectionParams) -> ClientResult<Box<dyn RegistryClient>> {
        self.calls.connects.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(StubClient {
            calls: Arc::clone(&self.calls),
            outcome: self.outcome.clone(),
        }))
    }
}

struct StubClient {
    calls: Arc<StubCalls>,
    outcome: Result<String, ClientError>,
}

#[async_trait]
impl RegistryClient for StubClient {
    async fn publish_artifact(&self, _request: &PublishRequest) -> ClientResult<()> {
        self.calls.publishes.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone().map(|_| ())
    }

    async fn push_artifact(&self, request: &PushRequest) -> ClientResult<String> {
        self.calls.pushes.fetch_add(1, Ordering::SeqCst);
        *self.calls.last_push.lock().unwrap() = Some(request.clone());
        self.outcome.clone()
    }

    async fn validate(&self) -> ClientResult<()> {
        self.calls.validations.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone().map(|_| ())
    }
}

pub fn resolver() -> CredentialResolver {
    let mut credentials = std::collections::HashMap::new();
    credentials.insert("test".to_string(), StoredCredential::secret("token"));
    CredentialResolver::new(Arc::new(MemoryCredentialStore::with_credentials(
        credentials,
    )))
}

pub fn config(credentials_id: Option<&str>) -> ArtifactzConfig {
    let mut config = ArtifactzConfig::default();
    config.server.url = "http://localhost:5002".to_string();
    config.server.credentials_id = credentials_id.map(str::to_string);
    config
}
