use std::sync::Arc;

use artifactz_api::validation::validate_push;
use artifactz_api::{
    PushRequest,
    RegistryConnector,
};

use super::report_failure;
use crate::application::CredentialResolver;
use crate::domain::{
    ExecutionFailure,
    ExecutionResult,
};
use crate::host::HostCallbacks;
use crate::infrastructure::config::ArtifactzConfig;

pub struct PushService {
    connector: Arc<dyn RegistryConnector>,
    resolver: CredentialResolver,
}

impl PushService {
    pub fn new(connector: Arc<dyn RegistryConnector>, resolver: CredentialResolver) -> Self {
        Self {
            connector,
            resolver,
        }
    }

    /// Moves an artifact to a stage and returns the version the registry
    /// recorded there
    pub async fn push(
        &self, request: &PushRequest, config: &ArtifactzConfig, host: HostCallbacks<'_>,
    ) -> ExecutionResult<String> {
        if let Err(e) = validate_push(request) {
            let failure = ExecutionFailure::validation(e);
            let line = failure.message().to_string();
            return Err(report_failure(host, "push", &line, failure));
        }

        host.sink.info(&start_line(request));

        let credentials = match self.resolver.resolve(config).await {
            Ok(credentials) => credentials,
            Err(failure) => {
                let line = failure.message().to_string();
                return Err(report_failure(host, "push", &line, failure));
            }
        };

        let result = match self.connector.connect(config.connection_params(credentials)) {
            Ok(client) => client.push_artifact(request).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(version) => {
                tracing::info!(
                    artifact = %request.name,
                    stage = %request.stage,
                    version = %version,
                    "Artifact pushed"
                );
                host.sink
                    .info(&format!("Successfully pushed artifact version '{version}'"));
                Ok(version)
            }
            Err(e) => {
                let failure = ExecutionFailure::registry(e);
                let line = failure.message().to_string();
                Err(report_failure(host, "push", &line, failure))
            }
        }
    }
}

fn start_line(request: &PushRequest) -> String {
    match request.version.as_deref() {
        Some(version) => format!(
            "Pushing artifact '{}' version '{}' to the stage '{}'",
            request.name, version, request.stage
        ),
        None => format!(
            "Pushing artifact '{}' to the stage '{}'",
            request.name, request.stage
        ),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use artifactz_api::ClientError;

    use super::*;
    use crate::application::services::test_support::{
        config,
        resolver,
        StubConnector,
    };
    use crate::domain::FailureKind;
    use crate::host::{
        FailureFlag,
        MemoryLogSink,
    };

    fn service(connector: &Arc<StubConnector>) -> PushService {
        PushService::new(connector.clone(), resolver())
    }

    #[tokio::test]
    async fn test_push_returns_registry_version() {
        let connector = Arc::new(StubConnector::succeeding("1.0.1"));
        let sink = MemoryLogSink::new();
        let flag = FailureFlag::new();

        let version = service(&connector)
            .push(
                &PushRequest::new("test-artifact", "Development"),
                &config(Some("test")),
                HostCallbacks::new(&sink, &flag),
            )
            .await
            .unwrap();

        assert_eq!(version, "1.0.1");
        assert!(sink.contains("Pushing artifact 'test-artifact' to the stage 'Development'"));
        assert!(sink.contains("Successfully pushed artifact version '1.0.1'"));
        assert!(!flag.is_failed());
        assert_eq!(
            connector.calls.last_push.lock().unwrap().as_ref(),
            Some(&PushRequest::new("test-artifact", "Development"))
        );
    }

    #[tokio::test]
    async fn test_push_registry_error() {
        let connector = Arc::new(StubConnector::failing(ClientError::Rejected(
            "Test error message".to_string(),
        )));
        let sink = MemoryLogSink::new();
        let flag = FailureFlag::new();

        let err = service(&connector)
            .push(
                &PushRequest::new("test-artifact", "Development").with_version("1.0.0"),
                &config(Some("test")),
                HostCallbacks::new(&sink, &flag),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::Registry);
        assert_eq!(err.message(), "Test error message");
        assert_eq!(err.client_error().map(|e| e.is_transient()), Some(false));
        assert!(sink
            .fatal_lines()
            .iter()
            .any(|line| line.contains("Test error message")));
        assert_eq!(sink.fatal_lines().len(), 1);
        assert_eq!(flag.count(), 1);
        assert!(sink.contains("version '1.0.0' to the stage 'Development'"));
    }

    #[tokio::test]
    async fn test_push_rejects_blank_fields() {
        let cases = [
            PushRequest::new("", "Development"),
            PushRequest::new("test-artifact", ""),
            PushRequest::new("test-artifact", "Development").with_version(""),
        ];

        for request in cases {
            let connector = Arc::new(StubConnector::succeeding("1.0.1"));
            let sink = MemoryLogSink::new();
            let flag = FailureFlag::new();

            let err = service(&connector)
                .push(&request, &config(Some("test")), HostCallbacks::new(&sink, &flag))
                .await
                .unwrap_err();

            assert_eq!(err.kind(), FailureKind::Validation);
            assert_eq!(flag.count(), 1);
            assert_eq!(connector.calls.network_calls(), 0);
        }
    }

    #[tokio::test]
    async fn test_push_credential_failures() {
        let connector = Arc::new(StubConnector::succeeding("1.0.1"));
        let service = service(&connector);
        let request = PushRequest::new("test-artifact", "Development");

        let sink = MemoryLogSink::new();
        let flag = FailureFlag::new();
        let err = service
            .push(&request, &config(Some("")), HostCallbacks::new(&sink, &flag))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::CredentialsMissing);
        assert!(sink.fatal_lines()[0].starts_with("Artifactz access credentials are not defined"));

        let sink = MemoryLogSink::new();
        let flag = FailureFlag::new();
        let err = service
            .push(&request, &config(Some("unknown")), HostCallbacks::new(&sink, &flag))
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::CredentialsNotFound);
        assert!(sink.fatal_lines()[0].starts_with("Could not find specified credentials"));
        assert_eq!(flag.count(), 1);

        assert_eq!(connector.calls.network_calls(), 0);
    }

    #[tokio::test]
    async fn test_connect_error_is_a_registry_failure() {
        struct BrokenConnector;

        impl RegistryConnector for BrokenConnector {
            fn connect(
                &self, _params: artifactz_api::ConnectionParams,
            ) -> artifactz_api::ClientResult<Box<dyn artifactz_api::RegistryClient>> {
                Err(ClientError::InvalidConfig("Server URL is required".to_string()))
            }
        }

        let sink = MemoryLogSink::new();
        let flag = FailureFlag::new();
        let err = PushService::new(Arc::new(BrokenConnector), resolver())
            .push(
                &PushRequest::new("test-artifact", "Development"),
                &config(Some("test")),
                HostCallbacks::new(&sink, &flag),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::Registry);
        assert!(err.message().contains("Server URL is required"));
        assert_eq!(flag.count(), 1);
    }
}
