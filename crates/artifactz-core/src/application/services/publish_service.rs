use std::sync::Arc;

use artifactz_api::validation::validate_publish;
use artifactz_api::{
    PublishRequest,
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

pub const PUBLISHED: &str = "Successfully published artifact";

pub struct PublishService {
    connector: Arc<dyn RegistryConnector>,
    resolver: CredentialResolver,
}

impl PublishService {
    pub fn new(connector: Arc<dyn RegistryConnector>, resolver: CredentialResolver) -> Self {
        Self {
            connector,
            resolver,
        }
    }

    /// Records a new artifact version at a stage. Exactly one registry call is
    /// made, and only once the request and credentials check out.
    pub async fn publish(
        &self, request: &PublishRequest, config: &ArtifactzConfig, host: HostCallbacks<'_>,
    ) -> ExecutionResult<()> {
        if let Err(e) = validate_publish(request) {
            let failure = ExecutionFailure::validation(e);
            let line = failure.message().to_string();
            return Err(report_failure(host, "publish", &line, failure));
        }

        host.sink.info(&format!(
            "Publishing artifact '{}' at the stage '{}'",
            request.name, request.stage
        ));

        let credentials = match self.resolver.resolve(config).await {
            Ok(credentials) => credentials,
            Err(failure) => {
                let line = failure.message().to_string();
                return Err(report_failure(host, "publish", &line, failure));
            }
        };

        let result = match self.connector.connect(config.connection_params(credentials)) {
            Ok(client) => client.publish_artifact(request).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(()) => {
                tracing::info!(
                    artifact = %request.name,
                    stage = %request.stage,
                    version = %request.version,
                    "Artifact published"
                );
                host.sink.info(PUBLISHED);
                Ok(())
            }
            Err(e) => {
                let failure = ExecutionFailure::registry(e);
                let line = format!("Error while publishing artifact: {}", failure.message());
                Err(report_failure(host, "publish", &line, failure))
            }
        }
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
        LogLine,
        MemoryLogSink,
    };
    use crate::infrastructure::MemoryCredentialStore;

    fn service(connector: &Arc<StubConnector>) -> PublishService {
        PublishService::new(connector.clone(), resolver())
    }

    fn request() -> PublishRequest {
        PublishRequest::new("test-artifact", "Development", "1.0.0")
            .with_description("Test artifact")
            .with_type("JAR")
            .with_coordinates("io.iktech.test", "test-artifact")
    }

    #[tokio::test]
    async fn test_publish_success() {
        let connector = Arc::new(StubConnector::succeeding("1.0.0"));
        let sink = MemoryLogSink::new();
        let flag = FailureFlag::new();

        let result = service(&connector)
            .publish(
                &request(),
                &config(Some("test")),
                HostCallbacks::new(&sink, &flag),
            )
            .await;

        assert!(result.is_ok());
        assert_eq!(
            sink.lines(),
            vec![
                LogLine::Info(
                    "Publishing artifact 'test-artifact' at the stage 'Development'".to_string()
                ),
                LogLine::Info("Successfully published artifact".to_string()),
            ]
        );
        assert!(!flag.is_failed());
        assert_eq!(connector.calls.publishes.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_publish_requires_name_stage_and_version() {
        let cases = [
            (PublishRequest::new("", "Development", "1.0.0"), "Please set an artifact name"),
            (PublishRequest::new("test-artifact", "", "1.0.0"), "Please set the deployment stage"),
            (PublishRequest::new("test-artifact", "Development", " "), "Please set the artifact version"),
        ];

        for (request, message) in cases {
            let connector = Arc::new(StubConnector::succeeding("1.0.0"));
            let sink = MemoryLogSink::new();
            let flag = FailureFlag::new();

            let err = service(&connector)
                .publish(&request, &config(Some("test")), HostCallbacks::new(&sink, &flag))
                .await
                .unwrap_err();

            assert_eq!(err.kind(), FailureKind::Validation);
            assert_eq!(err.message(), message);
            assert_eq!(sink.fatal_lines(), vec![message.to_string()]);
            assert_eq!(flag.count(), 1);
            assert_eq!(connector.calls.connects.load(Ordering::SeqCst), 0);
            assert_eq!(connector.calls.network_calls(), 0);
        }
    }

    #[tokio::test]
    async fn test_publish_without_credentials_id() {
        let connector = Arc::new(StubConnector::succeeding("1.0.0"));
        let sink = MemoryLogSink::new();
        let flag = FailureFlag::new();

        let err = service(&connector)
            .publish(&request(), &config(None), HostCallbacks::new(&sink, &flag))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::CredentialsMissing);
        assert_eq!(
            sink.fatal_lines(),
            vec!["Artifactz access credentials are not defined. Cannot continue.".to_string()]
        );
        assert_eq!(flag.count(), 1);
        assert_eq!(connector.calls.network_calls(), 0);
    }

    #[tokio::test]
    async fn test_publish_with_unknown_credentials() {
        let connector = Arc::new(StubConnector::succeeding("1.0.0"));
        let sink = MemoryLogSink::new();
        let flag = FailureFlag::new();

        let err = service(&connector)
            .publish(
                &request(),
                &config(Some("unknown")),
                HostCallbacks::new(&sink, &flag),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::CredentialsNotFound);
        assert!(sink.contains("Could not find specified credentials"));
        assert_eq!(connector.calls.network_calls(), 0);
    }

    #[tokio::test]
    async fn test_publish_with_blank_secret_from_config() {
        let config = crate::infrastructure::config::ConfigLoader::parse(
            r#"
            [server]
            url = "http://localhost:5002"
            credentials_id = "test"

            [credentials.test]
            secret = "${ARTIFACTZ_TEST_PUBLISH_UNSET_TOKEN:-}"
            "#,
        )
        .unwrap();
        let store = MemoryCredentialStore::from_config(&config).unwrap();
        let connector = Arc::new(StubConnector::succeeding("1.0.0"));
        let service = PublishService::new(
            connector.clone(),
            CredentialResolver::new(Arc::new(store)),
        );
        let sink = MemoryLogSink::new();
        let flag = FailureFlag::new();

        let err = service
            .publish(&request(), &config, HostCallbacks::new(&sink, &flag))
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::CredentialsNotFound);
        assert_eq!(flag.count(), 1);
        assert_eq!(connector.calls.connects.load(Ordering::SeqCst), 0);
        assert_eq!(connector.calls.network_calls(), 0);
    }

    #[tokio::test]
    async fn test_publish_registry_error() {
        let connector = Arc::new(StubConnector::failing(ClientError::Rejected(
            "Test error message".to_string(),
        )));
        let sink = MemoryLogSink::new();
        let flag = FailureFlag::new();

        let err = service(&connector)
            .publish(
                &request(),
                &config(Some("test")),
                HostCallbacks::new(&sink, &flag),
            )
            .await
            .unwrap_err();

        assert_eq!(err.kind(), FailureKind::Registry);
        assert_eq!(err.message(), "Test error message");
        assert_eq!(
            sink.fatal_lines(),
            vec!["Error while publishing artifact: Test error message".to_string()]
        );
        assert_eq!(flag.count(), 1);
        assert_eq!(flag.last_message().as_deref(), Some("Test error message"));
    }

    #[tokio::test]
    async fn test_repeated_publish_is_independent() {
        let connector = Arc::new(StubConnector::succeeding("1.0.0"));
        let service = service(&connector);
        let config = config(Some("test"));
        let flag = FailureFlag::new();

        let first_sink = MemoryLogSink::new();
        let second_sink = MemoryLogSink::new();
        let first = service
            .publish(&request(), &config, HostCallbacks::new(&first_sink, &flag))
            .await;
        let second = service
            .publish(&request(), &config, HostCallbacks::new(&second_sink, &flag))
            .await;

        assert!(first.is_ok());
        assert!(second.is_ok());
        assert_eq!(connector.calls.connects.load(Ordering::SeqCst), 2);
        assert_eq!(connector.calls.publishes.load(Ordering::SeqCst), 2);
        assert_eq!(first_sink.lines(), second_sink.lines());
        assert!(!flag.is_failed());
    }
}
