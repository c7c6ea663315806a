//! Artifactz API client and methods

use artifactz_api::{
    ClientError,
    ClientResult,
    PublishRequest,
    PushRequest,
    RegistryClient,
    RetryPolicy,
};
use async_trait::async_trait;
use reqwest::{
    Client,
    Response,
};
use serde::Serialize;

use crate::{
    config,
    mapper,
    types,
};

/// Registry client bound to one server and one token
pub struct HttpRegistryClient {
    client: Client,
    server_url: String,
    retry_policy: RetryPolicy,
}

impl HttpRegistryClient {
    /// `client` is expected to carry the authorization header already
    pub fn new(client: Client, server_url: String, retry_policy: RetryPolicy) -> Self {
        Self {
            client,
            server_url,
            retry_policy,
        }
    }

    pub fn server_url(&self) -> &str {
        &self.server_url
    }

    async fn put_json<B: Serialize + Sync>(&self, path: &str, body: &B) -> ClientResult<Response> {
        let url = config::endpoint(&self.server_url, path);
        let url = url.as_str();
        let client = &self.client;

        tracing::debug!(url, "Sending registry request");

        let response = self
            .retry_policy
            .retry(|| async move {
                client
                    .put(url)
                    .json(body)
                    .send()
                    .await
                    .map_err(mapper::map_transport_error)
            })
            .await?;

        ensure_success(response).await
    }
}

async fn ensure_success(response: Response) -> ClientResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    tracing::warn!(status = status.as_u16(), "Registry rejected request");
    Err(mapper::map_error_response(status, &body))
}

#[async_trait]
impl RegistryClient for HttpRegistryClient {
    async fn publish_artifact(&self, request: &PublishRequest) -> ClientResult<()> {
        let payload = types::PublishPayload::from(request);
        self.put_json(config::PUBLISH_PATH, &payload).await?;

        tracing::info!(
            artifact = %request.name,
            stage = %request.stage,
            version = %request.version,
            "Published artifact version"
        );
        Ok(())
    }

    async fn push_artifact(&self, request: &PushRequest) -> ClientResult<String> {
        let payload = types::PushPayload::from(request);
        let response = self.put_json(config::PUSH_PATH, &payload).await?;

        let body = response
            .text()
            .await
            .map_err(|e| ClientError::InvalidResponse(format!("Failed to read response: {e}")))?;
        let pushed: types::PushResponse = serde_json::from_str(&body)?;
        if pushed.version.trim().is_empty() {
            return Err(ClientError::InvalidResponse(
                "Registry returned an empty version".to_string(),
            ));
        }

        tracing::info!(
            artifact = %request.name,
            stage = %request.stage,
            version = %pushed.version,
            "Pushed artifact version"
        );
        Ok(pushed.version)
    }

    async fn validate(&self) -> ClientResult<()> {
        let url = config::endpoint(&self.server_url, config::VALIDATE_PATH);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(mapper::map_transport_error)?;

        let status = response.status();
        if status == reqwest::StatusCode::OK {
            Ok(())
        } else {
            Err(ClientError::UnexpectedStatus(status.as_u16()))
        }
    }
}
