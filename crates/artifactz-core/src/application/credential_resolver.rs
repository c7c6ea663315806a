use std::sync::Arc;

use artifactz_api::{
    ProxyCredentials,
    ProxyRoute,
};
use secrecy::ExposeSecret;

use crate::domain::error::{
    CREDENTIALS_NOT_FOUND,
    PROXY_CREDENTIALS_NOT_FOUND,
};
use crate::domain::{
    Credentials,
    ExecutionFailure,
    ExecutionResult,
    StoredCredential,
};
use crate::infrastructure::config::ArtifactzConfig;
use crate::infrastructure::CredentialStore;

/// Turns the credential identifiers of a config into usable secrets
#[derive(Clone)]
pub struct CredentialResolver {
    store: Arc<dyn CredentialStore>,
}

impl CredentialResolver {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// The registry token must be a secret-text credential. A configured
    /// proxy credential must be a username and password.
    pub async fn resolve(&self, config: &ArtifactzConfig) -> ExecutionResult<Credentials> {
        let credentials_id = config
            .credentials_id()
            .ok_or_else(ExecutionFailure::credentials_missing)?;

        let token = match self.lookup(credentials_id, CREDENTIALS_NOT_FOUND).await? {
            Some(StoredCredential::Secret(secret))
                if !secret.expose_secret().trim().is_empty() =>
            {
                secret
            }
            Some(credential) => {
                tracing::debug!(
                    credentials_id,
                    ?credential,
                    "Credential is blank or not a secret, cannot use it as a token"
                );
                return Err(ExecutionFailure::credentials_not_found(CREDENTIALS_NOT_FOUND));
            }
            None => return Err(ExecutionFailure::credentials_not_found(CREDENTIALS_NOT_FOUND)),
        };

        let proxy = match config.proxy() {
            Some(proxy) => Some(ProxyRoute {
                url: proxy.url.trim().to_string(),
                credentials: self.resolve_proxy_credentials(config).await?,
            }),
            None => None,
        };

        tracing::debug!(
            credentials_id,
            proxy = proxy.is_some(),
            "Resolved credentials"
        );

        Ok(Credentials { token, proxy })
    }

    async fn resolve_proxy_credentials(
        &self, config: &ArtifactzConfig,
    ) -> ExecutionResult<Option<ProxyCredentials>> {
        let Some(proxy_credentials_id) = config.proxy_credentials_id() else {
            return Ok(None);
        };

        match self
            .lookup(proxy_credentials_id, PROXY_CREDENTIALS_NOT_FOUND)
            .await?
        {
            Some(StoredCredential::UsernamePassword { username, password })
                if !password.expose_secret().is_empty() =>
            {
                Ok(Some(ProxyCredentials { username, password }))
            }
            _ => Err(ExecutionFailure::credentials_not_found(
                PROXY_CREDENTIALS_NOT_FOUND,
            )),
        }
    }

    async fn lookup(
        &self, id: &str, not_found_message: &str,
    ) -> ExecutionResult<Option<StoredCredential>> {
        self.store.find(id).await.map_err(|e| {
            tracing::warn!(credentials_id = id, error = %e, "Credential lookup failed");
            ExecutionFailure::credentials_not_found(not_found_message).with_source(e)
        })
    }
}
