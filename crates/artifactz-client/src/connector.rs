use artifactz_api::{
    ClientError,
    ClientResult,
    ConnectionParams,
    ProxyRoute,
    RegistryClient,
    RegistryConnector,
};
use reqwest::header::{
    HeaderMap,
    HeaderValue,
    ACCEPT,
    AUTHORIZATION,
};
use secrecy::ExposeSecret;

use crate::client::HttpRegistryClient;
use crate::config;

/// Opens reqwest-backed registry clients
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpConnector;

impl HttpConnector {
    pub fn build(&self, params: ConnectionParams) -> ClientResult<HttpRegistryClient> {
        install_crypto_provider();

        let server_url = config::normalize_server_url(&params.server_url)?;

        let mut auth_value =
            HeaderValue::from_str(&format!("Bearer {}", params.token.expose_secret()))
                .map_err(|e| ClientError::InvalidConfig(format!("Invalid token format: {e}")))?;
        auth_value.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth_value);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let sender = params
            .sender
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(config::DEFAULT_SENDER);

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(sender)
            .timeout(params.timeout)
            .connect_timeout(params.connect_timeout);

        if let Some(route) = &params.proxy {
            builder = builder.proxy(build_proxy(route)?);
            tracing::debug!(proxy = %route.url, "Routing registry traffic through proxy");
        }

        let http_client = builder
            .build()
            .map_err(|e| ClientError::InvalidConfig(format!("Failed to build HTTP client: {e}")))?;

        Ok(HttpRegistryClient::new(
            http_client,
            server_url,
            params.retry_policy,
        ))
    }
}

impl RegistryConnector for HttpConnector {
    fn connect(&self, params: ConnectionParams) -> ClientResult<Box<dyn RegistryClient>> {
        Ok(Box::new(self.build(params)?))
    }
}

fn build_proxy(route: &ProxyRoute) -> ClientResult<reqwest::Proxy> {
    let proxy = reqwest::Proxy::all(route.url.as_str())
        .map_err(|e| ClientError::InvalidConfig(format!("Invalid proxy URL: {e}")))?;

    Ok(match &route.credentials {
        Some(credentials) => {
            proxy.basic_auth(&credentials.username, credentials.password.expose_secret())
        }
        None => proxy,
    })
}

/// reqwest is built without a default TLS provider; the first caller installs
/// ring. Later calls find it already installed.
fn install_crypto_provider() {
    let _ = rustls::crypto::ring::default_provider().install_default();
}
