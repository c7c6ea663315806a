use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

use artifactz_api::{
    ConnectionParams,
    RetryPolicy,
};
use serde::Deserialize;

use crate::domain::Credentials;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_MAX_ATTEMPTS: usize = 3;
pub const DEFAULT_RETRY_DELAY_MS: u64 = 200;

/// Settings for one invocation, read once by the caller and passed in
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ArtifactzConfig {
    pub server: ServerConfig,
    pub proxy: Option<ProxyConfig>,
    pub credentials: BTreeMap<String, CredentialEntry>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub url: String,
    pub credentials_id: Option<String>,
    /// Identifies the caller to the registry
    pub sender: Option<String>,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Attempts per request, transport errors only
    pub max_attempts: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            credentials_id: None,
            sender: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProxyConfig {
    pub url: String,
    pub credentials_id: Option<String>,
}

/// A credential declared inline in the config file, normally through
/// `${ENV}` references
#[derive(Clone, Default, Deserialize)]
#[serde(default)]
pub struct CredentialEntry {
    pub secret: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
}

impl fmt::Debug for CredentialEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialEntry")
            .field("secret", &self.secret.as_ref().map(|_| "[REDACTED]"))
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

/// Values supplied by the host on top of the file, e.g. command-line flags
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub server_url: Option<String>,
    pub credentials_id: Option<String>,
    pub sender: Option<String>,
    pub proxy: Option<String>,
    pub proxy_credentials_id: Option<String>,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

impl ArtifactzConfig {
    pub fn server_url(&self) -> &str {
        self.server.url.trim()
    }

    pub fn credentials_id(&self) -> Option<&str> {
        non_blank(self.server.credentials_id.as_deref())
    }

    /// The proxy, unless its URL is blank
    pub fn proxy(&self) -> Option<&ProxyConfig> {
        self.proxy
            .as_ref()
            .filter(|proxy| !proxy.url.trim().is_empty())
    }

    pub fn proxy_credentials_id(&self) -> Option<&str> {
        self.proxy()
            .and_then(|proxy| non_blank(proxy.credentials_id.as_deref()))
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.server.max_attempts,
            Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
            true,
        )
    }

    pub fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(url) = overrides.server_url {
            self.server.url = url;
        }
        if let Some(id) = overrides.credentials_id {
            self.server.credentials_id = Some(id);
        }
        if let Some(sender) = overrides.sender {
            self.server.sender = Some(sender);
        }
        if let Some(url) = overrides.proxy {
            self.proxy.get_or_insert_with(ProxyConfig::default).url = url;
        }
        if let Some(id) = overrides.proxy_credentials_id {
            self.proxy
                .get_or_insert_with(ProxyConfig::default)
                .credentials_id = Some(id);
        }
    }

    pub fn connection_params(&self, credentials: Credentials) -> ConnectionParams {
        let mut params = ConnectionParams::new(self.server_url(), credentials.token);
        params.proxy = credentials.proxy;
        params.sender = self.server.sender.clone();
        params.timeout = Duration::from_secs(self.server.timeout_secs);
        params.connect_timeout = Duration::from_secs(self.server.connect_timeout_secs);
        params.retry_policy = self.retry_policy();
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_values_count_as_unset() {
        let mut config = ArtifactzConfig::default();
        config.server.credentials_id = Some("  ".to_string());
        config.proxy = Some(ProxyConfig {
            url: String::new(),
            credentials_id: Some("proxy-test".to_string()),
        });

        assert_eq!(config.credentials_id(), None);
        assert!(config.proxy().is_none());
        assert_eq!(config.proxy_credentials_id(), None);
    }

    #[test]
    fn test_overrides_replace_file_values() {
        let mut config = ArtifactzConfig::default();
        config.server.url = "http://from-file".to_string();

        config.apply_overrides(ConfigOverrides {
            server_url: Some("http://localhost:5002".to_string()),
            credentials_id: Some("test".to_string()),
            proxy: Some("http://proxy.iktech.io:3128".to_string()),
            proxy_credentials_id: Some("proxy-test".to_string()),
            ..ConfigOverrides::default()
        });

        assert_eq!(config.server_url(), "http://localhost:5002");
        assert_eq!(config.credentials_id(), Some("test"));
        assert_eq!(
            config.proxy().map(|p| p.url.as_str()),
            Some("http://proxy.iktech.io:3128")
        );
        assert_eq!(config.proxy_credentials_id(), Some("proxy-test"));
    }

    #[test]
    fn test_connection_params_carry_timeouts() {
        let mut config = ArtifactzConfig::default();
        config.server.url = " http://localhost:5002 ".to_string();
        config.server.timeout_secs = 5;
        config.server.sender = Some("ci-bot".to_string());

        let params = config.connection_params(Credentials {
            token: "token".into(),
            proxy: None,
        });

        assert_eq!(params.server_url, "http://localhost:5002");
        assert_eq!(params.timeout, Duration::from_secs(5));
        assert_eq!(params.sender.as_deref(), Some("ci-bot"));
        assert_eq!(params.retry_policy.max_attempts, DEFAULT_MAX_ATTEMPTS);
    }

    #[test]
    fn test_credential_entry_debug_is_redacted() {
        let entry = CredentialEntry {
            secret: Some("s3cr3t".to_string()),
            ..CredentialEntry::default()
        };
        let rendered = format!("{entry:?}");
        assert!(!rendered.contains("s3cr3t"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
