use std::collections::HashMap;
use std::sync::{
    Arc,
    RwLock,
};

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::StoredCredential;
use crate::infrastructure::config::ArtifactzConfig;

#[derive(Debug, Error)]
pub enum CredentialStoreError {
    #[error("Lock poisoned: {0}")]
    LockPoisoned(String),

    #[error("Invalid credential entry '{0}': needs a secret or a username and password")]
    InvalidEntry(String),

    #[error("Operation not supported: {0}")]
    NotSupported(String),
}

pub type CredentialStoreResult<T> = Result<T, CredentialStoreError>;

/// Credentials addressed by identifier, owned by the host
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find(&self, id: &str) -> CredentialStoreResult<Option<StoredCredential>>;

    async fn store(&self, _id: &str, _credential: StoredCredential) -> CredentialStoreResult<()> {
        Err(CredentialStoreError::NotSupported(
            "This credential store is read-only".into(),
        ))
    }
}

pub struct MemoryCredentialStore {
    credentials: RwLock<HashMap<String, StoredCredential>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self {
            credentials: RwLock::new(HashMap::new()),
        }
    }

    pub fn with_credentials(credentials: HashMap<String, StoredCredential>) -> Self {
        Self {
            credentials: RwLock::new(credentials),
        }
    }

    /// Builds a store from the `[credentials.<id>]` tables of a config
    pub fn from_config(config: &ArtifactzConfig) -> CredentialStoreResult<Self> {
        let mut credentials = HashMap::with_capacity(config.credentials.len());

        for (id, entry) in &config.credentials {
            let credential = match (&entry.secret, &entry.username, &entry.password) {
                (Some(secret), None, None) => (!secret.trim().is_empty())
                    .then(|| StoredCredential::secret(secret.as_str())),
                (None, Some(username), Some(password)) => {
                    (!username.trim().is_empty() && !password.is_empty()).then(|| {
                        StoredCredential::username_password(username.as_str(), password.as_str())
                    })
                }
                _ => return Err(CredentialStoreError::InvalidEntry(id.clone())),
            };

            // Blank values usually come from an unset `${VAR:-}`; later stores may
            // still know the id.
            match credential {
                Some(credential) => {
                    credentials.insert(id.clone(), credential);
                }
                None => tracing::debug!(credentials_id = %id, "Skipping blank credential entry"),
            }
        }

        Ok(Self::with_credentials(credentials))
    }
}

impl Default for MemoryCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find(&self, id: &str) -> CredentialStoreResult<Option<StoredCredential>> {
        let credentials = self
            .credentials
            .read()
            .map_err(|e| CredentialStoreError::LockPoisoned(e.to_string()))?;
        Ok(credentials.get(id).cloned())
    }

    async fn store(&self, id: &str, credential: StoredCredential) -> CredentialStoreResult<()> {
        let mut credentials = self
            .credentials
            .write()
            .map_err(|e| CredentialStoreError::LockPoisoned(e.to_string()))?;
        credentials.insert(id.to_string(), credential);
        Ok(())
    }
}

/// Reads `<PREFIX><ID>` for a secret, or `<PREFIX><ID>_USERNAME` and
/// `<PREFIX><ID>_PASSWORD` for a login. The id is upper-cased and every
/// character outside `[A-Z0-9]` becomes `_`.
pub struct EnvCredentialStore {
    prefix: String,
}

impl EnvCredentialStore {
    pub const DEFAULT_PREFIX: &'static str = "ARTIFACTZ_CREDENTIAL_";

    pub fn new() -> Self {
        Self::with_prefix(Self::DEFAULT_PREFIX)
    }

    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
        }
    }

    pub fn env_var_name(&self, id: &str) -> String {
        let normalized: String = id
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        format!("{}{}", self.prefix, normalized)
    }
}

impl Default for EnvCredentialStore {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[async_trait]
impl CredentialStore for EnvCredentialStore {
    async fn find(&self, id: &str) -> CredentialStoreResult<Option<StoredCredential>> {
        let var_name = self.env_var_name(id);

        if let Some(secret) = non_empty_var(&var_name) {
            return Ok(Some(StoredCredential::secret(secret)));
        }

        let username = non_empty_var(&format!("{var_name}_USERNAME"));
        let password = non_empty_var(&format!("{var_name}_PASSWORD"));

        Ok(match (username, password) {
            (Some(username), Some(password)) => {
                Some(StoredCredential::username_password(username, password))
            }
            _ => None,
        })
    }
}

/// Asks each store in turn; the first one that knows the id wins
pub struct ChainedCredentialStore {
    stores: Vec<Arc<dyn CredentialStore>>,
}

impl ChainedCredentialStore {
    pub fn new(stores: Vec<Arc<dyn CredentialStore>>) -> Self {
        Self { stores }
    }
}

#[async_trait]
impl CredentialStore for ChainedCredentialStore {
    async fn find(&self, id: &str) -> CredentialStoreResult<Option<StoredCredential>> {
        for store in &self.stores {
            if let Some(credential) = store.find(id).await? {
                return Ok(Some(credential));
            }
        }
        Ok(None)
    }
}
