use std::fmt;

use artifactz_api::ProxyRoute;
use secrecy::{
    ExposeSecret,
    SecretString,
};

/// A credential as kept by a credential store
pub enum StoredCredential {
    /// Secret text, used as the registry bearer token
    Secret(SecretString),
    /// Username and password, used for proxy authentication
    UsernamePassword {
        username: String,
        password: SecretString,
    },
}

impl StoredCredential {
    pub fn secret(value: impl Into<String>) -> Self {
        StoredCredential::Secret(SecretString::from(value.into()))
    }

    pub fn username_password(username: impl Into<String>, password: impl Into<String>) -> Self {
        StoredCredential::UsernamePassword {
            username: username.into(),
            password: SecretString::from(password.into()),
        }
    }
}

impl Clone for StoredCredential {
    fn clone(&self) -> Self {
        match self {
            StoredCredential::Secret(secret) => Self::secret(secret.expose_secret()),
            StoredCredential::UsernamePassword { username, password } => {
                Self::username_password(username.clone(), password.expose_secret())
            }
        }
    }
}

impl fmt::Debug for StoredCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoredCredential::Secret(_) => f.write_str("Secret([REDACTED])"),
            StoredCredential::UsernamePassword { username, .. } => f
                .debug_struct("UsernamePassword")
                .field("username", username)
                .field("password", &"[REDACTED]")
                .finish(),
        }
    }
}

/// Credentials resolved for a single invocation
#[derive(Debug)]
pub struct Credentials {
    pub token: SecretString,
    pub proxy: Option<ProxyRoute>,
}
