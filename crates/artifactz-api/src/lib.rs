//! Shared contract between the Artifactz orchestrators and registry clients
//!
//! This crate carries no I/O of its own. It defines:
//! - `types` - publish/push requests and connection parameters
//! - `client` - the `RegistryClient` and `RegistryConnector` traits
//! - `error` - client-level errors
//! - `validation` - required-field checks shared by every host
//! - `utils` - retry policy used by client implementations

pub mod client;
pub mod error;
pub mod types;
pub mod utils;
pub mod validation;

pub use client::{
    RegistryClient,
    RegistryConnector,
};
pub use error::{
    ClientError,
    ClientResult,
};
pub use types::{
    ConnectionParams,
    ProxyCredentials,
    ProxyRoute,
    PublishRequest,
    PushRequest,
};
pub use utils::RetryPolicy;
pub use validation::{
    FieldCheck,
    FieldError,
};
