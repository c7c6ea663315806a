pub mod config;
pub mod credential_store;

pub use credential_store::{
    ChainedCredentialStore,
    CredentialStore,
    CredentialStoreError,
    CredentialStoreResult,
    EnvCredentialStore,
    MemoryCredentialStore,
};
