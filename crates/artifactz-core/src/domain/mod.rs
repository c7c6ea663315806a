pub mod credentials;
pub mod error;

pub use credentials::{
    Credentials,
    StoredCredential,
};
pub use error::{
    ExecutionFailure,
    ExecutionResult,
    FailureKind,
};
