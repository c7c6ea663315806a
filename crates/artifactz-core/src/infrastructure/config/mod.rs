pub mod interpolation;
pub mod loader;
pub mod schema;
pub mod validation;

pub use interpolation::{
    interpolate,
    InterpolationError,
};
pub use loader::{
    ConfigLoadError,
    ConfigLoadResult,
    ConfigLoader,
};
pub use schema::{
    ArtifactzConfig,
    ConfigOverrides,
    CredentialEntry,
    ProxyConfig,
    ServerConfig,
};
pub use validation::{
    validate_config,
    ConfigIssue,
};
