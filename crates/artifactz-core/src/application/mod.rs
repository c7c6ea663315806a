pub mod credential_resolver;
pub mod services;

pub use credential_resolver::CredentialResolver;
pub use services::{
    ConnectionService,
    PublishService,
    PushService,
};
