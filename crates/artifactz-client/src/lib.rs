//! HTTP client for the Artifactz registry
//!
//! Implements the `RegistryClient` contract from `artifactz-api` on top of
//! reqwest. Authentication, proxy routing, timeouts and transport retries all
//! live here so the orchestrators never see them.
//!
//! # Architecture
//!
//! - `connector` - builds a configured client from `ConnectionParams`
//! - `client` - registry endpoints
//! - `types` - wire payloads
//! - `mapper` - HTTP error mapping
//! - `config` - endpoint helpers
//!
//! # Example Usage
//!
//! ```no_run
//! use artifactz_api::{ConnectionParams, PushRequest, RegistryClient, RegistryConnector};
//! use artifactz_client::HttpConnector;
//!
//! # async fn run() -> artifactz_api::ClientResult<()> {
//! let params = ConnectionParams::new("https://artifactor.example.com", "token".into());
//! let client = HttpConnector.connect(params)?;
//! let _version = client
//!     .push_artifact(&PushRequest::new("web-app", "Production"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod client;
mod config;
mod connector;
mod mapper;
mod types;

pub use client::HttpRegistryClient;
pub use connector::HttpConnector;
