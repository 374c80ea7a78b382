//! Project fetch client.
//!
//! Retrieves project documents from the collector project API over
//! HTTP, parses them with `collector_core` and delivers the results to
//! a caller-supplied [`ProjectCallback`](service::ProjectCallback).

pub mod api;
pub mod config;
pub mod service;
pub mod token;

pub use api::{HttpTransport, ProjectTransport, TransportError};
pub use config::ClientConfig;
pub use service::{ProjectCallback, ProjectService, Scope};
pub use token::{Sha256TokenSource, TokenSource};
