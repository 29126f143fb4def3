#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Protected Search module
//!
//! Serves `GET /api/search` for a drive-backed file index. Provider hits are
//! mapped into index paths, and hits under restricted subtrees are returned
//! only when the caller presents a token the route verifier accepts.

pub mod api;
pub mod config;
pub mod domain;
pub mod infra;
pub mod module;

pub use config::{GraphConfig, ProtectedSearchConfig};
pub use domain::service::{SearchClients, SearchService, ServiceConfig};
pub use module::ProtectedSearchModule;
