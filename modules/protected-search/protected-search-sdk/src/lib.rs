#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
//! Protected Search SDK
//!
//! This crate provides the public surface of the `protected_search` module:
//!
//! - [`DriveSearchClient`] - provider search executed on behalf of the index
//! - [`RouteVerifierClient`] - authoritative check of a hashed token for a path
//! - [`AccessTokenProvider`] - credential used to call the provider
//! - [`DriveItem`], [`SearchResultItem`], [`TokenEntry`], [`AuthCheckOutcome`] - models
//! - [`ProviderError`] - error type shared by every collaborator
//!
//! ## Usage
//!
//! ```ignore
//! use protected_search_sdk::{AccessTokenProvider, DriveSearchClient};
//!
//! let token = tokens.access_token().await?;
//! let hits = search.search("report%20q3", 100, &token).await?;
//! ```

pub mod api;
pub mod error;
pub mod models;

pub use api::{AccessTokenProvider, DriveSearchClient, RouteVerifierClient};
pub use error::ProviderError;
pub use models::{
    AuthCheckOutcome, DriveItem, FileFacet, FolderFacet, ItemKind, ParentReference,
    SearchResultItem, TokenEntry,
};
