//! Collaborator traits consumed by the protected search pipeline.

use async_trait::async_trait;
use secrecy::SecretString;

use crate::error::ProviderError;
use crate::models::{AuthCheckOutcome, DriveItem};

/// Supplies the credential used to call the storage provider.
#[async_trait]
pub trait AccessTokenProvider: Send + Sync {
    /// Return a bearer token valid for provider calls.
    ///
    /// # Errors
    ///
    /// Any failure here aborts the whole search request.
    async fn access_token(&self) -> Result<SecretString, ProviderError>;
}

/// Executes a search against the storage provider, scoped to the index root.
#[async_trait]
pub trait DriveSearchClient: Send + Sync {
    /// Run a provider search.
    ///
    /// `sanitized_query` must already be escaped and percent-encoded; it is
    /// embedded verbatim into the provider query expression.
    ///
    /// # Errors
    ///
    /// - `Upstream` when the provider answers with a non-success status
    /// - `Transport` when the request could not be performed
    /// - `Decode` when the response body is not a search result
    async fn search(
        &self,
        sanitized_query: &str,
        top: u32,
        access_token: &SecretString,
    ) -> Result<Vec<DriveItem>, ProviderError>;
}

/// Decides whether a hashed caller token grants access to a path.
///
/// Denial is expressed through [`AuthCheckOutcome::code`], not as an error.
/// Errors are reserved for infrastructure failures.
#[async_trait]
pub trait RouteVerifierClient: Send + Sync {
    /// Check `hashed_token` against the secret stored for the restricted
    /// subtree containing `path`.
    ///
    /// # Errors
    ///
    /// Returns `ProviderError` when the verifier could not reach a decision.
    async fn check_auth_route(
        &self,
        path: &str,
        access_token: &SecretString,
        hashed_token: &str,
    ) -> Result<AuthCheckOutcome, ProviderError>;
}
