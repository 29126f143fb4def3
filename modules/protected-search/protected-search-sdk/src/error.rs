//! Error types shared by the protected search collaborators.

use thiserror::Error;

/// Failures reported by the storage provider or its adapters.
///
/// `Upstream` keeps the provider's status and body so the REST layer can
/// mirror them back to the caller.
#[derive(Debug, Error, Clone)]
pub enum ProviderError {
    /// The provider answered with a non-success status.
    #[error("upstream responded with status {status}")]
    Upstream {
        status: u16,
        body: Option<serde_json::Value>,
    },

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// No usable access token could be obtained.
    #[error("access token unavailable: {0}")]
    AccessToken(String),

    /// The provider response could not be decoded.
    #[error("malformed upstream response: {0}")]
    Decode(String),
}

impl ProviderError {
    #[must_use]
    pub fn upstream(status: u16, body: Option<serde_json::Value>) -> Self {
        Self::Upstream { status, body }
    }

    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    #[must_use]
    pub fn access_token(message: impl Into<String>) -> Self {
        Self::AccessToken(message.into())
    }

    #[must_use]
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode(message.into())
    }

    /// HTTP status reported by the provider, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            Self::Transport(_) | Self::AccessToken(_) | Self::Decode(_) => None,
        }
    }

    /// Response body reported by the provider, if any.
    #[must_use]
    pub fn body(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Upstream { body, .. } => body.as_ref(),
            Self::Transport(_) | Self::AccessToken(_) | Self::Decode(_) => None,
        }
    }
}
