use protected_search_sdk::ProviderError;
use thiserror::Error;

/// Failures that abort a whole search request.
///
/// Per-item verification problems never surface here; they only exclude the
/// item from the result.
#[derive(Error, Debug, Clone)]
pub enum DomainError {
    #[error("Access token unavailable: {source}")]
    AccessTokenUnavailable { source: ProviderError },

    #[error("Search request failed: {source}")]
    SearchFailed { source: ProviderError },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl DomainError {
    #[must_use]
    pub fn access_token_unavailable(source: ProviderError) -> Self {
        Self::AccessTokenUnavailable { source }
    }

    #[must_use]
    pub fn search_failed(source: ProviderError) -> Self {
        Self::SearchFailed { source }
    }

    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Upstream error behind this failure, if it came from a provider call.
    #[must_use]
    pub fn provider_error(&self) -> Option<&ProviderError> {
        match self {
            Self::AccessTokenUnavailable { source } | Self::SearchFailed { source } => Some(source),
            Self::InvalidConfig { .. } => None,
        }
    }
}
