use async_trait::async_trait;
use protected_search_sdk::{AccessTokenProvider, ProviderError};
use secrecy::SecretString;

/// Hands out the access token configured at startup.
pub struct StaticAccessTokenProvider {
    token: Option<SecretString>,
}

impl StaticAccessTokenProvider {
    #[must_use]
    pub fn new(token: Option<SecretString>) -> Self {
        Self { token }
    }
}

#[async_trait]
impl AccessTokenProvider for StaticAccessTokenProvider {
    async fn access_token(&self) -> Result<SecretString, ProviderError> {
        self.token
            .clone()
            .ok_or_else(|| ProviderError::access_token("no access token configured"))
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[tokio::test]
    async fn returns_configured_token() {
        let provider = StaticAccessTokenProvider::new(Some(SecretString::from("tok")));
        let token = provider.access_token().await.unwrap();
        assert_eq!(token.expose_secret(), "tok");
    }

    #[tokio::test]
    async fn missing_token_is_an_error_without_status() {
        let provider = StaticAccessTokenProvider::new(None);
        let err = provider.access_token().await.unwrap_err();
        assert!(matches!(err, ProviderError::AccessToken(_)));
        assert_eq!(err.status(), None);
    }
}
