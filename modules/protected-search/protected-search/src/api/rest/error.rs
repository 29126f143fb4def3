use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;

use crate::api::rest::dto::SearchErrorDto;
use crate::domain::error::DomainError;

const GENERIC_ERROR: &str = "Internal server error.";

/// Handler error mirroring the upstream provider's status and body.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        Self(e)
    }
}

/// Map a domain error to the status and body returned to the caller.
///
/// Provider failures keep their status and payload; anything without an
/// upstream status becomes a 500 with a generic message.
#[must_use]
pub fn domain_error_to_response(err: &DomainError) -> (StatusCode, SearchErrorDto) {
    let provider = err.provider_error();

    let status = provider
        .and_then(protected_search_sdk::ProviderError::status)
        .and_then(|s| StatusCode::from_u16(s).ok())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let error = provider
        .and_then(protected_search_sdk::ProviderError::body)
        .cloned()
        .unwrap_or_else(|| serde_json::Value::String(GENERIC_ERROR.to_owned()));

    (status, SearchErrorDto { error })
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = domain_error_to_response(&self.0);
        if status.is_server_error() {
            tracing::error!(error = %self.0, status = status.as_u16(), "Search request failed");
        } else {
            tracing::warn!(error = %self.0, status = status.as_u16(), "Search request failed");
        }
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use protected_search_sdk::ProviderError;

    #[test]
    fn upstream_status_and_body_are_mirrored() {
        let err = DomainError::search_failed(ProviderError::upstream(
            429,
            Some(serde_json::json!({ "error": { "code": "tooManyRequests" } })),
        ));

        let (status, body) = domain_error_to_response(&err);

        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(
            body.error,
            serde_json::json!({ "error": { "code": "tooManyRequests" } })
        );
    }

    #[test]
    fn missing_status_falls_back_to_generic_500() {
        let err = DomainError::search_failed(ProviderError::transport("dns failure"));

        let (status, body) = domain_error_to_response(&err);

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, serde_json::json!("Internal server error."));
    }

    #[test]
    fn status_without_body_uses_generic_message() {
        let err = DomainError::access_token_unavailable(ProviderError::upstream(401, None));

        let (status, body) = domain_error_to_response(&err);

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body.error, serde_json::json!("Internal server error."));
    }
}
