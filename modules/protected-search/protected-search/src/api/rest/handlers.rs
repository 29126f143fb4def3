use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, Query};
use axum::http::HeaderMap;
use tracing::{field::Empty, info};

use crate::api::rest::dto::{SearchQuery, SearchResultItemDto};
use crate::api::rest::error::ApiError;
use crate::api::rest::openapi::ApiDoc;
use crate::domain::service::SearchService;
use crate::domain::token::TOKEN_HEADER;

/// Search the index and return the hits the caller may see
#[utoipa::path(
    get,
    path = "/api/search",
    tag = "Search",
    params(
        SearchQuery,
        ("od-protected-tokens" = Option<String>, Header,
            description = "Hashed tokens for restricted routes, as `(path,hash),` groups")
    ),
    responses(
        (status = 200, description = "Admitted search hits, in provider order",
            body = Vec<crate::api::rest::dto::SearchResultItemDto>),
        (status = 500, description = "Upstream failure; status mirrors the provider when known",
            body = crate::api::rest::dto::SearchErrorDto)
    )
)]
#[tracing::instrument(
    skip(svc, query, headers),
    fields(
        has_tokens = headers.contains_key(TOKEN_HEADER),
        request_id = Empty
    )
)]
pub async fn search(
    Extension(svc): Extension<Arc<SearchService>>,
    Query(query): Query<SearchQuery>,
    headers: HeaderMap,
) -> Result<Json<Vec<SearchResultItemDto>>, ApiError> {
    let q = query.q.unwrap_or_default();
    let token_header = headers.get(TOKEN_HEADER).and_then(|v| v.to_str().ok());

    info!(query_len = q.len(), "Searching drive index");

    let items = svc.search(&q, token_header).await?;

    Ok(Json(items.into_iter().map(SearchResultItemDto::from).collect()))
}

/// Serve the `OpenAPI` document for this module
pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    use utoipa::OpenApi;

    Json(ApiDoc::openapi())
}
