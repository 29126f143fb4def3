use std::sync::Arc;

use axum::routing::get;
use axum::{Extension, Router};
use http::{HeaderValue, header};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::rest::handlers;
use crate::domain::service::SearchService;

pub fn register_routes(
    router: Router,
    service: Arc<SearchService>,
    cache_control: HeaderValue,
) -> Router {
    // GET /api/search - Search the index, filtered by caller tokens
    // Cache-Control is set on every response, errors included.
    let search = Router::new()
        .route("/api/search", get(handlers::search))
        .layer(Extension(service))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            cache_control,
        ));

    // GET /api/openapi.json - OpenAPI document
    router
        .merge(search)
        .route("/api/openapi.json", get(handlers::openapi_json))
}
