use std::time::Duration;

use anyhow::Context;
use axum::Router;
use axum::http::{StatusCode, header};
use protected_search::ProtectedSearchModule;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::config::AppConfig;

/// Build the HTTP router with the protected-search module mounted.
///
/// # Errors
///
/// Returns an error if a collaborator cannot be built or the module rejects
/// its configuration.
pub fn build_router(cfg: &AppConfig) -> anyhow::Result<Router> {
    let clients = protected_search::infra::graph_clients(&cfg.graph, cfg.search.route_matcher())
        .context("failed to build Graph clients")?;

    let module = ProtectedSearchModule::default();
    module.init(&cfg.search, clients)?;
    let router = module.register_rest(Router::new())?;

    // Cache-Control sits outside the timeout so a 504 carries it as well.
    Ok(router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::GATEWAY_TIMEOUT,
            Duration::from_secs(cfg.server.request_timeout_secs),
        ))
        .layer(SetResponseHeaderLayer::if_not_present(
            header::CACHE_CONTROL,
            module.cache_control()?,
        ))
        .layer(TraceLayer::new_for_http()))
}

/// Serve until Ctrl-C.
///
/// # Errors
///
/// Returns an error if the listener cannot be bound or the server fails.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let router = build_router(&cfg)?;

    let listener = tokio::net::TcpListener::bind(&cfg.server.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.server.bind_addr))?;
    info!(addr = %cfg.server.bind_addr, "od-search-server listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use http_body_util::BodyExt;
    use protected_search::domain::token::{TOKEN_HEADER, hash_token};
    use serde_json::{Value, json};
    use tower::ServiceExt;
    use wiremock::matchers::{method, path, path_regex};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn app_config(server: &MockServer) -> AppConfig {
        let mut cfg = AppConfig::default();
        cfg.search.protected_routes = vec!["/secret".to_owned()];
        cfg.graph.drive_api = format!("{}/v1.0/me/drive", server.uri());
        cfg.graph.access_token = Some("graph-token".to_owned().into());
        cfg
    }

    async fn mount_drive(server: &MockServer) {
        let site = "https://contoso-my.sharepoint.com/personal/jane_moe/Documents";
        Mock::given(method("GET"))
            .and(path_regex(r"/root/search\(q='notes'\)$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "value": [
                    { "id": "1", "name": "a.txt", "file": {}, "webUrl": format!("{site}/secret/a.txt") },
                    { "id": "2", "name": "b.txt", "file": {}, "webUrl": format!("{site}/public/b.txt") },
                    { "id": "3", "name": "AllItems.aspx", "file": {}, "webUrl": format!("{site}/Forms/AllItems.aspx") }
                ]
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path_regex(r"/root:%2Fsecret%2F\.password$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "@microsoft.graph.downloadUrl": format!("{}/dl/password", server.uri())
            })))
            .mount(server)
            .await;
        Mock::given(method("GET"))
            .and(path("/dl/password"))
            .respond_with(ResponseTemplate::new(200).set_body_string("s3cret\n"))
            .mount(server)
            .await;
    }

    async fn search(router: Router, token: Option<&str>) -> (StatusCode, Value) {
        let mut req = Request::builder().uri("/api/search?q=notes");
        if let Some(token) = token {
            req = req.header(TOKEN_HEADER, format!("(/secret,{}),", hash_token(token)));
        }
        let response = router
            .oneshot(req.body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn end_to_end_with_graph_backend() {
        let server = MockServer::start().await;
        mount_drive(&server).await;
        let router = build_router(&app_config(&server)).unwrap();

        let (status, body) = search(router.clone(), Some("s3cret")).await;
        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["a.txt", "b.txt"]);

        let (status, body) = search(router, Some("wrong")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["path"], "/public/b.txt");
    }

    #[tokio::test]
    async fn request_over_budget_times_out_with_cache_control() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path_regex(r"/root/search\(q='notes'\)$"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "value": [] }))
                    .set_delay(Duration::from_secs(3)),
            )
            .mount(&server)
            .await;
        let mut cfg = app_config(&server);
        cfg.server.request_timeout_secs = 1;
        let router = build_router(&cfg).unwrap();

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/search?q=notes")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(
            response.headers().get(header::CACHE_CONTROL).unwrap(),
            cfg.search.cache_control_header.as_str()
        );
    }

    #[tokio::test]
    async fn missing_access_token_is_a_server_error() {
        let server = MockServer::start().await;
        mount_drive(&server).await;
        let mut cfg = app_config(&server);
        cfg.graph.access_token = None;
        let router = build_router(&cfg).unwrap();

        let (status, body) = search(router, None).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Internal server error." }));
    }
}
