pub mod graph;
pub mod token;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;

use crate::config::GraphConfig;
use crate::domain::routes::RouteMatcher;
use crate::domain::service::SearchClients;

/// Build the Graph-backed collaborators from configuration.
///
/// # Errors
///
/// Returns an error if the HTTP client cannot be constructed.
pub fn graph_clients(cfg: &GraphConfig, matcher: RouteMatcher) -> anyhow::Result<SearchClients> {
    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(cfg.timeout_secs))
        .build()
        .context("failed to build Graph HTTP client")?;

    let search = graph::GraphSearchClient::new(http.clone(), &cfg.drive_api, &cfg.base_directory);
    let verifier =
        graph::DotPasswordVerifier::new(http, &cfg.drive_api, &cfg.base_directory, matcher);
    let tokens = token::StaticAccessTokenProvider::new(cfg.access_token.clone());

    Ok(SearchClients {
        search: Arc::new(search),
        verifier: Arc::new(verifier),
        tokens: Arc::new(tokens),
    })
}
