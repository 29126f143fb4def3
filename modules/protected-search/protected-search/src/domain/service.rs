use std::sync::Arc;

use protected_search_sdk::{
    AccessTokenProvider, DriveSearchClient, RouteVerifierClient, SearchResultItem, TokenEntry,
};
use secrecy::SecretString;
use tracing::{debug, info, instrument, warn};

use crate::domain::error::DomainError;
use crate::domain::path::map_absolute_path;
use crate::domain::query::sanitize_query;
use crate::domain::routes::RouteMatcher;
use crate::domain::token::deserialize_tokens;

/// Paths under this prefix are list forms and metadata pages, not content.
pub const RESERVED_NAVIGATION_PREFIX: &str = "/Forms";

/// Configuration for the search service
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Substring of an item's `webUrl` that marks the index base directory.
    pub location_marker: String,
    /// Maximum number of hits requested from the provider.
    pub max_items: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            location_marker: "_moe/Documents".to_owned(),
            max_items: 100,
        }
    }
}

/// Collaborators the service calls out to.
#[derive(Clone)]
pub struct SearchClients {
    pub search: Arc<dyn DriveSearchClient>,
    pub verifier: Arc<dyn RouteVerifierClient>,
    pub tokens: Arc<dyn AccessTokenProvider>,
}

/// Authorization-aware search over the drive index.
#[derive(Clone)]
pub struct SearchService {
    clients: SearchClients,
    matcher: RouteMatcher,
    config: ServiceConfig,
}

impl SearchService {
    #[must_use]
    pub fn new(clients: SearchClients, matcher: RouteMatcher, config: ServiceConfig) -> Self {
        Self {
            clients,
            matcher,
            config,
        }
    }

    /// Search the drive and return the hits this caller may see.
    ///
    /// An empty query returns an empty list without contacting the provider.
    ///
    /// # Errors
    ///
    /// Returns `DomainError` when the access token cannot be obtained or the
    /// provider search fails. Verification failures never abort the request.
    #[instrument(skip(self, query, token_header), fields(query_len = query.len()))]
    pub async fn search(
        &self,
        query: &str,
        token_header: Option<&str>,
    ) -> Result<Vec<SearchResultItem>, DomainError> {
        if query.is_empty() {
            debug!("Empty query, skipping provider search");
            return Ok(Vec::new());
        }

        let access_token = self
            .clients
            .tokens
            .access_token()
            .await
            .map_err(DomainError::access_token_unavailable)?;

        let sanitized = sanitize_query(query);
        let hits = self
            .clients
            .search
            .search(&sanitized, self.config.max_items, &access_token)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "SearchService: provider search failed");
                DomainError::search_failed(e)
            })?;

        info!(hits = hits.len(), "Provider search completed");

        let items = hits.into_iter().map(SearchResultItem::from).collect();
        Ok(self.filter(items, token_header, &access_token).await)
    }

    /// Keep the items the caller is allowed to see, in their original order.
    ///
    /// Every item gets its index path assigned first. Restricted items are
    /// verified one at a time.
    #[instrument(skip_all, fields(items = items.len()))]
    pub async fn filter(
        &self,
        mut items: Vec<SearchResultItem>,
        token_header: Option<&str>,
        access_token: &SecretString,
    ) -> Vec<SearchResultItem> {
        for item in &mut items {
            item.path = map_absolute_path(&item.web_url, &self.config.location_marker);
        }

        let tokens = deserialize_tokens(token_header);
        debug!(tokens = tokens.len(), "Parsed caller tokens");

        let mut admitted = Vec::with_capacity(items.len());
        for item in items {
            if self.is_admissible(&item, &tokens, access_token).await {
                admitted.push(item);
            }
        }

        debug!(admitted = admitted.len(), "Filtered search results");
        admitted
    }

    async fn is_admissible(
        &self,
        item: &SearchResultItem,
        tokens: &[TokenEntry],
        access_token: &SecretString,
    ) -> bool {
        if item.path.is_empty() || item.path.starts_with(RESERVED_NAVIGATION_PREFIX) {
            return false;
        }

        let route = self.matcher.match_protected_route(&item.path);
        if route.is_empty() {
            return true;
        }

        let Some(entry) = tokens.iter().find(|t| t.path == route) else {
            debug!(route, path = %item.path, "No caller token for protected route");
            return false;
        };

        match self
            .clients
            .verifier
            .check_auth_route(&item.path, access_token, &entry.token)
            .await
        {
            Ok(outcome) if outcome.is_success() => true,
            Ok(outcome) => {
                debug!(route, code = outcome.code, path = %item.path, "Route verification denied");
                false
            }
            Err(e) => {
                warn!(route, error = %e, path = %item.path, "Route verification failed");
                false
            }
        }
    }
}
