use std::sync::Arc;

use anyhow::Context;
use arc_swap::ArcSwapOption;
use http::HeaderValue;
use tracing::{debug, info};

use crate::config::ProtectedSearchConfig;
use crate::domain::error::DomainError;
use crate::domain::service::{SearchClients, SearchService, ServiceConfig};

/// Main module struct for protected search
pub struct ProtectedSearchModule {
    // Keep the service behind ArcSwap for cheap read-mostly access.
    service: ArcSwapOption<SearchService>,
    cache_control: ArcSwapOption<HeaderValue>,
}

impl Default for ProtectedSearchModule {
    fn default() -> Self {
        Self {
            service: ArcSwapOption::from(None),
            cache_control: ArcSwapOption::from(None),
        }
    }
}

impl ProtectedSearchModule {
    /// Validate configuration and build the search service.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is unusable.
    pub fn init(&self, cfg: &ProtectedSearchConfig, clients: SearchClients) -> anyhow::Result<()> {
        info!("Initializing protected-search module");

        if cfg.location_marker.is_empty() {
            return Err(DomainError::invalid_config("location_marker must not be empty").into());
        }
        if cfg.max_items == 0 {
            return Err(DomainError::invalid_config("max_items must be positive").into());
        }
        let cache_control = HeaderValue::from_str(&cfg.cache_control_header)
            .context("cache_control_header is not a valid header value")?;

        let matcher = cfg.route_matcher();
        debug!(
            protected_routes = cfg.protected_routes.len(),
            max_items = cfg.max_items,
            "Loaded protected-search config"
        );
        if matcher.is_empty() {
            info!("No protected routes configured, every indexed hit is public");
        }

        let service_config = ServiceConfig {
            location_marker: cfg.location_marker.clone(),
            max_items: cfg.max_items,
        };

        self.service.store(Some(Arc::new(SearchService::new(
            clients,
            matcher,
            service_config,
        ))));
        self.cache_control.store(Some(Arc::new(cache_control)));

        info!("SearchService initialized successfully");
        Ok(())
    }

    /// `Cache-Control` value stamped on every search response.
    ///
    /// Hosts wrapping the module in their own layers (timeouts, for instance)
    /// reapply it so responses produced by those layers carry it too.
    ///
    /// # Errors
    ///
    /// Returns an error if [`Self::init`] has not run.
    pub fn cache_control(&self) -> anyhow::Result<HeaderValue> {
        self.cache_control
            .load()
            .as_ref()
            .map(|v| HeaderValue::clone(v))
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))
    }

    /// Mount the module's REST routes onto `router`.
    ///
    /// # Errors
    ///
    /// Returns an error if [`Self::init`] has not run.
    pub fn register_rest(&self, router: axum::Router) -> anyhow::Result<axum::Router> {
        info!("Registering protected-search REST routes");

        let service = self
            .service
            .load()
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("Service not initialized"))?
            .clone();
        let cache_control = self.cache_control()?;

        let router = crate::api::rest::routes::register_routes(router, service, cache_control);

        info!("Protected search REST routes registered successfully");
        Ok(router)
    }
}
