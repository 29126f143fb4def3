use secrecy::SecretString;
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::routes::RouteMatcher;

/// Configuration for the `protected_search` module
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProtectedSearchConfig {
    /// Restricted subtrees, in priority order. Empty entries are ignored.
    #[serde(default)]
    pub protected_routes: Vec<String>,

    /// Substring of an item's `webUrl` that marks the index base directory.
    #[serde(default = "default_location_marker")]
    pub location_marker: String,

    /// Maximum number of hits requested from the provider.
    #[serde(default = "default_max_items")]
    pub max_items: u32,

    /// `Cache-Control` value set on every search response.
    #[serde(default = "default_cache_control_header")]
    pub cache_control_header: String,
}

impl Default for ProtectedSearchConfig {
    fn default() -> Self {
        Self {
            protected_routes: Vec::new(),
            location_marker: default_location_marker(),
            max_items: default_max_items(),
            cache_control_header: default_cache_control_header(),
        }
    }
}

impl ProtectedSearchConfig {
    /// Route matcher over the configured restricted subtrees.
    #[must_use]
    pub fn route_matcher(&self) -> RouteMatcher {
        RouteMatcher::new(self.protected_routes.iter().cloned())
    }
}

fn default_location_marker() -> String {
    "_moe/Documents".to_owned()
}

fn default_max_items() -> u32 {
    100
}

fn default_cache_control_header() -> String {
    "max-age=0, s-maxage=60, stale-while-revalidate".to_owned()
}

/// Connection settings for the Microsoft Graph drive backing the index
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphConfig {
    /// Drive endpoint, e.g. `https://graph.microsoft.com/v1.0/me/drive`.
    #[serde(default = "default_drive_api")]
    pub drive_api: String,

    /// Directory of the drive exposed as the index root.
    #[serde(default = "default_base_directory")]
    pub base_directory: String,

    /// Bearer token for Graph calls. Refresh is handled outside this service.
    #[serde(default, deserialize_with = "deserialize_secret")]
    pub access_token: Option<SecretString>,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            drive_api: default_drive_api(),
            base_directory: default_base_directory(),
            access_token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_drive_api() -> String {
    "https://graph.microsoft.com/v1.0/me/drive".to_owned()
}

fn default_base_directory() -> String {
    "/".to_owned()
}

fn default_timeout_secs() -> u64 {
    30
}

fn deserialize_secret<'de, D>(deserializer: D) -> Result<Option<SecretString>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.filter(|s| !s.is_empty()).map(SecretString::from))
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn search_config_defaults_apply() {
        let cfg: ProtectedSearchConfig =
            serde_json::from_value(serde_json::json!({ "protected_routes": ["/secret"] }))
                .unwrap();

        assert_eq!(cfg.protected_routes, vec!["/secret".to_owned()]);
        assert_eq!(cfg.location_marker, "_moe/Documents");
        assert_eq!(cfg.max_items, 100);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let res: Result<ProtectedSearchConfig, _> =
            serde_json::from_value(serde_json::json!({ "protected_route": ["/secret"] }));
        assert!(res.is_err());
    }

    #[test]
    fn access_token_is_redacted_in_debug() {
        let cfg: GraphConfig =
            serde_json::from_value(serde_json::json!({ "access_token": "eyJ0eXAi" })).unwrap();

        assert_eq!(
            cfg.access_token.as_ref().map(ExposeSecret::expose_secret),
            Some("eyJ0eXAi")
        );
        assert!(!format!("{cfg:?}").contains("eyJ0eXAi"));
    }

    #[test]
    fn empty_access_token_means_unset() {
        let cfg: GraphConfig =
            serde_json::from_value(serde_json::json!({ "access_token": "" })).unwrap();
        assert!(cfg.access_token.is_none());
    }
}
