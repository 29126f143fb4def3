use std::path::Path;

use anyhow::Context;
use figment::Figment;
use figment::providers::{Env, Format, Yaml};
use protected_search::{GraphConfig, ProtectedSearchConfig};
use serde::Deserialize;

/// Environment variables with this prefix override the config file.
/// Nested keys are separated by `__`, e.g. `OD_SEARCH__SEARCH__MAX_ITEMS`.
pub const ENV_PREFIX: &str = "OD_SEARCH__";

/// Effective server configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub search: ProtectedSearchConfig,
    #[serde(default)]
    pub graph: GraphConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Budget for one request, verification included.
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8087".to_owned(),
            request_timeout_secs: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            json: false,
        }
    }
}

/// Load configuration from an optional YAML file, then the environment.
///
/// # Errors
///
/// Returns an error if the file is missing or either source fails to parse.
pub fn load(path: Option<&Path>) -> anyhow::Result<AppConfig> {
    let mut figment = Figment::new();
    if let Some(path) = path {
        if !path.exists() {
            anyhow::bail!("config file not found: {}", path.display());
        }
        figment = figment.merge(Yaml::file(path));
    }
    figment
        .merge(Env::prefixed(ENV_PREFIX).split("__"))
        .extract()
        .context("failed to load configuration")
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_without_sources() {
        Jail::expect_with(|_jail| {
            let cfg = load(None).map_err(|e| e.to_string())?;
            assert_eq!(cfg.server.bind_addr, "127.0.0.1:8087");
            assert_eq!(cfg.search.max_items, 100);
            assert!(cfg.graph.access_token.is_none());
            Ok(())
        });
    }

    #[test]
    fn file_then_env_layering() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "od-search.yaml",
                r#"
server:
  bind_addr: "0.0.0.0:9000"
search:
  protected_routes: ["/secret", "", "/Private Docs"]
  max_items: 50
graph:
  base_directory: "/Public"
  access_token: "from-file"
"#,
            )?;
            jail.set_env("OD_SEARCH__SEARCH__MAX_ITEMS", "25");

            let cfg = load(Some(Path::new("od-search.yaml"))).map_err(|e| e.to_string())?;

            assert_eq!(cfg.server.bind_addr, "0.0.0.0:9000");
            assert_eq!(cfg.search.max_items, 25);
            assert_eq!(
                cfg.search.protected_routes,
                vec!["/secret".to_owned(), String::new(), "/Private Docs".to_owned()]
            );
            assert_eq!(cfg.graph.base_directory, "/Public");
            assert!(cfg.graph.access_token.is_some());
            assert!(!format!("{cfg:?}").contains("from-file"));
            Ok(())
        });
    }

    #[test]
    fn missing_file_is_an_error() {
        Jail::expect_with(|_jail| {
            assert!(load(Some(Path::new("nope.yaml"))).is_err());
            Ok(())
        });
    }

    #[test]
    fn unknown_keys_are_rejected() {
        Jail::expect_with(|jail| {
            jail.create_file("bad.yaml", "search:\n  routes: [\"/x\"]\n")?;
            assert!(load(Some(Path::new("bad.yaml"))).is_err());
            Ok(())
        });
    }
}
