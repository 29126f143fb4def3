use crate::domain::encoding::encode_segments;

/// A configured restricted subtree, kept next to its encoded form.
#[derive(Debug, Clone)]
struct ProtectedRoute {
    prefix: String,
    encoded: String,
}

/// Resolves which restricted subtree, if any, a path belongs to.
///
/// Routes are tried in configuration order and the first one whose encoded
/// prefix starts the path wins, even when a later route is longer. Empty
/// configuration entries are ignored.
#[derive(Debug, Clone, Default)]
pub struct RouteMatcher {
    routes: Vec<ProtectedRoute>,
}

impl RouteMatcher {
    #[must_use]
    pub fn new<I, S>(routes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let routes = routes
            .into_iter()
            .map(Into::<String>::into)
            .filter(|prefix| !prefix.is_empty())
            .map(|prefix| ProtectedRoute {
                encoded: encode_segments(&prefix),
                prefix,
            })
            .collect();
        Self { routes }
    }

    /// Return the configured prefix protecting `path`, or `""` when the path
    /// is unrestricted.
    ///
    /// An empty `path` never matches.
    #[must_use]
    pub fn match_protected_route(&self, path: &str) -> &str {
        if path.is_empty() {
            return "";
        }
        self.routes
            .iter()
            .find(|route| path.starts_with(&route.encoded))
            .map_or("", |route| route.prefix.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
