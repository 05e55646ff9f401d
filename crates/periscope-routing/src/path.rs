//! Request path resolution
//!
//! Inbound preview requests arrive as `{prefix}/{session}(/route...)?`. The
//! resolver extracts the in-preview route and normalizes it to exactly one
//! leading `/`, falling back to `/` whenever the pattern does not match.

/// Routing prefix the preview surface is mounted under.
pub const DEFAULT_ROUTE_PREFIX: &str = "/webcontainer/preview";

pub struct PathResolver {
    /// Mount prefix, `/`-rooted, no trailing slash
    prefix: String,
}

impl PathResolver {
    pub fn new() -> Self {
        Self::with_prefix(DEFAULT_ROUTE_PREFIX)
    }

    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        let mut prefix: String = prefix.into();
        while prefix.ends_with('/') {
            prefix.pop();
        }
        if !prefix.starts_with('/') {
            prefix.insert(0, '/');
        }

        Self { prefix }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Resolve the in-preview route from a raw request path.
    ///
    /// Returns `/` when the prefix does not match, the session segment is
    /// empty, or nothing follows the session segment. Pure; the same input
    /// always yields the same route whether resolved at initial load or on
    /// a later client-side navigation.
    pub fn resolve(&self, request_path: &str) -> String {
        let path = split_request_path(request_path);

        let Some(rest) = path.strip_prefix(self.prefix.as_str()) else {
            return "/".to_string();
        };
        let Some(segments) = rest.strip_prefix('/') else {
            return "/".to_string();
        };

        match segments.find('/') {
            Some(idx) if idx > 0 => normalize_route(&segments[idx..]),
            _ => "/".to_string(),
        }
    }

    /// Resolve against a known mounted session.
    ///
    /// Strips the exact `{prefix}/{session_id}` mount point; falls back to
    /// the generic resolution when the current path is not under it.
    pub fn resolve_for(&self, session_id: &str, request_path: &str) -> String {
        let path = split_request_path(request_path);
        let mounted = format!("{}/{}", self.prefix, session_id);

        match path.strip_prefix(mounted.as_str()) {
            Some(rest) if rest.is_empty() || rest.starts_with('/') => normalize_route(rest),
            _ => self.resolve(request_path),
        }
    }
}

impl Default for PathResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// Cut query string and fragment before matching
fn split_request_path(raw: &str) -> &str {
    let mut cut = raw.len();
    for ch in ['?', '#'] {
        if let Some(idx) = raw.find(ch) {
            if idx < cut {
                cut = idx;
            }
        }
    }

    &raw[..cut]
}

/// Normalize a route to exactly one leading `/`
pub(crate) fn normalize_route(route: &str) -> String {
    let trimmed = route.trim_start_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_with_route() {
        let resolver = PathResolver::new();

        assert_eq!(
            resolver.resolve("/webcontainer/preview/abc123/dashboard"),
            "/dashboard"
        );
        assert_eq!(
            resolver.resolve("/webcontainer/preview/abc123/settings/profile"),
            "/settings/profile"
        );
    }

    #[test]
    fn test_resolve_without_route() {
        let resolver = PathResolver::new();

        assert_eq!(resolver.resolve("/webcontainer/preview/abc123"), "/");
        assert_eq!(resolver.resolve("/webcontainer/preview/abc123/"), "/");
    }

    #[test]
    fn test_resolve_unmatched_prefix() {
        let resolver = PathResolver::new();

        assert_eq!(resolver.resolve("/somewhere/else"), "/");
        assert_eq!(resolver.resolve("/webcontainer/preview"), "/");
        assert_eq!(resolver.resolve(""), "/");
    }

    #[test]
    fn test_resolve_empty_session_segment() {
        let resolver = PathResolver::new();

        assert_eq!(resolver.resolve("/webcontainer/preview//dashboard"), "/");
    }

    #[test]
    fn test_resolve_cuts_query_and_fragment() {
        let resolver = PathResolver::new();

        assert_eq!(
            resolver.resolve("/webcontainer/preview/abc123/dashboard?tab=1"),
            "/dashboard"
        );
        assert_eq!(
            resolver.resolve("/webcontainer/preview/abc123/dashboard#top"),
            "/dashboard"
        );
    }

    #[test]
    fn test_resolve_single_leading_slash() {
        let resolver = PathResolver::new();

        // Redundant separators collapse into one leading slash
        assert_eq!(
            resolver.resolve("/webcontainer/preview/abc123//dashboard"),
            "/dashboard"
        );
    }

    #[test]
    fn test_resolve_for_known_session() {
        let resolver = PathResolver::new();

        assert_eq!(
            resolver.resolve_for("abc123", "/webcontainer/preview/abc123/dashboard"),
            "/dashboard"
        );
        assert_eq!(
            resolver.resolve_for("abc123", "/webcontainer/preview/abc123"),
            "/"
        );
        // Different session under the same prefix still resolves generically
        assert_eq!(
            resolver.resolve_for("abc123", "/webcontainer/preview/xyz999/docs"),
            "/docs"
        );
    }

    #[test]
    fn test_custom_prefix_normalized() {
        let resolver = PathResolver::with_prefix("sandbox/view/");

        assert_eq!(resolver.prefix(), "/sandbox/view");
        assert_eq!(resolver.resolve("/sandbox/view/abc123/home"), "/home");
    }
}
