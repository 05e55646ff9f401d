//! Preview address building
//!
//! Each sandbox session is exposed by the runtime's gateway at a per-session
//! subdomain. The builder combines the session identifier and the normalized
//! route into the fully qualified address applied to the embedded frame.

use url::Url;

use crate::error::RoutingError;
use crate::path::normalize_route;
use crate::Result;

/// Host suffix of the sandbox runtime's gateway. Fixed contract with the
/// runtime; not chosen here.
pub const DEFAULT_HOST_SUFFIX: &str = "local-credentialless.webcontainer-api.io";

pub struct AddressBuilder {
    host_suffix: String,
}

impl AddressBuilder {
    pub fn new() -> Self {
        Self::with_host_suffix(DEFAULT_HOST_SUFFIX)
    }

    pub fn with_host_suffix(suffix: impl Into<String>) -> Self {
        let mut suffix: String = suffix.into();
        while suffix.ends_with('/') {
            suffix.pop();
        }
        let suffix = suffix.trim_start_matches('.').to_string();

        Self { host_suffix: suffix }
    }

    pub fn host_suffix(&self) -> &str {
        &self.host_suffix
    }

    /// Build the preview address for a session and route.
    ///
    /// Pure: repeated calls with the same inputs yield the same address.
    /// The route always contributes exactly one leading `/`, so the host
    /// part and the path part never collide into a double separator.
    pub fn build(&self, session_id: &str, path: &str) -> Result<String> {
        let session_id = session_id.trim();
        if session_id.is_empty() {
            return Err(RoutingError::MissingSessionId);
        }
        if session_id
            .chars()
            .any(|c| c == '/' || c == '?' || c == '#' || c == '.' || c.is_whitespace())
        {
            return Err(RoutingError::InvalidSessionId(session_id.to_string()));
        }

        let route = normalize_route(path);
        let address = format!("https://{}.{}{}", session_id, self.host_suffix, route);

        if Url::parse(&address).is_err() {
            return Err(RoutingError::InvalidAddress(address));
        }

        Ok(address)
    }
}

impl Default for AddressBuilder {
    fn default() -> Self {
        Self::new()
    }
}
