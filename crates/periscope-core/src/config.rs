//! Preview configuration

use serde::{Deserialize, Serialize};

use periscope_routing::{AddressBuilder, PathResolver, DEFAULT_HOST_SUFFIX, DEFAULT_ROUTE_PREFIX};
use periscope_sync::PREVIEW_CHANNEL;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Routing prefix the preview surface is mounted under
    pub route_prefix: String,
    /// Host suffix of the sandbox runtime's gateway
    pub host_suffix: String,
    /// Synchronization channel name shared by every view
    pub channel: String,
    /// Bind address for the HTTP host
    pub bind_addr: String,
}

impl Config {
    pub fn resolver(&self) -> PathResolver {
        PathResolver::with_prefix(&self.route_prefix)
    }

    pub fn builder(&self) -> AddressBuilder {
        AddressBuilder::with_host_suffix(&self.host_suffix)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            route_prefix: DEFAULT_ROUTE_PREFIX.to_string(),
            host_suffix: DEFAULT_HOST_SUFFIX.to_string(),
            channel: PREVIEW_CHANNEL.to_string(),
            bind_addr: "127.0.0.1:4177".to_string(),
        }
    }
}
