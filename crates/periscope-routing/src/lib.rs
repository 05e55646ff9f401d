//! Periscope routing
//!
//! Turns an inbound request path into an in-preview route and combines it
//! with a sandbox session identifier into the fully qualified preview
//! address served by the sandbox runtime's gateway.

mod address;
mod error;
mod path;

pub use address::{AddressBuilder, DEFAULT_HOST_SUFFIX};
pub use error::RoutingError;
pub use path::{PathResolver, DEFAULT_ROUTE_PREFIX};

pub type Result<T> = std::result::Result<T, RoutingError>;
