//! Periscope Core
//!
//! Central coordination layer for the Periscope preview system: validated
//! inbound requests, derived preview addresses, mounted view coordinators
//! and the collaborator hooks that fan refresh signals out to every view.

mod config;
mod error;
mod previewer;

pub use config::Config;
pub use error::CoreError;
pub use previewer::{PreviewRequest, Previewer};

// Re-export core components
pub use periscope_frame::{
    FrameController, FrameError, FrameEvent, NavigableSurface, RecordingSurface, SandboxPolicy,
    EMBED_PERMISSIONS,
};
pub use periscope_routing::{
    AddressBuilder, PathResolver, RoutingError, DEFAULT_HOST_SUFFIX, DEFAULT_ROUTE_PREFIX,
};
pub use periscope_session::{PreviewCoordinator, PreviewSession, PreviewStatus, SessionError};
pub use periscope_sync::{
    LocalBus, MessageBus, MessageKind, SyncError, SyncMessage, PREVIEW_CHANNEL,
};

pub type Result<T> = std::result::Result<T, CoreError>;

/// Initialize logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt().with_env_filter(filter).with_target(true).init();
}
