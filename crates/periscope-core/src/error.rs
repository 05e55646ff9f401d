//! Core error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Routing error: {0}")]
    Routing(#[from] periscope_routing::RoutingError),

    #[error("Frame error: {0}")]
    Frame(#[from] periscope_frame::FrameError),

    #[error("Session error: {0}")]
    Session(#[from] periscope_session::SessionError),

    #[error("Sync error: {0}")]
    Sync(#[from] periscope_sync::SyncError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Preview ID is required")]
    MissingSessionId,
}

impl CoreError {
    /// Whether this failure is a client-side configuration error.
    ///
    /// Configuration errors are fatal to the single request that carried
    /// them and map to HTTP 400 at the host.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            CoreError::MissingSessionId
                | CoreError::Routing(_)
                | CoreError::Session(periscope_session::SessionError::MissingSessionId)
        )
    }
}
