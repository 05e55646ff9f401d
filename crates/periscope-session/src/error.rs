//! Session error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session ID is required")]
    MissingSessionId,

    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Routing error: {0}")]
    Routing(#[from] periscope_routing::RoutingError),

    #[error("Frame error: {0}")]
    Frame(#[from] periscope_frame::FrameError),
}
