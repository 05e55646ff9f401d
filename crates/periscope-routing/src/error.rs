//! Routing error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RoutingError {
    #[error("Session ID is required")]
    MissingSessionId,

    #[error("Invalid session ID: {0}")]
    InvalidSessionId(String),

    #[error("Invalid preview address: {0}")]
    InvalidAddress(String),
}
