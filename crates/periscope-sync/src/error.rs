//! Synchronization error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("Sync channel closed")]
    Closed,

    #[error("Sync transport error: {0}")]
    Transport(String),
}
