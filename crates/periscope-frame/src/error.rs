//! Frame error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrameError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}
