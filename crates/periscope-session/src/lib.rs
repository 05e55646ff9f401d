//! Periscope session management
//!
//! A preview session pairs a sandbox session identifier with the route
//! currently displayed in the embedded frame. The coordinator drives one
//! mounted view: it derives the preview address, applies it to the frame,
//! announces readiness on the shared channel, and reloads the frame when
//! other views report changes.

mod coordinator;
mod error;
mod session;
mod status;

pub use coordinator::PreviewCoordinator;
pub use error::SessionError;
pub use session::PreviewSession;
pub use status::PreviewStatus;

pub type Result<T> = std::result::Result<T, SessionError>;
