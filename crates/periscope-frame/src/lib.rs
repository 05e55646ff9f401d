//! Periscope frame control
//!
//! Owns the address applied to the embedded, sandboxed display surface and
//! the forced-reload dance. The surface itself is a capability: hosts hand
//! in whatever can navigate (a webview, an embedded frame, an in-memory
//! recorder for tests) and the controller stays host-agnostic.

mod controller;
mod error;
mod sandbox;
mod surface;

pub use controller::{FrameController, FrameEvent};
pub use error::FrameError;
pub use sandbox::{SandboxPolicy, EMBED_PERMISSIONS};
pub use surface::{NavigableSurface, RecordingSurface};

pub type Result<T> = std::result::Result<T, FrameError>;
