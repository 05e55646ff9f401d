//! Periscope synchronization channel
//!
//! Independent viewing contexts showing the same sandbox session exchange
//! readiness and refresh signals over a shared publish/subscribe channel.
//! The channel name is fixed for the whole application; receivers filter by
//! session identifier. Hosts without a publish/subscribe primitive simply
//! run without a bus and stay consistent locally.

mod bus;
mod error;
mod message;

pub use bus::{LocalBus, MessageBus};
pub use error::SyncError;
pub use message::{MessageKind, SyncMessage, PREVIEW_CHANNEL};

pub type Result<T> = std::result::Result<T, SyncError>;
