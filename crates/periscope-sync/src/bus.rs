//! Message bus capability
//!
//! The bus is injected wherever cross-context signals are needed so that
//! hosts can substitute their own transport and tests can observe traffic
//! in memory. Publication is best-effort and fire-and-forget; there is no
//! delivery acknowledgment.

use parking_lot::RwLock;
use std::collections::HashMap;
use tokio::sync::broadcast;

use crate::message::SyncMessage;
use crate::Result;

pub trait MessageBus: Send + Sync {
    /// Publish a message on a named channel. No subscribers is not an error.
    fn publish(&self, channel: &str, message: SyncMessage) -> Result<()>;

    /// Subscribe to every message subsequently published on a named channel,
    /// by any publisher. Filtering by session happens at the receiver.
    fn subscribe(&self, channel: &str) -> broadcast::Receiver<SyncMessage>;
}

/// In-memory bus for same-process contexts and tests.
#[derive(Default)]
pub struct LocalBus {
    channels: RwLock<HashMap<String, broadcast::Sender<SyncMessage>>>,
}

impl LocalBus {
    pub fn new() -> Self {
        Self::default()
    }

    fn sender_for(&self, channel: &str) -> broadcast::Sender<SyncMessage> {
        let mut guard = self.channels.write();
        guard
            .entry(channel.to_string())
            .or_insert_with(|| broadcast::channel(64).0)
            .clone()
    }
}

impl MessageBus for LocalBus {
    fn publish(&self, channel: &str, message: SyncMessage) -> Result<()> {
        let sender = self.sender_for(channel);

        if sender.send(message).is_err() {
            // Fire-and-forget: nobody listening yet
            tracing::trace!(channel = %channel, "Published with no subscribers");
        }

        Ok(())
    }

    fn subscribe(&self, channel: &str) -> broadcast::Receiver<SyncMessage> {
        self.sender_for(channel).subscribe()
    }
}
