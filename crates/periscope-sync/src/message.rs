//! Synchronization wire message
//!
//! Transient records exchanged between viewing contexts; serialized for the
//! wire, never persisted. A message targets one sandbox session; receivers
//! drop messages for foreign sessions.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Channel name shared by every preview view in the application.
pub const PREVIEW_CHANNEL: &str = "preview-updates";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageKind {
    /// A view computed or successfully loaded its preview address
    PreviewReady,
    /// An explicit request to reload the preview
    RefreshPreview,
    /// Project files changed in the sandbox
    FileChange,
}

impl MessageKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageKind::PreviewReady => "preview-ready",
            MessageKind::RefreshPreview => "refresh-preview",
            MessageKind::FileChange => "file-change",
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MessageKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "preview-ready" => Ok(MessageKind::PreviewReady),
            "refresh-preview" => Ok(MessageKind::RefreshPreview),
            "file-change" => Ok(MessageKind::FileChange),
            _ => Err(format!("Unknown message kind: {}", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncMessage {
    pub kind: MessageKind,
    /// Sandbox session the message targets
    pub session_id: String,
    /// Preview address, present on `preview-ready`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Emission time, Unix milliseconds
    pub timestamp: i64,
}

impl SyncMessage {
    pub fn preview_ready(session_id: impl Into<String>, address: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::PreviewReady,
            session_id: session_id.into(),
            address: Some(address.into()),
            timestamp: now_ms(),
        }
    }

    pub fn refresh_preview(session_id: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::RefreshPreview,
            session_id: session_id.into(),
            address: None,
            timestamp: now_ms(),
        }
    }

    pub fn file_change(session_id: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::FileChange,
            session_id: session_id.into(),
            address: None,
            timestamp: now_ms(),
        }
    }

    /// Whether this message targets the given session
    pub fn is_for(&self, session_id: &str) -> bool {
        self.session_id == session_id
    }

    /// Whether a receiver should force-reload its frame.
    ///
    /// Refresh requests and file changes are handled identically; they
    /// differ only in the originating reason.
    pub fn requests_reload(&self) -> bool {
        matches!(
            self.kind,
            MessageKind::RefreshPreview | MessageKind::FileChange
        )
    }
}

fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}
