//! Preview session data structure

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SessionError;
use crate::status::PreviewStatus;
use crate::Result;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreviewSession {
    /// Unique identifier for this mounted view; two views of the same
    /// sandbox session have distinct ids
    pub id: String,
    /// Sandbox session this view displays, minted by the runtime
    pub session_id: String,
    /// Current route within the preview, `/`-rooted
    pub path: String,
    /// Derived preview address; always a function of (session_id, path)
    pub address: String,
    /// Current status in the state machine
    pub status: PreviewStatus,
    /// When the view was mounted
    pub created_at: DateTime<Utc>,
    /// Last modification time
    pub updated_at: DateTime<Utc>,
}

impl PreviewSession {
    pub fn new(session_id: String, path: String, address: String) -> Result<Self> {
        if session_id.trim().is_empty() {
            return Err(SessionError::MissingSessionId);
        }

        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            session_id,
            path,
            address,
            status: PreviewStatus::Initializing,
            created_at: now,
            updated_at: now,
        })
    }

    /// Attempt to transition to a new status
    pub fn transition_to(&mut self, new_status: PreviewStatus) -> Result<()> {
        if !self.status.can_transition_to(new_status) {
            return Err(SessionError::InvalidTransition {
                from: self.status.to_string(),
                to: new_status.to_string(),
            });
        }

        tracing::debug!(
            view_id = %self.id,
            session_id = %self.session_id,
            from = %self.status,
            to = %new_status,
            "Preview status transition"
        );

        self.status = new_status;
        self.updated_at = Utc::now();

        Ok(())
    }

    /// A navigation is now in flight
    pub fn begin_loading(&mut self) -> Result<()> {
        self.transition_to(PreviewStatus::Loading)
    }

    /// The frame reported a successful load
    pub fn mark_ready(&mut self) -> Result<()> {
        self.transition_to(PreviewStatus::Ready)
    }

    /// The frame reported a load failure
    pub fn mark_error(&mut self) -> Result<()> {
        self.transition_to(PreviewStatus::Error)
    }

    /// Update route and derived address (navigation within the view)
    pub fn navigate(&mut self, path: String, address: String) {
        self.path = path;
        self.address = address;
        self.updated_at = Utc::now();
    }
}
