//! Preview status state machine
//!
//! ```text
//! Initializing
//!   ↓ address computed
//! Loading
//!   ↓ load event          ↓ error event
//! Ready                  Error
//!   ↓ forced reload        ↓ forced reload
//! Loading                Loading
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewStatus {
    /// No address derived yet
    Initializing,
    /// Address applied, navigation in flight
    Loading,
    /// The frame reported a successful load
    Ready,
    /// The frame reported a load failure
    Error,
}

impl PreviewStatus {
    /// Check if transition to another status is valid
    pub fn can_transition_to(&self, target: PreviewStatus) -> bool {
        match (self, target) {
            // The first computed address starts a load
            (PreviewStatus::Initializing, PreviewStatus::Loading) => true,
            // A load in flight settles one way or the other
            (PreviewStatus::Loading, PreviewStatus::Ready) => true,
            (PreviewStatus::Loading, PreviewStatus::Error) => true,
            // A forced reload starts a fresh load from either settled state
            (PreviewStatus::Ready, PreviewStatus::Loading) => true,
            (PreviewStatus::Error, PreviewStatus::Loading) => true,
            // Same status is always valid (no-op)
            (a, b) if *a == b => true,
            // All other transitions are invalid
            _ => false,
        }
    }

    /// Returns true once a load outcome has been observed
    pub fn is_settled(&self) -> bool {
        matches!(self, PreviewStatus::Ready | PreviewStatus::Error)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PreviewStatus::Initializing => "initializing",
            PreviewStatus::Loading => "loading",
            PreviewStatus::Ready => "ready",
            PreviewStatus::Error => "error",
        }
    }
}

impl std::fmt::Display for PreviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PreviewStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "initializing" => Ok(PreviewStatus::Initializing),
            "loading" => Ok(PreviewStatus::Loading),
            "ready" => Ok(PreviewStatus::Ready),
            "error" => Ok(PreviewStatus::Error),
            _ => Err(format!("Unknown preview status: {}", s)),
        }
    }
}
