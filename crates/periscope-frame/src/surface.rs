//! Navigable surface capability
//!
//! On most embedding surfaces, re-assigning an identical navigation target
//! is a silent no-op. The capability therefore exposes reload as two
//! explicit phases: detach the current target, then attach one again. A
//! real surface may defer the attach to its next draw cycle.

use parking_lot::RwLock;
use std::sync::Arc;

pub trait NavigableSurface: Send + Sync {
    /// Clear the surface's current navigation target.
    fn detach(&mut self);

    /// Apply a navigation target to the surface.
    fn attach(&mut self, address: &str);
}

/// In-memory surface for tests and headless contexts.
///
/// Records every target assignment; `detach` records an empty assignment.
/// Clones share the same record, so a handle kept outside a controller
/// observes everything the controller does.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    assignments: Arc<RwLock<Vec<String>>>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every assignment made so far, in order
    pub fn assignments(&self) -> Vec<String> {
        self.assignments.read().clone()
    }

    /// The most recent assignment, if any
    pub fn last(&self) -> Option<String> {
        self.assignments.read().last().cloned()
    }
}

impl NavigableSurface for RecordingSurface {
    fn detach(&mut self) {
        self.assignments.write().push(String::new());
    }

    fn attach(&mut self, address: &str) {
        self.assignments.write().push(address.to_string());
    }
}
