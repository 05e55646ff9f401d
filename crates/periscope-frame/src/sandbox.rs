//! Sandbox capability policy
//!
//! The embedded surface runs untrusted project output, so capabilities are
//! an explicit allow-list. Top-level navigation out of the sandbox has no
//! flag here on purpose: it can never be granted.

use serde::{Deserialize, Serialize};

/// Permission the embed requests from the host document.
pub const EMBED_PERMISSIONS: &str = "cross-origin-isolated";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SandboxPolicy {
    pub scripts: bool,
    pub forms: bool,
    pub popups: bool,
    pub modals: bool,
    /// Storage access only after a user gesture
    pub storage_access_by_user_activation: bool,
    pub same_origin: bool,
}

impl SandboxPolicy {
    /// Render the allow-list as the embedding attribute string.
    pub fn attribute(&self) -> String {
        let mut tokens: Vec<&str> = Vec::with_capacity(6);

        if self.scripts {
            tokens.push("allow-scripts");
        }
        if self.forms {
            tokens.push("allow-forms");
        }
        if self.popups {
            tokens.push("allow-popups");
        }
        if self.modals {
            tokens.push("allow-modals");
        }
        if self.storage_access_by_user_activation {
            tokens.push("allow-storage-access-by-user-activation");
        }
        if self.same_origin {
            tokens.push("allow-same-origin");
        }

        tokens.join(" ")
    }
}

impl Default for SandboxPolicy {
    fn default() -> Self {
        Self {
            scripts: true,
            forms: true,
            popups: true,
            modals: true,
            storage_access_by_user_activation: true,
            same_origin: true,
        }
    }
}
