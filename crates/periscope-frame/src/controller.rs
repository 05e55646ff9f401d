//! Frame controller
//!
//! Tracks the address currently applied to the surface and performs the
//! two-phase forced reload. Load and error outcomes are reported by the
//! host as frame events; the controller itself never retries.

use url::Url;

use crate::error::FrameError;
use crate::sandbox::SandboxPolicy;
use crate::surface::NavigableSurface;
use crate::Result;

/// Outcome reported by the embedding surface for an applied address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameEvent {
    /// The surface finished loading the applied address
    Loaded,
    /// The surface failed to load the applied address
    LoadFailed(String),
}

pub struct FrameController {
    surface: Box<dyn NavigableSurface>,
    /// Last address applied to the surface
    current: Option<String>,
    sandbox: SandboxPolicy,
}

impl FrameController {
    pub fn new(surface: impl NavigableSurface + 'static) -> Self {
        Self {
            surface: Box::new(surface),
            current: None,
            sandbox: SandboxPolicy::default(),
        }
    }

    pub fn with_sandbox(surface: impl NavigableSurface + 'static, sandbox: SandboxPolicy) -> Self {
        Self {
            surface: Box::new(surface),
            current: None,
            sandbox,
        }
    }

    pub fn sandbox(&self) -> &SandboxPolicy {
        &self.sandbox
    }

    pub fn current_address(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Apply an address as the surface's navigation target.
    pub fn set_address(&mut self, address: &str) -> Result<()> {
        if Url::parse(address).is_err() {
            return Err(FrameError::InvalidAddress(address.to_string()));
        }

        tracing::debug!(address = %address, "Applying frame address");

        self.surface.attach(address);
        self.current = Some(address.to_string());

        Ok(())
    }

    /// Reload the surface even when the target address is unchanged.
    ///
    /// Detaches the current target, then attaches it again; re-assigning an
    /// identical target alone would be swallowed by the surface. A no-op
    /// when no address has ever been applied.
    pub fn force_reload(&mut self) {
        let Some(address) = self.current.clone() else {
            tracing::debug!("Forced reload skipped: no address applied");
            return;
        };

        tracing::debug!(address = %address, "Forcing frame reload");

        self.surface.detach();
        self.surface.attach(&address);
    }
}
