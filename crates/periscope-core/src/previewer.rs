//! Previewer facade
//!
//! Host-facing entry point: validates inbound requests, derives preview
//! addresses, mounts coordinators and carries the collaborator hooks that
//! publish refresh and file-change signals.

use serde::Serialize;
use std::sync::Arc;

use periscope_frame::NavigableSurface;
use periscope_routing::{AddressBuilder, PathResolver};
use periscope_session::PreviewCoordinator;
use periscope_sync::{LocalBus, MessageBus, SyncMessage};

use crate::config::Config;
use crate::error::CoreError;
use crate::Result;

/// Validated inbound preview request
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    pub session_id: String,
    pub path: String,
}

pub struct Previewer {
    config: Config,
    resolver: PathResolver,
    builder: AddressBuilder,
    bus: Option<Arc<dyn MessageBus>>,
}

impl Previewer {
    /// Previewer with an in-process bus.
    pub fn new(config: Config) -> Self {
        let bus: Arc<dyn MessageBus> = Arc::new(LocalBus::new());
        Self::with_bus(config, bus)
    }

    pub fn with_bus(config: Config, bus: Arc<dyn MessageBus>) -> Self {
        let resolver = config.resolver();
        let builder = config.builder();

        Self {
            config,
            resolver,
            builder,
            bus: Some(bus),
        }
    }

    /// Degraded mode: no publish/subscribe primitive on this host.
    ///
    /// Views still resolve, mount and navigate; they exchange no
    /// cross-context signals. This is not an error.
    pub fn without_bus(config: Config) -> Self {
        let resolver = config.resolver();
        let builder = config.builder();

        Self {
            config,
            resolver,
            builder,
            bus: None,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn bus(&self) -> Option<Arc<dyn MessageBus>> {
        self.bus.clone()
    }

    /// Validate an inbound request and resolve its in-preview route.
    ///
    /// A missing or blank session identifier is a client error; no session
    /// is created for it.
    pub fn resolve_request(
        &self,
        session_id: Option<&str>,
        request_path: &str,
    ) -> Result<PreviewRequest> {
        let session_id = session_id
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .ok_or(CoreError::MissingSessionId)?;

        Ok(PreviewRequest {
            session_id: session_id.to_string(),
            path: self.resolver.resolve(request_path),
        })
    }

    /// Derive the preview address for a session and route.
    pub fn build_address(&self, session_id: &str, path: &str) -> Result<String> {
        Ok(self.builder.build(session_id, path)?)
    }

    /// Mount a coordinator for a view of the given sandbox session.
    pub fn mount(
        &self,
        session_id: &str,
        request_path: &str,
        surface: impl NavigableSurface + 'static,
    ) -> Result<PreviewCoordinator> {
        Ok(PreviewCoordinator::mount(
            session_id,
            request_path,
            surface,
            self.config.resolver(),
            self.config.builder(),
            self.bus.clone(),
            self.config.channel.clone(),
        )?)
    }

    /// Collaborator hook: ask every view of a session to reload.
    pub fn notify_refresh(&self, session_id: &str) -> Result<()> {
        self.publish(SyncMessage::refresh_preview(session_id))
    }

    /// Collaborator hook: report a sandbox file change for a session.
    pub fn notify_file_change(&self, session_id: &str) -> Result<()> {
        self.publish(SyncMessage::file_change(session_id))
    }

    fn publish(&self, message: SyncMessage) -> Result<()> {
        let Some(bus) = &self.bus else {
            tracing::debug!(
                kind = %message.kind,
                session_id = %message.session_id,
                "Signal dropped: no message bus available"
            );
            return Ok(());
        };

        bus.publish(&self.config.channel, message)?;
        Ok(())
    }
}
