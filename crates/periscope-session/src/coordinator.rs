//! Preview session coordinator
//!
//! Drives one mounted preview view: derives the address from the inbound
//! request, applies it to the frame, announces readiness on the shared
//! channel, and force-reloads the frame when another view reports a refresh
//! or a file change. Inbound failures never escape; they degrade to a
//! visible status on the session.

use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::task::JoinHandle;

use periscope_frame::{FrameController, FrameEvent, NavigableSurface};
use periscope_routing::{AddressBuilder, PathResolver};
use periscope_sync::{MessageBus, SyncMessage};

use crate::session::PreviewSession;
use crate::status::PreviewStatus;
use crate::Result;

struct ViewState {
    session: PreviewSession,
    frame: FrameController,
}

pub struct PreviewCoordinator {
    state: Arc<RwLock<ViewState>>,
    resolver: PathResolver,
    builder: AddressBuilder,
    bus: Option<Arc<dyn MessageBus>>,
    channel: String,
    listener: Option<JoinHandle<()>>,
}

impl PreviewCoordinator {
    /// Mount a preview view for a sandbox session.
    ///
    /// Resolves the route, derives the address, applies it to the frame and
    /// announces readiness. Mounting without a bus is the degraded mode:
    /// the view works locally and exchanges no cross-context signals.
    pub fn mount(
        session_id: &str,
        request_path: &str,
        surface: impl NavigableSurface + 'static,
        resolver: PathResolver,
        builder: AddressBuilder,
        bus: Option<Arc<dyn MessageBus>>,
        channel: impl Into<String>,
    ) -> Result<Self> {
        let path = resolver.resolve(request_path);
        let address = builder.build(session_id, &path)?;

        let mut session =
            PreviewSession::new(session_id.to_string(), path.clone(), address.clone())?;
        let mut frame = FrameController::new(surface);

        frame.set_address(&address)?;
        session.begin_loading()?;

        tracing::info!(
            view_id = %session.id,
            session_id = %session.session_id,
            path = %path,
            address = %address,
            "Mounted preview view"
        );

        let coordinator = Self {
            state: Arc::new(RwLock::new(ViewState { session, frame })),
            resolver,
            builder,
            bus,
            channel: channel.into(),
            listener: None,
        };

        coordinator.announce_ready();

        Ok(coordinator)
    }

    /// Subscribe to the shared channel and pump inbound messages.
    ///
    /// A no-op when no bus is available or a listener is already running.
    pub fn listen(&mut self) {
        if self.listener.is_some() {
            return;
        }

        let Some(bus) = self.bus.clone() else {
            tracing::debug!("No message bus available; cross-context sync disabled");
            return;
        };

        let mut receiver = bus.subscribe(&self.channel);
        let state = Arc::clone(&self.state);

        let handle = tokio::spawn(async move {
            loop {
                match receiver.recv().await {
                    Ok(message) => apply_message(&state, &message),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "Sync listener lagged; messages dropped");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        self.listener = Some(handle);
    }

    pub fn is_listening(&self) -> bool {
        self.listener.is_some()
    }

    /// Apply one inbound synchronization message.
    ///
    /// Messages for a foreign session have no observable effect.
    pub fn handle_message(&self, message: &SyncMessage) {
        apply_message(&self.state, message);
    }

    /// Apply a load outcome reported by the embedding surface.
    pub fn handle_frame_event(&self, event: FrameEvent) {
        match event {
            FrameEvent::Loaded => {
                let announced = {
                    let mut state = self.state.write();
                    match state.session.mark_ready() {
                        Ok(()) => {
                            tracing::info!(
                                session_id = %state.session.session_id,
                                address = %state.session.address,
                                "Preview frame loaded"
                            );
                            true
                        }
                        Err(e) => {
                            tracing::warn!(error = %e, "Load event ignored");
                            false
                        }
                    }
                };

                if announced {
                    self.announce_ready();
                }
            }
            FrameEvent::LoadFailed(reason) => {
                let mut state = self.state.write();

                tracing::error!(
                    session_id = %state.session.session_id,
                    address = %state.session.address,
                    reason = %reason,
                    "Preview frame failed to load"
                );

                // Captured and reflected as status; no automatic retry
                if let Err(e) = state.session.mark_error() {
                    tracing::warn!(error = %e, "Error event ignored");
                }
            }
        }
    }

    /// Navigate the mounted view to a new request path.
    pub fn navigate(&self, request_path: &str) -> Result<()> {
        {
            let mut state = self.state.write();

            let path = self
                .resolver
                .resolve_for(&state.session.session_id, request_path);
            let address = self.builder.build(&state.session.session_id, &path)?;

            state.frame.set_address(&address)?;
            state.session.navigate(path, address);
            state.session.begin_loading()?;
        }

        self.announce_ready();

        Ok(())
    }

    /// Force-reload the frame locally, same semantics as an inbound refresh.
    pub fn refresh(&self) {
        let mut state = self.state.write();

        if state.frame.current_address().is_none() {
            return;
        }

        state.frame.force_reload();

        if let Err(e) = state.session.begin_loading() {
            tracing::warn!(error = %e, "Status not updated on reload");
        }
    }

    pub fn status(&self) -> PreviewStatus {
        self.state.read().session.status
    }

    pub fn session(&self) -> PreviewSession {
        self.state.read().session.clone()
    }

    pub fn address(&self) -> String {
        self.state.read().session.address.clone()
    }

    /// Tear the view down: close the channel subscription synchronously.
    ///
    /// A navigation already in flight is abandoned, not cancelled; nothing
    /// observes its completion anymore.
    pub fn unmount(&mut self) {
        if let Some(handle) = self.listener.take() {
            handle.abort();

            tracing::debug!(
                session_id = %self.state.read().session.session_id,
                "Closed sync listener"
            );
        }
    }

    fn announce_ready(&self) {
        let Some(bus) = &self.bus else {
            return;
        };

        let (session_id, address) = {
            let state = self.state.read();
            (
                state.session.session_id.clone(),
                state.session.address.clone(),
            )
        };

        let message = SyncMessage::preview_ready(&session_id, &address);
        if let Err(e) = bus.publish(&self.channel, message) {
            tracing::warn!(
                session_id = %session_id,
                error = %e,
                "Failed to announce preview readiness"
            );
        }
    }
}

impl Drop for PreviewCoordinator {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn apply_message(state: &RwLock<ViewState>, message: &SyncMessage) {
    let mut state = state.write();

    if !message.is_for(&state.session.session_id) {
        return;
    }

    if message.requests_reload() {
        if state.frame.current_address().is_none() {
            tracing::debug!(
                session_id = %state.session.session_id,
                kind = %message.kind,
                "Reload request ignored: no address applied"
            );
            return;
        }

        tracing::info!(
            session_id = %state.session.session_id,
            kind = %message.kind,
            "Reloading preview on inbound signal"
        );

        state.frame.force_reload();

        if let Err(e) = state.session.begin_loading() {
            tracing::warn!(error = %e, "Status not updated on reload");
        }
    } else {
        // Another view of the same session came up; observe only
        tracing::trace!(
            session_id = %state.session.session_id,
            address = ?message.address,
            "Observed readiness from another view"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use periscope_frame::RecordingSurface;
    use periscope_routing::RoutingError;
    use periscope_sync::{LocalBus, MessageKind, PREVIEW_CHANNEL};
    use std::time::Duration;

    use crate::error::SessionError;

    fn mount(
        session_id: &str,
        request_path: &str,
        surface: RecordingSurface,
        bus: Option<Arc<dyn MessageBus>>,
    ) -> Result<PreviewCoordinator> {
        PreviewCoordinator::mount(
            session_id,
            request_path,
            surface,
            PathResolver::new(),
            AddressBuilder::new(),
            bus,
            PREVIEW_CHANNEL,
        )
    }

    #[test]
    fn test_mount_derives_address_and_loads() {
        let surface = RecordingSurface::new();
        let coordinator = mount(
            "abc123",
            "/webcontainer/preview/abc123/dashboard",
            surface.clone(),
            None,
        )
        .unwrap();

        assert_eq!(coordinator.status(), PreviewStatus::Loading);
        assert_eq!(
            coordinator.address(),
            "https://abc123.local-credentialless.webcontainer-api.io/dashboard"
        );
        assert_eq!(
            surface.assignments(),
            vec!["https://abc123.local-credentialless.webcontainer-api.io/dashboard".to_string()]
        );
    }

    #[test]
    fn test_mount_without_route_lands_on_root() {
        let coordinator = mount(
            "abc123",
            "/webcontainer/preview/abc123",
            RecordingSurface::new(),
            None,
        )
        .unwrap();

        assert_eq!(coordinator.session().path, "/");
        assert!(coordinator.address().ends_with('/'));
    }

    #[test]
    fn test_mount_rejects_missing_session() {
        let result = mount("", "/webcontainer/preview/", RecordingSurface::new(), None);

        assert!(matches!(
            result,
            Err(SessionError::Routing(RoutingError::MissingSessionId))
        ));
    }

    #[test]
    fn test_mount_announces_readiness() {
        let bus: Arc<dyn MessageBus> = Arc::new(LocalBus::new());
        let mut receiver = bus.subscribe(PREVIEW_CHANNEL);

        let _coordinator = mount(
            "abc123",
            "/webcontainer/preview/abc123",
            RecordingSurface::new(),
            Some(Arc::clone(&bus)),
        )
        .unwrap();

        let message = receiver.try_recv().unwrap();
        assert_eq!(message.kind, MessageKind::PreviewReady);
        assert_eq!(message.session_id, "abc123");
        assert_eq!(
            message.address.as_deref(),
            Some("https://abc123.local-credentialless.webcontainer-api.io/")
        );
    }

    #[test]
    fn test_loaded_event_settles_and_reannounces() {
        let bus: Arc<dyn MessageBus> = Arc::new(LocalBus::new());
        let mut receiver = bus.subscribe(PREVIEW_CHANNEL);

        let coordinator = mount(
            "abc123",
            "/webcontainer/preview/abc123",
            RecordingSurface::new(),
            Some(Arc::clone(&bus)),
        )
        .unwrap();
        receiver.try_recv().unwrap();

        coordinator.handle_frame_event(FrameEvent::Loaded);

        assert_eq!(coordinator.status(), PreviewStatus::Ready);
        assert_eq!(
            receiver.try_recv().unwrap().kind,
            MessageKind::PreviewReady
        );
    }

    #[test]
    fn test_failed_event_settles_without_retry() {
        let surface = RecordingSurface::new();
        let coordinator = mount(
            "abc123",
            "/webcontainer/preview/abc123",
            surface.clone(),
            None,
        )
        .unwrap();

        coordinator.handle_frame_event(FrameEvent::LoadFailed("gateway timeout".to_string()));

        assert_eq!(coordinator.status(), PreviewStatus::Error);
        // No retry: the only assignment is the mount navigation
        assert_eq!(surface.assignments().len(), 1);
    }

    #[test]
    fn test_foreign_session_message_has_no_effect() {
        let surface = RecordingSurface::new();
        let coordinator = mount(
            "abc123",
            "/webcontainer/preview/abc123",
            surface.clone(),
            None,
        )
        .unwrap();
        coordinator.handle_frame_event(FrameEvent::Loaded);

        coordinator.handle_message(&SyncMessage::file_change("xyz999"));

        assert_eq!(coordinator.status(), PreviewStatus::Ready);
        assert_eq!(surface.assignments().len(), 1);
    }

    #[test]
    fn test_refresh_and_file_change_reload_identically() {
        for message in [
            SyncMessage::refresh_preview("abc123"),
            SyncMessage::file_change("abc123"),
        ] {
            let surface = RecordingSurface::new();
            let coordinator = mount(
                "abc123",
                "/webcontainer/preview/abc123",
                surface.clone(),
                None,
            )
            .unwrap();
            coordinator.handle_frame_event(FrameEvent::Loaded);

            coordinator.handle_message(&message);

            let address = "https://abc123.local-credentialless.webcontainer-api.io/";
            assert_eq!(
                surface.assignments(),
                vec![address.to_string(), String::new(), address.to_string()]
            );
            assert_eq!(coordinator.status(), PreviewStatus::Loading);
        }
    }

    #[test]
    fn test_inbound_readiness_does_not_reload() {
        let surface = RecordingSurface::new();
        let coordinator = mount(
            "abc123",
            "/webcontainer/preview/abc123",
            surface.clone(),
            None,
        )
        .unwrap();

        coordinator.handle_message(&SyncMessage::preview_ready(
            "abc123",
            "https://abc123.local-credentialless.webcontainer-api.io/",
        ));

        assert_eq!(surface.assignments().len(), 1);
        assert_eq!(coordinator.status(), PreviewStatus::Loading);
    }

    #[test]
    fn test_navigate_recomputes_address() {
        let bus: Arc<dyn MessageBus> = Arc::new(LocalBus::new());
        let mut receiver = bus.subscribe(PREVIEW_CHANNEL);

        let surface = RecordingSurface::new();
        let coordinator = mount(
            "abc123",
            "/webcontainer/preview/abc123",
            surface.clone(),
            Some(Arc::clone(&bus)),
        )
        .unwrap();
        coordinator.handle_frame_event(FrameEvent::Loaded);
        while receiver.try_recv().is_ok() {}

        coordinator
            .navigate("/webcontainer/preview/abc123/settings")
            .unwrap();

        assert_eq!(coordinator.session().path, "/settings");
        assert_eq!(coordinator.status(), PreviewStatus::Loading);
        assert_eq!(
            surface.last(),
            Some("https://abc123.local-credentialless.webcontainer-api.io/settings".to_string())
        );
        assert_eq!(
            receiver.try_recv().unwrap().kind,
            MessageKind::PreviewReady
        );
    }

    #[test]
    fn test_local_refresh_reloads() {
        let surface = RecordingSurface::new();
        let coordinator = mount(
            "abc123",
            "/webcontainer/preview/abc123",
            surface.clone(),
            None,
        )
        .unwrap();
        coordinator.handle_frame_event(FrameEvent::Loaded);

        coordinator.refresh();

        assert_eq!(surface.assignments().len(), 3);
        assert_eq!(coordinator.status(), PreviewStatus::Loading);
    }

    #[tokio::test]
    async fn test_listener_reloads_matching_view_only() {
        let bus: Arc<dyn MessageBus> = Arc::new(LocalBus::new());

        let matching = RecordingSurface::new();
        let mut watcher = mount(
            "abc123",
            "/webcontainer/preview/abc123",
            matching.clone(),
            Some(Arc::clone(&bus)),
        )
        .unwrap();
        watcher.listen();
        assert!(watcher.is_listening());

        let foreign = RecordingSurface::new();
        let mut bystander = mount(
            "xyz999",
            "/webcontainer/preview/xyz999",
            foreign.clone(),
            Some(Arc::clone(&bus)),
        )
        .unwrap();
        bystander.listen();

        // A third context reports a file change for abc123
        bus.publish(PREVIEW_CHANNEL, SyncMessage::file_change("abc123"))
            .unwrap();

        for _ in 0..100 {
            if matching.assignments().len() == 3 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }

        assert_eq!(matching.assignments().len(), 3);
        assert_eq!(foreign.assignments().len(), 1);
    }

    #[tokio::test]
    async fn test_unmount_closes_subscription() {
        let bus: Arc<dyn MessageBus> = Arc::new(LocalBus::new());

        let surface = RecordingSurface::new();
        let mut coordinator = mount(
            "abc123",
            "/webcontainer/preview/abc123",
            surface.clone(),
            Some(Arc::clone(&bus)),
        )
        .unwrap();
        coordinator.listen();

        coordinator.unmount();
        assert!(!coordinator.is_listening());

        bus.publish(PREVIEW_CHANNEL, SyncMessage::refresh_preview("abc123"))
            .unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(surface.assignments().len(), 1);
    }

    #[test]
    fn test_degraded_mode_without_bus() {
        let mut coordinator = mount(
            "abc123",
            "/webcontainer/preview/abc123/docs",
            RecordingSurface::new(),
            None,
        )
        .unwrap();

        // Not an error: the view works locally with no cross-context sync
        coordinator.listen();
        assert!(!coordinator.is_listening());
        assert_eq!(coordinator.session().path, "/docs");
    }
}
