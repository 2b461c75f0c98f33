use crate::backend::ViewerBackend;
use crate::core::{ContainerSize, OverlaySpec, Point, SourceDescriptor};
use crate::error::{ViewerError, ViewerResult};
use crate::events::{EventBus, EventKind, HandlerId, ViewerEvent};
use crate::fade::{FadeController, FadePhase};
use crate::scheduler::TimerQueue;

use super::controls::ControlRegistry;
use super::lifecycle::{DeferredTask, OpenRequests};
use super::viewer_config::ViewerConfig;

/// The open source and its bound subsystems.
///
/// Grouping them in one struct makes the all-or-none lifecycle invariant
/// structural: the viewer either has a complete scene or none at all.
pub(super) struct Scene<B: ViewerBackend> {
    pub(super) source: SourceDescriptor,
    pub(super) viewport: B::Viewport,
    pub(super) drawer: B::Drawer,
    pub(super) profiler: B::Profiler,
}

/// Main orchestration facade consumed by host applications.
///
/// `Viewer` coordinates the frame scheduler, the open/close lifecycle, the
/// per-tick update step, the controls auto-hide fade, and pointer-driven
/// viewport mutation. Time enters exclusively through `now_ms` arguments
/// (host-supplied monotonic milliseconds); deferred work runs when the host
/// calls [`Viewer::pump`].
pub struct Viewer<B: ViewerBackend> {
    pub(super) backend: B,
    pub(super) config: ViewerConfig,
    pub(super) events: EventBus,
    pub(super) timers: TimerQueue<DeferredTask>,
    pub(super) fade: FadeController,
    pub(super) controls: ControlRegistry,
    pub(super) overlays: Vec<OverlaySpec>,
    pub(super) scene: Option<Scene<B>>,
    pub(super) animating: bool,
    pub(super) mouse_inside: bool,
    pub(super) force_redraw: bool,
    pub(super) mouse_nav_enabled: bool,
    pub(super) full_page: bool,
    pub(super) fs_bounds_delta: Point,
    pub(super) prev_container_size: Option<ContainerSize>,
    pub(super) prev_tick_ms: Option<f64>,
    pub(super) tick_generation: u64,
    pub(super) open_requests: OpenRequests,
}

impl<B: ViewerBackend> Viewer<B> {
    /// Builds a viewer over `backend`.
    ///
    /// The controls auto-hide countdown is armed one queue turn after
    /// construction, and a configured descriptor is opened (deferred) right
    /// away.
    pub fn new(backend: B, config: ViewerConfig, now_ms: f64) -> ViewerResult<Self> {
        config.validate()?;
        let container = backend.container_size();
        if !container.is_valid() {
            return Err(ViewerError::InvalidContainer {
                width: container.width,
                height: container.height,
            });
        }

        let mut viewer = Self {
            fade: FadeController::new(config.fade_settings()),
            mouse_nav_enabled: config.mouse_nav_enabled,
            overlays: config.overlays.clone(),
            backend,
            config,
            events: EventBus::new(),
            timers: TimerQueue::new(),
            controls: ControlRegistry::new(),
            scene: None,
            animating: false,
            mouse_inside: false,
            force_redraw: false,
            full_page: false,
            fs_bounds_delta: Point::new(1.0, 1.0),
            prev_container_size: None,
            prev_tick_ms: None,
            tick_generation: 0,
            open_requests: OpenRequests::default(),
        };

        viewer
            .timers
            .schedule(now_ms + 1.0, DeferredTask::BeginAutoHide);
        if let Some(reference) = viewer.config.descriptor.clone() {
            viewer.open_from_descriptor(reference, now_ms);
        }
        Ok(viewer)
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.scene.is_some()
    }

    #[must_use]
    pub fn source(&self) -> Option<&SourceDescriptor> {
        self.scene.as_ref().map(|scene| &scene.source)
    }

    #[must_use]
    pub fn viewport(&self) -> Option<&B::Viewport> {
        self.scene.as_ref().map(|scene| &scene.viewport)
    }

    pub fn viewport_mut(&mut self) -> Option<&mut B::Viewport> {
        self.scene.as_mut().map(|scene| &mut scene.viewport)
    }

    #[must_use]
    pub fn drawer(&self) -> Option<&B::Drawer> {
        self.scene.as_ref().map(|scene| &scene.drawer)
    }

    pub fn drawer_mut(&mut self) -> Option<&mut B::Drawer> {
        self.scene.as_mut().map(|scene| &mut scene.drawer)
    }

    #[must_use]
    pub fn profiler(&self) -> Option<&B::Profiler> {
        self.scene.as_ref().map(|scene| &scene.profiler)
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    #[must_use]
    pub fn pointer_inside(&self) -> bool {
        self.mouse_inside
    }

    #[must_use]
    pub fn is_full_page(&self) -> bool {
        self.full_page
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.backend.is_visible()
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.backend.set_visible(visible);
    }

    #[must_use]
    pub fn is_mouse_nav_enabled(&self) -> bool {
        self.mouse_nav_enabled
    }

    pub fn set_mouse_nav_enabled(&mut self, enabled: bool) {
        self.mouse_nav_enabled = enabled;
    }

    #[must_use]
    pub fn fade_phase(&self) -> FadePhase {
        self.fade.phase()
    }

    #[must_use]
    pub fn config(&self) -> &ViewerConfig {
        &self.config
    }

    /// Deadline of the earliest queued deferred task, if any.
    ///
    /// Hosts may sleep until this deadline before the next [`Viewer::pump`].
    #[must_use]
    pub fn next_deadline(&self) -> Option<f64> {
        self.timers.next_deadline()
    }

    pub fn add_handler(
        &mut self,
        kind: EventKind,
        handler: impl FnMut(&ViewerEvent) + 'static,
    ) -> HandlerId {
        self.events.add_handler(kind, handler)
    }

    pub fn remove_handler(&mut self, id: HandlerId) -> bool {
        self.events.remove_handler(id)
    }

    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    #[must_use]
    pub fn into_backend(self) -> B {
        self.backend
    }
}
