use tracing::{debug, warn};

use crate::backend::{Drawer, ViewerBackend};
use crate::core::{DescriptorReference, SourceDescriptor};
use crate::events::ViewerEvent;

use super::viewer::{Scene, Viewer};

/// Delay before an incomplete open request shows the loading notice.
pub const SLOW_OPEN_NOTICE_MS: f64 = 2000.0;

/// User-facing message shown by the slow-open check.
pub const SLOW_OPEN_MESSAGE: &str = "Loading...";

/// One queue turn; deferred opens and descriptor resolution run this late.
const DEFER_DELAY_MS: f64 = 1.0;

/// Sequence token identifying one open request.
///
/// Tokens increase monotonically per viewer; a deferred continuation whose
/// token is older than the latest issued one is stale and must not mutate
/// viewer state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OpenToken(u64);

impl OpenToken {
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Default)]
pub(super) struct OpenRequests {
    issued: u64,
    completed: u64,
}

impl OpenRequests {
    pub(super) fn issue(&mut self) -> OpenToken {
        self.issued += 1;
        OpenToken(self.issued)
    }

    pub(super) fn is_stale(&self, token: OpenToken) -> bool {
        token.0 < self.issued
    }

    pub(super) fn mark_completed(&mut self, token: OpenToken) {
        self.completed = self.completed.max(token.0);
    }

    pub(super) fn is_completed(&self, token: OpenToken) -> bool {
        self.completed >= token.0
    }
}

/// Work queued on the viewer's timer queue.
///
/// There is no cancellation primitive: a task that has been superseded
/// detects its own irrelevance when it runs (token or generation mismatch)
/// and exits without mutating anything.
pub(super) enum DeferredTask {
    Tick {
        generation: u64,
    },
    FadeStep,
    BeginAutoHide,
    SlowOpenCheck {
        token: OpenToken,
    },
    DeferredOpen {
        token: OpenToken,
        source: SourceDescriptor,
    },
    ResolveOpen {
        token: OpenToken,
        reference: DescriptorReference,
    },
}

impl<B: ViewerBackend> Viewer<B> {
    /// Opens `source`, implicitly closing any active source first.
    pub fn open(&mut self, source: SourceDescriptor, now_ms: f64) -> OpenToken {
        let token = self.begin_open_request(now_ms);
        self.open_with_token(source, token, now_ms);
        token
    }

    /// Defers the open to the next queue turn.
    ///
    /// Used when the caller is itself inside setup code and must let the
    /// current pass finish before viewer state changes.
    pub fn open_deferred(&mut self, source: SourceDescriptor, now_ms: f64) -> OpenToken {
        let token = self.begin_open_request(now_ms);
        self.timers.schedule(
            now_ms + DEFER_DELAY_MS,
            DeferredTask::DeferredOpen { token, source },
        );
        token
    }

    /// Resolves a descriptor reference through the backend, then opens the
    /// result.
    ///
    /// Resolution failures surface as an `Error` event; the viewer stays in
    /// its prior open/closed state.
    pub fn open_from_descriptor(
        &mut self,
        reference: DescriptorReference,
        now_ms: f64,
    ) -> OpenToken {
        let token = self.begin_open_request(now_ms);
        self.timers.schedule(
            now_ms + DEFER_DELAY_MS,
            DeferredTask::ResolveOpen { token, reference },
        );
        token
    }

    /// Releases the source and its bound subsystems together.
    ///
    /// Disarms the frame scheduler; no event is raised.
    pub fn close(&mut self) {
        self.scene = None;
        self.backend.clear_canvas();
        self.tick_generation += 1;
        self.prev_tick_ms = None;
        debug!("closed source");
    }

    fn begin_open_request(&mut self, now_ms: f64) -> OpenToken {
        let token = self.open_requests.issue();
        self.timers.schedule(
            now_ms + SLOW_OPEN_NOTICE_MS,
            DeferredTask::SlowOpenCheck { token },
        );
        token
    }

    pub(super) fn open_with_token(
        &mut self,
        source: SourceDescriptor,
        token: OpenToken,
        now_ms: f64,
    ) {
        if self.open_requests.is_stale(token) {
            warn!(token = token.raw(), "ignoring superseded open request");
            self.events.raise(&ViewerEvent::Ignore);
            return;
        }

        if self.scene.is_some() {
            self.close();
        }

        self.backend.clear_canvas();
        let container = self.backend.container_size();
        self.prev_container_size = Some(container);

        let viewport =
            self.backend
                .build_viewport(container, source.dimensions, self.config.viewport_options());
        let drawer = self.backend.build_drawer(&source);
        let profiler = self.backend.build_profiler();
        let mut scene = Scene::<B> {
            source,
            viewport,
            drawer,
            profiler,
        };
        for overlay in &self.overlays {
            scene.drawer.add_overlay(overlay);
        }

        debug!(
            token = token.raw(),
            width = scene.source.dimensions.width,
            height = scene.source.dimensions.height,
            "opened source"
        );

        self.scene = Some(scene);
        self.animating = false;
        self.force_redraw = true;
        self.open_requests.mark_completed(token);
        self.arm_scheduler(now_ms);
        self.events.raise(&ViewerEvent::Open);
    }

    pub(super) fn run_slow_open_check(&mut self, token: OpenToken) {
        if self.open_requests.is_stale(token) || self.open_requests.is_completed(token) {
            return;
        }
        self.backend.show_message(SLOW_OPEN_MESSAGE);
    }

    pub(super) fn run_resolve_open(
        &mut self,
        token: OpenToken,
        reference: DescriptorReference,
        now_ms: f64,
    ) {
        match self.backend.resolve_source(&reference) {
            Ok(source) => self.open_with_token(source, token, now_ms),
            Err(err) => {
                warn!(error = %err, "descriptor resolution failed");
                self.events.raise(&ViewerEvent::Error {
                    message: err.to_string(),
                });
            }
        }
    }
}
