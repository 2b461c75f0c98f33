use crate::backend::{Drawer, Profiler, ViewerBackend, Viewport};
use crate::events::ViewerEvent;
use crate::scheduler::next_frame_delay;

use super::lifecycle::DeferredTask;
use super::viewer::Viewer;

impl<B: ViewerBackend> Viewer<B> {
    /// Runs every deferred task whose deadline has passed.
    ///
    /// `now_ms` is the host's monotonic clock in milliseconds and must be
    /// non-decreasing across calls. Tasks run in deadline order; work they
    /// queue for a later deadline waits for a future pump.
    pub fn pump(&mut self, now_ms: f64) {
        while let Some(task) = self.timers.pop_due(now_ms) {
            self.run_task(task, now_ms);
        }
    }

    fn run_task(&mut self, task: DeferredTask, now_ms: f64) {
        match task {
            DeferredTask::Tick { generation } => {
                if generation == self.tick_generation {
                    self.tick(now_ms);
                }
            }
            DeferredTask::FadeStep => self.run_fade_step(now_ms),
            DeferredTask::BeginAutoHide => self.begin_controls_auto_hide(now_ms),
            DeferredTask::SlowOpenCheck { token } => self.run_slow_open_check(token),
            DeferredTask::DeferredOpen { token, source } => {
                self.open_with_token(source, token, now_ms);
            }
            DeferredTask::ResolveOpen { token, reference } => {
                self.run_resolve_open(token, reference, now_ms);
            }
        }
    }

    /// Arms the tick chain for the current scene.
    ///
    /// Bumping the generation first orphans any tick still queued for a
    /// previous scene.
    pub(super) fn arm_scheduler(&mut self, now_ms: f64) {
        self.tick_generation += 1;
        self.prev_tick_ms = None;
        let delay = next_frame_delay(false, None, now_ms);
        self.timers.schedule(
            now_ms + delay,
            DeferredTask::Tick {
                generation: self.tick_generation,
            },
        );
    }

    fn tick(&mut self, now_ms: f64) {
        if self.scene.is_none() {
            return;
        }
        self.update_once(now_ms);
        self.prev_tick_ms = Some(now_ms);
        let delay = next_frame_delay(self.animating, self.prev_tick_ms, now_ms);
        self.timers.schedule(
            now_ms + delay,
            DeferredTask::Tick {
                generation: self.tick_generation,
            },
        );
    }

    /// One pass of the update step: resize detection, viewport animation,
    /// the redraw decision, animation-phase events, and fade triggering.
    ///
    /// No-op while no source is open.
    pub fn update_once(&mut self, now_ms: f64) {
        let container = self.backend.container_size();
        let Some(scene) = self.scene.as_mut() else {
            return;
        };

        scene.profiler.begin_update();

        if self.prev_container_size != Some(container) {
            scene.viewport.resize(container, true);
            self.prev_container_size = Some(container);
            self.events.raise(&ViewerEvent::Resize { size: container });
        }

        let animated = scene.viewport.update();

        if !self.animating && animated {
            self.events.raise(&ViewerEvent::AnimationStart);
            // User engagement resumed; controls must stay visible.
            self.fade.abort();
            self.controls.apply_opacity(1.0);
        }

        if self.animating && !animated {
            self.events.raise(&ViewerEvent::AnimationFinish);
            if !self.mouse_inside {
                if let Some(first_step_ms) = self.fade.begin(now_ms) {
                    self.timers.schedule(first_step_ms, DeferredTask::FadeStep);
                }
            }
        }

        if animated {
            scene.drawer.update();
            self.events.raise(&ViewerEvent::Animation);
        } else if self.force_redraw || scene.drawer.needs_update() {
            scene.drawer.update();
            self.force_redraw = false;
        } else {
            scene.drawer.idle();
        }

        self.animating = animated;
        scene.profiler.end_update();
    }
}
