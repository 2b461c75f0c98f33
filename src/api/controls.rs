use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::backend::{Control, ViewerBackend};

use super::lifecycle::DeferredTask;
use super::viewer::Viewer;

/// Container corner a control is laid out against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ControlAnchor {
    /// Free placement inside the container.
    #[default]
    None,
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

struct ControlEntry {
    control: Box<dyn Control>,
    anchor: ControlAnchor,
}

/// Id-keyed, insertion-ordered set of registered controls.
#[derive(Default)]
pub(super) struct ControlRegistry {
    entries: IndexMap<String, ControlEntry>,
}

impl ControlRegistry {
    pub(super) fn new() -> Self {
        Self::default()
    }

    pub(super) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Registers a control; a duplicate id is silently ignored.
    pub(super) fn add(&mut self, control: Box<dyn Control>, anchor: ControlAnchor) -> bool {
        let id = control.id().to_owned();
        if self.entries.contains_key(&id) {
            debug!(control = %id, "ignoring duplicate control registration");
            return false;
        }
        self.entries.insert(id, ControlEntry { control, anchor });
        true
    }

    pub(super) fn remove(&mut self, id: &str) -> bool {
        if let Some(mut entry) = self.entries.shift_remove(id) {
            entry.control.destroy();
            return true;
        }
        false
    }

    pub(super) fn clear(&mut self) {
        for (_, mut entry) in self.entries.drain(..) {
            entry.control.destroy();
        }
    }

    pub(super) fn anchor_of(&self, id: &str) -> Option<ControlAnchor> {
        self.entries.get(id).map(|entry| entry.anchor)
    }

    pub(super) fn apply_opacity(&mut self, opacity: f64) {
        for entry in self.entries.values_mut() {
            entry.control.set_opacity(opacity);
        }
    }

    pub(super) fn set_all_visible(&mut self, visible: bool) {
        for entry in self.entries.values_mut() {
            entry.control.set_visible(visible);
        }
    }

    pub(super) fn any_visible(&self) -> bool {
        self.entries
            .values()
            .any(|entry| entry.control.is_visible())
    }
}

impl<B: ViewerBackend> Viewer<B> {
    /// Registers a control for auto-hide management.
    ///
    /// Idempotent by control id: re-adding an already registered control is
    /// silently ignored and returns `false`.
    pub fn add_control(&mut self, control: Box<dyn Control>, anchor: ControlAnchor) -> bool {
        self.controls.add(control, anchor)
    }

    /// Destroys and removes the control with `id`. Returns `true` when found.
    pub fn remove_control(&mut self, id: &str) -> bool {
        self.controls.remove(id)
    }

    /// Destroys and removes every registered control.
    pub fn clear_controls(&mut self) {
        self.controls.clear();
    }

    #[must_use]
    pub fn control_count(&self) -> usize {
        self.controls.len()
    }

    #[must_use]
    pub fn control_anchor(&self, id: &str) -> Option<ControlAnchor> {
        self.controls.anchor_of(id)
    }

    /// True when any registered control reports itself visible.
    #[must_use]
    pub fn is_dashboard_enabled(&self) -> bool {
        self.controls.any_visible()
    }

    pub fn set_dashboard_enabled(&mut self, enabled: bool) {
        self.controls.set_all_visible(enabled);
    }

    pub(super) fn begin_controls_auto_hide(&mut self, now_ms: f64) {
        if let Some(first_step_ms) = self.fade.begin(now_ms) {
            self.timers.schedule(first_step_ms, DeferredTask::FadeStep);
        }
    }

    pub(super) fn abort_controls_auto_hide(&mut self) {
        self.fade.abort();
        self.controls.apply_opacity(1.0);
    }

    pub(super) fn run_fade_step(&mut self, now_ms: f64) {
        let outcome = self.fade.step(now_ms);
        if let Some(opacity) = outcome.opacity {
            self.controls.apply_opacity(opacity);
        }
        if let Some(deadline_ms) = outcome.reschedule_at_ms {
            self.timers.schedule(deadline_ms, DeferredTask::FadeStep);
        }
    }
}
