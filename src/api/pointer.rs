//! Pointer-driven state transitions.
//!
//! The host's pointer tracker classifies raw input (quick-click detection,
//! drag deltas, modifier state) and calls one typed method per gesture.
//! Canvas-level gestures are gated by mouse-nav enablement; container-level
//! enter/exit and outside-releases always apply.

use crate::backend::{ViewerBackend, Viewport};
use crate::core::Point;

use super::viewer::Viewer;

impl<B: ViewerBackend> Viewer<B> {
    /// Quick, non-dragged click: zoom by the configured per-click factor
    /// (inverse when the modifier is held), centered on the pointer.
    pub fn pointer_click(&mut self, position: Point, quick: bool, modifier: bool) {
        if !self.mouse_nav_enabled || !quick {
            return;
        }
        let zoom_per_click = self.config.zoom_per_click;
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        let factor = if modifier {
            1.0 / zoom_per_click
        } else {
            zoom_per_click
        };
        let center = scene.viewport.point_from_pixel(position, true);
        scene.viewport.zoom_by(factor, Some(center), false);
        scene.viewport.apply_constraints();
    }

    /// Drag: pan by the pixel delta, inverted and converted to viewport
    /// space.
    pub fn pointer_drag(&mut self, delta: Point) {
        if !self.mouse_nav_enabled {
            return;
        }
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        let viewport_delta = scene.viewport.delta_points_from_pixels(delta.negated());
        scene.viewport.pan_by(viewport_delta);
    }

    /// Button release. A press that started inside the surface snaps the
    /// viewport back into bounds; a release outside the container behaves
    /// like a pointer exit.
    pub fn pointer_release(&mut self, now_ms: f64, inside_press: bool, inside_release: bool) {
        if self.mouse_nav_enabled && inside_press {
            if let Some(scene) = self.scene.as_mut() {
                scene.viewport.apply_constraints();
            }
        }
        if !inside_release {
            self.mouse_inside = false;
            if !self.animating {
                self.begin_controls_auto_hide(now_ms);
            }
        }
    }

    /// Scroll: zoom by `zoom_per_scroll ^ amount`, centered on the pointer.
    pub fn pointer_scroll(&mut self, position: Point, amount: i32) {
        if !self.mouse_nav_enabled {
            return;
        }
        let factor = self.config.zoom_per_scroll.powi(amount);
        let Some(scene) = self.scene.as_mut() else {
            return;
        };
        let center = scene.viewport.point_from_pixel(position, true);
        scene.viewport.zoom_by(factor, Some(center), false);
        scene.viewport.apply_constraints();
    }

    /// Pointer entered the container: controls must be shown.
    pub fn pointer_enter(&mut self) {
        self.mouse_inside = true;
        self.abort_controls_auto_hide();
    }

    /// Pointer left the container. Ignored while a button is held (a drag
    /// may re-enter); otherwise the auto-hide countdown starts unless an
    /// animation is keeping the user engaged.
    pub fn pointer_exit(&mut self, now_ms: f64, button_down: bool) {
        if button_down {
            return;
        }
        self.mouse_inside = false;
        if !self.animating {
            self.begin_controls_auto_hide(now_ms);
        }
    }
}
