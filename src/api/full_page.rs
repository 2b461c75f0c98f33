use crate::backend::{ViewerBackend, Viewport};
use crate::core::Point;
use crate::events::ViewerEvent;

use super::viewer::Viewer;

impl<B: ViewerBackend> Viewer<B> {
    /// Switches the container in or out of full-page layout.
    ///
    /// The backend performs the layout swap and reports the resulting
    /// container size. Entering synthesizes a pointer-enter (the pointer is
    /// now inside the enlarged container), leaving a pointer-exit. With a
    /// scene open, the bounds ratio introduced by the resize is carried in
    /// `fs_bounds_delta` and re-applied as an immediate zoom when leaving,
    /// so the visible region is restored.
    pub fn set_full_page(&mut self, full_page: bool, now_ms: f64) {
        if full_page == self.full_page {
            return;
        }

        let container = self.backend.set_full_page(full_page);
        self.full_page = full_page;

        if full_page {
            self.pointer_enter();
        } else {
            self.pointer_exit(now_ms, false);
        }

        self.prev_container_size = Some(container);
        if self.scene.is_none() {
            return;
        }

        if let Some(scene) = self.scene.as_mut() {
            let old_bounds = scene.viewport.bounds();
            scene.viewport.resize(container, false);
            let new_bounds = scene.viewport.bounds();

            if full_page {
                self.fs_bounds_delta = Point::new(
                    new_bounds.width / old_bounds.width,
                    new_bounds.height / old_bounds.height,
                );
            } else {
                scene.viewport.update();
                let factor = self.fs_bounds_delta.x.max(self.fs_bounds_delta.y);
                scene.viewport.zoom_by(factor, None, true);
            }

            self.force_redraw = true;
            self.events.raise(&ViewerEvent::Resize { size: container });
        }

        self.update_once(now_ms);
    }
}
