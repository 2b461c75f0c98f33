//! Contracts implemented by host-side collaborators.
//!
//! The control core drives viewport math, tile drawing, profiling, and the
//! layout surface through these traits so coordination logic stays isolated
//! from platform code. Viewport, drawer, and profiler instances are built
//! per open and dropped together on close; hosts must not cache them across
//! an open/close boundary.

use serde::{Deserialize, Serialize};

use crate::core::{
    ContainerSize, DescriptorReference, OverlaySpec, Point, Rect, SourceDescriptor,
    SourceDimensions,
};
use crate::error::ViewerResult;

mod null;

pub use null::{NullBackend, NullControl, NullDrawer, NullProfiler, NullViewport};

/// Tuning forwarded opaquely to viewport construction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportOptions {
    pub animation_time_s: f64,
    pub spring_stiffness: f64,
    pub zoom_per_second: f64,
    pub min_zoom_image_ratio: f64,
    pub max_zoom_pixel_ratio: f64,
    pub visibility_ratio: f64,
}

/// Coordinate-transform and camera-animation state for the open source.
pub trait Viewport {
    fn resize(&mut self, size: ContainerSize, preserve_position: bool);
    /// Advances in-flight animation one increment; `true` while still animating.
    fn update(&mut self) -> bool;
    fn pan_by(&mut self, delta: Point);
    fn zoom_by(&mut self, factor: f64, center: Option<Point>, immediate: bool);
    fn apply_constraints(&mut self);
    fn point_from_pixel(&self, pixel: Point, current: bool) -> Point;
    fn delta_points_from_pixels(&self, delta: Point) -> Point;
    fn bounds(&self) -> Rect;
}

/// Rendering engine painting tiles and overlays for the current viewport.
pub trait Drawer {
    /// Performs a full redraw.
    fn update(&mut self);
    /// Housekeeping performed instead of a redraw when nothing changed.
    fn idle(&mut self);
    /// Whether the drawer independently wants a redraw (e.g. tiles arrived).
    fn needs_update(&self) -> bool;
    fn add_overlay(&mut self, overlay: &OverlaySpec);
}

/// Measurement hooks bracketing each update step.
///
/// Absent instrumentation must not alter the step's outcome; implementations
/// are free to be no-ops.
pub trait Profiler {
    fn begin_update(&mut self);
    fn end_update(&mut self);
}

/// One transient on-screen control managed by the auto-hide fade.
pub trait Control {
    /// Stable identity; duplicate registrations are detected by id.
    fn id(&self) -> &str;
    fn set_opacity(&mut self, opacity: f64);
    fn set_visible(&mut self, visible: bool);
    fn is_visible(&self) -> bool;
    fn destroy(&mut self);
}

/// Host surface: measurement, scene construction, and layout switches.
pub trait ViewerBackend {
    type Viewport: Viewport;
    type Drawer: Drawer;
    type Profiler: Profiler;

    /// Current pixel size of the element hosting the viewer.
    fn container_size(&self) -> ContainerSize;

    /// Clears any drawn content from the canvas surface.
    fn clear_canvas(&mut self);

    fn build_viewport(
        &mut self,
        container: ContainerSize,
        source: SourceDimensions,
        options: ViewportOptions,
    ) -> Self::Viewport;

    fn build_drawer(&mut self, source: &SourceDescriptor) -> Self::Drawer;

    fn build_profiler(&mut self) -> Self::Profiler;

    /// Produces a source descriptor from a URL or inline descriptor text.
    fn resolve_source(
        &mut self,
        reference: &DescriptorReference,
    ) -> ViewerResult<SourceDescriptor>;

    /// Shows a user-facing status message (e.g. the slow-load notice).
    fn show_message(&mut self, message: &str);

    /// Switches the container in or out of full-page layout and reports the
    /// resulting container size.
    fn set_full_page(&mut self, full_page: bool) -> ContainerSize;

    fn set_visible(&mut self, visible: bool);

    fn is_visible(&self) -> bool;
}
