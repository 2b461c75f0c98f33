use crate::core::{
    ContainerSize, DescriptorReference, OverlaySpec, Point, Rect, SourceDescriptor,
    SourceDimensions,
};
use crate::error::{ViewerError, ViewerResult};

use super::{Control, Drawer, Profiler, Viewport, ViewerBackend, ViewportOptions};

/// No-op viewport used by tests and headless hosts.
///
/// It records every call so tests can assert on what the control core asked
/// for, and animation can be scripted through `pending_animation_frames`.
#[derive(Debug)]
pub struct NullViewport {
    pub resize_calls: Vec<(ContainerSize, bool)>,
    pub pan_calls: Vec<Point>,
    pub zoom_calls: Vec<(f64, Option<Point>, bool)>,
    pub constraint_applications: usize,
    pub update_calls: usize,
    /// `update` reports animating while this is non-zero, decrementing once
    /// per call.
    pub pending_animation_frames: usize,
    pub bounds: Rect,
}

impl Default for NullViewport {
    fn default() -> Self {
        Self {
            resize_calls: Vec::new(),
            pan_calls: Vec::new(),
            zoom_calls: Vec::new(),
            constraint_applications: 0,
            update_calls: 0,
            pending_animation_frames: 0,
            bounds: Rect::new(0.0, 0.0, 1.0, 1.0),
        }
    }
}

impl Viewport for NullViewport {
    fn resize(&mut self, size: ContainerSize, preserve_position: bool) {
        self.resize_calls.push((size, preserve_position));
    }

    fn update(&mut self) -> bool {
        self.update_calls += 1;
        if self.pending_animation_frames > 0 {
            self.pending_animation_frames -= 1;
            return true;
        }
        false
    }

    fn pan_by(&mut self, delta: Point) {
        self.pan_calls.push(delta);
    }

    fn zoom_by(&mut self, factor: f64, center: Option<Point>, immediate: bool) {
        self.zoom_calls.push((factor, center, immediate));
    }

    fn apply_constraints(&mut self) {
        self.constraint_applications += 1;
    }

    fn point_from_pixel(&self, pixel: Point, _current: bool) -> Point {
        pixel
    }

    fn delta_points_from_pixels(&self, delta: Point) -> Point {
        delta
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

#[derive(Debug, Default)]
pub struct NullDrawer {
    pub update_calls: usize,
    pub idle_calls: usize,
    pub overlays: Vec<OverlaySpec>,
    /// Test knob backing `needs_update`.
    pub wants_update: bool,
}

impl Drawer for NullDrawer {
    fn update(&mut self) {
        self.update_calls += 1;
        self.wants_update = false;
    }

    fn idle(&mut self) {
        self.idle_calls += 1;
    }

    fn needs_update(&self) -> bool {
        self.wants_update
    }

    fn add_overlay(&mut self, overlay: &OverlaySpec) {
        self.overlays.push(overlay.clone());
    }
}

#[derive(Debug, Default)]
pub struct NullProfiler {
    pub begin_calls: usize,
    pub end_calls: usize,
}

impl Profiler for NullProfiler {
    fn begin_update(&mut self) {
        self.begin_calls += 1;
    }

    fn end_update(&mut self) {
        self.end_calls += 1;
    }
}

/// Minimal concrete control for hosts without real widgets.
#[derive(Debug)]
pub struct NullControl {
    id: String,
    pub opacity: f64,
    pub visible: bool,
    pub destroyed: bool,
}

impl NullControl {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            opacity: 1.0,
            visible: true,
            destroyed: false,
        }
    }
}

impl Control for NullControl {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn destroy(&mut self) {
        self.destroyed = true;
    }
}

/// No-op backend used by tests and headless viewer usage.
///
/// Counters and knobs mirror what a real host would observe or control:
/// the container size is mutable so resize flows can be exercised, and
/// descriptor resolution succeeds only when `resolved` is populated.
#[derive(Debug)]
pub struct NullBackend {
    pub container: ContainerSize,
    pub full_page_container: ContainerSize,
    pub canvas_clears: usize,
    pub messages: Vec<String>,
    pub visible: bool,
    pub full_page: bool,
    /// Descriptor handed out by `resolve_source`; `None` makes resolution fail.
    pub resolved: Option<SourceDescriptor>,
    pub last_viewport_options: Option<ViewportOptions>,
    pub viewports_built: usize,
    pub drawers_built: usize,
}

impl Default for NullBackend {
    fn default() -> Self {
        Self {
            container: ContainerSize::new(800, 600),
            full_page_container: ContainerSize::new(1920, 1080),
            canvas_clears: 0,
            messages: Vec::new(),
            visible: true,
            full_page: false,
            resolved: None,
            last_viewport_options: None,
            viewports_built: 0,
            drawers_built: 0,
        }
    }
}

impl ViewerBackend for NullBackend {
    type Viewport = NullViewport;
    type Drawer = NullDrawer;
    type Profiler = NullProfiler;

    fn container_size(&self) -> ContainerSize {
        if self.full_page {
            self.full_page_container
        } else {
            self.container
        }
    }

    fn clear_canvas(&mut self) {
        self.canvas_clears += 1;
    }

    fn build_viewport(
        &mut self,
        _container: ContainerSize,
        _source: SourceDimensions,
        options: ViewportOptions,
    ) -> Self::Viewport {
        self.viewports_built += 1;
        self.last_viewport_options = Some(options);
        NullViewport::default()
    }

    fn build_drawer(&mut self, _source: &SourceDescriptor) -> Self::Drawer {
        self.drawers_built += 1;
        NullDrawer::default()
    }

    fn build_profiler(&mut self) -> Self::Profiler {
        NullProfiler::default()
    }

    fn resolve_source(
        &mut self,
        reference: &DescriptorReference,
    ) -> ViewerResult<SourceDescriptor> {
        match &self.resolved {
            Some(descriptor) => Ok(descriptor.clone()),
            None => Err(ViewerError::SourceLoad(match reference {
                DescriptorReference::Url(url) => format!("no descriptor available at {url}"),
                DescriptorReference::Inline(_) => "inline descriptor rejected".to_owned(),
            })),
        }
    }

    fn show_message(&mut self, message: &str) {
        self.messages.push(message.to_owned());
    }

    fn set_full_page(&mut self, full_page: bool) -> ContainerSize {
        self.full_page = full_page;
        self.container_size()
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn is_visible(&self) -> bool {
        self.visible
    }
}
