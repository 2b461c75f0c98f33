use serde::{Deserialize, Serialize};

use crate::backend::ViewportOptions;
use crate::core::{DescriptorReference, OverlaySpec};
use crate::error::{ViewerError, ViewerResult};
use crate::fade::FadeSettings;

/// Public viewer bootstrap configuration.
///
/// Serializable so hosts can persist/load viewer setup without inventing
/// their own ad-hoc format; absent fields fall back to the documented
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Master switch for the controls auto-hide fade.
    #[serde(default = "default_auto_hide_controls")]
    pub auto_hide_controls: bool,
    /// Delay before a triggered fade starts changing opacity.
    #[serde(default = "default_controls_fade_delay_ms")]
    pub controls_fade_delay_ms: f64,
    /// Duration of the full opacity interpolation.
    #[serde(default = "default_controls_fade_length_ms")]
    pub controls_fade_length_ms: f64,
    /// Upper bound on press duration for a quick-click classification.
    #[serde(default = "default_click_time_threshold_ms")]
    pub click_time_threshold_ms: f64,
    /// Upper bound on pointer travel for a quick-click classification.
    #[serde(default = "default_click_dist_threshold_px")]
    pub click_dist_threshold_px: f64,
    #[serde(default = "default_zoom_per_click")]
    pub zoom_per_click: f64,
    #[serde(default = "default_zoom_per_scroll")]
    pub zoom_per_scroll: f64,
    #[serde(default = "default_zoom_per_second")]
    pub zoom_per_second: f64,
    #[serde(default = "default_min_zoom_image_ratio")]
    pub min_zoom_image_ratio: f64,
    #[serde(default = "default_max_zoom_pixel_ratio")]
    pub max_zoom_pixel_ratio: f64,
    #[serde(default = "default_visibility_ratio")]
    pub visibility_ratio: f64,
    #[serde(default = "default_spring_stiffness")]
    pub spring_stiffness: f64,
    #[serde(default = "default_animation_time_s")]
    pub animation_time_s: f64,
    /// Consulted by hosts when wiring their navigation widget set.
    #[serde(default = "default_show_navigation_control")]
    pub show_navigation_control: bool,
    #[serde(default = "default_mouse_nav_enabled")]
    pub mouse_nav_enabled: bool,
    /// Descriptor opened (deferred) immediately after construction.
    #[serde(default)]
    pub descriptor: Option<DescriptorReference>,
    /// Overlays re-attached to every fresh drawer on open.
    #[serde(default)]
    pub overlays: Vec<OverlaySpec>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            auto_hide_controls: default_auto_hide_controls(),
            controls_fade_delay_ms: default_controls_fade_delay_ms(),
            controls_fade_length_ms: default_controls_fade_length_ms(),
            click_time_threshold_ms: default_click_time_threshold_ms(),
            click_dist_threshold_px: default_click_dist_threshold_px(),
            zoom_per_click: default_zoom_per_click(),
            zoom_per_scroll: default_zoom_per_scroll(),
            zoom_per_second: default_zoom_per_second(),
            min_zoom_image_ratio: default_min_zoom_image_ratio(),
            max_zoom_pixel_ratio: default_max_zoom_pixel_ratio(),
            visibility_ratio: default_visibility_ratio(),
            spring_stiffness: default_spring_stiffness(),
            animation_time_s: default_animation_time_s(),
            show_navigation_control: default_show_navigation_control(),
            mouse_nav_enabled: default_mouse_nav_enabled(),
            descriptor: None,
            overlays: Vec::new(),
        }
    }
}

impl ViewerConfig {
    #[must_use]
    pub fn with_descriptor(mut self, descriptor: DescriptorReference) -> Self {
        self.descriptor = Some(descriptor);
        self
    }

    #[must_use]
    pub fn with_overlays(mut self, overlays: Vec<OverlaySpec>) -> Self {
        self.overlays = overlays;
        self
    }

    pub fn validate(&self) -> ViewerResult<()> {
        for (name, value) in [
            ("zoom_per_click", self.zoom_per_click),
            ("zoom_per_scroll", self.zoom_per_scroll),
            ("zoom_per_second", self.zoom_per_second),
            ("spring_stiffness", self.spring_stiffness),
            ("controls_fade_length_ms", self.controls_fade_length_ms),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ViewerError::InvalidConfig(format!(
                    "{name} must be finite and positive, got {value}"
                )));
            }
        }
        for (name, value) in [
            ("controls_fade_delay_ms", self.controls_fade_delay_ms),
            ("click_time_threshold_ms", self.click_time_threshold_ms),
            ("click_dist_threshold_px", self.click_dist_threshold_px),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ViewerError::InvalidConfig(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.visibility_ratio) {
            return Err(ViewerError::InvalidConfig(format!(
                "visibility_ratio must be within [0, 1], got {}",
                self.visibility_ratio
            )));
        }
        Ok(())
    }

    /// Subset forwarded opaquely to viewport construction.
    #[must_use]
    pub fn viewport_options(&self) -> ViewportOptions {
        ViewportOptions {
            animation_time_s: self.animation_time_s,
            spring_stiffness: self.spring_stiffness,
            zoom_per_second: self.zoom_per_second,
            min_zoom_image_ratio: self.min_zoom_image_ratio,
            max_zoom_pixel_ratio: self.max_zoom_pixel_ratio,
            visibility_ratio: self.visibility_ratio,
        }
    }

    #[must_use]
    pub fn fade_settings(&self) -> FadeSettings {
        FadeSettings {
            auto_hide: self.auto_hide_controls,
            delay_ms: self.controls_fade_delay_ms,
            length_ms: self.controls_fade_length_ms,
        }
    }

    pub fn from_json(json: &str) -> ViewerResult<Self> {
        serde_json::from_str(json).map_err(|err| ViewerError::InvalidConfig(err.to_string()))
    }

    pub fn to_json(&self) -> ViewerResult<String> {
        serde_json::to_string_pretty(self)
            .map_err(|err| ViewerError::InvalidConfig(err.to_string()))
    }
}

fn default_auto_hide_controls() -> bool {
    true
}

fn default_controls_fade_delay_ms() -> f64 {
    2000.0
}

fn default_controls_fade_length_ms() -> f64 {
    1500.0
}

fn default_click_time_threshold_ms() -> f64 {
    200.0
}

fn default_click_dist_threshold_px() -> f64 {
    5.0
}

fn default_zoom_per_click() -> f64 {
    2.0
}

fn default_zoom_per_scroll() -> f64 {
    1.2
}

fn default_zoom_per_second() -> f64 {
    2.0
}

fn default_min_zoom_image_ratio() -> f64 {
    0.8
}

fn default_max_zoom_pixel_ratio() -> f64 {
    2.0
}

fn default_visibility_ratio() -> f64 {
    0.5
}

fn default_spring_stiffness() -> f64 {
    5.0
}

fn default_animation_time_s() -> f64 {
    1.5
}

fn default_show_navigation_control() -> bool {
    true
}

fn default_mouse_nav_enabled() -> bool {
    true
}
