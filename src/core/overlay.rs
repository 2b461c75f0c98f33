use serde::{Deserialize, Serialize};

use super::geometry::{Point, Rect};

/// Corner or center of the overlay geometry the overlay element is pinned to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum OverlayAnchor {
    #[default]
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
    Center,
}

/// Placement geometry of an overlay, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OverlayGeometry {
    Point(Point),
    Rect(Rect),
}

/// A host element anchored onto the drawn scene.
///
/// Overlay specs are held by the viewer and re-attached to every fresh
/// drawer on open, so they survive source switches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlaySpec {
    pub id: String,
    pub geometry: OverlayGeometry,
    #[serde(default)]
    pub anchor: OverlayAnchor,
}

impl OverlaySpec {
    #[must_use]
    pub fn anchored_point(id: impl Into<String>, point: Point) -> Self {
        Self {
            id: id.into(),
            geometry: OverlayGeometry::Point(point),
            anchor: OverlayAnchor::TopLeft,
        }
    }

    #[must_use]
    pub fn anchored_rect(id: impl Into<String>, rect: Rect, anchor: OverlayAnchor) -> Self {
        Self {
            id: id.into(),
            geometry: OverlayGeometry::Rect(rect),
            anchor,
        }
    }

    /// Point-anchored overlays always pin at their top-left corner.
    #[must_use]
    pub fn effective_anchor(&self) -> OverlayAnchor {
        match self.geometry {
            OverlayGeometry::Point(_) => OverlayAnchor::TopLeft,
            OverlayGeometry::Rect(_) => self.anchor,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{OverlayAnchor, OverlaySpec};
    use crate::core::{Point, Rect};

    #[test]
    fn point_overlays_pin_top_left_regardless_of_requested_anchor() {
        let mut spec = OverlaySpec::anchored_point("marker", Point::new(0.25, 0.25));
        spec.anchor = OverlayAnchor::Center;
        assert_eq!(spec.effective_anchor(), OverlayAnchor::TopLeft);
    }

    #[test]
    fn rect_overlays_keep_their_requested_anchor() {
        let spec = OverlaySpec::anchored_rect(
            "region",
            Rect::new(0.1, 0.1, 0.2, 0.2),
            OverlayAnchor::BottomRight,
        );
        assert_eq!(spec.effective_anchor(), OverlayAnchor::BottomRight);
    }
}
