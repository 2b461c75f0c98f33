pub mod geometry;
pub mod overlay;
pub mod source;

pub use geometry::{ContainerSize, Point, Rect, SourceDimensions};
pub use overlay::{OverlayAnchor, OverlayGeometry, OverlaySpec};
pub use source::{DescriptorReference, SourceDescriptor, TileScheme};
