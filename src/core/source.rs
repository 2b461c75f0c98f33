use serde::{Deserialize, Serialize};

use super::geometry::SourceDimensions;

/// Tile-addressing parameters of a pyramidal source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileScheme {
    #[serde(default = "default_tile_size")]
    pub tile_size: u32,
    #[serde(default = "default_tile_overlap")]
    pub overlap: u32,
    #[serde(default = "default_tile_format")]
    pub format: String,
}

impl Default for TileScheme {
    fn default() -> Self {
        Self {
            tile_size: default_tile_size(),
            overlap: default_tile_overlap(),
            format: default_tile_format(),
        }
    }
}

fn default_tile_size() -> u32 {
    254
}

fn default_tile_overlap() -> u32 {
    1
}

fn default_tile_format() -> String {
    "jpg".to_owned()
}

/// Descriptor of a visual source: native dimensions plus tile addressing.
///
/// The descriptor is all the control core knows about an open source; tile
/// fetching and pyramid selection belong to the drawer collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceDescriptor {
    pub dimensions: SourceDimensions,
    #[serde(default)]
    pub tile_scheme: TileScheme,
    #[serde(default)]
    pub tiles_url: Option<String>,
}

impl SourceDescriptor {
    #[must_use]
    pub fn new(dimensions: SourceDimensions) -> Self {
        Self {
            dimensions,
            tile_scheme: TileScheme::default(),
            tiles_url: None,
        }
    }

    #[must_use]
    pub fn with_tile_scheme(mut self, tile_scheme: TileScheme) -> Self {
        self.tile_scheme = tile_scheme;
        self
    }

    #[must_use]
    pub fn with_tiles_url(mut self, tiles_url: impl Into<String>) -> Self {
        self.tiles_url = Some(tiles_url.into());
        self
    }
}

/// Reference to a not-yet-resolved source descriptor.
///
/// Resolution (fetch, parse) is performed by the backend collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DescriptorReference {
    /// Fetch and parse the descriptor from a URL.
    Url(String),
    /// Parse the descriptor from inline text.
    Inline(String),
}

#[cfg(test)]
mod tests {
    use super::{SourceDescriptor, TileScheme};
    use crate::core::SourceDimensions;

    #[test]
    fn descriptor_json_fills_tile_scheme_defaults() {
        let descriptor: SourceDescriptor =
            serde_json::from_str(r#"{"dimensions":{"width":1024,"height":768}}"#)
                .expect("descriptor parse");
        assert_eq!(descriptor.dimensions, SourceDimensions::new(1024, 768));
        assert_eq!(descriptor.tile_scheme, TileScheme::default());
        assert!(descriptor.tiles_url.is_none());
    }

    #[test]
    fn tile_scheme_defaults_match_deep_zoom_conventions() {
        let scheme = TileScheme::default();
        assert_eq!(scheme.tile_size, 254);
        assert_eq!(scheme.overlap, 1);
        assert_eq!(scheme.format, "jpg");
    }
}
