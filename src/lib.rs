use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::path::PathBuf;

pub mod config;
pub mod gallery;
pub mod lightbox;
pub mod navbar;
pub mod reveal;
pub mod upload;
pub mod zoom;

/// An image shown in the gallery grid and the image viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct GalleryImage {
    /// Absolute path of the image file
    pub path: PathBuf,
    /// File name used as caption and manifest key
    pub name: String,
    /// Metadata from the gallery manifest, if the image has an entry
    pub details: ImageDetails,
}

impl GalleryImage {
    /// Stable key used for texture caches and lightbox sources.
    pub fn key(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

/// Descriptive metadata for one image, as produced by the server's analysis pipeline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageDetails {
    pub description: Option<String>,
    pub tags: Vec<String>,
    /// Dominant colours as `#rrggbb` strings
    pub color_palette: Vec<String>,
    pub detected_objects: Vec<String>,
}

/// One entry of `gallery.ron`
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    /// File name relative to the gallery directory
    pub file: String,
    /// Free-form description of the image
    #[serde(default)]
    pub description: Option<String>,
    /// Short keywords shown as tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Dominant colours as `#rrggbb` strings
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub color_palette: Vec<String>,
    /// Names of objects detected in the image
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub detected_objects: Vec<String>,
}

impl ManifestEntry {
    pub fn into_details(self) -> ImageDetails {
        ImageDetails {
            description: self.description,
            tags: self.tags,
            color_palette: self.color_palette,
            detected_objects: self.detected_objects,
        }
    }
}

/// Root type for the gallery manifest file
pub type GalleryManifest = Vec<ManifestEntry>;

/// A card on the home page describing one feature of the gallery
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureCard {
    pub icon: String,
    pub title: String,
    pub body: String,
}

/// Root type for the embedded feature list
pub type FeatureCards = Vec<FeatureCard>;

/// Parses a `#rrggbb` (or `rrggbb`) colour into its components.
pub fn parse_hex_color(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some([channel(0..2)?, channel(2..4)?, channel(4..6)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_hex_color("#ff8000"), Some([255, 128, 0]));
        assert_eq!(parse_hex_color("0a0B0c"), Some([10, 11, 12]));
        assert_eq!(parse_hex_color("#fff"), None);
        assert_eq!(parse_hex_color("#gg0000"), None);
    }

    #[test]
    fn manifest_entry_defaults_missing_fields() {
        let entry: ManifestEntry = ron::from_str(
            r#"(file: "cat.jpg", description: Some("A cat"), tags: ["cat", "pet"])"#,
        )
        .unwrap();

        assert_eq!(entry.file, "cat.jpg");
        let details = entry.into_details();
        assert_eq!(details.description.as_deref(), Some("A cat"));
        assert_eq!(details.tags, vec!["cat", "pet"]);
        assert!(details.color_palette.is_empty());
        assert!(details.detected_objects.is_empty());
    }
}
