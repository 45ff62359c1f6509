//! Embedded page content and off-thread image decoding.

use crate::constants::{FULL_IMAGE_MAX_SIDE, THUMBNAIL_SIZE};
use image::imageops::FilterType;
use photo_gallery::FeatureCards;
use rust_embed::RustEmbed;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use thiserror::Error;

/// Static page content shipped with the binary.
/// Read from the filesystem in debug builds, compressed into the binary in release builds.
#[derive(RustEmbed)]
#[folder = "assets/"]
pub struct Assets;

#[derive(Error, Debug)]
pub enum FeatureLoadError {
    #[error("features.ron not found in embedded assets")]
    NotFound,
    #[error("invalid UTF-8 in features.ron: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
    #[error("failed to parse features.ron: {0}")]
    ParseError(#[from] ron::de::SpannedError),
}

#[derive(Error, Debug)]
pub enum ImageLoadError {
    #[error("failed to open '{}': {source}", .path.display())]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to decode '{}': {source}", .path.display())]
    DecodeError {
        path: PathBuf,
        source: image::ImageError,
    },
}

/// Which rendition of an image to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageSize {
    /// Downscaled for the gallery grid
    Thumbnail,
    /// Lightbox and viewer, capped to a texture-friendly size
    Full,
}

pub struct DecodedImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

pub enum AssetLoadState {
    Loading(mpsc::Receiver<Result<DecodedImage, ImageLoadError>>),
    Ready(DecodedImage),
    /// Already reported with a toast
    Error(String),
}

/// Reads and decodes an image file, downscaling it for `size`.
pub fn load_and_decode_image(path: &Path, size: ImageSize) -> Result<DecodedImage, ImageLoadError> {
    let decode_error = |source| ImageLoadError::DecodeError {
        path: path.to_path_buf(),
        source,
    };

    let img = image::ImageReader::open(path)
        .map_err(|source| ImageLoadError::Open {
            path: path.to_path_buf(),
            source,
        })?
        .with_guessed_format()
        .map_err(|source| ImageLoadError::Open {
            path: path.to_path_buf(),
            source,
        })?
        .decode()
        .map_err(decode_error)?;

    let img = match size {
        ImageSize::Thumbnail => img.thumbnail(THUMBNAIL_SIZE, THUMBNAIL_SIZE),
        ImageSize::Full if img.width().max(img.height()) > FULL_IMAGE_MAX_SIDE => {
            img.resize(FULL_IMAGE_MAX_SIDE, FULL_IMAGE_MAX_SIDE, FilterType::Triangle)
        }
        ImageSize::Full => img,
    };

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(DecodedImage {
        pixels: rgba.into_raw(),
        width,
        height,
    })
}

/// Loads the home page feature cards.
pub fn load_features() -> Result<FeatureCards, FeatureLoadError> {
    let file = Assets::get("features.ron").ok_or(FeatureLoadError::NotFound)?;
    let ron_string = std::str::from_utf8(&file.data)?;
    Ok(ron::from_str(ron_string)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_features_parse() {
        let features = load_features().unwrap();
        assert!(!features.is_empty());
        assert!(features.iter().all(|card| !card.title.is_empty()));
    }

    #[test]
    fn thumbnails_are_downscaled() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        image::RgbaImage::from_pixel(1200, 600, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let thumb = load_and_decode_image(&path, ImageSize::Thumbnail).unwrap();
        assert_eq!(thumb.width, THUMBNAIL_SIZE);
        assert_eq!(thumb.height, THUMBNAIL_SIZE / 2);
        assert_eq!(thumb.pixels.len(), (thumb.width * thumb.height * 4) as usize);

        let full = load_and_decode_image(&path, ImageSize::Full).unwrap();
        assert_eq!((full.width, full.height), (1200, 600));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"definitely not a jpeg").unwrap();

        let err = load_and_decode_image(&path, ImageSize::Full).err().unwrap();
        assert!(matches!(err, ImageLoadError::DecodeError { .. }));
    }
}
