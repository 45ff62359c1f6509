//! Loading the gallery from an image directory and its optional manifest.

use crate::{GalleryImage, GalleryManifest, ImageDetails};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use thiserror::Error;

/// Name of the optional metadata file inside the gallery directory.
pub const MANIFEST_FILE: &str = "gallery.ron";

/// Extensions (lowercase) the gallery shows.
pub const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "bmp"];

/// Errors that can occur when loading the gallery.
#[derive(Error, Debug)]
pub enum GalleryLoadError {
    #[error("failed to read gallery directory '{}': {source}", .path.display())]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to read gallery.ron: {0}")]
    ReadManifest(#[source] std::io::Error),
    #[error("failed to parse gallery.ron: {0}")]
    ParseManifest(#[from] ron::de::SpannedError),
}

/// Whether `path` has one of the supported image extensions.
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// Lists the images in `dir`, newest first, with manifest details attached.
pub fn load_gallery(dir: &Path) -> Result<Vec<GalleryImage>, GalleryLoadError> {
    let read_dir_error = |source| GalleryLoadError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut details = load_manifest(dir)?;

    let mut found: Vec<(SystemTime, GalleryImage)> = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir_error)? {
        let entry = entry.map_err(read_dir_error)?;
        let path = entry.path();
        if !path.is_file() || !is_supported_image(&path) {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        let modified = entry
            .metadata()
            .and_then(|meta| meta.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);

        found.push((
            modified,
            GalleryImage {
                details: details.remove(&name).unwrap_or_default(),
                name,
                path,
            },
        ));
    }

    // Newest uploads first; names break ties so the order is stable.
    found.sort_by(|(a_time, a), (b_time, b)| b_time.cmp(a_time).then_with(|| a.name.cmp(&b.name)));

    if !details.is_empty() {
        log::debug!(
            "{} manifest entries have no matching image in {}",
            details.len(),
            dir.display()
        );
    }

    log::info!("Loaded {} gallery images from {}", found.len(), dir.display());
    Ok(found.into_iter().map(|(_, image)| image).collect())
}

/// Reads `gallery.ron`, keyed by file name. A missing manifest is not an error.
fn load_manifest(dir: &Path) -> Result<HashMap<String, ImageDetails>, GalleryLoadError> {
    let path = dir.join(MANIFEST_FILE);
    let ron_string = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
        Err(err) => return Err(GalleryLoadError::ReadManifest(err)),
    };

    let manifest: GalleryManifest = ron::from_str(&ron_string)?;
    Ok(manifest
        .into_iter()
        .map(|entry| (entry.file.clone(), entry.into_details()))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_image_extensions() {
        assert!(is_supported_image(Path::new("a/b/photo.JPG")));
        assert!(is_supported_image(Path::new("x.webp")));
        assert!(!is_supported_image(Path::new("gallery.ron")));
        assert!(!is_supported_image(Path::new("README")));
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");

        let err = load_gallery(&missing).unwrap_err();
        assert!(matches!(err, GalleryLoadError::ReadDir { .. }));
    }
}
