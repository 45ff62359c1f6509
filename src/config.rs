//! User-adjustable settings shared by the desktop client and the CLI uploader.

use crate::upload::ProgressMode;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Server the client uploads to when nothing else is configured.
pub const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";

/// Path of the upload endpoint below the server URL.
pub const UPLOAD_PATH: &str = "/upload";

/// Settings persisted between runs of the desktop client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the gallery server, without the endpoint path
    pub server_url: String,
    /// Directory the gallery images are read from
    pub gallery_dir: PathBuf,
    /// How the upload progress rows are driven
    pub progress_mode: ProgressMode,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_owned(),
            gallery_dir: default_gallery_dir(),
            progress_mode: ProgressMode::default(),
        }
    }
}

impl Settings {
    /// Full URL of the upload endpoint.
    pub fn upload_endpoint(&self) -> String {
        upload_endpoint(&self.server_url)
    }
}

/// Joins a server base URL and the upload path, tolerating a trailing slash.
pub fn upload_endpoint(server_url: &str) -> String {
    format!("{}{}", server_url.trim_end_matches('/'), UPLOAD_PATH)
}

/// Returns `<Pictures>/Gallery`, falling back to `./image_data`.
pub fn default_gallery_dir() -> PathBuf {
    dirs::picture_dir()
        .map(|pictures| pictures.join("Gallery"))
        .unwrap_or_else(|| PathBuf::from("image_data"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_ignores_trailing_slash() {
        assert_eq!(
            upload_endpoint("http://localhost:8000/"),
            "http://localhost:8000/upload"
        );
        assert_eq!(
            upload_endpoint("http://localhost:8000"),
            "http://localhost:8000/upload"
        );
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: Settings = ron::from_str(r#"(server_url: "http://gallery:9000")"#).unwrap();
        assert_eq!(settings.server_url, "http://gallery:9000");
        assert_eq!(settings.progress_mode, ProgressMode::default());
        assert_eq!(settings.gallery_dir, default_gallery_dir());
    }
}
