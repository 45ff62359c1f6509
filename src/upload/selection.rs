use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// Where a selection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileSource {
    /// The native file picker
    Picker,
    /// Files dropped onto the window
    Drop,
}

/// Errors that can occur while reading picked or dropped files.
#[derive(Error, Debug)]
pub enum SelectionError {
    #[error("failed to read '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("'{}' is not a file name", .0.display())]
    NoFileName(PathBuf),
}

/// A file chosen for upload, held in memory.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Arc<[u8]>,
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("size", &self.size())
            .finish()
    }
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Reads a file from disk, naming it after the last path component.
    pub fn read(path: &Path) -> Result<Self, SelectionError> {
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| SelectionError::NoFileName(path.to_path_buf()))?;

        let bytes = std::fs::read(path).map_err(|source| SelectionError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Self::new(name, bytes))
    }

    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// MIME type sent with the multipart part, guessed from the extension.
    pub fn content_type(&self) -> &'static str {
        let extension = Path::new(&self.name)
            .extension()
            .map(|ext| ext.to_string_lossy().to_ascii_lowercase());

        match extension.as_deref() {
            Some("jpg" | "jpeg") => "image/jpeg",
            Some("png") => "image/png",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            Some("bmp") => "image/bmp",
            _ => "application/octet-stream",
        }
    }
}

/// Reads every path, failing on the first unreadable one.
pub fn read_paths<I, P>(paths: I) -> Result<Vec<SelectedFile>, SelectionError>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    paths
        .into_iter()
        .map(|path| SelectedFile::read(path.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn guesses_content_type_from_extension() {
        assert_eq!(SelectedFile::new("a.JPG", Vec::<u8>::new()).content_type(), "image/jpeg");
        assert_eq!(SelectedFile::new("b.webp", Vec::<u8>::new()).content_type(), "image/webp");
        assert_eq!(
            SelectedFile::new("notes", Vec::<u8>::new()).content_type(),
            "application/octet-stream"
        );
    }

    #[test]
    fn reads_files_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sunset.png");
        std::fs::File::create(&path)
            .unwrap()
            .write_all(b"not really a png")
            .unwrap();

        let files = read_paths([&path]).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "sunset.png");
        assert_eq!(files[0].size(), 16);
    }

    #[test]
    fn missing_file_is_reported_with_its_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gone.jpg");

        let err = read_paths([&path]).unwrap_err();
        assert!(matches!(err, SelectionError::Read { .. }));
        assert!(err.to_string().contains("gone.jpg"));
    }
}
