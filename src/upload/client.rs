use crate::upload::SelectedFile;
use futures_util::StreamExt;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use thiserror::Error;

/// Multipart field every file is sent under.
pub const FILES_FIELD: &str = "files";

/// Size of the chunks a file part is streamed in. Each chunk reports progress.
pub const CHUNK_SIZE: usize = 64 * 1024;

/// Errors of one batch upload. The `Display` text is what the user is shown.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Upload failed: no files selected")]
    EmptyBatch,
    /// The server answered with a non-success status.
    #[error("Upload failed: {message}")]
    Rejected { status: u16, message: String },
    /// The request could not complete or the answer could not be read.
    #[error("Error uploading files: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Error uploading files: invalid part for '{file}': {source}")]
    InvalidPart {
        file: String,
        source: reqwest::Error,
    },
}

/// Body the server answers with, on success and failure alike.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    message: String,
}

/// Bytes of one file handed to the HTTP stack so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferProgress {
    /// Position of the file in the batch
    pub file_index: usize,
    pub sent: u64,
    pub total: u64,
}

impl TransferProgress {
    pub fn percent(&self) -> f32 {
        if self.total == 0 {
            100.0
        } else {
            (self.sent as f64 / self.total as f64 * 100.0) as f32
        }
    }
}

/// Posts batches of files to the gallery server's upload endpoint.
#[derive(Debug, Clone)]
pub struct UploadClient {
    http: reqwest::Client,
    endpoint: String,
}

impl UploadClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), endpoint)
    }

    pub fn with_client(http: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends all `files` in one multipart request and returns the server message.
    ///
    /// `on_progress` is called from the HTTP stack as each chunk of a file is
    /// consumed. There is no timeout and no retry.
    pub async fn upload<F>(&self, files: Vec<SelectedFile>, on_progress: F) -> Result<String, UploadError>
    where
        F: Fn(TransferProgress) + Clone + Send + Sync + 'static,
    {
        if files.is_empty() {
            return Err(UploadError::EmptyBatch);
        }

        let count = files.len();
        let total: u64 = files.iter().map(SelectedFile::size).sum();

        let mut form = Form::new();
        for (file_index, file) in files.into_iter().enumerate() {
            form = form.part(FILES_FIELD, file_part(file_index, file, on_progress.clone())?);
        }

        log::info!("Uploading {count} file(s), {total} bytes, to {}", self.endpoint);

        let response = self.http.post(&self.endpoint).multipart(form).send().await?;
        let status = response.status();
        let body: UploadResponse = response.json().await?;

        if status.is_success() {
            log::info!("Upload accepted ({status}): {}", body.message);
            Ok(body.message)
        } else {
            log::warn!("Upload rejected ({status}): {}", body.message);
            Err(UploadError::Rejected {
                status: status.as_u16(),
                message: body.message,
            })
        }
    }
}

/// Builds a streamed part that reports every chunk it yields.
fn file_part<F>(file_index: usize, file: SelectedFile, on_progress: F) -> Result<Part, UploadError>
where
    F: Fn(TransferProgress) + Send + Sync + 'static,
{
    let total = file.size();
    let content_type = file.content_type();
    let SelectedFile { name, bytes } = file;

    let chunk_count = bytes.len().div_ceil(CHUNK_SIZE);
    let mut sent = 0u64;
    let chunks = futures_util::stream::iter(0..chunk_count).map(move |chunk| {
        let start = chunk * CHUNK_SIZE;
        let end = (start + CHUNK_SIZE).min(bytes.len());
        let data = bytes[start..end].to_vec();

        sent += data.len() as u64;
        on_progress(TransferProgress {
            file_index,
            sent,
            total,
        });

        Ok::<_, std::io::Error>(data)
    });

    Part::stream_with_length(reqwest::Body::wrap_stream(chunks), total)
        .file_name(name.clone())
        .mime_str(content_type)
        .map_err(|source| UploadError::InvalidPart { file: name, source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_of_empty_file_is_complete() {
        let progress = TransferProgress {
            file_index: 0,
            sent: 0,
            total: 0,
        };
        assert_eq!(progress.percent(), 100.0);
    }

    #[test]
    fn percent_tracks_sent_bytes() {
        let progress = TransferProgress {
            file_index: 1,
            sent: 25,
            total: 100,
        };
        assert_eq!(progress.percent(), 25.0);
    }

    #[test]
    fn alert_texts_name_the_reason() {
        let rejected = UploadError::Rejected {
            status: 413,
            message: "Too large".to_owned(),
        };
        assert_eq!(rejected.to_string(), "Upload failed: Too large");
    }

    #[tokio::test]
    async fn empty_batch_is_refused_before_sending() {
        let client = UploadClient::new("http://127.0.0.1:9/upload");
        let result = client.upload(Vec::new(), |_| {}).await;
        assert!(matches!(result, Err(UploadError::EmptyBatch)));
    }
}
