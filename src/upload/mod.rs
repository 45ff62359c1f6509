//! Upload widget: file selection, progress rows, and the multipart request.

mod board;
mod client;
mod controller;
mod progress;
mod selection;

pub use board::{BANNER_DURATION, Banner, UploadBoard};
pub use client::{CHUNK_SIZE, FILES_FIELD, TransferProgress, UploadClient, UploadError};
pub use controller::UploadController;
pub use progress::{
    HOLD_DURATION, MAX_STEP, ProgressMode, ProgressPanel, ProgressRow, ROW_EXIT, RowId, RowPhase,
    TICK_INTERVAL,
};
pub use selection::{FileSource, SelectedFile, SelectionError, read_paths};

/// Message from a running upload to the UI thread.
#[derive(Debug)]
pub enum UploadEvent {
    /// More of a file has been handed to the HTTP stack
    Transferred { row: RowId, percent: f32 },
    /// The server answered, or the request failed
    Finished {
        rows: Vec<RowId>,
        result: Result<String, UploadError>,
    },
}
