use crate::upload::{
    FileSource, ProgressMode, RowId, SelectedFile, TransferProgress, UploadBoard, UploadClient,
    UploadEvent,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::{Arc, mpsc};
use tokio::runtime::Handle;

type Wakeup = Arc<dyn Fn() + Send + Sync>;

/// Runs uploads on a tokio runtime and folds their events into an [`UploadBoard`].
///
/// The UI thread owns the controller: it calls [`UploadController::poll`] every
/// frame, and running uploads call the wakeup hook so a frame follows each event.
pub struct UploadController {
    board: UploadBoard,
    client: Arc<UploadClient>,
    runtime: Handle,
    event_tx: mpsc::Sender<UploadEvent>,
    event_rx: mpsc::Receiver<UploadEvent>,
    wakeup: Wakeup,
    rng: StdRng,
}

impl UploadController {
    pub fn new(client: UploadClient, runtime: Handle, mode: ProgressMode) -> Self {
        let (event_tx, event_rx) = mpsc::channel();

        Self {
            board: UploadBoard::new(mode),
            client: Arc::new(client),
            runtime,
            event_tx,
            event_rx,
            wakeup: Arc::new(|| {}),
            rng: StdRng::from_os_rng(),
        }
    }

    /// Hook called from the runtime after every event, e.g. to request a repaint.
    pub fn with_wakeup(mut self, wakeup: impl Fn() + Send + Sync + 'static) -> Self {
        self.wakeup = Arc::new(wakeup);
        self
    }

    pub fn board(&self) -> &UploadBoard {
        &self.board
    }

    pub fn client(&self) -> &UploadClient {
        &self.client
    }

    /// Swaps the client used for later batches; running uploads keep theirs.
    pub fn set_client(&mut self, client: UploadClient) {
        self.client = Arc::new(client);
    }

    pub fn set_mode(&mut self, mode: ProgressMode) {
        self.board.set_mode(mode);
    }

    /// Takes a picked or dropped selection. Returns `false` and does nothing
    /// when the selection is empty; otherwise shows one row per file and sends
    /// the whole batch in one request.
    pub fn select_files(&mut self, source: FileSource, files: Vec<SelectedFile>, now: f64) -> bool {
        let Some(rows) = self.board.begin_batch(&files, now) else {
            log::debug!("Ignoring empty selection from {source:?}");
            return false;
        };

        log::info!("{} file(s) selected from {source:?}", files.len());
        self.spawn_upload(files, rows);
        true
    }

    fn spawn_upload(&self, files: Vec<SelectedFile>, rows: Vec<RowId>) {
        let client = Arc::clone(&self.client);
        let event_tx = self.event_tx.clone();
        let wakeup = Arc::clone(&self.wakeup);
        let rows: Arc<[RowId]> = rows.into();

        let progress_tx = event_tx.clone();
        let progress_wakeup = Arc::clone(&wakeup);
        let progress_rows = Arc::clone(&rows);
        let on_progress = move |progress: TransferProgress| {
            if let Some(row) = progress_rows.get(progress.file_index) {
                let _ = progress_tx.send(UploadEvent::Transferred {
                    row: *row,
                    percent: progress.percent(),
                });
                progress_wakeup();
            }
        };

        self.runtime.spawn(async move {
            let result = client.upload(files, on_progress).await;
            if let Err(err) = &result {
                log::warn!("{err}");
            }

            let _ = event_tx.send(UploadEvent::Finished {
                rows: rows.to_vec(),
                result,
            });
            wakeup();
        });
    }

    /// Applies pending upload events and advances the progress rows and banner.
    pub fn poll(&mut self, now: f64) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.board.apply(event, now);
        }
        self.board.tick(now, &mut self.rng);
    }

    /// Clears the progress panel. The request itself is not cancelled.
    pub fn cancel(&mut self) {
        let dropped = self.board.cancel();
        log::info!("Upload panel cleared ({dropped} row(s)); in-flight requests continue");
    }

    pub fn dismiss_alert(&mut self) {
        self.board.dismiss_alert();
    }
}
