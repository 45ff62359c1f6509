use crate::upload::{ProgressMode, ProgressPanel, RowId, SelectedFile, UploadEvent};
use rand::Rng;
use std::collections::VecDeque;

/// How long the success banner stays up.
pub const BANNER_DURATION: f64 = 5.0;

/// Success message shown above the drop zone.
#[derive(Debug, Clone, PartialEq)]
pub struct Banner {
    pub message: String,
    pub until: f64,
}

/// Everything the upload page shows: progress rows, the success banner and
/// pending alerts. Pure state; the controller feeds it events and time.
#[derive(Debug)]
pub struct UploadBoard {
    panel: ProgressPanel,
    banner: Option<Banner>,
    alerts: VecDeque<String>,
    in_flight: usize,
}

impl UploadBoard {
    pub fn new(mode: ProgressMode) -> Self {
        Self {
            panel: ProgressPanel::new(mode),
            banner: None,
            alerts: VecDeque::new(),
            in_flight: 0,
        }
    }

    pub fn panel(&self) -> &ProgressPanel {
        &self.panel
    }

    pub fn set_mode(&mut self, mode: ProgressMode) {
        self.panel.set_mode(mode);
    }

    /// Adds one row per file. Returns `None` for an empty selection, which
    /// leaves the board untouched.
    pub fn begin_batch(&mut self, files: &[SelectedFile], now: f64) -> Option<Vec<RowId>> {
        if files.is_empty() {
            return None;
        }

        let rows = files
            .iter()
            .map(|file| self.panel.add_row(&file.name, file.size(), now))
            .collect();
        self.in_flight += 1;
        Some(rows)
    }

    pub fn apply(&mut self, event: UploadEvent, now: f64) {
        match event {
            UploadEvent::Transferred { row, percent } => {
                self.panel.report_transfer(row, percent);
            }
            UploadEvent::Finished { rows, result } => {
                self.in_flight = self.in_flight.saturating_sub(1);
                self.panel.finish_rows(&rows, result.is_ok(), now);

                match result {
                    Ok(message) => {
                        self.banner = Some(Banner {
                            message,
                            until: now + BANNER_DURATION,
                        });
                    }
                    Err(err) => self.alerts.push_back(err.to_string()),
                }
            }
        }
    }

    pub fn tick<R: Rng>(&mut self, now: f64, rng: &mut R) {
        self.panel.tick(now, rng);
        if self.banner.as_ref().is_some_and(|banner| banner.until <= now) {
            self.banner = None;
        }
    }

    /// Clears the progress panel. Requests already sent keep running.
    pub fn cancel(&mut self) -> usize {
        self.panel.cancel()
    }

    /// Banner text, while it is up.
    pub fn banner(&self, now: f64) -> Option<&str> {
        self.banner
            .as_ref()
            .filter(|banner| banner.until > now)
            .map(|banner| banner.message.as_str())
    }

    /// Oldest alert not yet dismissed.
    pub fn alert(&self) -> Option<&str> {
        self.alerts.front().map(String::as_str)
    }

    pub fn dismiss_alert(&mut self) {
        self.alerts.pop_front();
    }

    /// Batches sent whose response hasn't arrived.
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Whether something on the board changes with time alone.
    pub fn is_animating(&self) -> bool {
        !self.panel.rows().is_empty() || self.banner.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upload::UploadError;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn files() -> Vec<SelectedFile> {
        vec![
            SelectedFile::new("a.jpg", vec![1u8; 10]),
            SelectedFile::new("b.png", vec![2u8; 20]),
        ]
    }

    #[test]
    fn empty_selection_changes_nothing() {
        let mut board = UploadBoard::new(ProgressMode::Simulated);
        assert!(board.begin_batch(&[], 0.0).is_none());
        assert!(!board.panel().is_visible());
        assert_eq!(board.in_flight(), 0);
    }

    #[test]
    fn batch_gets_one_row_per_file() {
        let mut board = UploadBoard::new(ProgressMode::Simulated);
        let rows = board.begin_batch(&files(), 0.0).unwrap();

        assert_eq!(rows.len(), 2);
        assert!(board.panel().is_visible());
        assert_eq!(board.panel().rows()[1].file_name(), "b.png");
        assert_eq!(board.panel().rows()[1].size(), 20);
        assert_eq!(board.in_flight(), 1);
    }

    #[test]
    fn success_banner_lasts_five_seconds() {
        let mut board = UploadBoard::new(ProgressMode::Simulated);
        let rows = board.begin_batch(&files(), 0.0).unwrap();
        let mut rng = StdRng::seed_from_u64(1);

        board.apply(
            UploadEvent::Finished {
                rows,
                result: Ok("OK".to_owned()),
            },
            10.0,
        );

        assert_eq!(board.banner(10.0), Some("OK"));
        assert_eq!(board.banner(14.9), Some("OK"));
        assert!(board.alert().is_none());
        assert_eq!(board.in_flight(), 0);

        board.tick(15.0, &mut rng);
        assert_eq!(board.banner(15.0), None);
    }

    #[test]
    fn rejection_only_raises_an_alert() {
        let mut board = UploadBoard::new(ProgressMode::Transfer);
        let rows = board.begin_batch(&files(), 0.0).unwrap();

        board.apply(
            UploadEvent::Finished {
                rows,
                result: Err(UploadError::Rejected {
                    status: 413,
                    message: "Too large".to_owned(),
                }),
            },
            1.0,
        );

        assert!(board.banner(1.0).is_none());
        assert!(board.alert().is_some_and(|alert| alert.contains("Too large")));

        board.dismiss_alert();
        assert!(board.alert().is_none());
    }

    #[test]
    fn alerts_queue_in_order() {
        let mut board = UploadBoard::new(ProgressMode::Transfer);
        for message in ["first", "second"] {
            board.apply(
                UploadEvent::Finished {
                    rows: Vec::new(),
                    result: Err(UploadError::Rejected {
                        status: 500,
                        message: message.to_owned(),
                    }),
                },
                0.0,
            );
        }

        assert_eq!(board.alert(), Some("Upload failed: first"));
        board.dismiss_alert();
        assert_eq!(board.alert(), Some("Upload failed: second"));
    }

    #[test]
    fn cancel_does_not_suppress_the_banner() {
        let mut board = UploadBoard::new(ProgressMode::Simulated);
        let rows = board.begin_batch(&files(), 0.0).unwrap();

        assert_eq!(board.cancel(), 2);
        assert!(board.panel().rows().is_empty());
        assert!(!board.panel().is_visible());

        board.apply(
            UploadEvent::Finished {
                rows,
                result: Ok("2 files successfully uploaded!".to_owned()),
            },
            3.0,
        );
        assert_eq!(board.banner(3.0), Some("2 files successfully uploaded!"));
        assert!(!board.panel().is_visible());
    }

    #[test]
    fn newer_banner_replaces_older() {
        let mut board = UploadBoard::new(ProgressMode::Simulated);
        for (message, now) in [("one", 0.0), ("two", 4.0)] {
            board.apply(
                UploadEvent::Finished {
                    rows: Vec::new(),
                    result: Ok(message.to_owned()),
                },
                now,
            );
        }

        assert_eq!(board.banner(6.0), Some("two"));
        assert_eq!(board.banner(9.0), None);
    }
}
