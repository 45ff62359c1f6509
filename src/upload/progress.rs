//! Progress rows of the upload panel.
//!
//! Rows are advanced by polling: [`ProgressPanel::tick`] runs every frame with
//! the current time, so dropping a row also drops everything scheduled for it.

use crate::reveal::{Exit, Transform};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Interval between simulated progress steps.
pub const TICK_INTERVAL: f64 = 0.2;

/// Upper bound (exclusive) of one simulated progress step, in percent.
pub const MAX_STEP: f32 = 10.0;

/// How long a finished row stays on screen before fading out.
pub const HOLD_DURATION: f64 = 1.0;

/// Fade-out applied to finished rows.
pub const ROW_EXIT: Exit = Exit::FADE_UP;

/// What drives the progress rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ProgressMode {
    /// Cosmetic random increments every `TICK_INTERVAL`, unrelated to the request
    Simulated,
    /// Bytes handed to the HTTP stack, finished by the server response
    #[default]
    Transfer,
}

impl ProgressMode {
    pub fn label(self) -> &'static str {
        match self {
            Self::Simulated => "Simulated",
            Self::Transfer => "Transfer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RowId(u64);

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowPhase {
    /// Progress still moving; `next_tick` is the next simulated step
    Active { next_tick: f64 },
    /// At 100 % (or failed), waiting before the fade-out
    Holding { until: f64 },
    /// Fading out
    Leaving { since: f64 },
}

/// One file's row in the progress panel.
#[derive(Debug, Clone)]
pub struct ProgressRow {
    id: RowId,
    file_name: String,
    size: u64,
    progress: f32,
    failed: bool,
    phase: RowPhase,
}

impl ProgressRow {
    pub fn id(&self) -> RowId {
        self.id
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Displayed progress in percent, `0.0..=100.0`.
    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn fraction(&self) -> f32 {
        self.progress / 100.0
    }

    /// Rounded percentage shown next to the bar.
    pub fn percent_label(&self) -> String {
        format!("{}%", self.progress.round() as u32)
    }

    pub fn failed(&self) -> bool {
        self.failed
    }

    pub fn phase(&self) -> RowPhase {
        self.phase
    }

    /// Offset and opacity to draw the row with.
    pub fn transform(&self, now: f64) -> Transform {
        match self.phase {
            RowPhase::Leaving { since } => ROW_EXIT.sample(now - since),
            _ => Transform::IDENTITY,
        }
    }

    fn raise_to(&mut self, percent: f32) {
        self.progress = self.progress.max(percent.clamp(0.0, 100.0));
    }

    /// Advances timed phases. Returns `false` once the row has faded out.
    fn advance<R: Rng>(&mut self, mode: ProgressMode, now: f64, rng: &mut R) -> bool {
        loop {
            match self.phase {
                RowPhase::Active { next_tick } => {
                    if mode != ProgressMode::Simulated || next_tick > now {
                        return true;
                    }
                    self.raise_to(self.progress + rng.random_range(0.0..MAX_STEP));
                    self.phase = if self.progress >= 100.0 {
                        RowPhase::Holding {
                            until: next_tick + HOLD_DURATION,
                        }
                    } else {
                        RowPhase::Active {
                            next_tick: next_tick + TICK_INTERVAL,
                        }
                    };
                }
                RowPhase::Holding { until } => {
                    if until > now {
                        return true;
                    }
                    self.phase = RowPhase::Leaving { since: until };
                }
                RowPhase::Leaving { since } => {
                    return !ROW_EXIT.is_finished(now - since);
                }
            }
        }
    }
}

/// The panel listing one row per file being uploaded.
#[derive(Debug)]
pub struct ProgressPanel {
    mode: ProgressMode,
    rows: Vec<ProgressRow>,
    visible: bool,
    next_id: u64,
}

impl ProgressPanel {
    pub fn new(mode: ProgressMode) -> Self {
        Self {
            mode,
            rows: Vec::new(),
            visible: false,
            next_id: 0,
        }
    }

    pub fn mode(&self) -> ProgressMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ProgressMode) {
        self.mode = mode;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn rows(&self) -> &[ProgressRow] {
        &self.rows
    }

    /// Adds a row at 0 % and shows the panel.
    pub fn add_row(&mut self, file_name: &str, size: u64, now: f64) -> RowId {
        let id = RowId(self.next_id);
        self.next_id += 1;

        self.rows.push(ProgressRow {
            id,
            file_name: file_name.to_owned(),
            size,
            progress: 0.0,
            failed: false,
            phase: RowPhase::Active {
                next_tick: now + TICK_INTERVAL,
            },
        });
        self.visible = true;
        id
    }

    /// Advances every row to `now`, removing faded rows.
    /// The panel hides itself when its last row is removed.
    pub fn tick<R: Rng>(&mut self, now: f64, rng: &mut R) {
        if self.rows.is_empty() {
            return;
        }

        let mode = self.mode;
        self.rows.retain_mut(|row| row.advance(mode, now, rng));

        if self.rows.is_empty() {
            self.visible = false;
        }
    }

    /// Raises a row to the transferred percentage. Unknown rows are ignored.
    pub fn report_transfer(&mut self, id: RowId, percent: f32) {
        if self.mode != ProgressMode::Transfer {
            return;
        }
        if let Some(row) = self.row_mut(id)
            && matches!(row.phase, RowPhase::Active { .. })
        {
            row.raise_to(percent);
        }
    }

    /// Completes transfer-driven rows once the server has answered.
    /// Simulated rows don't follow the request outcome.
    pub fn finish_rows(&mut self, ids: &[RowId], succeeded: bool, now: f64) {
        if self.mode != ProgressMode::Transfer {
            return;
        }
        for id in ids {
            if let Some(row) = self.row_mut(*id)
                && matches!(row.phase, RowPhase::Active { .. })
            {
                if succeeded {
                    row.raise_to(100.0);
                } else {
                    row.failed = true;
                }
                row.phase = RowPhase::Holding {
                    until: now + HOLD_DURATION,
                };
            }
        }
    }

    /// Drops every row and hides the panel. Returns how many rows were dropped.
    pub fn cancel(&mut self) -> usize {
        let dropped = self.rows.len();
        self.rows.clear();
        self.visible = false;
        dropped
    }

    fn row_mut(&mut self, id: RowId) -> Option<&mut ProgressRow> {
        self.rows.iter_mut().find(|row| row.id == id)
    }
}
