//! Lightbox overlay that shows one gallery image enlarged.
//!
//! Times are seconds on the UI clock (`egui::InputState::time`).

/// Delay between showing the overlay and starting its fade-in.
pub const OPEN_DELAY: f64 = 0.010;

/// Duration of the fade-out before the overlay is hidden.
pub const CLOSE_DURATION: f64 = 0.300;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightboxPhase {
    Closed,
    /// Visible at zero opacity, waiting for the fade-in to start
    Opening { since: f64 },
    Open,
    /// Fading out, hidden once the fade completes
    Closing { since: f64 },
}

/// Lightbox state machine. There is a single lightbox per gallery page.
#[derive(Debug)]
pub struct Lightbox {
    phase: LightboxPhase,
    source: Option<String>,
}

impl Default for Lightbox {
    fn default() -> Self {
        Self {
            phase: LightboxPhase::Closed,
            source: None,
        }
    }
}

impl Lightbox {
    pub fn phase(&self) -> LightboxPhase {
        self.phase
    }

    /// Image source currently shown (kept while fading out).
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Shows `source` in the lightbox.
    ///
    /// An open lightbox only swaps its image. A closing one is brought back.
    pub fn open(&mut self, source: impl Into<String>, now: f64) {
        self.source = Some(source.into());
        match self.phase {
            LightboxPhase::Open | LightboxPhase::Opening { .. } => {}
            LightboxPhase::Closed | LightboxPhase::Closing { .. } => {
                self.phase = LightboxPhase::Opening { since: now };
            }
        }
    }

    /// Starts fading the lightbox out. No-op when already closing or closed.
    pub fn close(&mut self, now: f64) {
        if matches!(
            self.phase,
            LightboxPhase::Open | LightboxPhase::Opening { .. }
        ) {
            self.phase = LightboxPhase::Closing { since: now };
        }
    }

    /// Click that landed on the backdrop around the image.
    pub fn click_backdrop(&mut self, now: f64) {
        self.close(now);
    }

    /// Advances timed transitions.
    pub fn tick(&mut self, now: f64) {
        match self.phase {
            LightboxPhase::Opening { since } if now - since >= OPEN_DELAY => {
                self.phase = LightboxPhase::Open;
            }
            LightboxPhase::Closing { since } if now - since >= CLOSE_DURATION => {
                self.phase = LightboxPhase::Closed;
            }
            _ => {}
        }
    }

    pub fn is_visible(&self) -> bool {
        self.phase != LightboxPhase::Closed
    }

    /// Opacity the overlay is transitioning towards.
    pub fn target_opacity(&self) -> f32 {
        match self.phase {
            LightboxPhase::Open => 1.0,
            _ => 0.0,
        }
    }

    /// Whether a timed transition is still pending, so the UI keeps repainting.
    pub fn is_animating(&self) -> bool {
        matches!(
            self.phase,
            LightboxPhase::Opening { .. } | LightboxPhase::Closing { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opens_after_short_delay() {
        let mut lightbox = Lightbox::default();
        lightbox.open("a.jpg", 1.0);

        assert!(lightbox.is_visible());
        assert_eq!(lightbox.target_opacity(), 0.0);

        lightbox.tick(1.005);
        assert_eq!(lightbox.phase(), LightboxPhase::Opening { since: 1.0 });

        lightbox.tick(1.011);
        assert_eq!(lightbox.phase(), LightboxPhase::Open);
        assert_eq!(lightbox.target_opacity(), 1.0);
        assert_eq!(lightbox.source(), Some("a.jpg"));
    }

    #[test]
    fn closes_after_fade() {
        let mut lightbox = Lightbox::default();
        lightbox.open("a.jpg", 0.0);
        lightbox.tick(0.02);

        lightbox.close(1.0);
        assert!(lightbox.is_visible());
        assert_eq!(lightbox.target_opacity(), 0.0);

        lightbox.tick(1.2);
        assert!(lightbox.is_visible());

        lightbox.tick(1.3);
        assert!(!lightbox.is_visible());
        assert!(!lightbox.is_animating());
    }

    #[test]
    fn backdrop_click_closes() {
        let mut lightbox = Lightbox::default();
        lightbox.open("a.jpg", 0.0);
        lightbox.tick(0.1);

        lightbox.click_backdrop(0.5);
        assert_eq!(lightbox.phase(), LightboxPhase::Closing { since: 0.5 });
    }

    #[test]
    fn second_open_replaces_source() {
        let mut lightbox = Lightbox::default();
        lightbox.open("a.jpg", 0.0);
        lightbox.tick(0.1);

        lightbox.open("b.jpg", 0.2);
        assert_eq!(lightbox.phase(), LightboxPhase::Open);
        assert_eq!(lightbox.source(), Some("b.jpg"));
    }

    #[test]
    fn open_during_fade_out_wins() {
        let mut lightbox = Lightbox::default();
        lightbox.open("a.jpg", 0.0);
        lightbox.tick(0.1);
        lightbox.close(1.0);

        lightbox.open("b.jpg", 1.1);
        lightbox.tick(1.5);
        assert_eq!(lightbox.phase(), LightboxPhase::Open);
        assert_eq!(lightbox.source(), Some("b.jpg"));
    }

    #[test]
    fn closing_a_closed_lightbox_does_nothing() {
        let mut lightbox = Lightbox::default();
        lightbox.close(0.0);
        assert_eq!(lightbox.phase(), LightboxPhase::Closed);

        lightbox.open("a.jpg", 1.0);
        lightbox.close(1.001);
        lightbox.close(1.2);
        assert_eq!(lightbox.phase(), LightboxPhase::Closing { since: 1.001 });
    }
}
