//! Zoom state of the image viewer.

/// Smallest scale (image fits its frame).
pub const ZOOM_MIN: f32 = 1.0;

/// Largest scale.
pub const ZOOM_MAX: f32 = 3.0;

/// Scale change per wheel notch.
pub const ZOOM_STEP: f32 = 0.1;

/// Scale a click zooms in to.
pub const CLICK_ZOOM: f32 = 2.0;

/// Scroll distance egui reports for one mouse-wheel notch.
pub const WHEEL_NOTCH_POINTS: f32 = 40.0;

/// Direction of one mouse-wheel notch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDirection {
    Up,
    Down,
}

impl WheelDirection {
    /// Maps an egui scroll delta (positive = wheel up) to a direction.
    pub fn from_scroll_delta(delta_y: f32) -> Option<Self> {
        if delta_y > 0.0 {
            Some(Self::Up)
        } else if delta_y < 0.0 {
            Some(Self::Down)
        } else {
            None
        }
    }
}

/// Turns per-frame scroll deltas into whole wheel notches.
///
/// A mouse wheel reports a notch in one frame; trackpads spread the same
/// distance over many small deltas.
#[derive(Debug, Default, Clone, Copy)]
pub struct WheelAccumulator {
    pending: f32,
}

impl WheelAccumulator {
    /// Adds a scroll delta in points and returns one direction per whole notch crossed.
    pub fn feed(&mut self, delta_y: f32) -> Vec<WheelDirection> {
        if !delta_y.is_finite() {
            return Vec::new();
        }
        // Reversing drops the partial notch.
        if self.pending * delta_y < 0.0 {
            self.pending = 0.0;
        }
        self.pending += delta_y;

        let notches = (self.pending / WHEEL_NOTCH_POINTS).trunc();
        self.pending -= notches * WHEEL_NOTCH_POINTS;

        match WheelDirection::from_scroll_delta(notches) {
            Some(direction) => vec![direction; notches.abs() as usize],
            None => Vec::new(),
        }
    }
}

/// Uniform scale applied to the viewed image. Always within `ZOOM_MIN..=ZOOM_MAX`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomViewer {
    scale: f32,
}

impl Default for ZoomViewer {
    fn default() -> Self {
        Self { scale: ZOOM_MIN }
    }
}

impl ZoomViewer {
    pub fn scale(&self) -> f32 {
        self.scale
    }

    /// Wheel-down zooms in, wheel-up zooms out.
    pub fn on_wheel(&mut self, direction: WheelDirection) {
        let delta = match direction {
            WheelDirection::Down => ZOOM_STEP,
            WheelDirection::Up => -ZOOM_STEP,
        };
        self.set_clamped(self.scale + delta);
    }

    /// Toggles between the resting scale and `CLICK_ZOOM`, dropping any wheel zoom.
    pub fn on_click(&mut self) {
        self.scale = if self.is_at_rest() {
            CLICK_ZOOM
        } else {
            ZOOM_MIN
        };
    }

    /// Pinch or ctrl+scroll zoom; `factor` is the multiplicative change for this frame.
    pub fn on_pinch(&mut self, factor: f32) {
        if factor.is_finite() && factor > 0.0 {
            self.set_clamped(self.scale * factor);
        }
    }

    pub fn reset(&mut self) {
        self.scale = ZOOM_MIN;
    }

    /// Resting means unzoomed, allowing for float drift from wheel steps.
    pub fn is_at_rest(&self) -> bool {
        (self.scale - ZOOM_MIN).abs() < ZOOM_STEP / 100.0
    }

    fn set_clamped(&mut self, scale: f32) {
        self.scale = scale.clamp(ZOOM_MIN, ZOOM_MAX);
    }
}
