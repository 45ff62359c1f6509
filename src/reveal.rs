//! Entrance and exit tweens for page elements.
//!
//! An [`Entrance`] is a "from" tween: items start displaced and/or transparent
//! and settle at their layout position. A [`Reveal`] pairs an entrance with the
//! moment it started, either on page load or when its trigger region scrolls
//! into view.

/// Easing curves, named after their usual power-curve families.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    Linear,
    /// Quadratic ease-out
    Power1Out,
    /// Quartic ease-out
    Power3Out,
}

impl Ease {
    /// Maps linear progress `t` in `[0, 1]` to eased progress.
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::Power1Out => 1.0 - (1.0 - t).powi(2),
            Self::Power3Out => 1.0 - (1.0 - t).powi(4),
        }
    }
}

/// Offset and opacity of one animated item. Positive `offset_y` is downward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub offset_y: f32,
    pub opacity: f32,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        offset_y: 0.0,
        opacity: 1.0,
    };

    fn lerp(from: Self, to: Self, t: f32) -> Self {
        Self {
            offset_y: from.offset_y + (to.offset_y - from.offset_y) * t,
            opacity: from.opacity + (to.opacity - from.opacity) * t,
        }
    }
}

/// A staggered "from" tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entrance {
    /// Starting offset below the layout position
    pub offset_y: f32,
    /// Starting opacity
    pub opacity: f32,
    /// Seconds per item
    pub duration: f64,
    /// Extra delay for each subsequent item
    pub stagger: f64,
    /// Delay before the first item starts
    pub delay: f64,
    pub ease: Ease,
}

impl Entrance {
    /// Gallery thumbnails, revealed when the grid scrolls into view.
    pub const GALLERY_ITEMS: Self = Self {
        offset_y: 60.0,
        opacity: 0.0,
        duration: 1.0,
        stagger: 0.2,
        delay: 0.0,
        ease: Ease::Power1Out,
    };

    /// Home page feature cards, revealed when the feature section scrolls into view.
    pub const FEATURE_CARDS: Self = Self::GALLERY_ITEMS;

    /// Image viewer panels on page load.
    pub const VIEWER_PANELS: Self = Self {
        offset_y: 20.0,
        opacity: 0.0,
        duration: 0.8,
        stagger: 0.0,
        delay: 0.0,
        ease: Ease::Power3Out,
    };

    /// Tags below the viewed image; they slide in but stay opaque.
    pub const TAGS: Self = Self {
        offset_y: 10.0,
        opacity: 1.0,
        duration: 0.5,
        stagger: 0.1,
        delay: 0.3,
        ease: Ease::Power3Out,
    };

    /// Upload drop zone on page load.
    pub const UPLOAD_ZONE: Self = Self {
        offset_y: 40.0,
        opacity: 0.0,
        duration: 1.0,
        stagger: 0.0,
        delay: 0.0,
        ease: Ease::Power3Out,
    };

    fn from_state(&self) -> Transform {
        Transform {
            offset_y: self.offset_y,
            opacity: self.opacity,
        }
    }

    /// Transform of item `index`, `elapsed` seconds after the entrance started.
    pub fn sample(&self, index: usize, elapsed: f64) -> Transform {
        let local = elapsed - self.delay - self.stagger * index as f64;
        if local <= 0.0 {
            return self.from_state();
        }
        if self.duration <= 0.0 || local >= self.duration {
            return Transform::IDENTITY;
        }

        let t = self.ease.apply((local / self.duration) as f32);
        Transform::lerp(self.from_state(), Transform::IDENTITY, t)
    }

    /// Seconds until all of `count` items have settled.
    pub fn total_duration(&self, count: usize) -> f64 {
        self.delay + self.stagger * count.saturating_sub(1) as f64 + self.duration
    }
}

/// A "to" tween that fades an item out while lifting it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exit {
    pub offset_y: f32,
    pub duration: f64,
    pub ease: Ease,
}

impl Exit {
    /// Progress rows and the progress panel leaving the upload page.
    pub const FADE_UP: Self = Self {
        offset_y: -20.0,
        duration: 0.5,
        ease: Ease::Power1Out,
    };

    pub fn sample(&self, elapsed: f64) -> Transform {
        if elapsed <= 0.0 {
            return Transform::IDENTITY;
        }
        let t = if self.duration <= 0.0 {
            1.0
        } else {
            self.ease.apply((elapsed / self.duration) as f32)
        };
        Transform::lerp(
            Transform::IDENTITY,
            Transform {
                offset_y: self.offset_y,
                opacity: 0.0,
            },
            t,
        )
    }

    pub fn is_finished(&self, elapsed: f64) -> bool {
        elapsed >= self.duration
    }
}

/// An entrance bound to its start time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reveal {
    entrance: Entrance,
    started_at: Option<f64>,
}

impl Reveal {
    /// Starts immediately.
    pub fn on_load(entrance: Entrance, now: f64) -> Self {
        Self {
            entrance,
            started_at: Some(now),
        }
    }

    /// Waits for [`Reveal::observe`] to see its trigger reach the viewport centre.
    pub fn scroll_triggered(entrance: Entrance) -> Self {
        Self {
            entrance,
            started_at: None,
        }
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Fires once the top of the trigger region is at or above the viewport centre.
    /// Returns whether this call started the reveal.
    pub fn observe(&mut self, trigger_top: f32, viewport_center: f32, now: f64) -> bool {
        if self.started_at.is_some() || trigger_top > viewport_center {
            return false;
        }
        self.started_at = Some(now);
        true
    }

    pub fn sample(&self, index: usize, now: f64) -> Transform {
        match self.started_at {
            Some(start) => self.entrance.sample(index, now - start),
            None => self.entrance.from_state(),
        }
    }

    /// Whether `count` items are still moving at `now`.
    pub fn is_animating(&self, count: usize, now: f64) -> bool {
        self.started_at
            .is_some_and(|start| now - start < self.entrance.total_duration(count))
    }
}
