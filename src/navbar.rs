//! Top navigation bar style driven by the page scroll offset.

/// Scroll offset (in points) past which the navbar turns solid.
pub const SOLID_SCROLL_THRESHOLD: f32 = 50.0;

/// Visual state of the navbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavbarStyle {
    /// See-through background with light link text, used over the page hero
    #[default]
    Transparent,
    /// Opaque background with a shadow and dark link text
    Solid,
}

impl NavbarStyle {
    /// Style for a vertical scroll offset. Depends on nothing but the offset.
    pub fn for_offset(offset: f32) -> Self {
        if offset > SOLID_SCROLL_THRESHOLD {
            Self::Solid
        } else {
            Self::Transparent
        }
    }
}

/// Tracks the navbar style of the page currently shown.
#[derive(Debug, Default)]
pub struct Navbar {
    style: NavbarStyle,
}

impl Navbar {
    pub fn style(&self) -> NavbarStyle {
        self.style
    }

    /// Applies the style for `offset`. Returns whether the style changed.
    pub fn on_scroll(&mut self, offset: f32) -> bool {
        let style = NavbarStyle::for_offset(offset);
        let changed = style != self.style;
        if changed {
            log::debug!("Navbar style {:?} -> {:?} at offset {offset}", self.style, style);
        }
        self.style = style;
        changed
    }
}
