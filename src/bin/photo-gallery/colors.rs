//! Color constants for the navbar, page chrome and upload widget.

use eframe::egui::Color32;

// Navbar over the hero
pub const NAV_TRANSPARENT_TEXT: Color32 = Color32::from_rgb(243, 244, 246);

// Navbar once the page has scrolled
pub const NAV_SOLID_FILL: Color32 = Color32::WHITE;
pub const NAV_SOLID_TEXT: Color32 = Color32::from_rgb(31, 41, 55);
pub const NAV_SHADOW: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 40);

// Hero band
pub const HERO_FILL: Color32 = Color32::from_rgb(30, 41, 59);
pub const HERO_TEXT: Color32 = Color32::from_rgb(243, 244, 246);
pub const HERO_SUBTEXT: Color32 = Color32::from_rgb(203, 213, 225);

// Cards and tags
pub const CARD_FILL: Color32 = Color32::from_rgb(248, 250, 252);
pub const CARD_STROKE: Color32 = Color32::from_rgb(226, 232, 240);
pub const TAG_FILL: Color32 = Color32::from_rgb(219, 234, 254);
pub const TAG_TEXT: Color32 = Color32::from_rgb(30, 64, 175);

// Lightbox
pub const BACKDROP: Color32 = Color32::from_rgba_premultiplied(0, 0, 0, 230);

// Upload widget
pub const DROP_ZONE_STROKE: Color32 = Color32::from_rgb(148, 163, 184);
pub const DROP_ZONE_HOVER: Color32 = Color32::from_rgb(59, 130, 246);
pub const BANNER_FILL: Color32 = Color32::from_rgb(220, 252, 231);
pub const BANNER_TEXT: Color32 = Color32::from_rgb(22, 101, 52);
pub const PROGRESS_FILL: Color32 = Color32::from_rgb(59, 130, 246);
pub const PROGRESS_FAILED: Color32 = Color32::from_rgb(220, 38, 38);
