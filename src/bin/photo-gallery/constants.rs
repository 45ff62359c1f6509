/// Height of the navigation bar overlaying the top of every page.
pub const NAVBAR_HEIGHT: f32 = 52.0;

/// Height of the hero band at the top of each page.
pub const HERO_HEIGHT: f32 = 260.0;

/// Longest side of the decoded grid thumbnails, in pixels.
pub const THUMBNAIL_SIZE: u32 = 320;

/// Longest side of full-size textures, in pixels.
pub const FULL_IMAGE_MAX_SIDE: u32 = 4096;

/// Size of one gallery grid cell, caption included.
pub const GRID_CELL: [f32; 2] = [240.0, 270.0];

/// Size of one home page feature card.
pub const FEATURE_CARD: [f32; 2] = [280.0, 180.0];

/// Gap between grid cells and cards.
pub const GRID_SPACING: f32 = 24.0;

/// Height of the upload drop zone.
pub const DROP_ZONE_HEIGHT: f32 = 220.0;

/// Quiet period before a burst of gallery directory changes triggers a reload.
pub const RELOAD_DEBOUNCE: f64 = 0.5;

/// Textures not drawn for this long are dropped and decoded again when next needed.
pub const TEXTURE_IDLE_EVICT: f64 = 30.0;
