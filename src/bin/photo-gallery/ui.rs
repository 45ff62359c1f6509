//! Shared chrome: navbar, status bar, settings window and layout helpers.

use crate::colors;
use crate::constants::{HERO_HEIGHT, NAVBAR_HEIGHT};
use crate::{Page, PhotoGalleryApp};
use eframe::egui;
use photo_gallery::config::Settings;
use photo_gallery::navbar::NavbarStyle;
use photo_gallery::reveal::Transform;
use photo_gallery::upload::ProgressMode;
use std::path::PathBuf;

/// Editable copy of the settings while the settings window is open.
pub struct SettingsDraft {
    server_url: String,
    gallery_dir: String,
    progress_mode: ProgressMode,
}

impl From<&Settings> for SettingsDraft {
    fn from(settings: &Settings) -> Self {
        Self {
            server_url: settings.server_url.clone(),
            gallery_dir: settings.gallery_dir.display().to_string(),
            progress_mode: settings.progress_mode,
        }
    }
}

impl SettingsDraft {
    fn to_settings(&self) -> Settings {
        Settings {
            server_url: self.server_url.trim().to_owned(),
            gallery_dir: PathBuf::from(self.gallery_dir.trim()),
            progress_mode: self.progress_mode,
        }
    }
}

impl PhotoGalleryApp {
    /// Handles page shortcuts: Escape backs out, +/-/0 drive the viewer zoom.
    pub fn handle_keyboard_input(&mut self, ctx: &egui::Context, now: f64) {
        if ctx.wants_keyboard_input() {
            return;
        }

        let (escape, zoom_in, zoom_out, reset) = ctx.input(|i| {
            (
                i.key_pressed(egui::Key::Escape),
                i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals),
                i.key_pressed(egui::Key::Minus),
                i.key_pressed(egui::Key::Num0),
            )
        });

        match self.page {
            Page::Gallery if escape => self.lightbox.close(now),
            Page::Viewer => {
                if escape {
                    self.navigate(Page::Gallery, now);
                } else if let Some(viewer) = &mut self.viewer {
                    viewer.handle_zoom_keys(zoom_in, zoom_out, reset);
                }
            }
            _ => {}
        }
    }

    /// Renders the navbar over the top of the page, styled by the scroll offset.
    pub fn show_navbar(&mut self, ctx: &egui::Context, panel_rect: egui::Rect, now: f64) {
        let (fill, text, shadow) = match self.navbar.style() {
            NavbarStyle::Transparent => (
                egui::Color32::TRANSPARENT,
                colors::NAV_TRANSPARENT_TEXT,
                egui::Shadow::NONE,
            ),
            NavbarStyle::Solid => (
                colors::NAV_SOLID_FILL,
                colors::NAV_SOLID_TEXT,
                egui::Shadow {
                    offset: [0, 2],
                    blur: 8,
                    spread: 0,
                    color: colors::NAV_SHADOW,
                },
            ),
        };

        let mut target = None;
        let mut open_settings = false;

        egui::Area::new(egui::Id::new("navbar"))
            .fixed_pos(panel_rect.min)
            .order(egui::Order::Middle)
            .show(ctx, |ui| {
                egui::Frame::NONE
                    .fill(fill)
                    .shadow(shadow)
                    .inner_margin(egui::Margin::symmetric(20, 0))
                    .show(ui, |ui| {
                        ui.set_width(panel_rect.width() - 40.0);
                        ui.set_height(NAVBAR_HEIGHT);
                        ui.horizontal_centered(|ui| {
                            ui.label(
                                egui::RichText::new("📷 Photo Gallery")
                                    .strong()
                                    .size(18.0)
                                    .color(text),
                            );

                            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                                if ui
                                    .add(egui::Button::new(egui::RichText::new("⚙").color(text)).frame(false))
                                    .on_hover_text("Settings")
                                    .clicked()
                                {
                                    open_settings = true;
                                }

                                for (page, label) in [
                                    (Page::Uploader, "Upload"),
                                    (Page::Gallery, "Gallery"),
                                    (Page::Home, "Home"),
                                ] {
                                    let selected = self.page == page
                                        || (page == Page::Gallery && self.page == Page::Viewer);
                                    let label = egui::RichText::new(label).size(15.0).color(text);
                                    if ui.selectable_label(selected, label).clicked() {
                                        target = Some(page);
                                    }
                                }
                            });
                        });
                    });
            });

        if let Some(page) = target {
            self.navigate(page, now);
        }
        if open_settings && self.settings_draft.is_none() {
            self.settings_draft = Some(SettingsDraft::from(&self.settings));
        }
    }

    /// Renders the bottom status bar with controls hint and gallery info.
    pub fn show_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(match self.page {
                    Page::Home => "Scroll to explore",
                    Page::Gallery => "Click: Enlarge | Esc: Close",
                    Page::Viewer => "Wheel: Zoom | Click: 1x/2x | +/-: Zoom | 0: Reset | Esc: Back",
                    Page::Uploader => "Drop images onto the window or click the drop zone",
                });

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("Server: {}", self.settings.server_url));
                    ui.separator();
                    ui.label(format!(
                        "{} images in {}",
                        self.gallery.len(),
                        self.settings.gallery_dir.display()
                    ));
                    if self.uploads.board().in_flight() > 0 {
                        ui.separator();
                        ui.spinner();
                    }
                });
            });
        });
    }

    /// Renders the settings window while a draft is open.
    pub fn show_settings_window(&mut self, ctx: &egui::Context) {
        let Some(draft) = &mut self.settings_draft else {
            return;
        };

        let mut open = true;
        let mut apply = false;

        egui::Window::new("Settings")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
            .show(ctx, |ui| {
                egui::Grid::new("settings_grid")
                    .num_columns(2)
                    .spacing([12.0, 8.0])
                    .show(ui, |ui| {
                        ui.label("Server URL");
                        ui.text_edit_singleline(&mut draft.server_url);
                        ui.end_row();

                        ui.label("Gallery folder");
                        ui.horizontal(|ui| {
                            ui.text_edit_singleline(&mut draft.gallery_dir);
                            if ui.button("Browse…").clicked()
                                && let Some(dir) = rfd::FileDialog::new()
                                    .set_directory(&draft.gallery_dir)
                                    .pick_folder()
                            {
                                draft.gallery_dir = dir.display().to_string();
                            }
                        });
                        ui.end_row();

                        ui.label("Upload progress");
                        egui::ComboBox::from_id_salt("progress_mode")
                            .selected_text(draft.progress_mode.label())
                            .show_ui(ui, |ui| {
                                for mode in [ProgressMode::Transfer, ProgressMode::Simulated] {
                                    ui.selectable_value(&mut draft.progress_mode, mode, mode.label());
                                }
                            });
                        ui.end_row();
                    });

                ui.separator();
                apply = ui.button("Apply").clicked();
            });

        if apply {
            let settings = draft.to_settings();
            self.settings_draft = None;
            self.apply_settings(ctx, settings);
        } else if !open {
            self.settings_draft = None;
        }
    }
}

/// Dark band at the top of a page, sized so the transparent navbar sits on it.
pub fn hero(ui: &mut egui::Ui, title: &str, subtitle: &str, height: f32) -> egui::Rect {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(ui.available_width(), height), egui::Sense::hover());
    ui.painter().rect_filled(rect, 0.0, colors::HERO_FILL);

    let center = rect.center() + egui::vec2(0.0, NAVBAR_HEIGHT / 2.0);
    ui.painter().text(
        center,
        egui::Align2::CENTER_BOTTOM,
        title,
        egui::FontId::proportional(if height >= HERO_HEIGHT { 38.0 } else { 28.0 }),
        colors::HERO_TEXT,
    );
    ui.painter().text(
        center + egui::vec2(0.0, 10.0),
        egui::Align2::CENTER_TOP,
        subtitle,
        egui::FontId::proportional(16.0),
        colors::HERO_SUBTEXT,
    );
    rect
}

/// Runs `add_contents` in a child ui at `rect` moved and faded by `transform`.
pub fn show_transformed<R>(
    ui: &mut egui::Ui,
    rect: egui::Rect,
    transform: Transform,
    add_contents: impl FnOnce(&mut egui::Ui) -> R,
) -> R {
    let rect = rect.translate(egui::vec2(0.0, transform.offset_y));
    let mut child = ui.new_child(
        egui::UiBuilder::new()
            .max_rect(rect)
            .layout(egui::Layout::top_down(egui::Align::Min)),
    );
    child.set_opacity(transform.opacity);
    add_contents(&mut child)
}

/// Cell rects of a grid of `count` equally sized cells filling the available width.
pub fn grid_cells(ui: &mut egui::Ui, count: usize, cell: egui::Vec2, spacing: f32) -> Vec<egui::Rect> {
    let width = ui.available_width();
    let columns = (((width + spacing) / (cell.x + spacing)).floor() as usize).max(1);
    let rows = count.div_ceil(columns);

    let used_width = columns as f32 * cell.x + (columns - 1) as f32 * spacing;
    let height = rows as f32 * (cell.y + spacing);
    let (area, _) = ui.allocate_exact_size(egui::vec2(width, height), egui::Sense::hover());
    let left = area.left() + ((width - used_width) / 2.0).max(0.0);

    (0..count)
        .map(|index| {
            let (row, column) = (index / columns, index % columns);
            let min = egui::pos2(
                left + column as f32 * (cell.x + spacing),
                area.top() + row as f32 * (cell.y + spacing),
            );
            egui::Rect::from_min_size(min, cell)
        })
        .collect()
}

/// Centred column at most `max_width` wide.
pub fn content_column<R>(ui: &mut egui::Ui, max_width: f32, add_contents: impl FnOnce(&mut egui::Ui) -> R) -> R {
    let width = ui.available_width().min(max_width);
    let margin = ((ui.available_width() - width) / 2.0).max(0.0);
    ui.horizontal_top(|ui| {
        ui.add_space(margin);
        ui.vertical(|ui| {
            ui.set_width(width);
            add_contents(ui)
        })
        .inner
    })
    .inner
}

/// Largest rect with the image's aspect ratio that fits in `bounds`, centred.
pub fn fit_rect(image_size: egui::Vec2, bounds: egui::Rect) -> egui::Rect {
    let scale = (bounds.width() / image_size.x).min(bounds.height() / image_size.y);
    egui::Rect::from_center_size(bounds.center(), image_size * scale)
}

/// UV rect cropping the image centrally so it covers a `target`-sized rect.
pub fn cover_uv(image_size: egui::Vec2, target: egui::Vec2) -> egui::Rect {
    let image_aspect = image_size.x / image_size.y;
    let target_aspect = target.x / target.y;

    let (u, v) = if image_aspect > target_aspect {
        (target_aspect / image_aspect, 1.0)
    } else {
        (1.0, image_aspect / target_aspect)
    };
    egui::Rect::from_center_size(egui::pos2(0.5, 0.5), egui::vec2(u, v))
}

pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}
