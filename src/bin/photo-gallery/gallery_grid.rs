//! Gallery page: thumbnail grid and the lightbox overlay.

use crate::assets::ImageSize;
use crate::colors;
use crate::constants::{GRID_CELL, GRID_SPACING, HERO_HEIGHT, NAVBAR_HEIGHT};
use crate::ui::{cover_uv, fit_rect, grid_cells, hero, show_transformed};
use crate::PhotoGalleryApp;
use eframe::egui;
use photo_gallery::lightbox::CLOSE_DURATION;

impl PhotoGalleryApp {
    pub fn show_gallery(&mut self, ui: &mut egui::Ui, now: f64) {
        hero(
            ui,
            "Gallery",
            "Click a photo to enlarge it",
            HERO_HEIGHT * 0.75 + NAVBAR_HEIGHT,
        );
        ui.add_space(32.0);

        if self.gallery.is_empty() {
            ui.vertical_centered(|ui| {
                ui.label("No images yet. Upload some from the Upload page.");
                ui.weak(self.settings.gallery_dir.display().to_string());
            });
            return;
        }

        let ctx = ui.ctx().clone();
        let cell = egui::Vec2::from(GRID_CELL);
        let cells = grid_cells(ui, self.gallery.len(), cell, GRID_SPACING);

        if let Some(first) = cells.first() {
            let viewport_center = ui.clip_rect().center().y;
            if self.gallery_reveal.observe(first.top(), viewport_center, now) {
                log::debug!("Gallery grid revealed");
            }
        }

        let mut clicked = None;
        for (index, (image, rect)) in self.gallery.iter().zip(cells).enumerate() {
            let response = ui.interact(rect, ui.id().with(("gallery_item", index)), egui::Sense::click());
            if response.clicked() {
                clicked = Some(image.key());
            }

            // Only cells on screen start decoding.
            let texture = if ui.is_rect_visible(rect) {
                self.images.texture(&ctx, &image.path, ImageSize::Thumbnail)
            } else {
                None
            };
            let failed = self.images.failed(&image.path, ImageSize::Thumbnail);
            let hovered = response.on_hover_cursor(egui::CursorIcon::PointingHand).hovered();

            show_transformed(ui, rect, self.gallery_reveal.sample(index, now), |ui| {
                let thumb_rect = egui::Rect::from_min_size(ui.max_rect().min, egui::vec2(cell.x, cell.x));
                let painter = ui.painter();

                match &texture {
                    Some(texture) => {
                        painter.image(
                            texture.id(),
                            thumb_rect,
                            cover_uv(texture.size_vec2(), thumb_rect.size()),
                            egui::Color32::WHITE,
                        );
                    }
                    None => {
                        painter.rect_filled(thumb_rect, 8.0, colors::CARD_STROKE);
                        painter.text(
                            thumb_rect.center(),
                            egui::Align2::CENTER_CENTER,
                            if failed { "⚠" } else { "…" },
                            egui::FontId::proportional(24.0),
                            colors::NAV_SOLID_TEXT,
                        );
                    }
                }
                if hovered {
                    painter.rect_stroke(
                        thumb_rect,
                        0.0,
                        egui::Stroke::new(3.0, colors::DROP_ZONE_HOVER),
                        egui::StrokeKind::Inside,
                    );
                }

                painter.text(
                    thumb_rect.center_bottom() + egui::vec2(0.0, 8.0),
                    egui::Align2::CENTER_TOP,
                    &image.name,
                    egui::FontId::proportional(14.0),
                    ui.visuals().text_color(),
                );
            });
        }
        ui.add_space(32.0);

        if let Some(source) = clicked {
            log::debug!("Opening lightbox for {source}");
            self.lightbox.open(source, now);
        }
    }

    /// Renders the lightbox over everything else while it is visible.
    pub fn show_lightbox(&mut self, ctx: &egui::Context, now: f64) {
        let opacity = ctx.animate_value_with_time(
            egui::Id::new("lightbox_opacity"),
            self.lightbox.target_opacity(),
            CLOSE_DURATION as f32,
        );
        if !self.lightbox.is_visible() {
            return;
        }

        let image = self
            .lightbox
            .source()
            .and_then(|source| self.gallery.iter().find(|image| image.key() == source))
            .cloned();
        let texture = image
            .as_ref()
            .and_then(|image| self.images.texture(ctx, &image.path, ImageSize::Full));

        let screen = ctx.screen_rect();
        let mut backdrop_clicked = false;
        let mut close_clicked = false;
        let mut details_clicked = false;

        egui::Area::new(egui::Id::new("lightbox"))
            .order(egui::Order::Foreground)
            .fixed_pos(screen.min)
            .show(ctx, |ui| {
                ui.set_opacity(opacity);

                let backdrop = ui.allocate_rect(screen, egui::Sense::click());
                backdrop_clicked = backdrop.clicked();
                ui.painter().rect_filled(screen, 0.0, colors::BACKDROP);

                let frame = screen.shrink2(egui::vec2(64.0, 72.0));
                match &texture {
                    Some(texture) => {
                        let rect = fit_rect(texture.size_vec2(), frame);
                        // Clicks on the image itself must not reach the backdrop.
                        ui.allocate_rect(rect, egui::Sense::click());
                        ui.painter().image(
                            texture.id(),
                            rect,
                            egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                            egui::Color32::WHITE,
                        );
                    }
                    None => {
                        ui.put(
                            egui::Rect::from_center_size(frame.center(), egui::vec2(48.0, 48.0)),
                            egui::Spinner::new().size(48.0),
                        );
                    }
                }

                let close_rect = egui::Rect::from_min_size(
                    screen.right_top() + egui::vec2(-56.0, 16.0),
                    egui::vec2(40.0, 40.0),
                );
                close_clicked = ui
                    .put(close_rect, egui::Button::new(egui::RichText::new("✕").size(22.0)))
                    .on_hover_text("Close (Esc)")
                    .clicked();

                if image.is_some() {
                    let details_rect = egui::Rect::from_center_size(
                        screen.center_bottom() - egui::vec2(0.0, 36.0),
                        egui::vec2(120.0, 32.0),
                    );
                    details_clicked = ui.put(details_rect, egui::Button::new("Details")).clicked();
                }
            });

        if details_clicked && let Some(image) = image {
            self.open_viewer(image, now);
        } else if close_clicked {
            self.lightbox.close(now);
        } else if backdrop_clicked {
            self.lightbox.click_backdrop(now);
        }
    }
}
