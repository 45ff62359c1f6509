use crate::colors;
use crate::constants::{FEATURE_CARD, GRID_SPACING, HERO_HEIGHT, NAVBAR_HEIGHT};
use crate::ui::{grid_cells, hero, show_transformed};
use crate::{Page, PhotoGalleryApp};
use eframe::egui;

impl PhotoGalleryApp {
    pub fn show_home(&mut self, ui: &mut egui::Ui, now: f64) {
        let hero_rect = hero(
            ui,
            "Your memories, beautifully kept",
            "Upload photos and browse them with descriptions, tags and colours",
            HERO_HEIGHT + NAVBAR_HEIGHT,
        );

        let mut target = None;
        let buttons = egui::Rect::from_center_size(
            hero_rect.center_bottom() - egui::vec2(0.0, 48.0),
            egui::vec2(300.0, 36.0),
        );
        let mut buttons_ui = ui.new_child(
            egui::UiBuilder::new()
                .max_rect(buttons)
                .layout(egui::Layout::left_to_right(egui::Align::Center)),
        );
        if buttons_ui
            .button(egui::RichText::new("Browse gallery").size(16.0))
            .clicked()
        {
            target = Some(Page::Gallery);
        }
        if buttons_ui
            .button(egui::RichText::new("Upload photos").size(16.0))
            .clicked()
        {
            target = Some(Page::Uploader);
        }

        ui.add_space(48.0);
        ui.vertical_centered(|ui| ui.heading("Features"));
        ui.add_space(24.0);

        let cells = grid_cells(
            ui,
            self.features.len(),
            egui::Vec2::from(FEATURE_CARD),
            GRID_SPACING,
        );
        if let Some(first) = cells.first() {
            let viewport_center = ui.clip_rect().center().y;
            if self.feature_reveal.observe(first.top(), viewport_center, now) {
                log::debug!("Feature cards revealed");
            }
        }

        for (index, (card, rect)) in self.features.iter().zip(cells).enumerate() {
            show_transformed(ui, rect, self.feature_reveal.sample(index, now), |ui| {
                egui::Frame::NONE
                    .fill(colors::CARD_FILL)
                    .stroke(egui::Stroke::new(1.0, colors::CARD_STROKE))
                    .corner_radius(12.0)
                    .inner_margin(20.0)
                    .show(ui, |ui| {
                        ui.set_min_size(rect.size() - egui::vec2(40.0, 40.0));
                        ui.label(egui::RichText::new(&card.icon).size(32.0));
                        ui.add_space(8.0);
                        ui.label(egui::RichText::new(&card.title).strong().size(18.0));
                        ui.add_space(4.0);
                        ui.label(&card.body);
                    });
            });
        }

        ui.add_space(48.0);

        if let Some(page) = target {
            self.navigate(page, now);
        }
    }
}
