//! Upload page: drop zone, success banner, progress rows and the failure alert.

use crate::colors;
use crate::constants::{DROP_ZONE_HEIGHT, HERO_HEIGHT, NAVBAR_HEIGHT};
use crate::ui::{content_column, format_size, hero, show_transformed};
use crate::{Page, PhotoGalleryApp};
use eframe::egui;
use photo_gallery::gallery::IMAGE_EXTENSIONS;
use photo_gallery::upload::{FileSource, SelectedFile, read_paths};

/// Height of one progress row.
const ROW_HEIGHT: f32 = 48.0;

impl PhotoGalleryApp {
    pub fn show_uploader(&mut self, ui: &mut egui::Ui, now: f64) {
        hero(
            ui,
            "Upload",
            "Add new photos to your gallery",
            HERO_HEIGHT * 0.75 + NAVBAR_HEIGHT,
        );
        ui.add_space(32.0);

        content_column(ui, 720.0, |ui| {
            if let Some(message) = self.uploads.board().banner(now) {
                egui::Frame::NONE
                    .fill(colors::BANNER_FILL)
                    .corner_radius(8.0)
                    .inner_margin(12.0)
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.label(egui::RichText::new(message).color(colors::BANNER_TEXT).strong());
                    });
                ui.add_space(16.0);
            }

            let width = ui.available_width();
            let (zone, response) =
                ui.allocate_exact_size(egui::vec2(width, DROP_ZONE_HEIGHT), egui::Sense::click());
            let dragging_files = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());
            let highlight = dragging_files || response.hovered();

            show_transformed(ui, zone, self.upload_reveal.sample(0, now), |ui| {
                let zone = ui.max_rect();
                let stroke_color = if highlight {
                    colors::DROP_ZONE_HOVER
                } else {
                    colors::DROP_ZONE_STROKE
                };
                let painter = ui.painter();
                painter.rect_stroke(
                    zone,
                    12.0,
                    egui::Stroke::new(2.0, stroke_color),
                    egui::StrokeKind::Inside,
                );
                painter.text(
                    zone.center() - egui::vec2(0.0, 16.0),
                    egui::Align2::CENTER_CENTER,
                    "⬆",
                    egui::FontId::proportional(36.0),
                    stroke_color,
                );
                painter.text(
                    zone.center() + egui::vec2(0.0, 24.0),
                    egui::Align2::CENTER_CENTER,
                    if dragging_files {
                        "Release to upload"
                    } else {
                        "Drag & drop images here or click to browse"
                    },
                    egui::FontId::proportional(16.0),
                    ui.visuals().text_color(),
                );
            });

            let zone_clicked = response.on_hover_cursor(egui::CursorIcon::PointingHand).clicked();

            ui.add_space(12.0);
            let browse_clicked = ui
                .vertical_centered(|ui| ui.button("Browse files").clicked())
                .inner;

            if zone_clicked || browse_clicked {
                self.pick_files(now);
            }

            ui.add_space(24.0);
            self.show_progress_panel(ui, now);
        });
        ui.add_space(32.0);
    }

    fn show_progress_panel(&mut self, ui: &mut egui::Ui, now: f64) {
        let panel = self.uploads.board().panel();
        if !panel.is_visible() {
            return;
        }

        let mut cancel = false;
        egui::Frame::group(ui.style())
            .corner_radius(8.0)
            .inner_margin(12.0)
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.strong("Uploading");
                    ui.weak(format!("({} progress)", panel.mode().label().to_lowercase()));
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        cancel = ui.button("Cancel").clicked();
                    });
                });
                ui.separator();

                for row in panel.rows() {
                    let (slot, _) = ui.allocate_exact_size(
                        egui::vec2(ui.available_width(), ROW_HEIGHT),
                        egui::Sense::hover(),
                    );
                    show_transformed(ui, slot, row.transform(now), |ui| {
                        ui.horizontal(|ui| {
                            ui.label(row.file_name());
                            ui.weak(format_size(row.size()));
                            if row.failed() {
                                ui.colored_label(colors::PROGRESS_FAILED, "failed");
                            }
                        });
                        let fill = if row.failed() {
                            colors::PROGRESS_FAILED
                        } else {
                            colors::PROGRESS_FILL
                        };
                        ui.add(
                            egui::ProgressBar::new(row.fraction())
                                .text(row.percent_label())
                                .fill(fill),
                        );
                    });
                }
            });

        if cancel {
            self.uploads.cancel();
        }
    }

    /// Opens the native file picker and uploads the chosen images.
    fn pick_files(&mut self, now: f64) {
        let Some(paths) = rfd::FileDialog::new()
            .set_title("Select images to upload")
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_files()
        else {
            return;
        };

        match read_paths(&paths) {
            Ok(files) => {
                self.uploads.select_files(FileSource::Picker, files, now);
            }
            Err(err) => {
                log::warn!("{err}");
                self.error_toast(err.to_string());
            }
        }
    }

    /// Uploads files dropped onto the window while the upload page is shown.
    pub fn handle_dropped_files(&mut self, ctx: &egui::Context, now: f64) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if dropped.is_empty() {
            return;
        }
        if self.page != Page::Uploader {
            log::debug!("Ignoring {} file(s) dropped outside the upload page", dropped.len());
            return;
        }

        let mut files = Vec::with_capacity(dropped.len());
        for file in dropped {
            let selected = match (file.bytes, file.path) {
                (Some(bytes), _) => Ok(SelectedFile::new(file.name, bytes)),
                (None, Some(path)) => SelectedFile::read(&path),
                (None, None) => continue,
            };
            match selected {
                Ok(selected) => files.push(selected),
                Err(err) => {
                    log::warn!("{err}");
                    self.error_toast(err.to_string());
                }
            }
        }

        self.uploads.select_files(FileSource::Drop, files, now);
    }

    /// Blocking alert for a failed upload; one at a time, oldest first.
    pub fn show_upload_alert(&mut self, ctx: &egui::Context) {
        let Some(alert) = self.uploads.board().alert().map(str::to_owned) else {
            return;
        };

        let modal = egui::Modal::new(egui::Id::new("upload_alert")).show(ctx, |ui| {
            ui.set_width(360.0);
            ui.heading("Upload");
            ui.add_space(8.0);
            ui.label(alert);
            ui.add_space(12.0);
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.button("OK").clicked()
            })
            .inner
        });

        if modal.inner || modal.should_close() {
            self.uploads.dismiss_alert();
        }
    }
}
