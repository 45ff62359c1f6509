//! Image viewer page: zoomable image with its description, tags, palette and detected objects.

use crate::assets::ImageSize;
use crate::colors;
use crate::constants::NAVBAR_HEIGHT;
use crate::ui::{fit_rect, hero};
use crate::{Page, PhotoGalleryApp};
use eframe::egui;
use photo_gallery::reveal::{Entrance, Reveal};
use photo_gallery::zoom::{WheelAccumulator, WheelDirection, ZoomViewer};
use photo_gallery::{GalleryImage, parse_hex_color};

pub struct ViewerState {
    pub image: GalleryImage,
    zoom: ZoomViewer,
    wheel: WheelAccumulator,
    panels: Reveal,
    tags: Reveal,
}

impl ViewerState {
    pub fn new(image: GalleryImage, now: f64) -> Self {
        Self {
            image,
            zoom: ZoomViewer::default(),
            wheel: WheelAccumulator::default(),
            panels: Reveal::on_load(Entrance::VIEWER_PANELS, now),
            tags: Reveal::on_load(Entrance::TAGS, now),
        }
    }

    pub fn handle_zoom_keys(&mut self, zoom_in: bool, zoom_out: bool, reset: bool) {
        // Keys mirror the wheel: wheel-down zooms in.
        if zoom_in {
            self.zoom.on_wheel(WheelDirection::Down);
        }
        if zoom_out {
            self.zoom.on_wheel(WheelDirection::Up);
        }
        if reset {
            self.zoom.reset();
        }
    }

    pub fn is_animating(&self, now: f64) -> bool {
        self.panels.is_animating(2, now) || self.tags.is_animating(self.image.details.tags.len(), now)
    }
}

impl PhotoGalleryApp {
    pub fn show_viewer(&mut self, ui: &mut egui::Ui, now: f64) {
        let Some(viewer) = &self.viewer else {
            hero(ui, "Image viewer", "No image selected", 160.0 + NAVBAR_HEIGHT);
            ui.add_space(24.0);
            ui.vertical_centered(|ui| {
                if ui.button("Back to gallery").clicked() {
                    self.navigate(Page::Gallery, now);
                }
            });
            return;
        };

        let subtitle = viewer.image.details.description.clone().unwrap_or_default();
        hero(ui, &viewer.image.name, &first_line(&subtitle), 160.0 + NAVBAR_HEIGHT);
        ui.add_space(24.0);

        let wide = ui.available_width() >= 900.0;
        egui::Frame::NONE
            .inner_margin(egui::Margin::symmetric(24, 0))
            .show(ui, |ui| {
                if wide {
                    ui.columns(2, |columns| {
                        self.show_image_panel(&mut columns[0], now);
                        self.show_details_panel(&mut columns[1], now);
                    });
                } else {
                    self.show_image_panel(ui, now);
                    ui.add_space(16.0);
                    self.show_details_panel(ui, now);
                }
            });
        ui.add_space(32.0);
    }

    fn show_image_panel(&mut self, ui: &mut egui::Ui, now: f64) {
        let ctx = ui.ctx().clone();
        let Some(viewer) = &mut self.viewer else {
            return;
        };

        let transform = viewer.panels.sample(0, now);
        let mut open_error = None;
        ui.add_space(transform.offset_y);
        ui.scope(|ui| {
            ui.set_opacity(transform.opacity);

            let width = ui.available_width();
            let height = (width * 0.75).min(640.0);
            let (rect, response) = ui.allocate_exact_size(egui::vec2(width, height), egui::Sense::click());
            ui.painter().rect_filled(rect, 8.0, egui::Color32::from_gray(20));

            let path = viewer.image.path.clone();
            match self.images.texture(&ctx, &path, ImageSize::Full) {
                Some(texture) => {
                    let fitted = fit_rect(texture.size_vec2(), rect.shrink(8.0));
                    let zoomed = egui::Rect::from_center_size(fitted.center(), fitted.size() * viewer.zoom.scale());
                    ui.painter().with_clip_rect(rect).image(
                        texture.id(),
                        zoomed,
                        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                        egui::Color32::WHITE,
                    );
                }
                None if self.images.failed(&path, ImageSize::Full) => {
                    ui.painter().text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        "⚠ Image could not be loaded",
                        egui::FontId::proportional(16.0),
                        egui::Color32::LIGHT_GRAY,
                    );
                }
                None => {
                    ui.put(rect, egui::Spinner::new());
                }
            }

            if response.hovered() {
                let (scroll, pinch) = ui.input(|i| (i.raw_scroll_delta.y, i.zoom_delta()));
                if pinch != 1.0 {
                    viewer.zoom.on_pinch(pinch);
                } else {
                    for direction in viewer.wheel.feed(scroll) {
                        viewer.zoom.on_wheel(direction);
                    }
                }
                // The wheel zooms the image instead of scrolling the page.
                ui.input_mut(|i| i.smooth_scroll_delta = egui::Vec2::ZERO);
            }

            let cursor = if viewer.zoom.is_at_rest() {
                egui::CursorIcon::ZoomIn
            } else {
                egui::CursorIcon::ZoomOut
            };
            if response.on_hover_cursor(cursor).clicked() {
                viewer.zoom.on_click();
            }

            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.label(format!("{:.0}%", viewer.zoom.scale() * 100.0));
                if ui.button("Reset zoom").clicked() {
                    viewer.zoom.reset();
                }
                if ui.button("Open file").clicked()
                    && let Err(err) = open::that(&viewer.image.path)
                {
                    log::warn!("Failed to open {}: {err}", viewer.image.path.display());
                    open_error = Some(format!("Failed to open {}: {err}", viewer.image.name));
                }
            });
        });

        if let Some(msg) = open_error {
            self.error_toast(msg);
        }
    }

    fn show_details_panel(&self, ui: &mut egui::Ui, now: f64) {
        let Some(viewer) = &self.viewer else {
            return;
        };
        let details = &viewer.image.details;

        let transform = viewer.panels.sample(1, now);
        ui.add_space(transform.offset_y);
        ui.scope(|ui| {
            ui.set_opacity(transform.opacity);

            egui::Frame::group(ui.style())
                .fill(colors::CARD_FILL)
                .stroke(egui::Stroke::new(1.0, colors::CARD_STROKE))
                .corner_radius(8.0)
                .inner_margin(16.0)
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());

                    ui.heading("Description");
                    match &details.description {
                        Some(description) => ui.label(description),
                        None => ui.weak("No description available."),
                    };

                    ui.add_space(16.0);
                    ui.heading("Tags");
                    if details.tags.is_empty() {
                        ui.weak("No tags.");
                    } else {
                        ui.horizontal_wrapped(|ui| {
                            for (index, tag) in details.tags.iter().enumerate() {
                                tag_chip(ui, tag, viewer.tags.sample(index, now).offset_y);
                            }
                        });
                    }

                    ui.add_space(16.0);
                    ui.heading("Color palette");
                    if details.color_palette.is_empty() {
                        ui.weak("No palette.");
                    } else {
                        ui.horizontal_wrapped(|ui| {
                            for hex in &details.color_palette {
                                color_swatch(ui, hex);
                            }
                        });
                    }

                    ui.add_space(16.0);
                    ui.heading("Detected objects");
                    if details.detected_objects.is_empty() {
                        ui.weak("Nothing detected.");
                    } else {
                        for object in &details.detected_objects {
                            ui.label(format!("• {object}"));
                        }
                    }
                });
        });
    }
}

fn first_line(text: &str) -> String {
    text.lines().next().unwrap_or_default().to_owned()
}

/// Pill-shaped tag drawn `offset_y` below its slot.
fn tag_chip(ui: &mut egui::Ui, tag: &str, offset_y: f32) {
    let galley = egui::WidgetText::from(egui::RichText::new(tag).size(13.0)).into_galley(
        ui,
        Some(egui::TextWrapMode::Extend),
        f32::INFINITY,
        egui::TextStyle::Body,
    );
    let padding = egui::vec2(10.0, 4.0);
    let (slot, _) = ui.allocate_exact_size(galley.size() + padding * 2.0, egui::Sense::hover());
    let rect = slot.translate(egui::vec2(0.0, offset_y));

    ui.painter().rect_filled(rect, rect.height() / 2.0, colors::TAG_FILL);
    ui.painter().galley(rect.min + padding, galley, colors::TAG_TEXT);
}

fn color_swatch(ui: &mut egui::Ui, hex: &str) {
    let Some([r, g, b]) = parse_hex_color(hex) else {
        ui.weak(hex);
        return;
    };

    ui.vertical(|ui| {
        let (rect, response) = ui.allocate_exact_size(egui::vec2(40.0, 40.0), egui::Sense::hover());
        ui.painter().rect_filled(rect, 6.0, egui::Color32::from_rgb(r, g, b));
        ui.painter().rect_stroke(
            rect,
            6.0,
            egui::Stroke::new(1.0, colors::CARD_STROKE),
            egui::StrokeKind::Inside,
        );
        response.on_hover_text(hex);
        ui.small(hex);
    });
}
