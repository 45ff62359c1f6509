#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod assets;
mod colors;
mod constants;
mod gallery_grid;
mod home;
mod textures;
mod ui;
mod uploader;
mod viewer;
mod watcher;

use assets::load_features;
use clap::{Parser, ValueEnum};
use constants::RELOAD_DEBOUNCE;
use eframe::egui;
use egui_toast::{Toast, ToastKind, ToastOptions, Toasts};
use photo_gallery::config::Settings;
use photo_gallery::gallery::load_gallery;
use photo_gallery::lightbox::Lightbox;
use photo_gallery::navbar::Navbar;
use photo_gallery::reveal::{Entrance, Reveal};
use photo_gallery::upload::{ProgressMode, UploadClient, UploadController};
use photo_gallery::{FeatureCards, GalleryImage};
use std::path::PathBuf;
use std::time::Duration;
use textures::ImageCache;
use thiserror::Error;
use ui::SettingsDraft;
use viewer::ViewerState;
use watcher::GalleryWatcher;

#[derive(Parser, Debug)]
#[command(name = "photo-gallery", version, about = "Browse the photo gallery and upload new images")]
struct Args {
    /// Base URL of the gallery server
    #[arg(long, env = "GALLERY_SERVER_URL")]
    server: Option<String>,
    /// Directory the gallery images are read from
    #[arg(long, env = "GALLERY_DIR")]
    gallery_dir: Option<PathBuf>,
    /// What drives the upload progress bars
    #[arg(long, env = "GALLERY_PROGRESS", value_enum)]
    progress: Option<ProgressArg>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ProgressArg {
    Simulated,
    Transfer,
}

impl From<ProgressArg> for ProgressMode {
    fn from(arg: ProgressArg) -> Self {
        match arg {
            ProgressArg::Simulated => Self::Simulated,
            ProgressArg::Transfer => Self::Transfer,
        }
    }
}

impl Args {
    /// Command-line values win over persisted settings.
    fn apply_to(&self, settings: &mut Settings) {
        if let Some(server) = &self.server {
            settings.server_url = server.clone();
        }
        if let Some(dir) = &self.gallery_dir {
            settings.gallery_dir = dir.clone();
        }
        if let Some(progress) = self.progress {
            settings.progress_mode = progress.into();
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Home,
    Gallery,
    Viewer,
    Uploader,
}

/// Main application state for the photo gallery client.
pub struct PhotoGalleryApp {
    settings: Settings,
    settings_draft: Option<SettingsDraft>,
    page: Page,
    scroll_to_top: bool,
    navbar: Navbar,
    features: FeatureCards,
    feature_reveal: Reveal,
    gallery: Vec<GalleryImage>,
    gallery_reveal: Reveal,
    lightbox: Lightbox,
    viewer: Option<ViewerState>,
    upload_reveal: Reveal,
    uploads: UploadController,
    images: ImageCache,
    toasts: Toasts,
    watcher: Option<GalleryWatcher>,
}

impl PhotoGalleryApp {
    fn new(cc: &eframe::CreationContext<'_>, args: &Args, runtime: tokio::runtime::Handle) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::light());

        let mut settings: Settings = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        args.apply_to(&mut settings);
        log::info!(
            "Server {}, gallery {}, {} progress",
            settings.server_url,
            settings.gallery_dir.display(),
            settings.progress_mode.label()
        );

        let toasts = Toasts::new()
            .anchor(egui::Align2::RIGHT_TOP, (-10.0, 64.0))
            .direction(egui::Direction::TopDown);

        let ctx = cc.egui_ctx.clone();
        let uploads = UploadController::new(
            UploadClient::new(settings.upload_endpoint()),
            runtime,
            settings.progress_mode,
        )
        .with_wakeup(move || ctx.request_repaint());

        let now = cc.egui_ctx.input(|i| i.time);
        let watcher = GalleryWatcher::new(&settings.gallery_dir, cc.egui_ctx.clone());
        if watcher.is_none() {
            log::info!("Gallery watcher not available - new uploads appear after a restart");
        }

        let mut app = Self {
            settings,
            settings_draft: None,
            page: Page::Home,
            scroll_to_top: false,
            navbar: Navbar::default(),
            features: Vec::new(),
            feature_reveal: Reveal::scroll_triggered(Entrance::FEATURE_CARDS),
            gallery: Vec::new(),
            gallery_reveal: Reveal::scroll_triggered(Entrance::GALLERY_ITEMS),
            lightbox: Lightbox::default(),
            viewer: None,
            upload_reveal: Reveal::on_load(Entrance::UPLOAD_ZONE, now),
            uploads,
            images: ImageCache::default(),
            toasts,
            watcher,
        };

        match load_features() {
            Ok(features) => app.features = features,
            Err(err) => app.error_toast(err.to_string()),
        }
        app.reload_gallery();
        app
    }

    pub fn error_toast(&mut self, text: String) {
        self.toasts.add(Toast {
            kind: ToastKind::Error,
            text: text.into(),
            options: ToastOptions::default()
                .duration_in_seconds(8.0)
                .show_icon(true),
            ..Default::default()
        });
    }

    /// Switches pages, restarting the entrance animations of the page shown.
    pub fn navigate(&mut self, page: Page, now: f64) {
        if page == self.page {
            return;
        }
        log::debug!("Navigating {:?} -> {page:?}", self.page);

        self.page = page;
        self.scroll_to_top = true;
        self.navbar.on_scroll(0.0);
        self.lightbox = Lightbox::default();

        match page {
            Page::Home => self.feature_reveal = Reveal::scroll_triggered(Entrance::FEATURE_CARDS),
            Page::Gallery => self.gallery_reveal = Reveal::scroll_triggered(Entrance::GALLERY_ITEMS),
            Page::Uploader => self.upload_reveal = Reveal::on_load(Entrance::UPLOAD_ZONE, now),
            Page::Viewer => {}
        }
    }

    pub fn open_viewer(&mut self, image: GalleryImage, now: f64) {
        log::debug!("Viewing {}", image.path.display());
        self.viewer = Some(ViewerState::new(image, now));
        self.navigate(Page::Viewer, now);
    }

    fn reload_gallery(&mut self) {
        let dir = &self.settings.gallery_dir;
        if !dir.exists() {
            log::info!("Gallery directory {} does not exist yet", dir.display());
            self.gallery.clear();
            return;
        }

        match load_gallery(dir) {
            Ok(images) => self.gallery = images,
            Err(err) => {
                log::warn!("{err}");
                self.gallery.clear();
                self.error_toast(err.to_string());
            }
        }
    }

    pub fn apply_settings(&mut self, ctx: &egui::Context, settings: Settings) {
        if settings == self.settings {
            return;
        }

        if settings.server_url != self.settings.server_url {
            log::info!("Uploading to {} from now on", settings.upload_endpoint());
            self.uploads
                .set_client(UploadClient::new(settings.upload_endpoint()));
        }
        if settings.progress_mode != self.settings.progress_mode {
            self.uploads.set_mode(settings.progress_mode);
        }

        let dir_changed = settings.gallery_dir != self.settings.gallery_dir;
        self.settings = settings;

        if dir_changed {
            self.images.clear();
            self.viewer = None;
            self.lightbox = Lightbox::default();
            self.watcher = GalleryWatcher::new(&self.settings.gallery_dir, ctx.clone());
            self.reload_gallery();
            self.gallery_reveal = Reveal::scroll_triggered(Entrance::GALLERY_ITEMS);
        }
    }

    /// Reloads the gallery once the watched directory has settled.
    fn poll_gallery_watcher(&mut self, now: f64) {
        let Some(changed) = self.watcher.as_mut().and_then(|watcher| watcher.poll(now)) else {
            return;
        };

        log::info!("{} gallery file(s) changed, reloading", changed.len());
        for path in &changed {
            self.images.forget(path);
        }
        self.reload_gallery();
    }

    fn poll_images(&mut self, ctx: &egui::Context, now: f64) {
        for err in self.images.poll(ctx, now) {
            self.error_toast(err);
        }
    }

    /// Renders the current page inside a scroll area and feeds its offset to the navbar.
    fn show_central_panel(&mut self, ctx: &egui::Context, now: f64) -> egui::Rect {
        egui::CentralPanel::default()
            .frame(egui::Frame::NONE.fill(ctx.style().visuals.panel_fill))
            .show(ctx, |ui| {
                let mut scroll_area = egui::ScrollArea::vertical()
                    .id_salt(self.page)
                    .auto_shrink(false);
                if std::mem::take(&mut self.scroll_to_top) {
                    scroll_area = scroll_area.vertical_scroll_offset(0.0);
                }

                let output = scroll_area.show(ui, |ui| match self.page {
                    Page::Home => self.show_home(ui, now),
                    Page::Gallery => self.show_gallery(ui, now),
                    Page::Viewer => self.show_viewer(ui, now),
                    Page::Uploader => self.show_uploader(ui, now),
                });
                self.navbar.on_scroll(output.state.offset.y);

                ui.max_rect()
            })
            .inner
    }

    /// Keeps frames coming while something moves on its own.
    fn request_animation_frames(&self, ctx: &egui::Context, now: f64) {
        let page_animating = match self.page {
            Page::Home => self.feature_reveal.is_animating(self.features.len(), now),
            Page::Gallery => self.gallery_reveal.is_animating(self.gallery.len(), now),
            Page::Viewer => self
                .viewer
                .as_ref()
                .is_some_and(|viewer| viewer.is_animating(now)),
            Page::Uploader => self.upload_reveal.is_animating(1, now),
        };

        if page_animating || self.lightbox.is_animating() || self.uploads.board().is_animating() {
            ctx.request_repaint();
        }
        if self.watcher.as_ref().is_some_and(GalleryWatcher::has_pending) {
            ctx.request_repaint_after(Duration::from_secs_f64(RELOAD_DEBOUNCE));
        }
    }
}

impl eframe::App for PhotoGalleryApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = ctx.input(|i| i.time);

        self.poll_images(ctx, now);
        self.poll_gallery_watcher(now);
        self.uploads.poll(now);
        self.lightbox.tick(now);
        self.handle_dropped_files(ctx, now);
        self.handle_keyboard_input(ctx, now);

        self.show_status_bar(ctx);
        let panel_rect = self.show_central_panel(ctx, now);
        self.show_navbar(ctx, panel_rect, now);
        self.show_lightbox(ctx, now);
        self.show_upload_alert(ctx);
        self.show_settings_window(ctx);

        self.images.evict_idle(now);
        self.request_animation_frames(ctx, now);
        self.toasts.show(ctx);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, &self.settings);
    }
}

#[derive(Error, Debug)]
enum AppError {
    #[error("failed to start the upload runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error(transparent)]
    Ui(#[from] eframe::Error),
}

fn main() -> Result<(), AppError> {
    env_logger::init();
    let args = Args::parse();

    // Uploads run here; the UI thread only polls their events.
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("upload")
        .build()?;
    let handle = runtime.handle().clone();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([640.0, 480.0])
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Photo Gallery",
        options,
        Box::new(move |cc| Ok(Box::new(PhotoGalleryApp::new(cc, &args, handle)))),
    )?;

    runtime.shutdown_timeout(Duration::from_secs(1));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_line_overrides_persisted_settings() {
        let args = Args::try_parse_from([
            "photo-gallery",
            "--server",
            "http://gallery:9000",
            "--progress",
            "simulated",
        ])
        .unwrap();

        let mut settings = Settings {
            progress_mode: ProgressMode::Transfer,
            ..Settings::default()
        };
        args.apply_to(&mut settings);

        assert_eq!(settings.server_url, "http://gallery:9000");
        assert_eq!(settings.progress_mode, ProgressMode::Simulated);
        assert_eq!(settings.upload_endpoint(), "http://gallery:9000/upload");
    }

    #[test]
    fn missing_arguments_keep_persisted_settings() {
        let args = Args {
            server: None,
            gallery_dir: None,
            progress: None,
        };
        let persisted = Settings {
            server_url: "http://saved:8000".to_owned(),
            gallery_dir: PathBuf::from("/photos"),
            progress_mode: ProgressMode::Simulated,
        };

        let mut settings = persisted.clone();
        args.apply_to(&mut settings);
        assert_eq!(settings, persisted);
    }
}
