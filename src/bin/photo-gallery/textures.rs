//! Texture cache for gallery images, filled by background decode threads.

use crate::assets::{AssetLoadState, ImageSize, load_and_decode_image};
use crate::constants::TEXTURE_IDLE_EVICT;
use eframe::egui::{self, ColorImage, TextureHandle, TextureOptions};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::thread;

type CacheKey = (ImageSize, PathBuf);

struct CachedTexture {
    handle: TextureHandle,
    /// Frame time the texture was last asked for.
    last_used: f64,
}

#[derive(Default)]
pub struct ImageCache {
    asset_cache: HashMap<CacheKey, AssetLoadState>,
    texture_cache: HashMap<CacheKey, CachedTexture>,
    frame_time: f64,
}

impl ImageCache {
    /// Returns the texture for `path`, starting a background decode the first time it's asked for.
    pub fn texture(&mut self, ctx: &egui::Context, path: &Path, size: ImageSize) -> Option<TextureHandle> {
        let key = (size, path.to_path_buf());
        if let Some(texture) = self.texture_cache.get_mut(&key) {
            texture.last_used = self.frame_time;
            return Some(texture.handle.clone());
        }

        if !self.asset_cache.contains_key(&key) {
            let (tx, rx) = mpsc::channel();
            let ctx = ctx.clone();
            let image_path = key.1.clone();

            thread::spawn(move || {
                let result = load_and_decode_image(&image_path, size);
                let _ = tx.send(result);
                ctx.request_repaint();
            });

            self.asset_cache.insert(key, AssetLoadState::Loading(rx));
        }
        None
    }

    pub fn failed(&self, path: &Path, size: ImageSize) -> bool {
        matches!(
            self.asset_cache.get(&(size, path.to_path_buf())),
            Some(AssetLoadState::Error(_))
        )
    }

    /// Collects finished decodes and uploads them as textures. Returns the errors to report.
    pub fn poll(&mut self, ctx: &egui::Context, now: f64) -> Vec<String> {
        self.frame_time = now;
        let mut updates: Vec<(CacheKey, AssetLoadState)> = Vec::new();

        for (key, state) in &self.asset_cache {
            if let AssetLoadState::Loading(rx) = state {
                match rx.try_recv() {
                    Ok(Ok(decoded)) => updates.push((key.clone(), AssetLoadState::Ready(decoded))),
                    Ok(Err(err)) => updates.push((key.clone(), AssetLoadState::Error(err.to_string()))),
                    Err(mpsc::TryRecvError::Disconnected) => {
                        let msg = format!("{}: decoder thread stopped", key.1.display());
                        updates.push((key.clone(), AssetLoadState::Error(msg)));
                    }
                    Err(mpsc::TryRecvError::Empty) => {}
                }
            }
        }

        let mut errors = Vec::new();
        for (key, state) in updates {
            match state {
                AssetLoadState::Ready(decoded) => {
                    let image = ColorImage::from_rgba_unmultiplied(
                        [decoded.width as usize, decoded.height as usize],
                        &decoded.pixels,
                    );
                    let name = format!("{:?}:{}", key.0, key.1.display());
                    let texture = ctx.load_texture(name, image, TextureOptions::LINEAR);
                    // The texture now owns the pixels; its presence marks the image as loaded.
                    self.asset_cache.remove(&key);
                    self.texture_cache.insert(
                        key,
                        CachedTexture {
                            handle: texture,
                            last_used: now,
                        },
                    );
                }
                AssetLoadState::Error(msg) => {
                    log::warn!("{msg}");
                    errors.push(msg.clone());
                    self.asset_cache.insert(key, AssetLoadState::Error(msg));
                }
                AssetLoadState::Loading(_) => {}
            }
        }

        errors
    }

    /// Drops every rendition of `path` so the next request decodes the file again.
    pub fn forget(&mut self, path: &Path) {
        for size in [ImageSize::Thumbnail, ImageSize::Full] {
            let key = (size, path.to_path_buf());
            self.asset_cache.remove(&key);
            self.texture_cache.remove(&key);
        }
    }

    /// Drops textures nothing has drawn for `TEXTURE_IDLE_EVICT`. Call after the frame is laid out.
    pub fn evict_idle(&mut self, now: f64) {
        let idle = idle_keys(
            self.texture_cache
                .iter()
                .map(|(key, texture)| (key, texture.last_used)),
            now,
        );
        if idle.is_empty() {
            return;
        }

        log::debug!("Evicting {} idle texture(s)", idle.len());
        for key in idle {
            self.texture_cache.remove(&key);
        }
    }

    pub fn clear(&mut self) {
        self.asset_cache.clear();
        self.texture_cache.clear();
    }
}

fn idle_keys<'a, K: Clone + 'a>(entries: impl Iterator<Item = (&'a K, f64)>, now: f64) -> Vec<K> {
    entries
        .filter(|(_, last_used)| now - last_used > TEXTURE_IDLE_EVICT)
        .map(|(key, _)| key.clone())
        .collect()
}
