//! Watches the gallery directory so images stored by the server show up without a restart.

use crate::constants::RELOAD_DEBOUNCE;
use eframe::egui;
use notify::event::ModifyKind;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use photo_gallery::gallery::{MANIFEST_FILE, is_supported_image};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};

pub struct GalleryWatcher {
    change_rx: Receiver<PathBuf>,
    /// The watcher must be kept alive for events to fire
    _watcher: RecommendedWatcher,
    debounce: ChangeDebounce,
}

impl GalleryWatcher {
    /// Starts watching `dir`.
    ///
    /// Returns `None` if the directory doesn't exist or watching fails.
    pub fn new(dir: &Path, ctx: egui::Context) -> Option<Self> {
        if !dir.is_dir() {
            log::warn!("Gallery directory does not exist: {}", dir.display());
            return None;
        }

        let (change_tx, change_rx) = mpsc::channel();

        let mut watcher = notify::recommended_watcher(move |res: Result<Event, notify::Error>| {
            let event = match res {
                Ok(event) => event,
                Err(err) => {
                    log::warn!("Gallery watcher error: {err}");
                    return;
                }
            };

            if !is_content_change(&event.kind) {
                return;
            }

            for path in event.paths {
                if is_gallery_file(&path) {
                    log::debug!("Gallery change: {:?} {}", event.kind, path.display());
                    let _ = change_tx.send(path);
                    ctx.request_repaint();
                }
            }
        })
        .map_err(|err| log::warn!("Failed to create gallery watcher: {err}"))
        .ok()?;

        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(|err| log::warn!("Failed to watch {}: {err}", dir.display()))
            .ok()?;

        log::info!("Watching gallery directory: {}", dir.display());

        Some(Self {
            change_rx,
            _watcher: watcher,
            debounce: ChangeDebounce::default(),
        })
    }

    /// Collects changes; returns them once the directory has been quiet for `RELOAD_DEBOUNCE`.
    pub fn poll(&mut self, now: f64) -> Option<Vec<PathBuf>> {
        loop {
            match self.change_rx.try_recv() {
                Ok(path) => self.debounce.record(path, now),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::warn!("Gallery watcher channel disconnected");
                    break;
                }
            }
        }

        self.debounce.take_settled(now)
    }

    /// Whether changes are waiting out the debounce, so the UI should poll again soon.
    pub fn has_pending(&self) -> bool {
        self.debounce.has_pending()
    }
}

/// Paths changed since the last reload, held until the directory goes quiet.
#[derive(Debug, Default)]
struct ChangeDebounce {
    pending: HashSet<PathBuf>,
    last_change: f64,
}

impl ChangeDebounce {
    fn record(&mut self, path: PathBuf, now: f64) {
        self.pending.insert(path);
        self.last_change = now;
    }

    /// Hands out the changed paths once nothing has changed for `RELOAD_DEBOUNCE`.
    fn take_settled(&mut self, now: f64) -> Option<Vec<PathBuf>> {
        if self.pending.is_empty() || now - self.last_change < RELOAD_DEBOUNCE {
            return None;
        }
        Some(self.pending.drain().collect())
    }

    fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }
}

/// Creations, removals, renames and writes. Metadata and access events are noise.
fn is_content_change(kind: &EventKind) -> bool {
    match kind {
        EventKind::Create(_) | EventKind::Remove(_) => true,
        EventKind::Modify(ModifyKind::Metadata(_)) => false,
        EventKind::Modify(_) => true,
        _ => false,
    }
}

fn is_gallery_file(path: &Path) -> bool {
    is_supported_image(path) || path.file_name().is_some_and(|name| name == MANIFEST_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, DataChange, MetadataKind};

    #[test]
    fn only_content_changes_count() {
        assert!(is_content_change(&EventKind::Create(CreateKind::File)));
        assert!(is_content_change(&EventKind::Modify(ModifyKind::Data(
            DataChange::Content
        ))));
        assert!(!is_content_change(&EventKind::Modify(ModifyKind::Metadata(
            MetadataKind::WriteTime
        ))));
        assert!(!is_content_change(&EventKind::Access(AccessKind::Any)));
    }

    #[test]
    fn changes_wait_until_the_directory_is_quiet() {
        let mut debounce = ChangeDebounce::default();
        assert_eq!(debounce.take_settled(10.0), None);

        debounce.record(PathBuf::from("/g/a.jpg"), 1.0);
        debounce.record(PathBuf::from("/g/b.png"), 1.3);
        debounce.record(PathBuf::from("/g/a.jpg"), 1.6);
        assert!(debounce.has_pending());

        // Quiet for less than the debounce since the last write.
        assert_eq!(debounce.take_settled(1.6 + RELOAD_DEBOUNCE / 2.0), None);

        let mut changed = debounce
            .take_settled(1.6 + RELOAD_DEBOUNCE + 0.01)
            .unwrap_or_default();
        changed.sort();
        assert_eq!(changed, vec![PathBuf::from("/g/a.jpg"), PathBuf::from("/g/b.png")]);

        assert!(!debounce.has_pending());
        assert_eq!(debounce.take_settled(100.0), None);
    }

    #[test]
    fn watches_images_and_manifest() {
        assert!(is_gallery_file(Path::new("/g/cat.jpeg")));
        assert!(is_gallery_file(Path::new("/g/gallery.ron")));
        assert!(!is_gallery_file(Path::new("/g/.cat.jpeg.part")));
    }
}
