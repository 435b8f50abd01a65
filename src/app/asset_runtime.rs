//! Background media decoding to keep the UI thread responsive.
//!
//! Each path is decoded at most once.  A failed decode is remembered and the
//! card renders without media; there is no retry.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use super::event::{AppEvent, EventSender};
use crate::core::error::{Error, Result};

/// Decoded images are shrunk to fit this box; the renderer resizes further.
const THUMB_MAX_PX: u32 = 480;

#[derive(Debug, Clone)]
pub enum AssetState {
    Loading,
    Ready(Arc<image::RgbaImage>),
    Failed,
}

#[derive(Debug, Default)]
pub struct AssetCache {
    entries: HashMap<PathBuf, AssetState>,
}

impl AssetCache {
    pub fn get(&self, path: &Path) -> Option<&AssetState> {
        self.entries.get(path)
    }

    pub fn image(&self, path: &Path) -> Option<&Arc<image::RgbaImage>> {
        match self.entries.get(path) {
            Some(AssetState::Ready(img)) => Some(img),
            _ => None,
        }
    }

    pub fn is_failed(&self, path: &Path) -> bool {
        matches!(self.entries.get(path), Some(AssetState::Failed))
    }

    /// Start decoding `path` unless it is already known.
    pub fn request(&mut self, path: &Path, tx: &EventSender) {
        if self.entries.contains_key(path) {
            return;
        }
        self.entries.insert(path.to_path_buf(), AssetState::Loading);
        spawn_decode(tx.clone(), path.to_path_buf());
    }

    pub fn finish(&mut self, path: PathBuf, result: Result<Arc<image::RgbaImage>>) {
        let state = match result {
            Ok(img) => AssetState::Ready(img),
            Err(e) => {
                tracing::warn!("{e}");
                AssetState::Failed
            }
        };
        self.entries.insert(path, state);
    }
}

pub fn decode_thumbnail(path: &Path) -> Result<image::RgbaImage> {
    let img = image::open(path).map_err(|source| Error::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.thumbnail(THUMB_MAX_PX, THUMB_MAX_PX).to_rgba8())
}

pub fn spawn_decode(tx: EventSender, path: PathBuf) {
    tokio::task::spawn_blocking(move || {
        let t0 = std::time::Instant::now();
        let result = decode_thumbnail(&path).map(Arc::new);
        tracing::debug!("decode {}: {:.2?}", path.display(), t0.elapsed());
        let _ = tx.send(AppEvent::AssetLoaded { path, result });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_and_shrinks_images() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.png");
        image::RgbaImage::new(960, 120).save(&path).unwrap();

        let thumb = decode_thumbnail(&path).unwrap();
        assert_eq!(thumb.width(), THUMB_MAX_PX);
        assert!(thumb.height() <= 60);
    }

    #[test]
    fn failed_decode_is_remembered() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"definitely not a png").unwrap();

        let result = decode_thumbnail(&path).map(Arc::new);
        assert!(matches!(result, Err(Error::Decode { .. })));

        let mut cache = AssetCache::default();
        cache.finish(path.clone(), result);
        assert!(cache.is_failed(&path));
        assert!(cache.image(&path).is_none());
    }

    #[test]
    fn ready_images_are_served() {
        let mut cache = AssetCache::default();
        let path = PathBuf::from("cover.png");
        cache.finish(path.clone(), Ok(Arc::new(image::RgbaImage::new(2, 2))));
        assert!(cache.image(&path).is_some());
        assert!(!cache.is_failed(&path));
    }
}
