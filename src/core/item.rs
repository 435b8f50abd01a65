//! Item payload contract: what a card or tile displays.
//!
//! An item never stores its own position: every transform is derived from
//! its ordinal and the controller state by the geometry engine.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use walkdir::WalkDir;

use super::error::{Error, Result};

/// Stable identity of an item (survives reordering and reloading).
pub type ItemId = String;

/// What an item renders as its visual.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "src", rename_all = "lowercase")]
pub enum Media {
    #[default]
    None,
    Image(PathBuf),
    Video(PathBuf),
    /// Key handed to a custom card renderer.
    Custom(String),
}

impl Media {
    /// Path of a decodable still image, if any.
    pub fn image_path(&self) -> Option<&Path> {
        match self {
            Media::Image(p) => Some(p),
            _ => None,
        }
    }

    /// Short label for the UI.
    pub fn label(&self) -> &'static str {
        match self {
            Media::None => "none",
            Media::Image(_) => "image",
            Media::Video(_) => "video",
            Media::Custom(_) => "custom",
        }
    }
}

/// One entry in a card stack or tools showcase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub media: Media,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cta_label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl Item {
    pub fn new(id: impl Into<ItemId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            media: Media::None,
            href: None,
            cta_label: None,
            tag: None,
        }
    }

    pub fn description(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn media(mut self, media: Media) -> Self {
        self.media = media;
        self
    }

    pub fn href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    /// Label for the call-to-action, falling back to `VIEW`.
    pub fn cta(&self) -> &str {
        self.cta_label.as_deref().unwrap_or("VIEW")
    }
}

// ───────────────────────────────────────── loading ───────────

/// Build an item collection from the images and videos directly inside
/// `dir`, sorted by file name.  Files that are neither are skipped.
pub fn load_media_dir(dir: &Path) -> Result<Vec<Item>> {
    let mut items = Vec::new();

    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Some(media) = classify(path) else {
            tracing::debug!("skipping non-media file {}", path.display());
            continue;
        };

        let title = path
            .file_stem()
            .map(|s| s.to_string_lossy().replace(['_', '-'], " "))
            .unwrap_or_default();
        let id = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| items.len().to_string());

        let mut item = Item::new(id, title).media(media);
        item.tag = path.extension().map(|e| e.to_string_lossy().to_uppercase());
        items.push(item);
    }

    Ok(items)
}

/// Sniff the file content to decide between image and video.
fn classify(path: &Path) -> Option<Media> {
    let mime = tree_magic_mini::from_filepath(path)?;
    if mime.starts_with("image/") {
        Some(Media::Image(path.to_path_buf()))
    } else if mime.starts_with("video/") {
        Some(Media::Video(path.to_path_buf()))
    } else {
        None
    }
}

/// Read a standalone item list (`[[items]]` tables) from a TOML file.
pub fn load_items_file(path: &Path) -> Result<Vec<Item>> {
    #[derive(Deserialize)]
    struct ItemsFile {
        #[serde(default)]
        items: Vec<Item>,
    }

    let text = std::fs::read_to_string(path).map_err(|source| Error::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ItemsFile = toml::from_str(&text).map_err(|source| Error::ConfigParse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parsed.items)
}

// ───────────────────────────────────────── built-ins ─────────

/// Cards shown when no collection is configured.
pub fn demo_items() -> Vec<Item> {
    vec![
        Item::new("market-analysis", "Market Analysis")
            .description("Detailed breakdown of weekly market trends and forecasts.")
            .tag("Finance")
            .href("#stack"),
        Item::new("trade-policy", "Trade Policy")
            .description("Visualising the impact of new trade policies on global markets.")
            .tag("Economy")
            .href("#tools"),
        Item::new("pharma-growth", "Pharma Growth")
            .description("Revenue share analysis of pharma companies abroad.")
            .tag("Healthcare"),
        Item::new("broker-rankings", "Broker Rankings")
            .description("Comparing top stock brokers by active user base.")
            .tag("Brokers"),
        Item::new("crypto-trends", "Crypto Trends")
            .description("Analysing recent movements in Bitcoin and Ethereum.")
            .tag("Crypto")
            .href("#contact"),
    ]
}

/// Tiles for the tools showcase: (short glyph, full name).
pub fn demo_tools() -> Vec<Item> {
    [
        ("Ps", "Photoshop"),
        ("Pr", "Premiere Pro"),
        ("Ae", "After Effects"),
        ("Ai", "Illustrator"),
        ("Lr", "Lightroom"),
        ("Cc", "CapCut"),
        ("Xd", "Experience Design"),
        ("Sq", "Square"),
    ]
    .into_iter()
    .map(|(glyph, name)| Item::new(glyph, name).media(Media::Custom(glyph.to_string())))
    .collect()
}

/// Photo grid tiles.  The images are looked up relative to the working
/// directory; tiles whose file is missing stay empty.
pub fn demo_gallery() -> Vec<Item> {
    [
        ("photo-1", "Still Life", "media/photo1.webp"),
        ("photo-2", "Product", "media/photo2.jpeg"),
        ("photo-3", "Cafe", "media/photo3.webp"),
        ("photo-4", "Portrait", "media/photo4.jpg"),
    ]
    .into_iter()
    .map(|(id, title, path)| Item::new(id, title).media(Media::Image(PathBuf::from(path))))
    .collect()
}
