//! Photo grid page: a fixed grid of image tiles beside a column of copy.
//!
//! Slots are laid out once from the tile count; reveal transforms move and
//! fade the tile inside its slot.  A tile whose image failed to decode
//! keeps its frame and simply shows nothing.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, Borders, Widget},
};

use super::paint;
use super::stage::{clip, PX_PER_COL, PX_PER_ROW};
use super::theme::Theme;
use crate::app::asset_runtime::{AssetCache, AssetState};
use crate::config::GalleryConfig;
use crate::core::geometry::Transform;
use crate::core::item::{Item, Media};

const MIN_SLOT_ROWS: u16 = 3;
const FAINT: f64 = 0.02;

/// Grid slots for `count` tiles in `columns` columns, row-major.
pub fn grid_slots(area: Rect, count: usize, columns: u16) -> Vec<Rect> {
    let columns = columns.max(1);
    if count == 0 || area.width < columns || area.height == 0 {
        return Vec::new();
    }
    let rows = count.div_ceil(columns as usize) as u16;
    let slot_w = area.width / columns;
    let slot_h = (area.height / rows.max(1)).max(MIN_SLOT_ROWS);
    (0..count)
        .filter_map(|i| {
            let col = (i % columns as usize) as u16;
            let row = (i / columns as usize) as u16;
            let left = area.x as i32 + (col * slot_w) as i32;
            let top = area.y as i32 + row as i32 * slot_h as i32;
            clip(area, left, top, slot_w as i32, slot_h as i32)
        })
        .collect()
}

pub struct GalleryWidget<'a> {
    pub tiles: &'a [Item],
    /// One reveal transform per tile.
    pub transforms: &'a [Transform],
    /// Heading and body placements.
    pub copy: (Transform, Transform),
    pub assets: &'a AssetCache,
    pub config: &'a GalleryConfig,
}

impl<'a> GalleryWidget<'a> {
    /// Render and return the slot of every tile, in tile order.
    pub fn render_and_hit(self, area: Rect, buf: &mut Buffer) -> Vec<(usize, Rect)> {
        buf.set_style(area, Theme::backdrop_style());
        let grid_w = area.width * 3 / 5;
        let grid = Rect::new(area.x + 1, area.y + 1, grid_w.saturating_sub(2), area.height.saturating_sub(2));
        let copy = Rect::new(area.x + grid_w, area.y, area.width - grid_w, area.height);

        let slots = grid_slots(grid, self.tiles.len(), self.config.columns);
        for (i, slot) in slots.iter().enumerate() {
            let t = self.transforms.get(i).copied().unwrap_or_default();
            if let Some(tile) = self.tiles.get(i) {
                self.render_tile(tile, *slot, &t, buf);
            }
        }
        self.render_copy(copy, buf);
        slots.into_iter().enumerate().collect()
    }

    fn render_tile(&self, tile: &Item, slot: Rect, t: &Transform, buf: &mut Buffer) {
        if t.opacity < FAINT {
            return;
        }
        let w = (slot.width as f64 * t.scale).round() as i32;
        let h = (slot.height as f64 * t.scale).round() as i32;
        let left = slot.x as i32 + (slot.width as i32 - w) / 2;
        let top = slot.y as i32 + (slot.height as i32 - h) / 2 + (t.y / PX_PER_ROW).round() as i32;
        let Some(frame) = clip(slot, left, top, w, h) else {
            return;
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Theme::card_border_style(t.opacity, false))
            .style(Theme::card_style(t.opacity))
            .title(tile.title.as_str());
        let inner = block.inner(frame);
        block.render(frame, buf);

        let Media::Image(path) = &tile.media else {
            return;
        };
        match self.assets.get(path) {
            Some(AssetState::Ready(img)) => paint::render_image_halfblocks(img, inner, t.opacity, buf),
            Some(AssetState::Loading) => {
                let cx = inner.x as i32 + inner.width as i32 / 2;
                let cy = inner.y as i32 + inner.height as i32 / 2;
                paint::put_centered(buf, inner, cx, cy, "…", Theme::card_muted_style(t.opacity));
            }
            // Broken or never requested: the frame stays, the picture does not.
            Some(AssetState::Failed) | None => {}
        }
    }

    fn render_copy(&self, area: Rect, buf: &mut Buffer) {
        let (head, body) = self.copy;
        let width = area.width.saturating_sub(2) as i32;
        let x = area.x as i32 + 1;

        let hx = x + (head.x / PX_PER_COL).round() as i32;
        let mut y = area.y as i32 + 1;
        paint::put_str(buf, area, hx, y, &self.config.title, width, Theme::headline_style(head.opacity));
        y += 1;
        for line in paint::wrap(&self.config.tagline, width as usize, 2) {
            paint::put_str(buf, area, hx, y, &line, width, Theme::label_style(head.opacity));
            y += 1;
        }

        y += 1 + (body.y / PX_PER_ROW).round() as i32;
        let muted = Theme::caption_style(body.opacity);
        for line in paint::wrap(&self.config.text, width as usize, 4) {
            paint::put_str(buf, area, x, y, &line, width, muted);
            y += 1;
        }
        for h in &self.config.highlights {
            y += 1;
            paint::put_str(buf, area, x, y, &h.label, width, Theme::headline_style(body.opacity));
            y += 1;
            for line in paint::wrap(&h.text, width as usize, 2) {
                paint::put_str(buf, area, x, y, &line, width, muted);
                y += 1;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn tiles() -> Vec<Item> {
        vec![
            Item::new("ok", "Ok").media(Media::Image(PathBuf::from("ok.png"))),
            Item::new("broken", "Broken").media(Media::Image(PathBuf::from("broken.png"))),
        ]
    }

    fn has_image_cells(buf: &Buffer, rect: Rect) -> bool {
        rect.positions().any(|p| buf[(p.x, p.y)].symbol() == "▀")
    }

    fn render(assets: &AssetCache) -> (Buffer, Vec<(usize, Rect)>) {
        let tiles = tiles();
        let config = GalleryConfig::default();
        let transforms = vec![Transform::default(); tiles.len()];
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        let hits = GalleryWidget {
            tiles: &tiles,
            transforms: &transforms,
            copy: (Transform::default(), Transform::default()),
            assets,
            config: &config,
        }
        .render_and_hit(area, &mut buf);
        (buf, hits)
    }

    #[test]
    fn slots_fill_rows_left_to_right() {
        let slots = grid_slots(Rect::new(0, 0, 40, 20), 4, 2);
        assert_eq!(slots.len(), 4);
        assert_eq!(slots[0], Rect::new(0, 0, 20, 10));
        assert_eq!(slots[1], Rect::new(20, 0, 20, 10));
        assert_eq!(slots[3], Rect::new(20, 10, 20, 10));
        assert!(grid_slots(Rect::new(0, 0, 40, 20), 0, 2).is_empty());
    }

    #[test]
    fn broken_tile_is_hidden_in_place() {
        let mut loading = AssetCache::default();
        loading.finish(PathBuf::from("ok.png"), Ok(Arc::new(image::RgbaImage::new(8, 8))));
        let (_, before) = render(&loading);

        let mut assets = AssetCache::default();
        assets.finish(PathBuf::from("ok.png"), Ok(Arc::new(image::RgbaImage::new(8, 8))));
        assets.finish(
            PathBuf::from("broken.png"),
            Err(Error::Read {
                path: PathBuf::from("broken.png"),
                source: std::io::ErrorKind::NotFound.into(),
            }),
        );
        let (buf, hits) = render(&assets);

        // Same slots whatever the asset states.
        assert_eq!(hits, before);
        assert!(has_image_cells(&buf, hits[0].1));
        assert!(!has_image_cells(&buf, hits[1].1));
        // The broken tile's frame is still drawn.
        let slot = hits[1].1;
        assert_eq!(buf[(slot.x, slot.y)].symbol(), "┌");
    }

    #[test]
    fn hidden_tiles_paint_nothing() {
        let tiles = tiles();
        let config = GalleryConfig::default();
        let transforms = vec![
            Transform {
                opacity: 0.0,
                ..Transform::default()
            };
            2
        ];
        let area = Rect::new(0, 0, 100, 30);
        let mut buf = Buffer::empty(area);
        let hits = GalleryWidget {
            tiles: &tiles,
            transforms: &transforms,
            copy: (Transform::default(), Transform::default()),
            assets: &AssetCache::default(),
            config: &config,
        }
        .render_and_hit(area, &mut buf);
        assert_eq!(hits.len(), 2);
        assert_eq!(buf[(hits[0].1.x, hits[0].1.y)].symbol(), " ");
    }
}
