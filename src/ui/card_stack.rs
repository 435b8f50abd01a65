//! Card-stack stage: the fan of cards around the active one.

use ratatui::{buffer::Buffer, layout::Rect, style::Style};

use super::paint::{self, ShearedBox};
use super::stage::StageMap;
use super::theme::Theme;
use crate::app::asset_runtime::AssetCache;
use crate::app::section::CardFrame;
use crate::core::item::{Item, Media};

/// Draws the visual of an item with [`Media::Custom`] into `area`.
pub type CustomRenderer = fn(key: &str, area: Rect, style: Style, buf: &mut Buffer);

/// Default renderer for custom media: the key, centred and bold.
pub fn render_custom_key(key: &str, area: Rect, style: Style, buf: &mut Buffer) {
    let cy = area.y as i32 + area.height as i32 / 2;
    let cx = area.x as i32 + area.width as i32 / 2;
    paint::put_centered(buf, area, cx, cy, key, style.add_modifier(ratatui::style::Modifier::BOLD));
}

pub struct CardStackWidget<'a> {
    pub items: &'a [Item],
    /// Back to front.
    pub frames: &'a [CardFrame],
    pub map: StageMap,
    pub card_width: f64,
    pub card_height: f64,
    pub assets: &'a AssetCache,
    pub custom: CustomRenderer,
}

impl<'a> CardStackWidget<'a> {
    /// Render and return `(item index, rect)` hit zones, back to front.
    pub fn render_and_hit(self, buf: &mut Buffer) -> Vec<(usize, Rect)> {
        let clip = self.map.area;
        let aspect = self.map.px_per_row / self.map.px_per_col;
        let mut hits = Vec::with_capacity(self.frames.len());

        for frame in self.frames {
            let Some(item) = self.items.get(frame.index) else {
                continue;
            };
            let t = frame.transform;
            let (cols, rows) = self
                .map
                .cells(self.card_width * t.scale, self.card_height * t.scale);
            let (cx, cy) = self.map.to_cell(t.x, t.y);
            let shape = ShearedBox::new(cx, cy, cols, rows, t.rotation, aspect);

            shape.paint(
                buf,
                clip,
                Theme::card_style(t.opacity),
                Theme::card_border_style(t.opacity, frame.is_active()),
            );
            self.render_content(item, frame, &shape, buf);

            if let Some(rect) = shape.bounds(clip) {
                hits.push((frame.index, rect));
            }
        }
        hits
    }

    fn render_content(&self, item: &Item, frame: &CardFrame, shape: &ShearedBox, buf: &mut Buffer) {
        let clip = self.map.area;
        let o = frame.transform.opacity;
        let inner_rows = shape.inner_rows();
        let width = shape.inner_cols();
        if inner_rows < 2 || width < 4 {
            return;
        }

        // Media panel on the upper part of tall cards.
        let mut row = 0;
        let media_rows = if inner_rows >= 10 && item.media != Media::None {
            inner_rows * 2 / 5
        } else {
            0
        };
        if media_rows > 0 {
            let area = paint_area(shape, media_rows, clip);
            match &item.media {
                Media::Image(path) => {
                    if let (Some(img), Some(area)) = (self.assets.image(path), area) {
                        if shape.is_upright() {
                            paint::render_image_halfblocks(img, area, o, buf);
                        }
                    } else if !self.assets.is_failed(path) {
                        shape.text_centered(buf, clip, media_rows / 2, "· · ·", Theme::card_muted_style(o));
                    }
                }
                Media::Video(path) => {
                    let name = path
                        .file_name()
                        .map(|n| n.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    shape.text_centered(buf, clip, media_rows / 2 - 1, "▶", Theme::tag_style(o));
                    shape.text_centered(buf, clip, media_rows / 2, &name, Theme::card_muted_style(o));
                }
                Media::Custom(key) => {
                    if let Some(area) = area {
                        (self.custom)(key, area, Theme::card_style(o), buf);
                    }
                }
                Media::None => {}
            }
            row = media_rows;
        }

        if let Some(tag) = &item.tag {
            shape.text(buf, clip, row, &tag.to_uppercase(), Theme::tag_style(o));
            row += 1;
        }
        for line in paint::wrap(&item.title, width as usize, 2) {
            shape.text(buf, clip, row, &line, Theme::card_title_style(o));
            row += 1;
        }

        // Keep the last inner row for the call to action.
        let cta_row = inner_rows - 1;
        if let Some(desc) = &item.description {
            row += 1;
            let room = (cta_row - row - 1).max(0) as usize;
            for line in paint::wrap(desc, width as usize, room) {
                shape.text(buf, clip, row, &line, Theme::card_muted_style(o));
                row += 1;
            }
        }
        if item.href.is_some() && cta_row > row {
            shape.text(buf, clip, cta_row, &format!("{} ↗", item.cta()), Theme::cta_style(o));
        }
    }
}

/// Rect of the first `rows` inner rows of an upright box, clipped.
fn paint_area(shape: &ShearedBox, rows: i32, clip: Rect) -> Option<Rect> {
    super::stage::clip(clip, shape.row_x(1) + 2, shape.top + 1, shape.inner_cols(), rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::Transform;

    fn frame(index: usize, offset: i64, x: f64) -> CardFrame {
        CardFrame {
            index,
            offset,
            z_index: 100 - offset.abs() as i32,
            transform: Transform {
                x,
                ..Transform::default()
            },
        }
    }

    #[test]
    fn draws_cards_and_reports_hits_in_paint_order() {
        let area = Rect::new(0, 0, 120, 40);
        let mut buf = Buffer::empty(area);
        let items = vec![
            Item::new("a", "Alpha").tag("One").href("https://example.org"),
            Item::new("b", "Beta").description("Second card"),
        ];
        let frames = vec![frame(1, 1, 160.0), frame(0, 0, 0.0)];
        let assets = AssetCache::default();
        let widget = CardStackWidget {
            items: &items,
            frames: &frames,
            map: StageMap::new(area),
            card_width: 320.0,
            card_height: 420.0,
            assets: &assets,
            custom: render_custom_key,
        };
        let hits = widget.render_and_hit(&mut buf);
        assert_eq!(hits.iter().map(|h| h.0).collect::<Vec<_>>(), vec![1, 0]);

        // Active card: 40 × 26 cells centred on (60, 20).
        let (_, active) = hits[1];
        assert_eq!(active, Rect::new(40, 7, 40, 26));
        assert_eq!(buf[(40, 7)].symbol(), "╭");

        // No media: the tag sits on the first inner row.
        let text: String = (0..area.width)
            .map(|x| buf[(x, 8)].symbol().to_string())
            .collect();
        assert!(text.contains("ONE"));
    }
}
