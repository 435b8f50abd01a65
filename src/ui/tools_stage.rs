//! Tools showcase: tiles on the ring / arc plus the headline and caption.

use ratatui::{buffer::Buffer, layout::Rect};

use super::paint::{self, ShearedBox};
use super::stage::StageMap;
use super::theme::Theme;
use crate::core::geometry::Transform;
use crate::core::item::{Item, Media};

/// Tile footprint in virtual pixels before scaling.
pub const TILE_WIDTH_PX: f64 = 60.0;
pub const TILE_HEIGHT_PX: f64 = 85.0;

pub struct ToolsStageWidget<'a> {
    pub tools: &'a [Item],
    /// `(tile index, transform, flip degrees)` in paint order.
    pub tiles: &'a [(usize, Transform, f64)],
    pub map: StageMap,
    pub headline_opacity: f64,
    pub caption_opacity: f64,
}

impl<'a> ToolsStageWidget<'a> {
    /// Render and return `(tile index, rect)` hit zones in paint order.
    pub fn render_and_hit(self, buf: &mut Buffer) -> Vec<(usize, Rect)> {
        let area = self.map.area;
        buf.set_style(area, Theme::backdrop_style());
        self.render_headline(buf);

        let aspect = self.map.px_per_row / self.map.px_per_col;
        let mut hits = Vec::with_capacity(self.tiles.len());
        for &(index, t, flip) in self.tiles {
            let Some(tool) = self.tools.get(index) else {
                continue;
            };
            // A flip squeezes the tile horizontally; past 90° the back shows.
            let squeeze = flip.to_radians().cos().abs();
            let (cols, rows) = self.map.cells(
                TILE_WIDTH_PX * t.scale * squeeze.max(0.15),
                TILE_HEIGHT_PX * t.scale,
            );
            let (cx, cy) = self.map.to_cell(t.x, t.y);
            let shape = ShearedBox::new(cx, cy, cols, rows, t.rotation, aspect);
            let back = flip > 90.0;

            let color = Theme::tile_color(index);
            let border = if back {
                Theme::card_border_style(t.opacity, true)
            } else {
                Theme::card_style(t.opacity).fg(Theme::shade(color, t.opacity))
            };
            shape.paint(buf, area, Theme::card_style(t.opacity), border);

            let mid = shape.inner_rows() / 2;
            if back {
                shape.text_centered(buf, area, mid - 1, "VIEW", Theme::cta_style(t.opacity));
                shape.text_centered(buf, area, mid, "DETAILS", Theme::card_muted_style(t.opacity));
            } else {
                let glyph = match &tool.media {
                    Media::Custom(key) => key.clone(),
                    _ => tool_glyph(&tool.title),
                };
                let style = Theme::card_title_style(t.opacity).fg(Theme::shade(color, t.opacity));
                shape.text_centered(buf, area, mid, &glyph, style);
            }

            if let Some(rect) = shape.bounds(area) {
                hits.push((index, rect));
            }
        }

        self.render_caption(buf);
        hits
    }

    fn render_headline(&self, buf: &mut Buffer) {
        if self.headline_opacity <= 0.0 {
            return;
        }
        let area = self.map.area;
        let (cx, cy) = self.map.center();
        let (cx, cy) = (cx as i32, cy as i32);
        paint::put_centered(
            buf,
            area,
            cx,
            cy - 1,
            "TOOLS OF THE TRADE",
            Theme::headline_style(self.headline_opacity),
        );
        paint::put_centered(
            buf,
            area,
            cx,
            cy + 1,
            "SCROLL TO EXPLORE",
            Theme::caption_style(self.headline_opacity),
        );
    }

    fn render_caption(&self, buf: &mut Buffer) {
        if self.caption_opacity <= 0.0 || self.tools.is_empty() {
            return;
        }
        let area = self.map.area;
        let names: Vec<&str> = self.tools.iter().map(|t| t.title.as_str()).collect();
        let text = format!("POWERED BY {}", names.join(" · "));
        let y = area.y as i32 + area.height as i32 - 2;
        let cx = area.x as i32 + area.width as i32 / 2;
        let line = paint::wrap(&text, area.width.saturating_sub(4) as usize, 1);
        if let Some(line) = line.first() {
            paint::put_centered(buf, area, cx, y, line, Theme::caption_style(self.caption_opacity));
        }
    }
}

/// Fallback glyph: up to two leading characters of a tool name, upper-cased.
fn tool_glyph(title: &str) -> String {
    title
        .split_whitespace()
        .next()
        .unwrap_or("")
        .chars()
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}
