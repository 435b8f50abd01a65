//! About page: stacked headline and bio on the left, portrait and the
//! skills / experience lists on the right.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    widgets::{Block, Borders, Widget},
};

use super::paint;
use super::stage::{clip, PX_PER_COL, PX_PER_ROW};
use super::theme::Theme;
use crate::app::asset_runtime::{AssetCache, AssetState};
use crate::app::section::AboutPlacement;
use crate::config::AboutConfig;
use crate::core::geometry::Transform;

const PORTRAIT_PLACEHOLDER: &str = "Add a portrait";
const MAX_PORTRAIT_ROWS: u16 = 12;

fn shift_cols(t: &Transform) -> i32 {
    (t.x / PX_PER_COL).round() as i32
}

fn shift_rows(t: &Transform) -> i32 {
    (t.y / PX_PER_ROW).round() as i32
}

pub struct AboutWidget<'a> {
    pub config: &'a AboutConfig,
    pub placement: AboutPlacement,
    pub assets: &'a AssetCache,
}

impl<'a> AboutWidget<'a> {
    pub fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Theme::backdrop_style());
        if area.width < 4 || area.height < 2 {
            return;
        }
        let left_w = area.width * 11 / 20;
        let left = Rect::new(area.x, area.y, left_w, area.height);
        let right = Rect::new(area.x + left_w, area.y, area.width - left_w, area.height);

        let title_rows = self.render_title(left, buf);
        self.render_bio(left, area.y as i32 + title_rows + 2, buf);
        let portrait_bottom = self.render_portrait(right, buf);
        self.render_lists(right, portrait_bottom + 1, buf);
    }

    fn render_title(&self, left: Rect, buf: &mut Buffer) -> i32 {
        let t = &self.placement.title;
        let x = left.x as i32 + 2 + shift_cols(t);
        for (i, line) in self.config.title.iter().enumerate() {
            let y = left.y as i32 + 1 + i as i32;
            paint::put_str(buf, left, x, y, line, left.width as i32, Theme::headline_style(t.opacity));
        }
        self.config.title.len() as i32
    }

    fn render_bio(&self, left: Rect, top: i32, buf: &mut Buffer) {
        let t = &self.placement.bio;
        let width = left.width.saturating_sub(4) as usize;
        let max_lines = (left.y as i32 + left.height as i32 - top).max(0) as usize;
        let y0 = top + shift_rows(t);
        for (i, line) in paint::wrap(&self.config.bio, width, max_lines).iter().enumerate() {
            paint::put_str(
                buf,
                left,
                left.x as i32 + 2,
                y0 + i as i32,
                line,
                width as i32,
                Theme::caption_style(t.opacity),
            );
        }
    }

    /// Draw the portrait frame; returns the row below it.
    fn render_portrait(&self, right: Rect, buf: &mut Buffer) -> i32 {
        let t = &self.placement.portrait;
        let full_w = right.width.saturating_sub(2) as f64;
        let full_h = (right.height / 2).min(MAX_PORTRAIT_ROWS) as f64;
        let bottom = right.y as i32 + 1 + full_h as i32;

        // Scale about the slot centre; the slot itself never moves.
        let w = (full_w * t.scale).round() as i32;
        let h = (full_h * t.scale).round() as i32;
        let left = right.x as i32 + (full_w as i32 - w) / 2;
        let top = right.y as i32 + 1 + (full_h as i32 - h) / 2;
        let Some(frame) = clip(right, left, top, w, h) else {
            return bottom;
        };

        let border = Theme::card_border_style(t.opacity, false);
        let block = Block::default().borders(Borders::ALL).border_style(border);
        let inner = block.inner(frame);
        block.render(frame, buf);

        let state = self.config.portrait.as_deref().and_then(|p| self.assets.get(p));
        match state {
            Some(AssetState::Ready(img)) => {
                paint::render_image_halfblocks(img, inner, t.opacity, buf);
            }
            Some(AssetState::Loading) => {
                let cx = inner.x as i32 + inner.width as i32 / 2;
                let cy = inner.y as i32 + inner.height as i32 / 2;
                paint::put_centered(buf, inner, cx, cy, "…", Theme::caption_style(t.opacity));
            }
            Some(AssetState::Failed) | None => {
                let cx = inner.x as i32 + inner.width as i32 / 2;
                let cy = inner.y as i32 + inner.height as i32 / 2;
                paint::put_centered(
                    buf,
                    inner,
                    cx,
                    cy,
                    PORTRAIT_PLACEHOLDER,
                    Theme::caption_style(t.opacity),
                );
            }
        }
        bottom
    }

    fn render_lists(&self, right: Rect, top: i32, buf: &mut Buffer) {
        let t = &self.placement.skills;
        let x = right.x as i32 + 1 + shift_cols(t);
        let width = right.width as i32 - 2;
        let heading = Theme::label_style(t.opacity);
        let entry = Theme::caption_style(t.opacity);
        let rule: String = "─".repeat(width.max(0) as usize);

        let mut y = top;
        for (label, entries) in [("SKILLS", &self.config.skills), ("EXPERIENCE", &self.config.experience)] {
            paint::put_str(buf, right, x, y, label, width, heading);
            y += 1;
            for e in entries {
                paint::put_str(buf, right, x, y, e, width, entry);
                y += 1;
            }
            paint::put_str(buf, right, x, y, &rule, width, Theme::caption_style(t.opacity * 0.5));
            y += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(buf: &Buffer) -> String {
        let area = buf.area;
        (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol().to_string()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn resting() -> AboutPlacement {
        AboutPlacement {
            title: Transform::default(),
            bio: Transform::default(),
            portrait: Transform::default(),
            skills: Transform::default(),
        }
    }

    fn render(placement: AboutPlacement) -> Buffer {
        let config = AboutConfig::default();
        let assets = AssetCache::default();
        let area = Rect::new(0, 0, 100, 40);
        let mut buf = Buffer::empty(area);
        AboutWidget {
            config: &config,
            placement,
            assets: &assets,
        }
        .render(area, &mut buf);
        buf
    }

    #[test]
    fn resting_page_shows_every_block() {
        let out = text(&render(resting()));
        assert!(out.contains("ABOUT"));
        assert!(out.contains("SKILLS"));
        assert!(out.contains("EXPERIENCE"));
        assert!(out.contains("VIDEOGRAPHY"));
        assert!(out.contains(PORTRAIT_PLACEHOLDER));
        assert!(out.contains("Design is where"));
    }

    #[test]
    fn title_slides_in_from_the_left() {
        let buf = render(resting());
        assert_eq!(buf[(2, 1)].symbol(), "A");

        let mut early = resting();
        early.title.x = -16.0;
        let buf = render(early);
        assert_eq!(buf[(0, 1)].symbol(), "A");
        assert_ne!(buf[(2, 1)].symbol(), "A");
    }
}
