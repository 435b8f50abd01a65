//! Full-screen lightbox overlay.
//!
//! Renders a large preview of one item centred on the terminal with
//! navigation arrows, a close button, and a position indicator (e.g. "3 / 7").

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

use super::paint;
use crate::app::asset_runtime::AssetCache;
use crate::core::item::{Item, Media};

/// The lightbox overlay widget.
pub struct LightboxWidget<'a> {
    pub items: &'a [Item],
    /// Index into `items` of the item on display.
    pub current: usize,
    /// Whether prev/next wrap around (arrows always shown).
    pub looping: bool,
    pub assets: &'a AssetCache,
}

/// Clickable regions returned after rendering, for mouse hit-testing.
#[derive(Debug, Clone, Copy)]
pub struct LightboxHitZones {
    pub close_rect: Rect,
    pub prev_rect: Rect,
    pub next_rect: Rect,
}

impl<'a> LightboxWidget<'a> {
    /// Compute the overlay area (centred, 80% of terminal).
    fn overlay_area(terminal: Rect) -> Rect {
        let margin_x = (terminal.width as f32 * 0.1).round() as u16;
        let margin_y = (terminal.height as f32 * 0.1).round() as u16;
        Rect::new(
            terminal.x + margin_x,
            terminal.y + margin_y,
            terminal.width.saturating_sub(margin_x * 2).max(20).min(terminal.width),
            terminal.height.saturating_sub(margin_y * 2).max(8).min(terminal.height),
        )
    }

    /// Render and return hit zones for mouse interaction.
    pub fn render_and_hit(self, terminal_area: Rect, buf: &mut Buffer) -> LightboxHitZones {
        let area = Self::overlay_area(terminal_area);
        Clear.render(area, buf);

        let total = self.items.len();
        let item = self.items.get(self.current);

        let title = match item {
            Some(item) => format!(" {} — {}/{} ", item.title, self.current + 1, total),
            None => " Nothing to show ".to_string(),
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::LightBlue))
            .title(Span::styled(
                title,
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ));

        let inner = block.inner(area);
        block.render(area, buf);

        // Close button [X] on the top-right corner of the border.
        let close_rect = Rect::new(area.x + area.width.saturating_sub(5), area.y, 3, 1);
        Paragraph::new(Line::from(Span::styled(
            "[X]",
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        )))
        .render(close_rect, buf);

        // Navigation arrows on the left/right edges (vertically centred).
        let arrow_y = area.y + area.height / 2;
        let prev_rect = Rect::new(area.x, arrow_y, 3, 1);
        let next_rect = Rect::new(area.x + area.width.saturating_sub(3), arrow_y, 3, 1);
        let arrow = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);

        if self.looping || self.current > 0 {
            Paragraph::new(Line::from(Span::styled(" ◀", arrow))).render(prev_rect, buf);
        }
        if self.looping || self.current + 1 < total {
            Paragraph::new(Line::from(Span::styled("▶ ", arrow))).render(next_rect, buf);
        }

        // Body: media on top, description and link below.
        if let Some(item) = item {
            let text_rows: u16 = 3;
            let body = Rect::new(
                inner.x.saturating_add(3),
                inner.y,
                inner.width.saturating_sub(6),
                inner.height.saturating_sub(1), // leave 1 row for footer
            );
            let media_area = Rect::new(
                body.x,
                body.y,
                body.width,
                body.height.saturating_sub(text_rows),
            );
            self.render_media(item, media_area, buf);

            let mut lines = Vec::new();
            if let Some(desc) = &item.description {
                lines.push(Line::from(Span::styled(
                    desc.clone(),
                    Style::default().fg(Color::Gray),
                )));
            }
            if let Some(href) = &item.href {
                lines.push(Line::from(vec![
                    Span::styled(
                        format!("{} ↗ ", item.cta()),
                        Style::default()
                            .fg(Color::LightBlue)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(href.clone(), Style::default().fg(Color::DarkGray)),
                ]));
            }
            let text_area = Rect::new(
                body.x,
                media_area.y + media_area.height,
                body.width,
                text_rows.min(body.height),
            );
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .render(text_area, buf);
        }

        // Footer hint.
        let footer = Line::from(vec![Span::styled(
            " ←/→ navigate   o open link   Esc close ",
            Style::default().fg(Color::DarkGray),
        )]);
        let footer_y = inner.y + inner.height.saturating_sub(1);
        Paragraph::new(vec![footer]).render(Rect::new(inner.x, footer_y, inner.width, 1), buf);

        LightboxHitZones {
            close_rect,
            prev_rect,
            next_rect,
        }
    }

    fn render_media(&self, item: &Item, area: Rect, buf: &mut Buffer) {
        if area.width <= 2 || area.height <= 1 {
            return;
        }
        let centre = |text: String, style: Style, buf: &mut Buffer| {
            let w = (text.chars().count() as u16).min(area.width);
            let x = area.x + (area.width - w) / 2;
            buf.set_string(x, area.y + area.height / 2, text, style);
        };
        let dim = Style::default().fg(Color::DarkGray);
        match &item.media {
            Media::Image(path) => {
                if let Some(img) = self.assets.image(path) {
                    paint::render_image_halfblocks(img, area, 1.0, buf);
                } else if self.assets.is_failed(path) {
                    centre("Preview unavailable".to_string(), dim, buf);
                } else {
                    centre("Loading…".to_string(), dim, buf);
                }
            }
            Media::Video(path) => centre(format!("▶ {}", path.display()), dim, buf),
            Media::Custom(key) => centre(
                key.clone(),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
                buf,
            ),
            Media::None => centre(item.title.clone(), Style::default().fg(Color::White), buf),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_follow_bounds_when_not_looping() {
        let area = Rect::new(0, 0, 80, 30);
        let items = vec![Item::new("a", "Alpha"), Item::new("b", "Beta")];
        let assets = AssetCache::default();
        let mut buf = Buffer::empty(area);
        let zones = LightboxWidget {
            items: &items,
            current: 0,
            looping: false,
            assets: &assets,
        }
        .render_and_hit(area, &mut buf);

        let prev = buf[(zones.prev_rect.x + 1, zones.prev_rect.y)].symbol().to_string();
        let next = buf[(zones.next_rect.x, zones.next_rect.y)].symbol().to_string();
        assert_ne!(prev, "◀");
        assert_eq!(next, "▶");
        assert_eq!(buf[(zones.close_rect.x, zones.close_rect.y)].symbol(), "[");
    }
}
