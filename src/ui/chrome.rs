//! Section tabs and pagination dots.

use ratatui::{buffer::Buffer, layout::Rect, text::Span};

use super::theme::Theme;
use crate::app::section::Section;

/// Top bar with one tab per section.
pub struct NavBar {
    pub current: Section,
}

impl NavBar {
    /// Render and return the clickable rect of each tab.
    pub fn render_and_hit(self, area: Rect, buf: &mut Buffer) -> Vec<(Section, Rect)> {
        buf.set_style(area, Theme::nav_style());
        let mut hits = Vec::with_capacity(Section::ALL.len());
        let mut x = area.x + 1;
        for section in Section::ALL {
            let label = format!(" {} ", section.label());
            let w = label.chars().count() as u16;
            if x + w > area.x + area.width {
                break;
            }
            let style = if section == self.current {
                Theme::nav_active_style()
            } else {
                Theme::nav_style()
            };
            buf.set_span(x, area.y, &Span::styled(label, style), w);
            hits.push((section, Rect::new(x, area.y, w, 1)));
            x += w + 1;
        }
        hits
    }
}

/// One dot per card, the active one highlighted.
pub struct Dots {
    pub len: usize,
    pub active: usize,
}

impl Dots {
    /// Render centred in `area` and return `(index, rect)` per dot.  Dots
    /// that do not fit are not drawn.
    pub fn render_and_hit(self, area: Rect, buf: &mut Buffer) -> Vec<(usize, Rect)> {
        // Each dot takes two columns: the glyph and a gap.
        let fit = (area.width / 2) as usize;
        let shown = self.len.min(fit);
        if shown == 0 || area.height == 0 {
            return Vec::new();
        }
        let total_w = (shown * 2 - 1) as u16;
        let x0 = area.x + (area.width - total_w) / 2;
        (0..shown)
            .map(|i| {
                let active = i == self.active;
                let glyph = if active { "●" } else { "○" };
                let x = x0 + (i * 2) as u16;
                buf.set_string(x, area.y, glyph, Theme::dot_style(active));
                (i, Rect::new(x, area.y, 1, 1))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tabs_are_laid_out_left_to_right() {
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        let hits = NavBar {
            current: Section::Tools,
        }
        .render_and_hit(area, &mut buf);
        assert_eq!(hits.len(), 6);
        assert_eq!(hits[0].0, Section::Hero);
        assert_eq!(hits[5].0, Section::Contact);
        assert!(hits.windows(2).all(|w| w[0].1.x < w[1].1.x));
    }

    #[test]
    fn dots_are_centred() {
        let area = Rect::new(0, 0, 21, 1);
        let mut buf = Buffer::empty(area);
        let hits = Dots { len: 3, active: 1 }.render_and_hit(area, &mut buf);
        let xs: Vec<u16> = hits.iter().map(|(_, r)| r.x).collect();
        assert_eq!(xs, vec![8, 10, 12]);
        assert_eq!(buf[(10, 0)].symbol(), "●");
        assert_eq!(buf[(8, 0)].symbol(), "○");
    }

    #[test]
    fn tabs_that_do_not_fit_are_dropped() {
        let area = Rect::new(0, 0, 30, 1);
        let mut buf = Buffer::empty(area);
        let hits = NavBar {
            current: Section::Hero,
        }
        .render_and_hit(area, &mut buf);
        assert_eq!(hits.len(), 4);
    }
}
