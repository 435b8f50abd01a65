//! Hero section: the morphing title.

use ratatui::{buffer::Buffer, layout::Rect, style::Modifier};

use super::paint;
use super::theme::Theme;
use crate::core::gooey::GooeyFrame;

/// Blur above which letters dissolve into shade blocks.
const DISSOLVE_BLUR: f64 = 2.0;
const FAINT: f64 = 0.05;

/// Spread letters out so the title reads as a headline.
fn spaced(text: &str) -> Vec<char> {
    let mut out = Vec::with_capacity(text.len() * 2);
    for (i, ch) in text.chars().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        out.push(ch);
    }
    out
}

/// One layer of the cross-fade: letters or, while blurred, shade blocks.
fn layer_glyph(ch: char, opacity: f64, blur: f64) -> Option<char> {
    if ch == ' ' || opacity < FAINT {
        return None;
    }
    if blur <= DISSOLVE_BLUR {
        return Some(ch);
    }
    Some(match opacity {
        o if o < 0.4 => '░',
        o if o < 0.7 => '▒',
        _ => '▓',
    })
}

pub struct HeroWidget<'a> {
    pub frame: Option<GooeyFrame<'a>>,
    pub subtitle: &'a str,
}

impl<'a> HeroWidget<'a> {
    pub fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Theme::backdrop_style());
        let cx = area.x as i32 + area.width as i32 / 2;
        let cy = area.y as i32 + area.height as i32 / 2;

        if let Some(f) = self.frame {
            let out = spaced(f.outgoing);
            let inc = spaced(f.incoming);
            let width = out.len().max(inc.len());
            let left = cx - width as i32 / 2;
            // Each word is centred on its own.
            let out_pad = (width - out.len()) / 2;
            let inc_pad = (width - inc.len()) / 2;

            for col in 0..width {
                let a = col
                    .checked_sub(out_pad)
                    .and_then(|i| out.get(i))
                    .and_then(|&c| layer_glyph(c, f.outgoing_opacity, f.outgoing_blur))
                    .map(|g| (g, f.outgoing_opacity));
                let b = col
                    .checked_sub(inc_pad)
                    .and_then(|i| inc.get(i))
                    .and_then(|&c| layer_glyph(c, f.incoming_opacity, f.incoming_blur))
                    .map(|g| (g, f.incoming_opacity));
                // The stronger layer wins the cell.
                let pick = match (a, b) {
                    (Some(a), Some(b)) => Some(if b.1 >= a.1 { b } else { a }),
                    (a, b) => a.or(b),
                };
                if let Some((glyph, opacity)) = pick {
                    let style = Theme::headline_style(opacity).add_modifier(Modifier::BOLD);
                    paint::put_char(buf, area, left + col as i32, cy - 1, glyph, style);
                }
            }
        }

        paint::put_centered(buf, area, cx, cy + 1, self.subtitle, Theme::caption_style(1.0));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(buf: &Buffer, y: u16) -> String {
        (0..buf.area.width).map(|x| buf[(x, y)].symbol().to_string()).collect()
    }

    #[test]
    fn resting_frame_shows_the_incoming_word() {
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        HeroWidget {
            frame: Some(GooeyFrame {
                outgoing: "OLD",
                incoming: "NEW",
                outgoing_opacity: 0.0,
                incoming_opacity: 1.0,
                outgoing_blur: 0.0,
                incoming_blur: 0.0,
            }),
            subtitle: "scroll",
        }
        .render(area, &mut buf);
        assert!(row(&buf, 4).contains("N E W"));
        assert!(row(&buf, 6).contains("scroll"));
    }

    #[test]
    fn blurred_layers_dissolve() {
        assert_eq!(layer_glyph('A', 1.0, 0.0), Some('A'));
        assert_eq!(layer_glyph('A', 0.3, 20.0), Some('░'));
        assert_eq!(layer_glyph('A', 0.9, 20.0), Some('▓'));
        assert_eq!(layer_glyph('A', 0.01, 0.0), None);
        assert_eq!(layer_glyph(' ', 1.0, 0.0), None);
    }
}
