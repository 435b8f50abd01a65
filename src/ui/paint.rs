//! Low-level cell painting shared by the stage widgets.
//!
//! Everything here takes signed coordinates and a clip rect, because
//! animated cards routinely hang off the edge of the stage.

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::{Color, Style},
};

pub fn put_char(buf: &mut Buffer, clip: Rect, x: i32, y: i32, ch: char, style: Style) {
    if x < clip.x as i32
        || y < clip.y as i32
        || x >= clip.x as i32 + clip.width as i32
        || y >= clip.y as i32 + clip.height as i32
    {
        return;
    }
    if let Some(cell) = buf.cell_mut(Position::new(x as u16, y as u16)) {
        cell.set_char(ch).set_style(style);
    }
}

/// Write `text` starting at (x, y), at most `max` cells wide.
pub fn put_str(buf: &mut Buffer, clip: Rect, x: i32, y: i32, text: &str, max: i32, style: Style) {
    for (i, ch) in text.chars().take(max.max(0) as usize).enumerate() {
        put_char(buf, clip, x + i as i32, y, ch, style);
    }
}

/// Write `text` centred on column `cx`.
pub fn put_centered(buf: &mut Buffer, clip: Rect, cx: i32, y: i32, text: &str, style: Style) {
    let w = text.chars().count() as i32;
    put_str(buf, clip, cx - w / 2, y, text, w, style);
}

/// Greedy word wrap to `width` columns, at most `max_lines` lines.  The last
/// line gets an ellipsis when text is cut.
pub fn wrap(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    if width == 0 || max_lines == 0 {
        return lines;
    }
    let mut current = String::new();
    let mut truncated = false;
    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed <= width {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
            continue;
        }
        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if lines.len() == max_lines {
            truncated = true;
            break;
        }
        current = word.chars().take(width).collect();
    }
    if !truncated && !current.is_empty() {
        if lines.len() < max_lines {
            lines.push(current);
        } else {
            truncated = true;
        }
    }
    if truncated {
        if let Some(last) = lines.last_mut() {
            let keep = width.saturating_sub(1);
            *last = last.chars().take(keep).collect::<String>() + "…";
        }
    }
    lines
}

// ─── sheared boxes ──────────────────────────────────────────────

/// A box of `cols` × `rows` cells whose rows are shifted sideways to
/// suggest rotation (terminals cannot rotate glyphs).
#[derive(Debug, Clone)]
pub struct ShearedBox {
    pub left: i32,
    pub top: i32,
    pub cols: i32,
    pub rows: i32,
    shifts: Vec<i32>,
}

impl ShearedBox {
    /// Box centred on cell (cx, cy), rotated by `rotation_deg` about its
    /// centre.  `aspect` is px-per-row over px-per-col.
    pub fn new(cx: f64, cy: f64, cols: i32, rows: i32, rotation_deg: f64, aspect: f64) -> Self {
        let sin = rotation_deg.to_radians().sin();
        let mid = (rows - 1) as f64 / 2.0;
        let shifts = (0..rows)
            .map(|r| (-(r as f64 - mid) * aspect * sin).round() as i32)
            .collect();
        Self {
            left: (cx - cols as f64 / 2.0).round() as i32,
            top: (cy - rows as f64 / 2.0).round() as i32,
            cols,
            rows,
            shifts,
        }
    }

    /// Leftmost column of row `r`.
    pub fn row_x(&self, r: i32) -> i32 {
        self.left + self.shifts.get(r as usize).copied().unwrap_or(0)
    }

    pub fn is_upright(&self) -> bool {
        self.shifts.iter().all(|s| *s == 0)
    }

    /// Bounding rect including every shifted row, clipped to `area`.
    pub fn bounds(&self, area: Rect) -> Option<Rect> {
        let min = self.shifts.iter().copied().min().unwrap_or(0);
        let max = self.shifts.iter().copied().max().unwrap_or(0);
        super::stage::clip(
            area,
            self.left + min,
            self.top,
            self.cols + (max - min),
            self.rows,
        )
    }

    /// Fill the box and draw a rounded border.
    pub fn paint(&self, buf: &mut Buffer, clip: Rect, fill: Style, border: Style) {
        let last_row = self.rows - 1;
        let last_col = self.cols - 1;
        for r in 0..self.rows {
            let y = self.top + r;
            let x0 = self.row_x(r);
            for c in 0..self.cols {
                let ch = match (r, c) {
                    _ if self.rows < 2 || self.cols < 2 => ' ',
                    (0, 0) => '╭',
                    (0, c) if c == last_col => '╮',
                    (r, 0) if r == last_row => '╰',
                    (r, c) if r == last_row && c == last_col => '╯',
                    (0, _) => '─',
                    (r, _) if r == last_row => '─',
                    (_, 0) => '│',
                    (_, c) if c == last_col => '│',
                    _ => ' ',
                };
                let style = if ch == ' ' { fill } else { border };
                put_char(buf, clip, x0 + c, y, ch, style);
            }
        }
    }

    /// Write `text` on inner row `r` (0 = first row inside the border).
    pub fn text(&self, buf: &mut Buffer, clip: Rect, r: i32, text: &str, style: Style) {
        let row = r + 1;
        if row >= self.rows - 1 {
            return;
        }
        put_str(buf, clip, self.row_x(row) + 2, self.top + row, text, self.cols - 4, style);
    }

    /// Write `text` centred on inner row `r`.
    pub fn text_centered(&self, buf: &mut Buffer, clip: Rect, r: i32, text: &str, style: Style) {
        let row = r + 1;
        if row >= self.rows - 1 {
            return;
        }
        let inner = (self.cols - 2).max(0);
        let w = (text.chars().count() as i32).min(inner);
        let x = self.row_x(row) + 1 + (inner - w) / 2;
        put_str(buf, clip, x, self.top + row, text, w, style);
    }

    /// Rows available inside the border.
    pub fn inner_rows(&self) -> i32 {
        (self.rows - 2).max(0)
    }

    /// Columns available for padded text.
    pub fn inner_cols(&self) -> i32 {
        (self.cols - 4).max(0)
    }
}

// ─── image preview (halfblock renderer) ─────────────────────────

/// Render an `RgbaImage` using Unicode `▀` half-blocks (2 pixels per cell).
///
/// Aspect ratio is preserved: the image is fitted inside `area` and centred
/// horizontally.  Terminal cells are ~2× taller than wide, so each cell
/// represents 1 pixel wide × 2 pixels tall; the fit calculation accounts
/// for this.  `opacity` blends every pixel toward the backdrop.
pub fn render_image_halfblocks(
    img: &image::RgbaImage,
    area: Rect,
    opacity: f64,
    buf: &mut Buffer,
) {
    use image::imageops::FilterType;

    if area.width == 0 || area.height == 0 || img.width() == 0 || img.height() == 0 {
        return;
    }

    // Available pixel budget: each column = 1 px wide, each row = 2 px tall.
    let max_px_w = area.width as f64;
    let max_px_h = (area.height as f64) * 2.0;

    let src_w = img.width() as f64;
    let src_h = img.height() as f64;

    // Scale to fit within the pixel budget, preserving aspect ratio.
    let scale = (max_px_w / src_w).min(max_px_h / src_h).min(1.0);
    let fit_w = (src_w * scale).round().max(1.0) as u32;
    let fit_h = (src_h * scale).round().max(1.0) as u32;

    let rgba = image::imageops::resize(img, fit_w, fit_h, FilterType::Triangle);
    let (iw, ih) = (rgba.width(), rgba.height());

    // Centre horizontally within the area.
    let col_offset = (area.width.saturating_sub(iw as u16)) / 2;
    let pixel = |p: &image::Rgba<u8>| -> Color {
        super::theme::Theme::shade((p[0], p[1], p[2]), opacity * p[3] as f64 / 255.0)
    };

    for row in 0..area.height {
        let yt = (row as u32) * 2;
        let yb = yt + 1;
        if yt >= ih {
            break;
        }
        for col in 0..iw.min(area.width as u32) {
            let fg = pixel(rgba.get_pixel(col, yt));
            let bg = if yb < ih {
                pixel(rgba.get_pixel(col, yb))
            } else {
                Color::Reset
            };
            if let Some(cell) =
                buf.cell_mut(Position::new(area.x + col_offset + col as u16, area.y + row))
            {
                cell.set_char('▀').set_fg(fg).set_bg(bg);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_breaks_on_words_and_truncates() {
        assert_eq!(wrap("one two three", 7, 5), vec!["one two", "three"]);
        assert_eq!(wrap("alpha beta gamma delta", 10, 1), vec!["alpha bet…"]);
        assert!(wrap("anything", 0, 3).is_empty());
    }

    #[test]
    fn put_char_clips() {
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        put_str(&mut buf, area, -2, 0, "abcdef", 6, Style::default());
        put_char(&mut buf, area, 0, 5, 'z', Style::default());
        assert_eq!(buf[(0, 0)].symbol(), "c");
        assert_eq!(buf[(3, 0)].symbol(), "f");
        assert_eq!(buf[(0, 1)].symbol(), " ");
    }

    #[test]
    fn upright_box_has_no_shear() {
        let b = ShearedBox::new(10.0, 5.0, 8, 6, 0.0, 2.0);
        assert!(b.is_upright());
        assert_eq!((b.left, b.top), (6, 2));

        let tilted = ShearedBox::new(10.0, 5.0, 8, 6, 16.0, 2.0);
        assert!(!tilted.is_upright());
        // Positive rotation leans the top to the right.
        assert!(tilted.row_x(0) > tilted.row_x(5));
    }

    #[test]
    fn box_border_is_drawn() {
        let area = Rect::new(0, 0, 10, 5);
        let mut buf = Buffer::empty(area);
        let b = ShearedBox::new(5.0, 2.5, 6, 4, 0.0, 2.0);
        b.paint(&mut buf, area, Style::default(), Style::default());
        assert_eq!(buf[(b.left as u16, b.top as u16)].symbol(), "╭");
        assert_eq!(buf[((b.left + 5) as u16, (b.top + 3) as u16)].symbol(), "╯");
    }
}
