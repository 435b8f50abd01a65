//! Virtual pixels ↔ terminal cells.
//!
//! The engine lays things out in pixels around the centre of the stage.  A
//! cell is [`PX_PER_COL`] × [`PX_PER_ROW`] pixels at zoom 1; stages too small
//! for the content zoom out.

use ratatui::layout::Rect;

use crate::core::morph::Viewport;

pub const PX_PER_COL: f64 = 8.0;
pub const PX_PER_ROW: f64 = 16.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageMap {
    pub area: Rect,
    pub px_per_col: f64,
    pub px_per_row: f64,
}

impl StageMap {
    pub fn new(area: Rect) -> Self {
        Self {
            area,
            px_per_col: PX_PER_COL,
            px_per_row: PX_PER_ROW,
        }
    }

    /// Zoom out until a `width` × `height` px box fits inside `fill` of the
    /// stage.  Never zooms in.
    pub fn fitting(area: Rect, width: f64, height: f64, fill: f64) -> Self {
        let avail_w = (area.width as f64 * fill).max(1.0) * PX_PER_COL;
        let avail_h = (area.height as f64 * fill).max(1.0) * PX_PER_ROW;
        let zoom = (width / avail_w).max(height / avail_h).max(1.0);
        Self {
            area,
            px_per_col: PX_PER_COL * zoom,
            px_per_row: PX_PER_ROW * zoom,
        }
    }

    /// The stage as the engine sees it.
    pub fn viewport(&self) -> Viewport {
        Viewport::new(
            self.area.width as f64 * self.px_per_col,
            self.area.height as f64 * self.px_per_row,
        )
    }

    /// Centre of the stage in (fractional) cells.
    pub fn center(&self) -> (f64, f64) {
        (
            self.area.x as f64 + self.area.width as f64 / 2.0,
            self.area.y as f64 + self.area.height as f64 / 2.0,
        )
    }

    pub fn to_cell(&self, x: f64, y: f64) -> (f64, f64) {
        let (cx, cy) = self.center();
        (cx + x / self.px_per_col, cy + y / self.px_per_row)
    }

    /// Pixel position of the middle of a cell, relative to the centre.
    pub fn to_px(&self, col: u16, row: u16) -> (f64, f64) {
        let (cx, cy) = self.center();
        (
            (col as f64 + 0.5 - cx) * self.px_per_col,
            (row as f64 + 0.5 - cy) * self.px_per_row,
        )
    }

    /// Horizontal pointer position within the stage, in px from its left edge.
    pub fn x_from_left(&self, col: u16) -> f64 {
        (col.saturating_sub(self.area.x) as f64 + 0.5) * self.px_per_col
    }

    pub fn width_px(&self) -> f64 {
        self.area.width as f64 * self.px_per_col
    }

    /// Size in cells of a `w` × `h` px box.
    pub fn cells(&self, w: f64, h: f64) -> (i32, i32) {
        (
            (w / self.px_per_col).round().max(1.0) as i32,
            (h / self.px_per_row).round().max(1.0) as i32,
        )
    }

    /// Cell rect of a box of `cols` × `rows` centred on (x, y) px, clipped
    /// to the stage.  `None` when fully outside.
    pub fn rect_at(&self, x: f64, y: f64, cols: i32, rows: i32) -> Option<Rect> {
        let (cx, cy) = self.to_cell(x, y);
        let left = (cx - cols as f64 / 2.0).round() as i32;
        let top = (cy - rows as f64 / 2.0).round() as i32;
        clip(self.area, left, top, cols, rows)
    }

    pub fn contains(&self, col: u16, row: u16) -> bool {
        col >= self.area.x
            && col < self.area.x.saturating_add(self.area.width)
            && row >= self.area.y
            && row < self.area.y.saturating_add(self.area.height)
    }
}

/// Intersect a signed rect with `area`.
pub fn clip(area: Rect, left: i32, top: i32, width: i32, height: i32) -> Option<Rect> {
    let x0 = left.max(area.x as i32);
    let y0 = top.max(area.y as i32);
    let x1 = (left + width).min(area.x as i32 + area.width as i32);
    let y1 = (top + height).min(area.y as i32 + area.height as i32);
    (x1 > x0 && y1 > y0).then(|| Rect::new(x0 as u16, y0 as u16, (x1 - x0) as u16, (y1 - y0) as u16))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_is_stage_centre() {
        let map = StageMap::new(Rect::new(0, 1, 100, 40));
        assert_eq!(map.to_cell(0.0, 0.0), (50.0, 21.0));
        assert_eq!(map.to_cell(80.0, -32.0), (60.0, 19.0));
        assert_eq!(map.to_px(50, 21), (4.0, 8.0));
        assert_eq!(map.viewport(), Viewport::new(800.0, 640.0));
    }

    #[test]
    fn zooms_out_for_large_cards() {
        let area = Rect::new(0, 0, 80, 20);
        // 420 px tall card needs 26 rows at zoom 1; 80% of 20 rows is 16.
        let map = StageMap::fitting(area, 320.0, 420.0, 0.8);
        assert!(map.px_per_row > PX_PER_ROW);
        let (_, rows) = map.cells(320.0, 420.0);
        assert!(rows <= 16);

        let roomy = StageMap::fitting(Rect::new(0, 0, 300, 100), 320.0, 420.0, 0.8);
        assert_eq!(roomy.px_per_col, PX_PER_COL);
    }

    #[test]
    fn rects_are_clipped() {
        let map = StageMap::new(Rect::new(0, 0, 40, 20));
        assert_eq!(map.rect_at(0.0, 0.0, 10, 4), Some(Rect::new(15, 8, 10, 4)));
        let edge = map.rect_at(-160.0, 0.0, 10, 4).unwrap();
        assert_eq!(edge.x, 0);
        assert_eq!(edge.width, 5);
        assert_eq!(map.rect_at(-1000.0, 0.0, 10, 4), None);
    }
}
