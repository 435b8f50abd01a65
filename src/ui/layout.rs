//! Layout helpers: split the terminal area into regions.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Primary screen layout: section tabs, the animated stage, the position
/// dots and a bottom status bar.
pub struct AppLayout {
    pub nav_area: Rect,
    pub stage_area: Rect,
    pub dots_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // section tabs
                Constraint::Min(3),    // stage (takes all remaining space)
                Constraint::Length(1), // dots
                Constraint::Length(1), // status bar
            ])
            .split(area);

        Self {
            nav_area: chunks[0],
            stage_area: chunks[1],
            dots_area: chunks[2],
            status_area: chunks[3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_takes_the_remaining_rows() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.nav_area, Rect::new(0, 0, 80, 1));
        assert_eq!(layout.stage_area, Rect::new(0, 1, 80, 21));
        assert_eq!(layout.dots_area.y, 22);
        assert_eq!(layout.status_area.y, 23);
    }
}
