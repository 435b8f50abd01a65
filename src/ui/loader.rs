//! Startup splash: spinner, name and a progress bar that fills over
//! [`LOADER_DURATION`].

use std::time::Duration;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use super::theme::Theme;

pub const LOADER_DURATION: Duration = Duration::from_millis(2500);

/// Braille-dot spinner frames.  Cycles through these on each tick.
const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
const BAR_WIDTH: u16 = 30;

pub struct Loader {
    /// Monotonically increasing tick counter (drives the spinner frame).
    pub tick: u64,
    pub elapsed: Duration,
}

impl Loader {
    fn progress(&self) -> f64 {
        (self.elapsed.as_secs_f64() / LOADER_DURATION.as_secs_f64()).clamp(0.0, 1.0)
    }
}

impl Widget for Loader {
    fn render(self, area: Rect, buf: &mut Buffer) {
        buf.set_style(area, Theme::backdrop_style());
        if area.width < BAR_WIDTH + 2 || area.height < 3 {
            return;
        }
        let frame = SPINNER_FRAMES[(self.tick as usize) % SPINNER_FRAMES.len()];
        let pct = (self.progress() * 100.0).round() as u16;
        let label = format!("{frame} SHOWREEL  {pct:>3}%");

        let cx = area.x + area.width / 2;
        let y = area.y + area.height / 2 - 1;
        let label_width = label.chars().count() as u16;
        buf.set_line(
            cx.saturating_sub(label_width / 2),
            y,
            &Line::from(Span::styled(
                label,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            label_width,
        );

        let filled = (self.progress() * BAR_WIDTH as f64).round() as u16;
        let bar: String = (0..BAR_WIDTH)
            .map(|i| if i < filled { '█' } else { '░' })
            .collect();
        buf.set_string(
            cx.saturating_sub(BAR_WIDTH / 2),
            y + 2,
            bar,
            Style::default().fg(Theme::shade(Theme::ACCENT, 1.0)),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_fills_with_elapsed_time() {
        let area = Rect::new(0, 0, 40, 10);
        let mut buf = Buffer::empty(area);
        Loader {
            tick: 0,
            elapsed: Duration::from_millis(1250),
        }
        .render(area, &mut buf);
        let bar: String = (5..35).map(|x| buf[(x, 6)].symbol().to_string()).collect();
        assert_eq!(bar.chars().filter(|c| *c == '█').count(), 15);
        let label: String = (0..40).map(|x| buf[(x, 4)].symbol().to_string()).collect();
        assert!(label.contains("50%"));
    }
}
