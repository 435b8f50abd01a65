//! Popup overlay widgets for the settings menu and controls submenu.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::app::settings::{SettingsItem, SETTINGS_ITEMS};
use crate::app::state::AppState;
use crate::config::{Action, AppConfig};

// ───────────────────────────────────────── settings popup ────

/// Settings menu popup overlay.
pub struct SettingsPopup<'a> {
    pub state: &'a AppState,
}

impl<'a> Widget for SettingsPopup<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = (SETTINGS_ITEMS.len() as u16) + 5;
        let popup = centered_fixed(44, height, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Settings ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));

        let inner = block.inner(popup);
        block.render(popup, buf);

        let mut lines = Vec::new();
        lines.push(Line::raw(""));
        for (i, item) in SETTINGS_ITEMS.iter().enumerate() {
            let (prefix, style) = if i == self.state.settings_selected {
                (
                    " ▸ ",
                    Style::default()
                        .fg(Color::White)
                        .bg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                ("   ", Style::default().fg(Color::White))
            };

            // Current value on the right: [ON]/[OFF] for toggles.
            let (suffix, suffix_style) = match item {
                SettingsItem::Submenu { .. } => (" ›".to_string(), Style::default().fg(Color::DarkGray)),
                SettingsItem::Toggle { get, .. } => {
                    if get(self.state) {
                        ("[ON]".to_string(), Style::default().fg(Color::Green))
                    } else {
                        ("[OFF]".to_string(), Style::default().fg(Color::DarkGray))
                    }
                }
                SettingsItem::Cycle { value, .. } => {
                    (format!("‹{}›", value(self.state)), Style::default().fg(Color::Yellow))
                }
            };

            let label_col = format!("{prefix}{:<24}", item.label());
            let width = (inner.width as usize).saturating_sub(label_col.chars().count()).max(1);
            lines.push(Line::from(vec![
                Span::styled(label_col, style),
                Span::styled(format!("{suffix:>width$}"), suffix_style),
            ]));
        }
        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled(
            "  Enter/Space: toggle  Esc: close",
            Style::default().fg(Color::DarkGray),
        )));

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── controls popup ────

const CONTROLS_WIDTH: u16 = 56;
/// Column where the key list starts.
const KEYS_COL: usize = 22;

/// Heading an action is listed under.
fn action_group(action: Action) -> &'static str {
    match action {
        Action::Prev | Action::Next | Action::First | Action::Last => "CARDS",
        Action::ScrollUp | Action::ScrollDown => "SCROLL & SCRUB",
        Action::OpenLink | Action::OpenLightbox | Action::ToggleAutoplay => "ACTIVE CARD",
        Action::PrevSection | Action::NextSection => "SECTIONS",
        Action::OpenSettings | Action::Quit => "APP",
    }
}

/// Key bindings overlay: actions grouped by what they drive, each with the
/// keys currently bound to it.
pub struct ControlsPopup<'a> {
    pub config: &'a AppConfig,
    pub selected: usize,
    pub awaiting_rebind: bool,
}

impl<'a> ControlsPopup<'a> {
    fn lines(&self) -> Vec<Line<'static>> {
        let heading = Style::default()
            .fg(Color::LightRed)
            .add_modifier(Modifier::BOLD);
        let dim = Style::default().fg(Color::DarkGray);
        let highlight = Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD);

        let mut lines = Vec::new();
        let mut group = "";
        for (i, &action) in Action::ALL.iter().enumerate() {
            if action_group(action) != group {
                if !group.is_empty() {
                    lines.push(Line::raw(""));
                }
                group = action_group(action);
                lines.push(Line::from(Span::styled(format!(" {group}"), heading)));
            }

            let selected = i == self.selected;
            let capturing = selected && self.awaiting_rebind;
            let keys = if capturing {
                "press a key, Esc cancels".to_string()
            } else {
                self.config.display_bindings(action)
            };
            let key_style = match (capturing, keys.as_str()) {
                (true, _) => Style::default().fg(Color::Yellow).add_modifier(Modifier::SLOW_BLINK),
                (false, "unbound") => dim,
                _ => Style::default().fg(Color::Yellow),
            };
            let label = format!("{} {:<w$}", if selected { " ›" } else { "  " }, action.label(), w = KEYS_COL - 3);
            let mut row = Line::from(vec![
                Span::styled(label, Style::default().fg(Color::White)),
                Span::styled(keys, key_style),
            ]);
            if selected {
                row = row.patch_style(highlight);
            }
            lines.push(row);
        }

        let reset_selected = self.selected == Action::ALL.len();
        lines.push(Line::raw(""));
        let mut reset = Line::from(Span::styled(
            format!("{} Restore default keys", if reset_selected { " ›" } else { "  " }),
            Style::default().fg(Color::White),
        ));
        if reset_selected {
            reset = reset.patch_style(highlight);
        }
        lines.push(reset);

        lines.push(Line::raw(""));
        lines.push(Line::from(Span::styled("  1-6 jump to a section; not rebindable", dim)));
        lines.push(Line::from(Span::styled(
            "  Enter bind · Del unbind · ← settings · Esc close",
            dim,
        )));
        lines
    }
}

impl<'a> Widget for ControlsPopup<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let lines = self.lines();
        let popup = centered_fixed(CONTROLS_WIDTH, lines.len() as u16 + 2, area);
        Clear.render(popup, buf);

        let block = Block::default()
            .title(" Key bindings ")
            .title_style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::DarkGray));
        let inner = block.inner(popup);
        block.render(popup, buf);

        Paragraph::new(lines).render(inner, buf);
    }
}

// ───────────────────────────────────────── helpers ───────────

/// Create a centered rectangle with fixed dimensions, clamped to the available area.
pub fn centered_fixed(width: u16, height: u16, area: Rect) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    let x = area.x + (area.width.saturating_sub(w)) / 2;
    let y = area.y + (area.height.saturating_sub(h)) / 2;
    Rect::new(x, y, w, h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centered_fixed_clamps_to_area() {
        let area = Rect::new(0, 0, 30, 10);
        assert_eq!(centered_fixed(20, 4, area), Rect::new(5, 3, 20, 4));
        assert_eq!(centered_fixed(50, 40, area), area);
    }

    #[test]
    fn controls_popup_prompts_while_rebinding() {
        let area = Rect::new(0, 0, 80, 30);
        let mut buf = Buffer::empty(area);
        let config = AppConfig::default();
        ControlsPopup {
            config: &config,
            selected: 0,
            awaiting_rebind: true,
        }
        .render(area, &mut buf);
        let text: String = (0..area.height)
            .flat_map(|y| (0..area.width).map(move |x| (x, y)))
            .map(|p| buf[p].symbol().to_string())
            .collect();
        assert!(text.contains("press a key"));
        assert!(text.contains("Restore default keys"));
    }

    #[test]
    fn controls_are_grouped_under_headings() {
        let config = AppConfig::default();
        let popup = ControlsPopup {
            config: &config,
            selected: 0,
            awaiting_rebind: false,
        };
        let rows: Vec<String> = popup
            .lines()
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect())
            .collect();
        let at = |needle: &str| rows.iter().position(|r| r.contains(needle));
        for heading in ["CARDS", "SCROLL & SCRUB", "ACTIVE CARD", "SECTIONS", "APP"] {
            assert!(at(heading).is_some(), "missing {heading}");
        }
        assert!(at("CARDS") < at("Next Card"));
        assert!(at("Next Card") < at("SECTIONS"));
        assert!(at("SECTIONS") < at("Next Section"));
        // The selected row is marked and shows its keys in the key column.
        let first = &rows[at("Previous Card").unwrap_or(0)];
        assert!(first.starts_with(" ›"));
        let keys: String = first.chars().skip(KEYS_COL).collect();
        assert!(keys.starts_with(&config.display_bindings(Action::Prev)));
    }
}
