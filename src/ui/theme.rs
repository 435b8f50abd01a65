//! Colour palette and text styles used across the UI.
//!
//! Stage colours are true-colour RGB so opacity can be expressed as a blend
//! toward the backdrop.

use ratatui::style::{Color, Modifier, Style};

/// Central theme: change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    pub const BACKDROP: (u8, u8, u8) = (16, 16, 20);
    pub const CARD_BG: (u8, u8, u8) = (36, 36, 44);
    pub const CARD_BORDER: (u8, u8, u8) = (120, 120, 140);
    pub const ACCENT: (u8, u8, u8) = (235, 64, 52);
    pub const TEXT: (u8, u8, u8) = (240, 240, 240);
    pub const MUTED: (u8, u8, u8) = (150, 150, 160);
    pub const LINK: (u8, u8, u8) = (96, 165, 250);

    /// Per-tile front colours for the tools showcase.
    const TILE_COLORS: &[(u8, u8, u8)] = &[
        (49, 168, 255),
        (153, 153, 255),
        (207, 150, 253),
        (255, 154, 0),
        (49, 168, 255),
        (230, 230, 230),
        (255, 97, 246),
        (120, 200, 120),
    ];

    /// `rgb` blended toward the backdrop by `opacity`.
    pub fn shade(rgb: (u8, u8, u8), opacity: f64) -> Color {
        let t = opacity.clamp(0.0, 1.0);
        let mix = |fg: u8, bg: u8| (bg as f64 + (fg as f64 - bg as f64) * t).round() as u8;
        let (br, bgc, bb) = Self::BACKDROP;
        Color::Rgb(mix(rgb.0, br), mix(rgb.1, bgc), mix(rgb.2, bb))
    }

    pub fn tile_color(index: usize) -> (u8, u8, u8) {
        Self::TILE_COLORS[index % Self::TILE_COLORS.len()]
    }

    // ── stage ──────────────────────────────────────────────────
    pub fn backdrop_style() -> Style {
        Style::default().bg(Self::shade(Self::BACKDROP, 1.0))
    }

    pub fn card_style(opacity: f64) -> Style {
        Style::default()
            .fg(Self::shade(Self::TEXT, opacity))
            .bg(Self::shade(Self::CARD_BG, opacity))
    }

    pub fn card_border_style(opacity: f64, active: bool) -> Style {
        let rgb = if active { Self::ACCENT } else { Self::CARD_BORDER };
        Self::card_style(opacity).fg(Self::shade(rgb, opacity))
    }

    pub fn card_title_style(opacity: f64) -> Style {
        Self::card_style(opacity).add_modifier(Modifier::BOLD)
    }

    pub fn card_muted_style(opacity: f64) -> Style {
        Self::card_style(opacity).fg(Self::shade(Self::MUTED, opacity))
    }

    pub fn tag_style(opacity: f64) -> Style {
        Self::card_style(opacity)
            .fg(Self::shade(Self::ACCENT, opacity))
            .add_modifier(Modifier::BOLD)
    }

    pub fn cta_style(opacity: f64) -> Style {
        Self::card_style(opacity)
            .fg(Self::shade(Self::LINK, opacity))
            .add_modifier(Modifier::BOLD)
    }

    pub fn headline_style(opacity: f64) -> Style {
        Self::backdrop_style()
            .fg(Self::shade(Self::TEXT, opacity))
            .add_modifier(Modifier::BOLD)
    }

    pub fn caption_style(opacity: f64) -> Style {
        Self::backdrop_style().fg(Self::shade(Self::MUTED, opacity))
    }

    /// Small accent headings on the backdrop.
    pub fn label_style(opacity: f64) -> Style {
        Self::backdrop_style()
            .fg(Self::shade(Self::ACCENT, opacity))
            .add_modifier(Modifier::BOLD)
    }

    // ── chrome ─────────────────────────────────────────────────
    pub fn border_style() -> Style {
        Style::default().fg(Color::Gray)
    }

    pub fn nav_style() -> Style {
        Style::default().bg(Color::Black).fg(Color::Gray)
    }

    pub fn nav_active_style() -> Style {
        Style::default()
            .bg(Color::Black)
            .fg(Self::shade(Self::ACCENT, 1.0))
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    }

    pub fn title_style() -> Style {
        Style::default()
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn dot_style(active: bool) -> Style {
        if active {
            Style::default().fg(Self::shade(Self::ACCENT, 1.0))
        } else {
            Style::default().fg(Color::DarkGray)
        }
    }

    pub fn input_style(focused: bool) -> Style {
        if focused {
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        }
    }

    pub fn error_style() -> Style {
        Style::default().fg(Color::LightRed)
    }

    pub fn success_style() -> Style {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    }
}
