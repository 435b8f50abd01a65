//! Settings menu model (data only).
//!
//! Keeping these definitions outside the input handler lets both the handler
//! and UI renderers consume the same source of truth without cross-importing.

use std::time::Instant;

use super::section::SectionView;
use super::state::{ActiveView, AppState};

/// A single item in the settings menu.
pub enum SettingsItem {
    /// Opens a submenu.
    Submenu {
        label: &'static str,
        view: ActiveView,
    },
    /// Boolean toggle: reads/writes via accessors on `AppState`.
    Toggle {
        label: &'static str,
        get: fn(&AppState) -> bool,
        set: fn(&mut AppState, bool),
    },
    /// Cycles through a finite set of values.
    Cycle {
        label: &'static str,
        value: fn(&AppState) -> String,
        cycle: fn(&mut AppState),
    },
}

impl SettingsItem {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Submenu { label, .. }
            | Self::Toggle { label, .. }
            | Self::Cycle { label, .. } => label,
        }
    }
}

/// Next entry after `current` in `options`, or `options[fallback]` when
/// `current` is not one of them.
fn next_in<T: Copy + PartialEq>(options: &[T], current: T, fallback: usize) -> T {
    let idx = options.iter().position(|o| *o == current).unwrap_or(fallback);
    options[(idx + 1) % options.len()]
}

const INTERVALS_MS: &[u64] = &[1500, 2000, 2800, 4000, 6000];
const DOUBLE_CLICK_WINDOWS_MS: &[u64] = &[150, 200, 250, 300, 400, 500];

/// All items shown in the settings popup, in display order.
pub static SETTINGS_ITEMS: &[SettingsItem] = &[
    SettingsItem::Submenu {
        label: "Controls",
        view: ActiveView::ControlsSubmenu,
    },
    SettingsItem::Toggle {
        label: "Autoplay",
        get: |s| s.config.stack.autoplay,
        set: |s, v| {
            s.config.stack.autoplay = v;
            s.autoplay_paused = false;
            s.config.save_or_warn();
        },
    },
    SettingsItem::Toggle {
        label: "Loop",
        get: |s| s.config.stack.looping,
        set: |s, v| {
            s.config.stack.looping = v;
            if let SectionView::Stack(stack) = &mut s.view {
                stack.carousel.set_looping(v);
            }
            s.config.save_or_warn();
        },
    },
    SettingsItem::Toggle {
        label: "Pause On Hover",
        get: |s| s.config.stack.pause_on_hover,
        set: |s, v| {
            s.config.stack.pause_on_hover = v;
            s.config.save_or_warn();
        },
    },
    SettingsItem::Toggle {
        label: "Show Dots",
        get: |s| s.config.stack.show_dots,
        set: |s, v| {
            s.config.stack.show_dots = v;
            s.config.save_or_warn();
        },
    },
    SettingsItem::Toggle {
        label: "Reduced Motion",
        get: |s| s.config.reduced_motion,
        set: |s, v| {
            s.config.reduced_motion = v;
            s.config.save_or_warn();
            // Springs, intro and autoplay are set up at mount time.
            s.remount(Instant::now());
        },
    },
    SettingsItem::Cycle {
        label: "Autoplay Interval",
        value: |s| format!("{}ms", s.config.stack.interval_ms),
        cycle: |s| {
            let next = next_in(INTERVALS_MS, s.config.stack.interval_ms, 1);
            s.config.stack.interval_ms = next;
            if let SectionView::Stack(stack) = &mut s.view {
                stack.set_interval(next, Instant::now());
            }
            s.config.save_or_warn();
            s.status_message = Some(format!("Autoplay interval: {next}ms"));
        },
    },
    SettingsItem::Cycle {
        label: "Double-click Window",
        value: |s| format!("{}ms", s.config.double_click_ms),
        cycle: |s| {
            let next = next_in(DOUBLE_CLICK_WINDOWS_MS, s.config.double_click_ms, 2);
            s.config.double_click_ms = next;
            s.config.save_or_warn();
            s.status_message = Some(format!("Double-click window: {next}ms"));
        },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_wrap_and_recover_from_unknown_values() {
        assert_eq!(next_in(INTERVALS_MS, 2800, 1), 4000);
        assert_eq!(next_in(INTERVALS_MS, 6000, 1), 1500);
        assert_eq!(next_in(INTERVALS_MS, 1234, 1), 2800);
    }

    #[test]
    fn labels_are_unique() {
        let mut labels: Vec<&str> = SETTINGS_ITEMS.iter().map(SettingsItem::label).collect();
        labels.sort_unstable();
        labels.dedup();
        assert_eq!(labels.len(), SETTINGS_ITEMS.len());
    }
}
