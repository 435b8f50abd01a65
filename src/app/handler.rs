//! Input handling: maps key/mouse events to state mutations.

use std::time::{Duration, Instant};

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::Rect;

use crate::config::{Action, KeyBind};
use crate::core::contact::Field;

use super::section::{Section, SectionView, SCROLL_STEP_PX};
use super::settings::{SettingsItem, SETTINGS_ITEMS};
use super::state::{ActiveView, AppState};

/// Total selectable rows in the controls submenu (actions + "Reset").
pub fn controls_item_count() -> usize {
    Action::ALL.len() + 1
}

/// Process a key event, dispatching based on the active view.
pub fn handle_key(state: &mut AppState, key: KeyEvent) {
    // Ctrl+c always quits, regardless of view.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    // Any key skips the splash.
    if state.is_loading() {
        state.skip_loader();
        return;
    }

    match state.active_view {
        ActiveView::Main => handle_main_key(state, key),
        ActiveView::SettingsMenu => handle_settings_key(state, key),
        ActiveView::ControlsSubmenu => {
            if state.awaiting_rebind {
                handle_rebind_key(state, key);
            } else {
                handle_controls_key(state, key);
            }
        }
        ActiveView::Lightbox => handle_lightbox_key(state, key),
    }
}

// ── Main view (configurable bindings) ───────────────────────────

fn handle_main_key(state: &mut AppState, key: KeyEvent) {
    let now = Instant::now();

    // The contact form swallows typing before bindings are consulted.
    if handle_contact_key(state, key, now) {
        return;
    }

    // Number keys jump straight to a section.
    if let KeyCode::Char(c @ '1'..='6') = key.code {
        if key.modifiers.is_empty() {
            let idx = (c as usize) - ('1' as usize);
            state.switch_section(Section::ALL[idx], now);
            return;
        }
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };

    match action {
        Action::Quit => state.should_quit = true,
        Action::OpenSettings => {
            state.active_view = ActiveView::SettingsMenu;
            state.settings_selected = 0;
        }
        Action::NextSection => {
            let next = state.section().next();
            state.switch_section(next, now);
        }
        Action::PrevSection => {
            let prev = state.section().prev();
            state.switch_section(prev, now);
        }
        Action::Prev | Action::Next => {
            let direction = if action == Action::Next { 1 } else { -1 };
            if let SectionView::Stack(stack) = &mut state.view {
                stack.carousel.advance(direction);
            }
        }
        Action::First | Action::Last => {
            if let SectionView::Stack(stack) = &mut state.view {
                let target = if action == Action::First {
                    0
                } else {
                    stack.carousel.len() as i64 - 1
                };
                stack.carousel.go_to(target);
            }
        }
        Action::ScrollUp | Action::ScrollDown => {
            let delta = if action == Action::ScrollDown {
                SCROLL_STEP_PX
            } else {
                -SCROLL_STEP_PX
            };
            scroll(state, delta);
        }
        Action::OpenLink => open_active_link(state, now),
        Action::OpenLightbox => {
            if state.active_item().is_some() {
                state.active_view = ActiveView::Lightbox;
            }
        }
        Action::ToggleAutoplay => {
            state.autoplay_paused = !state.autoplay_paused;
            state.status_message = Some(
                if state.autoplay_enabled() {
                    "Autoplay on"
                } else {
                    "Autoplay paused"
                }
                .to_string(),
            );
        }
    }
}

/// Typing into the contact form.  Returns `true` when the key was used.
fn handle_contact_key(state: &mut AppState, key: KeyEvent, now: Instant) -> bool {
    let SectionView::Contact(contact) = &mut state.view else {
        return false;
    };
    if key.kind == KeyEventKind::Release {
        return false;
    }
    let form = &mut contact.form;
    let plain = !key
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT);

    match key.code {
        KeyCode::Tab | KeyCode::Down => form.focus_next(),
        KeyCode::BackTab | KeyCode::Up => form.focus_prev(),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Enter if key.modifiers.contains(KeyModifiers::ALT) => form.insert_char('\n'),
        KeyCode::Enter if form.focus() != Field::Message => form.focus_next(),
        KeyCode::Enter => submit_contact(state, now),
        KeyCode::Char(c) if plain => form.insert_char(c),
        _ => return false,
    }
    true
}

fn submit_contact(state: &mut AppState, now: Instant) {
    let SectionView::Contact(contact) = &mut state.view else {
        return;
    };
    state.status_message = Some(match contact.form.submit(now) {
        Ok(()) => "Message sent".to_string(),
        Err(rejection) => rejection.message().to_string(),
    });
}

fn scroll(state: &mut AppState, delta: f64) {
    match &mut state.view {
        SectionView::Tools(tools) => tools.scroll.scroll_by(delta),
        SectionView::Stack(stack) => stack.carousel.advance(delta.signum() as i64),
        _ => {}
    }
}

fn open_active_link(state: &mut AppState, now: Instant) {
    let Some(href) = state.active_item().and_then(|item| item.href.clone()) else {
        state.status_message = Some("No link on this card".to_string());
        return;
    };
    state.follow_link(&href, now);
}

// ── Settings menu (hardcoded keys) ──────────────────────────────

fn handle_settings_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('?') => {
            state.active_view = ActiveView::Main;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.settings_selected = state.settings_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.settings_selected + 1 < SETTINGS_ITEMS.len() {
                state.settings_selected += 1;
            }
        }
        KeyCode::Enter | KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
            if let Some(item) = SETTINGS_ITEMS.get(state.settings_selected) {
                match item {
                    SettingsItem::Submenu { view, .. } => {
                        state.active_view = *view;
                        state.controls_selected = 0;
                    }
                    SettingsItem::Toggle { get, set, .. } => {
                        let current = get(state);
                        set(state, !current);
                    }
                    SettingsItem::Cycle { cycle, .. } => {
                        cycle(state);
                    }
                }
            }
        }
        _ => {}
    }
}

// ── Controls submenu (hardcoded navigation, interactive rebinding) ──

fn handle_controls_key(state: &mut AppState, key: KeyEvent) {
    let item_count = controls_item_count();

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => {
            state.active_view = ActiveView::Main;
        }
        KeyCode::Left | KeyCode::Char('h') => {
            state.active_view = ActiveView::SettingsMenu;
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.controls_selected = state.controls_selected.saturating_sub(1);
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if state.controls_selected < item_count - 1 {
                state.controls_selected += 1;
            }
        }
        KeyCode::Enter => {
            if state.controls_selected < Action::ALL.len() {
                // Start rebinding the selected action.
                state.awaiting_rebind = true;
            } else {
                // "Reset to defaults" item.
                state.config.reset_defaults();
                state.config.save_or_warn();
            }
        }
        KeyCode::Delete | KeyCode::Backspace => {
            // Clear all bindings for the selected action.
            if let Some(&action) = Action::ALL.get(state.controls_selected) {
                state.config.bindings.insert(action, Vec::new());
                state.config.save_or_warn();
            }
        }
        _ => {}
    }
}

/// Capture the next key press as a new binding.
fn handle_rebind_key(state: &mut AppState, key: KeyEvent) {
    // Only process Press events (ignore Release/Repeat on supported terminals).
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Esc cancels rebinding.
    if key.code == KeyCode::Esc {
        state.awaiting_rebind = false;
        return;
    }

    let Some(&action) = Action::ALL.get(state.controls_selected) else {
        state.awaiting_rebind = false;
        return;
    };
    state.config.add_binding(action, KeyBind::from_key_event(key));
    state.config.save_or_warn();
    state.awaiting_rebind = false;
}

// ── Lightbox ────────────────────────────────────────────────────

fn handle_lightbox_key(state: &mut AppState, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('x') | KeyCode::Enter => {
            state.active_view = ActiveView::Main;
        }
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Up | KeyCode::Char('k') => {
            lightbox_step(state, -1);
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Down | KeyCode::Char('j') => {
            lightbox_step(state, 1);
        }
        KeyCode::Char('o') => open_active_link(state, Instant::now()),
        _ => {}
    }
}

fn handle_lightbox_mouse(state: &mut AppState, mouse: MouseEvent) {
    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
        if let Some(zones) = state.lightbox_hit_zones {
            if point_in_rect(zones.close_rect, mouse.column, mouse.row) {
                state.active_view = ActiveView::Main;
                return;
            }
            if point_in_rect(zones.prev_rect, mouse.column, mouse.row) {
                lightbox_step(state, -1);
                return;
            }
            if point_in_rect(zones.next_rect, mouse.column, mouse.row) {
                lightbox_step(state, 1);
            }
        }
    }
}

/// The lightbox follows the carousel.
fn lightbox_step(state: &mut AppState, direction: i64) {
    if let SectionView::Stack(stack) = &mut state.view {
        stack.carousel.advance(direction);
    }
}

// ── Mouse ───────────────────────────────────────────────────────

/// Process a mouse event.
pub fn handle_mouse(state: &mut AppState, mouse: MouseEvent) {
    if state.is_loading() {
        if let MouseEventKind::Down(_) = mouse.kind {
            state.skip_loader();
        }
        return;
    }
    if state.active_view == ActiveView::Lightbox {
        handle_lightbox_mouse(state, mouse);
        return;
    }
    if state.active_view != ActiveView::Main {
        return;
    }

    let now = Instant::now();
    let (col, row) = (mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if let Some(&(section, _)) = state
                .hits
                .tabs
                .iter()
                .find(|(_, r)| point_in_rect(*r, col, row))
            {
                state.switch_section(section, now);
                return;
            }
            match state.section() {
                Section::Hero => {
                    if point_in_rect(state.layout().stage_area, col, row) {
                        state.switch_section(Section::Stack, now);
                    }
                }
                Section::About => {}
                Section::Stack => handle_stack_press(state, col, row, now),
                Section::Tools => handle_tools_press(state, col, row, now),
                Section::Gallery => handle_gallery_press(state, col, row, now),
                Section::Contact => handle_contact_press(state, col, row, now),
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            let map = state.stack_map();
            if let SectionView::Stack(stack) = &mut state.view {
                stack.update_drag(map.to_px(col, row).0, now);
            }
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let card_width = state.config.stack.fan.effective_width();
            if let SectionView::Stack(stack) = &mut state.view {
                stack.end_drag(card_width);
            }
        }
        MouseEventKind::Moved => handle_hover(state, col, row),
        MouseEventKind::ScrollDown => scroll(state, SCROLL_STEP_PX),
        MouseEventKind::ScrollUp => scroll(state, -SCROLL_STEP_PX),
        _ => {}
    }
}

fn handle_stack_press(state: &mut AppState, col: u16, row: u16, now: Instant) {
    if let Some(&(index, _)) = state.hits.dots.iter().find(|(_, r)| point_in_rect(*r, col, row)) {
        if let SectionView::Stack(stack) = &mut state.view {
            stack.carousel.go_to(index as i64);
        }
        return;
    }

    // Topmost card under the pointer.
    let Some(&(index, _)) = state
        .hits
        .cards
        .iter()
        .rev()
        .find(|(_, r)| point_in_rect(*r, col, row))
    else {
        return;
    };

    let map = state.stack_map();
    let reduced = state.config.reduced_motion;
    let double_click = Duration::from_millis(state.config.double_click_ms);
    let is_repeat = state
        .last_left_click
        .is_some_and(|(last, at)| last == index && now.duration_since(at) <= double_click);

    let SectionView::Stack(stack) = &mut state.view else {
        return;
    };
    if stack.carousel.active() != Some(index) {
        stack.carousel.go_to(index as i64);
        state.last_left_click = Some((index, now));
        return;
    }
    stack.begin_drag(map.to_px(col, row).0, now, reduced);

    if is_repeat {
        state.last_left_click = None;
        open_active_link(state, now);
    } else {
        state.last_left_click = Some((index, now));
    }
}

fn handle_tools_press(state: &mut AppState, col: u16, row: u16, now: Instant) {
    let Some(&(index, _)) = state
        .hits
        .tiles
        .iter()
        .rev()
        .find(|(_, r)| point_in_rect(*r, col, row))
    else {
        return;
    };
    let Some(tool) = state.tools.get(index) else {
        return;
    };
    match tool.href.clone() {
        Some(href) => state.follow_link(&href, now),
        None => state.status_message = Some(tool.title.clone()),
    }
}

fn handle_gallery_press(state: &mut AppState, col: u16, row: u16, now: Instant) {
    let Some(&(index, _)) = state.hits.gallery.iter().find(|(_, r)| point_in_rect(*r, col, row))
    else {
        return;
    };
    let Some(tile) = state.gallery.get(index) else {
        return;
    };
    match tile.href.clone() {
        Some(href) => state.follow_link(&href, now),
        None => state.status_message = Some(tile.title.clone()),
    }
}

fn handle_contact_press(state: &mut AppState, col: u16, row: u16, now: Instant) {
    let zones = &state.hits.contact;
    if zones.submit.is_some_and(|r| point_in_rect(r, col, row)) {
        submit_contact(state, now);
        return;
    }
    let field = zones
        .fields
        .iter()
        .find(|(_, r)| point_in_rect(*r, col, row))
        .map(|(f, _)| *f);
    if let (Some(field), SectionView::Contact(contact)) = (field, &mut state.view) {
        contact.form.set_focus(field);
    }
}

fn handle_hover(state: &mut AppState, col: u16, row: u16) {
    match state.section() {
        Section::Stack => {
            let inside = state.stack_map().contains(col, row);
            let hovered = state
                .hits
                .cards
                .iter()
                .rev()
                .find(|(_, r)| point_in_rect(*r, col, row))
                .map(|(i, _)| *i);
            if let SectionView::Stack(stack) = &mut state.view {
                stack.hovering = inside;
                stack.hovered_card = hovered;
            }
        }
        Section::Tools => {
            let map = state.tools_map();
            let amplitude = state.config.tools.morph.parallax_px;
            let hovered = state
                .hits
                .tiles
                .iter()
                .rev()
                .find(|(_, r)| point_in_rect(*r, col, row))
                .map(|(i, _)| *i);
            if let SectionView::Tools(tools) = &mut state.view {
                if map.contains(col, row) {
                    tools.point_at(map.x_from_left(col), map.width_px(), amplitude);
                }
                tools.hovered = hovered;
            }
        }
        _ => {}
    }
}

// ── helpers ─────────────────────────────────────────────────────

fn point_in_rect(area: Rect, col: u16, row: u16) -> bool {
    col >= area.x
        && col < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::item::{demo_items, demo_tools};
    use tokio::sync::mpsc;

    fn state(section: Section) -> AppState {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut config = AppConfig::default();
        // Keep tests away from the user's config file.
        config.path = std::env::temp_dir().join("showreel-handler-test.toml");
        let mut state = AppState::new(
            config,
            demo_items(),
            demo_tools(),
            tx,
            Rect::new(0, 0, 120, 40),
            section,
            Instant::now(),
        );
        state.skip_loader();
        state
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn click(state: &mut AppState, column: u16, row: u16) {
        handle_mouse(state, mouse(MouseEventKind::Down(MouseButton::Left), column, row));
    }

    fn active(state: &AppState) -> Option<usize> {
        match &state.view {
            SectionView::Stack(stack) => stack.carousel.active(),
            _ => None,
        }
    }

    #[test]
    fn first_key_only_skips_the_loader() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut state = AppState::new(
            AppConfig::default(),
            demo_items(),
            demo_tools(),
            tx,
            Rect::new(0, 0, 120, 40),
            Section::Hero,
            Instant::now(),
        );
        handle_key(&mut state, press(KeyCode::Char('q')));
        assert!(!state.should_quit);
        assert!(!state.is_loading());
        handle_key(&mut state, press(KeyCode::Char('q')));
        assert!(state.should_quit);
    }

    #[test]
    fn arrows_move_the_carousel() {
        let mut state = state(Section::Stack);
        handle_key(&mut state, press(KeyCode::Right));
        assert_eq!(active(&state), Some(1));
        handle_key(&mut state, press(KeyCode::Left));
        handle_key(&mut state, press(KeyCode::Left));
        // Looping by default.
        assert_eq!(active(&state), Some(state.items.len() - 1));
        handle_key(&mut state, press(KeyCode::Home));
        assert_eq!(active(&state), Some(0));
    }

    #[test]
    fn tab_and_number_keys_switch_sections() {
        let mut state = state(Section::Hero);
        handle_key(&mut state, press(KeyCode::Tab));
        assert_eq!(state.section(), Section::About);
        handle_key(&mut state, press(KeyCode::Char('4')));
        assert_eq!(state.section(), Section::Tools);
        handle_key(&mut state, press(KeyCode::Char('5')));
        assert_eq!(state.section(), Section::Gallery);
        handle_key(&mut state, press(KeyCode::BackTab));
        assert_eq!(state.section(), Section::Tools);
    }

    #[test]
    fn contact_form_captures_typing() {
        let mut state = state(Section::Contact);
        for c in "q1".chars() {
            handle_key(&mut state, press(KeyCode::Char(c)));
        }
        assert!(!state.should_quit);
        assert_eq!(state.section(), Section::Contact);
        let SectionView::Contact(contact) = &state.view else {
            panic!("contact not mounted");
        };
        assert_eq!(contact.form.name, "q1");

        handle_key(&mut state, press(KeyCode::Tab));
        handle_key(&mut state, press(KeyCode::Tab));
        handle_key(&mut state, press(KeyCode::Enter));
        assert_eq!(
            state.status_message.as_deref(),
            Some("Please enter a valid email")
        );
    }

    #[test]
    fn lightbox_navigates_the_carousel() {
        let mut state = state(Section::Stack);
        handle_key(&mut state, press(KeyCode::Enter));
        assert_eq!(state.active_view, ActiveView::Lightbox);
        handle_key(&mut state, press(KeyCode::Right));
        assert_eq!(active(&state), Some(1));
        handle_key(&mut state, press(KeyCode::Esc));
        assert_eq!(state.active_view, ActiveView::Main);
    }

    #[test]
    fn wheel_scrubs_the_tools_morph() {
        let mut state = state(Section::Tools);
        let wheel = MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 10,
            row: 10,
            modifiers: KeyModifiers::NONE,
        };
        handle_mouse(&mut state, wheel);
        let SectionView::Tools(tools) = &state.view else {
            panic!("tools not mounted");
        };
        assert_eq!(tools.scroll.offset(), SCROLL_STEP_PX);
    }

    #[test]
    fn rebinding_replaces_conflicts() {
        let mut state = state(Section::Stack);
        state.active_view = ActiveView::ControlsSubmenu;
        state.controls_selected = Action::ALL
            .iter()
            .position(|a| *a == Action::OpenLink)
            .unwrap_or(0);
        handle_key(&mut state, press(KeyCode::Enter));
        assert!(state.awaiting_rebind);
        handle_key(&mut state, press(KeyCode::Char('h')));
        assert!(!state.awaiting_rebind);
        assert_eq!(state.config.match_key(press(KeyCode::Char('h'))), Some(Action::OpenLink));
    }

    #[test]
    fn clicking_side_cards_brings_them_forward() {
        let mut state = state(Section::Stack);
        let last = state.items.len() - 1;
        // Back to front, as the stack widget records them.
        state.hits.cards = vec![
            (last, Rect::new(20, 10, 12, 8)),
            (1, Rect::new(70, 10, 12, 8)),
            (0, Rect::new(40, 8, 24, 12)),
        ];

        click(&mut state, 22, 12);
        assert_eq!(active(&state), Some(last));
        click(&mut state, 80, 12);
        assert_eq!(active(&state), Some(1));
        // Overlap goes to the topmost card.
        state.hits.cards.push((2, Rect::new(70, 10, 4, 4)));
        click(&mut state, 71, 11);
        assert_eq!(active(&state), Some(2));
    }

    #[test]
    fn clicking_a_dot_jumps_to_its_card() {
        let mut state = state(Section::Stack);
        state.hits.dots = (0..state.items.len())
            .map(|i| (i, Rect::new(50 + 2 * i as u16, 36, 1, 1)))
            .collect();
        click(&mut state, 56, 36);
        assert_eq!(active(&state), Some(3));
        // Between dots: nothing happens.
        click(&mut state, 57, 36);
        assert_eq!(active(&state), Some(3));
    }

    #[test]
    fn press_drag_release_swipes_through_the_handler() {
        let mut state = state(Section::Stack);
        state.hits.cards = vec![(0, Rect::new(40, 8, 40, 16))];

        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 70, 15));
        let SectionView::Stack(stack) = &state.view else {
            panic!("stack not mounted");
        };
        assert!(stack.is_dragging());

        handle_mouse(&mut state, mouse(MouseEventKind::Drag(MouseButton::Left), 55, 15));
        handle_mouse(&mut state, mouse(MouseEventKind::Drag(MouseButton::Left), 40, 15));
        handle_mouse(&mut state, mouse(MouseEventKind::Up(MouseButton::Left), 40, 15));
        assert_eq!(active(&state), Some(1));

        // A tiny wiggle on the new active card snaps back.
        state.hits.cards = vec![(1, Rect::new(40, 8, 40, 16))];
        state.last_left_click = None;
        handle_mouse(&mut state, mouse(MouseEventKind::Down(MouseButton::Left), 60, 15));
        handle_mouse(&mut state, mouse(MouseEventKind::Up(MouseButton::Left), 60, 15));
        assert_eq!(active(&state), Some(1));
    }

    #[test]
    fn gallery_tiles_follow_their_links() {
        let mut state = state(Section::Gallery);
        state.gallery[1].href = Some("#contact".to_string());
        state.hits.gallery = vec![(0, Rect::new(2, 4, 20, 10)), (1, Rect::new(24, 4, 20, 10))];

        click(&mut state, 5, 6);
        assert_eq!(state.section(), Section::Gallery);
        assert_eq!(state.status_message.as_deref(), Some(state.gallery[0].title.as_str()));

        click(&mut state, 30, 6);
        assert_eq!(state.section(), Section::Contact);
    }
}
