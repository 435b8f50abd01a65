//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use std::time::{Duration, Instant};

use ratatui::layout::Rect;

use super::asset_runtime::AssetCache;
use super::event::EventSender;
use super::section::{MountCtx, Section, SectionView};
use crate::config::AppConfig;
use crate::core::item::{demo_gallery, Item, Media};
use crate::ui::contact_form::ContactHitZones;
use crate::ui::layout::AppLayout;
use crate::ui::lightbox::LightboxHitZones;
use crate::ui::loader::LOADER_DURATION;
use crate::ui::stage::StageMap;

/// Frames longer than this are treated as this long (e.g. after a stall).
const MAX_FRAME_DT: Duration = Duration::from_millis(100);
/// Share of the stage the active card may occupy before zooming out.
const STACK_FILL: f64 = 0.9;

/// Which view / overlay is currently active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActiveView {
    #[default]
    Main,
    SettingsMenu,
    ControlsSubmenu,
    Lightbox,
}

/// Clickable regions recorded by the last draw.
#[derive(Debug, Clone, Default)]
pub struct HitZones {
    pub tabs: Vec<(Section, Rect)>,
    /// Back to front; hit-test in reverse.
    pub cards: Vec<(usize, Rect)>,
    pub dots: Vec<(usize, Rect)>,
    pub tiles: Vec<(usize, Rect)>,
    /// Photo grid slots, in tile order.
    pub gallery: Vec<(usize, Rect)>,
    pub contact: ContactHitZones,
}

/// Top-level application state.
pub struct AppState {
    pub config: AppConfig,
    /// Card-stack items.
    pub items: Vec<Item>,
    /// Tools showcase tiles.
    pub tools: Vec<Item>,
    /// Photo grid tiles.
    pub gallery: Vec<Item>,
    /// The mounted section.
    pub view: SectionView,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// An optional status message shown in the bottom bar.
    pub status_message: Option<String>,
    /// Which view / overlay is currently shown.
    pub active_view: ActiveView,
    /// Currently highlighted item in the settings menu.
    pub settings_selected: usize,
    /// Currently highlighted item in the controls submenu.
    pub controls_selected: usize,
    /// When `true`, the controls submenu is waiting for the user to press
    /// a key to rebind the action at `controls_selected`.
    pub awaiting_rebind: bool,
    /// Runtime pause toggled from the keyboard; not persisted.
    pub autoplay_paused: bool,
    pub terminal_area: Rect,
    pub assets: AssetCache,
    pub events: EventSender,
    pub hits: HitZones,
    pub lightbox_hit_zones: Option<LightboxHitZones>,
    /// Last left-clicked card and click time, for double-click.
    pub last_left_click: Option<(usize, Instant)>,
    /// Splash is shown until then.
    pub loader_until: Option<Instant>,
    /// Frame counter (drives spinners).
    pub tick: u64,
    pub last_frame: Instant,
    pub started_at: Instant,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        items: Vec<Item>,
        tools: Vec<Item>,
        events: EventSender,
        terminal_area: Rect,
        section: Section,
        now: Instant,
    ) -> Self {
        let loader_until = (!config.reduced_motion).then(|| now + LOADER_DURATION);
        let gallery = if config.gallery.items.is_empty() {
            demo_gallery()
        } else {
            config.gallery.items.clone()
        };
        let view = {
            let ctx = MountCtx {
                config: &config,
                items_len: items.len(),
                tools_len: tools.len(),
                gallery_len: gallery.len(),
                events: &events,
                viewport: StageMap::new(AppLayout::from_area(terminal_area).stage_area).viewport(),
                now,
            };
            SectionView::mount(section, &ctx)
        };
        Self {
            config,
            items,
            tools,
            gallery,
            view,
            should_quit: false,
            status_message: None,
            active_view: ActiveView::default(),
            settings_selected: 0,
            controls_selected: 0,
            awaiting_rebind: false,
            autoplay_paused: false,
            terminal_area,
            assets: AssetCache::default(),
            events,
            hits: HitZones::default(),
            lightbox_hit_zones: None,
            last_left_click: None,
            loader_until,
            tick: 0,
            last_frame: now,
            started_at: now,
        }
    }

    pub fn layout(&self) -> AppLayout {
        AppLayout::from_area(self.terminal_area)
    }

    /// Pixel mapping of the card stage; zooms out so the active card fits.
    pub fn stack_map(&self) -> StageMap {
        let fan = &self.config.stack.fan;
        StageMap::fitting(
            self.layout().stage_area,
            fan.effective_width(),
            fan.effective_height(),
            STACK_FILL,
        )
    }

    /// Pixel mapping of the tools stage (never zoomed).
    pub fn tools_map(&self) -> StageMap {
        StageMap::new(self.layout().stage_area)
    }

    pub fn section(&self) -> Section {
        self.view.section()
    }

    pub fn is_loading(&self) -> bool {
        self.loader_until.is_some()
    }

    pub fn skip_loader(&mut self) {
        if self.loader_until.take().is_some() {
            tracing::debug!("loader skipped");
        }
    }

    pub fn autoplay_enabled(&self) -> bool {
        self.config.stack.autoplay && !self.autoplay_paused
    }

    /// Unmount the current section and mount `section` from scratch.
    pub fn switch_section(&mut self, section: Section, now: Instant) {
        if section == self.section() {
            return;
        }
        self.mount(section, now);
        self.hits = HitZones::default();
        self.last_left_click = None;
        if self.active_view == ActiveView::Lightbox {
            self.active_view = ActiveView::Main;
        }
    }

    /// Remount the current section, e.g. after motion settings changed.
    pub fn remount(&mut self, now: Instant) {
        self.mount(self.section(), now);
    }

    fn mount(&mut self, section: Section, now: Instant) {
        let ctx = MountCtx {
            config: &self.config,
            items_len: self.items.len(),
            tools_len: self.tools.len(),
            gallery_len: self.gallery.len(),
            events: &self.events,
            viewport: self.tools_map().viewport(),
            now,
        };
        self.view = SectionView::mount(section, &ctx);
    }

    /// Advance one animation frame.
    pub fn on_tick(&mut self, now: Instant) {
        let dt = now.saturating_duration_since(self.last_frame).min(MAX_FRAME_DT);
        self.last_frame = now;
        self.tick = self.tick.wrapping_add(1);

        if self.loader_until.is_some_and(|until| now >= until) {
            self.loader_until = None;
        }

        let viewport = self.tools_map().viewport();
        if let SectionView::Tools(tools) = &mut self.view {
            if tools.viewport() != viewport {
                tools.set_viewport(viewport);
            }
        }
        let autoplay = self.autoplay_enabled();
        self.view.frame(now, dt, &self.config, autoplay);
    }

    pub fn on_resize(&mut self, width: u16, height: u16) {
        self.terminal_area = Rect::new(0, 0, width, height);
    }

    /// The active card's item, when the stack is mounted.
    pub fn active_item(&self) -> Option<&Item> {
        match &self.view {
            SectionView::Stack(stack) => stack.carousel.active().and_then(|i| self.items.get(i)),
            _ => None,
        }
    }

    /// Ask the decoder for every image the cards, the photo grid and the
    /// about portrait show.
    pub fn request_assets(&mut self) {
        for item in self.items.iter().chain(&self.gallery) {
            if let Media::Image(path) = &item.media {
                self.assets.request(path, &self.events);
            }
        }
        if let Some(portrait) = &self.config.about.portrait {
            self.assets.request(portrait, &self.events);
        }
    }

    /// Follow an item link: `#section` anchors switch sections, anything
    /// else goes to the system opener.
    pub fn follow_link(&mut self, href: &str, now: Instant) {
        if let Some(section) = Section::from_anchor(href) {
            self.switch_section(section, now);
            return;
        }
        match open::that_detached(href) {
            Ok(()) => {
                tracing::info!("opened {href}");
                self.status_message = Some(format!("Opened {href}"));
            }
            Err(e) => {
                tracing::warn!("cannot open {href}: {e}");
                self.status_message = Some(format!("Cannot open {href}"));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::event::AppEvent;
    use crate::core::item::{demo_items, demo_tools};
    use tokio::sync::mpsc;

    fn state(section: Section) -> (AppState, mpsc::UnboundedReceiver<AppEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let config = AppConfig::default();
        let now = Instant::now();
        let state = AppState::new(
            config,
            demo_items(),
            demo_tools(),
            tx,
            Rect::new(0, 0, 120, 40),
            section,
            now,
        );
        (state, rx)
    }

    #[test]
    fn switching_sections_remounts() {
        let (mut state, _rx) = state(Section::Hero);
        assert_eq!(state.section(), Section::Hero);
        assert!(state.active_item().is_none());

        let now = Instant::now();
        state.switch_section(Section::Stack, now);
        assert_eq!(state.section(), Section::Stack);
        assert_eq!(state.active_item().map(|i| i.id.as_str()), state.items.first().map(|i| i.id.as_str()));
    }

    #[test]
    fn anchors_switch_sections() {
        let (mut state, _rx) = state(Section::Stack);
        state.follow_link("#contact", Instant::now());
        assert_eq!(state.section(), Section::Contact);
    }

    #[test]
    fn loader_expires() {
        let (mut state, _rx) = state(Section::Hero);
        assert!(state.is_loading());
        state.on_tick(state.started_at + LOADER_DURATION);
        assert!(!state.is_loading());
    }

    #[test]
    fn gallery_falls_back_to_demo_tiles() {
        let (state, _rx) = state(Section::Gallery);
        assert_eq!(state.gallery.len(), demo_gallery().len());
        assert_eq!(state.section(), Section::Gallery);
    }

    #[tokio::test]
    async fn assets_cover_cards_and_photos() {
        let (mut state, _rx) = state(Section::Hero);
        state.items[0].media = Media::Image("cover.png".into());
        state.request_assets();
        assert!(state.assets.get(std::path::Path::new("cover.png")).is_some());
        for tile in &state.gallery {
            let path = tile.media.image_path().unwrap();
            assert!(state.assets.get(path).is_some());
        }
    }
}
