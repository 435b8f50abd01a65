//! A terminal showreel: hero title, about page, card-stack carousel, tools
//! morph, photo grid and a contact form, animated in the terminal.
//!
//! Run the binary to launch; `--help` lists the overrides.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr, Stderr};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, widgets::Paragraph, Frame, Terminal};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    section::{Section, SectionView},
    state::{ActiveView, AppState},
};
use crate::config::AppConfig;
use crate::core::item::{self, Item};
use crate::ui::{
    about::AboutWidget,
    card_stack::{render_custom_key, CardStackWidget},
    chrome::{Dots, NavBar},
    contact_form::ContactFormWidget,
    gallery::GalleryWidget,
    hero::HeroWidget,
    lightbox::LightboxWidget,
    loader::Loader,
    popup,
    theme::Theme,
    tools_stage::ToolsStageWidget,
};

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Animated portfolio showreel for the terminal")]
struct Cli {
    /// Config file (defaults to `$XDG_CONFIG_HOME/showreel/config.toml`).
    #[arg(long)]
    config: Option<PathBuf>,

    /// TOML file with `[[items]]` tables for the card stack.
    #[arg(long, conflicts_with = "media_dir")]
    items: Option<PathBuf>,

    /// Build the card stack from the images and videos in this directory.
    #[arg(long)]
    media_dir: Option<PathBuf>,

    /// Snap every animation and skip the intro, loader and autoplay.
    #[arg(long)]
    reduced_motion: bool,

    #[arg(long)]
    no_autoplay: bool,

    /// Stop at the first and last card instead of wrapping.
    #[arg(long)]
    no_loop: bool,

    /// Autoplay interval in milliseconds (never faster than 700).
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Section shown at startup.
    #[arg(long, value_enum, default_value_t = Section::Hero)]
    section: Section,

    /// Write logs here instead of stderr.
    #[arg(long)]
    log_file: Option<PathBuf>,
}

type Tui = Terminal<CrosstermBackend<Stderr>>;

// ───────────────────────────────────────── setup ─────────────

fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    let filter = tracing_subscriber::EnvFilter::from_default_env();
    match log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr) // never pollute stdout
                .init();
        }
    }
    Ok(())
}

/// Card-stack items: CLI sources first, then the config file, then the
/// built-in set.
fn load_items(cli: &Cli, config: &AppConfig) -> Result<Vec<Item>> {
    if let Some(path) = &cli.items {
        return item::load_items_file(path).context("loading --items");
    }
    if let Some(dir) = &cli.media_dir {
        let items = item::load_media_dir(dir).context("loading --media-dir")?;
        if items.is_empty() {
            tracing::warn!("no images or videos in {}", dir.display());
        }
        return Ok(items);
    }
    if !config.items.is_empty() {
        return Ok(config.items.clone());
    }
    Ok(item::demo_items())
}

fn apply_cli_overrides(cli: &Cli, config: &mut AppConfig) {
    if cli.reduced_motion {
        config.reduced_motion = true;
    }
    if cli.no_autoplay {
        config.stack.autoplay = false;
    }
    if cli.no_loop {
        config.stack.looping = false;
    }
    if let Some(ms) = cli.interval_ms {
        config.stack.interval_ms = ms;
    }
}

// ───────────────────────────────────────── drawing ───────────

fn draw(frame: &mut Frame, state: &mut AppState) {
    let area = frame.area();
    state.terminal_area = area;

    if state.is_loading() {
        let elapsed = Instant::now().saturating_duration_since(state.started_at);
        frame.render_widget(
            Loader {
                tick: state.tick,
                elapsed,
            },
            area,
        );
        return;
    }

    let layout = state.layout();
    let stack_map = state.stack_map();
    let tools_map = state.tools_map();
    let buf = frame.buffer_mut();
    buf.set_style(area, Theme::backdrop_style());

    state.hits.tabs = NavBar {
        current: state.section(),
    }
    .render_and_hit(layout.nav_area, buf);
    state.hits.cards.clear();
    state.hits.dots.clear();
    state.hits.tiles.clear();
    state.hits.gallery.clear();
    state.hits.contact = Default::default();
    let now = state.last_frame;

    match &state.view {
        SectionView::Hero(hero) => HeroWidget {
            frame: hero.title.frame(),
            subtitle: "Tab or click to explore",
        }
        .render(layout.stage_area, buf),
        SectionView::About(about) => AboutWidget {
            config: &state.config.about,
            placement: about.placement(now),
            assets: &state.assets,
        }
        .render(layout.stage_area, buf),
        SectionView::Stack(stack) => {
            let fan = &state.config.stack.fan;
            let frames = stack.paint_order(&state.config.stack);
            state.hits.cards = CardStackWidget {
                items: &state.items,
                frames: &frames,
                map: stack_map,
                card_width: fan.effective_width(),
                card_height: fan.effective_height(),
                assets: &state.assets,
                custom: render_custom_key,
            }
            .render_and_hit(buf);
            if state.items.is_empty() {
                buf.set_string(
                    layout.stage_area.x + 2,
                    layout.stage_area.y + 1,
                    "Nothing to show",
                    Theme::caption_style(1.0),
                );
            }
            if state.config.stack.show_dots {
                state.hits.dots = Dots {
                    len: stack.carousel.len(),
                    active: stack.carousel.active_or_zero(),
                }
                .render_and_hit(layout.dots_area, buf);
            }
        }
        SectionView::Tools(tools) => {
            let tiles = tools.paint_order();
            state.hits.tiles = ToolsStageWidget {
                tools: &state.tools,
                tiles: &tiles,
                map: tools_map,
                headline_opacity: tools.headline_opacity(),
                caption_opacity: tools.caption_opacity(),
            }
            .render_and_hit(buf);
        }
        SectionView::Gallery(gallery) => {
            let transforms = gallery.tiles(now);
            state.hits.gallery = GalleryWidget {
                tiles: &state.gallery,
                transforms: &transforms,
                copy: gallery.copy(now),
                assets: &state.assets,
                config: &state.config.gallery,
            }
            .render_and_hit(layout.stage_area, buf);
        }
        SectionView::Contact(contact) => {
            state.hits.contact = ContactFormWidget {
                form: &contact.form,
            }
            .render_and_hit(layout.stage_area, buf);
        }
    }

    let hint = state.config.status_bar_hint();
    let status_text = match state.active_view {
        ActiveView::Main | ActiveView::Lightbox => state.status_message.as_deref().unwrap_or(&hint),
        ActiveView::SettingsMenu | ActiveView::ControlsSubmenu => "",
    };
    frame.render_widget(
        Paragraph::new(status_text).style(Theme::status_bar_style()),
        layout.status_area,
    );

    match state.active_view {
        ActiveView::SettingsMenu => {
            frame.render_widget(popup::SettingsPopup { state: &*state }, area);
        }
        ActiveView::ControlsSubmenu => {
            frame.render_widget(
                popup::ControlsPopup {
                    config: &state.config,
                    selected: state.controls_selected,
                    awaiting_rebind: state.awaiting_rebind,
                },
                area,
            );
        }
        ActiveView::Lightbox => {
            let current = match &state.view {
                SectionView::Stack(stack) => stack.carousel.active_or_zero(),
                _ => 0,
            };
            let zones = LightboxWidget {
                items: &state.items,
                current,
                looping: state.config.stack.looping,
                assets: &state.assets,
            }
            .render_and_hit(area, frame.buffer_mut());
            state.lightbox_hit_zones = Some(zones);
        }
        ActiveView::Main => {}
    }
}

// ───────────────────────────────────────── event loop ────────

fn apply_event(state: &mut AppState, event: AppEvent) {
    match event {
        AppEvent::Key(k) => handler::handle_key(state, k),
        AppEvent::Mouse(m) => handler::handle_mouse(state, m),
        AppEvent::Resize(w, h) => state.on_resize(w, h),
        AppEvent::Tick => state.on_tick(Instant::now()),
        AppEvent::IndexChanged(index) => {
            let len = state.items.len();
            if let Some(item) = state.items.get(index) {
                tracing::info!("active card {}/{len}: {}", index + 1, item.id);
                state.status_message = Some(format!("{}/{len}  {}", index + 1, item.title));
            }
        }
        AppEvent::AssetLoaded { path, result } => state.assets.finish(path, result),
    }
}

async fn run(terminal: &mut Tui, state: &mut AppState, events: &mut UnboundedReceiver<AppEvent>) -> Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, state))?;

        let Some(event) = events.recv().await else {
            break;
        };
        apply_event(state, event);
        // Drain everything already queued before redrawing so bursts of
        // mouse motion don't each cost a frame.
        while let Ok(event) = events.try_recv() {
            apply_event(state, event);
        }

        if state.should_quit {
            break;
        }
    }
    Ok(())
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;

    let mut config = AppConfig::load(cli.config.as_deref());
    apply_cli_overrides(&cli, &mut config);
    let items = load_items(&cli, &config)?;
    let tools = if config.tools.items.is_empty() {
        item::demo_tools()
    } else {
        config.tools.items.clone()
    };
    tracing::info!("{} cards, {} tools", items.len(), tools.len());

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr = stderr();
    execute!(stderr, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr);
    let mut terminal = Terminal::new(backend)?;
    let size = terminal.size()?;

    let tick_rate = Duration::from_secs_f64(1.0 / config.fps as f64);
    let (events_tx, mut events) = spawn_event_reader(tick_rate);
    let mut state = AppState::new(
        config,
        items,
        tools,
        events_tx,
        Rect::new(0, 0, size.width, size.height),
        cli.section,
        Instant::now(),
    );
    state.request_assets();

    let result = run(&mut terminal, &mut state, &mut events).await;

    // ── teardown ──────────────────────────────────────────────
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}
