//! Section views: the pages of the showreel.
//!
//! Only the visible section is mounted.  Mounting builds its controller,
//! timers and springs from scratch; switching away drops them, which is all
//! the teardown there is.

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use super::event::{AppEvent, EventSender};
use crate::config::{AppConfig, StackConfig};
use crate::core::{
    autoplay::{AutoplayDriver, AutoplayGate},
    contact::ContactForm,
    controller::{parallax_offset, Carousel, DragGesture, DragOutcome, ScrollProgress},
    geometry::{visible_cards, PlacedCard, Transform},
    gooey::GooeyText,
    intro::{IntroPhase, IntroSequence},
    morph::{scatter_layout, tools_target, MorphInput, Viewport},
    reveal::{staggered, Reveal, RevealTimeline},
    spring::{AnimatedTransform, Spring, SpringValue},
};

// ───────────────────────────────────────── sections ──────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum Section {
    #[default]
    Hero,
    About,
    Stack,
    Tools,
    Gallery,
    Contact,
}

impl Section {
    pub const ALL: [Section; 6] = [
        Section::Hero,
        Section::About,
        Section::Stack,
        Section::Tools,
        Section::Gallery,
        Section::Contact,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Section::Hero => "HOME",
            Section::About => "ABOUT",
            Section::Stack => "WORK",
            Section::Tools => "TOOLS",
            Section::Gallery => "PHOTOS",
            Section::Contact => "CONTACT",
        }
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|s| *s == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.position() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Resolve an in-page anchor such as `#tools`.
    pub fn from_anchor(href: &str) -> Option<Self> {
        let name = href.strip_prefix('#')?;
        match name.to_ascii_lowercase().as_str() {
            "hero" | "home" => Some(Section::Hero),
            "about" => Some(Section::About),
            "stack" | "work" => Some(Section::Stack),
            "tools" => Some(Section::Tools),
            "gallery" | "photography" | "photos" => Some(Section::Gallery),
            "contact" => Some(Section::Contact),
            _ => None,
        }
    }
}

// ───────────────────────────────────────── stack ─────────────

/// Cards slide in from this far below their slot.
const ENTER_OFFSET_PX: f64 = 40.0;
const HOVER_LIFT_PX: f64 = 6.0;
const HOVER_SCALE: f64 = 1.02;
/// Cards fainter than this are not painted.
const MIN_PAINT_OPACITY: f64 = 0.02;

/// Depth → apparent size, as a perspective projection would do it.
fn perspective_scale(z: f64, perspective: f64) -> f64 {
    if perspective <= 0.0 || perspective - z <= 0.0 {
        return 1.0;
    }
    perspective / (perspective - z)
}

/// One card as it should be painted this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardFrame {
    pub index: usize,
    pub offset: i64,
    pub z_index: i32,
    pub transform: Transform,
}

impl CardFrame {
    pub fn is_active(&self) -> bool {
        self.offset == 0
    }
}

pub struct StackView {
    pub carousel: Carousel,
    autoplay: AutoplayDriver,
    /// Springs for the cards inside the visibility radius, keyed by item
    /// index.  Cards leaving the radius lose theirs at once.
    cards: BTreeMap<usize, AnimatedTransform>,
    drag: Option<DragGesture>,
    /// Pointer is over the stage (pauses autoplay when configured).
    pub hovering: bool,
    pub hovered_card: Option<usize>,
}

impl StackView {
    pub fn mount(len: usize, config: &AppConfig, events: &EventSender) -> Self {
        let tx = events.clone();
        let carousel = Carousel::new(len, config.stack.initial_index, config.stack.looping)
            .on_change(Box::new(move |index| {
                let _ = tx.send(AppEvent::IndexChanged(index));
            }));
        let autoplay = AutoplayDriver::new(config.stack.interval_ms, &carousel);

        let mut view = Self {
            carousel,
            autoplay,
            cards: BTreeMap::new(),
            drag: None,
            hovering: false,
            hovered_card: None,
        };
        let visible = view.visible(&config.stack);
        view.sync_cards(&visible, &config.stack, config.reduced_motion);
        tracing::debug!("mounted stack with {len} cards");
        view
    }

    /// Cards within the visibility radius, back to front.
    fn visible(&self, cfg: &StackConfig) -> Vec<PlacedCard> {
        visible_cards(
            self.carousel.len(),
            self.carousel.active_or_zero(),
            self.carousel.is_looping(),
            &cfg.fan,
        )
    }

    /// Resting transform of a placed card, with drag, hover and depth applied.
    fn card_target(&self, placed: &PlacedCard, cfg: &StackConfig) -> Transform {
        let mut t = placed.transform.planar();
        t.scale *= perspective_scale(placed.transform.z, cfg.fan.perspective_px);
        if placed.is_active() {
            if let Some(drag) = &self.drag {
                t.x += drag.offset();
            }
        }
        if self.hovered_card == Some(placed.index) && self.drag.is_none() {
            t.y -= HOVER_LIFT_PX;
            t.scale *= HOVER_SCALE;
        }
        t
    }

    /// Give entering cards a spring and drop the springs of cards that left.
    fn sync_cards(&mut self, visible: &[PlacedCard], cfg: &StackConfig, reduced_motion: bool) {
        self.cards
            .retain(|index, _| visible.iter().any(|placed| placed.index == *index));
        for placed in visible {
            if self.cards.contains_key(&placed.index) {
                continue;
            }
            let target = self.card_target(placed, cfg);
            let mut card = AnimatedTransform::new(Transform {
                y: target.y + ENTER_OFFSET_PX,
                opacity: 0.0,
                ..target
            });
            if reduced_motion {
                card.snap_to(target);
            } else {
                card.set_target(target);
            }
            self.cards.insert(placed.index, card);
        }
    }

    /// Number of cards currently animated.
    pub fn animated_len(&self) -> usize {
        self.cards.len()
    }

    pub fn frame(&mut self, now: Instant, dt: Duration, config: &AppConfig, autoplay_enabled: bool) {
        let gate = AutoplayGate {
            enabled: autoplay_enabled,
            reduced_motion: config.reduced_motion,
            hovering: self.hovering || self.drag.is_some(),
            pause_on_hover: config.stack.pause_on_hover || self.drag.is_some(),
        };
        self.autoplay.poll(now, &mut self.carousel, &gate);

        let visible = self.visible(&config.stack);
        self.sync_cards(&visible, &config.stack, config.reduced_motion);
        for placed in &visible {
            let target = self.card_target(placed, &config.stack);
            let Some(card) = self.cards.get_mut(&placed.index) else {
                continue;
            };
            if config.reduced_motion {
                card.snap_to(target);
            } else {
                card.set_target(target);
                card.step(&config.stack.spring, dt);
            }
        }
    }

    /// Cards to paint, back to front.  Only cards inside the visibility
    /// radius are returned, even before the next frame has run.
    pub fn paint_order(&self, cfg: &StackConfig) -> Vec<CardFrame> {
        self.visible(cfg)
            .into_iter()
            .filter_map(|placed| {
                let transform = self.cards.get(&placed.index)?.current();
                if transform.opacity < MIN_PAINT_OPACITY {
                    return None;
                }
                Some(CardFrame {
                    index: placed.index,
                    offset: placed.offset,
                    z_index: placed.transform.z_index,
                    transform,
                })
            })
            .collect()
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Start dragging the active card.  Ignored under reduced motion.
    pub fn begin_drag(&mut self, x: f64, now: Instant, reduced_motion: bool) {
        if reduced_motion || self.carousel.is_empty() {
            return;
        }
        self.drag = Some(DragGesture::start(x, now));
    }

    pub fn update_drag(&mut self, x: f64, now: Instant) {
        if let Some(drag) = &mut self.drag {
            drag.update(x, now);
        }
    }

    /// Finish the drag and apply its outcome.  Returns the outcome and the
    /// total travel so the caller can tell a click from a swipe.
    pub fn end_drag(&mut self, card_width: f64) -> Option<(DragOutcome, f64)> {
        let drag = self.drag.take()?;
        let travel = drag.offset();
        let outcome = drag.release(card_width);
        outcome.apply(&mut self.carousel);
        Some((outcome, travel))
    }

    pub fn set_interval(&mut self, interval_ms: u64, now: Instant) {
        self.autoplay.set_interval(interval_ms, now);
    }

    pub fn next_autoplay(&self) -> Option<Instant> {
        self.autoplay.next_due()
    }
}

// ───────────────────────────────────────── tools ─────────────

/// Scroll wheel / arrow step through the pinned region.
pub const SCROLL_STEP_PX: f64 = 80.0;
const FLIP_SPRING: Spring = Spring::new(260.0, 20.0);

pub struct ToolsView {
    intro: IntroSequence,
    pub scroll: ScrollProgress,
    scatter: Vec<Transform>,
    tiles: Vec<AnimatedTransform>,
    /// Hover flip angle per tile, 0 = front, 180 = back.
    flips: Vec<SpringValue>,
    parallax: SpringValue,
    viewport: Viewport,
    pub hovered: Option<usize>,
}

impl ToolsView {
    pub fn mount(total: usize, config: &AppConfig, viewport: Viewport, now: Instant) -> Self {
        let scatter = scatter_layout(total, &mut rand::thread_rng());
        let mut intro = IntroSequence::new(now);
        if config.reduced_motion {
            intro.skip();
        }
        let tiles = scatter.iter().copied().map(AnimatedTransform::new).collect();
        let mut view = Self {
            intro,
            scroll: ScrollProgress::new(config.tools.morph.scroll_range, config.tools.morph.morph_end),
            scatter,
            tiles,
            flips: vec![SpringValue::new(0.0); total],
            parallax: SpringValue::new(0.0),
            viewport,
            hovered: None,
        };
        // Under reduced motion the first frame already shows the final layout.
        if config.reduced_motion {
            view.frame(now, Duration::ZERO, config);
        }
        tracing::debug!("mounted tools with {total} tiles");
        view
    }

    pub fn phase(&self) -> IntroPhase {
        self.intro.phase()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    /// Pointer moved to `x` (px) within a stage `width` px wide.
    pub fn point_at(&mut self, x: f64, width: f64, amplitude: f64) {
        self.parallax.retarget(parallax_offset(x, width, amplitude));
    }

    fn input(&self) -> MorphInput {
        MorphInput {
            progress: self.scroll.morph_progress(),
            rotate: self.scroll.rotate_progress(),
            parallax: self.parallax.value(),
        }
    }

    pub fn frame(&mut self, now: Instant, dt: Duration, config: &AppConfig) {
        let reduced = config.reduced_motion;
        if let Some(phase) = self.intro.update(now) {
            tracing::info!("tools intro entered {}", phase.label());
        }
        if reduced {
            self.parallax.snap(self.parallax.target());
        } else {
            self.parallax.step(&config.tools.parallax_spring, dt);
        }

        let input = self.input();
        let total = self.tiles.len();
        let phase = self.intro.phase();
        for i in 0..total {
            let target = tools_target(
                phase,
                i,
                total,
                &self.scatter,
                &self.viewport,
                &input,
                &config.tools.morph,
            );
            let tile = &mut self.tiles[i];
            let flip = &mut self.flips[i];
            flip.retarget(if self.hovered == Some(i) { 180.0 } else { 0.0 });
            if reduced {
                tile.snap_to(target);
                flip.snap(flip.target());
            } else {
                tile.set_target(target);
                tile.step(&config.tools.tile_spring, dt);
                flip.step(&FLIP_SPRING, dt);
            }
        }
    }

    /// Tiles to paint with their flip angle; the hovered tile goes last.
    pub fn paint_order(&self) -> Vec<(usize, Transform, f64)> {
        let mut tiles: Vec<(usize, Transform, f64)> = self
            .tiles
            .iter()
            .zip(&self.flips)
            .enumerate()
            .map(|(i, (tile, flip))| (i, tile.current(), flip.value()))
            .filter(|(_, t, _)| t.opacity >= MIN_PAINT_OPACITY)
            .collect();
        tiles.sort_by_key(|(i, _, _)| self.hovered == Some(*i));
        tiles
    }

    /// "Scroll to explore" headline, visible on the ring until halfway.
    pub fn headline_opacity(&self) -> f64 {
        let morph = self.scroll.morph_progress();
        if self.intro.phase() == IntroPhase::Circle && morph < 0.5 {
            1.0 - morph * 2.0
        } else {
            0.0
        }
    }

    /// Arc caption, fading in over the last fifth of the morph.
    pub fn caption_opacity(&self) -> f64 {
        ((self.scroll.morph_progress() - 0.8) / 0.2).clamp(0.0, 1.0)
    }
}

// ───────────────────────────────────────── hero / contact ────

pub struct HeroView {
    pub title: GooeyText,
}

impl HeroView {
    pub fn mount(config: &AppConfig) -> Self {
        Self {
            title: GooeyText::new(
                config.hero.texts.clone(),
                config.hero.morph_time,
                config.hero.cooldown,
            ),
        }
    }
}

#[derive(Default)]
pub struct ContactView {
    pub form: ContactForm,
}

// ───────────────────────────────────────── about / gallery ───

/// Where each about-page block sits at a given moment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AboutPlacement {
    pub title: Transform,
    pub bio: Transform,
    pub portrait: Transform,
    pub skills: Transform,
}

pub struct AboutView {
    reveal: RevealTimeline,
}

impl AboutView {
    const TITLE: usize = 0;
    const BIO: usize = 1;
    const PORTRAIT: usize = 2;
    const SKILLS: usize = 3;

    pub fn mount(config: &AppConfig, now: Instant) -> Self {
        let reveals = vec![
            Reveal::slide_x(-60.0, Duration::ZERO, ms(800)),
            Reveal::rise(30.0, ms(200), ms(800)),
            Reveal::grow(0.9, Duration::ZERO, ms(1000)),
            Reveal::slide_x(40.0, ms(300), ms(800)),
        ];
        Self {
            reveal: RevealTimeline::new(now, reveals, config.reduced_motion),
        }
    }

    pub fn placement(&self, now: Instant) -> AboutPlacement {
        AboutPlacement {
            title: self.reveal.at(Self::TITLE, now),
            bio: self.reveal.at(Self::BIO, now),
            portrait: self.reveal.at(Self::PORTRAIT, now),
            skills: self.reveal.at(Self::SKILLS, now),
        }
    }
}

pub struct GalleryView {
    tiles: RevealTimeline,
    copy: RevealTimeline,
}

impl GalleryView {
    pub fn mount(tiles: usize, config: &AppConfig, now: Instant) -> Self {
        let reduced = config.reduced_motion;
        let stagger = ms(config.gallery.stagger_ms);
        let copy = vec![
            Reveal::slide_x(40.0, Duration::ZERO, ms(800)),
            Reveal::rise(20.0, ms(200), ms(800)),
        ];
        Self {
            tiles: RevealTimeline::new(now, staggered(tiles, stagger), reduced),
            copy: RevealTimeline::new(now, copy, reduced),
        }
    }

    /// One transform per tile, in tile order.
    pub fn tiles(&self, now: Instant) -> Vec<Transform> {
        self.tiles.all(now)
    }

    /// Heading and body text placements.
    pub fn copy(&self, now: Instant) -> (Transform, Transform) {
        (self.copy.at(0, now), self.copy.at(1, now))
    }

    pub fn is_revealed(&self, now: Instant) -> bool {
        self.tiles.is_done(now) && self.copy.is_done(now)
    }
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

// ───────────────────────────────────────── mounted view ──────

/// Everything [`SectionView::mount`] needs.
pub struct MountCtx<'a> {
    pub config: &'a AppConfig,
    pub items_len: usize,
    pub tools_len: usize,
    pub gallery_len: usize,
    pub events: &'a EventSender,
    pub viewport: Viewport,
    pub now: Instant,
}

pub enum SectionView {
    Hero(HeroView),
    About(AboutView),
    Stack(StackView),
    Tools(ToolsView),
    Gallery(GalleryView),
    Contact(ContactView),
}

impl SectionView {
    pub fn mount(section: Section, ctx: &MountCtx<'_>) -> Self {
        tracing::info!("entering section {}", section.label());
        match section {
            Section::Hero => SectionView::Hero(HeroView::mount(ctx.config)),
            Section::About => SectionView::About(AboutView::mount(ctx.config, ctx.now)),
            Section::Stack => {
                SectionView::Stack(StackView::mount(ctx.items_len, ctx.config, ctx.events))
            }
            Section::Tools => SectionView::Tools(ToolsView::mount(
                ctx.tools_len,
                ctx.config,
                ctx.viewport,
                ctx.now,
            )),
            Section::Gallery => {
                SectionView::Gallery(GalleryView::mount(ctx.gallery_len, ctx.config, ctx.now))
            }
            Section::Contact => SectionView::Contact(ContactView::default()),
        }
    }

    pub fn section(&self) -> Section {
        match self {
            SectionView::Hero(_) => Section::Hero,
            SectionView::About(_) => Section::About,
            SectionView::Stack(_) => Section::Stack,
            SectionView::Tools(_) => Section::Tools,
            SectionView::Gallery(_) => Section::Gallery,
            SectionView::Contact(_) => Section::Contact,
        }
    }

    /// Advance timers and springs by one frame.
    pub fn frame(&mut self, now: Instant, dt: Duration, config: &AppConfig, autoplay_enabled: bool) {
        match self {
            SectionView::Hero(hero) => {
                if !config.reduced_motion {
                    hero.title.tick(dt);
                }
            }
            // Reveals are sampled from the clock when drawn.
            SectionView::About(_) | SectionView::Gallery(_) => {}
            SectionView::Stack(stack) => stack.frame(now, dt, config, autoplay_enabled),
            SectionView::Tools(tools) => tools.frame(now, dt, config),
            SectionView::Contact(contact) => {
                contact.form.update(now);
            }
        }
    }
}
