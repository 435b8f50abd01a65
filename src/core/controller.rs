//! Interaction controller: the single source of truth for "where we are".
//!
//! [`Carousel`] owns the active index of a card stack; [`ScrollProgress`]
//! owns the scroll-derived scalar of the tools morph.  Input handlers only
//! ever talk to these through the navigation operations below.

use std::time::Instant;

use super::geometry::wrap_index;

// ───────────────────────────────────────── carousel ──────────

/// Called with the new active index after every actual change.
pub type IndexChanged = Box<dyn FnMut(usize) + Send>;

/// Active-index state of one card stack instance.
pub struct Carousel {
    active: usize,
    len: usize,
    looping: bool,
    /// Bumped on every change; lets observers detect navigation they did
    /// not cause themselves.
    revision: u64,
    on_change: Option<IndexChanged>,
}

impl std::fmt::Debug for Carousel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Carousel")
            .field("active", &self.active)
            .field("len", &self.len)
            .field("looping", &self.looping)
            .field("revision", &self.revision)
            .finish_non_exhaustive()
    }
}

impl Carousel {
    pub fn new(len: usize, initial: i64, looping: bool) -> Self {
        Self {
            active: wrap_index(initial, len),
            len,
            looping,
            revision: 0,
            on_change: None,
        }
    }

    /// Register the index-changed notification.
    pub fn on_change(mut self, callback: IndexChanged) -> Self {
        self.on_change = Some(callback);
        self
    }

    /// The focused item, or `None` when the collection is empty.
    pub fn active(&self) -> Option<usize> {
        (self.len > 0).then_some(self.active)
    }

    /// Active index with the empty case collapsed to 0.
    pub fn active_or_zero(&self) -> usize {
        self.active
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_at_last(&self) -> bool {
        self.len > 0 && self.active == self.len - 1
    }

    pub fn can_go_prev(&self) -> bool {
        self.len > 0 && (self.looping || self.active > 0)
    }

    pub fn can_go_next(&self) -> bool {
        self.len > 0 && (self.looping || self.active + 1 < self.len)
    }

    /// Resize the collection, keeping the active index in bounds.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        let wrapped = wrap_index(self.active as i64, len);
        self.set_active(wrapped);
    }

    /// Jump to `index`.  Out-of-range targets wrap when looping and are
    /// ignored otherwise.
    pub fn go_to(&mut self, index: i64) {
        if self.len == 0 {
            return;
        }
        if !self.looping && (index < 0 || index >= self.len as i64) {
            return;
        }
        self.set_active(wrap_index(index, self.len));
    }

    /// Step by `direction` (its sign only).  Wraps when looping; a no-op
    /// past either end otherwise.
    pub fn advance(&mut self, direction: i64) {
        match direction.signum() {
            1 if self.can_go_next() => {
                self.set_active(wrap_index(self.active as i64 + 1, self.len));
            }
            -1 if self.can_go_prev() => {
                self.set_active(wrap_index(self.active as i64 - 1, self.len));
            }
            _ => {}
        }
    }

    fn set_active(&mut self, index: usize) {
        if index == self.active {
            return;
        }
        self.active = index;
        self.revision += 1;
        if self.len > 0 {
            if let Some(cb) = self.on_change.as_mut() {
                cb(index);
            }
        }
    }
}

// ───────────────────────────────────────── drag ──────────────

/// Fixed upper bound of the swipe distance threshold.
const DRAG_DISTANCE_CAP_PX: f64 = 160.0;
/// Fraction of the card width that counts as a swipe.
const DRAG_WIDTH_FRACTION: f64 = 0.22;
/// Release velocity (px/s) that counts as a flick.
const DRAG_VELOCITY_PX_S: f64 = 650.0;

/// Swipe distance needed to change cards.
pub fn drag_threshold(card_width: f64) -> f64 {
    DRAG_DISTANCE_CAP_PX.min(card_width * DRAG_WIDTH_FRACTION)
}

/// What a drag release asks the carousel to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    Next,
    Prev,
    Snap,
}

impl DragOutcome {
    /// Decide from the total travel and release velocity (both px, signed).
    /// Dragging left (negative) moves to the next card.
    pub fn from_release(offset: f64, velocity: f64, card_width: f64) -> Self {
        let threshold = drag_threshold(card_width);
        if offset > threshold || velocity > DRAG_VELOCITY_PX_S {
            DragOutcome::Prev
        } else if offset < -threshold || velocity < -DRAG_VELOCITY_PX_S {
            DragOutcome::Next
        } else {
            DragOutcome::Snap
        }
    }

    pub fn apply(self, carousel: &mut Carousel) {
        match self {
            DragOutcome::Next => carousel.advance(1),
            DragOutcome::Prev => carousel.advance(-1),
            DragOutcome::Snap => {}
        }
    }
}

/// Horizontal drag on the active card.
#[derive(Debug, Clone)]
pub struct DragGesture {
    origin_x: f64,
    offset: f64,
    /// Last two pointer samples, for the release velocity.
    last: (Instant, f64),
    prev: Option<(Instant, f64)>,
}

impl DragGesture {
    pub fn start(x: f64, now: Instant) -> Self {
        Self {
            origin_x: x,
            offset: 0.0,
            last: (now, x),
            prev: None,
        }
    }

    pub fn update(&mut self, x: f64, now: Instant) {
        self.prev = Some(self.last);
        self.last = (now, x);
        self.offset = x - self.origin_x;
    }

    /// Current travel from the press point.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Velocity over the last sample pair, in px/s.
    pub fn velocity(&self) -> f64 {
        let Some((t0, x0)) = self.prev else {
            return 0.0;
        };
        let (t1, x1) = self.last;
        let dt = t1.saturating_duration_since(t0).as_secs_f64();
        if dt <= f64::EPSILON {
            0.0
        } else {
            (x1 - x0) / dt
        }
    }

    pub fn release(self, card_width: f64) -> DragOutcome {
        let outcome = DragOutcome::from_release(self.offset, self.velocity(), card_width);
        tracing::debug!(
            "drag release offset={:.1} velocity={:.1} -> {:?}",
            self.offset,
            self.velocity(),
            outcome
        );
        outcome
    }
}

// ───────────────────────────────────────── scroll ────────────

/// Scroll offset inside a pinned region, mapped linearly onto the morph
/// progress and the arc rotation.  Scrubbing is immediate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollProgress {
    offset: f64,
    range: f64,
    morph_end: f64,
}

impl ScrollProgress {
    pub fn new(range: f64, morph_end: f64) -> Self {
        let range = if range.is_finite() && range > 0.0 { range } else { 2000.0 };
        Self {
            offset: 0.0,
            range,
            morph_end: morph_end.clamp(0.0, range),
        }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn range(&self) -> f64 {
        self.range
    }

    pub fn set_offset(&mut self, offset: f64) {
        self.offset = offset.clamp(0.0, self.range);
    }

    pub fn scroll_by(&mut self, delta: f64) {
        self.set_offset(self.offset + delta);
    }

    /// Overall position within the pinned region, 0..1.
    pub fn fraction(&self) -> f64 {
        self.offset / self.range
    }

    /// Circle → arc progress over `[0, morph_end]`.
    pub fn morph_progress(&self) -> f64 {
        if self.morph_end <= 0.0 {
            return 1.0;
        }
        (self.offset / self.morph_end).clamp(0.0, 1.0)
    }

    /// Arc rotation over `[morph_end, range]`.
    pub fn rotate_progress(&self) -> f64 {
        let span = self.range - self.morph_end;
        if span <= 0.0 {
            return 0.0;
        }
        ((self.offset - self.morph_end) / span).clamp(0.0, 1.0)
    }
}

/// Pointer x within a container of `width`, normalised to [-1, 1] and
/// scaled to `amplitude` pixels.  A zero-width container yields no offset.
pub fn parallax_offset(x: f64, width: f64, amplitude: f64) -> f64 {
    if width <= 0.0 || !width.is_finite() {
        return 0.0;
    }
    let normalised = ((x / width) * 2.0 - 1.0).clamp(-1.0, 1.0);
    normalised * amplitude
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[test]
    fn index_stays_in_bounds() {
        for len in 0..6usize {
            for looping in [true, false] {
                let mut c = Carousel::new(len, 0, looping);
                for step in [1, 1, -1, 5, -3, 1, 1, 1, 1, 1, 1, -1, -1, -1, -1, -1] {
                    c.advance(step);
                    c.go_to(step * 2);
                    match c.active() {
                        Some(i) => assert!(i < len),
                        None => assert_eq!(len, 0),
                    }
                }
            }
        }
    }

    #[test]
    fn looping_wraps_both_ways() {
        let mut c = Carousel::new(4, 3, true);
        c.advance(1);
        assert_eq!(c.active(), Some(0));
        c.advance(-1);
        assert_eq!(c.active(), Some(3));
    }

    #[test]
    fn non_looping_stops_at_edges() {
        let mut c = Carousel::new(4, 3, false);
        let rev = c.revision();
        c.advance(1);
        assert_eq!(c.active(), Some(3));
        assert_eq!(c.revision(), rev);

        c.go_to(0);
        c.advance(-1);
        assert_eq!(c.active(), Some(0));
    }

    #[test]
    fn go_to_out_of_range() {
        let mut c = Carousel::new(5, 0, false);
        c.go_to(9);
        assert_eq!(c.active(), Some(0));
        c.go_to(-1);
        assert_eq!(c.active(), Some(0));

        let mut looped = Carousel::new(5, 0, true);
        looped.go_to(7);
        assert_eq!(looped.active(), Some(2));
    }

    #[test]
    fn initial_index_is_wrapped() {
        assert_eq!(Carousel::new(3, 7, false).active(), Some(1));
        assert_eq!(Carousel::new(3, -1, true).active(), Some(2));
        assert_eq!(Carousel::new(0, 4, true).active(), None);
    }

    #[test]
    fn empty_carousel_is_inert() {
        let mut c = Carousel::new(0, 0, true);
        c.advance(1);
        c.go_to(3);
        assert_eq!(c.active(), None);
        assert_eq!(c.revision(), 0);
    }

    #[test]
    fn shrinking_keeps_index_valid() {
        let mut c = Carousel::new(6, 5, true);
        c.set_len(4);
        assert_eq!(c.active(), Some(1));
        c.set_len(0);
        assert_eq!(c.active(), None);
    }

    #[test]
    fn change_callback_fires_on_real_changes_only() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let mut c = Carousel::new(3, 0, true).on_change(Box::new(move |i| {
            sink.lock().unwrap().push(i);
        }));
        c.advance(1);
        c.go_to(1);
        c.advance(-1);
        c.advance(-1);
        assert_eq!(*seen.lock().unwrap(), vec![1, 0, 2]);
    }

    #[test]
    fn drag_threshold_uses_smaller_bound() {
        assert!((drag_threshold(320.0) - 70.4).abs() < 1e-9);
        assert_eq!(drag_threshold(1000.0), 160.0);
    }

    #[test]
    fn drag_release_scenarios() {
        assert_eq!(
            DragOutcome::from_release(-100.0, -700.0, 320.0),
            DragOutcome::Next
        );
        assert_eq!(
            DragOutcome::from_release(-30.0, -100.0, 320.0),
            DragOutcome::Snap
        );
        assert_eq!(
            DragOutcome::from_release(80.0, 0.0, 320.0),
            DragOutcome::Prev
        );
        // A fast flick wins even with little travel.
        assert_eq!(
            DragOutcome::from_release(-10.0, -900.0, 320.0),
            DragOutcome::Next
        );

        let mut c = Carousel::new(5, 0, true);
        DragOutcome::from_release(-100.0, -700.0, 320.0).apply(&mut c);
        assert_eq!(c.active(), Some(1));
        DragOutcome::Snap.apply(&mut c);
        assert_eq!(c.active(), Some(1));
    }

    #[test]
    fn gesture_tracks_offset_and_velocity() {
        let t0 = Instant::now();
        let mut g = DragGesture::start(500.0, t0);
        assert_eq!(g.velocity(), 0.0);
        g.update(480.0, t0 + Duration::from_millis(50));
        g.update(400.0, t0 + Duration::from_millis(100));
        assert_eq!(g.offset(), -100.0);
        assert!((g.velocity() + 1600.0).abs() < 1e-6);
        assert_eq!(g.release(320.0), DragOutcome::Next);
    }

    #[test]
    fn scroll_progress_is_clamped_and_monotonic() {
        let mut s = ScrollProgress::new(2000.0, 600.0);
        s.scroll_by(-50.0);
        assert_eq!(s.offset(), 0.0);
        assert_eq!(s.morph_progress(), 0.0);

        let mut last = 0.0;
        for _ in 0..30 {
            s.scroll_by(100.0);
            assert!(s.morph_progress() >= last);
            last = s.morph_progress();
        }
        assert_eq!(s.offset(), 2000.0);
        assert_eq!(s.morph_progress(), 1.0);
        assert_eq!(s.rotate_progress(), 1.0);

        s.set_offset(300.0);
        assert_eq!(s.morph_progress(), 0.5);
        assert_eq!(s.rotate_progress(), 0.0);
        s.set_offset(1300.0);
        assert_eq!(s.rotate_progress(), 0.5);
    }

    #[test]
    fn parallax_normalises_pointer() {
        assert_eq!(parallax_offset(0.0, 200.0, 100.0), -100.0);
        assert_eq!(parallax_offset(100.0, 200.0, 100.0), 0.0);
        assert_eq!(parallax_offset(200.0, 200.0, 100.0), 100.0);
        assert_eq!(parallax_offset(50.0, 0.0, 100.0), 0.0);
    }
}
