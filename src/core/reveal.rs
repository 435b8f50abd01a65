//! Reveal-on-enter timelines for the static sections.
//!
//! Every element starts from an offset, faded-out placement and eases into
//! its resting [`Transform`].  Grid tiles share one reveal shifted by a fixed
//! stagger per tile.

use std::time::{Duration, Instant};

use super::geometry::Transform;

/// Grid tiles: fade up from 40 px below, slightly shrunk.
pub const TILE_DURATION: Duration = Duration::from_millis(800);
pub const TILE_STAGGER: Duration = Duration::from_millis(150);
pub const TILE_RISE_PX: f64 = 40.0;
pub const TILE_START_SCALE: f64 = 0.95;

/// Cubic ease-out: fast start, gentle landing.
pub fn ease_out_cubic(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

fn lerp(start: f64, end: f64, t: f64) -> f64 {
    if t >= 1.0 {
        return end;
    }
    start + (end - start) * t
}

/// One element's entrance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reveal {
    /// Placement before the reveal starts.
    pub from: Transform,
    pub delay: Duration,
    pub duration: Duration,
}

impl Reveal {
    pub fn new(from: Transform, delay: Duration, duration: Duration) -> Self {
        Self {
            from,
            delay,
            duration,
        }
    }

    /// Slide in horizontally by `dx` px while fading in.
    pub fn slide_x(dx: f64, delay: Duration, duration: Duration) -> Self {
        Self::new(
            Transform {
                x: dx,
                opacity: 0.0,
                ..Transform::default()
            },
            delay,
            duration,
        )
    }

    /// Rise by `dy` px while fading in.
    pub fn rise(dy: f64, delay: Duration, duration: Duration) -> Self {
        Self::new(
            Transform {
                y: dy,
                opacity: 0.0,
                ..Transform::default()
            },
            delay,
            duration,
        )
    }

    /// Grow from `scale` while fading in.
    pub fn grow(scale: f64, delay: Duration, duration: Duration) -> Self {
        Self::new(
            Transform {
                scale,
                opacity: 0.0,
                ..Transform::default()
            },
            delay,
            duration,
        )
    }

    /// Eased progress `elapsed` after the timeline started.
    pub fn progress(&self, elapsed: Duration) -> f64 {
        let Some(run) = elapsed.checked_sub(self.delay) else {
            return 0.0;
        };
        if self.duration.is_zero() {
            return 1.0;
        }
        ease_out_cubic(run.as_secs_f64() / self.duration.as_secs_f64())
    }

    pub fn at(&self, elapsed: Duration) -> Transform {
        let t = self.progress(elapsed);
        let rest = Transform::default();
        Transform {
            x: lerp(self.from.x, rest.x, t),
            y: lerp(self.from.y, rest.y, t),
            rotation: lerp(self.from.rotation, rest.rotation, t),
            scale: lerp(self.from.scale, rest.scale, t),
            opacity: lerp(self.from.opacity, rest.opacity, t),
        }
    }

    pub fn end(&self) -> Duration {
        self.delay + self.duration
    }
}

/// `count` tile reveals, each starting `stagger` after the previous one.
pub fn staggered(count: usize, stagger: Duration) -> Vec<Reveal> {
    (0..count)
        .map(|i| {
            Reveal::new(
                Transform {
                    y: TILE_RISE_PX,
                    scale: TILE_START_SCALE,
                    opacity: 0.0,
                    ..Transform::default()
                },
                stagger * i as u32,
                TILE_DURATION,
            )
        })
        .collect()
}

/// A set of reveals sharing one start time (the section mount).
#[derive(Debug, Clone)]
pub struct RevealTimeline {
    started_at: Instant,
    reveals: Vec<Reveal>,
    /// Reduced motion: everything is at rest from the first frame.
    instant: bool,
}

impl RevealTimeline {
    pub fn new(started_at: Instant, reveals: Vec<Reveal>, instant: bool) -> Self {
        Self {
            started_at,
            reveals,
            instant,
        }
    }

    /// Placement of element `i` at `now`; unknown elements rest.
    pub fn at(&self, i: usize, now: Instant) -> Transform {
        match self.reveals.get(i) {
            Some(reveal) if !self.instant => {
                reveal.at(now.saturating_duration_since(self.started_at))
            }
            _ => Transform::default(),
        }
    }

    pub fn all(&self, now: Instant) -> Vec<Transform> {
        (0..self.reveals.len()).map(|i| self.at(i, now)).collect()
    }

    pub fn is_done(&self, now: Instant) -> bool {
        self.instant
            || self
                .reveals
                .iter()
                .all(|r| now.saturating_duration_since(self.started_at) >= r.end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn easing_hits_both_ends() {
        assert_eq!(ease_out_cubic(0.0), 0.0);
        assert_eq!(ease_out_cubic(1.0), 1.0);
        assert_eq!(ease_out_cubic(2.0), 1.0);
        assert!(ease_out_cubic(0.5) > 0.5);
    }

    #[test]
    fn tiles_start_low_small_and_invisible() {
        let reveals = staggered(4, TILE_STAGGER);
        let t = reveals[0].at(Duration::ZERO);
        assert!(approx(t.y, TILE_RISE_PX));
        assert!(approx(t.scale, TILE_START_SCALE));
        assert!(approx(t.opacity, 0.0));

        let rest = reveals[3].at(reveals[3].end());
        assert_eq!(rest, Transform::default());
    }

    #[test]
    fn tiles_are_staggered() {
        let reveals = staggered(3, TILE_STAGGER);
        assert_eq!(reveals[2].delay, ms(300));
        // At 200 ms the first tile is on its way, the third has not moved.
        assert!(reveals[0].at(ms(200)).opacity > 0.0);
        assert!(approx(reveals[2].at(ms(200)).opacity, 0.0));
        assert!(reveals[1].at(ms(400)).opacity > reveals[2].at(ms(400)).opacity);
    }

    #[test]
    fn timeline_finishes_with_its_last_element() {
        let t0 = Instant::now();
        let timeline = RevealTimeline::new(t0, staggered(4, TILE_STAGGER), false);
        assert!(!timeline.is_done(t0 + ms(1000)));
        assert!(timeline.is_done(t0 + ms(1250)));
        assert!(timeline.all(t0 + ms(1250)).iter().all(|t| *t == Transform::default()));
    }

    #[test]
    fn instant_timeline_rests_immediately() {
        let t0 = Instant::now();
        let timeline = RevealTimeline::new(t0, staggered(2, TILE_STAGGER), true);
        assert!(timeline.is_done(t0));
        assert_eq!(timeline.at(1, t0), Transform::default());
    }

    #[test]
    fn slide_and_grow_start_offset() {
        let slide = Reveal::slide_x(-60.0, Duration::ZERO, ms(800));
        assert!(approx(slide.at(Duration::ZERO).x, -60.0));
        let grow = Reveal::grow(0.9, Duration::ZERO, ms(1000));
        assert!(approx(grow.at(Duration::ZERO).scale, 0.9));
        assert!(approx(grow.at(ms(1000)).scale, 1.0));
    }
}
