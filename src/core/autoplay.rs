//! Autoplay: advances a carousel on a fixed interval.
//!
//! The driver holds no timer of its own; the frame loop polls it with the
//! current instant.  Dropping the driver is all the teardown there is.

use std::time::{Duration, Instant};

use super::controller::Carousel;

/// Autoplay is never faster than this, whatever the configuration says.
pub const MIN_INTERVAL: Duration = Duration::from_millis(700);

/// Configured interval clamped to [`MIN_INTERVAL`].
pub fn effective_interval(interval_ms: u64) -> Duration {
    Duration::from_millis(interval_ms).max(MIN_INTERVAL)
}

/// Conditions sampled every poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AutoplayGate {
    pub enabled: bool,
    pub reduced_motion: bool,
    pub hovering: bool,
    pub pause_on_hover: bool,
}

#[derive(Debug, Clone)]
pub struct AutoplayDriver {
    interval: Duration,
    /// `None` while disabled or paused; rescheduled a full interval on resume.
    next_due: Option<Instant>,
    /// Carousel revision after our own last advance.
    seen_revision: u64,
}

impl AutoplayDriver {
    pub fn new(interval_ms: u64, carousel: &Carousel) -> Self {
        Self {
            interval: effective_interval(interval_ms),
            next_due: None,
            seen_revision: carousel.revision(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the interval; the pending advance is rescheduled from `now`.
    pub fn set_interval(&mut self, interval_ms: u64, now: Instant) {
        self.interval = effective_interval(interval_ms);
        if self.next_due.is_some() {
            self.next_due = Some(now + self.interval);
        }
    }

    /// When the next advance will happen, if one is scheduled.
    pub fn next_due(&self) -> Option<Instant> {
        self.next_due
    }

    fn should_run(gate: &AutoplayGate, carousel: &Carousel) -> bool {
        if !gate.enabled || gate.reduced_motion || carousel.len() <= 1 {
            return false;
        }
        if gate.pause_on_hover && gate.hovering {
            return false;
        }
        !(!carousel.is_looping() && carousel.is_at_last())
    }

    /// Advance `carousel` if the interval has elapsed.  Returns `true` when
    /// an advance happened.
    pub fn poll(&mut self, now: Instant, carousel: &mut Carousel, gate: &AutoplayGate) -> bool {
        if !Self::should_run(gate, carousel) {
            self.next_due = None;
            self.seen_revision = carousel.revision();
            return false;
        }

        // Someone else moved the carousel: wait a full interval from here.
        if carousel.revision() != self.seen_revision {
            self.seen_revision = carousel.revision();
            self.next_due = Some(now + self.interval);
            return false;
        }

        let due = *self.next_due.get_or_insert(now + self.interval);
        if now < due {
            return false;
        }

        carousel.advance(1);
        self.seen_revision = carousel.revision();
        self.next_due = Some(now + self.interval);
        tracing::debug!("autoplay advanced to {:?}", carousel.active());
        true
    }
}
