//! One-way intro sequence for the tools showcase: scatter → line → circle.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum IntroPhase {
    #[default]
    Scatter,
    Line,
    Circle,
}

impl IntroPhase {
    pub fn label(self) -> &'static str {
        match self {
            IntroPhase::Scatter => "scatter",
            IntroPhase::Line => "line",
            IntroPhase::Circle => "circle",
        }
    }
}

/// (from, to, delay since mount).  Rows are ordered and never go backwards.
const TRANSITIONS: &[(IntroPhase, IntroPhase, Duration)] = &[
    (IntroPhase::Scatter, IntroPhase::Line, Duration::from_millis(500)),
    (IntroPhase::Line, IntroPhase::Circle, Duration::from_millis(2500)),
];

/// Timer-driven walk through [`TRANSITIONS`].
#[derive(Debug, Clone)]
pub struct IntroSequence {
    phase: IntroPhase,
    mounted_at: Instant,
}

impl IntroSequence {
    pub fn new(mounted_at: Instant) -> Self {
        Self {
            phase: IntroPhase::Scatter,
            mounted_at,
        }
    }

    pub fn phase(&self) -> IntroPhase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == IntroPhase::Circle
    }

    /// Apply every transition whose delay has elapsed.  Returns the newly
    /// entered phase, if any.
    pub fn update(&mut self, now: Instant) -> Option<IntroPhase> {
        let elapsed = now.saturating_duration_since(self.mounted_at);
        let before = self.phase;
        for &(from, to, delay) in TRANSITIONS {
            if self.phase == from && elapsed >= delay {
                self.phase = to;
            }
        }
        (self.phase != before).then(|| {
            tracing::debug!("intro phase {} -> {}", before.label(), self.phase.label());
            self.phase
        })
    }

    /// Jump straight to the final layout.
    pub fn skip(&mut self) {
        self.phase = IntroPhase::Circle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walks_through_phases_on_schedule() {
        let t0 = Instant::now();
        let mut intro = IntroSequence::new(t0);
        assert_eq!(intro.update(t0 + Duration::from_millis(499)), None);
        assert_eq!(intro.phase(), IntroPhase::Scatter);
        assert_eq!(
            intro.update(t0 + Duration::from_millis(500)),
            Some(IntroPhase::Line)
        );
        assert_eq!(intro.update(t0 + Duration::from_millis(2000)), None);
        assert_eq!(
            intro.update(t0 + Duration::from_millis(2500)),
            Some(IntroPhase::Circle)
        );
        assert!(intro.is_done());
    }

    #[test]
    fn late_update_jumps_to_circle() {
        let t0 = Instant::now();
        let mut intro = IntroSequence::new(t0);
        assert_eq!(
            intro.update(t0 + Duration::from_secs(10)),
            Some(IntroPhase::Circle)
        );
    }

    #[test]
    fn never_reverses() {
        let t0 = Instant::now();
        let mut intro = IntroSequence::new(t0);
        intro.update(t0 + Duration::from_secs(3));
        // A clock reading before the mount cannot move us back.
        assert_eq!(intro.update(t0), None);
        assert_eq!(intro.phase(), IntroPhase::Circle);

        let mut skipped = IntroSequence::new(t0);
        skipped.skip();
        assert_eq!(skipped.update(t0), None);
        assert!(skipped.is_done());
    }
}
