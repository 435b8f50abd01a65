//! Morphing text swap for the hero title.
//!
//! Cycles through a list of words: each word rests for `cooldown`, then
//! cross-fades into the next over `morph_time`.  Driven by frame deltas.

use std::time::Duration;

/// Blur never exceeds this many (virtual) pixels.
const MAX_BLUR: f64 = 100.0;

/// What to draw this frame: two overlapping words and their weights.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GooeyFrame<'a> {
    pub outgoing: &'a str,
    pub incoming: &'a str,
    pub outgoing_opacity: f64,
    pub incoming_opacity: f64,
    pub outgoing_blur: f64,
    pub incoming_blur: f64,
}

#[derive(Debug, Clone)]
pub struct GooeyText {
    texts: Vec<String>,
    morph_time: f64,
    cooldown_time: f64,
    index: usize,
    morph: f64,
    cooldown: f64,
    /// `None` while resting between morphs.
    fraction: Option<f64>,
}

fn blur_for(fraction: f64) -> f64 {
    if fraction <= 0.0 {
        return MAX_BLUR;
    }
    (8.0 / fraction - 8.0).min(MAX_BLUR)
}

impl GooeyText {
    pub fn new(texts: Vec<String>, morph_time: f64, cooldown_time: f64) -> Self {
        let index = texts.len().saturating_sub(1);
        let cooldown_time = cooldown_time.max(0.0);
        Self {
            texts,
            morph_time: morph_time.max(1e-3),
            cooldown_time,
            index,
            morph: 0.0,
            cooldown: cooldown_time,
            fraction: None,
        }
    }

    pub fn is_morphing(&self) -> bool {
        self.fraction.is_some()
    }

    pub fn tick(&mut self, dt: Duration) {
        if self.texts.is_empty() {
            return;
        }
        let dt = dt.as_secs_f64();
        let should_increment = self.cooldown > 0.0;
        self.cooldown -= dt;

        if self.cooldown <= 0.0 {
            if should_increment {
                self.index = (self.index + 1) % self.texts.len();
            }
            self.morph -= self.cooldown;
            self.cooldown = 0.0;
            let mut fraction = self.morph / self.morph_time;
            if fraction > 1.0 {
                self.cooldown = self.cooldown_time;
                fraction = 1.0;
            }
            self.fraction = Some(fraction);
        } else {
            self.morph = 0.0;
            self.fraction = None;
        }
    }

    pub fn frame(&self) -> Option<GooeyFrame<'_>> {
        let len = self.texts.len();
        if len == 0 {
            return None;
        }
        let outgoing = &self.texts[self.index % len];
        let incoming = &self.texts[(self.index + 1) % len];

        Some(match self.fraction {
            None => GooeyFrame {
                outgoing,
                incoming,
                outgoing_opacity: 0.0,
                incoming_opacity: 1.0,
                outgoing_blur: 0.0,
                incoming_blur: 0.0,
            },
            Some(f) => GooeyFrame {
                outgoing,
                incoming,
                outgoing_opacity: (1.0 - f).max(0.0).powf(0.4),
                incoming_opacity: f.max(0.0).powf(0.4),
                outgoing_blur: blur_for(1.0 - f),
                incoming_blur: blur_for(f),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words() -> Vec<String> {
        vec!["SHOW".into(), "REEL".into()]
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn empty_renders_nothing() {
        let mut g = GooeyText::new(Vec::new(), 1.0, 0.25);
        g.tick(ms(500));
        assert!(g.frame().is_none());
    }

    #[test]
    fn rests_on_first_word() {
        let g = GooeyText::new(words(), 1.0, 0.25);
        let f = g.frame().unwrap();
        assert_eq!(f.incoming, "SHOW");
        assert_eq!(f.incoming_opacity, 1.0);
        assert_eq!(f.outgoing_opacity, 0.0);
    }

    #[test]
    fn morphs_to_next_word_then_rests() {
        let mut g = GooeyText::new(words(), 1.0, 0.25);
        g.tick(ms(100));
        assert!(!g.is_morphing());

        g.tick(ms(200)); // cooldown exhausted, 50ms into the morph
        assert!(g.is_morphing());
        let f = g.frame().unwrap();
        assert_eq!(f.outgoing, "SHOW");
        assert_eq!(f.incoming, "REEL");
        assert!(f.incoming_opacity > 0.0 && f.incoming_opacity < 1.0);
        assert!(f.outgoing_opacity > f.incoming_opacity);

        for _ in 0..10 {
            g.tick(ms(100));
        }
        // Morph completed and the next rest period has begun.
        let f = g.frame().unwrap();
        assert_eq!(f.incoming, "REEL");
        assert_eq!(f.incoming_opacity, 1.0);
    }

    #[test]
    fn cycles_back_around() {
        let mut g = GooeyText::new(words(), 0.5, 0.25);
        let mut seen = Vec::new();
        for _ in 0..100 {
            g.tick(ms(50));
            if let Some(f) = g.frame() {
                if seen.last().map(String::as_str) != Some(f.incoming) {
                    seen.push(f.incoming.to_string());
                }
            }
        }
        assert!(seen.len() >= 3);
        assert_eq!(seen[0], "SHOW");
        assert_eq!(seen[1], "REEL");
        assert_eq!(seen[2], "SHOW");
    }

    #[test]
    fn blur_is_capped() {
        assert_eq!(blur_for(0.0), MAX_BLUR);
        assert_eq!(blur_for(1.0), 0.0);
        assert!(blur_for(0.01) <= MAX_BLUR);
    }
}
