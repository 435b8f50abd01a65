//! Fan layout for the card stack.
//!
//! Pure functions from (ordinal, active index, config) to a per-card
//! transform.  All distances are in logical pixels; the UI layer decides
//! how pixels map onto terminal cells.

use serde::{Deserialize, Serialize};

/// Stacking base: the active card gets `Z_BASE`, neighbours one less per rank.
const Z_BASE: i32 = 100;
/// Downward arc per rank away from the centre.
const ARC_STEP_PX: f64 = 10.0;
/// Cards never get closer than this, whatever the overlap.
const MIN_SPACING_PX: f64 = 10.0;

// ───────────────────────────────────────── indices ───────────

/// Wrap `n` into `[0, len)`.  Returns 0 for an empty collection.
pub fn wrap_index(n: i64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    n.rem_euclid(len as i64) as usize
}

/// Offset of item `i` relative to `active`.  When looping, takes the shorter
/// way around the ring (ties keep the direct path).
pub fn signed_offset(i: usize, active: usize, len: usize, looping: bool) -> i64 {
    let raw = i as i64 - active as i64;
    if !looping || len <= 1 {
        return raw;
    }
    let alt = if raw > 0 { raw - len as i64 } else { raw + len as i64 };
    if alt.abs() < raw.abs() {
        alt
    } else {
        raw
    }
}

// ───────────────────────────────────────── config ────────────

/// Geometry options of the card stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FanConfig {
    /// Cards visible around the active one (odd recommended).
    pub max_visible: usize,
    pub card_width: f64,
    pub card_height: f64,
    /// How much neighbours overlap (0..0.8).
    pub overlap: f64,
    /// Total fan angle in degrees.
    pub spread_deg: f64,
    pub perspective_px: f64,
    pub depth_px: f64,
    pub tilt_x_deg: f64,
    pub active_lift_px: f64,
    pub active_scale: f64,
    pub inactive_scale: f64,
}

impl Default for FanConfig {
    fn default() -> Self {
        Self {
            max_visible: 7,
            card_width: 320.0,
            card_height: 420.0,
            overlap: 0.48,
            spread_deg: 48.0,
            perspective_px: 1100.0,
            depth_px: 140.0,
            tilt_x_deg: 12.0,
            active_lift_px: 22.0,
            active_scale: 1.03,
            inactive_scale: 0.94,
        }
    }
}

impl FanConfig {
    /// Largest |offset| that is still rendered.
    pub fn visibility_radius(&self) -> i64 {
        (self.max_visible / 2) as i64
    }

    /// Card width, or the default when the configured one is unusable.
    pub fn effective_width(&self) -> f64 {
        if self.card_width.is_finite() && self.card_width > 0.0 {
            self.card_width
        } else {
            Self::default().card_width
        }
    }

    pub fn effective_height(&self) -> f64 {
        if self.card_height.is_finite() && self.card_height > 0.0 {
            self.card_height
        } else {
            Self::default().card_height
        }
    }

    /// Horizontal distance between neighbouring cards.
    pub fn spacing(&self) -> f64 {
        let overlap = self.overlap.clamp(0.0, 0.95);
        (self.effective_width() * (1.0 - overlap))
            .round()
            .max(MIN_SPACING_PX)
    }

    /// Rotation per rank in degrees.
    pub fn step_deg(&self) -> f64 {
        let radius = self.visibility_radius();
        if radius > 0 {
            self.spread_deg / radius as f64
        } else {
            0.0
        }
    }
}

// ───────────────────────────────────────── transforms ────────

/// The animatable part of any placement: what the render surface springs
/// toward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub x: f64,
    pub y: f64,
    pub rotation: f64,
    pub scale: f64,
    pub opacity: f64,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale: 1.0,
            opacity: 1.0,
        }
    }
}

/// Target placement of one card.  Ephemeral: recomputed every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FanTransform {
    pub x: f64,
    pub y: f64,
    /// Depth (cosmetic, only meaningful inside a 3D context).
    pub z: f64,
    pub rotation: f64,
    pub tilt_x: f64,
    pub scale: f64,
    pub opacity: f64,
    pub z_index: i32,
}

impl FanTransform {
    pub fn planar(&self) -> Transform {
        Transform {
            x: self.x,
            y: self.y,
            rotation: self.rotation,
            scale: self.scale,
            opacity: self.opacity,
        }
    }
}

/// Transform for a card at `offset` ranks from the active one.
pub fn fan_transform(offset: i64, cfg: &FanConfig) -> FanTransform {
    let rank = offset.abs();
    let active = offset == 0;
    let lift = if active { cfg.active_lift_px } else { 0.0 };

    FanTransform {
        x: offset as f64 * cfg.spacing(),
        y: rank as f64 * ARC_STEP_PX - lift,
        z: -(rank as f64) * cfg.depth_px,
        rotation: offset as f64 * cfg.step_deg(),
        tilt_x: if active { 0.0 } else { cfg.tilt_x_deg },
        scale: if active { cfg.active_scale } else { cfg.inactive_scale },
        opacity: 1.0,
        z_index: Z_BASE - rank as i32,
    }
}

/// A card that survived the visibility cut.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedCard {
    pub index: usize,
    pub offset: i64,
    pub transform: FanTransform,
}

impl PlacedCard {
    pub fn is_active(&self) -> bool {
        self.offset == 0
    }
}

/// Every card within the visibility radius, in paint order (furthest first,
/// active last so it draws on top).
pub fn visible_cards(len: usize, active: usize, looping: bool, cfg: &FanConfig) -> Vec<PlacedCard> {
    if len == 0 {
        return Vec::new();
    }
    let active = active.min(len - 1);
    let radius = cfg.visibility_radius();

    let mut cards: Vec<PlacedCard> = (0..len)
        .filter_map(|index| {
            let offset = signed_offset(index, active, len, looping);
            (offset.abs() <= radius).then(|| PlacedCard {
                index,
                offset,
                transform: fan_transform(offset, cfg),
            })
        })
        .collect();

    cards.sort_by_key(|c| (c.transform.z_index, c.offset));
    cards
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn wrap_handles_negatives_and_empty() {
        assert_eq!(wrap_index(-1, 5), 4);
        assert_eq!(wrap_index(7, 5), 2);
        assert_eq!(wrap_index(3, 0), 0);
    }

    #[test]
    fn offset_of_active_is_zero() {
        for len in 1..8 {
            for active in 0..len {
                assert_eq!(signed_offset(active, active, len, true), 0);
                assert_eq!(signed_offset(active, active, len, false), 0);
                let zeros = (0..len)
                    .filter(|&i| signed_offset(i, active, len, true) == 0)
                    .count();
                assert_eq!(zeros, 1);
            }
        }
    }

    #[test]
    fn looping_offset_takes_short_way() {
        assert_eq!(signed_offset(4, 0, 5, true), -1);
        assert_eq!(signed_offset(0, 4, 5, true), 1);
        assert_eq!(signed_offset(4, 0, 5, false), 4);
        // Tie on an even ring keeps the direct path.
        assert_eq!(signed_offset(2, 0, 4, true), 2);
    }

    #[test]
    fn fan_geometry_matches_defaults() {
        let cfg = FanConfig::default();
        assert!(approx(cfg.spacing(), 166.0)); // round(320 * 0.52)
        assert!(approx(cfg.step_deg(), 16.0));

        let active = fan_transform(0, &cfg);
        assert!(approx(active.x, 0.0));
        assert!(approx(active.y, -22.0));
        assert!(approx(active.scale, 1.03));
        assert!(approx(active.tilt_x, 0.0));
        assert_eq!(active.z_index, 100);

        let left = fan_transform(-2, &cfg);
        assert!(approx(left.x, -332.0));
        assert!(approx(left.y, 20.0));
        assert!(approx(left.z, -280.0));
        assert!(approx(left.rotation, -32.0));
        assert!(approx(left.scale, 0.94));
        assert_eq!(left.z_index, 98);
    }

    #[test]
    fn spacing_never_collapses() {
        let cfg = FanConfig {
            card_width: 12.0,
            overlap: 0.9,
            ..Default::default()
        };
        assert!(approx(cfg.spacing(), MIN_SPACING_PX));
    }

    #[test]
    fn zero_width_falls_back_to_default() {
        let cfg = FanConfig {
            card_width: 0.0,
            card_height: f64::NAN,
            ..Default::default()
        };
        assert!(approx(cfg.effective_width(), 320.0));
        assert!(approx(cfg.effective_height(), 420.0));
    }

    #[test]
    fn single_visible_card_has_no_rotation() {
        let cfg = FanConfig {
            max_visible: 1,
            ..Default::default()
        };
        assert_eq!(cfg.visibility_radius(), 0);
        assert!(approx(fan_transform(0, &cfg).rotation, 0.0));
    }

    #[test]
    fn visibility_boundary_is_inclusive() {
        let cfg = FanConfig::default(); // radius 3
        let cards = visible_cards(10, 0, false, &cfg);
        let indices: Vec<_> = cards.iter().map(|c| c.index).collect();
        assert!(indices.contains(&3));
        assert!(!indices.contains(&4));
        assert_eq!(cards.len(), 4);

        let looped = visible_cards(10, 0, true, &cfg);
        let mut indices: Vec<_> = looped.iter().map(|c| c.index).collect();
        indices.sort();
        assert_eq!(indices, vec![0, 1, 2, 3, 7, 8, 9]);
    }

    #[test]
    fn active_card_paints_last() {
        let cards = visible_cards(5, 2, true, &FanConfig::default());
        let last = cards.last().unwrap();
        assert!(last.is_active());
        assert_eq!(last.index, 2);
        assert_eq!(cards.iter().filter(|c| c.is_active()).count(), 1);
    }

    #[test]
    fn empty_collection_renders_nothing() {
        assert!(visible_cards(0, 0, true, &FanConfig::default()).is_empty());
    }

    #[test]
    fn transforms_are_deterministic() {
        let cfg = FanConfig::default();
        assert_eq!(visible_cards(9, 4, true, &cfg), visible_cards(9, 4, true, &cfg));
    }
}
