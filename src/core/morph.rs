//! Circle → arc morph for the tools showcase.
//!
//! Each tile has two analytic positions: evenly spaced on a ring, and evenly
//! spaced along an arc anchored below the viewport.  The rendered position is
//! a plain lerp between the two, driven by the scroll-derived progress.

use std::f64::consts::PI;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::geometry::Transform;
use super::intro::IntroPhase;

/// Used whenever the container reports a zero dimension.
pub const DEFAULT_VIEWPORT: Viewport = Viewport {
    width: 1280.0,
    height: 800.0,
};

/// Spread the fade window below was tuned for.
const REFERENCE_SPREAD_DEG: f64 = 130.0;
/// Half-width of the fully opaque window around the arc apex (-90°).
const FADE_HALF_WINDOW_DEG: f64 = 60.0;
/// Angular distance over which tiles fade out past the window edge.
const FADE_TOLERANCE_DEG: f64 = 20.0;

// ───────────────────────────────────────── viewport ──────────

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    /// A viewport with unusable dimensions falls back to the default.
    pub fn new(width: f64, height: f64) -> Self {
        if width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0 {
            Self { width, height }
        } else {
            DEFAULT_VIEWPORT
        }
    }

    /// Narrow layouts use a tighter arc and smaller tiles.
    pub fn is_compact(&self) -> bool {
        self.width < 768.0
    }
}

// ───────────────────────────────────────── config ────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphConfig {
    /// Length of the pinned scroll region (virtual pixels).
    pub scroll_range: f64,
    /// Scroll offset at which the circle → arc morph completes.
    pub morph_end: f64,
    /// Arc spread in degrees.  `None` picks 100° (compact) or 130°.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spread_deg: Option<f64>,
    /// Upper bound for the ring radius.
    pub max_circle_radius: f64,
    /// Gap between tiles in the intro line.
    pub line_spacing: f64,
    /// Pointer parallax amplitude at the container edges.
    pub parallax_px: f64,
}

impl Default for MorphConfig {
    fn default() -> Self {
        Self {
            scroll_range: 2000.0,
            morph_end: 600.0,
            spread_deg: None,
            max_circle_radius: 450.0,
            line_spacing: 70.0,
            parallax_px: 100.0,
        }
    }
}

impl MorphConfig {
    pub fn spread(&self, vp: &Viewport) -> f64 {
        match self.spread_deg {
            Some(deg) if deg.is_finite() && deg > 0.0 => deg,
            _ if vp.is_compact() => 100.0,
            _ => REFERENCE_SPREAD_DEG,
        }
    }
}

/// Scalar drivers for one frame of the morph.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MorphInput {
    /// 0 = circle, 1 = arc.
    pub progress: f64,
    /// 0..1 rotation of the arc once the morph is done.
    pub rotate: f64,
    /// Horizontal pointer offset in pixels.
    pub parallax: f64,
}

// ───────────────────────────────────────── layouts ───────────

pub fn lerp(start: f64, end: f64, t: f64) -> f64 {
    start * (1.0 - t) + end * t
}

/// Ring placement: angle = i / total × 360°.
pub fn circle_position(i: usize, total: usize, vp: &Viewport, cfg: &MorphConfig) -> Transform {
    let radius = (vp.width.min(vp.height) * 0.48).min(cfg.max_circle_radius);
    let angle = if total == 0 {
        0.0
    } else {
        i as f64 / total as f64 * 360.0
    };
    let rad = angle.to_radians();
    Transform {
        x: rad.cos() * radius,
        y: rad.sin() * radius,
        rotation: angle + 90.0,
        scale: 1.0,
        opacity: 1.0,
    }
}

/// Arc placement plus the tile's current angle on the arc in degrees.
pub fn arc_position(
    i: usize,
    total: usize,
    vp: &Viewport,
    input: &MorphInput,
    cfg: &MorphConfig,
) -> (Transform, f64) {
    let compact = vp.is_compact();
    let base = vp.width.min(vp.height * 1.5);
    let radius = base * if compact { 1.4 } else { 1.1 };
    let apex_y = vp.height * if compact { 0.35 } else { 0.25 };
    let center_y = apex_y + radius;

    let spread = cfg.spread(vp);
    let start = -90.0 - spread / 2.0;
    let step = if total > 1 {
        spread / (total - 1) as f64
    } else {
        0.0
    };
    let rotation = -input.rotate.clamp(0.0, 1.0) * spread * 0.8;

    let angle = start + i as f64 * step + rotation;
    let rad = angle * PI / 180.0;

    let transform = Transform {
        x: rad.cos() * radius + input.parallax,
        y: rad.sin() * radius + center_y,
        rotation: angle + 90.0,
        scale: if compact { 1.4 } else { 1.8 },
        opacity: 1.0,
    };
    (transform, angle)
}

/// Opacity for a tile at `angle` on an arc of `spread` degrees.  Fully
/// opaque inside the window around the apex, linear falloff outside it.
/// The window scales with the spread; at 130° it is [-150°, -30°].
pub fn angle_opacity(angle: f64, spread: f64) -> f64 {
    let k = spread / REFERENCE_SPREAD_DEG;
    let low = -90.0 - FADE_HALF_WINDOW_DEG * k;
    let high = -90.0 + FADE_HALF_WINDOW_DEG * k;
    let tolerance = (FADE_TOLERANCE_DEG * k).max(f64::EPSILON);

    if angle < low {
        (1.0 - (low - angle) / tolerance).max(0.0)
    } else if angle > high {
        (1.0 - (angle - high) / tolerance).max(0.0)
    } else {
        1.0
    }
}

/// Lerp between the ring and the arc.  The angular fade only kicks in past
/// the halfway point of the morph.
pub fn morph_transform(
    i: usize,
    total: usize,
    vp: &Viewport,
    input: &MorphInput,
    cfg: &MorphConfig,
) -> Transform {
    let t = input.progress.clamp(0.0, 1.0);
    let circle = circle_position(i, total, vp, cfg);
    let (arc, angle) = arc_position(i, total, vp, input, cfg);

    Transform {
        x: lerp(circle.x, arc.x, t),
        y: lerp(circle.y, arc.y, t),
        rotation: lerp(circle.rotation, arc.rotation, t),
        scale: lerp(1.0, arc.scale, t),
        opacity: if t > 0.5 {
            angle_opacity(angle, cfg.spread(vp))
        } else {
            1.0
        },
    }
}

/// Random start positions, fixed for the lifetime of one mount.
pub fn scatter_layout<R: Rng>(total: usize, rng: &mut R) -> Vec<Transform> {
    (0..total)
        .map(|_| Transform {
            x: (rng.gen::<f64>() - 0.5) * 1500.0,
            y: (rng.gen::<f64>() - 0.5) * 1000.0,
            rotation: (rng.gen::<f64>() - 0.5) * 180.0,
            scale: 0.6,
            opacity: 0.0,
        })
        .collect()
}

/// Single horizontal line, centred on the origin.
pub fn line_position(i: usize, total: usize, cfg: &MorphConfig) -> Transform {
    let width = total as f64 * cfg.line_spacing;
    Transform {
        x: i as f64 * cfg.line_spacing - width / 2.0,
        ..Transform::default()
    }
}

/// Target for tile `i` given the intro phase.  `scatter` must hold one
/// entry per tile; a missing entry falls back to the origin.
pub fn tools_target(
    phase: IntroPhase,
    i: usize,
    total: usize,
    scatter: &[Transform],
    vp: &Viewport,
    input: &MorphInput,
    cfg: &MorphConfig,
) -> Transform {
    match phase {
        IntroPhase::Scatter => scatter.get(i).copied().unwrap_or_default(),
        IntroPhase::Line => line_position(i, total, cfg),
        IntroPhase::Circle => morph_transform(i, total, vp, input, cfg),
    }
}
