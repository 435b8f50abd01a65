//! Spring transitions for the render surface.
//!
//! A target change never restarts the motion: the spring keeps its current
//! value and velocity and simply pulls toward the new target.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::geometry::Transform;

/// Largest integration step; longer frames are split into sub-steps.
const MAX_STEP_SECS: f64 = 1.0 / 240.0;
/// Frames longer than this (e.g. after a suspend) are truncated.
const MAX_FRAME_SECS: f64 = 0.25;
/// Below these the value is considered at rest.
const REST_DELTA: f64 = 1e-3;
const REST_SPEED: f64 = 1e-2;

/// Spring parameters (unit mass).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Spring {
    pub stiffness: f64,
    pub damping: f64,
}

impl Spring {
    pub const fn new(stiffness: f64, damping: f64) -> Self {
        Self { stiffness, damping }
    }

    /// Damping at which this spring stops overshooting.
    pub fn critical_damping(&self) -> f64 {
        2.0 * self.stiffness.max(0.0).sqrt()
    }
}

impl Default for Spring {
    fn default() -> Self {
        Self::new(280.0, 28.0)
    }
}

/// One animated scalar.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringValue {
    value: f64,
    velocity: f64,
    target: f64,
}

impl SpringValue {
    pub fn new(value: f64) -> Self {
        Self {
            value,
            velocity: 0.0,
            target: value,
        }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    pub fn target(&self) -> f64 {
        self.target
    }

    pub fn retarget(&mut self, target: f64) {
        self.target = target;
    }

    /// Jump to `value` and stop.
    pub fn snap(&mut self, value: f64) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < REST_DELTA && self.velocity.abs() < REST_SPEED
    }

    pub fn step(&mut self, spring: &Spring, dt: Duration) {
        if self.is_settled() {
            self.snap(self.target);
            return;
        }
        let mut remaining = dt.as_secs_f64().min(MAX_FRAME_SECS);
        while remaining > 0.0 {
            let h = remaining.min(MAX_STEP_SECS);
            let accel = -spring.stiffness * (self.value - self.target) - spring.damping * self.velocity;
            self.velocity += accel * h;
            self.value += self.velocity * h;
            remaining -= h;
        }
        if self.is_settled() {
            self.snap(self.target);
        }
    }
}

/// Springs for every channel of a [`Transform`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimatedTransform {
    x: SpringValue,
    y: SpringValue,
    rotation: SpringValue,
    scale: SpringValue,
    opacity: SpringValue,
}

impl AnimatedTransform {
    pub fn new(initial: Transform) -> Self {
        Self {
            x: SpringValue::new(initial.x),
            y: SpringValue::new(initial.y),
            rotation: SpringValue::new(initial.rotation),
            scale: SpringValue::new(initial.scale),
            opacity: SpringValue::new(initial.opacity),
        }
    }

    fn channels_mut(&mut self) -> [&mut SpringValue; 5] {
        [
            &mut self.x,
            &mut self.y,
            &mut self.rotation,
            &mut self.scale,
            &mut self.opacity,
        ]
    }

    pub fn set_target(&mut self, target: Transform) {
        let values = [target.x, target.y, target.rotation, target.scale, target.opacity];
        for (channel, v) in self.channels_mut().into_iter().zip(values) {
            channel.retarget(v);
        }
    }

    pub fn snap_to(&mut self, target: Transform) {
        let values = [target.x, target.y, target.rotation, target.scale, target.opacity];
        for (channel, v) in self.channels_mut().into_iter().zip(values) {
            channel.snap(v);
        }
    }

    pub fn step(&mut self, spring: &Spring, dt: Duration) {
        for channel in self.channels_mut() {
            channel.step(spring, dt);
        }
    }

    pub fn current(&self) -> Transform {
        Transform {
            x: self.x.value(),
            y: self.y.value(),
            rotation: self.rotation.value(),
            scale: self.scale.value(),
            opacity: self.opacity.value().clamp(0.0, 1.0),
        }
    }

    pub fn target(&self) -> Transform {
        Transform {
            x: self.x.target(),
            y: self.y.target(),
            rotation: self.rotation.target(),
            scale: self.scale.target(),
            opacity: self.opacity.target(),
        }
    }

    pub fn is_settled(&self) -> bool {
        [self.x, self.y, self.rotation, self.scale, self.opacity]
            .iter()
            .all(SpringValue::is_settled)
    }
}
