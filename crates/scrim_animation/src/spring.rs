//! Spring physics
//!
//! A damped harmonic oscillator integrated with RK4. Retargeting keeps the
//! current value and velocity, which is what lets an exit animation turn
//! around mid-flight without a jump.

use serde::{Deserialize, Serialize};

/// Spring parameters
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// The modal spring: quick with a small overshoot
    pub fn modal() -> Self {
        Self::new(200.0, 20.0, 1.0)
    }

    /// Damping at which the spring stops oscillating
    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Check if the spring overshoots its target
    pub fn is_underdamped(&self) -> bool {
        self.damping < self.critical_damping()
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::modal()
    }
}

// Pixel-scale rest thresholds
const DEFAULT_REST_DELTA: f32 = 0.5;
const DEFAULT_REST_SPEED: f32 = 5.0;

/// A single spring-driven value
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
    rest_delta: f32,
    rest_speed: f32,
}

impl Spring {
    /// Create a spring resting at `initial`
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
            rest_delta: DEFAULT_REST_DELTA,
            rest_speed: DEFAULT_REST_SPEED,
        }
    }

    /// Override the rest thresholds
    ///
    /// Unit-range values (opacity, progress) need far tighter thresholds than
    /// the pixel-scale defaults.
    pub fn with_precision(mut self, rest_delta: f32, rest_speed: f32) -> Self {
        self.rest_delta = rest_delta;
        self.rest_speed = rest_speed;
        self
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Move the target; the current value and velocity are kept
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Jump to `value` at rest
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
    }

    /// Close enough to the target and slow enough to stop
    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < self.rest_delta
            && self.velocity.abs() < self.rest_speed
    }

    /// Advance by `dt` seconds (RK4)
    pub fn step(&mut self, dt: f32) {
        if self.is_settled() {
            self.snap_to(self.target);
            return;
        }

        let (x, v) = (self.value, self.velocity);
        let k1 = (v, self.acceleration(x, v));
        let k2 = self.derivative(x, v, k1, dt * 0.5);
        let k3 = self.derivative(x, v, k2, dt * 0.5);
        let k4 = self.derivative(x, v, k3, dt);

        self.value += dt / 6.0 * (k1.0 + 2.0 * (k2.0 + k3.0) + k4.0);
        self.velocity += dt / 6.0 * (k1.1 + 2.0 * (k2.1 + k3.1) + k4.1);
    }

    /// (dx/dt, dv/dt) after moving along `slope` for `h` seconds
    fn derivative(&self, x: f32, v: f32, slope: (f32, f32), h: f32) -> (f32, f32) {
        let v = v + slope.1 * h;
        (v, self.acceleration(x + slope.0 * h, v))
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let spring = -self.config.stiffness * (x - self.target);
        let damping = -self.config.damping * v;
        (spring + damping) / self.config.mass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    #[test]
    fn test_settles_to_target() {
        let mut spring = Spring::new(SpringConfig::new(400.0, 30.0, 1.0), 0.0);
        spring.set_target(100.0);

        for _ in 0..120 {
            spring.step(FRAME);
        }

        assert!(spring.is_settled());
        assert!((spring.value() - 100.0).abs() < 0.5);
    }

    #[test]
    fn test_retarget_keeps_velocity() {
        let mut spring = Spring::new(SpringConfig::modal(), 0.0);
        spring.set_target(100.0);

        for _ in 0..10 {
            spring.step(FRAME);
        }
        let velocity = spring.velocity();
        let value = spring.value();
        assert!(velocity > 0.0);

        spring.set_target(0.0);
        assert_eq!(spring.velocity(), velocity);
        assert_eq!(spring.value(), value);
    }

    #[test]
    fn test_modal_spring_overshoots() {
        assert!(SpringConfig::modal().is_underdamped());
        assert!(!SpringConfig::new(100.0, 40.0, 1.0).is_underdamped());
        assert_eq!(SpringConfig::default(), SpringConfig::new(200.0, 20.0, 1.0));
    }

    #[test]
    fn test_unit_precision_settles() {
        let mut spring = Spring::new(SpringConfig::modal(), 0.0).with_precision(0.001, 0.01);
        spring.set_target(1.0);

        let mut steps = 0;
        while !spring.is_settled() && steps < 600 {
            spring.step(1.0 / 120.0);
            steps += 1;
        }

        assert!(spring.is_settled());
        assert!((spring.value() - 1.0).abs() < 0.001);
        // Takes visible time rather than snapping
        assert!(steps > 10);
    }

    #[test]
    fn test_snap_to_rests() {
        let mut spring = Spring::new(SpringConfig::modal(), 0.0);
        spring.set_target(10.0);
        spring.step(FRAME);

        spring.snap_to(3.0);
        assert_eq!(spring.value(), 3.0);
        assert_eq!(spring.target(), 3.0);
        assert_eq!(spring.velocity(), 0.0);
        assert!(spring.is_settled());
    }

    #[test]
    fn test_large_steps_stay_bounded() {
        let mut spring = Spring::new(SpringConfig::new(400.0, 30.0, 1.0), 0.0);
        spring.set_target(1000.0);

        for _ in 0..100 {
            spring.step(0.1);
            assert!(spring.value().is_finite());
            assert!(spring.value() < 2000.0);
            assert!(spring.value() > -500.0);
        }
    }

    #[test]
    fn test_heavier_mass_still_settles() {
        let mut spring = Spring::new(SpringConfig::new(400.0, 25.0, 2.0), 0.0);
        spring.set_target(100.0);

        for _ in 0..240 {
            spring.step(FRAME);
        }

        assert!(spring.is_settled());
    }
}
