// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Physical parameters of a [`Spring`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpringConfig {
    /// Spring constant.
    pub stiffness: f64,
    /// Damping coefficient.
    pub damping: f64,
    /// Mass of the animated value.
    pub mass: f64,
    /// Distance from the target below which the spring may come to rest.
    pub rest_delta: f64,
    /// Speed below which the spring may come to rest.
    pub rest_speed: f64,
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 20.0,
            mass: 1.0,
            rest_delta: 1e-3,
            rest_speed: 1e-2,
        }
    }
}

/// A damped spring pulling a value towards its target.
///
/// Integration runs in fixed sub-steps so the result does not depend on how
/// the host slices frame time.
#[derive(Clone, Debug, PartialEq)]
pub struct Spring {
    config: SpringConfig,
    value: f64,
    velocity: f64,
    target: f64,
    /// Leftover time that did not fill a whole sub-step.
    carry: f64,
}

impl Spring {
    /// Fixed integration step in seconds.
    const STEP: f64 = 1.0 / 240.0;

    /// Create a spring resting at `value`.
    #[must_use]
    pub fn new(value: f64, config: SpringConfig) -> Self {
        Self {
            config,
            value,
            velocity: 0.0,
            target: value,
            carry: 0.0,
        }
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Current velocity (units per second).
    #[must_use]
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Value the spring is pulled towards.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Change the target, keeping current value and velocity.
    pub fn set_target(&mut self, target: f64) {
        self.target = target;
    }

    /// Jump to `value` and stop.
    pub fn set_immediate(&mut self, value: f64) {
        self.value = value;
        self.target = value;
        self.velocity = 0.0;
        self.carry = 0.0;
    }

    /// Returns `true` when the spring is at rest on its target.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        (self.target - self.value).abs() <= self.config.rest_delta
            && self.velocity.abs() <= self.config.rest_speed
    }

    /// Advance by `dt` seconds.
    pub fn update(&mut self, dt: f64) {
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
            return;
        }
        self.carry += dt.max(0.0);
        // The epsilon absorbs rounding when hosts pass multiples of the step.
        while self.carry + 1e-9 >= Self::STEP {
            self.carry -= Self::STEP;
            self.step(Self::STEP);
            if self.is_settled() {
                self.value = self.target;
                self.velocity = 0.0;
                self.carry = 0.0;
                break;
            }
        }
    }

    fn step(&mut self, h: f64) {
        let SpringConfig {
            stiffness,
            damping,
            mass,
            ..
        } = self.config;
        let displacement = self.value - self.target;
        let accel = (-stiffness * displacement - damping * self.velocity) / mass;
        self.velocity += accel * h;
        self.value += self.velocity * h;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resting_spring_stays_put() {
        let mut s = Spring::new(2.0, SpringConfig::default());
        s.update(1.0);
        assert_eq!(s.value(), 2.0);
        assert!(s.is_settled());
    }

    #[test]
    fn spring_converges_to_target() {
        let mut s = Spring::new(0.0, SpringConfig::default());
        s.set_target(1.0);
        for _ in 0..120 {
            s.update(1.0 / 60.0);
        }
        assert!(s.is_settled(), "value={} velocity={}", s.value(), s.velocity());
        assert_eq!(s.value(), 1.0);
    }

    #[test]
    fn critically_damped_default_does_not_overshoot_much() {
        let mut s = Spring::new(0.0, SpringConfig::default());
        s.set_target(1.0);
        let mut max = 0.0_f64;
        for _ in 0..240 {
            s.update(1.0 / 120.0);
            max = max.max(s.value());
        }
        assert!(max <= 1.01, "overshoot to {max}");
    }

    #[test]
    fn frame_slicing_does_not_matter() {
        let mut a = Spring::new(0.0, SpringConfig::default());
        let mut b = a.clone();
        a.set_target(5.0);
        b.set_target(5.0);
        a.update(0.1);
        for _ in 0..24 {
            b.update(0.1 / 24.0);
        }
        assert!((a.value() - b.value()).abs() < 1e-6);
    }

    #[test]
    fn set_immediate_stops_motion() {
        let mut s = Spring::new(0.0, SpringConfig::default());
        s.set_target(1.0);
        s.update(0.05);
        s.set_immediate(0.3);
        assert!(s.is_settled());
        assert_eq!(s.velocity(), 0.0);
    }
}
