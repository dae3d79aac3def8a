// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::Easing;

/// A single value transitioning towards a target over a fixed duration.
///
/// Retargeting mid-flight starts a new transition from the current value, so
/// an interrupted exit animation reverses smoothly instead of jumping.
#[derive(Clone, Debug, PartialEq)]
pub struct Tween {
    current: f64,
    start: f64,
    target: f64,
    /// Progress in `[0, 1]`.
    progress: f64,
    /// Duration in seconds.
    duration: f64,
    easing: Easing,
}

impl Tween {
    /// Default duration in seconds.
    pub const DEFAULT_DURATION: f64 = 0.3;

    /// Create a settled tween at `value`.
    #[must_use]
    pub fn new(value: f64, easing: Easing) -> Self {
        Self {
            current: value,
            start: value,
            target: value,
            progress: 1.0,
            duration: Self::DEFAULT_DURATION,
            easing,
        }
    }

    /// Set the duration in seconds.
    #[must_use]
    pub fn with_duration(mut self, duration: f64) -> Self {
        self.duration = duration;
        self
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.current
    }

    /// Value the tween is heading towards.
    #[must_use]
    pub fn target(&self) -> f64 {
        self.target
    }

    /// Duration in seconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Returns `true` once the target has been reached.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.progress >= 1.0
    }

    /// Start transitioning from the current value towards `target`.
    pub fn set_target(&mut self, target: f64) {
        if (target - self.target).abs() > 1e-9 {
            self.start = self.current;
            self.target = target;
            self.progress = 0.0;
        }
    }

    /// Jump to `value` without animating.
    pub fn set_immediate(&mut self, value: f64) {
        self.current = value;
        self.start = value;
        self.target = value;
        self.progress = 1.0;
    }

    /// Advance by `dt` seconds.
    pub fn update(&mut self, dt: f64) {
        if self.is_complete() {
            return;
        }
        if self.duration > 0.0 {
            self.progress += dt / self.duration;
        } else {
            self.progress = 1.0;
        }
        self.progress = self.progress.min(1.0);

        let eased = self.easing.apply(self.progress);
        self.current = self.start + (self.target - self.start) * eased;

        // Snap to target when complete.
        if self.is_complete() {
            self.current = self.target;
        }
    }
}

impl Default for Tween {
    fn default() -> Self {
        Self::new(0.0, Easing::Linear)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tween_is_settled() {
        let t = Tween::new(0.4, Easing::Linear);
        assert_eq!(t.value(), 0.4);
        assert!(t.is_complete());
    }

    #[test]
    fn linear_progress() {
        let mut t = Tween::new(0.0, Easing::Linear).with_duration(1.0);
        t.set_target(10.0);
        assert!(!t.is_complete());
        t.update(0.25);
        assert!((t.value() - 2.5).abs() < 1e-9);
        t.update(0.25);
        assert!((t.value() - 5.0).abs() < 1e-9);
        t.update(10.0);
        assert_eq!(t.value(), 10.0);
        assert!(t.is_complete());
    }

    #[test]
    fn retarget_starts_from_current_value() {
        let mut t = Tween::new(0.0, Easing::Linear).with_duration(1.0);
        t.set_target(1.0);
        t.update(0.5);
        t.set_target(0.0);
        assert!((t.value() - 0.5).abs() < 1e-9);
        t.update(0.5);
        assert!((t.value() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn same_target_does_not_restart() {
        let mut t = Tween::new(0.0, Easing::Linear).with_duration(1.0);
        t.set_target(1.0);
        t.update(0.5);
        t.set_target(1.0);
        t.update(0.5);
        assert!(t.is_complete());
    }

    #[test]
    fn zero_duration_snaps() {
        let mut t = Tween::new(0.0, Easing::EASE_IN_OUT).with_duration(0.0);
        t.set_target(3.0);
        t.update(0.0);
        assert_eq!(t.value(), 3.0);
    }

    #[test]
    fn set_immediate_cancels_motion() {
        let mut t = Tween::new(0.0, Easing::Linear).with_duration(1.0);
        t.set_target(1.0);
        t.set_immediate(0.7);
        assert!(t.is_complete());
        t.update(1.0);
        assert_eq!(t.value(), 0.7);
    }
}
