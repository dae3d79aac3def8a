// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use vitrine_motion::{Easing, Tween};

/// Lifecycle of the lens overlay.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PresencePhase {
    /// Not mounted.
    #[default]
    Hidden,
    /// Mounted and animating in.
    Entering,
    /// Mounted and fully shown.
    Visible,
    /// Still mounted while animating out.
    Exiting,
}

/// Animated style applied to the whole overlay.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PresenceStyle {
    /// Overlay opacity in `[0, 1]`.
    pub opacity: f64,
    /// Uniform overlay scale.
    pub scale: f64,
}

/// Mount/unmount animation for the lens overlay.
///
/// Showing animates opacity and scale from 0 to 1. Hiding animates to
/// opacity 0 and scale 0.8, after which the overlay is unmounted. Showing
/// again while the exit is still running reverses from the current values.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayPresence {
    phase: PresencePhase,
    opacity: Tween,
    scale: Tween,
}

impl OverlayPresence {
    /// Duration of both the enter and the exit animation, in seconds.
    pub const DURATION: f64 = 0.1;
    /// Scale the overlay shrinks to while exiting.
    pub const EXIT_SCALE: f64 = 0.8;

    /// A hidden overlay.
    pub fn new() -> Self {
        let tween = Tween::new(0.0, Easing::EASE_IN_OUT).with_duration(Self::DURATION);
        Self {
            phase: PresencePhase::Hidden,
            opacity: tween.clone(),
            scale: tween,
        }
    }

    /// Current phase.
    pub fn phase(&self) -> PresencePhase {
        self.phase
    }

    /// Returns `true` unless the overlay is fully hidden.
    pub fn is_mounted(&self) -> bool {
        self.phase != PresencePhase::Hidden
    }

    /// Current animated style.
    pub fn style(&self) -> PresenceStyle {
        PresenceStyle {
            opacity: self.opacity.value(),
            scale: self.scale.value(),
        }
    }

    /// Start (or resume) the enter animation.
    pub fn show(&mut self) {
        match self.phase {
            PresencePhase::Entering | PresencePhase::Visible => return,
            PresencePhase::Hidden => {
                self.opacity.set_immediate(0.0);
                self.scale.set_immediate(0.0);
            }
            PresencePhase::Exiting => {}
        }
        self.opacity.set_target(1.0);
        self.scale.set_target(1.0);
        self.phase = PresencePhase::Entering;
    }

    /// Start the exit animation.
    pub fn hide(&mut self) {
        if matches!(self.phase, PresencePhase::Hidden | PresencePhase::Exiting) {
            return;
        }
        self.opacity.set_target(0.0);
        self.scale.set_target(Self::EXIT_SCALE);
        self.phase = PresencePhase::Exiting;
    }

    /// Advance the animation by `dt` seconds.
    ///
    /// Returns `true` while the overlay still needs frames.
    pub fn tick(&mut self, dt: f64) -> bool {
        self.opacity.update(dt);
        self.scale.update(dt);
        let done = self.opacity.is_complete() && self.scale.is_complete();
        match self.phase {
            PresencePhase::Entering if done => self.phase = PresencePhase::Visible,
            PresencePhase::Exiting if done => self.phase = PresencePhase::Hidden,
            _ => {}
        }
        matches!(self.phase, PresencePhase::Entering | PresencePhase::Exiting)
    }
}

impl Default for OverlayPresence {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_hidden() {
        let p = OverlayPresence::new();
        assert_eq!(p.phase(), PresencePhase::Hidden);
        assert!(!p.is_mounted());
        assert_eq!(p.style().opacity, 0.0);
    }

    #[test]
    fn show_mounts_immediately_and_settles() {
        let mut p = OverlayPresence::new();
        p.show();
        assert!(p.is_mounted());
        assert_eq!(p.phase(), PresencePhase::Entering);
        assert!(p.tick(0.05));
        let mid = p.style();
        assert!(mid.opacity > 0.0 && mid.opacity < 1.0);
        assert!(!p.tick(0.05));
        assert_eq!(p.phase(), PresencePhase::Visible);
        assert_eq!(p.style(), PresenceStyle { opacity: 1.0, scale: 1.0 });
    }

    #[test]
    fn hide_stays_mounted_until_exit_finishes() {
        let mut p = OverlayPresence::new();
        p.show();
        p.tick(1.0);
        p.hide();
        assert!(p.is_mounted());
        p.tick(0.05);
        assert_eq!(p.phase(), PresencePhase::Exiting);
        p.tick(0.05);
        assert_eq!(p.phase(), PresencePhase::Hidden);
        assert_eq!(p.style(), PresenceStyle { opacity: 0.0, scale: 0.8 });
    }

    #[test]
    fn reentering_during_exit_reverses_from_current_value() {
        let mut p = OverlayPresence::new();
        p.show();
        p.tick(1.0);
        p.hide();
        p.tick(0.05);
        let before = p.style().opacity;
        p.show();
        assert_eq!(p.phase(), PresencePhase::Entering);
        assert_eq!(p.style().opacity, before);
        p.tick(0.01);
        assert!(p.style().opacity > before);
    }

    #[test]
    fn hide_when_hidden_is_a_noop() {
        let mut p = OverlayPresence::new();
        p.hide();
        assert_eq!(p.phase(), PresencePhase::Hidden);
        assert!(!p.tick(0.1));
    }
}
