// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Press recognition: tell a quick tap from a press-and-hold.
//!
//! Touch-first gallery views use taps and holds for different things (open
//! an artwork versus save it), so a press has to be classified once it is
//! released or once it has lasted long enough.
//!
//! ## Usage
//!
//! 1) Call [`PressState::on_down`] with the pressed target, position and a
//!    millisecond timestamp.
//! 2) Forward moves to [`PressState::on_move`]; moving further than
//!    [`PressConfig::slop`] cancels the press.
//! 3) From a timer, call [`PressState::poll`]; it reports the target once
//!    when the press has lasted [`PressConfig::hold_ms`].
//! 4) On release, [`PressState::on_up`] returns the classification.
//!
//! ```
//! use kurbo::Point;
//! use vitrine_event_state::press::{PressResult, PressState};
//!
//! let mut press = PressState::default();
//! press.on_down("artwork-4", Point::new(40.0, 40.0), 0);
//! assert_eq!(press.poll(200), None);
//! assert_eq!(press.poll(520), Some("artwork-4"));
//! // The hold is only reported once.
//! assert_eq!(press.poll(600), None);
//! assert_eq!(press.on_up(Point::new(41.0, 40.0), 900), PressResult::HoldEnded("artwork-4"));
//! ```

use kurbo::Point;

/// Thresholds used to classify presses.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PressConfig {
    /// Minimum press duration, in milliseconds, for a hold.
    pub hold_ms: u64,
    /// Maximum pointer travel, in pixels, before the press is cancelled.
    pub slop: f64,
}

impl Default for PressConfig {
    fn default() -> Self {
        Self {
            hold_ms: 500,
            slop: 10.0,
        }
    }
}

/// Outcome of releasing a press.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PressResult<K> {
    /// No press was in progress.
    Idle,
    /// Released before the hold threshold without moving too far.
    Tap(K),
    /// Released after the hold threshold, and the hold had not been polled yet.
    Hold(K),
    /// Released after [`PressState::poll`] already reported the hold.
    HoldEnded(K),
    /// The press moved too far or was cancelled explicitly.
    Cancelled,
}

#[derive(Clone, Copy, Debug)]
struct ActivePress<K> {
    target: K,
    origin: Point,
    down_ms: u64,
    hold_reported: bool,
    cancelled: bool,
}

/// Tap/hold recognizer for a single pointer.
#[derive(Clone, Copy, Debug)]
pub struct PressState<K> {
    config: PressConfig,
    active: Option<ActivePress<K>>,
}

impl<K: Copy> Default for PressState<K> {
    fn default() -> Self {
        Self::new(PressConfig::default())
    }
}

impl<K: Copy> PressState<K> {
    /// Create a recognizer with the given thresholds.
    pub fn new(config: PressConfig) -> Self {
        Self {
            config,
            active: None,
        }
    }

    /// The thresholds in use.
    pub fn config(&self) -> PressConfig {
        self.config
    }

    /// Returns `true` while a press is in progress and not cancelled.
    pub fn is_pressing(&self) -> bool {
        self.active.is_some_and(|press| !press.cancelled)
    }

    /// Start a press on `target`.
    ///
    /// A press already in progress is discarded.
    pub fn on_down(&mut self, target: K, position: Point, now_ms: u64) {
        self.active = Some(ActivePress {
            target,
            origin: position,
            down_ms: now_ms,
            hold_reported: false,
            cancelled: false,
        });
    }

    /// Track pointer travel. Returns `false` once the press is cancelled.
    pub fn on_move(&mut self, position: Point) -> bool {
        let slop2 = self.config.slop * self.config.slop;
        match &mut self.active {
            Some(press) if !press.cancelled => {
                if (position - press.origin).hypot2() > slop2 {
                    press.cancelled = true;
                    log::trace!("press cancelled: moved beyond slop");
                }
                !press.cancelled
            }
            _ => false,
        }
    }

    /// Report the target once the press has lasted long enough to be a hold.
    pub fn poll(&mut self, now_ms: u64) -> Option<K> {
        let hold_ms = self.config.hold_ms;
        let press = self.active.as_mut()?;
        if press.cancelled || press.hold_reported {
            return None;
        }
        if now_ms.saturating_sub(press.down_ms) >= hold_ms {
            press.hold_reported = true;
            return Some(press.target);
        }
        None
    }

    /// Finish the press and classify it.
    pub fn on_up(&mut self, position: Point, now_ms: u64) -> PressResult<K> {
        let slop2 = self.config.slop * self.config.slop;
        let Some(press) = self.active.take() else {
            return PressResult::Idle;
        };
        if press.cancelled || (position - press.origin).hypot2() > slop2 {
            return PressResult::Cancelled;
        }
        if press.hold_reported {
            return PressResult::HoldEnded(press.target);
        }
        if now_ms.saturating_sub(press.down_ms) >= self.config.hold_ms {
            PressResult::Hold(press.target)
        } else {
            PressResult::Tap(press.target)
        }
    }

    /// Abandon the press in progress, if any.
    pub fn cancel(&mut self) {
        self.active = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quick_release_is_a_tap() {
        let mut press = PressState::default();
        press.on_down(1_u32, Point::new(0.0, 0.0), 100);
        assert!(press.is_pressing());
        assert_eq!(press.on_up(Point::new(2.0, 2.0), 250), PressResult::Tap(1));
        assert!(!press.is_pressing());
    }

    #[test]
    fn long_release_without_poll_is_a_hold() {
        let mut press = PressState::default();
        press.on_down(7_u32, Point::ZERO, 0);
        assert_eq!(press.on_up(Point::ZERO, 800), PressResult::Hold(7));
    }

    #[test]
    fn poll_fires_once() {
        let mut press = PressState::default();
        press.on_down(2_u32, Point::ZERO, 1_000);
        assert_eq!(press.poll(1_499), None);
        assert_eq!(press.poll(1_500), Some(2));
        assert_eq!(press.poll(1_600), None);
        assert_eq!(press.on_up(Point::ZERO, 2_000), PressResult::HoldEnded(2));
    }

    #[test]
    fn moving_beyond_slop_cancels() {
        let mut press = PressState::default();
        press.on_down(3_u32, Point::ZERO, 0);
        assert!(press.on_move(Point::new(5.0, 5.0)));
        assert!(!press.on_move(Point::new(20.0, 0.0)));
        assert!(!press.is_pressing());
        assert_eq!(press.poll(10_000), None);
        assert_eq!(press.on_up(Point::ZERO, 10_000), PressResult::Cancelled);
    }

    #[test]
    fn release_far_away_cancels() {
        let mut press = PressState::default();
        press.on_down(3_u32, Point::ZERO, 0);
        assert_eq!(press.on_up(Point::new(50.0, 0.0), 100), PressResult::Cancelled);
    }

    #[test]
    fn up_without_down_is_idle() {
        let mut press = PressState::<u32>::default();
        assert_eq!(press.on_up(Point::ZERO, 0), PressResult::Idle);
    }

    #[test]
    fn custom_thresholds() {
        let mut press = PressState::new(PressConfig {
            hold_ms: 100,
            slop: 1.0,
        });
        press.on_down(9_u32, Point::ZERO, 0);
        assert!(!press.on_move(Point::new(2.0, 0.0)));

        press.on_down(9_u32, Point::ZERO, 0);
        assert_eq!(press.poll(100), Some(9));
    }

    #[test]
    fn cancel_discards_press() {
        let mut press = PressState::default();
        press.on_down(1_u32, Point::ZERO, 0);
        press.cancel();
        assert_eq!(press.on_up(Point::ZERO, 10), PressResult::Idle);
    }
}
