// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover state machine: `Inactive` ⇄ `Active`, driven by pointer enter/leave.
//!
//! Transitions are immediate and synchronous with the input: there is no
//! debounce and no intermediate state. Only [`HoverInput::Enter`] and
//! [`HoverInput::Leave`] change the phase; moves and repeated inputs report
//! no transition.
//!
//! ```
//! use vitrine_event_state::hover::{HoverInput, HoverMachine, HoverPhase, HoverTransition};
//!
//! let mut hover = HoverMachine::new();
//! assert_eq!(hover.phase(), HoverPhase::Inactive);
//!
//! assert_eq!(hover.on_event(HoverInput::Enter), Some(HoverTransition::Activated));
//! assert_eq!(hover.on_event(HoverInput::Enter), None);
//! assert_eq!(hover.on_event(HoverInput::Leave), Some(HoverTransition::Deactivated));
//! assert!(!hover.is_active());
//! ```

/// Phase of a hover target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HoverPhase {
    /// The pointer is not over the target.
    #[default]
    Inactive,
    /// The pointer is over the target.
    Active,
}

/// Input consumed by [`HoverMachine`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HoverInput {
    /// Pointer entered the target.
    Enter,
    /// Pointer left the target.
    Leave,
    /// Pointer moved within the target.
    Move,
}

/// A change of [`HoverPhase`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HoverTransition {
    /// `Inactive → Active`.
    Activated,
    /// `Active → Inactive`.
    Deactivated,
}

impl HoverTransition {
    /// The phase after this transition.
    pub fn target(self) -> HoverPhase {
        match self {
            Self::Activated => HoverPhase::Active,
            Self::Deactivated => HoverPhase::Inactive,
        }
    }
}

/// Two-state hover machine.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HoverMachine {
    phase: HoverPhase,
}

impl HoverMachine {
    /// Create a machine in the `Inactive` phase.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current phase.
    pub fn phase(&self) -> HoverPhase {
        self.phase
    }

    /// Returns `true` while the phase is `Active`.
    pub fn is_active(&self) -> bool {
        self.phase == HoverPhase::Active
    }

    /// Feed an input, returning the transition it caused, if any.
    pub fn on_event(&mut self, input: HoverInput) -> Option<HoverTransition> {
        let transition = match (self.phase, input) {
            (HoverPhase::Inactive, HoverInput::Enter) => HoverTransition::Activated,
            (HoverPhase::Active, HoverInput::Leave) => HoverTransition::Deactivated,
            _ => return None,
        };
        self.phase = transition.target();
        log::debug!("hover {:?} on {:?}", transition, input);
        Some(transition)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_inactive() {
        let hover = HoverMachine::new();
        assert_eq!(hover.phase(), HoverPhase::Inactive);
        assert!(!hover.is_active());
    }

    #[test]
    fn enter_always_yields_active() {
        let mut hover = HoverMachine::new();
        hover.on_event(HoverInput::Enter);
        assert!(hover.is_active());

        // Entering again keeps it active without a transition.
        assert_eq!(hover.on_event(HoverInput::Enter), None);
        assert!(hover.is_active());
    }

    #[test]
    fn leave_always_yields_inactive() {
        let mut hover = HoverMachine::new();
        assert_eq!(hover.on_event(HoverInput::Leave), None);
        assert!(!hover.is_active());

        hover.on_event(HoverInput::Enter);
        assert_eq!(
            hover.on_event(HoverInput::Leave),
            Some(HoverTransition::Deactivated)
        );
        assert!(!hover.is_active());
    }

    #[test]
    fn move_never_changes_phase() {
        let mut hover = HoverMachine::new();
        assert_eq!(hover.on_event(HoverInput::Move), None);
        assert_eq!(hover.phase(), HoverPhase::Inactive);

        hover.on_event(HoverInput::Enter);
        assert_eq!(hover.on_event(HoverInput::Move), None);
        assert_eq!(hover.phase(), HoverPhase::Active);
    }

    #[test]
    fn transition_targets() {
        assert_eq!(HoverTransition::Activated.target(), HoverPhase::Active);
        assert_eq!(HoverTransition::Deactivated.target(), HoverPhase::Inactive);
    }
}
