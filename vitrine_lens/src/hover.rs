// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover ownership for lenses.
//!
//! A lens only needs to read and write one boolean, but who owns that boolean
//! varies: a standalone lens keeps it private, while a carousel coordinating
//! several lenses owns it itself. [`HoverControl`] is the capability the lens
//! depends on; this module provides three owners:
//!
//! - [`LocalHover`]: private to one lens (the default).
//! - [`SharedHover`]: a plain flag shared by every lens holding a clone. All
//!   holders report the same value; nothing prevents two of them from being
//!   driven at once.
//! - [`HoverGroup`] / [`GroupHover`]: a group that remembers a single active
//!   member, so at most one sibling lens is ever active.

use core::cell::Cell;
use core::fmt;
use std::rc::Rc;

use vitrine_event_state::hover::{HoverInput, HoverMachine};

/// Read/write access to a lens's hover flag.
pub trait HoverControl {
    /// Whether the lens overlay should be shown.
    fn is_hovering(&self) -> bool;

    /// Update the flag.
    fn set_hovering(&mut self, hovering: bool);
}

/// Hover state owned by a single lens.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LocalHover {
    machine: HoverMachine,
}

impl LocalHover {
    /// A new, inactive flag.
    pub fn new() -> Self {
        Self::default()
    }
}

impl HoverControl for LocalHover {
    fn is_hovering(&self) -> bool {
        self.machine.is_active()
    }

    fn set_hovering(&mut self, hovering: bool) {
        let input = if hovering {
            HoverInput::Enter
        } else {
            HoverInput::Leave
        };
        self.machine.on_event(input);
    }
}

/// A hover flag owned outside the lens and shared by clones.
#[derive(Clone, Debug, Default)]
pub struct SharedHover {
    flag: Rc<Cell<bool>>,
}

impl SharedHover {
    /// A new, inactive shared flag.
    pub fn new() -> Self {
        Self::default()
    }
}

impl HoverControl for SharedHover {
    fn is_hovering(&self) -> bool {
        self.flag.get()
    }

    fn set_hovering(&mut self, hovering: bool) {
        self.flag.set(hovering);
    }
}

/// Identifies one member of a [`HoverGroup`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MemberId(pub u32);

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "member#{}", self.0)
    }
}

#[derive(Debug, Default)]
struct GroupState {
    active: Cell<Option<MemberId>>,
    next: Cell<u32>,
}

/// Hover state shared by a set of sibling lenses with at most one active.
///
/// Activating a member implicitly deactivates whichever member was active
/// before. A member that leaves only clears the group if it is still the
/// active one, so a late leave from a previous member cannot switch off its
/// successor.
#[derive(Clone, Debug, Default)]
pub struct HoverGroup {
    state: Rc<GroupState>,
}

impl HoverGroup {
    /// An empty group with no active member.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a handle for a new member.
    pub fn member(&self) -> GroupHover {
        let id = MemberId(self.state.next.get());
        self.state.next.set(id.0 + 1);
        GroupHover {
            group: self.clone(),
            id,
        }
    }

    /// The active member, if any.
    pub fn active(&self) -> Option<MemberId> {
        self.state.active.get()
    }

    /// Deactivate whichever member is active.
    pub fn release(&self) {
        if let Some(prev) = self.state.active.take() {
            log::debug!("hover group released {prev}");
        }
    }

    fn activate(&self, id: MemberId) {
        let prev = self.state.active.replace(Some(id));
        match prev {
            Some(prev) if prev != id => log::debug!("hover handed from {prev} to {id}"),
            None => log::debug!("hover group activated {id}"),
            _ => {}
        }
    }

    fn deactivate(&self, id: MemberId) {
        if self.state.active.get() == Some(id) {
            self.state.active.set(None);
            log::debug!("hover group deactivated {id}");
        }
    }
}

/// A member handle of a [`HoverGroup`].
///
/// Each handle is exactly one member, so handles cannot be cloned: a copy
/// would share the member id and report active together with the original.
/// Ask the group for another handle with [`HoverGroup::member`].
///
/// ```compile_fail
/// use vitrine_lens::HoverGroup;
///
/// let member = HoverGroup::new().member();
/// let twin = member.clone();
/// ```
#[derive(Debug)]
pub struct GroupHover {
    group: HoverGroup,
    id: MemberId,
}

impl GroupHover {
    /// This member's id.
    pub fn id(&self) -> MemberId {
        self.id
    }

    /// The group this member belongs to.
    pub fn group(&self) -> &HoverGroup {
        &self.group
    }
}

impl HoverControl for GroupHover {
    fn is_hovering(&self) -> bool {
        self.group.active() == Some(self.id)
    }

    fn set_hovering(&mut self, hovering: bool) {
        if hovering {
            self.group.activate(self.id);
        } else {
            self.group.deactivate(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn local_hover_toggles() {
        let mut hover = LocalHover::new();
        assert!(!hover.is_hovering());
        hover.set_hovering(true);
        assert!(hover.is_hovering());
        hover.set_hovering(true);
        assert!(hover.is_hovering());
        hover.set_hovering(false);
        assert!(!hover.is_hovering());
    }

    #[test]
    fn shared_hover_is_seen_by_all_clones() {
        let mut a = SharedHover::new();
        let b = a.clone();
        a.set_hovering(true);
        assert!(b.is_hovering());
    }

    #[test]
    fn group_members_get_distinct_ids() {
        let group = HoverGroup::new();
        let a = group.member();
        let b = group.member();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn activating_a_member_steals_from_the_previous_one() {
        let group = HoverGroup::new();
        let mut a = group.member();
        let mut b = group.member();

        a.set_hovering(true);
        assert!(a.is_hovering());
        assert!(!b.is_hovering());

        b.set_hovering(true);
        assert!(!a.is_hovering());
        assert!(b.is_hovering());
        assert_eq!(group.active(), Some(b.id()));
    }

    #[test]
    fn stale_leave_does_not_clear_successor() {
        let group = HoverGroup::new();
        let mut a = group.member();
        let mut b = group.member();

        a.set_hovering(true);
        b.set_hovering(true);
        a.set_hovering(false);
        assert!(b.is_hovering());

        b.set_hovering(false);
        assert_eq!(group.active(), None);
    }

    #[test]
    fn release_clears_the_group() {
        let group = HoverGroup::new();
        let mut a = group.member();
        a.set_hovering(true);
        group.release();
        assert!(!a.is_hovering());
    }

    #[test]
    fn member_id_display() {
        assert_eq!(MemberId(3).to_string(), "member#3");
    }
}
