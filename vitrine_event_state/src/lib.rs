// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vitrine Event State: small state machines for gallery interactions.
//!
//! Each module handles one interaction pattern that needs state across
//! several input events:
//!
//! - [`pointer`]: turn viewport-absolute pointer coordinates into
//!   container-local positions and remember the last one
//! - [`hover`]: a two-state enter/leave machine
//! - [`press`]: distinguish a tap from a press-and-hold on touch input
//!
//! The managers do not assume any particular UI framework or event loop.
//! Hosts feed them raw positions, container bounds and millisecond
//! timestamps, and interpret the transitions they return.
//!
//! ## Pointer tracking
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use vitrine_event_state::pointer::PointerTracker;
//!
//! let mut tracker = PointerTracker::new(Point::new(85.0, 85.0));
//! let bounds = Rect::new(100.0, 50.0, 500.0, 350.0);
//!
//! let local = tracker.on_move(Point::new(130.0, 70.0), Some(bounds));
//! assert_eq!(local, Some(Point::new(30.0, 20.0)));
//!
//! // Without bounds (container not mounted) the move is ignored.
//! assert_eq!(tracker.on_move(Point::new(0.0, 0.0), None), None);
//! assert_eq!(tracker.position(), Point::new(30.0, 20.0));
//! ```
//!
//! ## Hover
//!
//! ```rust
//! use vitrine_event_state::hover::{HoverInput, HoverMachine, HoverPhase, HoverTransition};
//!
//! let mut hover = HoverMachine::new();
//! assert_eq!(hover.on_event(HoverInput::Enter), Some(HoverTransition::Activated));
//! assert_eq!(hover.on_event(HoverInput::Move), None);
//! assert_eq!(hover.phase(), HoverPhase::Active);
//! ```
//!
//! ## Press
//!
//! ```rust
//! use kurbo::Point;
//! use vitrine_event_state::press::{PressResult, PressState};
//!
//! let mut press = PressState::<u32>::default();
//! press.on_down(3, Point::new(10.0, 10.0), 1_000);
//! assert_eq!(press.on_up(Point::new(11.0, 10.0), 1_120), PressResult::Tap(3));
//! ```
//!
//! This crate is `no_std` compatible.

#![no_std]

pub mod hover;
pub mod pointer;
pub mod press;
