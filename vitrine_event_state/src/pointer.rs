// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer tracking: convert viewport-absolute pointer coordinates into
//! coordinates relative to a tracked container.
//!
//! ## Usage
//!
//! 1) Create a [`PointerTracker`] with the position it should report before
//!    the first move.
//! 2) On each pointer-move event, measure the container's current bounds and
//!    call [`PointerTracker::on_move`]. Bounds are read at call time rather
//!    than cached, since layout may shift between events.
//! 3) Read [`PointerTracker::position`] whenever you render.
//!
//! Positions are deliberately not clamped to the container: events delivered
//! right at an edge can land slightly outside `[0, width] x [0, height]`.

use kurbo::{Point, Rect};

/// Tracks the last container-local pointer position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerTracker {
    position: Point,
    moves: u64,
}

impl PointerTracker {
    /// Create a tracker reporting `initial` until the first move.
    pub fn new(initial: Point) -> Self {
        Self {
            position: initial,
            moves: 0,
        }
    }

    /// Record a pointer move.
    ///
    /// `client` is the pointer position in viewport coordinates; `bounds` is
    /// the container's bounding rectangle in the same space, or `None` when it
    /// cannot be measured (not mounted yet, or being torn down). In that case
    /// the move is ignored and `None` is returned.
    pub fn on_move(&mut self, client: Point, bounds: Option<Rect>) -> Option<Point> {
        let bounds = bounds?;
        let local = local_position(client, bounds);
        self.position = local;
        self.moves += 1;
        log::trace!("pointer move: client={client:?} local={local:?}");
        Some(local)
    }

    /// The most recent container-local position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Number of moves recorded since creation.
    pub fn moves(&self) -> u64 {
        self.moves
    }
}

/// Convert `client` into coordinates relative to the top-left of `bounds`.
#[inline]
pub fn local_position(client: Point, bounds: Rect) -> Point {
    Point::new(client.x - bounds.x0, client.y - bounds.y0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tracker_reports_initial_position() {
        let tracker = PointerTracker::new(Point::new(85.0, 85.0));
        assert_eq!(tracker.position(), Point::new(85.0, 85.0));
        assert_eq!(tracker.moves(), 0);
    }

    #[test]
    fn move_subtracts_container_origin() {
        let mut tracker = PointerTracker::new(Point::ZERO);
        let bounds = Rect::new(20.0, 40.0, 220.0, 240.0);

        let local = tracker.on_move(Point::new(70.0, 90.0), Some(bounds));

        assert_eq!(local, Some(Point::new(50.0, 50.0)));
        assert_eq!(tracker.position(), Point::new(50.0, 50.0));
        assert_eq!(tracker.moves(), 1);
    }

    #[test]
    fn move_without_bounds_is_ignored() {
        let mut tracker = PointerTracker::new(Point::new(5.0, 5.0));

        assert_eq!(tracker.on_move(Point::new(70.0, 90.0), None), None);
        assert_eq!(tracker.position(), Point::new(5.0, 5.0));
        assert_eq!(tracker.moves(), 0);
    }

    #[test]
    fn positions_outside_the_container_are_not_clamped() {
        let mut tracker = PointerTracker::new(Point::ZERO);
        let bounds = Rect::new(100.0, 100.0, 200.0, 200.0);

        let local = tracker.on_move(Point::new(98.0, 203.0), Some(bounds));

        assert_eq!(local, Some(Point::new(-2.0, 103.0)));
    }

    #[test]
    fn bounds_are_read_per_call() {
        let mut tracker = PointerTracker::new(Point::ZERO);

        tracker.on_move(Point::new(50.0, 50.0), Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
        assert_eq!(tracker.position(), Point::new(50.0, 50.0));

        // The container scrolled by 10px; same client point, new local point.
        tracker.on_move(Point::new(50.0, 50.0), Some(Rect::new(0.0, -10.0, 100.0, 90.0)));
        assert_eq!(tracker.position(), Point::new(50.0, 60.0));
    }
}
