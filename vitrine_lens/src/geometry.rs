// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Circle, Point, Rect, Size};
use vitrine_imaging::ClipShape;

use crate::LensConfig;

/// Everything needed to draw the lens for one pointer position.
///
/// All coordinates are container-local. A `LensGeometry` is a pure function
/// of the position and the config; see [`lens_geometry`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LensGeometry {
    /// Pointer position the lens is centered on.
    pub center: Point,
    /// Visible region of the magnified duplicate.
    pub mask: Circle,
    /// Uniform scale of `zoom_factor` about `center`.
    pub zoom: Affine,
    /// Magnification applied by `zoom`.
    pub zoom_factor: f64,
    /// Bounding square of the border ring.
    pub ring: Rect,
}

impl LensGeometry {
    /// Top-left corner of the border ring.
    pub fn ring_origin(&self) -> Point {
        self.ring.origin()
    }

    /// Center of the border ring; always equal to `center`.
    pub fn ring_center(&self) -> Point {
        self.ring.center()
    }

    /// The border ring as a circle.
    pub fn ring_circle(&self) -> Circle {
        Circle::new(self.ring.center(), self.ring.width() / 2.0)
    }

    /// The mask as a clip shape.
    pub fn mask_clip(&self) -> ClipShape {
        ClipShape::Circle(self.mask)
    }

    /// Where a point of the base content appears in the magnified duplicate.
    pub fn magnify(&self, point: Point) -> Point {
        self.zoom * point
    }

    /// Which point of the base content is shown at `screen` inside the lens.
    pub fn source_of(&self, screen: Point) -> Point {
        self.zoom.inverse() * screen
    }

    /// Returns `true` if `screen` is inside the lens mask.
    pub fn in_lens(&self, screen: Point) -> bool {
        (screen - self.mask.center).hypot2() < self.mask.radius * self.mask.radius
    }

    /// Returns `true` if some part of the mask falls outside a container of `size`.
    ///
    /// Such a lens is not adjusted; the container's own clip cuts it off.
    pub fn overflows(&self, size: Size) -> bool {
        let container = Rect::from_origin_size(Point::ORIGIN, size);
        let bounds = self.ring;
        bounds.x0 < container.x0
            || bounds.y0 < container.y0
            || bounds.x1 > container.x1
            || bounds.y1 > container.y1
    }
}

/// A uniform scale by `factor` that leaves `origin` fixed.
pub fn scale_about(factor: f64, origin: Point) -> Affine {
    let v = origin.to_vec2();
    Affine::translate(v) * Affine::scale(factor) * Affine::translate(-v)
}

/// Compute the lens geometry for a pointer at `position`.
///
/// The position is used as-is: it is not clamped to the container, and a
/// lens near an edge simply extends past it.
pub fn lens_geometry(position: Point, config: &LensConfig) -> LensGeometry {
    let radius = config.radius();
    let diameter = config.lens_diameter;
    LensGeometry {
        center: position,
        mask: Circle::new(position, radius),
        zoom: scale_about(config.zoom_factor, position),
        zoom_factor: config.zoom_factor,
        ring: Rect::from_origin_size(
            (position.x - radius, position.y - radius),
            (diameter, diameter),
        ),
    }
}

/// Layers of a lens, back to front.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LensLayer {
    /// The unmagnified content.
    Base,
    /// The magnified duplicate, clipped to the mask.
    Zoom,
    /// The border ring.
    Ring,
}

impl LensLayer {
    /// All layers in paint order.
    pub const PAINT_ORDER: [Self; 3] = [Self::Base, Self::Zoom, Self::Ring];

    /// Stacking index; higher paints on top.
    pub fn z_index(self) -> i32 {
        match self {
            Self::Base => 0,
            Self::Zoom => 50,
            Self::Ring => 60,
        }
    }

    /// Whether the layer receives pointer input.
    ///
    /// The overlay layers are transparent to input so the container keeps
    /// receiving move events while the lens follows the pointer.
    pub fn captures_pointer(self) -> bool {
        matches!(self, Self::Base)
    }
}
