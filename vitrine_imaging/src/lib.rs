// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vitrine Imaging: backend-agnostic presentation IR and backend trait.
//!
//! This crate defines a small, plain‑old‑data friendly set of imaging
//! operations that the Vitrine presentation crates (lens, gallery, carousel)
//! emit, and a trait for backends that consume them. It sits between the
//! headless interaction controllers and whatever actually puts pixels on
//! screen (a DOM/canvas bridge, a GPU renderer, or a test recorder).
//!
//! # Core concepts
//!
//! - **Content**: caller-supplied visuals (usually an artwork image) are
//!   referenced by an opaque [`ContentId`]. The IR never knows how content is
//!   loaded, sized or decoded; it only says *where* to draw it.
//! - **Layers**: [`LayerOp`] scopes a clip ([`ClipShape`]), an opacity and an
//!   optional [`FilterDesc`]. Layers must be well-nested.
//! - **State and draws**: [`StateOp`] mutates the current transform, paint
//!   and stroke; [`DrawOp`] produces pixels under that state. Both combine
//!   into [`ImagingOp`] for recording.
//! - **Backends**: [`ImagingBackend`] accepts ops; [`ImagingBackendExt`]
//!   adds scoped helpers and [`record_ops`] captures a sequence as
//!   [`RecordedOps`].
//!
//! # Example
//!
//! ```ignore
//! # use vitrine_imaging::*;
//! # use kurbo::{Circle, Rect};
//! let mut backend = MyBackend::default();
//! let image = ContentId(7);
//!
//! backend.draw(DrawOp::Content { content: image, dst: Rect::new(0.0, 0.0, 400.0, 300.0) });
//! backend.with_clip_shape(ClipShape::circle((50.0, 50.0), 25.0), |b| {
//!     b.draw(DrawOp::Content { content: image, dst: Rect::new(0.0, 0.0, 400.0, 300.0) });
//! });
//! ```

#![no_std]

extern crate alloc;

use alloc::sync::Arc;
use kurbo::{BezPath, Circle, Point, Rect, RoundedRect, Shape};

pub use kurbo::Affine;
pub use peniko::Color;

/// Identifier for a piece of caller-supplied content.
///
/// The host maps this handle to whatever it renders (an image element, a
/// texture, a nested scene). The same id may be drawn several times per
/// frame, e.g. once unmagnified and once under a lens.
#[repr(transparent)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ContentId(pub u32);

/// Description of a layer filter.
///
/// Filters are applied when compositing a layer into its parent.
#[derive(Clone, Debug, PartialEq)]
pub enum FilterDesc {
    /// Gaussian blur with a uniform standard deviation in user space.
    Blur {
        /// Standard deviation (in user space units).
        std_deviation: f32,
    },
    /// Drop shadow under the source content.
    DropShadow {
        /// Shadow offset along the X axis.
        dx: f32,
        /// Shadow offset along the Y axis.
        dy: f32,
        /// Blur standard deviation.
        std_deviation: f32,
        /// Shadow color.
        color: Color,
    },
}

impl FilterDesc {
    /// Create a uniform Gaussian blur filter.
    #[inline]
    pub const fn blur(sigma: f32) -> Self {
        Self::Blur {
            std_deviation: sigma,
        }
    }
}

/// Clip shape used by [`LayerOp`].
#[derive(Clone, Debug, PartialEq)]
pub enum ClipShape {
    /// Clip to an axis-aligned rectangle in local coordinates.
    Rect(Rect),
    /// Clip to a rounded rectangle in local coordinates.
    RoundedRect(RoundedRect),
    /// Clip to the interior of a circle in local coordinates.
    Circle(Circle),
}

impl ClipShape {
    /// Create a rectangular clip from min/max corners.
    #[inline]
    pub fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Self {
        Self::Rect(Rect::new(x0, y0, x1, y1))
    }

    /// Create a rounded-rect clip with the same radius on all corners.
    #[inline]
    pub fn rounded_rect(rect: Rect, radius: f64) -> Self {
        Self::RoundedRect(rect.to_rounded_rect(radius))
    }

    /// Create a circular clip.
    #[inline]
    pub fn circle(center: impl Into<Point>, radius: f64) -> Self {
        Self::Circle(Circle::new(center, radius))
    }

    /// Returns `true` if `point` lies inside the clip region.
    pub fn contains(&self, point: Point) -> bool {
        match self {
            Self::Rect(rect) => rect.contains(point),
            Self::RoundedRect(rr) => rr.contains(point),
            Self::Circle(circle) => circle.contains(point),
        }
    }

    /// Returns the axis-aligned bounding box of the clip region.
    pub fn bounding_box(&self) -> Rect {
        match self {
            Self::Rect(rect) => *rect,
            Self::RoundedRect(rr) => rr.bounding_box(),
            Self::Circle(circle) => circle.bounding_box(),
        }
    }

    /// Convert the clip into a [`BezPath`] using `tolerance`.
    pub fn to_bez_path(&self, tolerance: f64) -> BezPath {
        match self {
            Self::Rect(rect) => rect.to_path(tolerance),
            Self::RoundedRect(rr) => rr.to_path(tolerance),
            Self::Circle(circle) => circle.to_path(tolerance),
        }
    }
}

/// Parameters for a pushed layer.
///
/// - `clip` optionally restricts drawing within the layer.
/// - `filter` optionally applies an image filter when compositing the layer into its parent.
/// - `opacity` optionally controls how the layer is composited into its parent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayerOp {
    /// Optional clip applied to this layer's contents.
    pub clip: Option<ClipShape>,
    /// Optional filter applied when compositing this layer.
    pub filter: Option<FilterDesc>,
    /// Optional opacity (0–1) applied when compositing this layer.
    pub opacity: Option<f32>,
}

impl LayerOp {
    /// A layer that only clips.
    #[inline]
    pub fn clip(shape: ClipShape) -> Self {
        Self {
            clip: Some(shape),
            ..Self::default()
        }
    }

    /// A layer that only changes opacity.
    #[inline]
    pub fn opacity(opacity: f32) -> Self {
        Self {
            opacity: Some(opacity),
            ..Self::default()
        }
    }

    /// A layer that only applies a filter.
    #[inline]
    pub fn filter(filter: FilterDesc) -> Self {
        Self {
            filter: Some(filter),
            ..Self::default()
        }
    }

    /// Returns true if this layer changes how its contents are composited into its parent.
    ///
    /// This does not consider `clip`, which constrains drawing inside the
    /// layer but does not affect the final compositing operation.
    #[inline]
    pub fn has_compositing_effects(&self) -> bool {
        self.filter.is_some() || self.opacity.is_some()
    }

    /// Returns true if this layer has no effect at all.
    #[inline]
    pub fn is_noop(&self) -> bool {
        self.clip.is_none() && !self.has_compositing_effects()
    }
}

/// Stroke style used by `StateOp::SetStroke`.
pub type StrokeStyle = kurbo::Stroke;

/// State operations that mutate the current imaging state.
#[derive(Clone, Debug, PartialEq)]
pub enum StateOp {
    /// Set the current transform matrix.
    SetTransform(Affine),
    /// Push a new layer onto the layer stack.
    ///
    /// Every `PushLayer` must eventually be matched by a [`StateOp::PopLayer`].
    PushLayer(LayerOp),
    /// Pop the most recently pushed layer.
    PopLayer,
    /// Set the current solid paint.
    SetPaint(Color),
    /// Set the current stroke style.
    SetStroke(StrokeStyle),
}

/// Draw operations that produce pixels given the current state.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Draw caller-supplied content into `dst` (local coordinates).
    Content {
        /// Content to draw.
        content: ContentId,
        /// Destination rectangle in local coordinates.
        dst: Rect,
    },
    /// Fill an axis-aligned rectangle with the current paint.
    FillRect(Rect),
    /// Stroke a circle with the current stroke and paint.
    StrokeCircle(Circle),
}

/// Unified imaging operation used by recordings.
#[derive(Clone, Debug, PartialEq)]
pub enum ImagingOp {
    /// State-changing operation.
    State(StateOp),
    /// Drawing operation.
    Draw(DrawOp),
}

/// A captured sequence of imaging operations.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedOps {
    /// The operations in the order they were issued.
    pub ops: Arc<[ImagingOp]>,
}

impl RecordedOps {
    /// Number of captured operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns `true` if nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Iterate over the captured draw operations only.
    pub fn draws(&self) -> impl Iterator<Item = &DrawOp> + '_ {
        self.ops.iter().filter_map(|op| match op {
            ImagingOp::Draw(draw) => Some(draw),
            ImagingOp::State(_) => None,
        })
    }
}

/// Minimal imaging backend trait.
pub trait ImagingBackend {
    /// Apply a state operation.
    ///
    /// When called inside an active recording, the operation must both be
    /// applied to the backend and appended to the recording.
    fn state(&mut self, op: StateOp);

    /// Apply a draw operation.
    fn draw(&mut self, op: DrawOp);

    /// Begin capturing subsequent imaging operations into a recording.
    ///
    /// Callers should assume at most a single active recording.
    fn begin_record(&mut self);

    /// End the current recording and return the captured operations.
    fn end_record(&mut self) -> RecordedOps;

    /// Push a new layer onto the layer stack.
    ///
    /// This is equivalent to `self.state(StateOp::PushLayer(op))`.
    #[inline]
    fn layer_push(&mut self, op: LayerOp) {
        self.state(StateOp::PushLayer(op));
    }

    /// Pop the most recently pushed layer.
    #[inline]
    fn layer_pop(&mut self) {
        self.state(StateOp::PopLayer);
    }

    /// Set the current transform.
    #[inline]
    fn set_transform(&mut self, transform: Affine) {
        self.state(StateOp::SetTransform(transform));
    }

    /// Push a clip layer.
    ///
    /// The clip scope ends when you call [`ImagingBackend::layer_pop`].
    #[inline]
    fn clip_to_shape(&mut self, shape: ClipShape) {
        self.layer_push(LayerOp::clip(shape));
    }
}

/// Convenience helpers for `ImagingBackend` implementations and callers.
///
/// This is separate from [`ImagingBackend`] so that methods can accept closures and return values
/// without complicating trait object usage (`&mut dyn ImagingBackend`).
pub trait ImagingBackendExt: ImagingBackend {
    /// Run `f` inside a pushed layer, popping it afterwards.
    ///
    /// Note: if `f` panics, the layer will not be popped.
    #[inline]
    fn with_layer<R>(&mut self, op: LayerOp, f: impl FnOnce(&mut Self) -> R) -> R {
        self.layer_push(op);
        let out = f(self);
        self.layer_pop();
        out
    }

    /// Run `f` inside a clip layer.
    #[inline]
    fn with_clip_shape<R>(&mut self, shape: ClipShape, f: impl FnOnce(&mut Self) -> R) -> R {
        self.with_layer(LayerOp::clip(shape), f)
    }

    /// Run `f` inside an opacity layer.
    #[inline]
    fn with_opacity_layer<R>(&mut self, opacity: f32, f: impl FnOnce(&mut Self) -> R) -> R {
        self.with_layer(LayerOp::opacity(opacity), f)
    }

    /// Run `f` inside a filter layer.
    #[inline]
    fn with_filter_layer<R>(&mut self, filter: FilterDesc, f: impl FnOnce(&mut Self) -> R) -> R {
        self.with_layer(LayerOp::filter(filter), f)
    }

    /// Run `f` with the transform set to `base * local`, restoring `base` afterwards.
    ///
    /// The backend does not expose its current transform, so callers pass the
    /// transform they are nested in explicitly.
    #[inline]
    fn with_transform<R>(
        &mut self,
        base: Affine,
        local: Affine,
        f: impl FnOnce(&mut Self) -> R,
    ) -> R {
        self.set_transform(base * local);
        let out = f(self);
        self.set_transform(base);
        out
    }
}

impl<B: ImagingBackend + ?Sized> ImagingBackendExt for B {}

/// Record a sequence of imaging operations into a [`RecordedOps`].
///
/// Operations issued by `f` are captured in a single recording while still
/// being applied to `backend`.
pub fn record_ops<B, F>(backend: &mut B, f: F) -> RecordedOps
where
    B: ImagingBackend + ?Sized,
    F: FnOnce(&mut B),
{
    backend.begin_record();
    f(backend);
    backend.end_record()
}
