// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Stroke};
use vitrine_event_state::pointer::PointerTracker;
use vitrine_imaging::{
    Affine, Color, ContentId, DrawOp, FilterDesc, ImagingBackend, ImagingBackendExt, StateOp,
};

use crate::geometry::{LensGeometry, LensLayer, lens_geometry, scale_about};
use crate::hover::{HoverControl, LocalHover};
use crate::presence::{OverlayPresence, PresencePhase};
use crate::responsive::Viewport;
use crate::LensConfig;

/// Pointer input delivered to a [`Lens`] by its container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LensEvent {
    /// The pointer entered the container.
    Enter,
    /// The pointer left the container.
    Leave,
    /// The pointer moved.
    Move {
        /// Pointer position in viewport coordinates.
        client: Point,
        /// Container bounds in viewport coordinates, measured now; `None` if
        /// the container is not mounted.
        bounds: Option<Rect>,
    },
}

/// What the host passes to [`Lens::paint`] each frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LensFrame {
    /// The wrapped content.
    pub content: ContentId,
    /// Container size; content is drawn to fill it.
    pub size: Size,
    /// Transform the container is painted under.
    pub transform: Affine,
    /// Viewport, used for the responsive policy.
    pub viewport: Viewport,
}

impl LensFrame {
    /// A frame for `content` in a container of `size`, painted untransformed
    /// on a desktop-sized viewport.
    pub fn new(content: ContentId, size: Size) -> Self {
        Self {
            content,
            size,
            transform: Affine::IDENTITY,
            viewport: Viewport::default(),
        }
    }

    /// Set the container transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Affine) -> Self {
        self.transform = transform;
        self
    }

    /// Set the viewport.
    #[must_use]
    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }

    /// Container rectangle in local coordinates.
    pub fn bounds(&self) -> Rect {
        Rect::from_origin_size(Point::ORIGIN, self.size)
    }
}

/// A pointer-tracked magnifier wrapped around one piece of content.
///
/// The lens owns its pointer position and overlay animation; the hover flag
/// is reached through `H`, so it can be private ([`LocalHover`], the default)
/// or shared with sibling lenses.
#[derive(Clone, Debug)]
pub struct Lens<H: HoverControl = LocalHover> {
    config: LensConfig,
    hover: H,
    pointer: PointerTracker,
    presence: OverlayPresence,
}

impl Lens<LocalHover> {
    /// A lens with its own hover state.
    pub fn new(config: LensConfig) -> Self {
        Self::with_hover(config, LocalHover::new())
    }
}

impl Default for Lens<LocalHover> {
    fn default() -> Self {
        Self::new(LensConfig::default())
    }
}

impl<H: HoverControl> Lens<H> {
    /// A lens whose hover flag is owned by `hover`.
    pub fn with_hover(config: LensConfig, hover: H) -> Self {
        let r = config.radius();
        let mut presence = OverlayPresence::new();
        if hover.is_hovering() {
            presence.show();
        }
        Self {
            config,
            hover,
            pointer: PointerTracker::new(Point::new(r, r)),
            presence,
        }
    }

    /// The lens configuration.
    pub fn config(&self) -> &LensConfig {
        &self.config
    }

    /// The hover owner.
    pub fn hover(&self) -> &H {
        &self.hover
    }

    /// Mutable access to the hover owner.
    pub fn hover_mut(&mut self) -> &mut H {
        &mut self.hover
    }

    /// Whether the lens is active.
    pub fn is_active(&self) -> bool {
        self.hover.is_hovering()
    }

    /// Last container-local pointer position.
    ///
    /// Starts at the lens centre and is kept when the pointer leaves.
    pub fn position(&self) -> Point {
        self.pointer.position()
    }

    /// Dispatch a pointer event.
    pub fn handle(&mut self, event: LensEvent) {
        match event {
            LensEvent::Enter => self.pointer_enter(),
            LensEvent::Leave => self.pointer_leave(),
            LensEvent::Move { client, bounds } => {
                self.pointer_move(client, bounds);
            }
        }
    }

    /// The pointer entered the container.
    pub fn pointer_enter(&mut self) {
        self.hover.set_hovering(true);
        self.sync_presence();
    }

    /// The pointer left the container.
    pub fn pointer_leave(&mut self) {
        self.hover.set_hovering(false);
        self.sync_presence();
    }

    /// The pointer moved; see [`PointerTracker::on_move`].
    ///
    /// Returns the new local position, or `None` if `bounds` is unavailable.
    pub fn pointer_move(&mut self, client: Point, bounds: Option<Rect>) -> Option<Point> {
        self.pointer.on_move(client, bounds)
    }

    /// Advance the overlay animation by `dt` seconds.
    ///
    /// Also picks up hover changes made through a shared owner. Returns `true`
    /// while more frames are needed.
    pub fn tick(&mut self, dt: f64) -> bool {
        self.sync_presence();
        self.presence.tick(dt)
    }

    /// Whether the overlay is mounted (shown or animating out).
    pub fn overlay_mounted(&self) -> bool {
        self.presence.is_mounted()
    }

    /// Overlay lifecycle phase.
    pub fn presence_phase(&self) -> PresencePhase {
        self.presence.phase()
    }

    /// Geometry for the current position.
    pub fn geometry(&self) -> LensGeometry {
        lens_geometry(self.pointer.position(), &self.config)
    }

    /// Paint the content and, if mounted and the viewport allows it, the lens
    /// overlay.
    ///
    /// Emits, back to front: the base content; an opacity layer holding the
    /// overlay, scaled about the container centre by the presence animation;
    /// inside it the magnified content clipped to the mask, then the ring.
    /// The output depends only on the current position, config, animation
    /// state and `frame`.
    pub fn paint<B: ImagingBackend + ?Sized>(&self, backend: &mut B, frame: &LensFrame) {
        let geometry = self.geometry();
        backend.set_transform(frame.transform);
        for layer in LensLayer::PAINT_ORDER.into_iter().filter(|l| l.captures_pointer()) {
            self.paint_layer(backend, layer, frame, frame.transform, &geometry);
        }

        if !self.presence.is_mounted() || !frame.viewport.supports_lens() {
            return;
        }

        let style = self.presence.style();
        let presence = scale_about(style.scale, frame.bounds().center());
        let overlay = frame.transform * presence;
        #[expect(
            clippy::cast_possible_truncation,
            reason = "opacity is in [0, 1], well within f32"
        )]
        let opacity = style.opacity as f32;

        // Layers that let input through form the overlay.
        backend.with_opacity_layer(opacity, |b| {
            b.with_transform(frame.transform, presence, |b| {
                for layer in LensLayer::PAINT_ORDER.into_iter().filter(|l| !l.captures_pointer()) {
                    self.paint_layer(b, layer, frame, overlay, &geometry);
                }
            });
        });
    }

    /// Emit one layer; `transform` is the transform currently set.
    fn paint_layer<B: ImagingBackend + ?Sized>(
        &self,
        backend: &mut B,
        layer: LensLayer,
        frame: &LensFrame,
        transform: Affine,
        geometry: &LensGeometry,
    ) {
        let content = DrawOp::Content {
            content: frame.content,
            dst: frame.bounds(),
        };
        match layer {
            LensLayer::Base => backend.draw(content),
            LensLayer::Zoom => {
                backend.with_clip_shape(geometry.mask_clip(), |b| {
                    b.with_transform(transform, geometry.zoom, |b| b.draw(content));
                });
            }
            LensLayer::Ring => self.paint_ring(backend, geometry),
        }
    }

    fn paint_ring<B: ImagingBackend + ?Sized>(&self, backend: &mut B, geometry: &LensGeometry) {
        let ring = self.config.ring;
        let stroke = |b: &mut B| {
            b.state(StateOp::SetPaint(ring.color()));
            b.state(StateOp::SetStroke(Stroke::new(ring.width)));
            b.draw(DrawOp::StrokeCircle(geometry.ring_circle()));
        };
        if ring.shadow {
            backend.with_filter_layer(ring_shadow(), stroke);
        } else {
            stroke(backend);
        }
    }

    fn sync_presence(&mut self) {
        if self.hover.is_hovering() {
            self.presence.show();
        } else {
            self.presence.hide();
        }
    }
}

/// Large soft shadow under the ring.
fn ring_shadow() -> FilterDesc {
    FilterDesc::DropShadow {
        dx: 0.0,
        dy: 25.0,
        std_deviation: 25.0,
        color: Color::from_rgba8(0, 0, 0, 0x40),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hover::HoverGroup;
    use vitrine_imaging::ImagingOp;
    use vitrine_imaging_ref::RefBackend;

    const BOUNDS: Rect = Rect::new(100.0, 100.0, 500.0, 400.0);

    #[test]
    fn initial_position_is_lens_center() {
        let lens = Lens::new(LensConfig::default().with_lens_diameter(120.0));
        assert_eq!(lens.position(), Point::new(60.0, 60.0));
        assert!(!lens.is_active());
    }

    #[test]
    fn move_updates_position_even_when_inactive() {
        let mut lens = Lens::default();
        lens.pointer_move(Point::new(150.0, 130.0), Some(BOUNDS));
        assert_eq!(lens.position(), Point::new(50.0, 30.0));
        assert!(!lens.is_active());
    }

    #[test]
    fn position_survives_leave() {
        let mut lens = Lens::default();
        lens.handle(LensEvent::Enter);
        lens.handle(LensEvent::Move {
            client: Point::new(110.0, 120.0),
            bounds: Some(BOUNDS),
        });
        lens.handle(LensEvent::Leave);
        lens.handle(LensEvent::Enter);
        assert_eq!(lens.position(), Point::new(10.0, 20.0));
    }

    #[test]
    fn inactive_lens_paints_only_base_content() {
        let lens = Lens::default();
        let mut backend = RefBackend::default();
        lens.paint(&mut backend, &LensFrame::new(ContentId(1), Size::new(400.0, 300.0)));
        assert_eq!(backend.content_draws().len(), 1);
        assert_eq!(backend.current_state().layer_stack_depth, 0);
    }

    #[test]
    fn ring_without_shadow_has_no_filter_layer() {
        let config = LensConfig::default().with_ring(crate::RingStyle {
            shadow: false,
            ..Default::default()
        });
        let mut lens = Lens::new(config);
        lens.pointer_enter();
        lens.tick(1.0);
        let mut backend = RefBackend::default();
        lens.paint(&mut backend, &LensFrame::new(ContentId(1), Size::new(400.0, 300.0)));
        let filters = backend
            .ops()
            .iter()
            .filter(|op| {
                matches!(op, ImagingOp::State(StateOp::PushLayer(layer)) if layer.filter.is_some())
            })
            .count();
        assert_eq!(filters, 0);
    }

    #[test]
    fn draws_follow_layer_paint_order() {
        use vitrine_imaging_ref::Event;

        let mut lens = Lens::default();
        lens.pointer_enter();
        lens.tick(1.0);
        let mut backend = RefBackend::default();
        lens.paint(&mut backend, &LensFrame::new(ContentId(1), Size::new(400.0, 300.0)));

        let layers: Vec<LensLayer> = backend
            .events()
            .iter()
            .filter_map(|e| match e {
                Event::Draw {
                    op: DrawOp::StrokeCircle(_),
                    ..
                } => Some(LensLayer::Ring),
                Event::Draw {
                    op: DrawOp::Content { .. },
                    state,
                } if state.clips.is_empty() => Some(LensLayer::Base),
                Event::Draw {
                    op: DrawOp::Content { .. },
                    ..
                } => Some(LensLayer::Zoom),
                _ => None,
            })
            .collect();
        assert_eq!(layers, LensLayer::PAINT_ORDER);
    }

    #[test]
    fn group_steal_is_seen_on_tick() {
        let group = HoverGroup::new();
        let mut a = Lens::with_hover(LensConfig::default(), group.member());
        let mut b = Lens::with_hover(LensConfig::default(), group.member());

        a.pointer_enter();
        a.tick(1.0);
        b.pointer_enter();
        assert!(!a.is_active());
        assert!(a.overlay_mounted());

        a.tick(1.0);
        assert!(!a.overlay_mounted());
        assert!(b.overlay_mounted());
    }
}
