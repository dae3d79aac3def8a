// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt::Debug;

use kurbo::{Point, Rect, RoundedRect, Size, Vec2};
use vitrine_imaging::{
    Affine, ClipShape, Color, ContentId, DrawOp, ImagingBackend, ImagingBackendExt, StateOp,
};
use vitrine_lens::{Viewport, scale_about};
use vitrine_motion::{Easing, Spring, SpringConfig, Tween};

/// Lightbox sizing and animation parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LightboxConfig {
    /// Maximum panel width in pixels.
    pub max_width: f64,
    /// Maximum panel height as a fraction of the viewport height.
    pub max_height_fraction: f64,
    /// Corner radius of the displayed image.
    pub corner_radius: f64,
    /// Scale the panel starts from when opened without an origin.
    pub fallback_scale: f64,
    /// Backdrop fade duration in seconds.
    pub backdrop_duration: f64,
    /// Backdrop colour as straight-alpha RGBA8.
    pub backdrop_rgba: [u8; 4],
    /// Spring driving the panel position and scale.
    pub spring: SpringConfig,
}

impl Default for LightboxConfig {
    fn default() -> Self {
        Self {
            max_width: 896.0,
            max_height_fraction: 0.9,
            corner_radius: 8.0,
            fallback_scale: 0.8,
            backdrop_duration: 0.3,
            backdrop_rgba: [0, 0, 0, 0x80],
            spring: SpringConfig::default(),
        }
    }
}

/// Where a click inside an open lightbox landed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickTarget {
    /// The dimmed backdrop itself.
    Backdrop,
    /// The panel or something inside it.
    Panel,
}

/// Lifecycle of the lightbox.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LightboxPhase {
    /// Nothing shown.
    #[default]
    Closed,
    /// Animating from the origin to the centre, or resting there.
    Open,
    /// Animating back to the origin.
    Closing,
}

/// Panel placement relative to its resting position.
#[derive(Clone, Copy, Debug, PartialEq)]
struct PanelPose {
    offset: Vec2,
    scale: f64,
}

impl PanelPose {
    const REST: Self = Self {
        offset: Vec2::ZERO,
        scale: 1.0,
    };
}

/// A modal viewer that grows out of the clicked thumbnail.
///
/// The panel starts at the thumbnail's position and scale and springs to
/// the centre of the viewport; closing springs it back. Opening on a
/// touch-primary viewport is refused.
#[derive(Clone, Debug)]
pub struct Lightbox<K> {
    config: LightboxConfig,
    phase: LightboxPhase,
    selected: Option<K>,
    initial: PanelPose,
    x: Spring,
    y: Spring,
    scale: Spring,
    backdrop: Tween,
}

impl<K: Copy + PartialEq + Debug> Lightbox<K> {
    /// A closed lightbox.
    pub fn new(config: LightboxConfig) -> Self {
        Self {
            config,
            phase: LightboxPhase::Closed,
            selected: None,
            initial: PanelPose::REST,
            x: Spring::new(0.0, config.spring),
            y: Spring::new(0.0, config.spring),
            scale: Spring::new(1.0, config.spring),
            backdrop: Tween::new(0.0, Easing::EASE).with_duration(config.backdrop_duration),
        }
    }

    /// The configuration.
    pub fn config(&self) -> &LightboxConfig {
        &self.config
    }

    /// Current phase.
    pub fn phase(&self) -> LightboxPhase {
        self.phase
    }

    /// Returns `true` while anything is on screen.
    pub fn is_visible(&self) -> bool {
        self.phase != LightboxPhase::Closed
    }

    /// The item being shown, including while closing.
    pub fn selected(&self) -> Option<K> {
        self.selected
    }

    /// Opacity of a grid item: the selected one is hidden while the lightbox
    /// shows it.
    pub fn item_opacity(&self, key: K) -> f64 {
        if self.selected == Some(key) { 0.0 } else { 1.0 }
    }

    /// Open on `key`, growing from `origin` (viewport coordinates).
    ///
    /// Returns `false` and does nothing on touch-primary viewports.
    pub fn open(&mut self, key: K, origin: Option<Rect>, viewport: &Viewport) -> bool {
        if viewport.is_touch_primary() {
            log::debug!("lightbox open for {key:?} ignored on narrow viewport");
            return false;
        }
        let initial = match origin {
            Some(origin) => PanelPose {
                offset: origin.center() - viewport_center(viewport),
                scale: origin.width() / viewport.width(),
            },
            None => PanelPose {
                offset: Vec2::ZERO,
                scale: self.config.fallback_scale,
            },
        };
        self.initial = initial;
        self.x.set_immediate(initial.offset.x);
        self.y.set_immediate(initial.offset.y);
        self.scale.set_immediate(initial.scale);
        self.x.set_target(0.0);
        self.y.set_target(0.0);
        self.scale.set_target(1.0);
        self.backdrop.set_immediate(0.0);
        self.backdrop.set_target(1.0);
        self.selected = Some(key);
        self.phase = LightboxPhase::Open;
        log::debug!("lightbox opened on {key:?}");
        true
    }

    /// Start closing; the panel springs back to where it came from.
    pub fn close(&mut self) {
        if self.phase != LightboxPhase::Open {
            return;
        }
        self.x.set_target(self.initial.offset.x);
        self.y.set_target(self.initial.offset.y);
        self.scale.set_target(self.initial.scale);
        self.backdrop.set_target(0.0);
        self.phase = LightboxPhase::Closing;
        log::debug!("lightbox closing {:?}", self.selected);
    }

    /// Handle a click; only a click on the backdrop itself closes.
    ///
    /// Returns `true` if the lightbox started closing.
    pub fn click(&mut self, target: ClickTarget) -> bool {
        if target == ClickTarget::Backdrop && self.phase == LightboxPhase::Open {
            self.close();
            true
        } else {
            false
        }
    }

    /// Classify a viewport point against the animated panel.
    pub fn target_at(&self, point: Point, viewport: &Viewport) -> ClickTarget {
        let local = self.panel_transform(viewport).inverse() * point;
        if self.panel_rect(viewport).contains(local) {
            ClickTarget::Panel
        } else {
            ClickTarget::Backdrop
        }
    }

    /// Advance the animation by `dt` seconds. Returns `true` while animating.
    pub fn tick(&mut self, dt: f64) -> bool {
        if self.phase == LightboxPhase::Closed {
            return false;
        }
        self.x.update(dt);
        self.y.update(dt);
        self.scale.update(dt);
        self.backdrop.update(dt);
        let settled = self.x.is_settled()
            && self.y.is_settled()
            && self.scale.is_settled()
            && self.backdrop.is_complete();
        if self.phase == LightboxPhase::Closing && settled {
            log::debug!("lightbox closed {:?}", self.selected);
            self.phase = LightboxPhase::Closed;
            self.selected = None;
        }
        !settled
    }

    /// Current backdrop opacity.
    pub fn backdrop_opacity(&self) -> f64 {
        self.backdrop.value()
    }

    /// Current panel scale.
    pub fn panel_scale(&self) -> f64 {
        self.scale.value()
    }

    /// Current panel offset from its resting position.
    pub fn panel_offset(&self) -> Vec2 {
        Vec2::new(self.x.value(), self.y.value())
    }

    /// Resting panel rectangle: centred, at most `max_width` wide and
    /// `max_height_fraction` of the viewport tall.
    pub fn panel_rect(&self, viewport: &Viewport) -> Rect {
        let size = Size::new(
            viewport.width().min(self.config.max_width),
            viewport.height() * self.config.max_height_fraction,
        );
        Rect::from_center_size(viewport_center(viewport), size)
    }

    /// Resting rectangle of an image of intrinsic `image` size inside the
    /// panel, scaled to fit without cropping.
    pub fn image_rect(&self, viewport: &Viewport, image: Size) -> Rect {
        contain(image, self.panel_rect(viewport))
    }

    /// Transform taking the resting panel to its current animated pose.
    pub fn panel_transform(&self, viewport: &Viewport) -> Affine {
        let panel = self.panel_rect(viewport);
        Affine::translate(self.panel_offset()) * scale_about(self.scale.value(), panel.center())
    }

    /// Paint the backdrop and the panel, if visible.
    pub fn paint<B: ImagingBackend + ?Sized>(
        &self,
        backend: &mut B,
        viewport: &Viewport,
        content: ContentId,
        image: Size,
    ) {
        if !self.is_visible() {
            return;
        }
        let screen = Rect::from_origin_size(Point::ORIGIN, viewport.size);
        let [r, g, b, a] = self.config.backdrop_rgba;
        #[expect(
            clippy::cast_possible_truncation,
            reason = "opacity is in [0, 1], well within f32"
        )]
        let opacity = self.backdrop.value() as f32;

        backend.set_transform(Affine::IDENTITY);
        backend.with_opacity_layer(opacity, |bk| {
            bk.state(StateOp::SetPaint(Color::from_rgba8(r, g, b, a)));
            bk.draw(DrawOp::FillRect(screen));
        });

        let dst = self.image_rect(viewport, image);
        let clip = ClipShape::RoundedRect(RoundedRect::from_rect(dst, self.config.corner_radius));
        backend.with_transform(Affine::IDENTITY, self.panel_transform(viewport), |bk| {
            bk.with_clip_shape(clip, |bk| bk.draw(DrawOp::Content { content, dst }));
        });
    }
}

impl<K: Copy + PartialEq + Debug> Default for Lightbox<K> {
    fn default() -> Self {
        Self::new(LightboxConfig::default())
    }
}

fn viewport_center(viewport: &Viewport) -> Point {
    Point::new(viewport.width() / 2.0, viewport.height() / 2.0)
}

/// Scale `content` to fit inside `frame`, preserving aspect ratio, centred.
pub fn contain(content: Size, frame: Rect) -> Rect {
    if content.width <= 0.0 || content.height <= 0.0 {
        return Rect::from_center_size(frame.center(), Size::ZERO);
    }
    let scale = (frame.width() / content.width).min(frame.height() / content.height);
    Rect::from_center_size(frame.center(), content * scale)
}
