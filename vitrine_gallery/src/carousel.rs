// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coverflow carousel of artworks, each wrapped in a lens.
//!
//! Slides are laid out on a horizontal track with the active slide centred.
//! Neighbours are pushed back in depth and projected with a fixed
//! perspective, so they appear smaller. All lenses share one
//! [`HoverGroup`], so only the active slide's lens can ever be shown.

use kurbo::{Point, Rect, Size};
use vitrine_imaging::{
    Affine, ContentId, DrawOp, FilterDesc, ImagingBackend, ImagingBackendExt,
};
use vitrine_lens::{
    Breakpoint, GroupHover, HoverGroup, Lens, LensConfig, LensFrame, Viewport, scale_about,
};
use vitrine_motion::{Easing, Tween};

/// Slides-per-view and spacing that apply from `min_width` upwards.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarouselBreakpoint {
    /// Minimum viewport width.
    pub min_width: f64,
    /// Number of slides visible at once; fractional values peek neighbours.
    pub slides_per_view: f64,
    /// Space between slides in pixels.
    pub space_between: f64,
}

/// Depth effect applied to slides away from the centre.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverflowConfig {
    /// Rotation per slide of offset, in degrees; not applied by
    /// [`SlideFrame::projection`].
    pub rotate: f64,
    /// Extra spacing per slide of offset.
    pub stretch: f64,
    /// Depth per unit of offset.
    pub depth: f64,
    /// Multiplier on the slide offset.
    pub modifier: f64,
    /// Distance from the viewer to the track plane.
    pub perspective: f64,
}

impl Default for CoverflowConfig {
    fn default() -> Self {
        Self {
            rotate: 0.0,
            stretch: 0.0,
            depth: 100.0,
            modifier: 2.0,
            perspective: 1200.0,
        }
    }
}

/// Carousel configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CarouselConfig {
    /// Slides per view below the first breakpoint.
    pub slides_per_view: f64,
    /// Spacing below the first breakpoint.
    pub space_between: f64,
    /// Overrides by viewport width, smallest first.
    pub breakpoints: Vec<CarouselBreakpoint>,
    /// Whether `next`/`prev` wrap around.
    pub looped: bool,
    /// Slide transition duration in milliseconds.
    pub speed_ms: u32,
    /// Depth effect.
    pub coverflow: CoverflowConfig,
    /// Slide height on narrow viewports.
    pub slide_height: f64,
    /// Slide height from [`Breakpoint::Md`] upwards.
    pub slide_height_md: f64,
    /// Whether to draw a soft blurred copy behind the active slide.
    pub glow: bool,
    /// Lens used on every slide.
    pub lens: LensConfig,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            slides_per_view: 1.3,
            space_between: 30.0,
            breakpoints: vec![
                CarouselBreakpoint {
                    min_width: 640.0,
                    slides_per_view: 1.1,
                    space_between: 20.0,
                },
                CarouselBreakpoint {
                    min_width: 768.0,
                    slides_per_view: 1.2,
                    space_between: 25.0,
                },
                CarouselBreakpoint {
                    min_width: 1024.0,
                    slides_per_view: 1.3,
                    space_between: 30.0,
                },
            ],
            looped: true,
            speed_ms: 800,
            coverflow: CoverflowConfig::default(),
            slide_height: 400.0,
            slide_height_md: 600.0,
            glow: true,
            lens: LensConfig::default(),
        }
    }
}

impl CarouselConfig {
    /// Slides per view and spacing for a viewport width.
    ///
    /// The largest breakpoint not wider than `width` wins.
    pub fn resolve(&self, width: f64) -> (f64, f64) {
        self.breakpoints
            .iter()
            .filter(|bp| width >= bp.min_width)
            .max_by(|a, b| a.min_width.total_cmp(&b.min_width))
            .map_or((self.slides_per_view, self.space_between), |bp| {
                (bp.slides_per_view, bp.space_between)
            })
    }

    /// Slide height for a viewport.
    pub fn slide_height_for(&self, viewport: &Viewport) -> f64 {
        if viewport.at_least(Breakpoint::Md) {
            self.slide_height_md
        } else {
            self.slide_height
        }
    }

    /// Set whether navigation wraps.
    #[must_use]
    pub fn with_looped(mut self, looped: bool) -> Self {
        self.looped = looped;
        self
    }

    /// Set the lens used on every slide.
    #[must_use]
    pub fn with_lens(mut self, lens: LensConfig) -> Self {
        self.lens = lens;
        self
    }
}

/// Placement of one slide for the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlideFrame {
    /// Slide index.
    pub index: usize,
    /// Signed distance from the centre, in slides.
    pub offset: f64,
    /// Slide rectangle on the track, before projection (viewport coordinates).
    pub rect: Rect,
    /// Depth; zero for the centred slide, negative behind it.
    pub translate_z: f64,
    /// Perspective scale resulting from `translate_z`.
    pub scale: f64,
    /// Stacking order; higher paints on top.
    pub z_index: i32,
}

impl SlideFrame {
    /// Projection from track coordinates to the screen.
    ///
    /// Depth scales the slide towards the horizontal centre of the carousel.
    pub fn projection(&self, carousel: Rect) -> Affine {
        scale_about(self.scale, Point::new(carousel.center().x, self.rect.center().y))
    }
}

#[derive(Debug)]
struct Slide {
    id: u32,
    content: ContentId,
    lens: Lens<GroupHover>,
}

/// A looping coverflow carousel hosting one lens per slide.
#[derive(Debug)]
pub struct Carousel {
    config: CarouselConfig,
    slides: Vec<Slide>,
    group: HoverGroup,
    viewport: Viewport,
    bounds: Rect,
    /// Unwrapped track position; the active index is this modulo the length.
    position: i64,
    track: Tween,
}

impl Carousel {
    /// A carousel over `(artwork id, content)` pairs, starting on the first.
    pub fn new(config: CarouselConfig, slides: impl IntoIterator<Item = (u32, ContentId)>) -> Self {
        let group = HoverGroup::new();
        let slides = slides
            .into_iter()
            .map(|(id, content)| Slide {
                id,
                content,
                lens: Lens::with_hover(config.lens, group.member()),
            })
            .collect();
        let track = Tween::new(0.0, Easing::EASE).with_duration(f64::from(config.speed_ms) / 1000.0);
        let viewport = Viewport::default();
        Self {
            config,
            slides,
            group,
            viewport,
            bounds: Rect::from_origin_size(Point::ORIGIN, viewport.size),
            position: 0,
            track,
        }
    }

    /// The configuration.
    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Number of slides.
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Returns `true` if there are no slides.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Index of the active slide.
    pub fn active_index(&self) -> usize {
        self.wrap(self.position)
    }

    /// Artwork id of the active slide.
    pub fn active_id(&self) -> Option<u32> {
        self.slides.get(self.active_index()).map(|s| s.id)
    }

    /// The hover group shared by every slide's lens.
    pub fn hover_group(&self) -> &HoverGroup {
        &self.group
    }

    /// The lens of slide `index`.
    pub fn lens(&self, index: usize) -> Option<&Lens<GroupHover>> {
        self.slides.get(index).map(|s| &s.lens)
    }

    /// Set the viewport and the carousel's bounds within it.
    pub fn resize(&mut self, viewport: Viewport, bounds: Rect) {
        self.viewport = viewport;
        self.bounds = bounds;
    }

    fn wrap(&self, position: i64) -> usize {
        let len = i64::try_from(self.slides.len()).unwrap_or(i64::MAX);
        if len == 0 {
            return 0;
        }
        usize::try_from(position.rem_euclid(len)).unwrap_or(0)
    }

    /// Advance to the next slide. Returns `false` at the end of a non-looping
    /// carousel.
    pub fn next(&mut self) -> bool {
        self.step(1)
    }

    /// Go back one slide. Returns `false` at the start of a non-looping
    /// carousel.
    pub fn prev(&mut self) -> bool {
        self.step(-1)
    }

    /// Go to slide `index` by the shortest way round.
    pub fn go_to(&mut self, index: usize) -> bool {
        let len = self.slides.len();
        if index >= len {
            return false;
        }
        let current = self.active_index();
        let (Ok(index), Ok(current), Ok(len)) = (
            i64::try_from(index),
            i64::try_from(current),
            i64::try_from(len),
        ) else {
            return false;
        };
        let mut delta = index - current;
        if self.config.looped {
            delta = (delta + len / 2).rem_euclid(len) - len / 2;
        }
        self.step(delta)
    }

    fn step(&mut self, delta: i64) -> bool {
        if delta == 0 || self.slides.is_empty() {
            return false;
        }
        let target = self.position + delta;
        if !self.config.looped {
            let last = i64::try_from(self.slides.len()).unwrap_or(i64::MAX) - 1;
            if !(0..=last).contains(&target) {
                return false;
            }
        }
        let from = self.active_index();
        self.position = target;
        self.track.set_target(target as f64);
        self.group.release();
        log::debug!("carousel slide {from} -> {}", self.active_index());
        true
    }

    /// Advance the slide transition and lens animations.
    ///
    /// Returns `true` while anything is animating.
    pub fn tick(&mut self, dt: f64) -> bool {
        self.track.update(dt);
        let mut animating = !self.track.is_complete();
        for slide in &mut self.slides {
            animating |= slide.lens.tick(dt);
        }
        animating
    }

    /// Slides per view and spacing currently in effect.
    pub fn layout_params(&self) -> (f64, f64) {
        self.config.resolve(self.viewport.width())
    }

    /// Width and height of one slide.
    pub fn slide_size(&self) -> Size {
        let (per_view, space) = self.layout_params();
        let width = ((self.bounds.width() - (per_view - 1.0) * space) / per_view).max(0.0);
        Size::new(width, self.config.slide_height_for(&self.viewport))
    }

    /// Placement of every slide, in slide order.
    pub fn frames(&self) -> Vec<SlideFrame> {
        let len = self.slides.len();
        let size = self.slide_size();
        let (_, space) = self.layout_params();
        let cover = &self.config.coverflow;
        let track = self.track.value();
        let n = len as f64;

        (0..len)
            .map(|index| {
                let mut offset = index as f64 - track;
                if self.config.looped && len > 0 {
                    offset = (offset + n / 2.0).rem_euclid(n) - n / 2.0;
                }
                let x = self.bounds.center().x - size.width / 2.0
                    + offset * (size.width + space + cover.stretch);
                let rect = Rect::from_origin_size((x, self.bounds.y0), size);
                let multiplier = offset * cover.modifier;
                let translate_z = -cover.depth * multiplier.abs();
                let scale = cover.perspective / (cover.perspective - translate_z);
                #[expect(
                    clippy::cast_possible_truncation,
                    reason = "rounded slide offsets are small"
                )]
                let z_index = 1 - multiplier.abs().round() as i32;
                SlideFrame {
                    index,
                    offset,
                    rect,
                    translate_z,
                    scale,
                    z_index,
                }
            })
            .collect()
    }

    fn active_frame(&self) -> Option<SlideFrame> {
        self.frames().into_iter().nth(self.active_index())
    }

    /// The pointer entered the active slide.
    pub fn pointer_enter(&mut self) {
        let index = self.active_index();
        if let Some(slide) = self.slides.get_mut(index) {
            slide.lens.pointer_enter();
        }
    }

    /// The pointer left the active slide.
    pub fn pointer_leave(&mut self) {
        let index = self.active_index();
        if let Some(slide) = self.slides.get_mut(index) {
            slide.lens.pointer_leave();
        }
    }

    /// The pointer moved over the carousel (viewport coordinates).
    ///
    /// The move is routed to the active slide's lens, in that slide's
    /// unprojected coordinates.
    pub fn pointer_move(&mut self, client: Point) -> Option<Point> {
        let frame = self.active_frame()?;
        let local = frame.projection(self.bounds).inverse() * client;
        let index = frame.index;
        self.slides
            .get_mut(index)?
            .lens
            .pointer_move(local, Some(frame.rect))
    }

    /// Paint all slides back to front.
    pub fn paint<B: ImagingBackend + ?Sized>(&self, backend: &mut B) {
        let mut frames = self.frames();
        frames.sort_by(|a, b| {
            a.z_index
                .cmp(&b.z_index)
                .then(b.offset.abs().total_cmp(&a.offset.abs()))
        });
        let active = self.active_index();
        for frame in &frames {
            let Some(slide) = self.slides.get(frame.index) else {
                continue;
            };
            let projection = frame.projection(self.bounds);
            if self.config.glow && frame.index == active {
                self.paint_glow(backend, projection, frame, slide.content);
            }
            let lens_frame = LensFrame::new(slide.content, frame.rect.size())
                .with_transform(projection * Affine::translate(frame.rect.origin().to_vec2()))
                .with_viewport(self.viewport);
            slide.lens.paint(backend, &lens_frame);
        }
    }

    fn paint_glow<B: ImagingBackend + ?Sized>(
        &self,
        backend: &mut B,
        projection: Affine,
        frame: &SlideFrame,
        content: ContentId,
    ) {
        let glow = scale_about(1.05, frame.rect.center());
        backend.with_opacity_layer(0.6, |b| {
            b.with_filter_layer(FilterDesc::blur(20.0), |b| {
                b.set_transform(projection * glow);
                b.draw(DrawOp::Content {
                    content,
                    dst: frame.rect,
                });
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_lens::HoverControl;

    fn carousel(n: u32) -> Carousel {
        let mut c = Carousel::new(
            CarouselConfig::default(),
            (1..=n).map(|id| (id, ContentId(id))),
        );
        c.resize(Viewport::new(1280.0, 900.0), Rect::new(0.0, 100.0, 1200.0, 700.0));
        c
    }

    fn settle(c: &mut Carousel) {
        for _ in 0..600 {
            if !c.tick(1.0 / 60.0) {
                break;
            }
        }
    }

    #[test]
    fn breakpoints_resolve_largest_match() {
        let config = CarouselConfig::default();
        assert_eq!(config.resolve(400.0), (1.3, 30.0));
        assert_eq!(config.resolve(640.0), (1.1, 20.0));
        assert_eq!(config.resolve(800.0), (1.2, 25.0));
        assert_eq!(config.resolve(1920.0), (1.3, 30.0));
    }

    #[test]
    fn slide_size_follows_slides_per_view() {
        let c = carousel(3);
        let size = c.slide_size();
        // (1200 - 0.3 * 30) / 1.3
        assert!((size.width - 1191.0 / 1.3).abs() < 1e-9);
        assert_eq!(size.height, 600.0);
    }

    #[test]
    fn active_slide_is_centred_and_flat() {
        let c = carousel(5);
        let frames = c.frames();
        let active = frames[0];
        assert_eq!(active.offset, 0.0);
        assert!((active.rect.center().x - 600.0).abs() < 1e-9);
        assert_eq!(active.translate_z, 0.0);
        assert_eq!(active.scale, 1.0);
        assert_eq!(active.z_index, 1);
    }

    #[test]
    fn neighbours_recede() {
        let c = carousel(5);
        let frames = c.frames();
        let next = frames[1];
        assert_eq!(next.offset, 1.0);
        assert_eq!(next.translate_z, -200.0);
        assert!((next.scale - 1200.0 / 1400.0).abs() < 1e-12);
        assert_eq!(next.z_index, -1);
        // Looping puts the last slide to the left of the first.
        assert_eq!(frames[4].offset, -1.0);
    }

    #[test]
    fn looping_navigation_wraps() {
        let mut c = carousel(3);
        assert!(c.prev());
        assert_eq!(c.active_index(), 2);
        assert!(c.next());
        assert!(c.next());
        assert_eq!(c.active_index(), 1);
        assert!(c.go_to(0));
        assert_eq!(c.active_index(), 0);
        assert!(!c.go_to(0));
        assert!(!c.go_to(7));
    }

    #[test]
    fn bounded_navigation_stops_at_ends() {
        let mut c = Carousel::new(
            CarouselConfig::default().with_looped(false),
            [(1, ContentId(1)), (2, ContentId(2))],
        );
        assert!(!c.prev());
        assert!(c.next());
        assert!(!c.next());
        assert_eq!(c.active_index(), 1);
    }

    #[test]
    fn transition_takes_configured_time() {
        let mut c = carousel(4);
        c.next();
        assert!(c.tick(0.4));
        let mid = c.frames()[1].offset;
        assert!(mid > 0.0 && mid < 1.0);
        c.tick(0.4);
        assert_eq!(c.frames()[1].offset, 0.0);
    }

    #[test]
    fn slide_change_releases_hover() {
        let mut c = carousel(3);
        c.pointer_enter();
        assert!(c.lens(0).is_some_and(|l| l.is_active()));
        c.next();
        assert_eq!(c.hover_group().active(), None);
        settle(&mut c);
        assert!(!c.lens(0).is_some_and(|l| l.overlay_mounted()));
    }

    #[test]
    fn pointer_input_goes_to_the_active_slide_only() {
        let mut c = carousel(3);
        c.next();
        settle(&mut c);
        c.pointer_enter();
        let active = c.frames()[1].rect;
        let local = c
            .pointer_move(Point::new(active.x0 + 40.0, active.y0 + 30.0))
            .unwrap();
        assert!((local - Point::new(40.0, 30.0)).hypot() < 1e-9);
        assert!(c.lens(1).is_some_and(|l| l.hover().is_hovering()));
        assert!(!c.lens(0).is_some_and(|l| l.is_active()));
        assert_eq!(c.lens(0).map(|l| l.position()), Some(Point::new(85.0, 85.0)));
    }

    #[test]
    fn glow_is_centred_behind_the_active_slide() {
        use vitrine_imaging::LayerOp;
        use vitrine_imaging_ref::RefBackend;

        let c = carousel(3);
        let active = c.frames()[0];
        let mut backend = RefBackend::default();
        c.paint(&mut backend);

        let glow_layer = Some(LayerOp::filter(FilterDesc::blur(20.0)));
        let draws = backend.content_draws();
        let glows: Vec<_> = draws
            .iter()
            .filter(|d| d.state.layer_top == glow_layer)
            .collect();
        assert_eq!(glows.len(), 1);
        let glow = glows[0];
        assert_eq!(glow.content, ContentId(1));
        let centre = glow.state.transform * glow.dst.center();
        let expected = active.projection(c.bounds) * active.rect.center();
        assert!((centre - expected).hypot() < 1e-9);
        let drawn = glow.state.transform.transform_rect_bbox(glow.dst);
        assert!((drawn.width() - active.rect.width() * 1.05).abs() < 1e-9);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn config_survives_json() {
        let config = CarouselConfig::default()
            .with_looped(false)
            .with_lens(LensConfig::default().with_zoom_factor(2.0));
        let json = serde_json::to_string(&config).unwrap();
        let back: CarouselConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);

        let partial: CarouselConfig = serde_json::from_str(r#"{ "speed_ms": 500 }"#).unwrap();
        assert_eq!(partial.speed_ms, 500);
        assert_eq!(partial.breakpoints, CarouselConfig::default().breakpoints);
    }
}
