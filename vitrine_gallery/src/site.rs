// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Site navigation and directional page transitions.
//!
//! Pages are ordered (`/`, `/gallery`, `/about`, `/contact`). Navigating to a
//! later page slides the new page in from the right, to an earlier page from
//! the left. The very first page fades and scales in instead.

use core::fmt;

use kurbo::{Rect, Vec2};
use vitrine_imaging::{
    Affine, ContentId, DrawOp, FilterDesc, ImagingBackend, ImagingBackendExt,
};
use vitrine_lens::scale_about;
use vitrine_motion::{Easing, Tween};

/// A page of the site.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Route {
    /// Landing page with the carousel.
    Home,
    /// The gallery grid.
    Gallery,
    /// About the artist.
    About,
    /// Contact details.
    Contact,
}

impl Route {
    /// All routes in navigation order.
    pub const ALL: [Self; 4] = [Self::Home, Self::Gallery, Self::About, Self::Contact];

    /// URL path.
    pub fn path(self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::Gallery => "/gallery",
            Self::About => "/about",
            Self::Contact => "/contact",
        }
    }

    /// Navigation label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Gallery => "Gallery",
            Self::About => "About",
            Self::Contact => "Contact",
        }
    }

    /// The route for `path`, if it is one of ours.
    pub fn from_path(path: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.path() == path)
    }

    /// Position in navigation order.
    pub fn order(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// One entry of the header navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavItem {
    /// Target route.
    pub route: Route,
    /// Whether this is the page being shown.
    pub current: bool,
}

/// Header navigation entries for the page at `path`.
pub fn nav_items(path: &str) -> [NavItem; 4] {
    Route::ALL.map(|route| NavItem {
        route,
        current: route.path() == path,
    })
}

/// How the incoming page animates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TransitionDirection {
    /// First page load: fade and scale in.
    #[default]
    Initial,
    /// Forward in route order: slide in from the right.
    Right,
    /// Backward in route order: slide in from the left.
    Left,
}

/// Derives the transition direction from the sequence of visited paths.
#[derive(Clone, Debug, Default)]
pub struct TransitionTracker {
    previous: Option<String>,
    direction: TransitionDirection,
}

impl TransitionTracker {
    /// A tracker that has not seen any page yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Direction of the most recent transition.
    pub fn direction(&self) -> TransitionDirection {
        self.direction
    }

    /// The path shown last.
    pub fn current(&self) -> Option<&str> {
        self.previous.as_deref()
    }

    /// Record a visit to `path` and return the direction to animate with.
    ///
    /// Revisiting the current path keeps the previous direction. Paths outside
    /// the known routes animate as [`TransitionDirection::Right`].
    pub fn navigate(&mut self, path: &str) -> TransitionDirection {
        let Some(previous) = self.previous.as_deref() else {
            self.previous = Some(path.to_owned());
            self.direction = TransitionDirection::Initial;
            return self.direction;
        };
        if previous == path {
            return self.direction;
        }
        self.direction = match (Route::from_path(previous), Route::from_path(path)) {
            (Some(from), Some(to)) if to.order() > from.order() => TransitionDirection::Right,
            (Some(_), Some(_)) => TransitionDirection::Left,
            _ => TransitionDirection::Right,
        };
        log::debug!("page transition {previous} -> {path}: {:?}", self.direction);
        self.previous = Some(path.to_owned());
        self.direction
    }
}

/// Visual state of a page.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageStyle {
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Horizontal offset in pixels.
    pub x: f64,
    /// Vertical offset in pixels.
    pub y: f64,
    /// Uniform scale about the page centre.
    pub scale: f64,
    /// Blur radius in pixels.
    pub blur: f64,
}

impl PageStyle {
    /// Fully shown, untransformed.
    pub const SHOWN: Self = Self {
        opacity: 1.0,
        x: 0.0,
        y: 0.0,
        scale: 1.0,
        blur: 0.0,
    };

    const fn hidden(x: f64, y: f64, scale: f64, blur: f64) -> Self {
        Self {
            opacity: 0.0,
            x,
            y,
            scale,
            blur,
        }
    }
}

/// Start and end states of a page transition.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PageVariants {
    /// Where the entering page starts.
    pub hidden: PageStyle,
    /// Enter duration in seconds.
    pub enter_duration: f64,
    /// Where the leaving page ends.
    pub exit: PageStyle,
    /// Exit duration in seconds.
    pub exit_duration: f64,
    /// Easing for both phases.
    pub easing: Easing,
}

impl PageVariants {
    /// The variants for `direction`.
    pub fn for_direction(direction: TransitionDirection) -> Self {
        let easing = Easing::EASE_OUT_SOFT;
        match direction {
            TransitionDirection::Initial => Self {
                hidden: PageStyle::hidden(0.0, 20.0, 0.95, 10.0),
                enter_duration: 0.8,
                exit: PageStyle::hidden(0.0, -20.0, 1.05, 5.0),
                exit_duration: 0.5,
                easing,
            },
            TransitionDirection::Right => Self {
                hidden: PageStyle::hidden(100.0, 0.0, 1.0, 8.0),
                enter_duration: 0.6,
                exit: PageStyle::hidden(-100.0, 0.0, 1.0, 8.0),
                exit_duration: 0.4,
                easing,
            },
            TransitionDirection::Left => Self {
                hidden: PageStyle::hidden(-100.0, 0.0, 1.0, 8.0),
                enter_duration: 0.6,
                exit: PageStyle::hidden(100.0, 0.0, 1.0, 8.0),
                exit_duration: 0.4,
                easing,
            },
        }
    }
}

/// Phase of a [`PageTransition`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PagePhase {
    /// Animating in.
    Entering,
    /// At rest.
    Shown,
    /// Animating out.
    Exiting,
    /// Fully gone.
    Gone,
}

/// Animates one page in or out.
#[derive(Clone, Debug)]
pub struct PageTransition {
    variants: PageVariants,
    phase: PagePhase,
    opacity: Tween,
    x: Tween,
    y: Tween,
    scale: Tween,
    blur: Tween,
}

impl PageTransition {
    /// Start entering with the variants for `direction`.
    pub fn enter(direction: TransitionDirection) -> Self {
        let variants = PageVariants::for_direction(direction);
        let mut transition = Self::at(variants, variants.hidden, variants.enter_duration);
        transition.retarget(PageStyle::SHOWN, variants.enter_duration);
        transition.phase = PagePhase::Entering;
        transition
    }

    fn at(variants: PageVariants, style: PageStyle, duration: f64) -> Self {
        let tween = |v| Tween::new(v, variants.easing).with_duration(duration);
        Self {
            variants,
            phase: PagePhase::Shown,
            opacity: tween(style.opacity),
            x: tween(style.x),
            y: tween(style.y),
            scale: tween(style.scale),
            blur: tween(style.blur),
        }
    }

    fn retarget(&mut self, target: PageStyle, duration: f64) {
        let current = self.style();
        *self = Self {
            phase: self.phase,
            ..Self::at(self.variants, current, duration)
        };
        self.opacity.set_target(target.opacity);
        self.x.set_target(target.x);
        self.y.set_target(target.y);
        self.scale.set_target(target.scale);
        self.blur.set_target(target.blur);
    }

    /// Start leaving, from wherever the page currently is.
    pub fn exit(&mut self) {
        if matches!(self.phase, PagePhase::Exiting | PagePhase::Gone) {
            return;
        }
        self.retarget(self.variants.exit, self.variants.exit_duration);
        self.phase = PagePhase::Exiting;
    }

    /// Current phase.
    pub fn phase(&self) -> PagePhase {
        self.phase
    }

    /// Current style.
    pub fn style(&self) -> PageStyle {
        PageStyle {
            opacity: self.opacity.value(),
            x: self.x.value(),
            y: self.y.value(),
            scale: self.scale.value(),
            blur: self.blur.value(),
        }
    }

    /// Advance by `dt` seconds. Returns `true` while animating.
    pub fn tick(&mut self, dt: f64) -> bool {
        let tweens = [
            &mut self.opacity,
            &mut self.x,
            &mut self.y,
            &mut self.scale,
            &mut self.blur,
        ];
        let mut done = true;
        for tween in tweens {
            tween.update(dt);
            done &= tween.is_complete();
        }
        if done {
            self.phase = match self.phase {
                PagePhase::Entering => PagePhase::Shown,
                PagePhase::Exiting => PagePhase::Gone,
                phase => phase,
            };
        }
        !done
    }

    /// Paint `content` filling `page` with the current style.
    pub fn paint<B: ImagingBackend + ?Sized>(&self, backend: &mut B, page: Rect, content: ContentId) {
        if self.phase == PagePhase::Gone {
            return;
        }
        let style = self.style();
        let transform =
            Affine::translate(Vec2::new(style.x, style.y)) * scale_about(style.scale, page.center());
        #[expect(
            clippy::cast_possible_truncation,
            reason = "opacity and blur radii are small"
        )]
        let (opacity, blur) = (style.opacity as f32, style.blur as f32);
        let draw = |b: &mut B| {
            b.with_transform(Affine::IDENTITY, transform, |b| {
                b.draw(DrawOp::Content { content, dst: page });
            });
        };
        backend.with_opacity_layer(opacity, |b| {
            if blur > 0.0 {
                b.with_filter_layer(FilterDesc::blur(blur), draw);
            } else {
                draw(b);
            }
        });
    }
}

/// Navigation state of the whole site.
#[derive(Clone, Debug)]
pub struct Site {
    tracker: TransitionTracker,
    page: Option<PageTransition>,
    leaving: Option<PageTransition>,
}

impl Site {
    /// A site with nothing shown yet.
    pub fn new() -> Self {
        Self {
            tracker: TransitionTracker::new(),
            page: None,
            leaving: None,
        }
    }

    /// Show the page at `path`.
    ///
    /// The current page starts its exit and the new one enters in the
    /// derived direction. Navigating to the current path does nothing.
    pub fn navigate(&mut self, path: &str) -> TransitionDirection {
        if self.tracker.current() == Some(path) {
            return self.tracker.direction();
        }
        let direction = self.tracker.navigate(path);
        if let Some(mut page) = self.page.take() {
            page.exit();
            self.leaving = Some(page);
        }
        self.page = Some(PageTransition::enter(direction));
        direction
    }

    /// The path shown, if any.
    pub fn current_path(&self) -> Option<&str> {
        self.tracker.current()
    }

    /// The known route shown, if any.
    pub fn current_route(&self) -> Option<Route> {
        self.current_path().and_then(Route::from_path)
    }

    /// Header navigation entries.
    pub fn nav_items(&self) -> [NavItem; 4] {
        nav_items(self.current_path().unwrap_or_default())
    }

    /// The entering or shown page.
    pub fn page(&self) -> Option<&PageTransition> {
        self.page.as_ref()
    }

    /// The page still animating out, if any.
    pub fn leaving(&self) -> Option<&PageTransition> {
        self.leaving.as_ref()
    }

    /// Advance page animations. Returns `true` while animating.
    pub fn tick(&mut self, dt: f64) -> bool {
        let mut animating = false;
        if let Some(page) = &mut self.page {
            animating |= page.tick(dt);
        }
        if let Some(leaving) = &mut self.leaving {
            animating |= leaving.tick(dt);
            if leaving.phase() == PagePhase::Gone {
                self.leaving = None;
            }
        }
        animating
    }
}

impl Default for Site {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_round_trip_paths() {
        for route in Route::ALL {
            assert_eq!(Route::from_path(route.path()), Some(route));
        }
        assert_eq!(Route::from_path("/shop"), None);
        assert_eq!(Route::Gallery.label(), "Gallery");
        assert_eq!(Route::Contact.to_string(), "/contact");
    }

    #[test]
    fn nav_marks_current_page() {
        let items = nav_items("/about");
        let current: Vec<_> = items.iter().filter(|i| i.current).map(|i| i.route).collect();
        assert_eq!(current, [Route::About]);
        assert!(nav_items("/elsewhere").iter().all(|i| !i.current));
    }

    #[test]
    fn tracker_directions() {
        let mut t = TransitionTracker::new();
        assert_eq!(t.navigate("/gallery"), TransitionDirection::Initial);
        assert_eq!(t.navigate("/contact"), TransitionDirection::Right);
        assert_eq!(t.navigate("/"), TransitionDirection::Left);
        assert_eq!(t.navigate("/"), TransitionDirection::Left);
        assert_eq!(t.navigate("/test"), TransitionDirection::Right);
        assert_eq!(t.navigate("/about"), TransitionDirection::Right);
        assert_eq!(t.navigate("/gallery"), TransitionDirection::Left);
    }

    #[test]
    fn initial_variants() {
        let v = PageVariants::for_direction(TransitionDirection::Initial);
        assert_eq!(v.hidden.y, 20.0);
        assert_eq!(v.hidden.scale, 0.95);
        assert_eq!(v.hidden.blur, 10.0);
        assert_eq!(v.exit.y, -20.0);
        assert_eq!(v.exit.scale, 1.05);
        assert_eq!(v.enter_duration, 0.8);
        assert_eq!(v.exit_duration, 0.5);
    }

    #[test]
    fn directional_variants_mirror() {
        let right = PageVariants::for_direction(TransitionDirection::Right);
        let left = PageVariants::for_direction(TransitionDirection::Left);
        assert_eq!(right.hidden.x, 100.0);
        assert_eq!(right.exit.x, -100.0);
        assert_eq!(left.hidden.x, -100.0);
        assert_eq!(left.exit.x, 100.0);
        assert_eq!(right.enter_duration, 0.6);
        assert_eq!(left.exit_duration, 0.4);
    }

    #[test]
    fn page_enters_then_exits() {
        let mut page = PageTransition::enter(TransitionDirection::Right);
        assert_eq!(page.phase(), PagePhase::Entering);
        assert_eq!(page.style().x, 100.0);
        assert_eq!(page.style().opacity, 0.0);

        assert!(page.tick(0.3));
        let mid = page.style();
        assert!(mid.x > 0.0 && mid.x < 100.0);
        assert!(!page.tick(0.3));
        assert_eq!(page.phase(), PagePhase::Shown);
        assert_eq!(page.style(), PageStyle::SHOWN);

        page.exit();
        assert!(page.tick(0.2));
        assert!(!page.tick(0.2));
        assert_eq!(page.phase(), PagePhase::Gone);
        assert_eq!(page.style().x, -100.0);
    }

    #[test]
    fn entering_page_paints_blurred_then_sharp() {
        use vitrine_imaging::LayerOp;
        use vitrine_imaging_ref::RefBackend;

        let page = Rect::new(0.0, 0.0, 800.0, 600.0);
        let mut transition = PageTransition::enter(TransitionDirection::Right);

        let mut backend = RefBackend::default();
        transition.paint(&mut backend, page, ContentId(9));
        let draws = backend.content_draws();
        assert_eq!(draws.len(), 1);
        assert_eq!(draws[0].state.opacity, 0.0);
        assert_eq!(draws[0].state.layer_top, Some(LayerOp::filter(FilterDesc::blur(8.0))));
        assert_eq!(
            draws[0].state.transform,
            Affine::translate(Vec2::new(100.0, 0.0))
        );

        while transition.tick(0.1) {}
        let mut backend = RefBackend::default();
        transition.paint(&mut backend, page, ContentId(9));
        let draws = backend.content_draws();
        assert_eq!(draws[0].state.opacity, 1.0);
        assert_eq!(draws[0].state.layer_stack_depth, 1);
        assert_eq!(draws[0].state.transform, Affine::IDENTITY);
    }

    #[test]
    fn site_swaps_pages() {
        let mut site = Site::new();
        assert_eq!(site.navigate("/"), TransitionDirection::Initial);
        assert!(site.leaving().is_none());
        while site.tick(0.1) {}

        assert_eq!(site.navigate("/gallery"), TransitionDirection::Right);
        assert_eq!(site.current_route(), Some(Route::Gallery));
        assert_eq!(site.leaving().map(PageTransition::phase), Some(PagePhase::Exiting));
        while site.tick(0.1) {}
        assert!(site.leaving().is_none());
        assert_eq!(site.page().map(PageTransition::phase), Some(PagePhase::Shown));
        assert!(site.nav_items()[1].current);
    }
}
