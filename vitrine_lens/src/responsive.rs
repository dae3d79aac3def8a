// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;

/// Minimum-width breakpoints, smallest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Breakpoint {
    /// Small screens and up (640 px).
    Sm,
    /// Tablets and up (768 px).
    Md,
    /// Desktops and up (1024 px).
    Lg,
}

impl Breakpoint {
    /// All breakpoints, smallest first.
    pub const ALL: [Self; 3] = [Self::Sm, Self::Md, Self::Lg];

    /// Minimum viewport width, in pixels, at which the breakpoint applies.
    pub fn min_width(self) -> f64 {
        match self {
            Self::Sm => 640.0,
            Self::Md => 768.0,
            Self::Lg => 1024.0,
        }
    }
}

/// The host viewport the presentation is laid out in.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    /// Viewport size in pixels.
    pub size: Size,
}

impl Viewport {
    /// A viewport of `width` x `height` pixels.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
        }
    }

    /// Viewport width.
    pub fn width(&self) -> f64 {
        self.size.width
    }

    /// Viewport height.
    pub fn height(&self) -> f64 {
        self.size.height
    }

    /// Returns `true` if the viewport is at least as wide as `breakpoint`.
    pub fn at_least(&self, breakpoint: Breakpoint) -> bool {
        self.size.width >= breakpoint.min_width()
    }

    /// The largest breakpoint that applies, if any.
    pub fn breakpoint(&self) -> Option<Breakpoint> {
        Breakpoint::ALL
            .iter()
            .rev()
            .copied()
            .find(|bp| self.at_least(*bp))
    }

    /// Whether the lens overlay is rendered on this viewport.
    ///
    /// Narrow viewports are treated as touch-only, where hover tracking has
    /// no meaning, so only the base content is shown.
    pub fn supports_lens(&self) -> bool {
        self.at_least(Breakpoint::Md)
    }

    /// Whether the viewport is treated as a phone: tap and hold replace hover.
    pub fn is_touch_primary(&self) -> bool {
        !self.at_least(Breakpoint::Sm)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1280.0, 800.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn breakpoint_bounds_are_inclusive() {
        assert!(Viewport::new(768.0, 600.0).at_least(Breakpoint::Md));
        assert!(!Viewport::new(767.9, 600.0).at_least(Breakpoint::Md));
    }

    #[test]
    fn largest_matching_breakpoint() {
        assert_eq!(Viewport::new(320.0, 600.0).breakpoint(), None);
        assert_eq!(Viewport::new(700.0, 600.0).breakpoint(), Some(Breakpoint::Sm));
        assert_eq!(Viewport::new(800.0, 600.0).breakpoint(), Some(Breakpoint::Md));
        assert_eq!(Viewport::new(1440.0, 900.0).breakpoint(), Some(Breakpoint::Lg));
    }

    #[test]
    fn lens_and_touch_policies() {
        let phone = Viewport::new(390.0, 844.0);
        let tablet = Viewport::new(700.0, 1000.0);
        let desktop = Viewport::default();

        assert!(phone.is_touch_primary() && !phone.supports_lens());
        assert!(!tablet.is_touch_primary() && !tablet.supports_lens());
        assert!(!desktop.is_touch_primary() && desktop.supports_lens());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn viewport_survives_json() {
        let phone: Viewport =
            serde_json::from_str(r#"{ "size": { "width": 390.0, "height": 844.0 } }"#).unwrap();
        assert_eq!(phone, Viewport::new(390.0, 844.0));
        assert!(phone.is_touch_primary());

        let json = serde_json::to_string(&Viewport::default()).unwrap();
        assert_eq!(serde_json::from_str::<Viewport>(&json).unwrap(), Viewport::default());
        assert_eq!(serde_json::to_string(&Breakpoint::Md).unwrap(), r#""Md""#);
    }
}
