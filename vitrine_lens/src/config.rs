// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::Color;

/// Appearance of the circular border drawn around the lens.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RingStyle {
    /// Stroke width in pixels.
    pub width: f64,
    /// Stroke color as straight-alpha RGBA8.
    pub rgba: [u8; 4],
    /// Whether to draw a soft drop shadow under the ring.
    pub shadow: bool,
}

impl RingStyle {
    /// Stroke color.
    pub fn color(&self) -> Color {
        let [r, g, b, a] = self.rgba;
        Color::from_rgba8(r, g, b, a)
    }
}

impl Default for RingStyle {
    fn default() -> Self {
        Self {
            width: 2.0,
            rgba: [0xff, 0xff, 0xff, 0x6b],
            shadow: true,
        }
    }
}

/// Lens configuration, fixed for the lifetime of a [`Lens`](crate::Lens).
///
/// Values are not validated: a zoom factor of at most `1.0` or a
/// non-positive diameter produce a visually wrong overlay, never an error.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LensConfig {
    /// Magnification applied to the duplicated content.
    pub zoom_factor: f64,
    /// Diameter of the circular viewport in pixels.
    pub lens_diameter: f64,
    /// Border ring appearance.
    pub ring: RingStyle,
}

impl LensConfig {
    /// Default magnification.
    pub const DEFAULT_ZOOM_FACTOR: f64 = 1.5;
    /// Default lens diameter in pixels.
    pub const DEFAULT_LENS_DIAMETER: f64 = 170.0;

    /// Set the magnification.
    #[must_use]
    pub fn with_zoom_factor(mut self, zoom_factor: f64) -> Self {
        self.zoom_factor = zoom_factor;
        self
    }

    /// Set the lens diameter.
    #[must_use]
    pub fn with_lens_diameter(mut self, lens_diameter: f64) -> Self {
        self.lens_diameter = lens_diameter;
        self
    }

    /// Set the ring appearance.
    #[must_use]
    pub fn with_ring(mut self, ring: RingStyle) -> Self {
        self.ring = ring;
        self
    }

    /// Radius of the lens circle.
    pub fn radius(&self) -> f64 {
        self.lens_diameter / 2.0
    }
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            zoom_factor: Self::DEFAULT_ZOOM_FACTOR,
            lens_diameter: Self::DEFAULT_LENS_DIAMETER,
            ring: RingStyle::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = LensConfig::default();
        assert_eq!(config.zoom_factor, 1.5);
        assert_eq!(config.lens_diameter, 170.0);
        assert_eq!(config.radius(), 85.0);
        assert_eq!(config.ring.width, 2.0);
    }

    #[test]
    fn builder_overrides() {
        let config = LensConfig::default()
            .with_zoom_factor(2.0)
            .with_lens_diameter(100.0);
        assert_eq!(config.zoom_factor, 2.0);
        assert_eq!(config.radius(), 50.0);
    }

    #[test]
    fn ring_color_is_translucent_white() {
        let color = RingStyle::default().color();
        assert_eq!(color, Color::from_rgba8(255, 255, 255, 0x6b));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_config_fills_defaults() {
        let config: LensConfig = serde_json::from_str(r#"{ "zoom_factor": 3.0 }"#).unwrap();
        assert_eq!(config.zoom_factor, 3.0);
        assert_eq!(config.lens_diameter, 170.0);
    }
}
