// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Timing function mapping linear progress to eased progress.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    /// Identity mapping.
    #[default]
    Linear,
    /// CSS `cubic-bezier(x1, y1, x2, y2)`; the curve runs from `(0, 0)` to `(1, 1)`.
    CubicBezier(f64, f64, f64, f64),
}

impl Easing {
    /// CSS `ease`, the browser default for transitions.
    pub const EASE: Self = Self::CubicBezier(0.25, 0.1, 0.25, 1.0);
    /// CSS `ease-in-out`.
    pub const EASE_IN_OUT: Self = Self::CubicBezier(0.42, 0.0, 0.58, 1.0);
    /// CSS `ease-out`.
    pub const EASE_OUT: Self = Self::CubicBezier(0.0, 0.0, 0.58, 1.0);
    /// Soft deceleration used for page transitions.
    pub const EASE_OUT_SOFT: Self = Self::CubicBezier(0.25, 0.46, 0.45, 0.94);

    /// Apply the easing to `t`, clamped to `[0, 1]`.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::CubicBezier(x1, y1, x2, y2) => {
                if t <= 0.0 || t >= 1.0 {
                    return t;
                }
                let curve = Bezier::new(x1, y1, x2, y2);
                curve.sample_y(curve.solve_x(t))
            }
        }
    }
}

/// Polynomial coefficients of a unit cubic Bézier, one axis each.
struct Bezier {
    ax: f64,
    bx: f64,
    cx: f64,
    ay: f64,
    by: f64,
    cy: f64,
}

impl Bezier {
    const EPSILON: f64 = 1e-7;

    fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        let cx = 3.0 * x1;
        let bx = 3.0 * (x2 - x1) - cx;
        let ax = 1.0 - cx - bx;
        let cy = 3.0 * y1;
        let by = 3.0 * (y2 - y1) - cy;
        let ay = 1.0 - cy - by;
        Self {
            ax,
            bx,
            cx,
            ay,
            by,
            cy,
        }
    }

    fn sample_x(&self, t: f64) -> f64 {
        ((self.ax * t + self.bx) * t + self.cx) * t
    }

    fn sample_y(&self, t: f64) -> f64 {
        ((self.ay * t + self.by) * t + self.cy) * t
    }

    fn sample_dx(&self, t: f64) -> f64 {
        (3.0 * self.ax * t + 2.0 * self.bx) * t + self.cx
    }

    /// Find the curve parameter whose x coordinate is `x`.
    fn solve_x(&self, x: f64) -> f64 {
        // Newton's method converges quickly for well-behaved curves.
        let mut t = x;
        for _ in 0..8 {
            let err = self.sample_x(t) - x;
            if err.abs() < Self::EPSILON {
                return t;
            }
            let d = self.sample_dx(t);
            if d.abs() < 1e-6 {
                break;
            }
            t -= err / d;
        }

        // Fall back to bisection; x(t) is monotonic for x1, x2 in [0, 1].
        let (mut lo, mut hi) = (0.0, 1.0);
        t = x;
        while lo < hi {
            let sample = self.sample_x(t);
            if (sample - x).abs() < Self::EPSILON {
                return t;
            }
            if x > sample {
                lo = t;
            } else {
                hi = t;
            }
            let next = (lo + hi) * 0.5;
            if (next - t).abs() < Self::EPSILON {
                return next;
            }
            t = next;
        }
        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn endpoints_are_fixed() {
        for easing in [
            Easing::Linear,
            Easing::EASE_IN_OUT,
            Easing::EASE_OUT,
            Easing::EASE_OUT_SOFT,
        ] {
            assert_eq!(easing.apply(0.0), 0.0, "{easing:?} at 0");
            assert_eq!(easing.apply(1.0), 1.0, "{easing:?} at 1");
        }
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Easing::Linear.apply(-3.0), 0.0);
        assert_eq!(Easing::EASE_IN_OUT.apply(7.0), 1.0);
    }

    #[test]
    fn ease_in_out_is_symmetric() {
        let e = Easing::EASE_IN_OUT;
        assert!(close(e.apply(0.5), 0.5), "midpoint was {}", e.apply(0.5));
        for t in [0.1, 0.2, 0.3, 0.4] {
            assert!(close(e.apply(t) + e.apply(1.0 - t), 1.0), "asymmetric at {t}");
        }
        // Slow start.
        assert!(e.apply(0.1) < 0.1);
    }

    #[test]
    fn cubic_bezier_linear_control_points_is_identity() {
        let e = Easing::CubicBezier(1.0 / 3.0, 1.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0);
        for t in [0.1, 0.25, 0.5, 0.75, 0.9] {
            assert!(close(e.apply(t), t), "at {t}: {}", e.apply(t));
        }
    }

    #[test]
    fn soft_ease_out_front_loads_progress() {
        let e = Easing::EASE_OUT_SOFT;
        assert!(e.apply(0.5) > 0.5);
        let mut last = 0.0;
        for i in 1..=20 {
            let v = e.apply(f64::from(i) / 20.0);
            assert!(v >= last, "not monotonic at step {i}");
            last = v;
        }
    }
}
