// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vitrine Motion: host-agnostic animation primitives.
//!
//! Presentation controllers in Vitrine never own a clock. The host calls
//! `update(dt)` with elapsed seconds from whatever frame callback it has,
//! and reads back plain `f64` values to feed into transforms and opacities.
//!
//! - [`Easing`]: CSS-style timing functions (`linear`, `cubic-bezier(...)`).
//! - [`Tween`]: a duration-based transition from one value to another.
//! - [`Spring`]: a damped spring, for motions that should settle naturally.
//!
//! ```rust
//! use vitrine_motion::{Easing, Tween};
//!
//! let mut opacity = Tween::new(0.0, Easing::EASE_IN_OUT).with_duration(0.1);
//! opacity.set_target(1.0);
//! opacity.update(0.05);
//! assert!(opacity.value() > 0.0 && opacity.value() < 1.0);
//! opacity.update(0.05);
//! assert_eq!(opacity.value(), 1.0);
//! assert!(opacity.is_complete());
//! ```

mod easing;
mod spring;
mod tween;

pub use easing::Easing;
pub use spring::{Spring, SpringConfig};
pub use tween::Tween;
