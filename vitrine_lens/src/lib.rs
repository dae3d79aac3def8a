// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vitrine Lens: a pointer-tracked circular magnifier.
//!
//! A [`Lens`] wraps one piece of content. While the pointer hovers the
//! container, a magnified duplicate of the content is shown inside a circle
//! centred on the pointer, with a thin ring around it. The area directly under
//! the pointer stays put while everything around it scales.
//!
//! The crate is split the way the lens works:
//!
//! - [`LensConfig`]: zoom factor, lens diameter and ring style.
//! - [`HoverControl`]: who owns the hover flag. [`LocalHover`] keeps it
//!   private; [`HoverGroup`] hands out [`GroupHover`] members of which at most
//!   one is active; [`SharedHover`] is a plain shared flag.
//! - [`lens_geometry`]: a pure function from pointer position and config to
//!   mask circle, zoom transform and ring placement.
//! - [`Viewport`] / [`Breakpoint`]: the overlay is only drawn on viewports at
//!   least [`Breakpoint::Md`] wide.
//! - [`OverlayPresence`]: the short fade/scale animation used when the
//!   overlay is mounted and unmounted.
//!
//! Rendering goes through [`vitrine_imaging::ImagingBackend`]; the lens never
//! touches pixels itself.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Rect, Size};
//! use vitrine_imaging::ContentId;
//! use vitrine_imaging_ref::RefBackend;
//! use vitrine_lens::{Lens, LensConfig, LensFrame};
//!
//! let mut lens = Lens::new(LensConfig::default().with_zoom_factor(2.0));
//! let bounds = Rect::new(40.0, 40.0, 440.0, 340.0);
//!
//! lens.pointer_enter();
//! lens.pointer_move(Point::new(140.0, 90.0), Some(bounds));
//! lens.tick(0.1);
//!
//! let geometry = lens.geometry();
//! assert_eq!(geometry.center, Point::new(100.0, 50.0));
//! assert_eq!(geometry.ring_origin(), Point::new(15.0, -35.0));
//!
//! let mut backend = RefBackend::default();
//! lens.paint(&mut backend, &LensFrame::new(ContentId(1), Size::new(400.0, 300.0)));
//! // Base content plus the magnified duplicate.
//! assert_eq!(backend.content_draws().len(), 2);
//! ```

mod config;
mod geometry;
mod hover;
mod lens;
mod presence;
mod responsive;

pub use config::{LensConfig, RingStyle};
pub use geometry::{LensGeometry, LensLayer, lens_geometry, scale_about};
pub use hover::{GroupHover, HoverControl, HoverGroup, LocalHover, MemberId, SharedHover};
pub use lens::{Lens, LensEvent, LensFrame};
pub use presence::{OverlayPresence, PresencePhase, PresenceStyle};
pub use responsive::{Breakpoint, Viewport};
