// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Vitrine Gallery: headless controllers for an artist's portfolio site.
//!
//! Each piece owns its state and animation and paints through
//! [`vitrine_imaging::ImagingBackend`]:
//!
//! - [`Catalog`]: artworks discovered from image file names of the form
//!   `<id>_<name>_<medium>_<w>, <h>, <d>.<ext>`.
//! - [`Gallery`]: a responsive grid ([`GridLayout`]) whose items open a
//!   [`Lightbox`] on desktop, and request a download on a long press on
//!   phones.
//! - [`Carousel`]: a looping coverflow slider with a [`vitrine_lens::Lens`]
//!   on every slide; the slides share a hover group, so at most one lens is
//!   active.
//! - [`Site`]: route bookkeeping and directional [`PageTransition`]s.
//!
//! Hosts feed pointer input and frame times in and draw the recorded
//! operations with whatever renderer they use.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use vitrine_gallery::{Catalog, Gallery, GalleryAction};
//! use vitrine_imaging::ContentId;
//! use vitrine_lens::Viewport;
//!
//! let catalog = Catalog::from_file_names([
//!     "2_Harbour_Oil on Canvas_24, 18, 1.5.jpg",
//!     "1_Dunes_Acrylic_30, 40, 2.png",
//!     "notes.txt",
//! ]);
//! assert_eq!(catalog.len(), 2);
//! assert_eq!(catalog.artworks()[0].name, "Dunes");
//!
//! let mut gallery = Gallery::from_catalog(&catalog, |art| {
//!     (ContentId(art.id), Size::new(400.0, 300.0))
//! });
//! let viewport = Viewport::new(1280.0, 800.0);
//! gallery.resize(viewport, Rect::new(0.0, 80.0, 1280.0, 800.0));
//!
//! let target = gallery.item_rect(1).unwrap().center();
//! gallery.pointer_down(target, 0);
//! assert_eq!(gallery.pointer_up(target, 120), Some(GalleryAction::Opened(2)));
//! ```

mod carousel;
mod catalog;
mod gallery;
mod grid;
mod lightbox;
mod site;

pub use carousel::{Carousel, CarouselBreakpoint, CarouselConfig, CoverflowConfig, SlideFrame};
pub use catalog::{
    Artwork, Catalog, CatalogError, Dimensions, IMAGE_EXTENSIONS, Result, is_image_file,
    parse_file_name,
};
pub use gallery::{Gallery, GalleryAction, GalleryItem};
pub use grid::{GridConfig, GridLayout, columns_for};
pub use lightbox::{ClickTarget, Lightbox, LightboxConfig, LightboxPhase, contain};
pub use site::{
    NavItem, PagePhase, PageStyle, PageTransition, PageVariants, Route, Site, TransitionDirection,
    TransitionTracker, nav_items,
};
