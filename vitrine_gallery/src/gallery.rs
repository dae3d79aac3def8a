// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size};
use vitrine_event_state::press::{PressConfig, PressResult, PressState};
use vitrine_imaging::{Affine, ContentId, DrawOp, ImagingBackend, ImagingBackendExt};
use vitrine_lens::Viewport;

use crate::catalog::Catalog;
use crate::grid::{GridConfig, GridLayout};
use crate::lightbox::{Lightbox, LightboxConfig, LightboxPhase};

/// One image in the gallery.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GalleryItem {
    /// Artwork id.
    pub id: u32,
    /// Content handle the host draws for this item.
    pub content: ContentId,
    /// Intrinsic image size, used for the aspect ratio.
    pub image: Size,
}

impl GalleryItem {
    /// A gallery item.
    pub fn new(id: u32, content: ContentId, image: Size) -> Self {
        Self { id, content, image }
    }
}

/// Something the host should do in response to gallery input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GalleryAction {
    /// The lightbox opened on this artwork.
    Opened(u32),
    /// The lightbox started closing.
    Closed,
    /// The user asked to save this artwork's image.
    Download(u32),
}

/// The gallery page: a responsive grid with a lightbox on desktop and
/// press-and-hold download on phones.
///
/// Pointer positions are in viewport coordinates; the grid is placed at
/// the origin of the bounds last passed to [`Gallery::resize`].
#[derive(Clone, Debug)]
pub struct Gallery {
    items: Vec<GalleryItem>,
    grid: GridConfig,
    viewport: Viewport,
    bounds: Rect,
    layout: GridLayout,
    press: PressState<usize>,
    lightbox: Lightbox<u32>,
}

impl Gallery {
    /// A gallery showing `items` in order.
    pub fn new(items: Vec<GalleryItem>) -> Self {
        let viewport = Viewport::default();
        let mut gallery = Self {
            items,
            grid: GridConfig::default(),
            viewport,
            bounds: Rect::from_origin_size(Point::ORIGIN, (viewport.width(), 0.0)),
            layout: GridLayout::default(),
            press: PressState::default(),
            lightbox: Lightbox::default(),
        };
        gallery.relayout();
        gallery
    }

    /// A gallery for every artwork in `catalog`.
    ///
    /// `content` maps each artwork to its content handle and intrinsic size.
    pub fn from_catalog(
        catalog: &Catalog,
        mut content: impl FnMut(&crate::Artwork) -> (ContentId, Size),
    ) -> Self {
        let items = catalog
            .iter()
            .map(|art| {
                let (handle, size) = content(art);
                GalleryItem::new(art.id, handle, size)
            })
            .collect();
        Self::new(items)
    }

    /// Set the grid spacing.
    #[must_use]
    pub fn with_grid(mut self, grid: GridConfig) -> Self {
        self.grid = grid;
        self.relayout();
        self
    }

    /// Set the lightbox parameters.
    #[must_use]
    pub fn with_lightbox(mut self, config: LightboxConfig) -> Self {
        self.lightbox = Lightbox::new(config);
        self
    }

    /// Set the press recognition parameters.
    #[must_use]
    pub fn with_press(mut self, config: PressConfig) -> Self {
        self.press = PressState::new(config);
        self
    }

    /// The items, in display order.
    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    /// Current grid layout, in grid-local coordinates.
    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// The lightbox.
    pub fn lightbox(&self) -> &Lightbox<u32> {
        &self.lightbox
    }

    /// The viewport the gallery was last laid out for.
    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// Lay the grid out for `viewport`, placing it at `bounds` (viewport
    /// coordinates). Only the width of `bounds` constrains the grid.
    pub fn resize(&mut self, viewport: Viewport, bounds: Rect) {
        self.viewport = viewport;
        self.bounds = bounds;
        self.layout = GridLayout::compute(
            &self.grid,
            &viewport,
            bounds.width(),
            &self.image_sizes(),
        );
    }

    fn relayout(&mut self) {
        self.resize(self.viewport, self.bounds);
    }

    fn origin(&self) -> Point {
        self.bounds.origin()
    }

    fn image_sizes(&self) -> Vec<Size> {
        self.items.iter().map(|i| i.image).collect()
    }

    /// Viewport rectangle of item `index`.
    pub fn item_rect(&self, index: usize) -> Option<Rect> {
        self.layout
            .items
            .get(index)
            .map(|r| *r + self.origin().to_vec2())
    }

    fn item_at(&self, point: Point) -> Option<usize> {
        self.layout.hit_test(point - self.origin().to_vec2())
    }

    /// A pointer or touch went down.
    pub fn pointer_down(&mut self, point: Point, now_ms: u64) {
        if self.lightbox.is_visible() {
            return;
        }
        if let Some(index) = self.item_at(point) {
            self.press.on_down(index, point, now_ms);
        }
    }

    /// A pointer or touch moved while down.
    pub fn pointer_move(&mut self, point: Point) {
        self.press.on_move(point);
    }

    /// Check for a completed hold; call from the host's timer or frame loop.
    ///
    /// On touch-primary viewports a hold requests a download.
    pub fn poll(&mut self, now_ms: u64) -> Option<GalleryAction> {
        let index = self.press.poll(now_ms)?;
        self.download(index)
    }

    /// A pointer or touch went up.
    ///
    /// A tap on an item opens the lightbox on desktop and does nothing on
    /// phones. While the lightbox is open, a tap on the backdrop closes it.
    pub fn pointer_up(&mut self, point: Point, now_ms: u64) -> Option<GalleryAction> {
        if self.lightbox.is_visible() {
            let target = self.lightbox.target_at(point, &self.viewport);
            return self.lightbox.click(target).then_some(GalleryAction::Closed);
        }
        match self.press.on_up(point, now_ms) {
            PressResult::Tap(index) => self.open(index),
            // A hold that ended before the host polled.
            PressResult::Hold(index) => self.download(index),
            _ => None,
        }
    }

    fn download(&self, index: usize) -> Option<GalleryAction> {
        if !self.viewport.is_touch_primary() {
            return None;
        }
        let id = self.items.get(index)?.id;
        log::debug!("hold on artwork {id}, requesting download");
        Some(GalleryAction::Download(id))
    }

    /// Close the lightbox, if open.
    pub fn close(&mut self) -> Option<GalleryAction> {
        let was_open = self.lightbox.phase() == LightboxPhase::Open;
        self.lightbox.close();
        was_open.then_some(GalleryAction::Closed)
    }

    fn open(&mut self, index: usize) -> Option<GalleryAction> {
        let id = self.items.get(index)?.id;
        let origin = self.item_rect(index);
        self.lightbox
            .open(id, origin, &self.viewport)
            .then_some(GalleryAction::Opened(id))
    }

    /// Advance animations. Returns `true` while animating.
    pub fn tick(&mut self, dt: f64) -> bool {
        self.lightbox.tick(dt)
    }

    /// Paint the grid and, if open, the lightbox.
    pub fn paint<B: ImagingBackend + ?Sized>(&self, backend: &mut B) {
        let base = Affine::translate(self.origin().to_vec2());
        for (item, dst) in self.items.iter().zip(&self.layout.items) {
            let draw = DrawOp::Content {
                content: item.content,
                dst: *dst,
            };
            backend.set_transform(base);
            if self.lightbox.item_opacity(item.id) < 1.0 {
                backend.with_opacity_layer(0.0, |b| b.draw(draw));
            } else {
                backend.draw(draw);
            }
        }
        if let Some(item) = self
            .lightbox
            .selected()
            .and_then(|id| self.items.iter().find(|i| i.id == id))
        {
            self.lightbox
                .paint(backend, &self.viewport, item.content, item.image);
        }
    }
}
