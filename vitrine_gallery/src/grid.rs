// Copyright 2025 the Vitrine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size};
use vitrine_lens::{Breakpoint, Viewport};

/// Spacing of the gallery grid.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridConfig {
    /// Gap between rows and between columns.
    pub gap: f64,
    /// Padding around the whole grid.
    pub padding: f64,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            gap: 24.0,
            padding: 16.0,
        }
    }
}

impl GridConfig {
    /// Set the gap.
    #[must_use]
    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }

    /// Set the padding.
    #[must_use]
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }
}

/// Number of grid columns for a viewport.
pub fn columns_for(viewport: &Viewport) -> usize {
    match viewport.breakpoint() {
        None => 1,
        Some(Breakpoint::Sm) => 2,
        Some(Breakpoint::Md) => 3,
        Some(Breakpoint::Lg) => 4,
    }
}

/// Result of laying out the gallery grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GridLayout {
    /// Number of columns used.
    pub columns: usize,
    /// Cell of each item, in item order.
    pub cells: Vec<Rect>,
    /// Image rectangle of each item, vertically centred in its cell.
    pub items: Vec<Rect>,
    /// Total size including padding.
    pub size: Size,
}

impl GridLayout {
    /// Lay out images with the given intrinsic sizes.
    ///
    /// Every image spans the full column width and keeps its aspect ratio.
    /// Rows are as tall as their tallest image.
    pub fn compute(
        config: &GridConfig,
        viewport: &Viewport,
        container_width: f64,
        images: &[Size],
    ) -> Self {
        let columns = columns_for(viewport);
        let inner = (container_width - 2.0 * config.padding).max(0.0);
        let cols = columns as f64;
        let column_width = ((inner - config.gap * (cols - 1.0)) / cols).max(0.0);

        let heights: Vec<f64> = images
            .iter()
            .map(|s| {
                if s.width > 0.0 {
                    column_width * s.height / s.width
                } else {
                    0.0
                }
            })
            .collect();

        let mut cells = Vec::with_capacity(images.len());
        let mut items = Vec::with_capacity(images.len());
        let mut y = config.padding;
        for (row, row_heights) in heights.chunks(columns).enumerate() {
            if row > 0 {
                y += config.gap;
            }
            let row_height = row_heights.iter().copied().fold(0.0, f64::max);
            for (col, &h) in row_heights.iter().enumerate() {
                let x = config.padding + col as f64 * (column_width + config.gap);
                let cell = Rect::from_origin_size((x, y), (column_width, row_height));
                let top = y + (row_height - h) / 2.0;
                cells.push(cell);
                items.push(Rect::from_origin_size((x, top), (column_width, h)));
            }
            y += row_height;
        }
        let height = if images.is_empty() {
            2.0 * config.padding
        } else {
            y + config.padding
        };

        Self {
            columns,
            cells,
            items,
            size: Size::new(container_width, height),
        }
    }

    /// Index of the item whose image contains `point`.
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        self.items.iter().position(|r| r.contains(point))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn columns_follow_breakpoints() {
        assert_eq!(columns_for(&Viewport::new(375.0, 800.0)), 1);
        assert_eq!(columns_for(&Viewport::new(640.0, 800.0)), 2);
        assert_eq!(columns_for(&Viewport::new(800.0, 800.0)), 3);
        assert_eq!(columns_for(&Viewport::new(1280.0, 800.0)), 4);
    }

    #[test]
    fn four_column_layout() {
        // 1072 - 2 * 16 = 1040 inner; (1040 - 3 * 24) / 4 = 242.
        let images = [
            Size::new(100.0, 100.0),
            Size::new(200.0, 100.0),
            Size::new(100.0, 200.0),
            Size::new(100.0, 100.0),
            Size::new(100.0, 50.0),
        ];
        let layout =
            GridLayout::compute(&GridConfig::default(), &Viewport::default(), 1072.0, &images);
        assert_eq!(layout.columns, 4);
        assert_eq!(layout.items[0], Rect::new(16.0, 137.0, 258.0, 379.0));
        assert_eq!(layout.cells[0], Rect::new(16.0, 16.0, 258.0, 500.0));
        assert_eq!(layout.items[1].x0, 282.0);
        assert_eq!(layout.items[2].height(), 484.0);
        // Second row starts after the tallest image plus a gap.
        assert_eq!(layout.items[4], Rect::new(16.0, 524.0, 258.0, 645.0));
        assert_eq!(layout.size, Size::new(1072.0, 661.0));
    }

    #[test]
    fn single_column_on_phones() {
        let images = [Size::new(3.0, 2.0), Size::new(3.0, 2.0)];
        let layout = GridLayout::compute(
            &GridConfig::default(),
            &Viewport::new(332.0, 700.0),
            332.0,
            &images,
        );
        assert_eq!(layout.columns, 1);
        assert_eq!(layout.items[0], Rect::new(16.0, 16.0, 316.0, 216.0));
        assert_eq!(layout.items[1], Rect::new(16.0, 240.0, 316.0, 440.0));
    }

    #[test]
    fn hit_test_ignores_gaps_and_letterboxing() {
        let images = [Size::new(100.0, 50.0), Size::new(100.0, 100.0)];
        let layout =
            GridLayout::compute(&GridConfig::default(), &Viewport::new(700.0, 700.0), 700.0, &images);
        let second = layout.items[1];
        assert_eq!(layout.hit_test(second.center()), Some(1));
        // Above the shorter first image, inside its cell.
        let cell = layout.cells[0];
        assert_eq!(layout.hit_test(Point::new(cell.center().x, cell.y0 + 1.0)), None);
        // In the gap between columns.
        assert_eq!(layout.hit_test(Point::new(cell.x1 + 12.0, second.center().y)), None);
    }

    #[test]
    fn empty_grid_is_just_padding() {
        let layout =
            GridLayout::compute(&GridConfig::default(), &Viewport::default(), 500.0, &[]);
        assert!(layout.items.is_empty());
        assert_eq!(layout.size.height, 32.0);
    }
}
