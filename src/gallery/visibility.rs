// SPDX-License-Identifier: MPL-2.0
//! Viewport-intersection loading for grid thumbnails.
//!
//! Thumbnails are not requested on mount. Each grid cell is observed, and a
//! cell is reported once its bounds enter the visible viewport grown by a
//! margin on every side. Reports are edge-triggered: a cell that stays inside
//! is not reported again until it has left and re-entered.

use super::thresholds::ViewportMargin;
use iced::{Point, Rectangle, Size};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy)]
struct Target {
    bounds: Rectangle,
    inside: bool,
}

/// Tracks which grid cells are near the viewport.
#[derive(Debug, Clone)]
pub struct ViewportObserver {
    margin: ViewportMargin,
    targets: BTreeMap<usize, Target>,
    connected: bool,
}

impl ViewportObserver {
    #[must_use]
    pub fn new(margin: ViewportMargin) -> Self {
        Self {
            margin,
            targets: BTreeMap::new(),
            connected: true,
        }
    }

    /// Starts (or keeps) watching cell `index` at `bounds`.
    ///
    /// Re-observing an index only moves its bounds. Ignored once
    /// disconnected.
    pub fn observe(&mut self, index: usize, bounds: Rectangle) {
        if !self.connected {
            return;
        }
        self.targets
            .entry(index)
            .and_modify(|target| target.bounds = bounds)
            .or_insert(Target {
                bounds,
                inside: false,
            });
    }

    /// Stops watching cell `index`.
    pub fn unobserve(&mut self, index: usize) {
        self.targets.remove(&index);
    }

    #[must_use]
    pub fn is_observing(&self, index: usize) -> bool {
        self.targets.contains_key(&index)
    }

    #[must_use]
    pub fn observed(&self) -> usize {
        self.targets.len()
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Re-evaluates every observed cell against `viewport`.
    ///
    /// Returns the indices, in ascending order, that moved from outside to
    /// inside the margin-expanded viewport.
    pub fn update(&mut self, viewport: Rectangle) -> Vec<usize> {
        if !self.connected {
            return Vec::new();
        }
        let area = expand(viewport, self.margin.value());

        self.targets
            .iter_mut()
            .filter_map(|(&index, target)| {
                let inside = intersects(target.bounds, area);
                let entered = inside && !target.inside;
                target.inside = inside;
                entered.then_some(index)
            })
            .collect()
    }

    /// Forgets every target and ignores all further calls.
    pub fn disconnect(&mut self) {
        self.targets.clear();
        self.connected = false;
    }
}

impl Default for ViewportObserver {
    fn default() -> Self {
        Self::new(ViewportMargin::default())
    }
}

fn expand(rect: Rectangle, margin: f32) -> Rectangle {
    Rectangle::new(
        Point::new(rect.x - margin, rect.y - margin),
        Size::new(rect.width + 2.0 * margin, rect.height + 2.0 * margin),
    )
}

fn intersects(a: Rectangle, b: Rectangle) -> bool {
    a.x < b.x + b.width && b.x < a.x + a.width && a.y < b.y + b.height && b.y < a.y + a.height
}

// =============================================================================
// GridLayout
// =============================================================================

/// Square-cell grid geometry, in content coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    pub columns: u16,
    pub cell_size: f32,
    pub spacing: f32,
}

impl GridLayout {
    /// Fits `columns` square cells into `width`.
    #[must_use]
    pub fn fit(width: f32, columns: u16, spacing: f32) -> Self {
        let columns = columns.max(1);
        let gaps = spacing * f32::from(columns - 1);
        Self {
            columns,
            cell_size: ((width - gaps) / f32::from(columns)).max(0.0),
            spacing,
        }
    }

    /// Bounds of the cell at `index`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn bounds(&self, index: usize) -> Rectangle {
        let columns = usize::from(self.columns.max(1));
        let stride = self.cell_size + self.spacing;
        let column = (index % columns) as f32;
        let row = (index / columns) as f32;
        Rectangle::new(
            Point::new(column * stride, row * stride),
            Size::new(self.cell_size, self.cell_size),
        )
    }

    /// Total height taken by `len` cells.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn content_height(&self, len: usize) -> f32 {
        let columns = usize::from(self.columns.max(1));
        let rows = len.div_ceil(columns) as f32;
        if rows == 0.0 {
            0.0
        } else {
            rows * self.cell_size + (rows - 1.0) * self.spacing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport(y: f32) -> Rectangle {
        Rectangle::new(Point::new(0.0, y), Size::new(300.0, 400.0))
    }

    fn column_of_cells(observer: &mut ViewportObserver, count: usize) {
        let layout = GridLayout {
            columns: 1,
            cell_size: 100.0,
            spacing: 0.0,
        };
        for index in 0..count {
            observer.observe(index, layout.bounds(index));
        }
    }

    #[test]
    fn margin_extends_the_visible_area() {
        let mut observer = ViewportObserver::new(ViewportMargin::new(200.0));
        column_of_cells(&mut observer, 10);

        // Visible 0..400, loading band 0..600 → cells 0..=5.
        assert_eq!(observer.update(viewport(0.0)), vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn cells_are_reported_only_when_entering() {
        let mut observer = ViewportObserver::new(ViewportMargin::new(0.0));
        column_of_cells(&mut observer, 10);

        assert_eq!(observer.update(viewport(0.0)), vec![0, 1, 2, 3]);
        assert_eq!(observer.update(viewport(100.0)), vec![4]);
        // Scroll far away and back: cell 0 re-enters.
        assert_eq!(observer.update(viewport(600.0)), vec![6, 7, 8, 9]);
        assert_eq!(observer.update(viewport(0.0)), vec![0, 1, 2, 3]);
    }

    #[test]
    fn unobserved_cells_are_never_reported() {
        let mut observer = ViewportObserver::new(ViewportMargin::new(0.0));
        column_of_cells(&mut observer, 3);
        observer.unobserve(1);

        assert_eq!(observer.update(viewport(0.0)), vec![0, 2]);
        assert!(!observer.is_observing(1));
    }

    #[test]
    fn disconnect_stops_everything() {
        let mut observer = ViewportObserver::default();
        column_of_cells(&mut observer, 3);
        observer.disconnect();
        observer.observe(0, viewport(0.0));

        assert_eq!(observer.observed(), 0);
        assert!(observer.update(viewport(0.0)).is_empty());
        assert!(!observer.is_connected());
    }

    #[test]
    fn grid_layout_places_cells_row_major() {
        let layout = GridLayout::fit(320.0, 3, 10.0);
        assert_eq!(layout.cell_size, 100.0);

        let fourth = layout.bounds(4);
        assert_eq!(fourth.x, 110.0);
        assert_eq!(fourth.y, 110.0);
        assert_eq!(layout.content_height(7), 320.0);
        assert_eq!(layout.content_height(0), 0.0);
    }
}
