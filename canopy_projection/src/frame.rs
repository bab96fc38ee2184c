// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Graph-extent normalization into framed space.

use kurbo::{Point, Rect};

/// The normalization from raw graph coordinates into framed space.
///
/// Built from a graph bounding box, a `GraphFrame` maps the box's center to
/// `(0.5, 0.5)` and scales uniformly by the box's longest side, so the graph
/// occupies (a centered slice of) the unit square regardless of its raw
/// units. [`GraphFrame::to_graph`] is the exact inverse of
/// [`GraphFrame::to_framed`].
///
/// Degenerate extents (empty, single point, or non-finite) fall back to a
/// unit ratio so the mapping stays invertible.
///
/// # Example
///
/// ```rust
/// use canopy_projection::GraphFrame;
/// use kurbo::{Point, Rect};
///
/// let frame = GraphFrame::from_extent(Rect::new(0.0, 0.0, 10.0, 4.0));
/// assert_eq!(frame.ratio(), 10.0);
/// assert_eq!(frame.to_framed(Point::new(5.0, 2.0)), Point::new(0.5, 0.5));
/// assert_eq!(frame.to_graph(Point::new(0.5, 0.5)), Point::new(5.0, 2.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GraphFrame {
    ratio: f64,
    center: Point,
}

impl GraphFrame {
    /// The identity normalization: unit ratio centered on `(0.5, 0.5)`,
    /// mapping every point to itself.
    pub const IDENTITY: Self = Self {
        ratio: 1.0,
        center: Point::new(0.5, 0.5),
    };

    /// Builds the normalization for a graph bounding box.
    #[must_use]
    pub fn from_extent(extent: Rect) -> Self {
        let mut ratio = extent.width().max(extent.height());
        if !ratio.is_finite() || ratio <= 0.0 {
            ratio = 1.0;
        }
        let center = extent.center();
        let center = Point::new(
            if center.x.is_finite() { center.x } else { 0.0 },
            if center.y.is_finite() { center.y } else { 0.0 },
        );
        Self { ratio, center }
    }

    /// Maps a raw graph-space point into framed space.
    #[must_use]
    #[inline]
    pub fn to_framed(&self, p: Point) -> Point {
        Point::new(
            0.5 + (p.x - self.center.x) / self.ratio,
            0.5 + (p.y - self.center.y) / self.ratio,
        )
    }

    /// Maps a framed-space point back into raw graph space.
    #[must_use]
    #[inline]
    pub fn to_graph(&self, p: Point) -> Point {
        Point::new(
            self.center.x + self.ratio * (p.x - 0.5),
            self.center.y + self.ratio * (p.y - 0.5),
        )
    }

    /// Returns the normalization ratio: the longest side of the source
    /// extent, or 1 for degenerate extents.
    #[must_use]
    #[inline]
    pub fn ratio(&self) -> f64 {
        self.ratio
    }

    /// Returns the source extent's center in raw graph coordinates.
    #[must_use]
    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }
}

impl Default for GraphFrame {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_maps_points_to_themselves() {
        let p = Point::new(0.25, 0.75);
        assert_eq!(GraphFrame::IDENTITY.to_framed(p), p);
        assert_eq!(GraphFrame::IDENTITY.to_graph(p), p);
    }

    #[test]
    fn extent_center_maps_to_framed_center() {
        let frame = GraphFrame::from_extent(Rect::new(-10.0, 0.0, 30.0, 100.0));
        assert_eq!(frame.to_framed(Point::new(10.0, 50.0)), Point::new(0.5, 0.5));
    }

    #[test]
    fn ratio_is_longest_side() {
        let wide = GraphFrame::from_extent(Rect::new(0.0, 0.0, 10.0, 4.0));
        assert_eq!(wide.ratio(), 10.0);
        let tall = GraphFrame::from_extent(Rect::new(0.0, 0.0, 4.0, 10.0));
        assert_eq!(tall.ratio(), 10.0);
    }

    #[test]
    fn roundtrip_is_exact_for_simple_extents() {
        let frame = GraphFrame::from_extent(Rect::new(0.0, 0.0, 16.0, 8.0));
        for p in [
            Point::new(0.0, 0.0),
            Point::new(16.0, 8.0),
            Point::new(3.0, 5.0),
        ] {
            let back = frame.to_graph(frame.to_framed(p));
            assert!((back.x - p.x).abs() < 1e-12);
            assert!((back.y - p.y).abs() < 1e-12);
        }
    }

    #[test]
    fn single_point_extent_falls_back_to_unit_ratio() {
        let frame = GraphFrame::from_extent(Rect::new(3.0, 4.0, 3.0, 4.0));
        assert_eq!(frame.ratio(), 1.0);
        // The lone point still lands on the framed center.
        assert_eq!(frame.to_framed(Point::new(3.0, 4.0)), Point::new(0.5, 0.5));
    }

    #[test]
    fn non_finite_extent_falls_back_to_identity_shape() {
        let frame = GraphFrame::from_extent(Rect::new(f64::NAN, 0.0, f64::NAN, 1.0));
        assert_eq!(frame.ratio(), 1.0);
        assert!(frame.center().x.is_finite());
        assert!(frame.center().y.is_finite());
    }

    #[test]
    fn zero_height_extent_uses_width() {
        let frame = GraphFrame::from_extent(Rect::new(0.0, 0.0, 10.0, 0.0));
        assert_eq!(frame.ratio(), 10.0);
        assert_eq!(frame.to_framed(Point::new(0.0, 0.0)), Point::new(0.0, 0.5));
        assert_eq!(frame.to_framed(Point::new(10.0, 0.0)), Point::new(1.0, 0.5));
    }
}
