// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Projection matrices between framed space and viewport pixels.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `sin_cos`
use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::state::CameraState;

/// Builds the affine transform from framed space to viewport pixels for a
/// camera state, or its exact inverse.
///
/// The forward matrix composes, applied to a point in this order:
///
/// 1. translation by `-(state.x, state.y)`, putting the camera target at
///    the origin;
/// 2. rotation by `-state.angle`;
/// 3. uniform scale by `1 / state.ratio` (the zoom);
/// 4. the uniform scale fitting the graph's framed proportions into the
///    viewport minus `padding` pixels on every side (never an anisotropic
///    stretch);
/// 5. translation to the viewport center.
///
/// `graph_dims` is the graph bounding box size in raw graph units; only its
/// proportions matter here, since positions reaching this matrix are already
/// normalized into framed space. Degenerate inputs (zero-sized viewport or
/// graph, padding swallowing the whole viewport) degrade to a unit fit scale
/// instead of producing a non-invertible matrix.
///
/// With `inverse = true` the returned matrix is the algebraic inverse of the
/// forward composition (via [`Affine::inverse`]), so viewport-to-framed
/// conversions can never drift from their forward counterpart.
#[must_use]
pub fn matrix_from_camera(
    state: CameraState,
    viewport: Size,
    graph_dims: Size,
    padding: f64,
    inverse: bool,
) -> Affine {
    let fit = fit_scale(viewport, graph_dims, padding);
    let forward = Affine::translate(Vec2::new(viewport.width / 2.0, viewport.height / 2.0))
        * Affine::scale(fit / state.ratio)
        * Affine::rotate(-state.angle)
        * Affine::translate(Vec2::new(-state.x, -state.y));
    if inverse { forward.inverse() } else { forward }
}

/// Returns the uniform scale a projection matrix applies beyond the
/// camera's own zoom.
///
/// Sizes (node radii, edge thicknesses) are not run through the projection
/// matrix, so anything the matrix scales positions by beyond `1 / ratio`
/// must be applied to them separately or they drift visually as the
/// viewport aspect changes. This measures that factor from the matrix
/// itself, by taking the length of the matrix's linear action on the unit
/// vector at the camera angle and multiplying the camera ratio back in.
/// Measuring rather than recomputing the fit keeps the value correct when a
/// caller supplies an overridden matrix.
///
/// For the matrices built by [`matrix_from_camera`] the result is the fit
/// scale of step 4, independent of the camera angle.
#[must_use]
pub fn matrix_impact(matrix: Affine, state: CameraState) -> f64 {
    let [a, b, c, d, _, _] = matrix.as_coeffs();
    let (sin, cos) = state.angle.sin_cos();
    Vec2::new(a * cos + c * sin, b * cos + d * sin).hypot() * state.ratio
}

/// Applies a projection matrix to a point, coercing non-finite results to 0.
///
/// Degenerate matrices (for example the inverse of a singular transform)
/// produce NaN or infinite coordinates; callers converting pointer
/// positions expect a usable point back, so those collapse to the origin.
#[must_use]
pub fn project_point(matrix: Affine, p: Point) -> Point {
    let q = matrix * p;
    Point::new(finite_or_zero(q.x), finite_or_zero(q.y))
}

/// Applies a projection matrix to a rectangle.
///
/// Transforms the four corners and takes their bounding box, so the result
/// is the tightest axis-aligned rectangle covering the transformed rect
/// under rotation.
#[must_use]
pub fn project_rect(matrix: Affine, rect: Rect) -> Rect {
    let corners = [
        rect.origin(),
        Point::new(rect.max_x(), rect.y0),
        Point::new(rect.x0, rect.max_y()),
        Point::new(rect.max_x(), rect.max_y()),
    ];
    let mut min_x = f64::INFINITY;
    let mut min_y = f64::INFINITY;
    let mut max_x = f64::NEG_INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for corner in corners {
        let q = project_point(matrix, corner);
        min_x = min_x.min(q.x);
        min_y = min_y.min(q.y);
        max_x = max_x.max(q.x);
        max_y = max_y.max(q.y);
    }
    Rect::new(min_x, min_y, max_x, max_y)
}

/// The uniform scale fitting the graph's framed proportions into the padded
/// viewport.
fn fit_scale(viewport: Size, graph_dims: Size, padding: f64) -> f64 {
    let longest = graph_dims.width.max(graph_dims.height);
    let (framed_w, framed_h) = if longest.is_finite() && longest > 0.0 {
        (graph_dims.width / longest, graph_dims.height / longest)
    } else {
        (1.0, 1.0)
    };
    let fit = ((viewport.width - 2.0 * padding) / framed_w)
        .min((viewport.height - 2.0 * padding) / framed_h);
    if fit.is_finite() && fit > 0.0 { fit } else { 1.0 }
}

#[inline]
fn finite_or_zero(v: f64) -> f64 {
    if v.is_finite() { v } else { 0.0 }
}
