// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Coordinate conversions between graph, framed, and viewport space.

use kurbo::{Affine, Point, Rect, Size};

use canopy_graph::GraphSource;
use canopy_projection::{CameraState, matrix_from_camera, project_point, project_rect};

use crate::engine::Engine;

/// Optional substitutions for the engine state a coordinate conversion
/// reads.
///
/// Every field left `None` falls back to the engine's current value, so
/// `&ViewOverrides::default()` converts against the live view. A host
/// predicting where a node will land after an animation passes the target
/// [`CameraState`]; one replaying a recorded frame passes its matrix.
///
/// A supplied `matrix` is used verbatim and preempts the other fields.
/// Callers converting *from* viewport space must therefore supply the
/// inverse matrix themselves.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewOverrides {
    /// Camera state to derive the conversion matrix from.
    pub camera_state: Option<CameraState>,
    /// Viewport dimensions in surface units.
    pub viewport: Option<Size>,
    /// Dimensions of the extent the graph is fitted into.
    pub graph_dims: Option<Size>,
    /// Stage padding in surface units.
    pub padding: Option<f64>,
    /// Complete conversion matrix, bypassing derivation entirely.
    pub matrix: Option<Affine>,
}

impl<G: GraphSource> Engine<G> {
    fn conversion_matrix(&self, overrides: &ViewOverrides, inverse: bool) -> Affine {
        if let Some(matrix) = overrides.matrix {
            return matrix;
        }
        matrix_from_camera(
            overrides.camera_state.unwrap_or_else(|| self.camera.state()),
            overrides.viewport.unwrap_or(self.viewport),
            overrides.graph_dims.unwrap_or_else(|| self.graph_dimensions()),
            overrides.padding.unwrap_or(self.settings.stage_padding),
            inverse,
        )
    }

    /// Converts a framed-space point to viewport coordinates.
    #[must_use]
    pub fn framed_to_viewport(&self, p: Point, overrides: &ViewOverrides) -> Point {
        project_point(self.conversion_matrix(overrides, false), p)
    }

    /// Converts a viewport point to framed-space coordinates.
    #[must_use]
    pub fn viewport_to_framed(&self, p: Point, overrides: &ViewOverrides) -> Point {
        project_point(self.conversion_matrix(overrides, true), p)
    }

    /// Converts a raw graph-space point to viewport coordinates.
    ///
    /// Composes the engine's current [`GraphFrame`] normalization with
    /// [`framed_to_viewport`](Self::framed_to_viewport). The frame is not
    /// overridable: it belongs to the processed graph, not to the view.
    ///
    /// [`GraphFrame`]: canopy_projection::GraphFrame
    #[must_use]
    pub fn graph_to_viewport(&self, p: Point, overrides: &ViewOverrides) -> Point {
        self.framed_to_viewport(self.graph_frame.to_framed(p), overrides)
    }

    /// Converts a viewport point back to raw graph-space coordinates.
    #[must_use]
    pub fn viewport_to_graph(&self, p: Point, overrides: &ViewOverrides) -> Point {
        self.graph_frame
            .to_graph(self.viewport_to_framed(p, overrides))
    }

    /// The raw graph-space rectangle currently visible in the viewport.
    ///
    /// Under a camera rotation this is the axis-aligned bounding box of
    /// the (rotated) visible region, so it over-covers rather than clips.
    #[must_use]
    pub fn visible_graph_rect(&self) -> Rect {
        let viewport = Rect::from_origin_size(Point::ZERO, self.viewport);
        let matrix = self.conversion_matrix(&ViewOverrides::default(), true);
        let framed = project_rect(matrix, viewport);
        let min = self.graph_frame.to_graph(Point::new(framed.x0, framed.y0));
        let max = self.graph_frame.to_graph(Point::new(framed.x1, framed.y1));
        Rect::new(min.x, min.y, max.x, max.y)
    }
}
