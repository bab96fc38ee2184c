// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The draw-program capability traits.

use kurbo::Affine;

use canopy_display::{EdgeDisplayData, NodeDisplayData};

/// Per-frame parameters handed to every draw program's render call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderParams {
    /// Projection from framed space to viewport pixels.
    pub matrix: Affine,
    /// Viewport width in pixels.
    pub width: f64,
    /// Viewport height in pixels.
    pub height: f64,
    /// Camera zoom ratio.
    pub ratio: f64,
    /// The matrix's scale beyond the camera zoom, divided by the camera
    /// ratio. Programs multiply framed-space lengths by this to keep sizes
    /// visually stable under aspect-ratio fitting.
    pub correction_ratio: f64,
    /// Device pixel ratio of the target surface.
    pub scaling_ratio: f64,
}

/// A batch drawing capability for one node kind.
///
/// One program instance handles every node whose resolved kind tag it was
/// registered under. The engine drives it with a strict per-frame
/// discipline:
///
/// 1. [`allocate`](Self::allocate) with the batch size — skipped during a
///    soft reprocess, where existing buffers are reused;
/// 2. [`process`](Self::process) once per node, with contiguous indices
///    from 0 in draw order;
/// 3. at render time, [`bind`](Self::bind), then
///    [`buffer_data`](Self::buffer_data), then [`render`](Self::render).
///
/// Programs own whatever buffers back the batch; the engine only ever
/// lends them read-only display data.
pub trait NodeProgram {
    /// Prepares storage for a batch of `capacity` nodes.
    fn allocate(&mut self, capacity: usize);

    /// Feeds one node's display data into slot `index` of the batch.
    ///
    /// `hidden` is the resolved visibility: hidden entities keep their slot
    /// (indices stay contiguous) but should produce no visible output.
    fn process(&mut self, data: &NodeDisplayData, hidden: bool, index: usize);

    /// Binds the program's drawing resources.
    fn bind(&mut self);

    /// Uploads the processed batch to the drawing backend.
    fn buffer_data(&mut self);

    /// Draws the whole batch.
    fn render(&mut self, params: &RenderParams);
}

/// A batch drawing capability for one edge kind.
///
/// Same discipline as [`NodeProgram`]; `process` additionally receives the
/// resolved display data of the edge's endpoints, and `hidden` already
/// folds in the endpoints' visibility (an edge with a hidden endpoint is
/// hidden).
pub trait EdgeProgram {
    /// Prepares storage for a batch of `capacity` edges.
    fn allocate(&mut self, capacity: usize);

    /// Feeds one edge and its endpoints into slot `index` of the batch.
    fn process(
        &mut self,
        data: &EdgeDisplayData,
        source: &NodeDisplayData,
        target: &NodeDisplayData,
        hidden: bool,
        index: usize,
    );

    /// Binds the program's drawing resources.
    fn bind(&mut self);

    /// Uploads the processed batch to the drawing backend.
    fn buffer_data(&mut self);

    /// Draws the whole batch.
    fn render(&mut self, params: &RenderParams);
}
