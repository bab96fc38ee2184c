// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The render pass and its frame entry points.

use kurbo::Size;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `sqrt`

use canopy_graph::GraphSource;
use canopy_program::{RenderParams, RenderSurface};
use canopy_projection::{matrix_from_camera, matrix_impact};

use crate::engine::Engine;
use crate::error::{EngineError, SurfaceError};
use crate::process::ProcessMode;
use crate::schedule::DirtyLevel;

impl<G: GraphSource> Engine<G> {
    /// Reprocesses from scratch and renders, immediately.
    ///
    /// The next-frame counterpart is
    /// [`schedule_refresh`](Self::schedule_refresh).
    pub fn refresh(
        &mut self,
        graph: &G,
        surface: &mut dyn RenderSurface,
    ) -> Result<(), EngineError<G::NodeKey, G::EdgeKey>> {
        self.reprocess(graph, ProcessMode::Full)?;
        self.planner.clear_dirty();
        self.render(surface)?;
        Ok(())
    }

    /// Services a scheduled frame: reprocesses as much as the dirty level
    /// demands, then renders.
    ///
    /// Hosts call this when the frame requested through their
    /// [`FrameScheduler`](canopy_timing::FrameScheduler) fires. A clean
    /// engine (a camera-move redraw, say) skips reprocessing entirely.
    pub fn frame(
        &mut self,
        graph: &G,
        surface: &mut dyn RenderSurface,
    ) -> Result<(), EngineError<G::NodeKey, G::EdgeKey>> {
        self.planner.take_pending();
        match self.planner.dirty() {
            DirtyLevel::Full => self.reprocess(graph, ProcessMode::Full)?,
            DirtyLevel::Soft => self.reprocess(graph, ProcessMode::Soft)?,
            DirtyLevel::Clean => {}
        }
        self.planner.clear_dirty();
        self.render(surface)?;
        Ok(())
    }

    /// Draws the current caches onto `surface`.
    ///
    /// One pass, in order: before-render hooks; cancel any pending frame
    /// (rendering now supersedes it) and clear dirty flags; poll and apply
    /// surface dimensions; clear the surface; refresh the cached
    /// size-scaling factor; with nothing cached, stop after the
    /// after-render hooks. Otherwise recompute the forward and inverse
    /// matrices and the correction ratio, then drive every edge program
    /// and every node program, each in registration order:
    /// `bind`, `buffer_data`, `render`. Edges draw first so nodes paint
    /// over them. After-render hooks close the pass.
    ///
    /// This does *not* reprocess: stale caches are drawn as they stand.
    /// Use [`refresh`](Self::refresh) or [`frame`](Self::frame) to
    /// reconcile with the graph first.
    pub fn render(&mut self, surface: &mut dyn RenderSurface) -> Result<(), SurfaceError> {
        self.run_before_hooks();
        self.planner.cancel_pending();
        self.planner.clear_dirty();

        self.apply_dimensions(surface.dimensions())?;
        surface.clear();

        let state = self.camera.state();
        self.size_scale = state.ratio.sqrt();

        if self.node_data.is_empty() && self.edge_data.is_empty() {
            self.run_after_hooks();
            return Ok(());
        }

        let graph_dims = self.graph_dimensions();
        let padding = self.settings.stage_padding;
        self.matrix = matrix_from_camera(state, self.viewport, graph_dims, padding, false);
        self.inverse_matrix = matrix_from_camera(state, self.viewport, graph_dims, padding, true);
        self.correction_ratio = matrix_impact(self.matrix, state) / state.ratio;

        let params = RenderParams {
            matrix: self.matrix,
            width: self.viewport.width,
            height: self.viewport.height,
            ratio: state.ratio,
            correction_ratio: self.correction_ratio,
            scaling_ratio: surface.device_pixel_ratio(),
        };
        for program in self.edge_programs.iter_mut() {
            program.bind();
            program.buffer_data();
            program.render(&params);
        }
        for program in self.node_programs.iter_mut() {
            program.bind();
            program.buffer_data();
            program.render(&params);
        }

        self.run_after_hooks();
        Ok(())
    }

    /// Applies polled surface dimensions.
    ///
    /// Unusable dimensions (non-positive or non-finite) fail the pass
    /// unless the settings substitute a 1-unit fallback per axis.
    fn apply_dimensions(&mut self, dimensions: Size) -> Result<(), SurfaceError> {
        let width = dimensions.width;
        let height = dimensions.height;
        if usable_dimension(width) && usable_dimension(height) {
            self.viewport = Size::new(width, height);
            return Ok(());
        }
        if !self.settings.allow_zero_sized_surface {
            return Err(SurfaceError::ZeroSized { width, height });
        }
        self.viewport = Size::new(
            if usable_dimension(width) { width } else { 1.0 },
            if usable_dimension(height) { height } else { 1.0 },
        );
        Ok(())
    }
}

fn usable_dimension(v: f64) -> bool {
    v.is_finite() && v > 0.0
}
