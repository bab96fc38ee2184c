// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Incremental reconciliation with the host's graph store.

use kurbo::Rect;

use canopy_graph::{GraphEvent, GraphSource};
use canopy_program::RenderSurface;
use canopy_projection::GraphFrame;

use crate::engine::Engine;
use crate::error::EngineError;
use crate::process::ProcessMode;
use crate::schedule::DirtyLevel;

impl<G: GraphSource> Engine<G> {
    /// Folds one store mutation into the dirty state.
    ///
    /// Every event schedules a frame; the variant decides how much of the
    /// pipeline that frame reruns. Additions and bulk updates demand a
    /// full reprocess. A single entity's attribute update gets away with
    /// a soft one. Drops and clears edit the affected cache entries right
    /// here (releasing the hover if it pointed at a removed entity) and
    /// then still demand a full reprocess, so batch indices stay
    /// contiguous.
    pub fn apply_graph_event(&mut self, event: &GraphEvent<G::NodeKey, G::EdgeKey>) {
        match event {
            GraphEvent::NodeAdded { .. } | GraphEvent::EdgeAdded { .. } => {
                self.planner.mark(DirtyLevel::Full);
            }
            GraphEvent::NodeAttributesUpdated { .. }
            | GraphEvent::EdgeAttributesUpdated { .. } => {
                self.planner.mark(DirtyLevel::Soft);
            }
            GraphEvent::EachNodeAttributesUpdated | GraphEvent::EachEdgeAttributesUpdated => {
                self.planner.mark(DirtyLevel::Full);
            }
            GraphEvent::NodeDropped { key } => {
                self.node_data.remove(key);
                if self.hovered_node.as_ref() == Some(key) {
                    self.hovered_node = None;
                }
                self.planner.mark(DirtyLevel::Full);
            }
            GraphEvent::EdgeDropped { key } => {
                self.edge_data.remove(key);
                if self.hovered_edge.as_ref() == Some(key) {
                    self.hovered_edge = None;
                }
                self.planner.mark(DirtyLevel::Full);
            }
            GraphEvent::EdgesCleared => {
                self.edge_data.clear();
                self.hovered_edge = None;
                self.planner.mark(DirtyLevel::Full);
            }
            GraphEvent::Cleared => {
                self.node_data.clear();
                self.hovered_node = None;
                self.edge_data.clear();
                self.hovered_edge = None;
                self.planner.mark(DirtyLevel::Full);
            }
        }
        self.planner.request();
    }

    /// Folds a batch of store mutations, in order.
    ///
    /// Pairs with drain-style stores, e.g.
    /// [`MemoryGraph::drain_events`](canopy_graph::MemoryGraph::drain_events).
    pub fn apply_graph_events(
        &mut self,
        events: impl IntoIterator<Item = GraphEvent<G::NodeKey, G::EdgeKey>>,
    ) {
        for event in events {
            self.apply_graph_event(&event);
        }
    }

    /// Swaps in a different graph and renders it immediately.
    ///
    /// The per-entity caches, the hover state, and the measured extent all
    /// describe the old graph, so they are discarded before the new one is
    /// processed from scratch. Any pending frame is cancelled; the swap's
    /// own render supersedes it.
    pub fn set_graph(
        &mut self,
        graph: &G,
        surface: &mut dyn RenderSurface,
    ) -> Result<(), EngineError<G::NodeKey, G::EdgeKey>> {
        self.node_data.clear();
        self.edge_data.clear();
        self.hovered_node = None;
        self.hovered_edge = None;
        self.forced_label_nodes.clear();
        self.forced_label_edges.clear();
        self.graph_extent = Rect::ZERO;
        self.graph_frame = GraphFrame::IDENTITY;
        self.planner.cancel_pending();
        self.planner.clear_dirty();
        self.reprocess(graph, ProcessMode::Full)?;
        self.render(surface)?;
        Ok(())
    }
}
