// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reprocessing: resolving the graph into display-data batches.

use alloc::vec;
use alloc::vec::Vec;

use kurbo::Rect;

use canopy_display::{
    resolve_edge, resolve_node, EdgeDefaults, EdgeDisplayData, EdgeReducer, NodeDefaults,
    NodeDisplayData, NodeReducer,
};
use canopy_graph::GraphSource;
use canopy_projection::GraphFrame;

use crate::engine::Engine;
use crate::error::ProcessError;
use crate::schedule::DirtyLevel;

/// How much of the previous reprocess a new one may reuse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ProcessMode {
    /// Rebuild extents and reallocate program batches.
    Full,
    /// Keep the cached extent and existing batch allocations; entity
    /// membership and kinds are known to be unchanged.
    Soft,
}

/// Every node resolved, in graph order, with the observed z-index range.
#[derive(Debug)]
pub(crate) struct NodeBatch<N> {
    pub(crate) entries: Vec<(N, NodeDisplayData)>,
    pub(crate) z_extent: (f64, f64),
}

/// Every edge resolved, in graph order, with its endpoint keys and the
/// observed z-index range.
pub(crate) struct EdgeBatch<N, E> {
    pub(crate) entries: Vec<(E, EdgeDisplayData, N, N)>,
    pub(crate) z_extent: (f64, f64),
}

/// Resolves every node through the reducer and defaults.
///
/// Fails on the first node that still has no position, naming it.
pub(crate) fn resolve_nodes<G: GraphSource>(
    graph: &G,
    reducer: Option<&NodeReducer<G::NodeKey>>,
    defaults: &NodeDefaults,
) -> Result<NodeBatch<G::NodeKey>, ProcessError<G::NodeKey, G::EdgeKey>> {
    let mut entries = Vec::with_capacity(graph.node_count());
    let mut z_extent = (f64::INFINITY, f64::NEG_INFINITY);
    for key in graph.node_keys() {
        let attributes = graph.node_attributes(&key).unwrap_or_default();
        let attributes = match reducer {
            Some(reducer) => reducer(&key, attributes),
            None => attributes,
        };
        let data = resolve_node(attributes, defaults)
            .map_err(|_| ProcessError::MissingNodePosition { key: key.clone() })?;
        z_extent.0 = z_extent.0.min(data.z_index);
        z_extent.1 = z_extent.1.max(data.z_index);
        entries.push((key, data));
    }
    Ok(NodeBatch { entries, z_extent })
}

/// Resolves every edge through the reducer and defaults, capturing its
/// endpoint keys.
///
/// Fails on the first edge whose endpoints the graph cannot supply.
pub(crate) fn resolve_edges<G: GraphSource>(
    graph: &G,
    reducer: Option<&EdgeReducer<G::EdgeKey>>,
    defaults: &EdgeDefaults,
) -> Result<EdgeBatch<G::NodeKey, G::EdgeKey>, ProcessError<G::NodeKey, G::EdgeKey>> {
    let mut entries = Vec::with_capacity(graph.edge_count());
    let mut z_extent = (f64::INFINITY, f64::NEG_INFINITY);
    for key in graph.edge_keys() {
        let attributes = graph.edge_attributes(&key).unwrap_or_default();
        let attributes = match reducer {
            Some(reducer) => reducer(&key, attributes),
            None => attributes,
        };
        let Some((source, target)) = graph.edge_endpoints(&key) else {
            return Err(ProcessError::DanglingEdge { key });
        };
        let data = resolve_edge(attributes, defaults);
        z_extent.0 = z_extent.0.min(data.z_index);
        z_extent.1 = z_extent.1.max(data.z_index);
        entries.push((key, data, source, target));
    }
    Ok(EdgeBatch { entries, z_extent })
}

/// The bounding box of resolved node positions, in raw graph coordinates.
///
/// Empty batches (and batches with no finite coordinate on an axis) yield
/// [`Rect::ZERO`].
pub(crate) fn position_extent<N>(entries: &[(N, NodeDisplayData)]) -> Rect {
    let mut x = (f64::INFINITY, f64::NEG_INFINITY);
    let mut y = (f64::INFINITY, f64::NEG_INFINITY);
    for (_, data) in entries {
        x.0 = x.0.min(data.position.x);
        x.1 = x.1.max(data.position.x);
        y.0 = y.0.min(data.position.y);
        y.1 = y.1.max(data.position.y);
    }
    if x.0 > x.1 || y.0 > y.1 {
        return Rect::ZERO;
    }
    Rect::new(x.0, y.0, x.1, y.1)
}

/// Stable z-index sort: ties keep their existing (graph) order.
pub(crate) fn sort_by_z<T>(entries: &mut [T], z_of: impl Fn(&T) -> f64) {
    entries.sort_by(|a, b| z_of(a).total_cmp(&z_of(b)));
}

impl<G: GraphSource> Engine<G> {
    /// Runs [`process`](Self::process), re-entering the fully dirty state
    /// on failure so the next refresh rebuilds from scratch.
    pub(crate) fn reprocess(
        &mut self,
        graph: &G,
        mode: ProcessMode,
    ) -> Result<(), ProcessError<G::NodeKey, G::EdgeKey>> {
        let result = self.process(graph, mode);
        if result.is_err() {
            self.planner.mark(DirtyLevel::Full);
        }
        result
    }

    /// Rebuilds display-data caches and feeds every entity to its draw
    /// program.
    ///
    /// Nodes settle first: resolve, normalize into framed space, order,
    /// batch. Edges follow the same path against the fresh node cache
    /// (they carry no position of their own, so there is no normalization
    /// step). In [`ProcessMode::Soft`] the extent, frame, and batch
    /// allocations from the previous full run are reused.
    ///
    /// On failure the caches may be part-written; the caller marks the
    /// engine fully dirty so nothing stale is advertised as valid.
    fn process(
        &mut self,
        graph: &G,
        mode: ProcessMode,
    ) -> Result<(), ProcessError<G::NodeKey, G::EdgeKey>> {
        let node_defaults = self.settings.node_defaults();
        let mut nodes = resolve_nodes(graph, self.node_reducer.as_ref(), &node_defaults)?;

        if mode == ProcessMode::Full {
            self.graph_extent = position_extent(&nodes.entries);
            let framing = self.custom_extent.unwrap_or(self.graph_extent);
            self.graph_frame = GraphFrame::from_extent(framing);
        }
        for (_, data) in &mut nodes.entries {
            data.position = self.graph_frame.to_framed(data.position);
        }
        if self.settings.z_index_ordering && nodes.z_extent.0 < nodes.z_extent.1 {
            sort_by_z(&mut nodes.entries, |(_, data)| data.z_index);
        }

        // Every kind must have a handler before anything is batched.
        let mut node_counts = vec![0_usize; self.node_programs.len()];
        let mut node_program_of = Vec::with_capacity(nodes.entries.len());
        for (key, data) in &nodes.entries {
            let Some(index) = self.node_programs.index_of(&data.kind) else {
                return Err(ProcessError::UnknownNodeKind {
                    key: key.clone(),
                    kind: data.kind.clone(),
                });
            };
            node_counts[index] += 1;
            node_program_of.push(index);
        }
        if mode == ProcessMode::Full {
            for (program, count) in self.node_programs.iter_mut().zip(&node_counts) {
                program.allocate(*count);
            }
        }

        self.node_data.clear();
        self.node_data.reserve(nodes.entries.len());
        self.forced_label_nodes.clear();
        let mut cursors = vec![0_usize; node_counts.len()];
        for ((key, data), &index) in nodes.entries.into_iter().zip(node_program_of.iter()) {
            if let Some(program) = self.node_programs.get_mut(index) {
                program.process(&data, data.hidden(), cursors[index]);
            }
            cursors[index] += 1;
            if data.force_label() {
                self.forced_label_nodes.push(key.clone());
            }
            self.node_data.insert(key, data);
        }

        let edge_defaults = self.settings.edge_defaults();
        let mut edges = resolve_edges(graph, self.edge_reducer.as_ref(), &edge_defaults)?;

        if self.settings.z_index_ordering && edges.z_extent.0 < edges.z_extent.1 {
            sort_by_z(&mut edges.entries, |(_, data, _, _)| data.z_index);
        }

        let mut edge_counts = vec![0_usize; self.edge_programs.len()];
        let mut edge_program_of = Vec::with_capacity(edges.entries.len());
        for (key, data, _, _) in &edges.entries {
            let Some(index) = self.edge_programs.index_of(&data.kind) else {
                return Err(ProcessError::UnknownEdgeKind {
                    key: key.clone(),
                    kind: data.kind.clone(),
                });
            };
            edge_counts[index] += 1;
            edge_program_of.push(index);
        }
        if mode == ProcessMode::Full {
            for (program, count) in self.edge_programs.iter_mut().zip(&edge_counts) {
                program.allocate(*count);
            }
        }

        self.edge_data.clear();
        self.edge_data.reserve(edges.entries.len());
        self.forced_label_edges.clear();
        let mut cursors = vec![0_usize; edge_counts.len()];
        for ((key, data, source, target), &index) in
            edges.entries.into_iter().zip(edge_program_of.iter())
        {
            let (Some(source_data), Some(target_data)) =
                (self.node_data.get(&source), self.node_data.get(&target))
            else {
                return Err(ProcessError::DanglingEdge { key });
            };
            let hidden = data.hidden() || source_data.hidden() || target_data.hidden();
            if let Some(program) = self.edge_programs.get_mut(index) {
                program.process(&data, source_data, target_data, hidden, cursors[index]);
            }
            cursors[index] += 1;
            if data.force_label() {
                self.forced_label_edges.push(key.clone());
            }
            self.edge_data.insert(key, data);
        }

        Ok(())
    }
}
