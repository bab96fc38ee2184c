// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The read-only graph contract and its mutation vocabulary.

use core::fmt::Debug;
use core::hash::Hash;

use crate::attributes::{EdgeAttributes, NodeAttributes};

/// Read-only access to an external graph store.
///
/// The renderer reads everything it needs through this trait and never
/// mutates the graph. Two invariants the engine relies on:
///
/// - **Stable order**: `node_keys` / `edge_keys` yield the same order on
///   every call as long as no mutation happened in between. Batch indices
///   handed to draw programs are derived from this order.
/// - **Snapshot lookups**: attribute getters return owned copies, so
///   reducers can consume and transform them without aliasing the store.
///
/// Key types carry `Debug` so resolution failures can name the offending
/// entity.
pub trait GraphSource {
    /// Identifier for nodes.
    type NodeKey: Clone + Eq + Hash + Debug;
    /// Identifier for edges.
    type EdgeKey: Clone + Eq + Hash + Debug;

    /// Number of nodes.
    fn node_count(&self) -> usize;

    /// Number of edges.
    fn edge_count(&self) -> usize;

    /// Enumerates node keys in the store's stable order.
    fn node_keys(&self) -> impl Iterator<Item = Self::NodeKey> + '_;

    /// Enumerates edge keys in the store's stable order.
    fn edge_keys(&self) -> impl Iterator<Item = Self::EdgeKey> + '_;

    /// Returns a snapshot of a node's raw attributes.
    fn node_attributes(&self, key: &Self::NodeKey) -> Option<NodeAttributes>;

    /// Returns a snapshot of an edge's raw attributes.
    fn edge_attributes(&self, key: &Self::EdgeKey) -> Option<EdgeAttributes>;

    /// Returns an edge's `(source, target)` node keys.
    fn edge_endpoints(&self, key: &Self::EdgeKey) -> Option<(Self::NodeKey, Self::NodeKey)>;
}

/// A graph mutation, as forwarded from the store to the renderer.
///
/// The engine classifies each event into a reprocessing severity and, for
/// drops and clears, performs targeted cache edits. Events carry keys
/// rather than attribute payloads: the engine re-reads whatever it needs
/// through [`GraphSource`] when it reprocesses.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GraphEvent<N, E> {
    /// A node was inserted.
    NodeAdded {
        /// Key of the new node.
        key: N,
    },
    /// An edge was inserted.
    EdgeAdded {
        /// Key of the new edge.
        key: E,
    },
    /// One node's attributes changed.
    NodeAttributesUpdated {
        /// Key of the updated node.
        key: N,
    },
    /// One edge's attributes changed.
    EdgeAttributesUpdated {
        /// Key of the updated edge.
        key: E,
    },
    /// A bulk update touched every node's attributes.
    EachNodeAttributesUpdated,
    /// A bulk update touched every edge's attributes.
    EachEdgeAttributesUpdated,
    /// A node was removed.
    NodeDropped {
        /// Key of the removed node.
        key: N,
    },
    /// An edge was removed.
    EdgeDropped {
        /// Key of the removed edge.
        key: E,
    },
    /// All edges were removed at once.
    EdgesCleared,
    /// The whole graph was emptied.
    Cleared,
}
