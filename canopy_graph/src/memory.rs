// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An insertion-ordered reference graph store.

use alloc::string::String;
use alloc::vec::Vec;

use hashbrown::HashMap;

use crate::attributes::{EdgeAttributes, NodeAttributes};
use crate::source::{GraphEvent, GraphSource};

/// The event type emitted by [`MemoryGraph`].
pub type MemoryGraphEvent = GraphEvent<String, String>;

#[derive(Clone, Debug)]
struct EdgeRecord {
    source: String,
    target: String,
    attributes: EdgeAttributes,
}

/// A simple in-memory [`GraphSource`] with string keys.
///
/// Nodes and edges enumerate in insertion order, which stays stable across
/// lookups and updates; removals close the gap without reordering the
/// survivors. Every mutation queues a [`MemoryGraphEvent`] that the host
/// drains and forwards to the renderer, keeping the "messages, not
/// callbacks" shape of the engine's synchronization layer.
///
/// This is a reference implementation for tests, demos, and small hosts;
/// larger embeddings implement [`GraphSource`] over their own store.
///
/// # Example
///
/// ```rust
/// use canopy_graph::{GraphSource, MemoryGraph, NodeAttributes};
///
/// let mut graph = MemoryGraph::new();
/// graph.add_node("a", NodeAttributes::default().with_position(0.0, 0.0));
/// graph.add_node("b", NodeAttributes::default().with_position(1.0, 1.0));
/// graph.add_edge("e", "a", "b", Default::default());
///
/// assert_eq!(graph.edge_endpoints(&"e".into()), Some(("a".into(), "b".into())));
/// ```
#[derive(Clone, Debug, Default)]
pub struct MemoryGraph {
    nodes: Vec<(String, NodeAttributes)>,
    node_index: HashMap<String, usize>,
    edges: Vec<(String, EdgeRecord)>,
    edge_index: HashMap<String, usize>,
    events: Vec<MemoryGraphEvent>,
}

impl MemoryGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a node, or replaces an existing node's attributes.
    ///
    /// Queues `NodeAdded` for a new key and `NodeAttributesUpdated` for an
    /// existing one.
    pub fn add_node(&mut self, key: impl Into<String>, attributes: NodeAttributes) {
        let key = key.into();
        if let Some(&index) = self.node_index.get(&key) {
            self.nodes[index].1 = attributes;
            self.events.push(GraphEvent::NodeAttributesUpdated { key });
        } else {
            self.node_index.insert(key.clone(), self.nodes.len());
            self.nodes.push((key.clone(), attributes));
            self.events.push(GraphEvent::NodeAdded { key });
        }
    }

    /// Mutates a node's attributes in place. Returns `false` for unknown
    /// keys.
    pub fn update_node(&mut self, key: &str, f: impl FnOnce(&mut NodeAttributes)) -> bool {
        let Some(&index) = self.node_index.get(key) else {
            return false;
        };
        f(&mut self.nodes[index].1);
        let key = self.nodes[index].0.clone();
        self.events.push(GraphEvent::NodeAttributesUpdated { key });
        true
    }

    /// Inserts an edge between two existing nodes, or replaces an existing
    /// edge's endpoints and attributes.
    ///
    /// Returns `false` (queuing nothing) if either endpoint is missing.
    pub fn add_edge(
        &mut self,
        key: impl Into<String>,
        source: impl Into<String>,
        target: impl Into<String>,
        attributes: EdgeAttributes,
    ) -> bool {
        let key = key.into();
        let source = source.into();
        let target = target.into();
        if !self.node_index.contains_key(&source) || !self.node_index.contains_key(&target) {
            return false;
        }
        let record = EdgeRecord {
            source,
            target,
            attributes,
        };
        if let Some(&index) = self.edge_index.get(&key) {
            self.edges[index].1 = record;
            self.events.push(GraphEvent::EdgeAttributesUpdated { key });
        } else {
            self.edge_index.insert(key.clone(), self.edges.len());
            self.edges.push((key.clone(), record));
            self.events.push(GraphEvent::EdgeAdded { key });
        }
        true
    }

    /// Mutates an edge's attributes in place. Returns `false` for unknown
    /// keys.
    pub fn update_edge(&mut self, key: &str, f: impl FnOnce(&mut EdgeAttributes)) -> bool {
        let Some(&index) = self.edge_index.get(key) else {
            return false;
        };
        f(&mut self.edges[index].1.attributes);
        let key = self.edges[index].0.clone();
        self.events.push(GraphEvent::EdgeAttributesUpdated { key });
        true
    }

    /// Applies `f` to every node's attributes and queues one bulk update
    /// event.
    pub fn update_each_node(&mut self, mut f: impl FnMut(&str, &mut NodeAttributes)) {
        for (key, attributes) in &mut self.nodes {
            f(key, attributes);
        }
        self.events.push(GraphEvent::EachNodeAttributesUpdated);
    }

    /// Applies `f` to every edge's attributes and queues one bulk update
    /// event.
    pub fn update_each_edge(&mut self, mut f: impl FnMut(&str, &mut EdgeAttributes)) {
        for (key, record) in &mut self.edges {
            f(key, &mut record.attributes);
        }
        self.events.push(GraphEvent::EachEdgeAttributesUpdated);
    }

    /// Removes a node and every edge touching it.
    ///
    /// Queues `EdgeDropped` for each incident edge, then `NodeDropped`.
    /// Returns `false` for unknown keys.
    pub fn drop_node(&mut self, key: &str) -> bool {
        if !self.node_index.contains_key(key) {
            return false;
        }
        let incident: Vec<String> = self
            .edges
            .iter()
            .filter(|(_, record)| record.source == key || record.target == key)
            .map(|(edge_key, _)| edge_key.clone())
            .collect();
        for edge_key in &incident {
            self.drop_edge(edge_key);
        }
        let Some(index) = self.node_index.remove(key) else {
            return false;
        };
        let (key, _) = self.nodes.remove(index);
        for (i, (node_key, _)) in self.nodes.iter().enumerate().skip(index) {
            self.node_index.insert(node_key.clone(), i);
        }
        self.events.push(GraphEvent::NodeDropped { key });
        true
    }

    /// Removes an edge. Returns `false` for unknown keys.
    pub fn drop_edge(&mut self, key: &str) -> bool {
        let Some(index) = self.edge_index.remove(key) else {
            return false;
        };
        let (key, _) = self.edges.remove(index);
        for (i, (edge_key, _)) in self.edges.iter().enumerate().skip(index) {
            self.edge_index.insert(edge_key.clone(), i);
        }
        self.events.push(GraphEvent::EdgeDropped { key });
        true
    }

    /// Removes every edge, queuing a single `EdgesCleared`.
    pub fn clear_edges(&mut self) {
        self.edges.clear();
        self.edge_index.clear();
        self.events.push(GraphEvent::EdgesCleared);
    }

    /// Empties the graph, queuing a single `Cleared`.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.node_index.clear();
        self.edges.clear();
        self.edge_index.clear();
        self.events.push(GraphEvent::Cleared);
    }

    /// Removes and returns all queued events in emission order.
    pub fn drain_events(&mut self) -> Vec<MemoryGraphEvent> {
        core::mem::take(&mut self.events)
    }
}

impl GraphSource for MemoryGraph {
    type NodeKey = String;
    type EdgeKey = String;

    fn node_count(&self) -> usize {
        self.nodes.len()
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn node_keys(&self) -> impl Iterator<Item = String> + '_ {
        self.nodes.iter().map(|(key, _)| key.clone())
    }

    fn edge_keys(&self) -> impl Iterator<Item = String> + '_ {
        self.edges.iter().map(|(key, _)| key.clone())
    }

    fn node_attributes(&self, key: &String) -> Option<NodeAttributes> {
        let &index = self.node_index.get(key)?;
        Some(self.nodes[index].1.clone())
    }

    fn edge_attributes(&self, key: &String) -> Option<EdgeAttributes> {
        let &index = self.edge_index.get(key)?;
        Some(self.edges[index].1.attributes.clone())
    }

    fn edge_endpoints(&self, key: &String) -> Option<(String, String)> {
        let &index = self.edge_index.get(key)?;
        let record = &self.edges[index].1;
        Some((record.source.clone(), record.target.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;
    use alloc::vec;

    fn keys(graph: &MemoryGraph) -> Vec<String> {
        graph.node_keys().collect()
    }

    #[test]
    fn nodes_enumerate_in_insertion_order() {
        let mut graph = MemoryGraph::new();
        graph.add_node("c", NodeAttributes::default());
        graph.add_node("a", NodeAttributes::default());
        graph.add_node("b", NodeAttributes::default());
        assert_eq!(keys(&graph), vec!["c", "a", "b"]);
        assert_eq!(graph.node_count(), 3);
    }

    #[test]
    fn re_adding_a_node_updates_in_place() {
        let mut graph = MemoryGraph::new();
        graph.add_node("a", NodeAttributes::default());
        graph.add_node("b", NodeAttributes::default());
        graph.drain_events();

        graph.add_node("a", NodeAttributes::default().with_size(9.0));
        assert_eq!(keys(&graph), vec!["a", "b"]);
        assert_eq!(
            graph.node_attributes(&"a".to_string()).unwrap().size,
            Some(9.0)
        );
        assert_eq!(
            graph.drain_events(),
            vec![GraphEvent::NodeAttributesUpdated { key: "a".into() }]
        );
    }

    #[test]
    fn dropping_a_middle_node_keeps_lookups_consistent() {
        let mut graph = MemoryGraph::new();
        graph.add_node("a", NodeAttributes::default());
        graph.add_node("b", NodeAttributes::default());
        graph.add_node("c", NodeAttributes::default().with_size(3.0));
        assert!(graph.drop_node("b"));
        assert_eq!(keys(&graph), vec!["a", "c"]);
        assert_eq!(
            graph.node_attributes(&"c".to_string()).unwrap().size,
            Some(3.0)
        );
        assert!(!graph.drop_node("b"));
    }

    #[test]
    fn dropping_a_node_cascades_to_incident_edges() {
        let mut graph = MemoryGraph::new();
        graph.add_node("a", NodeAttributes::default());
        graph.add_node("b", NodeAttributes::default());
        graph.add_node("c", NodeAttributes::default());
        graph.add_edge("ab", "a", "b", EdgeAttributes::default());
        graph.add_edge("bc", "b", "c", EdgeAttributes::default());
        graph.add_edge("ca", "c", "a", EdgeAttributes::default());
        graph.drain_events();

        assert!(graph.drop_node("b"));
        assert_eq!(graph.edge_count(), 1);
        assert_eq!(graph.edge_keys().collect::<Vec<_>>(), vec!["ca"]);
        assert_eq!(
            graph.drain_events(),
            vec![
                GraphEvent::EdgeDropped { key: "ab".into() },
                GraphEvent::EdgeDropped { key: "bc".into() },
                GraphEvent::NodeDropped { key: "b".into() },
            ]
        );
    }

    #[test]
    fn edges_require_existing_endpoints() {
        let mut graph = MemoryGraph::new();
        graph.add_node("a", NodeAttributes::default());
        assert!(!graph.add_edge("e", "a", "ghost", EdgeAttributes::default()));
        assert_eq!(graph.edge_count(), 0);
        graph.drain_events();
        assert!(graph.drain_events().is_empty());
    }

    #[test]
    fn endpoints_roundtrip() {
        let mut graph = MemoryGraph::new();
        graph.add_node("a", NodeAttributes::default());
        graph.add_node("b", NodeAttributes::default());
        graph.add_edge("e", "a", "b", EdgeAttributes::default());
        assert_eq!(
            graph.edge_endpoints(&"e".to_string()),
            Some(("a".to_string(), "b".to_string()))
        );
        assert_eq!(graph.edge_endpoints(&"nope".to_string()), None);
    }

    #[test]
    fn bulk_updates_emit_one_event() {
        let mut graph = MemoryGraph::new();
        graph.add_node("a", NodeAttributes::default());
        graph.add_node("b", NodeAttributes::default());
        graph.drain_events();

        graph.update_each_node(|_, attributes| attributes.size = Some(5.0));
        assert_eq!(
            graph.drain_events(),
            vec![GraphEvent::EachNodeAttributesUpdated]
        );
        assert_eq!(
            graph.node_attributes(&"b".to_string()).unwrap().size,
            Some(5.0)
        );
    }

    #[test]
    fn clears_wipe_and_notify() {
        let mut graph = MemoryGraph::new();
        graph.add_node("a", NodeAttributes::default());
        graph.add_node("b", NodeAttributes::default());
        graph.add_edge("e", "a", "b", EdgeAttributes::default());
        graph.drain_events();

        graph.clear_edges();
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.node_count(), 2);
        graph.clear();
        assert_eq!(graph.node_count(), 0);
        assert_eq!(
            graph.drain_events(),
            vec![GraphEvent::EdgesCleared, GraphEvent::Cleared]
        );
    }
}
