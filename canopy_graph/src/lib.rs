// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Graph: the data contract between a graph store and the renderer.
//!
//! The rendering engine does not own graph data. It reads nodes and edges
//! through the [`GraphSource`] trait and learns about mutations through
//! [`GraphEvent`] values that the host forwards. This crate defines that
//! boundary:
//!
//! - [`NodeAttributes`] / [`EdgeAttributes`]: Partial raw attribute records.
//!   Every field is optional; the display-data resolver fills gaps from
//!   configured defaults.
//! - [`GraphSource`]: Read-only access with stable enumeration order.
//!   The engine's batching relies on two enumerations without intervening
//!   mutations yielding the same order.
//! - [`GraphEvent`]: The mutation vocabulary the engine's dirty tracking
//!   understands, from single-entity attribute updates up to clearing the
//!   whole graph.
//! - [`MemoryGraph`]: A straightforward insertion-ordered implementation of
//!   the contract with a drainable event queue, for tests, demos, and hosts
//!   without their own graph store.
//!
//! ## Quick Start
//!
//! ```rust
//! use canopy_graph::{GraphEvent, GraphSource, MemoryGraph, NodeAttributes};
//!
//! let mut graph = MemoryGraph::new();
//! graph.add_node("a", NodeAttributes::default().with_position(0.0, 0.0));
//! graph.add_node("b", NodeAttributes::default().with_position(10.0, 0.0));
//! graph.add_edge("a->b", "a", "b", Default::default());
//!
//! assert_eq!(graph.node_count(), 2);
//! let events = graph.drain_events();
//! assert_eq!(events[0], GraphEvent::NodeAdded { key: "a".into() });
//! ```
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod attributes;
mod memory;
mod source;

pub use attributes::{EdgeAttributes, NodeAttributes};
pub use memory::{MemoryGraph, MemoryGraphEvent};
pub use source::{GraphEvent, GraphSource};
