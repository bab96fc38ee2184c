// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Display: resolved per-entity display data and how raw attributes
//! become it.
//!
//! Draw programs never see raw graph attributes. During reprocessing the
//! engine runs every entity through a resolution pipeline and caches the
//! result:
//!
//! 1. Read the raw [`NodeAttributes`](canopy_graph::NodeAttributes) /
//!    [`EdgeAttributes`](canopy_graph::EdgeAttributes) snapshot.
//! 2. If a reducer is configured, its return value *replaces* the record
//!    outright (no merging).
//! 3. [`resolve_node`] / [`resolve_edge`] fill remaining gaps from a
//!    defaults bundle and produce the concrete [`NodeDisplayData`] /
//!    [`EdgeDisplayData`].
//!
//! A node still missing `x` or `y` after step 3 cannot be placed and fails
//! resolution with [`MissingPosition`]; every other field has a default.
//! Labels follow a small policy of their own: an empty string means "no
//! label", same as an absent one.
//!
//! ## Example
//!
//! ```rust
//! use canopy_display::{resolve_node, NodeDefaults};
//! use canopy_graph::NodeAttributes;
//!
//! let defaults = NodeDefaults::default();
//! let data = resolve_node(
//!     NodeAttributes::default().with_position(1.0, 2.0).with_label(""),
//!     &defaults,
//! )
//! .unwrap();
//! assert_eq!(data.size, defaults.size);
//! assert_eq!(data.kind, "circle");
//! assert_eq!(data.label, None);
//! assert!(!data.hidden());
//!
//! assert!(resolve_node(NodeAttributes::default(), &defaults).is_err());
//! ```
//!
//! Positions in resolved node data pass through as raw graph coordinates;
//! the engine rewrites them into framed space once the graph extent is
//! known, since the extent itself is computed from resolved positions.
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod data;
mod resolve;

pub use data::{EdgeDisplayData, EdgeDisplayFlags, NodeDisplayData, NodeDisplayFlags};
pub use resolve::{
    EdgeDefaults, EdgeReducer, MissingPosition, NodeDefaults, NodeReducer, resolve_edge,
    resolve_node,
};
