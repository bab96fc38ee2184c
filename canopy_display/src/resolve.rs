// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Attribute resolution: reducers, defaults, and the label policy.

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use kurbo::Point;
use peniko::Color;

use canopy_graph::{EdgeAttributes, NodeAttributes};

use crate::data::{
    EdgeDisplayData, EdgeDisplayFlags, NodeDisplayData, NodeDisplayFlags,
};

/// A user-supplied transform of one node's raw attributes.
///
/// The return value fully replaces the input record for this reprocess
/// cycle; fields the reducer drops are treated as unset and fall back to
/// defaults.
pub type NodeReducer<K> = Box<dyn Fn(&K, NodeAttributes) -> NodeAttributes>;

/// A user-supplied transform of one edge's raw attributes.
pub type EdgeReducer<K> = Box<dyn Fn(&K, EdgeAttributes) -> EdgeAttributes>;

/// Default values filled into unset node attribute fields.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeDefaults {
    /// Fill color for nodes without one.
    pub color: Color,
    /// Size for nodes without one.
    pub size: f64,
    /// Kind tag for nodes without one.
    pub kind: String,
}

impl Default for NodeDefaults {
    fn default() -> Self {
        Self {
            color: Color::from_rgb8(0x99, 0x99, 0x99),
            size: 2.0,
            kind: String::from("circle"),
        }
    }
}

/// Default values filled into unset edge attribute fields.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeDefaults {
    /// Stroke color for edges without one.
    pub color: Color,
    /// Thickness for edges without one.
    pub size: f64,
    /// Kind tag for edges without one.
    pub kind: String,
}

impl Default for EdgeDefaults {
    fn default() -> Self {
        Self {
            color: Color::from_rgb8(0xcc, 0xcc, 0xcc),
            size: 0.5,
            kind: String::from("line"),
        }
    }
}

/// A node could not be positioned: `x` or `y` was still unset after
/// reduction and defaulting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MissingPosition;

impl fmt::Display for MissingPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "node has no numeric `x`/`y` position and cannot be placed"
        )
    }
}

impl core::error::Error for MissingPosition {}

/// Resolves a node's raw attributes into concrete display data.
///
/// Position is required (presence, not finiteness: positions pass through
/// as given). All other fields fall back to `defaults`, zero z-index, and
/// unset flags. The returned position is still in raw graph coordinates;
/// the caller applies framed-space normalization once the extent over all
/// resolved positions is known.
pub fn resolve_node(
    attributes: NodeAttributes,
    defaults: &NodeDefaults,
) -> Result<NodeDisplayData, MissingPosition> {
    let x = attributes.x.ok_or(MissingPosition)?;
    let y = attributes.y.ok_or(MissingPosition)?;
    let mut flags = NodeDisplayFlags::empty();
    flags.set(NodeDisplayFlags::HIDDEN, attributes.hidden.unwrap_or(false));
    flags.set(
        NodeDisplayFlags::HIGHLIGHTED,
        attributes.highlighted.unwrap_or(false),
    );
    flags.set(
        NodeDisplayFlags::FORCE_LABEL,
        attributes.force_label.unwrap_or(false),
    );
    Ok(NodeDisplayData {
        position: Point::new(x, y),
        size: attributes.size.unwrap_or(defaults.size),
        color: attributes.color.unwrap_or(defaults.color),
        label: resolve_label(attributes.label),
        kind: attributes.kind.unwrap_or_else(|| defaults.kind.clone()),
        z_index: attributes.z_index.unwrap_or(0.0),
        flags,
    })
}

/// Resolves an edge's raw attributes into concrete display data.
///
/// Edges have no required fields; resolution cannot fail.
#[must_use]
pub fn resolve_edge(attributes: EdgeAttributes, defaults: &EdgeDefaults) -> EdgeDisplayData {
    let mut flags = EdgeDisplayFlags::empty();
    flags.set(EdgeDisplayFlags::HIDDEN, attributes.hidden.unwrap_or(false));
    flags.set(
        EdgeDisplayFlags::FORCE_LABEL,
        attributes.force_label.unwrap_or(false),
    );
    EdgeDisplayData {
        size: attributes.size.unwrap_or(defaults.size),
        color: attributes.color.unwrap_or(defaults.color),
        label: resolve_label(attributes.label),
        kind: attributes.kind.unwrap_or_else(|| defaults.kind.clone()),
        z_index: attributes.z_index.unwrap_or(0.0),
        flags,
    }
}

/// The label policy: empty strings mean "no label".
fn resolve_label(label: Option<String>) -> Option<String> {
    label.filter(|label| !label.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn missing_position_fails_resolution() {
        let defaults = NodeDefaults::default();
        assert_eq!(
            resolve_node(NodeAttributes::default(), &defaults),
            Err(MissingPosition)
        );
        assert_eq!(
            resolve_node(NodeAttributes::default().with_position(1.0, 2.0), &defaults)
                .map(|data| data.position),
            Ok(Point::new(1.0, 2.0))
        );
        // One axis is not enough.
        let mut attributes = NodeAttributes::default();
        attributes.x = Some(1.0);
        assert_eq!(resolve_node(attributes, &defaults), Err(MissingPosition));
    }

    #[test]
    fn defaults_fill_unset_fields() {
        let data = resolve_node(
            NodeAttributes::default().with_position(0.0, 0.0),
            &NodeDefaults::default(),
        )
        .unwrap();
        assert_eq!(data.size, 2.0);
        assert_eq!(data.color, Color::from_rgb8(0x99, 0x99, 0x99));
        assert_eq!(data.kind, "circle");
        assert_eq!(data.z_index, 0.0);
        assert_eq!(data.label, None);
        assert_eq!(data.flags, NodeDisplayFlags::empty());
    }

    #[test]
    fn provided_fields_win_over_defaults() {
        let data = resolve_node(
            NodeAttributes::default()
                .with_position(0.0, 0.0)
                .with_size(9.0)
                .with_color(Color::BLACK)
                .with_kind("square")
                .with_z_index(3.0)
                .with_hidden(true)
                .with_highlighted(true),
            &NodeDefaults::default(),
        )
        .unwrap();
        assert_eq!(data.size, 9.0);
        assert_eq!(data.color, Color::BLACK);
        assert_eq!(data.kind, "square");
        assert_eq!(data.z_index, 3.0);
        assert!(data.hidden());
        assert!(data.highlighted());
    }

    #[test]
    fn empty_labels_resolve_to_none() {
        let defaults = NodeDefaults::default();
        let base = NodeAttributes::default().with_position(0.0, 0.0);
        let unlabeled = resolve_node(base.clone(), &defaults).unwrap();
        assert_eq!(unlabeled.label, None);
        let empty = resolve_node(base.clone().with_label(""), &defaults).unwrap();
        assert_eq!(empty.label, None);
        let labeled = resolve_node(base.with_label("hello"), &defaults).unwrap();
        assert_eq!(labeled.label, Some("hello".to_string()));
    }

    #[test]
    fn edges_resolve_without_required_fields() {
        let data = resolve_edge(EdgeAttributes::default(), &EdgeDefaults::default());
        assert_eq!(data.size, 0.5);
        assert_eq!(data.color, Color::from_rgb8(0xcc, 0xcc, 0xcc));
        assert_eq!(data.kind, "line");
        assert!(!data.hidden());
    }

    #[test]
    fn edge_flags_and_labels_resolve() {
        let data = resolve_edge(
            EdgeAttributes::default()
                .with_hidden(true)
                .with_force_label(true)
                .with_label("weight: 3"),
            &EdgeDefaults::default(),
        );
        assert!(data.hidden());
        assert!(data.force_label());
        assert_eq!(data.label, Some("weight: 3".to_string()));
    }
}
