// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resolved per-entity display records.

use alloc::string::String;
use kurbo::Point;
use peniko::Color;

bitflags::bitflags! {
    /// Resolved boolean display flags of a node.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct NodeDisplayFlags: u8 {
        /// Skip drawing this node.
        const HIDDEN = 0b0000_0001;
        /// Render with the highlight treatment.
        const HIGHLIGHTED = 0b0000_0010;
        /// Always show the label.
        const FORCE_LABEL = 0b0000_0100;
    }
}

bitflags::bitflags! {
    /// Resolved boolean display flags of an edge.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct EdgeDisplayFlags: u8 {
        /// Skip drawing this edge.
        const HIDDEN = 0b0000_0001;
        /// Always show the label.
        const FORCE_LABEL = 0b0000_0010;
    }
}

/// The fully resolved display record of one node.
///
/// Immutable between reprocess passes; draw programs receive read-only
/// references during batch processing. The position is in framed space once
/// the engine has applied normalization.
#[derive(Clone, Debug, PartialEq)]
pub struct NodeDisplayData {
    /// Node center.
    pub position: Point,
    /// Radius-like size in pixels at zoom 1.
    pub size: f64,
    /// Fill color.
    pub color: Color,
    /// Label text, if any.
    pub label: Option<String>,
    /// Kind tag selecting the draw program.
    pub kind: String,
    /// Paint order within the node batch.
    pub z_index: f64,
    /// Boolean display flags.
    pub flags: NodeDisplayFlags,
}

impl NodeDisplayData {
    /// Returns `true` if the node is hidden.
    #[must_use]
    #[inline]
    pub fn hidden(&self) -> bool {
        self.flags.contains(NodeDisplayFlags::HIDDEN)
    }

    /// Returns `true` if the node is highlighted.
    #[must_use]
    #[inline]
    pub fn highlighted(&self) -> bool {
        self.flags.contains(NodeDisplayFlags::HIGHLIGHTED)
    }

    /// Returns `true` if the node's label is always shown.
    #[must_use]
    #[inline]
    pub fn force_label(&self) -> bool {
        self.flags.contains(NodeDisplayFlags::FORCE_LABEL)
    }
}

/// The fully resolved display record of one edge.
///
/// Edges have no position of their own; draw programs receive the resolved
/// endpoints alongside this record.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeDisplayData {
    /// Thickness in pixels at zoom 1.
    pub size: f64,
    /// Stroke color.
    pub color: Color,
    /// Label text, if any.
    pub label: Option<String>,
    /// Kind tag selecting the draw program.
    pub kind: String,
    /// Paint order within the edge batch.
    pub z_index: f64,
    /// Boolean display flags.
    pub flags: EdgeDisplayFlags,
}

impl EdgeDisplayData {
    /// Returns `true` if the edge is hidden.
    #[must_use]
    #[inline]
    pub fn hidden(&self) -> bool {
        self.flags.contains(EdgeDisplayFlags::HIDDEN)
    }

    /// Returns `true` if the edge's label is always shown.
    #[must_use]
    #[inline]
    pub fn force_label(&self) -> bool {
        self.flags.contains(EdgeDisplayFlags::FORCE_LABEL)
    }
}
