// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Raw, partial attribute records.

use alloc::string::String;
use peniko::Color;

/// Raw display-oriented attributes of a node, all optional.
///
/// This is what a [`GraphSource`](crate::GraphSource) hands the renderer and
/// what reducers consume and produce. Missing fields are filled from
/// configured defaults during display-data resolution, with one exception:
/// a node without a numeric position after defaulting cannot be rendered
/// and fails resolution.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NodeAttributes {
    /// Horizontal position in raw graph units.
    pub x: Option<f64>,
    /// Vertical position in raw graph units.
    pub y: Option<f64>,
    /// Node size in pixels at zoom 1.
    pub size: Option<f64>,
    /// Fill color.
    pub color: Option<Color>,
    /// Label text; empty strings resolve to no label.
    pub label: Option<String>,
    /// Entity kind tag selecting the draw program (e.g. `"circle"`).
    pub kind: Option<String>,
    /// Paint order within the node batch.
    pub z_index: Option<f64>,
    /// Skip drawing this node (it still occupies its place in batches).
    pub hidden: Option<bool>,
    /// Render with the highlight treatment.
    pub highlighted: Option<bool>,
    /// Always show the label regardless of label density decisions.
    pub force_label: Option<bool>,
}

impl NodeAttributes {
    /// Sets both position fields.
    #[must_use]
    pub fn with_position(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    /// Sets the size field.
    #[must_use]
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the color field.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Sets the label field.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the kind tag.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Sets the z-index field.
    #[must_use]
    pub fn with_z_index(mut self, z_index: f64) -> Self {
        self.z_index = Some(z_index);
        self
    }

    /// Sets the hidden flag.
    #[must_use]
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = Some(hidden);
        self
    }

    /// Sets the highlighted flag.
    #[must_use]
    pub fn with_highlighted(mut self, highlighted: bool) -> Self {
        self.highlighted = Some(highlighted);
        self
    }

    /// Sets the force-label flag.
    #[must_use]
    pub fn with_force_label(mut self, force_label: bool) -> Self {
        self.force_label = Some(force_label);
        self
    }
}

/// Raw display-oriented attributes of an edge, all optional.
///
/// Unlike nodes, edges carry no position of their own; they are drawn
/// between their endpoints' resolved positions.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EdgeAttributes {
    /// Edge thickness in pixels at zoom 1.
    pub size: Option<f64>,
    /// Stroke color.
    pub color: Option<Color>,
    /// Label text; empty strings resolve to no label.
    pub label: Option<String>,
    /// Entity kind tag selecting the draw program (e.g. `"line"`).
    pub kind: Option<String>,
    /// Paint order within the edge batch.
    pub z_index: Option<f64>,
    /// Skip drawing this edge.
    pub hidden: Option<bool>,
    /// Always show the label regardless of label density decisions.
    pub force_label: Option<bool>,
}

impl EdgeAttributes {
    /// Sets the size field.
    #[must_use]
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    /// Sets the color field.
    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    /// Sets the label field.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the kind tag.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    /// Sets the z-index field.
    #[must_use]
    pub fn with_z_index(mut self, z_index: f64) -> Self {
        self.z_index = Some(z_index);
        self
    }

    /// Sets the hidden flag.
    #[must_use]
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = Some(hidden);
        self
    }

    /// Sets the force-label flag.
    #[must_use]
    pub fn with_force_label(mut self, force_label: bool) -> Self {
        self.force_label = Some(force_label);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_only_touch_their_field() {
        let attributes = NodeAttributes::default().with_position(1.0, 2.0).with_size(4.0);
        assert_eq!(attributes.x, Some(1.0));
        assert_eq!(attributes.y, Some(2.0));
        assert_eq!(attributes.size, Some(4.0));
        assert_eq!(attributes.color, None);
        assert_eq!(attributes.kind, None);
    }

    #[test]
    fn default_records_are_fully_unset() {
        assert_eq!(NodeAttributes::default(), NodeAttributes::default());
        let edge = EdgeAttributes::default();
        assert!(edge.size.is_none() && edge.color.is_none() && edge.kind.is_none());
    }
}
