// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine settings and their validation.

use alloc::string::String;

use peniko::Color;

use canopy_display::{EdgeDefaults, NodeDefaults};

use crate::error::SettingsError;

/// Configuration applied across reprocessing and rendering.
///
/// Settings are plain data; the engine validates a whole record before
/// applying it (see [`Settings::validate`]), so an invalid combination is
/// rejected without partially taking effect. Fields fall into three
/// groups:
///
/// - defaults filled into unset entity attributes during resolution;
/// - reprocessing policy (`z_index_ordering`);
/// - view policy (`stage_padding`, camera ratio bounds, the zero-size
///   surface escape hatch) and values consumed by UI-layer collaborators
///   through [`Engine::settings`](crate::Engine::settings)
///   (`label_density`).
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    /// Fill color for nodes without an explicit color.
    pub default_node_color: Color,
    /// Stroke color for edges without an explicit color.
    pub default_edge_color: Color,
    /// Kind tag for nodes without an explicit kind.
    pub default_node_kind: String,
    /// Kind tag for edges without an explicit kind.
    pub default_edge_kind: String,
    /// Size for nodes without an explicit size.
    pub default_node_size: f64,
    /// Thickness for edges without an explicit size.
    pub default_edge_size: f64,
    /// Sort entities by `z_index` before batching.
    ///
    /// Off by default: sorting costs a pass per reprocess and most graphs
    /// never set z-indices. Ties keep graph iteration order.
    pub z_index_ordering: bool,
    /// Pixels kept free between the fitted graph and every viewport edge.
    pub stage_padding: f64,
    /// Label density hint for label-placement collaborators.
    ///
    /// The engine validates it (must be non-negative) and hands it out via
    /// [`Engine::settings`](crate::Engine::settings); label layout itself
    /// happens outside this crate.
    pub label_density: f64,
    /// Lower bound applied to the camera ratio, when finite.
    pub min_camera_ratio: Option<f64>,
    /// Upper bound applied to the camera ratio, when finite.
    pub max_camera_ratio: Option<f64>,
    /// Substitute a 1-unit dimension for zero-sized surfaces instead of
    /// failing the render pass.
    pub allow_zero_sized_surface: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            default_node_color: Color::from_rgb8(0x99, 0x99, 0x99),
            default_edge_color: Color::from_rgb8(0xcc, 0xcc, 0xcc),
            default_node_kind: String::from("circle"),
            default_edge_kind: String::from("line"),
            default_node_size: 2.0,
            default_edge_size: 0.5,
            z_index_ordering: false,
            stage_padding: 0.0,
            label_density: 1.0,
            min_camera_ratio: None,
            max_camera_ratio: None,
            allow_zero_sized_surface: false,
        }
    }
}

impl Settings {
    /// Checks the record for invalid combinations.
    ///
    /// Fails when both camera ratio bounds are present with `max < min`,
    /// or when the label density is negative.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let (Some(min), Some(max)) = (self.min_camera_ratio, self.max_camera_ratio) {
            if max < min {
                return Err(SettingsError::CameraRatioBounds { min, max });
            }
        }
        if self.label_density < 0.0 {
            return Err(SettingsError::NegativeLabelDensity {
                value: self.label_density,
            });
        }
        Ok(())
    }

    /// The node-resolution defaults bundle derived from this record.
    #[must_use]
    pub fn node_defaults(&self) -> NodeDefaults {
        NodeDefaults {
            color: self.default_node_color,
            size: self.default_node_size,
            kind: self.default_node_kind.clone(),
        }
    }

    /// The edge-resolution defaults bundle derived from this record.
    #[must_use]
    pub fn edge_defaults(&self) -> EdgeDefaults {
        EdgeDefaults {
            color: self.default_edge_color,
            size: self.default_edge_size,
            kind: self.default_edge_kind.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_settings_validate() {
        assert_eq!(Settings::default().validate(), Ok(()));
    }

    #[test]
    fn inverted_ratio_bounds_are_rejected() {
        let settings = Settings {
            min_camera_ratio: Some(2.0),
            max_camera_ratio: Some(0.5),
            ..Settings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::CameraRatioBounds { min: 2.0, max: 0.5 })
        );
    }

    #[test]
    fn one_sided_ratio_bounds_validate() {
        let settings = Settings {
            min_camera_ratio: Some(0.1),
            max_camera_ratio: None,
            ..Settings::default()
        };
        assert_eq!(settings.validate(), Ok(()));
    }

    #[test]
    fn negative_label_density_is_rejected() {
        let settings = Settings {
            label_density: -0.5,
            ..Settings::default()
        };
        assert_eq!(
            settings.validate(),
            Err(SettingsError::NegativeLabelDensity { value: -0.5 })
        );
    }

    #[test]
    fn defaults_bundles_mirror_the_settings() {
        let settings = Settings {
            default_node_size: 4.0,
            default_edge_kind: String::from("arrow"),
            ..Settings::default()
        };
        assert_eq!(settings.node_defaults().size, 4.0);
        assert_eq!(settings.edge_defaults().kind, "arrow");
        assert_eq!(settings.node_defaults().kind, "circle");
    }
}
