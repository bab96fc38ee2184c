// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Camera state.

/// The observable state of a graph camera.
///
/// Positions are in framed (unit) space, `angle` is in radians, and `ratio`
/// is the zoom factor: the edge length of the framed-space square the
/// viewport shows, so values above 1 are zoomed out and values below 1 are
/// zoomed in. `ratio` must stay strictly positive; the camera state machine
/// in `canopy_camera` enforces that along with any configured bounds.
///
/// Equality is exact field-wise equality with no epsilon, which is what
/// change detection in the camera relies on.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraState {
    /// Horizontal center of the view, in framed space.
    pub x: f64,
    /// Vertical center of the view, in framed space.
    pub y: f64,
    /// View rotation in radians, counterclockwise.
    pub angle: f64,
    /// Zoom factor, strictly positive.
    pub ratio: f64,
}

impl Default for CameraState {
    /// The rest pose: looking at the framed-space center, unrotated, at
    /// zoom 1.
    fn default() -> Self {
        Self {
            x: 0.5,
            y: 0.5,
            angle: 0.0,
            ratio: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_looks_at_framed_center() {
        let state = CameraState::default();
        assert_eq!(state.x, 0.5);
        assert_eq!(state.y, 0.5);
        assert_eq!(state.angle, 0.0);
        assert_eq!(state.ratio, 1.0);
    }

    #[test]
    fn equality_is_exact() {
        let a = CameraState::default();
        let mut b = a;
        assert_eq!(a, b);
        b.x += f64::EPSILON;
        assert_ne!(a, b);
    }
}
