// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Partial camera updates and animation options.

use canopy_projection::CameraState;
use canopy_timing::easing::{self, Easing};
use canopy_timing::FrameToken;

/// A partial camera state: only the provided fields are applied.
///
/// Used both for direct state sets and as the target of an animated
/// transition, where unspecified fields simply keep their current value.
///
/// # Example
///
/// ```rust
/// use canopy_camera::CameraUpdate;
///
/// let update = CameraUpdate::default().with_x(0.2).with_ratio(2.0);
/// assert_eq!(update.ratio, Some(2.0));
/// assert_eq!(update.angle, None);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraUpdate {
    /// New horizontal center, in framed space.
    pub x: Option<f64>,
    /// New vertical center, in framed space.
    pub y: Option<f64>,
    /// New rotation in radians.
    pub angle: Option<f64>,
    /// New zoom ratio; clamped to the camera's bounds on application.
    pub ratio: Option<f64>,
}

impl CameraUpdate {
    /// Sets the horizontal center field.
    #[must_use]
    pub fn with_x(mut self, x: f64) -> Self {
        self.x = Some(x);
        self
    }

    /// Sets the vertical center field.
    #[must_use]
    pub fn with_y(mut self, y: f64) -> Self {
        self.y = Some(y);
        self
    }

    /// Sets the rotation field.
    #[must_use]
    pub fn with_angle(mut self, angle: f64) -> Self {
        self.angle = Some(angle);
        self
    }

    /// Sets the zoom ratio field.
    #[must_use]
    pub fn with_ratio(mut self, ratio: f64) -> Self {
        self.ratio = Some(ratio);
        self
    }

    /// A full update carrying every field of `state`.
    #[must_use]
    pub fn from_state(state: CameraState) -> Self {
        Self {
            x: Some(state.x),
            y: Some(state.y),
            angle: Some(state.angle),
            ratio: Some(state.ratio),
        }
    }

    /// Returns `true` if no field is provided.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none() && self.angle.is_none() && self.ratio.is_none()
    }
}

/// Options for an animated camera transition.
#[derive(Clone, Copy, Debug)]
pub struct AnimateOptions {
    /// Total duration of the transition in milliseconds.
    pub duration_ms: f64,
    /// Easing applied to normalized time.
    pub easing: Easing,
}

impl Default for AnimateOptions {
    fn default() -> Self {
        Self {
            duration_ms: 250.0,
            easing: easing::quadratic_in_out,
        }
    }
}

/// An in-flight animated transition.
///
/// Interpolation always starts from the state captured when the animation
/// began, so repeated steps do not compound easing error.
#[derive(Debug)]
pub(crate) struct Animation {
    pub(crate) token: FrameToken,
    pub(crate) start_ms: f64,
    pub(crate) duration_ms: f64,
    pub(crate) easing: Easing,
    pub(crate) from: CameraState,
    pub(crate) target: CameraUpdate,
}

impl Animation {
    /// The partial state for normalized progress `k`, interpolating only the
    /// fields the target provides.
    pub(crate) fn step(&self, k: f64) -> CameraUpdate {
        let lerp = |from: f64, to: f64| from + (to - from) * k;
        CameraUpdate {
            x: self.target.x.map(|x| lerp(self.from.x, x)),
            y: self.target.y.map(|y| lerp(self.from.y, y)),
            angle: self.target.angle.map(|angle| lerp(self.from.angle, angle)),
            ratio: self.target.ratio.map(|ratio| lerp(self.from.ratio, ratio)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_state_provides_every_field() {
        let update = CameraUpdate::from_state(CameraState::default());
        assert!(!update.is_empty());
        assert_eq!(update.x, Some(0.5));
        assert_eq!(update.y, Some(0.5));
        assert_eq!(update.angle, Some(0.0));
        assert_eq!(update.ratio, Some(1.0));
    }

    #[test]
    fn step_interpolates_only_target_fields() {
        let animation = Animation {
            token: FrameToken::from_raw(0),
            start_ms: 0.0,
            duration_ms: 100.0,
            easing: easing::linear,
            from: CameraState::default(),
            target: CameraUpdate::default().with_ratio(3.0),
        };
        let halfway = animation.step(0.5);
        assert_eq!(halfway.ratio, Some(2.0));
        assert_eq!(halfway.x, None);
        assert_eq!(halfway.y, None);
        assert_eq!(halfway.angle, None);
    }
}
