// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Camera: a bounded, observable camera over framed graph space.
//!
//! [`Camera`] owns a [`CameraState`] (`{x, y, angle, ratio}` from
//! `canopy_projection`) and is the only writer of it. State changes go
//! through [`Camera::set_state`] with a partial [`CameraUpdate`]: each
//! provided field is validated independently (non-finite values and
//! non-positive ratios are dropped, never errors), the zoom ratio is clamped
//! to configured bounds, and listeners are notified only when the resulting
//! state differs from the previous one in at least one field.
//!
//! Animated transitions interpolate toward a target update with an easing
//! function from `canopy_timing`, one step per host frame via an injected
//! [`FrameScheduler`](canopy_timing::FrameScheduler).
//!
//! ## Quick Start
//!
//! ```rust
//! use canopy_camera::{Camera, CameraUpdate};
//! use canopy_timing::ManualFrameScheduler;
//! use std::rc::Rc;
//!
//! let scheduler = Rc::new(ManualFrameScheduler::new());
//! let mut camera = Camera::new(scheduler);
//!
//! camera.set_ratio_bounds(Some(0.1), Some(10.0));
//! camera.on_updated(Box::new(|state| {
//!     // react to the new state, e.g. schedule a render
//!     let _ = state.ratio;
//! }));
//!
//! camera.set_state(CameraUpdate::default().with_ratio(100.0));
//! assert_eq!(camera.state().ratio, 10.0); // clamped to the max bound
//! ```
//!
//! Disabling a camera turns `set_state` into a silent no-op, which lets an
//! embedder suspend programmatic camera control (for example while an
//! external animation drives the view) without every caller branching.
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod animate;
mod camera;

pub use animate::{AnimateOptions, CameraUpdate};
pub use camera::{Camera, ListenerId, UpdateListener};

pub use canopy_projection::CameraState;
