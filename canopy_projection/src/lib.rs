// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Projection: camera state and coordinate-space math for 2D graph
//! rendering.
//!
//! A graph renderer juggles three coordinate spaces:
//!
//! - **Graph space**: raw node positions, in whatever units the data uses.
//! - **Framed space**: graph space normalized into the unit square, centered
//!   at `(0.5, 0.5)`. The camera lives here.
//! - **Viewport space**: device pixels, origin top-left.
//!
//! This crate provides the pure math between them:
//!
//! - [`CameraState`]: The `{x, y, angle, ratio}` value a camera observes and
//!   mutates; positions in framed space, `angle` in radians, `ratio` the zoom
//!   factor (larger means zoomed out).
//! - [`GraphFrame`]: The normalization from a graph bounding box into framed
//!   space, with an exact inverse.
//! - [`matrix_from_camera`]: The affine transform from framed space to
//!   viewport pixels for a camera state, viewport, graph proportions, and
//!   padding, or its exact algebraic inverse.
//! - [`matrix_impact`]: The uniform scale a projection matrix applies beyond
//!   the camera's own zoom, used to keep rendered sizes stable under
//!   aspect-ratio fitting.
//! - [`project_point`] / [`project_rect`]: Matrix application with
//!   degenerate results coerced to finite values.
//!
//! ## Quick Start
//!
//! ```rust
//! use canopy_projection::{CameraState, GraphFrame, matrix_from_camera, project_point};
//! use kurbo::{Point, Rect, Size};
//!
//! // Normalize a 10x10 graph into framed space.
//! let frame = GraphFrame::from_extent(Rect::new(0.0, 0.0, 10.0, 10.0));
//! let framed = frame.to_framed(Point::new(5.0, 5.0));
//! assert_eq!(framed, Point::new(0.5, 0.5));
//!
//! // The default camera looks at the framed center, so the graph center
//! // lands on the viewport center.
//! let camera = CameraState::default();
//! let viewport = Size::new(800.0, 600.0);
//! let matrix = matrix_from_camera(camera, viewport, Size::new(10.0, 10.0), 0.0, false);
//! assert_eq!(project_point(matrix, framed), Point::new(400.0, 300.0));
//! ```
//!
//! All functions here are stateless; the camera state machine that owns and
//! animates a [`CameraState`] lives in `canopy_camera`, and matrix caching
//! is the render engine's concern.
//!
//! This crate is `no_std`.

#![no_std]

mod frame;
mod matrix;
mod state;

pub use frame::GraphFrame;
pub use matrix::{matrix_from_camera, matrix_impact, project_point, project_rect};
pub use state::CameraState;
