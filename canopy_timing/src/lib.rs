// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Timing: host-agnostic frame scheduling and easing primitives.
//!
//! Canopy never spins its own event loop. Components that need to run "before
//! the next paint" (the render engine, camera animations) ask an injected
//! [`FrameScheduler`] for a frame and the host calls back into them when that
//! frame fires. This crate provides:
//!
//! - [`FrameScheduler`]: The capability trait hosts implement on top of
//!   whatever frame callback mechanism they have (an animation-frame API, a
//!   compositor vsync signal, a game loop tick).
//! - [`FrameToken`]: An opaque handle identifying one scheduled request, used
//!   to cancel it before it fires.
//! - [`ManualFrameScheduler`]: A deterministic scheduler for tests and
//!   hosts that want to drive frames by hand.
//! - [`easing`]: Easing functions for animated transitions, all pure
//!   `f64 -> f64` maps over normalized time.
//!
//! ## Quick Start
//!
//! ```rust
//! use canopy_timing::{FrameScheduler, ManualFrameScheduler};
//!
//! let scheduler = ManualFrameScheduler::new();
//!
//! // Something requests work before the next paint.
//! let token = scheduler.schedule();
//! assert_eq!(scheduler.pending(), 1);
//!
//! // The host's frame callback fires: drain the requests and run them.
//! let fired = scheduler.drain();
//! assert_eq!(fired, vec![token]);
//! assert_eq!(scheduler.pending(), 0);
//! ```
//!
//! Scheduling methods take `&self` so a single scheduler can be shared
//! behind an `alloc::rc::Rc` by several components of one render pipeline.
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

pub mod easing;
mod scheduler;

pub use scheduler::{FrameScheduler, FrameToken, ManualFrameScheduler};
