// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Engine: the graph rendering engine tying the workspace together.
//!
//! [`Engine`] reads a host graph through
//! [`GraphSource`](canopy_graph::GraphSource), resolves every node and
//! edge into display data (`canopy_display`), normalizes positions into
//! framed space and projects them through the camera (`canopy_projection`,
//! `canopy_camera`), and drives registered draw programs
//! (`canopy_program`) against an abstract [`RenderSurface`].
//!
//! The engine never renders spontaneously. Mutations, camera moves, and
//! setting changes *schedule* a frame through the injected
//! [`FrameScheduler`](canopy_timing::FrameScheduler) and record how much
//! of the pipeline it must rerun (a [`DirtyLevel`]); the host services the
//! frame by calling [`Engine::frame`]. Any number of invalidations
//! between two frames coalesce into one request.
//!
//! ## Quick Start
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use canopy_display::NodeDisplayData;
//! use canopy_engine::{Engine, Settings};
//! use canopy_graph::{MemoryGraph, NodeAttributes};
//! use canopy_program::{NodeProgram, RenderParams, RenderSurface};
//! use canopy_timing::ManualFrameScheduler;
//! use kurbo::{Rect, Size};
//!
//! struct NullNodes;
//!
//! impl NodeProgram for NullNodes {
//!     fn allocate(&mut self, _capacity: usize) {}
//!     fn process(&mut self, _data: &NodeDisplayData, _hidden: bool, _index: usize) {}
//!     fn bind(&mut self) {}
//!     fn buffer_data(&mut self) {}
//!     fn render(&mut self, _params: &RenderParams) {}
//! }
//!
//! struct Window;
//!
//! impl RenderSurface for Window {
//!     fn dimensions(&self) -> Size {
//!         Size::new(800.0, 600.0)
//!     }
//!
//!     fn clear(&mut self) {}
//! }
//!
//! let mut graph = MemoryGraph::new();
//! graph.add_node("a", NodeAttributes::default().with_position(0.0, 0.0));
//! graph.add_node("b", NodeAttributes::default().with_position(10.0, 0.0));
//!
//! let scheduler = Rc::new(ManualFrameScheduler::new());
//! let mut engine = Engine::<MemoryGraph>::new(scheduler, Settings::default())?;
//! engine.register_node_program("circle", Box::new(NullNodes));
//!
//! let mut window = Window;
//! engine.refresh(&graph, &mut window)?;
//!
//! let info = engine.debug_info();
//! assert_eq!(info.node_count, 2);
//! assert_eq!(info.graph_extent, Rect::new(0.0, 0.0, 10.0, 0.0));
//! # Ok::<(), canopy_engine::EngineError<String, String>>(())
//! ```
//!
//! From there, hosts mutate the graph and forward the resulting
//! [`GraphEvent`](canopy_graph::GraphEvent)s with
//! [`Engine::apply_graph_event`], then call [`Engine::frame`] whenever
//! their scheduler fires.
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod engine;
mod error;
mod process;
mod render;
mod schedule;
mod settings;
mod sync;
mod view;

pub use engine::{Engine, EngineDebugInfo, HookId, RenderHook};
pub use error::{EngineError, ProcessError, SettingsError, SurfaceError};
pub use schedule::DirtyLevel;
pub use settings::Settings;
pub use view::ViewOverrides;
