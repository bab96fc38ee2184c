// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Canopy Program: the contracts between the render engine and its drawing
//! backends.
//!
//! Canopy draws nothing itself. Each entity kind (`"circle"` nodes,
//! `"line"` edges, whatever an embedder invents) is handled by a *draw
//! program* the host registers: a batch-oriented object that receives
//! resolved display data during reprocessing and draws its whole batch once
//! per frame. This crate defines:
//!
//! - [`NodeProgram`] / [`EdgeProgram`]: The per-kind batch capability —
//!   `allocate`, `process`, `bind`, `buffer_data`, `render`.
//! - [`RenderParams`]: The per-frame uniforms handed to `render` (projection
//!   matrix, viewport size, camera ratio, size-correction factors).
//! - [`ProgramRegistry`]: Kind-tag lookup preserving registration order,
//!   which is also the order batches are drawn in.
//! - [`RenderSurface`]: The minimal surface the engine needs — pixel
//!   dimensions, device pixel ratio, and a clear operation.
//!
//! The engine guarantees programs a strict call discipline per frame:
//! `allocate(n)` (skipped in soft reprocessing, which reuses buffers), then
//! `process` with contiguous indices `0..n` for that kind, then at render
//! time `bind`, `buffer_data`, `render(&params)`.
//!
//! ## Example
//!
//! ```rust
//! use canopy_display::NodeDisplayData;
//! use canopy_program::{NodeProgram, ProgramRegistry, RenderParams};
//!
//! #[derive(Default)]
//! struct CountingProgram {
//!     processed: usize,
//! }
//!
//! impl NodeProgram for CountingProgram {
//!     fn allocate(&mut self, _capacity: usize) {
//!         self.processed = 0;
//!     }
//!     fn process(&mut self, _data: &NodeDisplayData, _hidden: bool, _index: usize) {
//!         self.processed += 1;
//!     }
//!     fn bind(&mut self) {}
//!     fn buffer_data(&mut self) {}
//!     fn render(&mut self, _params: &RenderParams) {}
//! }
//!
//! let mut registry: ProgramRegistry<dyn NodeProgram> = ProgramRegistry::new();
//! registry.register("circle", Box::new(CountingProgram::default()));
//! assert_eq!(registry.index_of("circle"), Some(0));
//! assert_eq!(registry.index_of("square"), None);
//! ```
//!
//! This crate is `no_std` and uses `alloc`. It does not depend on `std`.

#![no_std]

extern crate alloc;

mod program;
mod registry;
mod surface;

pub use program::{EdgeProgram, NodeProgram, RenderParams};
pub use registry::ProgramRegistry;
pub use surface::RenderSurface;
