// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The engine type: ownership, registration, queries, and teardown.

use alloc::boxed::Box;
use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use kurbo::{Affine, Rect, Size};
use smallvec::SmallVec;

use canopy_camera::{Camera, ListenerId};
use canopy_display::{EdgeDisplayData, EdgeReducer, NodeDisplayData, NodeReducer};
use canopy_graph::GraphSource;
use canopy_program::{EdgeProgram, NodeProgram, ProgramRegistry};
use canopy_projection::{CameraState, GraphFrame};
use canopy_timing::FrameScheduler;

use crate::error::SettingsError;
use crate::schedule::{DirtyLevel, FramePlanner};
use crate::settings::Settings;

/// Identifier of a registered render hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HookId(u64);

/// A callback run around every render pass.
pub type RenderHook = Box<dyn FnMut()>;

/// The render scheduler at the center of a Canopy pipeline.
///
/// The engine owns the camera, the per-entity display-data caches, the
/// draw-program registries, and the dirty/frame bookkeeping. It does *not*
/// own the graph or the render surface: both are borrowed per call, which
/// is what makes swapping the graph a pure cache reset followed by one
/// synchronous refresh.
///
/// A typical host wires it up once:
///
/// 1. build it with a shared [`FrameScheduler`] and validated [`Settings`];
/// 2. register one draw program per entity kind;
/// 3. call [`set_graph`](Self::set_graph) (or
///    [`refresh`](Self::refresh)) to populate caches and draw;
/// 4. forward graph mutations through
///    [`apply_graph_event`](Self::apply_graph_event) and service scheduled
///    frames by calling [`frame`](Self::frame).
///
/// Camera updates redraw automatically: construction installs a camera
/// listener that requests a coalesced render-only frame on every accepted
/// state change.
pub struct Engine<G: GraphSource> {
    pub(crate) settings: Settings,
    pub(crate) camera: Camera,
    pub(crate) camera_listener: Option<ListenerId>,
    pub(crate) planner: Rc<FramePlanner>,
    pub(crate) node_programs: ProgramRegistry<dyn NodeProgram>,
    pub(crate) edge_programs: ProgramRegistry<dyn EdgeProgram>,
    pub(crate) node_reducer: Option<NodeReducer<G::NodeKey>>,
    pub(crate) edge_reducer: Option<EdgeReducer<G::EdgeKey>>,
    pub(crate) node_data: HashMap<G::NodeKey, NodeDisplayData>,
    pub(crate) edge_data: HashMap<G::EdgeKey, EdgeDisplayData>,
    pub(crate) graph_extent: Rect,
    pub(crate) custom_extent: Option<Rect>,
    pub(crate) graph_frame: GraphFrame,
    pub(crate) viewport: Size,
    pub(crate) matrix: Affine,
    pub(crate) inverse_matrix: Affine,
    pub(crate) correction_ratio: f64,
    pub(crate) size_scale: f64,
    pub(crate) hovered_node: Option<G::NodeKey>,
    pub(crate) hovered_edge: Option<G::EdgeKey>,
    pub(crate) forced_label_nodes: Vec<G::NodeKey>,
    pub(crate) forced_label_edges: Vec<G::EdgeKey>,
    pub(crate) before_render: SmallVec<[(HookId, RenderHook); 1]>,
    pub(crate) after_render: SmallVec<[(HookId, RenderHook); 1]>,
    pub(crate) next_hook: u64,
    pub(crate) killed: bool,
}

impl<G: GraphSource> Engine<G> {
    /// Creates an engine sharing the host's frame scheduler.
    ///
    /// Validates `settings` before anything is built; the camera starts at
    /// the default state with its ratio bounds taken from the settings.
    pub fn new(
        scheduler: Rc<dyn FrameScheduler>,
        settings: Settings,
    ) -> Result<Self, SettingsError> {
        settings.validate()?;
        let planner = Rc::new(FramePlanner::new(Rc::clone(&scheduler)));
        let mut camera = Camera::new(scheduler);
        camera.set_ratio_bounds(settings.min_camera_ratio, settings.max_camera_ratio);
        let render_requests = Rc::clone(&planner);
        let camera_listener = camera.on_updated(Box::new(move |_| render_requests.request()));
        Ok(Self {
            settings,
            camera,
            camera_listener: Some(camera_listener),
            planner,
            node_programs: ProgramRegistry::new(),
            edge_programs: ProgramRegistry::new(),
            node_reducer: None,
            edge_reducer: None,
            node_data: HashMap::new(),
            edge_data: HashMap::new(),
            graph_extent: Rect::ZERO,
            custom_extent: None,
            graph_frame: GraphFrame::IDENTITY,
            viewport: Size::ZERO,
            matrix: Affine::IDENTITY,
            inverse_matrix: Affine::IDENTITY,
            correction_ratio: 1.0,
            size_scale: 1.0,
            hovered_node: None,
            hovered_edge: None,
            forced_label_nodes: Vec::new(),
            forced_label_edges: Vec::new(),
            before_render: SmallVec::new(),
            after_render: SmallVec::new(),
            next_hook: 0,
            killed: false,
        })
    }

    /// Returns the camera.
    #[must_use]
    #[inline]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Returns the camera for mutation.
    ///
    /// Accepted state changes schedule a coalesced redraw through the
    /// listener installed at construction.
    #[inline]
    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    /// Registers the draw program handling nodes of `kind` and returns its
    /// index.
    ///
    /// Registration order is draw order. The new program takes effect on
    /// the next reprocess, which this schedules.
    ///
    /// # Panics
    ///
    /// Panics if a node program for `kind` is already registered.
    pub fn register_node_program(
        &mut self,
        kind: impl Into<String>,
        program: Box<dyn NodeProgram>,
    ) -> usize {
        let index = self.node_programs.register(kind, program);
        self.planner.mark(DirtyLevel::Full);
        self.planner.request();
        index
    }

    /// Registers the draw program handling edges of `kind` and returns its
    /// index.
    ///
    /// # Panics
    ///
    /// Panics if an edge program for `kind` is already registered.
    pub fn register_edge_program(
        &mut self,
        kind: impl Into<String>,
        program: Box<dyn EdgeProgram>,
    ) -> usize {
        let index = self.edge_programs.register(kind, program);
        self.planner.mark(DirtyLevel::Full);
        self.planner.request();
        index
    }

    /// Installs or clears the node reducer and schedules a full reprocess.
    pub fn set_node_reducer(&mut self, reducer: Option<NodeReducer<G::NodeKey>>) {
        self.node_reducer = reducer;
        self.planner.mark(DirtyLevel::Full);
        self.planner.request();
    }

    /// Installs or clears the edge reducer and schedules a full reprocess.
    pub fn set_edge_reducer(&mut self, reducer: Option<EdgeReducer<G::EdgeKey>>) {
        self.edge_reducer = reducer;
        self.planner.mark(DirtyLevel::Full);
        self.planner.request();
    }

    /// Returns the current settings.
    #[must_use]
    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Edits the settings through `f`, validating the result before
    /// applying it.
    ///
    /// On success the camera ratio is re-clamped against the new bounds, a
    /// full reprocess is marked, and a frame is scheduled. On failure
    /// nothing changes.
    pub fn update_settings(&mut self, f: impl FnOnce(&mut Settings)) -> Result<(), SettingsError> {
        let mut next = self.settings.clone();
        f(&mut next);
        next.validate()?;
        self.settings = next;
        self.camera
            .set_ratio_bounds(self.settings.min_camera_ratio, self.settings.max_camera_ratio);
        self.planner.mark(DirtyLevel::Full);
        self.planner.request();
        Ok(())
    }

    /// Returns the bounding box of resolved node positions, in raw graph
    /// coordinates, as of the last full reprocess.
    #[must_use]
    #[inline]
    pub fn graph_extent(&self) -> Rect {
        self.graph_extent
    }

    /// Returns the custom bounding box override, if one is set.
    #[must_use]
    #[inline]
    pub fn custom_extent(&self) -> Option<Rect> {
        self.custom_extent
    }

    /// Overrides (or, with `None`, restores) the extent used to frame the
    /// graph, and schedules a full reprocess.
    ///
    /// Clearing the override restores the derived-extent framing exactly.
    pub fn set_custom_extent(&mut self, extent: Option<Rect>) {
        self.custom_extent = extent;
        self.planner.mark(DirtyLevel::Full);
        self.planner.request();
    }

    /// Returns a node's cached display data.
    #[must_use]
    pub fn node_display_data(&self, key: &G::NodeKey) -> Option<&NodeDisplayData> {
        self.node_data.get(key)
    }

    /// Returns an edge's cached display data.
    #[must_use]
    pub fn edge_display_data(&self, key: &G::EdgeKey) -> Option<&EdgeDisplayData> {
        self.edge_data.get(key)
    }

    /// Returns the hovered node, if any.
    #[must_use]
    #[inline]
    pub fn hovered_node(&self) -> Option<&G::NodeKey> {
        self.hovered_node.as_ref()
    }

    /// Sets or clears the hovered node and schedules a redraw.
    pub fn set_hovered_node(&mut self, key: Option<G::NodeKey>) {
        if self.hovered_node != key {
            self.hovered_node = key;
            self.planner.request();
        }
    }

    /// Returns the hovered edge, if any.
    #[must_use]
    #[inline]
    pub fn hovered_edge(&self) -> Option<&G::EdgeKey> {
        self.hovered_edge.as_ref()
    }

    /// Sets or clears the hovered edge and schedules a redraw.
    pub fn set_hovered_edge(&mut self, key: Option<G::EdgeKey>) {
        if self.hovered_edge != key {
            self.hovered_edge = key;
            self.planner.request();
        }
    }

    /// Returns the nodes whose labels must always be laid out, as of the
    /// last reprocess.
    #[must_use]
    #[inline]
    pub fn forced_label_nodes(&self) -> &[G::NodeKey] {
        &self.forced_label_nodes
    }

    /// Returns the edges whose labels must always be laid out, as of the
    /// last reprocess.
    #[must_use]
    #[inline]
    pub fn forced_label_edges(&self) -> &[G::EdgeKey] {
        &self.forced_label_edges
    }

    /// Returns the cached camera size-scaling factor, `sqrt(ratio)` as of
    /// the last render pass.
    #[must_use]
    #[inline]
    pub fn size_scale(&self) -> f64 {
        self.size_scale
    }

    /// Marks a full reprocess and schedules a coalesced frame.
    ///
    /// Scheduling while a frame is already pending is a no-op.
    pub fn schedule_refresh(&self) {
        self.planner.mark(DirtyLevel::Full);
        self.planner.request();
    }

    /// Registers a hook run at the start of every render pass.
    pub fn on_before_render(&mut self, hook: RenderHook) -> HookId {
        let id = HookId(self.next_hook);
        self.next_hook += 1;
        self.before_render.push((id, hook));
        id
    }

    /// Registers a hook run at the end of every render pass.
    pub fn on_after_render(&mut self, hook: RenderHook) -> HookId {
        let id = HookId(self.next_hook);
        self.next_hook += 1;
        self.after_render.push((id, hook));
        id
    }

    /// Removes a render hook. Returns `false` for unknown ids.
    pub fn remove_hook(&mut self, id: HookId) -> bool {
        let before = self.before_render.len() + self.after_render.len();
        self.before_render.retain(|(hook_id, _)| *hook_id != id);
        self.after_render.retain(|(hook_id, _)| *hook_id != id);
        before != self.before_render.len() + self.after_render.len()
    }

    /// Returns a snapshot of the engine's internals for debugging.
    #[must_use]
    pub fn debug_info(&self) -> EngineDebugInfo {
        EngineDebugInfo {
            camera: self.camera.state(),
            viewport: self.viewport,
            graph_extent: self.graph_extent,
            custom_extent: self.custom_extent,
            node_count: self.node_data.len(),
            edge_count: self.edge_data.len(),
            dirty: self.planner.dirty(),
            frame_pending: self.planner.is_pending(),
            size_scale: self.size_scale,
            correction_ratio: self.correction_ratio,
            matrix: self.matrix,
            killed: self.killed,
        }
    }

    /// Releases everything the engine holds on behalf of the host.
    ///
    /// Removes the camera listener, cancels any in-flight camera animation
    /// and pending frame, and clears caches, hover state, forced-label
    /// lists, and hooks. Idempotent: calling it again does nothing.
    pub fn kill(&mut self) {
        if self.killed {
            return;
        }
        self.killed = true;
        if let Some(id) = self.camera_listener.take() {
            self.camera.remove_listener(id);
        }
        self.camera.cancel_animation();
        self.planner.cancel_pending();
        self.planner.clear_dirty();
        self.node_data.clear();
        self.edge_data.clear();
        self.hovered_node = None;
        self.hovered_edge = None;
        self.forced_label_nodes.clear();
        self.forced_label_edges.clear();
        self.before_render.clear();
        self.after_render.clear();
    }

    /// Returns `true` once [`kill`](Self::kill) has run.
    #[must_use]
    #[inline]
    pub fn is_killed(&self) -> bool {
        self.killed
    }

    /// The raw-unit dimensions of the extent currently framing the graph.
    pub(crate) fn graph_dimensions(&self) -> Size {
        self.custom_extent.unwrap_or(self.graph_extent).size()
    }

    pub(crate) fn run_before_hooks(&mut self) {
        for (_, hook) in self.before_render.iter_mut() {
            hook();
        }
    }

    pub(crate) fn run_after_hooks(&mut self) {
        for (_, hook) in self.after_render.iter_mut() {
            hook();
        }
    }
}

impl<G: GraphSource> fmt::Debug for Engine<G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Engine")
            .field("camera", &self.camera.state())
            .field("node_count", &self.node_data.len())
            .field("edge_count", &self.edge_data.len())
            .field("node_programs", &self.node_programs)
            .field("edge_programs", &self.edge_programs)
            .field("dirty", &self.planner.dirty())
            .field("killed", &self.killed)
            .finish_non_exhaustive()
    }
}

/// A point-in-time snapshot of the engine's internals.
///
/// Everything here is a copy; holding one does not borrow the engine.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineDebugInfo {
    /// Current camera state.
    pub camera: CameraState,
    /// Surface dimensions as of the last render pass.
    pub viewport: Size,
    /// Derived node extent as of the last full reprocess.
    pub graph_extent: Rect,
    /// Custom extent override, if set.
    pub custom_extent: Option<Rect>,
    /// Cached node entries.
    pub node_count: usize,
    /// Cached edge entries.
    pub edge_count: usize,
    /// Dirty level awaiting the next frame.
    pub dirty: DirtyLevel,
    /// Whether a coalesced frame is pending.
    pub frame_pending: bool,
    /// Cached `sqrt(ratio)` size-scaling factor.
    pub size_scale: f64,
    /// Correction ratio as of the last render pass.
    pub correction_ratio: f64,
    /// Forward projection matrix as of the last render pass.
    pub matrix: Affine,
    /// Whether the engine has been torn down.
    pub killed: bool,
}
