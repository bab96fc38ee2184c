// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty tracking and frame coalescing.

use alloc::rc::Rc;
use core::cell::Cell;

use canopy_timing::{FrameScheduler, FrameToken};

/// How much reprocessing the next frame owes.
///
/// Levels only escalate between frames: marking [`Soft`](Self::Soft) over
/// an already [`Full`](Self::Full) state leaves it `Full`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum DirtyLevel {
    /// Caches match the graph; rendering alone suffices.
    #[default]
    Clean,
    /// Attribute values changed but the set of entities and kinds did not:
    /// reprocess reusing existing batch allocations.
    Soft,
    /// Entity membership, kinds, or anything affecting counts and extents
    /// changed: reprocess from scratch.
    Full,
}

/// The engine's shared scheduling state: one dirty level and at most one
/// pending frame.
///
/// Held in an [`Rc`] so the camera-update listener can request frames
/// while the engine owns the camera. All state lives in [`Cell`]s; the
/// planner never needs `&mut`.
pub(crate) struct FramePlanner {
    scheduler: Rc<dyn FrameScheduler>,
    pending: Cell<Option<FrameToken>>,
    dirty: Cell<DirtyLevel>,
}

impl FramePlanner {
    pub(crate) fn new(scheduler: Rc<dyn FrameScheduler>) -> Self {
        Self {
            scheduler,
            pending: Cell::new(None),
            dirty: Cell::new(DirtyLevel::Clean),
        }
    }

    /// Raises the dirty level, never lowering it.
    pub(crate) fn mark(&self, level: DirtyLevel) {
        self.dirty.set(self.dirty.get().max(level));
    }

    pub(crate) fn dirty(&self) -> DirtyLevel {
        self.dirty.get()
    }

    pub(crate) fn clear_dirty(&self) {
        self.dirty.set(DirtyLevel::Clean);
    }

    /// Schedules a frame unless one is already pending.
    pub(crate) fn request(&self) {
        if self.pending.get().is_none() {
            self.pending.set(Some(self.scheduler.schedule()));
        }
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.pending.get().is_some()
    }

    /// Forgets the pending frame without cancelling it, for when the frame
    /// has fired and is being serviced.
    pub(crate) fn take_pending(&self) -> Option<FrameToken> {
        self.pending.take()
    }

    /// Cancels the pending frame, if any: the work it stood for is being
    /// done right now.
    pub(crate) fn cancel_pending(&self) {
        if let Some(token) = self.pending.take() {
            self.scheduler.cancel(token);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_timing::ManualFrameScheduler;

    #[test]
    fn dirty_levels_escalate_and_never_downgrade() {
        let planner = FramePlanner::new(Rc::new(ManualFrameScheduler::new()));
        assert_eq!(planner.dirty(), DirtyLevel::Clean);

        planner.mark(DirtyLevel::Soft);
        assert_eq!(planner.dirty(), DirtyLevel::Soft);

        planner.mark(DirtyLevel::Full);
        planner.mark(DirtyLevel::Soft);
        assert_eq!(planner.dirty(), DirtyLevel::Full);

        planner.clear_dirty();
        assert_eq!(planner.dirty(), DirtyLevel::Clean);
    }

    #[test]
    fn repeated_requests_coalesce_into_one_frame() {
        let scheduler = Rc::new(ManualFrameScheduler::new());
        let planner = FramePlanner::new(scheduler.clone());

        planner.request();
        planner.request();
        planner.request();

        assert_eq!(scheduler.pending(), 1);
        assert!(planner.is_pending());
    }

    #[test]
    fn cancel_pending_releases_the_host_frame() {
        let scheduler = Rc::new(ManualFrameScheduler::new());
        let planner = FramePlanner::new(scheduler.clone());

        planner.request();
        let token = planner.take_pending();
        assert!(token.is_some());
        // Taking acknowledges the fired frame without touching the host.
        assert_eq!(scheduler.pending(), 1);

        planner.request();
        planner.cancel_pending();
        assert!(!planner.is_pending());
        assert_eq!(scheduler.pending(), 1);
    }
}
