// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame scheduling capability.

use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

/// An opaque handle for one scheduled frame request.
///
/// Tokens are only meaningful to the scheduler that issued them. A token
/// becomes stale once the request fires or is cancelled; cancelling a stale
/// token is a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameToken(u64);

impl FrameToken {
    /// Builds a token from a raw value.
    ///
    /// Host scheduler implementations use this to wrap their own callback
    /// handles.
    #[must_use]
    #[inline]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw value of this token.
    #[must_use]
    #[inline]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// The capability of running a callback before the next paint.
///
/// Hosts implement this on top of their frame callback mechanism; tests use
/// [`ManualFrameScheduler`]. Methods take `&self` so one scheduler instance
/// can be shared behind an `Rc` by every component of a render pipeline.
///
/// A scheduler may have several requests outstanding at once (for example a
/// render frame and a camera animation step); it is the host's job to run
/// all of them in request order when its frame fires.
pub trait FrameScheduler {
    /// Requests a frame and returns the token identifying the request.
    fn schedule(&self) -> FrameToken;

    /// Cancels a previously scheduled request.
    ///
    /// Cancelling a token that already fired (or was already cancelled) is
    /// a no-op.
    fn cancel(&self, token: FrameToken);
}

/// A deterministic [`FrameScheduler`] driven by hand.
///
/// Requests accumulate until the caller drains them, standing in for the
/// host's "frame fired" moment. Useful both for tests and for embedders
/// that pump frames from their own loop.
///
/// # Example
///
/// ```rust
/// use canopy_timing::{FrameScheduler, ManualFrameScheduler};
///
/// let scheduler = ManualFrameScheduler::new();
/// let a = scheduler.schedule();
/// let b = scheduler.schedule();
/// scheduler.cancel(a);
/// assert_eq!(scheduler.drain(), vec![b]);
/// ```
#[derive(Debug, Default)]
pub struct ManualFrameScheduler {
    next: Cell<u64>,
    pending: RefCell<Vec<FrameToken>>,
}

impl ManualFrameScheduler {
    /// Creates a scheduler with no pending requests.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of pending requests.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Returns `true` if the given request is still pending.
    #[must_use]
    pub fn is_pending(&self, token: FrameToken) -> bool {
        self.pending.borrow().contains(&token)
    }

    /// Fires the frame: removes and returns all pending requests in the
    /// order they were scheduled.
    pub fn drain(&self) -> Vec<FrameToken> {
        self.pending.take()
    }
}

impl FrameScheduler for ManualFrameScheduler {
    fn schedule(&self) -> FrameToken {
        let token = FrameToken(self.next.get());
        self.next.set(self.next.get() + 1);
        self.pending.borrow_mut().push(token);
        token
    }

    fn cancel(&self, token: FrameToken) {
        self.pending.borrow_mut().retain(|t| *t != token);
    }
}
