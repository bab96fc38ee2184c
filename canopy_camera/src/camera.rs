// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The camera state machine.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::fmt;

use smallvec::SmallVec;

use canopy_projection::CameraState;
use canopy_timing::FrameScheduler;

use crate::animate::{AnimateOptions, Animation, CameraUpdate};

/// Identifier for a registered update listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// A callback invoked with the new state after an accepted change.
pub type UpdateListener = Box<dyn FnMut(&CameraState)>;

/// A bounded, observable camera over framed graph space.
///
/// The camera is the single writer of its [`CameraState`]. All mutation goes
/// through [`Camera::set_state`] (directly or via animations), which
/// validates fields, clamps the zoom ratio, records the previous state, and
/// notifies listeners exactly when the state actually changed.
///
/// Animations are host-driven: [`Camera::animate`] schedules a frame on the
/// injected [`FrameScheduler`], and the host calls
/// [`Camera::animation_frame`] when that frame fires. Each step applies an
/// interpolated state through the normal `set_state` path, so listeners see
/// animated and direct changes the same way.
pub struct Camera {
    current: CameraState,
    previous: Option<CameraState>,
    min_ratio: Option<f64>,
    max_ratio: Option<f64>,
    enabled: bool,
    listeners: SmallVec<[(ListenerId, UpdateListener); 1]>,
    next_listener: u64,
    scheduler: Rc<dyn FrameScheduler>,
    animation: Option<Animation>,
}

impl Camera {
    /// Creates a camera at the default state: looking at the framed center,
    /// unrotated, at zoom 1.
    #[must_use]
    pub fn new(scheduler: Rc<dyn FrameScheduler>) -> Self {
        Self {
            current: CameraState::default(),
            previous: None,
            min_ratio: None,
            max_ratio: None,
            enabled: true,
            listeners: SmallVec::new(),
            next_listener: 0,
            scheduler,
            animation: None,
        }
    }

    /// Returns a copy of the current state.
    #[must_use]
    #[inline]
    pub fn state(&self) -> CameraState {
        self.current
    }

    /// Returns the state immediately before the last accepted state set.
    ///
    /// `None` only before the first accepted call; after that it is always
    /// the pre-call state, even when the call left the state unchanged.
    #[must_use]
    #[inline]
    pub fn previous_state(&self) -> Option<CameraState> {
        self.previous
    }

    /// Returns `true` while state sets are being applied.
    #[must_use]
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Resumes applying state sets.
    pub fn enable(&mut self) {
        self.enabled = true;
    }

    /// Suspends the camera: subsequent [`Camera::set_state`] and
    /// [`Camera::animate`] calls become silent no-ops until re-enabled.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    /// Returns the configured `(min, max)` zoom ratio bounds.
    #[must_use]
    pub fn ratio_bounds(&self) -> (Option<f64>, Option<f64>) {
        (self.min_ratio, self.max_ratio)
    }

    /// Sets the zoom ratio bounds and re-clamps the current ratio through
    /// the normal state-set path.
    ///
    /// Non-finite bounds are treated as unset. The re-clamp is subject to
    /// the enabled flag like any other state set, so a disabled camera keeps
    /// its out-of-bounds ratio until the next accepted ratio set.
    pub fn set_ratio_bounds(&mut self, min: Option<f64>, max: Option<f64>) {
        self.min_ratio = min.filter(|v| v.is_finite());
        self.max_ratio = max.filter(|v| v.is_finite());
        let ratio = self.current.ratio;
        self.set_state(CameraUpdate::default().with_ratio(ratio));
    }

    /// Clamps a ratio to the configured bounds.
    ///
    /// The minimum bound is applied first, then the maximum, so with
    /// inconsistent bounds (`max < min`) the maximum wins. Consistency is
    /// validated where the bounds are configured, not here.
    #[must_use]
    pub fn bounded_ratio(&self, ratio: f64) -> f64 {
        let mut bounded = ratio;
        if let Some(min) = self.min_ratio {
            bounded = bounded.max(min);
        }
        if let Some(max) = self.max_ratio {
            bounded = bounded.min(max);
        }
        bounded
    }

    /// Applies a partial state update.
    ///
    /// No-op while disabled. Each provided field is validated on its own:
    /// non-finite values are dropped, and a ratio must additionally be
    /// strictly positive; valid ratios are clamped to the bounds. The
    /// pre-call state is recorded as the previous state, and listeners are
    /// notified only if the resulting state differs from it in at least one
    /// field (exact comparison, no epsilon).
    pub fn set_state(&mut self, update: CameraUpdate) {
        if !self.enabled {
            return;
        }
        let (next, changed) = self.transition(&update);
        self.previous = Some(self.current);
        self.current = next;
        if changed {
            let state = self.current;
            for (_, listener) in &mut self.listeners {
                listener(&state);
            }
        }
    }

    /// Applies the update computed by `f` from the current state.
    pub fn update_state(&mut self, f: impl FnOnce(&CameraState) -> CameraUpdate) {
        let update = f(&self.current);
        self.set_state(update);
    }

    /// Registers a listener called with the new state after every accepted
    /// change.
    pub fn on_updated(&mut self, listener: UpdateListener) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Removes a listener. Returns `false` if it was already gone.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Returns `true` while an animated transition has a pending frame.
    #[must_use]
    pub fn is_animated(&self) -> bool {
        self.animation.is_some()
    }

    /// Starts an animated transition toward `target`.
    ///
    /// No-op while disabled. A transition already in flight is cancelled
    /// and replaced; its partially applied state becomes the starting point
    /// of the new one. The transition advances when the host calls
    /// [`Camera::animation_frame`] for the frame scheduled here, and the
    /// final step applies the exact target (subject to the usual
    /// validation and clamping).
    pub fn animate(&mut self, target: CameraUpdate, options: AnimateOptions, now_ms: f64) {
        if !self.enabled {
            return;
        }
        self.cancel_animation();
        self.animation = Some(Animation {
            token: self.scheduler.schedule(),
            start_ms: now_ms,
            duration_ms: options.duration_ms,
            easing: options.easing,
            from: self.current,
            target,
        });
    }

    /// Advances the in-flight animation to `now_ms`.
    ///
    /// Hosts call this when the frame requested by the camera fires. Steps
    /// before the end of the duration apply an eased interpolation and
    /// schedule the next frame; the step at or past the end applies the
    /// exact target and ends the animation. No-op when nothing is animating.
    pub fn animation_frame(&mut self, now_ms: f64) {
        let Some(mut animation) = self.animation.take() else {
            return;
        };
        let t = (now_ms - animation.start_ms) / animation.duration_ms;
        if !(t < 1.0) {
            // Completion, and also the degenerate cases: zero or negative
            // duration makes `t` infinite or NaN.
            self.set_state(animation.target);
            return;
        }
        let k = (animation.easing)(t.max(0.0));
        self.set_state(animation.step(k));
        animation.token = self.scheduler.schedule();
        self.animation = Some(animation);
    }

    /// Cancels an in-flight animation, leaving the camera at the last
    /// applied state. No-op when nothing is animating.
    pub fn cancel_animation(&mut self) {
        if let Some(animation) = self.animation.take() {
            self.scheduler.cancel(animation.token);
        }
    }

    /// Animates the zoom ratio to `ratio / factor` (zooming in for factors
    /// above 1). Factors that are not strictly positive finite numbers are
    /// ignored.
    pub fn animate_zoom(&mut self, factor: f64, options: AnimateOptions, now_ms: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let target = CameraUpdate::default().with_ratio(self.current.ratio / factor);
        self.animate(target, options, now_ms);
    }

    /// Animates the zoom ratio to `ratio * factor` (zooming out for factors
    /// above 1). Factors that are not strictly positive finite numbers are
    /// ignored.
    pub fn animate_unzoom(&mut self, factor: f64, options: AnimateOptions, now_ms: f64) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        let target = CameraUpdate::default().with_ratio(self.current.ratio * factor);
        self.animate(target, options, now_ms);
    }

    /// Animates back to the default state.
    pub fn animate_reset(&mut self, options: AnimateOptions, now_ms: f64) {
        self.animate(CameraUpdate::from_state(CameraState::default()), options, now_ms);
    }

    /// Creates an independent camera initialized to this camera's current
    /// state and bounds.
    ///
    /// The copy shares the frame scheduler but nothing else: no listeners,
    /// no animation, and a fresh (empty) previous state.
    #[must_use]
    pub fn copy(&self) -> Self {
        Self {
            current: self.current,
            previous: None,
            min_ratio: self.min_ratio,
            max_ratio: self.max_ratio,
            enabled: self.enabled,
            listeners: SmallVec::new(),
            next_listener: 0,
            scheduler: Rc::clone(&self.scheduler),
            animation: None,
        }
    }

    /// The pure state transition: merges valid fields of `update` over the
    /// current state and reports whether anything changed.
    fn transition(&self, update: &CameraUpdate) -> (CameraState, bool) {
        let mut next = self.current;
        if let Some(x) = update.x.filter(|v| v.is_finite()) {
            next.x = x;
        }
        if let Some(y) = update.y.filter(|v| v.is_finite()) {
            next.y = y;
        }
        if let Some(angle) = update.angle.filter(|v| v.is_finite()) {
            next.angle = angle;
        }
        if let Some(ratio) = update.ratio.filter(|v| v.is_finite() && *v > 0.0) {
            next.ratio = self.bounded_ratio(ratio);
        }
        let changed = next != self.current;
        (next, changed)
    }
}

impl fmt::Debug for Camera {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Camera")
            .field("current", &self.current)
            .field("previous", &self.previous)
            .field("min_ratio", &self.min_ratio)
            .field("max_ratio", &self.max_ratio)
            .field("enabled", &self.enabled)
            .field("animated", &self.animation.is_some())
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use canopy_timing::easing;
    use canopy_timing::ManualFrameScheduler;
    use core::cell::Cell;

    fn camera() -> (Rc<ManualFrameScheduler>, Camera) {
        let scheduler = Rc::new(ManualFrameScheduler::new());
        let camera = Camera::new(Rc::clone(&scheduler) as Rc<dyn FrameScheduler>);
        (scheduler, camera)
    }

    #[test]
    fn starts_at_default_state() {
        let (_, camera) = camera();
        assert_eq!(camera.state(), CameraState::default());
        assert_eq!(camera.previous_state(), None);
        assert!(camera.is_enabled());
        assert!(!camera.is_animated());
    }

    #[test]
    fn set_state_merges_provided_fields() {
        let (_, mut camera) = camera();
        camera.set_state(CameraUpdate::default().with_x(0.2).with_ratio(2.0));
        let state = camera.state();
        assert_eq!(state.x, 0.2);
        assert_eq!(state.y, 0.5);
        assert_eq!(state.angle, 0.0);
        assert_eq!(state.ratio, 2.0);
    }

    #[test]
    fn invalid_fields_are_omitted_not_errors() {
        let (_, mut camera) = camera();
        camera.set_state(
            CameraUpdate::default()
                .with_x(f64::NAN)
                .with_y(f64::INFINITY)
                .with_angle(1.0)
                .with_ratio(-2.0),
        );
        let state = camera.state();
        assert_eq!(state.x, 0.5);
        assert_eq!(state.y, 0.5);
        assert_eq!(state.angle, 1.0);
        assert_eq!(state.ratio, 1.0);
        camera.set_state(CameraUpdate::default().with_ratio(0.0));
        assert_eq!(camera.state().ratio, 1.0);
    }

    #[test]
    fn previous_state_records_every_accepted_call() {
        let (_, mut camera) = camera();
        camera.set_state(CameraUpdate::default().with_x(0.25));
        assert_eq!(camera.previous_state(), Some(CameraState::default()));
        // A no-change call still records the pre-call state.
        camera.set_state(CameraUpdate::default().with_x(0.25));
        assert_eq!(camera.previous_state(), Some(camera.state()));
    }

    #[test]
    fn notifies_exactly_on_change() {
        let (_, mut camera) = camera();
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        camera.on_updated(Box::new(move |_| seen.set(seen.get() + 1)));

        camera.set_state(CameraUpdate::default().with_ratio(2.0));
        assert_eq!(count.get(), 1);
        camera.set_state(CameraUpdate::default().with_ratio(2.0));
        assert_eq!(count.get(), 1);
        camera.set_state(CameraUpdate::default());
        assert_eq!(count.get(), 1);
        camera.set_state(CameraUpdate::default().with_ratio(3.0));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn listener_receives_the_new_state() {
        let (_, mut camera) = camera();
        let last = Rc::new(Cell::new(0.0));
        let seen = Rc::clone(&last);
        camera.on_updated(Box::new(move |state| seen.set(state.ratio)));
        camera.set_state(CameraUpdate::default().with_ratio(4.0));
        assert_eq!(last.get(), 4.0);
    }

    #[test]
    fn removed_listener_stops_firing() {
        let (_, mut camera) = camera();
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        let id = camera.on_updated(Box::new(move |_| seen.set(seen.get() + 1)));
        assert!(camera.remove_listener(id));
        assert!(!camera.remove_listener(id));
        camera.set_state(CameraUpdate::default().with_ratio(2.0));
        assert_eq!(count.get(), 0);
    }

    #[test]
    fn ratio_is_clamped_to_bounds() {
        let (_, mut camera) = camera();
        camera.set_ratio_bounds(Some(0.5), Some(2.0));
        camera.set_state(CameraUpdate::default().with_ratio(10.0));
        assert_eq!(camera.state().ratio, 2.0);
        camera.set_state(CameraUpdate::default().with_ratio(0.01));
        assert_eq!(camera.state().ratio, 0.5);
    }

    #[test]
    fn inconsistent_bounds_let_the_max_win() {
        let (_, mut camera) = camera();
        camera.set_ratio_bounds(Some(2.0), Some(1.0));
        assert_eq!(camera.bounded_ratio(5.0), 1.0);
        assert_eq!(camera.bounded_ratio(0.1), 1.0);
    }

    #[test]
    fn setting_bounds_reclamps_current_ratio() {
        let (_, mut camera) = camera();
        camera.set_state(CameraUpdate::default().with_ratio(5.0));
        let count = Rc::new(Cell::new(0));
        let seen = Rc::clone(&count);
        camera.on_updated(Box::new(move |_| seen.set(seen.get() + 1)));
        camera.set_ratio_bounds(None, Some(2.0));
        assert_eq!(camera.state().ratio, 2.0);
        assert_eq!(count.get(), 1);
        // Already in bounds: no notification.
        camera.set_ratio_bounds(None, Some(3.0));
        assert_eq!(camera.state().ratio, 2.0);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn non_finite_bounds_are_ignored() {
        let (_, mut camera) = camera();
        camera.set_ratio_bounds(Some(f64::NAN), Some(f64::INFINITY));
        assert_eq!(camera.ratio_bounds(), (None, None));
        camera.set_state(CameraUpdate::default().with_ratio(100.0));
        assert_eq!(camera.state().ratio, 100.0);
    }

    #[test]
    fn disabled_camera_ignores_state_sets() {
        let (_, mut camera) = camera();
        camera.disable();
        camera.set_state(CameraUpdate::default().with_ratio(5.0));
        assert_eq!(camera.state().ratio, 1.0);
        assert_eq!(camera.previous_state(), None);
        camera.enable();
        camera.set_state(CameraUpdate::default().with_ratio(5.0));
        assert_eq!(camera.state().ratio, 5.0);
    }

    #[test]
    fn update_state_reads_the_current_state() {
        let (_, mut camera) = camera();
        camera.set_state(CameraUpdate::default().with_x(0.2));
        camera.update_state(|state| CameraUpdate::default().with_x(state.x + 0.1));
        assert!((camera.state().x - 0.3).abs() < 1e-12);
    }

    #[test]
    fn copy_is_independent() {
        let (_, mut camera) = camera();
        camera.set_ratio_bounds(Some(0.1), Some(10.0));
        camera.set_state(CameraUpdate::default().with_ratio(2.0));
        let mut other = camera.copy();
        assert_eq!(other.state(), camera.state());
        assert_eq!(other.previous_state(), None);
        other.set_state(CameraUpdate::default().with_ratio(4.0));
        assert_eq!(camera.state().ratio, 2.0);
        assert_eq!(other.state().ratio, 4.0);
    }

    #[test]
    fn animation_steps_through_the_scheduler() {
        let (scheduler, mut camera) = camera();
        camera.animate(
            CameraUpdate::default().with_ratio(3.0),
            AnimateOptions {
                duration_ms: 100.0,
                easing: easing::linear,
            },
            0.0,
        );
        assert!(camera.is_animated());
        assert_eq!(scheduler.pending(), 1);

        scheduler.drain();
        camera.animation_frame(50.0);
        assert_eq!(camera.state().ratio, 2.0);
        assert!(camera.is_animated());
        assert_eq!(scheduler.pending(), 1);

        scheduler.drain();
        camera.animation_frame(100.0);
        assert_eq!(camera.state().ratio, 3.0);
        assert!(!camera.is_animated());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn animation_leaves_unspecified_fields_alone() {
        let (scheduler, mut camera) = camera();
        camera.animate(
            CameraUpdate::default().with_ratio(2.0),
            AnimateOptions {
                duration_ms: 100.0,
                easing: easing::linear,
            },
            0.0,
        );
        scheduler.drain();
        camera.animation_frame(50.0);
        let state = camera.state();
        assert_eq!(state.x, 0.5);
        assert_eq!(state.y, 0.5);
        assert_eq!(state.angle, 0.0);
    }

    #[test]
    fn new_animation_replaces_the_running_one() {
        let (scheduler, mut camera) = camera();
        camera.animate(
            CameraUpdate::default().with_ratio(3.0),
            AnimateOptions {
                duration_ms: 100.0,
                easing: easing::linear,
            },
            0.0,
        );
        camera.animate(
            CameraUpdate::default().with_x(0.9),
            AnimateOptions {
                duration_ms: 100.0,
                easing: easing::linear,
            },
            0.0,
        );
        // The first animation's frame was cancelled.
        assert_eq!(scheduler.pending(), 1);
        scheduler.drain();
        camera.animation_frame(100.0);
        assert_eq!(camera.state().x, 0.9);
        assert_eq!(camera.state().ratio, 1.0);
    }

    #[test]
    fn cancel_keeps_the_last_applied_state() {
        let (scheduler, mut camera) = camera();
        camera.animate(
            CameraUpdate::default().with_ratio(3.0),
            AnimateOptions {
                duration_ms: 100.0,
                easing: easing::linear,
            },
            0.0,
        );
        scheduler.drain();
        camera.animation_frame(50.0);
        camera.cancel_animation();
        assert!(!camera.is_animated());
        assert_eq!(scheduler.pending(), 0);
        assert_eq!(camera.state().ratio, 2.0);
        // A stray frame after cancellation does nothing.
        camera.animation_frame(100.0);
        assert_eq!(camera.state().ratio, 2.0);
    }

    #[test]
    fn completion_applies_bounds() {
        let (scheduler, mut camera) = camera();
        camera.set_ratio_bounds(None, Some(2.0));
        camera.animate(
            CameraUpdate::default().with_ratio(10.0),
            AnimateOptions {
                duration_ms: 100.0,
                easing: easing::linear,
            },
            0.0,
        );
        scheduler.drain();
        camera.animation_frame(500.0);
        assert_eq!(camera.state().ratio, 2.0);
    }

    #[test]
    fn disabled_camera_does_not_animate() {
        let (scheduler, mut camera) = camera();
        camera.disable();
        camera.animate(
            CameraUpdate::default().with_ratio(3.0),
            AnimateOptions::default(),
            0.0,
        );
        assert!(!camera.is_animated());
        assert_eq!(scheduler.pending(), 0);
    }

    #[test]
    fn zoom_dollies_target_scaled_ratios() {
        let (scheduler, mut camera) = camera();
        camera.set_state(CameraUpdate::default().with_ratio(2.0));
        camera.animate_zoom(
            2.0,
            AnimateOptions {
                duration_ms: 10.0,
                easing: easing::linear,
            },
            0.0,
        );
        scheduler.drain();
        camera.animation_frame(10.0);
        assert_eq!(camera.state().ratio, 1.0);

        camera.animate_unzoom(
            4.0,
            AnimateOptions {
                duration_ms: 10.0,
                easing: easing::linear,
            },
            0.0,
        );
        scheduler.drain();
        camera.animation_frame(10.0);
        assert_eq!(camera.state().ratio, 4.0);

        camera.animate_reset(
            AnimateOptions {
                duration_ms: 10.0,
                easing: easing::linear,
            },
            0.0,
        );
        scheduler.drain();
        camera.animation_frame(10.0);
        assert_eq!(camera.state(), CameraState::default());
    }

    #[test]
    fn zero_duration_animation_completes_on_first_frame() {
        let (scheduler, mut camera) = camera();
        camera.animate(
            CameraUpdate::default().with_ratio(3.0),
            AnimateOptions {
                duration_ms: 0.0,
                easing: easing::linear,
            },
            0.0,
        );
        scheduler.drain();
        camera.animation_frame(0.0);
        assert_eq!(camera.state().ratio, 3.0);
        assert!(!camera.is_animated());
    }
}
