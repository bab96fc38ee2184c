// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The render target abstraction.

use kurbo::Size;

/// The surface the engine renders into.
///
/// The engine never draws pixels itself; it only needs to know how big the
/// target is, how dense its pixels are, and how to wipe it before a frame.
/// Implementations wrap whatever the host renders to: a window, an
/// offscreen buffer, a test double.
///
/// Dimensions are polled at the start of every render pass, so resizes take
/// effect on the next frame without any extra notification.
pub trait RenderSurface {
    /// Returns the current width and height of the surface in pixels.
    fn dimensions(&self) -> Size;

    /// Returns the ratio of physical pixels to logical pixels.
    ///
    /// The default of `1.0` suits surfaces without high-DPI scaling.
    fn device_pixel_ratio(&self) -> f64 {
        1.0
    }

    /// Clears the surface ahead of a frame's draw calls.
    fn clear(&mut self);
}
