// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Engine failure types.
//!
//! Every failure here is raised synchronously by the operation that
//! triggered it and is unrecoverable locally: the engine neither retries
//! nor degrades. Messages name the offending key, kind, or setting so a
//! host can report them without extra lookups.

use alloc::string::String;
use core::fmt::{self, Debug};

/// An invalid settings combination, rejected before being applied.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SettingsError {
    /// The camera ratio bounds are inverted.
    CameraRatioBounds {
        /// The configured lower bound.
        min: f64,
        /// The configured upper bound, below `min`.
        max: f64,
    },
    /// The label density is negative.
    NegativeLabelDensity {
        /// The rejected value.
        value: f64,
    },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CameraRatioBounds { min, max } => write!(
                f,
                "invalid ratio bounds: max_camera_ratio {max} is below min_camera_ratio {min}"
            ),
            Self::NegativeLabelDensity { value } => {
                write!(f, "label_density must be non-negative, got {value}")
            }
        }
    }
}

impl core::error::Error for SettingsError {}

/// A reprocessing failure; aborts the reprocess that raised it.
///
/// After a reprocess aborts, no partial cache state is advertised as
/// valid: the engine re-enters a fully dirty state so the next refresh
/// rebuilds from scratch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProcessError<N, E> {
    /// A node had no numeric position after reduction and defaulting.
    MissingNodePosition {
        /// The unplaceable node.
        key: N,
    },
    /// A node resolved to a kind with no registered draw program.
    UnknownNodeKind {
        /// The offending node.
        key: N,
        /// The unhandled kind tag.
        kind: String,
    },
    /// An edge resolved to a kind with no registered draw program.
    UnknownEdgeKind {
        /// The offending edge.
        key: E,
        /// The unhandled kind tag.
        kind: String,
    },
    /// An edge's endpoint could not be resolved.
    DanglingEdge {
        /// The edge with a missing endpoint.
        key: E,
    },
}

impl<N: Debug, E: Debug> fmt::Display for ProcessError<N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingNodePosition { key } => write!(
                f,
                "node {key:?} has no numeric `x`/`y` position and cannot be placed"
            ),
            Self::UnknownNodeKind { key, kind } => write!(
                f,
                "node {key:?} has kind {kind:?} but no node program is registered for it"
            ),
            Self::UnknownEdgeKind { key, kind } => write!(
                f,
                "edge {key:?} has kind {kind:?} but no edge program is registered for it"
            ),
            Self::DanglingEdge { key } => {
                write!(f, "edge {key:?} references a node that does not resolve")
            }
        }
    }
}

impl<N: Debug, E: Debug> core::error::Error for ProcessError<N, E> {}

/// A render-surface failure raised while applying surface dimensions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SurfaceError {
    /// The surface reported unusable dimensions.
    ///
    /// Suppressible with
    /// [`Settings::allow_zero_sized_surface`](crate::Settings::allow_zero_sized_surface),
    /// which substitutes a 1-unit dimension instead.
    ZeroSized {
        /// The reported width.
        width: f64,
        /// The reported height.
        height: f64,
    },
}

impl fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroSized { width, height } => write!(
                f,
                "render surface has zero-sized dimensions {width}x{height}"
            ),
        }
    }
}

impl core::error::Error for SurfaceError {}

/// Any failure an engine operation can propagate.
///
/// Returned by the operations where more than one failure class can occur
/// (`refresh`, `frame`, `set_graph`); the narrower operations return their
/// specific type directly and convert through `From` when composed.
#[derive(Clone, Debug, PartialEq)]
pub enum EngineError<N, E> {
    /// An invalid settings combination.
    Settings(SettingsError),
    /// An aborted reprocess.
    Process(ProcessError<N, E>),
    /// An unusable render surface.
    Surface(SurfaceError),
}

impl<N, E> From<SettingsError> for EngineError<N, E> {
    fn from(error: SettingsError) -> Self {
        Self::Settings(error)
    }
}

impl<N, E> From<ProcessError<N, E>> for EngineError<N, E> {
    fn from(error: ProcessError<N, E>) -> Self {
        Self::Process(error)
    }
}

impl<N, E> From<SurfaceError> for EngineError<N, E> {
    fn from(error: SurfaceError) -> Self {
        Self::Surface(error)
    }
}

impl<N: Debug, E: Debug> fmt::Display for EngineError<N, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Settings(error) => fmt::Display::fmt(error, f),
            Self::Process(error) => fmt::Display::fmt(error, f),
            Self::Surface(error) => fmt::Display::fmt(error, f),
        }
    }
}

impl<N: Debug, E: Debug> core::error::Error for EngineError<N, E> {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::format;
    use alloc::string::ToString;

    #[test]
    fn settings_errors_name_the_setting() {
        let error = SettingsError::CameraRatioBounds { min: 2.0, max: 0.5 };
        let message = error.to_string();
        assert!(message.contains("max_camera_ratio 0.5"));
        assert!(message.contains("min_camera_ratio 2"));

        let error = SettingsError::NegativeLabelDensity { value: -1.5 };
        assert!(error.to_string().contains("label_density"));
        assert!(error.to_string().contains("-1.5"));
    }

    #[test]
    fn process_errors_name_key_and_kind() {
        let error: ProcessError<&str, &str> = ProcessError::UnknownNodeKind {
            key: "n1",
            kind: "hex".to_string(),
        };
        let message = error.to_string();
        assert!(message.contains("\"n1\""));
        assert!(message.contains("\"hex\""));

        let error: ProcessError<&str, u32> = ProcessError::DanglingEdge { key: 7 };
        assert!(error.to_string().contains('7'));
    }

    #[test]
    fn surface_error_names_the_dimensions() {
        let error = SurfaceError::ZeroSized {
            width: 0.0,
            height: 600.0,
        };
        assert!(error.to_string().contains("0x600"));
    }

    #[test]
    fn engine_error_converts_and_delegates() {
        let inner = ProcessError::MissingNodePosition { key: "a" };
        let error: EngineError<&str, &str> = inner.clone().into();
        assert_eq!(error, EngineError::Process(inner.clone()));
        assert_eq!(format!("{error}"), format!("{inner}"));
    }
}
