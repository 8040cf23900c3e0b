//! Error kinds for frame classification, key injection and the frame pipeline.
//!
//! Per-frame errors are all recoverable: the affected frame (or channel) is
//! treated as a no-op. Only `PipelineError` terminates the processing loop.

use std::fmt;

use thiserror::Error;

/// Which side of the face a signal refers to, from the subject's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

/// Recoverable per-frame conditions.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FrameError {
    #[error("no face detected")]
    NoFaceDetected,
    #[error("head turned {0}")]
    HeadTurned(Side),
    #[error("degenerate geometry: {0} denominator is zero")]
    DegenerateGeometry(&'static str),
    #[error("expected 468 or 478 landmarks, got {0}")]
    LandmarkCount(usize),
}

/// Failure reported by the OS key-injection collaborator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InjectError {
    #[error("key injection backend unavailable: {0}")]
    Unavailable(String),
    #[error("failed to press {key}: {message}")]
    Press { key: String, message: String },
}

/// Terminal conditions of the frame pipeline.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("landmark source stopped producing frames: {0}")]
    UpstreamDetectorFailure(String),
    #[error("malformed landmark frame on line {line}: {source}")]
    Decode {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
