//! Facial gestures to keystrokes.
//!
//! Landmark frames from a face-mesh detector are reduced to a handful of
//! ratios, classified per channel (eyes, mouth, brows) with frame-count
//! debouncing, and turned into key chords. Mouth openings spell Morse code.

pub mod config;
pub mod debounce;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod keys;
pub mod landmarks;
pub mod morse;
pub mod orchestrator;
pub mod overlay;
pub mod pipeline;
pub mod source;
pub mod stats;

pub use config::{Config, GestureConfig};
pub use error::{FrameError, InjectError, PipelineError};
pub use keys::{Chord, ChordLog, Key, KeySink, LogSink, Modifier, ModifierState};
pub use landmarks::{LandmarkFrame, Point3};
pub use orchestrator::{FrameOutcome, GestureOrchestrator};
