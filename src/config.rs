use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::warn;

use crate::debounce::{DebounceTimer, WAIT_FRAMES};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub gestures: GestureConfig,
    #[serde(default)]
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub overlay: OverlayConfig,
}

// ============================================================================
// Gesture thresholds
// ============================================================================

/// Empirical thresholds. Ratios are unitless; `*_frames` and `wait_frames`
/// count frames, so they depend on the capture rate.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Tilt ratio beyond which head tilt is reported
    pub face_tilt: f64,

    pub eye_blink_height: f64,
    pub eye_squint_height: f64,
    pub eye_open_height: f64,
    pub eye_bugeyed_height: f64,

    pub mouth_open_height: f64,
    /// Open frames needed before closing counts as a symbol
    pub mouth_open_short_frames: u32,
    /// Open frames at which a symbol becomes a dash
    pub mouth_open_long_frames: u32,
    /// Closed frames needed to end a symbol
    pub mouth_closed_frames: u32,

    pub mouth_frown: f64,
    pub mouth_nose_scrunch: f64,
    pub mouth_snarl: f64,
    pub mouth_duckface: f64,

    /// Right-minus-left brow distance below which the left brow counts as raised
    pub brow_raise_left: f64,
    /// Right-minus-left brow distance above which the right brow counts as raised
    pub brow_raise_right: f64,
    pub brows_raise: f64,

    /// Shared debounce window for winks, repeats and held gestures
    pub wait_frames: u32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            face_tilt: 0.5,

            eye_blink_height: 0.15,
            eye_squint_height: 0.18,
            eye_open_height: 0.25,
            eye_bugeyed_height: 0.7,

            mouth_open_height: 0.2,
            mouth_open_short_frames: 1,
            mouth_open_long_frames: 4,
            mouth_closed_frames: 1,

            mouth_frown: 0.006,
            mouth_nose_scrunch: 0.09,
            mouth_snarl: 0.1,
            mouth_duckface: 1.6,

            brow_raise_left: 0.0028,
            brow_raise_right: 0.025,
            brows_raise: 0.19,

            wait_frames: WAIT_FRAMES,
        }
    }
}

impl GestureConfig {
    pub fn timer(&self) -> DebounceTimer {
        DebounceTimer::new(self.wait_frames)
    }
}

// ============================================================================
// Pipeline Config
// ============================================================================

/// What the frame producer does when the classifier is still busy.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Backpressure {
    /// Wait for the queued frame to be taken (no frames lost)
    #[default]
    Block,
    /// Replace the queued frame with the newer one
    DropOldest,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct PipelineConfig {
    #[serde(default)]
    pub backpressure: Backpressure,
}

// ============================================================================
// Overlay Config
// ============================================================================

#[derive(Debug, Clone, Deserialize, Default)]
pub struct OverlayConfig {
    /// Draw the pending Morse code as a terminal status line
    #[serde(default)]
    pub enabled: bool,
}

impl Config {
    /// Load from `path`, falling back to defaults when the file is missing
    /// or malformed.
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Config::default();
        }
        match fs::read_to_string(path) {
            Ok(s) => Self::parse(&s).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "invalid config, using defaults");
                Config::default()
            }),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "unreadable config, using defaults");
                Config::default()
            }
        }
    }

    pub fn parse(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}
