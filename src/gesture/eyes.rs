//! Eye channel: winks, blinks, squint and wide eyes.
//!
//! Gestures are checked in a fixed priority order and the first match wins.
//! A right wink holds shift and a left wink holds command for the frame.
//! Winking one eye and then the other inside the wait window cancels the
//! pending Morse code.

use tracing::{debug, info};

use super::{Action, FrameActions};
use crate::config::GestureConfig;
use crate::geometry::GeometryReadout;
use crate::keys::Key;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EyeState {
    pub blinking: bool,
    pub blink_count: u32,
    pub blinking_frames: u32,

    pub squinting: bool,
    pub squinting_frames: u32,

    pub bugeyed: bool,
    pub bugeyed_frames: u32,

    pub winked_right: bool,
    pub winked_right_frames: u32,

    pub winked_left: bool,
    pub winked_left_frames: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EyeGesture {
    WinkRight,
    Blink,
    WinkLeft,
    Squint,
    Bugeyed,
    Open,
}

#[derive(Debug, Clone, Copy)]
pub struct EyeRatios {
    pub right: f64,
    pub left: f64,
    pub average: f64,
}

impl EyeRatios {
    pub fn from_readout(readout: &GeometryReadout) -> Option<Self> {
        let right = readout.eye_right?;
        let left = readout.eye_left?;
        Some(Self {
            right,
            left,
            average: (right + left) / 2.0,
        })
    }
}

type Guard = fn(&EyeRatios, &GestureConfig) -> bool;

/// Checked top to bottom. A blink only needs the right eye closed, so it
/// sits between the two winks.
const RULES: [(EyeGesture, Guard); 5] = [
    (EyeGesture::WinkRight, |r: &EyeRatios, c: &GestureConfig| {
        r.right < c.eye_blink_height && r.left > c.eye_open_height
    }),
    (EyeGesture::Blink, |r: &EyeRatios, c: &GestureConfig| {
        r.right < c.eye_blink_height
    }),
    (EyeGesture::WinkLeft, |r: &EyeRatios, c: &GestureConfig| {
        r.left < c.eye_blink_height && r.right > c.eye_open_height
    }),
    (EyeGesture::Squint, |r: &EyeRatios, c: &GestureConfig| {
        r.average < c.eye_squint_height
    }),
    (EyeGesture::Bugeyed, |r: &EyeRatios, c: &GestureConfig| {
        r.average > c.eye_bugeyed_height
    }),
];

pub fn classify(ratios: &EyeRatios, config: &GestureConfig) -> EyeGesture {
    RULES
        .iter()
        .find(|(_, guard)| guard(ratios, config))
        .map(|(gesture, _)| *gesture)
        .unwrap_or(EyeGesture::Open)
}

/// Advance the eye channel by one frame.
///
/// `duckfacing` is the mouth channel's flag from the previous frame. Returns
/// `None` without touching state when either eye ratio is undefined.
pub fn update(
    state: &mut EyeState,
    readout: &GeometryReadout,
    config: &GestureConfig,
    duckfacing: bool,
    out: &mut FrameActions,
) -> Option<EyeGesture> {
    let ratios = EyeRatios::from_readout(readout)?;
    let timer = config.timer();
    let gesture = classify(&ratios, config);

    state.squinting = false;
    state.bugeyed = false;

    match gesture {
        EyeGesture::WinkRight => {
            info!(ratio = ratios.right, "right wink");
            out.modifiers.shift = true;
            state.winked_right = true;
            if state.winked_left && timer.within(state.winked_left_frames) {
                info!("left-right wink: escape and clear morse queue");
                out.push(Action::CancelMorse);
                out.push(Action::press(Key::Escape));
                state.winked_left = false;
                state.winked_left_frames = 0;
            }
        }
        EyeGesture::Blink => {
            if !state.blinking {
                state.blink_count += 1;
                info!(count = state.blink_count, "blink");
                if duckfacing && state.blink_count == 2 {
                    info!("duckface double blink: backspace");
                    out.push(Action::press(Key::Backspace));
                }
            }
            state.blinking = true;
        }
        EyeGesture::WinkLeft => {
            info!(ratio = ratios.left, "left wink");
            out.modifiers.command = true;
            state.winked_left = true;
            if state.winked_right && timer.within(state.winked_right_frames) {
                info!("right-left wink: clear morse queue");
                out.push(Action::CancelMorse);
                state.winked_right = false;
                state.winked_right_frames = 0;
            }
        }
        EyeGesture::Squint => {
            state.squinting = true;
            if timer.accumulate(&mut state.squinting_frames) {
                info!(ratio = ratios.average, "squint: zoom out");
                out.push(Action::zoom_out());
            }
        }
        EyeGesture::Bugeyed => {
            state.bugeyed = true;
            if timer.accumulate(&mut state.bugeyed_frames) {
                info!(ratio = ratios.average, "big eyes: zoom in");
                out.push(Action::zoom_in());
            }
        }
        EyeGesture::Open => {
            state.blinking = false;
        }
    }

    (state.winked_left, state.winked_left_frames) =
        timer.advance(state.winked_left, state.winked_left_frames);
    (state.winked_right, state.winked_right_frames) =
        timer.advance(state.winked_right, state.winked_right_frames);
    (state.blink_count, state.blinking_frames) =
        timer.expire(state.blink_count, state.blinking_frames);

    debug!(right = ratios.right, left = ratios.left, ?gesture, "eyes");
    Some(gesture)
}
