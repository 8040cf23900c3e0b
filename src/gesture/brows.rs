//! Brow channel: one-sided raises scroll (or move the caret while
//! duckfacing), a symmetric raise holds control, and two raises in quick
//! succession repeat the last chord.

use tracing::{debug, info};

use super::{Action, FrameActions};
use crate::config::GestureConfig;
use crate::geometry::GeometryReadout;
use crate::keys::Key;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BrowState {
    pub raised: bool,
    pub raise_count: u32,
    pub raised_frames: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowGesture {
    LeftRaise,
    RightRaise,
    BothRaised,
    Neutral,
}

#[derive(Debug, Clone, Copy)]
pub struct BrowInputs {
    /// Right-minus-left brow distance.
    pub difference: f64,
    pub average_raise: f64,
    pub eye_average: f64,
}

impl BrowInputs {
    pub fn from_readout(readout: &GeometryReadout) -> Option<Self> {
        Some(Self {
            difference: readout.brow_difference,
            average_raise: readout.brow_average_raise?,
            eye_average: readout.eye_average()?,
        })
    }
}

type Guard = fn(&BrowInputs, &GestureConfig) -> bool;

const RULES: [(BrowGesture, Guard); 3] = [
    (BrowGesture::LeftRaise, |b: &BrowInputs, c: &GestureConfig| {
        b.difference < c.brow_raise_left
    }),
    (BrowGesture::RightRaise, |b: &BrowInputs, c: &GestureConfig| {
        b.difference > c.brow_raise_right
    }),
    (BrowGesture::BothRaised, |b: &BrowInputs, c: &GestureConfig| {
        b.average_raise > c.brows_raise && b.eye_average > c.eye_open_height
    }),
];

pub fn classify(inputs: &BrowInputs, config: &GestureConfig) -> BrowGesture {
    RULES
        .iter()
        .find(|(_, guard)| guard(inputs, config))
        .map(|(gesture, _)| *gesture)
        .unwrap_or(BrowGesture::Neutral)
}

/// Advance the brow channel by one frame, using this frame's duckface flag.
pub fn update(
    state: &mut BrowState,
    readout: &GeometryReadout,
    config: &GestureConfig,
    duckfacing: bool,
    out: &mut FrameActions,
) -> Option<BrowGesture> {
    let inputs = BrowInputs::from_readout(readout)?;
    let gesture = classify(&inputs, config);

    match gesture {
        BrowGesture::LeftRaise => {
            state.raised = false;
            if duckfacing {
                info!(difference = inputs.difference, "left brow duckfacing: arrow left");
                out.push(Action::press(Key::LeftArrow));
            } else {
                info!(difference = inputs.difference, "left brow raise: scroll up");
                out.push(Action::press(Key::UpArrow));
            }
        }
        BrowGesture::RightRaise => {
            state.raised = false;
            if duckfacing {
                info!(difference = inputs.difference, "right brow duckfacing: arrow right");
                out.push(Action::press(Key::RightArrow));
            } else {
                info!(difference = inputs.difference, "right brow raise: scroll down");
                out.push(Action::press(Key::DownArrow));
            }
        }
        BrowGesture::BothRaised => {
            if !state.raised {
                state.raise_count += 1;
            }
            state.raised = true;
            debug!(raise = inputs.average_raise, "brows raised");
        }
        BrowGesture::Neutral => state.raised = false,
    }

    out.modifiers.control = state.raised;

    if state.raise_count >= 2 {
        info!("double brow raise: repeat last");
        out.push(Action::RepeatLast);
        state.raise_count = 0;
        state.raised_frames = 0;
    }
    (state.raise_count, state.raised_frames) =
        config.timer().expire(state.raise_count, state.raised_frames);

    Some(gesture)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NEUTRAL_DIFF: f64 = 0.01;
    const RELAXED: f64 = 0.15;
    const LIFTED: f64 = 0.23;

    fn brows(difference: f64, average_raise: f64) -> GeometryReadout {
        GeometryReadout {
            eye_right: Some(0.3),
            eye_left: Some(0.3),
            brow_difference: difference,
            brow_average_raise: Some(average_raise),
            ..Default::default()
        }
    }

    fn run(state: &mut BrowState, duckfacing: bool, frames: &[GeometryReadout]) -> Vec<FrameActions> {
        let config = GestureConfig::default();
        frames
            .iter()
            .map(|readout| {
                let mut out = FrameActions::default();
                update(state, readout, &config, duckfacing, &mut out);
                out
            })
            .collect()
    }

    #[test]
    fn test_one_sided_raises_scroll() {
        let mut state = BrowState::default();
        let out = run(&mut state, false, &[brows(-0.01, RELAXED), brows(0.04, RELAXED)]);
        assert_eq!(out[0].actions, vec![Action::press(Key::UpArrow)]);
        assert_eq!(out[1].actions, vec![Action::press(Key::DownArrow)]);
    }

    #[test]
    fn test_one_sided_raises_move_caret_while_duckfacing() {
        let mut state = BrowState::default();
        let out = run(&mut state, true, &[brows(-0.01, RELAXED), brows(0.04, RELAXED)]);
        assert_eq!(out[0].actions, vec![Action::press(Key::LeftArrow)]);
        assert_eq!(out[1].actions, vec![Action::press(Key::RightArrow)]);
    }

    #[test]
    fn test_one_sided_raise_clears_raised() {
        let mut state = BrowState::default();
        let out = run(&mut state, false, &[brows(NEUTRAL_DIFF, LIFTED), brows(0.04, LIFTED)]);
        assert!(out[0].modifiers.control);
        assert!(!out[1].modifiers.control);
        assert!(!state.raised);
    }

    #[test]
    fn test_control_follows_raise_each_frame() {
        let mut state = BrowState::default();
        let out = run(
            &mut state,
            false,
            &[brows(NEUTRAL_DIFF, LIFTED), brows(NEUTRAL_DIFF, LIFTED), brows(NEUTRAL_DIFF, RELAXED)],
        );
        let control: Vec<bool> = out.iter().map(|o| o.modifiers.control).collect();
        assert_eq!(control, vec![true, true, false]);
        assert_eq!(state.raise_count, 1);
    }

    #[test]
    fn test_raise_needs_open_eyes() {
        let mut state = BrowState::default();
        let squinting = GeometryReadout {
            eye_right: Some(0.2),
            eye_left: Some(0.2),
            ..brows(NEUTRAL_DIFF, LIFTED)
        };
        let out = run(&mut state, false, &[squinting]);
        assert!(!out[0].modifiers.control);
        assert_eq!(state.raise_count, 0);
    }

    #[test]
    fn test_double_raise_repeats_last() {
        let mut state = BrowState::default();
        let out = run(
            &mut state,
            false,
            &[brows(NEUTRAL_DIFF, LIFTED), brows(NEUTRAL_DIFF, RELAXED), brows(NEUTRAL_DIFF, LIFTED)],
        );
        let actions: Vec<Action> = out.into_iter().flat_map(|o| o.actions).collect();
        assert_eq!(actions, vec![Action::RepeatLast]);
        assert_eq!(state.raise_count, 0);
        assert_eq!(state.raised_frames, 0);
    }

    #[test]
    fn test_single_raise_expires() {
        let mut state = BrowState::default();
        let mut frames = vec![brows(NEUTRAL_DIFF, LIFTED)];
        frames.extend([brows(NEUTRAL_DIFF, RELAXED); 6]);
        run(&mut state, false, &frames);
        assert_eq!(state.raise_count, 0);

        // a raise after expiry starts a new count instead of repeating
        let out = run(&mut state, false, &[brows(NEUTRAL_DIFF, LIFTED)]);
        assert!(out[0].actions.is_empty());
        assert_eq!(state.raise_count, 1);
    }

    #[test]
    fn test_undefined_inputs_skip_channel() {
        let mut state = BrowState {
            raised: true,
            raise_count: 1,
            raised_frames: 3,
        };
        let readout = GeometryReadout {
            brow_average_raise: None,
            ..brows(NEUTRAL_DIFF, LIFTED)
        };
        let out = run(&mut state, false, &[readout]);
        assert_eq!(out[0], FrameActions::default());
        assert_eq!(state.raised_frames, 3);
    }
}
