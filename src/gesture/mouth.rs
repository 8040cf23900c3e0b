//! Mouth channel: Morse timing, scrunch counting and duckface.
//!
//! How long the mouth stays open decides dot or dash. A scrunch (nose pulled
//! toward a frowning mouth) flushes the pending code; two scrunches followed
//! by a pause type a space and three type enter.

use tracing::{debug, info};

use super::{Action, FrameActions};
use crate::config::GestureConfig;
use crate::geometry::GeometryReadout;
use crate::morse::{Symbol, Token};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MouthState {
    pub open: bool,
    pub open_frames: u32,
    pub closed_frames: u32,

    pub scrunched: bool,
    pub scrunch_count: u32,
    /// Frames spent not scrunched since the last scrunch began.
    pub scrunch_frames: u32,

    pub duckfacing: bool,
}

/// Advance the mouth channel by one frame. Sub-behaviours whose ratios are
/// undefined this frame are skipped.
pub fn update(
    state: &mut MouthState,
    readout: &GeometryReadout,
    config: &GestureConfig,
    out: &mut FrameActions,
) {
    if let Some(ratio) = readout.mouth_inner {
        morse_timing(state, ratio, config, out);
        duckface(state, readout, config);
    }
    if let Some(nose_to_mouth) = readout.nose_to_mouth {
        scrunch(state, readout, nose_to_mouth, config, out);
    }
    if readout.snarl_right.is_some_and(|s| s > config.mouth_snarl) {
        debug!(ratio = readout.snarl_right, "snarl right");
    }
}

fn morse_timing(state: &mut MouthState, ratio: f64, config: &GestureConfig, out: &mut FrameActions) {
    state.open = ratio > config.mouth_open_height;
    if state.open {
        state.open_frames += 1;
        debug!(ratio, frames = state.open_frames, "mouth open");
        return;
    }

    if state.open_frames == 0 || state.open_frames < config.mouth_open_short_frames {
        return;
    }
    state.closed_frames += 1;
    if state.closed_frames >= config.mouth_closed_frames {
        let symbol = if state.open_frames >= config.mouth_open_long_frames {
            Symbol::Dash
        } else {
            Symbol::Dot
        };
        out.push(Action::AppendSymbol(symbol));
        state.open_frames = 0;
        state.closed_frames = 0;
    }
}

fn scrunch(
    state: &mut MouthState,
    readout: &GeometryReadout,
    nose_to_mouth: f64,
    config: &GestureConfig,
    out: &mut FrameActions,
) {
    let timer = config.timer();
    if state.scrunch_count > 0 && !state.scrunched {
        state.scrunch_frames += 1;
    }

    let frowning =
        readout.frown_right > config.mouth_frown && readout.frown_left > config.mouth_frown;
    if nose_to_mouth < config.mouth_nose_scrunch && frowning {
        out.push(Action::FlushMorse);
        if !state.scrunched {
            state.scrunch_count += 1;
            info!(ratio = nose_to_mouth, count = state.scrunch_count, "mouth scrunch");
        }
        state.scrunched = true;
    } else {
        state.scrunched = false;
    }

    let settled = timer.expired(state.scrunch_frames);
    match state.scrunch_count {
        0 => return,
        1 if settled => debug!("single scrunch discarded"),
        2 if settled => {
            info!("double scrunch: space");
            out.push(Action::EmitToken(Token::Space));
        }
        n if n >= 3 => {
            info!("triple scrunch: enter");
            out.push(Action::EmitToken(Token::Enter));
        }
        _ => return,
    }
    state.scrunch_count = 0;
    state.scrunch_frames = 0;
}

fn duckface(state: &mut MouthState, readout: &GeometryReadout, config: &GestureConfig) {
    state.duckfacing =
        !state.open && readout.duckface.is_some_and(|ratio| ratio < config.mouth_duckface);
    if state.duckfacing {
        debug!(ratio = readout.duckface, "duckface");
    }
}
