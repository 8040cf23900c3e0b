//! Runs every gesture channel over a frame and carries out what they ask for.
//!
//! The orchestrator is the single owner of channel state, the Morse buffer
//! and the modifier flags. Frames are handled strictly one at a time.

use tracing::{debug, trace};

use crate::config::GestureConfig;
use crate::error::FrameError;
use crate::geometry::{GeometryExtractor, GeometryReadout};
use crate::gesture::{Action, FrameActions, GestureState, brows, eyes, mouth};
use crate::keys::{self, Chord, KeySink, ModifierState};
use crate::landmarks::LandmarkFrame;
use crate::morse::{MorseAccumulator, MorseTable};
use crate::overlay::Overlay;
use crate::stats::{FrameStats, Timer};

/// What happened to one frame.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// No channel ran and no state changed.
    Skipped(FrameError),
    /// Channels ran; these chords were pressed, in order.
    Processed { dispatched: Vec<Chord> },
}

pub struct GestureOrchestrator<S: KeySink> {
    config: GestureConfig,
    extractor: GeometryExtractor,
    state: GestureState,
    morse: MorseAccumulator,
    modifiers: ModifierState,
    sink: S,
    overlay: Option<Overlay>,
    stats: FrameStats,
}

impl<S: KeySink> GestureOrchestrator<S> {
    pub fn new(config: GestureConfig, sink: S) -> Self {
        Self {
            config,
            extractor: GeometryExtractor::new(),
            state: GestureState::default(),
            morse: MorseAccumulator::new(MorseTable::standard()),
            modifiers: ModifierState::default(),
            sink,
            overlay: None,
            stats: FrameStats::default(),
        }
    }

    pub fn with_overlay(mut self, overlay: Overlay) -> Self {
        self.overlay = Some(overlay);
        self
    }

    /// Handle one frame from the detector. `None` means no face was found.
    pub fn process(&mut self, frame: Option<&LandmarkFrame>) -> FrameOutcome {
        let Some(frame) = frame else {
            return self.skip(FrameError::NoFaceDetected);
        };

        let timer = Timer::start();
        let readout = match self.extractor.extract(frame) {
            Ok(readout) => readout,
            Err(e) => return self.skip(e),
        };

        let frame_actions = self.classify(&readout);
        self.modifiers = frame_actions.modifiers;

        let buffer_before = self.morse.buffer().to_string();
        let dispatched: Vec<Chord> = frame_actions
            .actions
            .into_iter()
            .filter_map(|action| self.apply(action))
            .collect();
        timer.finish(&mut self.stats, dispatched.len());

        if let Some(overlay) = &self.overlay {
            if self.morse.buffer() != buffer_before {
                overlay.set_morse(self.morse.buffer());
            }
            for chord in &dispatched {
                overlay.dispatched(&chord.to_string());
            }
            overlay.tick();
        }

        FrameOutcome::Processed { dispatched }
    }

    /// Record a frame that was dropped before classification.
    pub fn skip(&mut self, error: FrameError) -> FrameOutcome {
        match &error {
            FrameError::NoFaceDetected => trace!("no face"),
            _ => debug!(error = %error, "frame skipped"),
        }
        self.stats.record_skip(&error);
        FrameOutcome::Skipped(error)
    }

    /// Run eyes, mouth and brows in that order. The eye channel sees the
    /// duckface flag from the previous frame, the brow channel sees this
    /// frame's.
    #[hotpath::measure]
    pub fn classify(&mut self, readout: &GeometryReadout) -> FrameActions {
        if let Some(tilt) = readout.face_tilt {
            if tilt > self.config.face_tilt {
                debug!(tilt, "head tilt right");
            } else if tilt < -self.config.face_tilt {
                debug!(tilt, "head tilt left");
            }
        }

        let mut out = FrameActions::default();
        let previous_duckface = self.state.mouth.duckfacing;
        eyes::update(&mut self.state.eyes, readout, &self.config, previous_duckface, &mut out);
        mouth::update(&mut self.state.mouth, readout, &self.config, &mut out);
        brows::update(
            &mut self.state.brows,
            readout,
            &self.config,
            self.state.mouth.duckfacing,
            &mut out,
        );
        out
    }

    /// Carry out one action against the current modifiers. Returns the chord
    /// pressed, if any.
    pub fn apply(&mut self, action: Action) -> Option<Chord> {
        match action {
            Action::AppendSymbol(symbol) => {
                self.morse.push(symbol);
                None
            }
            Action::CancelMorse => {
                self.morse.cancel();
                None
            }
            Action::FlushMorse => self.morse.decode_and_dispatch(self.modifiers, &mut self.sink),
            Action::EmitToken(token) => {
                self.morse.dispatch_token(token, self.modifiers, &mut self.sink)
            }
            Action::RepeatLast => self.morse.repeat_last(&mut self.sink),
            Action::Press(chord) => {
                keys::dispatch(&mut self.sink, &chord);
                Some(chord)
            }
        }
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn modifiers(&self) -> ModifierState {
        self.modifiers
    }

    pub fn morse_buffer(&self) -> &str {
        self.morse.buffer()
    }

    pub fn last_dispatched(&self) -> Option<&Chord> {
        self.morse.last_dispatched()
    }

    pub fn stats(&self) -> &FrameStats {
        &self.stats
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
