//! Per-channel gesture classifiers.
//!
//! Each channel owns a small state record that persists across frames and is
//! updated once per frame through an exclusive reference. Channels never
//! press keys themselves: they set modifier flags and queue [`Action`]s that
//! the orchestrator carries out after every channel has run.

pub mod brows;
pub mod eyes;
pub mod mouth;

pub use brows::BrowState;
pub use eyes::EyeState;
pub use mouth::MouthState;

use crate::keys::{Chord, Key, Modifier, ModifierState};
use crate::morse::{Symbol, Token};

/// Something a channel asks the orchestrator to do this frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Append a dot or dash to the pending code.
    AppendSymbol(Symbol),
    /// Drop the pending code.
    CancelMorse,
    /// Decode the pending code and press it with the held modifiers.
    FlushMorse,
    /// Press a whole-word table entry with the held modifiers.
    EmitToken(Token),
    /// Press the last dispatched chord again.
    RepeatLast,
    /// Press a fixed chord, ignoring held modifiers.
    Press(Chord),
}

impl Action {
    pub fn zoom_out() -> Self {
        Action::Press(Chord::new(&[Modifier::Command], Key::Char('-')))
    }

    pub fn zoom_in() -> Self {
        Action::Press(Chord::new(&[Modifier::Command, Modifier::Shift], Key::Char('=')))
    }

    pub fn press(key: Key) -> Self {
        Action::Press(Chord::key(key))
    }
}

/// Modifier flags and actions collected from all channels for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FrameActions {
    pub modifiers: ModifierState,
    pub actions: Vec<Action>,
}

impl FrameActions {
    pub fn push(&mut self, action: Action) {
        self.actions.push(action);
    }
}

/// All persistent channel state. Exactly one instance lives in the orchestrator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GestureState {
    pub eyes: EyeState,
    pub mouth: MouthState,
    pub brows: BrowState,
}
