//! Key chords and the sinks that deliver them.
//!
//! A chord is an ordered set of held modifiers plus at most one primary key,
//! pressed and released as one action. Delivery is fire-and-forget: callers
//! log a failed press and move on.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{info, warn};

use crate::error::InjectError;

/// Modifier keys, in the order they are written and pressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Modifier {
    Command,
    Control,
    Shift,
}

impl Modifier {
    pub fn name(&self) -> &'static str {
        match self {
            Modifier::Command => "command",
            Modifier::Control => "control",
            Modifier::Shift => "shift",
        }
    }
}

/// A primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character: letter, digit or punctuation.
    Char(char),
    Tab,
    Space,
    Enter,
    Escape,
    Backspace,
    LeftArrow,
    RightArrow,
    UpArrow,
    DownArrow,
}

impl Key {
    /// Parse a key name as it appears in the Morse table.
    pub fn from_name(name: &str) -> Option<Key> {
        let key = match name {
            "tab" => Key::Tab,
            "space" => Key::Space,
            "enter" => Key::Enter,
            "escape" => Key::Escape,
            "backspace" => Key::Backspace,
            "left arrow" => Key::LeftArrow,
            "right arrow" => Key::RightArrow,
            "up arrow" => Key::UpArrow,
            "down arrow" => Key::DownArrow,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => return None,
                }
            }
        };
        Some(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Char(c) => write!(f, "{}", c),
            Key::Tab => write!(f, "tab"),
            Key::Space => write!(f, "space"),
            Key::Enter => write!(f, "enter"),
            Key::Escape => write!(f, "escape"),
            Key::Backspace => write!(f, "backspace"),
            Key::LeftArrow => write!(f, "left arrow"),
            Key::RightArrow => write!(f, "right arrow"),
            Key::UpArrow => write!(f, "up arrow"),
            Key::DownArrow => write!(f, "down arrow"),
        }
    }
}

/// Modifier flags for the next dispatch. Rebuilt from scratch every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ModifierState {
    pub command: bool,
    pub control: bool,
    pub shift: bool,
}

impl ModifierState {
    /// Held modifiers in fixed command, control, shift order.
    pub fn held(&self) -> Vec<Modifier> {
        [
            (self.command, Modifier::Command),
            (self.control, Modifier::Control),
            (self.shift, Modifier::Shift),
        ]
        .into_iter()
        .filter_map(|(on, modifier)| on.then_some(modifier))
        .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chord {
    pub modifiers: Vec<Modifier>,
    pub key: Option<Key>,
}

impl Chord {
    pub fn new(modifiers: &[Modifier], key: Key) -> Self {
        Self {
            modifiers: modifiers.to_vec(),
            key: Some(key),
        }
    }

    pub fn key(key: Key) -> Self {
        Self::new(&[], key)
    }

    /// Combine held modifiers with an optional key. `None` when nothing
    /// would be pressed.
    pub fn compose(modifiers: ModifierState, key: Option<Key>) -> Option<Self> {
        let modifiers = modifiers.held();
        if modifiers.is_empty() && key.is_none() {
            return None;
        }
        Some(Self { modifiers, key })
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = self.modifiers.iter().map(|m| m.name().to_string()).collect();
        if let Some(key) = self.key {
            parts.push(key.to_string());
        }
        write!(f, "{}", parts.join("+"))
    }
}

/// OS key-injection collaborator.
pub trait KeySink {
    fn press(&mut self, chord: &Chord) -> Result<(), InjectError>;
}

impl<S: KeySink + ?Sized> KeySink for Box<S> {
    fn press(&mut self, chord: &Chord) -> Result<(), InjectError> {
        (**self).press(chord)
    }
}

/// Press a chord once. Failures are logged, never retried.
pub fn dispatch<S: KeySink + ?Sized>(sink: &mut S, chord: &Chord) {
    info!(%chord, "keys");
    if let Err(e) = sink.press(chord) {
        warn!(error = %e, "key dispatch failed");
    }
}

/// Dry-run sink: logs every chord instead of pressing it.
#[derive(Debug, Default)]
pub struct LogSink;

impl KeySink for LogSink {
    fn press(&mut self, chord: &Chord) -> Result<(), InjectError> {
        info!(%chord, "dry run: would press");
        Ok(())
    }
}

/// Records dispatched chords in memory. Clones share one log.
#[derive(Debug, Clone, Default)]
pub struct ChordLog {
    chords: Arc<Mutex<Vec<Chord>>>,
}

impl ChordLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn chords(&self) -> Vec<Chord> {
        self.chords
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn clear(&self) {
        self.chords
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl KeySink for ChordLog {
    fn press(&mut self, chord: &Chord) -> Result<(), InjectError> {
        self.chords
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(chord.clone());
        Ok(())
    }
}

#[cfg(feature = "inject")]
pub use enigo_sink::EnigoSink;

#[cfg(feature = "inject")]
mod enigo_sink {
    use std::thread;
    use std::time::Duration;

    use enigo::{Direction, Enigo, Keyboard, Settings};

    use super::{Chord, Key, KeySink, Modifier};
    use crate::error::InjectError;

    /// Presses chords through enigo.
    pub struct EnigoSink {
        enigo: Enigo,
    }

    impl EnigoSink {
        pub fn new() -> Result<Self, InjectError> {
            let enigo = Enigo::new(&Settings::default())
                .map_err(|e| InjectError::Unavailable(format!("failed to initialize enigo: {}", e)))?;
            Ok(Self { enigo })
        }

        fn modifier_key(modifier: Modifier) -> enigo::Key {
            match modifier {
                Modifier::Command => enigo::Key::Meta,
                Modifier::Control => enigo::Key::Control,
                Modifier::Shift => enigo::Key::Shift,
            }
        }

        fn primary_key(key: Key) -> enigo::Key {
            match key {
                Key::Char(c) => enigo::Key::Unicode(c),
                Key::Tab => enigo::Key::Tab,
                Key::Space => enigo::Key::Space,
                Key::Enter => enigo::Key::Return,
                Key::Escape => enigo::Key::Escape,
                Key::Backspace => enigo::Key::Backspace,
                Key::LeftArrow => enigo::Key::LeftArrow,
                Key::RightArrow => enigo::Key::RightArrow,
                Key::UpArrow => enigo::Key::UpArrow,
                Key::DownArrow => enigo::Key::DownArrow,
            }
        }

        fn key(&mut self, chord: &Chord, key: enigo::Key, direction: Direction) -> Result<(), InjectError> {
            self.enigo.key(key, direction).map_err(|e| InjectError::Press {
                key: chord.to_string(),
                message: e.to_string(),
            })
        }
    }

    impl KeySink for EnigoSink {
        fn press(&mut self, chord: &Chord) -> Result<(), InjectError> {
            for modifier in &chord.modifiers {
                self.key(chord, Self::modifier_key(*modifier), Direction::Press)?;
            }

            // Small delay for modifiers to register
            thread::sleep(Duration::from_millis(10));

            if let Some(key) = chord.key {
                self.key(chord, Self::primary_key(key), Direction::Click)?;
                thread::sleep(Duration::from_millis(10));
            }

            for modifier in chord.modifiers.iter().rev() {
                self.key(chord, Self::modifier_key(*modifier), Direction::Release)?;
            }
            Ok(())
        }
    }
}
