//! Morse code table and the dot/dash accumulator fed by mouth timing.

use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::keys::{self, Chord, Key, KeySink, ModifierState};

/// Code to key-name table. Order and spelling are kept as deployed:
/// `.----.` (apostrophe) is a prefix of `.----.-` (backtick), and `-....`
/// (six) of `-....-` (minus).
pub const MORSE_CODES: &[(&str, &str)] = &[
    (".-", "a"),
    ("-...", "b"),
    ("-.-.", "c"),
    ("-..", "d"),
    (".", "e"),
    ("..-.", "f"),
    ("--.", "g"),
    ("....", "h"),
    ("..", "i"),
    (".---", "j"),
    ("-.-", "k"),
    (".-..", "l"),
    ("--", "m"),
    ("-.", "n"),
    ("---", "o"),
    (".--.", "p"),
    ("--.-", "q"),
    (".-.", "r"),
    ("...", "s"),
    ("-", "t"),
    ("..-", "u"),
    ("...-", "v"),
    (".--", "w"),
    ("-..-", "x"),
    ("-.--", "y"),
    ("--..", "z"),
    (".----", "1"),
    ("..---", "2"),
    ("...--", "3"),
    ("....-", "4"),
    (".....", "5"),
    ("-....", "6"),
    ("--...", "7"),
    ("---..", "8"),
    ("----.", "9"),
    ("-----", "0"),
    (".-.-.-", "."),
    ("--..--", ","),
    ("---...", ";"),
    (".----.", "'"),
    (".----.-", "`"),
    ("-....-", "-"),
    ("-...-", "="),
    ("-..-.", "/"),
    ("-..-.-", "\\"),
    ("----.-", "["),
    ("------", "]"),
    (".-.-", "tab"),
    ("space", "space"),
    ("enter", "enter"),
];

/// One element of a Morse code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Symbol {
    Dot,
    Dash,
}

impl Symbol {
    pub fn as_char(&self) -> char {
        match self {
            Symbol::Dot => '.',
            Symbol::Dash => '-',
        }
    }
}

/// Whole-word table entries emitted by gestures rather than spelled out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    Space,
    Enter,
}

impl Token {
    pub fn code(&self) -> &'static str {
        match self {
            Token::Space => "space",
            Token::Enter => "enter",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Immutable code to key mapping.
#[derive(Debug, Clone)]
pub struct MorseTable {
    entries: Vec<(&'static str, Key)>,
    lookup: HashMap<&'static str, Key>,
}

impl Default for MorseTable {
    fn default() -> Self {
        Self::standard()
    }
}

impl MorseTable {
    pub fn standard() -> Self {
        let entries: Vec<(&'static str, Key)> = MORSE_CODES
            .iter()
            .filter_map(|&(code, name)| Key::from_name(name).map(|key| (code, key)))
            .collect();
        let lookup = entries.iter().copied().collect();
        Self { entries, lookup }
    }

    /// Resolve a code. Unknown codes resolve to no key.
    pub fn lookup(&self, code: &str) -> Option<Key> {
        self.lookup.get(code).copied()
    }

    /// Entries in table order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, Key)> + '_ {
        self.entries.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Collects symbols into a pending code and turns it into a chord.
#[derive(Debug, Clone, Default)]
pub struct MorseAccumulator {
    table: MorseTable,
    buffer: String,
    last_dispatched: Option<Chord>,
}

impl MorseAccumulator {
    pub fn new(table: MorseTable) -> Self {
        Self {
            table,
            buffer: String::new(),
            last_dispatched: None,
        }
    }

    /// Pending dots and dashes.
    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn last_dispatched(&self) -> Option<&Chord> {
        self.last_dispatched.as_ref()
    }

    pub fn push(&mut self, symbol: Symbol) {
        self.buffer.push(symbol.as_char());
        debug!(morse = %self.buffer, "morse symbol");
    }

    /// Drop the pending code without dispatching it.
    pub fn cancel(&mut self) {
        if !self.buffer.is_empty() {
            debug!(morse = %self.buffer, "morse queue cleared");
        }
        self.buffer.clear();
    }

    /// Resolve the pending code, prefix the held modifiers and press the
    /// result. The buffer is cleared whether or not the code resolved.
    pub fn decode_and_dispatch<S: KeySink + ?Sized>(
        &mut self,
        modifiers: ModifierState,
        sink: &mut S,
    ) -> Option<Chord> {
        let code = std::mem::take(&mut self.buffer);
        let key = self.table.lookup(&code);
        if key.is_none() && !code.is_empty() {
            debug!(morse = %code, "unresolved morse code");
        }

        let chord = Chord::compose(modifiers, key)?;
        keys::dispatch(sink, &chord);
        self.last_dispatched = Some(chord.clone());
        Some(chord)
    }

    /// Replace the pending code with a whole-word token and dispatch it.
    pub fn dispatch_token<S: KeySink + ?Sized>(
        &mut self,
        token: Token,
        modifiers: ModifierState,
        sink: &mut S,
    ) -> Option<Chord> {
        self.buffer.clear();
        self.buffer.push_str(token.code());
        self.decode_and_dispatch(modifiers, sink)
    }

    /// Press the last dispatched chord again, verbatim.
    pub fn repeat_last<S: KeySink + ?Sized>(&self, sink: &mut S) -> Option<Chord> {
        let chord = self.last_dispatched.clone()?;
        keys::dispatch(sink, &chord);
        Some(chord)
    }
}
