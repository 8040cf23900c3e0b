//! Terminal status line showing the pending Morse code and the last chord.
//!
//! The orchestrator only holds an [`Overlay`] handle and never blocks on
//! drawing; the renderer runs on its own thread at the end of a flume channel.

use std::io::Write;
use std::thread::{self, JoinHandle};

use tracing::warn;
use unicode_width::UnicodeWidthStr;

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Clone, Debug, PartialEq)]
pub enum OverlayEvent {
    /// Pending code changed
    Morse(String),
    /// A chord was pressed
    Dispatched(String),
    /// A frame was processed
    Tick,
}

#[derive(Clone)]
pub struct Overlay {
    tx: flume::Sender<OverlayEvent>,
}

impl Overlay {
    pub fn new() -> (Self, flume::Receiver<OverlayEvent>) {
        let (tx, rx) = flume::unbounded();
        (Self { tx }, rx)
    }

    pub fn set_morse(&self, code: &str) {
        let _ = self.tx.send(OverlayEvent::Morse(code.to_string()));
    }

    pub fn dispatched(&self, chord: &str) {
        let _ = self.tx.send(OverlayEvent::Dispatched(chord.to_string()));
    }

    pub fn tick(&self) {
        let _ = self.tx.send(OverlayEvent::Tick);
    }
}

#[derive(Default)]
pub struct OverlayRenderer {
    morse: String,
    last_chord: Option<String>,
    frame: usize,
}

impl OverlayRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&mut self, event: OverlayEvent) {
        match event {
            OverlayEvent::Morse(code) => self.morse = code,
            OverlayEvent::Dispatched(chord) => self.last_chord = Some(chord),
            OverlayEvent::Tick => self.frame = self.frame.wrapping_add(1),
        }
    }

    /// The status line, centered when the terminal width is known.
    pub fn render_line(&self, term_width: Option<usize>) -> String {
        let spinner = SPINNER[self.frame % SPINNER.len()];
        let morse = if self.morse.is_empty() { "·" } else { &self.morse };
        let content = match &self.last_chord {
            Some(chord) => format!("{} {} │ ⌨ {}", spinner, morse, chord),
            None => format!("{} {}", spinner, morse),
        };

        match term_width {
            Some(width) => {
                let padding = width.saturating_sub(content.width()) / 2;
                format!("{}{}", " ".repeat(padding), content)
            }
            None => content,
        }
    }

    fn draw(&self) {
        let width = crossterm::terminal::size().ok().map(|(w, _)| w as usize);
        print!("\r\x1b[K\x1b[1m{}\x1b[0m", self.render_line(width));
        std::io::stdout().flush().ok();
    }

    /// Draw until every [`Overlay`] handle is dropped.
    pub fn run(mut self, rx: flume::Receiver<OverlayEvent>) {
        while let Ok(event) = rx.recv() {
            self.handle(event);
            for event in rx.drain() {
                self.handle(event);
            }
            self.draw();
        }
        println!();
    }

    /// Run on a new thread.
    pub fn spawn(self, rx: flume::Receiver<OverlayEvent>) -> RendererThread {
        RendererThread(thread::spawn(move || self.run(rx)))
    }
}

pub struct RendererThread(JoinHandle<()>);

impl RendererThread {
    /// Wait for the renderer to finish. Returns `false` if it panicked.
    pub fn join(self) -> bool {
        match self.0.join() {
            Ok(()) => true,
            Err(_) => {
                warn!("overlay renderer panicked");
                false
            }
        }
    }
}
