//! System clipboard access through the terminal.
//!
//! Uses the OSC 52 escape sequence, which most modern terminal emulators
//! (kitty, WezTerm, iTerm2, Ghostty, tmux with `set-clipboard on`) forward
//! to the host clipboard.

use crate::error::ClipboardError;
use base64::Engine;
use std::io::{self, IsTerminal, Write};

/// Destination for copied text.
pub trait Clipboard {
    /// Replaces the clipboard contents with `text`.
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Encodes `text` as an OSC 52 "set clipboard" sequence.
pub fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{}\x07", encoded)
}

/// Clipboard that writes OSC 52 sequences to a terminal stream.
pub struct Osc52Clipboard<W: Write> {
    out: W,
    require_terminal: bool,
}

impl Osc52Clipboard<io::Stdout> {
    /// Clipboard bound to stdout. Fails when stdout is not a terminal.
    pub fn stdout() -> Self {
        Self {
            out: io::stdout(),
            require_terminal: true,
        }
    }
}

impl<W: Write> Osc52Clipboard<W> {
    /// Clipboard writing to an arbitrary stream.
    pub fn new(out: W) -> Self {
        Self {
            out,
            require_terminal: false,
        }
    }

    /// Consumes the clipboard, returning the underlying stream.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        if self.require_terminal && !io::stdout().is_terminal() {
            return Err(ClipboardError::Unavailable(
                "stdout is not a terminal".to_string(),
            ));
        }

        self.out.write_all(osc52_sequence(text).as_bytes())?;
        self.out.flush()?;
        Ok(())
    }
}
