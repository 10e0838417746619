//! Interactive field entry on the terminal.
//!
//! The URL is read as a plain line. The API key is read in raw mode with
//! echo off, so it never reaches the screen or the scrollback.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::io::{self, BufRead, IsTerminal, Write};

/// How a field value reached the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Given as a command-line flag or environment variable.
    Flag,
    /// Typed at a prompt.
    Prompt,
}

/// Whether a failed validation should lead to prompting again.
///
/// Values that all came from flags are never re-prompted for, and nothing is
/// prompted for without a terminal on stdin.
pub fn should_reprompt(interactive: bool, url: Source, key: Source) -> bool {
    interactive && !(url == Source::Flag && key == Source::Flag)
}

/// Outcome of feeding one key press to a hidden input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretKey {
    /// Keep reading.
    Continue,
    /// Input finished with Enter.
    Done,
    /// Input aborted with Esc or Ctrl-C.
    Cancelled,
}

/// Applies a key press to the hidden input buffer.
pub fn apply_secret_key(buffer: &mut String, key: KeyEvent) -> SecretKey {
    if key.kind != KeyEventKind::Press {
        return SecretKey::Continue;
    }

    match key.code {
        KeyCode::Enter => SecretKey::Done,
        KeyCode::Esc => SecretKey::Cancelled,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            SecretKey::Cancelled
        }
        KeyCode::Char(c) => {
            buffer.push(c);
            SecretKey::Continue
        }
        KeyCode::Backspace => {
            buffer.pop();
            SecretKey::Continue
        }
        _ => SecretKey::Continue,
    }
}

/// Reads one line from stdin, keeping surrounding spaces as typed.
pub fn read_line(label: &str) -> anyhow::Result<String> {
    let mut line = String::new();
    let read = io::stdin().lock().read_line(&mut line)?;
    if read == 0 {
        anyhow::bail!("Input closed before {} was entered", label);
    }

    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Restores cooked mode when dropped, even on early return.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> io::Result<Self> {
        enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
    }
}

/// Reads a value without echoing it.
///
/// Falls back to a plain line read when stdin is not a terminal.
pub fn read_secret(label: &str) -> anyhow::Result<String> {
    if !io::stdin().is_terminal() {
        return read_line(label);
    }

    let mut buffer = String::new();
    let outcome = {
        let _guard = RawModeGuard::enable()?;
        loop {
            if let Event::Key(key) = event::read()? {
                match apply_secret_key(&mut buffer, key) {
                    SecretKey::Continue => {}
                    done => break done,
                }
            }
        }
    };

    // Raw mode swallowed the newline.
    println!();
    io::stdout().flush()?;

    if outcome == SecretKey::Cancelled {
        anyhow::bail!("{} entry cancelled", label);
    }
    Ok(buffer)
}
