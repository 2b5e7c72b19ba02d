//! Key input for the line editor.
//!
//! The editor consumes [`KeyRead`]s from a [`KeySource`] and never touches the
//! terminal's input side directly. Three sources are provided:
//!
//! - [`TerminalKeys`]: crossterm key events from an interactive terminal
//! - [`ByteKeys`]: raw bytes from any reader, decoded by [`KeyDecoder`] with a
//!   platform [`EscapeScheme`]
//! - [`ScriptedKeys`]: a fixed queue of synthetic reads, for tests

mod bytes;
mod decoder;
mod scripted;
mod terminal;

use std::io;

pub use bytes::ByteKeys;
pub use decoder::{EscapeScheme, KeyDecoder};
pub use scripted::ScriptedKeys;
pub use terminal::TerminalKeys;

/// A decoded editing key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Backspace,
    Tab,
    Enter,
    Up,
    Down,
    Left,
    Right,
}

/// Result of one blocking read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyRead {
    Key(Key),
    /// Input that does not map to a key; the editor reads again.
    Skip,
    /// The user interrupted the prompt (Ctrl-C or end of input).
    Interrupted,
}

/// Capability to read one key at a time.
pub trait KeySource {
    /// Block until the next key is available.
    fn read_key(&mut self) -> io::Result<KeyRead>;

    /// Prepare the input side for character-at-a-time reads. The returned
    /// guard undoes it when dropped.
    fn enter_raw_mode(&mut self) -> io::Result<RawModeGuard> {
        Ok(RawModeGuard::inactive())
    }
}

impl<K: KeySource + ?Sized> KeySource for Box<K> {
    fn read_key(&mut self) -> io::Result<KeyRead> {
        (**self).read_key()
    }

    fn enter_raw_mode(&mut self) -> io::Result<RawModeGuard> {
        (**self).enter_raw_mode()
    }
}

/// Restores cooked terminal mode when dropped.
///
/// Dropping runs on every exit path out of a prompt, including `?` returns
/// and panics, so the terminal is never left in raw mode.
#[derive(Debug)]
pub struct RawModeGuard {
    active: bool,
}

impl RawModeGuard {
    /// Switch the terminal to raw mode.
    pub fn enable() -> io::Result<Self> {
        crossterm::terminal::enable_raw_mode()?;
        Ok(Self { active: true })
    }

    /// A guard that does nothing, for sources that are not a terminal.
    pub fn inactive() -> Self {
        Self { active: false }
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        if self.active {
            if let Err(e) = crossterm::terminal::disable_raw_mode() {
                tracing::error!("Failed to disable raw mode: {}", e);
            }
        }
    }
}
