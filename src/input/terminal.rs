//! Key source for an interactive terminal, backed by crossterm events.

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::{Key, KeyRead, KeySource, RawModeGuard};

/// Reads key presses through crossterm, which already normalizes the
/// platform escape sequences.
#[derive(Debug, Default)]
pub struct TerminalKeys;

impl TerminalKeys {
    pub fn new() -> Self {
        Self
    }
}

impl KeySource for TerminalKeys {
    fn read_key(&mut self) -> io::Result<KeyRead> {
        match event::read()? {
            Event::Key(key_evt) => Ok(map_key_event(key_evt)),
            _ => Ok(KeyRead::Skip),
        }
    }

    fn enter_raw_mode(&mut self) -> io::Result<RawModeGuard> {
        RawModeGuard::enable()
    }
}

/// Converts a crossterm key event to an editing key.
fn map_key_event(key_evt: KeyEvent) -> KeyRead {
    let KeyEvent { code, modifiers, kind, .. } = key_evt;

    // Only presses; repeats and releases are reported on some platforms
    if kind != KeyEventKind::Press {
        return KeyRead::Skip;
    }

    let ctrl = modifiers.contains(KeyModifiers::CONTROL);

    let key = match code {
        KeyCode::Char('c') | KeyCode::Char('C') if ctrl => return KeyRead::Interrupted,
        KeyCode::Char('j') | KeyCode::Char('m') if ctrl => Key::Enter,
        KeyCode::Char('h') if ctrl => Key::Backspace,
        KeyCode::Char(_) if ctrl || modifiers.contains(KeyModifiers::ALT) => return KeyRead::Skip,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Tab => Key::Tab,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        _ => return KeyRead::Skip,
    };
    KeyRead::Key(key)
}
