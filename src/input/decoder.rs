//! Byte-level key decoder.
//!
//! Raw bytes are fed one at a time. In the normal state a byte is either a
//! complete key, the start of a UTF-8 character, or an escape introducer.
//! After an introducer the decoder collects a fixed number of tail bytes and
//! classifies them as an arrow key; anything else is discarded.

use serde::{Deserialize, Serialize};

use super::{Key, KeyRead};

const CTRL_C: u8 = 0x03;
const BACKSPACE: u8 = 0x08;
const TAB: u8 = 0x09;
const LINE_FEED: u8 = 0x0a;
const CARRIAGE_RETURN: u8 = 0x0d;
const ESC: u8 = 0x1b;
const DELETE: u8 = 0x7f;

/// Host conventions for escape sequences and control bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EscapeScheme {
    /// `ESC [ A..D`, backspace as DEL.
    #[default]
    Unix,
    /// `0xE0`/`0x00` followed by a scan code.
    Windows,
}

impl EscapeScheme {
    /// The scheme of the host this binary was built for.
    pub fn host() -> Self {
        if cfg!(windows) { Self::Windows } else { Self::Unix }
    }

    fn is_introducer(self, byte: u8) -> bool {
        match self {
            Self::Unix => byte == ESC,
            Self::Windows => byte == 0xe0 || byte == 0x00,
        }
    }

    /// Bytes that follow an introducer.
    fn tail_len(self) -> usize {
        match self {
            Self::Unix => 2,
            Self::Windows => 1,
        }
    }

    fn classify(self, tail: &[u8]) -> Option<Key> {
        match (self, tail) {
            (Self::Unix, [b'[', b'A']) => Some(Key::Up),
            (Self::Unix, [b'[', b'B']) => Some(Key::Down),
            (Self::Unix, [b'[', b'C']) => Some(Key::Right),
            (Self::Unix, [b'[', b'D']) => Some(Key::Left),
            (Self::Windows, [0x48]) => Some(Key::Up),
            (Self::Windows, [0x50]) => Some(Key::Down),
            (Self::Windows, [0x4b]) => Some(Key::Left),
            (Self::Windows, [0x4d]) => Some(Key::Right),
            _ => None,
        }
    }

    fn control(self, byte: u8) -> Option<KeyRead> {
        let key = match (self, byte) {
            (_, CTRL_C) => return Some(KeyRead::Interrupted),
            (_, TAB) => Key::Tab,
            (Self::Unix, DELETE | BACKSPACE) => Key::Backspace,
            (Self::Windows, BACKSPACE) => Key::Backspace,
            (Self::Unix, LINE_FEED | CARRIAGE_RETURN) => Key::Enter,
            (Self::Windows, CARRIAGE_RETURN) => Key::Enter,
            _ => return None,
        };
        Some(KeyRead::Key(key))
    }
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Normal,
    Escape { tail: Vec<u8> },
    Utf8 { bytes: Vec<u8>, need: usize },
}

/// Stateful decoder from raw bytes to [`KeyRead`]s.
#[derive(Debug, Default)]
pub struct KeyDecoder {
    scheme: EscapeScheme,
    state: State,
}

impl KeyDecoder {
    pub fn new(scheme: EscapeScheme) -> Self {
        Self {
            scheme,
            state: State::Normal,
        }
    }

    /// True while a multi-byte sequence is only partially read.
    pub fn is_pending(&self) -> bool {
        !matches!(self.state, State::Normal)
    }

    /// Feed one byte. Returns `None` while a sequence is incomplete.
    pub fn feed(&mut self, byte: u8) -> Option<KeyRead> {
        match std::mem::take(&mut self.state) {
            State::Normal => self.start(byte),
            State::Escape { mut tail } => {
                tail.push(byte);
                if tail.len() < self.scheme.tail_len() {
                    self.state = State::Escape { tail };
                    return None;
                }
                match self.scheme.classify(&tail) {
                    Some(key) => Some(KeyRead::Key(key)),
                    None => {
                        tracing::debug!(?tail, "discarded unrecognized escape sequence");
                        Some(KeyRead::Skip)
                    }
                }
            }
            State::Utf8 { mut bytes, need } => {
                bytes.push(byte);
                if bytes.len() < need {
                    self.state = State::Utf8 { bytes, need };
                    return None;
                }
                Some(decode_char(&bytes))
            }
        }
    }

    fn start(&mut self, byte: u8) -> Option<KeyRead> {
        if self.scheme.is_introducer(byte) {
            self.state = State::Escape { tail: Vec::with_capacity(2) };
            return None;
        }
        if let Some(read) = self.scheme.control(byte) {
            return Some(read);
        }
        match utf8_len(byte) {
            Some(1) if !byte.is_ascii_control() => Some(KeyRead::Key(Key::Char(char::from(byte)))),
            Some(need) if need > 1 => {
                self.state = State::Utf8 { bytes: vec![byte], need };
                None
            }
            _ => Some(KeyRead::Skip),
        }
    }
}

/// Encoded length announced by a UTF-8 lead byte.
fn utf8_len(lead: u8) -> Option<usize> {
    match lead {
        0x00..=0x7f => Some(1),
        0xc2..=0xdf => Some(2),
        0xe0..=0xef => Some(3),
        0xf0..=0xf4 => Some(4),
        _ => None,
    }
}

fn decode_char(bytes: &[u8]) -> KeyRead {
    match std::str::from_utf8(bytes).ok().and_then(|s| s.chars().next()) {
        Some(c) if !c.is_control() => KeyRead::Key(Key::Char(c)),
        _ => KeyRead::Skip,
    }
}
