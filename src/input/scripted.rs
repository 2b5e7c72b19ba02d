use std::collections::VecDeque;
use std::io;

use super::{Key, KeyRead, KeySource};

/// A fixed sequence of reads, replayed in order.
///
/// Once exhausted every further read is an interrupt.
#[derive(Clone, Debug, Default)]
pub struct ScriptedKeys {
    reads: VecDeque<KeyRead>,
}

impl ScriptedKeys {
    pub fn new(reads: impl IntoIterator<Item = KeyRead>) -> Self {
        Self {
            reads: reads.into_iter().collect(),
        }
    }

    /// Script that types `text` character by character (`\n` is Enter,
    /// `\t` is Tab).
    pub fn typing(text: &str) -> Self {
        let mut keys = Self::default();
        keys.push_text(text);
        keys
    }

    pub fn push(&mut self, key: Key) -> &mut Self {
        self.reads.push_back(KeyRead::Key(key));
        self
    }

    pub fn push_read(&mut self, read: KeyRead) -> &mut Self {
        self.reads.push_back(read);
        self
    }

    pub fn push_text(&mut self, text: &str) -> &mut Self {
        for c in text.chars() {
            let key = match c {
                '\n' => Key::Enter,
                '\t' => Key::Tab,
                other => Key::Char(other),
            };
            self.reads.push_back(KeyRead::Key(key));
        }
        self
    }

    pub fn remaining(&self) -> usize {
        self.reads.len()
    }
}

impl KeySource for ScriptedKeys {
    fn read_key(&mut self) -> io::Result<KeyRead> {
        Ok(self.reads.pop_front().unwrap_or(KeyRead::Interrupted))
    }
}
