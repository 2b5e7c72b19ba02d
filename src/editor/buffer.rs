//! The editable line and its cursor.

/// Default maximum number of characters in one line.
pub const DEFAULT_MAX_LINE_LEN: usize = 1024;

/// Characters typed so far in the current prompt.
///
/// Holds `0 <= cursor <= buffer.len()` and `buffer.len() <= max_length`
/// after every operation.
#[derive(Clone, Debug)]
pub struct InputState {
    buffer: Vec<char>,
    cursor: usize,
    max_length: usize,
}

impl Default for InputState {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_LINE_LEN)
    }
}

impl InputState {
    pub fn new(max_length: usize) -> Self {
        Self {
            buffer: Vec::new(),
            cursor: 0,
            max_length,
        }
    }

    pub fn text(&self) -> String {
        self.buffer.iter().collect()
    }

    pub fn chars(&self) -> &[char] {
        &self.buffer
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.buffer.len() >= self.max_length
    }

    pub fn before_cursor(&self) -> &[char] {
        &self.buffer[..self.cursor]
    }

    pub fn after_cursor(&self) -> &[char] {
        &self.buffer[self.cursor..]
    }

    /// Insert at the cursor. Rejected once the line is full.
    pub fn insert(&mut self, c: char) -> bool {
        if self.is_full() {
            return false;
        }
        self.buffer.insert(self.cursor, c);
        self.cursor += 1;
        true
    }

    /// Delete the character before the cursor.
    pub fn backspace(&mut self) -> Option<char> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.buffer.remove(self.cursor))
    }

    /// Move one character left; returns the character stepped over.
    pub fn move_left(&mut self) -> Option<char> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.buffer[self.cursor])
    }

    /// Move one character right; returns the character stepped over.
    pub fn move_right(&mut self) -> Option<char> {
        let c = *self.buffer.get(self.cursor)?;
        self.cursor += 1;
        Some(c)
    }

    pub fn move_to_end(&mut self) {
        self.cursor = self.buffer.len();
    }

    /// Replace the whole line and put the cursor at its end. Text past
    /// `max_length` is dropped.
    pub fn replace(&mut self, text: &str) {
        self.buffer = text.chars().take(self.max_length).collect();
        self.cursor = self.buffer.len();
    }
}
