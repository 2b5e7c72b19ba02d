//! Interactive line editor.
//!
//! [`LineEditor::prompt`] reads keys from a [`KeySource`], edits an
//! [`InputState`], renders every change to the output and returns one
//! finished line. History recall and tab completion hook in per key.

mod buffer;
pub mod render;

#[cfg(test)]
mod tests;

use std::io::{self, Write};
use std::rc::Rc;

use anyhow::{Context as _, Result};

use crate::completion::{self, Completion};
use crate::config::EditorConfig;
use crate::history::HistoryStore;
use crate::input::{Key, KeyRead, KeySource};
use crate::tree::CommandTree;

pub use buffer::{DEFAULT_MAX_LINE_LEN, InputState};

/// Prompt string used when none is configured.
pub const DEFAULT_PROMPT: &str = "> ";

/// How a prompt ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PromptOutcome {
    /// A completed line, trimmed of surrounding whitespace.
    Line(String),
    /// The read was interrupted before the line was completed.
    Interrupted,
}

#[derive(Debug, PartialEq, Eq)]
enum Step {
    Continue,
    Done,
}

/// Line editor bound to one key source and one output.
#[derive(Debug)]
pub struct LineEditor<K, W> {
    keys: K,
    out: W,
    tree: Rc<CommandTree>,
    history: HistoryStore,
    prompt: String,
    max_line_len: usize,
}

impl<K: KeySource, W: Write> LineEditor<K, W> {
    pub fn new(keys: K, out: W, tree: Rc<CommandTree>, history: HistoryStore) -> Self {
        Self {
            keys,
            out,
            tree,
            history,
            prompt: DEFAULT_PROMPT.to_string(),
            max_line_len: DEFAULT_MAX_LINE_LEN,
        }
    }

    /// Editor configured from `config`, with history loaded from its file.
    pub fn from_config(config: &EditorConfig, keys: K, out: W, tree: Rc<CommandTree>) -> Self {
        Self::new(keys, out, tree, config.open_history())
            .with_prompt(config.prompt.clone())
            .with_max_line_len(config.max_line_len)
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_max_line_len(mut self, max_line_len: usize) -> Self {
        self.max_line_len = max_line_len;
        self
    }

    pub fn tree(&self) -> &CommandTree {
        &self.tree
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryStore {
        &mut self.history
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.out
    }

    /// Read one line.
    ///
    /// Blocks until Enter or an interrupt. A non-empty line is recorded in
    /// history (and its file) before it is returned.
    pub fn prompt(&mut self) -> Result<PromptOutcome> {
        let _raw = self.keys.enter_raw_mode().context("Failed to enter raw mode")?;
        self.history.begin_prompt();
        let mut state = InputState::new(self.max_line_len);

        render::prompt(&mut self.out, &self.prompt)?;
        loop {
            self.out.flush().context("Failed to flush terminal output")?;
            let key = match self.keys.read_key().context("Failed to read key")? {
                KeyRead::Key(key) => key,
                KeyRead::Skip => continue,
                KeyRead::Interrupted => {
                    render::interrupted(&mut self.out)?;
                    self.out.flush()?;
                    tracing::debug!("prompt interrupted");
                    return Ok(PromptOutcome::Interrupted);
                }
            };
            if self.handle_key(&mut state, key)? == Step::Done {
                break;
            }
        }
        render::newline(&mut self.out)?;
        self.out.flush()?;

        let line = state.text().trim().to_string();
        if !line.is_empty() {
            self.history.record_and_persist(&line);
        }
        Ok(PromptOutcome::Line(line))
    }

    fn handle_key(&mut self, state: &mut InputState, key: Key) -> io::Result<Step> {
        match key {
            Key::Enter => return Ok(Step::Done),
            Key::Char(c) => {
                if state.insert(c) {
                    render::inserted(&mut self.out, c, state.after_cursor())?;
                }
            }
            Key::Backspace => {
                if let Some(removed) = state.backspace() {
                    render::erased(&mut self.out, removed, state.after_cursor())?;
                }
            }
            Key::Left => {
                if let Some(over) = state.move_left() {
                    render::cursor_left(&mut self.out, over)?;
                }
            }
            Key::Right => {
                if let Some(over) = state.move_right() {
                    render::cursor_right(&mut self.out, over)?;
                }
            }
            Key::Up => {
                let current = state.text();
                if let Some(entry) = self.history.older(&current) {
                    let entry = entry.to_string();
                    self.load_line(state, &entry)?;
                }
            }
            Key::Down => {
                if let Some(entry) = self.history.newer() {
                    self.load_line(state, &entry)?;
                }
            }
            Key::Tab => self.complete(state)?,
        }
        Ok(Step::Continue)
    }

    fn load_line(&mut self, state: &mut InputState, text: &str) -> io::Result<()> {
        let before = render::columns(state.before_cursor());
        state.replace(text);
        render::replace_line(&mut self.out, before, state.chars())
    }

    fn complete(&mut self, state: &mut InputState) -> io::Result<()> {
        match completion::complete(&state.text(), &self.tree) {
            Completion::NoMatch => {}
            Completion::Unique { line } => self.load_line(state, &line)?,
            Completion::Candidates { names, line } => {
                match line {
                    Some(line) => state.replace(&line),
                    None => state.move_to_end(),
                }
                render::candidates(&mut self.out, &names, &self.prompt, state.chars())?;
            }
        }
        Ok(())
    }
}
