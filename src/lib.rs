//! waspline - the interactive line editor behind the waspline console
//!
//! This library provides:
//! - A command tree built from a declarative grammar registry
//! - Prefix resolution of shortened command lines
//! - Tab completion with longest-common-prefix fill
//! - Bounded, file-backed command history with draft-preserving recall
//! - A raw-mode line editor driven by pluggable key sources
//!
//! # Example
//!
//! ```no_run
//! use std::rc::Rc;
//!
//! use waspline::catalog::default_registry;
//! use waspline::config::EditorConfig;
//! use waspline::editor::{LineEditor, PromptOutcome};
//! use waspline::input::TerminalKeys;
//! use waspline::tree::{CommandTree, Resolution};
//!
//! fn main() -> anyhow::Result<()> {
//!     let tree = Rc::new(CommandTree::build(&default_registry()));
//!     let config = EditorConfig::default();
//!     let mut editor = LineEditor::from_config(&config, TerminalKeys::new(), std::io::stdout(), tree.clone());
//!
//!     if let PromptOutcome::Line(line) = editor.prompt()? {
//!         let tokens = shlex::split(&line).unwrap_or_default();
//!         if let Resolution::Resolved(tokens) = tree.resolve_line(tokens) {
//!             println!("{tokens:?}");
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod completion;
pub mod config;
pub mod editor;
pub mod history;
pub mod input;
pub mod shell;
pub mod tree;
pub mod utils;

// Re-export commonly used types
pub use config::EditorConfig;
pub use editor::{LineEditor, PromptOutcome};
pub use history::{DuplicatePolicy, HistoryStore};
pub use input::{Key, KeyRead, KeySource};
pub use shell::{DispatchContext, Dispatcher, Flow, Shell};
pub use tree::{CommandNode, CommandRegistry, CommandSpec, CommandTree, Grammar, Resolution};
