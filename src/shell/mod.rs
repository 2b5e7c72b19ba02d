//! Read-dispatch loop.
//!
//! The shell prompts for a line, splits it into shell words and hands the
//! tokens to a [`Dispatcher`]. What commands do is entirely up to the
//! dispatcher; the shell only knows the exit keywords.

pub mod notice;

use std::io::Write;

use anyhow::Result;

use crate::editor::{LineEditor, PromptOutcome};
use crate::history::HistoryStore;
use crate::input::KeySource;
use crate::tree::CommandTree;

/// Tokens that end the session without reaching the dispatcher.
const EXIT_KEYWORDS: [&str; 3] = ["exit", "quit", "q"];

/// Whether the shell keeps prompting after a command.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Stop,
}

/// Read-only view of editor state a command may inspect.
#[derive(Debug)]
pub struct DispatchContext<'a> {
    pub tree: &'a CommandTree,
    pub history: &'a HistoryStore,
}

/// Executes one tokenized command line.
pub trait Dispatcher {
    fn dispatch(&mut self, tokens: Vec<String>, ctx: &DispatchContext<'_>) -> Flow;
}

pub struct Shell<K, W, D> {
    editor: LineEditor<K, W>,
    dispatcher: D,
}

impl<K: KeySource, W: Write, D: Dispatcher> Shell<K, W, D> {
    pub fn new(editor: LineEditor<K, W>, dispatcher: D) -> Self {
        Self { editor, dispatcher }
    }

    pub fn editor(&self) -> &LineEditor<K, W> {
        &self.editor
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Prompt and dispatch until an exit keyword, an interrupt, or
    /// [`Flow::Stop`].
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.report_history_issue()?;

            let line = match self.editor.prompt()? {
                PromptOutcome::Line(line) => line,
                PromptOutcome::Interrupted => {
                    tracing::info!("prompt interrupted, leaving shell");
                    break;
                }
            };

            let Some(tokens) = shlex::split(&line) else {
                notice::error(self.editor.writer_mut(), "Command contained invalid characters")?;
                continue;
            };
            let Some(first) = tokens.first() else {
                continue;
            };
            if is_exit(first) {
                break;
            }

            tracing::debug!(?tokens, "dispatching");
            let ctx = DispatchContext {
                tree: self.editor.tree(),
                history: self.editor.history(),
            };
            if self.dispatcher.dispatch(tokens, &ctx) == Flow::Stop {
                break;
            }
        }
        self.report_history_issue()?;
        notice::info(self.editor.writer_mut(), "Exiting...")?;
        Ok(())
    }

    fn report_history_issue(&mut self) -> Result<()> {
        if let Some(msg) = self.editor.history_mut().take_diagnostic() {
            notice::warning(self.editor.writer_mut(), &msg)?;
        }
        Ok(())
    }
}

fn is_exit(token: &str) -> bool {
    EXIT_KEYWORDS.iter().any(|k| token.eq_ignore_ascii_case(k))
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;
    use crate::input::{Key, ScriptedKeys};
    use crate::tree::{CommandRegistry, Grammar};

    fn shell<D: Dispatcher>(script: ScriptedKeys, dispatcher: D) -> Shell<ScriptedKeys, Vec<u8>, D> {
        let mut registry = CommandRegistry::new();
        registry.register(Grammar::new("headers").subcommands(["add", "remove", "clear"]));
        let tree = Rc::new(CommandTree::build(&registry));
        Shell::new(LineEditor::new(script, Vec::new(), tree, HistoryStore::default()), dispatcher)
    }

    #[derive(Default)]
    struct Recorder {
        seen: Vec<Vec<String>>,
    }

    impl Dispatcher for Recorder {
        fn dispatch(&mut self, tokens: Vec<String>, _ctx: &DispatchContext<'_>) -> Flow {
            self.seen.push(tokens);
            Flow::Continue
        }
    }

    #[test]
    fn test_lines_are_split_and_dispatched() {
        let mut sh = shell(ScriptedKeys::typing("headers add \"X-Token\" 'a b'\n\nQUIT\nnever\n"), Recorder::default());
        sh.run().unwrap();

        assert_eq!(sh.dispatcher().seen, vec![vec!["headers", "add", "X-Token", "a b"]]);
    }

    #[test]
    fn test_invalid_quoting_reports_and_continues() {
        let mut sh = shell(ScriptedKeys::typing("get \"oops\nget ok\n"), Recorder::default());
        sh.run().unwrap();

        let out = String::from_utf8_lossy(sh.editor().writer()).into_owned();
        assert!(out.contains("Command contained invalid characters"));
        assert_eq!(sh.dispatcher().seen, vec![vec!["get", "ok"]]);
    }

    #[derive(Default)]
    struct StopImmediately {
        calls: usize,
        latest_history: Option<String>,
    }

    impl Dispatcher for StopImmediately {
        fn dispatch(&mut self, _tokens: Vec<String>, ctx: &DispatchContext<'_>) -> Flow {
            self.calls += 1;
            self.latest_history = ctx.history.get(0).map(str::to_string);
            Flow::Stop
        }
    }

    #[test]
    fn test_stop_flow_ends_session() {
        let mut sh = shell(ScriptedKeys::typing("stop\nagain\n"), StopImmediately::default());
        sh.run().unwrap();

        assert_eq!(sh.dispatcher().calls, 1);
        assert_eq!(sh.dispatcher().latest_history.as_deref(), Some("stop"));
    }

    #[test]
    fn test_interrupt_ends_session() {
        let mut script = ScriptedKeys::typing("get");
        script.push(Key::Backspace);
        let mut sh = shell(script, Recorder::default());
        sh.run().unwrap();

        assert!(sh.dispatcher().seen.is_empty());
        let out = String::from_utf8_lossy(sh.editor().writer()).into_owned();
        assert!(out.contains("^C"));
        assert!(out.contains("Exiting..."));
    }
}
