//! Main entry point for the waspline console.
//!
//! Initializes logging, loads configuration, builds the command tree and
//! runs the read-dispatch loop. Commands are resolved and echoed; only
//! `help` and `history` are executed here.

use std::io::{self, Write};
use std::rc::Rc;

use anyhow::Result;
use crossterm::tty::IsTty;

use waspline::catalog::default_registry;
use waspline::config::{self, EditorConfig};
use waspline::input::{ByteKeys, KeySource, TerminalKeys};
use waspline::shell::notice;
use waspline::utils;
use waspline::{CommandTree, DispatchContext, Dispatcher, Flow, LineEditor, Resolution, Shell};

/// Resolves shortened commands and reports what would run.
#[derive(Debug, Default)]
struct EchoDispatcher;

impl EchoDispatcher {
    fn handle(&mut self, tokens: Vec<String>, ctx: &DispatchContext<'_>) -> io::Result<()> {
        let mut out = io::stdout().lock();
        let tokens = match ctx.tree.resolve_line(tokens) {
            Resolution::Resolved(tokens) => tokens,
            Resolution::Ambiguous(amb) => {
                notice::error(&mut out, &format!("Ambiguous command: '{}'. Potential matches:", amb.token))?;
                for candidate in &amb.candidates {
                    notice::detail(&mut out, candidate)?;
                }
                return Ok(());
            }
        };

        let Some(base) = tokens.first() else {
            return Ok(());
        };
        if ctx.tree.command(base).is_none() {
            return notice::error(&mut out, &format!("Unknown command: '{base}'"));
        }

        match base.as_str() {
            "help" => {
                notice::info(&mut out, "Help menu:")?;
                for node in ctx.tree.root().children() {
                    notice::detail(&mut out, node.name())?;
                }
            }
            "history" => {
                for (i, line) in ctx.history.all().enumerate() {
                    notice::detail(&mut out, &format!("{i:>3}  {line}"))?;
                }
            }
            _ => notice::success(&mut out, &tokens.join(" "))?,
        }
        out.flush()
    }
}

impl Dispatcher for EchoDispatcher {
    fn dispatch(&mut self, tokens: Vec<String>, ctx: &DispatchContext<'_>) -> Flow {
        match self.handle(tokens, ctx) {
            Ok(()) => Flow::Continue,
            Err(e) => {
                tracing::error!("Failed to write command output: {}", e);
                Flow::Stop
            }
        }
    }
}

fn main() -> Result<()> {
    // Initialize logging before anything else
    let _log_guard = utils::logger::init_logging();

    let config = EditorConfig::load_or_default(&config::default_config_path());
    tracing::info!(?config, "configuration loaded");

    let tree = Rc::new(CommandTree::build(&default_registry()));

    // Piped input is decoded byte by byte; a terminal goes through crossterm
    let stdin = io::stdin();
    let keys: Box<dyn KeySource> = if stdin.is_tty() {
        Box::new(TerminalKeys::new())
    } else {
        Box::new(ByteKeys::new(stdin.lock(), config.escape_scheme))
    };

    let editor = LineEditor::from_config(&config, keys, io::stdout(), tree);
    let mut shell = Shell::new(editor, EchoDispatcher);

    println!("[*] Running waspline version {}...", env!("CARGO_PKG_VERSION"));
    shell.run()
}
