//! Built-in command grammar for the waspline console.
//!
//! Only token structure lives here. Handlers are supplied by whoever
//! dispatches the resolved lines.

use crate::tree::{CommandNode, CommandRegistry, CommandSpec, Grammar};

/// Well-known HTTP header field names, offered after `headers add` and
/// `headers remove`.
pub const HEADER_FIELDS: [&str; 9] = [
    "accept",
    "accept-language",
    "accept-encoding",
    "cache-control",
    "connection",
    "if-modified-since",
    "host",
    "referer",
    "user-agent",
];

/// `headers` with field-name completion under `add` and `remove`.
#[derive(Debug, Default)]
pub struct HeadersCommand;

impl CommandSpec for HeadersCommand {
    fn grammar(&self) -> Grammar {
        Grammar::new("headers").subcommands(["add", "remove", "clear", "info"])
    }

    fn extend_tree(&self, node: &mut CommandNode) {
        for branch in ["add", "remove"] {
            if let Some(child) = node.child_mut(branch) {
                child.inject_leaves(HEADER_FIELDS);
            }
        }
    }
}

fn key_value_store(name: &str) -> Grammar {
    Grammar::new(name).subcommands(["add", "remove", "clear"])
}

/// Registry with every built-in command, in listing order.
pub fn default_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();
    registry
        .register(Grammar::new("clear"))
        .register(
            Grammar::new("console")
                .subcommand(Grammar::new("session").subcommands(["list", "reset", "new", "load", "copy"])),
        )
        .register(key_value_store("cookies"))
        .register(Grammar::new("get"))
        .register(HeadersCommand)
        .register(Grammar::new("help"))
        .register(Grammar::new("history"))
        .register(key_value_store("params"))
        .register(Grammar::new("post"))
        .register(
            Grammar::new("response")
                .subcommand(Grammar::new("show").subcommands(["text", "cookies", "headers", "redirs"]))
                .subcommands(["export", "beautify", "find", "grep"]),
        )
        .register(Grammar::new("timeout"))
        .register(key_value_store("var"));
    registry
}
