//! Declarative command grammar and the registry that owns it.
//!
//! Commands describe their own token tree through [`Grammar`]; nothing is
//! derived from an argument parser. The registry is an ordinary value that
//! callers construct and hand to [`CommandTree::build`](super::CommandTree::build).

use std::fmt;

use super::CommandNode;

/// Token grammar of one command: its name and nested subcommands.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Grammar {
    name: String,
    subcommands: Vec<Grammar>,
}

impl Grammar {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            subcommands: Vec::new(),
        }
    }

    /// Add one nested subcommand.
    pub fn subcommand(mut self, sub: Grammar) -> Self {
        self.subcommands.push(sub);
        self
    }

    /// Add several leaf subcommands by name.
    pub fn subcommands<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.subcommands.extend(names.into_iter().map(Grammar::new));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared subcommands in registration order.
    pub fn children(&self) -> &[Grammar] {
        &self.subcommands
    }
}

/// A command that contributes a subtree to the command tree.
pub trait CommandSpec {
    /// Declared token grammar for this command.
    fn grammar(&self) -> Grammar;

    /// Post-build hook: attach synthetic leaves to the built subtree.
    fn extend_tree(&self, _node: &mut CommandNode) {}
}

impl CommandSpec for Grammar {
    fn grammar(&self) -> Grammar {
        self.clone()
    }
}

/// Ordered collection of registered commands.
#[derive(Default)]
pub struct CommandRegistry {
    specs: Vec<Box<dyn CommandSpec>>,
}

impl fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.specs.iter().map(|s| s.grammar().name))
            .finish()
    }
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, spec: impl CommandSpec + 'static) -> &mut Self {
        self.specs.push(Box::new(spec));
        self
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Box<dyn CommandSpec>> {
        self.specs.iter()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
