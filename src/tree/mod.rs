//! Command tree used for tab completion and prefix resolution.
//!
//! The tree is a trie of command tokens. It is built once from a
//! [`CommandRegistry`] and is read-only afterwards; the completion engine and
//! the resolver only ever borrow it.

mod registry;
mod resolve;

pub use registry::{CommandRegistry, CommandSpec, Grammar};
pub use resolve::{Ambiguity, Resolution};

/// A single token in the command tree.
///
/// Children keep registration order, which is also the order candidates are
/// listed in and the order "first match" walks pick from.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandNode {
    name: String,
    children: Vec<CommandNode>,
}

impl CommandNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[CommandNode] {
        &self.children
    }

    /// Child with exactly this name.
    pub fn child(&self, name: &str) -> Option<&CommandNode> {
        self.children.iter().find(|c| c.name == name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut CommandNode> {
        self.children.iter_mut().find(|c| c.name == name)
    }

    /// Children whose name starts with `prefix` (literal, case-sensitive).
    pub fn matching(&self, prefix: &str) -> Vec<&CommandNode> {
        self.children.iter().filter(|c| c.name.starts_with(prefix)).collect()
    }

    pub fn push_child(&mut self, child: CommandNode) {
        self.children.push(child);
    }

    /// Attach leaf children named `names` under this node.
    ///
    /// Names that already exist as children are skipped so a hook can run
    /// against a node that declared some of them itself.
    pub fn inject_leaves<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            let name = name.into();
            if self.child(&name).is_none() {
                self.children.push(CommandNode::new(name));
            }
        }
    }

    fn from_grammar(grammar: &Grammar) -> Self {
        Self {
            name: grammar.name().to_string(),
            children: grammar.children().iter().map(Self::from_grammar).collect(),
        }
    }
}

/// The immutable command trie shared by completion and resolution.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CommandTree {
    root: CommandNode,
}

impl CommandTree {
    /// Build the tree from every registered command.
    ///
    /// Each command contributes one child of the root, built from its
    /// declared grammar; its post-build hook then runs against that subtree.
    pub fn build(registry: &CommandRegistry) -> Self {
        let mut root = CommandNode::new("");
        for spec in registry.iter() {
            let mut node = CommandNode::from_grammar(&spec.grammar());
            spec.extend_tree(&mut node);
            tracing::debug!(command = node.name(), children = node.children().len(), "registered command");
            root.push_child(node);
        }
        Self { root }
    }

    /// Wrap an already assembled root node.
    pub fn from_root(root: CommandNode) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &CommandNode {
        &self.root
    }

    /// Top-level command node with exactly this name.
    pub fn command(&self, name: &str) -> Option<&CommandNode> {
        self.root.child(name)
    }
}
