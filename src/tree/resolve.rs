//! Prefix shortening: expand unambiguous token prefixes into full names.

use std::fmt;

use super::{CommandNode, CommandTree};

/// Outcome of resolving a token list against the tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolution {
    /// Tokens with every resolvable prefix expanded. Tokens past the point
    /// where the tree ends are passed through untouched.
    Resolved(Vec<String>),
    /// A token matched more than one sibling; nothing should be executed.
    Ambiguous(Ambiguity),
}

/// A token that matched several siblings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ambiguity {
    pub token: String,
    pub candidates: Vec<String>,
}

impl fmt::Display for Ambiguity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Ambiguous argument: '{}'. Potential matches: {}",
            self.token,
            self.candidates.join(", ")
        )
    }
}

impl CommandTree {
    /// Resolve `tokens` that follow the top-level command `base`.
    ///
    /// An unknown `base` leaves the tokens unchanged.
    pub fn resolve(&self, base: &str, tokens: Vec<String>) -> Resolution {
        match self.command(base) {
            Some(node) => resolve_under(node, tokens),
            None => Resolution::Resolved(tokens),
        }
    }

    /// Resolve a whole command line, including the top-level command itself.
    pub fn resolve_line(&self, tokens: Vec<String>) -> Resolution {
        resolve_under(self.root(), tokens)
    }
}

fn resolve_under(start: &CommandNode, mut tokens: Vec<String>) -> Resolution {
    let mut node = start;
    for token in tokens.iter_mut() {
        let matches = node.matching(token);
        match matches.as_slice() {
            [] => break,
            [only] => {
                token.clone_from(&only.name);
                node = *only;
            }
            _ => {
                return Resolution::Ambiguous(Ambiguity {
                    token: token.clone(),
                    candidates: matches.iter().map(|m| m.name.clone()).collect(),
                });
            }
        }
    }
    Resolution::Resolved(tokens)
}
