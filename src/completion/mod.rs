//! Tab completion against the command tree.
//!
//! Completion is computed here as a pure function of the buffer and the tree;
//! the editor decides how to render the result.

use crate::tree::{CommandNode, CommandTree};

/// What a tab press should do to the line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Completion {
    /// Nothing matched, or the buffer could not be tokenized.
    NoMatch,
    /// Exactly one candidate; `line` is the rewritten buffer with a trailing space.
    Unique { line: String },
    /// Several candidates. `line` is set only when their common prefix extends
    /// the typed token.
    Candidates { names: Vec<String>, line: Option<String> },
}

/// Complete the last token of `buffer` against `tree`.
pub fn complete(buffer: &str, tree: &CommandTree) -> Completion {
    let Some(mut tokens) = shlex::split(buffer) else {
        tracing::debug!(buffer, "completion skipped: unbalanced quoting");
        return Completion::NoMatch;
    };
    if buffer.ends_with(char::is_whitespace) {
        tokens.push(String::new());
    }
    let Some((last, path)) = tokens.split_last() else {
        return Completion::NoMatch;
    };

    let Some(node) = walk(tree.root(), path) else {
        return Completion::NoMatch;
    };
    let names: Vec<String> = node.matching(last).into_iter().map(|c| c.name().to_string()).collect();

    match names.len() {
        0 => Completion::NoMatch,
        1 => {
            let filled = names[0].clone();
            match rejoin(&mut tokens, filled) {
                Some(line) => Completion::Unique { line: line + " " },
                None => Completion::NoMatch,
            }
        }
        _ => {
            let prefix = longest_common_prefix(&names);
            let extends = prefix.chars().count() > last.chars().count();
            let line = if extends { rejoin(&mut tokens, prefix) } else { None };
            Completion::Candidates { names, line }
        }
    }
}

/// Descend through `path`, taking the first matching child at each level.
fn walk<'a>(root: &'a CommandNode, path: &[String]) -> Option<&'a CommandNode> {
    let mut node = root;
    for token in path {
        node = node.matching(token).into_iter().next()?;
    }
    Some(node)
}

fn rejoin(tokens: &mut [String], last: String) -> Option<String> {
    let slot = tokens.last_mut()?;
    *slot = last;
    shlex::try_join(tokens.iter().map(String::as_str)).ok()
}

/// Longest prefix shared by every string in `items`; empty for an empty set.
pub fn longest_common_prefix<S: AsRef<str>>(items: &[S]) -> String {
    let Some((first, rest)) = items.split_first() else {
        return String::new();
    };
    let first = first.as_ref();
    let mut end = first.len();
    for other in rest {
        let shared: usize = first
            .chars()
            .zip(other.as_ref().chars())
            .take_while(|(a, b)| a == b)
            .map(|(a, _)| a.len_utf8())
            .sum();
        end = end.min(shared);
    }
    first[..end].to_string()
}
