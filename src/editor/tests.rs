//! End-to-end prompt tests driven by scripted keys.

use std::fs;
use std::rc::Rc;

use super::*;
use crate::history::DuplicatePolicy;
use crate::input::ScriptedKeys;
use crate::tree::{CommandRegistry, Grammar};

fn tree() -> Rc<CommandTree> {
    let mut registry = CommandRegistry::new();
    registry
        .register(Grammar::new("console"))
        .register(Grammar::new("cookies").subcommands(["add", "remove", "clear"]))
        .register(Grammar::new("get"))
        .register(Grammar::new("headers").subcommands(["add", "remove", "clear"]));
    Rc::new(CommandTree::build(&registry))
}

fn editor(keys: ScriptedKeys) -> LineEditor<ScriptedKeys, Vec<u8>> {
    LineEditor::new(keys, Vec::new(), tree(), HistoryStore::default())
}

fn line(outcome: PromptOutcome) -> String {
    match outcome {
        PromptOutcome::Line(line) => line,
        PromptOutcome::Interrupted => panic!("prompt was interrupted"),
    }
}

fn output(editor: &LineEditor<ScriptedKeys, Vec<u8>>) -> String {
    String::from_utf8_lossy(editor.writer()).into_owned()
}

#[test]
fn test_typed_line_is_returned_and_recorded() {
    let mut ed = editor(ScriptedKeys::typing("get foo\n"));
    assert_eq!(line(ed.prompt().unwrap()), "get foo");
    assert_eq!(ed.history().get(0), Some("get foo"));
    assert!(output(&ed).starts_with("> get foo"));
}

#[test]
fn test_line_is_trimmed_and_blank_lines_not_recorded() {
    let mut ed = editor(ScriptedKeys::typing("  get  \n   \n"));
    assert_eq!(line(ed.prompt().unwrap()), "get");
    assert_eq!(line(ed.prompt().unwrap()), "");
    assert_eq!(ed.history().len(), 1);
}

#[test]
fn test_mid_line_insert_and_backspace() {
    let mut keys = ScriptedKeys::typing("gt");
    keys.push(Key::Left).push(Key::Char('e')).push(Key::Right);
    keys.push_text("x").push(Key::Backspace).push(Key::Enter);

    let mut ed = editor(keys);
    assert_eq!(line(ed.prompt().unwrap()), "get");
}

#[test]
fn test_backspace_at_start_does_nothing() {
    let mut keys = ScriptedKeys::typing("ab");
    keys.push(Key::Left).push(Key::Left).push(Key::Backspace).push(Key::Left).push(Key::Enter);

    let mut ed = editor(keys);
    assert_eq!(line(ed.prompt().unwrap()), "ab");
}

#[test]
fn test_max_line_length_rejects_input() {
    let mut ed = editor(ScriptedKeys::typing("abcdef\n")).with_max_line_len(4);
    assert_eq!(line(ed.prompt().unwrap()), "abcd");
}

#[test]
fn test_skipped_reads_have_no_effect() {
    let mut keys = ScriptedKeys::typing("a");
    keys.push_read(KeyRead::Skip).push_text("b\n");

    let mut ed = editor(keys);
    assert_eq!(line(ed.prompt().unwrap()), "ab");
}

#[test]
fn test_interrupt_returns_distinct_outcome() {
    let mut keys = ScriptedKeys::typing("get");
    keys.push_read(KeyRead::Interrupted);

    let mut ed = editor(keys);
    assert_eq!(ed.prompt().unwrap(), PromptOutcome::Interrupted);
    assert!(ed.history().is_empty());
    assert!(output(&ed).ends_with("^C\r\n"));
}

#[test]
fn test_history_navigation_restores_draft() {
    let mut keys = ScriptedKeys::typing("first\nsecond\ndra");
    keys.push(Key::Up).push(Key::Up).push(Key::Up);
    keys.push(Key::Down).push(Key::Down).push(Key::Down);
    keys.push_text("ft\n");

    let mut ed = editor(keys);
    assert_eq!(line(ed.prompt().unwrap()), "first");
    assert_eq!(line(ed.prompt().unwrap()), "second");
    assert_eq!(line(ed.prompt().unwrap()), "draft");
}

#[test]
fn test_history_recall_submits_entry() {
    let mut keys = ScriptedKeys::typing("first\nsecond\n");
    keys.push(Key::Up).push(Key::Up).push(Key::Enter);

    let mut ed = editor(keys);
    ed.prompt().unwrap();
    ed.prompt().unwrap();
    assert_eq!(line(ed.prompt().unwrap()), "first");
    assert_eq!(ed.history().all().collect::<Vec<_>>(), vec!["first", "second", "first"]);
}

#[test]
fn test_down_without_navigation_is_noop() {
    let mut keys = ScriptedKeys::typing("ab");
    keys.push(Key::Down).push(Key::Enter);

    let mut ed = editor(keys);
    assert_eq!(line(ed.prompt().unwrap()), "ab");
}

#[test]
fn test_tab_single_candidate() {
    let mut ed = editor(ScriptedKeys::typing("cons\t\n"));
    assert_eq!(line(ed.prompt().unwrap()), "console");
}

#[test]
fn test_tab_single_candidate_then_continue_typing() {
    let mut ed = editor(ScriptedKeys::typing("head\tr\tfoo\n"));
    assert_eq!(line(ed.prompt().unwrap()), "headers remove foo");
}

#[test]
fn test_tab_multiple_candidates_lists_names() {
    let mut ed = editor(ScriptedKeys::typing("co\t\n"));
    assert_eq!(line(ed.prompt().unwrap()), "co");

    let out = output(&ed);
    assert!(out.contains("console\tcookies"));
    assert!(out.contains("\r\n> co"));
}

#[test]
fn test_up_on_empty_history_keeps_line() {
    let mut keys = ScriptedKeys::typing("ab");
    keys.push(Key::Up).push(Key::Enter);

    let mut ed = editor(keys);
    assert_eq!(line(ed.prompt().unwrap()), "ab");
    assert!(!output(&ed).contains("\x1b[K"));
}

#[test]
fn test_tab_common_prefix_extends_buffer() {
    let mut registry = CommandRegistry::new();
    registry.register(Grammar::new("get")).register(Grammar::new("get-data"));
    let tree = Rc::new(CommandTree::build(&registry));

    let keys = ScriptedKeys::typing("g\t\n");
    let mut ed = LineEditor::new(keys, Vec::new(), Rc::clone(&tree), HistoryStore::default());
    assert_eq!(line(ed.prompt().unwrap()), "get");
    let out = output(&ed);
    assert!(out.contains("get\tget-data"));
    assert!(out.contains("\r\n> get"));

    // editing continues from the filled prefix
    let keys = ScriptedKeys::typing("g\t-d\t\n");
    let mut ed = LineEditor::new(keys, Vec::new(), tree, HistoryStore::default());
    assert_eq!(line(ed.prompt().unwrap()), "get-data");
}

#[test]
fn test_tab_no_match_leaves_buffer() {
    let mut ed = editor(ScriptedKeys::typing("zz\t\n"));
    assert_eq!(line(ed.prompt().unwrap()), "zz");
}

#[test]
fn test_end_to_end_history_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("history");

    let keys = ScriptedKeys::typing("get foo\nget foo\n");
    let history = HistoryStore::open(&path, 20, DuplicatePolicy::SuppressConsecutive);
    let mut ed = LineEditor::new(keys, Vec::new(), tree(), history);

    assert_eq!(line(ed.prompt().unwrap()), "get foo");
    assert_eq!(fs::read_to_string(&path).unwrap(), "get foo\n");

    assert_eq!(line(ed.prompt().unwrap()), "get foo");
    assert_eq!(fs::read_to_string(&path).unwrap(), "get foo\n");
    assert_eq!(ed.history().len(), 1);
}

#[test]
fn test_from_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = EditorConfig {
        prompt: "ww> ".to_string(),
        max_line_len: 3,
        history_file: dir.path().join("history"),
        ..EditorConfig::default()
    };

    let mut ed = LineEditor::from_config(&config, ScriptedKeys::typing("abcd\n"), Vec::new(), tree());
    assert_eq!(line(ed.prompt().unwrap()), "abc");
    assert!(output(&ed).starts_with("ww> abc"));
    assert!(dir.path().join("history").exists());
}
