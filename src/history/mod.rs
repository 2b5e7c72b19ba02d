//! Command history: a bounded, most-recent-first list of past lines.
//!
//! The store is loaded once from a plain text file and every newly recorded
//! line is appended to that file. Persistence is best effort: any file error
//! degrades the session to in-memory history and is reported only once.

mod navigation;

use std::collections::VecDeque;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

pub use navigation::Navigation;

/// Default number of lines kept in memory.
pub const DEFAULT_MAX_HISTORY_LEN: usize = 20;

/// How `record` treats a line equal to the most recent entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Drop a line identical to `entries[0]`.
    #[default]
    SuppressConsecutive,
    /// Record every line.
    KeepAll,
}

#[derive(Debug)]
pub struct HistoryStore {
    entries: VecDeque<String>,
    max_len: usize,
    policy: DuplicatePolicy,
    nav: Navigation,
    file: Option<PathBuf>,
    // Set once persistence failed; the message is handed out a single time.
    degraded: bool,
    diagnostic: Option<String>,
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_HISTORY_LEN)
    }
}

impl HistoryStore {
    /// In-memory store without a backing file.
    pub fn new(max_len: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_len.min(DEFAULT_MAX_HISTORY_LEN)),
            max_len,
            policy: DuplicatePolicy::default(),
            nav: Navigation::Idle,
            file: None,
            degraded: false,
            diagnostic: None,
        }
    }

    pub fn with_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Store backed by `path`: existing lines are loaded and new lines are
    /// appended there.
    pub fn open(path: impl Into<PathBuf>, max_len: usize, policy: DuplicatePolicy) -> Self {
        let path = path.into();
        let mut store = Self::new(max_len).with_policy(policy);
        store.load(&path);
        store.file = Some(path);
        store
    }

    /// Record a completed line. Returns `false` when the duplicate policy
    /// dropped it.
    pub fn record(&mut self, line: &str) -> bool {
        self.nav = Navigation::Idle;
        if self.policy == DuplicatePolicy::SuppressConsecutive
            && self.entries.front().map(String::as_str) == Some(line)
        {
            return false;
        }
        self.push_front(line.to_string());
        true
    }

    /// Record a line and append it to the backing file, if any.
    pub fn record_and_persist(&mut self, line: &str) {
        if !self.record(line) {
            return;
        }
        if let Some(path) = self.file.clone() {
            self.append_to_file(&path, line);
        }
    }

    /// All entries, most recent first.
    pub fn all(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.entries.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_len(&self) -> usize {
        self.max_len
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Replace the in-memory entries with the contents of `path`.
    ///
    /// The file lists the oldest line first. A missing file is created empty;
    /// any other failure leaves the history empty.
    pub fn load(&mut self, path: &Path) {
        self.entries.clear();
        match read_or_create(path) {
            Ok(contents) => {
                for line in contents.lines().map(str::trim).filter(|l| !l.is_empty()) {
                    self.push_front(line.to_string());
                }
                tracing::info!(path = %path.display(), entries = self.entries.len(), "restored history");
            }
            Err(e) => self.degrade(format!("Could not restore session history: {e:#}")),
        }
    }

    /// Append `line` to `path`, opening and closing the file for this write.
    pub fn append_to_file(&mut self, path: &Path, line: &str) {
        if self.degraded {
            return;
        }
        if let Err(e) = append_line(path, line) {
            self.degrade(format!("Unable to store command history: {e:#}"));
        }
    }

    /// The one-time persistence diagnostic, if one is pending.
    pub fn take_diagnostic(&mut self) -> Option<String> {
        self.diagnostic.take()
    }

    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Reset navigation at the start of a prompt.
    pub fn begin_prompt(&mut self) {
        self.nav = Navigation::Idle;
    }

    pub fn navigation(&self) -> &Navigation {
        &self.nav
    }

    /// Step to the next older entry. `current` becomes the draft when this
    /// is the first step of the prompt. Returns the text to load, or `None`
    /// when already at the oldest entry.
    pub fn older(&mut self, current: &str) -> Option<&str> {
        let next = self.nav.index().map_or(0, |i| i + 1);
        if next >= self.entries.len() {
            return None;
        }
        self.nav = std::mem::take(&mut self.nav).step_to(next, current);
        self.entries.get(next).map(String::as_str)
    }

    /// Step to the next newer entry, ending with the draft. Returns `None`
    /// when not navigating.
    pub fn newer(&mut self) -> Option<String> {
        let (index, draft) = std::mem::take(&mut self.nav).into_parts()?;
        match index.checked_sub(1) {
            None => Some(draft),
            Some(prev) => {
                let text = self.entries.get(prev).cloned().unwrap_or_default();
                self.nav = Navigation::At { index: prev, draft };
                Some(text)
            }
        }
    }

    fn push_front(&mut self, line: String) {
        self.entries.push_front(line);
        while self.entries.len() > self.max_len {
            self.entries.pop_back();
        }
    }

    fn degrade(&mut self, message: String) {
        tracing::warn!("{message}");
        if !self.degraded {
            self.degraded = true;
            self.diagnostic = Some(message);
        }
    }
}

fn read_or_create(path: &Path) -> anyhow::Result<String> {
    if !path.exists() {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create history directory: {}", parent.display()))?;
        }
        fs::File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
        return Ok(String::new());
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

fn append_line(path: &Path, line: &str) -> anyhow::Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    writeln!(file, "{line}").with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(lines: &[&str]) -> HistoryStore {
        let mut store = HistoryStore::new(DEFAULT_MAX_HISTORY_LEN);
        for line in lines {
            store.record(line);
        }
        store
    }

    #[test]
    fn test_record_most_recent_first() {
        let store = store_with(&["a", "b", "c"]);
        assert_eq!(store.all().collect::<Vec<_>>(), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_bounded_evicts_oldest() {
        let mut store = HistoryStore::new(20);
        for i in 0..21 {
            store.record(&format!("cmd {i}"));
        }
        assert_eq!(store.len(), 20);
        assert_eq!(store.get(0), Some("cmd 20"));
        assert_eq!(store.get(19), Some("cmd 1"));
        assert!(store.all().all(|l| l != "cmd 0"));
    }

    #[test]
    fn test_large_bound_does_not_preallocate() {
        let mut store = HistoryStore::new(usize::MAX);
        assert_eq!(store.max_len(), usize::MAX);
        store.record("get");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_consecutive_duplicates_suppressed() {
        let mut store = store_with(&["get foo"]);
        assert!(!store.record("get foo"));
        assert_eq!(store.len(), 1);

        // only consecutive ones
        store.record("post bar");
        assert!(store.record("get foo"));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_keep_all_policy_records_duplicates() {
        let mut store = HistoryStore::new(5).with_policy(DuplicatePolicy::KeepAll);
        assert!(store.record("x"));
        assert!(store.record("x"));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_load_missing_file_creates_it() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("history");

        let mut store = HistoryStore::new(20);
        store.load(&path);

        assert!(store.is_empty());
        assert!(path.exists());
        assert!(store.take_diagnostic().is_none());
    }

    #[test]
    fn test_load_orders_and_bounds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history");
        fs::write(&path, "one\ntwo\nthree\nfour\n").unwrap();

        let mut store = HistoryStore::new(3);
        store.load(&path);

        assert_eq!(store.all().collect::<Vec<_>>(), vec!["four", "three", "two"]);
    }

    #[test]
    fn test_load_failure_degrades_once() {
        let dir = tempfile::tempdir().unwrap();
        // a directory cannot be read as a file
        let mut store = HistoryStore::new(20);
        store.load(dir.path());

        assert!(store.is_empty());
        assert!(store.is_degraded());
        assert!(store.take_diagnostic().is_some());

        store.append_to_file(dir.path(), "ignored");
        assert!(store.take_diagnostic().is_none());
    }

    #[test]
    fn test_record_and_persist_appends_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history");

        let mut store = HistoryStore::open(&path, 20, DuplicatePolicy::SuppressConsecutive);
        store.record_and_persist("get foo");
        store.record_and_persist("get foo");
        store.record_and_persist("post bar");

        assert_eq!(fs::read_to_string(&path).unwrap(), "get foo\npost bar\n");

        let reopened = HistoryStore::open(&path, 20, DuplicatePolicy::SuppressConsecutive);
        assert_eq!(reopened.all().collect::<Vec<_>>(), vec!["post bar", "get foo"]);
    }

    #[test]
    fn test_append_failure_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = HistoryStore::new(20);
        store.append_to_file(dir.path(), "line");

        assert!(store.is_degraded());
        assert!(store.take_diagnostic().unwrap().contains("Unable to store"));
    }

    #[test]
    fn test_navigation_round_trip_restores_draft() {
        let mut store = store_with(&["first", "second"]);
        store.begin_prompt();

        assert_eq!(store.older("draft text"), Some("second"));
        assert_eq!(store.older("ignored"), Some("first"));
        assert_eq!(store.older("ignored"), None);
        assert_eq!(store.navigation().index(), Some(1));

        assert_eq!(store.newer().as_deref(), Some("second"));
        assert_eq!(store.newer().as_deref(), Some("draft text"));
        assert_eq!(store.newer(), None);
        assert_eq!(store.navigation(), &Navigation::Idle);
    }

    #[test]
    fn test_navigation_on_empty_history() {
        let mut store = HistoryStore::new(20);
        assert_eq!(store.older("x"), None);
        assert_eq!(store.newer(), None);
    }
}
