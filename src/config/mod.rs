//! Editor configuration.
//!
//! Settings live in `~/.waspline/config.json` (or the file named by
//! `WASPLINE_CONFIG`). Every field is optional; missing ones take their
//! defaults, so an absent file is the same as `{}`.
//!
//! ```json
//! {
//!   "prompt": "> ",
//!   "max_history_len": 20,
//!   "max_line_len": 1024,
//!   "history_file": "/home/user/.waspline/history",
//!   "duplicates": "suppress_consecutive",
//!   "escape_scheme": "unix"
//! }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::editor::{DEFAULT_MAX_LINE_LEN, DEFAULT_PROMPT};
use crate::history::{DEFAULT_MAX_HISTORY_LEN, DuplicatePolicy, HistoryStore};
use crate::input::EscapeScheme;

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "WASPLINE_CONFIG";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub prompt: String,
    pub max_history_len: usize,
    pub max_line_len: usize,
    pub history_file: PathBuf,
    pub duplicates: DuplicatePolicy,
    /// Byte conventions used when input is not an interactive terminal.
    pub escape_scheme: EscapeScheme,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            prompt: DEFAULT_PROMPT.to_string(),
            max_history_len: DEFAULT_MAX_HISTORY_LEN,
            max_line_len: DEFAULT_MAX_LINE_LEN,
            history_file: data_dir().join("history"),
            duplicates: DuplicatePolicy::default(),
            escape_scheme: EscapeScheme::host(),
        }
    }
}

impl EditorConfig {
    /// Load from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let config =
            serde_json::from_str(&raw).with_context(|| format!("Invalid config JSON at {}", path.display()))?;
        Ok(config)
    }

    /// Like [`load`](Self::load), falling back to defaults on any error.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Using default configuration: {:#}", e);
                Self::default()
            }
        }
    }

    /// History store backed by `history_file`.
    pub fn open_history(&self) -> HistoryStore {
        HistoryStore::open(&self.history_file, self.max_history_len, self.duplicates)
    }
}

/// Per-user data directory: `~/.waspline`.
pub fn data_dir() -> PathBuf {
    let home = std::env::var_os("HOME").map(PathBuf::from).unwrap_or_else(|| PathBuf::from("."));
    home.join(".waspline")
}

/// Config file location, honoring `WASPLINE_CONFIG`.
pub fn default_config_path() -> PathBuf {
    std::env::var_os(CONFIG_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| data_dir().join("config.json"))
}
