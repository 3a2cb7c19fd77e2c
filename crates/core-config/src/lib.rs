//! Configuration loading and parsing.
//!
//! Parses `oxline.toml` (or an override path supplied by the binary). Every
//! field has a default so a missing file, a missing section, or an unknown
//! key all degrade to defaults; a malformed file is logged at warn and also
//! falls back to defaults rather than aborting startup.
//!
//! ```toml
//! [editor]
//! char_limit = 0              # 0 = unlimited
//! kill_ring_capacity = 30
//!
//! [completion]
//! whole_line_prefixes = ["#!", "@!"]
//! external_timeout_ms = 2000
//! box_height = 8
//! min_item_width = 12
//! specs = ["complete -W 'start stop status' svc"]
//!
//! [history]
//! box_height = 10
//! filter = "all"              # all | directory | session
//! sort = "recent"             # recent | relevance | alphabetical
//!
//! [suggestions]
//! enabled = true
//! ```

use anyhow::Result;
pub use core_history::{FilterMode, SortMode};
use serde::Deserialize;
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "oxline.toml";

#[derive(Debug, Deserialize, Clone)]
pub struct EditorConfig {
    #[serde(default)]
    pub char_limit: usize,
    #[serde(default = "EditorConfig::default_kill_ring_capacity")]
    pub kill_ring_capacity: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            char_limit: 0,
            kill_ring_capacity: Self::default_kill_ring_capacity(),
        }
    }
}

impl EditorConfig {
    const fn default_kill_ring_capacity() -> usize {
        30
    }

    /// `None` when unlimited.
    pub fn char_limit(&self) -> Option<usize> {
        (self.char_limit > 0).then_some(self.char_limit)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct CompletionConfig {
    #[serde(default = "CompletionConfig::default_prefixes")]
    pub whole_line_prefixes: Vec<String>,
    #[serde(default = "CompletionConfig::default_timeout_ms")]
    pub external_timeout_ms: u64,
    #[serde(default = "CompletionConfig::default_box_height")]
    pub box_height: u16,
    #[serde(default = "CompletionConfig::default_min_item_width")]
    pub min_item_width: u16,
    #[serde(default)]
    pub specs: Vec<String>,
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            whole_line_prefixes: Self::default_prefixes(),
            external_timeout_ms: Self::default_timeout_ms(),
            box_height: Self::default_box_height(),
            min_item_width: Self::default_min_item_width(),
            specs: Vec::new(),
        }
    }
}

impl CompletionConfig {
    fn default_prefixes() -> Vec<String> {
        vec!["#!".to_string(), "@!".to_string()]
    }
    const fn default_timeout_ms() -> u64 {
        2000
    }
    const fn default_box_height() -> u16 {
        8
    }
    const fn default_min_item_width() -> u16 {
        12
    }

    pub fn external_timeout(&self) -> Duration {
        Duration::from_millis(self.external_timeout_ms.max(1))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HistoryConfig {
    #[serde(default = "HistoryConfig::default_box_height")]
    pub box_height: u16,
    #[serde(default)]
    pub filter: FilterMode,
    #[serde(default)]
    pub sort: SortMode,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            box_height: Self::default_box_height(),
            filter: FilterMode::default(),
            sort: SortMode::default(),
        }
    }
}

impl HistoryConfig {
    const fn default_box_height() -> u16 {
        10
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct SuggestionConfig {
    #[serde(default = "SuggestionConfig::default_enabled")]
    pub enabled: bool,
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            enabled: Self::default_enabled(),
        }
    }
}

impl SuggestionConfig {
    const fn default_enabled() -> bool {
        true
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ConfigFile {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub completion: CompletionConfig,
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub suggestions: SuggestionConfig,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub path: Option<PathBuf>,
    pub file: ConfigFile, // parsed (or default) data
}

/// Best-effort config path: working directory first, then the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("oxline").join(CONFIG_FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "config_missing_using_defaults");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(
                target: "config",
                path = %path.display(),
                specs = file.completion.specs.len(),
                "config_loaded"
            );
            Ok(Config {
                raw: Some(content),
                path: Some(path),
                file,
            })
        }
        Err(e) => {
            warn!(target: "config", path = %path.display(), error = %e, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}
