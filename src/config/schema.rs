//! Configuration schema

use crate::rules::{Rule, RuleSet};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub general: GeneralConfig,

    /// Watched asset folders
    #[serde(default, rename = "watch")]
    pub watches: Vec<WatchConfig>,

    /// Import rules, in precedence order
    #[serde(default, rename = "rule")]
    pub rules: Vec<Rule>,
}

impl Config {
    /// The rules as a [`RuleSet`]
    pub fn rule_set(&self) -> RuleSet {
        RuleSet::new(self.rules.clone())
    }
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Directory asset paths are made relative to before matching
    #[serde(default)]
    pub asset_root: Option<PathBuf>,

    /// Seconds to wait before processing a file again (debounce)
    #[serde(default = "default_debounce")]
    pub debounce_seconds: u64,

    /// Polling interval in seconds for watching file changes
    #[serde(default = "default_polling_interval")]
    pub polling_interval_secs: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            asset_root: None,
            debounce_seconds: default_debounce(),
            polling_interval_secs: default_polling_interval(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_debounce() -> u64 {
    2
}

fn default_polling_interval() -> u64 {
    5
}

/// Configuration for a watched folder
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Path to watch
    pub path: PathBuf,

    /// Watch subdirectories recursively
    #[serde(default = "default_recursive")]
    pub recursive: bool,
}

fn default_recursive() -> bool {
    true
}
