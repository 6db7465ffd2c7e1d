use super::impls::deserialize_level_filter;
use serde::Deserialize;
use std::{collections::HashMap, path::PathBuf};

#[cfg(windows)]
pub const DEFAULT_PYTHON: &str = "python";
#[cfg(not(windows))]
pub const DEFAULT_PYTHON: &str = "python3";

pub const DEFAULT_MANIFEST: &str = "requirements.txt";
pub const DEFAULT_ENV_DIR: &str = "venv";
pub const DEFAULT_RETRY_DELAY_MS: u64 = 3000;

#[derive(Deserialize, Default, Clone, Debug)]
#[serde(deny_unknown_fields)]
pub struct PartialConfig {
    #[serde(deserialize_with = "deserialize_level_filter", default)]
    pub log_level: Option<log::LevelFilter>,
    pub python: Option<String>,
    pub manifest: Option<String>,
    pub env_dir: Option<String>,
    pub retry_delay_ms: Option<u64>,
    pub spinner: Option<bool>,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub log_level: log::LevelFilter,
    /// Interpreter used to run `-m venv`
    pub python: String,
    /// Manifest file name, relative to each environment path
    pub manifest: String,
    /// Environment directory name, relative to each environment path
    pub env_dir: String,
    /// Pause after a non-positive count before prompting again
    pub retry_delay_ms: u64,
    pub spinner: bool,
    pub sources: HashMap<String, String>,
    pub config_files: Vec<PathBuf>,
}
