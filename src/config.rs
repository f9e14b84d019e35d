//! Runtime configuration
//!
//! Read from a JSON file or from `LUCKYDRAW_*` environment variables.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::persistence::DataStore;
use crate::session::DrawSession;

/// Environment variable overriding [`Config::data_dir`]
pub const ENV_DATA_DIR: &str = "LUCKYDRAW_DATA_DIR";
/// Environment variable setting [`Config::seed`]
pub const ENV_SEED: &str = "LUCKYDRAW_SEED";

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where session files are stored
    pub data_dir: PathBuf,
    /// Fixed RNG seed; `None` seeds from the OS
    pub seed: Option<u64>,
    /// List prizes highest number first
    pub descending_prizes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(crate::consts::DEFAULT_DATA_DIR),
            seed: None,
            descending_prizes: false,
        }
    }
}

impl Config {
    /// Defaults overridden by environment variables.
    ///
    /// An unparsable seed is ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key: &str| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(dir) = lookup(ENV_DATA_DIR).filter(|d| !d.is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }
        if let Some(raw) = lookup(ENV_SEED) {
            match raw.trim().parse() {
                Ok(seed) => config.seed = Some(seed),
                Err(_) => log::warn!("Ignoring invalid {ENV_SEED} value {raw:?}"),
            }
        }
        config
    }

    /// Load from a JSON file; missing keys take their defaults
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn store(&self) -> DataStore {
        DataStore::new(&self.data_dir)
    }

    /// New empty session using the configured seed
    pub fn session(&self, name: impl Into<String>) -> DrawSession {
        match self.seed {
            Some(seed) => DrawSession::with_seed(name, seed),
            None => DrawSession::new(name),
        }
    }
}
