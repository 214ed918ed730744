use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{BruteError, Result};
use crate::wordlist;

/// How many probes may be in flight at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Concurrency {
    /// One probe at a time, in word-list order. Reference baseline only.
    Sequential,
    /// Every candidate launched immediately. Risky for large word lists.
    Unbounded,
    /// At most N probes in flight.
    Bounded(NonZeroUsize),
}

impl Concurrency {
    pub fn bounded(limit: usize) -> Result<Self> {
        NonZeroUsize::new(limit)
            .map(Concurrency::Bounded)
            .ok_or_else(|| BruteError::config("concurrency limit must be at least 1"))
    }
}

impl Default for Concurrency {
    fn default() -> Self {
        Concurrency::Bounded(NonZeroUsize::new(DEFAULT_CONCURRENCY).unwrap_or(NonZeroUsize::MIN))
    }
}

pub const DEFAULT_CONCURRENCY: usize = 50;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub host: String,
    pub wordlist_dir: PathBuf,
    pub wordlist_file: String,
    /// Absent, zero or negative means the whole word list.
    pub limit: Option<i64>,
    /// `None` runs unconstrained.
    pub concurrency: Option<usize>,
    pub sequential: bool,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: String::new(),
            wordlist_dir: PathBuf::from(wordlist::DEFAULT_DIR),
            wordlist_file: wordlist::DEFAULT_FILE.to_string(),
            limit: None,
            concurrency: Some(DEFAULT_CONCURRENCY),
            sequential: false,
            timeout_secs: 10,
            connect_timeout_secs: 5,
            user_agent: concat!("path-hunter/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl Config {
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .map_err(|e| BruteError::config(format!("cannot read config {}: {e}", path.display())))?;
        serde_json::from_str(&data)
            .map_err(|e| BruteError::config(format!("invalid config {}: {e}", path.display())))
    }

    pub fn validate(&self) -> Result<()> {
        if self.host.trim().is_empty() {
            return Err(BruteError::config("host must not be empty"));
        }
        if self.concurrency == Some(0) {
            return Err(BruteError::config("concurrency limit must be at least 1"));
        }
        if self.timeout_secs == 0 {
            return Err(BruteError::config("timeout must be at least 1 second"));
        }
        if self.wordlist_file.is_empty() {
            return Err(BruteError::config("word list file name must not be empty"));
        }
        Ok(())
    }

    pub fn concurrency_mode(&self) -> Result<Concurrency> {
        if self.sequential {
            return Ok(Concurrency::Sequential);
        }
        match self.concurrency {
            Some(n) => Concurrency::bounded(n),
            None => Ok(Concurrency::Unbounded),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }
}
