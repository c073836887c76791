//! Runtime configuration read from the environment

use crate::state_machine::state::DEFAULT_PLACEHOLDER_PARTICIPANT;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::PathBuf;

pub const LOG_PATH_VAR: &str = "CARECHAT_LOG_PATH";
pub const PLACEHOLDER_VAR: &str = "CARECHAT_PLACEHOLDER_ID";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// JSON log destination. Logging is off when unset since the UI owns stdout.
    pub log_path: Option<PathBuf>,
    /// Participant paired with the active user on conversation start
    pub placeholder_participant: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_path: None,
            placeholder_participant: DEFAULT_PLACEHOLDER_PARTICIPANT.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Self {
            log_path: get(LOG_PATH_VAR).map(PathBuf::from),
            placeholder_participant: get(PLACEHOLDER_VAR)
                .unwrap_or(defaults.placeholder_participant),
        }
    }

    /// Open the log file for appending, creating parent directories
    pub fn open_log_file(&self) -> io::Result<Option<File>> {
        let Some(path) = &self.log_path else {
            return Ok(None);
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map(Some)
    }
}
