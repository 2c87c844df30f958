use std::path::PathBuf;

use crate::progress::FileProgressStore;
use crate::types::FRAME_MS;

/// Host settings, read from the environment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Interval between session frames (timer resolution)
    pub frame_ms: u32,
    /// Capacity of the command queue
    pub max_pending_commands: usize,
    /// Where progress is saved; `None` disables persistence
    pub progress_path: Option<PathBuf>,
    pub log_path: Option<String>,
    pub log_level: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            frame_ms: FRAME_MS,
            max_pending_commands: 32,
            progress_path: FileProgressStore::default_path(),
            log_path: None,
            log_level: "info".to_string(),
        }
    }
}

impl HostConfig {
    /// Create from environment variables
    ///
    /// - `VOXTRIS_FRAME_MS`: frame interval in ms (default 16, min 1)
    /// - `VOXTRIS_MAX_PENDING`: command queue capacity (default 32)
    /// - `VOXTRIS_PROGRESS_PATH`: progress file (default `<data dir>/voxtris/progress.json`)
    /// - `VOXTRIS_NO_PERSIST`: "1" or "true" disables persistence
    /// - `VOXTRIS_LOG_PATH`: log file; logging is off when unset
    /// - `VOXTRIS_LOG_LEVEL`: log level (default "info")
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();

        let frame_ms = env::var("VOXTRIS_FRAME_MS")
            .ok()
            .and_then(|s| s.parse::<u32>().ok())
            .unwrap_or(defaults.frame_ms)
            .max(1);

        let max_pending_commands = env::var("VOXTRIS_MAX_PENDING")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
            .unwrap_or(defaults.max_pending_commands)
            .max(1);

        let no_persist = env::var("VOXTRIS_NO_PERSIST")
            .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let progress_path = if no_persist {
            None
        } else {
            non_empty_var("VOXTRIS_PROGRESS_PATH")
                .map(PathBuf::from)
                .or(defaults.progress_path)
        };

        let log_path = non_empty_var("VOXTRIS_LOG_PATH");
        let log_level = non_empty_var("VOXTRIS_LOG_LEVEL").unwrap_or(defaults.log_level);

        Self {
            frame_ms,
            max_pending_commands,
            progress_path,
            log_path,
            log_level,
        }
    }

    pub fn persistence_enabled(&self) -> bool {
        self.progress_path.is_some()
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
