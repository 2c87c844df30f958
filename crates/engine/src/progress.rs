//! Progress persistence
//!
//! The run's `{level, score, linesCleared}` record is stored as a small JSON
//! document. Loading never fails: a missing, empty or malformed record means
//! "no prior progress" and yields the defaults.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::types::Progress;

/// Decode a persisted record, falling back to defaults on anything unusable
pub fn decode_progress(raw: Option<&str>) -> Progress {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Progress::default();
    };

    match serde_json::from_str::<Progress>(raw) {
        Ok(progress) => progress.sanitized(),
        Err(e) => {
            log::warn!("Failed to restore progress, starting fresh: {}", e);
            Progress::default()
        }
    }
}

pub fn encode_progress(progress: &Progress) -> String {
    // Three integer fields; serialization cannot fail.
    serde_json::to_string(progress).unwrap_or_default()
}

/// Durable home of the progress record
pub trait ProgressStore: Send {
    /// Load the last saved record, or defaults
    fn load(&self) -> Progress;

    fn save(&mut self, progress: &Progress) -> Result<()>;
}

/// Store backed by a JSON file
#[derive(Debug, Clone)]
pub struct FileProgressStore {
    path: PathBuf,
}

impl FileProgressStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data dir>/voxtris/progress.json`, if the platform has a data dir
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("voxtris").join("progress.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProgressStore for FileProgressStore {
    fn load(&self) -> Progress {
        match fs::read_to_string(&self.path) {
            Ok(raw) => decode_progress(Some(&raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Progress::default(),
            Err(e) => {
                log::warn!("Failed to read {}: {}", self.path.display(), e);
                Progress::default()
            }
        }
    }

    fn save(&mut self, progress: &Progress) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
        fs::write(&self.path, encode_progress(progress))
            .with_context(|| format!("writing {}", self.path.display()))?;
        Ok(())
    }
}

/// In-memory store holding the raw JSON text
#[derive(Debug, Clone, Default)]
pub struct MemoryProgressStore {
    raw: Option<String>,
}

impl MemoryProgressStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with arbitrary text, valid or not
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            raw: Some(raw.into()),
        }
    }

    pub fn raw(&self) -> Option<&str> {
        self.raw.as_deref()
    }
}

impl ProgressStore for MemoryProgressStore {
    fn load(&self) -> Progress {
        decode_progress(self.raw.as_deref())
    }

    fn save(&mut self, progress: &Progress) -> Result<()> {
        self.raw = Some(encode_progress(progress));
        Ok(())
    }
}
