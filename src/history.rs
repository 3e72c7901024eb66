//! Persisted history of successful calculations.
//!
//! Stored as JSON at `<data_dir>/zcalc/history.json`. The calculator core
//! never reads or writes it; only the command-line front end does.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// One remembered calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// The input as the user typed it.
    pub input: String,
    pub value: f64,
}

/// Bounded, file-backed history. Oldest entries are dropped first.
#[derive(Debug)]
pub struct History {
    path: PathBuf,
    max_entries: usize,
    entries: VecDeque<HistoryEntry>,
}

impl History {
    /// Default location of the history file, if the platform has a data directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("zcalc").join("history.json"))
    }

    /// Load history from `path`. A missing file yields an empty history.
    pub fn load(path: impl Into<PathBuf>, max_entries: usize) -> Result<Self> {
        let path = path.into();
        let entries: Vec<HistoryEntry> = if path.exists() {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read history file {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse history file {}", path.display()))?
        } else {
            Vec::new()
        };

        let mut history = Self {
            path,
            max_entries,
            entries: entries.into(),
        };
        history.truncate();
        debug!(path = %history.path.display(), entries = history.entries.len(), "loaded history");
        Ok(history)
    }

    /// Load history, falling back to an empty one if the file is unreadable.
    ///
    /// An unreadable file is moved aside to `<name>.bak` so the next save
    /// does not overwrite it.
    pub fn load_or_empty(path: impl Into<PathBuf>, max_entries: usize) -> Self {
        let path = path.into();
        match Self::load(path.clone(), max_entries) {
            Ok(history) => history,
            Err(err) => {
                warn!("{err:#}; starting with empty history");
                if path.exists() {
                    let backup = Self::backup_path(&path);
                    match fs::rename(&path, &backup) {
                        Ok(()) => warn!(backup = %backup.display(), "moved unreadable history aside"),
                        Err(err) => warn!("Failed to back up history file {}: {err}", path.display()),
                    }
                }
                Self {
                    path,
                    max_entries,
                    entries: VecDeque::new(),
                }
            }
        }
    }

    /// `history.json` becomes `history.json.bak`.
    pub fn backup_path(path: &Path) -> PathBuf {
        let mut name = path.file_name().unwrap_or_default().to_os_string();
        name.push(".bak");
        path.with_file_name(name)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn push(&mut self, input: impl Into<String>, value: f64) {
        self.entries.push_back(HistoryEntry {
            input: input.into(),
            value,
        });
        self.truncate();
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Write the history to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }
        let json = serde_json::to_string_pretty(&self.entries)?;
        fs::write(&self.path, json)
            .with_context(|| format!("Failed to write history file {}", self.path.display()))
    }

    fn truncate(&mut self) {
        while self.entries.len() > self.max_entries {
            self.entries.pop_front();
        }
    }
}
