//! Scan-state persistence
//!
//! One JSON file holding the last completed run's timestamp and scan
//! mode. Read failures degrade to first-run semantics; write failures
//! only widen the next incremental window.

#[cfg(test)]
mod tests;

use crate::error::{BotError, Result};
use crate::types::{RunState, ScanMode};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Persists the timestamp and mode of the last completed run
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the checkpoint; any failure yields `None`
    pub fn load(&self) -> Option<RunState> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(
                    "state file not found, starting fresh: {}",
                    self.path.display()
                );
                return None;
            }
            Err(e) => {
                warn!("failed to read state file {}: {}", self.path.display(), e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(state) => {
                debug!("loaded state from {}", self.path.display());
                Some(state)
            }
            Err(e) => {
                warn!(
                    "failed to parse state file {}: {}. Starting fresh.",
                    self.path.display(),
                    e
                );
                None
            }
        }
    }

    /// Overwrite the single stored record
    pub fn save(&self, timestamp_ms: i64, mode: ScanMode) -> Result<()> {
        let state = RunState {
            last_run_timestamp: timestamp_ms,
            last_scan_type: mode,
        };

        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)
                    .map_err(|e| BotError::State(format!("creating {}: {}", dir.display(), e)))?;
            }
        }

        let body = serde_json::to_string_pretty(&state)?;
        fs::write(&self.path, body)
            .map_err(|e| BotError::State(format!("writing {}: {}", self.path.display(), e)))?;

        debug!("saved state to {}", self.path.display());
        Ok(())
    }
}
