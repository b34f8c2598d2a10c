//! Snapshot file persistence
//!
//! The snapshot file records the comment state as of the last generated
//! migration. A missing file means nothing has been generated yet; a file that
//! exists but does not parse is an error, since silently starting from an
//! empty snapshot would re-emit every comment.

use schemanote_core::Comments;
use std::path::{Path, PathBuf};

/// File name of the snapshot inside the output directory
pub const SNAPSHOT_FILE_NAME: &str = "comments-latest.json";

/// Reads and writes the snapshot file of one output directory
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Store for `<output_dir>/comments-latest.json`
    pub fn new(output_dir: &Path) -> Self {
        Self {
            path: output_dir.join(SNAPSHOT_FILE_NAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the recorded snapshot, or an empty one if none exists
    pub fn load(&self) -> Result<Comments, SnapshotError> {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "no snapshot file, starting empty");
            return Ok(Comments::new());
        }

        let contents = std::fs::read_to_string(&self.path)
            .map_err(|e| SnapshotError::IoError(self.path.display().to_string(), e.to_string()))?;

        Comments::from_json(&contents)
            .map_err(|e| SnapshotError::ParseError(self.path.display().to_string(), e.to_string()))
    }

    /// Replace the recorded snapshot
    pub fn save(&self, comments: &Comments) -> Result<(), SnapshotError> {
        let json = comments
            .to_json_pretty()
            .map_err(|e| SnapshotError::SerializeError(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| SnapshotError::IoError(parent.display().to_string(), e.to_string()))?;
        }

        std::fs::write(&self.path, json)
            .map_err(|e| SnapshotError::IoError(self.path.display().to_string(), e.to_string()))?;

        tracing::debug!(path = %self.path.display(), tables = comments.len(), "snapshot saved");
        Ok(())
    }
}

/// Snapshot error types
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("IO error on {0}: {1}")]
    IoError(String, String),

    #[error("Failed to parse snapshot {0}: {1}")]
    ParseError(String, String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
