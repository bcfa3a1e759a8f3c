//! Snapshot stores for rendered text.
//!
//! A snapshot is the rendered document at some point during review. The
//! session writes one after every status change when a store is attached.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::document::DocumentId;
use crate::error::{EmendError, Result};

/// Somewhere to keep the latest rendered text of each document.
pub trait SnapshotStore: Send + Sync {
    /// Store `rendered` as the latest snapshot of `document`.
    fn save_snapshot(&mut self, document: &DocumentId, rendered: &str) -> Result<()>;

    /// Latest snapshot of `document`, if one was saved.
    fn load_snapshot(&self, document: &DocumentId) -> Result<Option<String>>;
}

/// In-memory snapshots, mostly for tests and the review server.
#[derive(Debug, Default, Clone)]
pub struct MemorySnapshotStore {
    snapshots: HashMap<DocumentId, String>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl SnapshotStore for MemorySnapshotStore {
    fn save_snapshot(&mut self, document: &DocumentId, rendered: &str) -> Result<()> {
        self.snapshots.insert(document.clone(), rendered.to_string());
        Ok(())
    }

    fn load_snapshot(&self, document: &DocumentId) -> Result<Option<String>> {
        Ok(self.snapshots.get(document).cloned())
    }
}

/// Snapshots written as `<dir>/<document_id>.txt`.
#[derive(Debug, Clone)]
pub struct DirectorySnapshotStore {
    dir: PathBuf,
}

impl DirectorySnapshotStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn snapshot_path(&self, document: &DocumentId) -> PathBuf {
        self.dir.join(format!("{}.txt", document))
    }
}

impl SnapshotStore for DirectorySnapshotStore {
    fn save_snapshot(&mut self, document: &DocumentId, rendered: &str) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|e| EmendError::Io {
            path: self.dir.clone(),
            source: e,
        })?;

        let path = self.snapshot_path(document);
        fs::write(&path, rendered).map_err(|e| EmendError::Io {
            path: path.clone(),
            source: e,
        })?;

        debug!(path = %path.display(), bytes = rendered.len(), "wrote snapshot");
        Ok(())
    }

    fn load_snapshot(&self, document: &DocumentId) -> Result<Option<String>> {
        let path = self.snapshot_path(document);
        if !path.exists() {
            return Ok(None);
        }

        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| EmendError::Io { path, source: e })
    }
}
