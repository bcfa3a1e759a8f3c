//! Persistence for review layers - save/load JSON files.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::{info, warn};

use crate::error::{EmendError, Result};

use super::layer::ReviewLayer;

const HISTORY_STAMP: &str = "%Y-%m-%dT%H-%M-%S%.3f";

impl ReviewLayer {
    /// Save the review layer to a JSON file.
    ///
    /// The layer is validated first and written through a temporary sibling
    /// file, so an interrupted save never leaves a truncated review behind.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use emend::review::ReviewLayer;
    /// # fn example(review: &ReviewLayer) -> emend::Result<()> {
    /// review.save("notes.review.json")?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.validate()?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_error(parent))?;
        }

        let staging = staging_path(path);
        let mut writer = BufWriter::new(File::create(&staging).map_err(io_error(&staging))?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush().map_err(io_error(&staging))?;
        drop(writer);

        fs::rename(&staging, path).map_err(io_error(path))?;

        info!(
            path = %path.display(),
            document = %self.document.id(),
            accepted = self.summary.suggestions_by_status.accepted,
            "saved review layer"
        );
        Ok(())
    }

    /// Load a review layer from a JSON file.
    ///
    /// The suggestions are checked against the stored document text, so a
    /// hand-edited file with broken spans is rejected here rather than at
    /// render time.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let reader = BufReader::new(File::open(path).map_err(io_error(path))?);
        let layer: ReviewLayer = serde_json::from_reader(reader).map_err(|e| {
            EmendError::Persistence(format!("'{}' is not a review layer: {}", path.display(), e))
        })?;

        layer.validate()?;
        Ok(layer)
    }

    /// Save with version history.
    ///
    /// The previous file is moved unchanged into a `.history` directory,
    /// named after the time it was last updated:
    /// ```text
    /// docs/
    /// ├── notes.review.json           # Current version
    /// └── notes.review.history/
    ///     └── 2026-01-30T10-00-00.000.json # Previous version
    /// ```
    /// A previous file that no longer loads is still kept, stamped with the
    /// current time.
    pub fn save_with_history(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if path.exists() {
            archive(path)?;
        }

        self.save(path)
    }

    /// List all historical versions of a review layer.
    ///
    /// Returns paths sorted by timestamp (newest first).
    pub fn list_history(path: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let history_dir = history_directory(path.as_ref());

        if !history_dir.exists() {
            return Ok(Vec::new());
        }

        let mut entries: Vec<PathBuf> = fs::read_dir(&history_dir)
            .map_err(io_error(&history_dir))?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();

        entries.sort_by(|a, b| b.cmp(a));

        Ok(entries)
    }

    /// Load a specific historical version (0 is the newest).
    pub fn load_history(path: impl AsRef<Path>, index: usize) -> Result<Self> {
        let history = Self::list_history(&path)?;

        match history.get(index) {
            Some(version) => Self::load(version),
            None => Err(EmendError::NotFound(format!(
                "history version {} (only {} versions available)",
                index,
                history.len()
            ))),
        }
    }
}

/// Move the current review file into its history directory.
fn archive(path: &Path) -> Result<()> {
    let stamp = match ReviewLayer::load(path) {
        Ok(existing) => existing.updated_at,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "archiving unreadable review file");
            Utc::now()
        }
    };

    let history_dir = history_directory(path);
    fs::create_dir_all(&history_dir).map_err(io_error(&history_dir))?;

    let target = history_dir.join(format!("{}.json", stamp.format(HISTORY_STAMP)));
    fs::rename(path, &target).map_err(io_error(&target))
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> EmendError + '_ {
    move |source| EmendError::Io {
        path: path.to_path_buf(),
        source,
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Get the history directory for a review file.
pub fn history_directory(path: &Path) -> PathBuf {
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let parent = path.parent().unwrap_or(Path::new("."));

    parent.join(format!("{}.history", stem))
}

/// Generate a review file path for a document.
///
/// # Example
///
/// ```
/// use emend::review::review_path;
///
/// let path = review_path("docs/notes.txt");
/// assert_eq!(path.to_string_lossy(), "docs/notes.review.json");
/// ```
pub fn review_path(document_path: impl AsRef<Path>) -> PathBuf {
    sibling_path(document_path.as_ref(), ".review.json")
}

/// Generate the export path for a document's rendered text.
///
/// # Example
///
/// ```
/// use emend::review::export_path;
///
/// let path = export_path("docs/notes.txt");
/// assert_eq!(path.to_string_lossy(), "docs/notes_improved.txt");
/// ```
pub fn export_path(document_path: impl AsRef<Path>) -> PathBuf {
    sibling_path(document_path.as_ref(), "_improved.txt")
}

fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let parent = path.parent().unwrap_or(Path::new("."));

    parent.join(format!("{}{}", stem, suffix))
}
