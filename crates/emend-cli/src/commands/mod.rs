//! CLI command implementations.

pub mod analyze;
pub mod batch;
pub mod decide;
pub mod diff;
pub mod export;
pub mod readability;
pub mod review;
pub mod status;

use std::path::{Path, PathBuf};

use emend::review::{review_path, ReviewLayer};
use emend::{Emend, EmendConfig};

const REVIEW_SUFFIX: &str = ".review.json";

/// Whether `file` is a review file rather than a document.
pub fn is_review_file(file: &Path) -> bool {
    file.to_string_lossy().ends_with(REVIEW_SUFFIX)
}

/// The review file for a document, or `file` itself if it already is one.
pub fn review_file(file: &Path) -> PathBuf {
    if is_review_file(file) {
        file.to_path_buf()
    } else {
        review_path(file)
    }
}

/// `docs/notes.review.json` -> `docs/notes`, `docs/notes.txt` -> `docs/notes`.
pub fn document_stem(file: &Path) -> PathBuf {
    let name = file.file_name().unwrap_or_default().to_string_lossy();
    let stem = match name.strip_suffix(REVIEW_SUFFIX) {
        Some(stem) => stem.to_string(),
        None => file.file_stem().unwrap_or_default().to_string_lossy().into_owned(),
    };
    file.with_file_name(stem)
}

/// Load the review layer for a document or review file.
pub fn load_review(file: &Path) -> Result<(ReviewLayer, PathBuf), Box<dyn std::error::Error>> {
    let path = review_file(file);

    if !path.exists() {
        return Err(format!(
            "Review file not found: {}\nRun 'emend analyze {}' first.",
            path.display(),
            file.display()
        )
        .into());
    }

    let layer = ReviewLayer::load(&path)?;
    Ok((layer, path))
}

/// Build the analysis engine, with a custom rule table if given.
pub fn build_emend(rules: Option<&Path>) -> Result<Emend, Box<dyn std::error::Error>> {
    match rules {
        Some(path) => {
            let config = EmendConfig::new().with_rules_file(path)?;
            Ok(Emend::with_config(config)?)
        }
        None => Ok(Emend::new()),
    }
}
