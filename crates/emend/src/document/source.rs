//! Document sources and file ingestion.
//!
//! Reading a file never fails from the caller's point of view: anything that
//! cannot be decoded as text is replaced with a marked placeholder and the
//! source records `decoded = false`.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

/// Extensions read as plain text.
const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "text", "md", "markdown", "csv", "tsv", "log", "json", "html", "htm", "rtf", "xml",
];

/// Metadata about where a document's text came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSource {
    /// File name without path, or `untitled` for pasted text.
    pub file: String,
    /// Full path to the file, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// SHA-256 hash of the decoded text.
    pub hash: String,
    /// Size of the decoded text in bytes.
    pub size_bytes: u64,
    /// Detected format (txt, md, csv, text, ...).
    pub format: String,
    /// False when the text is a placeholder standing in for unreadable content.
    pub decoded: bool,
    /// When the text was captured.
    pub ingested_at: DateTime<Utc>,
}

impl DocumentSource {
    /// Source for text that did not come from a file.
    pub fn inline(text: &str) -> Self {
        Self {
            file: "untitled".to_string(),
            path: None,
            hash: hash_text(text),
            size_bytes: text.len() as u64,
            format: "text".to_string(),
            decoded: true,
            ingested_at: Utc::now(),
        }
    }

    fn for_file(path: &Path, text: &str, format: String, decoded: bool) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path: Some(path.to_path_buf()),
            hash: hash_text(text),
            size_bytes: text.len() as u64,
            format,
            decoded,
            ingested_at: Utc::now(),
        }
    }
}

/// Decoded text of a file together with its source metadata.
#[derive(Debug, Clone)]
pub struct Ingested {
    pub text: String,
    pub source: DocumentSource,
}

/// Read a file as a single normalized text string.
///
/// Plain-text formats are decoded as UTF-8 with a leading byte-order mark
/// removed and CRLF line endings folded to LF. Unreadable files and
/// non-text formats yield a placeholder string instead of an error.
pub fn read_document(path: impl AsRef<Path>) -> Ingested {
    let path = path.as_ref();
    let name = path
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let format = detect_format(path);

    if !TEXT_EXTENSIONS.contains(&format.as_str()) && format != "text" {
        warn!(file = %name, format = %format, "unsupported format, substituting placeholder");
        let text = format!("Unsupported content in {}.", name);
        let source = DocumentSource::for_file(path, &text, format, false);
        return Ingested { text, source };
    }

    let decoded = fs::read(path)
        .map_err(|e| e.to_string())
        .and_then(|bytes| String::from_utf8(bytes).map_err(|e| e.to_string()));

    match decoded {
        Ok(raw) => {
            let text = normalize(&raw);
            info!(file = %name, bytes = text.len(), "ingested document");
            let source = DocumentSource::for_file(path, &text, format, true);
            Ingested { text, source }
        }
        Err(e) => {
            warn!(file = %name, error = %e, "could not decode file, substituting placeholder");
            let text = format!("Error reading {}.", name);
            let source = DocumentSource::for_file(path, &text, format, false);
            Ingested { text, source }
        }
    }
}

/// Lowercased extension, or `text` when there is none.
fn detect_format(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_else(|| "text".to_string())
}

fn normalize(raw: &str) -> String {
    raw.strip_prefix('\u{feff}')
        .unwrap_or(raw)
        .replace("\r\n", "\n")
}

fn hash_text(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("sha256:{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::Builder;

    fn temp_file(suffix: &str, bytes: &[u8]) -> tempfile::NamedTempFile {
        let mut file = Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(bytes).unwrap();
        file
    }

    #[test]
    fn test_read_text_file() {
        let file = temp_file(".txt", "\u{feff}Line one\r\nLine two".as_bytes());
        let ingested = read_document(file.path());

        assert_eq!(ingested.text, "Line one\nLine two");
        assert!(ingested.source.decoded);
        assert_eq!(ingested.source.format, "txt");
        assert!(ingested.source.hash.starts_with("sha256:"));
    }

    #[test]
    fn test_invalid_utf8_becomes_placeholder() {
        let file = temp_file(".txt", &[0xff, 0xfe, 0x00, 0xc3]);
        let ingested = read_document(file.path());

        let name = file.path().file_name().unwrap().to_string_lossy().into_owned();
        assert_eq!(ingested.text, format!("Error reading {}.", name));
        assert!(!ingested.source.decoded);
    }

    #[test]
    fn test_missing_file_becomes_placeholder() {
        let ingested = read_document("/definitely/not/here/notes.md");
        assert_eq!(ingested.text, "Error reading notes.md.");
        assert!(!ingested.source.decoded);
    }

    #[test]
    fn test_unsupported_format() {
        let file = temp_file(".png", &[0x89, b'P', b'N', b'G']);
        let ingested = read_document(file.path());

        assert!(ingested.text.starts_with("Unsupported content in "));
        assert_eq!(ingested.source.format, "png");
        assert!(!ingested.source.decoded);
    }

    #[test]
    fn test_same_text_same_hash() {
        assert_eq!(hash_text("abc"), DocumentSource::inline("abc").hash);
        assert_ne!(hash_text("abc"), hash_text("abd"));
    }
}
