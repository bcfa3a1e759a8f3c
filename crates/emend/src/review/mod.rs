//! Review state for a document's suggestions.
//!
//! The review layer is a JSON document that holds a document's original text,
//! the suggestions generated for it and the status of each one. It sits
//! alongside the original file without modifying it.
//!
//! # Overview
//!
//! ```text
//! docs/
//! ├── notes.txt                  # Original text (never modified)
//! ├── notes.review.json          # Review layer
//! └── notes_improved.txt         # Exported rendering
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use emend::Emend;
//! use emend::review::{review_path, ReviewLayer};
//! use emend::suggestion::SuggestionId;
//!
//! let result = Emend::new().analyze_file("notes.txt").unwrap();
//! let mut review = ReviewLayer::from_analysis(result);
//!
//! review.accept(SuggestionId(1)).unwrap();
//! review.reject(SuggestionId(2)).unwrap();
//! println!("{}", review.rendered().unwrap());
//!
//! review.save(review_path("notes.txt")).unwrap();
//! ```

mod layer;
mod ledger;
mod persistence;
mod snapshot;
mod status;

pub use layer::{CategoryCounts, ReviewLayer, ReviewSummary, EMEND_VERSION};
pub use ledger::{StatusCounts, SuggestionLedger};
pub use persistence::{export_path, history_directory, review_path};
pub use snapshot::{DirectorySnapshotStore, MemorySnapshotStore, SnapshotStore};
pub use status::SuggestionStatus;
