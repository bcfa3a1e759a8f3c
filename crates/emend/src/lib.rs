//! Emend: a suggestion patch engine for reviewing text edits.
//!
//! Emend scans a document for candidate edits, records each one as a span
//! over the original text with a replacement and rationale, and lets a
//! reviewer accept or reject them one at a time. The current document is
//! always rebuilt from the untouched original plus the current statuses, so
//! accepting one edit can never shift the offsets of another.
//!
//! # Core Principles
//!
//! - **Non-destructive**: The original text is never modified
//! - **Replayable**: Every rendering starts again from the original
//! - **Deterministic**: The same text and rules always give the same batch
//!
//! # Example
//!
//! ```
//! use emend::review::{ReviewLayer, SuggestionStatus};
//! use emend::suggestion::SuggestionId;
//! use emend::Emend;
//!
//! let result = Emend::new()
//!     .analyze_text("doc_001", "Performance at end of Q2 was strong.")
//!     .unwrap();
//! let mut review = ReviewLayer::from_analysis(result);
//!
//! review.set_status(SuggestionId(1), SuggestionStatus::Accepted).unwrap();
//! assert_eq!(
//!     review.rendered().unwrap(),
//!     "Performance at the end of Q2 was strong."
//! );
//! ```

pub mod document;
pub mod error;
pub mod readability;
pub mod render;
pub mod review;
pub mod session;
pub mod suggestion;

mod emend;

pub use crate::emend::{AnalysisResult, Emend, EmendConfig};
pub use document::{Document, DocumentId, DocumentSource};
pub use error::{EmendError, Result};
pub use readability::{calculate_readability, ReadabilityMetrics, ReadingLevel, TextStatistics};
pub use render::{PatchRenderer, Segment};
pub use review::{ReviewLayer, SuggestionLedger, SuggestionStatus};
pub use session::{BatchId, DocumentEntry, DocumentState, IngestionTicket, ReviewSession};
pub use suggestion::{Category, Rule, RuleSet, Suggestion, SuggestionBatch, SuggestionEngine, SuggestionId};
