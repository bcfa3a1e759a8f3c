//! Review layer - the persisted record of one document's review.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::emend::AnalysisResult;
use crate::error::Result;
use crate::readability::{ReadabilityMetrics, ReadingLevel, TextStatistics};
use crate::render::Segment;
use crate::suggestion::{Category, Suggestion, SuggestionId};

use super::ledger::{StatusCounts, SuggestionLedger};
use super::status::SuggestionStatus;

/// Current version of the emend review format.
pub const EMEND_VERSION: &str = "1.0.0";

/// Suggestion counts per category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCounts {
    pub grammar: usize,
    pub clarity: usize,
    pub style: usize,
    pub general: usize,
}

impl CategoryCounts {
    pub fn get(&self, category: Category) -> usize {
        match category {
            Category::Grammar => self.grammar,
            Category::Clarity => self.clarity,
            Category::Style => self.style,
            Category::General => self.general,
        }
    }

    fn from_suggestions(suggestions: &[Suggestion]) -> Self {
        let mut counts = Self::default();
        for s in suggestions {
            match s.category {
                Category::Grammar => counts.grammar += 1,
                Category::Clarity => counts.clarity += 1,
                Category::Style => counts.style += 1,
                Category::General => counts.general += 1,
            }
        }
        counts
    }
}

/// Summary statistics kept current on every change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewSummary {
    /// Total number of suggestions.
    pub total_suggestions: usize,

    /// Suggestions by category.
    pub suggestions_by_category: CategoryCounts,

    /// Suggestions by review status.
    pub suggestions_by_status: StatusCounts,

    /// Readability band of the original text.
    pub reading_level: ReadingLevel,

    /// Net change in length if every accepted suggestion is applied.
    pub accepted_delta: isize,
}

impl ReviewSummary {
    fn from_ledger(ledger: &SuggestionLedger, readability: &ReadabilityMetrics) -> Self {
        let accepted_delta = ledger
            .entries()
            .filter(|(_, status)| status.applies_replacement())
            .map(|(s, _)| s.length_delta())
            .sum();

        Self {
            total_suggestions: ledger.len(),
            suggestions_by_category: CategoryCounts::from_suggestions(ledger.suggestions()),
            suggestions_by_status: ledger.counts(),
            reading_level: readability.level(),
            accepted_delta,
        }
    }
}

/// The review layer - a document, its suggestions and their statuses.
///
/// The original text is never modified. The current document is always
/// rendered from it on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewLayer {
    /// Version of the emend format.
    pub emend_version: String,

    /// When the review layer was created.
    pub created_at: DateTime<Utc>,

    /// When the review layer was last updated.
    pub updated_at: DateTime<Utc>,

    /// The document under review.
    pub document: Document,

    /// Readability of the original text.
    pub readability: ReadabilityMetrics,

    /// Raw counts behind the readability score.
    pub statistics: TextStatistics,

    /// Suggestions and their statuses.
    pub ledger: SuggestionLedger,

    /// Summary statistics.
    pub summary: ReviewSummary,
}

impl ReviewLayer {
    /// Create a new review layer from analysis results. All suggestions start
    /// pending.
    pub fn from_analysis(result: AnalysisResult) -> Self {
        let now = Utc::now();
        let ledger = SuggestionLedger::new(result.batch);
        let summary = ReviewSummary::from_ledger(&ledger, &result.readability);

        Self {
            emend_version: EMEND_VERSION.to_string(),
            created_at: now,
            updated_at: now,
            document: result.document,
            readability: result.readability,
            statistics: result.statistics,
            ledger,
            summary,
        }
    }

    /// Accept a suggestion.
    pub fn accept(&mut self, id: SuggestionId) -> Result<()> {
        self.set_status(id, SuggestionStatus::Accepted)
    }

    /// Reject a suggestion.
    pub fn reject(&mut self, id: SuggestionId) -> Result<()> {
        self.set_status(id, SuggestionStatus::Rejected)
    }

    /// Return a suggestion to pending.
    pub fn reset(&mut self, id: SuggestionId) -> Result<()> {
        self.set_status(id, SuggestionStatus::Pending)
    }

    pub fn set_status(&mut self, id: SuggestionId, status: SuggestionStatus) -> Result<()> {
        self.ledger.set_status(id, status)?;
        self.touch();
        Ok(())
    }

    /// Move every suggestion in `from` to `to`, optionally only within one
    /// category.
    pub fn bulk_transition(
        &mut self,
        from: SuggestionStatus,
        to: SuggestionStatus,
        category: Option<Category>,
    ) -> Vec<SuggestionId> {
        let changed = self
            .ledger
            .bulk_transition_where(from, to, |s| category.is_none_or(|c| s.category == c));
        if !changed.is_empty() {
            self.touch();
        }
        changed
    }

    /// Get a suggestion by ID.
    pub fn suggestion(&self, id: SuggestionId) -> Option<&Suggestion> {
        self.ledger.suggestion(id)
    }

    /// Get all pending suggestions.
    pub fn pending_suggestions(&self) -> Vec<&Suggestion> {
        self.ledger.suggestions_with(SuggestionStatus::Pending)
    }

    /// Get all accepted suggestions.
    pub fn accepted_suggestions(&self) -> Vec<&Suggestion> {
        self.ledger.suggestions_with(SuggestionStatus::Accepted)
    }

    /// The document as it reads under the current statuses.
    pub fn rendered(&self) -> Result<String> {
        self.ledger.render(self.document.text())
    }

    pub fn segments(&self) -> Result<Vec<Segment>> {
        self.ledger.segments(self.document.text())
    }

    /// The document with every suggestion applied.
    pub fn reference(&self) -> &str {
        &self.ledger.batch().reference
    }

    pub fn is_complete(&self) -> bool {
        self.ledger.is_complete()
    }

    pub fn progress(&self) -> f64 {
        self.ledger.progress()
    }

    /// Check that the ledger still matches the document text.
    pub fn validate(&self) -> Result<()> {
        self.ledger.validate(self.document.text())
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
        self.summary = ReviewSummary::from_ledger(&self.ledger, &self.readability);
    }
}
