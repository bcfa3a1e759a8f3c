//! Suggestion types for proposed text edits.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a suggestion within one batch (1..N).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuggestionId(pub u32);

impl fmt::Display for SuggestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for SuggestionId {
    fn from(id: u32) -> Self {
        SuggestionId(id)
    }
}

/// Kind of improvement a suggestion makes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Grammar,
    Clarity,
    Style,
    General,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 4] = [
        Category::Grammar,
        Category::Clarity,
        Category::Style,
        Category::General,
    ];

    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Grammar => "Grammar",
            Category::Clarity => "Clarity",
            Category::Style => "Style",
            Category::General => "General",
        }
    }

    /// Parse a lowercase category name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "grammar" => Some(Category::Grammar),
            "clarity" => Some(Category::Clarity),
            "style" => Some(Category::Style),
            "general" => Some(Category::General),
            _ => None,
        }
    }
}

/// Half-open byte range `[start, end)` into the original text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// True when the two ranges share at least one byte. Touching ranges do not overlap.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl From<(usize, usize)> for Span {
    fn from((start, end): (usize, usize)) -> Self {
        Span::new(start, end)
    }
}

/// One candidate edit over the original text.
///
/// The span and texts are fixed once generated; review status is tracked
/// separately by the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    /// Position within the batch, starting at 1.
    pub id: SuggestionId,

    /// Byte offset where the edit starts.
    pub start: usize,

    /// Byte offset where the edit ends (exclusive).
    pub end: usize,

    /// Text currently at `[start, end)`.
    pub original: String,

    /// Text proposed in its place.
    pub replacement: String,

    /// Kind of improvement.
    pub category: Category,

    /// Human-readable rationale for the edit.
    pub rationale: String,

    /// Name of the rule that produced this suggestion.
    #[serde(default)]
    pub suggester: String,
}

impl Suggestion {
    /// Create a suggestion over `[start, end)` of `text`.
    ///
    /// The id is left at 0 until the batch is ordered.
    pub fn new(
        text: &str,
        span: Span,
        replacement: impl Into<String>,
        category: Category,
    ) -> Self {
        Self {
            id: SuggestionId(0),
            start: span.start,
            end: span.end,
            original: text[span.start..span.end].to_string(),
            replacement: replacement.into(),
            category,
            rationale: String::new(),
            suggester: String::new(),
        }
    }

    /// Set the id.
    pub fn with_id(mut self, id: impl Into<SuggestionId>) -> Self {
        self.id = id.into();
        self
    }

    /// Set the rationale.
    pub fn with_rationale(mut self, rationale: impl Into<String>) -> Self {
        self.rationale = rationale.into();
        self
    }

    /// Set the suggester name.
    pub fn with_suggester(mut self, suggester: impl Into<String>) -> Self {
        self.suggester = suggester.into();
        self
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    /// Change in length the edit makes when accepted.
    pub fn length_delta(&self) -> isize {
        self.replacement.len() as isize - self.original.len() as isize
    }
}
