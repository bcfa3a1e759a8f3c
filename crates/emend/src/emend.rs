//! Main Emend struct and public API.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::document::{read_document, Document, DocumentId};
use crate::error::Result;
use crate::readability::{calculate_readability, ReadabilityMetrics, TextStatistics};
use crate::suggestion::{RuleSet, SuggestionBatch, SuggestionEngine, DEFAULT_FALLBACK_CHARS};

/// Configuration for Emend analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct EmendConfig {
    /// Rule table the suggestion engine runs.
    pub rules: RuleSet,
    /// Characters covered by the fallback suggestion.
    pub fallback_chars: usize,
    /// Write a snapshot after every status change.
    pub auto_save: bool,
}

impl Default for EmendConfig {
    fn default() -> Self {
        Self {
            rules: RuleSet::standard(),
            fallback_chars: DEFAULT_FALLBACK_CHARS,
            auto_save: true,
        }
    }
}

impl EmendConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    /// Replace the rule table with one loaded from a JSON file.
    pub fn with_rules_file(mut self, path: impl AsRef<Path>) -> Result<Self> {
        self.rules = RuleSet::load(path)?;
        Ok(self)
    }

    pub fn with_fallback_chars(mut self, chars: usize) -> Self {
        self.fallback_chars = chars;
        self
    }

    pub fn with_auto_save(mut self, auto_save: bool) -> Self {
        self.auto_save = auto_save;
        self
    }
}

/// Result of analyzing a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// The analyzed document.
    pub document: Document,
    /// Suggestions plus the fully-applied reference text.
    pub batch: SuggestionBatch,
    /// Readability of the original text.
    pub readability: ReadabilityMetrics,
    /// Counts behind the readability score.
    pub statistics: TextStatistics,
}

/// The main Emend analysis engine.
///
/// Analysis is pure and synchronous; an `Emend` can be cloned into a
/// blocking task and its result published later.
#[derive(Debug, Clone)]
pub struct Emend {
    config: EmendConfig,
    engine: SuggestionEngine,
}

impl Emend {
    /// Create an Emend instance with the built-in rule table.
    pub fn new() -> Self {
        Self {
            config: EmendConfig::default(),
            engine: SuggestionEngine::standard().clone(),
        }
    }

    /// Create an Emend instance with custom configuration.
    ///
    /// Fails if the rule table is empty or a pattern does not compile.
    pub fn with_config(config: EmendConfig) -> Result<Self> {
        config.rules.validate()?;
        let engine = SuggestionEngine::new(&config.rules)?.with_fallback_chars(config.fallback_chars);

        Ok(Self { config, engine })
    }

    pub fn config(&self) -> &EmendConfig {
        &self.config
    }

    pub fn engine(&self) -> &SuggestionEngine {
        &self.engine
    }

    /// Analyze a document.
    pub fn analyze(&self, document: Document) -> Result<AnalysisResult> {
        let text = document.text();

        let batch = self.engine.generate(text)?;
        let statistics = TextStatistics::from_text(text);
        let readability = calculate_readability(text);

        info!(
            document = %document.id(),
            suggestions = batch.len(),
            score = readability.score,
            "analyzed document"
        );

        Ok(AnalysisResult {
            document,
            batch,
            readability,
            statistics,
        })
    }

    /// Analyze pasted text under the given document id.
    pub fn analyze_text(&self, id: impl Into<String>, text: &str) -> Result<AnalysisResult> {
        self.analyze(Document::from_text(DocumentId::new(id), text))
    }

    /// Read and analyze a file as the first document of a review.
    ///
    /// Unreadable files are analyzed as their placeholder text.
    pub fn analyze_file(&self, path: impl AsRef<Path>) -> Result<AnalysisResult> {
        let ingested = read_document(path);
        let document = Document::new(DocumentId::sequential(1), ingested.text, ingested.source);
        self.analyze(document)
    }
}

impl Default for Emend {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggestion::{Category, Rule};

    #[test]
    fn test_analyze_text() {
        let result = Emend::new()
            .analyze_text("doc_001", "Performance at end of Q2 was strong.")
            .unwrap();

        assert_eq!(result.document.id().as_str(), "doc_001");
        assert_eq!(result.batch.len(), 1);
        assert_eq!(result.batch.reference, "Performance at the end of Q2 was strong.");
        assert_eq!(result.readability.word_count, 7);
        assert_eq!(result.statistics.sentence_count, 1);
    }

    #[test]
    fn test_custom_rules() {
        let rules = RuleSet::new(vec![Rule::new(
            "very_good",
            "very good",
            "excellent",
            Category::Style,
        )]);
        let emend = Emend::with_config(EmendConfig::new().with_rules(rules)).unwrap();

        let result = emend.analyze_text("doc_001", "A very good report.").unwrap();
        assert_eq!(result.batch.reference, "A excellent report.");
        assert_eq!(result.batch.count_by_category(Category::Style), 1);
    }

    #[test]
    fn test_empty_rules_rejected() {
        let config = EmendConfig::new().with_rules(RuleSet::new(Vec::new()));
        assert!(Emend::with_config(config).is_err());
    }

    #[test]
    fn test_fallback_chars_config() {
        let emend = Emend::with_config(EmendConfig::new().with_fallback_chars(5)).unwrap();
        let result = emend.analyze_text("doc_001", "Hello world").unwrap();

        assert_eq!(result.batch.suggestions[0].original, "Hello");
        assert_eq!(result.batch.reference, "Improved Hello world");
    }
}
