//! Rule-based suggestion generation.
//!
//! Every match is located against the original text and recorded by byte
//! offset. Nothing is replaced while scanning: the fully applied reference
//! document is rendered afterwards from the finished batch, so edits that
//! change length cannot shift the offsets of later matches.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::render::PatchRenderer;

use super::rules::{CompiledRule, RuleSet};
use super::{Category, Span, Suggestion, SuggestionId};

/// Number of leading characters covered by the fallback suggestion.
pub const DEFAULT_FALLBACK_CHARS: usize = 7;

static STANDARD_ENGINE: Lazy<SuggestionEngine> = Lazy::new(|| {
    SuggestionEngine::new(&RuleSet::standard()).expect("standard rule table compiles")
});

/// Output of one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionBatch {
    /// Suggestions sorted by start offset, ids 1..N in that order.
    pub suggestions: Vec<Suggestion>,

    /// The document with every suggestion applied.
    pub reference: String,
}

impl SuggestionBatch {
    pub fn len(&self) -> usize {
        self.suggestions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suggestions.is_empty()
    }

    /// Look up a suggestion by id.
    pub fn get(&self, id: SuggestionId) -> Option<&Suggestion> {
        self.suggestions.iter().find(|s| s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Suggestion> {
        self.suggestions.iter()
    }

    /// Number of suggestions per category.
    pub fn count_by_category(&self, category: Category) -> usize {
        self.suggestions
            .iter()
            .filter(|s| s.category == category)
            .count()
    }
}

/// Generates suggestions by running an ordered rule table over a text.
#[derive(Debug, Clone)]
pub struct SuggestionEngine {
    rules: Vec<CompiledRule>,
    fallback_chars: usize,
}

impl SuggestionEngine {
    /// Compile an engine from a rule table.
    pub fn new(rules: &RuleSet) -> Result<Self> {
        Ok(Self {
            rules: rules.compile()?,
            fallback_chars: DEFAULT_FALLBACK_CHARS,
        })
    }

    /// The engine for the built-in rule table.
    pub fn standard() -> &'static SuggestionEngine {
        &STANDARD_ENGINE
    }

    /// Set how many leading characters the fallback suggestion covers.
    pub fn with_fallback_chars(mut self, chars: usize) -> Self {
        self.fallback_chars = chars;
        self
    }

    /// Generate a batch for `text`.
    ///
    /// Rules run in table order, each scanning left to right. A match that
    /// overlaps a span already claimed by an earlier rule is skipped. When no
    /// rule matches, a single `general` suggestion over the first few
    /// characters is emitted so the batch is never empty.
    pub fn generate(&self, text: &str) -> Result<SuggestionBatch> {
        let mut candidates: Vec<(usize, Suggestion)> = Vec::new();
        let mut claimed: BTreeMap<usize, usize> = BTreeMap::new();

        for (rule_index, compiled) in self.rules.iter().enumerate() {
            let rule = &compiled.rule;

            for caps in compiled.regex.captures_iter(text) {
                if rule.cap.is_some_and(|cap| candidates.len() >= cap) {
                    debug!(rule = %rule.name, cap = ?rule.cap, "rule cap reached");
                    break;
                }

                let Some(m) = caps.get(0) else { continue };
                let span = Span::new(m.start(), m.end());
                if span.is_empty() {
                    continue;
                }
                if overlaps_claimed(&claimed, span) {
                    debug!(
                        rule = %rule.name,
                        start = span.start,
                        end = span.end,
                        "skipping match overlapping an earlier suggestion"
                    );
                    continue;
                }

                let suggestion = Suggestion::new(text, span, compiled.expand(&caps), rule.category)
                    .with_rationale(rule.rationale.clone())
                    .with_suggester(rule.name.clone());

                debug!(rule = %rule.name, start = span.start, end = span.end, "rule matched");
                claimed.insert(span.start, span.end);
                candidates.push((rule_index, suggestion));
            }
        }

        // Ties on start fall back to rule table order.
        candidates.sort_by_key(|(rule_index, s)| (s.start, *rule_index));

        let mut suggestions: Vec<Suggestion> = candidates
            .into_iter()
            .enumerate()
            .map(|(i, (_, s))| s.with_id(i as u32 + 1))
            .collect();

        if suggestions.is_empty() {
            suggestions.push(self.fallback(text));
        }

        let reference = PatchRenderer::render_accepted(text, &suggestions)?;

        Ok(SuggestionBatch {
            suggestions,
            reference,
        })
    }

    /// The placeholder suggestion used when no rule matches.
    fn fallback(&self, text: &str) -> Suggestion {
        let end = text
            .char_indices()
            .nth(self.fallback_chars)
            .map(|(i, _)| i)
            .unwrap_or(text.len());
        let head = &text[..end];
        let subject = if head.is_empty() { "Sample" } else { head };

        Suggestion::new(text, Span::new(0, end), format!("Improved {}", subject), Category::General)
            .with_id(1)
            .with_rationale("General enhancement suggestion")
            .with_suggester("fallback")
    }
}

/// Whether `span` shares any byte with a span in `claimed` (start -> end).
fn overlaps_claimed(claimed: &BTreeMap<usize, usize>, span: Span) -> bool {
    let before = claimed
        .range(..=span.start)
        .next_back()
        .is_some_and(|(_, &end)| end > span.start);
    let after = claimed
        .range(span.start..)
        .next()
        .is_some_and(|(&start, _)| start < span.end);
    before || after
}
