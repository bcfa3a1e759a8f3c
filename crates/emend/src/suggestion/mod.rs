//! Suggestions for text improvements.
//!
//! This module defines proposed edits over a document, the rule tables that
//! find them, and the engine that turns a text into an ordered batch.

mod generator;
mod rules;
mod suggestion;

pub use generator::{SuggestionBatch, SuggestionEngine, DEFAULT_FALLBACK_CHARS};
pub use rules::{CompiledRule, Rule, RuleSet};
pub use suggestion::{Category, Span, Suggestion, SuggestionId};
