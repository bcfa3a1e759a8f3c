//! Mutable review state for one suggestion batch.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{EmendError, Result};
use crate::render::{PatchRenderer, Segment};
use crate::suggestion::{Suggestion, SuggestionBatch, SuggestionId};

use super::status::SuggestionStatus;

/// Counts of suggestions by review status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusCounts {
    pub pending: usize,
    pub accepted: usize,
    pub rejected: usize,
}

impl StatusCounts {
    /// Total number of suggestions.
    pub fn total(&self) -> usize {
        self.pending + self.accepted + self.rejected
    }

    /// Number of decided suggestions (not pending).
    pub fn decided(&self) -> usize {
        self.accepted + self.rejected
    }

    pub fn get(&self, status: SuggestionStatus) -> usize {
        match status {
            SuggestionStatus::Pending => self.pending,
            SuggestionStatus::Accepted => self.accepted,
            SuggestionStatus::Rejected => self.rejected,
        }
    }
}

/// A generated batch plus the review status of each suggestion in it.
///
/// The batch itself is immutable; only statuses change, and only through
/// this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionLedger {
    batch: SuggestionBatch,
    statuses: IndexMap<SuggestionId, SuggestionStatus>,
}

impl SuggestionLedger {
    /// Start tracking a batch with every suggestion pending.
    pub fn new(batch: SuggestionBatch) -> Self {
        let statuses = batch
            .suggestions
            .iter()
            .map(|s| (s.id, SuggestionStatus::Pending))
            .collect();

        Self { batch, statuses }
    }

    pub fn batch(&self) -> &SuggestionBatch {
        &self.batch
    }

    pub fn suggestions(&self) -> &[Suggestion] {
        &self.batch.suggestions
    }

    /// Get a suggestion by id.
    pub fn suggestion(&self, id: SuggestionId) -> Option<&Suggestion> {
        self.batch.get(id)
    }

    pub fn len(&self) -> usize {
        self.statuses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }

    /// Current status of a suggestion.
    pub fn status(&self, id: SuggestionId) -> Result<SuggestionStatus> {
        self.statuses
            .get(&id)
            .copied()
            .ok_or_else(|| not_found(id))
    }

    /// Set one suggestion's status, returning the previous one.
    pub fn set_status(
        &mut self,
        id: SuggestionId,
        status: SuggestionStatus,
    ) -> Result<SuggestionStatus> {
        let slot = self.statuses.get_mut(&id).ok_or_else(|| not_found(id))?;
        let previous = std::mem::replace(slot, status);
        debug!(suggestion = %id, from = %previous, to = %status, "status changed");
        Ok(previous)
    }

    /// Move every suggestion currently in `from` to `to`.
    ///
    /// Returns the ids that changed, in batch order.
    pub fn bulk_transition(
        &mut self,
        from: SuggestionStatus,
        to: SuggestionStatus,
    ) -> Vec<SuggestionId> {
        self.bulk_transition_where(from, to, |_| true)
    }

    /// Like [`bulk_transition`](Self::bulk_transition), restricted to
    /// suggestions accepted by `filter`.
    pub fn bulk_transition_where<F>(
        &mut self,
        from: SuggestionStatus,
        to: SuggestionStatus,
        filter: F,
    ) -> Vec<SuggestionId>
    where
        F: Fn(&Suggestion) -> bool,
    {
        let mut changed = Vec::new();
        for suggestion in &self.batch.suggestions {
            if !filter(suggestion) {
                continue;
            }
            if let Some(status) = self.statuses.get_mut(&suggestion.id) {
                if *status == from {
                    *status = to;
                    changed.push(suggestion.id);
                }
            }
        }
        info!(from = %from, to = %to, count = changed.len(), "bulk transition");
        changed
    }

    /// Suggestions paired with their current status, in batch order.
    pub fn entries(&self) -> impl Iterator<Item = (&Suggestion, SuggestionStatus)> + '_ {
        self.batch.suggestions.iter().map(|s| {
            let status = self.statuses.get(&s.id).copied().unwrap_or_default();
            (s, status)
        })
    }

    /// All suggestions with the given status.
    pub fn suggestions_with(&self, status: SuggestionStatus) -> Vec<&Suggestion> {
        self.entries()
            .filter(|(_, s)| *s == status)
            .map(|(sug, _)| sug)
            .collect()
    }

    pub fn counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for status in self.statuses.values() {
            match status {
                SuggestionStatus::Pending => counts.pending += 1,
                SuggestionStatus::Accepted => counts.accepted += 1,
                SuggestionStatus::Rejected => counts.rejected += 1,
            }
        }
        counts
    }

    /// Get progress as a fraction (0.0 to 1.0).
    pub fn progress(&self) -> f64 {
        if self.statuses.is_empty() {
            return 1.0;
        }
        self.counts().decided() as f64 / self.statuses.len() as f64
    }

    /// Check if every suggestion has been decided.
    pub fn is_complete(&self) -> bool {
        self.counts().pending == 0
    }

    /// Render `original` under the current statuses.
    pub fn render(&self, original: &str) -> Result<String> {
        PatchRenderer::render(original, self.entries())
    }

    /// Render `original` as presentation segments.
    pub fn segments(&self, original: &str) -> Result<Vec<Segment>> {
        PatchRenderer::render_segments(original, self.entries())
    }

    /// Check the ledger is consistent with its batch and with `original`.
    pub fn validate(&self, original: &str) -> Result<()> {
        if self.statuses.len() != self.batch.suggestions.len()
            || self
                .batch
                .suggestions
                .iter()
                .any(|s| !self.statuses.contains_key(&s.id))
        {
            return Err(EmendError::Persistence(
                "ledger statuses do not match its suggestions".to_string(),
            ));
        }

        PatchRenderer::validate(original, &self.batch.suggestions)?;

        for s in &self.batch.suggestions {
            if original[s.start..s.end] != s.original {
                return Err(EmendError::InvalidSpan {
                    id: s.id.0,
                    start: s.start,
                    end: s.end,
                    len: original.len(),
                });
            }
        }
        Ok(())
    }
}

fn not_found(id: SuggestionId) -> EmendError {
    EmendError::NotFound(format!("suggestion {}", id))
}
