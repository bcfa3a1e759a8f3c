//! Patch renderer.

use serde::{Deserialize, Serialize};

use crate::error::{EmendError, Result};
use crate::review::SuggestionStatus;
use crate::suggestion::{Category, Suggestion, SuggestionId};

/// A piece of rendered output.
///
/// Concatenating the `text` of every segment gives exactly what
/// [`PatchRenderer::render`] returns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    /// Untouched original text between suggestions.
    Text { text: String },
    /// A suggestion span as currently rendered.
    Suggestion {
        id: SuggestionId,
        status: SuggestionStatus,
        category: Category,
        /// What the span renders as under its status.
        text: String,
        /// What it would render as if the status flipped between accepted and not.
        alternative: String,
    },
}

impl Segment {
    pub fn text(&self) -> &str {
        match self {
            Segment::Text { text } => text,
            Segment::Suggestion { text, .. } => text,
        }
    }
}

/// Reconstructs a document from its original text and per-suggestion statuses.
pub struct PatchRenderer;

impl PatchRenderer {
    /// Render `text` with each suggestion applied according to its status.
    ///
    /// Accepted suggestions emit their replacement; pending and rejected ones
    /// emit the original span unchanged. Fails with [`EmendError::Overlap`] if
    /// two spans overlap and [`EmendError::InvalidSpan`] if a span does not fit
    /// the text.
    pub fn render<'a, I>(text: &str, entries: I) -> Result<String>
    where
        I: IntoIterator<Item = (&'a Suggestion, SuggestionStatus)>,
    {
        let ordered = Self::ordered(text, entries)?;

        let mut out = String::with_capacity(text.len());
        let mut cursor = 0;
        for (suggestion, status) in ordered {
            out.push_str(&text[cursor..suggestion.start]);
            if status.applies_replacement() {
                out.push_str(&suggestion.replacement);
            } else {
                out.push_str(&text[suggestion.start..suggestion.end]);
            }
            cursor = suggestion.end;
        }
        out.push_str(&text[cursor..]);

        Ok(out)
    }

    /// Render with every suggestion accepted.
    pub fn render_accepted(text: &str, suggestions: &[Suggestion]) -> Result<String> {
        Self::render(
            text,
            suggestions.iter().map(|s| (s, SuggestionStatus::Accepted)),
        )
    }

    /// Same walk as [`render`](Self::render), split into segments.
    pub fn render_segments<'a, I>(text: &str, entries: I) -> Result<Vec<Segment>>
    where
        I: IntoIterator<Item = (&'a Suggestion, SuggestionStatus)>,
    {
        let ordered = Self::ordered(text, entries)?;

        let mut segments = Vec::with_capacity(ordered.len() * 2 + 1);
        let mut cursor = 0;
        for (suggestion, status) in ordered {
            if suggestion.start > cursor {
                segments.push(Segment::Text {
                    text: text[cursor..suggestion.start].to_string(),
                });
            }

            let original = &text[suggestion.start..suggestion.end];
            let (shown, alternative) = if status.applies_replacement() {
                (suggestion.replacement.as_str(), original)
            } else {
                (original, suggestion.replacement.as_str())
            };
            segments.push(Segment::Suggestion {
                id: suggestion.id,
                status,
                category: suggestion.category,
                text: shown.to_string(),
                alternative: alternative.to_string(),
            });

            cursor = suggestion.end;
        }
        if cursor < text.len() {
            segments.push(Segment::Text {
                text: text[cursor..].to_string(),
            });
        }

        Ok(segments)
    }

    /// Check that every span fits `text` and no two spans overlap.
    pub fn validate(text: &str, suggestions: &[Suggestion]) -> Result<()> {
        Self::ordered(
            text,
            suggestions.iter().map(|s| (s, SuggestionStatus::Pending)),
        )
        .map(|_| ())
    }

    /// Sort entries by start and reject spans that are out of bounds or overlap.
    fn ordered<'a, I>(text: &str, entries: I) -> Result<Vec<(&'a Suggestion, SuggestionStatus)>>
    where
        I: IntoIterator<Item = (&'a Suggestion, SuggestionStatus)>,
    {
        let mut ordered: Vec<_> = entries.into_iter().collect();
        // Stable: equal starts keep batch order.
        ordered.sort_by_key(|(s, _)| s.start);

        for (suggestion, _) in &ordered {
            let fits = suggestion.start <= suggestion.end
                && suggestion.end <= text.len()
                && text.is_char_boundary(suggestion.start)
                && text.is_char_boundary(suggestion.end);
            if !fits {
                return Err(EmendError::InvalidSpan {
                    id: suggestion.id.0,
                    start: suggestion.start,
                    end: suggestion.end,
                    len: text.len(),
                });
            }
        }

        for pair in ordered.windows(2) {
            let (prev, next) = (pair[0].0, pair[1].0);
            if next.start < prev.end {
                return Err(EmendError::Overlap {
                    first: prev.id.0,
                    first_start: prev.start,
                    first_end: prev.end,
                    second: next.id.0,
                    second_start: next.start,
                });
            }
        }

        Ok(ordered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::suggestion::Span;

    fn sug(text: &str, id: u32, start: usize, end: usize, replacement: &str) -> Suggestion {
        Suggestion::new(text, Span::new(start, end), replacement, Category::Style).with_id(id)
    }

    #[test]
    fn test_pending_renders_original() {
        let text = "The report is important.";
        let batch = vec![
            sug(text, 1, 4, 10, "detailed report"),
            sug(text, 2, 14, 23, "crucial"),
        ];
        let rendered =
            PatchRenderer::render(text, batch.iter().map(|s| (s, SuggestionStatus::Pending)))
                .unwrap();
        assert_eq!(rendered, text);
    }

    #[test]
    fn test_mixed_statuses() {
        let text = "The report is important.";
        let batch = vec![
            sug(text, 1, 4, 10, "detailed report"),
            sug(text, 2, 14, 23, "crucial"),
        ];
        let statuses = [SuggestionStatus::Accepted, SuggestionStatus::Rejected];
        let rendered =
            PatchRenderer::render(text, batch.iter().zip(statuses)).unwrap();
        assert_eq!(rendered, "The detailed report is important.");

        let all = PatchRenderer::render_accepted(text, &batch).unwrap();
        assert_eq!(all, "The detailed report is crucial.");
    }

    #[test]
    fn test_unsorted_input_is_ordered() {
        let text = "abcdef";
        let batch = vec![sug(text, 2, 4, 6, "XY"), sug(text, 1, 0, 2, "Z")];
        let rendered = PatchRenderer::render_accepted(text, &batch).unwrap();
        assert_eq!(rendered, "ZcdXY");
    }

    #[test]
    fn test_overlap_rejected() {
        let text = "abcdefgh";
        let batch = vec![sug(text, 1, 0, 4, "X"), sug(text, 2, 3, 6, "Y")];
        let err = PatchRenderer::render_accepted(text, &batch).unwrap_err();
        assert!(matches!(
            err,
            EmendError::Overlap {
                first: 1,
                second: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_touching_spans_allowed() {
        let text = "abcdefgh";
        let batch = vec![sug(text, 1, 0, 4, "X"), sug(text, 2, 4, 8, "Y")];
        assert_eq!(PatchRenderer::render_accepted(text, &batch).unwrap(), "XY");
    }

    #[test]
    fn test_insertion_at_span_boundary() {
        let text = "abcdef";
        let batch = vec![sug(text, 1, 0, 3, "X"), sug(text, 2, 3, 3, "-")];
        assert_eq!(PatchRenderer::render_accepted(text, &batch).unwrap(), "X-def");
    }

    #[test]
    fn test_span_out_of_bounds() {
        let text = "abc";
        let mut bad = sug(text, 1, 0, 3, "X");
        bad.end = 10;
        let err = PatchRenderer::render_accepted(text, &[bad]).unwrap_err();
        assert!(matches!(err, EmendError::InvalidSpan { id: 1, end: 10, .. }));
    }

    #[test]
    fn test_span_off_char_boundary() {
        let text = "café au lait";
        let mut bad = sug(text, 1, 0, 3, "X");
        // 'é' occupies bytes 3..5.
        bad.end = 4;
        assert!(matches!(
            PatchRenderer::render_accepted(text, &[bad]),
            Err(EmendError::InvalidSpan { .. })
        ));
    }

    #[test]
    fn test_segments_concatenate_to_render() {
        let text = "The report is important.";
        let batch = vec![
            sug(text, 1, 4, 10, "detailed report"),
            sug(text, 2, 14, 23, "crucial"),
        ];
        let statuses = [SuggestionStatus::Accepted, SuggestionStatus::Pending];

        let segments = PatchRenderer::render_segments(text, batch.iter().zip(statuses)).unwrap();
        let rendered = PatchRenderer::render(text, batch.iter().zip(statuses)).unwrap();

        let joined: String = segments.iter().map(Segment::text).collect();
        assert_eq!(joined, rendered);
        assert_eq!(segments.len(), 5);
        assert!(matches!(
            &segments[1],
            Segment::Suggestion { status: SuggestionStatus::Accepted, alternative, .. } if alternative == "report"
        ));
    }
}
