//! Property-based tests for the patch engine.
//!
//! These tests use proptest to generate random documents and status
//! sequences and verify that rendering keeps its invariants.
//!
//! # Testing Philosophy
//!
//! Property-based tests verify:
//! 1. **No panics**: Generation and readability never crash on any input
//! 2. **Determinism**: Same input always produces same output
//! 3. **Replay**: Rendering depends only on the original and the statuses
//! 4. **Invariants**: Batches are ordered and non-overlapping
//!
//! # Running Property Tests
//!
//! ```bash
//! cargo test -p emend --test property_tests
//!
//! # Run with more cases (slower but more thorough)
//! PROPTEST_CASES=10000 cargo test -p emend --test property_tests
//! ```

use proptest::prelude::*;

use emend::readability::calculate_readability;
use emend::review::{SuggestionLedger, SuggestionStatus};
use emend::suggestion::{SuggestionEngine, SuggestionId};

// =============================================================================
// Test Strategies
// =============================================================================

/// Prose built from words the standard rules match, mixed with filler.
fn memo_like() -> impl Strategy<Value = String> {
    let word = prop_oneof![
        Just("report"),
        Just("Report"),
        Just("important"),
        Just("end of Q2"),
        Just("END OF Q2"),
        Just("the"),
        Just("quarter"),
        Just("was"),
        Just("strong."),
        Just("résumé"),
        Just("naïve!"),
        Just("reports?"),
    ];
    prop::collection::vec(word, 0..40).prop_map(|words| words.join(" "))
}

/// Generate arbitrary ASCII strings (common case)
fn ascii_string() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_\\-\\.\\s!?]{0,200}"
}

/// Generate completely random bytes (edge cases)
fn random_utf8() -> impl Strategy<Value = String> {
    prop::collection::vec(any::<u8>(), 0..200)
        .prop_filter_map("valid UTF-8", |bytes| String::from_utf8(bytes).ok())
}

fn status() -> impl Strategy<Value = SuggestionStatus> {
    prop_oneof![
        Just(SuggestionStatus::Pending),
        Just(SuggestionStatus::Accepted),
        Just(SuggestionStatus::Rejected),
    ]
}

fn ledger_for(text: &str) -> SuggestionLedger {
    SuggestionLedger::new(SuggestionEngine::standard().generate(text).unwrap())
}

// =============================================================================
// Generator Properties
// =============================================================================

mod generator_tests {
    use super::*;

    proptest! {
        /// Batches are sorted, numbered 1..N and never overlap.
        #[test]
        fn batches_are_ordered(text in memo_like()) {
            let batch = SuggestionEngine::standard().generate(&text).unwrap();

            prop_assert!(!batch.is_empty());
            for (i, s) in batch.iter().enumerate() {
                prop_assert_eq!(s.id, SuggestionId(i as u32 + 1));
                prop_assert_eq!(&text[s.start..s.end], s.original.as_str());
            }
            for pair in batch.suggestions.windows(2) {
                prop_assert!(pair[0].end <= pair[1].start);
            }
        }

        /// Generation is deterministic.
        #[test]
        fn generation_is_deterministic(text in memo_like()) {
            let engine = SuggestionEngine::standard();
            prop_assert_eq!(engine.generate(&text).unwrap(), engine.generate(&text).unwrap());
        }

        /// Generation never panics on random UTF-8.
        #[test]
        fn never_panics_on_random_utf8(text in random_utf8()) {
            prop_assert!(SuggestionEngine::standard().generate(&text).is_ok());
        }
    }
}

// =============================================================================
// Rendering Properties
// =============================================================================

mod render_tests {
    use super::*;

    proptest! {
        /// A fresh ledger renders the original text.
        #[test]
        fn all_pending_is_identity(text in memo_like()) {
            prop_assert_eq!(ledger_for(&text).render(&text).unwrap(), text);
        }

        /// Accepting everything reproduces the generator's reference.
        #[test]
        fn all_accepted_is_reference(text in memo_like()) {
            let mut ledger = ledger_for(&text);
            ledger.bulk_transition(SuggestionStatus::Pending, SuggestionStatus::Accepted);

            prop_assert_eq!(
                ledger.render(&text).unwrap(),
                ledger.batch().reference.clone()
            );
        }

        /// Rejecting everything renders the original text.
        #[test]
        fn all_rejected_is_identity(text in memo_like()) {
            let mut ledger = ledger_for(&text);
            ledger.bulk_transition(SuggestionStatus::Pending, SuggestionStatus::Rejected);
            prop_assert_eq!(ledger.render(&text).unwrap(), text);
        }

        /// Rendering twice gives the same text.
        #[test]
        fn render_is_idempotent(
            text in memo_like(),
            statuses in prop::collection::vec(status(), 0..40),
        ) {
            let mut ledger = ledger_for(&text);
            for (i, status) in statuses.into_iter().enumerate() {
                let _ = ledger.set_status(SuggestionId(i as u32 + 1), status);
            }
            prop_assert_eq!(ledger.render(&text).unwrap(), ledger.render(&text).unwrap());
        }

        /// Only the final status of each suggestion matters.
        #[test]
        fn toggles_converge(
            text in memo_like(),
            history in prop::collection::vec((0u32..12, status()), 0..60),
        ) {
            let mut toggled = ledger_for(&text);
            let mut last = std::collections::HashMap::new();
            for (id, status) in history {
                let id = SuggestionId(id + 1);
                if toggled.set_status(id, status).is_ok() {
                    last.insert(id, status);
                }
            }

            let mut direct = ledger_for(&text);
            for (id, status) in last {
                direct.set_status(id, status).unwrap();
            }

            prop_assert_eq!(toggled.render(&text).unwrap(), direct.render(&text).unwrap());
        }

        /// The rendering length is the original plus accepted deltas.
        #[test]
        fn length_tracks_accepted_deltas(
            text in memo_like(),
            statuses in prop::collection::vec(status(), 0..40),
        ) {
            let mut ledger = ledger_for(&text);
            for (i, status) in statuses.into_iter().enumerate() {
                let _ = ledger.set_status(SuggestionId(i as u32 + 1), status);
            }

            let delta: isize = ledger
                .entries()
                .filter(|(_, s)| s.applies_replacement())
                .map(|(sug, _)| sug.length_delta())
                .sum();
            let rendered = ledger.render(&text).unwrap();
            prop_assert_eq!(rendered.len() as isize, text.len() as isize + delta);
        }
    }
}

// =============================================================================
// Readability Properties
// =============================================================================

mod readability_tests {
    use super::*;

    proptest! {
        /// Readability never panics and counts whitespace-separated words.
        #[test]
        fn never_panics_on_ascii(text in ascii_string()) {
            let metrics = calculate_readability(&text);
            prop_assert_eq!(metrics.word_count, text.split_whitespace().count());
            prop_assert!(metrics.score.is_finite());
        }

        /// Readability never panics on random UTF-8.
        #[test]
        fn never_panics_on_random_utf8(text in random_utf8()) {
            let metrics = calculate_readability(&text);
            prop_assert!(metrics.score.is_finite());
        }

        /// Readability is deterministic.
        #[test]
        fn readability_is_deterministic(text in memo_like()) {
            prop_assert_eq!(calculate_readability(&text), calculate_readability(&text));
        }
    }
}
