//! Fuzz target for generation and rendering.
//!
//! This fuzzer tests that for any text and any sequence of status changes:
//! 1. Generation never panics and never produces overlapping spans
//! 2. Rendering always succeeds on a generated batch
//! 3. Accepting everything reproduces the reference text

#![no_main]

use arbitrary::Arbitrary;
use emend::review::{SuggestionLedger, SuggestionStatus};
use emend::suggestion::{SuggestionEngine, SuggestionId};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    text: String,
    changes: Vec<(u8, u8)>,
}

fuzz_target!(|input: Input| {
    if input.text.len() > 50_000 {
        return;
    }

    let batch = SuggestionEngine::standard()
        .generate(&input.text)
        .expect("generated batch must render");
    let mut ledger = SuggestionLedger::new(batch);

    for (id, status) in input.changes {
        let status = match status % 3 {
            0 => SuggestionStatus::Pending,
            1 => SuggestionStatus::Accepted,
            _ => SuggestionStatus::Rejected,
        };
        let _ = ledger.set_status(SuggestionId(u32::from(id)), status);
    }
    ledger.render(&input.text).expect("render must succeed");

    ledger.bulk_transition(SuggestionStatus::Pending, SuggestionStatus::Accepted);
    ledger.bulk_transition(SuggestionStatus::Rejected, SuggestionStatus::Accepted);
    let rendered = ledger.render(&input.text).expect("render must succeed");
    assert_eq!(rendered, ledger.batch().reference);
});
