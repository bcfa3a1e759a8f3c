//! Suggestion generation and rendering benchmarks.
//!
//! Measures how generation and full-replay rendering scale with document size.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use emend::readability::calculate_readability;
use emend::review::{SuggestionLedger, SuggestionStatus};
use emend::suggestion::{SuggestionEngine, SuggestionId};

/// Generate a memo-like document of roughly `paragraphs` paragraphs.
fn generate_memo(paragraphs: usize) -> String {
    let sentences = [
        "The report is important for the board.",
        "Revenue at end of Q2 exceeded the forecast.",
        "Another report covers hiring plans.",
        "This is an important milestone for the team.",
        "Costs were flat across all regions.",
    ];

    let mut text = String::new();
    for p in 0..paragraphs {
        for i in 0..4 {
            text.push_str(sentences[(p + i) % sentences.len()]);
            text.push(' ');
        }
        text.push_str("\n\n");
    }
    text
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");
    let engine = SuggestionEngine::standard();

    for paragraphs in [1, 10, 100, 1000] {
        let text = generate_memo(paragraphs);
        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(paragraphs), &text, |b, text| {
            b.iter(|| engine.generate(black_box(text)).unwrap())
        });
    }

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");

    for paragraphs in [10, 100, 1000] {
        let text = generate_memo(paragraphs);
        let mut ledger = SuggestionLedger::new(SuggestionEngine::standard().generate(&text).unwrap());
        ledger.bulk_transition(SuggestionStatus::Pending, SuggestionStatus::Accepted);

        group.throughput(Throughput::Bytes(text.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(paragraphs), &text, |b, text| {
            b.iter(|| ledger.render(black_box(text)).unwrap())
        });
    }

    group.finish();
}

fn bench_toggle_and_render(c: &mut Criterion) {
    let text = generate_memo(100);
    let mut ledger = SuggestionLedger::new(SuggestionEngine::standard().generate(&text).unwrap());
    let count = ledger.len() as u32;

    c.bench_function("toggle_and_render", |b| {
        let mut i = 0u32;
        b.iter(|| {
            let id = SuggestionId(i % count + 1);
            let status = if i % 2 == 0 {
                SuggestionStatus::Accepted
            } else {
                SuggestionStatus::Rejected
            };
            ledger.set_status(id, status).unwrap();
            i += 1;
            black_box(ledger.render(&text).unwrap())
        })
    });
}

fn bench_readability(c: &mut Criterion) {
    let text = generate_memo(100);
    c.bench_function("readability_100_paragraphs", |b| {
        b.iter(|| calculate_readability(black_box(&text)))
    });
}

criterion_group!(
    benches,
    bench_generate,
    bench_render,
    bench_toggle_and_render,
    bench_readability
);
criterion_main!(benches);
