//! Diff command - show accepted changes in context.

use std::path::PathBuf;

use colored::Colorize;
use emend::review::SuggestionStatus;

use super::load_review;

pub fn run(
    file: PathBuf,
    context: usize,
    include_pending: bool,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (review, review_path) = load_review(&file)?;
    let text = review.document.text();

    let shown: Vec<_> = review
        .ledger
        .entries()
        .filter(|(_, status)| {
            *status == SuggestionStatus::Accepted
                || (include_pending && *status == SuggestionStatus::Pending)
        })
        .collect();

    if shown.is_empty() {
        println!("{}", "No changes to preview.".yellow());
        println!("Accept some suggestions first using 'emend review' or 'emend decide'.");
        return Ok(());
    }

    println!(
        "{} {} change(s) in {}",
        "Previewing".cyan().bold(),
        shown.len().to_string().white().bold(),
        review.document.source().file.white()
    );
    println!();

    for (s, status) in &shown {
        let (before_start, after_end) = context_window(text, s.start, s.end, context);

        let marker = match status {
            SuggestionStatus::Accepted => "ACCEPT".green(),
            _ => "PENDING".yellow(),
        };
        println!(
            "  {} #{} [{}] {}",
            marker,
            s.id,
            s.category.label().cyan(),
            s.rationale.dimmed()
        );
        println!(
            "    {}{}{}{}{}",
            if before_start > 0 { "…" } else { "" },
            flatten(&text[before_start..s.start]),
            format!("[-{}-]", s.original).red(),
            format!("{{+{}+}}", s.replacement).green(),
            flatten(&text[s.end..after_end]),
        );
        if after_end < text.len() {
            println!("    …");
        }
        println!();
    }

    println!(
        "Run {} to write these changes.",
        format!("emend export {}", review_path.display()).cyan().bold()
    );

    Ok(())
}

/// Byte range around `start..end` widened by `context` on each side.
fn context_window(text: &str, start: usize, end: usize, context: usize) -> (usize, usize) {
    (
        floor_boundary(text, start.saturating_sub(context)),
        ceil_boundary(text, end.saturating_add(context)),
    )
}

/// Largest char boundary at or below `index`.
fn floor_boundary(text: &str, index: usize) -> usize {
    let mut i = index.min(text.len());
    while !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Smallest char boundary at or above `index`.
fn ceil_boundary(text: &str, index: usize) -> usize {
    let mut i = index.min(text.len());
    while !text.is_char_boundary(i) {
        i += 1;
    }
    i
}

fn flatten(s: &str) -> String {
    s.replace('\n', " ")
}
