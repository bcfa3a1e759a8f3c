//! Batch command - accept or reject multiple suggestions at once.

use std::path::PathBuf;

use colored::Colorize;
use emend::review::SuggestionStatus;
use emend::suggestion::Category;

use super::load_review;

pub fn run(
    file: PathBuf,
    accept: bool,
    reject: bool,
    category: Option<String>,
    from: SuggestionStatus,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !accept && !reject {
        return Err("Must specify --accept or --reject".into());
    }

    let category = match category {
        Some(name) => Some(Category::parse(&name).ok_or_else(|| {
            format!(
                "Unknown category: {}. Use grammar, clarity, style, or general.",
                name
            )
        })?),
        None => None,
    };

    let (mut review, review_path) = load_review(&file)?;
    let to = if accept {
        SuggestionStatus::Accepted
    } else {
        SuggestionStatus::Rejected
    };

    let changed = review.bulk_transition(from, to, category);

    if changed.is_empty() {
        println!(
            "{} No {} suggestions match the filter criteria.",
            "Note:".yellow(),
            from
        );
        return Ok(());
    }

    review.save(&review_path)?;

    if verbose {
        for id in &changed {
            if let Some(s) = review.suggestion(*id) {
                println!(
                    "  {} #{} [{}] \"{}\" -> \"{}\"",
                    "•".dimmed(),
                    id,
                    s.category.label().cyan(),
                    s.original,
                    s.replacement
                );
            }
        }
        println!();
    }

    println!(
        "{} {} suggestion(s) {}",
        "Done:".green().bold(),
        changed.len().to_string().white().bold(),
        to
    );

    let pending = review.summary.suggestions_by_status.pending;
    if pending > 0 {
        println!(
            "  {} pending suggestion(s) remaining",
            pending.to_string().yellow()
        );
    } else {
        println!("  {} All suggestions have been decided!", "✓".green());
    }

    Ok(())
}
