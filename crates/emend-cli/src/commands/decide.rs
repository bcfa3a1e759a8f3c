//! Decide command - set the status of a single suggestion.

use std::path::PathBuf;

use colored::Colorize;
use emend::review::SuggestionStatus;
use emend::suggestion::SuggestionId;

use super::load_review;

pub fn run(
    file: PathBuf,
    id: u32,
    status: SuggestionStatus,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (mut review, review_path) = load_review(&file)?;
    let id = SuggestionId(id);

    let previous = review.ledger.status(id)?;
    review.set_status(id, status)?;
    review.save(&review_path)?;

    let suggestion = review
        .suggestion(id)
        .ok_or_else(|| format!("Suggestion #{} not found", id))?;

    let label = match status {
        SuggestionStatus::Accepted => status.label().green().bold(),
        SuggestionStatus::Rejected => status.label().red().bold(),
        SuggestionStatus::Pending => status.label().white().bold(),
    };
    println!(
        "#{} {} -> {}: \"{}\" -> \"{}\"",
        id,
        previous.label().dimmed(),
        label,
        suggestion.original,
        suggestion.replacement
    );

    if verbose {
        println!();
        println!("{}", review.rendered()?);
    }

    let counts = review.summary.suggestions_by_status;
    if counts.pending > 0 {
        println!(
            "  {} pending suggestion(s) remaining",
            counts.pending.to_string().yellow()
        );
    } else {
        println!("  {} All suggestions have been decided!", "✓".green());
    }

    Ok(())
}
