//! Status command - show review progress and summary.

use std::path::PathBuf;

use colored::Colorize;
use emend::suggestion::Category;

use super::load_review;

pub fn run(
    file: PathBuf,
    json_output: bool,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (review, review_path) = load_review(&file)?;
    let counts = review.summary.suggestions_by_status;

    if json_output {
        let status = serde_json::json!({
            "document": review.document.id(),
            "file": review.document.source().file,
            "progress": review.progress(),
            "total_suggestions": review.summary.total_suggestions,
            "statuses": counts,
            "categories": review.summary.suggestions_by_category,
            "readability": {
                "score": review.readability.score,
                "word_count": review.readability.word_count,
                "level": review.summary.reading_level,
            },
            "is_complete": review.is_complete(),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Review status for".cyan().bold(),
        review.document.source().file.white()
    );
    println!();

    let progress = review.progress();
    let total = counts.total();
    let bar_width = 30;
    let filled = (progress * bar_width as f64).round() as usize;
    let bar: String = "█".repeat(filled) + &"░".repeat(bar_width - filled);

    println!(
        "Progress: {} {}/{} ({:.0}%)",
        bar.cyan(),
        counts.decided().to_string().white().bold(),
        total,
        progress * 100.0
    );
    println!();

    println!("{}", "Statuses:".yellow().bold());
    println!("  Pending:  {}", counts.pending.to_string().white());
    println!("  Accepted: {}", counts.accepted.to_string().green());
    println!("  Rejected: {}", counts.rejected.to_string().red());
    println!();

    println!("{}", "Categories:".yellow().bold());
    for category in Category::ALL {
        let n = review.summary.suggestions_by_category.get(category);
        if n > 0 {
            println!("  {:9} {}", format!("{}:", category.label()), n);
        }
    }
    println!();

    let score = review.readability.score;
    let score_text = format!("{:.1}", score);
    let score_color = if score >= 60.0 {
        score_text.green()
    } else if score >= 30.0 {
        score_text.yellow()
    } else {
        score_text.red()
    };
    println!(
        "Readability: {} ({})",
        score_color,
        review.summary.reading_level.label()
    );
    println!();

    if review.is_complete() {
        println!(
            "All suggestions reviewed. Run {} to write the result.",
            format!("emend export {}", review_path.display()).cyan().bold()
        );
    } else {
        println!(
            "Run {} to continue reviewing.",
            format!("emend review {}", review_path.display()).cyan().bold()
        );
    }

    Ok(())
}
