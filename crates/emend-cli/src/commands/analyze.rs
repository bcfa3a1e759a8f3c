//! Analyze command - analyze a document and create a review file.

use std::path::PathBuf;

use colored::Colorize;
use emend::review::{review_path, ReviewLayer};
use emend::suggestion::Category;

use super::build_emend;

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    rules: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    println!(
        "{} {}",
        "Analyzing".cyan().bold(),
        file.display().to_string().white()
    );

    let emend = build_emend(rules.as_deref())?;
    let result = emend.analyze_file(&file)?;

    if !result.document.source().decoded {
        println!(
            "{} Could not read {} as text; reviewing placeholder instead.",
            "Warning:".yellow(),
            file.display()
        );
    }

    if verbose {
        println!();
        println!("{}", "Suggestions:".yellow().bold());
        for s in result.batch.iter() {
            println!(
                "  {:>3}. {:8} \"{}\" -> \"{}\"",
                s.id,
                s.category.label(),
                s.original,
                s.replacement
            );
        }
        println!();
    }

    let counts: Vec<String> = Category::ALL
        .iter()
        .map(|c| (c, result.batch.count_by_category(*c)))
        .filter(|(_, n)| *n > 0)
        .map(|(c, n)| format!("{} {}", n, c.label().to_lowercase()))
        .collect();

    println!(
        "Generated {} suggestions ({})",
        result.batch.len().to_string().white().bold(),
        counts.join(", ")
    );
    println!(
        "Readability: {:.1} ({}), {} words",
        result.readability.score,
        result.readability.level().label(),
        result.readability.word_count
    );

    let review = ReviewLayer::from_analysis(result);
    let output_path = output.unwrap_or_else(|| review_path(&file));
    review.save_with_history(&output_path)?;

    println!();
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output_path.display().to_string().white()
    );
    println!(
        "Run {} to review suggestions",
        format!("emend review {}", file.display()).cyan().bold()
    );

    Ok(())
}
