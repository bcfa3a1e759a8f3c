//! Readability command - report readability metrics for a document.

use std::path::PathBuf;

use colored::Colorize;
use emend::document::read_document;
use emend::readability::{calculate_readability, ReadingLevel, TextStatistics};

pub fn run(
    file: PathBuf,
    json_output: bool,
    _verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let ingested = read_document(&file);
    if !ingested.source.decoded {
        return Err(format!("Could not read {} as text", file.display()).into());
    }

    let metrics = calculate_readability(&ingested.text);
    let stats = TextStatistics::from_text(&ingested.text);
    let level = metrics.level();

    if json_output {
        let report = serde_json::json!({
            "file": ingested.source.file,
            "word_count": metrics.word_count,
            "sentence_count": stats.sentence_count,
            "syllable_count": stats.syllable_count,
            "score": metrics.score,
            "level": level,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Readability of".cyan().bold(),
        ingested.source.file.white()
    );
    println!();
    println!("  Words:     {}", stats.word_count);
    println!("  Sentences: {}", stats.sentence_count);
    println!("  Syllables: {}", stats.syllable_count);
    println!();

    let score = format!("{:.1}", metrics.score);
    let score = match level {
        ReadingLevel::VeryEasy | ReadingLevel::FairlyEasy => score.green(),
        ReadingLevel::SomewhatDifficult => score.yellow(),
        ReadingLevel::VeryDifficult => score.red(),
    };
    println!("Reading ease: {} ({})", score.bold(), level.label());

    Ok(())
}
