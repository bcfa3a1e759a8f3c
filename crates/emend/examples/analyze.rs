//! Example: Analyze a text file with Emend.
//!
//! Usage:
//!   cargo run --example analyze -- <file_path>
//!
//! Example:
//!   cargo run --example analyze -- notes/quarterly_memo.txt

use std::env;
use std::path::Path;

use emend::suggestion::Category;
use emend::Emend;

fn main() -> emend::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example analyze -- <file_path>");
        eprintln!("\nExample:");
        eprintln!("  cargo run --example analyze -- notes/quarterly_memo.txt");
        std::process::exit(1);
    }

    let file_path = &args[1];
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Error: File not found: {}", file_path);
        std::process::exit(1);
    }

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Emend Analysis: {}", file_path);
    println!("{}", separator);
    println!();

    let result = Emend::new().analyze_file(path)?;
    let source = result.document.source();

    println!("## Source");
    println!("  File: {}", source.file);
    println!("  Format: {}", source.format);
    println!("  Bytes: {}", source.size_bytes);
    if !source.decoded {
        println!("  (could not be decoded; analyzing placeholder text)");
    }
    println!();

    println!("## Readability");
    println!("  Words: {}", result.statistics.word_count);
    println!("  Sentences: {}", result.statistics.sentence_count);
    println!("  Syllables: {}", result.statistics.syllable_count);
    println!(
        "  Reading ease: {:.1} ({})",
        result.readability.score,
        result.readability.level().label()
    );
    println!();

    println!("## Suggestions ({} total)", result.batch.len());
    for category in Category::ALL {
        let count = result.batch.count_by_category(category);
        if count > 0 {
            println!("  {:10} {}", category.label(), count);
        }
    }
    println!();

    for sug in result.batch.iter() {
        println!(
            "  {}. [{}] \"{}\" -> \"{}\" at {}..{}",
            sug.id,
            sug.category.label(),
            sug.original,
            sug.replacement,
            sug.start,
            sug.end
        );
        if !sug.rationale.is_empty() {
            println!("     {}", sug.rationale);
        }
    }
    println!();

    println!("## With every suggestion accepted");
    println!();
    println!("{}", result.batch.reference);
    println!();

    println!("{}", separator);

    Ok(())
}
