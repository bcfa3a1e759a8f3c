//! Export command - write the document with accepted changes applied.

use std::fs;
use std::path::PathBuf;

use colored::Colorize;

use super::{document_stem, load_review};

pub fn run(
    file: PathBuf,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let (review, _) = load_review(&file)?;
    let rendered = review.rendered()?;

    let output_path = output.unwrap_or_else(|| {
        let stem = document_stem(&file);
        let name = stem.file_name().unwrap_or_default().to_string_lossy();
        stem.with_file_name(format!("{}_improved.txt", name))
    });

    fs::write(&output_path, rendered.as_bytes())
        .map_err(|e| format!("Failed to write '{}': {}", output_path.display(), e))?;

    let counts = review.summary.suggestions_by_status;
    println!(
        "{} {} ({} accepted, {} rejected, {} pending)",
        "Exported".green().bold(),
        output_path.display().to_string().white(),
        counts.accepted,
        counts.rejected,
        counts.pending
    );

    if verbose {
        println!();
        println!("{}", rendered);
    }

    Ok(())
}
