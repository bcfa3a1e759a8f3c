//! Review command - serve the review API for interactive decisions.

use std::path::{Path, PathBuf};

use colored::Colorize;
use emend::review::{DirectorySnapshotStore, ReviewLayer};
use emend::ReviewSession;
use tracing::warn;

use super::{build_emend, is_review_file, review_file};
use crate::server::{app, state::AppState};

pub fn run(
    file: PathBuf,
    port: u16,
    rules: Option<PathBuf>,
    no_save: bool,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let review_path = review_file(&file);
    let emend = build_emend(rules.as_deref())?;

    let layer = if review_path.exists() {
        if verbose {
            println!("Loading existing review from {}", review_path.display());
        }
        ReviewLayer::load(&review_path)?
    } else if is_review_file(&file) {
        return Err(format!("Review file not found: {}", review_path.display()).into());
    } else {
        if !file.exists() {
            return Err(format!("File not found: {}", file.display()).into());
        }
        println!(
            "{} No review file found, analyzing {}...",
            "Note:".yellow(),
            file.display()
        );

        let layer = ReviewLayer::from_analysis(emend.analyze_file(&file)?);
        if !no_save {
            layer.save(&review_path)?;
            println!("Created {}", review_path.display());
        }
        layer
    };

    let mut session = ReviewSession::from_layer(emend, layer).with_auto_save(!no_save);
    if !no_save {
        session = session.with_snapshot_store(DirectorySnapshotStore::new(snapshot_dir(&review_path)));
    }

    let state = AppState::new(session, review_path.clone()).with_auto_save(!no_save);

    let url = format!("http://localhost:{}/api/review", port);
    println!();
    println!(
        "{} {}",
        "Starting review server at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  Review: {}", review_path.display());
    if no_save {
        println!("  {}", "Changes will not be saved".yellow());
    }
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let state_clone = state.clone();
        tokio::spawn(async move {
            tokio::signal::ctrl_c().await.ok();
            println!();
            println!("{}", "Shutting down...".yellow());
            if state_clone.auto_save {
                if let Err(e) = state_clone.save().await {
                    warn!(error = %e, "final save failed");
                    eprintln!("Error saving: {}", e);
                }
            }
            std::process::exit(0);
        });

        app::run_server(state, port).await
    })
}

/// Rendered snapshots live next to the review file.
fn snapshot_dir(review_path: &Path) -> PathBuf {
    review_path.parent().unwrap_or(Path::new(".")).join(".emend")
}
