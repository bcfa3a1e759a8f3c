//! Emend CLI - review suggested edits to a document.

mod cli;
mod commands;
mod server;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Analyze {
            file,
            output,
            rules,
        } => commands::analyze::run(file, output, rules, cli.verbose),

        Commands::Review {
            file,
            port,
            rules,
            no_save,
        } => commands::review::run(file, port, rules, no_save, cli.verbose),

        Commands::Status { file, json } => commands::status::run(file, json, cli.verbose),

        Commands::Decide { file, id, status } => {
            commands::decide::run(file, id, status, cli.verbose)
        }

        Commands::Batch {
            file,
            accept,
            reject,
            category,
            from,
        } => commands::batch::run(file, accept, reject, category, from, cli.verbose),

        Commands::Diff {
            file,
            context,
            pending,
        } => commands::diff::run(file, context, pending, cli.verbose),

        Commands::Export { file, output } => commands::export::run(file, output, cli.verbose),

        Commands::Readability { file, json } => {
            commands::readability::run(file, json, cli.verbose)
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr, filtered by `RUST_LOG` when set.
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "emend=info,emend_cli=info"
    } else {
        "emend=warn,emend_cli=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
