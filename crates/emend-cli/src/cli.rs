//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use emend::review::SuggestionStatus;

/// Emend: review suggested edits to a document
#[derive(Parser)]
#[command(name = "emend")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a document and create a review file
    Analyze {
        /// Path to the document
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path for review file (default: <file>.review.json)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// JSON rule table to use instead of the built-in rules
        #[arg(long, value_name = "RULES")]
        rules: Option<PathBuf>,
    },

    /// Serve the review API for interactive review
    Review {
        /// Path to the document or its review file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Port for web server
        #[arg(short, long, default_value = "3141")]
        port: u16,

        /// JSON rule table to use when (re)analyzing
        #[arg(long, value_name = "RULES")]
        rules: Option<PathBuf>,

        /// Don't write the review file or snapshots on changes
        #[arg(long)]
        no_save: bool,
    },

    /// Show review progress and summary
    Status {
        /// Path to the document or its review file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set the status of one suggestion
    Decide {
        /// Path to the document or its review file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Suggestion number
        #[arg(value_name = "ID")]
        id: u32,

        /// New status (pending, accepted, rejected)
        #[arg(value_name = "STATUS")]
        status: SuggestionStatus,
    },

    /// Accept or reject many suggestions at once
    Batch {
        /// Path to the document or its review file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Accept suggestions (cannot use with --reject)
        #[arg(long, conflicts_with = "reject")]
        accept: bool,

        /// Reject suggestions (cannot use with --accept)
        #[arg(long, conflicts_with = "accept")]
        reject: bool,

        /// Only suggestions in this category (grammar, clarity, style, general)
        #[arg(long, short = 'c')]
        category: Option<String>,

        /// Only suggestions currently in this status
        #[arg(long, default_value = "pending")]
        from: SuggestionStatus,
    },

    /// Show accepted changes in context
    Diff {
        /// Path to the document or its review file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Characters of context around each change
        #[arg(short = 'C', long, default_value = "30")]
        context: usize,

        /// Also show pending suggestions
        #[arg(long)]
        pending: bool,
    },

    /// Write the document with accepted changes applied
    Export {
        /// Path to the document or its review file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output path (default: <file>_improved.txt)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Report readability metrics for a document
    Readability {
        /// Path to the document
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}
