//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::record::Format;

/// Top-level CLI parser for `ghbatch`.
#[derive(Debug, Parser)]
#[command(name = "ghbatch", version, about = "Batch-create GitHub issues and linked pull requests")]
pub struct Cli {
    /// Show debug logging.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Input file selection shared by `create` and `validate`.
#[derive(Debug, Args)]
pub struct InputArgs {
    /// Input file (JSON or CSV).
    #[arg(long, short)]
    pub input: PathBuf,

    /// File format (auto-detected from the extension if not specified).
    #[arg(long, value_enum)]
    pub format: Option<Format>,
}

/// Supported top-level subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create one issue per record in the input file.
    Create {
        /// Input selection.
        #[command(flatten)]
        input: InputArgs,
        /// Repository (owner/name); uses the configured or current repo if not specified.
        #[arg(long)]
        repo: Option<String>,
        /// Preview without creating issues.
        #[arg(long)]
        dry_run: bool,
        /// Write a JSON summary of the results to this file.
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Check an input file without creating anything.
    Validate {
        /// Input selection.
        #[command(flatten)]
        input: InputArgs,
    },
    /// Open a pull request that fixes one or more issues.
    Pr {
        /// Issue number(s), comma-separated for multiple.
        #[arg(long)]
        issue: String,
        /// PR title (generated from the issues if not provided).
        #[arg(long)]
        title: Option<String>,
        /// Custom text placed above the issue references.
        #[arg(long)]
        body: Option<String>,
        /// Base branch (defaults to the configured base branch).
        #[arg(long)]
        base: Option<String>,
        /// Create as a draft PR.
        #[arg(long)]
        draft: bool,
        /// Repository (owner/name); uses the configured or current repo if not specified.
        #[arg(long)]
        repo: Option<String>,
        /// Print the pull request without creating it.
        #[arg(long)]
        dry_run: bool,
    },
}
