//! codemig CLI tool.
//!
//! Usage:
//! ```bash
//! codemig extract [OPTIONS] [PATH]
//! codemig compare OLD_PATH NEW_PATH
//! codemig rewrite PATH --rules rules.toml [--write]
//! codemig init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

/// Migration analysis and rewrite toolkit for JS/TS codebases
#[derive(Parser)]
#[command(name = "codemig")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract facts (API calls, routes, state, widget usages) from a tree
    Extract {
        /// Path to analyze (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compare the facts of two trees and report drift
    Compare {
        /// The "old" tree
        old_path: PathBuf,

        /// The "new" tree
        new_path: PathBuf,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Rewrite widget elements against a mapping-rule table
    Rewrite {
        /// Path to rewrite
        path: PathBuf,

        /// Rule table (TOML)
        #[arg(short, long)]
        rules: PathBuf,

        /// Write changed files back to disk (default: dry run)
        #[arg(short, long)]
        write: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// Initialize configuration and a sample rule table
    Init {
        /// Overwrite existing files
        #[arg(long)]
        force: bool,
    },
}

/// Output format for reports.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    #[default]
    Text,
    /// JSON output.
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Extract {
            path,
            format,
            output,
        } => commands::extract::run(&path, format, output.as_deref(), cli.config.as_deref()),
        Commands::Compare {
            old_path,
            new_path,
            format,
        } => commands::compare::run(&old_path, &new_path, format, cli.config.as_deref()),
        Commands::Rewrite {
            path,
            rules,
            write,
            format,
        } => commands::rewrite::run(&path, &rules, write, format, cli.config.as_deref()),
        Commands::Init { force } => commands::init::run(force),
    }
}
