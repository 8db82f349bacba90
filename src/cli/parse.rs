//! CLI parse: clap types for treesum. No behavior; definitions only.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Treesum CLI - deterministic directory content digests
#[derive(Parser)]
#[command(name = "treesum")]
#[command(about = "Deterministic content digests for directory trees")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Hash worker pool size (overrides configuration)
    #[arg(long)]
    pub workers: Option<usize>,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute and print the aggregate digest for the workspace
    Hash {
        /// Also list per-file digests
        #[arg(long)]
        files: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Compute the tree digest and record it as the workspace snapshot
    Record,
    /// Compare the current tree state against the recorded snapshot
    Check {
        /// List added, removed, and modified paths
        #[arg(long)]
        detail: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}
