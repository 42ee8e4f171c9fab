//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "golden")]
#[command(about = "Inspect golden-file fixtures: list cases, diff files, find stale golden files")]
#[command(version)]
pub struct Cli {
    /// Path to a golden.toml configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Golden file extension (default: .golden)
    #[arg(long, global = true)]
    pub extension: Option<String>,

    /// Base path that relative directories are resolved against
    #[arg(long, global = true)]
    pub base_path: Option<PathBuf>,

    /// Show more context around each diff hunk
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List discovered cases and whether each has a golden file
    List {
        /// Directory to scan
        dir: PathBuf,
    },

    /// Render a unified diff between two files
    Diff {
        /// File with the expected content
        expected: PathBuf,

        /// File with the actual content
        actual: PathBuf,

        /// Context lines around each hunk
        #[arg(long)]
        context: Option<usize>,
    },

    /// List golden files whose input file no longer exists
    Orphans {
        /// Directory to scan
        dir: PathBuf,
    },
}
