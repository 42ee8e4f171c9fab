//! Golden file CLI
//!
//! Operator tooling over the golden-core library:
//!
//! - `golden list <dir>` lists discovered cases and whether each has a golden file
//! - `golden diff <expected> <actual>` renders a unified diff, exit status 1 on difference
//! - `golden orphans <dir>` lists stale golden files, exit status 1 if any exist
//!
//! Errors exit with status 2.

mod args;
mod commands;
mod console;
mod router;

use args::Cli;
use clap::Parser;
use std::process::ExitCode;

#[tokio::main]
async fn main() -> ExitCode {
    // Set RUST_LOG=debug for verbose logging
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match router::route(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            console::CliConsole::new(true).error(&format!("{:#}", e));
            ExitCode::from(2)
        }
    }
}
