//! Command routing logic for CLI

use anyhow::Result;
use golden_core::GoldenConfig;

use crate::args::{Cli, Commands};
use crate::commands;
use crate::console::CliConsole;

/// Route CLI commands to their handlers
///
/// Returns whether the command found nothing to report.
pub async fn route(cli: Cli) -> Result<bool> {
    let config = resolve_config(&cli)?;
    let console = CliConsole::new(config.color);

    match &cli.command {
        Commands::List { dir } => commands::list::list(config, dir, &console).await,
        Commands::Diff {
            expected,
            actual,
            context,
        } => commands::diff::diff(config, expected, actual, *context, &console).await,
        Commands::Orphans { dir } => commands::orphans::orphans(config, dir, &console).await,
    }
}

/// Config file (or defaults), then `GOLDEN_*` variables, then flags
pub fn resolve_config(cli: &Cli) -> Result<GoldenConfig> {
    let base = match &cli.config {
        Some(path) => GoldenConfig::load(path)?,
        None => GoldenConfig::default(),
    };

    let mut config = base.with_env_lookup(|key| std::env::var(key).ok())?;

    if let Some(extension) = &cli.extension {
        config = config.with_extension(extension.clone());
    }
    if let Some(base_path) = &cli.base_path {
        config = config.with_base_path(base_path.clone());
    }
    if cli.verbose {
        config = config.with_verbose(true);
    }
    if cli.no_color {
        config = config.with_color(false);
    }

    config.validate()?;
    tracing::debug!(?config, "resolved configuration");
    Ok(config)
}
