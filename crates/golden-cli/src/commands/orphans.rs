//! Orphans command implementation

use anyhow::Result;
use golden_core::{Discovery, GoldenConfig};
use std::path::Path;

use crate::console::CliConsole;

/// Print golden files without an input file; returns false if any exist
pub async fn orphans(config: GoldenConfig, dir: &Path, console: &CliConsole) -> Result<bool> {
    let discovery = Discovery::with_config(config);
    let orphans = discovery.orphans(dir).await?;

    for path in &orphans {
        console.plain(&path.display().to_string());
    }

    if orphans.is_empty() {
        tracing::debug!(dir = %dir.display(), "no orphaned golden files");
    }
    Ok(orphans.is_empty())
}
