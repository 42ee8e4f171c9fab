//! List command implementation

use anyhow::Result;
use golden_core::{Discovery, GoldenConfig};
use std::path::Path;

use crate::console::CliConsole;

/// Print every case under `dir` with the state of its golden file
pub async fn list(config: GoldenConfig, dir: &Path, console: &CliConsole) -> Result<bool> {
    let discovery = Discovery::with_config(config);
    let mut stream = discovery.scan(dir)?;

    let mut missing = 0;
    while let Some(case) = stream.next().await {
        if case.golden().exists().await {
            console.success(&case.name());
        } else {
            missing += 1;
            console.warn(&format!("{} (no golden file)", case.name()));
        }
    }

    let total = stream.finish().await?;
    console.plain(&format!("\n{} case(s), {} without golden file", total, missing));
    Ok(true)
}
