//! Diff command implementation

use anyhow::{Context, Result};
use golden_core::diff::render;
use golden_core::{CaseContext, GoldenConfig, GoldenFile, TracingReporter};
use std::path::Path;

use crate::console::CliConsole;

/// Render the diff between two files; returns false when they differ
pub async fn diff(
    config: GoldenConfig,
    expected: &Path,
    actual: &Path,
    context: Option<usize>,
    console: &CliConsole,
) -> Result<bool> {
    let context_lines = context.unwrap_or_else(|| config.context_lines());
    let ctx = CaseContext::new(TracingReporter::shared("diff"), config);

    let expected_bytes = GoldenFile::new(expected, ctx.clone()).bytes().await?;
    let actual_bytes = GoldenFile::new(actual, ctx).bytes().await?;

    if expected_bytes == actual_bytes {
        tracing::debug!("files are identical");
        return Ok(true);
    }

    let report = render(&expected_bytes, &actual_bytes, context_lines)
        .with_context(|| format!("diffing {} against {}", actual.display(), expected.display()))?;
    print!("{}", report.render_text(console.color()));
    Ok(false)
}
