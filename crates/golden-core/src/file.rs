//! Read/write access to a single fixture file

use regex::Regex;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;

use crate::case::CaseContext;
use crate::diff;
use crate::error::{GoldenError, GoldenResult};

/// One fixture path, bound to the reporting context of the case that owns it
///
/// The handle holds the shared context, never the case itself. It is
/// immutable; `update` changes the file on disk only.
#[derive(Debug, Clone)]
pub struct GoldenFile {
    path: PathBuf,
    context: CaseContext,
}

impl GoldenFile {
    /// Create a handle for `path` bound to `context`
    pub fn new(path: impl Into<PathBuf>, context: CaseContext) -> Self {
        Self {
            path: path.into(),
            context,
        }
    }

    /// Path of this file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Context this handle reports through
    pub fn context(&self) -> &CaseContext {
        &self.context
    }

    /// Whether anything is statable at this path (file or directory)
    pub async fn exists(&self) -> bool {
        fs::metadata(&self.path).await.is_ok()
    }

    /// Whole file content as bytes
    pub async fn bytes(&self) -> GoldenResult<Vec<u8>> {
        fs::read(&self.path)
            .await
            .map_err(|e| GoldenError::read(&self.path, e))
    }

    /// Whole file content as UTF-8 text
    pub async fn text(&self) -> GoldenResult<String> {
        let bytes = self.bytes().await?;
        String::from_utf8(bytes)
            .map_err(|e| GoldenError::read(&self.path, io::Error::new(io::ErrorKind::InvalidData, e)))
    }

    /// Open the file for streaming reads
    ///
    /// The descriptor is released when the returned handle is dropped; every
    /// call opens a fresh handle positioned at the start.
    pub async fn reader(&self) -> GoldenResult<fs::File> {
        fs::File::open(&self.path)
            .await
            .map_err(|e| GoldenError::read(&self.path, e))
    }

    /// Overwrite the file with `content`
    ///
    /// Logs a before/after diff to the reporting context, then writes
    /// (create or truncate, mode `0644` for new files on unix).
    pub async fn update(&self, content: &[u8]) -> GoldenResult<()> {
        let reporter = self.context.reporter();
        let config = self.context.config();

        reporter.log(&format!("updating golden file: {}", self.path.display()));
        tracing::info!(
            path = %self.path.display(),
            bytes = content.len(),
            "updating golden file"
        );

        let before = if self.exists().await {
            self.bytes().await?
        } else {
            Vec::new()
        };
        let report = diff::render(&before, content, config.context_lines())?;
        reporter.log(&report.render_text(config.color));

        self.write(content).await
    }

    async fn write(&self, content: &[u8]) -> GoldenResult<()> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        options.mode(0o644);

        let mut file = options
            .open(&self.path)
            .await
            .map_err(|e| GoldenError::write(&self.path, e))?;
        file.write_all(content)
            .await
            .map_err(|e| GoldenError::write(&self.path, e))?;
        file.flush()
            .await
            .map_err(|e| GoldenError::write(&self.path, e))?;
        Ok(())
    }

    /// Split the file text into sections on `separator`
    ///
    /// See [`split_sections`].
    pub async fn split(&self, separator: &str) -> GoldenResult<Vec<String>> {
        let text = self.text().await?;
        split_sections(&text, separator)
    }
}

/// Split `text` on `separator`, swallowing one optional line break
/// (`\n` or `\r\n`) on either side of each occurrence
pub fn split_sections(text: &str, separator: &str) -> GoldenResult<Vec<String>> {
    if separator.is_empty() {
        return Err(GoldenError::config("split separator must not be empty"));
    }

    let pattern = format!(r"\r?\n?{}\r?\n?", regex::escape(separator));
    let re = Regex::new(&pattern)
        .map_err(|e| GoldenError::config(format!("invalid split separator: {}", e)))?;
    Ok(re.split(text).map(str::to_string).collect())
}
