//! Case discovery
//!
//! A blocking walker task scans a directory tree and streams one [`Case`] per
//! input file through a bounded channel. The walker suspends while the
//! channel is full, and stops as soon as the consumer drops the stream.

use futures::Stream;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use walkdir::{DirEntry, WalkDir};

use crate::case::{Case, CaseContext};
use crate::config::GoldenConfig;
use crate::error::{GoldenError, GoldenResult};
use crate::report::{Reporter, TracingReporter};

/// Result of running a check over every case in a directory
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of cases run
    pub total: usize,
    /// Number of cases whose sub-check failed
    pub failed: usize,
}

impl RunSummary {
    /// Whether every case passed
    pub fn passed(&self) -> bool {
        self.failed == 0
    }
}

/// Scans directories for input files and turns them into cases
#[derive(Debug, Clone)]
pub struct Discovery {
    context: CaseContext,
}

impl Discovery {
    /// Create a discovery bound to `reporter`
    pub fn new(config: impl Into<Arc<GoldenConfig>>, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            context: CaseContext::new(reporter, config),
        }
    }

    /// Discovery that logs through `tracing`
    pub fn with_config(config: impl Into<Arc<GoldenConfig>>) -> Self {
        Self::new(config, TracingReporter::shared(""))
    }

    /// Shared configuration
    pub fn config(&self) -> &Arc<GoldenConfig> {
        self.context.config()
    }

    /// Reporter that walk errors and case sub-checks go to
    pub fn reporter(&self) -> &Arc<dyn Reporter> {
        self.context.reporter()
    }

    /// Directory a scan of `root` actually walks
    pub fn resolve(&self, root: impl AsRef<Path>) -> PathBuf {
        self.config().base_path.join(root)
    }

    /// Start walking `root` and stream the discovered cases
    ///
    /// # Panics
    ///
    /// Panics if called outside a Tokio runtime; the walker runs on the
    /// runtime's blocking pool.
    pub fn scan(&self, root: impl AsRef<Path>) -> GoldenResult<CaseStream> {
        self.config().validate()?;

        let root = self.resolve(root);
        let (tx, rx) = mpsc::channel(self.config().channel_size);
        let context = self.context.clone();

        tracing::debug!(root = %root.display(), "scanning for cases");
        let walker = tokio::task::spawn_blocking(move || walk_cases(&root, &context, &tx));

        Ok(CaseStream { rx, walker })
    }

    /// Collect every case under `root` in walk order
    ///
    /// Needs a Tokio runtime, see [`Discovery::scan`].
    pub async fn scan_all(&self, root: impl AsRef<Path>) -> GoldenResult<Vec<Case>> {
        let mut stream = self.scan(root)?;
        let mut cases = Vec::new();
        while let Some(case) = stream.next().await {
            cases.push(case);
        }
        stream.finish().await?;
        Ok(cases)
    }

    /// Run a golden check on every case under `root`
    ///
    /// Each case runs in its own sub-check, one after another in walk order.
    pub async fn run_dir<F, Fut, O>(
        &self,
        root: impl AsRef<Path>,
        update: bool,
        f: F,
    ) -> GoldenResult<RunSummary>
    where
        F: Fn(Case) -> Fut + Send + Sync,
        Fut: Future<Output = GoldenResult<O>> + Send + 'static,
        O: AsRef<[u8]> + Send + 'static,
    {
        let mut stream = self.scan(root)?;
        let mut summary = RunSummary::default();
        while let Some(case) = stream.next().await {
            summary.total += 1;
            if !case.run(update, |c| f(c)).await {
                summary.failed += 1;
            }
        }
        stream.finish().await?;
        Ok(summary)
    }

    /// Hand every case under `root` to `f` inside its own sub-check
    pub async fn test_dir<F, Fut>(&self, root: impl AsRef<Path>, f: F) -> GoldenResult<RunSummary>
    where
        F: Fn(Case) -> Fut + Send + Sync,
        Fut: Future<Output = GoldenResult<()>> + Send + 'static,
    {
        let mut stream = self.scan(root)?;
        let mut summary = RunSummary::default();
        while let Some(case) = stream.next().await {
            summary.total += 1;
            if !case.test(|c| f(c)).await {
                summary.failed += 1;
            }
        }
        stream.finish().await?;
        Ok(summary)
    }

    /// Golden files under `root` whose input file no longer exists
    ///
    /// # Panics
    ///
    /// Panics if polled outside a Tokio runtime, like [`Discovery::scan`].
    pub async fn orphans(&self, root: impl AsRef<Path>) -> GoldenResult<Vec<PathBuf>> {
        self.config().validate()?;

        let root = self.resolve(root);
        let context = self.context.clone();
        tokio::task::spawn_blocking(move || walk_orphans(&root, &context))
            .await
            .map_err(|e| GoldenError::walk(PathBuf::new(), format!("walker task failed: {}", e)))?
    }
}

/// Stream of cases produced by a running scan
///
/// End of stream means the walker finished or failed; call
/// [`CaseStream::finish`] to tell which. Dropping the stream stops the walker.
#[derive(Debug)]
pub struct CaseStream {
    rx: mpsc::Receiver<Case>,
    walker: JoinHandle<GoldenResult<usize>>,
}

impl CaseStream {
    /// Next case in walk order, or `None` once the walker is done
    pub async fn next(&mut self) -> Option<Case> {
        self.rx.recv().await
    }

    /// Wait for the walker and return how many cases it emitted
    ///
    /// Cases still buffered in the channel are discarded.
    pub async fn finish(self) -> GoldenResult<usize> {
        let Self { rx, walker } = self;
        drop(rx);
        walker
            .await
            .map_err(|e| GoldenError::walk(PathBuf::new(), format!("walker task failed: {}", e)))?
    }
}

impl Stream for CaseStream {
    type Item = Case;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.rx.poll_recv(cx)
    }
}

fn walk_files(root: &Path, context: &CaseContext) -> impl Iterator<Item = GoldenResult<DirEntry>> {
    let reporter = Arc::clone(context.reporter());
    let root_path = root.to_path_buf();

    WalkDir::new(root)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_map(move |entry| match entry {
            Ok(entry) if entry.file_type().is_file() => Some(Ok(entry)),
            Ok(_) => None,
            Err(e) => {
                let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| root_path.clone());
                let message = e.to_string();
                tracing::warn!(path = %path.display(), error = %message, "walk failed");
                reporter.fail(&format!("walking {}: {}", path.display(), message));
                Some(Err(GoldenError::walk(path, message)))
            }
        })
}

fn walk_cases(root: &Path, context: &CaseContext, tx: &mpsc::Sender<Case>) -> GoldenResult<usize> {
    let config = context.config();
    let mut count = 0;

    for entry in walk_files(root, context) {
        let entry = entry?;
        if config.is_golden_path(entry.path()) {
            continue;
        }

        tracing::debug!(path = %entry.path().display(), "discovered case");
        let case = Case::new(entry.into_path(), context.clone());
        if tx.blocking_send(case).is_err() {
            tracing::debug!(root = %root.display(), "case stream dropped, stopping walk");
            return Ok(count);
        }
        count += 1;
    }

    tracing::debug!(root = %root.display(), cases = count, "walk complete");
    Ok(count)
}

fn walk_orphans(root: &Path, context: &CaseContext) -> GoldenResult<Vec<PathBuf>> {
    let config = context.config();
    let mut orphans = Vec::new();

    for entry in walk_files(root, context) {
        let entry = entry?;
        let Some(input) = config.input_path(entry.path()) else {
            continue;
        };
        if !input.exists() {
            orphans.push(entry.into_path());
        }
    }

    Ok(orphans)
}
