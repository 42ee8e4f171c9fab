//! Test cases: an input fixture paired with its golden file

use async_trait::async_trait;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::GoldenConfig;
use crate::diff;
use crate::error::{GoldenError, GoldenResult};
use crate::file::GoldenFile;
use crate::report::{Reporter, TracingReporter};

/// Reporting context and configuration shared by a case and its files
#[derive(Debug, Clone)]
pub struct CaseContext {
    reporter: Arc<dyn Reporter>,
    config: Arc<GoldenConfig>,
}

impl CaseContext {
    /// Create a context from a reporter and a configuration
    pub fn new(reporter: Arc<dyn Reporter>, config: impl Into<Arc<GoldenConfig>>) -> Self {
        Self {
            reporter,
            config: config.into(),
        }
    }

    /// Context that logs through `tracing` with default configuration
    pub fn detached() -> Self {
        Self::new(TracingReporter::shared(""), GoldenConfig::default())
    }

    /// Reporter for the current check
    pub fn reporter(&self) -> &Arc<dyn Reporter> {
        &self.reporter
    }

    /// Shared configuration
    pub fn config(&self) -> &Arc<GoldenConfig> {
        &self.config
    }

    /// Same configuration, different reporter
    pub fn with_reporter(&self, reporter: Arc<dyn Reporter>) -> Self {
        Self {
            reporter,
            config: Arc::clone(&self.config),
        }
    }
}

/// Input fixture plus the golden file holding its expected output
///
/// The golden path is always `input path + extension`. Constructing a case
/// never touches the disk.
#[derive(Debug, Clone)]
pub struct Case {
    input: GoldenFile,
    golden: GoldenFile,
    context: CaseContext,
}

impl Case {
    /// Create a case for `path` bound to `context`
    pub fn new(path: impl Into<PathBuf>, context: CaseContext) -> Self {
        let path = path.into();
        let golden_path = context.config().golden_path(&path);
        Self {
            input: GoldenFile::new(path, context.clone()),
            golden: GoldenFile::new(golden_path, context.clone()),
            context,
        }
    }

    /// Case with default configuration that logs failures instead of raising
    pub fn standalone(path: impl Into<PathBuf>) -> Self {
        Self::new(path, CaseContext::detached())
    }

    /// The input fixture
    pub fn input(&self) -> &GoldenFile {
        &self.input
    }

    /// The golden file
    pub fn golden(&self) -> &GoldenFile {
        &self.golden
    }

    /// Context this case reports through
    pub fn context(&self) -> &CaseContext {
        &self.context
    }

    /// Sub-check name: the input path
    pub fn name(&self) -> String {
        self.input.path().display().to_string()
    }

    /// Same paths, bound to another reporter
    pub fn rebind(&self, reporter: Arc<dyn Reporter>) -> Self {
        let context = self.context.with_reporter(reporter);
        Self {
            input: GoldenFile::new(self.input.path(), context.clone()),
            golden: GoldenFile::new(self.golden.path(), context.clone()),
            context,
        }
    }

    /// Compare `actual` against the golden file
    ///
    /// A missing golden file is a read error, not a pass.
    pub async fn diff(&self, actual: impl AsRef<[u8]>) -> GoldenResult<()> {
        let actual = actual.as_ref();
        let expected = self.golden.bytes().await?;
        if expected == actual {
            return Ok(());
        }

        let config = self.context.config();
        let report = diff::render(&expected, actual, config.context_lines())?;
        Err(GoldenError::mismatch(
            self.golden.path(),
            report.render_text(config.color),
        ))
    }

    /// Run `check` inside a sub-check named after the input path
    ///
    /// Errors returned by the check fail the sub-check. Returns whether the
    /// sub-check passed.
    pub async fn check<C: CaseCheck>(&self, check: C, update: bool) -> bool {
        let reporter = self.context.reporter().subcheck(&self.name());
        let case = self.rebind(Arc::clone(&reporter));

        match check.check(case, update).await {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(check = %reporter.name(), code = e.error_code(), "check failed");
                reporter.fail(&e.to_string());
                false
            }
        }
    }

    /// Produce actual output with `f`, then compare it or, when `update` is
    /// set, write it to the golden file
    pub async fn run<F, Fut, O>(&self, update: bool, f: F) -> bool
    where
        F: FnOnce(Case) -> Fut + Send,
        Fut: Future<Output = GoldenResult<O>> + Send + 'static,
        O: AsRef<[u8]> + Send + 'static,
    {
        self.check(Golden(f), update).await
    }

    /// Hand the bound case to `f`, which compares or updates on its own
    pub async fn test<F, Fut>(&self, f: F) -> bool
    where
        F: FnOnce(Case) -> Fut + Send,
        Fut: Future<Output = GoldenResult<()>> + Send + 'static,
    {
        self.check(Inspect(f), false).await
    }

    /// Path of the golden file for this case
    pub fn golden_path(&self) -> &Path {
        self.golden.path()
    }
}

/// A check run against one case inside its sub-check
#[async_trait]
pub trait CaseCheck: Send + Sized {
    /// Execute against a case already bound to the sub-check reporter
    async fn check(self, case: Case, update: bool) -> GoldenResult<()>;
}

/// Check whose closure returns the actual output
///
/// In update mode the output overwrites the golden file and no comparison
/// happens; otherwise it is compared against the golden file.
pub struct Golden<F>(pub F);

#[async_trait]
impl<F, Fut, O> CaseCheck for Golden<F>
where
    F: FnOnce(Case) -> Fut + Send,
    Fut: Future<Output = GoldenResult<O>> + Send + 'static,
    O: AsRef<[u8]> + Send + 'static,
{
    async fn check(self, case: Case, update: bool) -> GoldenResult<()> {
        let actual = (self.0)(case.clone()).await?.as_ref().to_vec();
        if update {
            case.golden().update(&actual).await
        } else {
            case.diff(&actual).await
        }
    }
}

/// Check whose closure receives the case and does its own comparison
pub struct Inspect<F>(pub F);

#[async_trait]
impl<F, Fut> CaseCheck for Inspect<F>
where
    F: FnOnce(Case) -> Fut + Send,
    Fut: Future<Output = GoldenResult<()>> + Send + 'static,
{
    async fn check(self, case: Case, _update: bool) -> GoldenResult<()> {
        (self.0)(case).await
    }
}
