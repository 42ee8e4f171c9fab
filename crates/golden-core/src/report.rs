//! Reporting contexts
//!
//! The harness talks to the host test runner only through [`Reporter`]: run a
//! named sub-check, log a message, fail the current check. Two
//! implementations are provided:
//!
//! - [`TracingReporter`] logs through `tracing`. It is the fallback when no
//!   runner context exists, so failures are logged instead of raised.
//! - [`CheckRecorder`] records every sub-check for `cargo test` and turns the
//!   recorded failures into a panic via [`CheckRecorder::assert_passed`].

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

/// Capability the harness consumes from the host test runner
pub trait Reporter: Send + Sync {
    /// Name of this check (`parent/child` for sub-checks)
    fn name(&self) -> &str;

    /// Record an informational message
    fn log(&self, message: &str);

    /// Mark this check failed with a message
    fn fail(&self, message: &str);

    /// Open a named child check
    fn subcheck(&self, name: &str) -> Arc<dyn Reporter>;
}

impl fmt::Debug for dyn Reporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reporter").field("name", &self.name()).finish()
    }
}

fn child_name(parent: &str, child: &str) -> String {
    if parent.is_empty() {
        child.to_string()
    } else {
        format!("{}/{}", parent, child)
    }
}

/// Reporter that only logs
#[derive(Debug, Clone, Default)]
pub struct TracingReporter {
    name: String,
}

impl TracingReporter {
    /// Create a tracing reporter with the given check name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Shared handle, ready to bind into a case context
    pub fn shared(name: impl Into<String>) -> Arc<dyn Reporter> {
        Arc::new(Self::new(name))
    }
}

impl Reporter for TracingReporter {
    fn name(&self) -> &str {
        &self.name
    }

    fn log(&self, message: &str) {
        tracing::info!(check = %self.name, "{}", message);
    }

    fn fail(&self, message: &str) {
        tracing::error!(check = %self.name, "{}", message);
    }

    fn subcheck(&self, name: &str) -> Arc<dyn Reporter> {
        Arc::new(Self::new(child_name(&self.name, name)))
    }
}

/// Recorded state of one check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckOutcome {
    /// Full check name
    pub name: String,
    /// Messages passed to `log`
    pub logs: Vec<String>,
    /// Messages passed to `fail`
    pub failures: Vec<String>,
}

impl CheckOutcome {
    /// Whether the check recorded no failures
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Reporter that records every check into shared state
///
/// All sub-checks of one recorder share a single outcome list, in the order
/// the checks were opened.
#[derive(Clone)]
pub struct CheckRecorder {
    index: usize,
    name: String,
    outcomes: Arc<Mutex<Vec<CheckOutcome>>>,
}

impl CheckRecorder {
    /// Create a root recorder
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let outcomes = vec![CheckOutcome {
            name: name.clone(),
            ..Default::default()
        }];
        Self {
            index: 0,
            name,
            outcomes: Arc::new(Mutex::new(outcomes)),
        }
    }

    /// Shared handle to this recorder
    pub fn handle(&self) -> Arc<dyn Reporter> {
        Arc::new(self.clone())
    }

    /// Snapshot of every recorded check
    pub fn outcomes(&self) -> Vec<CheckOutcome> {
        self.outcomes.lock().clone()
    }

    /// Outcome of the check with the given full name
    pub fn outcome(&self, name: &str) -> Option<CheckOutcome> {
        self.outcomes.lock().iter().find(|o| o.name == name).cloned()
    }

    /// Every recorded failure as `(check name, message)`
    pub fn failures(&self) -> Vec<(String, String)> {
        self.outcomes
            .lock()
            .iter()
            .flat_map(|o| o.failures.iter().map(|f| (o.name.clone(), f.clone())))
            .collect()
    }

    /// Whether any check failed
    pub fn has_failures(&self) -> bool {
        self.outcomes.lock().iter().any(|o| !o.passed())
    }

    /// Panic with every recorded failure, if there are any
    pub fn assert_passed(&self) {
        let failures = self.failures();
        if failures.is_empty() {
            return;
        }

        let mut message = format!("{} check(s) failed:\n", failures.len());
        for (name, failure) in failures {
            message.push_str(&format!("--- {} ---\n{}\n", name, failure));
        }
        panic!("{}", message);
    }

    fn with_outcome(&self, f: impl FnOnce(&mut CheckOutcome)) {
        let mut outcomes = self.outcomes.lock();
        if let Some(outcome) = outcomes.get_mut(self.index) {
            f(outcome);
        }
    }
}

impl fmt::Debug for CheckRecorder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckRecorder")
            .field("name", &self.name)
            .field("index", &self.index)
            .finish()
    }
}

impl Reporter for CheckRecorder {
    fn name(&self) -> &str {
        &self.name
    }

    fn log(&self, message: &str) {
        tracing::debug!(check = %self.name, "{}", message);
        self.with_outcome(|o| o.logs.push(message.to_string()));
    }

    fn fail(&self, message: &str) {
        self.with_outcome(|o| o.failures.push(message.to_string()));
    }

    fn subcheck(&self, name: &str) -> Arc<dyn Reporter> {
        let name = child_name(&self.name, name);
        let index = {
            let mut outcomes = self.outcomes.lock();
            outcomes.push(CheckOutcome {
                name: name.clone(),
                ..Default::default()
            });
            outcomes.len() - 1
        };
        Arc::new(Self {
            index,
            name,
            outcomes: Arc::clone(&self.outcomes),
        })
    }
}
