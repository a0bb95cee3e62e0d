//! Diagnostics sink for rejected operations.
//!
//! Graphs and searches never panic on caller error. Instead they hand a
//! [`Diagnostic`] to a [`DiagnosticSink`] and return a sentinel. Sinks only
//! observe: nothing they do can change the outcome of the operation.
//!
//! - [`TracingSink`]: structured `tracing` events (default, requires the `tracing` feature)
//! - [`NullSink`]: drops everything
//! - [`RecordingSink`]: keeps diagnostics in memory, mostly for tests

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::GraphError;

/// One rejected operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// Component that rejected the call (e.g. `"SparseGraph"`).
    pub component: &'static str,
    /// Operation name (e.g. `"add_edge"`).
    pub operation: &'static str,
    /// What went wrong.
    pub error: GraphError,
    /// Optional owner the report is attributed to.
    pub attribution: Option<&'static str>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}: {}", self.component, self.operation, self.error)?;
        if let Some(by) = self.attribution {
            write!(f, " (by {by})")?;
        }
        Ok(())
    }
}

/// Receives diagnostics from graphs and searches.
///
/// Sinks are shared behind an [`Arc`], so graphs and searches that own one can
/// still be moved across threads.
pub trait DiagnosticSink: Send + Sync {
    /// Observes a rejected operation.
    fn report(&self, diagnostic: &Diagnostic);
}

/// Emits each diagnostic as a `tracing` warning.
///
/// Without the `tracing` feature this sink behaves like [`NullSink`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            component = diagnostic.component,
            operation = diagnostic.operation,
            attribution = diagnostic.attribution,
            error = %diagnostic.error,
            "graph operation rejected"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = diagnostic;
    }
}

/// Discards every diagnostic.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DiagnosticSink for NullSink {
    fn report(&self, _diagnostic: &Diagnostic) {}
}

/// Stores diagnostics so callers can inspect them afterwards.
#[derive(Debug, Default)]
pub struct RecordingSink {
    entries: Mutex<Vec<Diagnostic>>,
}

impl RecordingSink {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Diagnostic>> {
        // Each critical section is a single push, read or clear; poison carries no torn state.
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Number of diagnostics recorded so far.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if nothing has been reported.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Returns a copy of every recorded diagnostic, oldest first.
    pub fn entries(&self) -> Vec<Diagnostic> {
        self.lock().clone()
    }

    /// Returns the most recent error, if any.
    pub fn last_error(&self) -> Option<GraphError> {
        self.lock().last().map(|d| d.error.clone())
    }

    /// Drops all recorded diagnostics.
    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl DiagnosticSink for RecordingSink {
    fn report(&self, diagnostic: &Diagnostic) {
        self.lock().push(diagnostic.clone());
    }
}

/// A sink bound to one component.
///
/// Graphs and searches each own a `Reporter`; cloning it shares the sink.
#[derive(Clone)]
pub struct Reporter {
    sink: Arc<dyn DiagnosticSink>,
    component: &'static str,
    attribution: Option<&'static str>,
}

impl Reporter {
    /// Creates a reporter for `component` that forwards to `sink`.
    pub fn new(component: &'static str, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            sink,
            component,
            attribution: None,
        }
    }

    /// Creates a reporter for `component` backed by a [`TracingSink`].
    pub fn tracing(component: &'static str) -> Self {
        Self::new(component, Arc::new(TracingSink))
    }

    /// Attributes every subsequent report to `owner`.
    #[must_use]
    pub fn attributed_to(mut self, owner: &'static str) -> Self {
        self.attribution = Some(owner);
        self
    }

    /// Replaces the sink, keeping component and attribution.
    pub fn set_sink(&mut self, sink: Arc<dyn DiagnosticSink>) {
        self.sink = sink;
    }

    /// Component name used in reports.
    pub fn component(&self) -> &'static str {
        self.component
    }

    /// Reports `error` for `operation`.
    pub fn report(&self, operation: &'static str, error: &GraphError) {
        self.sink.report(&Diagnostic {
            component: self.component,
            operation,
            error: error.clone(),
            attribution: self.attribution,
        });
    }

    /// Reports `error` and returns it as `Err`.
    pub(crate) fn fail<T>(&self, operation: &'static str, error: GraphError) -> Result<T, GraphError> {
        self.report(operation, &error);
        Err(error)
    }
}

impl fmt::Debug for Reporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reporter")
            .field("component", &self.component)
            .field("attribution", &self.attribution)
            .finish_non_exhaustive()
    }
}
