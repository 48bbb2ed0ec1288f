//! Thread-local context tracking for crash reports.
//!
//! Records which report phase is running and which page URL is being
//! processed. Guards restore the previous context on drop, so nested scopes
//! (a page inside a phase) unwind cleanly.

use std::cell::RefCell;

thread_local! {
    static CURRENT_CONTEXT: RefCell<ReportContext> = const { RefCell::new(ReportContext::new()) };
}

/// Snapshot of what report generation was doing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportContext {
    pub phase: Option<ReportPhase>,
    pub current_page: Option<String>,
}

impl ReportContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: None,
            current_page: None,
        }
    }
}

/// Major stages of one report generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportPhase {
    /// Reading page and test-run documents
    Loading,
    /// Registering documentation sources
    DocumentationScan,
    /// Counting issues per type
    Summary,
    /// Per-page and per-site issue rollups
    Rollups,
    /// Flattening test records into the detailed table
    DetailedResults,
    /// Building the breakpoint matrix and its cross-tabulations
    BreakpointPivot,
    /// Rendering the report
    OutputGeneration,
}

impl std::fmt::Display for ReportPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Loading => write!(f, "loading"),
            Self::DocumentationScan => write!(f, "documentation_scan"),
            Self::Summary => write!(f, "summary"),
            Self::Rollups => write!(f, "rollups"),
            Self::DetailedResults => write!(f, "detailed_results"),
            Self::BreakpointPivot => write!(f, "breakpoint_pivot"),
            Self::OutputGeneration => write!(f, "output_generation"),
        }
    }
}

/// RAII guard restoring the previous context on drop.
pub struct ContextGuard {
    previous: ReportContext,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT_CONTEXT.with(|ctx| {
            *ctx.borrow_mut() = self.previous.clone();
        });
    }
}

fn update(apply: impl FnOnce(&mut ReportContext)) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        apply(&mut ctx.borrow_mut());
        ContextGuard { previous }
    })
}

/// Set the current phase until the guard drops.
///
/// ```ignore
/// let _phase = set_phase(ReportPhase::Summary);
/// ```
#[must_use]
pub fn set_phase(phase: ReportPhase) -> ContextGuard {
    update(|ctx| ctx.phase = Some(phase))
}

/// Set the page being processed until the guard drops.
#[must_use]
pub fn set_current_page(url: impl Into<String>) -> ContextGuard {
    let url = url.into();
    update(|ctx| ctx.current_page = Some(url))
}

#[must_use]
pub fn get_current_context() -> ReportContext {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

/// Reset the current thread's context to empty.
pub fn reset_context() {
    CURRENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = ReportContext::new();
    });
}
