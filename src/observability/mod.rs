//! Observability infrastructure for crash reports and debugging.
//!
//! - **Tracing**: `tracing-subscriber` setup for the binary
//! - **Context Tracking**: thread-local report phase and current page
//! - **Panic Hook**: crash reports naming the phase and page
//!
//! ```ignore
//! use a11y_report::observability::{set_phase, set_current_page, ReportPhase};
//!
//! let _phase = set_phase(ReportPhase::Summary);
//! for page in &pages {
//!     let _page = set_current_page(page.url());
//!     // a panic here reports the phase and page
//! }
//! ```

pub mod context;
pub mod panic_hook;
pub mod tracing;

pub use context::{
    get_current_context, reset_context, set_current_page, set_phase, ContextGuard,
    ReportContext, ReportPhase,
};
pub use panic_hook::install_panic_hook;
pub use self::tracing::init_tracing;
