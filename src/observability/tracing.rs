//! Subscriber setup for the binary. Library code only emits events.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable holding a filter directive, checked before
/// `RUST_LOG`.
pub const LOG_ENV: &str = "A11Y_REPORT_LOG";

/// Default directive for a verbosity count: `warn`, then `info`, then
/// `debug` from `-vv` up.
pub fn default_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    }
}

/// Environment directive if set, otherwise the verbosity default.
pub fn build_filter(verbosity: u8) -> EnvFilter {
    std::env::var(LOG_ENV)
        .ok()
        .or_else(|| std::env::var("RUST_LOG").ok())
        .and_then(|directive| EnvFilter::try_new(directive).ok())
        .unwrap_or_else(|| EnvFilter::new(default_directive(verbosity)))
}

/// Install a stderr fmt subscriber. Records from the `log` facade are
/// bridged by tracing-subscriber's `tracing-log` feature. A second call is a
/// no-op.
pub fn init_tracing(verbosity: u8) {
    let _ = tracing_subscriber::registry()
        .with(build_filter(verbosity))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_by_verbosity() {
        assert_eq!(default_directive(0), "warn");
        assert_eq!(default_directive(1), "info");
        assert_eq!(default_directive(2), "debug");
        assert_eq!(default_directive(9), "debug");
    }
}
