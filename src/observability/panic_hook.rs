//! Panic hook printing a crash report with the current report phase and
//! page.

use super::context::{get_current_context, ReportContext};
use std::panic::PanicHookInfo;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const WIDTH: usize = 76;

/// Install the crash-report hook. Call early in `main`.
pub fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        print_crash_report(info);
    }));
}

fn print_crash_report(info: &PanicHookInfo<'_>) {
    let context = get_current_context();
    eprintln!();
    for line in crash_report_lines(&extract_panic_message(info), location(info), &context) {
        eprintln!("{line}");
    }
    if std::env::var("RUST_BACKTRACE").is_ok() {
        eprintln!();
        eprintln!("{}", std::backtrace::Backtrace::capture());
    }
}

fn location(info: &PanicHookInfo<'_>) -> Option<String> {
    info.location()
        .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
}

fn boxed(label: &str, value: &str) -> String {
    let text = format!("{label}{value}");
    format!("║  {:<width$}║", truncate(&text, WIDTH - 2), width = WIDTH)
}

fn crash_report_lines(
    message: &str,
    location: Option<String>,
    context: &ReportContext,
) -> Vec<String> {
    let rule = "═".repeat(WIDTH + 2);
    let mut lines = vec![
        format!("╔{rule}╗"),
        boxed("A11Y-REPORT CRASH REPORT", ""),
        format!("╠{rule}╣"),
        boxed("Version: ", VERSION),
        boxed("Platform: ", std::env::consts::OS),
        boxed(
            "Time: ",
            &chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC").to_string(),
        ),
        format!("╠{rule}╣"),
        boxed("PANIC: ", message),
    ];
    if let Some(location) = location {
        lines.push(boxed("Location: ", &location));
    }
    lines.push(format!("╠{rule}╣"));
    match context.phase {
        Some(phase) => lines.push(boxed("Phase: ", &phase.to_string())),
        None => lines.push(boxed("Phase: ", "(not set - crash before report generation)")),
    }
    if let Some(page) = &context.current_page {
        lines.push(boxed("Page: ", page));
    }
    if std::env::var("RUST_BACKTRACE").is_err() {
        lines.push(boxed("Run with RUST_BACKTRACE=1 for stack trace", ""));
    }
    lines.push(format!("╚{rule}╝"));
    lines
}

fn extract_panic_message(info: &PanicHookInfo<'_>) -> String {
    if let Some(s) = info.payload().downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = info.payload().downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
