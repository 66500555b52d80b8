//! Formatting for durations and the analysis summary.

use console::Term;
use modmap_graph::BuildStatistics;
use owo_colors::OwoColorize;
use std::time::Duration;

use super::colors_enabled;

/// Format duration in human-readable format.
///
/// ```
/// use std::time::Duration;
/// use modmap_cli::ui::format_duration;
///
/// assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
/// ```
pub fn format_duration(duration: Duration) -> String {
    let total_ms = duration.as_millis();

    if total_ms < 1000 {
        format!("{}ms", total_ms)
    } else if total_ms < 60_000 {
        format!("{:.2}s", duration.as_secs_f64())
    } else {
        let secs = duration.as_secs();
        format!("{}m {}s", secs / 60, secs % 60)
    }
}

/// Label/value rows shown in the summary table.
pub fn summary_lines(stats: &BuildStatistics) -> Vec<(&'static str, usize)> {
    vec![
        ("Files analyzed", stats.files_analyzed),
        ("Files skipped", stats.files_failed),
        ("Modules", stats.module_count),
        ("Local modules", stats.local_module_count),
        ("External dependencies", stats.external_dependency_count),
        ("Imported symbols", stats.symbol_count),
        ("Links", stats.edge_count),
        ("Unused exports", stats.unused_export_count),
    ]
}

/// Print the analysis summary table to stderr.
pub fn print_summary(stats: &BuildStatistics, duration: Duration) {
    let width = (Term::stderr().size().1 as usize).min(60);
    let title = "Module Map Summary";

    if colors_enabled() {
        eprintln!("\n{}", title.bold().underline());
    } else {
        eprintln!("\n{}", title);
    }
    eprintln!("{}", "─".repeat(width));

    for (label, value) in summary_lines(stats) {
        let value = value.to_string();
        if colors_enabled() {
            eprintln!("  {:<24} {:>10}", label, value.cyan());
        } else {
            eprintln!("  {:<24} {:>10}", label, value);
        }
    }

    eprintln!("{}", "─".repeat(width));
    eprintln!("  {:<24} {:>10}", "Time", format_duration(duration));
}
