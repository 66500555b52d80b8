//! Terminal output for the modmap CLI.
//!
//! Status lines and the analysis summary go to stderr. Colors follow
//! `--no-color`, `NO_COLOR` and `FORCE_COLOR`, falling back to whether
//! stderr is attended.
//!
//! # Examples
//!
//! ```no_run
//! use modmap_cli::ui;
//!
//! ui::init_colors(false);
//! ui::success("Wrote registries.json");
//! ui::warning("src/broken.ts: parse failed");
//! ```

mod format;
mod messages;

use std::sync::atomic::{AtomicBool, Ordering};

pub use format::{format_duration, print_summary, summary_lines};
pub use messages::{info, success, warning};

static COLORS_ENABLED: AtomicBool = AtomicBool::new(false);

/// Check if color output should be enabled.
///
/// `NO_COLOR` wins over `FORCE_COLOR`; otherwise colors are used when stderr
/// is a terminal.
pub fn should_use_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    console::user_attended_stderr()
}

/// Decide once, early in `main`, whether output is colored.
pub fn init_colors(no_color: bool) {
    let enabled = !no_color && should_use_color();
    COLORS_ENABLED.store(enabled, Ordering::Relaxed);
    console::set_colors_enabled_stderr(enabled);
}

pub(crate) fn colors_enabled() -> bool {
    COLORS_ENABLED.load(Ordering::Relaxed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_color_flag_disables_colors() {
        init_colors(true);
        assert!(!colors_enabled());
    }
}
