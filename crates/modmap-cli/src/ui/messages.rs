//! Status message functions for terminal output.

use owo_colors::{OwoColorize, Style};

use super::colors_enabled;

fn print(symbol: &str, symbol_style: Style, message: &str, message_style: Option<Style>) {
    if !colors_enabled() {
        eprintln!("{} {}", symbol, message);
        return;
    }
    match message_style {
        Some(style) => eprintln!("{} {}", symbol.style(symbol_style), message.style(style)),
        None => eprintln!("{} {}", symbol.style(symbol_style), message),
    }
}

/// Print a success message to stderr.
pub fn success(message: &str) {
    print("✓", Style::new().green().bold(), message, None);
}

/// Print an info message to stderr.
pub fn info(message: &str) {
    print("ℹ", Style::new().blue().bold(), message, None);
}

/// Print a warning message to stderr.
///
/// Used for files that were left out of the registry.
pub fn warning(message: &str) {
    print(
        "⚠",
        Style::new().yellow().bold(),
        message,
        Some(Style::new().yellow()),
    );
}
