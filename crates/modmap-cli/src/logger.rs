//! Logging setup for the modmap CLI.
//!
//! Library code logs through `tracing`; this module installs the subscriber
//! that prints it. Output goes to stderr so stdout stays clean for `schema`.
//!
//! # Example
//!
//! ```rust,no_run
//! use modmap_cli::logger::init_logger;
//! use tracing::{debug, info};
//!
//! init_logger(false, false, false);
//!
//! info!("Analyzing project");
//! debug!("Parsed {}", "src/index.ts");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used with `--verbose`.
pub const VERBOSE_FILTER: &str = "modmap=debug,modmap_graph=debug,modmap_cli=debug";

/// Filter used with `--quiet`.
pub const QUIET_FILTER: &str = "modmap=error,modmap_graph=error,modmap_cli=error";

/// Filter used when neither flag nor `RUST_LOG` is set.
pub const DEFAULT_FILTER: &str = "modmap_graph=info,modmap_cli=info";

/// Install the global tracing subscriber. Call once, before any logging.
///
/// The filter is chosen in this order:
/// 1. `--verbose`: debug for modmap crates
/// 2. `--quiet`: errors only
/// 3. `RUST_LOG`
/// 4. info for modmap crates
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool) {
    init_logger_with_filter(select_filter(verbose, quiet), no_color);
}

/// Install the subscriber with an explicit filter.
pub fn init_logger_with_filter(filter: EnvFilter, no_color: bool) {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color)
        .compact();

    // a second init (tests) is harmless
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

fn select_filter(verbose: bool, quiet: bool) -> EnvFilter {
    if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else if quiet {
        EnvFilter::new(QUIET_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    }
}
