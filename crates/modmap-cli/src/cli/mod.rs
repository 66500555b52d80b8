//! Command-line interface definition for modmap.
//!
//! # Command Structure
//!
//! - `modmap analyze [ROOT]` - Build the module registry and write outputs
//! - `modmap schema` - Print the JSON schema of `modmap.config.json`

mod commands;
mod validation;

use clap::Parser;

pub use commands::{AnalyzeArgs, Command};
pub use validation::parse_exclude;

/// modmap - map how JavaScript/TypeScript modules import each other
#[derive(Parser, Debug)]
#[command(
    name = "modmap",
    version,
    about = "Map how JavaScript/TypeScript modules import each other",
    long_about = "modmap walks a source tree, records every import and export, and writes\n\
                  a registry of which module imports which symbol from which other module,\n\
                  as JSON and as an interactive HTML diagram."
)]
pub struct Cli {
    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}
