use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::cli::validation::parse_exclude;

/// Available modmap subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a source tree and write the module registry
    ///
    /// Every script file under ROOT is parsed; failures are reported and
    /// skipped. Outputs are registries.json, links.json and tree.html.
    Analyze(AnalyzeArgs),

    /// Print the JSON schema for modmap.config.json
    Schema,
}

/// Arguments for the analyze command
#[derive(Args, Debug, Default)]
pub struct AnalyzeArgs {
    /// Directory to analyze
    ///
    /// Falls back to `root` in the config file, then to MODMAP_ROOT.
    #[arg(value_name = "ROOT")]
    pub root: Option<PathBuf>,

    /// Regex for root-relative paths to skip
    ///
    /// Matching directories are pruned with everything below them.
    /// Pass an empty string to analyze everything.
    #[arg(short, long, value_name = "REGEX", value_parser = parse_exclude)]
    pub exclude: Option<String>,

    /// Directory the output files are written to
    #[arg(short = 'o', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Do not write registries.json and links.json
    #[arg(long)]
    pub no_json: bool,

    /// Do not write tree.html
    #[arg(long)]
    pub no_html: bool,

    /// Count `import type` and other type-only declarations
    #[arg(long)]
    pub include_type_imports: bool,

    /// Path to a config file (defaults to ./modmap.config.json when present)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,
}
