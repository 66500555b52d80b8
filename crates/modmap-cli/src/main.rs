//! modmap - module dependency registry for JavaScript/TypeScript source trees.

use clap::Parser;
use miette::Result;
use modmap_cli::{cli, commands, error, logger, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    logger::init_logger(args.verbose, args.quiet, args.no_color);
    ui::init_colors(args.no_color);

    let result = match args.command {
        cli::Command::Analyze(analyze_args) => commands::analyze_execute(analyze_args).await,
        cli::Command::Schema => commands::schema_execute(),
    };

    result.map_err(error::cli_error_to_miette)
}
