//! `modmap analyze`: build the module registry for a source tree and write
//! `registries.json`, `links.json` and `tree.html`.

use std::path::PathBuf;
use std::time::Instant;

use modmap_graph::BuildOutput;
use tracing::debug;

use crate::cli::AnalyzeArgs;
use crate::config::ModmapConfig;
use crate::error::{CliError, Result};
use crate::render;
use crate::ui;

/// Execute the analyze command.
///
/// 1. Load and validate configuration (CLI > Env > File > Defaults)
/// 2. Walk, parse and aggregate the source tree
/// 3. Report files that were left out
/// 4. Write the enabled outputs
/// 5. Print the summary
///
/// Per-file failures are warnings; only configuration errors and a failed
/// analysis make the command fail.
pub async fn execute(args: AnalyzeArgs) -> Result<()> {
    let config = ModmapConfig::load(&args)?;
    config.validate()?;
    debug!("Configuration: {:?}", config);

    let start = Instant::now();
    let (output, written) = run(&config).await?;

    report_failures(&output);
    for path in &written {
        ui::success(&format!("Wrote {}", path.display()));
    }
    ui::print_summary(&output.stats, start.elapsed());

    Ok(())
}

/// Analyze `config.root` and write the enabled outputs into `config.out_dir`.
///
/// Returns the build output and the written paths.
pub async fn run(config: &ModmapConfig) -> Result<(BuildOutput, Vec<PathBuf>)> {
    let Some(root) = &config.root else {
        return Err(CliError::InvalidArgument(
            "No directory to analyze".to_string(),
        ));
    };
    let options = config.analyze_options()?;

    ui::info(&format!("Analyzing {}", root.display()));
    let output = modmap_graph::analyze(root, &options).await?;

    let mut written = Vec::new();
    if config.json {
        written.extend(render::write_registry(&output.registry, &config.out_dir)?);
    }
    if config.html {
        written.push(render::write_tree(&output.registry, &config.out_dir)?);
    }

    Ok((output, written))
}

fn report_failures(output: &BuildOutput) {
    for failure in &output.failures {
        ui::warning(&format!("{}: {}", failure.path, failure.reason));
    }
    if !output.is_complete() {
        ui::warning(&format!(
            "{} file(s) were left out of the registry",
            output.failures.len()
        ));
    }
}
