//! Fill command - fill the form from a single Muqeem record.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::info;

use muqeem_core::{package, BatchRunner, RunMode, SkipReason};

use super::{load_config, load_template, print_warnings, read_record, write_atomic, ContractArgs};

/// Arguments for the fill command.
#[derive(Args)]
pub struct FillArgs {
    /// Fillable form template PDF
    #[arg(short, long)]
    template: PathBuf,

    /// Muqeem record PDF
    #[arg(short, long)]
    record: PathBuf,

    #[command(flatten)]
    contract: ContractArgs,

    /// Output file (defaults to the configured single file name)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

pub fn run(args: FillArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let params = args.contract.to_params()?;

    let template = load_template(&args.template)?;
    let input = read_record(&args.record)?;

    let runner = BatchRunner::from_config(&config);
    let outcome = runner.run(&template, std::slice::from_ref(&input), &params)?;
    print_warnings(&outcome);

    if let Some(skipped) = outcome.skipped.first() {
        match &skipped.reason {
            SkipReason::RequiredFieldsMissing { .. } => {
                anyhow::bail!("Required fields missing from Muqeem data")
            }
            reason => anyhow::bail!("Could not process {}: {}", skipped.record_id, reason.detail()),
        }
    }

    let package = package(outcome, RunMode::Single, &config.output)?;
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(package.name()));
    write_atomic(&output, package.data())?;
    info!("Wrote {} bytes to {}", package.data().len(), output.display());

    println!(
        "{} Filled form written to {} in {:?}",
        style("✓").green(),
        output.display(),
        start.elapsed()
    );

    Ok(())
}
