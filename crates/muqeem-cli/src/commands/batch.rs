//! Batch command - fill one form per Muqeem record and archive the results.

use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, error, warn};

use muqeem_core::batch::RecordOutcome;
use muqeem_core::{package, BatchOutcome, BatchRunner, RunMode, RunStatus, SkipReason, SkippedRecord};

use super::{
    load_config, load_template, print_warnings, read_record, record_id, write_atomic, ContractArgs,
};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Muqeem record files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Fillable form template PDF
    #[arg(short, long)]
    template: PathBuf,

    #[command(flatten)]
    contract: ContractArgs,

    /// Output archive (defaults to the configured archive name)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also generate a summary CSV next to the archive
    #[arg(long)]
    summary: bool,

    /// Skip unreadable records instead of aborting the run
    #[arg(long)]
    continue_on_error: bool,
}

pub fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;
    let params = args.contract.to_params()?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            p.extension()
                .and_then(|e| e.to_str())
                .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} records to process",
        style("ℹ").blue(),
        files.len()
    );

    let template = load_template(&args.template)?;
    let continue_on_error = args.continue_on_error || config.batch.continue_on_error;
    let runner = BatchRunner::from_config(&config).with_continue_on_error(continue_on_error);

    let progress = ProgressBar::new(files.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} records")?
            .progress_chars("=>-"),
    );

    // Records are read one at a time so only the filled outputs stay in memory.
    let mut outcome = BatchOutcome::default();
    for (offset, path) in files.iter().enumerate() {
        let index = offset + 1;
        let input = match read_record(path) {
            Ok(input) => input,
            Err(e) if continue_on_error => {
                warn!("Skipping unreadable record {}: {}", path.display(), e);
                outcome.skipped.push(SkippedRecord {
                    index,
                    record_id: record_id(path),
                    reason: SkipReason::Unreadable { error: e.to_string() },
                });
                progress.inc(1);
                continue;
            }
            Err(e) => {
                progress.abandon();
                return Err(e);
            }
        };

        match runner.process_record(index, &input, &template, &params) {
            Ok(RecordOutcome::Populated(document)) => outcome.outputs.push(document),
            Ok(RecordOutcome::Skipped(skipped)) => outcome.skipped.push(skipped),
            Err(e) => {
                progress.abandon();
                error!("Failed to process {}: {}", path.display(), e);
                anyhow::bail!("Processing failed at {}: {}", path.display(), e);
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    print_warnings(&outcome);

    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(&config.output.archive_file_name));

    if args.summary {
        let summary_path = output
            .parent()
            .unwrap_or_else(|| Path::new(""))
            .join("summary.csv");
        write_summary(&summary_path, &outcome)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let status = outcome.status();
    let filled = outcome.outputs.len();
    let skipped = outcome.skipped.len();

    let package = package(outcome, RunMode::Multi, &config.output)?;
    write_atomic(&output, package.data())?;
    debug!("Wrote archive to {}", output.display());

    println!();
    println!(
        "{} Processed {} records in {:?}",
        style("✓").green(),
        filled + skipped,
        start.elapsed()
    );
    println!(
        "   {} filled, {} skipped",
        style(filled).green(),
        style(skipped).yellow()
    );
    if status == RunStatus::PartialSkips {
        println!(
            "   {} some records were skipped, see warnings above",
            style("⚠").yellow()
        );
    }
    println!("   Archive: {}", output.display());

    Ok(())
}

fn write_summary(path: &Path, outcome: &BatchOutcome) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record(["index", "record", "status", "entry", "iqama_number", "detail"])?;

    let mut rows: Vec<(usize, [String; 5])> = Vec::new();

    for document in &outcome.outputs {
        let failed: Vec<&str> = document
            .report
            .failures
            .iter()
            .map(|f| f.field.as_str())
            .collect();
        let status = if failed.is_empty() { "filled" } else { "filled_with_errors" };
        rows.push((
            document.index,
            [
                document.record_id.clone(),
                status.to_string(),
                document.name.clone(),
                document.iqama_number.clone(),
                failed.join(" "),
            ],
        ));
    }

    for skipped in &outcome.skipped {
        rows.push((
            skipped.index,
            [
                skipped.record_id.clone(),
                "skipped".to_string(),
                String::new(),
                String::new(),
                skipped.reason.detail(),
            ],
        ));
    }

    rows.sort_by_key(|(index, _)| *index);
    for (index, row) in rows {
        let index = index.to_string();
        wtr.write_record(std::iter::once(index.as_str()).chain(row.iter().map(String::as_str)))?;
    }

    wtr.flush()?;
    Ok(())
}
