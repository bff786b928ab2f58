//! CLI subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod extract;
pub mod fill;
pub mod inspect;

use std::fs;
use std::io::Write;
use std::path::Path;

use chrono::NaiveDate;
use clap::Args;
use console::style;
use tracing::debug;

use muqeem_core::models::config::MuqeemConfig;
use muqeem_core::{BatchOutcome, ContractParameters, RecordInput, Template};

/// Operator-entered contract parameters.
#[derive(Args)]
pub struct ContractArgs {
    /// Purchase order reference
    #[arg(long)]
    po: String,

    /// Contract start date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    start: NaiveDate,

    /// Contract end date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    end: NaiveDate,
}

impl ContractArgs {
    pub fn to_params(&self) -> anyhow::Result<ContractParameters> {
        let po = self.po.trim();
        if po.is_empty() {
            anyhow::bail!("PO reference must not be empty");
        }
        Ok(ContractParameters::new(po, self.start, self.end))
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

/// Load configuration from `--config`, the default location, or defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<MuqeemConfig> {
    if let Some(path) = config_path {
        return Ok(MuqeemConfig::from_file(Path::new(path))?);
    }

    let default_path = config::default_config_path();
    if default_path.exists() {
        debug!("Using config at {}", default_path.display());
        Ok(MuqeemConfig::from_file(&default_path)?)
    } else {
        Ok(MuqeemConfig::default())
    }
}

pub fn load_template(path: &Path) -> anyhow::Result<Template> {
    if !path.exists() {
        anyhow::bail!("Template file not found: {}", path.display());
    }
    let data = fs::read(path)?;
    Template::load(&data)
        .map_err(|e| anyhow::anyhow!("Failed to load template {}: {}", path.display(), e))
}

/// Identifier reported for a record file.
pub fn record_id(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("record")
        .to_string()
}

pub fn read_record(path: &Path) -> anyhow::Result<RecordInput> {
    if !path.exists() {
        anyhow::bail!("Record file not found: {}", path.display());
    }
    let data = fs::read(path)
        .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
    Ok(RecordInput::new(record_id(path), data))
}

/// Write `data` to `path` through a temp file in the same directory.
pub fn write_atomic(path: &Path, data: &[u8]) -> anyhow::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(dir)?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
    tmp.write_all(data)?;
    tmp.persist(path)?;
    Ok(())
}

/// Print per-field write failures and skipped records.
pub fn print_warnings(outcome: &BatchOutcome) {
    for document in &outcome.outputs {
        for failure in &document.report.failures {
            eprintln!(
                "{} {}: could not fill '{}': {}",
                style("⚠").yellow(),
                document.record_id,
                failure.field,
                failure.reason
            );
        }
    }

    for skipped in &outcome.skipped {
        eprintln!(
            "{} {}: skipped, {}",
            style("⚠").yellow(),
            skipped.record_id,
            skipped.reason.detail()
        );
    }
}
