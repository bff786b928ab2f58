//! Extract command - show the fields read from a Muqeem record.

use std::path::PathBuf;

use clap::Args;
use console::style;
use serde_json::json;
use tracing::debug;

use muqeem_core::pdf::PdfExtractor;
use muqeem_core::{MuqeemParser, SourceRecord, NOT_FOUND};

use super::{load_config, read_record};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Muqeem record PDF
    #[arg(required = true)]
    input: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also print the raw first-page text
    #[arg(long)]
    show_text: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Plain text summary
    Text,
}

pub fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let input = read_record(&args.input)?;

    let mut extractor = PdfExtractor::new();
    extractor.load(&input.data)?;
    debug!("Loaded {} pages", extractor.page_count());
    let text = extractor.first_page_text()?;

    let result = MuqeemParser::from_config(&config.extraction).parse(&text);
    let record = &result.record;
    let missing: Vec<&str> = record.missing_fields().iter().map(|f| f.as_str()).collect();

    if args.show_text {
        eprintln!("{}", style("--- first page text ---").dim());
        eprintln!("{}", text);
        eprintln!("{}", style("-----------------------").dim());
    }

    match args.format {
        OutputFormat::Json => {
            let misses: Vec<&str> = result.misses.iter().map(|f| f.label()).collect();
            let output = json!({
                "record": record,
                "valid": missing.is_empty(),
                "missing_required": missing,
                "defaulted": misses,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => print!("{}", format_text(record)),
    }

    if !missing.is_empty() {
        eprintln!(
            "{} Required fields missing: {}",
            style("⚠").yellow(),
            missing.join(", ")
        );
    }

    Ok(())
}

fn format_text(record: &SourceRecord) -> String {
    let mut output = String::new();

    output.push_str(&format!("Name:        {}\n", record.name.as_deref().unwrap_or(NOT_FOUND)));
    output.push_str(&format!(
        "Nationality: {}\n",
        record.nationality.as_deref().unwrap_or(NOT_FOUND)
    ));
    output.push_str(&format!(
        "Iqama:       {}\n",
        record.iqama_number.as_deref().unwrap_or(NOT_FOUND)
    ));
    output.push_str(&format!("Passport:    {}\n", record.passport_number));
    output.push_str(&format!("Issued:      {}\n", record.issue_summary()));
    output.push_str(&format!("Birth date:  {}\n", record.birth_date));
    output.push_str(&format!("Blood type:  {}\n", record.blood_type));

    output
}
