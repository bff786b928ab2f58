//! Inspect command - list the fillable fields of a form template.

use std::path::PathBuf;

use clap::Args;
use console::style;

use muqeem_core::form::TemplateField;

use super::{load_config, load_template};

/// Arguments for the inspect command.
#[derive(Args)]
pub struct InspectArgs {
    /// Fillable form template PDF
    #[arg(required = true)]
    template: PathBuf,
}

pub fn run(args: InspectArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    let names = &config.form.field_names;
    let template = load_template(&args.template)?;

    let fields = template.field_names();
    println!(
        "{} {} pages, {} fields",
        style("ℹ").blue(),
        template.page_count(),
        fields.len()
    );

    for field in &fields {
        let marker = if names.contains(field) {
            style("●").green()
        } else {
            style("○").dim()
        };
        println!("  {} {}", marker, field);
    }

    let absent: Vec<&str> = TemplateField::ALL
        .iter()
        .map(|&f| names.id(f))
        .filter(|id| !fields.iter().any(|name| name == id))
        .collect();

    if !absent.is_empty() {
        println!();
        println!(
            "{} Configured fields not present in the template: {}",
            style("⚠").yellow(),
            absent.join(", ")
        );
    }

    Ok(())
}
