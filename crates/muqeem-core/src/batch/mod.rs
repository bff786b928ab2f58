//! Record-by-record orchestration of extraction, mapping and population.
//!
//! Records are processed strictly in input order. Each record moves through
//! `Pending → Extracted → {Skipped | Populated}`; populated documents are then
//! either emitted on their own (single mode) or archived (multi mode).

pub mod archive;

use serde::Serialize;
use tracing::{debug, info, info_span, warn};

use crate::error::{MuqeemError, Result};
use crate::extract::MuqeemParser;
use crate::form::{FieldMapper, FillReport, FormPopulator, Template};
use crate::models::config::{MuqeemConfig, OutputConfig};
use crate::models::{ContractParameters, MissingField};
use crate::pdf::{PdfTextProvider, TextProvider};

/// One source document to process.
#[derive(Debug, Clone)]
pub struct RecordInput {
    /// Identifier used in reports, usually the file name.
    pub id: String,
    /// Raw document bytes.
    pub data: Vec<u8>,
}

impl RecordInput {
    pub fn new(id: impl Into<String>, data: Vec<u8>) -> Self {
        Self { id: id.into(), data }
    }
}

/// A template filled for one record.
#[derive(Debug, Clone)]
pub struct FilledDocument {
    /// 1-based position of the originating record in the run.
    pub index: usize,
    /// Output name, unique within a run.
    pub name: String,
    /// Identifier of the originating record.
    pub record_id: String,
    /// Iqama number of the originating record.
    pub iqama_number: String,
    /// Serialized PDF.
    pub data: Vec<u8>,
    /// Per-field outcome.
    pub report: FillReport,
}

/// Why a record produced no output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum SkipReason {
    /// Name or Iqama number could not be extracted.
    RequiredFieldsMissing { missing: Vec<MissingField> },
    /// The record's text could not be read.
    Unreadable { error: String },
}

impl SkipReason {
    /// Reason text followed by what caused it.
    pub fn detail(&self) -> String {
        match self {
            Self::RequiredFieldsMissing { missing } => {
                let names: Vec<&str> = missing.iter().map(MissingField::as_str).collect();
                format!("{}: {}", self, names.join(", "))
            }
            Self::Unreadable { error } => format!("{}: {}", self, error),
        }
    }
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::RequiredFieldsMissing { .. } => write!(f, "required fields missing"),
            Self::Unreadable { .. } => write!(f, "unreadable"),
        }
    }
}

/// A record that produced no output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    /// 1-based position in the input.
    pub index: usize,
    pub record_id: String,
    pub reason: SkipReason,
}

/// Result of one record.
#[derive(Debug, Clone)]
pub enum RecordOutcome {
    Populated(FilledDocument),
    Skipped(SkippedRecord),
}

/// Overall state of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    /// Every record produced output.
    Success,
    /// Some records were skipped, at least one produced output.
    PartialSkips,
    /// No record produced output.
    NoOutput,
}

/// Everything a run produced.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub outputs: Vec<FilledDocument>,
    pub skipped: Vec<SkippedRecord>,
}

impl BatchOutcome {
    pub fn status(&self) -> RunStatus {
        match (self.outputs.is_empty(), self.skipped.is_empty()) {
            (true, _) => RunStatus::NoOutput,
            (false, true) => RunStatus::Success,
            (false, false) => RunStatus::PartialSkips,
        }
    }
}

/// How outputs are delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunMode {
    /// One record, one document.
    Single,
    /// Many records, one archive.
    Multi,
}

/// Deliverable of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Package {
    Document { name: String, data: Vec<u8> },
    Archive { name: String, data: Vec<u8> },
}

impl Package {
    pub fn name(&self) -> &str {
        match self {
            Self::Document { name, .. } | Self::Archive { name, .. } => name,
        }
    }

    pub fn data(&self) -> &[u8] {
        match self {
            Self::Document { data, .. } | Self::Archive { data, .. } => data,
        }
    }
}

/// Drives records through extraction, mapping and population.
pub struct BatchRunner<P = PdfTextProvider> {
    provider: P,
    parser: MuqeemParser,
    mapper: FieldMapper,
    populator: FormPopulator,
    continue_on_error: bool,
    entry_prefix: String,
}

impl BatchRunner<PdfTextProvider> {
    /// Create a runner with default settings and the PDF text provider.
    pub fn new() -> Self {
        Self::from_config(&MuqeemConfig::default())
    }

    /// Create a runner from configuration.
    pub fn from_config(config: &MuqeemConfig) -> Self {
        Self {
            provider: PdfTextProvider,
            parser: MuqeemParser::from_config(&config.extraction),
            mapper: FieldMapper::new(config.form.field_names.clone()),
            populator: FormPopulator::new().with_need_appearances(config.form.need_appearances),
            continue_on_error: config.batch.continue_on_error,
            entry_prefix: config.output.entry_prefix.clone(),
        }
    }
}

impl Default for BatchRunner<PdfTextProvider> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: TextProvider> BatchRunner<P> {
    /// Replace the text provider.
    pub fn with_provider<Q: TextProvider>(self, provider: Q) -> BatchRunner<Q> {
        BatchRunner {
            provider,
            parser: self.parser,
            mapper: self.mapper,
            populator: self.populator,
            continue_on_error: self.continue_on_error,
            entry_prefix: self.entry_prefix,
        }
    }

    /// Skip unreadable records instead of aborting the run.
    pub fn with_continue_on_error(mut self, continue_on_error: bool) -> Self {
        self.continue_on_error = continue_on_error;
        self
    }

    /// Process every record in order.
    ///
    /// Records missing required fields are skipped. A text provider failure
    /// aborts the run unless `continue_on_error` is set.
    pub fn run(
        &self,
        template: &Template,
        records: &[RecordInput],
        params: &ContractParameters,
    ) -> Result<BatchOutcome> {
        info!("Processing {} records", records.len());
        let mut outcome = BatchOutcome::default();

        for (offset, input) in records.iter().enumerate() {
            match self.process_record(offset + 1, input, template, params)? {
                RecordOutcome::Populated(document) => outcome.outputs.push(document),
                RecordOutcome::Skipped(skipped) => outcome.skipped.push(skipped),
            }
        }

        info!(
            "Run finished: {} filled, {} skipped",
            outcome.outputs.len(),
            outcome.skipped.len()
        );
        Ok(outcome)
    }

    /// Process one record against a fresh copy of the template.
    pub fn process_record(
        &self,
        index: usize,
        input: &RecordInput,
        template: &Template,
        params: &ContractParameters,
    ) -> Result<RecordOutcome> {
        let _span = info_span!("record", index, id = %input.id).entered();

        let text = match self.provider.first_page_text(&input.data) {
            Ok(text) => text,
            Err(e) if self.continue_on_error => {
                warn!("Skipping unreadable record: {}", e);
                return Ok(RecordOutcome::Skipped(SkippedRecord {
                    index,
                    record_id: input.id.clone(),
                    reason: SkipReason::Unreadable { error: e.to_string() },
                }));
            }
            Err(e) => return Err(e.into()),
        };

        let record = self.parser.parse(&text).record;
        debug!("Extracted record");

        let missing = record.missing_fields();
        let iqama_number = match (&record.iqama_number, missing.is_empty()) {
            (Some(iqama), true) => iqama.clone(),
            _ => {
                let reason = SkipReason::RequiredFieldsMissing { missing };
                warn!("Skipping record: {}", reason.detail());
                return Ok(RecordOutcome::Skipped(SkippedRecord {
                    index,
                    record_id: input.id.clone(),
                    reason,
                }));
            }
        };

        let fields = self.mapper.map(&record, params);
        let mut working = template.instantiate();
        let report = self.populator.populate(&mut working, &fields);
        for failure in &report.failures {
            warn!("Field '{}' not filled: {}", failure.field, failure.reason);
        }

        let data = working.to_bytes()?;
        let name = entry_name(&self.entry_prefix, index, &iqama_number);
        debug!("Populated {}", name);

        Ok(RecordOutcome::Populated(FilledDocument {
            index,
            name,
            record_id: input.id.clone(),
            iqama_number,
            data,
            report,
        }))
    }
}

/// Archive entry name for the record at `index` (1-based).
pub fn entry_name(prefix: &str, index: usize, iqama_number: &str) -> String {
    let iqama: String = iqama_number
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect();
    format!("{}_{:03}_{}.pdf", prefix, index, iqama)
}

/// Turn a run's outputs into its deliverable.
///
/// Single mode yields the lone document under `single_file_name`; multi mode
/// archives every document. A run without outputs yields
/// [`MuqeemError::NoOutput`] rather than an empty archive.
pub fn package(outcome: BatchOutcome, mode: RunMode, names: &OutputConfig) -> Result<Package> {
    let mut outputs = outcome.outputs;
    if outputs.is_empty() {
        return Err(MuqeemError::NoOutput);
    }

    match mode {
        RunMode::Single => {
            if outputs.len() > 1 {
                return Err(MuqeemError::Config(format!(
                    "single mode expects one record, got {} outputs",
                    outputs.len()
                )));
            }
            let document = outputs.remove(0);
            Ok(Package::Document {
                name: names.single_file_name.clone(),
                data: document.data,
            })
        }
        RunMode::Multi => Ok(Package::Archive {
            name: names.archive_file_name.clone(),
            data: archive::archive_bytes(&outputs)?,
        }),
    }
}
