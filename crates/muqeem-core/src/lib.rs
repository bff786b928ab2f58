//! Core library for filling contract forms from Muqeem records.
//!
//! This crate provides:
//! - First-page text extraction from Muqeem PDFs
//! - Rule-based extraction of identity fields (name, Iqama, passport, dates)
//! - Mapping of those fields and operator contract parameters onto form fields
//! - AcroForm population with per-field fault isolation
//! - Sequential batch runs packaged as a single document or a ZIP archive

pub mod batch;
pub mod error;
pub mod extract;
pub mod form;
pub mod models;
pub mod pdf;

#[cfg(test)]
pub(crate) mod fixtures;

pub use batch::{
    package, BatchOutcome, BatchRunner, FilledDocument, Package, RecordInput, RunMode, RunStatus,
    SkipReason, SkippedRecord,
};
pub use error::{MuqeemError, Result};
pub use extract::{extract, MuqeemParser};
pub use form::{map_fields, populate, FillReport, FormDocument, Template, TemplateFieldMap};
pub use models::config::MuqeemConfig;
pub use models::{ContractParameters, SourceRecord, NOT_FOUND};
pub use pdf::{PdfTextProvider, TextProvider};
