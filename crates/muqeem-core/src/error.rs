//! Error types for the muqeem-core library.

use thiserror::Error;

/// Main error type for the muqeem library.
#[derive(Error, Debug)]
pub enum MuqeemError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Form field error that could not be isolated to a single widget.
    #[error("form error: {0}")]
    Form(#[from] FormError),

    /// Archive packaging error.
    #[error("archive error: {0}")]
    Archive(#[from] ArchiveError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A run finished without a single filled document.
    #[error("no valid records, nothing to download")]
    NoOutput,
}

/// Errors related to reading and writing PDF documents.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// Failed to serialize the document.
    #[error("failed to save PDF: {0}")]
    Save(String),
}

/// Reasons a single form field could not be written.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// The widget or its field dictionary could not be resolved.
    #[error("missing object {0} {1} R")]
    MissingObject(u32, u16),

    /// The field holds something other than text (checkbox, signature, ...).
    #[error("unsupported field type: {0}")]
    UnsupportedFieldType(String),

    /// The field carries the read-only flag.
    #[error("field is read-only")]
    ReadOnly,

    /// The field dictionary is malformed.
    #[error("malformed field: {0}")]
    Malformed(String),
}

/// Errors related to packaging filled documents into an archive.
#[derive(Error, Debug)]
pub enum ArchiveError {
    /// Underlying zip writer failure.
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// I/O error while writing an entry.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Two documents resolved to the same entry name.
    #[error("duplicate archive entry: {0}")]
    DuplicateEntry(String),
}

/// Result type for the muqeem library.
pub type Result<T> = std::result::Result<T, MuqeemError>;
