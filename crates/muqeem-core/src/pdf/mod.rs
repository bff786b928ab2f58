//! PDF text extraction.

mod extractor;

pub use extractor::{PdfExtractor, PdfTextProvider};

use crate::error::PdfError;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Source of the raw text a Muqeem record is parsed from.
pub trait TextProvider {
    /// Text of the first content page of `data`.
    ///
    /// Documents without pages, or whose first page has no text, yield an
    /// empty string.
    fn first_page_text(&self, data: &[u8]) -> Result<String>;
}
