//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::{debug, trace};

use super::{Result, TextProvider};
use crate::error::PdfError;

/// PDF text extractor using lopdf for loading and pdf-extract for text.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Load a PDF from bytes.
    pub fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf_extract reads bytes, so hand it the decrypted copy
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        debug!("Loaded PDF with {} pages", doc.get_pages().len());
        self.document = Some(doc);
        Ok(())
    }

    /// Get the number of pages in the loaded PDF.
    pub fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    /// Extract the text of every page, in page order.
    pub fn extract_pages(&self) -> Result<Vec<String>> {
        if self.document.is_none() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }
        if self.page_count() == 0 {
            return Ok(Vec::new());
        }

        pdf_extract::extract_text_from_mem_by_pages(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }

    /// Extract the text of the first page.
    pub fn first_page_text(&self) -> Result<String> {
        let text = self.extract_pages()?.into_iter().next().unwrap_or_default();
        trace!("First page yielded {} characters", text.len());
        Ok(text)
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// [`TextProvider`] backed by [`PdfExtractor`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfTextProvider;

impl TextProvider for PdfTextProvider {
    fn first_page_text(&self, data: &[u8]) -> Result<String> {
        let mut extractor = PdfExtractor::new();
        extractor.load(data)?;
        extractor.first_page_text()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::text_pdf;

    #[test]
    fn test_pdf_extractor_new() {
        let extractor = PdfExtractor::new();
        assert!(extractor.document.is_none());
        assert_eq!(extractor.page_count(), 0);
    }

    #[test]
    fn test_extract_without_document() {
        let extractor = PdfExtractor::new();
        assert!(matches!(extractor.extract_pages(), Err(PdfError::Parse(_))));
    }

    #[test]
    fn test_garbage_is_parse_error() {
        let result = PdfTextProvider.first_page_text(b"not a pdf at all");
        assert!(matches!(result, Err(PdfError::Parse(_))));
    }

    #[test]
    fn test_first_page_only() {
        let data = text_pdf(&[&["Iqama Number 111"], &["Iqama Number 222"]]);

        let mut extractor = PdfExtractor::new();
        extractor.load(&data).unwrap();
        assert_eq!(extractor.page_count(), 2);
        assert_eq!(extractor.extract_pages().unwrap().len(), 2);

        let text = PdfTextProvider.first_page_text(&data).unwrap();
        assert!(text.contains("Iqama Number 111"), "got {:?}", text);
        assert!(!text.contains("222"));
    }

    #[test]
    fn test_zero_pages_is_empty_text() {
        let data = text_pdf(&[]);
        assert_eq!(PdfTextProvider.first_page_text(&data).unwrap(), "");
    }

    #[test]
    fn test_text_feeds_parser() {
        let data = text_pdf(&[&[
            "Translated Name JOHN SMITH Nationality Pakistan",
            "Birth Date 1990-05-01",
            "Iqama Number 2345678901",
        ]]);

        let text = PdfTextProvider.first_page_text(&data).unwrap();
        let record = crate::extract::extract(&text);
        assert_eq!(record.name.as_deref(), Some("JOHN SMITH"));
        assert_eq!(record.iqama_number.as_deref(), Some("2345678901"));
        assert_eq!(record.birth_date, "1990-05-01");
    }
}
