//! ZIP packaging of filled documents.

use std::collections::HashSet;
use std::io::{Cursor, Seek, Write};

use tracing::debug;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::FilledDocument;
use crate::error::ArchiveError;

/// Write one archive entry per document into `writer`.
pub fn write_archive<W: Write + Seek>(
    documents: &[FilledDocument],
    writer: W,
) -> Result<W, ArchiveError> {
    let mut zip = ZipWriter::new(writer);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut seen = HashSet::new();

    for document in documents {
        if !seen.insert(document.name.as_str()) {
            return Err(ArchiveError::DuplicateEntry(document.name.clone()));
        }
        zip.start_file(document.name.as_str(), options)?;
        zip.write_all(&document.data)?;
        debug!("Archived {} ({} bytes)", document.name, document.data.len());
    }

    Ok(zip.finish()?)
}

/// Archive `documents` into an in-memory ZIP.
pub fn archive_bytes(documents: &[FilledDocument]) -> Result<Vec<u8>, ArchiveError> {
    Ok(write_archive(documents, Cursor::new(Vec::new()))?.into_inner())
}
