//! Input adapter: validate the songbook path and pull its flat text stream.
//!
//! We validate the PDF magic bytes (`%PDF`) before handing the file to the
//! extractor so callers get a meaningful error rather than a parser failure
//! deep inside the PDF machinery. Extraction itself is delegated to
//! `pdf-extract`, which concatenates per-page text in page order — exactly
//! the flat, structure-free stream the segmenter expects.
//!
//! Everything in this module is fatal on failure: a document that cannot be
//! opened or decoded aborts the whole run.

use crate::error::Pdf2SongsError;
use std::path::Path;
use tracing::{debug, info};

/// Validate the path and extract the document's full text, pages
/// concatenated in page order.
pub fn extract_text(path: &Path) -> Result<String, Pdf2SongsError> {
    validate_pdf_path(path)?;

    info!("Extracting text from {}", path.display());
    let text = pdf_extract::extract_text(path).map_err(|e| Pdf2SongsError::ExtractionFailed {
        path: path.to_path_buf(),
        detail: e.to_string(),
    })?;
    debug!("Extracted {} bytes of text", text.len());
    Ok(text)
}

/// Check existence, readability, and PDF magic bytes.
pub fn validate_pdf_path(path: &Path) -> Result<(), Pdf2SongsError> {
    if !path.exists() {
        return Err(Pdf2SongsError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    match std::fs::File::open(path) {
        Ok(f) => {
            use std::io::Read;
            // Report only the bytes actually read; a short file must not
            // pad the message with zeros.
            let mut magic = Vec::with_capacity(4);
            if f.take(4).read_to_end(&mut magic).is_err() || magic != b"%PDF" {
                return Err(Pdf2SongsError::NotAPdf {
                    path: path.to_path_buf(),
                    magic,
                });
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(Pdf2SongsError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(_) => {
            return Err(Pdf2SongsError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
    }

    Ok(())
}
