//! Error types for the pdf2songs library.
//!
//! Two distinct error types reflect two distinct failure modes:
//!
//! * [`Pdf2SongsError`] — **Fatal**: the run cannot proceed at all
//!   (missing input file, unreadable PDF, output directory cannot be
//!   created). Returned as `Err(Pdf2SongsError)` from the top-level
//!   `extract*` functions.
//!
//! * [`SongError`] — **Non-fatal**: a single song failed (no discoverable
//!   title, empty body, file write refused) but all other songs are fine.
//!   Stored inside [`crate::output::SongResult`] so callers can inspect
//!   partial success rather than losing the whole batch to one bad song.
//!
//! The separation lets callers decide their own tolerance: abort on the
//! first song failure, log and continue, or collect all errors for a
//! post-run report. The library itself always continues.

use std::path::PathBuf;
use thiserror::Error;

/// All fatal errors returned by the pdf2songs library.
///
/// Song-level failures use [`SongError`] and are stored in
/// [`crate::output::SongResult`] rather than propagated here.
#[derive(Debug, Error)]
pub enum Pdf2SongsError {
    // ── Input errors ──────────────────────────────────────────────────────
    /// Input file was not found at the given path.
    #[error("PDF file not found: '{path}'\nCheck the path exists and is readable.")]
    FileNotFound { path: PathBuf },

    /// Process does not have read permission on the file.
    #[error("Permission denied reading '{path}'\nTry: chmod +r {path:?}")]
    PermissionDenied { path: PathBuf },

    /// The file exists and was read, but is not a PDF. `magic` holds the
    /// bytes actually read, which may be fewer than four.
    #[error("File is not a valid PDF: '{path}'\nFirst bytes: {magic:?}")]
    NotAPdf { path: PathBuf, magic: Vec<u8> },

    // ── Extraction errors ─────────────────────────────────────────────────
    /// The PDF could not be opened or decoded by the text extractor.
    #[error("Failed to extract text from '{path}': {detail}")]
    ExtractionFailed { path: PathBuf, detail: String },

    // ── I/O errors ────────────────────────────────────────────────────────
    /// Could not create the output directory.
    #[error("Failed to create output directory '{path}': {source}")]
    OutputDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ─────────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// A non-fatal error for a single song.
///
/// Stored alongside [`crate::output::SongResult`] when a song fails or is
/// skipped. The overall run continues regardless.
#[derive(Debug, Clone, Error, serde::Serialize, serde::Deserialize)]
pub enum SongError {
    /// The unit contained no non-blank line to use as a title.
    #[error("Song {index}: no title line found")]
    MissingTitle { index: usize },

    /// The body had no content lines after the title was removed.
    #[error("Song {index} ('{title}'): body is empty")]
    EmptyBody { index: usize, title: String },

    /// Block construction failed unexpectedly; the song is treated as
    /// having no content.
    #[error("Song {index} ('{title}'): formatting failed: {detail}")]
    Formatting {
        index: usize,
        title: String,
        detail: String,
    },

    /// Another song already claimed this sanitised title and the
    /// duplicate policy is [`crate::config::DuplicatePolicy::Error`].
    #[error("Song {index}: duplicate title '{safe_title}'")]
    DuplicateTitle { index: usize, safe_title: String },

    /// The output file could not be written.
    #[error("Song {index} ('{title}'): write failed: {detail}")]
    WriteFailed {
        index: usize,
        title: String,
        detail: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_a_pdf_display() {
        let e = Pdf2SongsError::NotAPdf {
            path: PathBuf::from("notes.txt"),
            magic: b"Hell".to_vec(),
        };
        let msg = e.to_string();
        assert!(msg.contains("notes.txt"), "got: {msg}");
    }

    #[test]
    fn missing_title_display() {
        let e = SongError::MissingTitle { index: 3 };
        assert!(e.to_string().contains("Song 3"));
    }

    #[test]
    fn duplicate_title_display() {
        let e = SongError::DuplicateTitle {
            index: 7,
            safe_title: "Amazing Grace".into(),
        };
        assert!(e.to_string().contains("Amazing Grace"));
    }

    #[test]
    fn song_error_round_trips_through_json() {
        let e = SongError::EmptyBody {
            index: 2,
            title: "How Great".into(),
        };
        let json = serde_json::to_string(&e).unwrap();
        let back: SongError = serde_json::from_str(&json).unwrap();
        assert!(back.to_string().contains("How Great"));
    }
}
