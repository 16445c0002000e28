//! # pdf2songs
//!
//! Split a PDF songbook into one structured text file per song.
//!
//! ## Why this crate?
//!
//! Songbook PDFs carry implicit structure a flat text dump throws away: each
//! song starts at a page-number-style digit line, opens with a title, and its
//! lyrics fall into verses and choruses announced by marker lines (`VERSE`,
//! `CHORUS`, `V2`, …). This crate recovers that structure and emits each song
//! as a standalone file of labeled, paragraph-wrapped blocks, ready for a
//! lyrics display to consume.
//!
//! ## Pipeline Overview
//!
//! ```text
//! PDF
//!  │
//!  ├─ 1. Input     validate path + magic bytes, extract flat text
//!  ├─ 2. Segment   split into song units on standalone digit lines
//!  ├─ 3. Classify  tag body lines (key / chorus / verse / content)
//!  ├─ 4. Structure title + marker state machine (4-line fallback)
//!  ├─ 5. Render    <p>-wrapped label and lyric lines
//!  └─ 6. Write     one {safe_title}.txt per song, duplicates resolved
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2songs::{extract_to_dir, ExtractionConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ExtractionConfig::default();
//!     let output = extract_to_dir("songbook.pdf", "./songs", &config)?;
//!     eprintln!(
//!         "{} song(s) written, {} skipped",
//!         output.stats.written_files, output.stats.skipped_songs
//!     );
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `pdf2songs` binary (clap + anyhow + indicatif + tracing-subscriber) |
//!
//! Disable `cli` when using only the library to avoid pulling in CLI-only deps:
//! ```toml
//! pdf2songs = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod config;
pub mod error;
pub mod extract;
pub mod output;
pub mod pipeline;
pub mod progress;
pub mod writer;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{DuplicatePolicy, ExtractionConfig, ExtractionConfigBuilder};
pub use error::{Pdf2SongsError, SongError};
pub use extract::{extract, extract_from_text, extract_to_dir};
pub use output::{
    Block, BlockKind, ExtractionOutput, ExtractionStats, SongResult, StructuredSong,
};
pub use pipeline::classify::{ClassifierRules, LineClass};
pub use pipeline::segment::SongUnit;
pub use progress::{ExtractionProgressCallback, NoopProgressCallback, ProgressCallback};
pub use writer::SongWriter;
