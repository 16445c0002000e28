//! Output types: structured songs, per-song results, and run statistics.
//!
//! [`StructuredSong`] is the structurer's product — still data, not text.
//! [`SongResult`] pairs one song unit's rendered content with its optional
//! [`SongError`], so a batch can report partial success without losing the
//! failed entries. [`ExtractionOutput`] bundles every result with the run
//! tally; everything is serialisable for the CLI's `--json` mode.

use crate::error::SongError;
use serde::{Deserialize, Serialize};

/// The kind of one labeled block within a song.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockKind {
    Verse,
    Chorus,
}

/// One labeled, ordered group of content lines within a song.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub kind: BlockKind,
    /// 1-based verse number, assigned in emission order. Chorus blocks
    /// carry no index.
    pub index: Option<u32>,
    pub lines: Vec<String>,
}

impl Block {
    /// The label line rendered ahead of the block's content:
    /// `Verse {n}` or `Chorus`.
    pub fn label(&self) -> String {
        match self.kind {
            BlockKind::Verse => format!("Verse {}", self.index.unwrap_or(1)),
            BlockKind::Chorus => "Chorus".to_string(),
        }
    }
}

/// A fully structured song: title, filesystem-safe title, and its ordered
/// verse/chorus blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredSong {
    /// The first non-blank line of the song unit, trimmed.
    pub title: String,
    /// `title` with the characters `< > : " / \ | ? *` replaced by `_`.
    /// Sanitisation is idempotent; uniqueness across songs is the writer's
    /// concern (see [`crate::config::DuplicatePolicy`]).
    pub safe_title: String,
    pub blocks: Vec<Block>,
}

/// The outcome of processing one song unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SongResult {
    /// 1-indexed position of the unit in the document.
    pub index: usize,
    /// The digit marker that introduced the unit, when present.
    pub number_label: Option<String>,
    /// Extracted title; empty when the unit was skipped before a title
    /// could be found.
    pub title: String,
    /// Filesystem-safe title; empty when skipped.
    pub safe_title: String,
    /// Rendered block text, ready to persist; empty on failure.
    pub content: String,
    /// The per-song failure, if any. `None` means the song structured
    /// (and, when the run persists output, wrote) successfully.
    pub error: Option<SongError>,
}

/// Statistics for one extraction run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Song units produced by the segmenter.
    pub total_units: usize,
    /// Units that structured into at least one block.
    pub structured_songs: usize,
    /// Units skipped (no title, empty body) or failed during formatting.
    pub skipped_songs: usize,
    /// Files written successfully (zero for in-memory runs).
    pub written_files: usize,
    /// Persistence failures (zero for in-memory runs).
    pub failed_writes: usize,
    /// Wall-clock time for PDF text extraction, in milliseconds.
    pub extract_duration_ms: u64,
    /// End-to-end wall-clock time, in milliseconds.
    pub total_duration_ms: u64,
}

/// Everything an extraction run produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionOutput {
    /// Per-song outcomes, in document order.
    pub songs: Vec<SongResult>,
    pub stats: ExtractionStats,
}

impl ExtractionOutput {
    /// Iterate the successfully structured songs only.
    pub fn successes(&self) -> impl Iterator<Item = &SongResult> {
        self.songs.iter().filter(|s| s.error.is_none())
    }
}
