//! Structuring: turn one song unit into titled, labeled verse/chorus blocks.
//!
//! Two independent strategies produce the block sequence, composed at a
//! single decision point in [`build_blocks`]:
//!
//! * [`split_by_markers`] — a state machine over the line categories from
//!   [`super::classify`]: marker lines close the open section and switch
//!   state, content lines accumulate, key lines vanish.
//! * [`chunk_into_verses`] — the length-based fallback, used only when the
//!   body contains no marker line at all: fixed-size chunks labeled
//!   `Verse 1, Verse 2, …` so every song with content gets at least one
//!   labeled block.
//!
//! Keeping the strategies as separate pure functions means each is testable
//! in isolation and the fallback switch is one readable `if`, not a set of
//! interleaved conditionals.

use crate::output::{Block, BlockKind, StructuredSong};
use crate::pipeline::classify::{classify, ClassifierRules, LineClass};
use crate::pipeline::segment::SongUnit;

/// Characters that are unsafe in filenames on at least one supported
/// platform. Each is replaced by `_` when deriving a safe title.
const UNSAFE_TITLE_CHARS: [char; 9] = ['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Derive a filesystem-safe title. Idempotent: sanitising an already
/// sanitised title returns it unchanged.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .map(|c| if UNSAFE_TITLE_CHARS.contains(&c) { '_' } else { c })
        .collect()
}

/// Structure one song unit.
///
/// The title is the first non-blank line; the body is every trimmed,
/// non-blank line after it. Returns `None` when no title line exists or the
/// body holds no content — a recoverable skip, not an error. The caller
/// distinguishes the two cases by checking the unit itself.
pub fn structure(
    unit: &SongUnit,
    rules: &ClassifierRules,
    fallback_chunk_size: usize,
) -> Option<StructuredSong> {
    let title_idx = unit.raw_lines.iter().position(|l| !l.trim().is_empty())?;
    let title = unit.raw_lines[title_idx].trim().to_string();
    let safe_title = sanitize_title(&title);

    let body: Vec<String> = unit.raw_lines[title_idx + 1..]
        .iter()
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect();
    if body.is_empty() {
        return None;
    }

    let blocks = build_blocks(&body, rules, fallback_chunk_size);
    if blocks.is_empty() {
        // Body consisted solely of markers and key annotations.
        return None;
    }

    Some(StructuredSong {
        title,
        safe_title,
        blocks,
    })
}

/// The single decision point between the two block-building strategies.
///
/// The fallback runs iff no chorus/verse marker line appears anywhere in
/// the body; a body with markers always goes through the state machine,
/// even when a marker opens the very first section.
pub fn build_blocks(
    body: &[String],
    rules: &ClassifierRules,
    fallback_chunk_size: usize,
) -> Vec<Block> {
    let marker_seen = body.iter().any(|line| {
        matches!(
            classify(line, rules),
            LineClass::ChorusMarker | LineClass::VerseMarker
        )
    });

    if marker_seen {
        split_by_markers(body, rules)
    } else {
        let content: Vec<String> = body
            .iter()
            .filter(|line| classify(line, rules) == LineClass::Content)
            .cloned()
            .collect();
        chunk_into_verses(&content, fallback_chunk_size)
    }
}

/// Marker-driven strategy: a state machine over line categories.
///
/// The open section starts as a verse with counter 1. A marker flushes the
/// accumulated section (if non-empty) and switches state; the verse counter
/// increments only after a verse block is emitted, so consecutive markers
/// with no intervening content produce no empty blocks and no counter
/// drift. End of input flushes the remainder.
fn split_by_markers(body: &[String], rules: &ClassifierRules) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut section = BlockKind::Verse;
    let mut verse_count: u32 = 1;
    let mut acc: Vec<String> = Vec::new();

    for line in body {
        match classify(line, rules) {
            LineClass::KeyLine => {}
            LineClass::ChorusMarker => {
                flush(&mut blocks, &mut acc, section, &mut verse_count);
                section = BlockKind::Chorus;
            }
            LineClass::VerseMarker => {
                flush(&mut blocks, &mut acc, section, &mut verse_count);
                section = BlockKind::Verse;
            }
            LineClass::Content => acc.push(line.clone()),
        }
    }
    flush(&mut blocks, &mut acc, section, &mut verse_count);

    blocks
}

/// Close the accumulating section into a finalized block. A flush with an
/// empty accumulator is a no-op: no block, no counter change.
fn flush(blocks: &mut Vec<Block>, acc: &mut Vec<String>, section: BlockKind, verse_count: &mut u32) {
    if acc.is_empty() {
        return;
    }
    match section {
        BlockKind::Verse => {
            blocks.push(Block {
                kind: BlockKind::Verse,
                index: Some(*verse_count),
                lines: std::mem::take(acc),
            });
            *verse_count += 1;
        }
        BlockKind::Chorus => blocks.push(Block {
            kind: BlockKind::Chorus,
            index: None,
            lines: std::mem::take(acc),
        }),
    }
}

/// Length-based fallback strategy: consecutive fixed-size chunks, each a
/// numbered verse. The final chunk may be short.
fn chunk_into_verses(content: &[String], chunk_size: usize) -> Vec<Block> {
    content
        .chunks(chunk_size.max(1))
        .enumerate()
        .map(|(i, chunk)| Block {
            kind: BlockKind::Verse,
            index: Some(i as u32 + 1),
            lines: chunk.to_vec(),
        })
        .collect()
}
