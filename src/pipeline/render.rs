//! Rendering: serialize a block sequence to the output text format.
//!
//! Each block renders as a label line (`Verse {n}` / `Chorus`) followed by
//! one line per lyric line, every line independently wrapped in `<p>…</p>`
//! and joined with single newlines. The paragraph wrapper is the format the
//! downstream song display consumes; it survives here unchanged so existing
//! consumers keep working.

use crate::output::{Block, StructuredSong};

/// Render one block: its label line, then its content lines.
fn render_block(block: &Block) -> String {
    let mut parts = Vec::with_capacity(block.lines.len() + 1);
    parts.push(wrap(&block.label()));
    for line in &block.lines {
        parts.push(wrap(line));
    }
    parts.join("\n")
}

fn wrap(line: &str) -> String {
    format!("<p>{line}</p>")
}

/// Render a whole song's block sequence to the persisted file content.
pub fn render_song(song: &StructuredSong) -> String {
    song.blocks
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::BlockKind;

    fn verse(index: u32, lines: &[&str]) -> Block {
        Block {
            kind: BlockKind::Verse,
            index: Some(index),
            lines: lines.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn chorus(lines: &[&str]) -> Block {
        Block {
            kind: BlockKind::Chorus,
            index: None,
            lines: lines.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn verse_block_renders_label_then_lines() {
        let rendered = render_block(&verse(1, &["Line1", "Line2"]));
        assert_eq!(rendered, "<p>Verse 1</p>\n<p>Line1</p>\n<p>Line2</p>");
    }

    #[test]
    fn chorus_block_renders_unnumbered_label() {
        let rendered = render_block(&chorus(&["rejoice"]));
        assert_eq!(rendered, "<p>Chorus</p>\n<p>rejoice</p>");
    }

    #[test]
    fn song_blocks_join_with_single_newline() {
        let song = StructuredSong {
            title: "T".into(),
            safe_title: "T".into(),
            blocks: vec![chorus(&["a", "b"]), verse(1, &["c", "d"])],
        };
        assert_eq!(
            render_song(&song),
            "<p>Chorus</p>\n<p>a</p>\n<p>b</p>\n<p>Verse 1</p>\n<p>c</p>\n<p>d</p>"
        );
    }
}
