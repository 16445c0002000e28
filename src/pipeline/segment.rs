//! Segmentation: split the flat extracted text into per-song units.
//!
//! Songbook PDFs carry no reliable document structure; the one dependable
//! signal is the song number printed on its own line between songs. The
//! segmenter splits the text on those standalone digit lines and pairs each
//! marker with the content that follows it.
//!
//! Absence of structure is not an error: a document with no recognisable
//! markers yields at most one unit (the unnumbered-first-song fallback) or
//! none at all. Callers detect the degenerate case via an empty result.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// One song's worth of raw lines, as carved out of the document.
///
/// Ephemeral: produced by [`segment`], consumed once by the structurer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SongUnit {
    /// The digit marker that introduced the unit. `None` for the
    /// unnumbered-first-song fallback.
    pub number_label: Option<String>,
    /// Raw body lines, title line first. Untrimmed; the structurer owns
    /// whitespace handling.
    pub raw_lines: Vec<String>,
}

static RE_NEWLINE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").unwrap());

/// A line consisting solely of digits, bounded by newlines on both sides.
static RE_SONG_MARKER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n(\d+)\n").unwrap());

/// Split raw songbook text into song units.
///
/// Preprocessing collapses newline runs to single newlines and trims the
/// whole text, so blank-line noise from PDF extraction cannot hide or
/// fabricate markers. The text is then split on standalone digit lines into
/// alternating content/marker tokens and reassembled:
///
/// - a digit token pairs with the token that follows it (a trailing marker
///   with nothing after it is dropped, not an error);
/// - a non-digit token in first position is treated as an unnumbered first
///   song, title-detected via [`first_song_unit`];
/// - any other non-digit token is dead content with no structural role.
pub fn segment(text: &str) -> Vec<SongUnit> {
    let normalised = text.replace("\r\n", "\n").replace('\r', "\n");
    let collapsed = RE_NEWLINE_RUNS.replace_all(&normalised, "\n");
    let trimmed = collapsed.trim();

    let tokens = split_on_markers(trimmed);

    let mut units = Vec::new();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if is_all_digits(token) {
            if let Some(body) = tokens.get(i + 1) {
                units.push(SongUnit {
                    number_label: Some(token.clone()),
                    raw_lines: body.lines().map(String::from).collect(),
                });
            }
            i += 2;
        } else {
            if i == 0 {
                if let Some(unit) = first_song_unit(token) {
                    units.push(unit);
                }
            }
            i += 1;
        }
    }

    tracing::debug!("Segmented {} song units", units.len());
    units
}

/// Split on `\n<digits>\n` markers, keeping the captured digits as their own
/// tokens (alternating content / marker). Tokens are trimmed and empties
/// discarded.
fn split_on_markers(text: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut last = 0;
    for m in RE_SONG_MARKER.find_iter(text) {
        tokens.push(&text[last..m.start()]);
        tokens.push(m.as_str().trim_matches('\n'));
        last = m.end();
    }
    tokens.push(&text[last..]);

    tokens
        .into_iter()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(String::from)
        .collect()
}

fn is_all_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Fallback for content preceding the first marker: treat it as an
/// unnumbered first song whose title is the first non-blank, non-numeric
/// line. Returns `None` when no usable title line exists.
fn first_song_unit(token: &str) -> Option<SongUnit> {
    let lines: Vec<&str> = token.lines().collect();
    let title_idx = lines
        .iter()
        .position(|line| !line.trim().is_empty() && !is_all_digits(line.trim()))?;
    Some(SongUnit {
        number_label: None,
        raw_lines: lines[title_idx..].iter().map(|s| s.to_string()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbered_songs_split_in_source_order() {
        let text = "Hymnal Collection\n1\nFirst Song\nline a\nline b\n2\nSecond Song\nline c\n";
        let units = segment(text);
        assert_eq!(units.len(), 3); // preamble fallback + two numbered songs
        assert_eq!(units[0].number_label, None);
        assert_eq!(units[1].number_label.as_deref(), Some("1"));
        assert_eq!(units[1].raw_lines[0], "First Song");
        assert_eq!(units[2].number_label.as_deref(), Some("2"));
        assert_eq!(units[2].raw_lines, vec!["Second Song", "line c"]);
    }

    #[test]
    fn marker_count_matches_numbered_unit_count() {
        // Each `\n<digits>\n` marker followed by content yields exactly one
        // numbered unit, in source order.
        let text = "Contents\n10\nAlpha\na\n11\nBeta\nb\n12\nGamma\nc\n";
        let numbered: Vec<_> = segment(text)
            .into_iter()
            .filter(|u| u.number_label.is_some())
            .collect();
        assert_eq!(numbered.len(), 3);
        let labels: Vec<_> = numbered
            .iter()
            .map(|u| u.number_label.clone().unwrap())
            .collect();
        assert_eq!(labels, vec!["10", "11", "12"]);
    }

    #[test]
    fn leading_number_merges_into_first_token() {
        // Whole-text trimming strips the newline ahead of a document-leading
        // digit line, so it is not a marker; the first-song fallback skips
        // it when hunting for the title.
        let text = "\n1\nFirst Song\nline a\n";
        let units = segment(text);
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].number_label, None);
        assert_eq!(units[0].raw_lines[0], "First Song");
    }

    #[test]
    fn blank_line_noise_is_collapsed() {
        let text = "\n\n\n1\n\n\nOnly Song\n\n\nlyric line\n\n";
        let units = segment(text);
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].raw_lines, vec!["Only Song", "lyric line"]);
    }

    #[test]
    fn trailing_marker_yields_no_numbered_unit() {
        let text = "A Title\nlyric\n7\n";
        let units = segment(text);
        assert!(units.iter().all(|u| u.number_label.as_deref() != Some("7")));
    }

    #[test]
    fn unnumbered_first_song_uses_title_fallback() {
        let text = "Opening Hymn\nfirst line\nsecond line\n2\nNext Song\nline\n";
        let units = segment(text);
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].number_label, None);
        assert_eq!(units[0].raw_lines[0], "Opening Hymn");
        assert_eq!(units[1].number_label.as_deref(), Some("2"));
    }

    #[test]
    fn marker_free_document_yields_one_unit() {
        let units = segment("Lone Song\nline one\nline two\n");
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].number_label, None);
    }

    #[test]
    fn digits_only_document_yields_nothing() {
        assert!(segment("\n1\n").is_empty());
        assert!(segment("").is_empty());
        assert!(segment("   \n\n  ").is_empty());
    }

    #[test]
    fn crlf_input_is_normalised() {
        let text = "\r\n1\r\nA Song\r\nlyric\r\n";
        let units = segment(text);
        assert_eq!(units.len(), 1);
        assert_eq!(units[0].raw_lines, vec!["A Song", "lyric"]);
    }
}
