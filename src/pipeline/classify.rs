//! Line classification: the tagged-category function driving the structurer.
//!
//! Every line of a song body falls into exactly one of four categories
//! ([`LineClass`]). Returning an enumerated category from a single function,
//! instead of chaining pattern matches inline in the structurer, keeps the
//! section-transition logic auditable and lets the patterns be tested in
//! isolation from the state machine that consumes them.
//!
//! The patterns live in a [`ClassifierRules`] table — compiled once, frozen,
//! and passed into the structurer through the configuration. No module holds
//! ambient mutable regex state; [`ClassifierRules::default`] merely reuses a
//! lazily compiled shared table.

use once_cell::sync::Lazy;
use regex::Regex;

/// The structural category of one body line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// Musical key annotation ("Key of C#m"). Discarded entirely: not added
    /// to any section, no section change.
    KeyLine,
    /// Explicit chorus marker ("CHORUS", "REFRAIN"). Switches the open
    /// section to chorus; the marker line itself is never rendered.
    ChorusMarker,
    /// Explicit verse marker ("VERSE", "V2", "Verse 3", "T2", bare digits).
    /// Switches the open section to verse; never rendered.
    VerseMarker,
    /// Ordinary lyric line, appended to the open section.
    Content,
}

/// Frozen table of compiled classification patterns.
///
/// Constructed once (usually via `Default`) and carried by
/// [`crate::config::ExtractionConfig`].
#[derive(Debug, Clone)]
pub struct ClassifierRules {
    /// `Key [of] <A–G>[#|b][m]`, case-insensitive, anchored at line start.
    pub key_line: Regex,
    /// Whole line is `CHORUS` or `REFRAIN`, case-insensitive.
    pub chorus_marker: Regex,
    /// Whole line is `VERSE` or `V`, optionally followed by digits,
    /// case-insensitive. Covers "VERSE", "Verse 2", "v3".
    pub verse_marker: Regex,
    /// Whole line is `T<digits>` or digits only — alternate verse-number
    /// notations seen in scanned songbooks.
    pub verse_number: Regex,
}

static DEFAULT_RULES: Lazy<ClassifierRules> = Lazy::new(|| ClassifierRules {
    key_line: Regex::new(r"(?i)^Key\s+(?:of\s+)?[A-G](?:#|b)?m?\b").unwrap(),
    chorus_marker: Regex::new(r"(?i)^(?:CHORUS|REFRAIN)$").unwrap(),
    verse_marker: Regex::new(r"(?i)^(?:VERSE|V)\s*\d*$").unwrap(),
    verse_number: Regex::new(r"^(?:T\d+|\d+)$").unwrap(),
});

impl Default for ClassifierRules {
    fn default() -> Self {
        DEFAULT_RULES.clone()
    }
}

/// Classify one trimmed body line.
///
/// Order matters: the key-line filter runs first so "Key of C" is never
/// mistaken for content, and chorus markers are checked before verse markers
/// so the bare-digits verse pattern cannot shadow anything.
pub fn classify(line: &str, rules: &ClassifierRules) -> LineClass {
    let trimmed = line.trim();
    if rules.key_line.is_match(trimmed) {
        LineClass::KeyLine
    } else if rules.chorus_marker.is_match(trimmed) {
        LineClass::ChorusMarker
    } else if rules.verse_marker.is_match(trimmed) || rules.verse_number.is_match(trimmed) {
        LineClass::VerseMarker
    } else {
        LineClass::Content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(line: &str) -> LineClass {
        classify(line, &ClassifierRules::default())
    }

    #[test]
    fn key_lines_detected() {
        assert_eq!(class("Key of C#m"), LineClass::KeyLine);
        assert_eq!(class("Key of G"), LineClass::KeyLine);
        assert_eq!(class("key of Bb"), LineClass::KeyLine);
        assert_eq!(class("Key A"), LineClass::KeyLine);
    }

    #[test]
    fn key_line_requires_note_letter() {
        assert_eq!(class("Key to my heart"), LineClass::Content);
        assert_eq!(class("Keys jangling loud"), LineClass::Content);
    }

    #[test]
    fn chorus_markers_detected() {
        assert_eq!(class("CHORUS"), LineClass::ChorusMarker);
        assert_eq!(class("Chorus"), LineClass::ChorusMarker);
        assert_eq!(class("  refrain  "), LineClass::ChorusMarker);
    }

    #[test]
    fn chorus_word_inside_lyric_is_content() {
        assert_eq!(class("Sing the chorus with me"), LineClass::Content);
    }

    #[test]
    fn verse_markers_detected() {
        assert_eq!(class("VERSE"), LineClass::VerseMarker);
        assert_eq!(class("Verse 2"), LineClass::VerseMarker);
        assert_eq!(class("V2"), LineClass::VerseMarker);
        assert_eq!(class("v 3"), LineClass::VerseMarker);
        assert_eq!(class("T2"), LineClass::VerseMarker);
        assert_eq!(class("4"), LineClass::VerseMarker);
    }

    #[test]
    fn t_pattern_is_case_sensitive() {
        // Lowercase "t2" is not an accepted verse-number notation.
        assert_eq!(class("t2"), LineClass::Content);
    }

    #[test]
    fn ordinary_lyrics_are_content() {
        assert_eq!(class("Amazing grace how sweet the sound"), LineClass::Content);
        assert_eq!(class("Verse upon verse we sing"), LineClass::Content);
    }
}
