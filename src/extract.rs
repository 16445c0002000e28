//! Top-level extraction entry points.
//!
//! Three eager functions cover the common call shapes:
//!
//! * [`extract`] — PDF path in, structured results in memory.
//! * [`extract_from_text`] — pre-extracted text in, structured results in
//!   memory. Useful for testing the pipeline without a PDF on disk, or for
//!   callers that already ran their own text extraction.
//! * [`extract_to_dir`] — PDF path in, one file per song out.
//!
//! Failures are split by blast radius: anything that stops the whole run
//! (bad path, unreadable PDF, output directory) returns
//! `Err(Pdf2SongsError)`; anything scoped to one song (no title, empty
//! body, write refused) lands in that song's [`SongResult::error`] and the
//! batch continues. A panic while structuring a single song is caught and
//! demoted to a per-song formatting error for the same reason.

use crate::config::ExtractionConfig;
use crate::error::{Pdf2SongsError, SongError};
use crate::output::{ExtractionOutput, ExtractionStats, SongResult};
use crate::pipeline::{input, render, segment, structure};
use crate::writer::{SongWriter, WriteError};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Extract and structure every song in a PDF songbook.
///
/// Returns the in-memory results; nothing is written to disk. Use
/// [`extract_to_dir`] to persist one file per song.
///
/// # Example
/// ```rust,no_run
/// use pdf2songs::{extract, ExtractionConfig};
///
/// let output = extract("songbook.pdf", &ExtractionConfig::default())?;
/// for song in output.successes() {
///     println!("{}: {} bytes", song.title, song.content.len());
/// }
/// # Ok::<(), pdf2songs::Pdf2SongsError>(())
/// ```
pub fn extract(
    input: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, Pdf2SongsError> {
    let start = Instant::now();
    let path = input.as_ref();

    // ── Step 1: Validate and extract the flat text stream ──
    let extract_start = Instant::now();
    let text = input::extract_text(path)?;
    let extract_duration_ms = extract_start.elapsed().as_millis() as u64;

    // ── Step 2: Run the text pipeline ──
    let mut output = extract_from_text(&text, config);
    output.stats.extract_duration_ms = extract_duration_ms;
    output.stats.total_duration_ms = start.elapsed().as_millis() as u64;
    Ok(output)
}

/// Structure every song in pre-extracted songbook text.
///
/// This is the whole pipeline minus the PDF adapter, so it is infallible at
/// the run level: text that yields no songs produces an empty result set
/// (and a warning), not an error.
pub fn extract_from_text(text: &str, config: &ExtractionConfig) -> ExtractionOutput {
    let start = Instant::now();

    // ── Step 1: Segment the stream into song units ──
    let units = segment::segment(text);
    let total = units.len();
    info!("Segmented document into {total} song unit(s)");
    if let Some(cb) = &config.progress_callback {
        cb.on_run_start(total);
    }

    // ── Step 2: Structure and render each unit, isolating failures ──
    let mut songs = Vec::with_capacity(total);
    let mut stats = ExtractionStats {
        total_units: total,
        ..Default::default()
    };

    for (i, unit) in units.iter().enumerate() {
        let index = i + 1;
        if let Some(cb) = &config.progress_callback {
            cb.on_song_start(index, total);
        }

        let result = process_unit(unit, index, config);
        match &result.error {
            None => {
                stats.structured_songs += 1;
                debug!("Song {index}: structured '{}'", result.title);
                if let Some(cb) = &config.progress_callback {
                    cb.on_song_complete(index, total, &result.title, result.content.len());
                }
            }
            Some(err) => {
                stats.skipped_songs += 1;
                warn!("Song {index}: {err}");
                if let Some(cb) = &config.progress_callback {
                    cb.on_song_error(index, total, &err.to_string());
                }
            }
        }
        songs.push(result);
    }

    // ── Step 3: Final tally ──
    if stats.structured_songs == 0 {
        warn!("No songs were extracted; the document may not match the expected songbook layout");
    }
    if let Some(cb) = &config.progress_callback {
        cb.on_run_complete(total, stats.structured_songs);
    }
    stats.total_duration_ms = start.elapsed().as_millis() as u64;

    ExtractionOutput { songs, stats }
}

/// Extract a PDF songbook and write one file per song into `out_dir`.
///
/// The directory is created if absent. Per-song write failures (including
/// duplicate titles under [`crate::DuplicatePolicy::Error`]) are recorded on
/// the affected song and the rest of the batch still writes.
pub fn extract_to_dir(
    input: impl AsRef<Path>,
    out_dir: impl AsRef<Path>,
    config: &ExtractionConfig,
) -> Result<ExtractionOutput, Pdf2SongsError> {
    let start = Instant::now();

    // Create the output directory before touching the PDF so a bad
    // destination fails fast.
    let mut writer = SongWriter::new(
        out_dir,
        &config.output_extension,
        config.duplicate_policy,
    )?;

    let mut output = extract(input, config)?;

    // ── Persist each structured song ──
    for song in output.songs.iter_mut().filter(|s| s.error.is_none()) {
        match writer.write(&song.safe_title, &song.content) {
            Ok(path) => {
                output.stats.written_files += 1;
                debug!("Song {}: wrote {}", song.index, path.display());
            }
            Err(WriteError::Duplicate(safe_title)) => {
                output.stats.failed_writes += 1;
                let err = SongError::DuplicateTitle {
                    index: song.index,
                    safe_title,
                };
                warn!("Song {}: {err}", song.index);
                song.error = Some(err);
            }
            Err(WriteError::Io(detail)) => {
                output.stats.failed_writes += 1;
                let err = SongError::WriteFailed {
                    index: song.index,
                    title: song.title.clone(),
                    detail,
                };
                warn!("Song {}: {err}", song.index);
                song.error = Some(err);
            }
        }
    }

    output.stats.total_duration_ms = start.elapsed().as_millis() as u64;
    info!(
        "Wrote {} song file(s), {} failed",
        output.stats.written_files, output.stats.failed_writes
    );
    Ok(output)
}

/// Structure and render one song unit, never letting a failure escape.
fn process_unit(unit: &segment::SongUnit, index: usize, config: &ExtractionConfig) -> SongResult {
    let mut result = SongResult {
        index,
        number_label: unit.number_label.clone(),
        title: String::new(),
        safe_title: String::new(),
        content: String::new(),
        error: None,
    };

    let title_line = unit
        .raw_lines
        .iter()
        .find(|l| !l.trim().is_empty())
        .map(|l| l.trim().to_string());
    let Some(title) = title_line else {
        result.error = Some(SongError::MissingTitle { index });
        return result;
    };
    result.title = title.clone();
    result.safe_title = structure::sanitize_title(&title);

    // A malformed unit must cost only itself, so block construction runs
    // behind a panic boundary.
    let structured = catch_unwind(AssertUnwindSafe(|| {
        structure::structure(unit, &config.classifier, config.fallback_chunk_size)
    }));

    match structured {
        Ok(Some(song)) => {
            result.content = render::render_song(&song);
        }
        Ok(None) => {
            result.error = Some(SongError::EmptyBody { index, title });
        }
        Err(panic) => {
            let detail = panic
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| panic.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            result.error = Some(SongError::Formatting {
                index,
                title,
                detail,
            });
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DuplicatePolicy;
    use crate::progress::ExtractionProgressCallback;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    const SONGBOOK: &str = "Hymnal\n\
                            1\n\
                            Amazing Grace\n\
                            Key of G\n\
                            VERSE\n\
                            Amazing grace how sweet the sound\n\
                            That saved a wretch like me\n\
                            CHORUS\n\
                            Praise God\n\
                            2\n\
                            Quiet Song\n\
                            line one\n\
                            line two\n";

    #[test]
    fn full_text_pipeline_structures_both_songs() {
        let config = ExtractionConfig::default();
        let output = extract_from_text(SONGBOOK, &config);

        assert_eq!(output.stats.total_units, 3);
        assert_eq!(output.stats.structured_songs, 2);
        assert_eq!(output.stats.skipped_songs, 1);

        let grace = &output.songs[1];
        assert_eq!(grace.title, "Amazing Grace");
        assert_eq!(grace.number_label.as_deref(), Some("1"));
        assert!(grace.content.starts_with("<p>Verse 1</p>"));
        assert!(grace.content.contains("<p>Chorus</p>"));
        assert!(!grace.content.contains("Key of G"));
    }

    #[test]
    fn preamble_unit_is_skipped_not_fatal() {
        let output = extract_from_text(SONGBOOK, &ExtractionConfig::default());
        // "Hymnal" alone has a title but no body.
        let preamble = &output.songs[0];
        assert!(matches!(
            preamble.error,
            Some(SongError::EmptyBody { .. })
        ));
    }

    #[test]
    fn empty_document_yields_no_songs() {
        let output = extract_from_text("", &ExtractionConfig::default());
        assert!(output.songs.is_empty());
        assert_eq!(output.stats.total_units, 0);
    }

    #[test]
    fn marker_free_song_uses_fallback_chunks() {
        let text = "Intro\n1\nPlain Song\na\nb\nc\nd\ne\n";
        let output = extract_from_text(text, &ExtractionConfig::default());
        let song = output
            .songs
            .iter()
            .find(|s| s.title == "Plain Song")
            .unwrap();
        assert!(song.content.starts_with("<p>Verse 1</p>"));
        assert!(song.content.contains("<p>Verse 2</p>"));
        assert!(song.content.contains("<p>e</p>"));
    }

    #[test]
    fn progress_events_fire_per_song() {
        struct Counter {
            completes: AtomicUsize,
            errors: AtomicUsize,
        }
        impl ExtractionProgressCallback for Counter {
            fn on_song_complete(&self, _i: usize, _t: usize, _title: &str, _len: usize) {
                self.completes.fetch_add(1, Ordering::SeqCst);
            }
            fn on_song_error(&self, _i: usize, _t: usize, _e: &str) {
                self.errors.fetch_add(1, Ordering::SeqCst);
            }
        }

        let counter = Arc::new(Counter {
            completes: AtomicUsize::new(0),
            errors: AtomicUsize::new(0),
        });
        let config = ExtractionConfig::builder()
            .progress_callback(counter.clone())
            .build()
            .unwrap();

        extract_from_text(SONGBOOK, &config);
        assert_eq!(counter.completes.load(Ordering::SeqCst), 2);
        assert_eq!(counter.errors.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = extract("/no/such/book.pdf", &ExtractionConfig::default()).unwrap_err();
        assert!(matches!(err, Pdf2SongsError::FileNotFound { .. }));
    }

    #[test]
    fn duplicate_error_policy_records_per_song_failure() {
        let dir = tempfile::tempdir().unwrap();
        let config = ExtractionConfig::builder()
            .duplicate_policy(DuplicatePolicy::Error)
            .build()
            .unwrap();

        let text = "Intro\n1\nSame Title\na\nb\n2\nSame Title\nc\nd\n";
        let output = extract_from_text(text, &config);
        assert_eq!(output.stats.structured_songs, 2);

        // Exercise the writer path via the same policy.
        let mut writer =
            SongWriter::new(dir.path(), &config.output_extension, config.duplicate_policy)
                .unwrap();
        let successes: Vec<_> = output.successes().collect();
        assert!(writer
            .write(&successes[0].safe_title, &successes[0].content)
            .is_ok());
        assert!(matches!(
            writer.write(&successes[1].safe_title, &successes[1].content),
            Err(WriteError::Duplicate(_))
        ));
    }
}
