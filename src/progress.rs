//! Progress-callback trait for per-song extraction events.
//!
//! Inject an [`Arc<dyn ExtractionProgressCallback>`] via
//! [`crate::config::ExtractionConfigBuilder::progress_callback`] to receive
//! events as the pipeline processes each song.
//!
//! # Why callbacks instead of channels?
//!
//! The callback approach is the least-invasive integration point: callers can
//! forward events to a channel, a database record, or a terminal progress
//! bar — without the library knowing anything about how the host application
//! communicates. The trait is `Send + Sync` so a config holding one can be
//! shared freely, even though the pipeline itself runs on a single thread.

use std::sync::Arc;

/// Called by the extraction pipeline as it processes each song.
///
/// All methods have default no-op implementations so callers only override
/// what they care about. Songs are processed sequentially and in source
/// order, so events for song *n* always precede events for song *n + 1*.
pub trait ExtractionProgressCallback: Send + Sync {
    /// Called once after segmentation, before any song is structured.
    ///
    /// # Arguments
    /// * `total_songs` — number of song units found in the document
    fn on_run_start(&self, total_songs: usize) {
        let _ = total_songs;
    }

    /// Called just before a song unit is structured.
    ///
    /// # Arguments
    /// * `index` — 1-indexed position in the document
    /// * `total` — total song units
    fn on_song_start(&self, index: usize, total: usize) {
        let _ = (index, total);
    }

    /// Called when a song is successfully structured. Persistence happens
    /// afterwards; a write failure is reported in the run results, not
    /// through this event.
    ///
    /// # Arguments
    /// * `index`       — 1-indexed position in the document
    /// * `total`       — total song units
    /// * `title`       — the extracted song title
    /// * `content_len` — byte length of the rendered content
    fn on_song_complete(&self, index: usize, total: usize, title: &str, content_len: usize) {
        let _ = (index, total, title, content_len);
    }

    /// Called when a song is skipped or fails.
    ///
    /// # Arguments
    /// * `index` — 1-indexed position in the document
    /// * `total` — total song units
    /// * `error` — human-readable error description
    fn on_song_error(&self, index: usize, total: usize, error: &str) {
        let _ = (index, total, error);
    }

    /// Called once after all songs have been attempted.
    ///
    /// # Arguments
    /// * `total_songs`   — total song units in the document
    /// * `success_count` — songs that completed without error
    fn on_run_complete(&self, total_songs: usize, success_count: usize) {
        let _ = (total_songs, success_count);
    }
}

/// A no-op implementation for callers that don't need progress events.
///
/// This is the default when no callback is configured.
pub struct NoopProgressCallback;

impl ExtractionProgressCallback for NoopProgressCallback {}

/// Convenience alias matching the type stored in [`crate::config::ExtractionConfig`].
pub type ProgressCallback = Arc<dyn ExtractionProgressCallback>;
