//! Configuration types for songbook extraction.
//!
//! All extraction behaviour is controlled through [`ExtractionConfig`], built
//! via its [`ExtractionConfigBuilder`]. Keeping every knob in one struct makes
//! it trivial to share configs across calls, log them, and diff two runs to
//! understand why their outputs differ.
//!
//! # Design choice: builder over constructor
//! A many-field constructor breaks on every new field. The builder lets
//! callers set only what they care about and rely on documented defaults
//! for the rest.

use crate::error::Pdf2SongsError;
use crate::pipeline::classify::ClassifierRules;
use crate::progress::ProgressCallback;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration for one songbook extraction run.
///
/// Built via [`ExtractionConfig::builder()`] or using
/// [`ExtractionConfig::default()`].
///
/// # Example
/// ```rust
/// use pdf2songs::{DuplicatePolicy, ExtractionConfig};
///
/// let config = ExtractionConfig::builder()
///     .fallback_chunk_size(6)
///     .output_extension("txt")
///     .duplicate_policy(DuplicatePolicy::Error)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct ExtractionConfig {
    /// Chunk size for the length-based fallback splitter. Default: 4.
    ///
    /// When a song body carries no explicit verse/chorus markers, its
    /// content lines are grouped into consecutive chunks of this many lines
    /// and labelled `Verse 1, Verse 2, …`. Four lines approximates a common
    /// stanza, but the value has no semantic basis in the documents
    /// themselves, so it is a knob rather than a constant.
    pub fallback_chunk_size: usize,

    /// File extension (without dot) for the per-song output files. Default: "txt".
    pub output_extension: String,

    /// What to do when two songs sanitise to the same filename. Default:
    /// [`DuplicatePolicy::Suffix`].
    pub duplicate_policy: DuplicatePolicy,

    /// Compiled line-classification patterns handed to the structurer.
    ///
    /// The default table recognises `CHORUS`/`REFRAIN`, `VERSE`/`V<n>`/
    /// `T<n>`/bare-digit markers, and `Key of X` annotations. Override it
    /// to teach the structurer a songbook's local conventions.
    pub classifier: ClassifierRules,

    /// Per-song progress events. Default: none.
    pub progress_callback: Option<ProgressCallback>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            fallback_chunk_size: 4,
            output_extension: "txt".to_string(),
            duplicate_policy: DuplicatePolicy::default(),
            classifier: ClassifierRules::default(),
            progress_callback: None,
        }
    }
}

impl fmt::Debug for ExtractionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExtractionConfig")
            .field("fallback_chunk_size", &self.fallback_chunk_size)
            .field("output_extension", &self.output_extension)
            .field("duplicate_policy", &self.duplicate_policy)
            .field(
                "progress_callback",
                &self.progress_callback.as_ref().map(|_| "<dyn callback>"),
            )
            .finish()
    }
}

impl ExtractionConfig {
    /// Create a new builder for `ExtractionConfig`.
    pub fn builder() -> ExtractionConfigBuilder {
        ExtractionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ExtractionConfig`].
#[derive(Debug)]
pub struct ExtractionConfigBuilder {
    config: ExtractionConfig,
}

impl ExtractionConfigBuilder {
    pub fn fallback_chunk_size(mut self, n: usize) -> Self {
        self.config.fallback_chunk_size = n;
        self
    }

    pub fn output_extension(mut self, ext: impl Into<String>) -> Self {
        self.config.output_extension = ext.into();
        self
    }

    pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.config.duplicate_policy = policy;
        self
    }

    pub fn classifier(mut self, rules: ClassifierRules) -> Self {
        self.config.classifier = rules;
        self
    }

    pub fn progress_callback(mut self, cb: ProgressCallback) -> Self {
        self.config.progress_callback = Some(cb);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ExtractionConfig, Pdf2SongsError> {
        let c = &self.config;
        if c.fallback_chunk_size == 0 {
            return Err(Pdf2SongsError::InvalidConfig(
                "Fallback chunk size must be ≥ 1".into(),
            ));
        }
        let ext = c.output_extension.trim();
        if ext.is_empty() {
            return Err(Pdf2SongsError::InvalidConfig(
                "Output extension must not be empty".into(),
            ));
        }
        if ext.contains(['/', '\\', '.']) {
            return Err(Pdf2SongsError::InvalidConfig(format!(
                "Output extension must be a bare extension without dot or separators, got '{}'",
                c.output_extension
            )));
        }
        Ok(self.config)
    }
}

// ── Enums ────────────────────────────────────────────────────────────────

/// How the writer handles two songs whose sanitised titles collide.
///
/// Silent overwriting loses songs without a trace, so the policy is
/// explicit and defaults to disambiguation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DuplicatePolicy {
    /// Append a numeric suffix: `Title (2).txt`, `Title (3).txt`, … (default)
    #[default]
    Suffix,
    /// Last write wins.
    Overwrite,
    /// Record a per-song `DuplicateTitle` error; the batch continues.
    Error,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ExtractionConfig::builder().build().unwrap();
        assert_eq!(config.fallback_chunk_size, 4);
        assert_eq!(config.output_extension, "txt");
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Suffix);
    }

    #[test]
    fn zero_chunk_size_rejected() {
        let err = ExtractionConfig::builder()
            .fallback_chunk_size(0)
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("chunk size"));
    }

    #[test]
    fn dotted_extension_rejected() {
        assert!(ExtractionConfig::builder()
            .output_extension(".txt")
            .build()
            .is_err());
        assert!(ExtractionConfig::builder()
            .output_extension("")
            .build()
            .is_err());
    }

    #[test]
    fn debug_elides_callback() {
        let config = ExtractionConfig::default();
        let repr = format!("{config:?}");
        assert!(repr.contains("fallback_chunk_size"));
        assert!(!repr.contains("ClassifierRules"), "got: {repr}");
    }
}
