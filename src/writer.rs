//! Storage writer: persist rendered songs as one UTF-8 file per song.
//!
//! The writer owns the two persistence concerns the pipeline proper never
//! sees: filesystem layout (`{output_dir}/{safe_title}.{ext}`, directories
//! created on demand) and duplicate sanitised titles, resolved by the
//! configured [`DuplicatePolicy`]. Writes are atomic (temp file + rename)
//! to prevent partial files.
//!
//! Files left over from previous runs are overwritten silently; the
//! duplicate policy tracks collisions within one run only.

use crate::config::DuplicatePolicy;
use crate::error::Pdf2SongsError;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

/// A per-song persistence failure. Mapped onto
/// [`crate::error::SongError`] by the orchestrator; never aborts the batch.
#[derive(Debug, Error)]
pub enum WriteError {
    /// Another song in this run already claimed the sanitised title and the
    /// policy is [`DuplicatePolicy::Error`].
    #[error("duplicate title '{0}'")]
    Duplicate(String),

    /// The file could not be written.
    #[error("{0}")]
    Io(String),
}

/// Writes rendered songs into one output directory.
pub struct SongWriter {
    out_dir: PathBuf,
    extension: String,
    policy: DuplicatePolicy,
    /// File stems claimed during this run, for duplicate detection.
    claimed: HashSet<String>,
}

impl SongWriter {
    /// Create a writer, creating `out_dir` (and parents) if absent.
    pub fn new(
        out_dir: impl AsRef<Path>,
        extension: &str,
        policy: DuplicatePolicy,
    ) -> Result<Self, Pdf2SongsError> {
        let out_dir = out_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&out_dir).map_err(|e| Pdf2SongsError::OutputDirFailed {
            path: out_dir.clone(),
            source: e,
        })?;
        Ok(Self {
            out_dir,
            extension: extension.to_string(),
            policy,
            claimed: HashSet::new(),
        })
    }

    /// Persist one song, returning the path written.
    pub fn write(&mut self, safe_title: &str, content: &str) -> Result<PathBuf, WriteError> {
        let stem = self.resolve_stem(safe_title)?;
        let path = self.out_dir.join(format!("{stem}.{}", self.extension));

        // Atomic write: write to a sibling temp file, then rename.
        let tmp_path = self.out_dir.join(format!("{stem}.{}.tmp", self.extension));
        std::fs::write(&tmp_path, content).map_err(|e| WriteError::Io(e.to_string()))?;
        std::fs::rename(&tmp_path, &path).map_err(|e| WriteError::Io(e.to_string()))?;

        self.claimed.insert(stem);
        debug!("Wrote {}", path.display());
        Ok(path)
    }

    /// Apply the duplicate policy to pick the file stem for this title.
    fn resolve_stem(&self, safe_title: &str) -> Result<String, WriteError> {
        if !self.claimed.contains(safe_title) {
            return Ok(safe_title.to_string());
        }
        match self.policy {
            DuplicatePolicy::Overwrite => Ok(safe_title.to_string()),
            DuplicatePolicy::Error => Err(WriteError::Duplicate(safe_title.to_string())),
            DuplicatePolicy::Suffix => {
                let mut n = 2usize;
                loop {
                    let candidate = format!("{safe_title} ({n})");
                    if !self.claimed.contains(&candidate) {
                        return Ok(candidate);
                    }
                    n += 1;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_nested_output_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a/b/songs");
        let mut writer = SongWriter::new(&nested, "txt", DuplicatePolicy::Suffix).unwrap();
        let path = writer.write("Hymn", "<p>Verse 1</p>").unwrap();
        assert_eq!(path, nested.join("Hymn.txt"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "<p>Verse 1</p>");
    }

    #[test]
    fn suffix_policy_disambiguates_collisions() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = SongWriter::new(dir.path(), "txt", DuplicatePolicy::Suffix).unwrap();
        let first = writer.write("Doxology", "one").unwrap();
        let second = writer.write("Doxology", "two").unwrap();
        let third = writer.write("Doxology", "three").unwrap();
        assert_eq!(first, dir.path().join("Doxology.txt"));
        assert_eq!(second, dir.path().join("Doxology (2).txt"));
        assert_eq!(third, dir.path().join("Doxology (3).txt"));
        assert_eq!(std::fs::read_to_string(first).unwrap(), "one");
        assert_eq!(std::fs::read_to_string(second).unwrap(), "two");
    }

    #[test]
    fn overwrite_policy_keeps_last_write() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = SongWriter::new(dir.path(), "txt", DuplicatePolicy::Overwrite).unwrap();
        writer.write("Doxology", "one").unwrap();
        let path = writer.write("Doxology", "two").unwrap();
        assert_eq!(path, dir.path().join("Doxology.txt"));
        assert_eq!(std::fs::read_to_string(path).unwrap(), "two");
    }

    #[test]
    fn error_policy_refuses_second_write() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = SongWriter::new(dir.path(), "txt", DuplicatePolicy::Error).unwrap();
        writer.write("Doxology", "one").unwrap();
        let err = writer.write("Doxology", "two").unwrap_err();
        assert!(matches!(err, WriteError::Duplicate(_)));
        // First file is untouched.
        assert_eq!(
            std::fs::read_to_string(dir.path().join("Doxology.txt")).unwrap(),
            "one"
        );
    }

    #[test]
    fn no_temp_files_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = SongWriter::new(dir.path(), "txt", DuplicatePolicy::Suffix).unwrap();
        writer.write("Song", "content").unwrap();
        let leftovers: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.path().extension().is_some_and(|x| x == "tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }
}
