use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Error produced while compiling patterns or loading them from disk.
#[derive(Debug, Error)]
pub enum FilterError {
    /// Pattern input could not be turned into a usable pattern record.
    ///
    /// Raised when a raw pattern is not valid UTF-8 or when a pre-computed
    /// record passed to [`CompiledPattern::from_parts`](crate::CompiledPattern::from_parts)
    /// is internally inconsistent. Glob syntax itself has no invalid forms.
    #[error("invalid pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending pattern, lossily rendered when not UTF-8.
        pattern: String,
        /// Why the pattern was rejected.
        reason: String,
    },
    /// A pattern file could not be read.
    #[error("failed to read pattern file '{}': {source}", path.display())]
    PatternFile {
        /// File that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

impl FilterError {
    pub(crate) fn invalid_pattern(pattern: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidPattern {
            pattern: pattern.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn pattern_file(path: &Path, source: io::Error) -> Self {
        Self::PatternFile {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Returns the offending pattern for [`FilterError::InvalidPattern`].
    #[must_use]
    pub fn pattern(&self) -> Option<&str> {
        match self {
            Self::InvalidPattern { pattern, .. } => Some(pattern),
            Self::PatternFile { .. } => None,
        }
    }
}
