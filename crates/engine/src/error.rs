use std::io;
use std::path::PathBuf;

use thiserror::Error;
use walk::WalkError;

/// Exit code for invalid arguments, such as copying a directory into itself.
pub const INVALID_ARGUMENT_EXIT_CODE: i32 = 1;
/// Exit code for traversal failures.
pub const WALK_EXIT_CODE: i32 = 2;
/// Exit code for failures while creating, copying or removing entries.
pub const IO_EXIT_CODE: i32 = 3;

/// Error produced by the tree operations.
#[derive(Debug, Error)]
pub enum TreeError {
    /// Traversal failed: the root is not a directory or a directory could not
    /// be read.
    #[error(transparent)]
    Walk(#[from] WalkError),
    /// The operands are unusable.
    #[error("{message}")]
    InvalidArgument {
        /// Human-readable reason.
        message: String,
    },
    /// Filesystem interaction failed.
    #[error("failed to {action} '{}': {source}", path.display())]
    Io {
        /// Action being performed.
        action: &'static str,
        /// Path involved in the failure.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

impl TreeError {
    /// Constructs an invalid-argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Constructs an I/O error with action context.
    #[must_use]
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            action,
            path: path.into(),
            source,
        }
    }

    /// Returns the process exit code a front-end should report.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidArgument { .. } => INVALID_ARGUMENT_EXIT_CODE,
            Self::Walk(_) => WALK_EXIT_CODE,
            Self::Io { .. } => IO_EXIT_CODE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn io_error_renders_action_and_path() {
        let error = TreeError::io("copy", "/tmp/a", io::Error::other("boom"));
        assert_eq!(error.to_string(), "failed to copy '/tmp/a': boom");
        assert_eq!(error.exit_code(), IO_EXIT_CODE);
        assert!(error.source().is_some());
    }

    #[test]
    fn invalid_argument_has_no_source() {
        let error = TreeError::invalid_argument("nope");
        assert_eq!(error.to_string(), "nope");
        assert_eq!(error.exit_code(), INVALID_ARGUMENT_EXIT_CODE);
        assert!(error.source().is_none());
    }

    #[test]
    fn walk_errors_convert_and_keep_message() {
        let walk_error = walk::WalkBuilder::new("/definitely/missing/root")
            .build()
            .err()
            .expect("missing root fails");
        let message = walk_error.to_string();
        let error = TreeError::from(walk_error);
        assert_eq!(error.to_string(), message);
        assert_eq!(error.exit_code(), WALK_EXIT_CODE);
    }
}
