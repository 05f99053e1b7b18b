use std::error::Error;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

/// Failure that ended a walk.
///
/// The root must name an existing directory; anything else is reported as
/// [`WalkErrorKind::NotADirectory`] before a single entry is produced. Once
/// the walk is under way, the first failure is yielded once and the iterator
/// is exhausted afterwards.
#[derive(Debug)]
pub struct WalkError {
    kind: WalkErrorKind,
}

impl WalkError {
    pub(crate) fn not_a_directory(root: PathBuf, source: io::Error) -> Self {
        WalkErrorKind::NotADirectory { path: root, source }.into()
    }

    pub(crate) fn directory_unreadable(dir: PathBuf, source: io::Error) -> Self {
        WalkErrorKind::DirectoryUnreadable { path: dir, source }.into()
    }

    pub(crate) fn read_dir_entry(dir: PathBuf, source: io::Error) -> Self {
        WalkErrorKind::ReadDirEntry { path: dir, source }.into()
    }

    pub(crate) fn metadata(entry: PathBuf, source: io::Error) -> Self {
        WalkErrorKind::Metadata { path: entry, source }.into()
    }

    pub(crate) fn canonicalize(dir: PathBuf, source: io::Error) -> Self {
        WalkErrorKind::Canonicalize { path: dir, source }.into()
    }

    /// Which step of the walk failed.
    #[must_use]
    pub fn kind(&self) -> &WalkErrorKind {
        &self.kind
    }

    /// Path the failing step was working on.
    ///
    /// For [`WalkErrorKind::NotADirectory`] this is the root as given to the
    /// builder, made absolute.
    ///
    /// # Examples
    ///
    /// ```
    /// use walk::WalkBuilder;
    ///
    /// let Err(error) = WalkBuilder::new("./no_such_tree").build() else {
    ///     panic!("a missing root is not a directory");
    /// };
    /// assert!(error.is_not_a_directory());
    /// assert!(error.path().ends_with("no_such_tree"));
    /// ```
    #[must_use]
    pub fn path(&self) -> &Path {
        self.kind.path()
    }

    /// Whether the root was missing or named something other than a directory.
    #[must_use]
    pub const fn is_not_a_directory(&self) -> bool {
        matches!(self.kind, WalkErrorKind::NotADirectory { .. })
    }
}

impl From<WalkErrorKind> for WalkError {
    fn from(kind: WalkErrorKind) -> Self {
        Self { kind }
    }
}

impl fmt::Display for WalkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (path, source) = self.kind.parts();
        let what = match self.kind {
            WalkErrorKind::NotADirectory { .. } => "the dir argument must be a directory",
            WalkErrorKind::DirectoryUnreadable { .. } => "cannot list directory",
            WalkErrorKind::ReadDirEntry { .. } => "cannot read an entry of",
            WalkErrorKind::Metadata { .. } => "cannot stat",
            WalkErrorKind::Canonicalize { .. } => "cannot resolve symlinked directory",
        };
        write!(f, "{what}: '{}': {source}", path.display())
    }
}

impl Error for WalkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        Some(self.kind.io_error())
    }
}

/// The step of a walk that failed. Every variant keeps the path involved
/// and the operating-system error.
#[derive(Debug)]
pub enum WalkErrorKind {
    /// The root does not exist or is not a directory.
    NotADirectory {
        /// Root given to the builder.
        path: PathBuf,
        /// Lookup failure, or `NotADirectory` when the root is a file.
        source: io::Error,
    },
    /// A directory accepted by the filter could not be opened.
    DirectoryUnreadable {
        /// The directory.
        path: PathBuf,
        /// Cause.
        source: io::Error,
    },
    /// Listing a directory failed part way through.
    ReadDirEntry {
        /// The directory being listed.
        path: PathBuf,
        /// Cause.
        source: io::Error,
    },
    /// `symlink_metadata` failed for an entry.
    Metadata {
        /// The entry.
        path: PathBuf,
        /// Cause.
        source: io::Error,
    },
    /// A directory could not be canonicalized for symlink loop detection.
    Canonicalize {
        /// The directory.
        path: PathBuf,
        /// Cause.
        source: io::Error,
    },
}

impl WalkErrorKind {
    fn parts(&self) -> (&Path, &io::Error) {
        match self {
            Self::NotADirectory { path, source }
            | Self::DirectoryUnreadable { path, source }
            | Self::ReadDirEntry { path, source }
            | Self::Metadata { path, source }
            | Self::Canonicalize { path, source } => (path, source),
        }
    }

    /// Path the failing step was working on.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.parts().0
    }

    /// Operating-system error behind the failure.
    #[must_use]
    pub fn io_error(&self) -> &io::Error {
        self.parts().1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cause() -> io::Error {
        io::Error::new(io::ErrorKind::PermissionDenied, "denied")
    }

    #[test]
    fn root_that_is_not_a_directory_names_the_argument() {
        let error = WalkError::not_a_directory(PathBuf::from("/srv/app.tar"), cause());
        assert!(error.is_not_a_directory());
        assert_eq!(error.path(), Path::new("/srv/app.tar"));
        assert_eq!(
            error.to_string(),
            "the dir argument must be a directory: '/srv/app.tar': denied"
        );
    }

    #[test]
    fn failures_below_the_root_are_not_root_errors() {
        let errors = [
            WalkError::directory_unreadable(PathBuf::from("/r/locked"), cause()),
            WalkError::read_dir_entry(PathBuf::from("/r/flaky"), cause()),
            WalkError::metadata(PathBuf::from("/r/gone.txt"), cause()),
            WalkError::canonicalize(PathBuf::from("/r/link"), cause()),
        ];
        let rendered: Vec<String> = errors.iter().map(ToString::to_string).collect();

        assert!(errors.iter().all(|error| !error.is_not_a_directory()));
        assert_eq!(
            rendered,
            [
                "cannot list directory: '/r/locked': denied",
                "cannot read an entry of: '/r/flaky': denied",
                "cannot stat: '/r/gone.txt': denied",
                "cannot resolve symlinked directory: '/r/link': denied",
            ]
        );
        assert_eq!(errors[2].kind().path(), Path::new("/r/gone.txt"));
    }

    #[test]
    fn source_is_the_operating_system_error() {
        let error = WalkError::directory_unreadable(PathBuf::from("/r/locked"), cause());
        let source = error
            .source()
            .and_then(|source| source.downcast_ref::<io::Error>())
            .expect("io source");
        assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
        assert_eq!(error.kind().io_error().kind(), io::ErrorKind::PermissionDenied);
    }
}
