use crate::error::WalkError;
use crate::walker::Walker;
use filters::FilterOptions;
use std::path::PathBuf;

/// Configures a filesystem traversal rooted at a specific path.
///
/// The root must be a directory (a symlink to one is accepted). Filtering,
/// recursion and the pattern base path come from the attached
/// [`FilterOptions`]; when no base path is set there, the absolute root is
/// used.
#[derive(Clone, Debug)]
pub struct WalkBuilder {
    root: PathBuf,
    follow_symlinks: bool,
    include_root: bool,
    options: FilterOptions,
}

impl WalkBuilder {
    /// Creates a new builder that will traverse the provided root path.
    #[must_use]
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self {
            root: root.into(),
            follow_symlinks: false,
            include_root: false,
            options: FilterOptions::default(),
        }
    }

    /// Configures whether directory symlinks below the root are traversed.
    ///
    /// The walker always yields the symlink entry itself. When enabled and the
    /// symlink points to a directory, the walker also descends into it while
    /// keeping the link in emitted paths. Canonical paths are tracked to
    /// prevent infinite loops.
    #[must_use]
    pub const fn follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Controls whether the root entry is yielded first.
    ///
    /// The root is never subject to filtering.
    #[must_use]
    pub const fn include_root(mut self, include: bool) -> Self {
        self.include_root = include;
        self
    }

    /// Sets the filter applied to every entry below the root.
    #[must_use]
    pub fn filter(mut self, options: FilterOptions) -> Self {
        self.options = options;
        self
    }

    /// Builds a [`Walker`] using the configured options.
    ///
    /// # Errors
    ///
    /// Returns a `NotADirectory` error when the root is missing or is not a
    /// directory, and `DirectoryUnreadable` when the root cannot be listed.
    pub fn build(self) -> Result<Walker, WalkError> {
        Walker::new(
            self.root,
            self.follow_symlinks,
            self.include_root,
            self.options,
        )
    }
}
