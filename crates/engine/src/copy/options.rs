use std::fmt;
use std::path::Path;
use std::sync::Arc;

use filters::FilterOptions;

use crate::directory::DEFAULT_DIR_MODE;

/// Hook consulted before an entry is copied; `false` skips the entry.
pub type BeforeCopy = Arc<dyn Fn(&Path, &Path) -> bool + Send + Sync>;
/// Hook notified after an entry is copied.
pub type AfterCopy = Arc<dyn Fn(&Path, &Path) + Send + Sync>;

/// Configures [`copy_tree`](crate::copy_tree).
///
/// # Examples
///
/// ```
/// use engine::CopyOptions;
/// use filters::FilterOptions;
///
/// let options = CopyOptions::new()
///     .with_filter(FilterOptions::new().with_except([".git/"]))
///     .with_dir_mode(0o755)
///     .with_file_mode(0o644)
///     .with_copy_empty_directories(false)
///     .before_copy(|from, _to| !from.ends_with("secret.key"));
///
/// assert_eq!(options.dir_mode(), 0o755);
/// assert_eq!(options.file_mode(), Some(0o644));
/// assert!(!options.copy_empty_directories());
/// ```
#[derive(Clone)]
pub struct CopyOptions {
    filter: FilterOptions,
    dir_mode: u32,
    file_mode: Option<u32>,
    copy_empty_directories: bool,
    follow_symlinks: bool,
    before_copy: Option<BeforeCopy>,
    after_copy: Option<AfterCopy>,
}

impl Default for CopyOptions {
    fn default() -> Self {
        Self {
            filter: FilterOptions::default(),
            dir_mode: DEFAULT_DIR_MODE,
            file_mode: None,
            copy_empty_directories: true,
            follow_symlinks: false,
            before_copy: None,
            after_copy: None,
        }
    }
}

impl fmt::Debug for CopyOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CopyOptions")
            .field("filter", &self.filter)
            .field("dir_mode", &format_args!("{:o}", self.dir_mode))
            .field("file_mode", &self.file_mode.map(|mode| format!("{mode:o}")))
            .field("copy_empty_directories", &self.copy_empty_directories)
            .field("follow_symlinks", &self.follow_symlinks)
            .field("before_copy", &self.before_copy.is_some())
            .field("after_copy", &self.after_copy.is_some())
            .finish()
    }
}

impl CopyOptions {
    /// Creates options with directory mode `0o775`, source file modes kept,
    /// empty directories copied and symlinks recreated as links.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the filter deciding which entries are copied.
    #[must_use]
    pub fn with_filter(mut self, filter: FilterOptions) -> Self {
        self.filter = filter;
        self
    }

    /// Sets the permission bits for created directories.
    #[must_use]
    pub const fn with_dir_mode(mut self, mode: u32) -> Self {
        self.dir_mode = mode;
        self
    }

    /// Sets the permission bits applied to every copied file.
    #[must_use]
    pub const fn with_file_mode(mut self, mode: u32) -> Self {
        self.file_mode = Some(mode);
        self
    }

    /// Controls whether directories without copied files are created.
    #[must_use]
    pub const fn with_copy_empty_directories(mut self, copy: bool) -> Self {
        self.copy_empty_directories = copy;
        self
    }

    /// Controls whether symlinks are dereferenced instead of recreated.
    #[must_use]
    pub const fn with_follow_symlinks(mut self, follow: bool) -> Self {
        self.follow_symlinks = follow;
        self
    }

    /// Installs a hook called with `(from, to)` before each entry.
    ///
    /// Returning `false` skips the entry; for a directory the whole subtree
    /// is skipped.
    #[must_use]
    pub fn before_copy<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Path, &Path) -> bool + Send + Sync + 'static,
    {
        self.before_copy = Some(Arc::new(hook));
        self
    }

    /// Installs a hook called with `(from, to)` after each entry.
    ///
    /// For directories the hook fires once their contents are copied.
    #[must_use]
    pub fn after_copy<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Path, &Path) + Send + Sync + 'static,
    {
        self.after_copy = Some(Arc::new(hook));
        self
    }

    /// Returns the filter.
    #[must_use]
    pub const fn filter(&self) -> &FilterOptions {
        &self.filter
    }

    /// Returns the directory permission bits.
    #[must_use]
    pub const fn dir_mode(&self) -> u32 {
        self.dir_mode
    }

    /// Returns the file permission bits, if overridden.
    #[must_use]
    pub const fn file_mode(&self) -> Option<u32> {
        self.file_mode
    }

    /// Returns whether empty directories are created.
    #[must_use]
    pub const fn copy_empty_directories(&self) -> bool {
        self.copy_empty_directories
    }

    /// Returns whether symlinks are dereferenced.
    #[must_use]
    pub const fn follow_symlinks(&self) -> bool {
        self.follow_symlinks
    }

    pub(crate) fn allows(&self, from: &Path, to: &Path) -> bool {
        self.before_copy.as_ref().is_none_or(|hook| hook(from, to))
    }

    pub(crate) fn notify(&self, from: &Path, to: &Path) {
        if let Some(hook) = &self.after_copy {
            hook(from, to);
        }
    }
}

/// Counters describing a finished copy.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct CopySummary {
    pub(crate) files_copied: u64,
    pub(crate) symlinks_copied: u64,
    pub(crate) directories_copied: u64,
    pub(crate) entries_skipped: u64,
}

impl CopySummary {
    /// Regular files copied (including dereferenced symlinks).
    #[must_use]
    pub const fn files_copied(&self) -> u64 {
        self.files_copied
    }

    /// Symlinks recreated as links.
    #[must_use]
    pub const fn symlinks_copied(&self) -> u64 {
        self.symlinks_copied
    }

    /// Directories visited below the source root.
    #[must_use]
    pub const fn directories_copied(&self) -> u64 {
        self.directories_copied
    }

    /// Entries vetoed by the `before_copy` hook.
    #[must_use]
    pub const fn entries_skipped(&self) -> u64 {
        self.entries_skipped
    }
}
