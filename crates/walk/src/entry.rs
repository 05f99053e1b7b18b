use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

/// One path accepted by the filter during a walk.
#[derive(Debug)]
pub struct WalkEntry {
    pub(crate) full_path: PathBuf,
    pub(crate) relative_path: PathBuf,
    pub(crate) metadata: fs::Metadata,
    pub(crate) depth: usize,
    pub(crate) is_root: bool,
    pub(crate) is_dir: bool,
}

impl WalkEntry {
    /// Absolute path of the entry.
    ///
    /// Below a followed directory symlink the link stays in the prefix; the
    /// target path never appears.
    #[must_use]
    pub fn full_path(&self) -> &Path {
        &self.full_path
    }

    /// Path below the walk root, empty for the root itself.
    #[must_use]
    pub fn relative_path(&self) -> &Path {
        &self.relative_path
    }

    /// Metadata of the entry as found on disk (`symlink_metadata`).
    #[must_use]
    pub fn metadata(&self) -> &fs::Metadata {
        &self.metadata
    }

    /// Name of the entry within its parent directory, or `None` for the root.
    ///
    /// # Examples
    ///
    /// ```
    /// use walk::WalkBuilder;
    /// # fn demo() -> Result<(), Box<dyn std::error::Error>> {
    /// let temp = tempfile::tempdir()?;
    /// std::fs::write(temp.path().join("notes.txt"), b"")?;
    ///
    /// let mut walker = WalkBuilder::new(temp.path()).include_root(true).build()?;
    /// let root = walker.next().unwrap()?;
    /// assert!(root.file_name().is_none());
    ///
    /// let notes = walker.next().unwrap()?;
    /// assert_eq!(notes.file_name().unwrap(), "notes.txt");
    /// # Ok(())
    /// # }
    /// # demo().unwrap();
    /// ```
    #[must_use]
    pub fn file_name(&self) -> Option<&OsStr> {
        if self.is_root {
            return None;
        }
        self.relative_path.file_name()
    }

    /// Number of components between the root and the entry; the root is `0`.
    #[must_use]
    pub const fn depth(&self) -> usize {
        self.depth
    }

    /// Whether the entry is the walk root.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.is_root
    }

    /// Whether the walk treats the entry as a directory.
    ///
    /// Symlinks count only when symlink following is enabled and the link
    /// resolves to a directory; dangling links are never directories.
    #[must_use]
    pub const fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Whether the entry itself is a symbolic link.
    #[must_use]
    pub fn is_symlink(&self) -> bool {
        self.metadata.file_type().is_symlink()
    }
}
