#![deny(unsafe_code)]
#![deny(missing_docs)]

//! Scratch directory helpers shared by the workspace test suites.
//!
//! [`TestDir`] owns a temporary directory that is removed on drop and offers
//! relative-path helpers. [`FileTree`] describes a set of files and empty
//! directories that can be materialised inside a [`TestDir`] in one call.
//!
//! ```
//! use test_support::{FileTree, TestDir};
//!
//! let dir = TestDir::new().expect("create test dir");
//! let mut tree = FileTree::new();
//! tree.text_file("a.txt", "a").text_file("sub/b.txt", "b").dir("empty");
//! tree.create_in(&dir).expect("create tree");
//!
//! assert!(dir.exists("sub/b.txt"));
//! assert_eq!(dir.relative_files(), vec!["a.txt", "sub/b.txt"]);
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Temporary directory removed when dropped.
#[derive(Debug)]
pub struct TestDir {
    inner: TempDir,
}

impl TestDir {
    /// Creates a fresh, empty directory.
    ///
    /// # Errors
    ///
    /// Fails when the temporary directory cannot be created.
    pub fn new() -> io::Result<Self> {
        Ok(Self {
            inner: tempfile::tempdir()?,
        })
    }

    /// Absolute path of the directory.
    #[must_use]
    pub fn path(&self) -> &Path {
        self.inner.path()
    }

    /// Joins `relative` onto the directory path.
    #[must_use]
    pub fn join(&self, relative: impl AsRef<Path>) -> PathBuf {
        self.path().join(relative)
    }

    /// Creates `relative` and any missing parents, returning the full path.
    ///
    /// # Errors
    ///
    /// Propagates directory creation failures.
    pub fn mkdir(&self, relative: impl AsRef<Path>) -> io::Result<PathBuf> {
        let path = self.join(relative);
        fs::create_dir_all(&path)?;
        Ok(path)
    }

    /// Writes `contents` to `relative`, creating parent directories.
    ///
    /// # Errors
    ///
    /// Propagates directory creation and write failures.
    pub fn write_file(&self, relative: impl AsRef<Path>, contents: &[u8]) -> io::Result<PathBuf> {
        let path = self.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Reads the file at `relative`.
    ///
    /// # Errors
    ///
    /// Propagates read failures.
    pub fn read_file(&self, relative: impl AsRef<Path>) -> io::Result<Vec<u8>> {
        fs::read(self.join(relative))
    }

    /// Returns whether `relative` exists, following symlinks.
    #[must_use]
    pub fn exists(&self, relative: impl AsRef<Path>) -> bool {
        self.join(relative).exists()
    }

    /// Creates a symbolic link at `link` pointing to `target`.
    ///
    /// # Errors
    ///
    /// Propagates link creation failures.
    #[cfg(unix)]
    pub fn symlink(&self, target: impl AsRef<Path>, link: impl AsRef<Path>) -> io::Result<PathBuf> {
        let path = self.join(link);
        std::os::unix::fs::symlink(target, &path)?;
        Ok(path)
    }

    /// Lists every non-directory below the root as sorted `/`-separated
    /// relative paths.
    #[must_use]
    pub fn relative_files(&self) -> Vec<String> {
        relative_files(self.path())
    }
}

/// Lists every non-directory below `root` as sorted `/`-separated relative
/// paths. Unreadable directories are skipped.
#[must_use]
pub fn relative_files(root: &Path) -> Vec<String> {
    let mut found = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        let Ok(entries) = fs::read_dir(&dir) else {
            continue;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            let is_dir = entry.file_type().is_ok_and(|kind| kind.is_dir());
            if is_dir {
                pending.push(path);
            } else if let Ok(relative) = path.strip_prefix(root) {
                found.push(relative_string(relative));
            }
        }
    }
    found.sort();
    found
}

/// Renders `path` with `/` separators regardless of platform.
#[must_use]
pub fn relative_string(path: &Path) -> String {
    path.components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[derive(Clone, Debug)]
enum Node {
    File(Vec<u8>),
    Dir,
}

/// Declarative description of files and directories to create.
#[derive(Clone, Debug, Default)]
pub struct FileTree {
    nodes: Vec<(PathBuf, Node)>,
}

impl FileTree {
    /// Creates an empty description.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file with binary contents.
    pub fn file(&mut self, relative: impl Into<PathBuf>, contents: &[u8]) -> &mut Self {
        self.nodes.push((relative.into(), Node::File(contents.to_vec())));
        self
    }

    /// Adds a file with text contents.
    pub fn text_file(&mut self, relative: impl Into<PathBuf>, contents: &str) -> &mut Self {
        self.file(relative, contents.as_bytes())
    }

    /// Adds an empty directory.
    pub fn dir(&mut self, relative: impl Into<PathBuf>) -> &mut Self {
        self.nodes.push((relative.into(), Node::Dir));
        self
    }

    /// Materialises the description below `dir`.
    ///
    /// # Errors
    ///
    /// Propagates creation failures.
    pub fn create_in(&self, dir: &TestDir) -> io::Result<()> {
        self.create_at(dir.path())
    }

    /// Materialises the description below `root`.
    ///
    /// # Errors
    ///
    /// Propagates creation failures.
    pub fn create_at(&self, root: &Path) -> io::Result<()> {
        for (relative, node) in &self.nodes {
            let path = root.join(relative);
            match node {
                Node::Dir => fs::create_dir_all(&path)?,
                Node::File(contents) => {
                    if let Some(parent) = path.parent() {
                        fs::create_dir_all(parent)?;
                    }
                    fs::write(&path, contents)?;
                }
            }
        }
        Ok(())
    }
}
