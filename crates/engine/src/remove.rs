//! Recursive directory removal.

use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use logging::{debug_log, info_log};

use crate::TreeError;

/// Configures [`remove_tree`].
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct RemoveOptions {
    traverse_symlinks: bool,
}

impl RemoveOptions {
    /// Creates options that unlink directory symlinks without touching their
    /// targets.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            traverse_symlinks: false,
        }
    }

    /// Controls whether the contents of symlinked directories are deleted
    /// before the link itself is removed.
    #[must_use]
    pub const fn with_traverse_symlinks(mut self, traverse: bool) -> Self {
        self.traverse_symlinks = traverse;
        self
    }

    /// Returns whether symlinked directories are emptied.
    #[must_use]
    pub const fn traverse_symlinks(&self) -> bool {
        self.traverse_symlinks
    }
}

enum Step {
    Empty(PathBuf),
    Remove(PathBuf),
}

/// Deletes `dir` and everything below it.
///
/// A missing `dir`, or one that is not a directory, is left alone. Entries
/// that disappear while the removal runs are ignored. When `dir` is itself a
/// symlink to a directory only the link is removed unless
/// [`RemoveOptions::with_traverse_symlinks`] is set.
///
/// # Errors
///
/// Returns [`TreeError::Io`] for the first failure other than a vanished
/// entry; entries already deleted stay deleted.
///
/// # Examples
///
/// ```
/// use engine::{RemoveOptions, remove_tree};
///
/// let temp = tempfile::tempdir().unwrap();
/// let doomed = temp.path().join("doomed");
/// std::fs::create_dir_all(doomed.join("nested")).unwrap();
/// std::fs::write(doomed.join("nested/file"), b"x").unwrap();
///
/// remove_tree(&doomed, &RemoveOptions::new()).unwrap();
/// assert!(!doomed.exists());
///
/// // Removing again is a no-op.
/// remove_tree(&doomed, &RemoveOptions::new()).unwrap();
/// ```
pub fn remove_tree(dir: &Path, options: &RemoveOptions) -> Result<(), TreeError> {
    if !dir.is_dir() {
        debug_log!(Del, 1, "nothing to remove at {}", dir.display());
        return Ok(());
    }

    let is_link = fs::symlink_metadata(dir)
        .map(|metadata| metadata.file_type().is_symlink())
        .map_err(|error| TreeError::io("inspect", dir, error))?;

    let mut visited = HashSet::new();
    let mut steps = vec![Step::Remove(dir.to_path_buf())];
    if options.traverse_symlinks() || !is_link {
        steps.push(Step::Empty(dir.to_path_buf()));
    }

    while let Some(step) = steps.pop() {
        match step {
            Step::Empty(path) => {
                if options.traverse_symlinks() && !first_visit(&mut visited, &path)? {
                    debug_log!(Dup, 1, "already emptied {}", path.display());
                    continue;
                }
                empty_directory(&path, options, &mut steps)?;
            }
            Step::Remove(path) => remove_entry(&path)?,
        }
    }
    Ok(())
}

fn first_visit(visited: &mut HashSet<PathBuf>, path: &Path) -> Result<bool, TreeError> {
    match fs::canonicalize(path) {
        Ok(canonical) => Ok(visited.insert(canonical)),
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(error) => Err(TreeError::io("canonicalize", path, error)),
    }
}

/// Queues the removal of every entry in `dir`, deleting non-directories
/// immediately.
fn empty_directory(
    dir: &Path,
    options: &RemoveOptions,
    steps: &mut Vec<Step>,
) -> Result<(), TreeError> {
    debug_log!(Del, 2, "emptying {}", dir.display());
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(error) => return Err(TreeError::io("read directory", dir, error)),
    };

    for entry in entries {
        let entry = entry.map_err(|error| TreeError::io("read directory", dir, error))?;
        let path = entry.path();
        let file_type = match entry.file_type() {
            Ok(file_type) => file_type,
            Err(error) if error.kind() == io::ErrorKind::NotFound => continue,
            Err(error) => return Err(TreeError::io("inspect", &path, error)),
        };

        if file_type.is_dir() {
            steps.push(Step::Remove(path.clone()));
            steps.push(Step::Empty(path));
        } else if file_type.is_symlink() && options.traverse_symlinks() && path.is_dir() {
            steps.push(Step::Remove(path.clone()));
            steps.push(Step::Empty(path));
        } else {
            remove_entry(&path)?;
        }
    }
    Ok(())
}

/// Removes a single emptied directory, symlink or file.
fn remove_entry(path: &Path) -> Result<(), TreeError> {
    let metadata = match fs::symlink_metadata(path) {
        Ok(metadata) => metadata,
        Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(()),
        Err(error) => return Err(TreeError::io("inspect", path, error)),
    };

    let result = if metadata.is_dir() {
        fs::remove_dir(path)
    } else {
        remove_link_or_file(path, &metadata)
    };

    match result {
        Ok(()) => {
            info_log!(Del, 1, "deleting {}", path.display());
            Ok(())
        }
        Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(error) => Err(TreeError::io("remove", path, error)),
    }
}

#[cfg(windows)]
fn remove_link_or_file(path: &Path, metadata: &fs::Metadata) -> io::Result<()> {
    use std::os::windows::fs::FileTypeExt;

    if metadata.file_type().is_symlink_dir() {
        fs::remove_dir(path)
    } else {
        fs::remove_file(path)
    }
}

#[cfg(not(windows))]
fn remove_link_or_file(path: &Path, _metadata: &fs::Metadata) -> io::Result<()> {
    fs::remove_file(path)
}
