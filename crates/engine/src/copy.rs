//! Filtered recursive directory copy.

mod options;

pub use options::{AfterCopy, BeforeCopy, CopyOptions, CopySummary};

use std::fs;
use std::path::{Path, PathBuf};

use logging::{debug_log, info_log};
use walk::{WalkBuilder, WalkEntry};

use crate::TreeError;
use crate::directory::{create_directory, normalize, set_mode};

/// Copies the filtered contents of `src` into `dst`.
///
/// `dst` and missing parents are created with the configured directory mode
/// (when empty directories are copied; otherwise on demand). Entries are
/// visited in sorted depth-first order. For each entry that passes the
/// filter, `before_copy` may veto it, then the entry is copied and
/// `after_copy` is notified; for directories the notification follows their
/// contents. With recursion disabled, first-level directories are neither
/// created nor entered but are still reported to both hooks.
///
/// # Errors
///
/// - [`TreeError::InvalidArgument`] when `dst` is `src` or lies inside it;
/// - [`TreeError::Walk`] when `src` is not a directory or a directory cannot
///   be read;
/// - [`TreeError::Io`] when creating, copying or changing permissions fails.
///
/// # Examples
///
/// ```
/// use engine::{CopyOptions, copy_tree};
/// use filters::FilterOptions;
///
/// let temp = tempfile::tempdir().unwrap();
/// let src = temp.path().join("src");
/// std::fs::create_dir_all(src.join("logs")).unwrap();
/// std::fs::write(src.join("main.rs"), b"fn main() {}").unwrap();
/// std::fs::write(src.join("logs/run.log"), b"noise").unwrap();
///
/// let dst = temp.path().join("dst");
/// let options = CopyOptions::new()
///     .with_filter(FilterOptions::new().with_except(["*.log"]));
/// let summary = copy_tree(&src, &dst, &options).unwrap();
///
/// assert_eq!(summary.files_copied(), 1);
/// assert!(dst.join("main.rs").is_file());
/// assert!(dst.join("logs").is_dir());
/// assert!(!dst.join("logs/run.log").exists());
/// ```
pub fn copy_tree(src: &Path, dst: &Path, options: &CopyOptions) -> Result<CopySummary, TreeError> {
    let src = normalize(src)?;
    let dst = normalize(dst)?;
    reject_nested_destination(&src, &dst)?;

    let mut walker = WalkBuilder::new(&src)
        .follow_symlinks(options.follow_symlinks())
        .filter(options.filter().clone())
        .build()?;
    let recursive = walker.options().recursive();

    if options.copy_empty_directories() {
        create_directory(&dst, options.dir_mode(), true)?;
    }

    let mut summary = CopySummary::default();
    let mut open: Vec<OpenDirectory> = Vec::new();

    while let Some(entry) = walker.next() {
        let entry = entry?;
        close_finished(&mut open, entry.depth(), options);

        let from = entry.full_path().to_path_buf();
        let to = dst.join(entry.relative_path());

        if !options.allows(&from, &to) {
            if entry.is_dir() {
                walker.skip_current_dir();
            }
            info_log!(Skip, 1, "skipping {}", entry.relative_path().display());
            summary.entries_skipped += 1;
            continue;
        }

        if entry.is_dir() {
            summary.directories_copied += 1;
            if recursive {
                if options.copy_empty_directories() {
                    create_directory(&to, options.dir_mode(), true)?;
                }
                open.push(OpenDirectory {
                    from,
                    to,
                    depth: entry.depth(),
                });
            } else {
                options.notify(&from, &to);
            }
            continue;
        }

        copy_entry(&entry, &to, options, &mut summary)?;
        info_log!(Copy, 1, "{}", entry.relative_path().display());
        options.notify(&from, &to);
    }

    close_finished(&mut open, 0, options);

    debug_log!(
        Flist,
        1,
        "copied {} files, {} symlinks, {} directories; skipped {}",
        summary.files_copied,
        summary.symlinks_copied,
        summary.directories_copied,
        summary.entries_skipped
    );
    Ok(summary)
}

struct OpenDirectory {
    from: PathBuf,
    to: PathBuf,
    depth: usize,
}

/// Notifies `after_copy` for every open directory at `depth` or deeper.
fn close_finished(open: &mut Vec<OpenDirectory>, depth: usize, options: &CopyOptions) {
    while open.last().is_some_and(|dir| dir.depth >= depth) {
        if let Some(dir) = open.pop() {
            options.notify(&dir.from, &dir.to);
        }
    }
}

fn reject_nested_destination(src: &Path, dst: &Path) -> Result<(), TreeError> {
    let nested = dst.starts_with(src)
        || match (fs::canonicalize(src), canonicalize_existing_prefix(dst)) {
            (Ok(src), Some(dst)) => dst.starts_with(src),
            _ => false,
        };
    if nested {
        return Err(TreeError::invalid_argument(format!(
            "trying to copy '{}' to itself or a subdirectory '{}'",
            src.display(),
            dst.display()
        )));
    }
    Ok(())
}

/// Canonicalizes the longest existing ancestor of `path` and re-appends the
/// remaining components.
fn canonicalize_existing_prefix(path: &Path) -> Option<PathBuf> {
    let mut existing = path;
    let mut rest = Vec::new();
    loop {
        if let Ok(canonical) = fs::canonicalize(existing) {
            return Some(rest.iter().rev().fold(canonical, |acc, name| acc.join(name)));
        }
        rest.push(existing.file_name()?);
        existing = existing.parent()?;
    }
}

fn copy_entry(
    entry: &WalkEntry,
    to: &Path,
    options: &CopyOptions,
    summary: &mut CopySummary,
) -> Result<(), TreeError> {
    let from = entry.full_path();
    if let Some(parent) = to.parent() {
        create_directory(parent, options.dir_mode(), true)?;
    }

    if entry.is_symlink() && !options.follow_symlinks() {
        copy_symlink(from, to)?;
        summary.symlinks_copied += 1;
        return Ok(());
    }

    fs::copy(from, to).map_err(|error| TreeError::io("copy", from, error))?;
    if let Some(mode) = options.file_mode() {
        set_mode(to, mode).map_err(|error| TreeError::io("set permissions on", to, error))?;
    }
    summary.files_copied += 1;
    Ok(())
}

#[cfg(unix)]
fn copy_symlink(from: &Path, to: &Path) -> Result<(), TreeError> {
    let target = fs::read_link(from).map_err(|error| TreeError::io("read link", from, error))?;
    match fs::symlink_metadata(to) {
        Ok(existing) if !existing.is_dir() => {
            fs::remove_file(to).map_err(|error| TreeError::io("replace", to, error))?;
        }
        Ok(_) => {}
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => {}
        Err(error) => return Err(TreeError::io("inspect", to, error)),
    }
    std::os::unix::fs::symlink(&target, to)
        .map_err(|error| TreeError::io("create link", to, error))
}

#[cfg(not(unix))]
fn copy_symlink(from: &Path, to: &Path) -> Result<(), TreeError> {
    fs::copy(from, to)
        .map(|_| ())
        .map_err(|error| TreeError::io("copy", from, error))
}
