use std::path::{Path, PathBuf};

use filters::FilterOptions;
use logging::info_log;
use walk::WalkBuilder;

use crate::TreeError;

/// Returns every file below `root` that passes `options`, sorted.
///
/// Paths are absolute. Directories drive the traversal but are not part of
/// the result; symbolic links are reported as files and never followed.
///
/// # Errors
///
/// Returns [`TreeError::Walk`] when `root` is missing or not a directory, or
/// when any directory below it cannot be read. No partial list is returned.
///
/// # Examples
///
/// ```
/// use filters::FilterOptions;
///
/// let temp = tempfile::tempdir().unwrap();
/// std::fs::write(temp.path().join("a.php"), b"").unwrap();
/// std::fs::write(temp.path().join("b.txt"), b"").unwrap();
///
/// let options = FilterOptions::new().with_only(["*.php"]);
/// let files = engine::list_files(temp.path(), &options).unwrap();
/// assert_eq!(files.len(), 1);
/// assert!(files[0].ends_with("a.php"));
/// ```
pub fn list_files(root: &Path, options: &FilterOptions) -> Result<Vec<PathBuf>, TreeError> {
    collect(root, options, false)
}

/// Returns every directory below `root` that passes `options`, sorted.
///
/// The root itself is not included. Directories rejected by the filter are
/// not descended, so nothing below them is reported.
///
/// # Errors
///
/// Same as [`list_files`].
pub fn find_directories(root: &Path, options: &FilterOptions) -> Result<Vec<PathBuf>, TreeError> {
    collect(root, options, true)
}

fn collect(
    root: &Path,
    options: &FilterOptions,
    directories: bool,
) -> Result<Vec<PathBuf>, TreeError> {
    let walker = WalkBuilder::new(root).filter(options.clone()).build()?;

    let mut found = Vec::new();
    for entry in walker {
        let entry = entry?;
        if entry.is_dir() == directories {
            info_log!(Name, 2, "{}", entry.relative_path().display());
            found.push(entry.full_path().to_path_buf());
        }
    }
    found.sort();

    info_log!(
        Flist,
        1,
        "{} {} found below {}",
        found.len(),
        if directories { "directories" } else { "files" },
        root.display()
    );
    Ok(found)
}
