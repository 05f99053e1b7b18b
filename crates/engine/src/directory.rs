//! Directory creation and path helpers shared by the tree operations.

use std::env;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};

use logging::info_log;

use crate::TreeError;

/// Permission bits applied to directories created by the workspace.
pub const DEFAULT_DIR_MODE: u32 = 0o775;

/// Creates `path` with permission bits `mode`.
///
/// With `recursive` set, missing ancestors are created first, each with the
/// same mode. An existing directory is left untouched. The mode is applied
/// explicitly after creation so the process umask does not narrow it.
///
/// # Errors
///
/// Returns [`TreeError::Io`] when a directory cannot be created or its
/// permissions cannot be set. Losing a creation race to another process is
/// not an error.
///
/// # Examples
///
/// ```
/// use engine::create_directory;
///
/// let temp = tempfile::tempdir().unwrap();
/// let nested = temp.path().join("a/b/c");
/// create_directory(&nested, 0o755, true).unwrap();
/// assert!(nested.is_dir());
/// ```
pub fn create_directory(path: &Path, mode: u32, recursive: bool) -> Result<(), TreeError> {
    let mut missing = Vec::new();
    let mut current = Some(path);
    while let Some(dir) = current {
        if dir.as_os_str().is_empty() || dir.is_dir() {
            break;
        }
        missing.push(dir);
        if !recursive {
            break;
        }
        current = dir.parent();
    }

    for dir in missing.into_iter().rev() {
        match fs::create_dir(dir) {
            Ok(()) => {}
            Err(_) if dir.is_dir() => continue,
            Err(error) => return Err(TreeError::io("create directory", dir, error)),
        }
        set_mode(dir, mode).map_err(|error| TreeError::io("set permissions on", dir, error))?;
        info_log!(Name, 2, "created directory {}", dir.display());
    }
    Ok(())
}

/// Applies Unix permission bits; a no-op on other platforms.
#[cfg(unix)]
pub(crate) fn set_mode(path: &Path, mode: u32) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(mode))
}

#[cfg(not(unix))]
pub(crate) fn set_mode(_path: &Path, _mode: u32) -> io::Result<()> {
    Ok(())
}

/// Makes `path` absolute against the working directory and resolves `.` and
/// `..` components without touching the filesystem.
pub(crate) fn normalize(path: &Path) -> Result<PathBuf, TreeError> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        let cwd = env::current_dir()
            .map_err(|error| TreeError::io("resolve the working directory for", path, error))?;
        cwd.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other.as_os_str()),
        }
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_support::TestDir;

    #[test]
    fn creates_missing_ancestors_when_recursive() {
        let dir = TestDir::new().expect("create test dir");
        let nested = dir.join("a/b/c");
        create_directory(&nested, DEFAULT_DIR_MODE, true).expect("create");
        assert!(nested.is_dir());
    }

    #[test]
    fn non_recursive_fails_without_parent() {
        let dir = TestDir::new().expect("create test dir");
        let nested = dir.join("missing/child");
        let error = create_directory(&nested, DEFAULT_DIR_MODE, false).unwrap_err();
        match error {
            TreeError::Io { action, path, .. } => {
                assert_eq!(action, "create directory");
                assert_eq!(path, nested);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn existing_directory_is_left_alone() {
        let dir = TestDir::new().expect("create test dir");
        create_directory(dir.path(), DEFAULT_DIR_MODE, false).expect("no-op");
    }

    #[cfg(unix)]
    #[test]
    fn mode_is_applied_regardless_of_umask() {
        use std::os::unix::fs::PermissionsExt;

        let dir = TestDir::new().expect("create test dir");
        let target = dir.join("wide/open");
        create_directory(&target, 0o777, true).expect("create");

        for path in [dir.join("wide"), target] {
            let mode = fs::metadata(&path).expect("metadata").permissions().mode();
            assert_eq!(mode & 0o777, 0o777, "{}", path.display());
        }
    }

    #[test]
    fn normalize_resolves_dot_components() {
        let normalized = normalize(Path::new("/a/./b/../c")).expect("normalize");
        assert_eq!(normalized, Path::new("/a/c"));

        let relative = normalize(Path::new("x")).expect("normalize");
        assert!(relative.is_absolute());
        assert!(relative.ends_with("x"));
    }
}
