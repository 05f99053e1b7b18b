use crate::entry::WalkEntry;
use crate::error::WalkError;
use filters::FilterOptions;
use filters::debug_filter::FilterTracer;
use logging::debug_log;
use std::collections::HashSet;
use std::env;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::vec;

/// Depth-first iterator over the filtered entries of a directory tree.
///
/// Each directory is listed completely and its handle closed before any of
/// its entries are yielded. A directory that passes the filter is only read
/// when the iterator advances past it, so [`skip_current_dir`] can prune it
/// without touching the filesystem.
///
/// [`skip_current_dir`]: Walker::skip_current_dir
pub struct Walker {
    root: PathBuf,
    follow_symlinks: bool,
    options: FilterOptions,
    root_entry: Option<WalkEntry>,
    stack: Vec<DirectoryState>,
    pending: Option<PendingDirectory>,
    visited: HashSet<PathBuf>,
    tracer: FilterTracer,
    finished: bool,
}

struct PendingDirectory {
    fs_path: PathBuf,
    relative_path: PathBuf,
    depth: usize,
}

impl Walker {
    pub(crate) fn new(
        root: PathBuf,
        follow_symlinks: bool,
        include_root: bool,
        options: FilterOptions,
    ) -> Result<Self, WalkError> {
        let root = absolutize(root)?;
        debug_log!(Flist, 1, "building file list from {}", root.display());

        let target = fs::metadata(&root)
            .map_err(|error| WalkError::not_a_directory(root.clone(), error))?;
        if !target.is_dir() {
            return Err(WalkError::not_a_directory(
                root,
                io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
            ));
        }

        let root_entry = if include_root {
            let metadata = fs::symlink_metadata(&root)
                .map_err(|error| WalkError::metadata(root.clone(), error))?;
            Some(WalkEntry {
                full_path: root.clone(),
                relative_path: PathBuf::new(),
                metadata,
                depth: 0,
                is_root: true,
                is_dir: true,
            })
        } else {
            None
        };

        let mut walker = Self {
            options: options.resolved_for(&root),
            root,
            follow_symlinks,
            root_entry,
            stack: Vec::new(),
            pending: None,
            visited: HashSet::new(),
            tracer: FilterTracer::new(),
            finished: false,
        };
        walker.push_directory(walker.root.clone(), PathBuf::new(), 0)?;
        Ok(walker)
    }

    /// Returns the absolute traversal root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Returns the filter options in effect, with the base path resolved.
    #[must_use]
    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Returns filter counters accumulated so far.
    #[must_use]
    pub const fn tracer(&self) -> &FilterTracer {
        &self.tracer
    }

    /// Prevents descent into the directory yielded by the last call to
    /// `next`.
    ///
    /// Has no effect when the last entry was not a directory.
    pub fn skip_current_dir(&mut self) {
        if let Some(pending) = self.pending.take() {
            debug_log!(
                Flist,
                2,
                "skipping directory {}",
                pending.relative_path.display()
            );
        }
    }

    fn push_directory(
        &mut self,
        fs_path: PathBuf,
        relative_path: PathBuf,
        depth: usize,
    ) -> Result<(), WalkError> {
        if self.follow_symlinks {
            let canonical = fs::canonicalize(&fs_path)
                .map_err(|error| WalkError::canonicalize(fs_path.clone(), error))?;
            if !self.visited.insert(canonical) {
                debug_log!(
                    Dup,
                    1,
                    "skipping already visited directory: {}",
                    fs_path.display()
                );
                return Ok(());
            }
        }

        debug_log!(Flist, 3, "entering directory: {}", fs_path.display());
        let state = DirectoryState::new(fs_path, relative_path, depth)?;
        self.stack.push(state);
        Ok(())
    }

    fn prepare_entry(
        &mut self,
        full_path: PathBuf,
        relative_path: PathBuf,
        depth: usize,
    ) -> Result<Option<WalkEntry>, WalkError> {
        debug_log!(Flist, 4, "processing entry: {}", relative_path.display());

        let metadata = fs::symlink_metadata(&full_path)
            .map_err(|error| WalkError::metadata(full_path.clone(), error))?;
        let file_type = metadata.file_type();
        let is_dir = if file_type.is_dir() {
            true
        } else if file_type.is_symlink() && self.follow_symlinks {
            match fs::metadata(&full_path) {
                Ok(target) => target.is_dir(),
                Err(error) if error.kind() == io::ErrorKind::NotFound => false,
                Err(error) => return Err(WalkError::metadata(full_path, error)),
            }
        } else {
            false
        };

        if !self
            .options
            .should_include_traced(&full_path, is_dir, &mut self.tracer)
        {
            debug_log!(Flist, 2, "excluded {}", relative_path.display());
            return Ok(None);
        }

        if is_dir && self.options.recursive() {
            self.pending = Some(PendingDirectory {
                fs_path: full_path.clone(),
                relative_path: relative_path.clone(),
                depth,
            });
        }

        Ok(Some(WalkEntry {
            full_path,
            relative_path,
            metadata,
            depth,
            is_root: false,
            is_dir,
        }))
    }

    fn fail(&mut self, error: WalkError) -> Option<Result<WalkEntry, WalkError>> {
        self.finished = true;
        self.stack.clear();
        self.pending = None;
        Some(Err(error))
    }

    fn finish(&mut self) {
        self.finished = true;
        self.tracer.summary();
        debug_log!(Flist, 1, "finished walking {}", self.root.display());
    }
}

impl Iterator for Walker {
    type Item = Result<WalkEntry, WalkError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if let Some(entry) = self.root_entry.take() {
            return Some(Ok(entry));
        }

        if let Some(pending) = self.pending.take() {
            if let Err(error) =
                self.push_directory(pending.fs_path, pending.relative_path, pending.depth)
            {
                return self.fail(error);
            }
        }

        loop {
            let Some(state) = self.stack.last_mut() else {
                self.finish();
                return None;
            };

            let Some(name) = state.next_name() else {
                self.stack.pop();
                continue;
            };
            let full_path = state.fs_path.join(&name);
            let relative_path = state.relative_path.join(&name);
            let depth = state.depth + 1;

            match self.prepare_entry(full_path, relative_path, depth) {
                Ok(Some(entry)) => return Some(Ok(entry)),
                Ok(None) => {}
                Err(error) => return self.fail(error),
            }
        }
    }
}

struct DirectoryState {
    fs_path: PathBuf,
    relative_path: PathBuf,
    entries: vec::IntoIter<OsString>,
    depth: usize,
}

impl DirectoryState {
    fn new(fs_path: PathBuf, relative_path: PathBuf, depth: usize) -> Result<Self, WalkError> {
        let mut entries = Vec::new();
        let read_dir = fs::read_dir(&fs_path)
            .map_err(|error| WalkError::directory_unreadable(fs_path.clone(), error))?;
        for entry in read_dir {
            let entry = entry.map_err(|error| WalkError::read_dir_entry(fs_path.clone(), error))?;
            entries.push(entry.file_name());
        }
        entries.sort();

        debug_log!(
            Flist,
            3,
            "found {} entries in {}",
            entries.len(),
            fs_path.display()
        );

        Ok(Self {
            fs_path,
            relative_path,
            entries: entries.into_iter(),
            depth,
        })
    }

    fn next_name(&mut self) -> Option<OsString> {
        self.entries.next()
    }
}

fn absolutize(path: PathBuf) -> Result<PathBuf, WalkError> {
    if path.is_absolute() {
        Ok(path)
    } else {
        let cwd = env::current_dir()
            .map_err(|error| WalkError::canonicalize(PathBuf::from("."), error))?;
        Ok(cwd.join(path))
    }
}
