use std::borrow::Cow;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::debug_filter::{FilterTracer, trace_path_decision};
use crate::resolve::resolve_traced;
use crate::{CompiledPattern, PathFilter};

/// Returns the bytes of `path` with `/` as the only separator.
///
/// On Unix the native bytes are returned unchanged. On other platforms the
/// lossy UTF-8 rendering is used and `\` separators are rewritten to `/`.
#[must_use]
pub fn matchable_path(path: &Path) -> Cow<'_, [u8]> {
    #[cfg(unix)]
    {
        use std::os::unix::ffi::OsStrExt;
        Cow::Borrowed(path.as_os_str().as_bytes())
    }
    #[cfg(not(unix))]
    {
        Cow::Owned(path.to_string_lossy().replace('\\', "/").into_bytes())
    }
}

/// Filtering configuration shared by every entry of one walk.
///
/// Patterns are compiled once when added and never recompiled. The
/// `base_path` is fixed by the top-level operation (see
/// [`resolved_for`](Self::resolved_for)) and passed unchanged to every
/// nested directory.
///
/// # Examples
///
/// ```
/// use filters::FilterOptions;
/// use std::path::Path;
///
/// let options = FilterOptions::new()
///     .with_except(["*.log", "!important.log"])
///     .with_base_path("/repo");
///
/// assert!(!options.should_include(Path::new("/repo/debug.log"), false));
/// assert!(options.should_include(Path::new("/repo/important.log"), false));
/// assert!(options.should_include(Path::new("/repo/main.rs"), false));
/// ```
#[derive(Clone)]
pub struct FilterOptions {
    except: Vec<CompiledPattern>,
    only: Vec<CompiledPattern>,
    filter: Option<Arc<dyn PathFilter + Send + Sync>>,
    recursive: bool,
    base_path: Option<PathBuf>,
    case_sensitive: bool,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            except: Vec::new(),
            only: Vec::new(),
            filter: None,
            recursive: true,
            base_path: None,
            case_sensitive: true,
        }
    }
}

impl fmt::Debug for FilterOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterOptions")
            .field("except", &self.except)
            .field("only", &self.only)
            .field("filter", &self.filter.as_ref().map(|_| "<custom>"))
            .field("recursive", &self.recursive)
            .field("base_path", &self.base_path)
            .field("case_sensitive", &self.case_sensitive)
            .finish()
    }
}

impl FilterOptions {
    /// Creates options that include everything and recurse.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends exclusion patterns compiled from raw strings.
    #[must_use]
    pub fn with_except<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let case_sensitive = self.case_sensitive;
        self.except.extend(
            patterns
                .into_iter()
                .map(|raw| CompiledPattern::compile_with_case(raw.as_ref(), case_sensitive)),
        );
        self
    }

    /// Appends inclusion patterns compiled from raw strings.
    #[must_use]
    pub fn with_only<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let case_sensitive = self.case_sensitive;
        self.only.extend(
            patterns
                .into_iter()
                .map(|raw| CompiledPattern::compile_with_case(raw.as_ref(), case_sensitive)),
        );
        self
    }

    /// Appends an already compiled exclusion pattern.
    ///
    /// The pattern keeps its own case sensitivity; a later
    /// [`with_case_sensitive`](Self::with_case_sensitive) overrides it.
    pub fn push_except(&mut self, pattern: CompiledPattern) {
        self.except.push(pattern);
    }

    /// Appends an already compiled inclusion pattern.
    ///
    /// Case sensitivity is handled as in [`push_except`](Self::push_except).
    pub fn push_only(&mut self, pattern: CompiledPattern) {
        self.only.push(pattern);
    }

    /// Installs a custom filter consulted before the pattern lists.
    #[must_use]
    pub fn with_filter<F>(mut self, filter: F) -> Self
    where
        F: PathFilter + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(filter));
        self
    }

    /// Sets whether subdirectories are descended into.
    #[must_use]
    pub const fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Sets the directory that anchored and slash-containing patterns are
    /// relative to.
    #[must_use]
    pub fn with_base_path(mut self, base_path: impl Into<PathBuf>) -> Self {
        self.base_path = Some(base_path.into());
        self
    }

    /// Switches case sensitivity for every pattern, including those already
    /// added.
    #[must_use]
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        for pattern in self.except.iter_mut().chain(self.only.iter_mut()) {
            *pattern = pattern.clone().with_case_sensitive(case_sensitive);
        }
        self
    }

    /// Returns a copy whose base path is `root` unless one was already set.
    #[must_use]
    pub fn resolved_for(&self, root: &Path) -> Self {
        let mut resolved = self.clone();
        if resolved.base_path.is_none() {
            resolved.base_path = Some(root.to_path_buf());
        }
        resolved
    }

    /// Exclusion patterns in declaration order.
    #[must_use]
    pub fn except(&self) -> &[CompiledPattern] {
        &self.except
    }

    /// Inclusion patterns in declaration order.
    #[must_use]
    pub fn only(&self) -> &[CompiledPattern] {
        &self.only
    }

    /// Returns whether subdirectories are descended into.
    #[must_use]
    pub const fn recursive(&self) -> bool {
        self.recursive
    }

    /// Returns the base path, if resolved.
    #[must_use]
    pub fn base_path(&self) -> Option<&Path> {
        self.base_path.as_deref()
    }

    /// Returns whether newly added patterns are case-sensitive.
    #[must_use]
    pub const fn case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    /// Decides whether `path` is part of the result.
    ///
    /// Evaluation order:
    /// 1. a decisive custom filter result is returned as-is;
    /// 2. with no patterns at all the path is included;
    /// 3. the last matching `except` pattern decides (negated means include);
    /// 4. non-directories must match an `only` pattern when any exist.
    ///
    /// Directories are never rejected by `only` so that matching files below
    /// them stay reachable.
    #[must_use]
    pub fn should_include(&self, path: &Path, is_dir: bool) -> bool {
        self.should_include_traced(path, is_dir, &mut FilterTracer::new())
    }

    /// Same as [`should_include`](Self::should_include), recording activity in
    /// `tracer`.
    pub fn should_include_traced(
        &self,
        path: &Path,
        is_dir: bool,
        tracer: &mut FilterTracer,
    ) -> bool {
        let (included, source) = self.evaluate(path, is_dir, tracer);
        tracer.record_decision(included);
        trace_path_decision(&path.to_string_lossy(), included, source);
        logging::debug_log!(
            Filter,
            2,
            "{} {} ({source})",
            if included { "including" } else { "excluding" },
            path.display()
        );
        included
    }

    fn evaluate(
        &self,
        path: &Path,
        is_dir: bool,
        tracer: &mut FilterTracer,
    ) -> (bool, &'static str) {
        if let Some(filter) = &self.filter {
            if let Some(decision) = filter.decide(path).as_bool() {
                return (decision, "custom filter");
            }
        }

        if self.except.is_empty() && self.only.is_empty() {
            return (true, "no patterns");
        }

        let path_bytes = matchable_path(path);
        let base_bytes = self
            .base_path
            .as_deref()
            .map(matchable_path)
            .unwrap_or_default();

        if !self.except.is_empty() {
            if let Some(pattern) =
                resolve_traced(&base_bytes, &path_bytes, is_dir, &self.except, tracer)
            {
                return (pattern.is_negated(), "except");
            }
        }

        if !is_dir && !self.only.is_empty() {
            let matched =
                resolve_traced(&base_bytes, &path_bytes, is_dir, &self.only, tracer).is_some();
            return (matched, "only");
        }

        (true, "default")
    }
}
