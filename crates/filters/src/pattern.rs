use std::ffi::OsStr;
use std::fmt;

use crate::FilterError;
use crate::debug_filter::trace_pattern_compiled;

/// Bytes that start wildcard syntax inside a pattern.
const WILDCARD_BYTES: [u8; 4] = [b'*', b'?', b'[', b'\\'];

/// Returns the byte offset of the leftmost wildcard metacharacter.
#[must_use]
pub fn first_wildcard_in(pattern: &str) -> Option<usize> {
    pattern
        .bytes()
        .position(|byte| WILDCARD_BYTES.contains(&byte))
}

/// Flag set carried by a [`CompiledPattern`].
///
/// Used with [`CompiledPattern::from_parts`] to rebuild a record that was
/// compiled elsewhere (for example deserialised from a cache).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct PatternFlags {
    /// Pattern was prefixed with `!`.
    pub negated: bool,
    /// Pattern ended with `/` and only applies to directories.
    pub directory_only: bool,
    /// Pattern contains no `/` and matches basenames at any depth.
    pub no_directory: bool,
    /// Pattern is `*` followed by a wildcard-free literal.
    pub ends_with_literal: bool,
    /// Literal comparisons are case-sensitive.
    pub case_sensitive: bool,
}

impl Default for PatternFlags {
    fn default() -> Self {
        Self {
            negated: false,
            directory_only: false,
            no_directory: false,
            ends_with_literal: false,
            case_sensitive: true,
        }
    }
}

/// Immutable, pre-analysed form of a single ignore-file pattern.
///
/// Compilation strips the `!` prefix and the trailing `/`, records whether the
/// remaining body contains a slash, and precomputes the offset of the first
/// wildcard so matching can compare a literal prefix before falling back to
/// glob evaluation. A leading `/` stays in the body; it anchors the pattern to
/// the walk root and is consumed at match time.
///
/// # Examples
///
/// ```
/// use filters::CompiledPattern;
///
/// let pattern = CompiledPattern::compile("!logs/*.log");
/// assert!(pattern.is_negated());
/// assert!(!pattern.is_no_directory());
/// assert_eq!(pattern.pattern(), "logs/*.log");
/// assert_eq!(pattern.first_wildcard(), Some(5));
/// assert_eq!(pattern.original(), "!logs/*.log");
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct CompiledPattern {
    pattern: String,
    flags: PatternFlags,
    first_wildcard: Option<usize>,
}

impl CompiledPattern {
    /// Compiles `raw` with case-sensitive matching.
    #[must_use]
    pub fn compile(raw: &str) -> Self {
        Self::compile_with_case(raw, true)
    }

    /// Compiles `raw`, choosing whether literal comparisons fold ASCII case.
    #[must_use]
    pub fn compile_with_case(raw: &str, case_sensitive: bool) -> Self {
        let mut flags = PatternFlags {
            case_sensitive,
            ..PatternFlags::default()
        };
        let mut body = raw;

        if let Some(rest) = body.strip_prefix('!') {
            flags.negated = true;
            body = rest;
        }
        if let Some(rest) = body.strip_suffix('/') {
            flags.directory_only = true;
            body = rest;
        }
        flags.no_directory = !body.contains('/');

        let first_wildcard = first_wildcard_in(body);
        flags.ends_with_literal = body
            .strip_prefix('*')
            .is_some_and(|rest| first_wildcard_in(rest).is_none());

        trace_pattern_compiled(raw, flags.negated, flags.directory_only);
        logging::debug_log!(
            Filter,
            3,
            "compiled pattern {raw:?}: body={body:?} wildcard={first_wildcard:?} flags={flags:?}"
        );

        Self {
            pattern: body.to_owned(),
            flags,
            first_wildcard,
        }
    }

    /// Compiles a pattern received as an OS string at an API boundary.
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidPattern`] when `raw` is not valid UTF-8.
    pub fn from_os_str(raw: &OsStr, case_sensitive: bool) -> Result<Self, FilterError> {
        let text = raw.to_str().ok_or_else(|| {
            FilterError::invalid_pattern(raw.to_string_lossy(), "pattern is not valid UTF-8")
        })?;
        Ok(Self::compile_with_case(text, case_sensitive))
    }

    /// Rebuilds a record from pre-computed parts, validating consistency.
    ///
    /// `pattern` is the stripped body as produced by [`compile`](Self::compile).
    ///
    /// # Errors
    ///
    /// Returns [`FilterError::InvalidPattern`] when the wildcard offset does
    /// not point at the first wildcard of `pattern`, when `no_directory`
    /// disagrees with the presence of `/`, or when `ends_with_literal` is set
    /// for a body that is not `*` followed by a wildcard-free literal.
    pub fn from_parts(
        pattern: impl Into<String>,
        flags: PatternFlags,
        first_wildcard: Option<usize>,
    ) -> Result<Self, FilterError> {
        let pattern = pattern.into();

        let expected = first_wildcard_in(&pattern);
        if first_wildcard != expected {
            let reason = format!(
                "first wildcard offset {first_wildcard:?} does not match pattern (expected {expected:?})"
            );
            return Err(FilterError::invalid_pattern(pattern, reason));
        }
        if flags.no_directory == pattern.contains('/') {
            let reason = if flags.no_directory {
                "no-directory flag set on a pattern containing '/'"
            } else {
                "no-directory flag missing on a pattern without '/'"
            };
            return Err(FilterError::invalid_pattern(pattern, reason));
        }
        if flags.ends_with_literal
            && !pattern
                .strip_prefix('*')
                .is_some_and(|rest| first_wildcard_in(rest).is_none())
        {
            return Err(FilterError::invalid_pattern(
                pattern,
                "ends-with-literal flag requires '*' followed by a wildcard-free literal",
            ));
        }

        Ok(Self {
            pattern,
            flags,
            first_wildcard,
        })
    }

    /// Returns a copy with the case sensitivity replaced.
    #[must_use]
    pub fn with_case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.flags.case_sensitive = case_sensitive;
        self
    }

    /// Returns the glob body with `!` and trailing `/` removed.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the full flag set.
    #[must_use]
    pub const fn flags(&self) -> PatternFlags {
        self.flags
    }

    /// Returns whether the pattern re-includes matching paths.
    #[must_use]
    pub const fn is_negated(&self) -> bool {
        self.flags.negated
    }

    /// Returns whether the pattern only applies to directories.
    #[must_use]
    pub const fn is_directory_only(&self) -> bool {
        self.flags.directory_only
    }

    /// Returns whether the pattern is matched against basenames at any depth.
    #[must_use]
    pub const fn is_no_directory(&self) -> bool {
        self.flags.no_directory
    }

    /// Returns whether the suffix fast path applies.
    #[must_use]
    pub const fn ends_with_literal(&self) -> bool {
        self.flags.ends_with_literal
    }

    /// Returns whether literal comparisons are case-sensitive.
    #[must_use]
    pub const fn is_case_sensitive(&self) -> bool {
        self.flags.case_sensitive
    }

    /// Returns the byte offset of the first wildcard, if any.
    #[must_use]
    pub const fn first_wildcard(&self) -> Option<usize> {
        self.first_wildcard
    }

    /// Returns whether the pattern is anchored to the walk root.
    #[must_use]
    pub fn is_anchored(&self) -> bool {
        self.pattern.starts_with('/')
    }

    /// Re-derives the raw pattern text by reinserting `!` and `/`.
    #[must_use]
    pub fn original(&self) -> String {
        let mut raw = String::with_capacity(self.pattern.len() + 2);
        if self.flags.negated {
            raw.push('!');
        }
        raw.push_str(&self.pattern);
        if self.flags.directory_only {
            raw.push('/');
        }
        raw
    }
}

impl fmt::Display for CompiledPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original())
    }
}

impl From<&str> for CompiledPattern {
    fn from(raw: &str) -> Self {
        Self::compile(raw)
    }
}
