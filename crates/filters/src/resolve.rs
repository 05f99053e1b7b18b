use crate::CompiledPattern;
use crate::debug_filter::{FilterTracer, trace_pattern_evaluate};
use crate::matcher::{basename, match_basename, match_path};

/// Finds the highest-precedence pattern matching `path`.
///
/// Patterns are scanned from last to first, so a later declaration overrides
/// an earlier one. Directory-only patterns are skipped when `is_dir` is
/// false. Slash-free patterns are checked against the basename of `path`;
/// all others against the part of `path` below `base_path`.
///
/// Returns `None` when no pattern matches, leaving the decision to the
/// caller.
///
/// # Examples
///
/// ```
/// use filters::{CompiledPattern, last_matching_pattern};
///
/// let patterns = [
///     CompiledPattern::compile("*.log"),
///     CompiledPattern::compile("!important.log"),
/// ];
/// let hit = last_matching_pattern(b"/r", b"/r/important.log", false, &patterns)
///     .expect("a pattern matches");
/// assert!(hit.is_negated());
/// ```
#[must_use]
pub fn last_matching_pattern<'a>(
    base_path: &[u8],
    path: &[u8],
    is_dir: bool,
    patterns: &'a [CompiledPattern],
) -> Option<&'a CompiledPattern> {
    resolve_traced(base_path, path, is_dir, patterns, &mut FilterTracer::new())
}

pub(crate) fn resolve_traced<'a>(
    base_path: &[u8],
    path: &[u8],
    is_dir: bool,
    patterns: &'a [CompiledPattern],
    tracer: &mut FilterTracer,
) -> Option<&'a CompiledPattern> {
    patterns.iter().rev().find(|pattern| {
        if pattern.is_directory_only() && !is_dir {
            return false;
        }

        let matched = if pattern.is_no_directory() {
            match_basename(basename(path), pattern)
        } else {
            match_path(path, base_path, pattern)
        };

        tracer.record_evaluation(matched);
        trace_pattern_evaluate(
            &String::from_utf8_lossy(path),
            pattern.pattern(),
            pattern.is_negated(),
            matched,
        );
        matched
    })
}
