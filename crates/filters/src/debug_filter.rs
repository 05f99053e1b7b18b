//! Structured tracing for pattern compilation and evaluation.
//!
//! All functions are compiled to no-ops unless the `tracing` feature is
//! enabled, so call sites stay unconditional.
//!
//! # Examples
//!
//! ```rust,ignore
//! use filters::debug_filter::{FilterTracer, trace_pattern_evaluate};
//!
//! let mut tracer = FilterTracer::new();
//! trace_pattern_evaluate("src/a.tmp", "*.tmp", false, true);
//! tracer.record_evaluation(true);
//! tracer.summary();
//! ```

/// Target name for tracing events.
#[cfg(feature = "tracing")]
const FILTER_TARGET: &str = "treesift::debug::filter";

/// Traces a pattern being compiled.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_pattern_compiled(raw: &str, negated: bool, directory_only: bool) {
    tracing::trace!(
        target: FILTER_TARGET,
        raw = %raw,
        negated = negated,
        directory_only = directory_only,
        "pattern_compiled"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_pattern_compiled(_raw: &str, _negated: bool, _directory_only: bool) {}

/// Traces evaluation of one path against one pattern.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_pattern_evaluate(path: &str, pattern: &str, negated: bool, matched: bool) {
    tracing::trace!(
        target: FILTER_TARGET,
        path = %path,
        pattern = %pattern,
        negated = negated,
        matched = matched,
        "pattern_evaluate"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_pattern_evaluate(_path: &str, _pattern: &str, _negated: bool, _matched: bool) {}

/// Traces the final include/exclude decision for a path.
#[cfg(feature = "tracing")]
#[inline]
pub fn trace_path_decision(path: &str, included: bool, source: &'static str) {
    tracing::debug!(
        target: FILTER_TARGET,
        path = %path,
        included = included,
        source = source,
        "path_decision"
    );
}

/// No-op when tracing is disabled.
#[cfg(not(feature = "tracing"))]
#[inline]
pub fn trace_path_decision(_path: &str, _included: bool, _source: &'static str) {}

/// Counters summarising filter activity over one walk.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct FilterTracer {
    evaluations: u64,
    matches: u64,
    included: u64,
    excluded: u64,
}

impl FilterTracer {
    /// Creates an empty tracer.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            evaluations: 0,
            matches: 0,
            included: 0,
            excluded: 0,
        }
    }

    /// Records one pattern evaluation.
    pub fn record_evaluation(&mut self, matched: bool) {
        self.evaluations += 1;
        if matched {
            self.matches += 1;
        }
    }

    /// Records a final decision.
    pub fn record_decision(&mut self, included: bool) {
        if included {
            self.included += 1;
        } else {
            self.excluded += 1;
        }
    }

    /// Number of pattern evaluations recorded.
    #[must_use]
    pub const fn evaluations(&self) -> u64 {
        self.evaluations
    }

    /// Number of evaluations that matched.
    #[must_use]
    pub const fn matches(&self) -> u64 {
        self.matches
    }

    /// Number of paths included.
    #[must_use]
    pub const fn included(&self) -> u64 {
        self.included
    }

    /// Number of paths excluded.
    #[must_use]
    pub const fn excluded(&self) -> u64 {
        self.excluded
    }

    /// Emits the counters as a single debug diagnostic.
    pub fn summary(&self) {
        logging::debug_log!(
            Filter,
            1,
            "filter summary: {} evaluations, {} matches, {} included, {} excluded",
            self.evaluations,
            self.matches,
            self.included,
            self.excluded
        );
    }
}
