use std::path::Path;

/// Outcome of evaluating a custom filter for one path.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum MatchDecision {
    /// Include the path; pattern lists are not consulted.
    Include,
    /// Exclude the path; pattern lists are not consulted.
    Exclude,
    /// Defer to the `except`/`only` pattern lists.
    #[default]
    Undecided,
}

impl MatchDecision {
    /// Returns `Some(true)` for include, `Some(false)` for exclude.
    #[must_use]
    pub const fn as_bool(self) -> Option<bool> {
        match self {
            Self::Include => Some(true),
            Self::Exclude => Some(false),
            Self::Undecided => None,
        }
    }

    /// Returns whether the decision short-circuits pattern evaluation.
    #[must_use]
    pub const fn is_decisive(self) -> bool {
        !matches!(self, Self::Undecided)
    }
}

impl From<bool> for MatchDecision {
    fn from(include: bool) -> Self {
        if include { Self::Include } else { Self::Exclude }
    }
}

impl From<Option<bool>> for MatchDecision {
    fn from(decision: Option<bool>) -> Self {
        decision.map_or(Self::Undecided, Self::from)
    }
}

/// Caller-supplied predicate evaluated before the pattern lists.
///
/// Closures of type `Fn(&Path) -> MatchDecision` implement the trait, so most
/// callers never name it.
///
/// # Examples
///
/// ```
/// use filters::{MatchDecision, PathFilter};
/// use std::path::Path;
///
/// let hidden = |path: &Path| {
///     let dot = path
///         .file_name()
///         .and_then(|name| name.to_str())
///         .is_some_and(|name| name.starts_with('.'));
///     if dot { MatchDecision::Exclude } else { MatchDecision::Undecided }
/// };
/// assert_eq!(hidden.decide(Path::new("/r/.env")), MatchDecision::Exclude);
/// assert_eq!(hidden.decide(Path::new("/r/env")), MatchDecision::Undecided);
/// ```
pub trait PathFilter {
    /// Decides whether `path` is included, excluded, or left to the patterns.
    fn decide(&self, path: &Path) -> MatchDecision;
}

impl<F> PathFilter for F
where
    F: Fn(&Path) -> MatchDecision,
{
    fn decide(&self, path: &Path) -> MatchDecision {
        self(path)
    }
}
