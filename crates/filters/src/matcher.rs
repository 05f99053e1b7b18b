//! Matching of single path components and root-relative paths.

use crate::CompiledPattern;
use crate::wildcard::{MatchFlags, bytes_eq, wildcard_match};

/// Matches a single path component against `pattern`.
///
/// `name` must not contain separators; any `/` byte is treated as an ordinary
/// byte. Patterns without wildcards compare for equality, `*literal` patterns
/// compare the trailing bytes of `name`, and everything else is evaluated as
/// a shell glob.
///
/// # Examples
///
/// ```
/// use filters::{CompiledPattern, match_basename};
///
/// let pattern = CompiledPattern::compile("*.txt");
/// assert!(match_basename(b"notes.txt", &pattern));
/// assert!(!match_basename(b"notes.md", &pattern));
/// ```
#[must_use]
pub fn match_basename(name: &[u8], pattern: &CompiledPattern) -> bool {
    let flags = MatchFlags::basename(!pattern.is_case_sensitive());
    let body = pattern.pattern().as_bytes();

    if pattern.first_wildcard().is_none() {
        return bytes_eq(body, name, flags);
    }

    if pattern.ends_with_literal() {
        let literal = &body[1..];
        return name.len() >= literal.len()
            && bytes_eq(&name[name.len() - literal.len()..], literal, flags);
    }

    wildcard_match(body, name, flags)
}

/// Matches `path` against a pattern that contains a `/`.
///
/// `path` and `base_path` use `/` separators. The pattern is evaluated
/// against the part of `path` below `base_path`; a leading `/` in the pattern
/// only anchors it and is not compared. Wildcards never match `/`, so
/// `src/*.rs` does not reach into `src/nested/`.
///
/// # Examples
///
/// ```
/// use filters::{CompiledPattern, match_path};
///
/// let pattern = CompiledPattern::compile("/build");
/// assert!(match_path(b"/repo/build", b"/repo", &pattern));
/// assert!(!match_path(b"/repo/sub/build", b"/repo", &pattern));
/// ```
#[must_use]
pub fn match_path(path: &[u8], base_path: &[u8], pattern: &CompiledPattern) -> bool {
    let flags = MatchFlags::path(!pattern.is_case_sensitive());
    let mut body = pattern.pattern().as_bytes();
    let mut first_wildcard = pattern.first_wildcard();

    if let Some(rest) = body.strip_prefix(b"/") {
        body = rest;
        first_wildcard = first_wildcard.map(|offset| offset.saturating_sub(1));
    }

    let mut name = relative_name(path, base_path);

    let prefix_len = first_wildcard.unwrap_or(body.len());
    if prefix_len != 0 {
        if prefix_len > name.len() {
            return false;
        }
        if !bytes_eq(&body[..prefix_len], &name[..prefix_len], flags) {
            return false;
        }
        body = &body[prefix_len..];
        name = &name[prefix_len..];
        if body.is_empty() && name.is_empty() {
            return true;
        }
    }

    wildcard_match(body, name, flags)
}

/// Returns the final component of a `/`-separated path.
#[must_use]
pub fn basename(path: &[u8]) -> &[u8] {
    let trimmed = match path.iter().rposition(|&b| b != b'/') {
        Some(last) => &path[..=last],
        None => return path,
    };
    match trimmed.iter().rposition(|&b| b == b'/') {
        Some(separator) => &trimmed[separator + 1..],
        None => trimmed,
    }
}

/// Strips `base_path` and the separator that follows it from `path`.
fn relative_name<'a>(path: &'a [u8], base_path: &[u8]) -> &'a [u8] {
    if base_path.is_empty() {
        return path;
    }
    match path.strip_prefix(base_path) {
        Some(rest) => rest.strip_prefix(b"/").unwrap_or(rest),
        None => path.get(base_path.len() + 1..).unwrap_or_default(),
    }
}
