//! Byte-oriented shell wildcard matching.
//!
//! Supports `*`, `?`, bracket classes (`[abc]`, `[a-z]`, `[!x]`, `[^x]`) and
//! backslash escapes. Matching works on raw bytes: a multi-byte UTF-8
//! character is several "characters" as far as `?` is concerned.

/// Options that change how [`wildcard_match`] treats its input.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct MatchFlags {
    /// When set, no wildcard (`*`, `?`, classes) matches `/`.
    pub(crate) path_name: bool,
    /// When set, ASCII letters compare case-insensitively.
    pub(crate) case_insensitive: bool,
}

impl MatchFlags {
    pub(crate) const fn basename(case_insensitive: bool) -> Self {
        Self {
            path_name: false,
            case_insensitive,
        }
    }

    pub(crate) const fn path(case_insensitive: bool) -> Self {
        Self {
            path_name: true,
            case_insensitive,
        }
    }
}

/// Compares two bytes honouring the case-folding flag.
#[inline]
pub(crate) fn byte_eq(a: u8, b: u8, flags: MatchFlags) -> bool {
    if flags.case_insensitive {
        a.eq_ignore_ascii_case(&b)
    } else {
        a == b
    }
}

/// Compares two byte strings honouring the case-folding flag.
#[inline]
pub(crate) fn bytes_eq(a: &[u8], b: &[u8], flags: MatchFlags) -> bool {
    if flags.case_insensitive {
        a.eq_ignore_ascii_case(b)
    } else {
        a == b
    }
}

enum ClassMatch {
    /// The class matched; the value is the byte length of the class syntax.
    Matched(usize),
    NotMatched,
    /// No closing `]`; the `[` is an ordinary byte.
    Unterminated,
}

/// Matches `text` against `pattern` in its entirety.
///
/// The matcher keeps a single backtracking point at the most recent `*`.
/// With [`MatchFlags::path_name`] a star that would have to swallow a `/`
/// ends the attempt: every `/` in the text must line up with a literal `/` in
/// the pattern, so no earlier star could absorb it either.
pub(crate) fn wildcard_match(pattern: &[u8], text: &[u8], flags: MatchFlags) -> bool {
    let mut p = 0;
    let mut t = 0;
    let mut star: Option<(usize, usize)> = None;

    while t < text.len() {
        if let Some(&token) = pattern.get(p) {
            let ch = text[t];
            let step = match token {
                b'*' => {
                    while pattern.get(p) == Some(&b'*') {
                        p += 1;
                    }
                    star = Some((p, t));
                    continue;
                }
                b'?' => (!(flags.path_name && ch == b'/')).then_some(1),
                b'[' => match match_class(&pattern[p..], ch, flags) {
                    ClassMatch::Matched(len) => Some(len),
                    ClassMatch::NotMatched => None,
                    ClassMatch::Unterminated => byte_eq(b'[', ch, flags).then_some(1),
                },
                b'\\' => match pattern.get(p + 1) {
                    Some(&escaped) => byte_eq(escaped, ch, flags).then_some(2),
                    None => (ch == b'\\').then_some(1),
                },
                literal => byte_eq(literal, ch, flags).then_some(1),
            };

            if let Some(len) = step {
                p += len;
                t += 1;
                continue;
            }
        }

        match star {
            Some((star_p, star_t)) => {
                if flags.path_name && text[star_t] == b'/' {
                    return false;
                }
                p = star_p;
                t = star_t + 1;
                star = Some((star_p, t));
            }
            None => return false,
        }
    }

    pattern[p..].iter().all(|&b| b == b'*')
}

/// Evaluates the bracket class starting at `pattern[0] == b'['` against `ch`.
fn match_class(pattern: &[u8], ch: u8, flags: MatchFlags) -> ClassMatch {
    let mut i = 1;
    let negated = matches!(pattern.get(i), Some(b'!' | b'^'));
    if negated {
        i += 1;
    }

    let mut matched = false;
    let mut first = true;
    loop {
        let Some(&c) = pattern.get(i) else {
            return ClassMatch::Unterminated;
        };
        if c == b']' && !first {
            i += 1;
            break;
        }
        first = false;

        let (low, next) = class_byte(pattern, i);
        i = next;

        let is_range = pattern.get(i) == Some(&b'-')
            && pattern.get(i + 1).is_some_and(|&b| b != b']');
        if is_range {
            let (high, next) = class_byte(pattern, i + 1);
            i = next;
            if in_range(low, high, ch, flags) {
                matched = true;
            }
        } else if byte_eq(low, ch, flags) {
            matched = true;
        }
    }

    if flags.path_name && ch == b'/' {
        return ClassMatch::NotMatched;
    }
    if matched != negated {
        ClassMatch::Matched(i)
    } else {
        ClassMatch::NotMatched
    }
}

/// Reads one class member byte at `i`, resolving a backslash escape.
fn class_byte(pattern: &[u8], i: usize) -> (u8, usize) {
    match (pattern[i], pattern.get(i + 1)) {
        (b'\\', Some(&escaped)) => (escaped, i + 2),
        (byte, _) => (byte, i + 1),
    }
}

fn in_range(low: u8, high: u8, ch: u8, flags: MatchFlags) -> bool {
    if (low..=high).contains(&ch) {
        return true;
    }
    flags.case_insensitive
        && ((low..=high).contains(&ch.to_ascii_lowercase())
            || (low..=high).contains(&ch.to_ascii_uppercase()))
}
