//! Loading patterns from ignore files.
//!
//! One pattern per line. Blank lines and lines starting with `#` are skipped,
//! `\r\n` endings are accepted, and trailing spaces are trimmed unless
//! escaped with a backslash. A leading `\#` or `\!` is kept verbatim; the
//! matcher treats the backslash as an escape so the pattern matches a name
//! starting with `#` or `!`.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use crate::FilterError;

/// Reads patterns from `reader`.
///
/// # Errors
///
/// Propagates read failures. A line that is not valid UTF-8 yields an error
/// of kind [`io::ErrorKind::InvalidData`].
pub fn read_patterns<R: BufRead>(reader: &mut R) -> io::Result<Vec<String>> {
    let mut buffer = Vec::new();
    let mut patterns = Vec::new();

    loop {
        buffer.clear();
        let bytes_read = reader.read_until(b'\n', &mut buffer)?;

        if bytes_read == 0 {
            break;
        }

        if buffer.last() == Some(&b'\n') {
            buffer.pop();
        }
        if buffer.last() == Some(&b'\r') {
            buffer.pop();
        }

        let line = std::str::from_utf8(&buffer)
            .map_err(|error| io::Error::new(io::ErrorKind::InvalidData, error))?;
        let line = trim_unescaped_trailing_spaces(line);
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        patterns.push(line.to_owned());
    }

    Ok(patterns)
}

/// Reads patterns from the file at `path`.
///
/// # Errors
///
/// Returns [`FilterError::PatternFile`] when the file cannot be opened or
/// read, or contains a non-UTF-8 line.
pub fn read_pattern_file(path: &Path) -> Result<Vec<String>, FilterError> {
    let file = File::open(path).map_err(|error| FilterError::pattern_file(path, error))?;
    let patterns = read_patterns(&mut BufReader::new(file))
        .map_err(|error| FilterError::pattern_file(path, error))?;
    logging::debug_log!(
        Filter,
        1,
        "loaded {} patterns from {}",
        patterns.len(),
        path.display()
    );
    Ok(patterns)
}

fn trim_unescaped_trailing_spaces(line: &str) -> &str {
    let bytes = line.as_bytes();
    let mut end = bytes.len();
    while end > 0 && bytes[end - 1] == b' ' {
        let backslashes = bytes[..end - 1]
            .iter()
            .rev()
            .take_while(|&&byte| byte == b'\\')
            .count();
        if backslashes % 2 == 1 {
            break;
        }
        end -= 1;
    }
    &line[..end]
}
