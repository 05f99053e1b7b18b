#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the `treesift` command-line front-end. It parses the
//! arguments with [`clap`](https://docs.rs/clap/), turns the pattern switches
//! into a [`filters::FilterOptions`], and delegates to the tree operations of
//! the [`engine`] crate:
//!
//! | Subcommand | Operation |
//! |------------|-----------|
//! | `list`     | [`engine::list_files`] |
//! | `dirs`     | [`engine::find_directories`] |
//! | `copy`     | [`engine::copy_tree`] |
//! | `remove`   | [`engine::remove_tree`] |
//! | `mkdir`    | [`engine::create_directory`] |
//!
//! # Design
//!
//! [`run`] accepts an iterator of arguments together with handles for
//! standard output and error so tests can drive the whole front-end in
//! memory. Listings go to standard output, one path per line. Diagnostics
//! selected by `-v`, `--info` and `--debug` are collected through the
//! [`logging`] crate and written to standard error once the operation
//! returns. When `RUST_LOG` is set the diagnostics are routed to a `tracing`
//! subscriber instead.
//!
//! Patterns read with `--exclude-from`/`--only-from` precede the patterns
//! given inline, so inline patterns override file contents.
//!
//! # Invariants
//!
//! - `run` never panics; failures surface as non-zero exit codes.
//! - Help and version requests are written to standard output with status 0.
//!
//! # Errors
//!
//! | Status | Meaning |
//! |--------|---------|
//! | 0 | success |
//! | 1 | usage error, bad verbosity flag, unreadable pattern file, invalid argument |
//! | 2 | missing root or unreadable directory during traversal |
//! | 3 | I/O failure while copying, removing, or creating |
//!
//! # Examples
//!
//! ```
//! use std::ffi::OsString;
//!
//! let temp = tempfile::tempdir().unwrap();
//! std::fs::write(temp.path().join("keep.rs"), b"").unwrap();
//! std::fs::write(temp.path().join("drop.log"), b"").unwrap();
//!
//! let args: Vec<OsString> = vec![
//!     "treesift".into(),
//!     "list".into(),
//!     "-x".into(),
//!     "*.log".into(),
//!     temp.path().into(),
//! ];
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let status = cli::run(args, &mut stdout, &mut stderr);
//!
//! assert_eq!(status, 0);
//! let listing = String::from_utf8(stdout).unwrap();
//! assert!(listing.contains("keep.rs"));
//! assert!(!listing.contains("drop.log"));
//! ```
//!
//! # See also
//!
//! - `src/bin/treesift.rs` for the binary that wires [`run`] into `main`.

mod command;
mod execute;

use std::ffi::OsString;
use std::io::Write;

use clap::error::ErrorKind;

pub use execute::Failure;

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Runs the CLI using the provided argument iterator and output handles.
///
/// Returns the process exit code; `0` on success.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString> + Clone,
    Out: Write,
    Err: Write,
{
    let matches = match command::clap_command().try_get_matches_from(arguments) {
        Ok(matches) => matches,
        Err(error) => {
            return match error.kind() {
                ErrorKind::DisplayHelp
                | ErrorKind::DisplayVersion
                | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                    if error.exit_code() == 0 =>
                {
                    let _ = write!(stdout, "{}", error.render());
                    0
                }
                _ => {
                    let _ = write!(stderr, "{}", error.render());
                    execute::Failure::usage_exit_code()
                }
            };
        }
    };

    match execute::execute(&matches, stdout, stderr) {
        Ok(()) => 0,
        Err(failure) => {
            let _ = writeln!(stderr, "{}: {failure}", command::PROGRAM_NAME);
            failure.exit_code()
        }
    }
}

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(clamped as u8)
}

#[cfg(test)]
mod tests;
