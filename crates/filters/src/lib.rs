#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `filters` decides which paths of a directory tree take part in a listing,
//! copy, or removal. Patterns follow the `.gitignore` grammar: one glob per
//! entry, `!` negates, a trailing `/` restricts the pattern to directories, and
//! a pattern containing `/` is matched against the path relative to a base
//! directory instead of against the basename alone. Matching is byte-exact and
//! shell-glob based (`*`, `?`, `[...]`, backslash escapes); wildcards never
//! cross a `/` when a pattern is matched against a full relative path.
//!
//! # Design
//!
//! - [`CompiledPattern`] holds the pre-analysed form of one raw pattern. It is
//!   built once and shared read-only by every path evaluated during a walk.
//! - [`match_basename`] and [`match_path`] evaluate one pattern against one
//!   path. Both use the precomputed wildcard offset to compare a literal prefix
//!   before falling back to glob evaluation.
//! - [`last_matching_pattern`] scans a pattern list from the end and returns
//!   the first hit, so later patterns override earlier ones.
//! - [`FilterOptions`] bundles the `except` and `only` lists, an optional
//!   [`PathFilter`], the recursion switch, and the base path, and exposes the
//!   final [`FilterOptions::should_include`] decision.
//! - [`read_patterns`] and [`read_pattern_file`] load ignore files.
//!
//! # Invariants
//!
//! - Among matching `except` patterns the last one declared wins; a negated
//!   winner includes the path, any other winner excludes it.
//! - `only` patterns never exclude directories, so files below an unmatched
//!   directory remain reachable.
//! - A decisive custom filter result bypasses both pattern lists.
//! - Directory-only patterns never match paths reported as files.
//!
//! # Errors
//!
//! Glob syntax has no invalid forms: an unterminated `[` is a literal
//! bracket. [`FilterError`] is reported when a pattern arrives as non-UTF-8
//! input, when a pre-computed record is inconsistent, or when an ignore file
//! cannot be read.
//!
//! # Examples
//!
//! ```
//! use filters::FilterOptions;
//! use std::path::Path;
//!
//! let options = FilterOptions::new()
//!     .with_except(["/build", "*.swp", "node_modules/"])
//!     .with_only(["*.rs", "*.toml"])
//!     .with_base_path("/project");
//!
//! assert!(!options.should_include(Path::new("/project/build"), true));
//! assert!(options.should_include(Path::new("/project/src/build"), true));
//! assert!(!options.should_include(Path::new("/project/node_modules"), true));
//! assert!(options.should_include(Path::new("/project/src/main.rs"), false));
//! assert!(!options.should_include(Path::new("/project/README.md"), false));
//! ```
//!
//! # See also
//!
//! - `walk::WalkBuilder` applies [`FilterOptions`] while traversing a tree and
//!   prunes excluded directories.

pub mod debug_filter;
mod decision;
mod error;
mod ignore_file;
mod matcher;
mod options;
mod pattern;
mod resolve;
mod wildcard;

pub use decision::{MatchDecision, PathFilter};
pub use error::FilterError;
pub use ignore_file::{read_pattern_file, read_patterns};
pub use matcher::{basename, match_basename, match_path};
pub use options::{FilterOptions, matchable_path};
pub use pattern::{CompiledPattern, PatternFlags, first_wildcard_in};
pub use resolve::last_matching_pattern;
