#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `walk` provides the deterministic, filter-aware directory traversal behind
//! every tree operation in the workspace. The walker enumerates files,
//! directories and symbolic links below a root directory, consults
//! [`filters::FilterOptions`] for every entry, and never descends into a
//! directory the filter rejects. Directory entries are sorted before they are
//! yielded so results do not depend on the filesystem's listing order.
//!
//! # Design
//!
//! - [`WalkBuilder`] configures the root, symlink following, whether the root
//!   entry is emitted, and the filter.
//! - [`Walker`] implements [`Iterator`] and yields [`WalkEntry`] values in
//!   depth-first order using an explicit stack. Only one directory handle is
//!   open at a time: a directory is listed completely and closed before its
//!   entries are processed.
//! - [`WalkError`] describes the failure that ended the walk, with the
//!   offending path and the original [`io::Error`](std::io::Error).
//!
//! # Invariants
//!
//! - The pattern base path is resolved once, from the absolute root, and is
//!   the same for every entry of the walk.
//! - Excluded directories are never opened, so failures inside them cannot
//!   surface.
//! - With `recursive` disabled only the root's direct children are visited.
//! - Any I/O failure ends the walk; no further entries are produced.
//!
//! # Errors
//!
//! [`WalkBuilder::build`] fails when the root is missing, is not a directory,
//! or cannot be listed. Iteration yields [`WalkError`] when a nested directory
//! cannot be read or an entry cannot be inspected.
//!
//! # Examples
//!
//! ```
//! use filters::FilterOptions;
//! use walk::WalkBuilder;
//! use std::fs;
//! use std::path::PathBuf;
//!
//! # fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let temp = tempfile::tempdir()?;
//! let root = temp.path();
//! fs::create_dir_all(root.join(".git"))?;
//! fs::write(root.join(".git/HEAD"), b"ref")?;
//! fs::write(root.join("README.md"), b"docs")?;
//!
//! let walker = WalkBuilder::new(root)
//!     .filter(FilterOptions::new().with_except([".git/"]))
//!     .build()?;
//! let seen = walker
//!     .map(|entry| entry.map(|entry| entry.relative_path().to_path_buf()))
//!     .collect::<Result<Vec<_>, _>>()?;
//!
//! assert_eq!(seen, vec![PathBuf::from("README.md")]);
//! # Ok(())
//! # }
//! # demo().unwrap();
//! ```

mod builder;
mod entry;
mod error;
mod walker;

pub use builder::WalkBuilder;
pub use entry::WalkEntry;
pub use error::{WalkError, WalkErrorKind};
pub use walker::Walker;
