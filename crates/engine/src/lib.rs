#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `engine` implements the tree operations of the workspace on top of the
//! [`walk`] traversal and the [`filters`] pattern engine: listing the files or
//! directories of a tree, copying a filtered tree, and removing a tree.
//!
//! # Design
//!
//! - [`list_files`] and [`find_directories`] collect absolute paths from a
//!   filtered walk and sort them.
//! - [`copy_tree`] replays a filtered walk into a destination directory,
//!   consulting the [`CopyOptions`] hooks for every entry and reporting a
//!   [`CopySummary`].
//! - [`remove_tree`] deletes a tree with an explicit work stack, tolerating
//!   entries that vanish concurrently.
//! - [`create_directory`] creates directories with explicit permission bits.
//!
//! # Invariants
//!
//! - The filter's base path is the source root for every entry of one call.
//! - Listing and copying are all or nothing with respect to traversal: an
//!   unreadable directory aborts the call.
//! - A directory is never copied into itself or one of its descendants.
//!
//! # Errors
//!
//! Every operation reports [`TreeError`]. [`TreeError::exit_code`] maps each
//! variant to the exit status used by the command-line front-end.
//!
//! # Examples
//!
//! ```
//! use engine::{RemoveOptions, list_files, remove_tree};
//! use filters::FilterOptions;
//!
//! let temp = tempfile::tempdir().unwrap();
//! let root = temp.path().join("tree");
//! std::fs::create_dir_all(root.join("sub")).unwrap();
//! std::fs::write(root.join("a.php"), b"").unwrap();
//! std::fs::write(root.join("b.txt"), b"").unwrap();
//! std::fs::write(root.join("sub/c.php"), b"").unwrap();
//!
//! let files = list_files(&root, &FilterOptions::new().with_only(["*.php"])).unwrap();
//! assert_eq!(files, vec![root.join("a.php"), root.join("sub/c.php")]);
//!
//! remove_tree(&root, &RemoveOptions::new()).unwrap();
//! assert!(!root.exists());
//! ```

mod copy;
mod directory;
mod error;
mod list;
mod remove;

pub use copy::{AfterCopy, BeforeCopy, CopyOptions, CopySummary, copy_tree};
pub use directory::{DEFAULT_DIR_MODE, create_directory};
pub use error::{INVALID_ARGUMENT_EXIT_CODE, IO_EXIT_CODE, TreeError, WALK_EXIT_CODE};
pub use list::{find_directories, list_files};
pub use remove::{RemoveOptions, remove_tree};
