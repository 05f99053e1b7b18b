//! Tests for anchored vs unanchored patterns.
//!
//! - Anchored patterns start with `/` and match only below the base path
//! - Slash-free patterns match the basename at any depth
//! - Patterns with an inner `/` are matched once against the relative path

use filters::FilterOptions;
use std::path::Path;

fn except(patterns: &[&str]) -> FilterOptions {
    FilterOptions::new()
        .with_except(patterns.iter().copied())
        .with_base_path("/base")
}

// =============================================================================
// Basic Anchoring Tests
// =============================================================================

#[test]
fn anchored_pattern_with_leading_slash() {
    let options = except(&["/root.txt"]);

    // Matches at root
    assert!(!options.should_include(Path::new("/base/root.txt"), false));
    // Does not match in subdirectory
    assert!(options.should_include(Path::new("/base/subdir/root.txt"), false));
    assert!(options.should_include(Path::new("/base/a/b/root.txt"), false));
}

#[test]
fn unanchored_pattern_without_slash() {
    let options = except(&["test.txt"]);

    assert!(!options.should_include(Path::new("/base/test.txt"), false));
    assert!(!options.should_include(Path::new("/base/subdir/test.txt"), false));
    assert!(!options.should_include(Path::new("/base/a/b/c/test.txt"), false));
}

#[test]
fn wildcard_anchored_at_root() {
    let options = except(&["/*.txt"]);

    assert!(!options.should_include(Path::new("/base/readme.txt"), false));
    assert!(!options.should_include(Path::new("/base/notes.txt"), false));
    assert!(options.should_include(Path::new("/base/docs/readme.txt"), false));
    assert!(options.should_include(Path::new("/base/a/b/notes.txt"), false));
}

#[test]
fn anchored_directory_pattern() {
    let options = except(&["/build/"]);

    assert!(!options.should_include(Path::new("/base/build"), true));
    assert!(options.should_include(Path::new("/base/build"), false));
    assert!(options.should_include(Path::new("/base/src/build"), true));
}

// =============================================================================
// Inner Slash Tests
// =============================================================================

#[test]
fn inner_slash_pattern_is_relative_to_base() {
    let options = except(&["src/generated"]);

    assert!(!options.should_include(Path::new("/base/src/generated"), true));
    assert!(options.should_include(Path::new("/base/lib/src/generated"), true));
}

#[test]
fn inner_slash_wildcard_does_not_cross_directories() {
    let options = except(&["src/*.rs"]);

    assert!(!options.should_include(Path::new("/base/src/main.rs"), false));
    assert!(options.should_include(Path::new("/base/src/bin/main.rs"), false));
}

#[test]
fn question_mark_does_not_match_separator() {
    let options = except(&["a?b"]);
    // Slash-free pattern, matched against basenames only.
    assert!(!options.should_include(Path::new("/base/axb"), false));

    let path_pattern = except(&["dir/a?b"]);
    assert!(!path_pattern.should_include(Path::new("/base/dir/axb"), false));
    assert!(path_pattern.should_include(Path::new("/base/dir/a/b"), false));
}

#[test]
fn bracket_class_does_not_match_separator() {
    let options = except(&["x[/]y/z"]);
    assert!(options.should_include(Path::new("/base/x/y/z"), false));
}

#[test]
fn base_path_is_fixed_for_nested_paths() {
    let options = except(&["/top/*.log"]);
    assert!(!options.should_include(Path::new("/base/top/a.log"), false));
    assert!(options.should_include(Path::new("/base/nested/top/a.log"), false));
}

#[test]
fn anchored_literal_longer_than_path_fails() {
    let options = except(&["/very/long/anchored/prefix/*"]);
    assert!(options.should_include(Path::new("/base/very"), true));
}
