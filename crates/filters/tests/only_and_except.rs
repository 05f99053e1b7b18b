//! Interaction of `only`, `except` and custom filters.

use filters::{FilterOptions, MatchDecision};
use std::path::Path;

fn base() -> FilterOptions {
    FilterOptions::new().with_base_path("/base")
}

#[test]
fn only_keeps_matching_files() {
    let options = base().with_only(["*.php"]);

    assert!(options.should_include(Path::new("/base/a.php"), false));
    assert!(!options.should_include(Path::new("/base/b.txt"), false));
    assert!(options.should_include(Path::new("/base/sub/c.php"), false));
}

#[test]
fn only_never_rejects_directories() {
    let options = base().with_only(["*.php"]);
    assert!(options.should_include(Path::new("/base/sub"), true));
    assert!(options.should_include(Path::new("/base/not_php_at_all"), true));
}

#[test]
fn only_with_path_patterns() {
    let options = base().with_only(["/src/*.rs"]);

    assert!(options.should_include(Path::new("/base/src/lib.rs"), false));
    assert!(!options.should_include(Path::new("/base/lib.rs"), false));
    assert!(!options.should_include(Path::new("/base/tests/src/lib.rs"), false));
}

#[test]
fn except_wins_over_only() {
    let options = base().with_except(["legacy_*"]).with_only(["*.php"]);

    assert!(!options.should_include(Path::new("/base/legacy_index.php"), false));
    assert!(options.should_include(Path::new("/base/index.php"), false));
}

#[test]
fn except_can_exclude_directory_that_only_would_keep() {
    let options = base().with_except([".git/"]).with_only(["*"]);
    assert!(!options.should_include(Path::new("/base/.git"), true));
}

#[test]
fn decisive_custom_filter_bypasses_lists() {
    let options = base()
        .with_except(["*.php"])
        .with_only(["*.txt"])
        .with_filter(|path: &Path| {
            if path.extension().is_some_and(|ext| ext == "php") {
                MatchDecision::Include
            } else {
                MatchDecision::Undecided
            }
        });

    assert!(options.should_include(Path::new("/base/a.php"), false));
    assert!(options.should_include(Path::new("/base/b.txt"), false));
    assert!(!options.should_include(Path::new("/base/c.md"), false));
}

#[test]
fn custom_exclude_applies_to_directories() {
    let options = base().with_filter(|path: &Path| {
        if path.ends_with("hidden") {
            MatchDecision::Exclude
        } else {
            MatchDecision::Undecided
        }
    });

    assert!(!options.should_include(Path::new("/base/hidden"), true));
    assert!(options.should_include(Path::new("/base/visible"), true));
}
