use super::*;
use std::ffi::OsStr;
use std::path::Path;
use test_support::{FileTree, TestDir};

fn run_with_args<I, S>(args: I) -> (i32, String, String)
where
    I: IntoIterator<Item = S>,
    S: AsRef<OsStr>,
{
    let args: Vec<OsString> = std::iter::once(OsString::from("treesift"))
        .chain(args.into_iter().map(|arg| arg.as_ref().to_os_string()))
        .collect();
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let code = run(args, &mut stdout, &mut stderr);
    (
        code,
        String::from_utf8(stdout).expect("utf8 stdout"),
        String::from_utf8(stderr).expect("utf8 stderr"),
    )
}

fn sample_tree() -> TestDir {
    let dir = TestDir::new().expect("tempdir");
    FileTree::new()
        .text_file("a.php", "")
        .text_file("b.txt", "")
        .text_file("debug.log", "")
        .text_file("keep.log", "")
        .text_file("sub/c.php", "")
        .text_file("vendor/lib.php", "")
        .dir("empty")
        .create_in(&dir)
        .expect("tree");
    dir
}

fn listed(root: &Path, stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(|line| {
            Path::new(line)
                .strip_prefix(root)
                .expect("under root")
                .to_string_lossy()
                .replace('\\', "/")
        })
        .collect()
}

#[test]
fn version_flag_prints_package_version() {
    let (code, stdout, stderr) = run_with_args(["--version"]);
    assert_eq!(code, 0);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
    assert!(stderr.is_empty());
}

#[test]
fn help_flag_lists_subcommands() {
    let (code, stdout, _) = run_with_args(["--help"]);
    assert_eq!(code, 0);
    for name in ["list", "dirs", "copy", "remove", "mkdir"] {
        assert!(stdout.contains(name), "{name} missing from help");
    }
}

#[test]
fn unknown_option_is_a_usage_error() {
    let (code, stdout, stderr) = run_with_args(["list", "--bogus", "."]);
    assert_eq!(code, 1);
    assert!(stdout.is_empty());
    assert!(stderr.contains("--bogus"));
}

#[test]
fn missing_subcommand_is_a_usage_error() {
    let (code, _, stderr) = run_with_args(Vec::<&str>::new());
    assert_eq!(code, 1);
    assert!(!stderr.is_empty());
}

#[test]
fn list_applies_excludes_with_negation() {
    let tree = sample_tree();
    let (code, stdout, stderr) = run_with_args([
        OsStr::new("list"),
        OsStr::new("-x"),
        OsStr::new("*.log"),
        OsStr::new("-x"),
        OsStr::new("!keep.log"),
        OsStr::new("-x"),
        OsStr::new("vendor/"),
        tree.path().as_os_str(),
    ]);

    assert_eq!(code, 0, "{stderr}");
    assert_eq!(
        listed(tree.path(), &stdout),
        vec!["a.php", "b.txt", "keep.log", "sub/c.php"]
    );
}

#[test]
fn list_only_keeps_matching_files_at_any_depth() {
    let tree = sample_tree();
    let (code, stdout, _) = run_with_args([
        OsStr::new("list"),
        OsStr::new("--only"),
        OsStr::new("*.php"),
        tree.path().as_os_str(),
    ]);

    assert_eq!(code, 0);
    assert_eq!(
        listed(tree.path(), &stdout),
        vec!["a.php", "sub/c.php", "vendor/lib.php"]
    );
}

#[test]
fn list_without_recursion_stays_at_top_level() {
    let tree = sample_tree();
    let (code, stdout, _) = run_with_args([
        OsStr::new("list"),
        OsStr::new("--no-recursive"),
        tree.path().as_os_str(),
    ]);

    assert_eq!(code, 0);
    assert_eq!(
        listed(tree.path(), &stdout),
        vec!["a.php", "b.txt", "debug.log", "keep.log"]
    );
}

#[test]
fn list_reads_patterns_from_file() {
    let tree = sample_tree();
    let patterns = TestDir::new().expect("tempdir");
    let ignore = patterns
        .write_file(".treesiftignore", b"# build output\n*.log\n/vendor\n")
        .expect("write");

    let (code, stdout, _) = run_with_args([
        OsStr::new("list"),
        OsStr::new("--exclude-from"),
        ignore.as_os_str(),
        OsStr::new("--exclude"),
        OsStr::new("!keep.log"),
        tree.path().as_os_str(),
    ]);

    assert_eq!(code, 0);
    assert_eq!(
        listed(tree.path(), &stdout),
        vec!["a.php", "b.txt", "keep.log", "sub/c.php"]
    );
}

#[test]
fn missing_pattern_file_exits_with_one() {
    let tree = sample_tree();
    let missing = tree.path().join("no-such-file");
    let (code, _, stderr) = run_with_args([
        OsStr::new("list"),
        OsStr::new("--exclude-from"),
        missing.as_os_str(),
        tree.path().as_os_str(),
    ]);

    assert_eq!(code, 1);
    assert!(stderr.starts_with("treesift: "));
    assert!(stderr.contains("no-such-file"));
}

#[cfg(unix)]
#[test]
fn non_utf8_pattern_is_reported_as_invalid_pattern() {
    use std::os::unix::ffi::OsStrExt;

    let tree = sample_tree();
    for flag in ["-x", "--only"] {
        let (code, stdout, stderr) = run_with_args([
            OsStr::new("list"),
            OsStr::new(flag),
            OsStr::from_bytes(b"bad\xff*"),
            tree.path().as_os_str(),
        ]);

        assert_eq!(code, engine::INVALID_ARGUMENT_EXIT_CODE, "{flag}");
        assert!(stdout.is_empty());
        assert!(stderr.starts_with("treesift: invalid pattern"), "{stderr}");
        assert!(stderr.contains("not valid UTF-8"), "{stderr}");
    }
}

#[test]
fn ignore_case_applies_to_inline_and_file_patterns() {
    let tree = TestDir::new().expect("tempdir");
    FileTree::new()
        .text_file("A.LOG", "")
        .text_file("b.Tmp", "")
        .text_file("c.rs", "")
        .create_in(&tree)
        .expect("tree");
    let patterns = TestDir::new().expect("tempdir");
    let ignore = patterns.write_file("ignore", b"*.tmp\n").expect("write");

    let (code, stdout, _) = run_with_args([
        OsStr::new("list"),
        OsStr::new("-i"),
        OsStr::new("--exclude-from"),
        ignore.as_os_str(),
        OsStr::new("-x"),
        OsStr::new("*.log"),
        tree.path().as_os_str(),
    ]);

    assert_eq!(code, 0);
    assert_eq!(listed(tree.path(), &stdout), vec!["c.rs"]);
}

#[test]
fn list_of_missing_root_exits_with_walk_status() {
    let tree = TestDir::new().expect("tempdir");
    let missing = tree.path().join("absent");
    let (code, stdout, stderr) =
        run_with_args([OsStr::new("list"), missing.as_os_str()]);

    assert_eq!(code, engine::WALK_EXIT_CODE);
    assert!(stdout.is_empty());
    assert!(stderr.contains("absent"));
}

#[test]
fn dirs_lists_directories_only() {
    let tree = sample_tree();
    let (code, stdout, _) = run_with_args([
        OsStr::new("dirs"),
        OsStr::new("-x"),
        OsStr::new("vendor"),
        tree.path().as_os_str(),
    ]);

    assert_eq!(code, 0);
    assert_eq!(listed(tree.path(), &stdout), vec!["empty", "sub"]);
}

#[test]
fn copy_replicates_filtered_tree() {
    let tree = sample_tree();
    let target = TestDir::new().expect("tempdir");
    let dst = target.join("out");

    let (code, stdout, stderr) = run_with_args([
        OsStr::new("copy"),
        OsStr::new("-x"),
        OsStr::new("*.log"),
        OsStr::new("--no-empty-dirs"),
        tree.path().as_os_str(),
        dst.as_os_str(),
    ]);

    assert_eq!(code, 0, "{stderr}");
    assert!(stdout.is_empty());
    assert_eq!(
        test_support::relative_files(&dst),
        vec!["a.php", "b.txt", "sub/c.php", "vendor/lib.php"]
    );
    assert!(!dst.join("empty").exists());
}

#[test]
fn copy_with_verbose_prints_summary() {
    let tree = sample_tree();
    let target = TestDir::new().expect("tempdir");
    let dst = target.join("out");

    let (code, stdout, _) = run_with_args([
        OsStr::new("-v"),
        OsStr::new("copy"),
        OsStr::new("--only"),
        OsStr::new("*.php"),
        tree.path().as_os_str(),
        dst.as_os_str(),
    ]);

    assert_eq!(code, 0);
    assert!(stdout.contains("copied 3 files"), "{stdout}");
}

#[test]
fn copy_into_own_subdirectory_is_rejected() {
    let tree = sample_tree();
    let dst = tree.path().join("sub/inner");

    let (code, _, stderr) = run_with_args([
        OsStr::new("copy"),
        tree.path().as_os_str(),
        dst.as_os_str(),
    ]);

    assert_eq!(code, engine::INVALID_ARGUMENT_EXIT_CODE);
    assert!(!stderr.is_empty());
    assert!(!dst.exists());
}

#[test]
fn copy_rejects_malformed_mode() {
    let tree = sample_tree();
    let (code, _, stderr) = run_with_args([
        OsStr::new("copy"),
        OsStr::new("--dir-mode"),
        OsStr::new("rwx"),
        tree.path().as_os_str(),
        tree.path().join("out").as_os_str(),
    ]);

    assert_eq!(code, 1);
    assert!(stderr.contains("octal"));
}

#[test]
fn remove_deletes_tree_and_tolerates_missing_dir() {
    let tree = sample_tree();
    let root = tree.path().to_path_buf();
    let doomed = root.join("sub");

    let (code, _, _) = run_with_args([OsStr::new("remove"), doomed.as_os_str()]);
    assert_eq!(code, 0);
    assert!(!doomed.exists());

    let (code, _, _) = run_with_args([OsStr::new("remove"), doomed.as_os_str()]);
    assert_eq!(code, 0);
}

#[test]
fn mkdir_creates_parents_when_asked() {
    let tree = TestDir::new().expect("tempdir");
    let nested = tree.path().join("a/b/c");

    let (code, _, _) = run_with_args([OsStr::new("mkdir"), nested.as_os_str()]);
    assert_eq!(code, engine::IO_EXIT_CODE);
    assert!(!nested.exists());

    let (code, _, stderr) = run_with_args([
        OsStr::new("mkdir"),
        OsStr::new("-p"),
        OsStr::new("--mode"),
        OsStr::new("750"),
        nested.as_os_str(),
    ]);
    assert_eq!(code, 0, "{stderr}");
    assert!(nested.is_dir());

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(&nested).expect("metadata").permissions().mode();
        assert_eq!(mode & 0o777, 0o750);
    }
}

#[test]
fn debug_filter_flag_reports_decisions_on_stderr() {
    let tree = sample_tree();
    let (code, _, stderr) = run_with_args([
        OsStr::new("list"),
        OsStr::new("--debug"),
        OsStr::new("filter2"),
        OsStr::new("-x"),
        OsStr::new("*.log"),
        tree.path().as_os_str(),
    ]);

    assert_eq!(code, 0);
    assert!(stderr.contains("excluding"), "{stderr}");
    assert!(stderr.contains("debug.log"));
}

#[test]
fn unknown_debug_flag_is_rejected() {
    let tree = sample_tree();
    let (code, _, stderr) = run_with_args([
        OsStr::new("list"),
        OsStr::new("--debug"),
        OsStr::new("bogus"),
        tree.path().as_os_str(),
    ]);

    assert_eq!(code, 1);
    assert!(stderr.contains("bogus"), "{stderr}");
}

#[test]
fn exit_code_from_clamps_range() {
    assert_eq!(exit_code_from(-5), std::process::ExitCode::from(0));
    assert_eq!(exit_code_from(300), std::process::ExitCode::from(255));
}
