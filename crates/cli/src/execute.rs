//! Dispatch of parsed subcommands to the engine.

use std::env;
use std::fmt;
use std::io::{self, Write};
use std::path::Path;

use clap::ArgMatches;
use engine::{
    CopyOptions, DEFAULT_DIR_MODE, INVALID_ARGUMENT_EXIT_CODE, IO_EXIT_CODE, RemoveOptions,
    TreeError,
};
use filters::{CompiledPattern, FilterError, FilterOptions, read_pattern_file};
use logging::{DiagnosticEvent, InfoFlag, VerbosityConfig};

use crate::command::{self, FilterArgs, VerbosityArgs};

/// Failure reported by a subcommand, carrying its exit status.
#[derive(Debug)]
pub enum Failure {
    /// A `--info`/`--debug` token was not recognised.
    Verbosity(String),
    /// A pattern was not valid UTF-8 or a pattern file could not be loaded.
    Filter(FilterError),
    /// The tree operation failed.
    Tree(TreeError),
    /// Standard output could not be written.
    Output(io::Error),
}

impl Failure {
    /// Exit status used for command-line usage errors.
    #[must_use]
    pub const fn usage_exit_code() -> i32 {
        INVALID_ARGUMENT_EXIT_CODE
    }

    /// Returns the process exit status for this failure.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Verbosity(_) | Self::Filter(_) => INVALID_ARGUMENT_EXIT_CODE,
            Self::Tree(error) => error.exit_code(),
            Self::Output(_) => IO_EXIT_CODE,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Verbosity(message) => write!(f, "{message}"),
            Self::Filter(error) => write!(f, "{error}"),
            Self::Tree(error) => write!(f, "{error}"),
            Self::Output(error) => write!(f, "failed to write output: {error}"),
        }
    }
}

impl std::error::Error for Failure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Verbosity(_) => None,
            Self::Filter(error) => Some(error),
            Self::Tree(error) => Some(error),
            Self::Output(error) => Some(error),
        }
    }
}

impl From<FilterError> for Failure {
    fn from(error: FilterError) -> Self {
        Self::Filter(error)
    }
}

impl From<TreeError> for Failure {
    fn from(error: TreeError) -> Self {
        Self::Tree(error)
    }
}

impl From<io::Error> for Failure {
    fn from(error: io::Error) -> Self {
        Self::Output(error)
    }
}

/// Runs the selected subcommand and flushes collected diagnostics.
pub(crate) fn execute<Out, Err>(
    matches: &ArgMatches,
    stdout: &mut Out,
    stderr: &mut Err,
) -> Result<(), Failure>
where
    Out: Write,
    Err: Write,
{
    let Some((name, sub)) = matches.subcommand() else {
        return Err(Failure::Tree(TreeError::invalid_argument(
            "a subcommand is required",
        )));
    };

    let config = verbosity_config(&VerbosityArgs::from_matches(sub))?;
    let tracing_active = install_diagnostics(config);
    tracing::debug!(target: "treesift::cli", subcommand = name, "dispatching");

    let outcome = dispatch(name, sub, stdout);

    let events = logging::drain_events();
    if !tracing_active {
        write_events(&events, stderr);
    }
    outcome
}

fn dispatch<Out: Write>(name: &str, sub: &ArgMatches, stdout: &mut Out) -> Result<(), Failure> {
    match name {
        "list" => {
            let root = command::path(sub, "DIR");
            let options = filter_options(&FilterArgs::from_matches(sub))?;
            print_paths(&engine::list_files(&root, &options)?, stdout)
        }
        "dirs" => {
            let root = command::path(sub, "DIR");
            let options = filter_options(&FilterArgs::from_matches(sub))?;
            print_paths(&engine::find_directories(&root, &options)?, stdout)
        }
        "copy" => {
            let src = command::path(sub, "SRC");
            let dst = command::path(sub, "DST");
            let filter = filter_options(&FilterArgs::from_matches(sub))?;
            let mut options = CopyOptions::new()
                .with_filter(filter)
                .with_dir_mode(command::mode(sub, "dir-mode").unwrap_or(DEFAULT_DIR_MODE))
                .with_copy_empty_directories(!sub.get_flag("no-empty-dirs"))
                .with_follow_symlinks(sub.get_flag("follow-symlinks"));
            if let Some(file_mode) = command::mode(sub, "file-mode") {
                options = options.with_file_mode(file_mode);
            }

            let summary = engine::copy_tree(&src, &dst, &options)?;
            if logging::info_gte(InfoFlag::Copy, 1) {
                writeln!(
                    stdout,
                    "copied {} files, {} symlinks, {} directories; skipped {} entries",
                    summary.files_copied(),
                    summary.symlinks_copied(),
                    summary.directories_copied(),
                    summary.entries_skipped()
                )?;
            }
            Ok(())
        }
        "remove" => {
            let dir = command::path(sub, "DIR");
            let options =
                RemoveOptions::new().with_traverse_symlinks(sub.get_flag("traverse-symlinks"));
            engine::remove_tree(&dir, &options)?;
            Ok(())
        }
        "mkdir" => {
            let dir = command::path(sub, "DIR");
            let mode = command::mode(sub, "mode").unwrap_or(DEFAULT_DIR_MODE);
            engine::create_directory(&dir, mode, sub.get_flag("parents"))?;
            Ok(())
        }
        other => Err(Failure::Tree(TreeError::invalid_argument(format!(
            "unknown subcommand '{other}'"
        )))),
    }
}

/// Builds the filter for one invocation; file patterns precede inline ones.
///
/// Inline patterns arrive as raw OS strings and are compiled here so a
/// non-UTF-8 pattern surfaces as [`FilterError::InvalidPattern`].
pub(crate) fn filter_options(args: &FilterArgs) -> Result<FilterOptions, Failure> {
    let case_sensitive = !args.ignore_case;
    let mut options = FilterOptions::new()
        .with_recursive(args.recursive)
        .with_case_sensitive(case_sensitive);

    for path in &args.exclude_from {
        options = options.with_except(read_pattern_file(path)?);
    }
    for raw in &args.exclude {
        options.push_except(CompiledPattern::from_os_str(raw, case_sensitive)?);
    }

    for path in &args.only_from {
        options = options.with_only(read_pattern_file(path)?);
    }
    for raw in &args.only {
        options.push_only(CompiledPattern::from_os_str(raw, case_sensitive)?);
    }
    Ok(options)
}

pub(crate) fn verbosity_config(args: &VerbosityArgs) -> Result<VerbosityConfig, Failure> {
    let mut config = VerbosityConfig::from_verbose_level(args.verbose);
    for token in &args.info {
        config.apply_info_flag(token).map_err(Failure::Verbosity)?;
    }
    for token in &args.debug {
        config.apply_debug_flag(token).map_err(Failure::Verbosity)?;
    }
    Ok(config)
}

/// Initialises verbosity and, when `RUST_LOG` is set, a tracing subscriber.
///
/// Returns whether diagnostics are delivered through `tracing`.
fn install_diagnostics(config: VerbosityConfig) -> bool {
    if env::var_os("RUST_LOG").is_some() {
        // A subscriber installed by an earlier call in this process stays active.
        let _ = logging::init_tracing(&config);
        return true;
    }
    logging::init(config);
    false
}

fn write_events<Err: Write>(events: &[DiagnosticEvent], stderr: &mut Err) {
    for event in events {
        let _ = writeln!(stderr, "{}", event.message());
    }
}

fn print_paths<Out: Write>(paths: &[impl AsRef<Path>], stdout: &mut Out) -> Result<(), Failure> {
    for path in paths {
        writeln!(stdout, "{}", path.as_ref().display())?;
    }
    stdout.flush()?;
    Ok(())
}
