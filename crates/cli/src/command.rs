//! `clap` definition of the command-line surface.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::builder::{OsStringValueParser, PathBufValueParser};
use clap::{Arg, ArgAction, ArgMatches, Command};

/// Program name used in usage and diagnostics.
pub(crate) const PROGRAM_NAME: &str = "treesift";

/// Builds the `clap` command used for parsing.
pub(crate) fn clap_command() -> Command {
    Command::new(PROGRAM_NAME)
        .version(env!("CARGO_PKG_VERSION"))
        .about("List, copy, and remove directory trees filtered by gitignore-style patterns.")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase verbosity; may be repeated.")
                .action(ArgAction::Count)
                .global(true),
        )
        .arg(
            Arg::new("info")
                .long("info")
                .value_name("FLAGS")
                .help("Fine-grained informational output (e.g. copy2,skip).")
                .value_delimiter(',')
                .action(ArgAction::Append)
                .global(true),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .value_name("FLAGS")
                .help("Fine-grained debug output (e.g. filter2,flist).")
                .value_delimiter(',')
                .action(ArgAction::Append)
                .global(true),
        )
        .subcommand(
            filter_args(Command::new("list").about("Print files below DIR that pass the filters."))
                .arg(directory_arg("DIR")),
        )
        .subcommand(
            filter_args(
                Command::new("dirs").about("Print directories below DIR that pass the filters."),
            )
            .arg(directory_arg("DIR")),
        )
        .subcommand(
            filter_args(Command::new("copy").about("Copy the filtered contents of SRC into DST."))
                .arg(directory_arg("SRC"))
                .arg(directory_arg("DST"))
                .arg(
                    Arg::new("dir-mode")
                        .long("dir-mode")
                        .value_name("MODE")
                        .help("Octal permissions for created directories (default 775).")
                        .value_parser(parse_mode),
                )
                .arg(
                    Arg::new("file-mode")
                        .long("file-mode")
                        .value_name("MODE")
                        .help("Octal permissions applied to copied files.")
                        .value_parser(parse_mode),
                )
                .arg(
                    Arg::new("no-empty-dirs")
                        .long("no-empty-dirs")
                        .help("Only create directories that receive at least one file.")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("follow-symlinks")
                        .long("follow-symlinks")
                        .help("Copy the targets of symbolic links instead of the links.")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("remove")
                .about("Remove DIR and everything below it.")
                .arg(directory_arg("DIR"))
                .arg(
                    Arg::new("traverse-symlinks")
                        .long("traverse-symlinks")
                        .help("Remove the contents of linked directories as well.")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("mkdir")
                .about("Create DIR with the given permissions.")
                .arg(directory_arg("DIR"))
                .arg(
                    Arg::new("mode")
                        .long("mode")
                        .short('m')
                        .value_name("MODE")
                        .help("Octal permissions for the directory (default 775).")
                        .value_parser(parse_mode),
                )
                .arg(
                    Arg::new("parents")
                        .long("parents")
                        .short('p')
                        .help("Create missing parent directories.")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn filter_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("exclude")
                .long("exclude")
                .short('x')
                .value_name("PATTERN")
                .help("Skip paths matching PATTERN ('!' re-includes).")
                .value_parser(OsStringValueParser::new())
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("exclude-from")
                .long("exclude-from")
                .value_name("FILE")
                .help("Read exclude patterns from FILE.")
                .value_parser(PathBufValueParser::new())
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("only")
                .long("only")
                .short('o')
                .value_name("PATTERN")
                .help("Keep only files matching PATTERN.")
                .value_parser(OsStringValueParser::new())
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("only-from")
                .long("only-from")
                .value_name("FILE")
                .help("Read only patterns from FILE.")
                .value_parser(PathBufValueParser::new())
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("no-recursive")
                .long("no-recursive")
                .help("Do not descend into subdirectories.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("ignore-case")
                .long("ignore-case")
                .short('i')
                .help("Match patterns case-insensitively.")
                .action(ArgAction::SetTrue),
        )
}

fn directory_arg(name: &'static str) -> Arg {
    Arg::new(name)
        .value_name(name)
        .required(true)
        .value_parser(PathBufValueParser::new())
}

/// Parses an octal permission string such as `755` or `0o644`.
pub(crate) fn parse_mode(raw: &str) -> Result<u32, String> {
    let digits = raw.strip_prefix("0o").unwrap_or(raw);
    let mode = u32::from_str_radix(digits, 8)
        .map_err(|_| format!("'{raw}' is not an octal permission mode"))?;
    if mode > 0o7777 {
        return Err(format!("'{raw}' exceeds the permission bits 7777"));
    }
    Ok(mode)
}

/// Pattern sources gathered from one subcommand's arguments.
#[derive(Debug, Default)]
pub(crate) struct FilterArgs {
    pub(crate) exclude: Vec<OsString>,
    pub(crate) exclude_from: Vec<PathBuf>,
    pub(crate) only: Vec<OsString>,
    pub(crate) only_from: Vec<PathBuf>,
    pub(crate) recursive: bool,
    pub(crate) ignore_case: bool,
}

impl FilterArgs {
    pub(crate) fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            exclude: os_strings(matches, "exclude"),
            exclude_from: paths(matches, "exclude-from"),
            only: os_strings(matches, "only"),
            only_from: paths(matches, "only-from"),
            recursive: !matches.get_flag("no-recursive"),
            ignore_case: matches.get_flag("ignore-case"),
        }
    }
}

/// Verbosity switches shared by every subcommand.
///
/// Global arguments propagate down, so these are read from the subcommand's
/// matches.
#[derive(Debug, Default)]
pub(crate) struct VerbosityArgs {
    pub(crate) verbose: u8,
    pub(crate) info: Vec<String>,
    pub(crate) debug: Vec<String>,
}

impl VerbosityArgs {
    pub(crate) fn from_matches(matches: &ArgMatches) -> Self {
        Self {
            verbose: matches.get_count("verbose"),
            info: strings(matches, "info"),
            debug: strings(matches, "debug"),
        }
    }
}

/// Path operand of a subcommand; required arguments are always present.
pub(crate) fn path(matches: &ArgMatches, id: &str) -> PathBuf {
    matches.get_one::<PathBuf>(id).cloned().unwrap_or_default()
}

/// Optional octal mode argument.
pub(crate) fn mode(matches: &ArgMatches, id: &str) -> Option<u32> {
    matches.get_one::<u32>(id).copied()
}

fn strings(matches: &ArgMatches, id: &str) -> Vec<String> {
    matches
        .get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn os_strings(matches: &ArgMatches, id: &str) -> Vec<OsString> {
    matches
        .get_many::<OsString>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

fn paths(matches: &ArgMatches, id: &str) -> Vec<PathBuf> {
    matches
        .get_many::<PathBuf>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}
