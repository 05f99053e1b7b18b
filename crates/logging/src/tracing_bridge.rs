//! crates/logging/src/tracing_bridge.rs
//! Bridge between the verbosity flag system and the tracing crate.
//!
//! Every diagnostic emitted through [`emit_info`](crate::emit_info) or
//! [`emit_debug`](crate::emit_debug) is also forwarded as a tracing event.
//! Info flags map to `treesift::<flag>` targets at `INFO`; debug flags map to
//! `treesift::debug::<flag>` targets at `DEBUG` (level 1) or `TRACE` (level 2
//! and above).
//!
//! # Usage
//!
//! ```rust,ignore
//! use logging::{VerbosityConfig, init_tracing};
//!
//! init_tracing(&VerbosityConfig::from_verbose_level(2))?;
//! logging::info_log!(Copy, 1, "copied {}", path.display());
//! ```

use super::config::VerbosityConfig;
use super::levels::{DebugFlag, InfoFlag};
use tracing_subscriber::EnvFilter;

/// Target prefix shared by every forwarded event.
pub const TARGET_PREFIX: &str = "treesift";

macro_rules! info_event {
    ($flag:expr, $($arg:tt)+) => {
        match $flag {
            InfoFlag::Copy => tracing::info!(target: "treesift::copy", $($arg)+),
            InfoFlag::Del => tracing::info!(target: "treesift::del", $($arg)+),
            InfoFlag::Flist => tracing::info!(target: "treesift::flist", $($arg)+),
            InfoFlag::Name => tracing::info!(target: "treesift::name", $($arg)+),
            InfoFlag::Skip => tracing::info!(target: "treesift::skip", $($arg)+),
        }
    };
}

macro_rules! debug_event {
    ($macro:ident, $flag:expr, $($arg:tt)+) => {
        match $flag {
            DebugFlag::Del => tracing::$macro!(target: "treesift::debug::del", $($arg)+),
            DebugFlag::Dup => tracing::$macro!(target: "treesift::debug::dup", $($arg)+),
            DebugFlag::Filter => tracing::$macro!(target: "treesift::debug::filter", $($arg)+),
            DebugFlag::Flist => tracing::$macro!(target: "treesift::debug::flist", $($arg)+),
        }
    };
}

pub(crate) fn forward_info(flag: InfoFlag, level: u8, message: &str) {
    info_event!(flag, level, "{message}");
}

pub(crate) fn forward_debug(flag: DebugFlag, level: u8, message: &str) {
    if level <= 1 {
        debug_event!(debug, flag, level, "{message}");
    } else {
        debug_event!(trace, flag, level, "{message}");
    }
}

/// Returns the tracing target used for an info flag.
#[must_use]
pub fn info_target(flag: InfoFlag) -> String {
    format!("{TARGET_PREFIX}::{}", flag.name())
}

/// Returns the tracing target used for a debug flag.
#[must_use]
pub fn debug_target(flag: DebugFlag) -> String {
    format!("{TARGET_PREFIX}::debug::{}", flag.name())
}

/// Builds the [`EnvFilter`] directives that correspond to `config`.
///
/// Everything outside the enabled targets stays at `warn`.
#[must_use]
pub fn env_filter_for(config: &VerbosityConfig) -> EnvFilter {
    let mut directives = vec!["warn".to_string()];

    for flag in InfoFlag::ALL {
        if config.info.get(flag) > 0 {
            directives.push(format!("{}=info", info_target(flag)));
        }
    }
    for flag in DebugFlag::ALL {
        match config.debug.get(flag) {
            0 => {}
            1 => directives.push(format!("{}=debug", debug_target(flag))),
            _ => directives.push(format!("{}=trace", debug_target(flag))),
        }
    }

    EnvFilter::new(directives.join(","))
}

/// Installs a global `fmt` subscriber writing to standard error.
///
/// `RUST_LOG` takes precedence over `config` when it is set. The thread-local
/// verbosity is initialised from `config` as well so level checks stay in
/// sync with the subscriber.
pub fn init_tracing(
    config: &VerbosityConfig,
) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    crate::init(config.clone());

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| env_filter_for(config));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_follow_flag_names() {
        assert_eq!(info_target(InfoFlag::Copy), "treesift::copy");
        assert_eq!(debug_target(DebugFlag::Filter), "treesift::debug::filter");
    }

    #[test]
    fn env_filter_reflects_enabled_flags() {
        let filter = env_filter_for(&VerbosityConfig::from_verbose_level(2)).to_string();
        assert!(filter.contains("treesift::copy=info"));
        assert!(filter.contains("treesift::debug::filter=debug"));
        assert!(!filter.contains("treesift::debug::del"));
    }

    #[test]
    fn forwarding_without_subscriber_is_harmless() {
        forward_info(InfoFlag::Skip, 1, "skipped");
        forward_debug(DebugFlag::Flist, 3, "entering");
    }
}
