//! crates/logging/src/thread_local.rs
//! Per-thread verbosity and the buffer of diagnostics awaiting output.
//!
//! Library crates emit through [`info_log!`](crate::info_log) and
//! [`debug_log!`](crate::debug_log); the front-end calls [`init`] before an
//! operation and [`drain_events`] after it. Each thread has its own state, so
//! concurrent tests do not observe one another's messages.

use std::cell::RefCell;

use super::config::VerbosityConfig;
use super::levels::{DebugFlag, InfoFlag};

thread_local! {
    static VERBOSITY: RefCell<VerbosityConfig> = RefCell::new(VerbosityConfig::default());
    #[allow(clippy::missing_const_for_thread_local)]
    static PENDING: RefCell<Vec<DiagnosticEvent>> = RefCell::new(Vec::new());
}

/// One rendered diagnostic, tagged with the flag and level that enabled it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DiagnosticEvent {
    /// Progress output such as copied or deleted paths.
    Info {
        /// Category.
        flag: InfoFlag,
        /// Level the message was emitted at.
        level: u8,
        /// Rendered text.
        message: String,
    },
    /// Internals such as filter decisions and traversal steps.
    Debug {
        /// Category.
        flag: DebugFlag,
        /// Level the message was emitted at.
        level: u8,
        /// Rendered text.
        message: String,
    },
}

impl DiagnosticEvent {
    /// Rendered text of the event.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Info { message, .. } | Self::Debug { message, .. } => message,
        }
    }
}

fn with_config<T>(f: impl FnOnce(&mut VerbosityConfig) -> T) -> T {
    VERBOSITY.with(|config| f(&mut config.borrow_mut()))
}

fn record(event: DiagnosticEvent) {
    PENDING.with(|pending| pending.borrow_mut().push(event));
}

/// Replaces the configuration of the current thread.
pub fn init(config: VerbosityConfig) {
    with_config(|current| *current = config);
}

/// Snapshot of the current thread's configuration.
pub fn current() -> VerbosityConfig {
    with_config(|config| config.clone())
}

/// Whether `flag` is enabled at `level` or above.
pub fn info_gte(flag: InfoFlag, level: u8) -> bool {
    with_config(|config| config.info.get(flag) >= level)
}

/// Whether debug `flag` is enabled at `level` or above.
pub fn debug_gte(flag: DebugFlag, level: u8) -> bool {
    with_config(|config| config.debug.get(flag) >= level)
}

/// Buffers an info message; callers normally go through
/// [`info_log!`](crate::info_log), which checks the level first.
pub fn emit_info(flag: InfoFlag, level: u8, message: String) {
    #[cfg(feature = "tracing")]
    crate::tracing_bridge::forward_info(flag, level, &message);
    record(DiagnosticEvent::Info {
        flag,
        level,
        message,
    });
}

/// Buffers a debug message; see [`emit_info`].
pub fn emit_debug(flag: DebugFlag, level: u8, message: String) {
    #[cfg(feature = "tracing")]
    crate::tracing_bridge::forward_debug(flag, level, &message);
    record(DiagnosticEvent::Debug {
        flag,
        level,
        message,
    });
}

/// Takes every buffered event in emission order.
pub fn drain_events() -> Vec<DiagnosticEvent> {
    PENDING.with(|pending| pending.take())
}

/// Applies an `--info` token such as `copy2` to the current thread.
pub fn apply_info_flag(token: &str) -> Result<(), String> {
    with_config(|config| config.apply_info_flag(token))
}

/// Applies a `--debug` token such as `filter2` to the current thread.
pub fn apply_debug_flag(token: &str) -> Result<(), String> {
    with_config(|config| config.apply_debug_flag(token))
}
