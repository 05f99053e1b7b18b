//! crates/logging/src/macros.rs
//! Level-gated diagnostic macros.
//!
//! The macros check the thread-local verbosity before formatting so disabled
//! categories cost a single comparison.

/// Emit an info diagnostic when `flag` is configured at `level` or above.
///
/// # Example
/// ```
/// use logging::{InfoFlag, VerbosityConfig, drain_events, info_log, init};
///
/// init(VerbosityConfig::from_verbose_level(1));
/// info_log!(Copy, 1, "copied {}", "a.txt");
/// assert_eq!(drain_events()[0].message(), "copied a.txt");
/// ```
#[macro_export]
macro_rules! info_log {
    ($flag:ident, $level:expr, $($arg:tt)+) => {
        if $crate::info_gte($crate::InfoFlag::$flag, $level) {
            $crate::emit_info($crate::InfoFlag::$flag, $level, format!($($arg)+));
        }
    };
}

/// Emit a debug diagnostic when `flag` is configured at `level` or above.
///
/// # Example
/// ```
/// use logging::{VerbosityConfig, debug_log, drain_events, init};
///
/// init(VerbosityConfig::default());
/// debug_log!(Filter, 1, "never rendered: {}", 42);
/// assert!(drain_events().is_empty());
/// ```
#[macro_export]
macro_rules! debug_log {
    ($flag:ident, $level:expr, $($arg:tt)+) => {
        if $crate::debug_gte($crate::DebugFlag::$flag, $level) {
            $crate::emit_debug($crate::DebugFlag::$flag, $level, format!($($arg)+));
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::{DiagnosticEvent, VerbosityConfig, drain_events, init};

    #[test]
    fn info_log_respects_level() {
        let mut config = VerbosityConfig::default();
        config.info.skip = 1;
        init(config);
        drain_events();

        info_log!(Skip, 1, "skipping {}", "a");
        info_log!(Skip, 2, "too verbose {}", "b");

        let events = drain_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].message(), "skipping a");
    }

    #[test]
    fn debug_log_records_flag_and_level() {
        let mut config = VerbosityConfig::default();
        config.debug.flist = 3;
        init(config);
        drain_events();

        debug_log!(Flist, 3, "entering {:?}", "dir");

        assert_eq!(
            drain_events(),
            vec![DiagnosticEvent::Debug {
                flag: crate::DebugFlag::Flist,
                level: 3,
                message: "entering \"dir\"".to_string(),
            }]
        );
    }
}
