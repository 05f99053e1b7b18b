#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` provides the verbosity system shared by the treesift workspace.
//! Diagnostics are grouped into info categories ([`InfoFlag`]) aimed at users
//! and debug categories ([`DebugFlag`]) aimed at developers. Each category
//! carries an independent level so callers can enable, for example, filter
//! tracing without drowning in traversal output.
//!
//! # Design
//!
//! - [`VerbosityConfig`] holds per-flag levels and can be derived from a `-v`
//!   count or refined with flag tokens such as `skip2` or `all`.
//! - The active configuration lives in thread-local storage ([`init`],
//!   [`info_gte`], [`debug_gte`]). Walks are single-threaded, so a
//!   thread-local keeps level checks lock-free.
//! - [`info_log!`] and [`debug_log!`] check the level before formatting and
//!   record a [`DiagnosticEvent`] that front-ends drain with
//!   [`drain_events`].
//! - With the `tracing` feature every event is forwarded to `tracing` and
//!   `init_tracing` installs a `tracing-subscriber` formatter.
//!
//! # Examples
//!
//! ```
//! use logging::{VerbosityConfig, debug_log, drain_events, init};
//!
//! let mut config = VerbosityConfig::default();
//! config.apply_debug_flag("filter2").unwrap();
//! init(config);
//!
//! debug_log!(Filter, 2, "pattern {} matched", "*.log");
//! assert_eq!(drain_events().len(), 1);
//! ```

mod config;
mod levels;
mod macros;
mod thread_local;
#[cfg(feature = "tracing")]
mod tracing_bridge;

pub use config::VerbosityConfig;
pub use levels::{DebugFlag, DebugLevels, InfoFlag, InfoLevels};
pub use thread_local::{
    DiagnosticEvent, apply_debug_flag, apply_info_flag, current, debug_gte, drain_events,
    emit_debug, emit_info, info_gte, init,
};
#[cfg(feature = "tracing")]
pub use tracing_bridge::{
    TARGET_PREFIX, debug_target, env_filter_for, info_target, init_tracing,
};
