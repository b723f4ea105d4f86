#![deny(missing_docs)]
//! Log macros for the engine and the `tally` binary.
//!
//! Everything goes through the `log` facade; the binary picks the sink.
//! `tally_core` has no dependency on this crate.

pub use log::LevelFilter;

/// `log::trace!` under the workspace name.
#[macro_export]
macro_rules! tally_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// `log::debug!` under the workspace name.
#[macro_export]
macro_rules! tally_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// `log::info!` under the workspace name.
#[macro_export]
macro_rules! tally_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// `log::warn!` under the workspace name.
#[macro_export]
macro_rules! tally_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// `log::error!` under the workspace name.
#[macro_export]
macro_rules! tally_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Level named in a config file, e.g. `"debug"` or `"WARN"`. `None` if unknown.
pub fn parse_level(name: &str) -> Option<LevelFilter> {
    name.trim().parse().ok()
}

/// Send log output of every test binary to stderr, at debug level unless
/// built in release mode.
///
/// Each test calls this; only the first call in a process installs a logger.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let _ = TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Never,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_level_names_case_insensitively() {
        assert_eq!(parse_level("debug"), Some(LevelFilter::Debug));
        assert_eq!(parse_level(" WARN "), Some(LevelFilter::Warn));
        assert_eq!(parse_level("off"), Some(LevelFilter::Off));
        assert_eq!(parse_level("loud"), None);
    }

    #[test]
    fn macros_forward_to_log() {
        initialize_for_tests();
        tally_trace!("trace {}", 1);
        tally_debug!("debug {}", 2);
        tally_info!("info {}", 3);
        tally_warn!("warn {}", 4);
        tally_error!("error {}", 5);
    }

    #[test]
    fn second_initialization_is_ignored() {
        initialize_for_tests();
        initialize_for_tests();
        tally_info!("still logging");
    }
}
