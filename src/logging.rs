// Conditional logging macros - debug/info only active in debug builds

use env_logger::Env;

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!(target: "ordle", $($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!(target: "ordle", $($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

// Storage problems are worth seeing in release builds too.
#[macro_export]
macro_rules! warn_log {
    ($($arg:tt)*) => {
        log::warn!(target: "ordle", $($arg)*);
    };
}

pub fn default_filter(verbose: bool) -> &'static str {
    if verbose { "ordle=debug" } else { "warn" }
}

/// Install `env_logger`; later calls are ignored.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_filter(verbose));
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .try_init();
}
