#![deny(missing_docs)]
//! Shared logging utilities for the dashboard workspace.
//!
//! Every crate logs through the `dash_*` macros so the backing facade can be
//! swapped in one place. The application decides where records go; tests call
//! [`initialize_for_tests`].

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! dash_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! dash_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! dash_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! dash_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! dash_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Short label for an API operation, used as a stable prefix in log lines.
///
/// Keeping the labels here means the client and the application shell agree
/// on how a request is named when grepping `indexwatch.log`.
pub fn operation_label(operation: &str) -> String {
    format!("[api:{operation}]")
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    use simplelog::{ColorChoice, CombinedLogger, Config, TermLogger, TerminalMode};

    let level = if cfg!(debug_assertions) {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    // Another test may already own the global logger.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operation_label_is_bracketed() {
        assert_eq!(operation_label("list_urls"), "[api:list_urls]");
    }

    #[test]
    fn test_logger_can_be_initialized_twice() {
        initialize_for_tests();
        initialize_for_tests();
        dash_info!("logger ready");
    }
}
