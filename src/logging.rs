//! Logging integration for rendered error reports.

use std::sync::Once;

use crate::display::sprint;
use crate::types::Error;

static INIT_LOGGER: Once = Once::new();

/// Initialize `env_logger` once at application startup.
///
/// Levels are configured through the `RUST_LOG` environment variable,
/// e.g. `RUST_LOG=info` for production or
/// `RUST_LOG=my_service=debug` for module-specific levels.
pub fn init() {
    INIT_LOGGER.call_once(|| {
        env_logger::Builder::from_default_env()
            .format_timestamp_micros()
            .init();
    });
}

/// Initialize logging for test environments.
///
/// Use this in test modules to avoid initialization conflicts.
pub fn init_test() {
    let _ = env_logger::Builder::from_default_env()
        .is_test(true)
        .try_init();
}

/// Emit the rendered report for `err` at error level.
pub fn log_error(err: &Error) {
    log::error!("{}", sprint(err).trim_end());
}

/// Emit the rendered report for `err` at warn level.
pub fn log_warning(err: &Error) {
    log::warn!("{}", sprint(err).trim_end());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message;

    #[test]
    fn logging_operations() {
        init_test();

        log_error(&message("write failed"));
        log_warning(&message("retrying"));
    }
}
