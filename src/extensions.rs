//! Extension traits for `Result` and `Option`.

use std::error::Error as StdError;

use crate::constructors::{adopt, message, stack_with, wrap_with};
use crate::stacktrace;
use crate::types::Error;

/// Error-composition helpers for `Result`.
pub trait ResultExt<T> {
    /// Wrap the error with a contextual message, without recording a
    /// stack trace.
    fn context(self, context: impl Into<String>) -> Result<T, Error>;

    /// Wrap the error with a stack trace captured at the call site.
    fn with_stack_trace(self) -> Result<T, Error>;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context(self, context: impl Into<String>) -> Result<T, Error> {
        self.map_err(|err| wrap_with(message(context), adopt(err)))
    }

    #[inline(never)]
    fn with_stack_trace(self) -> Result<T, Error> {
        match self {
            Ok(value) => Ok(value),
            Err(err) => Err(stack_with(adopt(err), stacktrace::capture(1))),
        }
    }
}

/// Error-composition helpers for `Option`.
pub trait OptionExt<T> {
    /// Convert `None` into a message error.
    fn ok_or_message(self, msg: impl Into<String>) -> Result<T, Error>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_message(self, msg: impl Into<String>) -> Result<T, Error> {
        self.ok_or_else(|| message(msg))
    }
}
