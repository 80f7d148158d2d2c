//! Macros for error creation and handling.

/// Create an error from the given values, recording a stack trace at
/// the point of the call.
///
/// Values are converted by the [`ErrorValue`](crate::ErrorValue)
/// rules and chained right-to-left, so the first value becomes the
/// outermost context: `new!("a", "b")` renders as `"a: b"`. `None`
/// values are elided; when nothing remains the result is `None`.
///
/// ```
/// let err = xerrs::new!("access denied", xerrs::message("token expired"));
/// assert_eq!(err.map(|e| e.to_string()).as_deref(), Some("access denied: token expired"));
/// ```
///
/// To define a sentinel error without a stack trace, use
/// [`message`](crate::message) or [`join!`](crate::join) instead.
#[macro_export]
macro_rules! new {
    () => {
        ::core::option::Option::<$crate::Error>::None
    };
    ($($val:expr),+ $(,)?) => {
        $crate::new_values([$($crate::ErrorValue::into_error_value($val)),+])
    };
}

/// Join the given values into a single error chain, without recording
/// a stack trace.
///
/// Conversion and chaining behave exactly as in [`new!`](crate::new);
/// the absence of a capture-site stack makes the result suitable for
/// sentinel ("constant") error definitions.
#[macro_export]
macro_rules! join {
    () => {
        ::core::option::Option::<$crate::Error>::None
    };
    ($($val:expr),+ $(,)?) => {
        $crate::join_values([$($crate::ErrorValue::into_error_value($val)),+])
    };
}

/// Create a simple error with a formatted message, without recording
/// a stack trace.
///
/// Each call returns a distinct instance, even for identical text.
#[macro_export]
macro_rules! messagef {
    ($($arg:tt)*) => {
        $crate::message(::std::format!($($arg)*))
    };
}

/// Create an error with a formatted message that wraps the errors
/// listed after `;`, recording a stack trace at the point of the
/// call.
///
/// The formatted string becomes the rendered message; the listed
/// errors are chained right-associated beneath it, so unwrapping
/// yields them one at a time rather than as a list:
///
/// ```
/// let missing = xerrs::message("not found");
/// let err = xerrs::newf!("loading profile: {missing}"; &missing);
/// assert_eq!(err.to_string(), "loading profile: not found");
/// assert!(err.is(&missing));
/// ```
///
/// Without the `;` part this is a formatted message with a stack
/// trace.
#[macro_export]
macro_rules! newf {
    ($fmt:literal $(, $arg:expr)* ; $($err:expr),+ $(,)?) => {
        $crate::newf_values(
            ::std::format!($fmt $(, $arg)*),
            [$($crate::ErrorValue::into_error_value($err)),+],
        )
    };
    ($($arg:tt)*) => {
        $crate::newf_values::<0>(::std::format!($($arg)*), [])
    };
}

/// Join errors beneath a formatted message, without recording a stack
/// trace.
///
/// Same shape as [`newf!`](crate::newf): the formatted string is the
/// rendered message and the errors listed after `;` form a linear
/// chain beneath it.
#[macro_export]
macro_rules! joinf {
    ($fmt:literal $(, $arg:expr)* ; $($err:expr),+ $(,)?) => {
        $crate::joinf_values(
            ::std::format!($fmt $(, $arg)*),
            [$($crate::ErrorValue::into_error_value($err)),+],
        )
    };
    ($($arg:tt)*) => {
        $crate::joinf_values::<0>(::std::format!($($arg)*), [])
    };
}

/// Return early with a stack-carrying error built from a format
/// string.
#[macro_export]
macro_rules! bail {
    ($($arg:tt)*) => {
        return ::core::result::Result::Err($crate::new_message(::std::format!($($arg)*)))
    };
}

/// Return early with an error when a condition does not hold.
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($arg:tt)*) => {
        if !$cond {
            $crate::bail!($($arg)*);
        }
    };
}
