//! Error constructors and input conversion rules.

use std::any::Any;
use std::error::Error as StdError;
use std::sync::Arc;

use crate::stacktrace;
use crate::types::{Error, Node};

/// Conversion applied to every raw constructor input.
///
/// - an [`Error`] is used as-is; `&Error` clones the handle,
/// - `&str` and `String` become simple message errors,
/// - `Option` elides `None`.
///
/// Foreign [`std::error::Error`] values are admitted unchanged
/// through [`external`], and other values are stringified explicitly
/// through [`message`] or [`messagef!`](crate::messagef).
pub trait ErrorValue {
    /// Convert into an error, or nothing.
    fn into_error_value(self) -> Option<Error>;
}

impl ErrorValue for Error {
    fn into_error_value(self) -> Option<Error> {
        Some(self)
    }
}

impl ErrorValue for &str {
    fn into_error_value(self) -> Option<Error> {
        Some(message(self))
    }
}

impl ErrorValue for String {
    fn into_error_value(self) -> Option<Error> {
        Some(message(self))
    }
}

impl ErrorValue for &Error {
    fn into_error_value(self) -> Option<Error> {
        Some(self.clone())
    }
}

impl<V: ErrorValue> ErrorValue for Option<V> {
    fn into_error_value(self) -> Option<Error> {
        self.and_then(ErrorValue::into_error_value)
    }
}

/// Admit any [`std::error::Error`] value, reusing the handle when the
/// value is already an [`Error`].
///
/// This backs the blanket `Result` extension methods, which see own
/// and foreign error types through the same bound.
pub(crate) fn adopt<E>(err: E) -> Error
where
    E: StdError + Send + Sync + 'static,
{
    let mut slot = Some(err);
    let any: &mut dyn Any = &mut slot;
    if let Some(own) = any.downcast_mut::<Option<Error>>() {
        if let Some(err) = own.take() {
            return err;
        }
    }
    match slot {
        Some(err) => external(err),
        // The slot is drained only when the downcast above matched.
        None => message(String::new()),
    }
}

/// Simple error with the given message, without a stack trace.
///
/// Each call returns a distinct instance, even for identical text,
/// which makes the result usable as a sentinel ("constant") error.
/// To record a stack trace, use [`new!`](crate::new) instead.
#[must_use]
pub fn message(text: impl Into<String>) -> Error {
    Error::from_node(Node::Message { msg: text.into() })
}

/// Admit a foreign error into the model unchanged.
///
/// The value keeps its type for [`Error::downcast_ref`] and its
/// `source()` chain for ecosystem interop.
#[must_use]
pub fn external<E>(err: E) -> Error
where
    E: StdError + Send + Sync + 'static,
{
    Error::from_node(Node::External {
        inner: Box::new(err),
    })
}

/// Add more errors to an existing aggregate.
///
/// A non-aggregate `err` is converted into one; an aggregate is
/// extended rather than nested. `None` inputs are elided. Zero
/// remaining errors yield `None` and a single remaining error is
/// returned bare rather than wrapped. Never records a stack trace.
#[must_use]
pub fn append<V, I>(err: V, more: I) -> Option<Error>
where
    V: ErrorValue,
    I: IntoIterator,
    I::Item: ErrorValue,
{
    let mut list: Vec<Error> = Vec::new();
    if let Some(err) = err.into_error_value() {
        if let Node::Multi { errors } = err.node() {
            list.extend(errors.iter().cloned());
        } else {
            list.push(err);
        }
    }
    for item in more {
        if let Some(err) = item.into_error_value() {
            list.push(err);
        }
    }
    match list.len() {
        0 => None,
        1 => list.pop(),
        _ => Some(Error::from_node(Node::Multi { errors: list })),
    }
}

/// Wrap `err` with a contextual `wrapper` error.
///
/// The wrapper should generally be a simple sentinel: its own stack
/// trace and detail are ignored by rendering, while identity and type
/// queries see both branches. A `None` wrapper returns `err`
/// unchanged; a `None` err yields `None`.
#[must_use]
pub fn with_wrapper(wrapper: impl ErrorValue, err: impl ErrorValue) -> Option<Error> {
    let next = err.into_error_value()?;
    Some(match wrapper.into_error_value() {
        None => next,
        Some(wrapper) => wrap_with(wrapper, next),
    })
}

pub(crate) fn wrap_with(wrapper: Error, next: Error) -> Error {
    Error::from_node(Node::Wrapper {
        wrapper: Some(wrapper),
        next,
        msg: None,
    })
}

pub(crate) fn stack_with(next: Error, stack: stacktrace::Callers) -> Error {
    Error::from_node(Node::Stack { next, stack })
}

/// Wrap an error with a stack trace captured at the point of the
/// call. `skip` omits that many additional frames above the call
/// site. A `None` err yields `None`.
#[inline(never)]
#[must_use]
pub fn with_stack_trace(err: impl ErrorValue, skip: usize) -> Option<Error> {
    let next = err.into_error_value()?;
    Some(stack_with(next, stacktrace::capture(skip + 1)))
}

/// Attach a keyed value to an error. A `None` err yields `None`.
///
/// Values are collected with [`Error::values`]; when a chain carries
/// the same key twice, the outermost annotation wins.
#[must_use]
pub fn with_value<V, T>(err: V, key: impl Into<String>, value: T) -> Option<Error>
where
    V: ErrorValue,
    T: Any + Send + Sync,
{
    let next = err.into_error_value()?;
    Some(Error::from_node(Node::Value {
        next,
        key: key.into(),
        value: Arc::new(value),
    }))
}

#[doc(hidden)]
#[must_use]
pub fn join_values<const N: usize>(vals: [Option<Error>; N]) -> Option<Error> {
    let mut joined: Option<Error> = None;
    for err in vals.into_iter().rev().flatten() {
        joined = Some(match joined {
            None => err,
            Some(next) => wrap_with(err, next),
        });
    }
    joined
}

#[doc(hidden)]
#[inline(never)]
#[must_use]
pub fn new_values<const N: usize>(vals: [Option<Error>; N]) -> Option<Error> {
    let joined = join_values(vals)?;
    Some(stack_with(joined, stacktrace::capture(1)))
}

#[doc(hidden)]
#[must_use]
pub fn joinf_values<const N: usize>(msg: String, wrapped: [Option<Error>; N]) -> Error {
    let mut errs: Vec<Error> = wrapped.into_iter().flatten().collect();
    match errs.len() {
        0 => return message(msg),
        1 => {
            let next = errs.remove(0);
            return Error::from_node(Node::Wrapper {
                wrapper: None,
                next,
                msg: Some(msg),
            });
        }
        _ => {}
    }
    let mut chained = errs.remove(errs.len() - 1);
    while errs.len() > 1 {
        let wrapper = errs.remove(errs.len() - 1);
        chained = wrap_with(wrapper, chained);
    }
    let outermost = errs.remove(0);
    Error::from_node(Node::Wrapper {
        wrapper: Some(outermost),
        next: chained,
        msg: Some(msg),
    })
}

#[doc(hidden)]
#[inline(never)]
#[must_use]
pub fn newf_values<const N: usize>(msg: String, wrapped: [Option<Error>; N]) -> Error {
    let joined = joinf_values(msg, wrapped);
    stack_with(joined, stacktrace::capture(1))
}

#[doc(hidden)]
#[inline(never)]
#[must_use]
pub fn new_message(msg: String) -> Error {
    stack_with(message(msg), stacktrace::capture(1))
}
