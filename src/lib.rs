//! Error handling utilities with composition and rendering support.
//!
//! This crate provides:
//! - Error chaining with contextual wrappers and stack-trace capture
//! - Aggregation of independent errors into one composite error
//! - Structured multi-line rendering of error chains
//! - Keyed value annotations on error chains
//! - Conversion of recovered panics into ordinary errors
//!
//! Errors are cheap to clone and safe to share across threads; every
//! node is immutable once constructed.
//!
//! ```
//! use xerrs::ResultExt;
//!
//! fn load() -> xerrs::Result<String> {
//!     std::fs::read_to_string("service.toml").context("failed to read configuration")
//! }
//!
//! if let Err(err) = load() {
//!     eprint!("{}", xerrs::sprint(&err));
//! }
//! ```

pub mod constructors;
pub mod display;
pub mod extensions;
pub mod logging;
#[doc(hidden)]
pub mod macros;
pub mod panic;
pub mod stacktrace;
pub mod types;

pub use constructors::{
    append, external, message, with_stack_trace, with_value, with_wrapper, ErrorValue,
};
#[doc(hidden)]
pub use constructors::{join_values, joinf_values, new_message, new_values, newf_values};
pub use display::{fprint, print, set_output, sprint};
pub use extensions::{OptionExt, ResultExt};
pub use panic::{catch, from_panic, PanicPayload};
pub use stacktrace::{Callers, Frame};
pub use types::Error;

/// Result type alias using this crate's [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
