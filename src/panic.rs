//! Panic capture and conversion into ordinary errors.

use std::any::Any;
use std::fmt;
use std::panic::{self, UnwindSafe};
use std::sync::Mutex;

use crate::stacktrace;
use crate::types::{Error, Node};

/// A recovered panic payload.
///
/// The textual form used in error messages is fixed at capture time:
/// `&str` and `String` payloads render verbatim, anything else renders
/// as `Box<dyn Any>`. The original boxed payload stays available
/// through [`PanicPayload::take`] for inspection or re-raising with
/// [`std::panic::resume_unwind`].
pub struct PanicPayload {
    text: Option<String>,
    cell: Mutex<Option<Box<dyn Any + Send>>>,
}

impl PanicPayload {
    pub(crate) fn new(payload: Box<dyn Any + Send>) -> Self {
        let text = if let Some(s) = payload.downcast_ref::<&'static str>() {
            Some((*s).to_string())
        } else {
            payload.downcast_ref::<String>().cloned()
        };
        Self {
            text,
            cell: Mutex::new(Some(payload)),
        }
    }

    /// Text form of the payload used in error messages.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.text.as_deref().unwrap_or("Box<dyn Any>")
    }

    /// Take the original boxed payload.
    ///
    /// The payload is handed out once; later calls return `None`. The
    /// textual form from [`PanicPayload::as_str`] is unaffected.
    #[must_use]
    pub fn take(&self) -> Option<Box<dyn Any + Send>> {
        match self.cell.lock() {
            Ok(mut guard) => guard.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        }
    }
}

impl fmt::Debug for PanicPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PanicPayload").field(&self.as_str()).finish()
    }
}

/// Run `f`, converting a panic into an error.
///
/// On normal return the closure's value is passed through. When `f`
/// unwinds, the payload is wrapped into a panic error carrying a stack
/// trace captured at the catch site, so the trace's first frame names
/// the caller of `catch`. The error arm is produced exactly once per
/// unwind and never on normal return.
///
/// Closures over mutable state may need
/// [`std::panic::AssertUnwindSafe`].
#[inline(never)]
pub fn catch<T, F>(f: F) -> Result<T, Error>
where
    F: FnOnce() -> T + UnwindSafe,
{
    match panic::catch_unwind(f) {
        Ok(value) => Ok(value),
        Err(payload) => Err(stacked_panic(payload, 1)),
    }
}

/// Convert an already-recovered panic payload into an error.
///
/// Accepts the value produced by [`std::panic::catch_unwind`]'s error
/// arm. The stack trace is captured here, so call this close to the
/// recovery site.
#[inline(never)]
pub fn from_panic(payload: Box<dyn Any + Send>) -> Error {
    stacked_panic(payload, 1)
}

/// Wrap a payload in a panic node and a stack carrier, skipping
/// `skip` frames above this function.
#[inline(never)]
fn stacked_panic(payload: Box<dyn Any + Send>, skip: usize) -> Error {
    let panicked = Error::from_node(Node::Panic {
        payload: PanicPayload::new(payload),
    });
    Error::from_node(Node::Stack {
        next: panicked,
        stack: stacktrace::capture(skip + 1),
    })
}
