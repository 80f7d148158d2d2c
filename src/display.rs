//! Rendering of errors into multi-line reports.
//!
//! A report walks the primary chain only: the first node is prefixed
//! `Error: `, later nodes `Previous error: `. Nodes contribute their
//! detail when they have one; detail-less nodes beyond the first are
//! silent because their text already appears in the head line through
//! message concatenation. Reports always end with a newline.

use std::error::Error as StdError;
use std::fmt;
use std::io::{self, Write};
use std::sync::Mutex;

use once_cell::sync::Lazy;

use crate::types::{Error, Node};

const FIRST_ERROR_PREFIX: &str = "Error: ";
const PREVIOUS_ERROR_PREFIX: &str = "Previous error: ";

/// Process-wide default sink used by [`print`], stderr unless
/// replaced through [`set_output`] at initialization.
static OUTPUT_SINK: Lazy<Mutex<Box<dyn Write + Send>>> =
    Lazy::new(|| Mutex::new(Box::new(io::stderr())));

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message_string())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(render(self).trim_end())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self.node() {
            Node::Wrapper { next, .. } | Node::Stack { next, .. } | Node::Value { next, .. } => {
                Some(next)
            }
            Node::External { inner } => inner.source(),
            _ => None,
        }
    }
}

fn render(err: &Error) -> String {
    let mut out = String::new();
    let mut first = true;
    let mut current = Some(err);
    while let Some(err) = current {
        match err.detail() {
            Some(detail) if !detail.is_empty() => {
                out.push_str(if first {
                    FIRST_ERROR_PREFIX
                } else {
                    PREVIOUS_ERROR_PREFIX
                });
                out.push_str(&err.message_string());
                out.push('\n');
                out.push_str(&detail);
                if !out.ends_with('\n') {
                    out.push('\n');
                }
            }
            _ => {
                if first {
                    out.push_str(FIRST_ERROR_PREFIX);
                    out.push_str(&err.message_string());
                    out.push('\n');
                }
            }
        }
        first = false;
        current = err.next();
    }
    out
}

/// Render an error into a multi-line report ending with a newline.
#[must_use]
pub fn sprint(err: &Error) -> String {
    render(err)
}

/// Render an error to `w`, returning the number of bytes written.
///
/// The writer's failure, if any, is returned uninterpreted.
pub fn fprint(w: &mut dyn Write, err: &Error) -> io::Result<usize> {
    let report = render(err);
    w.write_all(report.as_bytes())?;
    Ok(report.len())
}

/// Render an error to the process-wide default sink.
pub fn print(err: &Error) -> io::Result<()> {
    let report = render(err);
    let mut sink = match OUTPUT_SINK.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    sink.write_all(report.as_bytes())
}

/// Replace the process-wide sink used by [`print`].
///
/// Intended for initialization. Renders directed at explicit writers
/// through [`fprint`] are unaffected, so concurrent rendering never
/// contends on this sink.
pub fn set_output(w: impl Write + Send + 'static) {
    let mut sink = match OUTPUT_SINK.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    };
    *sink = Box::new(w);
}

/// Indent every line except the first with one tab, preserving a
/// single trailing newline.
pub(crate) fn indent(s: &str) -> String {
    let (body, end) = match s.strip_suffix('\n') {
        Some(body) => (body, "\n"),
        None => (s, ""),
    };
    let mut out = body.replace('\n', "\n\t");
    out.push_str(end);
    out
}
