//! Tests for error chain construction and input conversion rules.

#![allow(clippy::unwrap_used)]

use std::error::Error as StdError;
use std::io;

use xerrs::{append, external, join, message, new, with_wrapper, Error, OptionExt, ResultExt};

#[test]
fn new_preserves_single_error_message() {
    let cause = message("permission denied");
    let err = new!(&cause).unwrap();
    assert_eq!(err.to_string(), "permission denied");
    assert!(err.is(&cause));
}

#[test]
fn new_chains_right_to_left() {
    let err = new!("a", "b").unwrap();
    assert_eq!(err.to_string(), "a: b");
}

#[test]
fn new_elides_none_values() {
    let err = new!(None::<Error>, "a", "b").unwrap();
    assert_eq!(err.to_string(), "a: b");
}

#[test]
fn new_with_no_values_is_none() {
    assert!(new!().is_none());
    assert!(new!(None::<Error>).is_none());
    assert!(new!(None::<Error>, None::<Error>).is_none());
}

#[test]
fn new_records_stack_join_does_not() {
    let stacked = new!("boom").unwrap();
    assert!(stacked.stack_trace().is_some());

    let sentinel = join!("boom").unwrap();
    assert!(sentinel.stack_trace().is_none());
}

#[test]
fn join_chains_like_new() {
    let cause = message("disk full");
    let err = join!("writing snapshot", &cause).unwrap();
    assert_eq!(err.to_string(), "writing snapshot: disk full");
    assert!(err.is(&cause));
}

#[test]
fn message_instances_are_distinct() {
    let a = message("same text");
    let b = message("same text");
    assert_eq!(a.to_string(), b.to_string());
    assert!(!a.is(&b));
    assert!(a.clone().is(&a));
}

#[test]
fn foreign_errors_are_used_as_is() {
    let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
    let err = new!("opening state file", external(io_err)).unwrap();
    assert_eq!(err.to_string(), "opening state file: access denied");

    let found = err.downcast_ref::<io::Error>().unwrap();
    assert_eq!(found.kind(), io::ErrorKind::PermissionDenied);
}

#[test]
fn with_wrapper_composes_message() {
    let err = with_wrapper(message("wrapper"), message("err")).unwrap();
    assert_eq!(err.to_string(), "wrapper: err");
    assert!(err.stack_trace().is_none());
}

#[test]
fn with_wrapper_matches_both_branches() {
    let sentinel = message("wrapper");
    let cause = message("err");
    let err = with_wrapper(&sentinel, &cause).unwrap();
    assert!(err.is(&sentinel));
    assert!(err.is(&cause));
    assert!(!err.is(&message("unrelated")));
}

#[test]
fn with_wrapper_without_wrapper_is_identity() {
    let cause = message("err");
    let err = with_wrapper(None::<Error>, &cause).unwrap();
    assert!(err.is(&cause));
    assert_eq!(err.to_string(), "err");
    assert!(err.next().is_none());
}

#[test]
fn with_wrapper_without_error_is_none() {
    assert!(with_wrapper(message("wrapper"), None::<Error>).is_none());
}

#[test]
fn wrapper_branch_is_not_on_primary_chain() {
    let sentinel = message("wrapper");
    let cause = message("err");
    let err = with_wrapper(&sentinel, &cause).unwrap();
    let next = err.next().unwrap();
    assert!(next.is(&cause));
    assert!(!next.is(&sentinel));
}

#[test]
fn source_chain_walks_primary_links() {
    let err = new!("a", "b", "c").unwrap();
    let mut messages = Vec::new();
    let mut source: Option<&(dyn StdError + 'static)> = Some(&err);
    while let Some(err) = source {
        messages.push(err.to_string());
        source = err.source();
    }
    assert_eq!(messages, vec!["a: b: c", "a: b: c", "b: c", "c"]);
}

#[test]
fn result_context_wraps_foreign_error() {
    let result: Result<(), io::Error> =
        Err(io::Error::new(io::ErrorKind::NotFound, "no such file"));
    let err = result.context("reading configuration").unwrap_err();
    assert_eq!(err.to_string(), "reading configuration: no such file");
    assert!(err.stack_trace().is_none());
    assert!(err.downcast_ref::<io::Error>().is_some());
}

#[test]
fn result_context_passes_own_error_through() {
    let cause = message("stale lease");
    let result: Result<(), Error> = Err(cause.clone());
    let err = result.context("renewing").unwrap_err();
    assert!(err.is(&cause));
    assert_eq!(err.to_string(), "renewing: stale lease");
}

#[test]
fn result_with_stack_trace_captures_here() {
    let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::Other, "broken pipe"));
    let err = result.with_stack_trace().unwrap_err();
    assert_eq!(err.to_string(), "broken pipe");
    assert!(err.stack_trace().is_some());
}

#[test]
fn option_ext_converts_none() {
    let missing: Option<u32> = None;
    let err = missing.ok_or_message("missing shard id").unwrap_err();
    assert_eq!(err.to_string(), "missing shard id");

    assert_eq!(Some(7).ok_or_message("unused").unwrap(), 7);
}

fn guard(value: i32) -> xerrs::Result<i32> {
    xerrs::ensure!(value > 0, "value out of range: {value}");
    Ok(value)
}

#[test]
fn ensure_returns_stacked_error() {
    assert_eq!(guard(3).unwrap(), 3);

    let err = guard(-2).unwrap_err();
    assert_eq!(err.to_string(), "value out of range: -2");
    assert!(err.stack_trace().is_some());
}

fn reject() -> xerrs::Result<()> {
    xerrs::bail!("rejected by policy {}", "quota");
}

#[test]
fn bail_returns_stacked_error() {
    let err = reject().unwrap_err();
    assert_eq!(err.to_string(), "rejected by policy quota");
    assert!(err.stack_trace().is_some());
}

#[test]
fn append_accepts_error_values() {
    let err = append(None::<Error>, ["a", "b"]).unwrap();
    assert_eq!(err.to_string(), "the following errors occurred: [a, b]");
}
