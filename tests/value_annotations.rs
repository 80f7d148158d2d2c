//! Tests for keyed value annotations on error chains.

#![allow(clippy::unwrap_used)]

use xerrs::{message, new, with_value, Error};

#[test]
fn values_exposes_annotations() {
    let err = new!("error").unwrap();
    let err = with_value(err, "shard", "replica-3").unwrap();

    let values = err.values();
    assert_eq!(values.len(), 1);
    let shard = values.get("shard").unwrap();
    assert_eq!(shard.downcast_ref::<&str>(), Some(&"replica-3"));
}

#[test]
fn outer_annotation_wins_on_duplicate_keys() {
    let err = new!("error").unwrap();
    let err = with_value(err, "attempt", 1_i32).unwrap();
    let err = with_value(err, "attempt", 2_i32).unwrap();

    let values = err.values();
    assert_eq!(values.len(), 1);
    let attempt = values.get("attempt").unwrap();
    assert_eq!(attempt.downcast_ref::<i32>(), Some(&2));
    assert_eq!(err.value_ref::<i32>("attempt"), Some(&2));
}

#[test]
fn with_value_on_none_is_none() {
    assert!(with_value(None::<Error>, "key", "value").is_none());
}

#[test]
fn plain_errors_have_no_values() {
    let err = new!("error").unwrap();
    assert!(err.values().is_empty());
    assert!(err.value_ref::<i32>("anything").is_none());
}

#[test]
fn annotation_does_not_change_message() {
    let err = with_value(message("disk failure"), "device", "sdb".to_string()).unwrap();
    assert_eq!(err.to_string(), "disk failure");
    assert_eq!(
        err.value_ref::<String>("device").map(String::as_str),
        Some("sdb")
    );
}

#[test]
fn annotation_is_transparent_to_chain_queries() {
    let cause = message("root cause");
    let err = with_value(new!("ctx", &cause).unwrap(), "attempt", 3_i32).unwrap();
    assert!(err.is(&cause));
    assert!(err.stack_trace().is_some());
    assert_eq!(err.to_string(), "ctx: root cause");
}

#[test]
fn values_accumulate_across_the_chain() {
    let err = new!("error").unwrap();
    let err = with_value(err, "shard", 9_u32).unwrap();
    let err = with_value(err, "node", "storage-1").unwrap();

    let values = err.values();
    assert_eq!(values.len(), 2);
    assert_eq!(err.value_ref::<u32>("shard"), Some(&9));
    assert_eq!(err.value_ref::<&str>("node"), Some(&"storage-1"));
}
