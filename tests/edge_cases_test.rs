//! Edge Case Tests
//!
//! Tests for unusual inputs and boundary behavior:
//! - Empty collections and empty metadata
//! - Null values and null metadata writes
//! - Duplicate names
//! - Unicode names
//! - Values shared across threads
//! - Re-entrant metadata access

mod common;

use common::{init_logging, user_collection};
use datumkit::{
    Error, LabeledValue, LabeledValueFactory, Metadata, NamedCollection, SharedMetadata, Value,
    collection,
};
use serde_json::json;
use std::thread;

#[test]
fn test_empty_collection() {
    let empty = NamedCollection::<Metadata>::from_entries(Vec::<(String, _)>::new()).unwrap();

    assert!(empty.is_empty());
    assert!(empty.get_list().is_empty());
    assert!(empty.get_data().is_empty());
    assert!(empty.map(|value, _| value.value().clone()).is_empty());
    assert!(!empty.exist(""));
}

#[test]
fn test_null_default_value() {
    let mut nothing = LabeledValue::of(Value::Null);
    assert!(nothing.is_default());

    nothing.set_value(json!("something"));
    nothing.reset();
    assert_eq!(nothing.value(), &Value::Null);
}

#[test]
fn test_null_metadata_write_is_a_write() {
    let value = LabeledValue::of(1).meta_str("label", "One");

    value.set_meta_field("label", Value::Null);

    assert_eq!(value.get_meta_field("label"), Some(Value::Null));
    assert_eq!(value.get_meta_str("label"), None);
}

#[test]
fn test_remove_meta_field() {
    let value = LabeledValue::of(1).meta_str("label", "One");

    assert_eq!(value.remove_meta_field("label"), Some(json!("One")));
    assert_eq!(value.get_meta_field("label"), None);
    assert_eq!(value.remove_meta_field("label"), None);
}

#[test]
fn test_empty_and_unicode_names() {
    let odd = collection! {
        "" => LabeledValue::of(json!(0)),
        "名前" => LabeledValue::of(json!("ジェームズ")),
    };

    assert!(odd.exist(""));
    assert_eq!(odd.get_value("名前").unwrap(), &json!("ジェームズ"));
}

#[test]
fn test_duplicate_names_in_macro_keep_last() {
    init_logging();
    let dup = collection! {
        "a" => LabeledValue::of(json!(1)),
        "a" => LabeledValue::of(json!(2)),
    };

    assert_eq!(dup.len(), 1);
    assert_eq!(dup.get_value("a").unwrap(), &json!(2));
}

#[test]
fn test_from_entries_reports_duplicate_name() {
    let err = NamedCollection::from_entries([
        ("x", LabeledValue::of(json!(1))),
        ("y", LabeledValue::of(json!(2))),
        ("x", LabeledValue::of(json!(3))),
    ])
    .unwrap_err();

    assert!(matches!(err, Error::DuplicateEntry(ref name) if name == "x"));
    assert_eq!(err.to_string(), "Duplicate entry name: x");
}

#[test]
fn test_missing_name_is_uniform() {
    let mut users = user_collection();

    for err in [
        users.get("password").unwrap_err(),
        users.get_value("password").unwrap_err(),
        users.get_metadata("password").unwrap_err(),
        users.get_value_as::<String>("password").unwrap_err(),
    ] {
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Entry not found: password");
    }

    assert!(users.set_value("password", "hunter2").unwrap_err().is_not_found());
    assert!(users.get_mut("password").unwrap_err().is_not_found());
    assert!(!users.exist("password"));
}

#[test]
fn test_data_shape_mismatch() {
    #[derive(Debug, serde::Deserialize)]
    #[allow(dead_code)]
    struct Wrong {
        username: u32,
    }

    let users = user_collection();
    let err = users.get_data_as::<Wrong>().unwrap_err();

    assert!(matches!(err, Error::TypeMismatch { .. }));
}

#[test]
fn test_from_data_rejects_scalars() {
    let factory = LabeledValueFactory::<Metadata>::new();

    for (data, shape) in [(json!(1), "number"), (json!("x"), "string"), (json!(null), "null")] {
        let err = NamedCollection::from_data(&data, &factory).unwrap_err();
        assert!(matches!(err, Error::InvalidShape(ref s) if s == shape));
    }
}

#[test]
fn test_one_value_in_two_collections_shares_metadata() {
    let shared = LabeledValue::of(json!(true)).meta_bool("public", false);

    let first = collection! { "flag" => shared.clone_with(false) };
    let second = collection! { "flag" => shared };

    first
        .get_metadata("flag")
        .unwrap()
        .set_field("public", json!(true));

    assert_eq!(second.get("flag").unwrap().get_meta_bool("public"), Some(true));
}

#[test]
fn test_shared_metadata_across_threads() {
    let record: SharedMetadata = SharedMetadata::default();
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let record = record.clone();
            thread::spawn(move || record.set_field(&format!("worker{i}"), json!(i)))
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(record.field_names().len(), 4);
    assert_eq!(record.get_field("worker2"), Some(json!(2)));
}

#[test]
fn test_collection_moves_across_threads() {
    let users = user_collection();

    let data = thread::spawn(move || users.get_data()).join().unwrap();

    assert_eq!(data["age"], json!(24));
}

#[test]
#[should_panic(expected = "would deadlock")]
fn test_reading_value_metadata_inside_its_own_closure_panics() {
    let value = LabeledValue::of(1).meta_bool("public", true);
    let handle = value.metadata();

    handle.with_mut(|_| value.get_meta_bool("public"));
}

#[test]
fn test_closure_uses_the_record_it_is_given() {
    let value = LabeledValue::of(1).meta_bool("public", true);

    let public = value
        .metadata()
        .with_mut(|record| record.insert("public".into(), json!(false)));

    assert_eq!(public, Some(json!(true)));
    assert_eq!(value.get_meta_bool("public"), Some(false));
}

#[test]
fn test_other_records_are_usable_inside_a_closure() {
    let factory = LabeledValueFactory::builder()
        .default_metadata(Metadata::new())
        .share_metadata()
        .build();
    let first = factory.create(1);
    let second = factory.create(2);
    let other = LabeledValue::of(3).meta_str("label", "Other");

    // A different record may be read while one is locked
    first
        .metadata()
        .with_mut(|record| record.insert("label".into(), json!(other.get_meta_str("label"))));

    assert_eq!(second.get_meta_str("label").as_deref(), Some("Other"));
}
