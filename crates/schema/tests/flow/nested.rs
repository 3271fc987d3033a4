//! Embedded objects and arrays of objects.

use pretty_assertions::assert_eq;
use sift_schema::prelude::*;

fn contact() -> Schema {
    Schema::define([
        Field::scalar::<String>("email")
            .with(email())
            .build()
            .unwrap(),
        Field::scalar::<String>("phone")
            .with(only_contains(&[CharClass::Digit]))
            .optional()
            .build()
            .unwrap(),
    ])
    .unwrap()
}

fn account() -> Schema {
    Schema::define([
        Field::object("user", contact()).build().unwrap(),
        Field::array_of_object("items", line_item())
            .optional()
            .build()
            .unwrap(),
    ])
    .unwrap()
}

fn line_item() -> Schema {
    Schema::define([
        Field::scalar::<u32>("id").build().unwrap(),
        Field::scalar::<String>("price")
            .with(decimal(6, 2))
            .build()
            .unwrap(),
    ])
    .unwrap()
}

#[test]
fn single_nested_failure_is_one_entry() {
    let errors = account()
        .validate(r#"{"user":{"email":"bad"}}"#)
        .unwrap_err();
    assert_eq!(errors.len(), 1);
    let (path, error) = errors.iter().next().unwrap();
    assert_eq!(path, "user.email");
    assert_eq!(error.message, "Value is not a valid email address");
}

#[test]
fn nested_failures_merge_flat() {
    let errors = account()
        .validate(r#"{"user":{"phone":"12a"}}"#)
        .unwrap_err();
    assert_eq!(
        errors.paths().collect::<Vec<_>>(),
        ["user.email", "user.phone"]
    );
    assert_eq!(errors.get("user.email").unwrap().code, "required");
}

#[test]
fn nested_unknown_field_is_rejected() {
    let errors = account()
        .validate(r#"{"user":{"email":"a@b.io","nick":"x"}}"#)
        .unwrap_err();
    assert_eq!(
        errors.get("user.nick").unwrap().message,
        "unknown json field 'nick'"
    );
}

#[test]
fn embedded_object_requires_an_object() {
    let errors = account().validate(r#"{"user":"a@b.io"}"#).unwrap_err();
    assert_eq!(
        errors.get("user").unwrap().message,
        "type mismatch: expected object but got raw type string"
    );
}

#[test]
fn array_of_objects_reports_per_index() {
    let errors = account()
        .validate(
            r#"{
                "user": {"email": "a@b.io"},
                "items": [
                    {"id": 1, "price": "9.99"},
                    {"id": -1, "price": "1.234"},
                    "oops"
                ]
            }"#,
        )
        .unwrap_err();
    assert_eq!(
        errors.paths().collect::<Vec<_>>(),
        ["items[1].id", "items[1].price", "items[2]"]
    );
    assert_eq!(errors.get("items[1].id").unwrap().code, "overflow");
    assert_eq!(errors.get("items[2]").unwrap().code, "type_mismatch");
}

#[test]
fn nested_results_are_addressable() {
    let result = account()
        .validate(
            r#"{
                "user": {"email": "a@b.io", "phone": "5550100"},
                "items": [{"id": 1, "price": "9.99"}, {"id": 2, "price": ".5"}]
            }"#,
        )
        .unwrap();

    assert_eq!(result.must_string("user.email"), "a@b.io");
    assert_eq!(result.must_object("user").must_string("phone"), "5550100");
    assert_eq!(result.must_u32("items.1.id"), 2);
    assert_eq!(result.must_object_array("items").len(), 2);
    assert_eq!(result.string("user.missing"), None);
    assert_eq!(result.string("user.email.deeper"), None);

    let flat = result.flatten();
    assert_eq!(flat["user.email"], Value::from("a@b.io"));
    assert!(matches!(flat["items"], Value::Array(ref items) if items.len() == 2));
}

#[test]
#[should_panic(expected = "path part 'first' in 'items.first.id' is not a valid integer index")]
fn non_numeric_index_panics() {
    let result = account()
        .validate(r#"{"user":{"email":"a@b.io"},"items":[{"id":1,"price":"1"}]}"#)
        .unwrap();
    let _ = result.u32("items.first.id");
}

#[test]
#[should_panic(expected = "type mismatch at path 'user.email'")]
fn wrong_type_panics() {
    let result = account()
        .validate(r#"{"user":{"email":"a@b.io"}}"#)
        .unwrap();
    let _ = result.i64("user.email");
}

#[test]
fn serializes_as_plain_json() {
    let result = account()
        .validate(r#"{"user":{"email":"a@b.io"},"items":[{"id":7,"price":"1.50"}]}"#)
        .unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "user": {"email": "a@b.io"},
            "items": [{"id": 7, "price": "1.50"}]
        })
    );
}
