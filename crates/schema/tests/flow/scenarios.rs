//! End-to-end validation flows over flat schemas.

use pretty_assertions::assert_eq;
use rstest::rstest;
use sift_schema::prelude::*;

fn person() -> Schema {
    Schema::define([
        Field::scalar::<String>("name")
            .with(min_length(3))
            .build()
            .unwrap(),
        Field::scalar::<i64>("age").with(between(18, 120)).build().unwrap(),
    ])
    .unwrap()
}

fn params(pairs: &[(&str, &str)]) -> Params {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect()
}

// ---------------------------------------------------------------------------
// Required and bounded scalars
// ---------------------------------------------------------------------------

#[rstest]
#[case::short_name(r#"{"name":"Al","age":30}"#, "name", "min_length")]
#[case::old(r#"{"name":"Alice","age":200}"#, "age", "between")]
#[case::age_as_text(r#"{"name":"Alice","age":"thirty"}"#, "age", "type_mismatch")]
#[case::age_as_float(r#"{"name":"Alice","age":30.5}"#, "age", "invalid_format")]
fn single_field_failure(#[case] json: &str, #[case] path: &str, #[case] code: &str) {
    let errors = person().validate(json).unwrap_err();
    assert_eq!(errors.paths().collect::<Vec<_>>(), [path]);
    assert_eq!(errors.get(path).unwrap().code, code);
}

#[test]
fn valid_person() {
    let person = person().validate(r#"{"name":"Alice","age":30}"#).unwrap();
    assert_eq!(person.must_string("name"), "Alice");
    assert_eq!(person.must_i64("age"), 30);
    assert_eq!(person.fields(), ["age", "name"]);
}

#[test]
fn missing_required_fields_are_all_reported() {
    let errors = person().validate("{}").unwrap_err();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors.get("name").unwrap().code, "required");
    assert_eq!(
        errors.get("age").unwrap().message,
        "age is required but not found"
    );
}

#[test]
fn optional_email() {
    let schema = Schema::define([Field::scalar::<String>("email")
        .with(email())
        .optional()
        .build()
        .unwrap()])
    .unwrap();

    let empty = schema.validate("{}").unwrap();
    assert!(empty.is_empty());
    assert_eq!(empty.string("email"), None);

    let errors = schema.validate(r#"{"email":"not-an-email"}"#).unwrap_err();
    assert_eq!(errors.get("email").unwrap().code, "email");

    let ok = schema.validate(r#"{"email":"gopher@example.com"}"#).unwrap();
    assert_eq!(ok.string("email"), Some("gopher@example.com"));
}

// ---------------------------------------------------------------------------
// Arrays of scalars
// ---------------------------------------------------------------------------

fn tagged() -> Schema {
    Schema::define([Field::array::<String>("tags")
        .with(min_length(2))
        .build()
        .unwrap()])
    .unwrap()
}

#[test]
fn array_reports_the_bad_element() {
    let errors = tagged().validate(r#"{"tags":["ab","c"]}"#).unwrap_err();
    assert_eq!(errors.paths().collect::<Vec<_>>(), ["tags[1]"]);
}

#[test]
fn array_reports_every_bad_element() {
    let errors = tagged().validate(r#"{"tags":["x","ok",7]}"#).unwrap_err();
    assert_eq!(errors.paths().collect::<Vec<_>>(), ["tags[0]", "tags[2]"]);
    assert_eq!(errors.get("tags[0]").unwrap().code, "min_length");
    assert_eq!(errors.get("tags[2]").unwrap().code, "type_mismatch");
}

#[test]
fn array_requires_a_json_array() {
    let errors = tagged().validate(r#"{"tags":"ab"}"#).unwrap_err();
    assert_eq!(
        errors.get("tags").unwrap().message,
        "type mismatch: expected array but got raw type string"
    );
}

#[test]
fn array_values_keep_order() {
    let result = tagged().validate(r#"{"tags":["go","rs","zig"]}"#).unwrap();
    assert_eq!(result.must_string_array("tags"), ["go", "rs", "zig"]);
    assert_eq!(result.must_string("tags.2"), "zig");
}

// ---------------------------------------------------------------------------
// Unknown fields
// ---------------------------------------------------------------------------

fn ids() -> Schema {
    Schema::define([Field::scalar::<String>("id").build().unwrap()]).unwrap()
}

#[test]
fn unknown_json_field_is_rejected_by_default() {
    let errors = ids().validate(r#"{"id":"1","extra":"x"}"#).unwrap_err();
    assert_eq!(
        errors.get("extra").unwrap().message,
        "unknown json field 'extra'"
    );
}

#[test]
fn permissive_schema_keeps_unknown_fields() {
    let result = ids()
        .allow_unknown_fields()
        .validate(r#"{"id":"1","extra":"x"}"#)
        .unwrap();
    assert_eq!(result.must_string("id"), "1");
    assert_eq!(result.string("extra"), Some("x"));
}

#[test]
fn permissive_schema_keeps_unknown_parameters() {
    let result = ids()
        .allow_unknown_fields()
        .validate_with(r#"{"id":"1"}"#, &[&params(&[("page", "2")])])
        .unwrap();
    assert_eq!(result.string("page"), Some("2"));
}

// ---------------------------------------------------------------------------
// Overlays
// ---------------------------------------------------------------------------

#[test]
fn overlay_values_are_coerced() {
    let schema = Schema::define([
        Field::scalar::<u16>("page").build().unwrap(),
        Field::scalar::<bool>("desc").optional().build().unwrap(),
        Field::scalar::<Timestamp>("since").optional().build().unwrap(),
    ])
    .unwrap();
    let result = schema
        .validate_with(
            "",
            &[
                &params(&[("page", "3"), ("desc", "TRUE")]),
                &params(&[("since", "2024-05-01")]),
            ],
        )
        .unwrap();
    assert_eq!(result.must_u16("page"), 3);
    assert!(result.must_bool("desc"));
    assert_eq!(
        result.must_timestamp("since").to_rfc3339(),
        "2024-05-01T00:00:00+00:00"
    );
}

#[test]
fn overlay_overflow_is_reported() {
    let schema = Schema::define([Field::scalar::<u8>("limit").build().unwrap()]).unwrap();
    let errors = schema
        .validate_with("", &[&params(&[("limit", "256")])])
        .unwrap_err();
    assert_eq!(errors.get("limit").unwrap().code, "overflow");
}

#[test]
fn json_and_overlay_may_not_share_a_key() {
    let errors = person()
        .validate_with(
            r#"{"name":"Alice","age":30}"#,
            &[&params(&[("age", "31")])],
        )
        .unwrap_err();
    assert_eq!(errors.get("age").unwrap().code, "conflict");
}

// ---------------------------------------------------------------------------
// Persistence-qualified names
// ---------------------------------------------------------------------------

#[test]
fn qualified_fields_flatten_to_column_keys() {
    let email = PersistentColumn::<String>::new("users", "email", "email")
        .unwrap()
        .with(email());
    let schema = Schema::define([
        FieldBuilder::from_persistent(&email).build().unwrap(),
        Field::scalar::<i32>("age")
            .qualified("users.age.age")
            .build()
            .unwrap(),
        Field::scalar::<String>("note").optional().build().unwrap(),
    ])
    .unwrap();

    let result = schema
        .validate(r#"{"email":"a@b.io","age":41,"note":"hi"}"#)
        .unwrap();
    assert_eq!(result.must_string("users.email.email"), "a@b.io");
    assert_eq!(result.fields(), ["note", "users"]);

    let flat = result.flatten();
    let keys: Vec<_> = flat.keys().map(String::as_str).collect();
    assert_eq!(keys, ["note", "users.age.age", "users.email.email"]);
    assert_eq!(flat["users.age.age"], Value::I32(41));
}

#[test]
fn persistent_array_field_validates_each_element() {
    let tags = PersistentColumn::<String>::new("posts", "tags", "labels")
        .unwrap()
        .with(min_length(2));
    let schema = Schema::define([
        FieldBuilder::array_from_persistent(&tags).build().unwrap(),
        Field::scalar::<String>("title")
            .qualified("posts.title.title")
            .build()
            .unwrap(),
    ])
    .unwrap();

    let errors = schema
        .validate(r#"{"labels":["go","x"],"title":"Hi"}"#)
        .unwrap_err();
    assert_eq!(errors.paths().collect::<Vec<_>>(), ["labels[1]"]);

    let flat = schema
        .validate(r#"{"labels":["go","rs"],"title":"Hi"}"#)
        .unwrap()
        .flatten();
    let keys: Vec<_> = flat.keys().map(String::as_str).collect();
    assert_eq!(keys, ["posts.tags.labels", "posts.title.title"]);
    assert_eq!(
        flat["posts.tags.labels"],
        Value::Array(vec![Value::from("go"), Value::from("rs")])
    );
}

// ---------------------------------------------------------------------------
// Sharing
// ---------------------------------------------------------------------------

#[test]
fn one_schema_serves_concurrent_validations() {
    let schema = person();
    std::thread::scope(|scope| {
        for age in 18..40_i64 {
            let schema = &schema;
            scope.spawn(move || {
                let json = format!(r#"{{"name":"Alice","age":{age}}}"#);
                let result = schema.validate(&json).unwrap();
                assert_eq!(result.must_i64("age"), age);
                assert!(schema.validate(r#"{"name":"Al","age":30}"#).is_err());
            });
        }
    });
}
