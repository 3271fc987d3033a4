//! Rendering of the aggregated error report.

use sift_schema::prelude::*;
use sift_schema::validator::foundation::REPORT_HEADER;

fn signup() -> Schema {
    Schema::define([
        Field::scalar::<String>("name")
            .with(min_length(3))
            .build()
            .unwrap(),
        Field::scalar::<i64>("age").with(between(18, 120)).build().unwrap(),
        Field::array::<String>("roles")
            .with(one_of_str(["admin", "member"]))
            .optional()
            .build()
            .unwrap(),
        Field::scalar::<String>("password")
            .with(contains_all(&[CharClass::Upper, CharClass::Digit]))
            .build()
            .unwrap(),
    ])
    .unwrap()
}

#[test]
fn report_lists_paths_in_order() {
    let errors = signup()
        .validate(r#"{"name":"Al","age":200,"roles":["admin","root","guest"]}"#)
        .unwrap_err();

    insta::assert_snapshot!(errors.to_string(), @r"
    validation failed with the following errors:
    - age: Value must be between 18 and 120
    - name: Must be at least 3 characters
    - password: password is required but not found
    - roles[1]: Value must be one of [admin, member]
    - roles[2]: Value must be one of [admin, member]
    ");
}

#[test]
fn single_error_keeps_the_header() {
    let errors = signup()
        .validate(r#"{"name":"Alice","age":30}"#)
        .unwrap_err();

    assert_eq!(errors.len(), 1);
    assert!(errors.to_string().starts_with(REPORT_HEADER));
    insta::assert_snapshot!(errors.to_string(), @r"
    validation failed with the following errors:
    - password: password is required but not found
    ");
}

#[test]
fn structural_report() {
    let errors = signup()
        .validate(r#"{"name":"Alice","age":30,"password":"Secret1","nick":"al","bio":""}"#)
        .unwrap_err();

    insta::assert_json_snapshot!(errors, @r#"
    {
      "bio": "unknown json field 'bio'",
      "nick": "unknown json field 'nick'"
    }
    "#);
}

#[test]
fn document_level_errors_use_the_root_path() {
    let errors = signup().validate("[1, 2]").unwrap_err();
    insta::assert_snapshot!(errors.to_string(), @r"
    validation failed with the following errors:
    - $: type mismatch: expected object but got raw type array
    ");
}
