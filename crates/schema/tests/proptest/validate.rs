//! Whole-schema properties: required fields, idempotence and per-element
//! array reporting.

use proptest::prelude::*;
use sift_schema::prelude::*;

fn arb_name() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,8}"
}

/// A schema over distinct names; the first one is required.
fn schema_for(names: &[String]) -> Schema {
    let fields = names.iter().enumerate().map(|(i, name)| {
        let builder = Field::scalar::<String>(name.as_str());
        let builder = if i == 0 { builder } else { builder.optional() };
        builder.build().unwrap()
    });
    Schema::define(fields).unwrap()
}

proptest! {
    #[test]
    fn absent_required_field_is_reported(
        names in prop::collection::btree_set(arb_name(), 1..6),
        with_overlay in any::<bool>(),
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let schema = schema_for(&names);

        // Supply every optional field, never the required one.
        let mut document = serde_json::Map::new();
        let mut overlay = Params::new();
        for name in &names[1..] {
            if with_overlay {
                overlay.insert(name.clone(), "v".to_owned());
            } else {
                document.insert(name.clone(), serde_json::Value::from("v"));
            }
        }
        let json = serde_json::Value::Object(document).to_string();

        let errors = schema.validate_with(&json, &[&overlay]).unwrap_err();
        prop_assert_eq!(errors.len(), 1);
        let error = errors.get(&names[0]).unwrap();
        prop_assert_eq!(&*error.code, "required");
    }

    #[test]
    fn validation_is_idempotent(age in any::<i64>(), name in "\\PC{0,6}") {
        let schema = Schema::define([
            Field::scalar::<String>("name").with(min_length(3)).build().unwrap(),
            Field::scalar::<i64>("age").with(between(18, 120)).build().unwrap(),
        ])
        .unwrap();
        let json = serde_json::json!({"name": name, "age": age}).to_string();

        let first = schema.validate(&json);
        let second = schema.validate(&json);
        match (first, second) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(a), Err(b)) => prop_assert_eq!(a.to_string(), b.to_string()),
            _ => prop_assert!(false, "outcomes differ"),
        }
    }

    #[test]
    fn every_bad_element_is_reported(flags in prop::collection::vec(any::<bool>(), 0..12)) {
        let schema = Schema::define([
            Field::array::<String>("codes").with(exact_length(2)).build().unwrap(),
        ])
        .unwrap();
        let items: Vec<&str> = flags.iter().map(|ok| if *ok { "ab" } else { "x" }).collect();
        let json = serde_json::json!({ "codes": items }).to_string();

        let expected: Vec<String> = flags
            .iter()
            .enumerate()
            .filter(|(_, ok)| !**ok)
            .map(|(i, _)| format!("codes[{i}]"))
            .collect();

        match schema.validate(&json) {
            Ok(result) => {
                prop_assert!(expected.is_empty());
                prop_assert_eq!(result.must_string_array("codes").len(), flags.len());
            }
            Err(errors) => {
                let mut paths: Vec<String> = errors.paths().map(str::to_owned).collect();
                let mut wanted = expected.clone();
                paths.sort();
                wanted.sort();
                prop_assert_eq!(paths, wanted);
            }
        }
    }
}
