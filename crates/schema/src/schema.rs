//! Schema definition and the validation pipeline.
//!
//! [`Schema::validate_with`] runs two phases that never interleave:
//!
//! 1. **Structure**: the document must be a JSON object, overlays must not
//!    repeat keys, every key must name a declared field (unless the schema
//!    allows unknown fields) and no key may come from both sources. All
//!    problems are collected; any of them stops validation here.
//! 2. **Fields**: each declared field, in declaration order, is located
//!    (JSON first, then overlay), coerced, and checked by its validators.
//!    Every failure is collected, including one per bad array element.
//!
//! Embedded objects run both phases again on their own sub-document, and
//! their errors are merged flat under the container path.

use std::collections::{BTreeMap, HashSet};

use serde_json::{Map, Value as Json};
use sift_validator::foundation::{ValidationError, ValidationErrors};

use crate::coerce::RawKind;
use crate::error::SchemaError;
use crate::field::{Field, Shape};
use crate::object::Object;
use crate::value::Value;

/// A flat string overlay, such as URL query parameters.
pub type Params = BTreeMap<String, String>;

/// Path under which document-level problems are reported.
pub const ROOT_PATH: &str = "$";

type Document = Map<String, Json>;

/// An ordered, immutable set of field descriptors.
///
/// A schema is `Send + Sync` and holds no per-call state, so one instance can
/// serve any number of concurrent validations.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<Field>,
    allow_unknown_fields: bool,
}

impl Schema {
    /// Defines a schema from fields in declaration order.
    ///
    /// # Errors
    ///
    /// Returns an error if two fields share a leaf name or a qualified name.
    pub fn define(fields: impl IntoIterator<Item = Field>) -> Result<Self, SchemaError> {
        let fields: Vec<Field> = fields.into_iter().collect();
        check_unique(&fields)?;
        tracing::debug!(fields = fields.len(), "schema defined");
        Ok(Self {
            fields,
            allow_unknown_fields: false,
        })
    }

    /// Accepts keys that name no declared field.
    ///
    /// Unknown overlay keys and unknown top-level JSON keys are then copied
    /// into the result instead of being reported.
    #[must_use = "builder methods must be chained or built"]
    pub fn allow_unknown_fields(mut self) -> Self {
        self.allow_unknown_fields = true;
        self
    }

    #[must_use]
    pub fn allows_unknown_fields(&self) -> bool {
        self.allow_unknown_fields
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Looks up a field by leaf name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// Returns a new schema with the fields of both, `self` first.
    ///
    /// The result allows unknown fields if either input does.
    ///
    /// # Errors
    ///
    /// Returns an error if the union repeats a leaf name or a qualified name.
    pub fn extend(&self, other: &Schema) -> Result<Schema, SchemaError> {
        let fields: Vec<Field> = self.fields.iter().chain(&other.fields).cloned().collect();
        check_unique(&fields)?;
        tracing::debug!(fields = fields.len(), "schema extended");
        Ok(Schema {
            fields,
            allow_unknown_fields: self.allow_unknown_fields || other.allow_unknown_fields,
        })
    }

    // ========================================================================
    // VALIDATION
    // ========================================================================

    /// Validates a JSON document. An empty string is an empty document.
    ///
    /// # Errors
    ///
    /// Returns every structural or field error found, keyed by path.
    pub fn validate(&self, json: &str) -> Result<Object, ValidationErrors> {
        self.validate_with(json, &[])
    }

    /// Validates a JSON document together with flat string overlays.
    ///
    /// Overlay values go through the same coercion as JSON strings, so
    /// `"42"` satisfies an integer field.
    ///
    /// # Errors
    ///
    /// Returns every structural or field error found, keyed by path.
    pub fn validate_with(&self, json: &str, params: &[&Params]) -> Result<Object, ValidationErrors> {
        tracing::debug!(
            fields = self.fields.len(),
            overlays = params.len(),
            "validating document"
        );

        let mut errors = ValidationErrors::new();
        let overlay = merge_overlays(params, &mut errors);
        let Some(document) = parse_document(json, &mut errors) else {
            tracing::debug!(errors = errors.len(), "document rejected");
            return Err(errors);
        };

        self.check_structure(&document, &overlay, &mut errors);
        if errors.has_errors() {
            tracing::debug!(errors = errors.len(), "structural checks failed");
            return Err(errors);
        }

        let mut result = self.validate_fields(&document, &overlay, &mut errors);
        if errors.has_errors() {
            tracing::debug!(errors = errors.len(), "field validation failed");
            return Err(errors);
        }

        if self.allow_unknown_fields {
            self.copy_unknown(&document, &overlay, &mut result);
        }
        Ok(result)
    }

    /// Runs both phases on an embedded object. Paths are relative to it.
    fn validate_embedded(&self, document: &Document) -> Result<Object, ValidationErrors> {
        let overlay = Params::new();
        let mut errors = ValidationErrors::new();
        self.check_structure(document, &overlay, &mut errors);
        if errors.has_errors() {
            return Err(errors);
        }
        let mut result = self.validate_fields(document, &overlay, &mut errors);
        if self.allow_unknown_fields {
            self.copy_unknown(document, &overlay, &mut result);
        }
        errors.into_result(result)
    }

    fn check_structure(&self, document: &Document, overlay: &Params, errors: &mut ValidationErrors) {
        for key in overlay.keys() {
            match self.field(key) {
                Some(field) if field.is_nested() => errors.add(
                    key.as_str(),
                    ValidationError::new(
                        "invalid_parameter",
                        format!("parameter '{key}' is mapped to an embedded object or array"),
                    ),
                ),
                Some(_) => {}
                None if !self.allow_unknown_fields => errors.add(
                    key.as_str(),
                    ValidationError::new("unknown_field", format!("unknown parameter '{key}'")),
                ),
                None => {}
            }
        }

        for key in document.keys() {
            if overlay.contains_key(key) {
                errors.add(
                    key.as_str(),
                    ValidationError::new(
                        "conflict",
                        format!("duplicate parameter in params and json '{key}'"),
                    ),
                );
            } else if !self.allow_unknown_fields && self.field(key).is_none() {
                errors.add(
                    key.as_str(),
                    ValidationError::new("unknown_field", format!("unknown json field '{key}'")),
                );
            }
        }
    }

    fn validate_fields(
        &self,
        document: &Document,
        overlay: &Params,
        errors: &mut ValidationErrors,
    ) -> Object {
        let mut result = Object::new();
        for field in &self.fields {
            let raw = match (document.get(field.name()), overlay.get(field.name())) {
                (Some(node), _) => Raw::Json(node),
                (None, Some(text)) => Raw::Text(text),
                (None, None) => {
                    if field.is_required() {
                        errors.add(field.name(), ValidationError::required(field.name()));
                        tracing::trace!(field = field.name(), outcome = "missing", "field checked");
                    } else {
                        tracing::trace!(field = field.name(), outcome = "absent", "field checked");
                    }
                    continue;
                }
            };

            match validate_field(field, raw, errors) {
                Some(value) => {
                    tracing::trace!(field = field.name(), outcome = "valid", "field checked");
                    result.insert_nested(field.unique_name(), value);
                }
                None => {
                    tracing::trace!(field = field.name(), outcome = "invalid", "field checked");
                }
            }
        }
        result
    }

    /// Copies keys that name no declared field into `result`, keeping any
    /// value already stored under the same key.
    fn copy_unknown(&self, document: &Document, overlay: &Params, result: &mut Object) {
        for (key, node) in document {
            if self.field(key).is_some() || result.contains_key(key) {
                continue;
            }
            if let Some(value) = Value::from_untyped(node) {
                result.insert(key.clone(), value);
            }
        }
        for (key, text) in overlay {
            if self.field(key).is_none() && !result.contains_key(key) {
                result.insert(key.clone(), Value::String(text.clone()));
            }
        }
    }
}

// ============================================================================
// FIELD VALIDATION
// ============================================================================

/// Where a field's raw value came from.
#[derive(Clone, Copy)]
enum Raw<'a> {
    Json(&'a Json),
    Text(&'a str),
}

impl Raw<'_> {
    fn kind_name(self) -> &'static str {
        match self {
            Raw::Json(node) => RawKind::of(node).name(),
            Raw::Text(_) => RawKind::String.name(),
        }
    }
}

/// Validates one present field, recording failures under its name.
///
/// Returns `None` if anything failed.
fn validate_field(field: &Field, raw: Raw<'_>, errors: &mut ValidationErrors) -> Option<Value> {
    let path = field.name();
    match field.shape() {
        Shape::Scalar(coercer) => {
            let outcome = match raw {
                Raw::Json(node) => coercer.from_json(node),
                Raw::Text(text) => coercer.from_text(text),
            };
            outcome.map_err(|e| errors.add(path, e)).ok()
        }
        Shape::Array(coercer) => {
            let items = expect_array(raw, path, errors)?;
            let mut values = Vec::with_capacity(items.len());
            let mut failed = false;
            for (index, item) in items.iter().enumerate() {
                match coercer.from_json(item) {
                    Ok(value) => values.push(value),
                    Err(e) => {
                        errors.add(format!("{path}[{index}]"), e);
                        failed = true;
                    }
                }
            }
            (!failed).then_some(Value::Array(values))
        }
        Shape::Object(schema) => {
            let Raw::Json(Json::Object(document)) = raw else {
                errors.add(path, ValidationError::type_mismatch("object", raw.kind_name()));
                return None;
            };
            match schema.validate_embedded(document) {
                Ok(object) => Some(Value::Object(object)),
                Err(nested) => {
                    errors.merge_nested(path, nested);
                    None
                }
            }
        }
        Shape::ArrayOfObject(schema) => {
            let items = expect_array(raw, path, errors)?;
            let mut values = Vec::with_capacity(items.len());
            let mut failed = false;
            for (index, item) in items.iter().enumerate() {
                let item_path = format!("{path}[{index}]");
                let Json::Object(document) = item else {
                    errors.add(
                        item_path,
                        ValidationError::type_mismatch("object", RawKind::of(item).name()),
                    );
                    failed = true;
                    continue;
                };
                match schema.validate_embedded(document) {
                    Ok(object) => values.push(Value::Object(object)),
                    Err(nested) => {
                        errors.merge_nested(&item_path, nested);
                        failed = true;
                    }
                }
            }
            (!failed).then_some(Value::Array(values))
        }
    }
}

fn expect_array<'a>(raw: Raw<'a>, path: &str, errors: &mut ValidationErrors) -> Option<&'a [Json]> {
    if let Raw::Json(Json::Array(items)) = raw {
        return Some(items.as_slice());
    }
    errors.add(path, ValidationError::type_mismatch("array", raw.kind_name()));
    None
}

// ============================================================================
// INPUT PREPARATION
// ============================================================================

/// Merges overlays in order. A key seen in an earlier overlay is a conflict;
/// the later value is kept.
fn merge_overlays(params: &[&Params], errors: &mut ValidationErrors) -> Params {
    let mut merged = Params::new();
    for overlay in params {
        for (key, value) in *overlay {
            if merged.insert(key.clone(), value.clone()).is_some() {
                errors.add(
                    key.as_str(),
                    ValidationError::new("conflict", format!("duplicated parameter '{key}'")),
                );
            }
        }
    }
    merged
}

/// Parses the top-level document. Blank input is an empty document.
fn parse_document(json: &str, errors: &mut ValidationErrors) -> Option<Document> {
    if json.trim().is_empty() {
        return Some(Document::new());
    }
    match serde_json::from_str::<Json>(json) {
        Ok(Json::Object(document)) => Some(document),
        Ok(other) => {
            errors.add(
                ROOT_PATH,
                ValidationError::type_mismatch("object", RawKind::of(&other).name()),
            );
            None
        }
        Err(e) => {
            errors.add(
                ROOT_PATH,
                ValidationError::new("invalid_json", format!("invalid json: {e}")),
            );
            None
        }
    }
}

fn check_unique(fields: &[Field]) -> Result<(), SchemaError> {
    let mut names = HashSet::new();
    let mut qualified = HashSet::new();
    for field in fields {
        if !names.insert(field.name()) {
            return Err(SchemaError::DuplicateField {
                name: field.name().to_owned(),
            });
        }
        if let Some(name) = field.qualified_name() {
            if !qualified.insert(name) {
                return Err(SchemaError::DuplicateQualifiedName {
                    name: name.to_owned(),
                });
            }
        }
    }
    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================
