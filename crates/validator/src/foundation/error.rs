//! Error types for validation failures
//!
//! [`ValidationError`] describes one failed check: a machine-readable code, a
//! human message and ordered parameters. [`ValidationErrors`] aggregates them
//! by field path, keeping at most one error per path.
//!
//! All string fields use `Cow<'static, str>` for zero-allocation in the
//! common case of static error codes and messages.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};

/// First line of a rendered [`ValidationErrors`] report.
pub const REPORT_HEADER: &str = "validation failed with the following errors:";

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A structured validation error.
///
/// # Examples
///
/// ```rust,ignore
/// use sift_validator::foundation::ValidationError;
///
/// let error = ValidationError::new("min_length", "Must be at least 5 characters")
///     .with_param("min", "5")
///     .with_param("actual", "3");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error code for programmatic handling and i18n.
    ///
    /// Examples: "min_length", "type_mismatch", "required"
    pub code: Cow<'static, str>,

    /// Human-readable error message in English.
    pub message: Cow<'static, str>,

    /// Field path the error was recorded under, once aggregated.
    ///
    /// Examples: "user.email", "tags[1]", "items[0].id"
    pub field: Option<Cow<'static, str>>,

    /// Parameters for the error message template.
    ///
    /// Stored as ordered key-value pairs (typically 0-3 params).
    pub params: Vec<(Cow<'static, str>, Cow<'static, str>)>,
}

impl ValidationError {
    /// Creates a new validation error with a code and message.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
            params: Vec::new(),
        }
    }

    /// Sets the field path for this error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: impl Into<Cow<'static, str>>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Adds a parameter to the error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{field}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ValidationError {
    /// Creates a "required" error for a field missing from every input source.
    pub fn required(name: &str) -> Self {
        Self::new("required", format!("{name} is required but not found"))
    }

    /// Creates a "min_length" error.
    pub fn min_length(min: usize, actual: usize) -> Self {
        Self::new("min_length", format!("Must be at least {min} characters"))
            .with_param("min", min.to_string())
            .with_param("actual", actual.to_string())
    }

    /// Creates a "max_length" error.
    pub fn max_length(max: usize, actual: usize) -> Self {
        Self::new("max_length", format!("Must be at most {max} characters"))
            .with_param("max", max.to_string())
            .with_param("actual", actual.to_string())
    }

    /// Creates an "invalid_format" error for text that is not a literal of
    /// `expected`.
    pub fn invalid_format(
        expected: impl Into<Cow<'static, str>>,
        message: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self::new("invalid_format", message).with_param("expected", expected)
    }

    /// Creates a "type_mismatch" error.
    pub fn type_mismatch(
        expected: impl Into<Cow<'static, str>>,
        actual: impl Into<Cow<'static, str>>,
    ) -> Self {
        let expected = expected.into();
        let actual = actual.into();
        Self::new(
            "type_mismatch",
            format!("type mismatch: expected {expected} but got raw type {actual}"),
        )
        .with_param("expected", expected)
        .with_param("actual", actual)
    }

    /// Creates a "between" error for a value outside an inclusive range.
    pub fn out_of_range<T: fmt::Display>(min: T, max: T, actual: T) -> Self {
        Self::new("between", format!("Value must be between {min} and {max}"))
            .with_param("min", min.to_string())
            .with_param("max", max.to_string())
            .with_param("actual", actual.to_string())
    }

    /// Creates a "custom" error with a message.
    pub fn custom(message: impl Into<Cow<'static, str>>) -> Self {
        Self::new("custom", message)
    }
}

// ============================================================================
// ERROR AGGREGATE
// ============================================================================

/// Field-path keyed collection of validation errors.
///
/// Holds at most one error per path; a later [`add`](Self::add) for the same
/// path replaces the earlier one. Iteration, `Display` and serialization all
/// follow lexicographic path order, so two reports with the same entries render
/// identically.
///
/// ```text
/// validation failed with the following errors:
/// - age: Value must be between 18 and 120
/// - name: Must be at least 3 characters
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<String, ValidationError>,
}

impl ValidationErrors {
    /// Creates a new empty error collection.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `error` under `path`, replacing any earlier error for it.
    pub fn add(&mut self, path: impl Into<String>, error: ValidationError) {
        let path = path.into();
        let error = error.with_field(path.clone());
        self.errors.insert(path, error);
    }

    /// Merges a nested report, prefixing each of its paths with `prefix`.
    ///
    /// Entries are merged flat. No wrapper entry is added for the container,
    /// so a nested report with a single entry contributes exactly that entry.
    pub fn merge_nested(&mut self, prefix: &str, nested: ValidationErrors) {
        for (path, error) in nested.errors {
            self.add(join_path(prefix, &path), error);
        }
    }

    /// Returns true if there are any errors.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Returns the number of errors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Returns true if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the error recorded for `path`, if any.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&ValidationError> {
        self.errors.get(path)
    }

    /// Returns true if an error is recorded for `path`.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.errors.contains_key(path)
    }

    /// Iterates `(path, error)` pairs in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ValidationError)> {
        self.errors.iter().map(|(path, error)| (path.as_str(), error))
    }

    /// Iterates the recorded paths in order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    /// Converts to a Result.
    #[must_use = "result must be used"]
    pub fn into_result<T>(self, ok_value: T) -> Result<T, ValidationErrors> {
        if self.is_empty() {
            Ok(ok_value)
        } else {
            Err(self)
        }
    }
}

fn join_path(prefix: &str, path: &str) -> String {
    if prefix.is_empty() {
        path.to_owned()
    } else if path.is_empty() {
        prefix.to_owned()
    } else {
        format!("{prefix}.{path}")
    }
}

impl IntoIterator for ValidationErrors {
    type Item = (String, ValidationError);
    type IntoIter = std::collections::btree_map::IntoIter<String, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<P: Into<String>> FromIterator<(P, ValidationError)> for ValidationErrors {
    fn from_iter<I: IntoIterator<Item = (P, ValidationError)>>(iter: I) -> Self {
        let mut errors = Self::new();
        for (path, error) in iter {
            errors.add(path, error);
        }
        errors
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REPORT_HEADER)?;
        for (path, error) in &self.errors {
            write!(f, "\n- {path}: {}", error.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.errors.len()))?;
        for (path, error) in &self.errors {
            map.serialize_entry(path, error.message.as_ref())?;
        }
        map.end()
    }
}

// ============================================================================
// TESTS
// ============================================================================
