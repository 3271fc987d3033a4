//! Hierarchical result objects and dotted-path lookup.
//!
//! An [`Object`] maps unique field names to [`Value`]s. Paths address nested
//! entries with `.` separators; a segment that meets a sequence must be a
//! zero-based index:
//!
//! ```rust,ignore
//! let city = object.must_string("user.addresses.0.city");
//! ```
//!
//! Lookups distinguish "absent" (`None`) from misuse. Asking for the wrong
//! type, indexing a sequence with a non-numeric segment, or indexing past its
//! end are caller bugs and panic.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::Serialize;

use crate::coerce::Timestamp;
use crate::value::{FromValue, Value};

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '.';

/// Single-level export of an object: dotted leaf path to terminal value.
pub type FlatMap = BTreeMap<String, Value>;

/// A validated, hierarchically addressable result.
///
/// Entries keep insertion order; [`fields`](Self::fields) reports them sorted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Object {
    entries: IndexMap<String, Value>,
}

impl Object {
    /// Creates an empty object.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns true if `key` is a top-level entry.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Iterates top-level entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(key, value)| (key.as_str(), value))
    }

    /// Top-level keys, sorted.
    #[must_use]
    pub fn fields(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    // ========================================================================
    // PATH RESOLUTION
    // ========================================================================

    /// Resolves `path` to a stored value.
    ///
    /// A key stored verbatim (for example a dotted qualified name) wins over
    /// tokenizing. Otherwise the path is walked segment by segment: objects
    /// descend by key, sequences by index, and a scalar with segments left
    /// over yields `None`.
    ///
    /// # Panics
    ///
    /// If a segment applied to a sequence is not a non-negative integer, or is
    /// out of bounds.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        self.resolve(path, path)
    }

    fn resolve<'a>(&'a self, path: &str, full: &str) -> Option<&'a Value> {
        if let Some(value) = self.entries.get(path) {
            return Some(value);
        }
        let (head, rest) = path.split_once(PATH_SEPARATOR)?;
        descend(self.entries.get(head)?, rest, full)
    }

    /// Resolves `path` and reads it as `T`.
    ///
    /// # Panics
    ///
    /// If the stored value is not a `T`, or on a malformed index (see [`get`](Self::get)).
    pub fn get_as<'a, T: FromValue<'a>>(&'a self, path: &str) -> Option<T> {
        let value = self.get(path)?;
        let Some(typed) = T::from_value(value) else {
            panic!(
                "type mismatch at path '{path}': expected {} but found {}",
                T::expected(),
                value.type_name()
            );
        };
        Some(typed)
    }

    /// Like [`get_as`](Self::get_as), but absence is a panic too.
    pub fn must_get_as<'a, T: FromValue<'a>>(&'a self, path: &str) -> T {
        let Some(typed) = self.get_as(path) else {
            panic!("no value found at path '{path}'");
        };
        typed
    }

    // ========================================================================
    // MUTATION
    // ========================================================================

    /// Adds a new top-level entry.
    ///
    /// # Panics
    ///
    /// If `key` contains the path separator or is already present.
    pub fn add(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        let key = key.into();
        assert!(
            !key.contains(PATH_SEPARATOR),
            "key '{key}' must not contain '{PATH_SEPARATOR}'"
        );
        assert!(!self.entries.contains_key(&key), "key '{key}' already exists");
        self.entries.insert(key, value.into());
    }

    /// Replaces an existing top-level entry.
    ///
    /// # Panics
    ///
    /// If `key` is not present.
    pub fn update(&mut self, key: &str, value: impl Into<Value>) {
        let Some(slot) = self.entries.get_mut(key) else {
            panic!("key '{key}' does not exist");
        };
        *slot = value.into();
    }

    /// Stores `value` under a literal key, without splitting it.
    pub(crate) fn insert(&mut self, key: String, value: Value) {
        self.entries.insert(key, value);
    }

    /// Stores `value` under a dotted name, creating intermediate objects.
    ///
    /// An intermediate slot that holds a non-object is replaced.
    pub(crate) fn insert_nested(&mut self, name: &str, value: Value) {
        let Some((head, rest)) = name.split_once(PATH_SEPARATOR) else {
            self.entries.insert(name.to_owned(), value);
            return;
        };
        let slot = self
            .entries
            .entry(head.to_owned())
            .or_insert_with(|| Value::Object(Object::new()));
        if !matches!(slot, Value::Object(_)) {
            *slot = Value::Object(Object::new());
        }
        if let Value::Object(nested) = slot {
            nested.insert_nested(rest, value);
        }
    }

    // ========================================================================
    // EXPORT
    // ========================================================================

    /// Flattens nested objects into dotted leaf paths.
    ///
    /// Scalars and sequences (including sequences of objects) are stored as
    /// they are.
    #[must_use]
    pub fn flatten(&self) -> FlatMap {
        let mut flat = FlatMap::new();
        self.flatten_into("", &mut flat);
        flat
    }

    fn flatten_into(&self, prefix: &str, flat: &mut FlatMap) {
        for (key, value) in &self.entries {
            let path = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{prefix}{PATH_SEPARATOR}{key}")
            };
            match value {
                Value::Object(nested) => nested.flatten_into(&path, flat),
                terminal => {
                    flat.insert(path, terminal.clone());
                }
            }
        }
    }
}

fn descend<'a>(value: &'a Value, rest: &str, full: &str) -> Option<&'a Value> {
    match value {
        Value::Object(nested) => nested.resolve(rest, full),
        Value::Array(items) => {
            let (segment, tail) = match rest.split_once(PATH_SEPARATOR) {
                Some((segment, tail)) => (segment, Some(tail)),
                None => (rest, None),
            };
            let Ok(index) = segment.parse::<usize>() else {
                panic!("path part '{segment}' in '{full}' is not a valid integer index");
            };
            let Some(item) = items.get(index) else {
                panic!(
                    "array index {index} out of bounds in '{full}' (length {})",
                    items.len()
                );
            };
            match tail {
                Some(tail) => descend(item, tail, full),
                None => Some(item),
            }
        }
        _ => None,
    }
}

// ============================================================================
// TYPED GETTERS
// ============================================================================

macro_rules! typed_getters {
    ($($get:ident, $must:ident => $t:ty;)*) => {
        /// Typed convenience getters. Each `must_*` variant panics on absence.
        impl Object {$(
            #[must_use]
            pub fn $get(&self, path: &str) -> Option<$t> {
                self.get_as(path)
            }

            #[must_use]
            pub fn $must(&self, path: &str) -> $t {
                self.must_get_as(path)
            }
        )*}
    };
}

typed_getters! {
    string, must_string => &str;
    bool, must_bool => bool;
    i8, must_i8 => i8;
    i16, must_i16 => i16;
    i32, must_i32 => i32;
    i64, must_i64 => i64;
    u8, must_u8 => u8;
    u16, must_u16 => u16;
    u32, must_u32 => u32;
    u64, must_u64 => u64;
    f32, must_f32 => f32;
    f64, must_f64 => f64;
    timestamp, must_timestamp => Timestamp;
    object, must_object => &Object;
    string_array, must_string_array => Vec<&str>;
    bool_array, must_bool_array => Vec<bool>;
    i8_array, must_i8_array => Vec<i8>;
    i16_array, must_i16_array => Vec<i16>;
    i32_array, must_i32_array => Vec<i32>;
    i64_array, must_i64_array => Vec<i64>;
    u8_array, must_u8_array => Vec<u8>;
    u16_array, must_u16_array => Vec<u16>;
    u32_array, must_u32_array => Vec<u32>;
    u64_array, must_u64_array => Vec<u64>;
    f32_array, must_f32_array => Vec<f32>;
    f64_array, must_f64_array => Vec<f64>;
    timestamp_array, must_timestamp_array => Vec<Timestamp>;
    object_array, must_object_array => Vec<&Object>;
}

// ============================================================================
// TESTS
// ============================================================================
