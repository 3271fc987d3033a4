//! Values stored in a result object.

use std::borrow::Cow;

use serde::Serialize;
use serde_json::Value as Json;

use crate::coerce::Timestamp;
use crate::object::Object;

/// A validated value: a primitive, a nested object or an ordered sequence.
///
/// Serializes as plain JSON (timestamps as RFC 3339 strings).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    String(String),
    Bool(bool),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    Timestamp(Timestamp),
    Object(Object),
    Array(Vec<Value>),
}

impl Value {
    /// Short type name used in panic messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Bool(_) => "bool",
            Value::I8(_) => "i8",
            Value::I16(_) => "i16",
            Value::I32(_) => "i32",
            Value::I64(_) => "i64",
            Value::U8(_) => "u8",
            Value::U16(_) => "u16",
            Value::U32(_) => "u32",
            Value::U64(_) => "u64",
            Value::F32(_) => "f32",
            Value::F64(_) => "f64",
            Value::Timestamp(_) => "timestamp",
            Value::Object(_) => "object",
            Value::Array(_) => "array",
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items),
            _ => None,
        }
    }

    /// Converts an undeclared JSON node without a target type.
    ///
    /// Integers become `I64` (`U64` above `i64::MAX`), other numbers `F64`.
    /// `null` has no counterpart and yields `None`; null array elements and
    /// object members are dropped.
    pub(crate) fn from_untyped(node: &Json) -> Option<Value> {
        match node {
            Json::Null => None,
            Json::Bool(b) => Some(Value::Bool(*b)),
            Json::String(s) => Some(Value::String(s.clone())),
            Json::Number(n) => n
                .as_i64()
                .map(Value::I64)
                .or_else(|| n.as_u64().map(Value::U64))
                .or_else(|| n.as_f64().map(Value::F64)),
            Json::Array(items) => Some(Value::Array(
                items.iter().filter_map(Value::from_untyped).collect(),
            )),
            Json::Object(map) => {
                let mut object = Object::new();
                for (key, value) in map {
                    if let Some(value) = Value::from_untyped(value) {
                        object.insert(key.clone(), value);
                    }
                }
                Some(Value::Object(object))
            }
        }
    }
}

macro_rules! value_from {
    ($($t:ty => $variant:ident),* $(,)?) => {$(
        impl From<$t> for Value {
            fn from(value: $t) -> Self {
                Value::$variant(value)
            }
        }
    )*};
}

value_from! {
    String => String,
    bool => Bool,
    i8 => I8,
    i16 => I16,
    i32 => I32,
    i64 => I64,
    u8 => U8,
    u16 => U16,
    u32 => U32,
    u64 => U64,
    f32 => F32,
    f64 => F64,
    Timestamp => Timestamp,
    Object => Object,
    Vec<Value> => Array,
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

// ============================================================================
// TYPED EXTRACTION
// ============================================================================

/// Types a [`Value`] can be read back as.
///
/// `from_value` returns `None` when the stored variant is a different type.
/// Sequences convert element-wise and fail if any element does.
pub trait FromValue<'a>: Sized {
    /// Name of the requested type, for panic messages.
    fn expected() -> Cow<'static, str>;

    /// Reads `value` as `Self`.
    fn from_value(value: &'a Value) -> Option<Self>;
}

impl<'a> FromValue<'a> for &'a Value {
    fn expected() -> Cow<'static, str> {
        Cow::Borrowed("value")
    }

    fn from_value(value: &'a Value) -> Option<Self> {
        Some(value)
    }
}

impl<'a> FromValue<'a> for &'a str {
    fn expected() -> Cow<'static, str> {
        Cow::Borrowed("string")
    }

    fn from_value(value: &'a Value) -> Option<Self> {
        value.as_str()
    }
}

impl<'a> FromValue<'a> for &'a Object {
    fn expected() -> Cow<'static, str> {
        Cow::Borrowed("object")
    }

    fn from_value(value: &'a Value) -> Option<Self> {
        value.as_object()
    }
}

impl<'a> FromValue<'a> for &'a [Value] {
    fn expected() -> Cow<'static, str> {
        Cow::Borrowed("array")
    }

    fn from_value(value: &'a Value) -> Option<Self> {
        value.as_array()
    }
}

impl<'a, T: FromValue<'a>> FromValue<'a> for Vec<T> {
    fn expected() -> Cow<'static, str> {
        Cow::Owned(format!("array of {}", T::expected()))
    }

    fn from_value(value: &'a Value) -> Option<Self> {
        value.as_array()?.iter().map(T::from_value).collect()
    }
}

macro_rules! copy_from_value {
    ($($t:ty => $variant:ident as $name:literal),* $(,)?) => {$(
        impl<'a> FromValue<'a> for $t {
            fn expected() -> Cow<'static, str> {
                Cow::Borrowed($name)
            }

            fn from_value(value: &'a Value) -> Option<Self> {
                match value {
                    Value::$variant(inner) => Some(*inner),
                    _ => None,
                }
            }
        }
    )*};
}

copy_from_value! {
    bool => Bool as "bool",
    i8 => I8 as "i8",
    i16 => I16 as "i16",
    i32 => I32 as "i32",
    i64 => I64 as "i64",
    u8 => U8 as "u8",
    u16 => U16 as "u16",
    u32 => U32 as "u32",
    u64 => U64 as "u64",
    f32 => F32 as "f32",
    f64 => F64 as "f64",
    Timestamp => Timestamp as "timestamp",
}
