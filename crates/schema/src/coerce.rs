//! Coercion of untyped input into typed primitives.
//!
//! Every supported primitive implements the sealed [`Primitive`] trait, which
//! knows how to read itself from a JSON node (the document body) and from a
//! raw string (a parameter overlay). Selection happens at compile time through
//! the type parameter; nothing inspects runtime types.
//!
//! | Kind | JSON node | Raw string |
//! |------|-----------|------------|
//! | `string` | string | verbatim |
//! | `bool` | `true` / `false` | `1 t T TRUE true True 0 f F FALSE false False` |
//! | integers | number without fraction or exponent | same text rules |
//! | floats | number or string | float literal |
//! | `timestamp` | string | see [`TimeLayout`] |

use std::fmt;
use std::num::IntErrorKind;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use serde_json::Value as Json;
use sift_validator::foundation::ValidationError;

use crate::value::Value;

/// Timestamp representation used by the engine.
pub type Timestamp = DateTime<FixedOffset>;

// ============================================================================
// KINDS
// ============================================================================

/// Target primitive kind of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Bool,
    I8,
    I16,
    I32,
    I64,
    U8,
    U16,
    U32,
    U64,
    F32,
    F64,
    Timestamp,
}

impl Kind {
    /// Lower-case name used in messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Bool => "bool",
            Kind::I8 => "i8",
            Kind::I16 => "i16",
            Kind::I32 => "i32",
            Kind::I64 => "i64",
            Kind::U8 => "u8",
            Kind::U16 => "u16",
            Kind::U32 => "u32",
            Kind::U64 => "u64",
            Kind::F32 => "f32",
            Kind::F64 => "f64",
            Kind::Timestamp => "timestamp",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Structural kind of a raw JSON node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawKind {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl RawKind {
    /// Classifies a JSON node.
    #[must_use]
    pub fn of(node: &Json) -> Self {
        match node {
            Json::Null => RawKind::Null,
            Json::Bool(_) => RawKind::Bool,
            Json::Number(_) => RawKind::Number,
            Json::String(_) => RawKind::String,
            Json::Array(_) => RawKind::Array,
            Json::Object(_) => RawKind::Object,
        }
    }

    /// Lower-case name used in messages.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            RawKind::Null => "null",
            RawKind::Bool => "bool",
            RawKind::Number => "number",
            RawKind::String => "string",
            RawKind::Array => "array",
            RawKind::Object => "object",
        }
    }
}

impl fmt::Display for RawKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Why a raw value could not become the requested primitive.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoerceError {
    /// The JSON node has the wrong structural kind.
    #[error("type mismatch: expected {expected} but got raw type {actual}")]
    TypeMismatch { expected: Kind, actual: RawKind },

    /// The text is not a literal of the requested kind.
    #[error("could not parse '{input}' as {expected}")]
    InvalidFormat { input: String, expected: Kind },

    /// A fractional or exponent literal was given for an integer kind.
    #[error("cannot assign float value {input} to integer type {expected}")]
    FloatToInteger { input: String, expected: Kind },

    /// The literal is well formed but does not fit the target width.
    #[error("value {input} overflows type {target}")]
    Overflow { input: String, target: Kind },

    /// No accepted timestamp layout matched.
    #[error("incorrect date format for string '{input}'")]
    InvalidTimestamp { input: String },
}

impl CoerceError {
    /// Machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            CoerceError::TypeMismatch { .. } => "type_mismatch",
            CoerceError::InvalidFormat { .. }
            | CoerceError::FloatToInteger { .. }
            | CoerceError::InvalidTimestamp { .. } => "invalid_format",
            CoerceError::Overflow { .. } => "overflow",
        }
    }
}

impl From<CoerceError> for ValidationError {
    fn from(error: CoerceError) -> Self {
        let message = error.to_string();
        match error {
            CoerceError::TypeMismatch { expected, actual } => {
                ValidationError::type_mismatch(expected.name(), actual.name())
            }
            CoerceError::InvalidFormat { expected, .. }
            | CoerceError::FloatToInteger { expected, .. } => {
                ValidationError::invalid_format(expected.name(), message)
            }
            CoerceError::InvalidTimestamp { .. } => {
                ValidationError::invalid_format(Kind::Timestamp.name(), message)
            }
            CoerceError::Overflow { target, .. } => {
                ValidationError::new("overflow", message).with_param("target", target.name())
            }
        }
    }
}

// ============================================================================
// TIMESTAMP LAYOUTS
// ============================================================================

/// Accepted timestamp layouts, tried in [`TimeLayout::DEFAULT`] order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeLayout {
    /// RFC 3339 with fractional seconds, `2024-05-01T10:00:00.123456789Z`.
    Rfc3339Nano,
    /// RFC 3339, `2024-05-01T10:00:00+02:00`.
    Rfc3339,
    /// Date and time without a zone, read as UTC: `2024-05-01T10:00:00`.
    LocalDateTime,
    /// Date only, midnight UTC: `2024-05-01`.
    DateOnly,
}

impl TimeLayout {
    /// Layouts in the order coercion tries them. The first match wins.
    pub const DEFAULT: [TimeLayout; 4] = [
        TimeLayout::Rfc3339Nano,
        TimeLayout::Rfc3339,
        TimeLayout::LocalDateTime,
        TimeLayout::DateOnly,
    ];

    /// Parses `input` with this layout only.
    #[must_use]
    pub fn parse(self, input: &str) -> Option<Timestamp> {
        match self {
            TimeLayout::Rfc3339Nano => input
                .contains('.')
                .then(|| DateTime::parse_from_rfc3339(input).ok())
                .flatten(),
            TimeLayout::Rfc3339 => DateTime::parse_from_rfc3339(input).ok(),
            TimeLayout::LocalDateTime => NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f")
                .ok()
                .map(|naive| naive.and_utc().fixed_offset()),
            TimeLayout::DateOnly => NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|naive| naive.and_utc().fixed_offset()),
        }
    }
}

/// Parses a timestamp with the default layouts.
pub fn parse_timestamp(input: &str) -> Result<Timestamp, CoerceError> {
    TimeLayout::DEFAULT
        .iter()
        .find_map(|layout| layout.parse(input))
        .ok_or_else(|| CoerceError::InvalidTimestamp {
            input: input.to_owned(),
        })
}

// ============================================================================
// PRIMITIVE TRAIT
// ============================================================================

mod sealed {
    pub trait Sealed {}
}

/// A type a field can hold. Implemented for `String`, `bool`, the 8 to 64 bit
/// integers, `f32`, `f64` and [`Timestamp`]; the set is closed.
pub trait Primitive: Clone + fmt::Debug + Send + Sync + 'static + sealed::Sealed {
    /// What validators for this primitive receive (`str` for strings).
    type Input: ?Sized + 'static;

    /// Kind tag of this primitive.
    const KIND: Kind;

    /// Reads the value from a JSON node.
    fn from_json(node: &Json) -> Result<Self, CoerceError>;

    /// Reads the value from a raw string.
    fn from_text(raw: &str) -> Result<Self, CoerceError>;

    /// Borrows the value as validator input.
    fn as_input(&self) -> &Self::Input;

    /// Wraps the value for storage in a result object.
    fn into_value(self) -> Value;
}

/// Parses a raw string into `T`, the same way a parameter overlay value is read.
///
/// ```rust,ignore
/// use sift_schema::coerce::parse_str;
///
/// assert_eq!(parse_str::<u8>("255"), Ok(255));
/// assert!(parse_str::<u8>("256").is_err());
/// ```
pub fn parse_str<T: Primitive>(raw: &str) -> Result<T, CoerceError> {
    T::from_text(raw)
}

fn mismatch(expected: Kind, node: &Json) -> CoerceError {
    CoerceError::TypeMismatch {
        expected,
        actual: RawKind::of(node),
    }
}

/// Raw text of a JSON number, or a mismatch for any other node.
fn number_text(node: &Json, expected: Kind) -> Result<String, CoerceError> {
    match node {
        Json::Number(number) => Ok(number.to_string()),
        other => Err(mismatch(expected, other)),
    }
}

/// Integer text of a JSON number. A fraction is a format error; exponent
/// notation cannot be the canonical form of an integer and is an overflow.
fn integer_text(node: &Json, target: Kind) -> Result<String, CoerceError> {
    let text = number_text(node, target)?;
    if text.contains('.') {
        return Err(CoerceError::FloatToInteger {
            input: text,
            expected: target,
        });
    }
    if text.contains(['e', 'E']) {
        return Err(CoerceError::Overflow {
            input: text,
            target,
        });
    }
    Ok(text)
}

/// Rejects a JSON integer whose canonical form differs from what was sent,
/// such as `-0`.
fn canonical<W: ToString>(wide: W, text: &str, target: Kind) -> Result<W, CoerceError> {
    if wide.to_string() == text {
        Ok(wide)
    } else {
        Err(CoerceError::Overflow {
            input: text.to_owned(),
            target,
        })
    }
}

fn parse_signed(text: &str, target: Kind) -> Result<i64, CoerceError> {
    if text.contains(['.', 'e', 'E']) {
        return Err(CoerceError::FloatToInteger {
            input: text.to_owned(),
            expected: target,
        });
    }
    text.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => CoerceError::Overflow {
            input: text.to_owned(),
            target,
        },
        _ => CoerceError::InvalidFormat {
            input: text.to_owned(),
            expected: target,
        },
    })
}

fn parse_unsigned(text: &str, target: Kind) -> Result<u64, CoerceError> {
    if text.contains(['.', 'e', 'E']) {
        return Err(CoerceError::FloatToInteger {
            input: text.to_owned(),
            expected: target,
        });
    }
    if text.starts_with('-') {
        return Err(CoerceError::Overflow {
            input: text.to_owned(),
            target,
        });
    }
    text.parse::<u64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow => CoerceError::Overflow {
            input: text.to_owned(),
            target,
        },
        _ => CoerceError::InvalidFormat {
            input: text.to_owned(),
            expected: target,
        },
    })
}

fn narrow<W, N: TryFrom<W>>(wide: W, text: &str, target: Kind) -> Result<N, CoerceError> {
    N::try_from(wide).map_err(|_| CoerceError::Overflow {
        input: text.to_owned(),
        target,
    })
}

fn parse_f64(text: &str, target: Kind) -> Result<f64, CoerceError> {
    text.parse::<f64>().map_err(|_| CoerceError::InvalidFormat {
        input: text.to_owned(),
        expected: target,
    })
}

/// True for an explicit infinity literal, which `f32` accepts as is.
fn is_infinity_literal(text: &str) -> bool {
    let unsigned = text.strip_prefix(['+', '-']).unwrap_or(text);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

fn parse_f32(text: &str) -> Result<f32, CoerceError> {
    let wide = parse_f64(text, Kind::F32)?;
    if wide.abs() > f64::from(f32::MAX) && !is_infinity_literal(text) {
        return Err(CoerceError::Overflow {
            input: text.to_owned(),
            target: Kind::F32,
        });
    }
    text.parse::<f32>().map_err(|_| CoerceError::InvalidFormat {
        input: text.to_owned(),
        expected: Kind::F32,
    })
}

/// Float text from a JSON number or a JSON string.
fn float_text(node: &Json, expected: Kind) -> Result<&str, CoerceError> {
    match node {
        Json::String(text) => Ok(text),
        other => Err(mismatch(expected, other)),
    }
}

// ============================================================================
// IMPLEMENTATIONS
// ============================================================================

impl sealed::Sealed for String {}

impl Primitive for String {
    type Input = str;
    const KIND: Kind = Kind::String;

    fn from_json(node: &Json) -> Result<Self, CoerceError> {
        match node {
            Json::String(text) => Ok(text.clone()),
            other => Err(mismatch(Self::KIND, other)),
        }
    }

    fn from_text(raw: &str) -> Result<Self, CoerceError> {
        Ok(raw.to_owned())
    }

    fn as_input(&self) -> &str {
        self
    }

    fn into_value(self) -> Value {
        Value::String(self)
    }
}

impl sealed::Sealed for bool {}

impl Primitive for bool {
    type Input = bool;
    const KIND: Kind = Kind::Bool;

    fn from_json(node: &Json) -> Result<Self, CoerceError> {
        match node {
            Json::Bool(value) => Ok(*value),
            other => Err(mismatch(Self::KIND, other)),
        }
    }

    fn from_text(raw: &str) -> Result<Self, CoerceError> {
        match raw {
            "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
            "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
            _ => Err(CoerceError::InvalidFormat {
                input: raw.to_owned(),
                expected: Self::KIND,
            }),
        }
    }

    fn as_input(&self) -> &bool {
        self
    }

    fn into_value(self) -> Value {
        Value::Bool(self)
    }
}

macro_rules! integer_primitive {
    ($($t:ty => $kind:ident via $parse:ident as $wide:ty),* $(,)?) => {$(
        impl sealed::Sealed for $t {}

        impl Primitive for $t {
            type Input = $t;
            const KIND: Kind = Kind::$kind;

            fn from_json(node: &Json) -> Result<Self, CoerceError> {
                let text = integer_text(node, Self::KIND)?;
                let wide: $wide = canonical($parse(&text, Self::KIND)?, &text, Self::KIND)?;
                narrow(wide, &text, Self::KIND)
            }

            fn from_text(raw: &str) -> Result<Self, CoerceError> {
                let wide: $wide = $parse(raw, Self::KIND)?;
                narrow(wide, raw, Self::KIND)
            }

            fn as_input(&self) -> &$t {
                self
            }

            fn into_value(self) -> Value {
                Value::$kind(self)
            }
        }
    )*};
}

integer_primitive! {
    i8 => I8 via parse_signed as i64,
    i16 => I16 via parse_signed as i64,
    i32 => I32 via parse_signed as i64,
    i64 => I64 via parse_signed as i64,
    u8 => U8 via parse_unsigned as u64,
    u16 => U16 via parse_unsigned as u64,
    u32 => U32 via parse_unsigned as u64,
    u64 => U64 via parse_unsigned as u64,
}

impl sealed::Sealed for f32 {}

impl Primitive for f32 {
    type Input = f32;
    const KIND: Kind = Kind::F32;

    fn from_json(node: &Json) -> Result<Self, CoerceError> {
        match node {
            Json::Number(number) => parse_f32(&number.to_string()),
            other => parse_f32(float_text(other, Self::KIND)?),
        }
    }

    fn from_text(raw: &str) -> Result<Self, CoerceError> {
        parse_f32(raw)
    }

    fn as_input(&self) -> &f32 {
        self
    }

    fn into_value(self) -> Value {
        Value::F32(self)
    }
}

impl sealed::Sealed for f64 {}

/// Magnitudes beyond `f64::MAX` become signed infinity rather than an error.
impl Primitive for f64 {
    type Input = f64;
    const KIND: Kind = Kind::F64;

    fn from_json(node: &Json) -> Result<Self, CoerceError> {
        match node {
            Json::Number(number) => parse_f64(&number.to_string(), Self::KIND),
            other => parse_f64(float_text(other, Self::KIND)?, Self::KIND),
        }
    }

    fn from_text(raw: &str) -> Result<Self, CoerceError> {
        parse_f64(raw, Self::KIND)
    }

    fn as_input(&self) -> &f64 {
        self
    }

    fn into_value(self) -> Value {
        Value::F64(self)
    }
}

impl sealed::Sealed for Timestamp {}

impl Primitive for Timestamp {
    type Input = Timestamp;
    const KIND: Kind = Kind::Timestamp;

    fn from_json(node: &Json) -> Result<Self, CoerceError> {
        match node {
            Json::String(text) => parse_timestamp(text),
            other => Err(mismatch(Self::KIND, other)),
        }
    }

    fn from_text(raw: &str) -> Result<Self, CoerceError> {
        parse_timestamp(raw)
    }

    fn as_input(&self) -> &Timestamp {
        self
    }

    fn into_value(self) -> Value {
        Value::Timestamp(self)
    }
}

// ============================================================================
// TESTS
// ============================================================================
