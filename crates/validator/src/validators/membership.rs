//! Set membership
//!
//! [`OneOf<T>`] checks scalars by value. `OneOf<String>` validates `str` input
//! so it can be attached to string fields directly.

use std::borrow::Cow;
use std::fmt::{self, Display};

use chrono::{DateTime, FixedOffset};

use crate::foundation::{Validate, ValidationError};

/// Marker for copyable scalar types that [`OneOf`] accepts by value.
pub trait Scalar: PartialEq + Display + Copy {}

macro_rules! impl_scalar {
    ($($t:ty),* $(,)?) => { $(impl Scalar for $t {})* };
}

impl_scalar!(bool, i8, i16, i32, i64, u8, u16, u32, u64, f32, f64, DateTime<FixedOffset>);

/// Validates that a value is one of a fixed set.
#[derive(Debug, Clone, PartialEq)]
pub struct OneOf<T> {
    /// Allowed values, in declaration order.
    pub allowed: Vec<T>,
}

impl<T> OneOf<T> {
    /// Creates a membership validator.
    pub fn new(allowed: impl IntoIterator<Item = T>) -> Self {
        Self {
            allowed: allowed.into_iter().collect(),
        }
    }
}

/// Creates a membership validator for scalars.
#[must_use]
pub fn one_of<T: Scalar>(allowed: impl IntoIterator<Item = T>) -> OneOf<T> {
    OneOf::new(allowed)
}

/// Creates a membership validator for strings.
#[must_use]
pub fn one_of_str<S: Into<String>>(allowed: impl IntoIterator<Item = S>) -> OneOf<String> {
    OneOf::new(allowed.into_iter().map(Into::into))
}

struct Listed<'a, T>(&'a [T]);

impl<T: Display> Display for Listed<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

fn not_allowed<T: Display>(allowed: &[T]) -> ValidationError {
    let listed = Listed(allowed).to_string();
    ValidationError::new("one_of", format!("Value must be one of [{listed}]"))
        .with_param("allowed", listed)
}

impl<T: Scalar> Validate for OneOf<T> {
    type Input = T;

    fn constraint(&self) -> Cow<'static, str> {
        Cow::Borrowed("one_of")
    }

    fn validate(&self, input: &T) -> Result<(), ValidationError> {
        if self.allowed.contains(input) {
            Ok(())
        } else {
            Err(not_allowed(&self.allowed))
        }
    }
}

impl Validate for OneOf<String> {
    type Input = str;

    fn constraint(&self) -> Cow<'static, str> {
        Cow::Borrowed("one_of")
    }

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        if self.allowed.iter().any(|allowed| allowed == input) {
            Ok(())
        } else {
            Err(not_allowed(&self.allowed))
        }
    }
}
