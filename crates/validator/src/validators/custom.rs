//! Caller-defined constraints built from a closure.

use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

use crate::foundation::{Validate, ValidationError};

/// A named constraint backed by a closure.
pub struct Custom<T: ?Sized, F> {
    name: Cow<'static, str>,
    check: F,
    _input: PhantomData<fn(&T)>,
}

impl<T: ?Sized, F: Clone> Clone for Custom<T, F> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            check: self.check.clone(),
            _input: PhantomData,
        }
    }
}

impl<T: ?Sized, F> fmt::Debug for Custom<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Custom").field("name", &self.name).finish_non_exhaustive()
    }
}

/// Creates a named constraint from a closure.
///
/// ```rust,ignore
/// use sift_validator::validators::custom;
/// use sift_validator::foundation::ValidationError;
///
/// let even = custom("even", |n: &i64| {
///     if n % 2 == 0 { Ok(()) } else { Err(ValidationError::new("even", "Value must be even")) }
/// });
/// ```
pub fn custom<T, F>(name: impl Into<Cow<'static, str>>, check: F) -> Custom<T, F>
where
    T: ?Sized,
    F: Fn(&T) -> Result<(), ValidationError>,
{
    Custom {
        name: name.into(),
        check,
        _input: PhantomData,
    }
}

impl<T, F> Validate for Custom<T, F>
where
    T: ?Sized,
    F: Fn(&T) -> Result<(), ValidationError>,
{
    type Input = T;

    fn constraint(&self) -> Cow<'static, str> {
        self.name.clone()
    }

    fn validate(&self, input: &T) -> Result<(), ValidationError> {
        (self.check)(input)
    }
}
