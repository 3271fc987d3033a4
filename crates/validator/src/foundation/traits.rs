//! Core traits for the validation system
//!
//! This module defines the trait every constraint implements.

use std::borrow::Cow;
use std::sync::Arc;

use crate::foundation::ValidationError;

// ============================================================================
// CORE VALIDATOR TRAIT
// ============================================================================

/// A named predicate over an already-coerced value.
///
/// The constraint name identifies the rule family (`min_length`, `gt`,
/// `decimal(10,2)`, ...). A field never carries two constraints with the same
/// name, which is what makes the name part of the contract.
///
/// # Type Parameters
///
/// * `Input` - The type being validated (can be `?Sized` for DSTs like `str`)
///
/// # Examples
///
/// ```rust,ignore
/// use std::borrow::Cow;
/// use sift_validator::foundation::{Validate, ValidationError};
///
/// struct Even;
///
/// impl Validate for Even {
///     type Input = i64;
///
///     fn constraint(&self) -> Cow<'static, str> {
///         Cow::Borrowed("even")
///     }
///
///     fn validate(&self, input: &i64) -> Result<(), ValidationError> {
///         if input % 2 == 0 {
///             Ok(())
///         } else {
///             Err(ValidationError::new("even", "Value must be even"))
///         }
///     }
/// }
/// ```
pub trait Validate {
    /// The type of input being validated.
    ///
    /// Use `?Sized` to allow validation of unsized types like `str`.
    type Input: ?Sized;

    /// Name of the constraint this validator enforces.
    fn constraint(&self) -> Cow<'static, str>;

    /// Validates the input value.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if validation succeeds
    /// * `Err(ValidationError)` if validation fails
    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError>;
}

/// A type-erased, shareable validator.
///
/// Schemas hold their constraints in this form so a single schema can be
/// validated against from many threads at once.
pub type SharedValidator<I> = Arc<dyn Validate<Input = I> + Send + Sync>;

impl<V: Validate + ?Sized> Validate for &V {
    type Input = V::Input;

    fn constraint(&self) -> Cow<'static, str> {
        (**self).constraint()
    }

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        (**self).validate(input)
    }
}

impl<V: Validate + ?Sized> Validate for Box<V> {
    type Input = V::Input;

    fn constraint(&self) -> Cow<'static, str> {
        (**self).constraint()
    }

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        (**self).validate(input)
    }
}

impl<V: Validate + ?Sized> Validate for Arc<V> {
    type Input = V::Input;

    fn constraint(&self) -> Cow<'static, str> {
        (**self).constraint()
    }

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        (**self).validate(input)
    }
}
