//! Fixed-point decimal string shape
//!
//! Checks the textual form of a decimal against a `(precision, scale)` pair the
//! way a `DECIMAL(p, s)` column would: at most `precision` significant digits in
//! total and at most `scale` of them after the point.

use std::borrow::Cow;

use crate::foundation::{Validate, ValidationError};

/// Validates a decimal string against a precision and scale.
///
/// The input may carry a leading sign and may start with a bare `.`; an empty
/// integer part counts as a single `0` digit. Exponent notation is rejected.
/// An empty (or all-whitespace) string passes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Decimal {
    /// Maximum total digits.
    pub precision: u32,
    /// Maximum fractional digits.
    pub scale: u32,
}

impl Decimal {
    /// Creates a decimal shape validator.
    #[must_use]
    pub fn new(precision: u32, scale: u32) -> Self {
        Self { precision, scale }
    }

    fn check(self, input: &str) -> Result<(), &'static str> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(());
        }
        let unsigned = trimmed
            .strip_prefix(['-', '+'])
            .unwrap_or(trimmed);
        if unsigned.contains(['e', 'E']) {
            return Err("exponent notation is not supported");
        }

        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((_, frac)) if frac.contains('.') => return Err("too many decimal points"),
            Some((int, frac)) => (int, frac),
            None => (unsigned, ""),
        };
        let int_part = if int_part.is_empty() { "0" } else { int_part };

        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if !all_digits(int_part) || !all_digits(frac_part) {
            return Err("not a decimal number");
        }

        let total = int_part.len() + frac_part.len();
        if total > self.precision as usize {
            return Err("too many digits");
        }
        if frac_part.len() > self.scale as usize {
            return Err("too many fractional digits");
        }
        Ok(())
    }
}

/// Creates a decimal shape validator.
#[must_use]
pub fn decimal(precision: u32, scale: u32) -> Decimal {
    Decimal::new(precision, scale)
}

impl Validate for Decimal {
    type Input = str;

    fn constraint(&self) -> Cow<'static, str> {
        Cow::Owned(format!("decimal({},{})", self.precision, self.scale))
    }

    fn validate(&self, input: &str) -> Result<(), ValidationError> {
        self.check(input).map_err(|reason| {
            ValidationError::new(
                "decimal",
                format!(
                    "Value is not a valid decimal({},{}): {reason}",
                    self.precision, self.scale
                ),
            )
            .with_param("precision", self.precision.to_string())
            .with_param("scale", self.scale.to_string())
        })
    }
}
