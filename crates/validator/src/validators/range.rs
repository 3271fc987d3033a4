//! Ordering comparisons
//!
//! Generic over any `PartialOrd + Display + Copy` value, which covers every
//! integer and float width as well as timestamps.

use std::fmt::Display;

use crate::foundation::ValidationError;

fn compare_error<T: Display>(code: &'static str, relation: &str, bound: T, actual: T) -> ValidationError {
    ValidationError::new(code, format!("Value must be {relation} {bound}"))
        .with_param("bound", bound.to_string())
        .with_param("actual", actual.to_string())
}

crate::validator! {
    /// Validates that a value is strictly greater than a bound.
    ///
    /// ```rust,ignore
    /// use sift_validator::validators::gt;
    /// use sift_validator::foundation::Validate;
    ///
    /// assert!(gt(5).validate(&6).is_ok());
    /// assert!(gt(5).validate(&5).is_err());
    /// ```
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub Gt<T: PartialOrd + Display + Copy> { bound: T } for T;
    constraint("gt");
    rule(self, input) { *input > self.bound }
    error(self, input) { compare_error("gt", "greater than", self.bound, *input) }
    fn gt(bound: T);
}

crate::validator! {
    /// Validates that a value is greater than or equal to a bound.
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub Gte<T: PartialOrd + Display + Copy> { bound: T } for T;
    constraint("gte");
    rule(self, input) { *input >= self.bound }
    error(self, input) { compare_error("gte", "greater than or equal to", self.bound, *input) }
    fn gte(bound: T);
}

crate::validator! {
    /// Validates that a value is strictly less than a bound.
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub Lt<T: PartialOrd + Display + Copy> { bound: T } for T;
    constraint("lt");
    rule(self, input) { *input < self.bound }
    error(self, input) { compare_error("lt", "less than", self.bound, *input) }
    fn lt(bound: T);
}

crate::validator! {
    /// Validates that a value is less than or equal to a bound.
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub Lte<T: PartialOrd + Display + Copy> { bound: T } for T;
    constraint("lte");
    rule(self, input) { *input <= self.bound }
    error(self, input) { compare_error("lte", "less than or equal to", self.bound, *input) }
    fn lte(bound: T);
}

crate::validator! {
    /// Validates that a value is within an inclusive range.
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub Between<T: PartialOrd + Display + Copy> { min: T, max: T } for T;
    constraint("between");
    rule(self, input) { *input >= self.min && *input <= self.max }
    error(self, input) { ValidationError::out_of_range(self.min, self.max, *input) }
    fn between(min: T, max: T);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Validate;
    use chrono::{DateTime, FixedOffset};

    #[test]
    fn test_strict_comparisons() {
        assert!(gt(5).validate(&6).is_ok());
        assert!(gt(5).validate(&5).is_err());
        assert!(lt(10_u8).validate(&9).is_ok());
        assert!(lt(10_u8).validate(&10).is_err());
    }

    #[test]
    fn test_inclusive_comparisons() {
        assert!(gte(5).validate(&5).is_ok());
        assert!(gte(5).validate(&4).is_err());
        assert!(lte(1.5_f64).validate(&1.5).is_ok());
        assert!(lte(1.5_f64).validate(&1.6).is_err());
    }

    #[test]
    fn test_between() {
        let v = between(18_i64, 120);
        assert!(v.validate(&18).is_ok());
        assert!(v.validate(&120).is_ok());

        let err = v.validate(&200).unwrap_err();
        assert_eq!(err.code, "between");
        assert_eq!(err.message, "Value must be between 18 and 120");
    }

    #[test]
    fn test_timestamps_compare() {
        let cutoff: DateTime<FixedOffset> =
            DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap();
        let later = DateTime::parse_from_rfc3339("2024-06-01T00:00:00+02:00").unwrap();

        assert!(gt(cutoff).validate(&later).is_ok());
        assert!(lt(cutoff).validate(&later).is_err());
    }

    #[test]
    fn test_error_params() {
        let err = gt(5).validate(&1).unwrap_err();
        assert_eq!(err.param("bound"), Some("5"));
        assert_eq!(err.param("actual"), Some("1"));
    }
}
