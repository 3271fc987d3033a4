//! Boolean truth constraints
//!
//! Useful for consent-style fields ("accepted the terms") where only one
//! value is acceptable.

use crate::foundation::ValidationError;

fn truth_error(code: &'static str, expected: bool, actual: bool) -> ValidationError {
    ValidationError::new(code, format!("Value must be {expected}"))
        .with_param("expected", expected.to_string())
        .with_param("actual", actual.to_string())
}

crate::validator! {
    /// Accepts only `true`.
    pub BeTrue for bool;
    constraint("be_true");
    rule(input) { *input }
    error(input) { truth_error("be_true", true, *input) }
    fn be_true();
}

crate::validator! {
    /// Accepts only `false`.
    pub BeFalse for bool;
    constraint("be_false");
    rule(input) { !*input }
    error(input) { truth_error("be_false", false, *input) }
    fn be_false();
}
