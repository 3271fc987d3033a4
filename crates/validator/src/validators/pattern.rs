//! Glob-style pattern matching
//!
//! `*` matches any run of characters (including none) and `?` matches exactly
//! one character. Matching covers the whole input.

use crate::foundation::ValidationError;

crate::validator! {
    /// Validates that a string matches a glob pattern.
    ///
    /// Construction fails if the pattern itself is malformed.
    pub Match { pattern: glob::Pattern } for str;
    constraint("match");
    rule(self, input) { self.pattern.matches(input) }
    error(self, input) {
        ValidationError::new(
            "match",
            format!("Value does not match pattern '{}'", self.pattern.as_str()),
        )
        .with_param("pattern", self.pattern.as_str().to_owned())
    }
    new(pattern: &str) -> glob::PatternError {
        Ok(Self {
            pattern: glob::Pattern::new(pattern)?,
        })
    }
    fn matches(pattern: &str) -> glob::PatternError;
}
