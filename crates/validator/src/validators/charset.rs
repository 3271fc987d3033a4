//! Character-set membership validators
//!
//! A [`CharClass`] is one of four fixed alphabets. Each validator takes a union
//! of classes and checks the input against it in a different mode.

use std::fmt;

use crate::foundation::ValidationError;

/// Punctuation accepted by [`CharClass::Special`].
pub const SPECIAL_CHARS: &str = "!@#$%^&*()_+-=[]{}|;':\",./<>?";

// ============================================================================
// CHAR CLASS
// ============================================================================

/// A fixed character alphabet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharClass {
    /// `a-z`
    Lower,
    /// `A-Z`
    Upper,
    /// `0-9`
    Digit,
    /// See [`SPECIAL_CHARS`].
    Special,
}

impl CharClass {
    /// Returns true if `c` belongs to this class.
    #[must_use]
    pub fn contains(self, c: char) -> bool {
        match self {
            CharClass::Lower => c.is_ascii_lowercase(),
            CharClass::Upper => c.is_ascii_uppercase(),
            CharClass::Digit => c.is_ascii_digit(),
            CharClass::Special => SPECIAL_CHARS.contains(c),
        }
    }
}

impl fmt::Display for CharClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CharClass::Lower => "lower case characters",
            CharClass::Upper => "upper case characters",
            CharClass::Digit => "numbers",
            CharClass::Special => "special characters",
        })
    }
}

fn in_union(classes: &[CharClass], c: char) -> bool {
    classes.iter().any(|class| class.contains(c))
}

fn describe(classes: &[CharClass]) -> String {
    classes
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn charset_error(code: &'static str, verb: &str, classes: &[CharClass]) -> ValidationError {
    let described = describe(classes);
    ValidationError::new(code, format!("Value {verb} {described}")).with_param("charset", described)
}

// ============================================================================
// VALIDATORS
// ============================================================================

crate::validator! {
    /// Every character must belong to one of the classes. An empty string passes.
    pub OnlyContains { classes: Vec<CharClass> } for str;
    constraint("only_contains");
    rule(self, input) { input.chars().all(|c| in_union(&self.classes, c)) }
    error(self, input) { charset_error("only_contains", "must only contain", &self.classes) }
    new(classes: &[CharClass]) { Self { classes: classes.to_vec() } }
    fn only_contains(classes: &[CharClass]);
}

crate::validator! {
    /// At least one character must belong to one of the classes.
    pub ContainsAny { classes: Vec<CharClass> } for str;
    constraint("contains_any");
    rule(self, input) { input.chars().any(|c| in_union(&self.classes, c)) }
    error(self, input) { charset_error("contains_any", "must contain at least one of", &self.classes) }
    new(classes: &[CharClass]) { Self { classes: classes.to_vec() } }
    fn contains_any(classes: &[CharClass]);
}

crate::validator! {
    /// Every class must be represented by at least one character.
    pub ContainsAll { classes: Vec<CharClass> } for str;
    constraint("contains_all");
    rule(self, input) {
        self.classes.iter().all(|class| input.chars().any(|c| class.contains(c)))
    }
    error(self, input) { charset_error("contains_all", "must contain all of", &self.classes) }
    new(classes: &[CharClass]) { Self { classes: classes.to_vec() } }
    fn contains_all(classes: &[CharClass]);
}

crate::validator! {
    /// No character may belong to any of the classes.
    pub NotContains { classes: Vec<CharClass> } for str;
    constraint("not_contains");
    rule(self, input) { !input.chars().any(|c| in_union(&self.classes, c)) }
    error(self, input) { charset_error("not_contains", "must not contain", &self.classes) }
    new(classes: &[CharClass]) { Self { classes: classes.to_vec() } }
    fn not_contains(classes: &[CharClass]);
}

// ============================================================================
// TESTS
// ============================================================================
