//! Email and URL format validators

use std::sync::LazyLock;

use crate::foundation::ValidationError;

static EMAIL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    )
    .expect("email pattern compiles")
});

// ============================================================================
// EMAIL VALIDATOR
// ============================================================================

crate::validator! {
    /// Validates email address format.
    pub Email for str;
    constraint("email");
    rule(input) { EMAIL_REGEX.is_match(input) }
    error(input) { ValidationError::new("email", "Value is not a valid email address") }
    fn email();
}

// ============================================================================
// URL VALIDATOR
// ============================================================================

/// Returns true if `input` parses as an absolute URL with a host.
fn has_scheme_and_host(input: &str) -> bool {
    url::Url::parse(input).is_ok_and(|parsed| parsed.host_str().is_some_and(|h| !h.is_empty()))
}

crate::validator! {
    /// Validates that a string is an absolute URL with a scheme and a host.
    pub Url for str;
    constraint("url");
    rule(input) { has_scheme_and_host(input) }
    error(input) { ValidationError::new("url", "Value is not a valid URL") }
    fn url();
}

// ============================================================================
// TESTS
// ============================================================================
