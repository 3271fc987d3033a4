//! Construction-time errors.
//!
//! These report mistakes in how a schema is declared, never bad input. Input
//! problems surface as [`ValidationErrors`](sift_validator::foundation::ValidationErrors)
//! from [`Schema::validate`](crate::Schema::validate).

/// A schema or field declaration that violates an invariant.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    /// A field, qualified or persistent-column name is malformed.
    #[error("invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    /// Two fields share a leaf name.
    #[error("duplicate field '{name}'")]
    DuplicateField { name: String },

    /// Two fields share a non-empty qualified name.
    #[error("duplicate qualified name '{name}'")]
    DuplicateQualifiedName { name: String },

    /// A field carries two constraints with the same name.
    #[error("duplicate validator '{constraint}' for field '{field}'")]
    DuplicateConstraint { field: String, constraint: String },
}

/// Characters that may not appear in a single name segment.
const RESERVED: [char; 4] = ['.', '#', '[', ']'];

/// Checks a leaf name: non-empty and free of path and index separators.
pub(crate) fn check_leaf_name(name: &str) -> Result<(), SchemaError> {
    if name.is_empty() {
        return Err(SchemaError::InvalidName {
            name: name.to_owned(),
            reason: "name must not be empty",
        });
    }
    if name.contains(RESERVED) {
        return Err(SchemaError::InvalidName {
            name: name.to_owned(),
            reason: "name must not contain '.', '#', '[' or ']'",
        });
    }
    Ok(())
}

/// Checks a dotted qualified name: every segment must be a valid leaf name.
pub(crate) fn check_qualified_name(name: &str) -> Result<(), SchemaError> {
    name.split('.').try_for_each(check_leaf_name).map_err(|_| SchemaError::InvalidName {
        name: name.to_owned(),
        reason: "qualified name segments must be non-empty and free of '#', '[' and ']'",
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_names() {
        assert!(check_leaf_name("email").is_ok());
        assert!(check_leaf_name("").is_err());
        assert!(check_leaf_name("a.b").is_err());
        assert!(check_leaf_name("a#b").is_err());
        assert!(check_leaf_name("tags[0]").is_err());
    }

    #[test]
    fn test_qualified_names() {
        assert!(check_qualified_name("account.email.view").is_ok());
        assert!(check_qualified_name("plain").is_ok());
        assert!(check_qualified_name("account..view").is_err());
        assert!(check_qualified_name(".view").is_err());
        assert!(check_qualified_name("a.b#c").is_err());
    }

    #[test]
    fn test_messages() {
        let err = SchemaError::DuplicateConstraint {
            field: "name".to_owned(),
            constraint: "min_length".to_owned(),
        };
        assert_eq!(
            err.to_string(),
            "duplicate validator 'min_length' for field 'name'"
        );
    }
}
