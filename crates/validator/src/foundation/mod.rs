//! Core validation types and traits
//!
//! - **Traits**: [`Validate`], the named-predicate contract every constraint implements
//! - **Errors**: [`ValidationError`] for one failed check, [`ValidationErrors`] for the
//!   path-keyed aggregate
//!
//! Validators are generic over their input type, so a constraint written for
//! `str` cannot be attached to an integer field:
//!
//! ```rust,ignore
//! use sift_validator::foundation::Validate;
//! use sift_validator::validators::min_length;
//!
//! assert!(min_length(3).validate("abc").is_ok());
//! assert!(min_length(3).validate("ab").is_err());
//! ```

pub mod error;
pub mod traits;

pub use error::{REPORT_HEADER, ValidationError, ValidationErrors};
pub use traits::{SharedValidator, Validate};
