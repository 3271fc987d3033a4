//! Convenient re-exports for common usage.
//!
//! ```rust,ignore
//! use sift_validator::prelude::*;
//!
//! let name = min_length(3);
//! assert!(name.validate("alice").is_ok());
//! ```

pub use crate::foundation::{SharedValidator, Validate, ValidationError, ValidationErrors};
pub use crate::validators::*;
