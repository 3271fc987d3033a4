//! # sift-validator
//!
//! Named, composable constraints and the path-keyed error aggregate used by
//! `sift-schema`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sift_validator::prelude::*;
//!
//! let name = min_length(3);
//! assert!(name.validate("alice").is_ok());
//! assert_eq!(name.constraint(), "min_length");
//! ```
//!
//! ## Creating Validators
//!
//! Use the [`validator!`] macro for zero-boilerplate constraints, [`custom`](validators::custom)
//! for closures, or implement [`Validate`](foundation::Validate) manually.
//!
//! ## Built-in Validators
//!
//! - **Length**: [`MinLength`](validators::MinLength), [`MaxLength`](validators::MaxLength),
//!   [`ExactLength`](validators::ExactLength), [`LengthBetween`](validators::LengthBetween)
//! - **Charset**: [`OnlyContains`](validators::OnlyContains), [`ContainsAny`](validators::ContainsAny),
//!   [`ContainsAll`](validators::ContainsAll), [`NotContains`](validators::NotContains)
//! - **Format**: [`Match`](validators::Match), [`Email`](validators::Email),
//!   [`Url`](validators::Url), [`Decimal`](validators::Decimal)
//! - **Ordering**: [`Gt`](validators::Gt), [`Gte`](validators::Gte), [`Lt`](validators::Lt),
//!   [`Lte`](validators::Lte), [`Between`](validators::Between)
//! - **Membership**: [`OneOf`](validators::OneOf)
//! - **Boolean**: [`BeTrue`](validators::BeTrue), [`BeFalse`](validators::BeFalse)

// ValidationError is the fundamental error type for all validators; boxing it
// would add indirection to every validation call.
#![allow(clippy::result_large_err)]

pub mod foundation;
mod macros;
pub mod prelude;
pub mod validators;
