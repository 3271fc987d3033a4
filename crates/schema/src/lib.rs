//! # sift-schema
//!
//! Schema-driven validation of a JSON document plus flat string overlays
//! (URL parameters and the like) into a typed, path-addressable result.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sift_schema::prelude::*;
//!
//! let schema = Schema::define([
//!     Field::scalar::<String>("name").with(min_length(3)).build()?,
//!     Field::scalar::<i64>("age").with(between(18, 120)).build()?,
//!     Field::scalar::<String>("email").with(email()).optional().build()?,
//! ])?;
//!
//! let person = schema.validate(r#"{"name":"Alice","age":30}"#)?;
//! assert_eq!(person.must_string("name"), "Alice");
//! assert_eq!(person.i64("age"), Some(30));
//!
//! let report = schema.validate(r#"{"name":"Al","age":200}"#).unwrap_err();
//! // validation failed with the following errors:
//! // - age: Value must be between 18 and 120
//! // - name: Must be at least 3 characters
//! println!("{report}");
//! ```
//!
//! ## Modules
//!
//! - [`coerce`]: strict conversion of raw JSON nodes and strings into primitives
//! - [`field`]: immutable field descriptors and their builders
//! - [`schema`]: field sets and the two-phase validation pipeline
//! - [`object`]: the result object, dotted-path lookup and [`flatten`](Object::flatten)
//! - [`persistent`]: generator-produced column descriptors
//!
//! Constraints and the error aggregate come from [`sift_validator`], re-exported
//! as [`validator`].

// ValidationError is the error type of every coercion and constraint.
#![allow(clippy::result_large_err)]

pub mod coerce;
pub mod error;
pub mod field;
pub mod object;
pub mod persistent;
pub mod prelude;
pub mod schema;
pub mod value;

pub use sift_validator as validator;

pub use coerce::{CoerceError, Kind, Primitive, RawKind, TimeLayout, Timestamp, parse_str};
pub use error::SchemaError;
pub use field::{Field, FieldBuilder, Multiplicity, ObjectFieldBuilder};
pub use object::{FlatMap, Object, PATH_SEPARATOR};
pub use persistent::PersistentColumn;
pub use schema::{Params, ROOT_PATH, Schema};
pub use value::{FromValue, Value};
