//! Everything needed to declare a schema and read its results.
//!
//! ```rust,ignore
//! use sift_schema::prelude::*;
//! ```

pub use crate::{
    Field, FieldBuilder, FlatMap, Multiplicity, Object, Params, PersistentColumn, Schema,
    SchemaError, Timestamp, Value,
};
pub use sift_validator::prelude::*;
