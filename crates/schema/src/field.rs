//! Field descriptors.
//!
//! A [`Field`] is immutable once built. Its shape is one of the four
//! [`Multiplicity`] variants; the type-erased coercer and the embedded schema
//! live behind crate-private construction, so fields can only come from the
//! builders here.
//!
//! ```rust,ignore
//! use sift_schema::prelude::*;
//!
//! let name = Field::scalar::<String>("name").with(min_length(3)).build()?;
//! let tags = Field::array::<String>("tags").optional().build()?;
//! let user = Field::object("user", user_schema).build()?;
//! ```

use std::borrow::Cow;
use std::collections::HashSet;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use serde_json::Value as Json;
use sift_validator::foundation::{SharedValidator, Validate, ValidationError};

use crate::coerce::{Kind, Primitive};
use crate::error::{SchemaError, check_leaf_name, check_qualified_name};
use crate::persistent::PersistentColumn;
use crate::schema::Schema;
use crate::value::Value;

/// How many values a field holds and of what sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Multiplicity {
    /// One primitive.
    Scalar,
    /// A JSON array of primitives.
    Array,
    /// One embedded object validated by a nested schema.
    Object,
    /// A JSON array of embedded objects.
    ArrayOfObject,
}

// ============================================================================
// COERCER
// ============================================================================

/// Coerces and validates one primitive value.
pub(crate) trait Coercer: Send + Sync {
    fn kind(&self) -> Kind;

    fn constraints(&self) -> Vec<Cow<'static, str>>;

    fn from_json(&self, node: &Json) -> Result<Value, ValidationError>;

    fn from_text(&self, raw: &str) -> Result<Value, ValidationError>;
}

struct Typed<T: Primitive> {
    validators: Vec<SharedValidator<T::Input>>,
    _primitive: PhantomData<fn() -> T>,
}

impl<T: Primitive> Typed<T> {
    /// Runs validators in declaration order; the first failure is returned.
    fn check(&self, value: T) -> Result<Value, ValidationError> {
        for validator in &self.validators {
            validator.validate(value.as_input())?;
        }
        Ok(value.into_value())
    }
}

impl<T: Primitive> Coercer for Typed<T> {
    fn kind(&self) -> Kind {
        T::KIND
    }

    fn constraints(&self) -> Vec<Cow<'static, str>> {
        self.validators.iter().map(|v| v.constraint()).collect()
    }

    fn from_json(&self, node: &Json) -> Result<Value, ValidationError> {
        self.check(T::from_json(node)?)
    }

    fn from_text(&self, raw: &str) -> Result<Value, ValidationError> {
        self.check(T::from_text(raw)?)
    }
}

/// Shape of a built field. Exactly one variant per [`Multiplicity`].
#[derive(Clone)]
pub(crate) enum Shape {
    Scalar(Arc<dyn Coercer>),
    Array(Arc<dyn Coercer>),
    Object(Arc<Schema>),
    ArrayOfObject(Arc<Schema>),
}

// ============================================================================
// FIELD
// ============================================================================

/// An immutable field descriptor.
#[derive(Clone)]
pub struct Field {
    name: String,
    qualified_name: Option<String>,
    required: bool,
    shape: Shape,
}

impl Field {
    /// Starts a scalar field of primitive `T`.
    pub fn scalar<T: Primitive>(name: impl Into<String>) -> FieldBuilder<T> {
        FieldBuilder::new(name.into(), false)
    }

    /// Starts an array field whose elements are primitive `T`.
    pub fn array<T: Primitive>(name: impl Into<String>) -> FieldBuilder<T> {
        FieldBuilder::new(name.into(), true)
    }

    /// Starts an embedded object field validated by `schema`.
    pub fn object(name: impl Into<String>, schema: Schema) -> ObjectFieldBuilder {
        ObjectFieldBuilder::new(name.into(), schema, false)
    }

    /// Starts an array field whose elements are objects validated by `schema`.
    pub fn array_of_object(name: impl Into<String>, schema: Schema) -> ObjectFieldBuilder {
        ObjectFieldBuilder::new(name.into(), schema, true)
    }

    /// Leaf key looked up in the input.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Persistence-qualified name, if any.
    #[must_use]
    pub fn qualified_name(&self) -> Option<&str> {
        self.qualified_name.as_deref()
    }

    /// Key the validated value is stored under: the qualified name if present,
    /// otherwise the leaf name.
    #[must_use]
    pub fn unique_name(&self) -> &str {
        self.qualified_name.as_deref().unwrap_or(&self.name)
    }

    #[must_use]
    pub fn is_required(&self) -> bool {
        self.required
    }

    #[must_use]
    pub fn multiplicity(&self) -> Multiplicity {
        match self.shape {
            Shape::Scalar(_) => Multiplicity::Scalar,
            Shape::Array(_) => Multiplicity::Array,
            Shape::Object(_) => Multiplicity::Object,
            Shape::ArrayOfObject(_) => Multiplicity::ArrayOfObject,
        }
    }

    /// Primitive kind for scalar and array fields.
    #[must_use]
    pub fn kind(&self) -> Option<Kind> {
        match &self.shape {
            Shape::Scalar(coercer) | Shape::Array(coercer) => Some(coercer.kind()),
            Shape::Object(_) | Shape::ArrayOfObject(_) => None,
        }
    }

    /// Embedded schema for object and array-of-object fields.
    #[must_use]
    pub fn schema(&self) -> Option<&Schema> {
        match &self.shape {
            Shape::Object(schema) | Shape::ArrayOfObject(schema) => Some(schema),
            Shape::Scalar(_) | Shape::Array(_) => None,
        }
    }

    /// Constraint names attached to this field, in order.
    #[must_use]
    pub fn constraints(&self) -> Vec<Cow<'static, str>> {
        match &self.shape {
            Shape::Scalar(coercer) | Shape::Array(coercer) => coercer.constraints(),
            Shape::Object(_) | Shape::ArrayOfObject(_) => Vec::new(),
        }
    }

    /// True for shapes a flat string parameter can never carry.
    pub(crate) fn is_nested(&self) -> bool {
        !matches!(self.shape, Shape::Scalar(_))
    }

    pub(crate) fn shape(&self) -> &Shape {
        &self.shape
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name)
            .field("qualified_name", &self.qualified_name)
            .field("required", &self.required)
            .field("multiplicity", &self.multiplicity())
            .field("kind", &self.kind())
            .field("constraints", &self.constraints())
            .finish()
    }
}

// ============================================================================
// BUILDERS
// ============================================================================

/// Builder for scalar and array fields of primitive `T`.
#[must_use = "builder methods must be chained or built"]
pub struct FieldBuilder<T: Primitive> {
    name: String,
    qualified_name: Option<String>,
    required: bool,
    array: bool,
    validators: Vec<SharedValidator<T::Input>>,
}

impl<T: Primitive> FieldBuilder<T> {
    fn new(name: String, array: bool) -> Self {
        Self {
            name,
            qualified_name: None,
            required: true,
            array,
            validators: Vec::new(),
        }
    }

    /// Wraps a generated persistent column: the view name becomes the leaf
    /// name, `table.column.view` the qualified name, and the column's
    /// validators come first.
    pub fn from_persistent(column: &PersistentColumn<T>) -> Self {
        Self::wrap(column, false)
    }

    /// Like [`from_persistent`](Self::from_persistent), but the field holds
    /// an array and the column's validators apply to every element.
    pub fn array_from_persistent(column: &PersistentColumn<T>) -> Self {
        Self::wrap(column, true)
    }

    fn wrap(column: &PersistentColumn<T>, array: bool) -> Self {
        Self {
            name: column.view().to_owned(),
            qualified_name: Some(column.qualified_name()),
            required: true,
            array,
            validators: column.validators().to_vec(),
        }
    }

    /// Makes the field optional. Fields are required by default.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Sets the persistence-qualified name.
    pub fn qualified(mut self, name: impl Into<String>) -> Self {
        self.qualified_name = Some(name.into());
        self
    }

    /// Attaches a constraint.
    pub fn with<V>(mut self, validator: V) -> Self
    where
        V: Validate<Input = T::Input> + Send + Sync + 'static,
    {
        self.validators.push(Arc::new(validator));
        self
    }

    /// Finishes the field.
    pub fn build(self) -> Result<Field, SchemaError> {
        check_names(&self.name, self.qualified_name.as_deref())?;

        let mut seen = HashSet::new();
        for validator in &self.validators {
            let constraint = validator.constraint();
            if !seen.insert(constraint.clone()) {
                return Err(SchemaError::DuplicateConstraint {
                    field: self.name,
                    constraint: constraint.into_owned(),
                });
            }
        }

        let coercer: Arc<dyn Coercer> = Arc::new(Typed::<T> {
            validators: self.validators,
            _primitive: PhantomData,
        });
        Ok(Field {
            name: self.name,
            qualified_name: self.qualified_name,
            required: self.required,
            shape: if self.array {
                Shape::Array(coercer)
            } else {
                Shape::Scalar(coercer)
            },
        })
    }
}

/// Builder for object and array-of-object fields.
#[must_use = "builder methods must be chained or built"]
#[derive(Debug)]
pub struct ObjectFieldBuilder {
    name: String,
    qualified_name: Option<String>,
    required: bool,
    array: bool,
    schema: Schema,
}

impl ObjectFieldBuilder {
    fn new(name: String, schema: Schema, array: bool) -> Self {
        Self {
            name,
            qualified_name: None,
            required: true,
            array,
            schema,
        }
    }

    /// Makes the field optional. Fields are required by default.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Sets the persistence-qualified name.
    pub fn qualified(mut self, name: impl Into<String>) -> Self {
        self.qualified_name = Some(name.into());
        self
    }

    /// Finishes the field.
    pub fn build(self) -> Result<Field, SchemaError> {
        check_names(&self.name, self.qualified_name.as_deref())?;
        let schema = Arc::new(self.schema);
        Ok(Field {
            name: self.name,
            qualified_name: self.qualified_name,
            required: self.required,
            shape: if self.array {
                Shape::ArrayOfObject(schema)
            } else {
                Shape::Object(schema)
            },
        })
    }
}

fn check_names(name: &str, qualified_name: Option<&str>) -> Result<(), SchemaError> {
    check_leaf_name(name)?;
    qualified_name.map_or(Ok(()), check_qualified_name)
}

// ============================================================================
// TESTS
// ============================================================================
