//! Generator-produced column descriptors.
//!
//! An external generator reads persistence annotations and emits one
//! [`PersistentColumn`] per mapped attribute, with its validators pre-bound.
//! [`FieldBuilder::from_persistent`](crate::FieldBuilder::from_persistent)
//! turns one into a field keyed by the view name and stored under
//! `table.column.view`.

use std::fmt;
use std::sync::Arc;

use sift_validator::foundation::{SharedValidator, Validate};

use crate::coerce::Primitive;
use crate::error::{SchemaError, check_leaf_name};

/// A typed persistence column with pre-attached validators.
#[must_use = "builder methods must be chained or built"]
pub struct PersistentColumn<T: Primitive> {
    table: String,
    column: String,
    view: String,
    validators: Vec<SharedValidator<T::Input>>,
}

impl<T: Primitive> PersistentColumn<T> {
    /// Creates a column. Every part must be non-empty and free of separators.
    pub fn new(
        table: impl Into<String>,
        column: impl Into<String>,
        view: impl Into<String>,
    ) -> Result<Self, SchemaError> {
        let (table, column, view) = (table.into(), column.into(), view.into());
        check_leaf_name(&table)?;
        check_leaf_name(&column)?;
        check_leaf_name(&view)?;
        Ok(Self {
            table,
            column,
            view,
            validators: Vec::new(),
        })
    }

    /// Pre-binds a validator.
    pub fn with<V>(mut self, validator: V) -> Self
    where
        V: Validate<Input = T::Input> + Send + Sync + 'static,
    {
        self.validators.push(Arc::new(validator));
        self
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    #[must_use]
    pub fn column(&self) -> &str {
        &self.column
    }

    #[must_use]
    pub fn view(&self) -> &str {
        &self.view
    }

    /// `table.column.view`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}.{}.{}", self.table, self.column, self.view)
    }

    pub(crate) fn validators(&self) -> &[SharedValidator<T::Input>] {
        &self.validators
    }
}

impl<T: Primitive> Clone for PersistentColumn<T> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
            column: self.column.clone(),
            view: self.view.clone(),
            validators: self.validators.clone(),
        }
    }
}

impl<T: Primitive> fmt::Debug for PersistentColumn<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let constraints: Vec<_> = self.validators.iter().map(|v| v.constraint()).collect();
        f.debug_struct("PersistentColumn")
            .field("table", &self.table)
            .field("column", &self.column)
            .field("view", &self.view)
            .field("constraints", &constraints)
            .finish()
    }
}
