//! Row holders handed to the host engine.

use std::sync::Arc;

use arrow::array::ArrayRef;
use arrow::datatypes::SchemaRef;
use floe_common::error::{Error, Result};
use floe_store::{ColumnResolver, Value};

/// Reusable, schema-bound row holder.
///
/// The reader rebinds it to the current batch's columns on every call to
/// `next`. Binding only clones column handles; cell values are resolved when
/// read.
#[derive(Debug, Clone)]
pub struct RowRecord {
    schema: SchemaRef,
    columns: Vec<ArrayRef>,
    row: usize,
    resolver: Option<Arc<dyn ColumnResolver>>,
}

impl RowRecord {
    pub fn new(schema: SchemaRef) -> Self {
        let width = schema.fields().len();
        Self { schema, columns: Vec::with_capacity(width), row: 0, resolver: None }
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    pub fn set_values(&mut self, columns: &[ArrayRef], row: usize, resolver: &Arc<dyn ColumnResolver>) {
        self.columns.clear();
        self.columns.extend(columns.iter().cloned());
        self.row = row;
        match &self.resolver {
            Some(current) if Arc::ptr_eq(current, resolver) => {}
            _ => self.resolver = Some(resolver.clone()),
        }
    }

    pub fn is_bound(&self) -> bool {
        self.resolver.is_some()
    }

    /// Number of columns of the bound row.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, column: usize) -> Result<Value> {
        let resolver = self.resolver.as_ref().ok_or_else(|| Error::Execution("row record is not bound".to_string()))?;
        let array = self
            .columns
            .get(column)
            .ok_or_else(|| Error::Execution(format!("column {} out of range for {} columns", column, self.columns.len())))?;
        resolver.resolve(array.as_ref(), self.row)
    }

    pub fn values(&self) -> Result<Vec<Value>> {
        (0..self.columns.len()).map(|i| self.get(i)).collect()
    }
}

/// Borrowed view of the reader's current row, valid until the next advance.
#[derive(Debug, Clone, Copy)]
pub struct RowView<'a> {
    schema: &'a SchemaRef,
    columns: &'a [ArrayRef],
    row: usize,
    resolver: &'a dyn ColumnResolver,
}

impl<'a> RowView<'a> {
    pub(crate) fn new(
        schema: &'a SchemaRef,
        columns: &'a [ArrayRef],
        row: usize,
        resolver: &'a dyn ColumnResolver,
    ) -> Self {
        Self { schema, columns, row, resolver }
    }

    pub fn schema(&self) -> &'a SchemaRef {
        self.schema
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn get(&self, column: usize) -> Result<Value> {
        let array = self
            .columns
            .get(column)
            .ok_or_else(|| Error::Execution(format!("column {} out of range for {} columns", column, self.columns.len())))?;
        self.resolver.resolve(array.as_ref(), self.row)
    }

    pub fn values(&self) -> Result<Vec<Value>> {
        (0..self.columns.len()).map(|i| self.get(i)).collect()
    }
}
