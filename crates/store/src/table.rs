use std::sync::Arc;

use arrow::array::ArrayRef;
use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;

use crate::object_id::ObjectId;
use crate::value::ColumnResolver;

/// A columnar block of rows, the unit of materialization.
#[derive(Debug, Clone)]
pub struct RowBatch {
    batch: RecordBatch,
    resolver: Option<Arc<dyn ColumnResolver>>,
}

impl RowBatch {
    pub fn new(batch: RecordBatch) -> Self {
        Self { batch, resolver: None }
    }

    pub fn row_count(&self) -> usize {
        self.batch.num_rows()
    }

    pub fn schema(&self) -> SchemaRef {
        self.batch.schema()
    }

    /// The batch-root form.
    pub fn batch(&self) -> &RecordBatch {
        &self.batch
    }

    /// Column accessors indexed by column position.
    pub fn columnar(&self) -> Vec<ArrayRef> {
        self.batch.columns().to_vec()
    }

    pub fn set_resolver(&mut self, resolver: Arc<dyn ColumnResolver>) {
        self.resolver = Some(resolver);
    }

    pub fn resolver(&self) -> Option<&Arc<dyn ColumnResolver>> {
        self.resolver.as_ref()
    }
}

impl From<RecordBatch> for RowBatch {
    fn from(batch: RecordBatch) -> Self {
        Self::new(batch)
    }
}

/// A table object resolved from the object store.
#[derive(Debug, Clone)]
pub struct TableHandle {
    id: ObjectId,
    schema: SchemaRef,
    batches: Vec<RowBatch>,
}

impl TableHandle {
    pub fn new(id: ObjectId, schema: SchemaRef, batches: Vec<RowBatch>) -> Self {
        Self { id, schema, batches }
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn schema(&self) -> SchemaRef {
        self.schema.clone()
    }

    pub fn batches(&self) -> &[RowBatch] {
        &self.batches
    }

    pub fn into_batches(self) -> Vec<RowBatch> {
        self.batches
    }

    pub fn num_batches(&self) -> usize {
        self.batches.len()
    }

    pub fn num_rows(&self) -> usize {
        self.batches.iter().map(RowBatch::row_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Int32Array;
    use arrow::datatypes::{DataType, Field, Schema};

    fn batch(values: Vec<i32>) -> RecordBatch {
        let schema = Arc::new(Schema::new(vec![Field::new("a", DataType::Int32, false)]));
        RecordBatch::try_new(schema, vec![Arc::new(Int32Array::from(values))]).unwrap()
    }

    #[test]
    fn table_counts_batches_and_rows() {
        let b1 = batch(vec![1, 2, 3]);
        let schema = b1.schema();
        let table = TableHandle::new(
            ObjectId::new(1),
            schema,
            vec![RowBatch::new(b1), RowBatch::new(batch(vec![4, 5, 6, 7, 8]))],
        );

        assert_eq!(table.num_batches(), 2);
        assert_eq!(table.num_rows(), 8);
        assert_eq!(table.batches()[1].row_count(), 5);
    }

    #[test]
    fn columnar_view_shares_buffers() {
        let row_batch = RowBatch::new(batch(vec![10, 20]));
        let columns = row_batch.columnar();
        assert_eq!(columns.len(), 1);
        assert!(Arc::ptr_eq(&columns[0], row_batch.batch().column(0)));
        assert!(row_batch.resolver().is_none());
    }
}
