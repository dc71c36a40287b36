use arrow::datatypes::SchemaRef;
use arrow::record_batch::RecordBatch;
use dashmap::DashMap;
use floe_common::error::{Error, Result};

use crate::object_id::ObjectId;
use crate::table::{RowBatch, TableHandle};

/// Client of the external object store.
///
/// Implementations must be safe to share between readers running on
/// different threads.
pub trait ObjectStore: Send + Sync {
    /// Resolves `id` into a table handle. Unknown ids yield [`Error::ObjectNotExists`].
    fn resolve(&self, id: ObjectId) -> Result<TableHandle>;
}

#[derive(Debug, Clone)]
struct StoredTable {
    schema: SchemaRef,
    batches: Vec<RecordBatch>,
}

/// An in-process object store, mostly useful for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: DashMap<ObjectId, StoredTable>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self { tables: DashMap::new() }
    }

    /// Stores a table under `id`, replacing any previous object with that id.
    pub fn put(&self, id: ObjectId, schema: SchemaRef, batches: Vec<RecordBatch>) {
        self.tables.insert(id, StoredTable { schema, batches });
    }

    pub fn remove(&self, id: ObjectId) -> bool {
        self.tables.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl ObjectStore for MemoryStore {
    fn resolve(&self, id: ObjectId) -> Result<TableHandle> {
        let stored = self
            .tables
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| Error::ObjectNotExists(id.to_string()))?;
        let batches = stored.batches.into_iter().map(RowBatch::new).collect();
        Ok(TableHandle::new(id, stored.schema, batches))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::StringArray;
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;

    #[test]
    fn resolve_returns_stored_batches_in_order() {
        let schema = Arc::new(Schema::new(vec![Field::new("name", DataType::Utf8, true)]));
        let b1 = RecordBatch::try_new(schema.clone(), vec![Arc::new(StringArray::from(vec!["a"]))]).unwrap();
        let b2 =
            RecordBatch::try_new(schema.clone(), vec![Arc::new(StringArray::from(vec!["b", "c"]))]).unwrap();

        let store = MemoryStore::new();
        store.put(ObjectId::new(7), schema.clone(), vec![b1, b2]);

        let table = store.resolve(ObjectId::new(7)).unwrap();
        assert_eq!(table.id(), ObjectId::new(7));
        assert_eq!(table.schema(), schema);
        let sizes: Vec<usize> = table.batches().iter().map(|b| b.row_count()).collect();
        assert_eq!(sizes, vec![1, 2]);
    }

    #[test]
    fn resolve_unknown_id_is_object_not_exists() {
        let store = MemoryStore::new();
        let err = store.resolve(ObjectId::new(0x9999)).unwrap_err();
        assert!(matches!(err, Error::ObjectNotExists(ref id) if id == "o0000000000009999"));
        assert!(err.is_skippable());
    }

    #[test]
    fn remove_makes_object_unresolvable() {
        let schema = Arc::new(Schema::empty());
        let store = MemoryStore::new();
        store.put(ObjectId::new(1), schema, vec![]);
        assert_eq!(store.len(), 1);
        assert!(store.remove(ObjectId::new(1)));
        assert!(!store.remove(ObjectId::new(1)));
        assert!(store.resolve(ObjectId::new(1)).is_err());
        assert!(store.is_empty());
    }
}
