//! Directory-backed object store: one Arrow IPC file per object.

use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use arrow::datatypes::SchemaRef;
use arrow::ipc::reader::FileReader;
use arrow::ipc::writer::FileWriter;
use arrow::record_batch::RecordBatch;
use floe_common::error::{Error, Result};

use crate::client::ObjectStore;
use crate::object_id::ObjectId;
use crate::table::{RowBatch, TableHandle};

#[derive(Debug, Clone)]
pub struct IpcStore {
    dir: PathBuf,
}

impl IpcStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn object_path(&self, id: ObjectId) -> PathBuf {
        self.dir.join(format!("{}.arrow", id))
    }

    /// Writes `batches` as object `id`, creating the store directory if needed.
    pub fn put(&self, id: ObjectId, schema: SchemaRef, batches: &[RecordBatch]) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.object_path(id);
        let file = File::create(&path)?;
        let mut writer = FileWriter::try_new(file, &schema)?;
        for batch in batches {
            writer.write(batch)?;
        }
        writer.finish()?;
        tracing::debug!(object = %id, path = %path.display(), batches = batches.len(), "stored object");
        Ok(path)
    }

    /// Picks the smallest id not yet used in the store directory.
    pub fn next_id(&self) -> Result<ObjectId> {
        let mut max = None;
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(ObjectId::new(1)),
            Err(e) => return Err(e.into()),
        };
        for entry in entries {
            let name = entry?.file_name();
            let Some(stem) = name.to_str().and_then(|n| n.strip_suffix(".arrow")) else {
                continue;
            };
            if let Ok(id) = stem.parse::<ObjectId>() {
                max = max.max(Some(id.raw()));
            }
        }
        let next = match max {
            Some(raw) => raw
                .checked_add(1)
                .ok_or_else(|| Error::Execution("object id space exhausted".to_string()))?,
            None => 1,
        };
        Ok(ObjectId::new(next))
    }
}

impl ObjectStore for IpcStore {
    fn resolve(&self, id: ObjectId) -> Result<TableHandle> {
        let path = self.object_path(id);
        let file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(Error::ObjectNotExists(id.to_string())),
            Err(e) => return Err(e.into()),
        };
        let reader = FileReader::try_new(file, None)?;
        let schema = reader.schema();
        let batches = reader
            .map(|batch| batch.map(RowBatch::new))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(TableHandle::new(id, schema, batches))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Int64Array;
    use arrow::datatypes::{DataType, Field, Schema};
    use std::sync::Arc;

    fn batch(schema: &SchemaRef, values: Vec<i64>) -> RecordBatch {
        RecordBatch::try_new(schema.clone(), vec![Arc::new(Int64Array::from(values))]).unwrap()
    }

    #[test]
    fn put_then_resolve_keeps_batch_boundaries() {
        let dir = tempfile::tempdir().unwrap();
        let store = IpcStore::new(dir.path().join("objects"));
        let schema = Arc::new(Schema::new(vec![Field::new("v", DataType::Int64, false)]));

        let id = store.next_id().unwrap();
        assert_eq!(id, ObjectId::new(1));
        store
            .put(id, schema.clone(), &[batch(&schema, vec![1, 2, 3]), batch(&schema, vec![4, 5, 6, 7, 8])])
            .unwrap();

        let table = store.resolve(id).unwrap();
        assert_eq!(table.schema(), schema);
        assert_eq!(table.num_batches(), 2);
        assert_eq!(table.num_rows(), 8);
        assert_eq!(store.next_id().unwrap(), ObjectId::new(2));
    }

    #[test]
    fn missing_object_is_not_exists() {
        let dir = tempfile::tempdir().unwrap();
        let store = IpcStore::new(dir.path());
        let err = store.resolve(ObjectId::new(0x1234)).unwrap_err();
        assert!(matches!(err, Error::ObjectNotExists(_)));
    }

    #[test]
    fn corrupt_object_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let store = IpcStore::new(dir.path());
        std::fs::write(store.object_path(ObjectId::new(3)), b"not arrow").unwrap();
        let err = store.resolve(ObjectId::new(3)).unwrap_err();
        assert!(matches!(err, Error::Arrow(_)));
        assert!(!err.is_skippable());
    }
}
