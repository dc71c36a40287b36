#![allow(dead_code)]

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use arrow::array::{Int32Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use floe_connector_pointer::ConnectorContext;
use floe_store::{LocalFileSystem, MemoryStore, ObjectId};

pub fn schema() -> SchemaRef {
    Arc::new(Schema::new(vec![
        Field::new("id", DataType::Int32, false),
        Field::new("tag", DataType::Utf8, true),
    ]))
}

/// A batch with ids `start..start + len`, tagged `tag`.
pub fn batch(start: i32, len: usize, tag: &str) -> RecordBatch {
    let ids: Vec<i32> = (start..start + len as i32).collect();
    let tags: Vec<&str> = vec![tag; len];
    RecordBatch::try_new(schema(), vec![Arc::new(Int32Array::from(ids)), Arc::new(StringArray::from(tags))])
        .unwrap()
}

pub fn put_table(store: &MemoryStore, raw_id: u64, batches: Vec<RecordBatch>) -> ObjectId {
    let id = ObjectId::new(raw_id);
    store.put(id, schema(), batches);
    id
}

pub fn write_pointer(dir: &Path, relative: &str, content: &str) -> PathBuf {
    let path = dir.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(&path, content).unwrap();
    path
}

pub fn context(store: Arc<MemoryStore>) -> ConnectorContext {
    ConnectorContext::new(Arc::new(LocalFileSystem), store)
}

/// Shared buffer the fmt subscriber writes into.
#[derive(Clone, Default)]
pub struct LogBuffer(Arc<Mutex<Vec<u8>>>);

impl LogBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).to_string()
    }
}

impl Write for LogBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// Runs `f` with a subscriber capturing warnings and returns the captured text.
pub fn capture_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
    let buffer = LogBuffer::default();
    let writer = buffer.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();
    let result = tracing::subscriber::with_default(subscriber, f);
    (result, buffer.contents())
}
