//! Command implementations behind the `floe` binary.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use arrow::ipc::reader::FileReader;
use floe_common::error::{Error, Result};
use floe_common::Settings;
use floe_connector_pointer::{
    ConnectorContext, InputFormat, JobContext, NullReporter, PointerInputFormat, PointerSplit, RecordReader,
};
use floe_store::{IpcStore, ObjectId};

fn job_for(roots: &[PathBuf]) -> JobContext {
    let mut job = JobContext::new(format!("floe-cli-{}", std::process::id()));
    job.set_input_paths(roots);
    job
}

/// Plans `roots` and writes one line per split, or the splits as JSON.
pub fn plan(settings: &Settings, roots: &[PathBuf], json: bool, out: &mut impl Write) -> Result<Vec<PointerSplit>> {
    let format = PointerInputFormat::new(ConnectorContext::from_settings(settings));
    let splits = format.get_splits(&job_for(roots), roots.len())?;
    if json {
        serde_json::to_writer_pretty(&mut *out, &splits).map_err(|e| Error::Serialization(e.to_string()))?;
        writeln!(out)?;
    } else {
        for split in &splits {
            writeln!(out, "{}\t{} batches", split.path().display(), split.length())?;
        }
    }
    Ok(splits)
}

/// Prints the rows under `root`, tab separated, after a header line.
/// Returns the number of rows printed.
pub fn scan(settings: &Settings, root: &Path, limit: Option<u64>, out: &mut impl Write) -> Result<u64> {
    let format = PointerInputFormat::new(ConnectorContext::from_settings(settings));
    let roots = [root.to_path_buf()];
    let job = job_for(&roots);
    let Some(split) = format.get_splits(&job, 1)?.into_iter().next() else {
        tracing::info!(root = %root.display(), "no batches under root");
        return Ok(0);
    };

    let mut reader = format.get_record_reader(&split, &job, &mut NullReporter)?;
    let header: Vec<&str> = reader.schema().fields().iter().map(|f| f.name().as_str()).collect();
    writeln!(out, "{}", header.join("\t"))?;

    let mut key = reader.create_key();
    let mut value = reader.create_value();
    while limit.map_or(true, |limit| reader.pos() < limit) && reader.next(&mut key, &mut value)? {
        let cells: Vec<String> = value.values()?.iter().map(ToString::to_string).collect();
        writeln!(out, "{}", cells.join("\t"))?;
    }
    let printed = reader.pos();
    tracing::info!(rows = printed, progress = reader.progress(), "scan finished");
    reader.close()?;
    Ok(printed)
}

/// Copies the batches of an Arrow IPC file into the store as a new object and
/// points `pointer_file` at it.
pub fn put(settings: &Settings, ipc_file: &Path, pointer_file: &Path) -> Result<ObjectId> {
    let reader = FileReader::try_new(File::open(ipc_file)?, None)?;
    let schema = reader.schema();
    let batches = reader.collect::<std::result::Result<Vec<_>, _>>()?;

    let store = IpcStore::new(settings.store_dir.clone());
    let id = store.next_id()?;
    store.put(id, schema, &batches)?;

    if let Some(parent) = pointer_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(pointer_file, format!("{}\n", id))?;
    tracing::info!(object = %id, pointer = %pointer_file.display(), batches = batches.len(), "stored table");
    Ok(id)
}
