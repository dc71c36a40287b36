//! Pointer-file connector.
//!
//! Tables live in an external object store. A table root on the file system
//! only holds small pointer files naming the objects that make up the table.
//! Planning walks each root and emits one [`PointerSplit`] per root with
//! data; a [`PointerRecordReader`] walks the root again and hands out the
//! rows of every batch in discovery order.
//!
//! # Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use floe_connector_pointer::{ConnectorContext, InputFormat, JobContext, NullReporter, PointerInputFormat, RecordReader};
//! use floe_store::{IpcStore, LocalFileSystem};
//!
//! # fn main() -> floe_common::Result<()> {
//! let ctx = ConnectorContext::new(Arc::new(LocalFileSystem), Arc::new(IpcStore::new("/var/lib/floe")));
//! let format = PointerInputFormat::new(ctx);
//!
//! let mut job = JobContext::new("job-1");
//! job.set_input_paths(&["/warehouse/orders"]);
//! for split in format.get_splits(&job, 1)? {
//!     let mut reader = format.get_record_reader(&split, &job, &mut NullReporter)?;
//!     let mut key = reader.create_key();
//!     let mut value = reader.create_value();
//!     while reader.next(&mut key, &mut value)? {
//!         println!("{:?}", value.values()?);
//!     }
//!     reader.close()?;
//! }
//! # Ok(())
//! # }
//! ```

pub mod context;
pub mod discovery;
pub mod input_format;
pub mod job;
pub mod planner;
pub mod reader;
pub mod record;
pub mod resolver;
pub mod split;

pub use context::ConnectorContext;
pub use discovery::discover_tables;
pub use input_format::{InputFormat, NullReporter, PointerInputFormat, RecordReader, Reporter};
pub use job::JobContext;
pub use planner::plan_splits;
pub use reader::{PointerRecordReader, Rows};
pub use record::{RowRecord, RowView};
pub use resolver::HostTypeResolver;
pub use split::PointerSplit;
