//! Store crate
//!
//! The collaborators the pointer connector talks to: object identifiers,
//! the object store client, table handles with their row batches, and the
//! file system used to walk table roots.

pub mod client;
pub mod fs;
pub mod ipc;
pub mod object_id;
pub mod table;
pub mod value;

pub use client::{MemoryStore, ObjectStore};
pub use fs::{AcceptAll, FileStatus, FileSystem, HiddenFileFilter, LocalFileSystem, PathFilter};
pub use ipc::IpcStore;
pub use object_id::ObjectId;
pub use table::{RowBatch, TableHandle};
pub use value::{ColumnResolver, Value};
