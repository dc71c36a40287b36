use std::fmt;
use std::path::{Path, PathBuf};

use floe_common::error::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::job::JobContext;

/// Unit of work covering every batch reachable under one table root.
///
/// `length` is the number of row batches discovered at planning time, not a
/// byte length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerSplit {
    path: PathBuf,
    start: u64,
    length: u64,
    job: JobContext,
}

impl PointerSplit {
    pub fn new(path: impl Into<PathBuf>, start: u64, length: u64, job: JobContext) -> Self {
        Self { path: path.into(), start, length, job }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn start(&self) -> u64 {
        self.start
    }

    pub fn length(&self) -> u64 {
        self.length
    }

    pub fn job(&self) -> &JobContext {
        &self.job
    }

    /// Preferred hosts. Object store data has no locality.
    pub fn locations(&self) -> Vec<String> {
        Vec::new()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| Error::Serialization(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| Error::Serialization(e.to_string()))
    }
}

impl fmt::Display for PointerSplit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}+{}", self.path.display(), self.start, self.length)
    }
}
