//! Host engine facing seams: split planning and record reading.

use floe_common::error::Result;

use crate::context::ConnectorContext;
use crate::job::JobContext;
use crate::planner::plan_splits;
use crate::reader::PointerRecordReader;
use crate::split::PointerSplit;

/// Receives task status updates from the connector.
pub trait Reporter {
    fn set_status(&mut self, status: &str);
}

/// A [`Reporter`] that drops every update.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn set_status(&mut self, _status: &str) {}
}

/// Pull-based row source over one split.
pub trait RecordReader {
    type Key;
    type Value;

    fn create_key(&self) -> Self::Key;

    /// A fresh holder that [`next`](Self::next) rebinds in place.
    fn create_value(&self) -> Self::Value;

    /// Binds `value` to the next row. Returns `false` when the split is exhausted.
    fn next(&mut self, key: &mut Self::Key, value: &mut Self::Value) -> Result<bool>;

    /// Rows consumed so far. The host uses this for scheduling, so it must be exact.
    fn pos(&self) -> u64;

    /// Fraction of the split consumed, in `[0, 1]`.
    fn progress(&self) -> f32;

    /// Safe to call more than once.
    fn close(&mut self) -> Result<()>;
}

/// The core trait for any Floe data source connector.
pub trait InputFormat {
    type Split;
    type Reader: RecordReader;

    /// Given the job's input paths, return a list of splits.
    ///
    /// `num_splits` is the host's hint and may be ignored.
    fn get_splits(&self, job: &JobContext, num_splits: usize) -> Result<Vec<Self::Split>>;

    /// Given a split, return a reader over its rows.
    fn get_record_reader(
        &self,
        split: &Self::Split,
        job: &JobContext,
        reporter: &mut dyn Reporter,
    ) -> Result<Self::Reader>;
}

/// [`InputFormat`] over tables referenced by pointer files.
#[derive(Debug, Clone)]
pub struct PointerInputFormat {
    ctx: ConnectorContext,
}

impl PointerInputFormat {
    pub fn new(ctx: ConnectorContext) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &ConnectorContext {
        &self.ctx
    }
}

impl InputFormat for PointerInputFormat {
    type Split = PointerSplit;
    type Reader = PointerRecordReader;

    /// One split per input path; the hint is ignored.
    fn get_splits(&self, job: &JobContext, _num_splits: usize) -> Result<Vec<PointerSplit>> {
        plan_splits(&self.ctx, &job.input_paths(), job)
    }

    fn get_record_reader(
        &self,
        split: &PointerSplit,
        job: &JobContext,
        reporter: &mut dyn Reporter,
    ) -> Result<PointerRecordReader> {
        reporter.set_status(&split.to_string());
        PointerRecordReader::open(&self.ctx, split, job)
    }
}
