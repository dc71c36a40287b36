use std::sync::Arc;
use std::time::{Duration, Instant};

use arrow::array::ArrayRef;
use arrow::datatypes::{Schema, SchemaRef};
use arrow::record_batch::RecordBatch;
use floe_common::error::{Error, Result};
use floe_store::{ColumnResolver, RowBatch, Value};

use crate::context::ConnectorContext;
use crate::discovery::discover_tables;
use crate::input_format::RecordReader;
use crate::job::JobContext;
use crate::record::{RowRecord, RowView};
use crate::split::PointerSplit;

/// Read position over the flattened batch sequence.
#[derive(Debug)]
enum Cursor {
    Unstarted,
    /// `row` is the next row to hand out from `batches[batch]`, whose
    /// materialized form is `root`.
    InBatch { batch: usize, row: usize, root: RecordBatch, columns: Vec<ArrayRef> },
    Exhausted,
}

/// Reads every row of a [`PointerSplit`], batch after batch.
#[derive(Debug)]
pub struct PointerRecordReader {
    batches: Vec<RowBatch>,
    schema: SchemaRef,
    resolver: Arc<dyn ColumnResolver>,
    cursor: Cursor,
    /// Row handed out by the last successful advance, if any.
    current: Option<usize>,
    records_total: u64,
    records_consumed: u64,
    busy: Duration,
    closed: bool,
}

impl PointerRecordReader {
    /// Resolves every batch under the split's root.
    ///
    /// Fails with [`Error::TableNotFound`] if the root lists no entries: a
    /// split is only planned for a root with batches, so an empty root means
    /// it changed after planning.
    pub fn open(ctx: &ConnectorContext, split: &PointerSplit, job: &JobContext) -> Result<Self> {
        let root = split.path();
        let tables =
            discover_tables(ctx, root)?.ok_or_else(|| Error::TableNotFound(root.display().to_string()))?;

        let resolver = ctx.resolver();
        // The split's length is only a hint; size from what was actually found.
        let found: usize = tables.iter().map(|t| t.num_batches()).sum();
        let mut batches = Vec::with_capacity(found);
        let mut schema = None;
        let mut records_total = 0u64;
        for table in tables {
            schema = Some(table.schema());
            for mut batch in table.into_batches() {
                records_total += batch.row_count() as u64;
                batch.set_resolver(resolver.clone());
                batches.push(batch);
            }
        }

        if batches.len() as u64 != split.length() {
            tracing::warn!(
                split = %split,
                planned = split.length(),
                found = batches.len(),
                "batch count changed since planning"
            );
        }
        tracing::debug!(
            job = %job.job_id,
            split = %split,
            batches = batches.len(),
            rows = records_total,
            "opened reader"
        );

        Ok(Self {
            batches,
            schema: schema.unwrap_or_else(|| Arc::new(Schema::empty())),
            resolver,
            cursor: Cursor::Unstarted,
            current: None,
            records_total,
            records_consumed: 0,
            busy: Duration::ZERO,
            closed: false,
        })
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    pub fn num_batches(&self) -> usize {
        self.batches.len()
    }

    pub fn records_total(&self) -> u64 {
        self.records_total
    }

    /// Moves to the next row, skipping empty batches. Returns `false` once
    /// every batch is consumed.
    pub fn advance(&mut self) -> bool {
        let started = Instant::now();
        let advanced = self.step();
        self.busy += started.elapsed();
        advanced
    }

    fn step(&mut self) -> bool {
        loop {
            let next_batch = match &self.cursor {
                Cursor::Exhausted => {
                    self.current = None;
                    return false;
                }
                Cursor::InBatch { row, root, .. } if *row < root.num_rows() => break,
                Cursor::InBatch { batch, .. } => batch + 1,
                Cursor::Unstarted => 0,
            };
            let Some(batch) = self.batches.get(next_batch) else {
                self.cursor = Cursor::Exhausted;
                self.current = None;
                return false;
            };
            self.cursor = Cursor::InBatch {
                batch: next_batch,
                row: 0,
                root: batch.batch().clone(),
                columns: batch.columnar(),
            };
        }

        if let Cursor::InBatch { row, .. } = &mut self.cursor {
            self.current = Some(*row);
            *row += 1;
            self.records_consumed += 1;
        }
        true
    }

    /// Rows carry no key.
    pub fn current_key(&self) -> Option<()> {
        None
    }

    /// The row produced by the last successful [`advance`](Self::advance).
    pub fn current_value(&self) -> Option<RowView<'_>> {
        let (Cursor::InBatch { batch, columns, .. }, Some(row)) = (&self.cursor, self.current) else {
            return None;
        };
        let resolver = self.batches[*batch].resolver().unwrap_or(&self.resolver);
        Some(RowView::new(&self.schema, columns, row, resolver.as_ref()))
    }

    /// Rows consumed so far.
    pub fn position(&self) -> u64 {
        self.records_consumed
    }

    pub fn progress_fraction(&self) -> f32 {
        if self.records_total == 0 {
            return 1.0;
        }
        (self.records_consumed as f64 / self.records_total as f64) as f32
    }

    /// Owning iterator over the remaining rows.
    pub fn rows(self) -> Rows {
        Rows { reader: self }
    }
}

impl RecordReader for PointerRecordReader {
    type Key = ();
    type Value = RowRecord;

    fn create_key(&self) -> Self::Key {}

    fn create_value(&self) -> Self::Value {
        RowRecord::new(self.schema.clone())
    }

    fn next(&mut self, _key: &mut Self::Key, value: &mut Self::Value) -> Result<bool> {
        if !self.advance() {
            return Ok(false);
        }
        if let (Cursor::InBatch { batch, columns, .. }, Some(row)) = (&self.cursor, self.current) {
            let resolver = self.batches[*batch].resolver().unwrap_or(&self.resolver);
            value.set_values(columns, row, resolver);
        }
        Ok(true)
    }

    fn pos(&self) -> u64 {
        self.position()
    }

    fn progress(&self) -> f32 {
        self.progress_fraction()
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        tracing::debug!(
            rows = self.records_consumed,
            total = self.records_total,
            busy_ms = self.busy.as_millis() as u64,
            "closed reader"
        );
        Ok(())
    }
}

/// Iterator returned by [`PointerRecordReader::rows`].
#[derive(Debug)]
pub struct Rows {
    reader: PointerRecordReader,
}

impl Rows {
    pub fn reader(&self) -> &PointerRecordReader {
        &self.reader
    }
}

impl Iterator for Rows {
    type Item = Result<Vec<Value>>;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.reader.advance() {
            return None;
        }
        self.reader.current_value().map(|row| row.values())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Int32Array;
    use arrow::datatypes::{DataType, Field};

    use crate::resolver::HostTypeResolver;

    fn reader_over(sizes: &[usize]) -> PointerRecordReader {
        let schema = Arc::new(Schema::new(vec![Field::new("v", DataType::Int32, false)]));
        let mut next = 0;
        let batches = sizes
            .iter()
            .map(|&size| {
                let values: Vec<i32> = (next..next + size as i32).collect();
                next += size as i32;
                RowBatch::new(RecordBatch::try_new(schema.clone(), vec![Arc::new(Int32Array::from(values))]).unwrap())
            })
            .collect();
        PointerRecordReader {
            batches,
            schema,
            resolver: Arc::new(HostTypeResolver),
            cursor: Cursor::Unstarted,
            current: None,
            records_total: sizes.iter().sum::<usize>() as u64,
            records_consumed: 0,
            busy: Duration::ZERO,
            closed: false,
        }
    }

    #[test]
    fn skips_empty_batches() {
        let reader = reader_over(&[0, 2, 0, 0, 1, 0]);
        let rows: Vec<Vec<Value>> = reader.rows().map(|r| r.unwrap()).collect();
        assert_eq!(rows, vec![vec![Value::Int(0)], vec![Value::Int(1)], vec![Value::Int(2)]]);
    }

    #[test]
    fn exhausted_reader_stays_exhausted() {
        let mut reader = reader_over(&[1]);
        assert!(reader.current_value().is_none());
        assert!(reader.advance());
        assert!(reader.current_value().is_some());
        assert!(!reader.advance());
        assert!(!reader.advance());
        assert!(reader.current_value().is_none());
        assert_eq!(reader.position(), 1);
        assert_eq!(reader.progress_fraction(), 1.0);
    }

    #[test]
    fn empty_reader_reports_complete_progress() {
        let mut reader = reader_over(&[]);
        assert_eq!(reader.progress_fraction(), 1.0);
        assert!(!reader.advance());
        assert_eq!(reader.position(), 0);
    }

    #[test]
    fn next_rebinds_the_same_value() {
        let mut reader = reader_over(&[2, 1]);
        let mut key = reader.create_key();
        let mut value = reader.create_value();
        assert!(reader.current_key().is_none());

        let mut seen = Vec::new();
        while reader.next(&mut key, &mut value).unwrap() {
            seen.push(value.get(0).unwrap());
        }
        assert_eq!(seen, vec![Value::Int(0), Value::Int(1), Value::Int(2)]);
        assert_eq!(reader.pos(), 3);

        reader.close().unwrap();
        reader.close().unwrap();
    }
}
