use std::path::PathBuf;

use floe_common::error::Result;

use crate::context::ConnectorContext;
use crate::discovery::discover_tables;
use crate::job::JobContext;
use crate::split::PointerSplit;

/// Plans one split per root that has at least one resolvable batch.
///
/// Roots that list no entries, or whose pointer files are all empty or
/// invalid, produce no split. File system and store failures abort planning.
pub fn plan_splits(ctx: &ConnectorContext, roots: &[PathBuf], job: &JobContext) -> Result<Vec<PointerSplit>> {
    let mut splits = Vec::new();
    for root in roots {
        let Some(tables) = discover_tables(ctx, root)? else {
            tracing::debug!(root = %root.display(), "root is empty, skipping");
            continue;
        };
        let num_batches: u64 = tables.iter().map(|t| t.num_batches() as u64).sum();
        tracing::debug!(root = %root.display(), tables = tables.len(), batches = num_batches, "planned root");

        if num_batches > 0 {
            splits.push(PointerSplit::new(root.clone(), 0, num_batches, job.clone()));
        }
    }
    tracing::info!(job = %job.job_id, roots = roots.len(), splits = splits.len(), "planned splits");
    Ok(splits)
}
