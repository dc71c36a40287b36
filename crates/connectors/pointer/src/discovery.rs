//! Root discovery shared by split planning and record readers.
//!
//! A root is walked breadth first. Every regular file found is a pointer
//! file holding newline-separated object ids; each id is resolved through
//! the object store into a table handle.

use std::collections::VecDeque;
use std::path::Path;

use floe_common::error::Result;
use floe_store::{FileStatus, ObjectId, TableHandle};

use crate::context::ConnectorContext;

/// Resolves every table referenced from pointer files under `root`, in
/// discovery order.
///
/// Returns `Ok(None)` when the root itself lists no entries, so callers can
/// pick their own policy for a missing table. Unknown or malformed ids are
/// logged and end processing of that pointer file; any other failure is
/// returned.
pub fn discover_tables(ctx: &ConnectorContext, root: &Path) -> Result<Option<Vec<TableHandle>>> {
    let root_status = ctx.fs().list_status(root, ctx.filter())?;
    if root_status.is_empty() {
        return Ok(None);
    }

    let mut tables = Vec::new();
    let mut pending: VecDeque<Vec<FileStatus>> = VecDeque::new();
    pending.push_back(root_status);

    while let Some(statuses) = pending.pop_front() {
        for status in statuses {
            if status.is_dir {
                pending.push_back(ctx.fs().list_status(&status.path, ctx.filter())?);
                continue;
            }
            if let Some(table) = read_pointer_file(ctx, &status)? {
                tables.push(table);
            }
        }
    }
    Ok(Some(tables))
}

/// Resolves the reference held by one pointer file.
///
/// Only the first line is looked at: it either resolves or the whole file
/// is skipped.
fn read_pointer_file(ctx: &ConnectorContext, status: &FileStatus) -> Result<Option<TableHandle>> {
    // Some writers leave zero-length pointer files behind.
    if status.len == 0 {
        return Ok(None);
    }
    let path = status.path.as_path();
    let buffer = ctx.fs().read_to_end(path)?;
    if buffer.is_empty() {
        return Ok(None);
    }
    let content = String::from_utf8_lossy(&buffer);
    let lines = pointer_lines(&content);
    let Some(token) = lines.first() else {
        return Ok(None);
    };
    if lines.len() > 1 {
        tracing::debug!(path = %path.display(), ignored = lines.len() - 1, "ignoring trailing references");
    }

    match token.parse::<ObjectId>().and_then(|id| ctx.store().resolve(id)) {
        Ok(table) => Ok(Some(table)),
        Err(e) if e.is_skippable() => {
            tracing::warn!(path = %path.display(), content = %content, error = %e, "Skipping invalid file");
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Splits pointer file content on `\n`, dropping trailing empty lines.
fn pointer_lines(content: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = content.split('\n').collect();
    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(content: &str) -> Vec<&str> {
        pointer_lines(content)
    }

    #[test]
    fn pointer_lines_drop_only_trailing_blanks() {
        assert_eq!(lines("1234"), vec!["1234"]);
        assert_eq!(lines("1234\n"), vec!["1234"]);
        assert_eq!(lines("1234\n\n\n"), vec!["1234"]);
        assert_eq!(lines("a\n\nb"), vec!["a", "", "b"]);
        assert_eq!(lines("bad-id\n9999"), vec!["bad-id", "9999"]);
        assert!(lines("\n\n").is_empty());
    }
}
