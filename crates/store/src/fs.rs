//! File system access used to walk table roots and read pointer files.

use std::fmt;
use std::path::{Path, PathBuf};

use floe_common::error::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStatus {
    pub path: PathBuf,
    pub is_dir: bool,
    pub len: u64,
}

/// Decides which directory entries a listing returns.
pub trait PathFilter: Send + Sync + fmt::Debug {
    fn accept(&self, path: &Path) -> bool;
}

/// Rejects entries whose file name starts with one of the hidden prefixes
/// (`_` and `.` by default), e.g. `_SUCCESS` markers and `.crc` side files.
#[derive(Debug, Clone)]
pub struct HiddenFileFilter {
    prefixes: Vec<String>,
}

impl HiddenFileFilter {
    pub fn new<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { prefixes: prefixes.into_iter().map(Into::into).collect() }
    }
}

impl Default for HiddenFileFilter {
    fn default() -> Self {
        Self::new(["_", "."])
    }
}

impl PathFilter for HiddenFileFilter {
    fn accept(&self, path: &Path) -> bool {
        match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => !self.prefixes.iter().any(|p| name.starts_with(p.as_str())),
            None => true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl PathFilter for AcceptAll {
    fn accept(&self, _path: &Path) -> bool {
        true
    }
}

pub trait FileSystem: Send + Sync {
    /// Lists the immediate children of `path` accepted by `filter`.
    fn list_status(&self, path: &Path, filter: &dyn PathFilter) -> Result<Vec<FileStatus>>;

    fn read_to_end(&self, path: &Path) -> Result<Vec<u8>>;
}

/// [`FileSystem`] over the local disk. Listings are sorted by path.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileSystem;

impl FileSystem for LocalFileSystem {
    fn list_status(&self, path: &Path, filter: &dyn PathFilter) -> Result<Vec<FileStatus>> {
        let mut statuses = Vec::new();
        for entry in std::fs::read_dir(path)? {
            let entry = entry?;
            let entry_path = entry.path();
            if !filter.accept(&entry_path) {
                continue;
            }
            let metadata = std::fs::metadata(&entry_path)?;
            statuses.push(FileStatus { path: entry_path, is_dir: metadata.is_dir(), len: metadata.len() });
        }
        statuses.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(statuses)
    }

    fn read_to_end(&self, path: &Path) -> Result<Vec<u8>> {
        Ok(std::fs::read(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use floe_common::Error;

    #[test]
    fn hidden_filter_rejects_marker_files() {
        let filter = HiddenFileFilter::default();
        assert!(!filter.accept(Path::new("/t1/_SUCCESS")));
        assert!(!filter.accept(Path::new("/t1/.part-0.crc")));
        assert!(filter.accept(Path::new("/t1/part-0")));
        assert!(filter.accept(Path::new("/t1/nested_dir")));
    }

    #[test]
    fn list_status_is_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("b"), b"2").unwrap();
        std::fs::write(dir.path().join("a"), b"1").unwrap();
        std::fs::write(dir.path().join("_SUCCESS"), b"").unwrap();
        std::fs::create_dir(dir.path().join("c")).unwrap();

        let fs = LocalFileSystem;
        let listed = fs.list_status(dir.path(), &HiddenFileFilter::default()).unwrap();
        let names: Vec<_> =
            listed.iter().map(|s| s.path.file_name().unwrap().to_str().unwrap().to_string()).collect();
        assert_eq!(names, vec!["a", "b", "c"]);
        assert!(listed[2].is_dir);
        assert_eq!(listed[0].len, 1);

        let all = fs.list_status(dir.path(), &AcceptAll).unwrap();
        assert_eq!(all.len(), 4);
    }

    #[test]
    fn listing_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = LocalFileSystem.list_status(&dir.path().join("gone"), &AcceptAll).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
