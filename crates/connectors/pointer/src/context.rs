use std::fmt;
use std::sync::Arc;

use floe_common::Settings;
use floe_store::{ColumnResolver, FileSystem, HiddenFileFilter, IpcStore, LocalFileSystem, ObjectStore, PathFilter};

use crate::resolver::HostTypeResolver;

/// Collaborators shared by planning and reading.
///
/// Build one per process before planning starts and clone it into each
/// reader; clones share the same file system, store client and resolver.
#[derive(Clone)]
pub struct ConnectorContext {
    fs: Arc<dyn FileSystem>,
    store: Arc<dyn ObjectStore>,
    resolver: Arc<dyn ColumnResolver>,
    filter: Arc<dyn PathFilter>,
}

impl ConnectorContext {
    pub fn new(fs: Arc<dyn FileSystem>, store: Arc<dyn ObjectStore>) -> Self {
        Self {
            fs,
            store,
            resolver: Arc::new(HostTypeResolver),
            filter: Arc::new(HiddenFileFilter::default()),
        }
    }

    /// Local disk for pointer files, an [`IpcStore`] under `settings.store_dir` for objects.
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(Arc::new(LocalFileSystem), Arc::new(IpcStore::new(settings.store_dir.clone())))
            .with_filter(Arc::new(HiddenFileFilter::new(settings.hidden_prefixes.iter().cloned())))
    }

    pub fn with_resolver(mut self, resolver: Arc<dyn ColumnResolver>) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_filter(mut self, filter: Arc<dyn PathFilter>) -> Self {
        self.filter = filter;
        self
    }

    pub fn fs(&self) -> &dyn FileSystem {
        self.fs.as_ref()
    }

    pub fn store(&self) -> &dyn ObjectStore {
        self.store.as_ref()
    }

    pub fn resolver(&self) -> Arc<dyn ColumnResolver> {
        self.resolver.clone()
    }

    pub fn filter(&self) -> &dyn PathFilter {
        self.filter.as_ref()
    }
}

impl fmt::Debug for ConnectorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectorContext")
            .field("resolver", &self.resolver)
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}
