//! In-memory adapter for tests

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use super::IoAdapter;
use crate::domain::DomainName;
use crate::error::{AdapterError, Result};
use crate::options::IoOptions;
use crate::registry::Registry;
use crate::tag::{Direction, Format, Tag};

/// Simulates I/O with a private `path -> value` store.
///
/// Entries are keyed by the path exactly as spelled, so `a/./f.json` and
/// `a/f.json` are two different files, and `files()` shows each path the
/// way it was written.
///
/// Tags are checked against the registry exactly as [`RealAdapter`](super::RealAdapter)
/// checks them, but the registered functions are never called. The store
/// starts empty (or from the files it was seeded with) and is never shared
/// with another adapter, so it doubles as the end state a test asserts on.
pub struct FakeAdapter<'r, T: Tag = Format, V = Value> {
    registry: &'r Registry<T, V>,
    domain: DomainName,
    files: BTreeMap<String, V>,
}

impl<'r, T: Tag, V> FakeAdapter<'r, T, V> {
    pub(crate) fn new(registry: &'r Registry<T, V>, domain: DomainName) -> Self {
        Self::with_files(registry, domain, BTreeMap::new())
    }

    pub(crate) fn with_files(
        registry: &'r Registry<T, V>,
        domain: DomainName,
        files: BTreeMap<String, V>,
    ) -> Self {
        Self {
            registry,
            domain,
            files,
        }
    }

    /// Everything written so far, by path
    pub fn files(&self) -> &BTreeMap<String, V> {
        &self.files
    }

    pub fn into_files(self) -> BTreeMap<String, V> {
        self.files
    }
}

/// Store key for a path: its string form, as spelled
pub(crate) fn store_key(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

impl<T: Tag, V: Clone> IoAdapter<T, V> for FakeAdapter<'_, T, V> {
    fn domain(&self) -> &DomainName {
        &self.domain
    }

    fn read_with(&self, path: &Path, tag: &T, _options: &IoOptions) -> Result<V> {
        self.registry
            .ensure_bound(self.domain.as_str(), tag, Direction::Read)?;

        debug!(domain = %self.domain, path = %path.display(), %tag, "fake read");
        self.files
            .get(&store_key(path))
            .cloned()
            .ok_or_else(|| AdapterError::PathNotFound {
                path: path.to_path_buf(),
            })
    }

    fn write_with(&mut self, data: V, path: &Path, tag: &T, _options: &IoOptions) -> Result<()> {
        self.registry
            .ensure_bound(self.domain.as_str(), tag, Direction::Write)?;

        debug!(domain = %self.domain, path = %path.display(), %tag, "fake write");
        self.files.insert(store_key(path), data);
        Ok(())
    }

    fn read_tags(&self) -> Result<Vec<T>> {
        let tags = self.registry.tags(self.domain.as_str(), Direction::Read)?;
        Ok(tags.into_iter().cloned().collect())
    }

    fn write_tags(&self) -> Result<Vec<T>> {
        let tags = self.registry.tags(self.domain.as_str(), Direction::Write)?;
        Ok(tags.into_iter().cloned().collect())
    }
}

impl<T: Tag, V: fmt::Debug> fmt::Debug for FakeAdapter<'_, T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeAdapter")
            .field("domain", &self.domain)
            .field("files", &self.files)
            .finish_non_exhaustive()
    }
}
