//! Production adapter dispatching to registered functions

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

/// Dispatches `read`/`write` to the functions bound in its domain.
///
/// Holds no state beyond the domain and a borrow of the registry; bindings
/// are looked up on every call.
pub struct RealAdapter<'r, T: Tag = Format, V = Value> {
    registry: &'r Registry<T, V>,
    domain: DomainName,
}

impl<'r, T: Tag, V> RealAdapter<'r, T, V> {
    pub(crate) fn new(registry: &'r Registry<T, V>, domain: DomainName) -> Self {
        Self { registry, domain }
    }
}

impl<T: Tag, V> IoAdapter<T, V> for RealAdapter<'_, T, V> {
    fn domain(&self) -> &DomainName {
        &self.domain
    }

    fn read_with(&self, path: &Path, tag: &T, options: &IoOptions) -> Result<V> {
        debug!(domain = %self.domain, path = %path.display(), %tag, ?options, "read");
        let read = self.registry.resolve_read(self.domain.as_str(), tag)?;
        read(path, options).map_err(AdapterError::Backend)
    }

    fn write_with(&mut self, data: V, path: &Path, tag: &T, options: &IoOptions) -> Result<()> {
        debug!(domain = %self.domain, path = %path.display(), %tag, ?options, "write");
        let write = self.registry.resolve_write(self.domain.as_str(), tag)?;
        write(data, path, options).map_err(AdapterError::Backend)
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

impl<T: Tag, V> Clone for RealAdapter<'_, T, V> {
    fn clone(&self) -> Self {
        Self {
            registry: self.registry,
            domain: self.domain.clone(),
        }
    }
}

impl<T: Tag, V> fmt::Debug for RealAdapter<'_, T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RealAdapter")
            .field("domain", &self.domain)
            .finish_non_exhaustive()
    }
}
