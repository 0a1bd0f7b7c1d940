//! Adapter Container
//!
//! Holds the domain registry and hands out adapters bound to a domain.
//!
//! Different domains often need isolated access to the same underlying
//! functionality: `orders` may read `json` and write `parquet`, while
//! `reporting` reads from a database and also writes `parquet`. Both can
//! share one `write_parquet` implementation without seeing each other's
//! read capabilities, because every binding lives under its domain.
//!
//! Typical use:
//!
//! 1. Declare the domains (`add_domain`, `with_domains` or `from_config`)
//! 2. Register read/write functions per domain
//! 3. Ask for a real or fake adapter for a domain
//! 4. Pass the adapter into application code as `&mut dyn IoAdapter`

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;
use tracing::{debug, info};

use crate::adapter::fake::store_key;
use crate::adapter::{AdapterMode, FakeAdapter, IoAdapter, RealAdapter};
use crate::config::IoConfig;
use crate::domain::DomainName;
use crate::error::{AdapterError, Result};
use crate::options::IoOptions;
use crate::registration;
use crate::registry::Registry;
use crate::tag::{Format, Tag};

/// Factory for domain-scoped adapters
#[derive(Debug)]
pub struct Container<T: Tag = Format, V = Value> {
    /// All domain bindings
    registry: Registry<T, V>,
    /// Variant returned by [`Container::get_adapter`]
    mode: AdapterMode,
}

impl<T: Tag, V> Default for Container<T, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Tag, V> Container<T, V> {
    /// Create an empty container handing out real adapters by default
    pub fn new() -> Self {
        Self::from_registry(Registry::new())
    }

    /// Wrap an existing registry
    pub fn from_registry(registry: Registry<T, V>) -> Self {
        Self {
            registry,
            mode: AdapterMode::default(),
        }
    }

    /// Create a container with the given domains already declared
    pub fn with_domains<I, S>(domains: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut container = Self::new();
        for domain in domains {
            container.add_domain(domain.as_ref())?;
        }
        Ok(container)
    }

    /// Create a container from loaded configuration
    pub fn from_config(config: &IoConfig) -> Result<Self> {
        let mut container =
            Self::from_registry(Registry::with_policy(config.adapters.duplicates));
        container.mode = config.adapters.mode;
        for domain in &config.domains.names {
            container.add_domain(domain)?;
        }
        info!(
            mode = ?container.mode,
            domains = config.domains.names.len(),
            "container configured"
        );
        Ok(container)
    }

    /// Create a container from configuration found in the default locations
    pub fn from_default_config() -> Result<Self> {
        Self::from_config(&IoConfig::load()?)
    }

    pub fn mode(&self) -> AdapterMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: AdapterMode) {
        self.mode = mode;
    }

    pub fn registry(&self) -> &Registry<T, V> {
        &self.registry
    }

    /// Declare a domain so functions can be registered to it.
    ///
    /// Requiring deliberate declaration means a typo such as `"ordesr"` fails
    /// at registration instead of silently creating a new domain.
    pub fn add_domain(&mut self, name: &str) -> Result<DomainName> {
        self.registry.add_domain(name)
    }

    pub fn has_domain(&self, name: &str) -> bool {
        self.registry.contains_domain(name)
    }

    pub fn domains(&self) -> impl Iterator<Item = &DomainName> {
        self.registry.domains()
    }

    /// Register a read function to a domain, returning it for further registrations
    pub fn register_domain_read_fn<F>(&mut self, domain: &str, tag: T, f: F) -> Result<F>
    where
        F: Fn(&Path, &IoOptions) -> anyhow::Result<V> + Clone + Send + Sync + 'static,
    {
        registration::register_domain_read_fn(&mut self.registry, domain, tag, f)
    }

    /// Register a write function to a domain, returning it for further registrations
    pub fn register_domain_write_fn<F>(&mut self, domain: &str, tag: T, f: F) -> Result<F>
    where
        F: Fn(V, &Path, &IoOptions) -> anyhow::Result<()> + Clone + Send + Sync + 'static,
    {
        registration::register_domain_write_fn(&mut self.registry, domain, tag, f)
    }

    /// Get a [`RealAdapter`] dispatching to the functions registered for `domain`
    pub fn get_real_adapter(&self, domain: &str) -> Result<RealAdapter<'_, T, V>> {
        let domain = self.resolve_domain(domain)?;
        debug!(%domain, "creating real adapter");
        Ok(RealAdapter::new(&self.registry, domain))
    }

    /// Get a fresh [`FakeAdapter`] with an empty store for `domain`
    pub fn get_fake_adapter(&self, domain: &str) -> Result<FakeAdapter<'_, T, V>> {
        let domain = self.resolve_domain(domain)?;
        debug!(%domain, "creating fake adapter");
        Ok(FakeAdapter::new(&self.registry, domain))
    }

    /// Get a fresh [`FakeAdapter`] whose store starts with `files`
    pub fn get_fake_adapter_with_files<I, P>(
        &self,
        domain: &str,
        files: I,
    ) -> Result<FakeAdapter<'_, T, V>>
    where
        I: IntoIterator<Item = (P, V)>,
        P: AsRef<Path>,
    {
        let domain = self.resolve_domain(domain)?;
        let files: BTreeMap<String, V> = files
            .into_iter()
            .map(|(p, v)| (store_key(p.as_ref()), v))
            .collect();
        debug!(%domain, seeded = files.len(), "creating fake adapter");
        Ok(FakeAdapter::with_files(&self.registry, domain, files))
    }

    fn resolve_domain(&self, name: &str) -> Result<DomainName> {
        let domain = DomainName::standardised(name);
        if self.registry.contains_domain(domain.as_str()) {
            Ok(domain)
        } else {
            Err(AdapterError::DomainNotFound {
                domain: domain.to_string(),
            })
        }
    }
}

impl<T: Tag, V: Clone> Container<T, V> {
    /// Get an adapter of the configured [`AdapterMode`]
    pub fn get_adapter(&self, domain: &str) -> Result<Box<dyn IoAdapter<T, V> + '_>> {
        Ok(match self.mode {
            AdapterMode::Real => Box::new(self.get_real_adapter(domain)?),
            AdapterMode::Fake => Box::new(self.get_fake_adapter(domain)?),
        })
    }
}
