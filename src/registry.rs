//! Binding Registry
//!
//! Per-domain storage of read and write functions keyed by tag. The
//! registry only grows: domains and bindings are added during setup and
//! queried by adapters at call time.

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error, info, warn};

use crate::domain::DomainName;
use crate::error::{AdapterError, Result};
use crate::options::IoOptions;
use crate::tag::{Direction, Format, Tag};

/// A registered read function: `(path, options) -> value`
pub type ReadFn<V> = Arc<dyn Fn(&Path, &IoOptions) -> anyhow::Result<V> + Send + Sync>;

/// A registered write function: `(data, path, options) -> ()`
pub type WriteFn<V> = Arc<dyn Fn(V, &Path, &IoOptions) -> anyhow::Result<()> + Send + Sync>;

/// A function bound in one direction
pub enum Binding<V> {
    Read(ReadFn<V>),
    Write(WriteFn<V>),
}

impl<V> Binding<V> {
    pub fn direction(&self) -> Direction {
        match self {
            Binding::Read(_) => Direction::Read,
            Binding::Write(_) => Direction::Write,
        }
    }
}

impl<V> Clone for Binding<V> {
    fn clone(&self) -> Self {
        match self {
            Binding::Read(f) => Binding::Read(Arc::clone(f)),
            Binding::Write(f) => Binding::Write(Arc::clone(f)),
        }
    }
}

impl<V> fmt::Debug for Binding<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Binding::{:?}", self.direction())
    }
}

/// What to do when a (domain, tag, direction) is bound twice
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DuplicatePolicy {
    /// Fail with [`AdapterError::AlreadyRegistered`]
    #[default]
    Reject,
    /// Replace the earlier binding
    Overwrite,
}

/// Bindings of a single domain
struct DomainBindings<T, V> {
    read: BTreeMap<T, ReadFn<V>>,
    write: BTreeMap<T, WriteFn<V>>,
}

impl<T: Tag, V> DomainBindings<T, V> {
    fn new() -> Self {
        Self {
            read: BTreeMap::new(),
            write: BTreeMap::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.read.is_empty() && self.write.is_empty()
    }

    fn contains(&self, tag: &T, direction: Direction) -> bool {
        match direction {
            Direction::Read => self.read.contains_key(tag),
            Direction::Write => self.write.contains_key(tag),
        }
    }

    fn tags(&self, direction: Direction) -> Vec<&T> {
        match direction {
            Direction::Read => self.read.keys().collect(),
            Direction::Write => self.write.keys().collect(),
        }
    }
}

/// The binding registry
pub struct Registry<T = Format, V = Value> {
    /// Bindings per declared domain
    domains: BTreeMap<DomainName, DomainBindings<T, V>>,
    /// Policy applied to repeated bindings
    policy: DuplicatePolicy,
}

impl<T: Tag, V> Default for Registry<T, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Tag, V> Registry<T, V> {
    /// Create an empty registry that rejects duplicate bindings
    pub fn new() -> Self {
        Self::with_policy(DuplicatePolicy::default())
    }

    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self {
            domains: BTreeMap::new(),
            policy,
        }
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: DuplicatePolicy) {
        self.policy = policy;
    }

    /// Declare a domain.
    ///
    /// Declaring a domain twice is accepted while it has no bindings; once
    /// anything is bound to it a repeat declaration fails with
    /// [`AdapterError::DomainAlreadyExists`].
    pub fn add_domain(&mut self, name: &str) -> Result<DomainName> {
        let domain = DomainName::parse(name)?;

        match self.domains.get(&domain) {
            Some(bindings) if !bindings.is_empty() => {
                error!(%domain, "domain declared again after bindings were added");
                Err(AdapterError::DomainAlreadyExists {
                    domain: domain.to_string(),
                })
            }
            Some(_) => {
                debug!(%domain, "domain already declared");
                Ok(domain)
            }
            None => {
                info!(%domain, "adding domain");
                self.domains.insert(domain.clone(), DomainBindings::new());
                Ok(domain)
            }
        }
    }

    pub fn contains_domain(&self, name: &str) -> bool {
        self.domains.contains_key(&DomainName::standardised(name))
    }

    /// All declared domains, in order
    pub fn domains(&self) -> impl Iterator<Item = &DomainName> {
        self.domains.keys()
    }

    /// Bind a function under `(domain, tag, binding.direction())`.
    ///
    /// Caller code binds through [`register_domain_read_fn`](crate::register_domain_read_fn)
    /// and [`register_domain_write_fn`](crate::register_domain_write_fn).
    pub(crate) fn register(&mut self, domain: &str, tag: T, binding: Binding<V>) -> Result<()> {
        let policy = self.policy;
        let name = DomainName::standardised(domain);
        let bindings = self.domains.get_mut(&name).ok_or_else(|| {
            error!(domain = %name, "cannot register into undeclared domain");
            AdapterError::DomainNotFound {
                domain: name.to_string(),
            }
        })?;

        let direction = binding.direction();
        if bindings.contains(&tag, direction) {
            match policy {
                DuplicatePolicy::Reject => {
                    error!(domain = %name, %tag, %direction, "duplicate binding rejected");
                    return Err(AdapterError::AlreadyRegistered {
                        domain: name.to_string(),
                        tag: tag.to_string(),
                        direction,
                    });
                }
                DuplicatePolicy::Overwrite => {
                    warn!(domain = %name, %tag, %direction, "overwriting binding");
                }
            }
        }

        info!(domain = %name, %tag, %direction, "registering io fn");
        match binding {
            Binding::Read(f) => {
                bindings.read.insert(tag, f);
            }
            Binding::Write(f) => {
                bindings.write.insert(tag, f);
            }
        }
        Ok(())
    }

    /// Look up the function bound under `(domain, tag, direction)`
    pub fn resolve(&self, domain: &str, tag: &T, direction: Direction) -> Result<Binding<V>> {
        match direction {
            Direction::Read => self.resolve_read(domain, tag).map(|f| Binding::Read(Arc::clone(f))),
            Direction::Write => self
                .resolve_write(domain, tag)
                .map(|f| Binding::Write(Arc::clone(f))),
        }
    }

    pub fn resolve_read(&self, domain: &str, tag: &T) -> Result<&ReadFn<V>> {
        let (name, bindings) = self.bindings(domain)?;
        bindings
            .read
            .get(tag)
            .ok_or_else(|| not_registered(name, tag, Direction::Read))
    }

    pub fn resolve_write(&self, domain: &str, tag: &T) -> Result<&WriteFn<V>> {
        let (name, bindings) = self.bindings(domain)?;
        bindings
            .write
            .get(tag)
            .ok_or_else(|| not_registered(name, tag, Direction::Write))
    }

    /// Check that a binding exists without handing out the function
    pub fn ensure_bound(&self, domain: &str, tag: &T, direction: Direction) -> Result<()> {
        let (name, bindings) = self.bindings(domain)?;
        if bindings.contains(tag, direction) {
            Ok(())
        } else {
            Err(not_registered(name, tag, direction))
        }
    }

    /// Tags bound in one direction for a domain, in order
    pub fn tags(&self, domain: &str, direction: Direction) -> Result<Vec<&T>> {
        self.bindings(domain).map(|(_, b)| b.tags(direction))
    }

    /// Total number of bindings across all domains
    pub fn binding_count(&self) -> usize {
        self.domains
            .values()
            .map(|b| b.read.len() + b.write.len())
            .sum()
    }

    fn bindings(&self, domain: &str) -> Result<(&DomainName, &DomainBindings<T, V>)> {
        let name = DomainName::standardised(domain);
        self.domains.get_key_value(&name).ok_or_else(|| {
            error!(domain = %name, "domain not found");
            AdapterError::DomainNotFound {
                domain: name.to_string(),
            }
        })
    }
}

fn not_registered<T: Tag>(domain: &DomainName, tag: &T, direction: Direction) -> AdapterError {
    error!(%domain, %tag, %direction, "no function registered for tag");
    AdapterError::TagNotRegistered {
        domain: domain.to_string(),
        tag: tag.to_string(),
        direction,
    }
}

impl<T: Tag, V> fmt::Debug for Registry<T, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        struct Tags<'a, T, V>(&'a DomainBindings<T, V>);

        impl<T: Tag, V> fmt::Debug for Tags<'_, T, V> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.debug_struct("DomainBindings")
                    .field("read", &self.0.read.keys().collect::<Vec<_>>())
                    .field("write", &self.0.write.keys().collect::<Vec<_>>())
                    .finish()
            }
        }

        f.debug_struct("Registry")
            .field("policy", &self.policy)
            .field(
                "domains",
                &self.domains.iter().map(|(d, b)| (d, Tags(b))).collect::<BTreeMap<_, _>>(),
            )
            .finish()
    }
}
