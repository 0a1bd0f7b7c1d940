//! Registration of caller-supplied read/write functions
//!
//! Each call binds a function under one `(domain, tag)` and hands the same
//! function back, so one implementation can be bound to several domains by
//! feeding the result of one registration into the next:
//!
//! ```
//! use std::path::Path;
//! use io_adapters::{register_domain_read_fn, Format, IoOptions, Registry};
//! use serde_json::Value;
//!
//! fn read_stub(_path: &Path, _options: &IoOptions) -> anyhow::Result<Value> {
//!     Ok(Value::Null)
//! }
//!
//! let mut registry: Registry = Registry::new();
//! registry.add_domain("orders")?;
//! registry.add_domain("payment")?;
//!
//! let read = register_domain_read_fn(&mut registry, "orders", Format::Json, read_stub)?;
//! register_domain_read_fn(&mut registry, "payment", Format::Json, read)?;
//! # Ok::<(), io_adapters::AdapterError>(())
//! ```

use std::path::Path;
use std::sync::Arc;

use crate::error::Result;
use crate::options::IoOptions;
use crate::registry::{Binding, Registry};
use crate::tag::Tag;

/// Bind `f` as the read function for `(domain, tag)` and return it unchanged
pub fn register_domain_read_fn<T, V, F>(
    registry: &mut Registry<T, V>,
    domain: &str,
    tag: T,
    f: F,
) -> Result<F>
where
    T: Tag,
    F: Fn(&Path, &IoOptions) -> anyhow::Result<V> + Clone + Send + Sync + 'static,
{
    registry.register(domain, tag, Binding::Read(Arc::new(f.clone())))?;
    Ok(f)
}

/// Bind `f` as the write function for `(domain, tag)` and return it unchanged
pub fn register_domain_write_fn<T, V, F>(
    registry: &mut Registry<T, V>,
    domain: &str,
    tag: T,
    f: F,
) -> Result<F>
where
    T: Tag,
    F: Fn(V, &Path, &IoOptions) -> anyhow::Result<()> + Clone + Send + Sync + 'static,
{
    registry.register(domain, tag, Binding::Write(Arc::new(f.clone())))?;
    Ok(f)
}
