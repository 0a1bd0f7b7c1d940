//! I/O adapters
//!
//! Business logic depends on [`IoAdapter`] and is handed either a
//! [`RealAdapter`], which dispatches to the registered functions, or a
//! [`FakeAdapter`], which keeps everything in memory. Both are built from
//! the same [`Registry`](crate::Registry), so they expose the same tags and
//! fail the same way when a binding is missing.
//!
//! ```
//! use std::path::Path;
//! use io_adapters::{Container, Format, IoAdapter, IoOptions};
//! use serde_json::{json, Value};
//!
//! fn double_total(io: &mut dyn IoAdapter, path: &Path) -> io_adapters::Result<()> {
//!     let order = io.read(path, &Format::Json)?;
//!     let total = order["total"].as_i64().unwrap_or_default();
//!     io.write(json!({ "total": total * 2 }), Path::new("out.json"), &Format::Json)
//! }
//!
//! let mut container: Container = Container::new();
//! container.add_domain("orders")?;
//! container.register_domain_read_fn("orders", Format::Json, |_: &Path, _: &IoOptions| Ok(Value::Null))?;
//! container.register_domain_write_fn("orders", Format::Json, |_: Value, _: &Path, _: &IoOptions| Ok(()))?;
//!
//! let mut fake = container.get_fake_adapter_with_files(
//!     "orders",
//!     [("in.json", json!({ "total": 21 }))],
//! )?;
//! double_total(&mut fake, Path::new("in.json"))?;
//! assert_eq!(fake.files()["out.json"], json!({ "total": 42 }));
//! # Ok::<(), io_adapters::AdapterError>(())
//! ```

pub(crate) mod fake;
mod real;

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use fake::FakeAdapter;
pub use real::RealAdapter;

use crate::domain::DomainName;
use crate::error::Result;
use crate::options::IoOptions;
use crate::tag::{Format, Tag};

/// Read/write surface shared by real and fake adapters
pub trait IoAdapter<T: Tag = Format, V = Value> {
    /// Domain this adapter is bound to
    fn domain(&self) -> &DomainName;

    /// Read the value at `path` in format `tag`
    fn read_with(&self, path: &Path, tag: &T, options: &IoOptions) -> Result<V>;

    /// Write `data` to `path` in format `tag`
    fn write_with(&mut self, data: V, path: &Path, tag: &T, options: &IoOptions) -> Result<()>;

    /// Tags with a read binding in this adapter's domain
    fn read_tags(&self) -> Result<Vec<T>>;

    /// Tags with a write binding in this adapter's domain
    fn write_tags(&self) -> Result<Vec<T>>;

    fn read(&self, path: &Path, tag: &T) -> Result<V> {
        self.read_with(path, tag, &IoOptions::default())
    }

    fn write(&mut self, data: V, path: &Path, tag: &T) -> Result<()> {
        self.write_with(data, path, tag, &IoOptions::default())
    }
}

/// Which adapter variant a container hands out by default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdapterMode {
    #[default]
    Real,
    Fake,
}
