//! Domain-scoped I/O adapters
//!
//! Application code depends on the [`IoAdapter`] trait instead of concrete
//! I/O. The same registrations that produce the production adapter also
//! produce an in-memory fake for tests.
//!
//! ## Features
//!
//! - **Domain isolation**: read/write functions are bound per domain, so a
//!   domain only sees the capabilities registered to it
//! - **Single source of truth**: [`RealAdapter`] and [`FakeAdapter`] are both
//!   built from one [`Registry`] and fail identically on missing bindings
//! - **Deterministic tests**: each fake owns a private `path -> value` store
//!   that doubles as the asserted end state
//! - **Configurable**: domains, duplicate policy and the default adapter
//!   variant can come from `io-adapters.toml` or `IO_ADAPTERS__*` variables
//!
//! ## Example
//!
//! ```
//! use std::path::Path;
//! use io_adapters::{Container, Format, IoAdapter, formats};
//! use serde_json::json;
//!
//! let mut container: Container = Container::new();
//! container.add_domain("orders")?;
//! formats::register_standard_formats(&mut container, "orders")?;
//!
//! let mut fake = container.get_fake_adapter("orders")?;
//! fake.write(json!({"a": 1}), Path::new("f.json"), &Format::Json)?;
//! assert_eq!(fake.read(Path::new("f.json"), &Format::Json)?, json!({"a": 1}));
//! # Ok::<(), io_adapters::AdapterError>(())
//! ```

pub mod adapter;
pub mod config;
pub mod container;
pub mod domain;
pub mod error;
pub mod formats;
pub mod logging;
pub mod options;
pub mod registration;
pub mod registry;
pub mod tag;

pub use adapter::{AdapterMode, FakeAdapter, IoAdapter, RealAdapter};
pub use config::IoConfig;
pub use container::Container;
pub use domain::DomainName;
pub use error::{AdapterError, Result};
pub use options::IoOptions;
pub use registration::{register_domain_read_fn, register_domain_write_fn};
pub use registry::{Binding, DuplicatePolicy, ReadFn, Registry, WriteFn};
pub use tag::{CustomFormat, Direction, Format, Tag};
