//! Standard filesystem read/write functions
//!
//! Plain functions with the shape the registry expects, operating on
//! [`serde_json::Value`]. Bind them with [`register_standard_formats`] or
//! individually through the registration API.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use serde_json::Value;

use crate::container::Container;
use crate::error::Result;
use crate::options::IoOptions;
use crate::tag::Format;

pub fn read_json(path: &Path, _options: &IoOptions) -> anyhow::Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("invalid JSON in {}", path.display()))
}

/// Write JSON; `pretty = true` indents the output
pub fn write_json(data: Value, path: &Path, options: &IoOptions) -> anyhow::Result<()> {
    let content = if options.get_bool("pretty").unwrap_or(false) {
        serde_json::to_string_pretty(&data)?
    } else {
        serde_json::to_string(&data)?
    };
    write_file(path, &content)
}

pub fn read_toml(path: &Path, _options: &IoOptions) -> anyhow::Result<Value> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    toml::from_str(&content).with_context(|| format!("invalid TOML in {}", path.display()))
}

/// Write TOML; the value must be a table. `pretty = true` expands arrays
pub fn write_toml(data: Value, path: &Path, options: &IoOptions) -> anyhow::Result<()> {
    if !data.is_object() {
        bail!("TOML document for {} must be a table", path.display());
    }
    let content = if options.get_bool("pretty").unwrap_or(false) {
        toml::to_string_pretty(&data)?
    } else {
        toml::to_string(&data)?
    };
    write_file(path, &content)
}

pub fn read_text(path: &Path, _options: &IoOptions) -> anyhow::Result<Value> {
    fs::read_to_string(path)
        .map(Value::String)
        .with_context(|| format!("failed to read {}", path.display()))
}

/// Write text; the value must be a string
pub fn write_text(data: Value, path: &Path, _options: &IoOptions) -> anyhow::Result<()> {
    match data {
        Value::String(text) => write_file(path, &text),
        other => bail!("text for {} must be a string, got {}", path.display(), other),
    }
}

/// Bind the JSON, TOML and text pairs under their [`Format`] tags
pub fn register_standard_formats(container: &mut Container, domain: &str) -> Result<()> {
    container.register_domain_read_fn(domain, Format::Json, read_json)?;
    container.register_domain_write_fn(domain, Format::Json, write_json)?;
    container.register_domain_read_fn(domain, Format::Toml, read_toml)?;
    container.register_domain_write_fn(domain, Format::Toml, write_toml)?;
    container.register_domain_read_fn(domain, Format::Text, read_text)?;
    container.register_domain_write_fn(domain, Format::Text, write_text)?;
    Ok(())
}

fn write_file(path: &Path, content: &str) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}
