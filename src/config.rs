//! Configuration for adapter containers
//!
//! Supports loading configuration from:
//! - Default values
//! - Config file (io-adapters.toml)
//! - Environment variables (IO_ADAPTERS__*)
//!
//! ## Example config file (io-adapters.toml):
//! ```toml
//! [adapters]
//! mode = "fake"
//! duplicates = "reject"
//!
//! [domains]
//! names = ["orders", "payment", "reporting"]
//! ```
//!
//! `IO_ADAPTERS__ADAPTERS__MODE=fake` switches every container built with
//! [`Container::from_config`](crate::Container::from_config) to in-memory adapters.

use config_crate::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

use crate::adapter::AdapterMode;
use crate::registry::DuplicatePolicy;

/// Main configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IoConfig {
    /// Adapter behaviour
    #[serde(default)]
    pub adapters: AdaptersConfig,

    /// Domains declared up front
    #[serde(default)]
    pub domains: DomainsConfig,
}

/// Adapter configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AdaptersConfig {
    /// Variant handed out by `Container::get_adapter`
    #[serde(default)]
    pub mode: AdapterMode,

    /// What to do when a tag is bound twice in one domain
    #[serde(default)]
    pub duplicates: DuplicatePolicy,
}

/// Domain declarations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainsConfig {
    #[serde(default)]
    pub names: Vec<String>,
}

impl IoConfig {
    /// Load configuration from default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, adding a required file at `config_path`
    pub fn load_from(config_path: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();

        let config_locations = [
            "io-adapters.toml",
            ".io-adapters.toml",
            "config/io-adapters.toml",
        ];

        for location in config_locations {
            builder = builder.add_source(File::with_name(location).required(false));
        }

        // XDG config directory
        if let Some(dirs) = directories::ProjectDirs::from("dev", "familiar", "io-adapters") {
            let xdg_config = dirs.config_dir().join("io-adapters.toml");
            if xdg_config.exists() {
                builder = builder.add_source(File::from(xdg_config).required(false));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        builder = builder.add_source(
            Environment::with_prefix("IO_ADAPTERS")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("domains.names")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Save configuration to a file
    pub fn save(&self, path: &str) -> std::io::Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        std::fs::write(path, content)
    }
}
