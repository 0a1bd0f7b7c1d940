//! Error types for the adapter registry

use std::path::PathBuf;

use thiserror::Error;

use crate::tag::Direction;

/// Result type for adapter operations
pub type Result<T> = std::result::Result<T, AdapterError>;

/// Adapter registry errors
#[derive(Error, Debug)]
pub enum AdapterError {
    #[error("Domain not found: {domain}")]
    DomainNotFound { domain: String },

    #[error("Domain already exists: {domain} already has bindings")]
    DomainAlreadyExists { domain: String },

    #[error("`{direction}` is not registered for tag {tag} in domain {domain}")]
    TagNotRegistered {
        domain: String,
        tag: String,
        direction: Direction,
    },

    #[error("`{direction}` is already registered for tag {tag} in domain {domain}")]
    AlreadyRegistered {
        domain: String,
        tag: String,
        direction: Direction,
    },

    #[error("Path not found: {}", path.display())]
    PathNotFound { path: PathBuf },

    #[error("Invalid domain name: {0:?}")]
    InvalidDomain(String),

    #[error("Invalid tag: {0:?}")]
    InvalidTag(String),

    #[error("Config error: {0}")]
    Config(#[from] config_crate::ConfigError),

    /// Failure raised by a registered read/write function, passed through untouched
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl AdapterError {
    /// Whether this error means a binding was missing rather than an I/O failure
    pub fn is_missing_binding(&self) -> bool {
        matches!(
            self,
            AdapterError::DomainNotFound { .. } | AdapterError::TagNotRegistered { .. }
        )
    }
}
