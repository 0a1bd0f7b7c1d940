//! Domain names
//!
//! A domain scopes a set of tag bindings (e.g. `orders`, `reporting`).
//! Names are standardised before use so that `" Orders "` and `"orders"`
//! refer to the same domain.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{AdapterError, Result};

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // Lower-case letters of any script, digits, then `_`, `.` or `-`
    PATTERN.get_or_init(|| {
        Regex::new(r"^[\p{Ll}\p{Lm}\p{Lo}\p{N}][\p{Ll}\p{Lm}\p{Lo}\p{N}_.-]*$")
            .expect("domain name pattern is valid")
    })
}

/// Standardised name of a domain
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DomainName(String);

impl DomainName {
    /// Standardise and validate a raw domain name
    pub fn parse(raw: &str) -> Result<Self> {
        let name = Self::standardised(raw);
        if !name_pattern().is_match(&name.0) {
            return Err(AdapterError::InvalidDomain(raw.to_string()));
        }
        Ok(name)
    }

    /// Standardise without validating; used for lookups
    pub(crate) fn standardised(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for DomainName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DomainName {
    type Error = AdapterError;

    fn try_from(raw: String) -> Result<Self> {
        Self::parse(&raw)
    }
}

impl From<DomainName> for String {
    fn from(name: DomainName) -> Self {
        name.0
    }
}
