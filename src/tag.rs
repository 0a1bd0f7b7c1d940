//! Tags and binding directions

use std::fmt;
use std::hash::Hash;
use std::str::FromStr;

use crate::error::AdapterError;

/// Identifier selecting a format or variant of read/write within a domain.
///
/// Implemented for any ordered, displayable value, so a domain can use its
/// own closed enum of tags, plain strings, or the provided [`Format`].
pub trait Tag: Clone + Ord + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static {}

impl<T> Tag for T where T: Clone + Ord + Hash + fmt::Debug + fmt::Display + Send + Sync + 'static {}

/// Direction of a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    Read,
    Write,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Read => f.write_str("read"),
            Direction::Write => f.write_str("write"),
        }
    }
}

/// Standardised name of a non-builtin format.
///
/// Only built through [`Format::custom`] or `str::parse::<Format>`, so two
/// spellings of one name always compare equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CustomFormat(String);

impl CustomFormat {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Standard file formats
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Format {
    Json,
    Toml,
    Text,
    /// Any other format, by standardised name
    Custom(CustomFormat),
}

impl Format {
    /// Build a custom format, standardising and validating the name
    pub fn custom(name: &str) -> Result<Self, AdapterError> {
        name.parse()
    }

    pub fn name(&self) -> &str {
        match self {
            Format::Json => "json",
            Format::Toml => "toml",
            Format::Text => "text",
            Format::Custom(custom) => custom.as_str(),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = AdapterError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let key = raw.trim().to_lowercase();
        match key.as_str() {
            "" => Err(AdapterError::InvalidTag(raw.to_string())),
            "json" => Ok(Format::Json),
            "toml" => Ok(Format::Toml),
            "text" | "txt" | "str" => Ok(Format::Text),
            _ if key.chars().any(char::is_whitespace) => {
                Err(AdapterError::InvalidTag(raw.to_string()))
            }
            _ => Ok(Format::Custom(CustomFormat(key))),
        }
    }
}
