//! Per-call options forwarded to read/write functions

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Keyword options for a single read or write call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IoOptions(BTreeMap<String, Value>);

impl IoOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option, replacing any previous value under `key`
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_bool(&self, key: &str) -> Option<bool> {
        self.get(key).and_then(Value::as_bool)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(Value::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for IoOptions {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_getters() {
        let options = IoOptions::new().with("pretty", true).with("encoding", "utf-8");
        assert_eq!(options.get_bool("pretty"), Some(true));
        assert_eq!(options.get_str("encoding"), Some("utf-8"));
        assert_eq!(options.get_bool("encoding"), None);
        assert!(options.get("missing").is_none());
    }

    #[test]
    fn test_collects_from_pairs() {
        let options: IoOptions = [("indent", 2)].into_iter().collect();
        assert_eq!(options.get("indent"), Some(&Value::from(2)));
        assert!(IoOptions::new().is_empty());
    }
}
