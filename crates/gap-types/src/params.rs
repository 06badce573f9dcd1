//! Form parameters of a single API call.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Field name to value mapping, form-encoded as the request body.
///
/// Values are stored already rendered as strings; structured values (keyboards,
/// forms, location payloads) are JSON-encoded before insertion.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageParams(BTreeMap<String, String>);

impl MessageParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to `value`, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl ToString) {
        self.0.insert(key.into(), value.to_string());
    }

    /// Builder form of [`MessageParams::insert`].
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets `key` only when `value` is present.
    pub fn with_opt(mut self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        if let Some(value) = value {
            self.insert(key, value);
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for MessageParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = MessageParams::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_opt_skips_absent_values() {
        let params = MessageParams::new()
            .with("chat_id", 12)
            .with_opt("desc", None::<&str>)
            .with_opt("data", Some("hi"));
        assert_eq!(params.get("chat_id"), Some("12"));
        assert_eq!(params.get("data"), Some("hi"));
        assert!(!params.contains_key("desc"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn test_serializes_as_flat_mapping() {
        let params: MessageParams = [("chat_id", "1"), ("type", "text")].into_iter().collect();
        let json = serde_json::to_value(&params).unwrap();
        assert_eq!(json, serde_json::json!({"chat_id": "1", "type": "text"}));
    }
}
