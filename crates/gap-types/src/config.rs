//! Configuration values that may live in the environment.
//!
//! Bot tokens should not be written into config files. [`LiteralOrEnv`] lets a
//! config value be either a literal or a reference to an environment variable:
//!
//! ```json
//! {
//!   "base_url": "https://api.gap.im/",   // Literal value
//!   "token": "$GAP_TOKEN"                // Simple env var
//! }
//! ```
//!
//! Braced references (`"${GAP_TOKEN}"`) are accepted as well. The reference is
//! resolved once, during deserialization.

use serde::{Deserialize, Serialize};
use std::ops::Deref;
use std::str::FromStr;

/// A config value given literally or as `$VAR` / `${VAR}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralOrEnv<T>(T);

impl<T> LiteralOrEnv<T> {
    pub fn from_literal(value: T) -> Self {
        Self(value)
    }

    pub fn inner(&self) -> &T {
        &self.0
    }

    pub fn into_inner(self) -> T {
        self.0
    }

    /// Returns the variable name if `s` uses `$VAR` or `${VAR}` syntax.
    fn env_var_name(s: &str) -> Option<&str> {
        if let Some(braced) = s.strip_prefix("${").and_then(|rest| rest.strip_suffix('}')) {
            Some(braced)
        } else {
            let name = s.strip_prefix('$')?;
            let valid = !name.is_empty() && name.chars().all(|c| c.is_alphanumeric() || c == '_');
            valid.then_some(name)
        }
    }
}

impl<T> Deref for LiteralOrEnv<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<'de, T> Deserialize<'de> for LiteralOrEnv<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;

        let var_name = Self::env_var_name(&s).map(str::to_owned);
        let value = match var_name {
            Some(var_name) => std::env::var(&var_name).map_err(|_| {
                serde::de::Error::custom(format!(
                    "Environment variable '{var_name}' not found (referenced as '{s}')"
                ))
            })?,
            None => s,
        };

        let parsed = value
            .parse::<T>()
            .map_err(|e| serde::de::Error::custom(format!("Failed to parse value: {e}")))?;

        Ok(LiteralOrEnv(parsed))
    }
}

impl<T> Serialize for LiteralOrEnv<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.0.serialize(serializer)
    }
}
