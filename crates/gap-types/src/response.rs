//! JSON payloads returned by data-returning calls.
//!
//! Send-family calls and `invoice` answer with an object carrying an `id`.
//! `payVerify` and `payInquiry` answer with an object carrying a `status`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::fmt::Display;

/// Identifier the platform assigned to a sent message or invoice.
///
/// The platform may render it as a JSON number or a string; both are kept as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageId {
    Number(i64),
    Text(String),
}

impl Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageId::Number(n) => write!(f, "{n}"),
            MessageId::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for MessageId {
    fn from(value: i64) -> Self {
        MessageId::Number(value)
    }
}

impl From<i32> for MessageId {
    fn from(value: i32) -> Self {
        MessageId::Number(value.into())
    }
}

impl From<String> for MessageId {
    fn from(value: String) -> Self {
        MessageId::Text(value)
    }
}

impl From<&str> for MessageId {
    fn from(value: &str) -> Self {
        MessageId::Text(value.to_string())
    }
}

/// Response body of the `id`-returning calls.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct IdResponse {
    #[serde(default)]
    pub id: Option<MessageId>,
}

/// Response body of `payVerify` / `payInquiry`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentStatus {
    pub status: String,
    /// Remaining fields, e.g. the amount or the payer, passed through untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl PaymentStatus {
    pub const VERIFIED: &'static str = "verified";

    pub fn is_verified(&self) -> bool {
        self.status == Self::VERIFIED
    }
}
