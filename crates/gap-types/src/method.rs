//! API method names and message type tags.
//!
//! A [`Method`] is the path segment appended to the API base URL. A [`MessageType`]
//! is the `type` form field attached to `sendMessage` calls.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Display;
use std::str::FromStr;

/// Chat actions accepted by `sendAction` unless the client is configured otherwise.
pub const DEFAULT_ACTIONS: &[&str] = &["typing"];

/// A Gap bot API endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    SendAction,
    SendMessage,
    EditMessage,
    DeleteMessage,
    AnswerCallback,
    Invoice,
    PayVerify,
    PayInquiry,
    RequestWalletCharge,
    Upload,
}

impl Method {
    /// Path segment of this method, relative to the API base URL.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::SendAction => "sendAction",
            Method::SendMessage => "sendMessage",
            Method::EditMessage => "editMessage",
            Method::DeleteMessage => "deleteMessage",
            Method::AnswerCallback => "answerCallback",
            Method::Invoice => "invoice",
            Method::PayVerify => "payVerify",
            Method::PayInquiry => "payInquiry",
            Method::RequestWalletCharge => "requestWalletCharge",
            Method::Upload => "upload",
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifies the payload of a `sendMessage` call.
///
/// Serialized lowercase, e.g. `"text"` or `"image"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageType {
    Text,
    Image,
    Audio,
    Video,
    File,
    Voice,
    Location,
    Contact,
}

impl MessageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MessageType::Text => "text",
            MessageType::Image => "image",
            MessageType::Audio => "audio",
            MessageType::Video => "video",
            MessageType::File => "file",
            MessageType::Voice => "voice",
            MessageType::Location => "location",
            MessageType::Contact => "contact",
        }
    }
}

impl Display for MessageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MessageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let message_type = match s {
            "text" => MessageType::Text,
            "image" => MessageType::Image,
            "audio" => MessageType::Audio,
            "video" => MessageType::Video,
            "file" => MessageType::File,
            "voice" => MessageType::Voice,
            "location" => MessageType::Location,
            "contact" => MessageType::Contact,
            _ => return Err(format!("unknown message type '{s}'")),
        };
        Ok(message_type)
    }
}
