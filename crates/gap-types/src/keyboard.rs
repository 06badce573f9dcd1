//! Reply and inline keyboards.
//!
//! Both keyboard kinds travel as JSON strings inside the form body:
//!
//! - a [`ReplyKeyboard`] is a mapping wrapped as `{"keyboard", "once", "selective"}`,
//!   shown in the user's reply area;
//! - an [`InlineKeyboard`] is a list of button rows attached to one message.
//!
//! # Example
//!
//! ```rust
//! use gap_types::{InlineButton, InlineKeyboard, ReplyKeyboard};
//! use serde_json::json;
//!
//! let reply = ReplyKeyboard::try_new(json!({"yes": "Yes", "no": "No"})).unwrap();
//! assert!(reply.once);
//!
//! let inline = InlineKeyboard::new()
//!     .row([InlineButton::callback("Buy", "buy:1"), InlineButton::url("Site", "https://gap.im")]);
//! assert_eq!(inline.rows().len(), 1);
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ValidationError;
use crate::params::MessageParams;

/// A keyboard shown in the user's reply area.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplyKeyboard {
    pub keyboard: Map<String, Value>,
    /// Hide the keyboard after one use.
    pub once: bool,
    /// Show the keyboard only to mentioned users.
    pub selective: bool,
}

impl ReplyKeyboard {
    /// Wraps a keyboard mapping with `once = true` and `selective = false`.
    ///
    /// Fails when `keyboard` is not a JSON object.
    pub fn try_new(keyboard: Value) -> Result<Self, ValidationError> {
        match keyboard {
            Value::Object(keyboard) => Ok(Self {
                keyboard,
                once: true,
                selective: false,
            }),
            _ => Err(ValidationError::ReplyKeyboardNotMapping),
        }
    }

    pub fn with_once(mut self, once: bool) -> Self {
        self.once = once;
        self
    }

    pub fn with_selective(mut self, selective: bool) -> Self {
        self.selective = selective;
        self
    }

    /// Renders the `{"keyboard", "once", "selective"}` JSON string sent on the wire.
    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// One button of an inline keyboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineButton {
    pub text: String,
    /// Payload echoed back in the callback when the button is pressed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cb_data: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl InlineButton {
    pub fn callback(text: impl Into<String>, cb_data: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            cb_data: Some(cb_data.into()),
            url: None,
        }
    }

    pub fn url(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            cb_data: None,
            url: Some(url.into()),
        }
    }
}

/// Button rows attached to a single message.
///
/// Buttons are kept as raw JSON so that button shapes other than [`InlineButton`]
/// pass through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InlineKeyboard(Vec<Vec<Value>>);

impl InlineKeyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a row of typed buttons.
    pub fn row(mut self, buttons: impl IntoIterator<Item = InlineButton>) -> Self {
        let row = buttons
            .into_iter()
            .map(|button| {
                let mut object = Map::new();
                object.insert("text".into(), Value::String(button.text));
                if let Some(cb_data) = button.cb_data {
                    object.insert("cb_data".into(), Value::String(cb_data));
                }
                if let Some(url) = button.url {
                    object.insert("url".into(), Value::String(url));
                }
                Value::Object(object)
            })
            .collect();
        self.0.push(row);
        self
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.0
    }

    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string(&self.0)
    }
}

impl TryFrom<Value> for InlineKeyboard {
    type Error = ValidationError;

    /// Accepts only a list whose every element is itself a list.
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let Value::Array(rows) = value else {
            return Err(ValidationError::InlineKeyboardNotRows);
        };
        rows.into_iter()
            .map(|row| match row {
                Value::Array(buttons) => Ok(buttons),
                _ => Err(ValidationError::InlineKeyboardNotRows),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(InlineKeyboard)
    }
}

impl From<InlineKeyboard> for Value {
    fn from(keyboard: InlineKeyboard) -> Self {
        Value::Array(keyboard.0.into_iter().map(Value::Array).collect())
    }
}

/// Optional attachments of the `send_*` family.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SendOptions {
    pub reply_keyboard: Option<ReplyKeyboard>,
    pub inline_keyboard: Option<InlineKeyboard>,
    /// A form descriptor, sent JSON-encoded under `form`.
    pub form: Option<Value>,
}

impl SendOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reply_keyboard(mut self, keyboard: ReplyKeyboard) -> Self {
        self.reply_keyboard = Some(keyboard);
        self
    }

    pub fn with_inline_keyboard(mut self, keyboard: InlineKeyboard) -> Self {
        self.inline_keyboard = Some(keyboard);
        self
    }

    pub fn with_form(mut self, form: Value) -> Self {
        self.form = Some(form);
        self
    }

    /// JSON-encodes each present attachment into `params`.
    pub fn apply(&self, mut params: MessageParams) -> serde_json::Result<MessageParams> {
        if let Some(reply_keyboard) = &self.reply_keyboard {
            params.insert("reply_keyboard", reply_keyboard.to_json_string()?);
        }
        if let Some(inline_keyboard) = &self.inline_keyboard {
            params.insert("inline_keyboard", inline_keyboard.to_json_string()?);
        }
        if let Some(form) = &self.form {
            params.insert("form", serde_json::to_string(form)?);
        }
        Ok(params)
    }
}
