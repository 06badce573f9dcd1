#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Rust client for the [Gap messenger](https://gap.im) bot API.
//!
//! The crate wraps every bot API call in one async method on [`GapClient`]. Each
//! call assembles form parameters, posts them to `https://api.gap.im/<method>`
//! with the bot token in the `token` header, and normalizes the response.
//!
//! # Overview
//!
//! - **Messages**: [`GapClient::send_text`], [`GapClient::send_location`],
//!   [`GapClient::send_contact`], and the media family
//!   ([`GapClient::send_image`], `send_audio`, `send_video`, `send_file`, `send_voice`)
//! - **Lifecycle**: [`GapClient::edit_message`], [`GapClient::delete_message`],
//!   [`GapClient::answer_callback`], [`GapClient::send_action`]
//! - **Payments**: [`GapClient::send_invoice`], [`GapClient::pay_verify`],
//!   [`GapClient::pay_inquiry`], [`GapClient::request_wallet_charge`]
//! - **Keyboards**: [`GapClient::reply_keyboard`], [`ReplyKeyboard`], [`InlineKeyboard`]
//!
//! # Modules
//!
//! - [`client`]: The [`GapClient`] and its request dispatch.
//! - [`config`]: [`GapConfig`], loaded from JSON or from `GAP_*` environment variables.
//! - [`error`]: [`GapClientError`], the error type of every operation.
//! - [`upload`]: Multipart upload of local media files.
//! - [`util`]: Logging setup (`telemetry` feature).
//!
//! Wire-level types (keyboards, media input, message parameters) live in the
//! `gap-types` crate and are re-exported here.
//!
//! # Example
//!
//! ```rust,no_run
//! use gap_rs::{GapClient, InlineButton, InlineKeyboard, SendOptions};
//!
//! # async fn run() -> Result<(), gap_rs::GapClientError> {
//! let client = GapClient::from_env()?;
//! let keyboard = InlineKeyboard::new().row([InlineButton::callback("Pay", "pay:1")]);
//! let options = SendOptions::new().with_inline_keyboard(keyboard);
//! client.send_text(1234, "Ready to pay?", &options).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables `tracing` instrumentation and [`util::Telemetry`]

pub mod client;
pub mod config;
pub mod error;
pub mod upload;
pub mod util;

pub use client::GapClient;
pub use config::GapConfig;
pub use error::GapClientError;
pub use upload::UploadedMedia;

pub use gap_types;
pub use gap_types::{
    InlineButton, InlineKeyboard, MediaInput, MediaKind, MessageId, MessageParams, MessageType,
    Method, PaymentStatus, ReplyKeyboard, SendOptions, ValidationError,
};
