#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for the Gap messenger bot API.
//!
//! This crate provides the value types shared by every Gap API call. It does no I/O;
//! the HTTP client lives in the `gap-rs` crate.
//!
//! # Overview
//!
//! Every Gap bot call is a form-encoded `POST` to `https://api.gap.im/<method>`.
//! The form fields are collected in [`MessageParams`], tagged with a [`MessageType`]
//! for message sends, and optionally carry a [`ReplyKeyboard`], an [`InlineKeyboard`]
//! or a form descriptor serialized to JSON.
//!
//! # Modules
//!
//! - [`config`] - Config values that resolve `$VAR` environment references
//! - [`error`] - Validation errors raised before a request is sent
//! - [`keyboard`] - Reply and inline keyboard builders
//! - [`media`] - Media kinds and caller-chosen media input
//! - [`method`] - API method names, message type tags and chat actions
//! - [`params`] - Form parameter mapping sent with each request
//! - [`response`] - JSON payloads returned by data-returning calls

pub mod config;
pub mod error;
pub mod keyboard;
pub mod media;
pub mod method;
pub mod params;
pub mod response;

pub use error::ValidationError;
pub use keyboard::{InlineButton, InlineKeyboard, ReplyKeyboard, SendOptions};
pub use media::{MediaInput, MediaKind};
pub use method::{DEFAULT_ACTIONS, MessageType, Method};
pub use params::MessageParams;
pub use response::{MessageId, PaymentStatus};
