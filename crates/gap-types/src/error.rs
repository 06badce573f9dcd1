//! Validation errors.
//!
//! These are raised while assembling a request, before anything is sent.

use crate::media::MediaKind;

/// A caller-supplied argument was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// The chat action is not in the client's allow-list.
    #[error("Invalid Action! Accepted value: {}", .accepted.join(","))]
    InvalidAction { accepted: Vec<String> },
    /// A local media path does not point to a readable file.
    #[error("{} path is invalid", .kind.title())]
    InvalidMediaPath { kind: MediaKind },
    /// An inline keyboard was not a list of button rows.
    #[error("Inline keyboard is invalid: expected a list of button rows")]
    InlineKeyboardNotRows,
    /// A reply keyboard was not a JSON object.
    #[error("Reply keyboard must be a mapping")]
    ReplyKeyboardNotMapping,
}
