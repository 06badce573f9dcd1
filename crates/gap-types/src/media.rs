//! Media kinds and media input.
//!
//! A media send either references media the platform already stores, or names a
//! local file that has to be uploaded first. The caller picks which one with
//! [`MediaInput`]. Local paths are checked by the client, not here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Display;
use std::path::{Path, PathBuf};

use crate::method::MessageType;

/// The media message types that accept an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Audio,
    Video,
    File,
    Voice,
}

impl MediaKind {
    /// Lowercase tag, also used as the multipart field name on upload.
    pub fn as_str(&self) -> &'static str {
        self.message_type().as_str()
    }

    /// Capitalized name for user-facing messages.
    pub fn title(&self) -> &'static str {
        match self {
            MediaKind::Image => "Image",
            MediaKind::Audio => "Audio",
            MediaKind::Video => "Video",
            MediaKind::File => "File",
            MediaKind::Voice => "Voice",
        }
    }

    pub fn message_type(&self) -> MessageType {
        match self {
            MediaKind::Image => MessageType::Image,
            MediaKind::Audio => MessageType::Audio,
            MediaKind::Video => MessageType::Video,
            MediaKind::File => MessageType::File,
            MediaKind::Voice => MessageType::Voice,
        }
    }
}

impl Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Media argument of the `send_image` family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaInput {
    /// A media descriptor returned by an earlier upload, sent as-is in `data`.
    Reference(String),
    /// A file on the local filesystem, uploaded before the message is sent.
    LocalPath(PathBuf),
}

impl MediaInput {
    pub fn reference(reference: impl Into<String>) -> Self {
        MediaInput::Reference(reference.into())
    }

    pub fn path(path: impl Into<PathBuf>) -> Self {
        MediaInput::LocalPath(path.into())
    }
}

impl From<PathBuf> for MediaInput {
    fn from(path: PathBuf) -> Self {
        MediaInput::LocalPath(path)
    }
}

impl From<&Path> for MediaInput {
    fn from(path: &Path) -> Self {
        MediaInput::LocalPath(path.to_path_buf())
    }
}
