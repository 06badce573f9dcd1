//! Media upload.
//!
//! Local files are posted as `multipart/form-data` to the `upload` method before
//! the media message itself is sent. The platform answers with a JSON object
//! describing the stored file; that object, re-serialized with the caption
//! attached, becomes the `data` of the following `sendMessage` call.

use reqwest::multipart::{Form, Part};
use serde_json::{Map, Value};
use std::path::Path;

use gap_types::{MediaKind, MessageType, Method, ValidationError};

use crate::client::{GapClient, record_result_on_span};
use crate::error::GapClientError;

#[cfg(feature = "telemetry")]
use tracing::{debug, instrument};

/// Content type used when the extension is unknown.
pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";

/// A file stored by the platform, ready to be sent as a media message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedMedia {
    /// Type tag for the `sendMessage` call.
    pub msg_type: MessageType,
    /// JSON descriptor sent as `data`.
    pub reference: String,
}

impl GapClient {
    /// Uploads the file at `path` as media of the given kind.
    ///
    /// The resolved type tag is taken from the response's `type` field when it
    /// names a known message type, otherwise from `kind`.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "gap.client.upload_file",
            skip_all,
            fields(
                kind = %kind,
                otel.status_code = tracing::field::Empty,
                error.message = tracing::field::Empty,
            )
        )
    )]
    pub async fn upload_file(
        &self,
        kind: MediaKind,
        path: &Path,
        desc: &str,
    ) -> Result<UploadedMedia, GapClientError> {
        let result = self.upload_file_inner(kind, path, desc).await;
        record_result_on_span(&result);
        result
    }

    async fn upload_file_inner(
        &self,
        kind: MediaKind,
        path: &Path,
        desc: &str,
    ) -> Result<UploadedMedia, GapClientError> {
        let context = Method::Upload.as_str();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| GapClientError::FileRead {
                path: path.to_path_buf(),
                source: e,
            })?;
        let content_type = content_type_for(path);
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| kind.as_str().to_string());

        #[cfg(feature = "telemetry")]
        debug!(content_type, size = bytes.len(), "Uploading media file");

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(content_type)
            .map_err(|e| GapClientError::Http { context, source: e })?;
        let form = Form::new()
            .part(kind.as_str(), part)
            .text("desc", desc.to_string());

        let request = self.post(Method::Upload)?.multipart(form);
        let body = self.execute(request, context).await?;
        uploaded_media_from_body(kind, &body, desc)
    }
}

/// Checks that `path` names an existing regular file.
pub(crate) async fn ensure_media_file(
    kind: MediaKind,
    path: &Path,
) -> Result<(), ValidationError> {
    match tokio::fs::metadata(path).await {
        Ok(metadata) if metadata.is_file() => Ok(()),
        _ => Err(ValidationError::InvalidMediaPath { kind }),
    }
}

fn uploaded_media_from_body(
    kind: MediaKind,
    body: &str,
    desc: &str,
) -> Result<UploadedMedia, GapClientError> {
    let context = Method::Upload.as_str();
    let mut stored: Map<String, Value> = serde_json::from_str(body)
        .map_err(|e| GapClientError::JsonDeserialization { context, source: e })?;
    let msg_type = stored
        .get("type")
        .and_then(Value::as_str)
        .and_then(|tag| tag.parse::<MessageType>().ok())
        .unwrap_or_else(|| kind.message_type());
    if !desc.is_empty() {
        stored.insert("desc".to_string(), Value::String(desc.to_string()));
    }
    let reference = serde_json::to_string(&stored)
        .map_err(|e| GapClientError::Serialization { context, source: e })?;
    Ok(UploadedMedia {
        msg_type,
        reference,
    })
}

/// Guesses the content type of a media file from its extension.
pub fn content_type_for(path: &Path) -> &'static str {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or(DEFAULT_CONTENT_TYPE)
}
