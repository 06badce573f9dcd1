//! Errors returned by [`GapClient`](crate::GapClient).

use http::StatusCode;
use std::path::PathBuf;

use gap_types::ValidationError;

use crate::config::ConfigError;

/// Message used for a failed call whose response carried no body.
pub const GENERIC_ERROR_MESSAGE: &str = "An error was encountered.";

/// Errors that can occur while calling the Gap API.
#[derive(Debug, thiserror::Error)]
pub enum GapClientError {
    /// The client was built without a bot token.
    #[error("Required \"token\" key not supplied")]
    MissingToken,
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("URL parse error: {context}: {source}")]
    UrlParse {
        context: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("HTTP error: {context}: {source}")]
    Http {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },
    /// The platform answered with a non-200 status.
    #[error("Unexpected HTTP status {status}: {context}: {body}")]
    HttpStatus {
        context: &'static str,
        status: StatusCode,
        body: String,
    },
    #[error("Failed to read response body as text: {context}: {source}")]
    ResponseBodyRead {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("Failed to deserialize JSON: {context}: {source}")]
    JsonDeserialization {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to serialize JSON: {context}: {source}")]
    Serialization {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("Response is missing field '{field}': {context}")]
    MissingField {
        context: &'static str,
        field: &'static str,
    },
    #[error("Failed to read file {}: {source}", .path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GapClientError {
    /// Response body of a failed call, if the failure came from the platform.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            GapClientError::HttpStatus { body, .. } => Some(body),
            _ => None,
        }
    }

    pub(crate) fn http_status(context: &'static str, status: StatusCode, body: String) -> Self {
        let body = if body.trim().is_empty() {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            body
        };
        GapClientError::HttpStatus {
            context,
            status,
            body,
        }
    }
}
