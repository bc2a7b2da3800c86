use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        source: reqwest::Error,
    },
    #[error("{endpoint} returned {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Status {
        endpoint: String,
        status: StatusCode,
        message: Option<String>,
    },
    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        source: serde_json::Error,
    },
    #[error("invalid api url '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("i/o error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{0}")]
    Validation(String),
}

impl ClientError {
    /// Message taken from the backend's error body, when it sent one.
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ClientError::Status { message, .. } => message.as_deref(),
            _ => None,
        }
    }

    /// The single line a screen shows for this failure. Backend and
    /// client-side validation messages win; everything else collapses to the
    /// screen's fixed fallback.
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Validation(message) => message.clone(),
            _ => self.backend_message().unwrap_or(fallback).to_string(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport { source, .. } => source.status(),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self.status(),
            Some(StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN)
        )
    }
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;
