//! Error types shared by the schedule client, the chat store and the command handlers

use reqwest::StatusCode;
use thiserror::Error;

/// A `Pair.time` token that is not in `H.mm` form
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid time token '{token}', expected H.mm")]
pub struct TimeFormatError {
    pub token: String,
}

impl TimeFormatError {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

/// Failures talking to the upstream timetable API
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("upstream returned status {0}")]
    Status(StatusCode),

    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("malformed upstream payload: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Decode(err.to_string())
    }
}

/// Failures of the chat-state store
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] tokio_rusqlite::Error),
}

/// Everything a command handler can fail with.
///
/// All variants are recovered in [`crate::bot::handle_command`] and turned
/// into a reply for the chat.
#[derive(Error, Debug)]
pub enum CommandError {
    /// Non-success status (`Some`) or a transport failure (`None`)
    #[error("timetable API unavailable (status: {status:?})")]
    UpstreamUnavailable { status: Option<StatusCode> },

    #[error("could not decode timetable API response: {0}")]
    Decode(String),

    #[error(transparent)]
    Format(#[from] TimeFormatError),

    #[error("no group configured for this chat")]
    NotConfigured,

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<ApiError> for CommandError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Status(status) => CommandError::UpstreamUnavailable {
                status: Some(status),
            },
            ApiError::Transport(e) => CommandError::UpstreamUnavailable { status: e.status() },
            ApiError::Decode(msg) => CommandError::Decode(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_status_maps_to_upstream_unavailable() {
        let err = CommandError::from(ApiError::Status(StatusCode::BAD_GATEWAY));
        assert!(matches!(
            err,
            CommandError::UpstreamUnavailable { status: Some(StatusCode::BAD_GATEWAY) }
        ));
    }

    #[test]
    fn test_decode_stays_distinct() {
        let err = CommandError::from(ApiError::Decode("missing field `data`".to_string()));
        assert!(matches!(err, CommandError::Decode(_)));
    }
}
