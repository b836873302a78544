//! HTTP mapping for the session error taxonomy.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::service::SessionError;

/// Wire-facing error: a status code plus a JSON `{error}` body.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        let status = match &err {
            SessionError::NotFound => StatusCode::NOT_FOUND,
            SessionError::AlreadyFinished => StatusCode::CONFLICT,
            SessionError::Busy => StatusCode::SERVICE_UNAVAILABLE,
            SessionError::InvalidName => StatusCode::BAD_REQUEST,
            SessionError::Store(_) | SessionError::Codec(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status.is_server_error() {
            log::error!("session API failure: {err}");
        }
        let message = match &err {
            // Clients match on this exact wording.
            SessionError::NotFound => String::from("Player not found"),
            other => other.to_string(),
        };
        Self { status, message }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use holdout_game::StoreError;
    use std::io;

    #[test]
    fn taxonomy_maps_to_the_documented_statuses() {
        let cases = [
            (SessionError::NotFound, StatusCode::NOT_FOUND),
            (SessionError::AlreadyFinished, StatusCode::CONFLICT),
            (SessionError::Busy, StatusCode::SERVICE_UNAVAILABLE),
            (SessionError::InvalidName, StatusCode::BAD_REQUEST),
            (
                SessionError::Store(StoreError::Io(io::Error::other("down"))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }

    #[test]
    fn unknown_player_keeps_the_legacy_wording() {
        let err = ApiError::from(SessionError::NotFound);
        assert_eq!(err.message(), "Player not found");
    }
}
