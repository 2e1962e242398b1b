use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use conclave_core::{Error, UserFriendlyError};
use serde::{Deserialize, Serialize};
use tracing::{error, warn};

/// OpenAI-style error envelope
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

/// Error details
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub message: String,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Failure of a whole request (never a per-agent failure)
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>, kind: &str) -> Self {
        Self {
            status,
            body: ErrorBody {
                error: ErrorDetail {
                    message: message.into(),
                    kind: kind.to_string(),
                },
            },
        }
    }

    /// 400 `invalid_request_error`
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message, "invalid_request_error")
    }

    /// 500 `server_error`
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message, "server_error")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        match err {
            Error::MalformedRequest(_) => {
                warn!(error = %err, "Rejected chat request");
                Self::invalid_request(err.user_message())
            }
            Error::DuplicateAgent(_) | Error::Configuration(_) | Error::Internal(_) => {
                error!(error = %err, "Chat request failed");
                Self::internal(err.user_message())
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "Rejected chat request body");
        Self::invalid_request(rejection.body_text())
    }
}
