use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::typed_header::TypedHeaderRejection;
use serde_json::json;

use crate::migration::error::MigrationError;
use crate::youtube_rs::error::YoutubeApiError;

/// Errors returned by the JSON API. Rendered as `{"error": "<message>"}`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("Missing bearer token: {0}")]
    MissingCredential(#[from] TypedHeaderRejection),
    #[error("Google login is not configured")]
    OAuthNotConfigured,
    #[error(transparent)]
    Migration(#[from] MigrationError),
    #[error(transparent)]
    Youtube(#[from] YoutubeApiError),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::MissingCredential(_) => StatusCode::UNAUTHORIZED,
            Self::OAuthNotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            Self::Migration(error) => match error {
                MigrationError::Authorization(_) => StatusCode::UNAUTHORIZED,
                MigrationError::Upstream(_) => StatusCode::BAD_GATEWAY,
                MigrationError::EmptyPlaylistName | MigrationError::InvalidDestination => {
                    StatusCode::BAD_REQUEST
                }
                MigrationError::EmptySource { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            },
            Self::Youtube(error) if error.is_unauthorized() => StatusCode::UNAUTHORIZED,
            Self::Youtube(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

// Tell axum how to convert `ApiError` into a response.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = %status, "{message}");
        } else {
            tracing::warn!(status = %status, "{message}");
        }

        (status, Json(json!({ "error": message }))).into_response()
    }
}
