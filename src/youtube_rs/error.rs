use reqwest::{Response, StatusCode};

use crate::youtube_rs::types::GoogleErrorEnvelope;

/// Error reasons Google reports on a 403 when the token itself is the problem.
const CREDENTIAL_REASONS: [&str; 2] = ["authError", "insufficientPermissions"];

#[derive(Debug, thiserror::Error)]
pub enum YoutubeApiError {
    #[error("YouTube rejected the access token ({status}): {}", message.as_deref().unwrap_or("unauthorized"))]
    Unauthorized { status: u16, message: Option<String> },
    #[error("YouTube rejected the request ({status}): {}", message.as_deref().unwrap_or("no reason given"))]
    Rejected {
        status: u16,
        message: Option<String>,
        reason: Option<String>,
    },
    #[error("Failed to send http request: {0}")]
    FailedToSendRequest(#[source] reqwest::Error),
    #[error("Failed to parse response: {0}")]
    FailedToParseResponse(#[source] reqwest::Error),
    #[error("Invalid request url: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl YoutubeApiError {
    /// The human readable message Google attached to the rejection, if any.
    pub fn upstream_message(&self) -> Option<&str> {
        match self {
            Self::Unauthorized { message, .. } | Self::Rejected { message, .. } => {
                message.as_deref()
            }
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized { .. })
    }

    /// Classify a non-success response. Consumes the body.
    pub async fn from_response(response: Response) -> Self {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Self::from_status_and_body(status, &body)
    }

    pub fn from_status_and_body(status: StatusCode, body: &str) -> Self {
        let envelope = serde_json::from_str::<GoogleErrorEnvelope>(body).ok();
        let message = envelope
            .as_ref()
            .and_then(|envelope| envelope.error.message.clone());
        let reason = envelope.as_ref().and_then(|envelope| {
            envelope
                .error
                .errors
                .iter()
                .find_map(|detail| detail.reason.clone())
        });

        let credential_rejected = status == StatusCode::UNAUTHORIZED
            || (status == StatusCode::FORBIDDEN
                && reason
                    .as_deref()
                    .is_some_and(|reason| CREDENTIAL_REASONS.contains(&reason)));

        if credential_rejected {
            Self::Unauthorized {
                status: status.as_u16(),
                message,
            }
        } else {
            Self::Rejected {
                status: status.as_u16(),
                message,
                reason,
            }
        }
    }
}

/// Pass successful responses through, turn everything else into a [`YoutubeApiError`].
pub async fn ensure_success(response: Response) -> Result<Response, YoutubeApiError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(YoutubeApiError::from_response(response).await)
    }
}
