use reqwest::StatusCode;
use thiserror::Error;

/// Failure taxonomy for calls against the remote API.
///
/// Everything is caught at the point of the HTTP call; nothing is
/// retried. `Unauthorized` covers expired and invalid tokens alike -
/// the server does not let the client tell them apart.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("not authorized ({status}): {message}")]
    Unauthorized { status: StatusCode, message: String },

    #[error("request rejected ({status}): {message}")]
    Validation { status: StatusCode, message: String },

    #[error("unexpected API response ({status}): {message}")]
    Api { status: StatusCode, message: String },

    #[error("not logged in")]
    NotAuthenticated,
}

impl ApiError {
    /// Classify a non-success response, consuming its body for the message.
    pub(crate) async fn from_response(response: reqwest::Response) -> Self {
        let status = response.status();
        let message = response.text().await.unwrap_or_default();
        Self::from_status(status, message)
    }

    pub fn from_status(status: StatusCode, message: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                ApiError::Unauthorized { status, message }
            }
            s if s.is_client_error() => ApiError::Validation { status, message },
            _ => ApiError::Api { status, message },
        }
    }

    pub fn is_auth_failure(&self) -> bool {
        matches!(
            self,
            ApiError::Unauthorized { .. } | ApiError::NotAuthenticated
        )
    }
}
