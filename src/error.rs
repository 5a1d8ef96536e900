//! Error types for the newsfront application and their HTTP mapping.
//!
//! Page handlers return [`FrontError`]; its [`IntoResponse`] impl is the one
//! place failures become a response. Every failure gets the same JSON
//! shape, logged once here:
//!
//! ```json
//! { "error": { "message": "company 9 not found", "type": "not_found" } }
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use newsfront_upstream::UpstreamError;
use serde::{Deserialize, Serialize};

/// Top-level error type for the front end.
#[derive(Debug, thiserror::Error)]
pub enum FrontError {
    /// Lookup, upstream or input failure raised while assembling a page.
    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Logging could not be initialised.
    #[error("logging error: {0}")]
    Logging(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, FrontError>;

/// Uniform failure body returned by every page route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// The error details.
    pub error: ErrorBody,
}

/// Error details within an [`ErrorResponse`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable error message.
    pub message: String,
    /// Error kind: `not_found`, `invalid_input`, `upstream_unavailable`
    /// or `internal`.
    #[serde(rename = "type")]
    pub error_type: String,
}

impl FrontError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Upstream(UpstreamError::NotFound { .. }) => StatusCode::NOT_FOUND,
            Self::Upstream(UpstreamError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            Self::Upstream(UpstreamError::Unavailable(_)) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable kind for this error.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Upstream(UpstreamError::Config(_)) => "internal",
            Self::Upstream(err) => err.kind(),
            _ => "internal",
        }
    }

    /// The uniform response body for this error.
    pub fn to_body(&self) -> ErrorResponse {
        ErrorResponse {
            error: ErrorBody {
                message: self.to_string(),
                error_type: self.kind().to_owned(),
            },
        }
    }
}

impl IntoResponse for FrontError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(kind = self.kind(), error = %self, "page assembly failed");
        } else {
            tracing::warn!(kind = self.kind(), error = %self, "page request rejected");
        }
        (status, Json(self.to_body())).into_response()
    }
}
