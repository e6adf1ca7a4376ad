//! Crate-wide error type.
//!
//! Strategy failures are routine here: the fallback chain catches them
//! and moves on, so most variants only ever surface in logs or as the
//! `message` field of the final 500 body.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProbeError {
    #[error("URL is required")]
    MissingUrl,

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("upstream request failed: {0}")]
    Upstream(#[from] reqwest::Error),

    #[error("upstream returned status {0}")]
    Status(StatusCode),

    #[error("payload too small: {0} bytes")]
    TinyPayload(usize),

    #[error("all image proxies failed")]
    MirrorsExhausted,

    #[error("all fetch methods failed")]
    AllStrategiesFailed,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ProbeError>;

impl ProbeError {
    /// HTTP status the API surfaces for this error. Input validation
    /// is the client's fault; everything else is a failed probe.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ProbeError::MissingUrl | ProbeError::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProbeError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = if status == StatusCode::BAD_REQUEST {
            json!({ "error": self.to_string() })
        } else {
            json!({
                "error": "Failed to load image",
                "message": self.to_string(),
            })
        };
        (status, Json(body)).into_response()
    }
}
