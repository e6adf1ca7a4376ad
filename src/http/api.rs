//! The probe API.

use std::time::Instant;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use url::Url;

use crate::error::ProbeError;
use crate::http::server::AppState;
use crate::probe::strategy::FetchStrategy;

#[derive(Debug, Deserialize)]
pub struct TestImageRequest {
    /// Optional so an omitted field maps to the contract's 400 rather
    /// than an extractor rejection.
    pub url: Option<String>,
}

/// `POST /api/test-image`: run the fallback chain against the target
/// and return the instrumented result.
///
/// If the whole chain exhausts, the self-proxy strategy gets one final
/// explicit re-attempt before the original error is surfaced as a 500.
pub async fn test_image(
    State(state): State<AppState>,
    Json(body): Json<TestImageRequest>,
) -> Response {
    let started = Instant::now();

    let Some(raw) = body.url.map(|u| u.trim().to_string()).filter(|u| !u.is_empty()) else {
        return ProbeError::MissingUrl.into_response();
    };

    let target = match Url::parse(&raw) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!(url = %raw, error = %e, "Rejecting unparseable probe target");
            return ProbeError::InvalidUrl(e).into_response();
        }
    };

    tracing::info!(url = %target, "Probing image");

    match state.chain.run(&target, started).await {
        Ok(result) => Json(result).into_response(),
        Err(chain_error) => {
            tracing::error!(url = %target, error = %chain_error, "All strategies failed");

            match state.last_resort.fetch(&target, started).await {
                Ok(result) => Json(result).into_response(),
                Err(retry_error) => {
                    tracing::error!(
                        url = %target,
                        error = %retry_error,
                        "Last-resort proxy retry failed"
                    );
                    // The original chain error carries the more useful
                    // message.
                    chain_error.into_response()
                }
            }
        }
    }
}
