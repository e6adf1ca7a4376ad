//! The streaming image-proxy endpoint.
//!
//! `GET /proxy-image?url=<encoded>` pulls the target and pipes its
//! bytes straight through, so the browser loads the image same-origin
//! regardless of what the target's own CORS policy says. The body is
//! never buffered whole; it streams from upstream to client.

use std::time::Duration;

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use reqwest::header::{ACCEPT, ACCEPT_LANGUAGE, CACHE_CONTROL, REFERER, USER_AGENT};
use serde::Deserialize;
use url::Url;

use crate::http::server::AppState;
use crate::probe::strategy::{origin_of, BROWSER_USER_AGENT, IMAGE_ACCEPT};

#[derive(Debug, Deserialize)]
pub struct ProxyImageParams {
    url: Option<String>,
}

/// Passthrough handler. 400 when the `url` parameter is missing (no
/// upstream call is made), 500 on any upstream failure, otherwise a
/// stream of the target's bytes with mirrored type/length headers, a
/// 1-hour public cache directive, and a permissive CORS header.
pub async fn proxy_image(
    State(state): State<AppState>,
    Query(params): Query<ProxyImageParams>,
) -> Response {
    let Some(raw) = params.url.filter(|u| !u.is_empty()) else {
        return (StatusCode::BAD_REQUEST, "URL parameter is required").into_response();
    };

    let target = match Url::parse(&raw) {
        Ok(url) => url,
        Err(e) => {
            tracing::warn!(url = %raw, error = %e, "Rejecting unparseable proxy target");
            return (StatusCode::BAD_REQUEST, "URL parameter is required").into_response();
        }
    };

    let upstream = state
        .client
        .get(target.clone())
        .header(USER_AGENT, BROWSER_USER_AGENT)
        .header(ACCEPT, IMAGE_ACCEPT)
        .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
        .header(REFERER, origin_of(&target))
        .header(CACHE_CONTROL, "no-cache")
        .timeout(Duration::from_secs(state.upstream.stream_timeout_secs))
        .send()
        .await;

    let response = match upstream {
        Ok(r) if r.status().is_success() => r,
        Ok(r) => {
            tracing::warn!(url = %target, status = %r.status(), "Proxy upstream returned error status");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to proxy image").into_response();
        }
        Err(e) => {
            tracing::warn!(url = %target, error = %e, "Proxy upstream request failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Failed to proxy image").into_response();
        }
    };

    let mut headers = HeaderMap::new();
    if let Some(content_type) = response.headers().get(header::CONTENT_TYPE) {
        headers.insert(header::CONTENT_TYPE, content_type.clone());
    }
    if let Some(content_length) = response.headers().get(header::CONTENT_LENGTH) {
        headers.insert(header::CONTENT_LENGTH, content_length.clone());
    }
    headers.insert(
        header::CACHE_CONTROL,
        header::HeaderValue::from_static("public, max-age=3600"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        header::HeaderValue::from_static("*"),
    );

    let body = Body::from_stream(response.bytes_stream());
    (StatusCode::OK, headers, body).into_response()
}
