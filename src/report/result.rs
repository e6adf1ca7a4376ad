//! The probe result returned to the client.
//!
//! Wire field names are camelCase and fixed: the front-end (and any
//! other consumer of the JSON) reads them by name. Rust field names
//! say what is actually measured; renames bridge the two.

use serde::Serialize;

use crate::report::units::{format_bytes, throughput_mbs};

/// One surfaced response header.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct HeaderEntry {
    pub key: String,
    pub value: String,
}

/// Everything measured about one successful fetch.
///
/// `dnsTime` on the wire is a coarse setup bracket (strategy start to
/// response headers), not a true DNS measurement; `downloadTime` is
/// always `totalTime - dnsTime`.
#[derive(Debug, Clone, Serialize)]
pub struct FetchResult {
    pub success: bool,

    pub url: String,

    #[serde(rename = "totalTime")]
    pub total_ms: u64,

    #[serde(rename = "dnsTime")]
    pub setup_ms: u64,

    #[serde(rename = "downloadTime")]
    pub download_ms: u64,

    pub size: u64,

    #[serde(rename = "sizeFormatted")]
    pub size_formatted: String,

    /// Throughput in MB/s.
    pub speed: f64,

    pub protocol: String,

    pub headers: Vec<HeaderEntry>,

    /// Which strategy produced this result.
    pub method: String,

    /// URL the client should load the image from. Always routed
    /// through the local proxy endpoint so the browser never hits the
    /// origin cross-site.
    #[serde(rename = "imageUrl")]
    pub image_url: String,

    #[serde(rename = "contentType", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl FetchResult {
    /// Assemble a successful result from raw measurements. Derived
    /// fields (formatted size, speed, download time) are computed
    /// here so every strategy reports them identically.
    #[allow(clippy::too_many_arguments)]
    pub fn success(
        url: &str,
        total_ms: u64,
        setup_ms: u64,
        size: u64,
        protocol: String,
        headers: Vec<HeaderEntry>,
        method: &'static str,
        content_type: Option<String>,
    ) -> Self {
        Self {
            success: true,
            url: url.to_string(),
            total_ms,
            setup_ms: setup_ms.min(total_ms),
            download_ms: total_ms.saturating_sub(setup_ms.min(total_ms)),
            size,
            size_formatted: format_bytes(size),
            speed: throughput_mbs(size, total_ms),
            protocol,
            headers,
            method: method.to_string(),
            image_url: proxy_image_url(url),
            content_type,
        }
    }
}

/// Local proxy URL for displaying the target, with the target
/// percent-encoded into the query string.
pub fn proxy_image_url(target: &str) -> String {
    let encoded: String = url::form_urlencoded::byte_serialize(target.as_bytes()).collect();
    format!("/proxy-image?url={}", encoded)
}
