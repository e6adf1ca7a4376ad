//! Response header filtering.

use reqwest::header::HeaderMap;

use crate::report::result::HeaderEntry;

/// The only response headers ever surfaced to the client. Everything
/// else is dropped.
const SURFACED_HEADERS: [&str; 11] = [
    "content-type",
    "content-length",
    "cache-control",
    "etag",
    "last-modified",
    "server",
    "x-cache",
    "cf-cache-status",
    "age",
    "accept-ranges",
    "vary",
];

/// Filter a response header map down to the allow-list, preserving the
/// source iteration order (not the allow-list's order).
pub fn filter_headers(headers: &HeaderMap) -> Vec<HeaderEntry> {
    headers
        .iter()
        .filter(|(name, _)| {
            let name = name.as_str();
            SURFACED_HEADERS.iter().any(|s| name.eq_ignore_ascii_case(s))
        })
        .filter_map(|(name, value)| {
            value.to_str().ok().map(|v| HeaderEntry {
                key: name.as_str().to_string(),
                value: v.to_string(),
            })
        })
        .collect()
}
