//! Protocol label detection.

use axum::http::Version;
use reqwest::header::HeaderMap;

/// Label the transport protocol of a response.
///
/// The negotiated version wins when the client reports one. For an
/// unknown version we fall back to header inference: a `cf-ray` header
/// means the response came through Cloudflare's H2 edge, and `alt-svc`
/// advertises an HTTP/3 upgrade. Default is "HTTP/2".
pub fn detect_protocol(version: Version, headers: &HeaderMap) -> String {
    match version {
        Version::HTTP_09 => "HTTP/0.9".to_string(),
        Version::HTTP_10 => "HTTP/1.0".to_string(),
        Version::HTTP_11 => "HTTP/1.1".to_string(),
        Version::HTTP_2 => "HTTP/2".to_string(),
        Version::HTTP_3 => "HTTP/3".to_string(),
        _ => {
            if headers.contains_key("cf-ray") {
                "HTTP/2 (Cloudflare)".to_string()
            } else if headers.contains_key("alt-svc") {
                "HTTP/3".to_string()
            } else {
                "HTTP/2".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn known_versions_are_labeled_directly() {
        let headers = HeaderMap::new();
        assert_eq!(detect_protocol(Version::HTTP_11, &headers), "HTTP/1.1");
        assert_eq!(detect_protocol(Version::HTTP_2, &headers), "HTTP/2");
        assert_eq!(detect_protocol(Version::HTTP_3, &headers), "HTTP/3");
    }

    #[test]
    fn known_version_wins_over_header_inference() {
        let mut headers = HeaderMap::new();
        headers.insert("cf-ray", HeaderValue::from_static("8a1b2c3d"));
        assert_eq!(detect_protocol(Version::HTTP_11, &headers), "HTTP/1.1");
    }
}
