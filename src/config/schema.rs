//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from a TOML file.
//! Every section has defaults so a missing or minimal config file works.
//! The config is immutable once loaded; there is no runtime mutation.

use serde::{Deserialize, Serialize};

/// Root configuration for the image probe server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ProbeConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Outbound fetch settings (timeouts, redirects, mirrors).
    pub upstream: UpstreamConfig,

    /// Static front-end bundle.
    pub static_files: StaticConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Outbound fetch configuration shared by the strategies and the
/// proxy endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Timeout for the direct fetch strategy, in seconds.
    pub direct_timeout_secs: u64,

    /// Timeout for the self-proxy (loopback) strategy, in seconds.
    pub self_proxy_timeout_secs: u64,

    /// Per-mirror timeout for the image-proxy strategy, in seconds.
    pub mirror_timeout_secs: u64,

    /// Timeout for the streaming proxy endpoint, in seconds.
    pub stream_timeout_secs: u64,

    /// Maximum redirects to follow on any outbound request.
    pub max_redirects: usize,

    /// Minimum body size a mirror response must exceed to count as a
    /// real image rather than an error page.
    pub min_mirror_bytes: usize,

    /// Public image-proxy services, each a URL prefix the encoded
    /// target is appended to. Availability of these is outside our
    /// control, so they are config rather than constants.
    pub mirrors: Vec<String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            direct_timeout_secs: 10,
            self_proxy_timeout_secs: 10,
            mirror_timeout_secs: 8,
            stream_timeout_secs: 30,
            max_redirects: 5,
            min_mirror_bytes: 1000,
            mirrors: vec![
                "https://proxy.duckduckgo.com/iu/?u=".to_string(),
                "https://wsrv.nl/?url=".to_string(),
                "https://images.weserv.nl/?url=".to_string(),
            ],
        }
    }
}

/// Static asset serving.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StaticConfig {
    /// Directory holding the front-end bundle.
    pub dir: String,
}

impl Default for StaticConfig {
    fn default() -> Self {
        Self {
            dir: "public".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_complete() {
        let config = ProbeConfig::default();
        assert_eq!(config.listener.bind_address, "0.0.0.0:3000");
        assert_eq!(config.upstream.direct_timeout_secs, 10);
        assert_eq!(config.upstream.mirror_timeout_secs, 8);
        assert_eq!(config.upstream.stream_timeout_secs, 30);
        assert_eq!(config.upstream.max_redirects, 5);
        assert_eq!(config.upstream.min_mirror_bytes, 1000);
        assert_eq!(config.upstream.mirrors.len(), 3);
    }

    #[test]
    fn minimal_toml_falls_back_to_defaults() {
        let config: ProbeConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "127.0.0.1:8080"
            "#,
        )
        .unwrap();
        assert_eq!(config.listener.bind_address, "127.0.0.1:8080");
        assert_eq!(config.upstream.mirrors.len(), 3);
        assert_eq!(config.static_files.dir, "public");
    }

    #[test]
    fn mirrors_are_overridable() {
        let config: ProbeConfig = toml::from_str(
            r#"
            [upstream]
            mirrors = ["http://127.0.0.1:9999/?url="]
            "#,
        )
        .unwrap();
        assert_eq!(config.upstream.mirrors.len(), 1);
    }
}
