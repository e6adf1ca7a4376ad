//! Self proxy: fetch the target through our own proxy endpoint.
//!
//! A loopback call, so it exercises the same code path the browser
//! will use for the final image display. Useful when the origin
//! rejects us but accepts the proxy's request shape, and doubles as
//! the top-level last resort when the whole chain has failed.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use url::Url;

use crate::config::UpstreamConfig;
use crate::error::{ProbeError, Result};
use crate::probe::strategy::FetchStrategy;
use crate::report::{proxy_image_url, FetchResult};

pub struct SelfProxy {
    client: Client,
    base: String,
    timeout: Duration,
}

impl SelfProxy {
    /// `base` is the loopback address of this server, e.g.
    /// `http://127.0.0.1:3000`, derived from the bound listener.
    pub fn new(client: Client, config: &UpstreamConfig, base: &str) -> Self {
        Self {
            client,
            base: base.trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(config.self_proxy_timeout_secs),
        }
    }
}

#[async_trait]
impl FetchStrategy for SelfProxy {
    fn label(&self) -> &'static str {
        "Server Proxy"
    }

    async fn fetch(&self, target: &Url, started: Instant) -> Result<FetchResult> {
        let setup_start = Instant::now();
        let loopback = format!("{}{}", self.base, proxy_image_url(target.as_str()));

        let response = self
            .client
            .get(&loopback)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProbeError::Status(response.status()));
        }

        let setup_ms = setup_start.elapsed().as_millis() as u64;
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);

        let body = response.bytes().await?;
        let total_ms = started.elapsed().as_millis() as u64;

        tracing::debug!(
            url = %target,
            size = body.len(),
            elapsed_ms = total_ms,
            "Loopback proxy fetch succeeded"
        );

        // The loopback hop hides the origin's response metadata, so no
        // headers are surfaced and the protocol label is fixed.
        Ok(FetchResult::success(
            target.as_str(),
            total_ms,
            setup_ms,
            body.len() as u64,
            "HTTP/2".to_string(),
            Vec::new(),
            self.label(),
            content_type,
        ))
    }
}
