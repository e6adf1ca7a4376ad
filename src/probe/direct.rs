//! Direct fetch: ask the origin for the image ourselves.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, REFERER, USER_AGENT};
use reqwest::Client;
use url::Url;

use crate::config::UpstreamConfig;
use crate::error::{ProbeError, Result};
use crate::probe::strategy::{origin_of, FetchStrategy, BROWSER_USER_AGENT, IMAGE_ACCEPT};
use crate::report::{detect_protocol, filter_headers, FetchResult};

/// First strategy in the chain: a plain GET against the target with
/// browser-like headers. Fails on any non-2xx status or transport
/// error; the chain handles the fallback.
pub struct DirectFetch {
    client: Client,
    timeout: Duration,
}

impl DirectFetch {
    pub fn new(client: Client, config: &UpstreamConfig) -> Self {
        Self {
            client,
            timeout: Duration::from_secs(config.direct_timeout_secs),
        }
    }
}

#[async_trait]
impl FetchStrategy for DirectFetch {
    fn label(&self) -> &'static str {
        "Direct Fetch"
    }

    async fn fetch(&self, target: &Url, started: Instant) -> Result<FetchResult> {
        let setup_start = Instant::now();

        let response = self
            .client
            .get(target.clone())
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .header(ACCEPT, IMAGE_ACCEPT)
            .header(REFERER, origin_of(target))
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProbeError::Status(response.status()));
        }

        let setup_ms = setup_start.elapsed().as_millis() as u64;
        let protocol = detect_protocol(response.version(), response.headers());
        let headers = filter_headers(response.headers());
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
            "Direct fetch succeeded"
        );

        Ok(FetchResult::success(
            target.as_str(),
            total_ms,
            setup_ms,
            body.len() as u64,
            protocol,
            headers,
            self.label(),
            content_type,
        ))
    }
}
