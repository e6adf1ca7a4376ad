//! Image proxy: fetch through public image-mirroring services.
//!
//! Last strategy in the chain. Each mirror is a URL prefix the
//! percent-encoded target is appended to. Mirrors happily return tiny
//! HTML error pages with a 200 status, so a body is only accepted
//! when it exceeds a size floor.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use reqwest::Client;
use url::Url;

use crate::config::UpstreamConfig;
use crate::error::{ProbeError, Result};
use crate::probe::strategy::{FetchStrategy, BROWSER_USER_AGENT};
use crate::report::FetchResult;

pub struct ImageProxy {
    client: Client,
    mirrors: Vec<String>,
    timeout: Duration,
    min_bytes: usize,
}

impl ImageProxy {
    pub fn new(client: Client, config: &UpstreamConfig) -> Self {
        Self {
            client,
            mirrors: config.mirrors.clone(),
            timeout: Duration::from_secs(config.mirror_timeout_secs),
            min_bytes: config.min_mirror_bytes,
        }
    }

    /// Fetch one mirror, returning the decoded body length and content
    /// type. Status and size checks happen in the caller.
    async fn try_mirror(&self, mirror_url: &str) -> Result<(usize, Option<String>)> {
        let response = self
            .client
            .get(mirror_url)
            .header(USER_AGENT, BROWSER_USER_AGENT)
            .timeout(self.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(ProbeError::Status(response.status()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.bytes().await?;
        Ok((body.len(), content_type))
    }
}

#[async_trait]
impl FetchStrategy for ImageProxy {
    fn label(&self) -> &'static str {
        "Image Proxy"
    }

    async fn fetch(&self, target: &Url, started: Instant) -> Result<FetchResult> {
        let encoded: String =
            url::form_urlencoded::byte_serialize(target.as_str().as_bytes()).collect();
        let setup_start = Instant::now();
        let mut last_error = None;

        for mirror in &self.mirrors {
            let mirror_url = format!("{}{}", mirror, encoded);

            match self.try_mirror(&mirror_url).await {
                Ok((size, content_type)) if size > self.min_bytes => {
                    let setup_ms = setup_start.elapsed().as_millis() as u64;
                    let total_ms = started.elapsed().as_millis() as u64;

                    tracing::debug!(
                        url = %target,
                        mirror = %mirror,
                        size,
                        elapsed_ms = total_ms,
                        "Mirror fetch succeeded"
                    );

                    return Ok(FetchResult::success(
                        target.as_str(),
                        total_ms,
                        setup_ms,
                        size as u64,
                        "HTTP/2".to_string(),
                        Vec::new(),
                        self.label(),
                        content_type,
                    ));
                }
                Ok((size, _)) => {
                    tracing::debug!(
                        mirror = %mirror,
                        size,
                        "Mirror payload below size floor, rejecting"
                    );
                    last_error = Some(ProbeError::TinyPayload(size));
                }
                Err(e) => {
                    tracing::debug!(mirror = %mirror, error = %e, "Mirror fetch failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(ProbeError::MirrorsExhausted))
    }
}
