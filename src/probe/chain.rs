//! Sequential fallback over the fetch strategies.

use std::time::Instant;

use reqwest::Client;
use url::Url;

use crate::config::UpstreamConfig;
use crate::error::{ProbeError, Result};
use crate::probe::direct::DirectFetch;
use crate::probe::image_proxy::ImageProxy;
use crate::probe::self_proxy::SelfProxy;
use crate::probe::strategy::FetchStrategy;
use crate::report::FetchResult;

/// Ordered list of strategies, tried strictly one at a time. The
/// first success wins; a later strategy never starts until the
/// earlier one has fully failed. No racing, no backoff.
pub struct FallbackChain {
    strategies: Vec<Box<dyn FetchStrategy>>,
}

impl FallbackChain {
    pub fn new(strategies: Vec<Box<dyn FetchStrategy>>) -> Self {
        Self { strategies }
    }

    /// The production chain: direct fetch, then our own proxy
    /// endpoint, then the public mirrors.
    pub fn from_config(client: &Client, config: &UpstreamConfig, self_base: &str) -> Self {
        Self::new(vec![
            Box::new(DirectFetch::new(client.clone(), config)),
            Box::new(SelfProxy::new(client.clone(), config, self_base)),
            Box::new(ImageProxy::new(client.clone(), config)),
        ])
    }

    /// Scan the strategies in order, returning the first success. On
    /// exhaustion the last failure is surfaced so the caller can
    /// report what actually went wrong.
    pub async fn run(&self, target: &Url, started: Instant) -> Result<FetchResult> {
        let mut last_error = None;

        for strategy in &self.strategies {
            match strategy.fetch(target, started).await {
                Ok(result) => {
                    tracing::info!(
                        url = %target,
                        method = strategy.label(),
                        elapsed_ms = result.total_ms,
                        size = result.size,
                        "Fetch strategy succeeded"
                    );
                    return Ok(result);
                }
                Err(e) => {
                    tracing::warn!(
                        url = %target,
                        method = strategy.label(),
                        error = %e,
                        "Fetch strategy failed, falling through"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(ProbeError::AllStrategiesFailed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    struct Scripted {
        name: &'static str,
        succeed: bool,
        calls: Arc<Mutex<Vec<&'static str>>>,
    }

    #[async_trait]
    impl FetchStrategy for Scripted {
        fn label(&self) -> &'static str {
            self.name
        }

        async fn fetch(&self, target: &Url, _started: Instant) -> Result<FetchResult> {
            self.calls.lock().unwrap().push(self.name);
            if self.succeed {
                Ok(FetchResult::success(
                    target.as_str(),
                    10,
                    5,
                    4096,
                    "HTTP/2".to_string(),
                    Vec::new(),
                    self.name,
                    None,
                ))
            } else {
                Err(ProbeError::AllStrategiesFailed)
            }
        }
    }

    fn scripted(
        calls: &Arc<Mutex<Vec<&'static str>>>,
        name: &'static str,
        succeed: bool,
    ) -> Box<dyn FetchStrategy> {
        Box::new(Scripted {
            name,
            succeed,
            calls: calls.clone(),
        })
    }

    #[tokio::test]
    async fn first_success_wins_and_later_strategies_never_run() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let chain = FallbackChain::new(vec![
            scripted(&calls, "first", true),
            scripted(&calls, "second", true),
        ]);

        let target = Url::parse("https://example.com/a.png").unwrap();
        let result = chain.run(&target, Instant::now()).await.unwrap();

        assert_eq!(result.method, "first");
        assert_eq!(*calls.lock().unwrap(), vec!["first"]);
    }

    #[tokio::test]
    async fn failure_falls_through_in_order() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let chain = FallbackChain::new(vec![
            scripted(&calls, "direct", false),
            scripted(&calls, "self-proxy", false),
            scripted(&calls, "mirrors", true),
        ]);

        let target = Url::parse("https://example.com/a.png").unwrap();
        let result = chain.run(&target, Instant::now()).await.unwrap();

        assert_eq!(result.method, "mirrors");
        assert_eq!(
            *calls.lock().unwrap(),
            vec!["direct", "self-proxy", "mirrors"]
        );
    }

    #[tokio::test]
    async fn exhaustion_surfaces_the_last_error() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let chain = FallbackChain::new(vec![
            scripted(&calls, "direct", false),
            scripted(&calls, "mirrors", false),
        ]);

        let target = Url::parse("https://example.com/a.png").unwrap();
        let err = chain.run(&target, Instant::now()).await.unwrap_err();
        assert!(matches!(err, ProbeError::AllStrategiesFailed));
    }

    #[tokio::test]
    async fn empty_chain_reports_generic_failure() {
        let chain = FallbackChain::new(Vec::new());
        let target = Url::parse("https://example.com/a.png").unwrap();
        let err = chain.run(&target, Instant::now()).await.unwrap_err();
        assert!(matches!(err, ProbeError::AllStrategiesFailed));
    }
}
