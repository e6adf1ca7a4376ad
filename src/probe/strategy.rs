//! The fetch strategy seam.

use std::time::Instant;

use async_trait::async_trait;
use url::Url;

use crate::error::Result;
use crate::report::FetchResult;

/// User agent presented on outbound fetches. Some origins reject
/// requests that do not look like a browser.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Accept header biased toward image types.
pub const IMAGE_ACCEPT: &str = "image/webp,image/apng,image/*,*/*;q=0.8";

/// One way of retrieving the target image.
///
/// Implementations are stateless across requests; each `fetch` is a
/// single bounded network operation. An `Err` means the chain should
/// move on to the next strategy.
#[async_trait]
pub trait FetchStrategy: Send + Sync {
    /// Label reported in the result's `method` field.
    fn label(&self) -> &'static str;

    /// Attempt the fetch. `started` is the moment the API request
    /// began, so `totalTime` spans earlier failed strategies too.
    async fn fetch(&self, target: &Url, started: Instant) -> Result<FetchResult>;
}

/// Origin of a URL in serialized form, used as the `Referer` on
/// outbound requests.
pub fn origin_of(url: &Url) -> String {
    url.origin().ascii_serialization()
}
