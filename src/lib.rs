//! imgprobe — image fetch probe and CORS-bypassing proxy.
//!
//! Probes a remote image URL, measures how the fetch went (timing,
//! size, throughput, protocol, headers), and serves the image back
//! through a local proxy so a browser can display it without
//! cross-origin failures.
//!
//! # Architecture Overview
//!
//! ```text
//!   POST /api/test-image ──▶ http/api ──▶ probe/chain
//!                                            │
//!                              ┌─────────────┼──────────────┐
//!                              ▼             ▼              ▼
//!                         direct fetch   self proxy    image mirrors
//!                              └─────────────┼──────────────┘
//!                                            ▼
//!                                     report/FetchResult ──▶ JSON
//!
//!   GET /proxy-image ──▶ http/proxy ──▶ streaming passthrough
//!                                        (also the self-proxy hop and
//!                                         the browser's image source)
//! ```
//!
//! Strategies run strictly one at a time; the first success wins and
//! carries the instrumentation. Nothing outlives a request except the
//! configuration fixed at startup.

pub mod config;
pub mod error;
pub mod http;
pub mod probe;
pub mod report;

pub use config::ProbeConfig;
pub use error::{ProbeError, Result};
pub use http::HttpServer;
pub use report::FetchResult;
