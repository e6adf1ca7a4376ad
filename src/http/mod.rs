//! HTTP surface of the probe.
//!
//! # Data Flow
//! ```text
//! POST /api/test-image → api.rs → probe::FallbackChain → FetchResult JSON
//! GET  /proxy-image    → proxy.rs → streaming passthrough
//! anything else        → static front-end bundle (ServeDir)
//! ```

pub mod api;
pub mod proxy;
pub mod server;

pub use server::{AppState, HttpServer};
