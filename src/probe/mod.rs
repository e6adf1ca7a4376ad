//! The fallback chain and its fetch strategies.
//!
//! # Data Flow
//! ```text
//! target URL
//!     → chain.rs (sequential scan, first success wins)
//!         → direct.rs      (GET the origin directly)
//!         → self_proxy.rs  (loopback through /proxy-image)
//!         → image_proxy.rs (public mirrors, size-floor check)
//!     → FetchResult (report/)
//! ```
//!
//! # Design Decisions
//! - Strategies are trait objects behind `FetchStrategy`; the chain is
//!   just an ordered Vec, no special machinery
//! - Strictly sequential: a later strategy never starts until the
//!   earlier one has fully failed
//! - Errors are caught per strategy and only the last one survives to
//!   the caller on exhaustion

pub mod chain;
pub mod direct;
pub mod image_proxy;
pub mod self_proxy;
pub mod strategy;

pub use chain::FallbackChain;
pub use direct::DirectFetch;
pub use image_proxy::ImageProxy;
pub use self_proxy::SelfProxy;
pub use strategy::FetchStrategy;
