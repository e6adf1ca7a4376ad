//! Instrumentation attached to a successful fetch.
//!
//! # Responsibilities
//! - Define the FetchResult wire type the API returns
//! - Filter response headers to the surfaced allow-list
//! - Label the transport protocol
//! - Format byte counts and compute throughput

pub mod headers;
pub mod protocol;
pub mod result;
pub mod units;

pub use headers::filter_headers;
pub use protocol::detect_protocol;
pub use result::{proxy_image_url, FetchResult, HeaderEntry};
pub use units::{format_bytes, throughput_mbs};
