//! Transport layer.
//!
//! The [`HttpClient`] trait the service is written against, with a network
//! implementation and, behind the "in-process" feature, an in-memory one.

pub mod http;
#[cfg(feature = "in-process")]
pub mod http_oneshot;

pub use http::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use http_oneshot::OneshotHttpClient;
