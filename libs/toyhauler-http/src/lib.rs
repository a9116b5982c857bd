#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(warnings)]

//! HTTP transport for the Toyhauler auth client
//!
//! A deliberately small hyper-based client:
//! - TLS via rustls (HTTPS only by default)
//! - Per-request timeout
//! - Bounded response body reads
//! - No connection reuse, retries or redirect following; every call is an
//!   independent round-trip
//!
//! # Example
//!
//! ```ignore
//! use toyhauler_http::HttpClient;
//! use std::time::Duration;
//!
//! let client = HttpClient::builder()
//!     .timeout(Duration::from_secs(10))
//!     .build()?;
//!
//! let resp = client
//!     .post("https://auth.example.com/authenticate")
//!     .header("authorization", "tok-123")
//!     .json(&body)?
//!     .send()
//!     .await?;
//!
//! let token = resp.headers().get("authorization").cloned();
//! let bytes = resp.checked_bytes().await?;
//! ```

mod builder;
mod client;
mod config;
mod error;
mod request;
mod response;
mod tls;

pub use builder::HttpClientBuilder;
pub use client::HttpClient;
pub use config::{DEFAULT_USER_AGENT, HttpClientConfig, TlsRootConfig, TransportSecurity};
pub use error::{HttpError, InvalidUriKind};
pub use request::RequestBuilder;
pub use response::{ERROR_BODY_PREVIEW_LIMIT, HttpResponse, ResponseBody};
