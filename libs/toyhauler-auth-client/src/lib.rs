#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![warn(warnings)]

//! Client for the Toyhauler multi-tenant authentication service
//!
//! - [`AuthClient`]: `authenticate`, `refresh_token`, `switch_tenant` and
//!   `register_tenant` against a configurable root URL
//! - [`TokenHolder`]: principal plus the token taken from the `authorization`
//!   response header
//! - [`ConfigLoader`]: typed JSON config files under `~`-relative folders
//!
//! The root URL comes from the explicit argument, else `authApiBaseUrl` in
//! `~/.config/toyhauler-auth-client/config.json`, else
//! [`DEFAULT_API_AUTH_URL`].

mod client;
pub mod config;
mod convert;
mod error;
pub mod models;
pub mod paths;
mod requests;
mod token_holder;

pub use client::{AuthClient, AuthClientBuilder, DEFAULT_API_AUTH_URL, TOKEN_HEADER};
pub use config::{AuthClientConfig, ConfigError, ConfigLoader};
pub use error::AuthClientError;
pub use models::{ErrorInfo, Principal, SingleResult, Tenant, ValidationInfo};
pub use requests::RegisterTenantRequest;
pub use token_holder::TokenHolder;

pub use toyhauler_http::{HttpClientConfig, HttpError, TransportSecurity};
