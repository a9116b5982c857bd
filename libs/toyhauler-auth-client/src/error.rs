use http::StatusCode;
use thiserror::Error;
use toyhauler_http::HttpError;

use crate::config::ConfigError;

/// Errors returned by [`AuthClient`](crate::AuthClient).
///
/// A well-formed failure envelope (`success: false`) is not an error; it is
/// returned as `Ok`.
#[derive(Debug, Error)]
pub enum AuthClientError {
    /// The config file could not be resolved, read or parsed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Transport failure or non-2xx status, as reported by the HTTP client.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The response had no body, or one that is not a result envelope.
    #[error("auth service response has no usable body: {} {status_text}", status.as_u16())]
    MissingResponseBody {
        status: StatusCode,
        status_text: String,
    },

    /// A successful authentication response did not carry a token header.
    #[error("auth service returned a principal without an authorization token (status {})", status.as_u16())]
    MissingToken { status: StatusCode },
}
