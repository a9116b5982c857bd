//! Turning raw auth service responses into client results.

use http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;

use crate::client::TOKEN_HEADER;
use crate::error::AuthClientError;
use crate::models::{Principal, SingleResult};
use crate::token_holder::TokenHolder;

/// Decode a result envelope from a response body.
///
/// An empty body, a JSON `null`, or anything that is not an envelope yields
/// [`AuthClientError::MissingResponseBody`].
pub fn parse_envelope<T: DeserializeOwned>(
    status: StatusCode,
    body: &[u8],
) -> Result<SingleResult<T>, AuthClientError> {
    let parsed = if body.trim_ascii().is_empty() {
        None
    } else {
        match serde_json::from_slice::<Option<SingleResult<T>>>(body) {
            Ok(envelope) => envelope,
            Err(e) => {
                tracing::debug!(status = %status, error = %e, "response body is not a result envelope");
                None
            }
        }
    };

    parsed.ok_or_else(|| AuthClientError::MissingResponseBody {
        status,
        status_text: status.canonical_reason().unwrap_or_default().to_owned(),
    })
}

/// Fuse a principal envelope with the token from the response headers.
///
/// Status, message, error and validation are copied across. When the body
/// carries a principal, the `authorization` header must hold a non-empty
/// token or the call fails with [`AuthClientError::MissingToken`]. Without a
/// principal the headers are not inspected.
pub fn into_token_holder_result(
    status: StatusCode,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<SingleResult<TokenHolder>, AuthClientError> {
    let SingleResult {
        success,
        message,
        error,
        output,
        validation,
    } = parse_envelope::<Principal>(status, body)?;

    let output = match output {
        Some(principal) => {
            let token = headers
                .get(TOKEN_HEADER)
                .and_then(|v| v.to_str().ok())
                .filter(|t| !t.is_empty())
                .ok_or(AuthClientError::MissingToken { status })?;
            Some(TokenHolder::new(principal, token.to_owned()))
        }
        None => None,
    };

    Ok(SingleResult {
        success,
        message,
        error,
        output,
        validation,
    })
}
