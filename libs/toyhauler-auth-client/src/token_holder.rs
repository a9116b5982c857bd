use std::fmt;

use serde::Serialize;

use crate::models::Principal;

/// A principal paired with the bearer token issued for it.
///
/// Only the client builds these, from a successful response that carried a
/// non-empty `authorization` header, so `token` is never empty.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct TokenHolder {
    principal: Principal,
    token: String,
}

impl TokenHolder {
    pub(crate) fn new(principal: Principal, token: String) -> Self {
        debug_assert!(!token.is_empty());
        Self { principal, token }
    }

    #[must_use]
    pub fn principal(&self) -> &Principal {
        &self.principal
    }

    /// The raw token, as sent back in the `authorization` header.
    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub fn into_parts(self) -> (Principal, String) {
        (self.principal, self.token)
    }
}

impl fmt::Debug for TokenHolder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenHolder")
            .field("principal", &self.principal)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn debug_redacts_token() {
        let holder = TokenHolder::new(Principal::from(json!({ "id": "u1" })), "tok-123".to_owned());
        let debug = format!("{holder:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("tok-123"));
        assert!(debug.contains("u1"));
    }

    #[test]
    fn serializes_principal_and_token() {
        let holder = TokenHolder::new(Principal::from(json!({ "id": "u1" })), "tok-123".to_owned());
        assert_eq!(
            serde_json::to_value(&holder).unwrap(),
            json!({ "principal": { "id": "u1" }, "token": "tok-123" })
        );
    }

    #[test]
    fn into_parts_returns_both() {
        let holder = TokenHolder::new(Principal::from(json!({ "id": "u1" })), "tok".to_owned());
        let (principal, token) = holder.into_parts();
        assert_eq!(principal.id(), Some("u1"));
        assert_eq!(token, "tok");
    }
}
