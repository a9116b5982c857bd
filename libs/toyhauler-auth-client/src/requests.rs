//! JSON request bodies for the auth service endpoints.

use std::fmt;

use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticateBody<'a> {
    pub login: &'a str,
    pub password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_code: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SwitchTenantBody<'a> {
    pub new_tenant_code: &'a str,
}

/// Parameters for creating a tenant together with its first user.
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterTenantRequest {
    pub tenant_name: String,
    pub new_user: bool,
    pub user_name: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_code: Option<String>,
}

impl fmt::Debug for RegisterTenantRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterTenantRequest")
            .field("tenant_name", &self.tenant_name)
            .field("new_user", &self.new_user)
            .field("user_name", &self.user_name)
            .field("password", &"[REDACTED]")
            .field("tenant_code", &self.tenant_code)
            .finish()
    }
}
