use serde::Serialize;
use toyhauler_http::{HttpClient, HttpClientBuilder, HttpClientConfig, HttpResponse, TransportSecurity};

use crate::config::{AuthClientConfig, ConfigLoader};
use crate::convert::{into_token_holder_result, parse_envelope};
use crate::error::AuthClientError;
use crate::models::{SingleResult, Tenant};
use crate::requests::{AuthenticateBody, RegisterTenantRequest, SwitchTenantBody};
use crate::token_holder::TokenHolder;

/// Base URL used when neither an explicit URL nor a configured one is set.
pub const DEFAULT_API_AUTH_URL: &str = "http://auth.toyhauler.io";

/// Header carrying the raw token, in requests and in auth responses.
pub const TOKEN_HEADER: &str = "authorization";

const AUTHENTICATE_PATH: &str = "authenticate";
const REFRESH_TOKEN_PATH: &str = "refreshToken";
const SWITCH_TENANT_PATH: &str = "switchTenant";
const TENANTS_PATH: &str = "tenants";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RootUrlSource {
    Explicit,
    ConfigFile,
    Default,
}

impl RootUrlSource {
    fn as_str(self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::ConfigFile => "config_file",
            Self::Default => "default",
        }
    }
}

/// Client for the Toyhauler auth service.
///
/// The root URL is resolved once at construction:
/// explicit argument, then `authApiBaseUrl` from
/// `~/.config/toyhauler-auth-client/config.json`, then
/// [`DEFAULT_API_AUTH_URL`]. The client is immutable afterwards, so it can be
/// shared freely between tasks.
///
/// # Example
///
/// ```ignore
/// let client = AuthClient::new(None)?;
/// let result = client.authenticate("alice", "secret", None).await?;
/// if let Some(holder) = result.output {
///     let refreshed = client.refresh_token(holder.token()).await?;
/// }
/// ```
#[derive(Clone, Debug)]
pub struct AuthClient {
    auth_api_root_url: String,
    http: HttpClient,
}

impl AuthClient {
    /// Create a client, reading the config file unless `auth_api_url` is given.
    ///
    /// An empty `auth_api_url` counts as absent.
    ///
    /// # Errors
    ///
    /// [`AuthClientError::Config`] if the config file exists but cannot be
    /// read or parsed, [`AuthClientError::Http`] if the HTTP client cannot be
    /// built.
    pub fn new(auth_api_url: Option<&str>) -> Result<Self, AuthClientError> {
        let mut builder = Self::builder();
        if let Some(url) = auth_api_url {
            builder = builder.auth_api_url(url);
        }
        builder.build()
    }

    #[must_use]
    pub fn builder() -> AuthClientBuilder {
        AuthClientBuilder::default()
    }

    #[must_use]
    pub fn auth_api_root_url(&self) -> &str {
        &self.auth_api_root_url
    }

    /// Log in with credentials, optionally into a specific tenant.
    ///
    /// # Errors
    ///
    /// Transport and status errors, [`AuthClientError::MissingResponseBody`],
    /// and [`AuthClientError::MissingToken`] if a principal comes back
    /// without a token.
    pub async fn authenticate(
        &self,
        login: &str,
        password: &str,
        tenant_code: Option<&str>,
    ) -> Result<SingleResult<TokenHolder>, AuthClientError> {
        let body = AuthenticateBody {
            login,
            password,
            tenant_code,
        };
        self.post_for_token(AUTHENTICATE_PATH, &body, None).await
    }

    /// Exchange the current token for a fresh one.
    ///
    /// # Errors
    ///
    /// Same as [`authenticate`](Self::authenticate).
    pub async fn refresh_token(
        &self,
        current_token: &str,
    ) -> Result<SingleResult<TokenHolder>, AuthClientError> {
        let body = serde_json::Map::new();
        self.post_for_token(REFRESH_TOKEN_PATH, &body, Some(current_token))
            .await
    }

    /// Move the current session to another tenant.
    ///
    /// # Errors
    ///
    /// Same as [`authenticate`](Self::authenticate).
    pub async fn switch_tenant(
        &self,
        current_token: &str,
        tenant_code: &str,
    ) -> Result<SingleResult<TokenHolder>, AuthClientError> {
        let body = SwitchTenantBody {
            new_tenant_code: tenant_code,
        };
        self.post_for_token(SWITCH_TENANT_PATH, &body, Some(current_token))
            .await
    }

    /// Create a tenant. The response envelope is returned as sent.
    ///
    /// `current_token` is attached as the `authorization` header when given.
    ///
    /// # Errors
    ///
    /// Transport and status errors, and
    /// [`AuthClientError::MissingResponseBody`].
    pub async fn register_tenant(
        &self,
        request: &RegisterTenantRequest,
        current_token: Option<&str>,
    ) -> Result<SingleResult<Tenant>, AuthClientError> {
        let response = self.post(TENANTS_PATH, request, current_token).await?;
        let status = response.status();
        let body = response.checked_bytes().await?;
        parse_envelope(status, &body)
    }

    async fn post_for_token<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<SingleResult<TokenHolder>, AuthClientError> {
        let response = self.post(path, body, token).await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.checked_bytes().await?;
        into_token_holder_result(status, &headers, &body)
    }

    async fn post<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        token: Option<&str>,
    ) -> Result<HttpResponse, AuthClientError> {
        let url = self.endpoint(path);
        tracing::debug!(url = %url, with_token = token.is_some(), "calling auth service");

        let mut request = self.http.post(&url);
        if let Some(token) = token {
            request = request.header(TOKEN_HEADER, token);
        }
        Ok(request.json(body)?.send().await?)
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.auth_api_root_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

/// Builder for [`AuthClient`].
#[derive(Debug, Default)]
pub struct AuthClientBuilder {
    auth_api_url: Option<String>,
    config_loader: Option<ConfigLoader<AuthClientConfig>>,
    http_config: Option<HttpClientConfig>,
}

impl AuthClientBuilder {
    /// Explicit root URL; takes precedence over the config file.
    #[must_use]
    pub fn auth_api_url(mut self, url: impl Into<String>) -> Self {
        self.auth_api_url = Some(url.into());
        self
    }

    /// Read the config from another location than
    /// [`AuthClientConfig::loader`].
    #[must_use]
    pub fn config_loader(mut self, loader: ConfigLoader<AuthClientConfig>) -> Self {
        self.config_loader = Some(loader);
        self
    }

    /// HTTP settings. Without this, defaults are used and plain HTTP is
    /// allowed only if the resolved root URL is `http://`.
    #[must_use]
    pub fn http_config(mut self, config: HttpClientConfig) -> Self {
        self.http_config = Some(config);
        self
    }

    /// Resolve the root URL and build the client.
    ///
    /// # Errors
    ///
    /// See [`AuthClient::new`].
    pub fn build(self) -> Result<AuthClient, AuthClientError> {
        let (auth_api_root_url, source) = match self.auth_api_url.filter(|u| !u.is_empty()) {
            Some(url) => (url, RootUrlSource::Explicit),
            None => {
                let loader = self.config_loader.unwrap_or_else(AuthClientConfig::loader);
                let configured = loader
                    .load()?
                    .and_then(|cfg| cfg.auth_api_base_url)
                    .filter(|u| !u.is_empty());
                match configured {
                    Some(url) => (url, RootUrlSource::ConfigFile),
                    None => (DEFAULT_API_AUTH_URL.to_owned(), RootUrlSource::Default),
                }
            }
        };

        tracing::debug!(
            auth_api_root_url = %auth_api_root_url,
            source = source.as_str(),
            "resolved auth API root URL"
        );

        let http_config = self.http_config.unwrap_or_else(|| {
            let mut config = HttpClientConfig::default();
            if is_plain_http(&auth_api_root_url) {
                tracing::warn!(
                    auth_api_root_url = %auth_api_root_url,
                    "auth API root URL is plain HTTP; tokens and passwords are sent unencrypted"
                );
                config.transport = TransportSecurity::AllowInsecureHttp;
            }
            config
        });

        let http = HttpClientBuilder::with_config(http_config).build()?;

        Ok(AuthClient {
            auth_api_root_url,
            http,
        })
    }
}

fn is_plain_http(url: &str) -> bool {
    url.get(..7)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("http://"))
}
