use crate::builder::HttpClientBuilder;
use crate::config::TransportSecurity;
use crate::error::HttpError;
use crate::request::RequestBuilder;
use crate::response::ResponseBody;
use bytes::Bytes;
use http::header::HeaderValue;
use http::{Request, Response};
use http_body_util::Full;
use std::fmt;
use tower::util::BoxCloneSyncService;

/// Type-erased service stack behind [`HttpClient`].
pub type ClientService =
    BoxCloneSyncService<Request<Full<Bytes>>, Response<ResponseBody>, HttpError>;

/// HTTP client over a tower service stack (timeout → hyper).
///
/// Use [`HttpClientBuilder`] to construct instances with custom configuration.
///
/// # Thread Safety
///
/// `HttpClient` is `Clone + Send + Sync` and holds no mutable state, so it can
/// be shared freely between tasks. Idle connections are never kept, which
/// makes every request an independent round-trip.
#[derive(Clone)]
pub struct HttpClient {
    pub(crate) service: ClientService,
    pub(crate) max_body_size: usize,
    pub(crate) user_agent: HeaderValue,
    pub(crate) transport_security: TransportSecurity,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    ///
    /// # Errors
    /// Returns an error if TLS initialization fails
    pub fn new() -> Result<Self, HttpError> {
        HttpClientBuilder::new().build()
    }

    /// Create a builder for configuring the HTTP client
    #[must_use]
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    /// Create a POST request builder
    ///
    /// The URL must be absolute (scheme and host). Plain `http://` URLs
    /// additionally require [`TransportSecurity::AllowInsecureHttp`].
    ///
    /// # Example
    ///
    /// ```ignore
    /// let resp = client
    ///     .post("https://auth.example.com/refreshToken")
    ///     .header("authorization", current_token)
    ///     .json(&serde_json::json!({}))?
    ///     .send()
    ///     .await?;
    /// ```
    pub fn post(&self, url: &str) -> RequestBuilder {
        self.request(http::Method::POST, url)
    }

    fn request(&self, method: http::Method, url: &str) -> RequestBuilder {
        RequestBuilder::new(
            self.service.clone(),
            self.max_body_size,
            self.user_agent.clone(),
            method,
            url.to_owned(),
            self.transport_security,
        )
    }

    /// Transport security mode this client was built with
    #[must_use]
    pub fn transport_security(&self) -> TransportSecurity {
        self.transport_security
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("max_body_size", &self.max_body_size)
            .field("user_agent", &self.user_agent)
            .field("transport_security", &self.transport_security)
            .finish_non_exhaustive()
    }
}
