use crate::client::ClientService;
use crate::config::TransportSecurity;
use crate::error::{HttpError, InvalidUriKind};
use crate::response::HttpResponse;
use bytes::Bytes;
use http::Request;
use http::header::{CONTENT_TYPE, HeaderName, HeaderValue, USER_AGENT};
use http_body_util::Full;
use serde::Serialize;
use tower::ServiceExt;

#[derive(Clone, Debug)]
enum BodyKind {
    Empty,
    /// JSON-serialized body (stored as bytes after serialization)
    Json(Bytes),
}

/// HTTP request builder with fluent API
///
/// Created by [`HttpClient::post`](crate::HttpClient::post). Header errors
/// are deferred to [`send()`](RequestBuilder::send) so calls can be chained.
///
/// # Example
///
/// ```ignore
/// let resp = client
///     .post("https://auth.example.com/switchTenant")
///     .header("authorization", current_token)
///     .json(&SwitchTenant { new_tenant_code: "t2" })?
///     .send()
///     .await?;
/// ```
#[must_use = "RequestBuilder does nothing until .send() is called"]
pub struct RequestBuilder {
    service: ClientService,
    max_body_size: usize,
    user_agent: HeaderValue,
    method: http::Method,
    url: String,
    headers: Vec<(HeaderName, HeaderValue)>,
    body: BodyKind,
    /// Error captured during building (deferred to `send()`)
    error: Option<HttpError>,
    transport_security: TransportSecurity,
}

impl RequestBuilder {
    pub(crate) fn new(
        service: ClientService,
        max_body_size: usize,
        user_agent: HeaderValue,
        method: http::Method,
        url: String,
        transport_security: TransportSecurity,
    ) -> Self {
        Self {
            service,
            max_body_size,
            user_agent,
            method,
            url,
            headers: Vec::new(),
            body: BodyKind::Empty,
            error: None,
            transport_security,
        }
    }

    /// Add a single header to the request
    pub fn header(mut self, name: &str, value: &str) -> Self {
        if self.error.is_some() {
            return self;
        }

        match (HeaderName::try_from(name), HeaderValue::try_from(value)) {
            (Ok(name), Ok(value)) => self.headers.push((name, value)),
            (Err(e), _) => self.error = Some(HttpError::InvalidHeaderName(e)),
            (_, Err(e)) => self.error = Some(HttpError::InvalidHeaderValue(e)),
        }
        self
    }

    /// Set request body as JSON
    ///
    /// Sets `content-type: application/json` unless a Content-Type header was
    /// already provided.
    ///
    /// # Errors
    ///
    /// Returns a deferred header error, or `HttpError::Json` if serialization fails.
    pub fn json<T: Serialize>(mut self, body: &T) -> Result<Self, HttpError> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }

        self.body = BodyKind::Json(Bytes::from(serde_json::to_vec(body)?));
        Ok(self)
    }

    /// Parse the URL and check its scheme against the transport security mode.
    fn validate_url(&self) -> Result<http::Uri, HttpError> {
        let uri: http::Uri =
            self.url
                .parse()
                .map_err(|e: http::uri::InvalidUri| HttpError::InvalidUri {
                    url: self.url.clone(),
                    kind: InvalidUriKind::ParseError,
                    reason: e.to_string(),
                })?;

        if uri.authority().is_none() {
            return Err(HttpError::InvalidUri {
                url: self.url.clone(),
                kind: InvalidUriKind::MissingAuthority,
                reason: "missing host/authority".to_owned(),
            });
        }

        match uri.scheme_str() {
            Some("https") => Ok(uri),
            Some("http") => match self.transport_security {
                TransportSecurity::AllowInsecureHttp => Ok(uri),
                TransportSecurity::TlsOnly => Err(HttpError::InvalidScheme {
                    scheme: "http".to_owned(),
                    reason: "HTTPS required (transport security is TlsOnly)".to_owned(),
                }),
            },
            Some(scheme) => Err(HttpError::InvalidScheme {
                scheme: scheme.to_owned(),
                reason: "only http:// and https:// schemes are supported".to_owned(),
            }),
            None => Err(HttpError::InvalidUri {
                url: self.url.clone(),
                kind: InvalidUriKind::MissingScheme,
                reason: "missing scheme".to_owned(),
            }),
        }
    }

    /// Send the request and return the response
    ///
    /// Any HTTP status is returned as `Ok`; use
    /// [`HttpResponse::checked_bytes`] to turn non-2xx into an error.
    ///
    /// # Errors
    ///
    /// Returns `HttpError` if:
    /// - Request building failed (invalid headers, URL, etc.)
    /// - URL scheme is invalid for the transport security mode
    /// - Network/transport error
    /// - Request timeout
    pub async fn send(mut self) -> Result<HttpResponse, HttpError> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }

        let uri = self.validate_url()?;
        let mut builder = Request::builder().method(self.method.clone()).uri(uri);

        let has_header = |wanted: &HeaderName| self.headers.iter().any(|(name, _)| name == wanted);
        if matches!(self.body, BodyKind::Json(_)) && !has_header(&CONTENT_TYPE) {
            builder = builder.header(CONTENT_TYPE, "application/json");
        }
        if !has_header(&USER_AGENT) {
            builder = builder.header(USER_AGENT, self.user_agent.clone());
        }

        for (name, value) in self.headers {
            builder = builder.header(name, value);
        }

        let body = match self.body {
            BodyKind::Empty => Bytes::new(),
            BodyKind::Json(bytes) => bytes,
        };
        let request = builder.body(Full::new(body))?;

        tracing::debug!(method = %self.method, url = %self.url, "sending HTTP request");

        let inner = self.service.oneshot(request).await?;

        Ok(HttpResponse {
            inner,
            max_body_size: self.max_body_size,
        })
    }
}
