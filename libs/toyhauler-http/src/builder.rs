use crate::client::{ClientService, HttpClient};
use crate::config::{HttpClientConfig, TlsRootConfig, TransportSecurity};
use crate::error::HttpError;
use crate::response::ResponseBody;
use crate::tls;
use bytes::Bytes;
use http::Response;
use http::header::HeaderValue;
use http_body_util::{BodyExt, Full};
use hyper::body::Incoming;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use std::time::Duration;
use tower::timeout::TimeoutLayer;
use tower::util::BoxCloneSyncService;
use tower::{ServiceBuilder, ServiceExt};

/// Builder for constructing an [`HttpClient`].
#[derive(Debug)]
pub struct HttpClientBuilder {
    config: HttpClientConfig,
}

impl HttpClientBuilder {
    /// Create a new builder with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: HttpClientConfig::default(),
        }
    }

    /// Create a builder with a specific configuration
    #[must_use]
    pub fn with_config(config: HttpClientConfig) -> Self {
        Self { config }
    }

    /// Set the per-request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Set the user agent string
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Set the maximum response body size
    #[must_use]
    pub fn max_body_size(mut self, size: usize) -> Self {
        self.config.max_body_size = size;
        self
    }

    /// Set transport security mode
    #[must_use]
    pub fn transport(mut self, transport: TransportSecurity) -> Self {
        self.config.transport = transport;
        self
    }

    /// Allow plain HTTP connections.
    ///
    /// Equivalent to `.transport(TransportSecurity::AllowInsecureHttp)`.
    #[must_use]
    pub fn allow_insecure_http(mut self) -> Self {
        self.config.transport = TransportSecurity::AllowInsecureHttp;
        self
    }

    /// Set the TLS root certificate strategy
    #[must_use]
    pub fn tls_roots(mut self, tls_roots: TlsRootConfig) -> Self {
        self.config.tls_roots = tls_roots;
        self
    }

    /// Build the HTTP client
    ///
    /// Stack (outer to inner): error mapping → timeout → hyper client.
    /// The hyper client keeps no idle connections, so each request opens
    /// its own connection.
    ///
    /// # Errors
    /// Returns an error if TLS initialization fails or the user agent is not a
    /// valid header value.
    pub fn build(self) -> Result<HttpClient, HttpError> {
        if self.config.transport == TransportSecurity::AllowInsecureHttp {
            tracing::warn!(
                target: "toyhauler_http::security",
                "insecure HTTP enabled (TransportSecurity::AllowInsecureHttp); traffic is not encrypted"
            );
        }

        let user_agent = HeaderValue::try_from(self.config.user_agent.as_str())?;
        let timeout = self.config.request_timeout;

        let https = tls::build_https_connector(self.config.tls_roots, self.config.transport)?;

        let mut client_builder = Client::builder(TokioExecutor::new());
        client_builder.pool_max_idle_per_host(0).http2_only(false);
        let hyper_client = client_builder.build::<_, Full<Bytes>>(https);

        let service = ServiceBuilder::new()
            .layer(TimeoutLayer::new(timeout))
            .service(hyper_client)
            .map_response(box_response)
            .map_err(move |e: tower::BoxError| map_tower_error(e, timeout));

        let service: ClientService = BoxCloneSyncService::new(service);

        Ok(HttpClient {
            service,
            max_body_size: self.config.max_body_size,
            user_agent,
            transport_security: self.config.transport,
        })
    }
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn box_response(response: Response<Incoming>) -> Response<ResponseBody> {
    let (parts, body) = response.into_parts();
    let body: ResponseBody = body
        .map_err(|e| -> Box<dyn std::error::Error + Send + Sync> { Box::new(e) })
        .boxed();
    Response::from_parts(parts, body)
}

/// Map tower errors to `HttpError`, keeping the configured timeout duration.
fn map_tower_error(err: tower::BoxError, timeout: Duration) -> HttpError {
    if err.is::<tower::timeout::error::Elapsed>() {
        return HttpError::Timeout(timeout);
    }

    match err.downcast::<hyper_util::client::legacy::Error>() {
        Ok(hyper_err) => HttpError::from(*hyper_err),
        Err(other) => HttpError::Transport(other),
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::config::DEFAULT_USER_AGENT;

    #[test]
    fn test_builder_default() {
        let builder = HttpClientBuilder::new();
        assert_eq!(builder.config.request_timeout, Duration::from_secs(30));
        assert_eq!(builder.config.user_agent, DEFAULT_USER_AGENT);
        assert_eq!(builder.config.transport, TransportSecurity::TlsOnly);
    }

    #[test]
    fn test_builder_setters() {
        let builder = HttpClientBuilder::new()
            .timeout(Duration::from_secs(5))
            .user_agent("custom/1.0")
            .max_body_size(2048)
            .tls_roots(TlsRootConfig::Native)
            .allow_insecure_http();
        assert_eq!(builder.config.request_timeout, Duration::from_secs(5));
        assert_eq!(builder.config.user_agent, "custom/1.0");
        assert_eq!(builder.config.max_body_size, 2048);
        assert_eq!(builder.config.tls_roots, TlsRootConfig::Native);
        assert_eq!(
            builder.config.transport,
            TransportSecurity::AllowInsecureHttp
        );
    }

    #[test]
    fn test_builder_with_config() {
        let builder = HttpClientBuilder::with_config(HttpClientConfig::for_testing());
        assert_eq!(builder.config.request_timeout, Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_builder_build() {
        assert!(HttpClientBuilder::new().build().is_ok());
    }

    #[tokio::test]
    async fn test_builder_build_invalid_user_agent() {
        let result = HttpClientBuilder::new()
            .user_agent("bad\nagent")
            .build();
        assert!(matches!(result, Err(HttpError::InvalidHeaderValue(_))));
    }

    #[test]
    fn test_map_tower_error_passes_other_errors_as_transport() {
        let err: tower::BoxError = "connection reset".into();
        let mapped = map_tower_error(err, Duration::from_secs(3));
        assert!(matches!(mapped, HttpError::Transport(_)));
    }
}
