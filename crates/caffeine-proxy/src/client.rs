//! Caffeine backend client

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use reqwest::header::AUTHORIZATION;
use reqwest::{Client, Method, Response};
use serde_json::{Map, Value};
use std::fmt;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

use crate::error::ProxyError;

/// Caffeine backend client configuration
#[derive(Clone)]
pub struct CaffeineClientConfig {
    /// Base URL of the backend cache-management API
    pub url: String,
    /// Username for authentication
    pub username: String,
    /// Password for authentication
    pub password: String,
    /// Skip TLS certificate verification
    pub skip_tls_verify: bool,
    /// Request timeout applied by the shared HTTP client
    pub timeout: Option<Duration>,
}

impl fmt::Debug for CaffeineClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CaffeineClientConfig")
            .field("url", &self.url)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("skip_tls_verify", &self.skip_tls_verify)
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Backend cache-management API client
///
/// One instance is shared by every request; the underlying connection pool
/// is reused across calls.
pub struct CaffeineClient {
    config: CaffeineClientConfig,
    base: Url,
    client: Client,
}

impl CaffeineClient {
    /// Create a new backend client
    pub fn new(config: CaffeineClientConfig) -> Result<Self, ProxyError> {
        let base = Url::parse(&config.url)
            .map_err(|e| ProxyError::InvalidUrl(format!("{}: {}", config.url, e)))?;

        if base.cannot_be_a_base() {
            return Err(ProxyError::InvalidUrl(format!(
                "{}: not a hierarchical URL",
                config.url
            )));
        }

        let mut builder = Client::builder();

        if config.skip_tls_verify {
            builder = builder.danger_accept_invalid_certs(true);
        }

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build()?;

        info!("Created caffeine backend client for {}", config.url);

        Ok(Self {
            config,
            base,
            client,
        })
    }

    /// Base URL as configured, without a trailing slash
    pub fn base_url(&self) -> &str {
        self.config.url.trim_end_matches('/')
    }

    /// Externally advertised URI of a provisioned cache
    pub fn cache_uri(&self, service_id: &str) -> String {
        format!("{}/caffeine/{}", self.base_url(), service_id)
    }

    /// Build an endpoint URL below the base, percent-encoding every segment
    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> Url {
        let mut url = self.base.clone();

        // new() rejects cannot-be-a-base URLs, so this always succeeds
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        url
    }

    /// Make an authenticated request, failing on any non-2xx status
    async fn send(&self, method: Method, url: Url) -> Result<Response, ProxyError> {
        debug!("{} {}", method, url);

        let response = self
            .client
            .request(method, url)
            .header(
                AUTHORIZATION,
                basic_auth_header(&self.config.username, &self.config.password),
            )
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProxyError::UpstreamError {
                status: status.as_u16(),
                message: response.text().await.unwrap_or_default(),
            });
        }

        Ok(response)
    }

    /// Create a cache for a service instance
    pub async fn create_cache(
        &self,
        service_id: &str,
        expire_seconds: u32,
        maximum_size: u32,
    ) -> Result<(), ProxyError> {
        let expire_seconds = expire_seconds.to_string();
        let maximum_size = maximum_size.to_string();
        let url = self.endpoint(
            &["caffeine"],
            &[
                ("service_id", service_id),
                ("expire_second", &expire_seconds),
                ("maximum_size", &maximum_size),
            ],
        );

        self.send(Method::POST, url).await?;
        Ok(())
    }

    /// Delete the cache of a service instance
    pub async fn delete_cache(&self, service_id: &str) -> Result<(), ProxyError> {
        let url = self.endpoint(&["caffeine", service_id], &[]);
        self.send(Method::DELETE, url).await?;
        Ok(())
    }

    /// Issue credentials for a service instance
    pub async fn create_credentials(
        &self,
        service_id: &str,
        username: &str,
    ) -> Result<Map<String, Value>, ProxyError> {
        let url = self.endpoint(
            &["credentials"],
            &[("service_id", service_id), ("username", username)],
        );

        let response = self.send(Method::POST, url).await?;
        Ok(response.json().await?)
    }

    /// Revoke credentials previously issued for a service instance
    pub async fn delete_credentials(
        &self,
        service_id: &str,
        username: &str,
    ) -> Result<(), ProxyError> {
        let url = self.endpoint(&["credentials", service_id, username], &[]);
        self.send(Method::DELETE, url).await?;
        Ok(())
    }
}

/// Build a `Basic` authorization header value
pub fn basic_auth_header(username: &str, password: &str) -> String {
    format!(
        "Basic {}",
        STANDARD.encode(format!("{}:{}", username, password))
    )
}
