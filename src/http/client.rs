//! Solr HTTP client
//!
//! Provides the one client handle the rest of the crate talks through:
//! - Basic auth on every request
//! - Automatic retries with exponential backoff for idempotent GETs
//! - Form-encoded POST for `/select` queries (single attempt)
//! - Debug logging of outgoing query parameters

use crate::error::{is_retryable_status, Error, Result};
use crate::types::ParamList;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, warn};

/// Remediation hint attached to 403 responses. Catalog deployments only
/// expose their Solr cores when the diagnostic mode is switched on.
const FORBIDDEN_HINT: &str = "Please ensure Dev Mode is enabled in the catalog service.";

/// Configuration for the Solr client
#[derive(Debug, Clone)]
pub struct SolrClientConfig {
    /// Hostname of the catalog's Solr endpoint
    pub host: String,
    /// Port of the catalog's Solr endpoint
    pub port: u16,
    /// Basic auth user name
    pub username: String,
    /// Basic auth password
    pub password: String,
    /// Use https instead of http
    pub use_tls: bool,
    /// Request timeout
    pub timeout: Duration,
    /// Maximum number of retries for idempotent GETs
    pub max_retries: u32,
    /// Initial delay for backoff
    pub initial_backoff: Duration,
    /// Maximum delay for backoff
    pub max_backoff: Duration,
}

impl Default for SolrClientConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 7187,
            username: String::new(),
            password: String::new(),
            use_tls: false,
            timeout: Duration::from_secs(30),
            max_retries: 10,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(60),
        }
    }
}

impl SolrClientConfig {
    /// Create a new config builder
    pub fn builder() -> SolrClientConfigBuilder {
        SolrClientConfigBuilder::default()
    }
}

/// Builder for Solr client config
#[derive(Default)]
pub struct SolrClientConfigBuilder {
    config: SolrClientConfig,
}

impl SolrClientConfigBuilder {
    /// Set the host
    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.config.host = host.into();
        self
    }

    /// Set the port
    pub fn port(mut self, port: u16) -> Self {
        self.config.port = port;
        self
    }

    /// Set basic auth credentials
    pub fn credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.username = username.into();
        self.config.password = password.into();
        self
    }

    /// Enable TLS
    pub fn use_tls(mut self, use_tls: bool) -> Self {
        self.config.use_tls = use_tls;
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Set max retries for idempotent GETs
    pub fn max_retries(mut self, retries: u32) -> Self {
        self.config.max_retries = retries;
        self
    }

    /// Set backoff bounds
    pub fn backoff(mut self, initial: Duration, max: Duration) -> Self {
        self.config.initial_backoff = initial;
        self.config.max_backoff = max;
        self
    }

    /// Build the config
    pub fn build(self) -> SolrClientConfig {
        self.config
    }
}

/// HTTP client for one Solr endpoint.
///
/// Holds one connection pool reused across calls. Opened at startup,
/// dropped at shutdown; callers borrow it for the lifetime of a query.
pub struct SolrClient {
    client: Client,
    config: SolrClientConfig,
}

impl SolrClient {
    /// Create a new client with the given configuration
    pub fn new(config: SolrClientConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(format!("navrep/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to build HTTP client");

        Self { client, config }
    }

    /// Shorthand constructor from connection details
    pub fn connect(
        host: impl Into<String>,
        port: u16,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::new(
            SolrClientConfig::builder()
                .host(host)
                .port(port)
                .credentials(username, password)
                .build(),
        )
    }

    /// Base URL of the Solr service, e.g. `http://host:7187/solr`
    pub fn base_url(&self) -> String {
        let protocol = if self.config.use_tls { "https" } else { "http" };
        format!(
            "{}://{}:{}/solr",
            protocol, self.config.host, self.config.port
        )
    }

    /// Base URL of the catalog's REST API, e.g. `http://host:7187/api/v9`
    pub fn api_url(&self, version: u32) -> String {
        let protocol = if self.config.use_tls { "https" } else { "http" };
        format!(
            "{}://{}:{}/api/v{}",
            protocol, self.config.host, self.config.port, version
        )
    }

    /// Client configuration
    pub fn config(&self) -> &SolrClientConfig {
        &self.config
    }

    /// Make an authenticated GET request, retrying transient failures.
    ///
    /// GETs against Solr are idempotent reads, so transport errors and
    /// retryable statuses (429/5xx) are retried up to `max_retries` with
    /// exponential backoff before surfacing as fatal.
    pub async fn get(&self, url: &str, params: &ParamList) -> Result<Response> {
        debug!("Query: {:?}", params);

        let max_retries = self.config.max_retries;
        let mut last_error = None;
        let mut attempt = 0;

        while attempt <= max_retries {
            let req = self
                .client
                .get(url)
                .basic_auth(&self.config.username, Some(&self.config.password))
                .query(params);

            match req.send().await {
                Ok(response) => {
                    let status = response.status();

                    if is_retryable_status(status.as_u16()) && attempt < max_retries {
                        let delay = self.calculate_backoff(attempt);
                        warn!(
                            "Request failed with {}, attempt {}/{}, retrying in {:?}",
                            status.as_u16(),
                            attempt + 1,
                            max_retries + 1,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        last_error = Some(Error::HttpStatus {
                            status: status.as_u16(),
                            body: String::new(),
                        });
                        continue;
                    }

                    return check_status(response).await;
                }
                Err(e) => {
                    if (e.is_timeout() || e.is_connect()) && attempt < max_retries {
                        let delay = self.calculate_backoff(attempt);
                        warn!(
                            "Transport error, attempt {}/{}, retrying in {:?}: {}",
                            attempt + 1,
                            max_retries + 1,
                            delay,
                            e
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        last_error = Some(if e.is_timeout() {
                            Error::Timeout {
                                timeout_ms: self.config.timeout.as_millis() as u64,
                            }
                        } else {
                            Error::Http(e)
                        });
                        continue;
                    }

                    return Err(Error::Http(e));
                }
            }
        }

        Err(last_error.unwrap_or(Error::MaxRetriesExceeded { max_retries }))
    }

    /// Make an authenticated GET request and parse the JSON response
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str, params: &ParamList) -> Result<T> {
        let response = self.get(url, params).await?;
        let json: T = response.json().await.map_err(Error::Http)?;
        Ok(json)
    }

    /// Make an authenticated form-encoded POST request.
    ///
    /// POSTs are issued once; Solr `/select` accepts POST for long parameter
    /// lists, but the call is not assumed idempotent so it is never retried.
    pub async fn post_form(&self, url: &str, params: &ParamList) -> Result<Response> {
        debug!("Query: {:?}", params);

        let response = self
            .client
            .post(url)
            .basic_auth(&self.config.username, Some(&self.config.password))
            .form(params)
            .send()
            .await
            .map_err(Error::Http)?;

        check_status(response).await
    }

    /// Make an authenticated form-encoded POST and parse the JSON response
    pub async fn post_json<T: DeserializeOwned>(&self, url: &str, params: &ParamList) -> Result<T> {
        let response = self.post_form(url, params).await?;
        let json: T = response.json().await.map_err(Error::Http)?;
        Ok(json)
    }

    /// Calculate backoff delay for a given attempt
    fn calculate_backoff(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt);
        std::cmp::min(
            self.config.initial_backoff * factor,
            self.config.max_backoff,
        )
    }
}

impl std::fmt::Debug for SolrClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SolrClient")
            .field("host", &self.config.host)
            .field("port", &self.config.port)
            .field("use_tls", &self.config.use_tls)
            .finish_non_exhaustive()
    }
}

/// Map response statuses to errors. 403 carries the remediation hint.
async fn check_status(response: Response) -> Result<Response> {
    let status = response.status();

    if status == StatusCode::FORBIDDEN {
        return Err(Error::forbidden(FORBIDDEN_HINT));
    }

    if status.is_client_error() || status.is_server_error() {
        let body = response.text().await.unwrap_or_default();
        return Err(Error::HttpStatus {
            status: status.as_u16(),
            body,
        });
    }

    Ok(response)
}
