//! Upstream WHOIS lookup client.
//!
//! [`WhoisXmlClient`] issues the single GET request that backs a lookup and
//! returns the raw JSON payload. Mapping into records happens in
//! [`crate::mapper`].

use crate::error::LookupError;
use crate::types::LookupConfig;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Source of raw WHOIS payloads.
///
/// [`WhoisXmlClient`] is the only production implementation; the seam lets
/// the session run against canned payloads.
pub trait WhoisSource {
    /// Fetch the raw payload for `domain`.
    fn fetch(&self, domain: &str) -> impl Future<Output = Result<Value, LookupError>>;
}

/// Client for the WhoisXML API `WhoisService` endpoint.
#[derive(Clone)]
pub struct WhoisXmlClient {
    /// HTTP client for lookup requests
    http_client: reqwest::Client,
    /// Endpoint without query string
    endpoint: String,
    /// Credential sent as `apiKey`
    api_key: SecretString,
    /// Upper bound for one lookup
    timeout: Duration,
}

impl WhoisXmlClient {
    /// Create a client from resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::MissingApiKey`] if no key was configured, or a
    /// transport error if the HTTP client cannot be built.
    pub fn new(config: &LookupConfig) -> Result<Self, LookupError> {
        let api_key = config.api_key.clone().ok_or(LookupError::MissingApiKey)?;

        if config.endpoint.trim().is_empty() {
            return Err(LookupError::config("Endpoint cannot be empty"));
        }

        // tokio timeout fires first
        let transport_timeout = config
            .timeout
            .checked_add(Duration::from_secs(2))
            .unwrap_or(config.timeout);

        let http_client = reqwest::Client::builder()
            .timeout(transport_timeout)
            .build()
            .map_err(|e| {
                LookupError::transport_with_source("Failed to create HTTP client", e.to_string())
            })?;

        Ok(Self {
            http_client,
            endpoint: config.endpoint.clone(),
            api_key,
            timeout: config.timeout,
        })
    }

    /// The endpoint this client sends requests to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn request(&self, domain: &str) -> Result<Value, LookupError> {
        let response = self
            .http_client
            .get(&self.endpoint)
            .query(&[
                ("domainName", domain),
                ("apiKey", self.api_key.expose_secret()),
                ("outputFormat", "json"),
            ])
            .send()
            .await?;

        let status = response.status();
        debug!(domain, %status, "lookup response received");

        if !status.is_success() {
            return Err(LookupError::http_status(domain, status.as_u16()));
        }

        let body = response.text().await?;
        let payload = serde_json::from_str::<Value>(&body)?;
        Ok(payload)
    }
}

impl WhoisSource for WhoisXmlClient {
    async fn fetch(&self, domain: &str) -> Result<Value, LookupError> {
        // apiKey stays out of the log line
        debug!(domain, endpoint = %self.endpoint, "sending lookup request");

        match tokio::time::timeout(self.timeout, self.request(domain)).await {
            Ok(result) => result,
            Err(_) => Err(LookupError::timeout("WHOIS lookup request", self.timeout)),
        }
    }
}

impl std::fmt::Debug for WhoisXmlClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhoisXmlClient")
            .field("endpoint", &self.endpoint)
            .field("api_key", &"[redacted]")
            .field("timeout", &self.timeout)
            .finish()
    }
}
