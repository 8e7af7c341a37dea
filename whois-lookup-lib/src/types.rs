//! Core data types for WHOIS lookups.
//!
//! This module defines the normalized records produced from upstream
//! payloads, the display mode that filters them, and the runtime
//! configuration of a lookup client.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// Value used for every field the upstream response did not provide.
pub const PLACEHOLDER: &str = "Not available";

/// Default upstream endpoint for the WhoisXML API lookup service.
pub const DEFAULT_ENDPOINT: &str = "https://www.whoisxmlapi.com/whoisserver/WhoisService";

/// Registration attributes of a domain.
///
/// Every string field is always populated; missing upstream data is
/// represented by [`PLACEHOLDER`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainRecord {
    pub domain_name: String,
    pub registrar_name: String,
    pub registration_date: String,
    pub expiration_date: String,
    /// Formatted as "<n> years"
    pub estimated_domain_age: String,
    /// Name server hostnames in upstream order (empty when absent)
    pub hostnames: Vec<String>,
}

/// Contact attributes of a domain registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactRecord {
    pub registrant_name: String,
    pub technical_contact_name: String,
    pub administrative_contact_name: String,
    pub contact_email: String,
}

/// The normalized pair produced by one successful lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LookupRecord {
    pub domain: DomainRecord,
    pub contact: ContactRecord,
}

/// Which record(s) the renderer shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    /// Only the domain table
    Domain,
    /// Only the contact table
    Contact,
    /// Both tables, domain first
    #[default]
    Both,
}

impl DisplayMode {
    /// All modes in the order the selector lists them.
    pub const ALL: [DisplayMode; 3] = [DisplayMode::Domain, DisplayMode::Contact, DisplayMode::Both];

    pub fn shows_domain(self) -> bool {
        matches!(self, DisplayMode::Domain | DisplayMode::Both)
    }

    pub fn shows_contact(self) -> bool {
        matches!(self, DisplayMode::Contact | DisplayMode::Both)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DisplayMode::Domain => "domain",
            DisplayMode::Contact => "contact",
            DisplayMode::Both => "both",
        }
    }
}

impl fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DisplayMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "domain" => Ok(DisplayMode::Domain),
            "contact" => Ok(DisplayMode::Contact),
            "both" => Ok(DisplayMode::Both),
            other => Err(format!(
                "unknown display mode '{}', expected domain, contact, or both",
                other
            )),
        }
    }
}

/// Resolved runtime settings for the upstream client.
///
/// The API key is never part of the source; it is supplied at startup
/// from a flag, the environment, or a configuration file.
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// Upstream endpoint (without query string)
    pub endpoint: String,

    /// Credential sent as the `apiKey` query parameter
    pub api_key: Option<SecretString>,

    /// Upper bound for a single lookup request
    /// Default: 10 seconds
    pub timeout: Duration,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: None,
            timeout: Duration::from_secs(10),
        }
    }
}

impl LookupConfig {
    /// Set the upstream endpoint.
    pub fn with_endpoint<E: Into<String>>(mut self, endpoint: E) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the API key.
    pub fn with_api_key<K: Into<String>>(mut self, key: K) -> Self {
        self.api_key = Some(SecretString::from(key.into()));
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}
